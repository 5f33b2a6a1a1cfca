//! Repository interfaces and Postgres implementations for the teams domain

pub mod memberships;
pub mod permissions;

use async_trait::async_trait;
use sqlx::PgPool;
use teamgate_common::RepositoryError;

use crate::domain::entities::{
    ActionSet, PermissionType, ResourcePermission, SetUserPermission, TeamMember,
};
use crate::domain::error::PermissionError;

pub use memberships::TeamMemberRepository;
pub use permissions::TeamPermissionService;

/// Read access to team membership rows
#[async_trait]
pub trait TeamMemberStore: Send + Sync {
    /// Existence check used to keep add/update idempotent
    async fn is_team_member(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<bool, RepositoryError>;

    /// Permission level of a member, `None` if the user is not on the team
    async fn member_permission(
        &self,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<PermissionType>, RepositoryError>;

    /// All members of a team joined with their user records
    async fn list_members(
        &self,
        org_id: i64,
        team_id: i64,
    ) -> Result<Vec<TeamMember>, RepositoryError>;
}

/// Store mapping (organization, user, resource) to granted actions
#[async_trait]
pub trait ResourcePermissionService: Send + Sync {
    /// Actions granted by a permission label
    fn map_permission(&self, permission: &str) -> Result<ActionSet, PermissionError>;

    /// Replace the actions a user holds on a resource. An empty set revokes
    /// everything, which removes the membership.
    async fn set_user_permission(
        &self,
        cmd: SetUserPermission,
    ) -> Result<ResourcePermission, PermissionError>;
}

/// Combined repository access for the teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pub members: TeamMemberRepository,
    pub permissions: TeamPermissionService,
}

impl TeamsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            members: TeamMemberRepository::new(pool.clone()),
            permissions: TeamPermissionService::new(pool),
        }
    }
}
