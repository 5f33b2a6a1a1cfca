//! Membership mutations
//!
//! Every mutation runs the authorization gate first, then its precondition
//! check, and only then touches the resource-permission store. A failed
//! precondition never reaches the store.

use std::sync::Arc;

use teamgate_auth::SignedInUser;

use crate::domain::access::AuthorizationGate;
use crate::domain::entities::{ActionSet, PermissionType, ResourcePermission, SetUserPermission};
use crate::domain::error::{Entity, MembershipError, PermissionError};
use crate::domain::permissions::{normalize_permission_label, team_resource_id};
use crate::repository::{ResourcePermissionService, TeamMemberStore};

/// Membership mutation, used to phrase authorization failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOperation {
    Add,
    Update,
    Remove,
}

impl MemberOperation {
    pub fn verb(self) -> &'static str {
        match self {
            MemberOperation::Add => "add",
            MemberOperation::Update => "update",
            MemberOperation::Remove => "remove",
        }
    }
}

/// Member to add to a team
#[derive(Debug, Clone, PartialEq)]
pub struct AddMember {
    pub user_id: i64,
    pub permission: PermissionType,
    /// Membership comes from an external identity sync
    pub external: bool,
}

/// Adds, updates and removes team members
#[derive(Clone)]
pub struct MembershipMutator {
    gate: AuthorizationGate,
    members: Arc<dyn TeamMemberStore>,
    permissions: Arc<dyn ResourcePermissionService>,
}

impl MembershipMutator {
    pub fn new(
        gate: AuthorizationGate,
        members: Arc<dyn TeamMemberStore>,
        permissions: Arc<dyn ResourcePermissionService>,
    ) -> Self {
        Self {
            gate,
            members,
            permissions,
        }
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// Add a user who is not yet on the team
    pub async fn add_member(
        &self,
        actor: &SignedInUser,
        org_id: i64,
        team_id: i64,
        member: AddMember,
    ) -> Result<ResourcePermission, MembershipError> {
        self.authorize(MemberOperation::Add, actor, org_id, team_id)
            .await?;

        let exists = self
            .members
            .is_team_member(org_id, team_id, member.user_id)
            .await
            .map_err(|e| MembershipError::store("Failed to add Member to Team", e))?;

        if exists {
            return Err(MembershipError::AlreadyExists);
        }

        let actions = self.actions_for(member.permission)?;
        let granted = self
            .permissions
            .set_user_permission(SetUserPermission {
                org_id,
                user_id: member.user_id,
                resource_id: team_resource_id(team_id),
                actions,
                external: Some(member.external),
            })
            .await
            .map_err(|e| MembershipError::store("Failed to add Member to Team", e))?;

        tracing::info!(
            org_id,
            team_id,
            user_id = member.user_id,
            actor_id = actor.user_id,
            permission = %granted.permission,
            "Team member added"
        );

        Ok(granted)
    }

    /// Change the permission of an existing member. The external flag is kept.
    pub async fn update_member(
        &self,
        actor: &SignedInUser,
        org_id: i64,
        team_id: i64,
        user_id: i64,
        permission: PermissionType,
    ) -> Result<ResourcePermission, MembershipError> {
        self.authorize(MemberOperation::Update, actor, org_id, team_id)
            .await?;

        let exists = self
            .members
            .is_team_member(org_id, team_id, user_id)
            .await
            .map_err(|e| MembershipError::store("Failed to update team member.", e))?;

        if !exists {
            return Err(MembershipError::NotFound(Entity::Member));
        }

        let actions = self.actions_for(permission)?;
        let granted = self
            .permissions
            .set_user_permission(SetUserPermission {
                org_id,
                user_id,
                resource_id: team_resource_id(team_id),
                actions,
                external: None,
            })
            .await
            .map_err(|e| MembershipError::store("Failed to update team member.", e))?;

        tracing::info!(
            org_id,
            team_id,
            user_id,
            actor_id = actor.user_id,
            permission = %granted.permission,
            "Team member updated"
        );

        Ok(granted)
    }

    /// Remove a member by revoking every action it holds on the team
    pub async fn remove_member(
        &self,
        actor: &SignedInUser,
        org_id: i64,
        team_id: i64,
        user_id: i64,
    ) -> Result<(), MembershipError> {
        self.authorize(MemberOperation::Remove, actor, org_id, team_id)
            .await?;

        self.permissions
            .set_user_permission(SetUserPermission {
                org_id,
                user_id,
                resource_id: team_resource_id(team_id),
                actions: ActionSet::new(),
                external: None,
            })
            .await
            .map_err(|e| match e {
                PermissionError::TeamNotFound => MembershipError::NotFound(Entity::Team),
                PermissionError::TeamMemberNotFound => MembershipError::NotFound(Entity::Member),
                other => MembershipError::store("Failed to remove Member from Team", other),
            })?;

        tracing::info!(
            org_id,
            team_id,
            user_id,
            actor_id = actor.user_id,
            "Team member removed"
        );

        Ok(())
    }

    async fn authorize(
        &self,
        operation: MemberOperation,
        actor: &SignedInUser,
        org_id: i64,
        team_id: i64,
    ) -> Result<(), MembershipError> {
        match self.gate.can_mutate(actor, org_id, team_id).await {
            Err(MembershipError::Forbidden(reason)) => {
                tracing::warn!(
                    org_id,
                    team_id,
                    actor_id = actor.user_id,
                    reason = %reason,
                    "Team member {} denied",
                    operation.verb()
                );
                Err(MembershipError::Forbidden(format!(
                    "Not allowed to {} team member",
                    operation.verb()
                )))
            }
            other => other,
        }
    }

    fn actions_for(&self, permission: PermissionType) -> Result<ActionSet, MembershipError> {
        let label = normalize_permission_label(permission);
        self.permissions.map_permission(label).map_err(|e| match e {
            PermissionError::UnknownPermission(label) => MembershipError::UnknownPermission(label),
            other => MembershipError::store("Failed to map permission", other),
        })
    }
}
