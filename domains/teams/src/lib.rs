//! Teams domain: membership authorization, permission mapping, member listings

pub mod api;
pub mod domain;
pub mod mock;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::access::{AccessControlMode, AuthorizationGate, TeamGuardian};
pub use domain::entities::*;
pub use domain::error::{Entity, MembershipError, PermissionError};
pub use domain::guardian::LegacyTeamGuardian;
pub use domain::permissions::{normalize_permission_label, team_resource_id, PermissionTable};
pub use domain::settings::TeamsSettings;

// Re-export repository types
pub use repository::{
    ResourcePermissionService, TeamMemberRepository, TeamMemberStore, TeamPermissionService,
    TeamsRepositories,
};

pub use service::{AddMember, MemberOperation, MembershipMutator, MembershipReader};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;

pub use mock::InMemoryTeamStore;
