//! Authorization gate for membership mutations
//!
//! Two strategies coexist while deployments migrate: the legacy team
//! guardian, and fine-grained access control where a policy engine in front
//! of the handlers has already made the decision.

use std::sync::Arc;

use async_trait::async_trait;
use teamgate_auth::SignedInUser;

use crate::domain::error::MembershipError;

/// Which authorization strategy the deployment runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessControlMode {
    #[default]
    Legacy,
    FineGrained,
}

impl AccessControlMode {
    /// Map the `accesscontrol` feature toggle onto a mode
    pub fn from_flag(accesscontrol_enabled: bool) -> Self {
        if accesscontrol_enabled {
            AccessControlMode::FineGrained
        } else {
            AccessControlMode::Legacy
        }
    }

    pub fn is_legacy(self) -> bool {
        self == AccessControlMode::Legacy
    }
}

/// Decides whether an actor may administer a team
#[async_trait]
pub trait TeamGuardian: Send + Sync {
    /// `Forbidden` when the actor lacks admin rights on the team,
    /// `StoreFailure` when the lookup itself failed.
    async fn can_admin(
        &self,
        org_id: i64,
        team_id: i64,
        actor: &SignedInUser,
    ) -> Result<(), MembershipError>;
}

/// Authorization strategy applied before any membership mutation
#[derive(Clone)]
pub enum AuthorizationGate {
    Legacy(Arc<dyn TeamGuardian>),
    /// Enforced upstream; the gate lets everything through
    FineGrained,
}

impl AuthorizationGate {
    pub fn new(mode: AccessControlMode, guardian: Arc<dyn TeamGuardian>) -> Self {
        match mode {
            AccessControlMode::Legacy => AuthorizationGate::Legacy(guardian),
            AccessControlMode::FineGrained => AuthorizationGate::FineGrained,
        }
    }

    pub fn mode(&self) -> AccessControlMode {
        match self {
            AuthorizationGate::Legacy(_) => AccessControlMode::Legacy,
            AuthorizationGate::FineGrained => AccessControlMode::FineGrained,
        }
    }

    /// Check whether `actor` may mutate the membership of `team_id`
    pub async fn can_mutate(
        &self,
        actor: &SignedInUser,
        org_id: i64,
        team_id: i64,
    ) -> Result<(), MembershipError> {
        match self {
            AuthorizationGate::Legacy(guardian) => guardian.can_admin(org_id, team_id, actor).await,
            AuthorizationGate::FineGrained => Ok(()),
        }
    }
}
