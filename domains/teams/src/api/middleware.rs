//! Teams domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use teamgate_auth::AuthBackend;

use crate::domain::access::AuthorizationGate;
use crate::domain::guardian::LegacyTeamGuardian;
use crate::domain::settings::TeamsSettings;
use crate::repository::{ResourcePermissionService, TeamMemberStore};
use crate::service::{MembershipMutator, MembershipReader};

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub auth: AuthBackend,
    pub mutator: MembershipMutator,
    pub reader: MembershipReader,
}

impl TeamsState {
    /// Wire the membership services over the given stores
    pub fn new(
        auth: AuthBackend,
        settings: TeamsSettings,
        members: Arc<dyn TeamMemberStore>,
        permissions: Arc<dyn ResourcePermissionService>,
    ) -> Self {
        let guardian = Arc::new(LegacyTeamGuardian::new(members.clone()));
        let gate = AuthorizationGate::new(settings.access_control, guardian);
        let settings = Arc::new(settings);

        Self {
            auth,
            mutator: MembershipMutator::new(gate, members.clone(), permissions),
            reader: MembershipReader::new(members, settings),
        }
    }
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
