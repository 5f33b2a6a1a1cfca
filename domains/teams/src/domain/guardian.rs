//! Team guardian used in legacy access-control mode

use std::sync::Arc;

use async_trait::async_trait;
use teamgate_auth::SignedInUser;

use crate::domain::access::TeamGuardian;
use crate::domain::entities::PermissionType;
use crate::domain::error::MembershipError;
use crate::repository::TeamMemberStore;

/// Grants team administration to org admins and to team members holding the
/// `Admin` permission on that team.
#[derive(Clone)]
pub struct LegacyTeamGuardian {
    members: Arc<dyn TeamMemberStore>,
}

impl LegacyTeamGuardian {
    pub fn new(members: Arc<dyn TeamMemberStore>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl TeamGuardian for LegacyTeamGuardian {
    async fn can_admin(
        &self,
        org_id: i64,
        team_id: i64,
        actor: &SignedInUser,
    ) -> Result<(), MembershipError> {
        if actor.is_org_admin() {
            return Ok(());
        }

        if actor.org_id != org_id {
            return Err(MembershipError::Forbidden(
                "User cannot administer teams in a different organization".to_string(),
            ));
        }

        let permission = self
            .members
            .member_permission(org_id, team_id, actor.user_id)
            .await
            .map_err(|e| MembershipError::store("Failed to look up team admin", e))?;

        match permission {
            Some(PermissionType::Admin) => Ok(()),
            _ => Err(MembershipError::Forbidden(
                "User is not a team administrator".to_string(),
            )),
        }
    }
}
