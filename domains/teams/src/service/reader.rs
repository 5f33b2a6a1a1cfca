//! Member listings

use std::sync::Arc;

use teamgate_auth::SignedInUser;

use crate::domain::entities::{TeamMember, TeamMemberView};
use crate::domain::error::MembershipError;
use crate::domain::labels::auth_provider_label;
use crate::domain::settings::TeamsSettings;
use crate::repository::TeamMemberStore;

/// Lists team members as the caller is allowed to see them
#[derive(Clone)]
pub struct MembershipReader {
    members: Arc<dyn TeamMemberStore>,
    settings: Arc<TeamsSettings>,
}

impl MembershipReader {
    pub fn new(members: Arc<dyn TeamMemberStore>, settings: Arc<TeamsSettings>) -> Self {
        Self { members, settings }
    }

    /// Members of a team, with hidden users filtered out in legacy mode.
    ///
    /// Under fine-grained access control the hidden-user filter is not
    /// applied here.
    pub async fn list_members(
        &self,
        viewer: &SignedInUser,
        org_id: i64,
        team_id: i64,
    ) -> Result<Vec<TeamMemberView>, MembershipError> {
        let members = self
            .members
            .list_members(org_id, team_id)
            .await
            .map_err(|e| MembershipError::store("Failed to get Team Members", e))?;

        let filter_hidden = self.settings.access_control.is_legacy();
        let views: Vec<TeamMemberView> = members
            .into_iter()
            .filter(|m| !(filter_hidden && self.settings.hidden_users.is_hidden(&m.login, viewer)))
            .map(|m| self.present(m))
            .collect();

        tracing::debug!(org_id, team_id, count = views.len(), "Listed team members");
        Ok(views)
    }

    fn present(&self, member: TeamMember) -> TeamMemberView {
        let mut labels = Vec::new();
        if self.settings.team_group_sync && member.external {
            labels.push(auth_provider_label(&member.auth_module).to_string());
        }

        TeamMemberView {
            org_id: member.org_id,
            team_id: member.team_id,
            user_id: member.user_id,
            avatar_url: self.settings.avatars.avatar_url(&member.email),
            auth_module: member.auth_module,
            email: member.email,
            name: member.name,
            login: member.login,
            labels,
            permission: member.permission,
            external: member.external,
        }
    }
}
