//! Deployment settings consumed by the teams domain

use teamgate_common::Config;

use crate::domain::access::AccessControlMode;
use crate::domain::avatar::AvatarSettings;
use crate::domain::visibility::HiddenUsers;

/// Licensed feature that labels externally synced members
pub const TEAM_GROUP_SYNC_FEATURE: &str = "teamgroupsync";

/// Explicit configuration for the authorization gate and member listing
#[derive(Debug, Clone, Default)]
pub struct TeamsSettings {
    pub access_control: AccessControlMode,
    pub hidden_users: HiddenUsers,
    /// `teamgroupsync` is licensed
    pub team_group_sync: bool,
    pub avatars: AvatarSettings,
}

impl TeamsSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            access_control: AccessControlMode::from_flag(config.accesscontrol_enabled),
            hidden_users: HiddenUsers::new(config.hidden_users.iter().cloned()),
            team_group_sync: config.feature_enabled(TEAM_GROUP_SYNC_FEATURE),
            avatars: AvatarSettings {
                app_sub_url: config.app_sub_url.clone(),
                disable_gravatar: config.disable_gravatar,
            },
        }
    }
}
