//! Permission mapping for team resources
//!
//! A membership level is turned into a label, the label into a set of
//! actions, and the actions are granted on the team's scope.

use crate::domain::entities::{ActionSet, PermissionType};
use crate::domain::error::PermissionError;

/// Display label for the zero permission level
pub const MEMBER_LABEL: &str = "Member";

/// Label for team administrators
pub const ADMIN_LABEL: &str = "Admin";

pub const ACTION_TEAMS_READ: &str = "teams:read";
pub const ACTION_TEAMS_WRITE: &str = "teams:write";
pub const ACTION_TEAMS_DELETE: &str = "teams:delete";
pub const ACTION_TEAMS_PERMISSIONS_READ: &str = "teams.permissions:read";
pub const ACTION_TEAMS_PERMISSIONS_WRITE: &str = "teams.permissions:write";

/// Label handed to the permission mapper for a membership level.
///
/// The zero level has an empty label, but the permission service lists team
/// members as "Member". Keep this the only place that knows about it.
pub fn normalize_permission_label(permission: PermissionType) -> &'static str {
    match permission.as_str() {
        "" => MEMBER_LABEL,
        label => label,
    }
}

/// Resource id of a team in the resource-permission store
pub fn team_resource_id(team_id: i64) -> String {
    team_id.to_string()
}

/// Scope every team grant is attached to
pub fn team_scope(resource_id: &str) -> String {
    format!("teams:id:{}", resource_id)
}

/// Label → actions table owned by a resource-permission service
#[derive(Debug, Clone)]
pub struct PermissionTable {
    entries: Vec<(&'static str, ActionSet)>,
}

impl PermissionTable {
    /// The table for team resources
    pub fn teams() -> Self {
        Self {
            entries: vec![
                (MEMBER_LABEL, [ACTION_TEAMS_READ].into_iter().collect()),
                (
                    ADMIN_LABEL,
                    [
                        ACTION_TEAMS_READ,
                        ACTION_TEAMS_WRITE,
                        ACTION_TEAMS_DELETE,
                        ACTION_TEAMS_PERMISSIONS_READ,
                        ACTION_TEAMS_PERMISSIONS_WRITE,
                    ]
                    .into_iter()
                    .collect(),
                ),
            ],
        }
    }

    /// Known labels, in table order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    /// Actions granted by a label
    pub fn map_permission(&self, label: &str) -> Result<ActionSet, PermissionError> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, actions)| actions.clone())
            .ok_or_else(|| PermissionError::UnknownPermission(label.to_string()))
    }

    /// Label whose action set is exactly `actions`
    pub fn permission_for(&self, actions: &ActionSet) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, granted)| granted == actions)
            .map(|(label, _)| *label)
    }
}
