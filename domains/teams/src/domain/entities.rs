//! Domain entities for the teams domain
//!
//! Permission levels, action sets, team members and the write commands
//! accepted by the resource-permission store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Team membership permission level.
///
/// On the wire this is an integer code; `Member` is the zero value and its
/// canonical label is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PermissionType {
    #[default]
    Member,
    View,
    Edit,
    Admin,
}

impl PermissionType {
    /// Integer code used on the wire and in the `team_member` table
    pub fn code(self) -> i64 {
        match self {
            PermissionType::Member => 0,
            PermissionType::View => 1,
            PermissionType::Edit => 2,
            PermissionType::Admin => 4,
        }
    }

    /// Canonical label. `Member` has none.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Member => "",
            PermissionType::View => "View",
            PermissionType::Edit => "Edit",
            PermissionType::Admin => "Admin",
        }
    }

    /// Parse a label back into a level. Accepts both `""` and `"Member"`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "" | "Member" => Some(PermissionType::Member),
            "View" => Some(PermissionType::View),
            "Edit" => Some(PermissionType::Edit),
            "Admin" => Some(PermissionType::Admin),
            _ => None,
        }
    }
}

impl TryFrom<i64> for PermissionType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PermissionType::Member),
            1 => Ok(PermissionType::View),
            2 => Ok(PermissionType::Edit),
            4 => Ok(PermissionType::Admin),
            other => Err(format!("unknown permission code {}", other)),
        }
    }
}

impl From<PermissionType> for i64 {
    fn from(permission: PermissionType) -> Self {
        permission.code()
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of primitive action identifiers. Empty means "revoke everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(BTreeSet<String>);

impl ActionSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, action: &str) -> bool {
        self.0.contains(action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ActionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A team member as stored, joined with its user record
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub org_id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub login: String,
    pub email: String,
    pub name: String,
    /// Module that authenticated the user most recently, e.g. `oauth_github`
    pub auth_module: String,
    /// Membership synchronized from an external identity provider
    pub external: bool,
    pub permission: PermissionType,
}

/// Team member as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub org_id: i64,
    pub team_id: i64,
    pub user_id: i64,
    #[serde(rename = "auth_module")]
    pub auth_module: String,
    pub email: String,
    pub name: String,
    pub login: String,
    pub avatar_url: String,
    pub labels: Vec<String>,
    pub permission: PermissionType,
    pub external: bool,
}

/// Write command for the resource-permission store
#[derive(Debug, Clone, PartialEq)]
pub struct SetUserPermission {
    pub org_id: i64,
    pub user_id: i64,
    /// Team id rendered as a decimal string
    pub resource_id: String,
    pub actions: ActionSet,
    /// `Some` sets the external flag; `None` keeps what is stored
    pub external: Option<bool>,
}

/// Result of a resource-permission write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePermission {
    pub resource_id: String,
    pub user_id: i64,
    /// Label the action set resolved to; empty when everything was revoked
    pub permission: String,
    pub actions: ActionSet,
    pub scope: String,
    pub updated_at: DateTime<Utc>,
}
