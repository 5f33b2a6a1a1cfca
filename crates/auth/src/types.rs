//! Organization roles as seen by the auth layer

use serde::{Deserialize, Serialize};

/// Role of a user within an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrgRole {
    #[default]
    Viewer,
    Editor,
    Admin,
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgRole::Viewer => write!(f, "Viewer"),
            OrgRole::Editor => write!(f, "Editor"),
            OrgRole::Admin => write!(f, "Admin"),
        }
    }
}
