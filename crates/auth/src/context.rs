//! Signed-in user context

use crate::types::OrgRole;

/// The authenticated caller of a request, scoped to one organization
#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub user_id: i64,
    pub org_id: i64,
    pub org_role: OrgRole,
    pub login: String,
    pub email: Option<String>,
    pub is_server_admin: bool,
}

impl SignedInUser {
    /// Check if the user administers its current organization
    pub fn is_org_admin(&self) -> bool {
        self.org_role == OrgRole::Admin
    }
}
