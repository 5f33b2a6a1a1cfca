//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::OrgRole;

/// Claims carried by an access token issued by the login service
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (numeric user ID)
    pub sub: String,
    /// Organization the session is currently scoped to
    pub org_id: i64,
    /// Role within that organization
    pub org_role: OrgRole,
    pub login: String,
    pub email: Option<String>,
    /// Server-wide administrator
    #[serde(default)]
    pub is_server_admin: bool,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
