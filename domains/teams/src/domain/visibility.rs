//! Hidden-user policy for member listings

use std::collections::HashSet;
use teamgate_auth::SignedInUser;

/// Logins configured as hidden from other users
#[derive(Debug, Clone, Default)]
pub struct HiddenUsers(HashSet<String>);

impl HiddenUsers {
    pub fn new<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(logins.into_iter().map(Into::into).collect())
    }

    /// Whether `login` must be left out of what `viewer` sees.
    ///
    /// Server admins see everyone and users always see themselves.
    pub fn is_hidden(&self, login: &str, viewer: &SignedInUser) -> bool {
        if login.is_empty() || viewer.is_server_admin || login == viewer.login {
            return false;
        }
        self.0.contains(login)
    }
}
