//! Concrete authentication backend
//!
//! Wraps `AuthConfig` and turns a bearer token into a [`SignedInUser`].
//! No database lookups happen here: the token is the user context.

use crate::config::AuthConfig;
use crate::context::SignedInUser;
use crate::error::AuthError;
use crate::jwt::validate_jwt_token;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate a bearer token and build the signed-in user it describes
    pub fn authenticate_jwt(&self, token: &str) -> Result<SignedInUser, AuthError> {
        let claims = validate_jwt_token(token, &self.config)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            tracing::debug!(sub = %claims.sub, "Token subject is not a numeric user id");
            AuthError::InvalidUserId
        })?;

        Ok(SignedInUser {
            user_id,
            org_id: claims.org_id,
            org_role: claims.org_role,
            login: claims.login,
            email: claims.email,
            is_server_admin: claims.is_server_admin,
        })
    }
}
