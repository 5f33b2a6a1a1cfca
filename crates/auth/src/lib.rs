//! Authentication middleware for the Teamgate API
//!
//! Decodes already-issued bearer tokens into a [`SignedInUser`] and provides
//! an axum extractor that works with any domain state implementing
//! `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod types;

pub use backend::AuthBackend;
pub use claims::AccessClaims;
pub use config::AuthConfig;
pub use context::SignedInUser;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use types::OrgRole;
