//! Error kinds for membership operations and the resource-permission store

use teamgate_common::{Error, RepositoryError};
use thiserror::Error;

/// Entity a `NotFound` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Team,
    Member,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Team => write!(f, "Team"),
            Entity::Member => write!(f, "Team member"),
        }
    }
}

/// Failure of a membership read or mutation
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("{0}")]
    Forbidden(String),

    #[error("User is already added to this team")]
    AlreadyExists,

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("{0}")]
    StoreFailure(String),
}

impl MembershipError {
    /// Build a `StoreFailure` that keeps the underlying cause in the message
    pub(crate) fn store(context: &str, cause: impl std::fmt::Display) -> Self {
        MembershipError::StoreFailure(format!("{}: {}", context, cause))
    }
}

impl From<MembershipError> for Error {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::Forbidden(msg) => Error::Authorization(msg),
            MembershipError::AlreadyExists => Error::Conflict(err.to_string()),
            MembershipError::NotFound(_) => Error::NotFound(err.to_string()),
            MembershipError::UnknownPermission(_) => Error::Validation(err.to_string()),
            MembershipError::StoreFailure(msg) => Error::Internal(msg),
        }
    }
}

/// Failure reported by the resource-permission store
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Team not found")]
    TeamNotFound,

    #[error("Team member not found")]
    TeamMemberNotFound,

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("Invalid resource id: {0}")]
    InvalidResource(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for PermissionError {
    fn from(err: sqlx::Error) -> Self {
        PermissionError::Repository(RepositoryError::Connection(err))
    }
}
