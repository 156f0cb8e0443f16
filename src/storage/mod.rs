//! Credential storage capability.
//!
//! The login flow only depends on [`UserStore`]; the PostgreSQL implementation
//! lives in [`crate::db`] and [`memory::MemoryUserStore`] backs the tests.

use chrono::{DateTime, Utc};

pub mod memory;

/// A stored user credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Storage errors.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// No record matches the requested username.
    #[error("user not found")]
    UserNotFound,

    #[error("username already exists")]
    UsernameTaken,

    #[error("storage is closed")]
    Closed,

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("migration failed: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for StorageError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => Self::UserNotFound,
            other => Self::Diesel(other),
        }
    }
}

/// Read access to credential records.
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive lookup.
    fn find_by_username(&self, username: &str) -> Result<CredentialRecord, StorageError>;

    /// Checks that the store can serve queries.
    fn ping(&self) -> Result<(), StorageError>;

    /// Stops serving queries. Every later call fails with [`StorageError::Closed`].
    fn close(&self);
}
