//! Repository contracts and SQLite implementations for the entity layer.
//!
//! # Responsibility
//! - Translate between records and `customers`/`reservations` rows.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Lookups by id or name return `NotFound` instead of empty results.
//! - Store errors propagate unchanged; nothing is retried or swallowed.
//! - Read paths reject rows that violate record invariants.

use crate::db::DbError;
use crate::model::record::RecordValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer_repo;
pub mod reservation_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity named in a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customer,
    Reservation,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Reservation => write!(f, "reservation"),
        }
    }
}

/// Error for entity lookups and persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Caller input was rejected before reaching the store.
    InvalidInput(RecordValidationError),
    /// The store gateway failed.
    Db(DbError),
    /// No row matched the lookup.
    NotFound { entity: EntityKind, key: String },
    /// A persisted row violates a record invariant.
    InvalidData(String),
}

impl RepoError {
    /// HTTP-equivalent status for callers that render errors.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Db(_) | Self::InvalidData(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "no such {entity}: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
