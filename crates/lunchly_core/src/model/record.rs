//! Persistence state shared by all entity kinds.
//!
//! # Invariants
//! - `Unsaved` values have never been inserted; `Saved` values carry the
//!   store-generated surrogate key.
//! - The only transition is `Unsaved -> Saved`, performed by repositories.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-generated integer surrogate key.
pub type RecordId = i64;

/// An entity together with its persistence state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Record<T> {
    /// Never persisted; saving it performs an insert.
    Unsaved { fields: T },
    /// Persisted under `id`; saving it performs an update of that row.
    Saved { id: RecordId, fields: T },
}

impl<T> Record<T> {
    /// Wraps freshly entered fields that have no row yet.
    pub fn new(fields: T) -> Self {
        Self::Unsaved { fields }
    }

    /// Wraps fields hydrated from an existing row.
    pub fn saved(id: RecordId, fields: T) -> Self {
        Self::Saved { id, fields }
    }

    pub fn id(&self) -> Option<RecordId> {
        match self {
            Self::Unsaved { .. } => None,
            Self::Saved { id, .. } => Some(*id),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn fields(&self) -> &T {
        match self {
            Self::Unsaved { fields } | Self::Saved { fields, .. } => fields,
        }
    }

    /// Mutable access to the fields. The id is not reachable from here.
    pub fn fields_mut(&mut self) -> &mut T {
        match self {
            Self::Unsaved { fields } | Self::Saved { fields, .. } => fields,
        }
    }

    pub fn into_fields(self) -> T {
        match self {
            Self::Unsaved { fields } | Self::Saved { fields, .. } => fields,
        }
    }
}

impl<T: Clone> Record<T> {
    /// Moves an unsaved record into the saved state after an insert.
    ///
    /// A record that is already saved keeps its original id. Field types
    /// have no placeholder value, so the fields are copied across.
    pub(crate) fn mark_saved(&mut self, new_id: RecordId) {
        if let Self::Unsaved { fields } = self {
            *self = Self::Saved {
                id: new_id,
                fields: fields.clone(),
            };
        }
    }
}

impl<T> std::ops::Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.fields()
    }
}

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required name field is empty or whitespace.
    BlankField(&'static str),
    /// Guest count must be a positive integer.
    NonPositiveGuests(i64),
    /// Ids must be positive integers.
    InvalidId(String),
    /// Timestamp text could not be parsed.
    InvalidTimestamp(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::NonPositiveGuests(value) => {
                write!(f, "number of guests must be at least 1, got {value}")
            }
            Self::InvalidId(value) => write!(f, "invalid record id `{value}`"),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp `{value}`"),
        }
    }
}

impl Error for RecordValidationError {}

/// Parses a caller-supplied id, such as a URL path segment.
pub fn parse_record_id(raw: &str) -> Result<RecordId, RecordValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<RecordId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RecordValidationError::InvalidId(trimmed.to_string())),
    }
}
