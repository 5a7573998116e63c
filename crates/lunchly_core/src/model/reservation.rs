//! Reservation entity.
//!
//! # Invariants
//! - `num_guests` is at least 1 when built from caller input. Rows read
//!   back from the store are taken as stored.
//! - `customer_id` is trusted from the caller; the store enforces the foreign key.
//! - Absent notes are stored as `""`.

use super::customer::normalize_notes;
use super::record::{RecordId, RecordValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const START_AT_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const START_AT_DISPLAY_FORMAT: &str = "%B %-d %Y, %-I:%M %p";

/// Caller-editable reservation attributes.
///
/// The owning customer is given separately, since edits never move a
/// reservation to another customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationAttrs {
    pub start_at: NaiveDateTime,
    pub num_guests: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A reservation, without persistence identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    customer_id: RecordId,
    start_at: NaiveDateTime,
    num_guests: i64,
    notes: String,
}

impl Reservation {
    /// Builds a reservation for `customer_id`.
    ///
    /// # Errors
    /// - `InvalidId` when `customer_id` is not positive.
    /// - `NonPositiveGuests` when `num_guests < 1`.
    pub fn new(customer_id: RecordId, attrs: ReservationAttrs) -> Result<Self, RecordValidationError> {
        if customer_id <= 0 {
            return Err(RecordValidationError::InvalidId(customer_id.to_string()));
        }

        Ok(Self {
            customer_id,
            start_at: attrs.start_at,
            num_guests: guest_count(attrs.num_guests)?,
            notes: normalize_notes(attrs.notes),
        })
    }

    /// Rebuilds a reservation from a stored row. Only normalization applies.
    pub(crate) fn from_row(
        customer_id: RecordId,
        start_at: NaiveDateTime,
        num_guests: i64,
        notes: Option<String>,
    ) -> Self {
        Self {
            customer_id,
            start_at,
            num_guests,
            notes: normalize_notes(notes),
        }
    }

    pub fn customer_id(&self) -> RecordId {
        self.customer_id
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.start_at
    }

    pub fn num_guests(&self) -> i64 {
        self.num_guests
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Start time rendered for people, e.g. `March 3 2026, 7:30 PM`.
    pub fn formatted_start_at(&self) -> String {
        self.start_at.format(START_AT_DISPLAY_FORMAT).to_string()
    }

    pub fn set_start_at(&mut self, value: NaiveDateTime) {
        self.start_at = value;
    }

    pub fn set_num_guests(&mut self, value: i64) -> Result<(), RecordValidationError> {
        self.num_guests = guest_count(value)?;
        Ok(())
    }

    pub fn set_notes(&mut self, value: Option<&str>) {
        self.notes = normalize_notes(value.map(str::to_owned));
    }

    /// Replaces the editable fields. Nothing changes when validation fails.
    pub fn apply(&mut self, attrs: ReservationAttrs) -> Result<(), RecordValidationError> {
        *self = Self::new(self.customer_id, attrs)?;
        Ok(())
    }
}

/// Parses a start time typed into a form (`2026-03-03 19:30`, ISO `T` variants).
pub fn parse_start_at(raw: &str) -> Result<NaiveDateTime, RecordValidationError> {
    let trimmed = raw.trim();
    START_AT_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| RecordValidationError::InvalidTimestamp(trimmed.to_string()))
}

fn guest_count(value: i64) -> Result<i64, RecordValidationError> {
    if value < 1 {
        return Err(RecordValidationError::NonPositiveGuests(value));
    }
    Ok(value)
}
