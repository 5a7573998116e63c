//! Customer entity.
//!
//! # Invariants
//! - `phone` is never `Some("")`: empty input is stored as `None`.
//! - `notes` is never absent: missing input is stored as `""`.
//! - `first_name` and `last_name` are never blank when built from caller
//!   input. Rows read back from the store are taken as stored.
//! - `full_name` is derived and has no setter.

use super::record::RecordValidationError;
use serde::{Deserialize, Serialize};

/// Plain attribute bag a customer is built from.
///
/// Used for both caller input (forms) and store hydration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAttrs {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A restaurant customer, without persistence identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerAttrs")]
pub struct Customer {
    first_name: String,
    last_name: String,
    phone: Option<String>,
    notes: String,
}

impl Customer {
    /// Builds a customer from attributes, normalizing phone and notes.
    ///
    /// # Errors
    /// - `BlankField` when either name is empty or whitespace.
    pub fn new(attrs: CustomerAttrs) -> Result<Self, RecordValidationError> {
        let CustomerAttrs {
            first_name,
            last_name,
            phone,
            notes,
        } = attrs;

        Ok(Self {
            first_name: require_name("first_name", first_name)?,
            last_name: require_name("last_name", last_name)?,
            phone: normalize_phone(phone),
            notes: normalize_notes(notes),
        })
    }

    /// Rebuilds a customer from a stored row. Only normalization applies.
    pub(crate) fn from_row(attrs: CustomerAttrs) -> Self {
        Self {
            first_name: attrs.first_name,
            last_name: attrs.last_name,
            phone: normalize_phone(attrs.phone),
            notes: normalize_notes(attrs.notes),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> Result<(), RecordValidationError> {
        self.first_name = require_name("first_name", value.into())?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) -> Result<(), RecordValidationError> {
        self.last_name = require_name("last_name", value.into())?;
        Ok(())
    }

    pub fn set_phone(&mut self, value: Option<&str>) {
        self.phone = normalize_phone(value.map(str::to_owned));
    }

    pub fn set_notes(&mut self, value: Option<&str>) {
        self.notes = normalize_notes(value.map(str::to_owned));
    }

    /// Replaces every field from `attrs`. Nothing changes when validation fails.
    pub fn apply(&mut self, attrs: CustomerAttrs) -> Result<(), RecordValidationError> {
        *self = Self::new(attrs)?;
        Ok(())
    }
}

impl TryFrom<CustomerAttrs> for Customer {
    type Error = RecordValidationError;

    fn try_from(value: CustomerAttrs) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<&Customer> for CustomerAttrs {
    fn from(value: &Customer) -> Self {
        Self {
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            phone: value.phone.clone(),
            notes: Some(value.notes.clone()),
        }
    }
}

/// Maps an empty phone to `None`.
pub fn normalize_phone(value: Option<String>) -> Option<String> {
    value.filter(|phone| !phone.is_empty())
}

/// Maps absent notes to an empty string.
pub fn normalize_notes(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn require_name(field: &'static str, value: String) -> Result<String, RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField(field));
    }
    Ok(value)
}
