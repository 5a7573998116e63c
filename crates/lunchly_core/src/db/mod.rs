//! SQLite gateway bootstrap and schema checks.
//!
//! # Responsibility
//! - Open and configure SQLite connections used as the store gateway.
//! - Verify that the pre-existing `customers`/`reservations` schema is present.
//!
//! # Invariants
//! - The core never creates or migrates tables; it only inspects them.
//! - Returned connections have `foreign_keys=ON`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub(crate) use open::DEFAULT_BUSY_TIMEOUT_MS;
pub use open::{open_db, open_db_in_memory, DbOptions};
pub use schema::{ensure_schema, REQUIRED_COLUMNS};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
