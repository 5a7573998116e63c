//! Core entity layer for Lunchly.
//! Customers, reservations, and their mapping onto the relational store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, LunchlyConfig};
pub use db::{ensure_schema, open_db, open_db_in_memory, DbError, DbOptions};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{normalize_notes, normalize_phone, Customer, CustomerAttrs};
pub use model::record::{parse_record_id, Record, RecordId, RecordValidationError};
pub use model::reservation::{parse_start_at, Reservation, ReservationAttrs};
pub use repo::customer_repo::{
    CustomerRanking, CustomerRecord, CustomerRepository, SqliteCustomerRepository,
    DEFAULT_TOP_RANKED_LIMIT,
};
pub use repo::reservation_repo::{
    ReservationRecord, ReservationRepository, SqliteReservationRepository,
};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::lunchly_service::{CustomerDetail, LunchlyService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
