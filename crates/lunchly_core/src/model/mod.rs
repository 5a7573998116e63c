//! Entity model for customers and reservations.
//!
//! # Responsibility
//! - Define the in-memory records mapped onto `customers`/`reservations` rows.
//! - Own field normalization so every construction path agrees.
//!
//! # Invariants
//! - Identity is carried by `Record<T>`, never by the field structs.
//! - A saved record's id never changes.

pub mod customer;
pub mod record;
pub mod reservation;
