//! Use-case services over the entity repositories.
//!
//! # Responsibility
//! - Compose repository calls into the flows a staff-facing surface needs.
//! - Stay storage-agnostic; only repository traits are referenced.

pub mod lunchly_service;
