//! Domain model for accounts and bookings.
//!
//! # Responsibility
//! - Define the persisted record shapes and their closed enumerations.
//! - Hold the field validation rules shared by both repositories.
//!
//! # Invariants
//! - Every record is identified by a positive integer id that never changes.
//! - Role and status values are closed enums; unknown strings are rejected at
//!   parse time rather than stored.

pub mod account;
pub mod booking;
pub mod clock;
pub mod validation;
