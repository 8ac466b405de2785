//! Repository layer over the named-blob store.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for accounts and
//!   bookings.
//! - Keep JSON encoding and store access out of service code.
//!
//! # Invariants
//! - Every mutation is a whole-collection read-modify-write.
//! - A mutation that fails validation or lookup performs zero writes.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`,
//!   `Protected`, `Validation`) in addition to store transport errors.

pub mod account_repo;
pub mod booking_repo;
mod collections;
mod error;
pub mod id_alloc;
pub mod seed;

pub use collections::{ACCOUNTS_KEY, BOOKINGS_KEY};
pub use error::{Entity, RepoError, RepoResult};
