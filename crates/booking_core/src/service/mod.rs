//! Core use-case services.
//!
//! # Responsibility
//! - Combine repository reads into read-side projections (join).
//! - Provide the authentication, registration and role gate used by callers.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Services remain storage-agnostic.

pub mod join_service;
pub mod session_service;
