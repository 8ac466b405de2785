//! Core data layer for the booking store.
//! This crate is the single source of truth for account and booking
//! invariants: uniqueness, cascading deletion, schedule rules and statuses.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{
    Account, AccountDeletion, AccountId, AccountPatch, AccountSummary, NewAccount, Role,
    PRIMARY_ADMIN_ID,
};
pub use model::booking::{
    Booking, BookingId, BookingStatus, EnrichedBooking, Reschedule, StatusChange, StatusCounts,
    MISSING_OWNER_FIELD, MISSING_OWNER_NAME,
};
pub use model::clock::{Clock, FixedClock, SystemClock};
pub use model::validation::{parse_date, parse_time, ValidationError};
pub use repo::account_repo::{AccountRepository, StoreAccountRepository};
pub use repo::booking_repo::{BookingRepository, StoreBookingRepository};
pub use repo::id_alloc::next_id;
pub use repo::seed::{seed_demo_data, SeedReport};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::join_service::JoinService;
pub use service::session_service::{
    is_authorized, landing_for, validate_account_input, Landing, RegistrationError, SessionService,
};
pub use store::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
