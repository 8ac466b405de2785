//! Caller-facing functional surface of the booking store.
//!
//! UI layers call these operations and receive `ApiResponse` envelopes
//! instead of Rust error types.

pub mod api;
pub mod response;

pub use api::{
    core_version, init_logging, ping, AccountUpdate, BookingApi, DeletedAccount, LoginView,
    DB_PATH_ENV,
};
pub use response::{ApiResponse, ErrorKind};
