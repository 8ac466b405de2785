//! Tagged result envelope returned by every surface operation.
//!
//! # Invariants
//! - `ok == true` implies `value` is set and `kind` is `None`.
//! - `ok == false` implies `kind` is set and `value` is `None`.
//! - `message` is always human-readable and never contains a credential.

use booking_core::{RegistrationError, RepoError};
use serde::Serialize;

/// Failure category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NotFound,
    DuplicateEmail,
    ValidationError,
    Protected,
    /// Store transport failure or corrupt persisted data.
    StorageError,
}

impl From<&RepoError> for ErrorKind {
    fn from(err: &RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound,
            RepoError::DuplicateEmail(_) => Self::DuplicateEmail,
            RepoError::Validation(_) => Self::ValidationError,
            RepoError::Protected(_) => Self::Protected,
            RepoError::Store(_) | RepoError::IdExhausted(_) | RepoError::InvalidData(_) => {
                Self::StorageError
            }
        }
    }
}

/// `{ok: true, value}` or `{ok: false, kind, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, value: T) -> Self {
        Self {
            ok: true,
            value: Some(value),
            kind: None,
            message: message.into(),
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value: None,
            kind: Some(kind),
            message: message.into(),
        }
    }

    /// Consumes the envelope, keeping only the value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> From<RepoError> for ApiResponse<T> {
    fn from(err: RepoError) -> Self {
        Self::failure(ErrorKind::from(&err), err.to_string())
    }
}

impl<T> From<RegistrationError> for ApiResponse<T> {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Invalid(_) => {
                Self::failure(ErrorKind::ValidationError, err.to_string())
            }
            RegistrationError::Repo(inner) => Self::from(inner),
        }
    }
}
