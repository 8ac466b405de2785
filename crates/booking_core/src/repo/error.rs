use crate::model::account::AccountId;
use crate::model::validation::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Collection a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Account,
    Booking,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Booking => "booking",
        }
    }
}

/// Repository error for account and booking operations.
#[derive(Debug)]
pub enum RepoError {
    NotFound { entity: Entity, id: u32 },
    DuplicateEmail(String),
    Validation(ValidationError),
    Protected(AccountId),
    /// The collection already holds the largest representable id.
    IdExhausted(Entity),
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{} not found: {id}", entity.as_str()),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Protected(id) => {
                write!(f, "account {id} is the primary administrator and is protected")
            }
            Self::IdExhausted(entity) => {
                write!(f, "no {} id left to allocate", entity.as_str())
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. }
            | Self::DuplicateEmail(_)
            | Self::Protected(_)
            | Self::IdExhausted(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl RepoError {
    pub(crate) fn account_not_found(id: AccountId) -> Self {
        Self::NotFound {
            entity: Entity::Account,
            id,
        }
    }

    pub(crate) fn booking_not_found(id: u32) -> Self {
        Self::NotFound {
            entity: Entity::Booking,
            id,
        }
    }
}
