//! Authentication, self-registration and role gate.
//!
//! # Responsibility
//! - Turn credential checks into credential-free session views.
//! - Register clients with full input validation.
//! - Answer role-set membership and landing-area questions for callers.
//!
//! # Invariants
//! - Session views never carry the credential.
//! - Self-registration always creates `Role::Client`.
//! - Storing the "current session" is the caller's concern.

use crate::model::account::{Account, AccountSummary, NewAccount, Role};
use crate::model::validation::{
    validate_credential, validate_email, validate_name, ValidationError,
};
use crate::repo::account_repo::AccountRepository;
use crate::repo::{RepoError, RepoResult};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Area of the application an account lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Booking management for administrators and operators.
    Dashboard,
    /// Own bookings and history for clients.
    ClientArea,
}

/// Returns where an account with `role` lands.
pub fn landing_for(role: Role) -> Landing {
    match role {
        Role::Administrator | Role::Operator => Landing::Dashboard,
        Role::Client => Landing::ClientArea,
    }
}

/// Whether `session` holds one of `allowed` roles.
pub fn is_authorized(session: &AccountSummary, allowed: &[Role]) -> bool {
    let granted = allowed.contains(&session.role);
    if !granted {
        warn!(
            "event=authorize module=service status=denied account_id={} role={}",
            session.id, session.role
        );
    }
    granted
}

/// Runs every account input rule and returns all failures in rule order.
pub fn validate_account_input(
    name: &str,
    email: &str,
    credential: &str,
    role: &str,
) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    if let Err(err) = validate_name(name) {
        issues.push(err);
    }
    if let Err(err) = validate_email(email) {
        issues.push(err);
    }
    if let Err(err) = validate_credential(credential) {
        issues.push(err);
    }
    if let Err(err) = role.parse::<Role>() {
        issues.push(err);
    }
    issues
}

/// Service error for registration.
#[derive(Debug)]
pub enum RegistrationError {
    /// One or more input rules failed.
    Invalid(Vec<ValidationError>),
    /// Persistence-layer failure, including duplicate email.
    Repo(RepoError),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(issues) => {
                let joined = issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(". ");
                write!(f, "{joined}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<RepoError> for RegistrationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session facade over an account repository.
pub struct SessionService<A: AccountRepository> {
    accounts: A,
}

impl<A: AccountRepository> SessionService<A> {
    pub fn new(accounts: A) -> Self {
        Self { accounts }
    }

    /// Returns the session view for matching credentials, `None` otherwise.
    pub fn authenticate(&self, email: &str, credential: &str) -> RepoResult<Option<AccountSummary>> {
        Ok(self
            .accounts
            .authenticate(email, credential)?
            .map(|account| account.summary()))
    }

    /// Creates a `Client` account after checking every input rule.
    pub fn register_client(
        &self,
        name: &str,
        email: &str,
        credential: &str,
    ) -> Result<Account, RegistrationError> {
        let issues = validate_account_input(name, email, credential, Role::Client.as_str());
        if !issues.is_empty() {
            warn!(
                "event=register module=service status=rejected issues={}",
                issues.len()
            );
            return Err(RegistrationError::Invalid(issues));
        }

        let input = NewAccount::new(name, email, credential, Role::Client);
        Ok(self.accounts.create_account(&input)?)
    }
}
