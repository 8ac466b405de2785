//! Account domain model.
//!
//! # Responsibility
//! - Define the persisted account record and its role enumeration.
//! - Provide the credential-free projection handed to session callers.
//!
//! # Invariants
//! - `id` is positive and immutable after creation.
//! - `email` is unique across the collection (exact, case-sensitive match).
//! - The primary administrator (`PRIMARY_ADMIN_ID`, administrator role) can
//!   never be deleted.
//! - `credential` never leaves the core through `AccountSummary` or logs.

use crate::model::validation::{
    validate_credential, validate_email, validate_name, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Integer account identifier.
pub type AccountId = u32;

/// Id reserved for the primary administrator.
pub const PRIMARY_ADMIN_ID: AccountId = 1;

/// Permission level attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including account management and booking deletion.
    Administrator,
    /// Manages bookings (confirm, cancel, reprogram).
    Operator,
    /// Creates and follows their own bookings.
    Client,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Operator => "operator",
            Self::Client => "client",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "administrator" => Ok(Self::Administrator),
            "operator" => Ok(Self::Operator),
            "client" => Ok(Self::Client),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

/// Persisted account record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    /// Opaque secret compared verbatim on login.
    pub credential: String,
    pub role: Role,
}

impl Account {
    /// Whether this is the primary administrator exempt from deletion.
    ///
    /// Only an administrator stored under `PRIMARY_ADMIN_ID` qualifies; a
    /// client that received id 1 in an empty store is an ordinary account.
    pub fn is_primary(&self) -> bool {
        self.id == PRIMARY_ADMIN_ID && self.role == Role::Administrator
    }

    /// Credential-free view of this account.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary::from(self)
    }
}

// Credential stays out of debug output so records can be logged safely.
impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("credential", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Input for account creation.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub credential: String,
    pub role: Role,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential: credential.into(),
            role,
        }
    }

    /// Checks the name/email/credential format rules, first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_credential(&self.credential)?;
        Ok(())
    }

    /// Builds the record that would be stored under `id`.
    pub fn to_account(&self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            credential: self.credential.clone(),
            role: self.role,
        }
    }
}

impl Debug for NewAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub credential: Option<String>,
    pub role: Option<Role>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.credential.is_none()
            && self.role.is_none()
    }

    /// Validates only the fields present in the patch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            validate_name(name)?;
        }
        if let Some(email) = self.email.as_deref() {
            validate_email(email)?;
        }
        if let Some(credential) = self.credential.as_deref() {
            validate_credential(credential)?;
        }
        Ok(())
    }

    /// Applies present fields onto `account`.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            account.email.clone_from(email);
        }
        if let Some(credential) = &self.credential {
            account.credential.clone_from(credential);
        }
        if let Some(role) = self.role {
            account.role = role;
        }
    }
}

impl Debug for AccountPatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("credential_changed", &self.credential.is_some())
            .field("role", &self.role)
            .finish()
    }
}

/// Session-facing account view without the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// Outcome of a successful account deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDeletion {
    pub account: Account,
    /// Bookings removed because they were owned by `account`.
    pub cascaded_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        NewAccount::new("Ana Ruiz", "ana@x.com", "secret1", Role::Client).to_account(7)
    }

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("operator".parse::<Role>().unwrap(), Role::Operator);
        assert_eq!(
            "admin".parse::<Role>(),
            Err(ValidationError::InvalidRole("admin".to_string()))
        );
    }

    #[test]
    fn role_serializes_as_lowercase_word() {
        let json = serde_json::to_string(&Role::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");
    }

    #[test]
    fn debug_output_redacts_credential() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("secret1"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn summary_drops_credential() {
        let summary = sample().summary();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret1"));
        assert_eq!(summary.id, 7);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut account = sample();
        let patch = AccountPatch {
            name: Some("Ana María Ruiz".to_string()),
            ..AccountPatch::default()
        };
        patch.apply_to(&mut account);

        assert_eq!(account.name, "Ana María Ruiz");
        assert_eq!(account.email, "ana@x.com");
        assert_eq!(account.credential, "secret1");
        assert_eq!(account.role, Role::Client);
    }

    #[test]
    fn patch_validation_skips_absent_fields() {
        assert!(AccountPatch::default().validate().is_ok());
        let patch = AccountPatch {
            email: Some("broken".to_string()),
            ..AccountPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::InvalidEmail));
    }
}
