//! Field validation rules for accounts and bookings.
//!
//! # Invariants
//! - Rules are pure; callers decide when they apply (create, update,
//!   reprogram). Stored records are never revalidated against the clock.
//! - Business hours are checked on the hour component only, so `20:59` is
//!   accepted and `07:59` is not.

use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 3;
pub const CREDENTIAL_MIN_CHARS: usize = 6;
pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 20;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A single rule violation, carrying the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NameTooShort,
    InvalidEmail,
    CredentialTooShort,
    InvalidRole(String),
    InvalidStatus(String),
    InvalidDate(String),
    InvalidTime(String),
    PastDate(NaiveDate),
    OutOfHours(NaiveTime),
}

impl ValidationError {
    /// Short stable reason string surfaced to callers.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NameTooShort => "name too short",
            Self::InvalidEmail => "invalid email",
            Self::CredentialTooShort => "credential too short",
            Self::InvalidRole(_) => "invalid role",
            Self::InvalidStatus(_) => "invalid status",
            Self::InvalidDate(_) => "invalid date",
            Self::InvalidTime(_) => "invalid time",
            Self::PastDate(_) => "past date",
            Self::OutOfHours(_) => "out of hours",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort => write!(
                f,
                "name too short: at least {NAME_MIN_CHARS} characters required"
            ),
            Self::InvalidEmail => write!(f, "invalid email: expected local@domain.tld"),
            Self::CredentialTooShort => write!(
                f,
                "credential too short: at least {CREDENTIAL_MIN_CHARS} characters required"
            ),
            Self::InvalidRole(value) => write!(
                f,
                "invalid role `{value}`: expected administrator|operator|client"
            ),
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`: expected pending|confirmed|cancelled"
            ),
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`: expected YYYY-MM-DD"),
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`: expected HH:MM"),
            Self::PastDate(date) => write!(f, "past date: {date} is before today"),
            Self::OutOfHours(time) => write!(
                f,
                "out of hours: {} is outside {OPENING_HOUR:02}:00-{CLOSING_HOUR:02}:00",
                time.format(TIME_FORMAT)
            ),
        }
    }
}

impl Error for ValidationError {}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < NAME_MIN_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_credential(credential: &str) -> Result<(), ValidationError> {
    if credential.chars().count() < CREDENTIAL_MIN_CHARS {
        return Err(ValidationError::CredentialTooShort);
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parses an `HH:MM` clock time.
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Rejects dates strictly before `today`. Today itself is accepted.
pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date < today {
        return Err(ValidationError::PastDate(date));
    }
    Ok(())
}

/// Rejects times whose hour falls outside the inclusive business range.
pub fn ensure_business_hours(time: NaiveTime) -> Result<(), ValidationError> {
    let hour = time.hour();
    if !(OPENING_HOUR..=CLOSING_HOUR).contains(&hour) {
        return Err(ValidationError::OutOfHours(time));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert_eq!(validate_name("  ab  "), Err(ValidationError::NameTooShort));
        assert!(validate_name("Ana").is_ok());
        assert!(validate_name("Éva").is_ok());
    }

    #[test]
    fn email_requires_local_domain_and_tld() {
        assert!(validate_email("ana@x.com").is_ok());
        for bad in ["ana", "ana@x", "@x.com", "ana @x.com", "ana@x.", ""] {
            assert_eq!(
                validate_email(bad),
                Err(ValidationError::InvalidEmail),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn credential_needs_six_chars() {
        assert_eq!(
            validate_credential("12345"),
            Err(ValidationError::CredentialTooShort)
        );
        assert!(validate_credential("123456").is_ok());
    }

    #[test]
    fn business_hours_are_inclusive_on_the_hour_component() {
        assert!(ensure_business_hours(time(8, 0)).is_ok());
        assert!(ensure_business_hours(time(20, 0)).is_ok());
        assert!(ensure_business_hours(time(20, 59)).is_ok());
        assert_eq!(
            ensure_business_hours(time(7, 59)),
            Err(ValidationError::OutOfHours(time(7, 59)))
        );
        assert!(ensure_business_hours(time(21, 0)).is_err());
    }

    #[test]
    fn past_date_check_accepts_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(ensure_not_past(today, today).is_ok());
        assert!(ensure_not_past(today.succ_opt().unwrap(), today).is_ok());
        let yesterday = today.pred_opt().unwrap();
        assert_eq!(
            ensure_not_past(yesterday, today),
            Err(ValidationError::PastDate(yesterday))
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("10/03/2026").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("nine").is_err());
        assert_eq!(parse_time("09:30").unwrap(), time(9, 30));
    }

    #[test]
    fn reason_strings_are_stable() {
        assert_eq!(ValidationError::PastDate(NaiveDate::MIN).reason(), "past date");
        assert_eq!(ValidationError::OutOfHours(time(7, 0)).reason(), "out of hours");
        assert_eq!(ValidationError::InvalidRole("x".into()).reason(), "invalid role");
    }
}
