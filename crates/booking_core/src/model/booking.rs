//! Booking domain model.
//!
//! # Responsibility
//! - Define the persisted booking record and its status enumeration.
//! - Define the result shapes reported by status and schedule mutations.
//! - Define the owner-annotated projection produced by the join service.
//!
//! # Invariants
//! - `status` starts as `Pending` on creation.
//! - `date` persists as `YYYY-MM-DD`, `time` as zero-padded `HH:MM`.
//! - Listing order "most recent first" is by combined `date + time`, stable on
//!   ties.

use crate::model::account::AccountId;
use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Integer booking identifier.
pub type BookingId = u32;

/// Booking lifecycle state. Any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, waiting for an operator.
    Pending,
    /// Approved by an operator.
    Confirmed,
    /// Rejected or withdrawn.
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Persisted booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    /// Account expected to own this booking. Not guaranteed to resolve.
    pub owner_id: AccountId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: BookingStatus,
}

impl Booking {
    /// Combined instant used by history ordering.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Sorts bookings most recent first; equal instants keep their order.
pub fn sort_most_recent_first<T, F>(items: &mut [T], starts_at: F)
where
    F: Fn(&T) -> NaiveDateTime,
{
    items.sort_by(|a, b| starts_at(b).cmp(&starts_at(a)));
}

/// Total and per-status booking counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut counts = Self::default();
        for booking in bookings {
            counts.total += 1;
            match booking.status {
                BookingStatus::Pending => counts.pending += 1,
                BookingStatus::Confirmed => counts.confirmed += 1,
                BookingStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }
}

/// Result of a status overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub booking: Booking,
    pub previous: BookingStatus,
    pub current: BookingStatus,
}

/// Result of a reprogram, with the slot the booking moved away from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reschedule {
    pub booking: Booking,
    pub previous_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub previous_time: NaiveTime,
    /// Status before a cancelled booking was reactivated.
    pub previous_status: BookingStatus,
}

impl Reschedule {
    pub fn reactivated(&self) -> bool {
        self.previous_status != self.booking.status
    }
}

/// Owner name shown when a booking references a missing account.
pub const MISSING_OWNER_NAME: &str = "Usuario no encontrado";
/// Email/role placeholder for a missing owner.
pub const MISSING_OWNER_FIELD: &str = "N/A";

/// Booking annotated with its owner's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_role: String,
}

impl EnrichedBooking {
    /// Whether the owner lookup fell back to placeholders.
    pub fn is_orphan(&self) -> bool {
        self.owner_name == MISSING_OWNER_NAME && self.owner_email == MISSING_OWNER_FIELD
    }
}

/// Serde adapter persisting `NaiveTime` as zero-padded `HH:MM`.
pub(crate) mod hhmm {
    use crate::model::validation::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(de::Error::custom)
    }
}
