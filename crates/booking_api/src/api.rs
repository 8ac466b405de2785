//! Use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level operations over one blob store.
//! - Accept wire-format strings (roles, statuses, dates, times) and parse
//!   them at this boundary.
//! - Translate every failure into an `ApiResponse` envelope.
//!
//! # Invariants
//! - Operations never panic and never return Rust error types.
//! - Account values crossing this boundary are `AccountSummary`; credentials
//!   never leave the core.
//! - A rejected operation performs zero writes (checks run before saving).

use crate::response::{ApiResponse, ErrorKind};
use booking_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_date,
    parse_time, ping as ping_inner, seed_demo_data, validate_account_input, AccountId, AccountPatch, AccountRepository,
    AccountSummary, BlobStore, Booking, BookingId, BookingRepository, BookingStatus, Clock,
    EnrichedBooking, JoinService, NewAccount, RegistrationError, RepoResult, Reschedule, Role,
    SessionService, SqliteBlobStore, StatusChange, StatusCounts, StoreAccountRepository,
    StoreBookingRepository, SystemClock, ValidationError,
};
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the SQLite file used by `BookingApi::from_env`.
pub const DB_PATH_ENV: &str = "BOOKING_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "booking_store.sqlite3";

/// Health check passthrough.
pub fn ping() -> String {
    ping_inner().to_owned()
}

pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Repeating the same `level + log_dir` is a no-op; a different
/// configuration is rejected.
pub fn init_logging(level: &str, log_dir: &str) -> String {
    match init_logging_inner(level, log_dir) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Partial account update in wire format. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub credential: Option<String>,
    pub role: Option<String>,
}

/// Result of deleting an account, without the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAccount {
    pub account: AccountSummary,
    pub cascaded_count: usize,
}

/// Session view returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginView {
    pub account: AccountSummary,
    /// `dashboard` or `client_area`.
    pub landing: &'static str,
}

/// Functional surface bound to one blob store and one clock.
pub struct BookingApi<S: BlobStore, C: Clock + Copy = SystemClock> {
    store: S,
    clock: C,
}

impl BookingApi<SqliteBlobStore> {
    /// Opens (or creates) the SQLite store at `path` and seeds demo data into
    /// empty collections.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let store = SqliteBlobStore::open(path).map_err(|err| {
            error!(
                "event=api_open module=api status=error path={} error={err}",
                path.display()
            );
            format!("store open failed: {err}")
        })?;
        let report = seed_demo_data(&store).map_err(|err| format!("seed failed: {err}"))?;
        info!(
            "event=api_open module=api status=ok accounts_seeded={} bookings_seeded={}",
            report.accounts_seeded, report.bookings_seeded
        );
        Ok(Self::new(store))
    }

    /// Opens the store named by `BOOKING_DB_PATH`, or the default temp file.
    pub fn from_env() -> Result<Self, String> {
        Self::open(resolve_db_path())
    }
}

impl<S: BlobStore> BookingApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: BlobStore, C: Clock + Copy> BookingApi<S, C> {
    /// Builds an API whose notion of "today" comes from `clock`.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_account(
        &self,
        name: &str,
        email: &str,
        credential: &str,
        role: &str,
    ) -> ApiResponse<AccountSummary> {
        let issues = validate_account_input(name, email, credential, role);
        let role = match role.parse::<Role>() {
            Ok(role) if issues.is_empty() => role,
            _ => return RegistrationError::Invalid(issues).into(),
        };
        let input = NewAccount::new(name, email, credential, role);
        respond(
            "create_account",
            self.accounts().create_account(&input),
            |account| (format!("account {} created", account.id), account.summary()),
        )
    }

    pub fn update_account(&self, id: AccountId, update: AccountUpdate) -> ApiResponse<AccountSummary> {
        let role = match update.role.as_deref().map(str::parse::<Role>).transpose() {
            Ok(role) => role,
            Err(err) => return invalid(err),
        };
        let patch = AccountPatch {
            name: update.name,
            email: update.email,
            credential: update.credential,
            role,
        };
        respond(
            "update_account",
            self.accounts().update_account(id, &patch),
            |account| (format!("account {id} updated"), account.summary()),
        )
    }

    pub fn delete_account(&self, id: AccountId) -> ApiResponse<DeletedAccount> {
        respond(
            "delete_account",
            self.accounts().delete_account(id),
            |deletion| {
                (
                    format!(
                        "account {id} deleted with {} booking(s)",
                        deletion.cascaded_count
                    ),
                    DeletedAccount {
                        account: deletion.account.summary(),
                        cascaded_count: deletion.cascaded_count,
                    },
                )
            },
        )
    }

    /// `value` is `None` when no account has `id`.
    pub fn find_account(&self, id: AccountId) -> ApiResponse<Option<AccountSummary>> {
        respond("find_account", self.accounts().find_account(id), |found| {
            (
                String::new(),
                found.map(|account| account.summary()),
            )
        })
    }

    pub fn list_accounts(&self) -> ApiResponse<Vec<AccountSummary>> {
        respond("list_accounts", self.accounts().list_accounts(), |accounts| {
            (
                format!("{} account(s)", accounts.len()),
                accounts.iter().map(|account| account.summary()).collect(),
            )
        })
    }

    /// `value` is `None` on a credential mismatch; that is not an error.
    pub fn authenticate(&self, email: &str, credential: &str) -> ApiResponse<Option<LoginView>> {
        let sessions = SessionService::new(self.accounts());
        respond("authenticate", sessions.authenticate(email, credential), |found| {
            let message = if found.is_some() {
                "login accepted"
            } else {
                "invalid email or credential"
            };
            (
                message.to_string(),
                found.map(|account| LoginView {
                    landing: landing_label(account.role),
                    account,
                }),
            )
        })
    }

    /// Self-registration. The new account is always a client.
    pub fn register_client(
        &self,
        name: &str,
        email: &str,
        credential: &str,
    ) -> ApiResponse<AccountSummary> {
        let sessions = SessionService::new(self.accounts());
        match sessions.register_client(name, email, credential) {
            Ok(account) => {
                info!(
                    "event=register_client module=api status=ok account_id={}",
                    account.id
                );
                ApiResponse::success(format!("account {} registered", account.id), account.summary())
            }
            Err(err) => {
                info!("event=register_client module=api status=rejected");
                err.into()
            }
        }
    }

    pub fn create_booking(&self, owner_id: AccountId, date: &str, time: &str) -> ApiResponse<Booking> {
        let date = match parse_date(date) {
            Ok(date) => date,
            Err(err) => return invalid(err),
        };
        let time = match parse_time(time) {
            Ok(time) => time,
            Err(err) => return invalid(err),
        };
        respond(
            "create_booking",
            self.bookings().create_booking(owner_id, date, time),
            |booking| (format!("booking {} created", booking.id), booking),
        )
    }

    pub fn find_booking(&self, id: BookingId) -> ApiResponse<Option<Booking>> {
        respond("find_booking", self.bookings().find_booking(id), |found| {
            (String::new(), found)
        })
    }

    pub fn update_booking_status(&self, id: BookingId, status: &str) -> ApiResponse<StatusChange> {
        let status = match status.parse::<BookingStatus>() {
            Ok(status) => status,
            Err(err) => return invalid(err),
        };
        respond(
            "update_booking_status",
            self.bookings().update_booking_status(id, status),
            |change| {
                (
                    format!("booking {id}: {} -> {}", change.previous, change.current),
                    change,
                )
            },
        )
    }

    /// Moves a booking. Empty or missing fields keep the stored value.
    pub fn reprogram_booking(
        &self,
        id: BookingId,
        date: Option<&str>,
        time: Option<&str>,
    ) -> ApiResponse<Reschedule> {
        let date = match non_blank(date).map(parse_date).transpose() {
            Ok(date) => date,
            Err(err) => return invalid(err),
        };
        let time = match non_blank(time).map(parse_time).transpose() {
            Ok(time) => time,
            Err(err) => return invalid(err),
        };
        respond(
            "reprogram_booking",
            self.bookings().reprogram_booking(id, date, time),
            |reschedule| {
                let message = if reschedule.reactivated() {
                    format!("booking {id} reprogrammed and reactivated")
                } else {
                    format!("booking {id} reprogrammed")
                };
                (message, reschedule)
            },
        )
    }

    pub fn delete_booking(&self, id: BookingId) -> ApiResponse<Booking> {
        respond("delete_booking", self.bookings().delete_booking(id), |booking| {
            (format!("booking {id} deleted"), booking)
        })
    }

    pub fn list_bookings(&self) -> ApiResponse<Vec<Booking>> {
        respond("list_bookings", self.bookings().list_bookings(), counted)
    }

    pub fn list_bookings_by_owner(&self, owner_id: AccountId) -> ApiResponse<Vec<Booking>> {
        respond(
            "list_bookings_by_owner",
            self.bookings().list_bookings_by_owner(owner_id),
            counted,
        )
    }

    pub fn list_today_bookings(&self) -> ApiResponse<Vec<Booking>> {
        respond(
            "list_today_bookings",
            self.bookings().list_today_bookings(),
            counted,
        )
    }

    /// One owner's bookings, most recent first.
    pub fn booking_history(&self, owner_id: AccountId) -> ApiResponse<Vec<Booking>> {
        respond(
            "booking_history",
            self.bookings().history_by_owner(owner_id),
            counted,
        )
    }

    pub fn count_bookings_by_status(&self) -> ApiResponse<StatusCounts> {
        respond(
            "count_bookings_by_status",
            self.bookings().count_bookings_by_status(),
            |counts| (format!("{} booking(s)", counts.total), counts),
        )
    }

    pub fn enrich_bookings(&self) -> ApiResponse<Vec<EnrichedBooking>> {
        respond("enrich_bookings", self.joins().enrich_all(), counted)
    }

    pub fn enrich_bookings_by_owner(&self, owner_id: AccountId) -> ApiResponse<Vec<EnrichedBooking>> {
        respond(
            "enrich_bookings_by_owner",
            self.joins().enrich_by_owner(owner_id),
            counted,
        )
    }

    pub fn enrich_today_bookings(&self) -> ApiResponse<Vec<EnrichedBooking>> {
        respond("enrich_today_bookings", self.joins().enrich_today(), counted)
    }

    /// Every booking with owner fields, most recent first.
    pub fn recent_bookings(&self) -> ApiResponse<Vec<EnrichedBooking>> {
        respond("recent_bookings", self.joins().list_all_recent(), counted)
    }

    fn accounts(&self) -> StoreAccountRepository<'_, S> {
        StoreAccountRepository::new(&self.store)
    }

    fn bookings(&self) -> StoreBookingRepository<'_, S, C> {
        StoreBookingRepository::with_clock(&self.store, self.clock)
    }

    fn joins(&self) -> JoinService<StoreAccountRepository<'_, S>, StoreBookingRepository<'_, S, C>> {
        JoinService::new(self.accounts(), self.bookings())
    }
}

fn respond<T, U>(
    event: &str,
    result: RepoResult<T>,
    present: impl FnOnce(T) -> (String, U),
) -> ApiResponse<U> {
    match result {
        Ok(value) => {
            let (message, value) = present(value);
            ApiResponse::success(message, value)
        }
        Err(err) => {
            let response: ApiResponse<U> = err.into();
            info!(
                "event={event} module=api status=rejected kind={:?}",
                response.kind.unwrap_or(ErrorKind::StorageError)
            );
            response
        }
    }
}

fn counted<T>(items: Vec<T>) -> (String, Vec<T>) {
    (format!("{} item(s)", items.len()), items)
}

fn invalid<T>(err: ValidationError) -> ApiResponse<T> {
    ApiResponse::failure(ErrorKind::ValidationError, err.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn landing_label(role: Role) -> &'static str {
    match booking_core::landing_for(role) {
        booking_core::Landing::Dashboard => "dashboard",
        booking_core::Landing::ClientArea => "client_area",
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
