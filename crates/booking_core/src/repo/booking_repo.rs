//! Booking repository contract and blob-store implementation.
//!
//! # Responsibility
//! - Provide CRUD, status and schedule mutations over `bookings`.
//! - Provide the listing projections used by dashboards (today, per owner,
//!   per-status counts, history).
//!
//! # Invariants
//! - New bookings start as `Pending`.
//! - Past-date and business-hours checks run on create and reprogram only.
//! - `owner_id` is stored as given; resolving it is the join service's job.
//! - Reprogramming a `Cancelled` booking reactivates it as `Pending`.

use crate::model::account::AccountId;
use crate::model::booking::{
    sort_most_recent_first, Booking, BookingId, BookingStatus, Reschedule, StatusChange,
    StatusCounts,
};
use crate::model::clock::{Clock, SystemClock};
use crate::model::validation::{ensure_business_hours, ensure_not_past};
use crate::repo::collections::{load_bookings, save_bookings};
use crate::repo::id_alloc::next_id;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::BlobStore;
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info, warn};

/// Repository interface for booking operations.
pub trait BookingRepository {
    fn create_booking(
        &self,
        owner_id: AccountId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> RepoResult<Booking>;
    fn find_booking(&self, id: BookingId) -> RepoResult<Option<Booking>>;
    /// Overwrites the status; every transition is allowed.
    fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepoResult<StatusChange>;
    fn reprogram_booking(
        &self,
        id: BookingId,
        new_date: Option<NaiveDate>,
        new_time: Option<NaiveTime>,
    ) -> RepoResult<Reschedule>;
    fn delete_booking(&self, id: BookingId) -> RepoResult<Booking>;
    /// All bookings in insertion order.
    fn list_bookings(&self) -> RepoResult<Vec<Booking>>;
    /// Bookings whose date is today, earliest time first.
    fn list_today_bookings(&self) -> RepoResult<Vec<Booking>>;

    /// Bookings of one owner, preserving insertion order.
    fn list_bookings_by_owner(&self, owner_id: AccountId) -> RepoResult<Vec<Booking>> {
        Ok(self
            .list_bookings()?
            .into_iter()
            .filter(|booking| booking.owner_id == owner_id)
            .collect())
    }

    /// Owner's bookings, most recent date/time first.
    fn history_by_owner(&self, owner_id: AccountId) -> RepoResult<Vec<Booking>> {
        let mut bookings = self.list_bookings_by_owner(owner_id)?;
        sort_most_recent_first(&mut bookings, Booking::starts_at);
        Ok(bookings)
    }

    fn count_bookings_by_status(&self) -> RepoResult<StatusCounts> {
        Ok(StatusCounts::tally(&self.list_bookings()?))
    }
}

/// `BookingRepository` persisted in a `BlobStore`.
pub struct StoreBookingRepository<'s, S: BlobStore + ?Sized, C: Clock = SystemClock> {
    store: &'s S,
    clock: C,
}

impl<'s, S: BlobStore + ?Sized> StoreBookingRepository<'s, S> {
    /// Uses the local wall clock for "today".
    pub fn new(store: &'s S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<'s, S: BlobStore + ?Sized, C: Clock> StoreBookingRepository<'s, S, C> {
    pub fn with_clock(store: &'s S, clock: C) -> Self {
        Self { store, clock }
    }

    fn check_date(&self, event: &str, date: NaiveDate) -> RepoResult<()> {
        ensure_not_past(date, self.clock.today()).map_err(|err| {
            warn!("event={event} module=repo status=rejected reason=past_date date={date}");
            RepoError::from(err)
        })
    }

    fn check_time(&self, event: &str, time: NaiveTime) -> RepoResult<()> {
        ensure_business_hours(time).map_err(|err| {
            warn!(
                "event={event} module=repo status=rejected reason=out_of_hours time={}",
                time.format("%H:%M")
            );
            RepoError::from(err)
        })
    }
}

impl<S: BlobStore + ?Sized, C: Clock> BookingRepository for StoreBookingRepository<'_, S, C> {
    fn create_booking(
        &self,
        owner_id: AccountId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> RepoResult<Booking> {
        self.check_date("booking_create", date)?;
        self.check_time("booking_create", time)?;

        let mut bookings = load_bookings(self.store)?;
        let booking = Booking {
            id: next_id(Entity::Booking, bookings.iter().map(|booking| booking.id))?,
            owner_id,
            date,
            time,
            status: BookingStatus::Pending,
        };
        bookings.push(booking.clone());
        save_bookings(self.store, &bookings)?;

        info!(
            "event=booking_create module=repo status=ok booking_id={} owner_id={owner_id}",
            booking.id
        );
        Ok(booking)
    }

    fn find_booking(&self, id: BookingId) -> RepoResult<Option<Booking>> {
        let booking = load_bookings(self.store)?
            .into_iter()
            .find(|booking| booking.id == id);
        debug!(
            "event=booking_find module=repo status=ok booking_id={id} found={}",
            booking.is_some()
        );
        Ok(booking)
    }

    fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepoResult<StatusChange> {
        let mut bookings = load_bookings(self.store)?;
        let booking = bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| RepoError::booking_not_found(id))?;

        let previous = booking.status;
        booking.status = status;
        let updated = booking.clone();
        save_bookings(self.store, &bookings)?;

        info!(
            "event=booking_status module=repo status=ok booking_id={id} from={previous} to={status}"
        );
        Ok(StatusChange {
            booking: updated,
            previous,
            current: status,
        })
    }

    fn reprogram_booking(
        &self,
        id: BookingId,
        new_date: Option<NaiveDate>,
        new_time: Option<NaiveTime>,
    ) -> RepoResult<Reschedule> {
        let mut bookings = load_bookings(self.store)?;
        let booking = bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| RepoError::booking_not_found(id))?;

        if let Some(date) = new_date {
            self.check_date("booking_reprogram", date)?;
        }
        if let Some(time) = new_time {
            self.check_time("booking_reprogram", time)?;
        }

        let previous_date = booking.date;
        let previous_time = booking.time;
        let previous_status = booking.status;
        if let Some(date) = new_date {
            booking.date = date;
        }
        if let Some(time) = new_time {
            booking.time = time;
        }
        booking.status = match booking.status {
            BookingStatus::Cancelled => BookingStatus::Pending,
            BookingStatus::Pending => BookingStatus::Pending,
            BookingStatus::Confirmed => BookingStatus::Confirmed,
        };
        let updated = booking.clone();
        save_bookings(self.store, &bookings)?;

        info!(
            "event=booking_reprogram module=repo status=ok booking_id={id} from=\"{} {}\" to=\"{} {}\" booking_status={}",
            previous_date,
            previous_time.format("%H:%M"),
            updated.date,
            updated.time.format("%H:%M"),
            updated.status
        );
        Ok(Reschedule {
            booking: updated,
            previous_date,
            previous_time,
            previous_status,
        })
    }

    fn delete_booking(&self, id: BookingId) -> RepoResult<Booking> {
        let mut bookings = load_bookings(self.store)?;
        let index = bookings
            .iter()
            .position(|booking| booking.id == id)
            .ok_or_else(|| RepoError::booking_not_found(id))?;
        let removed = bookings.remove(index);
        save_bookings(self.store, &bookings)?;

        info!(
            "event=booking_delete module=repo status=ok booking_id={id} owner_id={}",
            removed.owner_id
        );
        Ok(removed)
    }

    fn list_bookings(&self) -> RepoResult<Vec<Booking>> {
        load_bookings(self.store)
    }

    fn list_today_bookings(&self) -> RepoResult<Vec<Booking>> {
        let today = self.clock.today();
        let mut bookings: Vec<Booking> = load_bookings(self.store)?
            .into_iter()
            .filter(|booking| booking.date == today)
            .collect();
        bookings.sort_by_key(|booking| booking.time);
        Ok(bookings)
    }
}
