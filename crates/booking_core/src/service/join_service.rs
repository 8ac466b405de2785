//! Booking enrichment ("join") service.
//!
//! # Responsibility
//! - Annotate bookings with their owner's name, email and role.
//! - Provide the owner lookups used when rendering booking lists.
//!
//! # Invariants
//! - Read-only: no store writes, no cached projection. Owner fields are
//!   fetched on every call.
//! - Total over orphans: a booking whose owner is missing gets placeholder
//!   fields instead of failing the whole call. Only store transport or
//!   corrupt-blob errors surface.

use crate::model::account::{Account, AccountId};
use crate::model::booking::{
    sort_most_recent_first, Booking, EnrichedBooking, MISSING_OWNER_FIELD, MISSING_OWNER_NAME,
};
use crate::repo::account_repo::AccountRepository;
use crate::repo::booking_repo::BookingRepository;
use crate::repo::RepoResult;
use log::{debug, warn};
use std::collections::HashMap;

/// Read-side service joining bookings with their owners.
pub struct JoinService<A: AccountRepository, B: BookingRepository> {
    accounts: A,
    bookings: B,
}

impl<A: AccountRepository, B: BookingRepository> JoinService<A, B> {
    pub fn new(accounts: A, bookings: B) -> Self {
        Self { accounts, bookings }
    }

    /// Every booking, in stored order, with owner fields attached.
    pub fn enrich_all(&self) -> RepoResult<Vec<EnrichedBooking>> {
        let bookings = self.bookings.list_bookings()?;
        self.enrich(bookings)
    }

    /// `enrich_all` restricted to one owner.
    pub fn enrich_by_owner(&self, owner_id: AccountId) -> RepoResult<Vec<EnrichedBooking>> {
        Ok(self
            .enrich_all()?
            .into_iter()
            .filter(|item| item.booking.owner_id == owner_id)
            .collect())
    }

    /// Today's bookings, earliest first, with owner fields attached.
    pub fn enrich_today(&self) -> RepoResult<Vec<EnrichedBooking>> {
        let bookings = self.bookings.list_today_bookings()?;
        self.enrich(bookings)
    }

    /// Every enriched booking, most recent date/time first.
    pub fn list_all_recent(&self) -> RepoResult<Vec<EnrichedBooking>> {
        let mut items = self.enrich_all()?;
        sort_most_recent_first(&mut items, |item| item.booking.starts_at());
        Ok(items)
    }

    /// Display name for an account, or the missing-owner placeholder.
    pub fn owner_name(&self, owner_id: AccountId) -> RepoResult<String> {
        Ok(self
            .accounts
            .find_account(owner_id)?
            .map_or_else(|| MISSING_OWNER_NAME.to_string(), |account| account.name))
    }

    pub fn account_exists(&self, owner_id: AccountId) -> RepoResult<bool> {
        let exists = self.accounts.find_account(owner_id)?.is_some();
        if !exists {
            warn!("event=owner_lookup module=service status=missing owner_id={owner_id}");
        }
        Ok(exists)
    }

    fn enrich(&self, bookings: Vec<Booking>) -> RepoResult<Vec<EnrichedBooking>> {
        let accounts = self.accounts.list_accounts()?;
        let owners: HashMap<AccountId, &Account> = accounts
            .iter()
            .map(|account| (account.id, account))
            .collect();

        let mut orphans = 0usize;
        let items: Vec<EnrichedBooking> = bookings
            .into_iter()
            .map(|booking| match owners.get(&booking.owner_id) {
                Some(owner) => EnrichedBooking {
                    owner_name: owner.name.clone(),
                    owner_email: owner.email.clone(),
                    owner_role: owner.role.as_str().to_string(),
                    booking,
                },
                None => {
                    orphans += 1;
                    EnrichedBooking {
                        booking,
                        owner_name: MISSING_OWNER_NAME.to_string(),
                        owner_email: MISSING_OWNER_FIELD.to_string(),
                        owner_role: MISSING_OWNER_FIELD.to_string(),
                    }
                }
            })
            .collect();

        if orphans > 0 {
            warn!("event=join module=service status=partial orphans={orphans}");
        }
        debug!(
            "event=join module=service status=ok bookings={} accounts={}",
            items.len(),
            accounts.len()
        );
        Ok(items)
    }
}
