//! Demo data written on first start.
//!
//! # Invariants
//! - A collection is seeded only when its key has never been written; an
//!   existing (even empty) collection is left untouched.
//! - Account `PRIMARY_ADMIN_ID` is the seeded primary administrator.
//! - Seeded bookings bypass date validation: they are historical records.

use crate::model::account::{Account, Role, PRIMARY_ADMIN_ID};
use crate::model::booking::{Booking, BookingStatus};
use crate::repo::collections::{is_present, save_accounts, save_bookings};
use crate::repo::{RepoResult, ACCOUNTS_KEY, BOOKINGS_KEY};
use crate::store::BlobStore;
use chrono::{NaiveDate, NaiveTime};
use log::info;

/// What `seed_demo_data` wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub accounts_seeded: usize,
    pub bookings_seeded: usize,
}

/// Seeds demo accounts and bookings into collections that do not exist yet.
pub fn seed_demo_data<S: BlobStore + ?Sized>(store: &S) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    if !is_present(store, ACCOUNTS_KEY)? {
        let accounts = demo_accounts();
        save_accounts(store, &accounts)?;
        report.accounts_seeded = accounts.len();
    }

    if !is_present(store, BOOKINGS_KEY)? {
        let bookings = demo_bookings();
        save_bookings(store, &bookings)?;
        report.bookings_seeded = bookings.len();
    }

    info!(
        "event=seed module=repo status=ok accounts={} bookings={}",
        report.accounts_seeded, report.bookings_seeded
    );
    Ok(report)
}

fn demo_accounts() -> Vec<Account> {
    let account = |id, name: &str, email: &str, credential: &str, role| Account {
        id,
        name: name.to_string(),
        email: email.to_string(),
        credential: credential.to_string(),
        role,
    };
    vec![
        account(
            PRIMARY_ADMIN_ID,
            "Admin Principal",
            "admin@reservas.com",
            "admin123",
            Role::Administrator,
        ),
        account(
            2,
            "Operador Sistema",
            "operador@reservas.com",
            "operador123",
            Role::Operator,
        ),
        account(3, "Juan Pérez", "juan@cliente.com", "juan123", Role::Client),
        account(4, "María García", "maria@cliente.com", "maria123", Role::Client),
        account(
            5,
            "Carlos Rodríguez",
            "carlos@cliente.com",
            "carlos123",
            Role::Client,
        ),
    ]
}

fn demo_bookings() -> Vec<Booking> {
    [
        (1, 3, (2025, 2, 20), (10, 0), BookingStatus::Pending),
        (2, 4, (2025, 2, 21), (14, 30), BookingStatus::Confirmed),
        (3, 3, (2025, 2, 22), (9, 0), BookingStatus::Confirmed),
        (4, 5, (2025, 2, 23), (16, 0), BookingStatus::Pending),
    ]
    .into_iter()
    .filter_map(|(id, owner_id, (y, m, d), (hour, minute), status)| {
        Some(Booking {
            id,
            owner_id,
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            time: NaiveTime::from_hms_opt(hour, minute, 0)?,
            status,
        })
    })
    .collect()
}
