//! JSON encoding of the two persisted collections.
//!
//! Read paths reject malformed blobs instead of masking them; a missing key
//! reads as an empty collection.

use crate::model::account::Account;
use crate::model::booking::Booking;
use crate::repo::{RepoError, RepoResult};
use crate::store::BlobStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const ACCOUNTS_KEY: &str = "accounts";
pub const BOOKINGS_KEY: &str = "bookings";

pub(crate) fn load_accounts<S: BlobStore + ?Sized>(store: &S) -> RepoResult<Vec<Account>> {
    load(store, ACCOUNTS_KEY)
}

pub(crate) fn load_bookings<S: BlobStore + ?Sized>(store: &S) -> RepoResult<Vec<Booking>> {
    load(store, BOOKINGS_KEY)
}

pub(crate) fn save_accounts<S: BlobStore + ?Sized>(
    store: &S,
    accounts: &[Account],
) -> RepoResult<()> {
    let blob = encode(ACCOUNTS_KEY, accounts)?;
    store.write(ACCOUNTS_KEY, &blob)?;
    Ok(())
}

pub(crate) fn save_bookings<S: BlobStore + ?Sized>(
    store: &S,
    bookings: &[Booking],
) -> RepoResult<()> {
    let blob = encode(BOOKINGS_KEY, bookings)?;
    store.write(BOOKINGS_KEY, &blob)?;
    Ok(())
}

/// Writes both collections as one logical store write.
pub(crate) fn save_both<S: BlobStore + ?Sized>(
    store: &S,
    accounts: &[Account],
    bookings: &[Booking],
) -> RepoResult<()> {
    let accounts_blob = encode(ACCOUNTS_KEY, accounts)?;
    let bookings_blob = encode(BOOKINGS_KEY, bookings)?;
    store.write_all(&[
        (ACCOUNTS_KEY, accounts_blob.as_str()),
        (BOOKINGS_KEY, bookings_blob.as_str()),
    ])?;
    Ok(())
}

pub(crate) fn is_present<S: BlobStore + ?Sized>(store: &S, key: &str) -> RepoResult<bool> {
    Ok(store.read(key)?.is_some())
}

fn load<S, T>(store: &S, key: &str) -> RepoResult<Vec<T>>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    match store.read(key)? {
        Some(blob) => serde_json::from_str(&blob)
            .map_err(|err| RepoError::InvalidData(format!("`{key}` blob: {err}"))),
        None => Ok(Vec::new()),
    }
}

fn encode<T: Serialize>(key: &str, items: &[T]) -> RepoResult<String> {
    serde_json::to_string(items)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode `{key}`: {err}")))
}
