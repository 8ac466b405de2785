//! Named-blob persistence boundary.
//!
//! # Responsibility
//! - Define the `BlobStore` contract repositories read and write through.
//! - Provide an in-memory backing for tests and a SQLite backing for
//!   durable use.
//!
//! # Invariants
//! - `write` fully replaces the named blob; there are no partial writes.
//! - `write_all` applies every entry or none when the backing supports
//!   transactions (SQLite). The memory backing cannot fail mid-way.
//! - Repositories never reach a store through global state.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
pub mod schema;
mod sqlite;

pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport failure raised by a store backing.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The store file was written by a newer schema than this binary knows.
    UnsupportedSchema { found: u32, supported: u32 },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "store backend failure: {err}"),
            Self::UnsupportedSchema { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable get/set of named text blobs.
///
/// Blobs are opaque to the store; repositories encode them as JSON.
pub trait BlobStore {
    /// Returns the blob stored under `key`, or `None` when never written.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn write(&self, key: &str, blob: &str) -> StoreResult<()>;

    /// Replaces several blobs as one logical write.
    ///
    /// The default implementation writes entries in order without atomicity.
    fn write_all(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        for (key, blob) in entries {
            self.write(key, blob)?;
        }
        Ok(())
    }
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).write(key, blob)
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        (**self).write_all(entries)
    }
}
