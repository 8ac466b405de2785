//! SQLite-backed blob store.
//!
//! # Invariants
//! - One row per key in `blobs`; writes upsert the whole value.
//! - `write_all` runs inside one transaction, so a multi-key write either
//!   lands fully or not at all.

use super::schema::upgrade;
use super::{BlobStore, StoreError, StoreResult};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const UPSERT_SQL: &str = "INSERT INTO blobs (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = (strftime('%s', 'now') * 1000);";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable `BlobStore` owning one upgraded SQLite connection.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (or creates) a store file and upgrades its blob table.
    ///
    /// # Side effects
    /// - Creates the file when missing.
    /// - Emits `store_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens an upgraded in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Borrow of the underlying connection, for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn open_with(
        mode: &str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StoreResult<Self> {
        let started_at = Instant::now();
        let opened: StoreResult<(Connection, u32)> =
            connect().map_err(StoreError::from).and_then(|mut conn| {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                let previous = upgrade(&mut conn)?;
                Ok((conn, previous))
            });

        match opened {
            Ok((conn, previous)) => {
                info!(
                    "event=store_open module=store status=ok mode={mode} schema_before={previous} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, blob: &str) -> StoreResult<()> {
        self.conn.execute(UPSERT_SQL, params![key, blob])?;
        debug!(
            "event=blob_write module=store status=ok key={key} bytes={}",
            blob.len()
        );
        Ok(())
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, blob) in entries {
            tx.execute(UPSERT_SQL, params![key, blob])?;
        }
        tx.commit()?;
        debug!(
            "event=blob_write_all module=store status=ok keys={}",
            entries.len()
        );
        Ok(())
    }
}
