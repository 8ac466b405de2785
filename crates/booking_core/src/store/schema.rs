//! Blob table schema and its upgrade path.
//!
//! # Invariants
//! - Step `n` of `SCHEMA_STEPS` upgrades a file from version `n` to `n + 1`.
//! - The reached version is stored in `PRAGMA user_version` in the same
//!   transaction as the step itself.
//! - A file written by a newer binary is refused, never downgraded.

use super::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_STEPS: &[&str] = &[include_str!("schema/0001_blobs.sql")];

/// Schema version this binary writes.
pub const SCHEMA_VERSION: u32 = SCHEMA_STEPS.len() as u32;

/// Version recorded in the file behind `conn`; `0` for a fresh file.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the blob table up to `SCHEMA_VERSION` and returns the version the
/// file had before.
pub(crate) fn upgrade(conn: &mut Connection) -> StoreResult<u32> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    let pending = &SCHEMA_STEPS[found as usize..];
    if pending.is_empty() {
        return Ok(found);
    }

    let tx = conn.transaction()?;
    for (offset, step) in pending.iter().enumerate() {
        let reached = found + offset as u32 + 1;
        tx.execute_batch(step)?;
        tx.pragma_update(None, "user_version", reached)?;
    }
    tx.commit()?;

    info!(
        "event=schema_upgrade module=store status=ok from={found} to={SCHEMA_VERSION}"
    );
    Ok(found)
}
