//! Integer id allocation for the persisted collections.

use crate::repo::{Entity, RepoError, RepoResult};
use log::error;

/// Returns the next id for an `entity` collection holding `existing` ids.
///
/// `1` for an empty collection, otherwise the live maximum plus one. No
/// counter is persisted, so removing the record holding the maximum lets its
/// id be issued again. A collection already holding `u32::MAX` has no next id.
pub fn next_id(entity: Entity, existing: impl IntoIterator<Item = u32>) -> RepoResult<u32> {
    match existing.into_iter().max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            error!(
                "event=id_alloc module=repo status=error entity={} max_id={max}",
                entity.as_str()
            );
            RepoError::IdExhausted(entity)
        }),
    }
}
