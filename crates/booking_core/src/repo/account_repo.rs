//! Account repository contract and blob-store implementation.
//!
//! # Responsibility
//! - Provide CRUD and credential lookup over the `accounts` collection.
//! - Own the cascading removal of bookings when their owner is deleted.
//!
//! # Invariants
//! - Write paths validate input before any store access that mutates.
//! - `email` stays unique across the collection (exact match).
//! - The primary administrator (`PRIMARY_ADMIN_ID` holding the
//!   administrator role) is never deleted and never loses that role.
//! - Account and cascaded bookings are persisted through one `write_all`.
//! - Credentials are never logged.
//! - An empty patch returns the stored account without writing.

use crate::model::account::{
    Account, AccountDeletion, AccountId, AccountPatch, NewAccount, Role,
};
use crate::repo::collections::{load_accounts, load_bookings, save_accounts, save_both};
use crate::repo::id_alloc::next_id;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::BlobStore;
use log::{debug, info, warn};

/// Repository interface for account operations.
pub trait AccountRepository {
    fn create_account(&self, input: &NewAccount) -> RepoResult<Account>;
    fn update_account(&self, id: AccountId, patch: &AccountPatch) -> RepoResult<Account>;
    fn delete_account(&self, id: AccountId) -> RepoResult<AccountDeletion>;
    fn find_account(&self, id: AccountId) -> RepoResult<Option<Account>>;
    /// All accounts in insertion order.
    fn list_accounts(&self) -> RepoResult<Vec<Account>>;
    /// Exact match on both email and credential.
    fn authenticate(&self, email: &str, credential: &str) -> RepoResult<Option<Account>>;
}

/// `AccountRepository` persisted in a `BlobStore`.
pub struct StoreAccountRepository<'s, S: BlobStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: BlobStore + ?Sized> StoreAccountRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }
}

impl<S: BlobStore + ?Sized> AccountRepository for StoreAccountRepository<'_, S> {
    fn create_account(&self, input: &NewAccount) -> RepoResult<Account> {
        if let Err(err) = input.validate() {
            warn!(
                "event=account_create module=repo status=rejected reason=\"{}\"",
                err.reason()
            );
            return Err(err.into());
        }

        let mut accounts = load_accounts(self.store)?;
        if accounts.iter().any(|account| account.email == input.email) {
            warn!("event=account_create module=repo status=rejected reason=duplicate_email");
            return Err(RepoError::DuplicateEmail(input.email.clone()));
        }

        let id = next_id(Entity::Account, accounts.iter().map(|account| account.id))?;
        let account = input.to_account(id);
        accounts.push(account.clone());
        save_accounts(self.store, &accounts)?;

        info!(
            "event=account_create module=repo status=ok account_id={id} role={}",
            account.role
        );
        Ok(account)
    }

    fn update_account(&self, id: AccountId, patch: &AccountPatch) -> RepoResult<Account> {
        let mut accounts = load_accounts(self.store)?;
        let index = accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| RepoError::account_not_found(id))?;

        if patch.is_empty() {
            debug!("event=account_update module=repo status=noop account_id={id}");
            return Ok(accounts.swap_remove(index));
        }

        patch.validate()?;

        if let Some(email) = patch.email.as_deref() {
            let taken = accounts
                .iter()
                .any(|account| account.id != id && account.email == email);
            if taken {
                warn!(
                    "event=account_update module=repo status=rejected account_id={id} reason=duplicate_email"
                );
                return Err(RepoError::DuplicateEmail(email.to_string()));
            }
        }

        let demotes = patch.role.is_some_and(|role| role != Role::Administrator);
        if accounts[index].is_primary() && demotes {
            warn!(
                "event=account_update module=repo status=rejected account_id={id} reason=protected"
            );
            return Err(RepoError::Protected(id));
        }

        let account = &mut accounts[index];
        patch.apply_to(account);
        let updated = account.clone();
        save_accounts(self.store, &accounts)?;

        info!(
            "event=account_update module=repo status=ok account_id={id} credential_changed={}",
            patch.credential.is_some()
        );
        Ok(updated)
    }

    fn delete_account(&self, id: AccountId) -> RepoResult<AccountDeletion> {
        let mut accounts = load_accounts(self.store)?;
        let index = accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| RepoError::account_not_found(id))?;
        if accounts[index].is_primary() {
            warn!(
                "event=account_delete module=repo status=rejected account_id={id} reason=protected"
            );
            return Err(RepoError::Protected(id));
        }
        let account = accounts.remove(index);

        let mut bookings = load_bookings(self.store)?;
        let before = bookings.len();
        bookings.retain(|booking| booking.owner_id != id);
        let cascaded_count = before - bookings.len();

        save_both(self.store, &accounts, &bookings)?;

        info!(
            "event=account_delete module=repo status=ok account_id={id} cascaded_bookings={cascaded_count}"
        );
        Ok(AccountDeletion {
            account,
            cascaded_count,
        })
    }

    fn find_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let account = load_accounts(self.store)?
            .into_iter()
            .find(|account| account.id == id);
        debug!(
            "event=account_find module=repo status=ok account_id={id} found={}",
            account.is_some()
        );
        Ok(account)
    }

    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        load_accounts(self.store)
    }

    fn authenticate(&self, email: &str, credential: &str) -> RepoResult<Option<Account>> {
        let account = load_accounts(self.store)?
            .into_iter()
            .find(|account| account.email == email && account.credential == credential);
        match &account {
            Some(found) => info!(
                "event=authenticate module=repo status=ok account_id={} role={}",
                found.id, found.role
            ),
            None => info!("event=authenticate module=repo status=denied"),
        }
        Ok(account)
    }
}
