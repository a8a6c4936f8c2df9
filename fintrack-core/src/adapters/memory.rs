//! In-memory account store
//!
//! Keeps accounts in a mutex-guarded vector. Useful for embedding the core
//! without a database file, and for tests.

use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, NewAccount};
use crate::ports::AccountStore;

/// Account store backed by a `Vec` in insertion order
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records (kept as given, no validation)
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>> {
        self.accounts
            .lock()
            .map_err(|e| Error::database(format!("Lock poisoned: {}", e)))
    }

    fn modify<F>(&self, id: Uuid, change: F) -> Result<Account>
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.lock()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::not_found(format!("Account {}", id)))?;
        change(account);
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

impl AccountStore for InMemoryAccountStore {
    fn list_active(&self) -> Result<Vec<Account>> {
        let accounts = self.lock()?;
        // Stored oldest first; reversing before the stable sort keeps ties
        // newest-inserted first.
        let mut active: Vec<Account> = accounts.iter().rev().filter(|a| a.is_active).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    fn get(&self, id: Uuid) -> Result<Account> {
        self.lock()?
            .iter()
            .find(|a| a.id == id && a.is_active)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Account {}", id)))
    }

    fn create(&self, fields: NewAccount) -> Result<Account> {
        let account = fields.into_account(Uuid::new_v4(), Utc::now())?;
        self.lock()?.push(account.clone());
        Ok(account)
    }

    fn update_balance(&self, id: Uuid, balance: Decimal) -> Result<Account> {
        self.modify(id, |account| account.balance = balance)
    }

    fn archive(&self, id: Uuid) -> Result<Account> {
        self.modify(id, |account| account.is_active = false)
    }

    fn reset_and_seed(&self, sample: &[NewAccount]) -> Result<usize> {
        let now = Utc::now();
        // Build everything first so a bad sample leaves the store untouched.
        // Timestamps step back per entry so list_active keeps sample order.
        let seeded = sample
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, fields)| {
                let created_at = now - Duration::microseconds(i as i64);
                fields.into_account(Uuid::new_v4(), created_at)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut accounts = self.lock()?;
        accounts.clear();
        accounts.extend(seeded);
        Ok(accounts.len())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sample::sample_accounts;
    use crate::domain::AccountType;

    #[test]
    fn test_create_and_list() {
        let store = InMemoryAccountStore::new();
        let created = store.create(NewAccount::new("Wallet", "CASH", "usd")).unwrap();

        let listed = store.list_active().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let store = InMemoryAccountStore::new();
        let err = store.create(NewAccount::new("Wallet", "", "USD")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_balance_replaces_value() {
        let store = InMemoryAccountStore::new();
        let created = store
            .create(NewAccount::new("Wallet", "CASH", "USD").with_balance(Decimal::new(100, 0)))
            .unwrap();

        let updated = store.update_balance(created.id, Decimal::new(40, 0)).unwrap();
        assert_eq!(updated.balance, Decimal::new(40, 0));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_unknown_account() {
        let store = InMemoryAccountStore::new();
        let err = store.update_balance(Uuid::new_v4(), Decimal::ONE).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_archive_hides_account() {
        let store = InMemoryAccountStore::new();
        let created = store.create(NewAccount::new("Old Card", "CREDIT", "GBP")).unwrap();

        assert_eq!(store.get(created.id).unwrap(), created);

        store.archive(created.id).unwrap();
        assert!(store.list_active().unwrap().is_empty());
        assert!(matches!(store.get(created.id), Err(Error::NotFound(_))));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_reset_and_seed_keeps_sample_order() {
        let store = InMemoryAccountStore::new();
        store.create(NewAccount::new("Leftover", "OTHER", "USD")).unwrap();

        let count = store.reset_and_seed(&sample_accounts()).unwrap();
        assert_eq!(count, 4);

        let names: Vec<String> = store.list_active().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["Savings Account", "Checking Account", "Investment Portfolio", "Emergency Fund"]
        );
    }

    #[test]
    fn test_reset_and_seed_rejects_invalid_sample() {
        let store = InMemoryAccountStore::new();
        store.create(NewAccount::new("Keep Me", "BANK", "INR")).unwrap();

        let bad = vec![NewAccount::new("", "BANK", "INR")];
        assert!(store.reset_and_seed(&bad).is_err());

        let remaining = store.list_active().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].account_type, AccountType::Bank);
    }
}
