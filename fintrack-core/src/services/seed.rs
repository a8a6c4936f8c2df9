//! Seed service - replace all accounts with the sample set

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::sample::sample_accounts;
use crate::domain::Account;
use crate::ports::AccountStore;

/// Result of a reset
#[derive(Debug, Serialize)]
pub struct SeedResult {
    /// Accounts that existed before the reset, archived ones included
    pub removed: usize,
    pub created: usize,
    pub accounts: Vec<Account>,
}

pub struct SeedService {
    store: Arc<dyn AccountStore>,
}

impl SeedService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// True when a reset would delete existing accounts
    pub fn has_existing_data(&self) -> Result<bool> {
        Ok(self.store.count()? > 0)
    }

    /// Delete every account and load the sample set
    pub fn reset_and_seed(&self) -> Result<SeedResult> {
        let removed = self.store.count()?;
        let created = self
            .store
            .reset_and_seed(&sample_accounts())
            .context("Failed to load sample accounts")?;
        let accounts = self.store.list_active()?;

        log::debug!("seeded {} sample accounts, removed {}", created, removed);
        Ok(SeedResult {
            removed,
            created,
            accounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountStore;
    use crate::domain::NewAccount;

    #[test]
    fn test_seed_replaces_existing_accounts() {
        let store = Arc::new(InMemoryAccountStore::new());
        store.create(NewAccount::new("Old", "CASH", "USD")).unwrap();

        let service = SeedService::new(store);
        assert!(service.has_existing_data().unwrap());

        let result = service.reset_and_seed().unwrap();
        assert_eq!(result.removed, 1);
        assert_eq!(result.created, 4);

        let names: Vec<&str> = result.accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Savings Account", "Checking Account", "Investment Portfolio", "Emergency Fund"]
        );
    }

    #[test]
    fn test_seed_twice_is_stable() {
        let service = SeedService::new(Arc::new(InMemoryAccountStore::new()));
        assert!(!service.has_existing_data().unwrap());

        service.reset_and_seed().unwrap();
        let second = service.reset_and_seed().unwrap();
        assert_eq!(second.removed, 4);
        assert_eq!(second.accounts.len(), 4);
    }
}
