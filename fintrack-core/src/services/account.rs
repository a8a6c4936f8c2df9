//! Account service - create, list and change account records

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, NewAccount};
use crate::ports::AccountStore;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Active accounts, newest first
    pub fn list(&self) -> Result<Vec<Account>> {
        self.store.list_active()
    }

    /// Look up one active account
    pub fn get(&self, id: Uuid) -> Result<Account> {
        self.store.get(id)
    }

    /// Validate, apply defaults and persist a new account
    pub fn create(&self, fields: NewAccount) -> Result<Account> {
        self.store.create(fields)
    }

    /// Replace the balance of an account
    pub fn update_balance(&self, id: Uuid, balance: Decimal) -> Result<Account> {
        let account = self.store.update_balance(id, balance)?;
        log::debug!("updated balance of account {}", id);
        Ok(account)
    }

    pub fn archive(&self, id: Uuid) -> Result<Account> {
        let account = self.store.archive(id)?;
        log::debug!("archived account {}", id);
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountStore;
    use crate::domain::result::Error;

    fn service() -> AccountService {
        AccountService::new(Arc::new(InMemoryAccountStore::new()))
    }

    #[test]
    fn test_create_applies_defaults() {
        let service = service();
        let account = service
            .create(NewAccount::new("Wallet", "CASH", "inr"))
            .unwrap();

        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.color, crate::domain::DEFAULT_COLOR);
        assert_eq!(account.currency.code(), "INR");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let err = service().create(NewAccount::new("", "CASH", "")).unwrap_err();
        match err {
            Error::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("currency"));
                assert!(!msg.contains("type"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_unknown_account() {
        let err = service().get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_update_and_archive() {
        let service = service();
        let account = service
            .create(NewAccount::new("Savings", "BANK", "INR").with_balance(Decimal::new(100, 0)))
            .unwrap();

        let updated = service.update_balance(account.id, Decimal::new(-250, 0)).unwrap();
        assert_eq!(updated.balance, Decimal::new(-250, 0));
        assert_eq!(service.get(account.id).unwrap().balance, Decimal::new(-250, 0));

        service.archive(account.id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(matches!(service.get(account.id), Err(Error::NotFound(_))));
    }
}
