//! Account store port - persistence abstraction for account records

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, NewAccount};

/// Persistence for account records.
///
/// The aggregation code never talks to a store; callers fetch a snapshot
/// with `list_active` and hand it over. After any mutation the caller is
/// expected to fetch again.
pub trait AccountStore: Send + Sync {
    /// Active accounts, most recently created first
    fn list_active(&self) -> Result<Vec<Account>>;

    /// One active account by id.
    ///
    /// Fails with `Error::NotFound` for an unknown or archived id.
    fn get(&self, id: Uuid) -> Result<Account>;

    /// Validate, apply defaults and persist a new account.
    ///
    /// Fails with `Error::Validation` when name, type or currency is missing.
    fn create(&self, fields: NewAccount) -> Result<Account>;

    /// Replace the balance of an account (not a delta).
    ///
    /// Fails with `Error::NotFound` for an unknown id.
    fn update_balance(&self, id: Uuid, balance: Decimal) -> Result<Account>;

    /// Hide an account from `list_active` without deleting it
    fn archive(&self, id: Uuid) -> Result<Account>;

    /// Delete every account, then create `sample` in order. Returns the
    /// number of accounts created.
    fn reset_and_seed(&self, sample: &[NewAccount]) -> Result<usize>;

    /// Number of stored accounts, archived ones included
    fn count(&self) -> Result<usize>;
}
