//! Sample data for first-run exploration
//!
//! Four accounts across two currencies, used by `SeedService` to populate an
//! empty (or reset) store.

use rust_decimal::Decimal;

use crate::domain::NewAccount;

/// The fixed sample set, in display order
pub fn sample_accounts() -> Vec<NewAccount> {
    vec![
        NewAccount::new("Savings Account", "BANK", "INR")
            .with_balance(Decimal::new(450000, 0))
            .with_color("#4cc9f0")
            .with_icon("bi-bank2"),
        NewAccount::new("Checking Account", "BANK", "INR")
            .with_balance(Decimal::new(125680, 0))
            .with_color("#4361ee")
            .with_icon("bi-credit-card"),
        NewAccount::new("Investment Portfolio", "INVESTMENT", "INR")
            .with_balance(Decimal::new(570000, 0))
            .with_color("#3f37c9")
            .with_icon("bi-graph-up"),
        NewAccount::new("Emergency Fund", "CASH", "EUR")
            .with_balance(Decimal::new(14650, 0))
            .with_color("#fb5607")
            .with_icon("bi-piggy-bank"),
    ]
}
