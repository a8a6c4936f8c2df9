//! Core domain entities
//!
//! Business entities and the pure logic over them live here: account
//! records, aggregation for display and amount formatting. No I/O.

mod account;
pub mod format;
pub mod result;
pub mod summary;

pub use account::{parse_balance, Account, AccountType, Currency, NewAccount, DEFAULT_COLOR, DEFAULT_ICON};
pub use format::{format_currency, CurrencyFormatter, DigitGrouping, NumberLocale};
pub use summary::{
    currency_breakdown, partition_by_type, split_bank_accounts, total_net_worth,
    type_distribution, CurrencyTotal, TypeTotal,
};
