//! Aggregation over account snapshots
//!
//! Pure functions that turn a slice of accounts into the derived views used
//! for display: nominal net worth, totals per currency and totals per account
//! type. Nothing here converts between currencies; amounts in different
//! currencies are added at face value.
//!
//! Every function is total. Sums saturate at the `Decimal` bounds instead of
//! panicking.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountType, Currency, DEFAULT_COLOR};

/// Sum of balances for one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTotal {
    pub currency: Currency,
    pub amount: Decimal,
}

impl CurrencyTotal {
    pub fn symbol(&self) -> &str {
        self.currency.symbol()
    }
}

/// Sum of balances for one account type, with the chart color of the first
/// account of that type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTotal {
    pub account_type: AccountType,
    pub amount: Decimal,
    pub color: String,
}

impl TypeTotal {
    pub fn label(&self) -> &str {
        self.account_type.label()
    }
}

/// Nominal sum of every balance, regardless of currency
pub fn total_net_worth(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .fold(Decimal::ZERO, |total, account| total.saturating_add(account.balance))
}

/// Balances grouped by currency, in first-occurrence order
pub fn currency_breakdown(accounts: &[Account]) -> Vec<CurrencyTotal> {
    let mut totals: Vec<CurrencyTotal> = Vec::new();
    let mut index: HashMap<&Currency, usize> = HashMap::new();

    for account in accounts {
        match index.get(&account.currency) {
            Some(&i) => {
                totals[i].amount = totals[i].amount.saturating_add(account.balance);
            }
            None => {
                index.insert(&account.currency, totals.len());
                totals.push(CurrencyTotal {
                    currency: account.currency.clone(),
                    amount: account.balance,
                });
            }
        }
    }

    totals
}

/// Balances grouped by account type, in first-occurrence order.
///
/// The group color is taken from the first account of each type and is not
/// revisited for later accounts. A blank first color becomes `DEFAULT_COLOR`.
pub fn type_distribution(accounts: &[Account]) -> Vec<TypeTotal> {
    let mut totals: Vec<TypeTotal> = Vec::new();
    let mut index: HashMap<&AccountType, usize> = HashMap::new();

    for account in accounts {
        match index.get(&account.account_type) {
            Some(&i) => {
                totals[i].amount = totals[i].amount.saturating_add(account.balance);
            }
            None => {
                index.insert(&account.account_type, totals.len());
                totals.push(TypeTotal {
                    account_type: account.account_type.clone(),
                    amount: account.balance,
                    color: group_color(&account.color),
                });
            }
        }
    }

    totals
}

fn group_color(color: &str) -> String {
    if color.trim().is_empty() {
        DEFAULT_COLOR.to_string()
    } else {
        color.to_string()
    }
}

/// Stable partition: `(matching, non_matching)`, each in input order
pub fn partition_by_type<'a, F>(accounts: &'a [Account], predicate: F) -> (Vec<&'a Account>, Vec<&'a Account>)
where
    F: Fn(&AccountType) -> bool,
{
    accounts
        .iter()
        .partition(|account| predicate(&account.account_type))
}

/// Bank accounts first, everything else second
pub fn split_bank_accounts(accounts: &[Account]) -> (Vec<&Account>, Vec<&Account>) {
    partition_by_type(accounts, |t| *t == AccountType::Bank)
}
