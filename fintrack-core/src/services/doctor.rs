//! Doctor service - account data health checks

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::domain::{currency_breakdown, total_net_worth, Account, AccountType};
use crate::ports::AccountStore;

const PASS: &str = "pass";
const WARNING: &str = "warning";
const ERROR: &str = "error";

pub struct DoctorService {
    store: Arc<dyn AccountStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Run all health checks
    ///
    /// A store failure is reported as a failed check, not as an error, so
    /// the caller always gets a report.
    pub fn run_checks(&self) -> Result<DoctorResult> {
        let mut checks = BTreeMap::new();

        match self.store.count() {
            Ok(count) => {
                checks.insert(
                    "store".to_string(),
                    CheckResult::pass(format!("Account store reachable ({} record(s))", count)),
                );
            }
            Err(e) => {
                checks.insert(
                    "store".to_string(),
                    CheckResult::new(ERROR, format!("Account store unavailable: {}", e)),
                );
                return Ok(DoctorResult::from_checks(checks));
            }
        }

        let accounts = match self.store.list_active() {
            Ok(accounts) => accounts,
            Err(e) => {
                checks.insert(
                    "active_accounts".to_string(),
                    CheckResult::new(ERROR, format!("Failed to list accounts: {}", e)),
                );
                return Ok(DoctorResult::from_checks(checks));
            }
        };

        checks.insert("active_accounts".to_string(), check_active(&accounts));
        checks.insert("duplicate_ids".to_string(), check_duplicate_ids(&accounts));
        checks.insert("blank_names".to_string(), check_blank_names(&accounts));
        checks.insert("unknown_currencies".to_string(), check_unknown_currencies(&accounts));
        checks.insert("custom_types".to_string(), check_custom_types(&accounts));
        checks.insert("totals".to_string(), check_totals(&accounts));

        Ok(DoctorResult::from_checks(checks))
    }
}

fn check_active(accounts: &[Account]) -> CheckResult {
    if accounts.is_empty() {
        CheckResult::new(WARNING, "No active accounts".to_string())
    } else {
        CheckResult::pass(format!("{} active account(s)", accounts.len()))
    }
}

fn check_duplicate_ids(accounts: &[Account]) -> CheckResult {
    let mut seen: HashMap<_, usize> = HashMap::new();
    for account in accounts {
        *seen.entry(account.id).or_default() += 1;
    }
    let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();

    if duplicates.is_empty() {
        return CheckResult::pass("All account ids are unique".to_string());
    }
    CheckResult::new(
        ERROR,
        format!("{} account id(s) appear more than once", duplicates.len()),
    )
    .with_details(
        duplicates
            .iter()
            .map(|(id, n)| json!({ "account_id": id.to_string(), "count": n }))
            .collect(),
    )
}

fn check_blank_names(accounts: &[Account]) -> CheckResult {
    let blank: Vec<_> = accounts.iter().filter(|a| a.name.trim().is_empty()).collect();
    if blank.is_empty() {
        return CheckResult::pass("All accounts are named".to_string());
    }
    CheckResult::new(ERROR, format!("{} account(s) have no name", blank.len())).with_details(
        blank
            .iter()
            .map(|a| json!({ "account_id": a.id.to_string() }))
            .collect(),
    )
}

fn check_unknown_currencies(accounts: &[Account]) -> CheckResult {
    let unknown: Vec<_> = currency_breakdown(accounts)
        .into_iter()
        .filter(|total| !total.currency.is_known())
        .collect();
    if unknown.is_empty() {
        return CheckResult::pass("All currencies have a symbol".to_string());
    }
    CheckResult::new(
        WARNING,
        format!("{} currency code(s) shown without a symbol", unknown.len()),
    )
    .with_details(
        unknown
            .iter()
            .map(|total| json!({ "currency": total.currency.code() }))
            .collect(),
    )
}

fn check_custom_types(accounts: &[Account]) -> CheckResult {
    let mut custom: Vec<&str> = accounts
        .iter()
        .filter_map(|a| match &a.account_type {
            AccountType::Custom(code) => Some(code.as_str()),
            _ => None,
        })
        .collect();
    custom.sort_unstable();
    custom.dedup();

    if custom.is_empty() {
        return CheckResult::pass("All account types are known".to_string());
    }
    CheckResult::new(
        WARNING,
        format!("{} account type(s) outside the known set", custom.len()),
    )
    .with_details(custom.iter().map(|code| json!({ "account_type": code })).collect())
}

/// Per-currency totals must add back up to the net worth
fn check_totals(accounts: &[Account]) -> CheckResult {
    let net_worth = total_net_worth(accounts);
    let groups = currency_breakdown(accounts);
    let by_currency = groups
        .iter()
        .fold(rust_decimal::Decimal::ZERO, |sum, t| sum.saturating_add(t.amount));

    if by_currency == net_worth {
        CheckResult::pass(format!(
            "Totals consistent across {} currency group(s)",
            groups.len()
        ))
    } else {
        CheckResult::new(
            ERROR,
            "Currency totals do not add up to the net worth".to_string(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: BTreeMap<String, CheckResult>,
    pub summary: DoctorSummary,
}

impl DoctorResult {
    fn from_checks(checks: BTreeMap<String, CheckResult>) -> Self {
        let count = |status: &str| checks.values().filter(|c| c.status == status).count() as i64;
        let summary = DoctorSummary {
            passed: count(PASS),
            warnings: count(WARNING),
            errors: count(ERROR),
        };
        Self { checks, summary }
    }

    pub fn is_healthy(&self) -> bool {
        self.summary.errors == 0
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<serde_json::Value>>,
}

impl CheckResult {
    fn new(status: &str, message: String) -> Self {
        Self {
            status: status.to_string(),
            message,
            details: None,
        }
    }

    fn pass(message: String) -> Self {
        Self::new(PASS, message)
    }

    fn with_details(mut self, details: Vec<serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorSummary {
    pub passed: i64,
    pub warnings: i64,
    pub errors: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::adapters::memory::InMemoryAccountStore;
    use crate::adapters::sample::sample_accounts;
    use crate::domain::Currency;

    #[test]
    fn test_sample_data_is_healthy() {
        let store = Arc::new(InMemoryAccountStore::new());
        store.reset_and_seed(&sample_accounts()).unwrap();

        let result = DoctorService::new(store).run_checks().unwrap();
        assert!(result.is_healthy());
        assert_eq!(result.summary.warnings, 0);
        assert_eq!(result.checks["active_accounts"].message, "4 active account(s)");
    }

    #[test]
    fn test_empty_store_warns() {
        let result = DoctorService::new(Arc::new(InMemoryAccountStore::new()))
            .run_checks()
            .unwrap();
        assert!(result.is_healthy());
        assert_eq!(result.checks["active_accounts"].status, WARNING);
    }

    #[test]
    fn test_detects_bad_records() {
        let id = Uuid::new_v4();
        let accounts = vec![
            Account::new(id, "Wallet", AccountType::Cash, Currency::Custom("XYZ".into())),
            Account::new(id, " ", AccountType::Custom("LOAN".into()), Currency::Inr)
                .with_balance(Decimal::new(-500, 0)),
        ];
        let store = Arc::new(InMemoryAccountStore::with_accounts(accounts));

        let result = DoctorService::new(store).run_checks().unwrap();
        assert!(!result.is_healthy());
        assert_eq!(result.checks["duplicate_ids"].status, ERROR);
        assert_eq!(result.checks["blank_names"].status, ERROR);
        assert_eq!(result.checks["unknown_currencies"].status, WARNING);
        assert_eq!(result.checks["custom_types"].status, WARNING);
        assert_eq!(result.checks["totals"].status, PASS);
        assert_eq!(result.summary.errors, 2);
    }
}
