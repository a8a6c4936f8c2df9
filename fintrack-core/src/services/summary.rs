//! Summary service - assembles the dashboard view
//!
//! Fetches one snapshot of active accounts and runs the aggregation and
//! formatting over it. Amounts in different currencies are summed at face
//! value; configured conversions only add extra display lines.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{Config, DisplayConversion};
use crate::domain::result::Result;
use crate::domain::{
    currency_breakdown, split_bank_accounts, total_net_worth, type_distribution, Account, AccountType,
    Currency, CurrencyFormatter,
};
use crate::ports::AccountStore;

/// Net worth multiplied by a configured display rate
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedTotal {
    pub currency: Currency,
    pub rate: Decimal,
    pub amount: Decimal,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyLine {
    pub currency: Currency,
    pub symbol: String,
    pub amount: Decimal,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeLine {
    pub account_type: AccountType,
    pub label: String,
    pub amount: Decimal,
    pub color: String,
    /// Formatted in the base currency
    pub display: String,
}

/// Everything the summary screen shows
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub base_currency: Currency,
    pub account_count: usize,
    pub net_worth: Decimal,
    pub net_worth_display: String,
    pub conversions: Vec<ConvertedTotal>,
    pub currency_breakdown: Vec<CurrencyLine>,
    pub type_distribution: Vec<TypeLine>,
    pub bank_accounts: Vec<Account>,
    pub other_accounts: Vec<Account>,
}

pub struct SummaryService {
    store: Arc<dyn AccountStore>,
    formatter: CurrencyFormatter,
    base_currency: Currency,
    conversions: Vec<DisplayConversion>,
}

impl SummaryService {
    pub fn new(store: Arc<dyn AccountStore>, config: &Config) -> Self {
        Self {
            store,
            formatter: CurrencyFormatter::new(config.number_locale()),
            base_currency: config.base_currency.clone(),
            conversions: config.conversions.clone(),
        }
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// Fetch active accounts and build the dashboard
    pub fn dashboard(&self) -> Result<Dashboard> {
        let accounts = self.store.list_active()?;
        Ok(self.build(&accounts))
    }

    /// Build the dashboard for an already fetched snapshot
    pub fn build(&self, accounts: &[Account]) -> Dashboard {
        let net_worth = total_net_worth(accounts);

        let conversions = self
            .conversions
            .iter()
            .map(|c| {
                let amount = net_worth.saturating_mul(c.rate).round_dp(2);
                ConvertedTotal {
                    currency: c.currency.clone(),
                    rate: c.rate,
                    amount,
                    display: self.formatter.format(amount, &c.currency),
                }
            })
            .collect();

        let currency_breakdown = currency_breakdown(accounts)
            .into_iter()
            .map(|total| CurrencyLine {
                symbol: total.symbol().to_string(),
                display: self.formatter.format(total.amount, &total.currency),
                currency: total.currency,
                amount: total.amount,
            })
            .collect();

        let type_distribution = type_distribution(accounts)
            .into_iter()
            .map(|total| TypeLine {
                label: total.label().to_string(),
                display: self.formatter.format(total.amount, &self.base_currency),
                account_type: total.account_type,
                amount: total.amount,
                color: total.color,
            })
            .collect();

        let (banks, others) = split_bank_accounts(accounts);

        Dashboard {
            base_currency: self.base_currency.clone(),
            account_count: accounts.len(),
            net_worth,
            net_worth_display: self.formatter.format(net_worth, &self.base_currency),
            conversions,
            currency_breakdown,
            type_distribution,
            bank_accounts: banks.into_iter().cloned().collect(),
            other_accounts: others.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountStore;
    use crate::adapters::sample::sample_accounts;
    use crate::domain::NumberLocale;

    fn seeded_store() -> Arc<InMemoryAccountStore> {
        let store = Arc::new(InMemoryAccountStore::new());
        store.reset_and_seed(&sample_accounts()).unwrap();
        store
    }

    #[test]
    fn test_dashboard_for_sample_data() {
        let service = SummaryService::new(seeded_store(), &Config::default());
        let dashboard = service.dashboard().unwrap();

        assert_eq!(dashboard.account_count, 4);
        assert_eq!(dashboard.net_worth, Decimal::new(1160330, 0));
        assert_eq!(dashboard.net_worth_display, "₹ 1,160,330");
        assert!(dashboard.conversions.is_empty());

        let currencies: Vec<&str> = dashboard
            .currency_breakdown
            .iter()
            .map(|line| line.display.as_str())
            .collect();
        assert_eq!(currencies, vec!["₹ 1,145,680", "€ 14,650"]);

        let labels: Vec<&str> = dashboard
            .type_distribution
            .iter()
            .map(|line| line.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Bank Account", "Investment", "Cash"]);
        assert_eq!(dashboard.type_distribution[2].display, "₹ 14,650");
        assert_eq!(dashboard.type_distribution[0].color, "#4cc9f0");

        let banks: Vec<&str> = dashboard.bank_accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(banks, vec!["Savings Account", "Checking Account"]);
        let others: Vec<&str> = dashboard.other_accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(others, vec!["Investment Portfolio", "Emergency Fund"]);
    }

    #[test]
    fn test_empty_dashboard() {
        let service = SummaryService::new(Arc::new(InMemoryAccountStore::new()), &Config::default());
        let dashboard = service.dashboard().unwrap();

        assert_eq!(dashboard.net_worth, Decimal::ZERO);
        assert_eq!(dashboard.net_worth_display, "₹ 0");
        assert!(dashboard.currency_breakdown.is_empty());
        assert!(dashboard.type_distribution.is_empty());
        assert!(dashboard.bank_accounts.is_empty());
    }

    #[test]
    fn test_display_conversion_and_locale() {
        let mut config = Config::default();
        config.locale = "en-IN".to_string();
        config.set_conversion(Currency::Eur, Decimal::new(11, 3));

        let service = SummaryService::new(seeded_store(), &config);
        assert_eq!(service.formatter().locale(), NumberLocale::EN_IN);

        let dashboard = service.dashboard().unwrap();
        assert_eq!(dashboard.net_worth_display, "₹ 11,60,330");
        assert_eq!(dashboard.conversions.len(), 1);
        assert_eq!(dashboard.conversions[0].amount, Decimal::new(1276363, 2));
        assert_eq!(dashboard.conversions[0].display, "€ 12,763.63");
        // Conversions never feed back into the nominal total
        assert_eq!(dashboard.net_worth, Decimal::new(1160330, 0));
    }

    #[test]
    fn test_dashboard_serializes() {
        let service = SummaryService::new(seeded_store(), &Config::default());
        let json = serde_json::to_value(service.dashboard().unwrap()).unwrap();

        assert_eq!(json["base_currency"], "INR");
        assert_eq!(json["currency_breakdown"][1]["currency"], "EUR");
        assert_eq!(json["type_distribution"][0]["account_type"], "BANK");
    }
}
