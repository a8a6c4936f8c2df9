//! Account domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};

/// Color applied when the caller does not pick one
pub const DEFAULT_COLOR: &str = "#4361ee";

/// Icon token applied when the caller does not pick one
pub const DEFAULT_ICON: &str = "bi-wallet2";

/// Kind of financial holding.
///
/// Stored and serialized as the upper-case code (`"BANK"`, `"CREDIT"`, ...).
/// Codes outside the known set are kept verbatim in `Custom` and displayed
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    Bank,
    Credit,
    Investment,
    Cash,
    Other,
    Custom(String),
}

impl AccountType {
    /// Parse a type code. Never fails: unknown codes become `Custom`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "BANK" => Self::Bank,
            "CREDIT" => Self::Credit,
            "INVESTMENT" => Self::Investment,
            "CASH" => Self::Cash,
            "OTHER" => Self::Other,
            raw => Self::Custom(raw.to_string()),
        }
    }

    /// Storage code
    pub fn code(&self) -> &str {
        match self {
            Self::Bank => "BANK",
            Self::Credit => "CREDIT",
            Self::Investment => "INVESTMENT",
            Self::Cash => "CASH",
            Self::Other => "OTHER",
            Self::Custom(raw) => raw,
        }
    }

    /// Human readable label, falling back to the raw code
    pub fn label(&self) -> &str {
        match self {
            Self::Bank => "Bank Account",
            Self::Credit => "Credit Card",
            Self::Investment => "Investment",
            Self::Cash => "Cash",
            Self::Other => "Other",
            Self::Custom(raw) => raw,
        }
    }

    /// The closed set of known types, in display order
    pub fn known() -> [AccountType; 5] {
        [Self::Bank, Self::Credit, Self::Investment, Self::Cash, Self::Other]
    }
}

impl From<String> for AccountType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> Self {
        account_type.code().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Currency an account is held in.
///
/// Only the four currencies with a display symbol are named; any other code
/// is carried through in `Custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
    Usd,
    Gbp,
    Custom(String),
}

impl Currency {
    /// Parse a currency code. Never fails: unknown codes become `Custom`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "INR" => Self::Inr,
            "EUR" => Self::Eur,
            "USD" => Self::Usd,
            "GBP" => Self::Gbp,
            raw => Self::Custom(raw.to_string()),
        }
    }

    /// ISO 4217 code (or the raw code for `Custom`)
    pub fn code(&self) -> &str {
        match self {
            Self::Inr => "INR",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Custom(raw) => raw,
        }
    }

    /// Display symbol; unknown currencies use their code as the symbol
    pub fn symbol(&self) -> &str {
        match self {
            Self::Inr => "₹",
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Custom(raw) => raw,
        }
    }

    /// True when the currency has a dedicated symbol
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A financial account owned by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub account_type: AccountType,
    pub currency: Currency,
    /// Signed amount in the account's own currency
    pub balance: Decimal,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with a zero balance and default styling
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        account_type: AccountType,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            account_type,
            currency,
            balance: Decimal::ZERO,
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the balance (builder style)
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// Set the color token (builder style)
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Normalize a type or currency code: trimmed, upper-case
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }
}

/// Caller-supplied fields for a new account, before validation and defaults.
///
/// `balance` is the raw user input; it defaults to zero when absent or not a
/// number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub account_type: String,
    pub currency: String,
    pub balance: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        account_type: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_type: account_type.into(),
            currency: currency.into(),
            ..Self::default()
        }
    }

    /// Opening balance from a typed amount
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance.to_string());
        self
    }

    /// Opening balance from raw user input
    pub fn with_raw_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance = Some(balance.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Check that name, type and currency are present
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.account_type.trim().is_empty() {
            missing.push("type");
        }
        if self.currency.trim().is_empty() {
            missing.push("currency");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Validate and build the stored account, applying defaults
    pub fn into_account(self, id: Uuid, now: DateTime<Utc>) -> Result<Account> {
        self.validate()?;

        let balance = parse_balance(self.balance.as_deref());
        let color = non_blank(self.color).unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let icon = non_blank(self.icon).unwrap_or_else(|| DEFAULT_ICON.to_string());

        Ok(Account {
            id,
            name: self.name.trim().to_string(),
            account_type: AccountType::from_code(&Account::normalize_code(&self.account_type)),
            currency: Currency::from_code(&Account::normalize_code(&self.currency)),
            balance,
            color,
            icon,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a user-entered balance.
///
/// Absent, blank or unparseable input yields zero; the last case is logged.
/// Accepts plain decimals (`"1250.50"`) and scientific notation (`"1.5e3"`).
pub fn parse_balance(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };

    match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("unparseable opening balance, using 0: {}", e);
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_code_normalization() {
        assert_eq!(Account::normalize_code("usd"), "USD");
        assert_eq!(Account::normalize_code(" eur "), "EUR");
        assert_eq!(Account::normalize_code(" bank"), "BANK");
    }

    #[test]
    fn test_account_type_codes_and_labels() {
        assert_eq!(AccountType::from_code("BANK"), AccountType::Bank);
        assert_eq!(AccountType::from_code("CREDIT").label(), "Credit Card");
        assert_eq!(AccountType::Bank.label(), "Bank Account");

        let custom = AccountType::from_code("LOAN");
        assert_eq!(custom, AccountType::Custom("LOAN".to_string()));
        assert_eq!(custom.label(), "LOAN");
        assert_eq!(custom.code(), "LOAN");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::from_code("INR").symbol(), "₹");
        assert_eq!(Currency::from_code("EUR").symbol(), "€");
        assert_eq!(Currency::from_code("USD").symbol(), "$");
        assert_eq!(Currency::from_code("GBP").symbol(), "£");

        let custom = Currency::from_code("XYZ");
        assert!(!custom.is_known());
        assert_eq!(custom.symbol(), "XYZ");
    }

    #[test]
    fn test_serde_uses_codes() {
        let account = Account::new(
            Uuid::new_v4(),
            "Wallet",
            AccountType::Cash,
            Currency::Custom("CHF".to_string()),
        );
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["account_type"], "CASH");
        assert_eq!(json["currency"], "CHF");

        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back.account_type, AccountType::Cash);
        assert_eq!(back.currency, Currency::Custom("CHF".to_string()));
    }

    #[test]
    fn test_new_account_requires_fields() {
        let err = NewAccount::new("", "BANK", "").validate().unwrap_err();
        match err {
            Error::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("currency"));
                assert!(!msg.contains("type"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(NewAccount::new("Savings", "  ", "INR").validate().is_err());
        assert!(NewAccount::new("Savings", "BANK", "INR").validate().is_ok());
    }

    #[test]
    fn test_into_account_applies_defaults() {
        let now = Utc::now();
        let account = NewAccount::new(" Savings ", "BANK", "inr")
            .into_account(Uuid::new_v4(), now)
            .unwrap();

        assert_eq!(account.name, "Savings");
        assert_eq!(account.account_type, AccountType::Bank);
        assert_eq!(account.currency, Currency::Inr);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.color, DEFAULT_COLOR);
        assert_eq!(account.icon, DEFAULT_ICON);
        assert!(account.is_active);
        assert_eq!(account.created_at, now);
    }

    #[test]
    fn test_into_account_normalizes_type_code() {
        let now = Utc::now();
        let bank = NewAccount::new("Savings", " bank ", "INR")
            .into_account(Uuid::new_v4(), now)
            .unwrap();
        assert_eq!(bank.account_type, AccountType::Bank);

        let loan = NewAccount::new("Car loan", "loan", "INR")
            .into_account(Uuid::new_v4(), now)
            .unwrap();
        assert_eq!(loan.account_type, AccountType::Custom("LOAN".to_string()));
    }

    #[test]
    fn test_into_account_keeps_supplied_styling() {
        let account = NewAccount::new("Brokerage", "INVESTMENT", "USD")
            .with_balance(Decimal::new(125050, 2))
            .with_color("#3f37c9")
            .with_icon("bi-graph-up")
            .into_account(Uuid::new_v4(), Utc::now())
            .unwrap();

        assert_eq!(account.balance, Decimal::new(125050, 2));
        assert_eq!(account.color, "#3f37c9");
        assert_eq!(account.icon, "bi-graph-up");
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance(None), Decimal::ZERO);
        assert_eq!(parse_balance(Some("")), Decimal::ZERO);
        assert_eq!(parse_balance(Some("abc")), Decimal::ZERO);
        assert_eq!(parse_balance(Some(" 450000 ")), Decimal::new(450000, 0));
        assert_eq!(parse_balance(Some("-12.75")), Decimal::new(-1275, 2));
        assert_eq!(parse_balance(Some("1.5e3")), Decimal::new(1500, 0));
    }
}
