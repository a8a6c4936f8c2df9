//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "display": {
//!     "baseCurrency": "INR",
//!     "locale": "en-US",
//!     "conversions": [ { "currency": "EUR", "rate": "0.011" } ]
//!   }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Currency, NumberLocale};

/// Environment override for the base currency
pub const ENV_BASE_CURRENCY: &str = "FINTRACK_BASE_CURRENCY";

/// Environment override for the number locale
pub const ENV_LOCALE: &str = "FINTRACK_LOCALE";

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_LOCALE: &str = "en-US";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    display: DisplaySettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(default)]
    conversions: Vec<DisplayConversion>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// A fixed multiplier used to show the nominal net worth in another
/// currency. Display only: it never feeds back into any total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConversion {
    pub currency: Currency,
    pub rate: Decimal,
}

/// Fintrack configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Currency used to label nominal totals
    pub base_currency: Currency,
    /// Locale tag as configured (e.g. "en-US")
    pub locale: String,
    pub conversions: Vec<DisplayConversion>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: Currency::default(),
            locale: DEFAULT_LOCALE.to_string(),
            conversions: Vec::new(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing file yields defaults. Base currency and locale can be
    /// overridden with `FINTRACK_BASE_CURRENCY` and `FINTRACK_LOCALE`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;
        if let Ok(code) = std::env::var(ENV_BASE_CURRENCY) {
            config.base_currency = Currency::from_code(&code.trim().to_uppercase());
        }
        if let Ok(tag) = std::env::var(ENV_LOCALE) {
            config.locale = tag;
        }
        Ok(config)
    }

    /// Load `settings.json` only, ignoring environment overrides.
    ///
    /// Use this before `save` so overrides are not written back.
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let base_currency = raw
            .display
            .base_currency
            .as_deref()
            .map(|code| Currency::from_code(&code.trim().to_uppercase()))
            .unwrap_or_default();

        let locale = raw
            .display
            .locale
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        Ok(Self {
            base_currency,
            locale,
            conversions: raw.display.conversions.clone(),
            _raw_settings: raw,
        })
    }

    /// Save config to the data directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);

        let mut settings = read_settings(data_dir)?;
        settings.display.base_currency = Some(self.base_currency.code().to_string());
        settings.display.locale = Some(self.locale.clone());
        settings.display.conversions = self.conversions.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    /// Number format for the configured locale
    pub fn number_locale(&self) -> NumberLocale {
        NumberLocale::from_tag_or_default(&self.locale)
    }

    /// Add or replace the display rate for a currency
    pub fn set_conversion(&mut self, currency: Currency, rate: Decimal) {
        match self.conversions.iter_mut().find(|c| c.currency == currency) {
            Some(existing) => existing.rate = rate,
            None => self.conversions.push(DisplayConversion { currency, rate }),
        }
    }

    /// Drop the display rate for a currency; true if one was configured
    pub fn remove_conversion(&mut self, currency: &Currency) -> bool {
        let before = self.conversions.len();
        self.conversions.retain(|c| &c.currency != currency);
        self.conversions.len() != before
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", settings_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert!(config.conversions.is_empty());
        assert_eq!(config._raw_settings.display.locale, None);
    }

    #[test]
    fn test_load_display_settings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
                "display": {
                    "baseCurrency": "usd",
                    "locale": "en-IN",
                    "conversions": [{ "currency": "EUR", "rate": "0.011" }]
                }
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config._raw_settings.display.base_currency.as_deref(), Some("usd"));
        assert_eq!(
            config.conversions,
            vec![DisplayConversion { currency: Currency::Eur, rate: Decimal::new(11, 3) }]
        );
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_save_preserves_unmanaged_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "theme": "dark", "display": { "chartStyle": "pie" } }"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.set_conversion(Currency::Eur, Decimal::new(11, 3));
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["display"]["chartStyle"], "pie");
        assert_eq!(saved["display"]["conversions"][0]["currency"], "EUR");
    }

    #[test]
    fn test_set_and_remove_conversion() {
        let mut config = Config::default();
        config.set_conversion(Currency::Eur, Decimal::new(11, 3));
        config.set_conversion(Currency::Eur, Decimal::new(12, 3));
        assert_eq!(config.conversions.len(), 1);
        assert_eq!(config.conversions[0].rate, Decimal::new(12, 3));

        assert!(config.remove_conversion(&Currency::Eur));
        assert!(!config.remove_conversion(&Currency::Eur));
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempdir().unwrap();
        let mut config = Config::load_file(dir.path()).unwrap();
        config.base_currency = Currency::Usd;
        config.locale = "de-DE".to_string();
        config.set_conversion(Currency::Inr, Decimal::new(83, 0));
        config.save(dir.path()).unwrap();

        let reloaded = Config::load_file(dir.path()).unwrap();
        assert_eq!(reloaded.base_currency, Currency::Usd);
        assert_eq!(reloaded.number_locale(), NumberLocale::DE_DE);
        assert_eq!(reloaded.conversions, config.conversions);
    }

    #[test]
    fn test_number_locale_falls_back() {
        let config = Config {
            locale: "tlh-KL".to_string(),
            ..Config::default()
        };
        assert_eq!(config.number_locale(), NumberLocale::EN_US);
    }
}
