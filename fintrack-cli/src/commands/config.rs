//! Config command - view and change display settings

use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use fintrack_core::config::Config;
use fintrack_core::{Account, Currency, NumberLocale};

use super::{get_data_dir, parse_amount};
use crate::output::{self, create_table};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the settings in effect (environment overrides applied)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the currency used to label totals
    BaseCurrency {
        /// Currency code, e.g. INR
        code: String,
    },
    /// Set the number format: en-US, en-IN or de-DE
    Locale {
        tag: String,
    },
    /// Add or replace a display-only conversion rate
    SetRate {
        /// Target currency code, e.g. EUR
        currency: String,
        /// Multiplier applied to the nominal net worth
        rate: String,
    },
    /// Remove a display conversion rate
    RemoveRate {
        currency: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;

    if let ConfigCommands::Show { json } = command {
        return show(&Config::load(&data_dir)?, json);
    }

    std::fs::create_dir_all(&data_dir)?;
    let message = apply(&data_dir, command)?;
    output::success(&message);
    Ok(())
}

/// Change `settings.json` in `data_dir`; returns a confirmation message
fn apply(data_dir: &Path, command: ConfigCommands) -> Result<String> {
    // Environment overrides must not be written back
    let mut config = Config::load_file(data_dir)?;

    let message = match command {
        ConfigCommands::Show { .. } => bail!("show does not change settings"),
        ConfigCommands::BaseCurrency { code } => {
            config.base_currency = parse_currency(&code)?;
            format!("Base currency set to {}", config.base_currency)
        }
        ConfigCommands::Locale { tag } => {
            if NumberLocale::from_tag(&tag).is_none() {
                bail!("Unsupported locale: {} (use en-US, en-IN or de-DE)", tag);
            }
            config.locale = tag;
            format!("Locale set to {}", config.locale)
        }
        ConfigCommands::SetRate { currency, rate } => {
            let currency = parse_currency(&currency)?;
            let rate = parse_amount(&rate)?;
            if rate <= rust_decimal::Decimal::ZERO {
                bail!("Rate must be positive");
            }
            config.set_conversion(currency.clone(), rate);
            format!("Net worth will also be shown in {} (rate {})", currency, rate)
        }
        ConfigCommands::RemoveRate { currency } => {
            let currency = parse_currency(&currency)?;
            if !config.remove_conversion(&currency) {
                bail!("No conversion rate configured for {}", currency);
            }
            format!("Removed conversion rate for {}", currency)
        }
    };

    config.save(data_dir)?;
    Ok(message)
}

fn parse_currency(code: &str) -> Result<Currency> {
    let code = Account::normalize_code(code);
    if code.is_empty() {
        bail!("Currency code cannot be empty");
    }
    Ok(Currency::from_code(&code))
}

fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "base_currency": config.base_currency,
                "locale": config.locale,
                "conversions": config.conversions,
            })
        );
        return Ok(());
    }

    println!("{}", "Display Settings".bold());
    println!("  Base currency: {}", config.base_currency);
    println!("  Locale: {}", config.locale);
    if NumberLocale::from_tag(&config.locale).is_none() {
        output::warning(&format!("  Unknown locale {}, numbers use en-US", config.locale));
    }

    if config.conversions.is_empty() {
        println!("  Conversions: none");
    } else {
        let mut table = create_table();
        table.set_header(vec!["Currency", "Rate"]);
        for conversion in &config.conversions {
            table.add_row(vec![conversion.currency.to_string(), conversion.rate.to_string()]);
        }
        println!("{}", table);
    }

    Ok(())
}
