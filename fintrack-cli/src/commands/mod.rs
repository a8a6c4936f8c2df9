//! CLI command implementations

pub mod accounts;
pub mod archive;
pub mod config;
pub mod doctor;
pub mod logs;
pub mod new;
pub mod seed;
pub mod summary;
pub mod update;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use fintrack_core::{EntryPoint, FintrackContext, LoggingService};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Run a logging call, ignoring any errors (logging should never break the app)
pub fn log_with<F>(logger: &Option<LoggingService>, write: F)
where
    F: FnOnce(&LoggingService) -> Result<()>,
{
    if let Some(l) = logger {
        let _ = write(l);
    }
}

/// Data directory from `FINTRACK_DIR`, or `~/.fintrack`
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINTRACK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".fintrack"))
        .ok_or_else(|| anyhow!("Could not find home directory; set FINTRACK_DIR"))
}

/// Open the context for the data directory
pub fn get_context() -> Result<FintrackContext> {
    let data_dir = get_data_dir()?;
    FintrackContext::new(&data_dir).context("Failed to initialize fintrack context")
}

pub fn parse_account_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).with_context(|| format!("Invalid account id: {}", id))
}

/// Plain or scientific notation; separators are not accepted
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| anyhow!("Invalid amount: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1250.50 ").unwrap(), Decimal::new(125050, 2));
        assert_eq!(parse_amount("-40").unwrap(), Decimal::new(-40, 0));
        assert_eq!(parse_amount("1.5e3").unwrap(), Decimal::new(1500, 0));
        assert!(parse_amount("1,000").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_parse_account_id() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_account_id(&format!(" {} ", id)).unwrap(), id);
        assert!(parse_account_id("42").is_err());
    }
}
