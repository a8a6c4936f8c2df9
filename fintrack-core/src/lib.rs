//! Fintrack Core - account aggregation and amount formatting
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Accounts, aggregation over account snapshots, formatting
//! - **ports**: Trait definitions for external dependencies (AccountStore)
//! - **services**: Use-case orchestration
//! - **adapters**: Concrete implementations (DuckDB, in-memory, sample data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::duckdb::DuckDbRepository;
use config::Config;
use ports::AccountStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use services::{EntryPoint, LogEvent, LoggingService};
pub use domain::{
    currency_breakdown, format_currency, partition_by_type, split_bank_accounts, total_net_worth,
    type_distribution, Account, AccountType, Currency, CurrencyFormatter, CurrencyTotal, NewAccount,
    NumberLocale, TypeTotal, DEFAULT_COLOR, DEFAULT_ICON,
};

/// Database file inside the data directory
pub const DB_FILE: &str = "fintrack.duckdb";

/// Main context for Fintrack operations
///
/// Holds the configuration, the repository and every service built on it.
pub struct FintrackContext {
    pub config: Config,
    pub repository: Arc<DuckDbRepository>,
    pub account_service: AccountService,
    pub summary_service: SummaryService,
    pub seed_service: SeedService,
    pub doctor_service: DoctorService,
}

impl FintrackContext {
    /// Open the context for a data directory, creating it if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let config = Config::load(data_dir)?;

        let db_path = data_dir.join(DB_FILE);
        let repository = Arc::new(DuckDbRepository::new(&db_path)?);
        repository.ensure_schema().context("Failed to migrate database")?;

        let store: Arc<dyn AccountStore> = repository.clone();

        Ok(Self {
            account_service: AccountService::new(Arc::clone(&store)),
            summary_service: SummaryService::new(Arc::clone(&store), &config),
            seed_service: SeedService::new(Arc::clone(&store)),
            doctor_service: DoctorService::new(store),
            config,
            repository,
        })
    }
}
