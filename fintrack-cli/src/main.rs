//! Fintrack CLI - account balances and net worth in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

use commands::{accounts, archive, config, doctor, logs, new, seed, summary, update};

/// Fintrack - account balances and net worth in your terminal
#[derive(Parser)]
#[command(name = "ft", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show net worth, currency breakdown and type distribution
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List active accounts
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account (prompts for missing fields)
    New {
        #[arg(long)]
        name: Option<String>,
        /// Account type: BANK, CREDIT, INVESTMENT, CASH, OTHER or a custom code
        #[arg(long = "type")]
        account_type: Option<String>,
        /// Currency code, e.g. INR
        #[arg(long)]
        currency: Option<String>,
        /// Opening balance
        #[arg(long, allow_hyphen_values = true)]
        balance: Option<String>,
        /// Color token, e.g. #4361ee
        #[arg(long)]
        color: Option<String>,
        /// Icon token, e.g. bi-wallet2
        #[arg(long)]
        icon: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the balance of an account
    Update {
        /// Account ID
        id: String,
        /// New balance (replaces the current one)
        #[arg(long, allow_hyphen_values = true)]
        balance: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hide an account from listings and totals
    Archive {
        /// Account ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace all accounts with sample data
    Seed {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run account data health checks
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and change display settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Summary { .. } => "summary",
            Commands::Accounts { .. } => "accounts",
            Commands::New { .. } => "new",
            Commands::Update { .. } => "update",
            Commands::Archive { .. } => "archive",
            Commands::Seed { .. } => "seed",
            Commands::Doctor { .. } => "doctor",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

/// Send `log` records from the core to stderr. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let command = cli.command.name();

    // `ft logs` opens the log database itself
    let logger = match cli.command {
        Commands::Logs { .. } => None,
        _ => commands::get_logger(),
    };
    commands::log_with(&logger, |l| l.log_command(command));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let details = format!("{:#}", e);
            commands::log_with(&logger, |l| {
                l.log_command_failed(command, &e.to_string(), Some(&details))
            });
            output::error(&details);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary { json } => summary::run(json),
        Commands::Accounts { json } => accounts::run(json),
        Commands::New { name, account_type, currency, balance, color, icon, json } => {
            new::run(new::NewArgs { name, account_type, currency, balance, color, icon }, json)
        }
        Commands::Update { id, balance, json } => update::run(&id, balance, json),
        Commands::Archive { id, json } => archive::run(&id, json),
        Commands::Seed { force, json } => seed::run(force, json),
        Commands::Doctor { verbose, json } => doctor::run(verbose, json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
