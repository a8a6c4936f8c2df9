//! Seed command - replace all accounts with sample data

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::Confirm;

use super::get_context;
use crate::output;

pub fn run(force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if !force && ctx.seed_service.has_existing_data()? {
        if json {
            bail!("Existing accounts would be deleted; re-run with --force");
        }
        if !Confirm::new()
            .with_prompt("This deletes every account, archived ones included. Load sample data?")
            .default(false)
            .interact()?
        {
            output::warning("Cancelled.");
            return Ok(());
        }
    }

    let result = ctx.seed_service.reset_and_seed()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::success(&format!("Loaded {} sample account(s)", result.created));
    if result.removed > 0 {
        println!("  Removed {} existing account(s)", result.removed);
    }
    let formatter = ctx.summary_service.formatter();
    for account in &result.accounts {
        println!(
            "  {} {}",
            account.name,
            formatter.format(account.balance, &account.currency).dimmed()
        );
    }

    Ok(())
}
