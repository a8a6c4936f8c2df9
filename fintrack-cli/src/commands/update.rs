//! Update command - replace an account balance

use anyhow::Result;
use dialoguer::Input;

use super::{get_context, parse_account_id, parse_amount};
use crate::output;

pub fn run(id: &str, balance: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let id = parse_account_id(id)?;
    let current = ctx.account_service.get(id)?;
    let formatter = ctx.summary_service.formatter();

    let balance_str = match balance {
        Some(b) => b,
        None => Input::new()
            .with_prompt(format!(
                "New balance for {} (currently {})",
                current.name,
                formatter.format(current.balance, &current.currency)
            ))
            .interact_text()?,
    };

    let new_balance = parse_amount(&balance_str)?;
    let account = ctx.account_service.update_balance(id, new_balance)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        output::success("Balance updated");
        println!("  Account: {}", account.name);
        println!(
            "  Balance: {} -> {}",
            formatter.format(current.balance, &current.currency),
            formatter.format(account.balance, &account.currency)
        );
    }

    Ok(())
}
