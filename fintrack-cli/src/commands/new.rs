//! New command - create an account

use anyhow::Result;
use dialoguer::{Input, Select};
use fintrack_core::{AccountType, NewAccount, DEFAULT_COLOR, DEFAULT_ICON};

use super::{get_context, parse_amount};
use crate::output;

/// Fields given on the command line; missing required ones are prompted for
pub struct NewArgs {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub currency: Option<String>,
    pub balance: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

pub fn run(args: NewArgs, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let name = match args.name {
        Some(name) => name,
        None => Input::new().with_prompt("Account name").interact_text()?,
    };

    let account_type = match args.account_type {
        Some(code) => code,
        None => prompt_account_type()?,
    };

    let currency = match args.currency {
        Some(code) => code,
        None => Input::new()
            .with_prompt("Currency")
            .default(ctx.config.base_currency.code().to_string())
            .interact_text()?,
    };

    let balance = match args.balance {
        Some(balance) => balance,
        None => Input::new()
            .with_prompt("Opening balance")
            .default("0".to_string())
            .interact_text()?,
    };

    let balance_warning = opening_balance_warning(&balance);

    let fields = NewAccount {
        name,
        account_type,
        currency,
        balance: Some(balance),
        color: args.color,
        icon: args.icon,
    };

    let account = ctx.account_service.create(fields)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        let formatter = ctx.summary_service.formatter();
        output::success("Account created");
        if let Some(warning) = balance_warning {
            output::warning(&warning);
        }
        println!("  ID: {}", account.id);
        println!("  Name: {}", account.name);
        println!("  Type: {}", account.account_type.label());
        println!("  Balance: {}", formatter.format(account.balance, &account.currency));
        if account.color != DEFAULT_COLOR || account.icon != DEFAULT_ICON {
            println!("  Style: {} {}", account.color, account.icon);
        }
    }

    Ok(())
}

fn prompt_account_type() -> Result<String> {
    let known = AccountType::known();
    let labels: Vec<&str> = known.iter().map(|t| t.label()).collect();

    let selection = Select::new()
        .with_prompt("Account type")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(known[selection].code().to_string())
}

/// Message for an opening balance that will be stored as 0
fn opening_balance_warning(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || parse_amount(raw).is_ok() {
        return None;
    }
    Some(format!("Opening balance {:?} is not a number; stored as 0", raw.trim()))
}
