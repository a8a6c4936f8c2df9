//! Accounts command - list active accounts

use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

use super::get_context;
use crate::output::{self, create_table, swatch};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let accounts = ctx.account_service.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        output::info("No active accounts.");
        return Ok(());
    }

    let formatter = ctx.summary_service.formatter();
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Type", "Currency", "Balance", "Color", "Icon", "Created"]);

    for account in &accounts {
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(&account.name),
            Cell::new(account.account_type.label()),
            Cell::new(account.currency.code()),
            Cell::new(formatter.format(account.balance, &account.currency))
                .set_alignment(CellAlignment::Right),
            Cell::new(swatch(&account.color)),
            Cell::new(&account.icon),
            Cell::new(account.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{}", table);
    println!("{} account(s)", accounts.len());
    Ok(())
}
