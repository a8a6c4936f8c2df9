//! Summary command - net worth dashboard

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment};
use fintrack_core::{Account, CurrencyFormatter};

use super::get_context;
use crate::output::{self, create_table, swatch};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let dashboard = ctx.summary_service.dashboard()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if dashboard.account_count == 0 {
        output::info("No accounts yet. Create one with `ft new` or load sample data with `ft seed`.");
        return Ok(());
    }

    println!("{}", "Total Net Worth".bold());
    println!("  {}", dashboard.net_worth_display.bold());
    for conversion in &dashboard.conversions {
        println!(
            "  {} {}",
            format!("≈ {}", conversion.display).dimmed(),
            format!("(rate {})", conversion.rate).dimmed()
        );
    }
    println!(
        "  {}",
        format!("Nominal sum across {} account(s), currencies not converted", dashboard.account_count)
            .dimmed()
    );
    println!();

    println!("{}", "Currency Breakdown".bold());
    let mut table = create_table();
    table.set_header(vec!["Currency", "Symbol", "Total"]);
    for line in &dashboard.currency_breakdown {
        table.add_row(vec![
            Cell::new(line.currency.code()),
            Cell::new(&line.symbol),
            Cell::new(&line.display).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
    println!();

    println!("{}", "Account Distribution".bold());
    let mut table = create_table();
    table.set_header(vec!["Type", "Color", "Total"]);
    for line in &dashboard.type_distribution {
        table.add_row(vec![
            Cell::new(&line.label),
            Cell::new(swatch(&line.color)),
            Cell::new(&line.display).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
    println!();

    let formatter = ctx.summary_service.formatter();
    print_accounts("Bank Accounts", &dashboard.bank_accounts, formatter);
    print_accounts("Other Accounts", &dashboard.other_accounts, formatter);

    Ok(())
}

fn print_accounts(title: &str, accounts: &[Account], formatter: &CurrencyFormatter) {
    if accounts.is_empty() {
        return;
    }

    println!("{}", title.bold());
    let mut table = create_table();
    table.set_header(vec!["Name", "Type", "Balance"]);
    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.name),
            Cell::new(account.account_type.label()),
            Cell::new(formatter.format(account.balance, &account.currency))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
    println!();
}
