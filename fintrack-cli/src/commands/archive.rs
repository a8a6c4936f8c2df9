//! Archive command - hide an account

use anyhow::Result;

use super::{get_context, parse_account_id};
use crate::output;

pub fn run(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account = ctx.account_service.archive(parse_account_id(id)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        output::success(&format!("Archived {}", account.name));
        println!("  It no longer counts towards totals.");
    }

    Ok(())
}
