use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use quote_ledger::Ledger;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Position of the quote as shown by `quoter list`
    #[arg(allow_negative_numbers = true)]
    pub position: i64,

    /// New status: Sent, Approved, Won or Lost
    pub status: String,
}

pub fn execute(args: StatusArgs, settings: &Settings) -> Result<()> {
    let ledger = Ledger::new(&settings.ledger);
    ledger.update_status_from_input(args.position, &args.status)?;

    let position = usize::try_from(args.position)?;
    let record = ledger
        .list_all()?
        .into_iter()
        .nth(position)
        .context("Quote vanished after its status was updated")?;

    println!(
        "{} Quote #{position} ({}) marked {}",
        "✓".green(),
        record.customer_name,
        record.status.as_str().bold()
    );
    Ok(())
}
