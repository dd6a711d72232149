use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use quote_ledger::Ledger;

use crate::config::Settings;

#[derive(Args, Debug)]
pub struct InitArgs {}

pub fn execute(_args: InitArgs, settings: &Settings) -> Result<()> {
    let existed = settings.ledger.exists();
    let ledger = Ledger::open(&settings.ledger).context("Failed to initialize quote ledger")?;

    if existed {
        println!("Quote ledger already exists at {}", ledger.path().display());
    } else {
        println!(
            "{} Created quote ledger at {}",
            "✓".green(),
            ledger.path().display()
        );
    }
    Ok(())
}
