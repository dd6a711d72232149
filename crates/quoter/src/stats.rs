use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use quote_ledger::Ledger;

use crate::config::Settings;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum StatsFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = StatsFormat::Table)]
    pub format: StatsFormat,
}

pub fn execute(args: StatsArgs, settings: &Settings) -> Result<()> {
    let stats = Ledger::new(&settings.ledger)
        .compute_statistics()
        .context("Failed to read quote ledger")?;

    let mut writer = io::stdout().lock();
    match args.format {
        StatsFormat::Json => writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?,
        StatsFormat::Table => stats.write_table(&mut writer)?,
    }
    Ok(())
}
