use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use quote_ledger::{Ledger, QuoteRecord, HEADER};
use serde::Serialize;

use crate::config::Settings;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    /// Same columns as the ledger file, without positions
    Csv,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show quotes whose customer name contains this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Serialize)]
struct ListedQuote<'a> {
    position: usize,
    #[serde(flatten)]
    record: &'a QuoteRecord,
}

pub fn execute(args: ListArgs, settings: &Settings) -> Result<()> {
    let ledger = Ledger::new(&settings.ledger);
    let writer = io::stdout().lock();

    match args.format {
        ListFormat::Csv => write_csv(&ledger, args.search.as_deref(), writer),
        ListFormat::Json | ListFormat::Table => {
            write_listing(&ledger, args.search.as_deref(), args.format, writer)
        }
    }
}

fn write_csv<W: Write>(ledger: &Ledger, search: Option<&str>, writer: W) -> Result<()> {
    let records = ledger
        .filter_by_name(search)
        .context("Failed to read quote ledger")?;
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for record in &records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_listing<W: Write>(
    ledger: &Ledger,
    search: Option<&str>,
    format: ListFormat,
    mut writer: W,
) -> Result<()> {
    let needle = search.unwrap_or_default();

    // Positions come from the unfiltered listing so they can be passed to `quoter status`.
    let records = ledger.list_all().context("Failed to read quote ledger")?;
    let rows: Vec<(usize, &QuoteRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.matches_name(needle))
        .collect();

    if let ListFormat::Json = format {
        let listed: Vec<_> = rows
            .iter()
            .map(|&(position, record)| ListedQuote { position, record })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&listed)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        if records.is_empty() {
            writeln!(writer, "No quotes recorded yet.")?;
        } else {
            writeln!(writer, "No quotes found for customer name '{needle}'.")?;
        }
        return Ok(());
    }

    let shown = rows.len();
    QuoteRecord::write_table(rows, &mut writer)?;
    if !needle.is_empty() {
        writeln!(writer, "{shown} of {} quotes", records.len())?;
    }
    Ok(())
}
