use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};
use quote_catalog::Catalog;

use crate::config::Settings;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ServicesFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ServicesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ServicesFormat::Table)]
    pub format: ServicesFormat,
}

pub fn execute(args: ServicesArgs, settings: &Settings) -> Result<()> {
    let mut writer = io::stdout().lock();
    match args.format {
        ServicesFormat::Json => {
            let services: Vec<_> = settings.catalog.iter().collect();
            writeln!(writer, "{}", serde_json::to_string_pretty(&services)?)?;
        }
        ServicesFormat::Table => write_services_table(&settings.catalog, writer)?,
    }
    Ok(())
}

fn write_services_table<W: Write>(catalog: &Catalog, mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);
    table.set_header(vec!["Key", "Service", "Price (AUD)", "Description"]);

    for service in catalog.iter() {
        table.add_row(vec![
            Cell::new(&service.key),
            Cell::new(&service.name),
            Cell::new(format!("${:.2}", service.price)).set_alignment(CellAlignment::Right),
            Cell::new(&service.description),
        ]);
    }

    writeln!(writer, "{table}")
}
