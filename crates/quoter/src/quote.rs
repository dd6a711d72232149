use std::fmt;
use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, ValueEnum};
use colored::Colorize;
use inquire::{Select, Text};
use quote_catalog::{Catalog, CustomerDetails, DocumentFormat, QuoteDocument, Service};
use quote_ledger::{Ledger, NewQuote};

use crate::config::Settings;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum QuoteFormat {
    /// Formatted letter
    #[default]
    Markdown,
    /// Plain text, ready to paste into an email
    Text,
}

impl From<QuoteFormat> for DocumentFormat {
    fn from(format: QuoteFormat) -> Self {
        match format {
            QuoteFormat::Markdown => DocumentFormat::Markdown,
            QuoteFormat::Text => DocumentFormat::Text,
        }
    }
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Service key (see `quoter services`); prompted for when omitted in a terminal
    #[arg(short, long, value_name = "KEY")]
    pub service: Option<String>,

    /// Customer name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Customer address, e.g. "123 Main Street, Sydney NSW 2000"
    #[arg(short, long)]
    pub address: Option<String>,

    /// Customer email (optional)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Output format of the quotation
    #[arg(short, long, value_enum, default_value_t = QuoteFormat::Markdown)]
    pub format: QuoteFormat,

    /// Print the quotation without recording it in the ledger
    #[arg(long)]
    pub no_save: bool,
}

fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn pick_service<'a>(args: &QuoteArgs, settings: &'a Settings) -> Result<&'a Service> {
    let catalog = &settings.catalog;
    if let Some(key) = &args.service {
        return catalog.get(key).with_context(|| {
            format!(
                "Unknown service '{key}'. Available: {}",
                catalog.keys().collect::<Vec<_>>().join(", ")
            )
        });
    }

    if !is_interactive() {
        anyhow::bail!("No service selected. Pass --service <KEY> (see `quoter services`).");
    }

    let choice = Select::new("Service Type", service_choices(catalog)).prompt()?;
    Ok(choice.0)
}

/// A catalog entry as shown in the service picker.
struct ServiceChoice<'a>(&'a Service);

impl fmt::Display for ServiceChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:.2})", self.0.name, self.0.price)
    }
}

fn service_choices(catalog: &Catalog) -> Vec<ServiceChoice<'_>> {
    catalog.iter().map(ServiceChoice).collect()
}

/// Use the flag value, otherwise prompt in a terminal, otherwise leave empty
/// and let validation report it.
fn field(value: Option<String>, prompt: &str, placeholder: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if is_interactive() => Ok(Text::new(prompt).with_placeholder(placeholder).prompt()?),
        None => Ok(String::new()),
    }
}

pub fn execute(args: QuoteArgs, settings: &Settings) -> Result<()> {
    let service = pick_service(&args, settings)?;

    let customer = CustomerDetails::new(
        field(args.name, "Customer Name", "e.g., John Smith")?,
        field(args.email, "Customer Email (optional)", "e.g., john@example.com")?,
        field(
            args.address,
            "Customer Address",
            "e.g., 123 Main Street, Sydney NSW 2000",
        )?,
    );
    customer.validate()?;

    let today = Local::now().date_naive();
    let document = QuoteDocument {
        letterhead: &settings.letterhead,
        customer: &customer,
        service,
        date: today,
    }
    .render(args.format.into())?;

    if !args.no_save {
        let ledger = Ledger::open(&settings.ledger).context("Failed to open quote ledger")?;
        let position = ledger
            .append(NewQuote {
                customer_name: &customer.name,
                customer_email: &customer.email,
                customer_address: &customer.address,
                service_name: &service.name,
                price: service.price,
            })
            .context("Failed to record quote")?;
        eprintln!(
            "{} Quote generated and recorded as #{position} in {}",
            "✓".green(),
            ledger.path().display()
        );
    }

    let mut writer = io::stdout().lock();
    writeln!(writer, "{document}")?;
    Ok(())
}
