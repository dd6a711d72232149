use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod config;
mod init;
mod list;
mod quote;
mod services;
mod stats;
mod status;

#[derive(Parser)]
#[command(name = "quoter")]
#[command(about = "Generate quotations and keep a ledger of them", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Quote ledger CSV file (overrides QUOTER_LEDGER and the config file)
    #[arg(long, global = true, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    ledger: Option<PathBuf>,

    /// Config file (defaults to ~/.quoter/config.toml)
    #[arg(long, global = true, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the quote ledger if it does not exist
    Init(init::InitArgs),

    /// List the services that can be quoted
    #[command(alias = "s")]
    Services(services::ServicesArgs),

    /// Generate a quotation and record it in the ledger
    #[command(alias = "q")]
    Quote(quote::QuoteArgs),

    /// List recorded quotes, optionally filtered by customer name
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// Change the status of a recorded quote
    Status(status::StatusArgs),

    /// Show totals and win rate over the ledger
    Stats(stats::StatsArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG still wins
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let settings = config::Settings::resolve(cli.config.as_deref(), cli.ledger)?;
    log::debug!("Using quote ledger {}", settings.ledger.display());

    match cli.command {
        Commands::Init(args) => init::execute(args, &settings),
        Commands::Services(args) => services::execute(args, &settings),
        Commands::Quote(args) => quote::execute(args, &settings),
        Commands::List(args) => list::execute(args, &settings),
        Commands::Status(args) => status::execute(args, &settings),
        Commands::Stats(args) => stats::execute(args, &settings),
    }
}
