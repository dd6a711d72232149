//! Durable record of generated quotations.
//!
//! A [`Ledger`] owns a single CSV file with one row per [`QuoteRecord`]. The
//! file is the only state: every operation reads it whole, and every mutation
//! rewrites it whole through an atomic replace while holding an exclusive
//! lock file next to it. Nothing is cached in process.
//!
//! Records are identified by their position in insertion order. A position
//! obtained from [`Ledger::list_all`] stays valid until the next mutation.
//!
//! ```no_run
//! use quote_ledger::{Ledger, NewQuote, QuoteStatus};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), quote_ledger::LedgerError> {
//! let ledger = Ledger::open("quotes.csv")?;
//! let position = ledger.append(NewQuote {
//!     customer_name: "John Smith",
//!     customer_email: "",
//!     customer_address: "123 Main Street, Sydney NSW 2000",
//!     service_name: "Power Point Install",
//!     price: Decimal::new(16500, 2),
//! })?;
//! ledger.update_status(position, QuoteStatus::Won)?;
//! println!("{:?}", ledger.compute_statistics()?.win_rate);
//! # Ok(())
//! # }
//! ```

mod error;
mod ledger;
#[cfg(feature = "table")]
mod ledger_table;
mod record;
mod stats;
mod status;

pub use error::LedgerError;
pub use ledger::{Ledger, NewQuote};
pub use record::{QuoteRecord, HEADER};
pub use stats::Statistics;
pub use status::QuoteStatus;

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
