use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{Local, NaiveDateTime, Timelike};
use fslock::LockFile;
use log::debug;
use rust_decimal::Decimal;

use crate::{LedgerError, QuoteRecord, QuoteStatus, Result, Statistics, HEADER};

/// Field values for a new quote, already validated by the caller.
#[derive(Debug, Clone, Copy)]
pub struct NewQuote<'a> {
    pub customer_name: &'a str,
    /// May be empty.
    pub customer_email: &'a str,
    pub customer_address: &'a str,
    pub service_name: &'a str,
    pub price: Decimal,
}

impl NewQuote<'_> {
    fn into_record(self, at: NaiveDateTime) -> QuoteRecord {
        QuoteRecord {
            date: at.date(),
            // The store keeps whole seconds only.
            time: at.time().with_nanosecond(0).unwrap_or(at.time()),
            customer_name: self.customer_name.to_string(),
            customer_email: self.customer_email.to_string(),
            customer_address: self.customer_address.to_string(),
            service_name: self.service_name.to_string(),
            price: self.price,
            status: QuoteStatus::Sent,
        }
    }
}

/// Handle to a CSV quote store on disk.
///
/// The handle holds no records. Mutations take an exclusive lock on
/// `<store>.lock` for their whole read-modify-write cycle and replace the
/// store atomically, so concurrent writers serialize instead of losing rows.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    lock_path: PathBuf,
}

impl Ledger {
    /// Create a handle without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self { path, lock_path }
    }

    /// Create a handle and make sure the store exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let ledger = Self::new(path);
        ledger.initialize()?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store with only its header row if it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        if self.path.exists() {
            debug!("Quote store {} already exists", self.path.display());
            return Ok(());
        }

        self.ensure_parent_dir()?;
        let bytes = encode(&[]).map_err(|e| LedgerError::from_csv(&self.path, e))?;
        match AtomicFile::new(&self.path, OverwriteBehavior::DisallowOverwrite)
            .write(|f| f.write_all(&bytes))
        {
            Ok(()) => {
                debug!("Created quote store {}", self.path.display());
                Ok(())
            }
            // Another process created it first; that is the state we wanted.
            Err(atomicwrites::Error::Internal(e)) if e.kind() == io::ErrorKind::AlreadyExists => {
                Ok(())
            }
            Err(e) => Err(LedgerError::storage(&self.path, flatten(e))),
        }
    }

    /// Append a quote stamped with the current local time. Returns its position.
    pub fn append(&self, quote: NewQuote<'_>) -> Result<usize> {
        self.append_at(quote, Local::now().naive_local())
    }

    /// Append a quote with an explicit creation timestamp. Returns its position.
    pub fn append_at(&self, quote: NewQuote<'_>, at: NaiveDateTime) -> Result<usize> {
        let record = quote.into_record(at);
        self.mutate(|records| {
            records.push(record);
            Ok(records.len() - 1)
        })
    }

    /// Every record in insertion order.
    pub fn list_all(&self) -> Result<Vec<QuoteRecord>> {
        self.read_records()
    }

    /// Records whose customer name contains `needle`, ignoring case.
    ///
    /// `None` or an empty needle returns every record.
    pub fn filter_by_name(&self, needle: Option<&str>) -> Result<Vec<QuoteRecord>> {
        let needle = needle.unwrap_or_default();
        let mut records = self.read_records()?;
        records.retain(|record| record.matches_name(needle));
        Ok(records)
    }

    /// Set the status of the record at `position` in [`Ledger::list_all`] order.
    pub fn update_status(&self, position: usize, status: QuoteStatus) -> Result<()> {
        self.mutate(|records| {
            let len = records.len();
            let record = records
                .get_mut(position)
                .ok_or(LedgerError::PositionOutOfRange {
                    position: i64::try_from(position).unwrap_or(i64::MAX),
                    len,
                })?;
            debug!(
                "Quote {position}: {} -> {status}",
                record.status.as_str()
            );
            record.status = status;
            Ok(())
        })
    }

    /// Like [`Ledger::update_status`] but for untyped input from a front end.
    ///
    /// The status is parsed before the position is checked; neither failure
    /// touches the store.
    pub fn update_status_from_input(&self, position: i64, status: &str) -> Result<()> {
        let status: QuoteStatus = status.parse()?;
        match usize::try_from(position) {
            Ok(position) => self.update_status(position, status),
            Err(_) => Err(LedgerError::PositionOutOfRange {
                position,
                len: self.read_records()?.len(),
            }),
        }
    }

    /// Aggregates computed from a fresh read of the store.
    pub fn compute_statistics(&self) -> Result<Statistics> {
        Ok(Statistics::from_records(&self.read_records()?))
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut Vec<QuoteRecord>) -> Result<T>) -> Result<T> {
        self.ensure_parent_dir()?;
        let mut lock =
            LockFile::open(&self.lock_path).map_err(|e| LedgerError::storage(&self.lock_path, e))?;
        lock.lock()
            .map_err(|e| LedgerError::storage(&self.lock_path, e))?;

        let mut records = self.read_records()?;
        let out = apply(&mut records)?;
        self.write_records(&records)?;
        Ok(out)
    }

    fn read_records(&self) -> Result<Vec<QuoteRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::storage(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| LedgerError::from_csv(&self.path, e))?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(HEADER) {
            return Err(LedgerError::MalformedStore {
                path: self.path.clone(),
                reason: format!(
                    "unexpected header '{}', expected '{}'",
                    headers.iter().collect::<Vec<_>>().join(","),
                    HEADER.join(",")
                ),
            });
        }

        let records = reader
            .deserialize()
            .collect::<Result<Vec<QuoteRecord>, _>>()
            .map_err(|e| LedgerError::from_csv(&self.path, e))?;
        debug!(
            "Read {} quotes from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn write_records(&self, records: &[QuoteRecord]) -> Result<()> {
        let bytes = encode(records).map_err(|e| LedgerError::from_csv(&self.path, e))?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(&bytes)?;
                f.flush()
            })
            .map_err(|e| LedgerError::storage(&self.path, flatten(e)))?;
        debug!(
            "Wrote {} quotes to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| LedgerError::storage(parent, e))
            }
            _ => Ok(()),
        }
    }
}

/// Header row followed by one row per record; the header is written even when empty.
fn encode(records: &[QuoteRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn flatten(err: atomicwrites::Error<io::Error>) -> io::Error {
    match err {
        atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
    }
}
