use std::io;
use std::path::PathBuf;

/// Errors surfaced by [`crate::Ledger`] operations.
///
/// None of these are retried. When an operation fails the store is left
/// exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Quote store {} is unavailable: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Quote store {} is malformed: {reason}", path.display())]
    MalformedStore { path: PathBuf, reason: String },

    #[error("Invalid status '{0}' (expected one of Sent, Approved, Won, Lost)")]
    InvalidStatus(String),

    #[error("Position {position} is out of range (ledger holds {len} quotes)")]
    PositionOutOfRange { position: i64, len: usize },
}

impl LedgerError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Split a csv error into an I/O failure or a parse failure.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::StorageUnavailable { path, source },
            _ => Self::MalformedStore { path, reason },
        }
    }
}
