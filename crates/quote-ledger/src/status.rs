use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Lifecycle state of a quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[default]
    Sent,
    Approved,
    Won,
    Lost,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::Sent,
        QuoteStatus::Approved,
        QuoteStatus::Won,
        QuoteStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Approved => "Approved",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    /// Still waiting on the customer.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Sent | Self::Approved)
    }

    /// Decided either way; counts towards the win rate.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the four status names, ignoring ASCII case and surrounding whitespace.
impl FromStr for QuoteStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LedgerError::InvalidStatus(s.to_string()))
    }
}
