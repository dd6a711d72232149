use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::is_australian_address;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a customer name.")]
    MissingName,
    #[error("Please enter a customer address.")]
    MissingAddress,
    #[error(
        "Please enter a valid Australian address (must include state abbreviation like NSW, VIC, QLD, etc. or a 4-digit postcode)."
    )]
    InvalidAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    /// Optional; empty when not given.
    #[serde(default)]
    pub email: String,
    pub address: String,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            address: address.into().trim().to_string(),
        }
    }

    /// Checks run in a fixed order so the first missing field is reported;
    /// with both name and address missing the name is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_name = !self.name.trim().is_empty();
        let has_address = !self.address.trim().is_empty();

        if !has_name {
            return Err(ValidationError::MissingName);
        }
        if !has_address {
            return Err(ValidationError::MissingAddress);
        }
        if !is_australian_address(&self.address) {
            return Err(ValidationError::InvalidAddress);
        }
        Ok(())
    }
}
