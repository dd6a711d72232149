//! Everything a front end needs before a quote reaches the ledger: the
//! catalog of priced services, the checks applied to customer details, and
//! the quotation letter itself.

pub mod address;
pub mod customer;
pub mod document;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use customer::{CustomerDetails, ValidationError};
pub use document::{DocumentError, DocumentFormat, Letterhead, QuoteDocument};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Catalog validation error: {0}")]
    ValidationError(String),
}

/// A service offered at a fixed price (GST included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub key: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}

impl Service {
    fn new(key: &str, name: &str, price: Decimal, description: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            price,
            description: description.to_string(),
        }
    }
}

/// Ordered list of services, keyed by `Service::key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    services: Vec<Service>,
}

impl Catalog {
    /// The standard residential electrical services.
    pub fn builtin() -> Self {
        Self {
            services: vec![
                Service::new(
                    "powerpoint_install",
                    "Power Point Install",
                    dec!(165.00),
                    "Installation of a single standard power point (GPO) including all necessary wiring and testing.",
                ),
                Service::new(
                    "ceiling_fan_fitoff",
                    "Ceiling Fan Fit-off",
                    dec!(245.00),
                    "Supply and installation of a standard ceiling fan with light fitting including wiring and connection.",
                ),
                Service::new(
                    "switchboard_upgrade",
                    "Switchboard Upgrade",
                    dec!(2850.00),
                    "Complete switchboard replacement with new RCDs, circuit breakers and safety switches to current AS/NZS 3000 standards.",
                ),
                Service::new(
                    "downlight_install",
                    "Downlight Install",
                    dec!(95.00),
                    "Installation of a single LED downlight including cutout, wiring and IC-rated housing.",
                ),
                Service::new(
                    "smoke_alarm_install",
                    "Smoke Alarm Install",
                    dec!(185.00),
                    "Supply and installation of hardwired photoelectric smoke alarm with battery backup compliant with current regulations.",
                ),
                Service::new(
                    "safety_switch_install",
                    "Safety Switch Install",
                    dec!(320.00),
                    "Installation of RCD safety switch to existing switchboard providing protection against electric shock.",
                ),
                Service::new(
                    "oven_cooktop_connection",
                    "Oven/Cooktop Connection",
                    dec!(275.00),
                    "Electrical connection and isolation switch installation for electric oven or cooktop appliance.",
                ),
                Service::new(
                    "light_fitting_replacement",
                    "Light Fitting Replacement",
                    dec!(135.00),
                    "Removal of old light fitting and installation of new fitting including connection and testing.",
                ),
                Service::new(
                    "data_point_install",
                    "Data Point Install",
                    dec!(155.00),
                    "Installation of Category 6 data point including cable run up to 20 metres and wall plate.",
                ),
                Service::new(
                    "hot_water_system_connection",
                    "Hot Water System Connection",
                    dec!(385.00),
                    "Electrical connection of electric hot water system including isolation switch and compliance certification.",
                ),
            ],
        }
    }

    /// Load a catalog from a TOML file with one `[[services]]` table per service.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml(&content)?;
        log::debug!(
            "Loaded {} services from {}",
            catalog.services.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.services.is_empty() {
            return Err(CatalogError::ValidationError(
                "Catalog must define at least one service".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if service.key.trim().is_empty() || service.name.trim().is_empty() {
                return Err(CatalogError::ValidationError(
                    "Every service needs a non-empty key and name".to_string(),
                ));
            }
            if !seen.insert(service.key.as_str()) {
                return Err(CatalogError::ValidationError(format!(
                    "Duplicate service key: {}",
                    service.key
                )));
            }
            if service.price.is_sign_negative() {
                return Err(CatalogError::ValidationError(format!(
                    "Service {} has a negative price: {}",
                    service.key, service.price
                )));
            }
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|s| s.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
