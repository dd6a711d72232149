use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::QuoteStatus;

/// Column names of the store, in order.
pub const HEADER: [&str; 8] = [
    "Date",
    "Time",
    "Customer_Name",
    "Customer_Email",
    "Customer_Address",
    "Service",
    "Price",
    "Status",
];

/// One persisted quotation. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Time", with = "time_format")]
    pub time: NaiveTime,
    #[serde(rename = "Customer_Name")]
    pub customer_name: String,
    #[serde(rename = "Customer_Email")]
    pub customer_email: String,
    #[serde(rename = "Customer_Address")]
    pub customer_address: String,
    #[serde(rename = "Service")]
    pub service_name: String,
    #[serde(rename = "Price", with = "price_format")]
    pub price: Decimal,
    #[serde(rename = "Status")]
    pub status: QuoteStatus,
}

impl QuoteRecord {
    pub fn created_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Case-insensitive substring match on the customer name.
    ///
    /// An empty needle matches every record; an empty name matches nothing else.
    pub fn matches_name(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        if self.customer_name.is_empty() {
            return false;
        }
        self.customer_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(s.trim(), FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
    }
}

mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(s.trim(), FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{s}': {e}")))
    }
}

// Prices go through strings so the scale written is the scale read back.
mod price_format {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(price)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.trim()
            .parse::<Decimal>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price '{s}': {e}")))
    }
}
