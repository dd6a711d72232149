//! Heuristic check that an address is Australian.

use once_cell::sync::Lazy;
use regex::Regex;

/// State and territory abbreviations.
pub const STATES: [&str; 8] = ["NSW", "VIC", "QLD", "SA", "WA", "TAS", "NT", "ACT"];

static POSTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// True when the address mentions a state abbreviation anywhere (ignoring
/// case) or contains a standalone 4-digit postcode.
///
/// The state check is a plain substring test, so it is permissive: "Salisbury"
/// contains "SA".
pub fn is_australian_address(address: &str) -> bool {
    if address.trim().is_empty() {
        return false;
    }

    let upper = address.to_uppercase();
    STATES.iter().any(|state| upper.contains(state)) || POSTCODE.is_match(address)
}
