//! Quotation letters rendered from `minijinja` templates.

use chrono::NaiveDate;
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CustomerDetails, Service};

const MARKDOWN_TEMPLATE: &str = include_str!("../templates/quote.md.jinja");
const TEXT_TEMPLATE: &str = include_str!("../templates/quote.txt.jinja");

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to render quotation: {0}")]
    Template(#[from] minijinja::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Headings and emphasis for display.
    #[default]
    Markdown,
    /// Plain text for pasting into an email or message.
    Text,
}

/// Business details printed on every quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Letterhead {
    pub company: String,
    pub tagline: String,
    pub legal_name: String,
    pub licence: String,
    pub abn: String,
    pub phone: String,
    pub email: String,
    pub footer: String,
    pub currency: String,
    pub standard: String,
    pub validity_days: u32,
    pub deposit_percent: u32,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            company: "Gold Coast Electrical Pros".to_string(),
            tagline: "Professional Electrical Services - Licensed & Insured".to_string(),
            legal_name: "Gold Coast Electrical Pros Pty Ltd".to_string(),
            licence: "Licensed Electrician - Lic. #12345".to_string(),
            abn: "12 345 678 901".to_string(),
            phone: "0412 345 678".to_string(),
            email: "info@gcelectricalpros.com.au".to_string(),
            footer: "Servicing Gold Coast & Surrounds | Available 24/7 for Emergency Call-Outs"
                .to_string(),
            currency: "AUD".to_string(),
            standard: "AS/NZS 3000".to_string(),
            validity_days: 30,
            deposit_percent: 50,
        }
    }
}

/// A quotation for one service to one customer on one date.
#[derive(Debug, Clone, Copy)]
pub struct QuoteDocument<'a> {
    pub letterhead: &'a Letterhead,
    pub customer: &'a CustomerDetails,
    pub service: &'a Service,
    pub date: NaiveDate,
}

impl QuoteDocument<'_> {
    pub fn render(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        let mut env = Environment::new();
        let name = match format {
            DocumentFormat::Markdown => {
                env.add_template("quote.md", MARKDOWN_TEMPLATE)?;
                "quote.md"
            }
            DocumentFormat::Text => {
                env.add_template("quote.txt", TEXT_TEMPLATE)?;
                "quote.txt"
            }
        };

        let rendered = env.get_template(name)?.render(context! {
            letterhead => self.letterhead,
            customer => self.customer,
            service => self.service,
            date => self.date.format("%d %B %Y").to_string(),
            price => format!("{:.2}", self.service.price),
        })?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn render(format: DocumentFormat, email: &str) -> String {
        let catalog = Catalog::builtin();
        let customer = CustomerDetails::new("John Smith", email, "123 Main Street, Sydney NSW 2000");
        QuoteDocument {
            letterhead: &Letterhead::default(),
            customer: &customer,
            service: catalog.get("ceiling_fan_fitoff").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
        }
        .render(format)
        .unwrap()
    }

    #[test]
    fn test_markdown_document() {
        let doc = render(DocumentFormat::Markdown, "");
        assert!(doc.starts_with("# ⚡ GOLD COAST ELECTRICAL PROS"));
        assert!(doc.contains("**Date:** 04 July 2025"));
        assert!(doc.contains("Dear John Smith,"));
        assert!(doc.contains("**Service Requested:** Ceiling Fan Fit-off"));
        assert!(doc.contains("**Quote Amount:** $245.00 AUD (GST Included)"));
        assert!(doc.contains("valid for 30 days"));
        assert!(doc.contains("50% deposit"));
    }

    #[test]
    fn test_text_document_has_no_markup() {
        let doc = render(DocumentFormat::Text, "");
        assert!(doc.contains("Date: 04 July 2025"));
        assert!(doc.contains("Quote Amount: $245.00 AUD (GST Included)"));
        assert!(!doc.contains("**"));
        assert!(!doc.contains("###"));
    }

    #[test]
    fn test_email_line_only_when_given() {
        assert!(!render(DocumentFormat::Text, "").contains("@example.com"));
        let doc = render(DocumentFormat::Text, "john@example.com");
        assert!(doc.contains("123 Main Street, Sydney NSW 2000\njohn@example.com\n"));
    }

    #[test]
    fn test_custom_letterhead() {
        let catalog = Catalog::builtin();
        let customer = CustomerDetails::new("Ann", "", "Perth WA 6000");
        let letterhead = Letterhead {
            company: "Sparky Bros".to_string(),
            validity_days: 14,
            ..Letterhead::default()
        };
        let doc = QuoteDocument {
            letterhead: &letterhead,
            customer: &customer,
            service: catalog.get("downlight_install").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        }
        .render(DocumentFormat::Text)
        .unwrap();
        assert!(doc.starts_with("⚡ SPARKY BROS"));
        assert!(doc.contains("valid for 14 days"));
        assert!(doc.contains("$95.00 AUD"));
        assert!(doc.contains("Sparky Bros Team"));
    }
}
