//! Receipt validation
//!
//! Pattern checks that gate every receipt before it reaches the scoring
//! engine.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::models::{Item, Receipt};

// Letters and whitespace are ASCII only; `\s` would also admit U+00A0 and
// other Unicode spaces.
const RETAILER_PATTERN: &str = r"^[A-Za-z0-9_\t\n\x0C\r \-&]+$";
const DESCRIPTION_PATTERN: &str = r"^[A-Za-z0-9_\t\n\x0C\r \-]+$";
const DATE_PATTERN: &str = r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$";
const TIME_PATTERN: &str = r"^(0[0-9]|1[0-9]|2[0-3]):([0-5][0-9])$";
const CURRENCY_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";

struct Patterns {
    retailer: Regex,
    description: Regex,
    date: Regex,
    time: Regex,
    currency: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        retailer: compile(RETAILER_PATTERN),
        description: compile(DESCRIPTION_PATTERN),
        date: compile(DATE_PATTERN),
        time: compile(TIME_PATTERN),
        currency: compile(CURRENCY_PATTERN),
    })
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("built-in pattern {pattern:?} does not compile: {err}"),
    }
}

/// Every field of a receipt that failed its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid receipt fields: {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<String>,
}

/// Returns true if `value` is a two-fraction-digit decimal amount.
pub fn is_currency(value: &str) -> bool {
    patterns().currency.is_match(value)
}

/// Returns true if `value` is a 24-hour `HH:MM` time.
pub fn is_clock_time(value: &str) -> bool {
    patterns().time.is_match(value)
}

impl Item {
    fn invalid_fields(&self, position: usize, out: &mut Vec<String>) {
        let p = patterns();
        if !p.description.is_match(&self.short_description) {
            out.push(format!("items[{position}].shortDescription"));
        }
        if !p.currency.is_match(&self.price) {
            out.push(format!("items[{position}].price"));
        }
    }
}

impl Receipt {
    /// Names every field that fails its pattern, in declaration order.
    pub fn invalid_fields(&self) -> Vec<String> {
        let p = patterns();
        let mut fields = Vec::new();

        if !p.retailer.is_match(&self.retailer) {
            fields.push("retailer".to_string());
        }
        if !p.date.is_match(&self.purchase_date) {
            fields.push("purchaseDate".to_string());
        }
        if !p.time.is_match(&self.purchase_time) {
            fields.push("purchaseTime".to_string());
        }
        if self.items.is_empty() {
            fields.push("items".to_string());
        }
        for (position, item) in self.items.iter().enumerate() {
            item.invalid_fields(position, &mut fields);
        }
        if !p.currency.is_match(&self.total) {
            fields.push("total".to_string());
        }

        fields
    }

    /// Checks the receipt against all field patterns.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = self.invalid_fields();
        if fields.is_empty() {
            return Ok(());
        }

        debug!(fields = ?fields, "receipt failed validation");
        Err(ValidationError { fields })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
