//! Receipt data model
//!
//! Wire shapes of receipts as posted by clients.

use serde::{Deserialize, Serialize};

/// Points awarded to a receipt.
pub type Score = u16;

/// A single purchased line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Free-text description, possibly padded with spaces
    pub short_description: String,
    /// Price as a decimal string with two fraction digits
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// A purchase receipt.
///
/// All fields stay textual: the scoring rules work on the digits as written,
/// so nothing is normalised on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    /// `HH:MM`, 24-hour clock
    pub purchase_time: String,
    pub items: Vec<Item>,
    /// Decimal string with two fraction digits
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserialize_camel_case() {
        let json = r#"{
            "retailer": "Walgreens",
            "purchaseDate": "2022-01-02",
            "purchaseTime": "08:13",
            "total": "2.65",
            "items": [
                {"shortDescription": "Pepsi - 12-oz", "price": "1.25"},
                {"shortDescription": "Dasani", "price": "1.40"}
            ]
        }"#;

        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.retailer, "Walgreens");
        assert_eq!(receipt.purchase_date, "2022-01-02");
        assert_eq!(receipt.purchase_time, "08:13");
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0], Item::new("Pepsi - 12-oz", "1.25"));
        assert_eq!(receipt.total, "2.65");
    }

    #[test]
    fn test_receipt_missing_field_is_rejected() {
        let json = r#"{"retailer": "Target", "purchaseDate": "2022-01-02"}"#;
        assert!(serde_json::from_str::<Receipt>(json).is_err());
    }
}
