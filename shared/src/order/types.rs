//! Cart line types
//!
//! A line item is one distinct (product, customizations) pairing with an
//! aggregated quantity. Line identity is content-addressed: the same product
//! with the same customizations always hashes to the same `line_id`, which is
//! what makes merge-on-add deterministic.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One per-unit customization selection (condiment, utensils, note, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionSelection {
    /// Customization group (e.g. "condiment")
    pub group: String,
    /// Chosen value (e.g. "extra salsa")
    pub choice: String,
}

/// Content-addressed line identity
///
/// Selections are hashed in order: the same choices in a different order are
/// a different line. Returns a 16-character hex string.
pub fn line_identity(product_id: &str, customizations: &[OptionSelection]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(product_id.as_bytes());
    for selection in customizations {
        hasher.update([0u8]);
        hasher.update(selection.group.as_bytes());
        hasher.update([1u8]);
        hasher.update(selection.choice.as_bytes());
    }
    hex::encode(&hasher.finalize()[..8])
}

/// One cart line: a (product, customizations) pairing with quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Content-addressed line ID
    pub line_id: String,
    /// Product ID
    pub product_id: String,
    /// Product name snapshot
    pub name: String,
    /// Unit price
    pub unit_price: f64,
    /// Quantity
    pub quantity: i32,
    /// Ordered customization selections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<OptionSelection>,
}

impl LineItem {
    /// Line subtotal: `unit_price * quantity`, rounded to cents
    ///
    /// Always computed, never stored.
    pub fn line_subtotal(&self) -> f64 {
        let unit = Decimal::from_f64(self.unit_price).unwrap_or_default();
        let total = unit * Decimal::from(self.quantity);
        total.round_dp(2).to_f64().unwrap_or(0.0)
    }

    /// Human-readable customization summary ("condiment: extra salsa, ...")
    pub fn customization_summary(&self) -> String {
        self.customizations
            .iter()
            .map(|s| format!("{}: {}", s.group, s.choice))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Ordered collection of cart lines
///
/// `subtotal` and `item_count` are derived from the lines on every call;
/// nothing here is cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Sum of line subtotals, rounded to cents
    pub fn subtotal(&self) -> f64 {
        let total: Decimal = self
            .items
            .iter()
            .map(|item| Decimal::from_f64(item.line_subtotal()).unwrap_or_default())
            .sum();
        total.round_dp(2).to_f64().unwrap_or(0.0)
    }

    /// Sum of line quantities
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by its content-addressed ID
    pub fn find_line(&self, line_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.line_id == line_id)
    }
}

/// Discount granted by one promotion rule for the current cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountAllocation {
    /// Promotion rule ID
    pub rule_id: i64,
    /// Promotion display name
    pub name: String,
    /// Free units granted (one per completed bundle)
    pub free_units: u32,
    /// Total amount discounted
    pub amount: f64,
    /// Unit price of the cheapest freed unit (display/audit price)
    pub freed_unit_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_line(product_id: &str, price: f64, qty: i32) -> LineItem {
        LineItem {
            line_id: line_identity(product_id, &[]),
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            unit_price: price,
            quantity: qty,
            customizations: Vec::new(),
        }
    }

    #[test]
    fn test_line_identity_stable() {
        let opts = vec![OptionSelection {
            group: "condiment".to_string(),
            choice: "extra salsa".to_string(),
        }];
        assert_eq!(line_identity("taco", &opts), line_identity("taco", &opts));
        assert_ne!(line_identity("taco", &opts), line_identity("taco", &[]));
        assert_ne!(line_identity("taco", &[]), line_identity("torta", &[]));
    }

    #[test]
    fn test_line_identity_is_order_sensitive() {
        let a = OptionSelection {
            group: "condiment".to_string(),
            choice: "salsa".to_string(),
        };
        let b = OptionSelection {
            group: "utensils".to_string(),
            choice: "none".to_string(),
        };
        assert_ne!(
            line_identity("taco", &[a.clone(), b.clone()]),
            line_identity("taco", &[b, a])
        );
    }

    #[test]
    fn test_line_subtotal_rounds_to_cents() {
        let line = make_line("taco", 3.335, 3);
        // 3.335 * 3 = 10.005 -> 10.01 (half-up)
        assert_eq!(line.line_subtotal(), 10.01);
    }

    #[test]
    fn test_cart_derived_values() {
        let cart = Cart {
            items: vec![make_line("taco", 2.5, 3), make_line("torta", 4.0, 2)],
        };
        assert_eq!(cart.subtotal(), 15.5);
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.is_empty());
        assert!(cart.find_line(&line_identity("taco", &[])).is_some());
    }
}
