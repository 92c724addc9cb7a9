//! Order snapshot - immutable record produced at checkout completion
//!
//! Created once by the assembler and never mutated afterward; this is the
//! payload handed to the notification and persistence collaborators.

use super::checkout::{ContactInfo, DeliveryInfo, DeliveryMode, PaymentInfo};
use super::types::{DiscountAllocation, LineItem};
use serde::{Deserialize, Serialize};

/// Finalized order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Generated order number
    pub order_number: String,
    /// Line items with customizations
    pub items: Vec<LineItem>,
    /// Cart subtotal
    pub subtotal: f64,
    /// Delivery surcharge (0 for pickup)
    pub delivery_surcharge: f64,
    /// Discount allocations, one per contributing promotion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<DiscountAllocation>,
    /// Sum of discount amounts
    pub discount_total: f64,
    /// `max(0, subtotal + delivery_surcharge - discount_total)`
    pub grand_total: f64,
    pub contact: ContactInfo,
    pub delivery: DeliveryInfo,
    pub payment: PaymentInfo,
    /// Free-text order notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
}

impl Order {
    /// Total unit count across all lines
    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_delivery(&self) -> bool {
        self.delivery.mode == DeliveryMode::Deliver
    }
}
