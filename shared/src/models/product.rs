//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product entity
///
/// Managed by the admin surface; the customer surface only reads it when
/// adding items to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Optional category for menu grouping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the product is currently orderable
    pub is_active: bool,
}
