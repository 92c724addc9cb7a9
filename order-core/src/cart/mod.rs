//! Cart store
//!
//! Owns the ordered line items for one customer session. Every operation is
//! synchronous and leaves the derived subtotal/item-count consistent; there
//! is no deferred recomputation. Each mutation bumps `revision`, which is how
//! callers detect that previously computed discount allocations are stale and
//! must be recomputed before totals are displayed.

use crate::money::{self, MAX_PRICE, MAX_QUANTITY};
use shared::models::Product;
use shared::order::{Cart, LineItem, OptionSelection, line_identity};
use thiserror::Error;

/// Cart mutation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("product '{0}' is not orderable")]
    InactiveProduct(String),

    #[error("line '{0}' not found")]
    LineNotFound(String),
}

/// Mutable cart with merge-on-add semantics
#[derive(Debug, Default, Clone)]
pub struct CartStore {
    cart: Cart,
    revision: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cart contents
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutation counter; bumped by every successful mutation
    ///
    /// Discount allocations computed against an older revision are stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subtotal(&self) -> f64 {
        self.cart.subtotal()
    }

    pub fn item_count(&self) -> i32 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of a product with the given customizations
    ///
    /// Merges into an existing line when an identical (product,
    /// customizations) pairing is already present, otherwise appends a new
    /// line with quantity 1. Returns the line ID.
    pub fn add_item(
        &mut self,
        product: &Product,
        customizations: Vec<OptionSelection>,
    ) -> Result<String, CartError> {
        if !product.is_active {
            return Err(CartError::InactiveProduct(product.id.clone()));
        }
        money::require_finite(product.price, "price").map_err(CartError::InvalidPrice)?;
        if product.price < 0.0 {
            return Err(CartError::InvalidPrice(format!(
                "price must be non-negative, got {}",
                product.price
            )));
        }
        if product.price > MAX_PRICE {
            return Err(CartError::InvalidPrice(format!(
                "price exceeds maximum allowed ({}), got {}",
                MAX_PRICE, product.price
            )));
        }

        let line_id = line_identity(&product.id, &customizations);

        if let Some(line) = self
            .cart
            .items
            .iter_mut()
            .find(|line| line.line_id == line_id)
        {
            if line.quantity >= MAX_QUANTITY {
                return Err(CartError::InvalidQuantity(format!(
                    "quantity exceeds maximum allowed ({})",
                    MAX_QUANTITY
                )));
            }
            line.quantity += 1;
            tracing::debug!(line_id = %line_id, quantity = line.quantity, "Merged cart line");
        } else {
            self.cart.items.push(LineItem {
                line_id: line_id.clone(),
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
                customizations,
            });
            tracing::debug!(line_id = %line_id, product_id = %product.id, "Appended cart line");
        }

        self.revision += 1;
        Ok(line_id)
    }

    /// Replace a line's quantity; removes the line when `qty <= 0`
    pub fn set_quantity(&mut self, line_id: &str, qty: i32) -> Result<(), CartError> {
        if qty > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, qty
            )));
        }

        if qty <= 0 {
            return self.remove_item(line_id);
        }

        let line = self
            .cart
            .items
            .iter_mut()
            .find(|line| line.line_id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.to_string()))?;
        line.quantity = qty;
        self.revision += 1;
        Ok(())
    }

    /// Remove a line entirely
    pub fn remove_item(&mut self, line_id: &str) -> Result<(), CartError> {
        let before = self.cart.items.len();
        self.cart.items.retain(|line| line.line_id != line_id);
        if self.cart.items.len() == before {
            return Err(CartError::LineNotFound(line_id.to_string()));
        }
        self.revision += 1;
        Ok(())
    }

    /// Remove every line
    pub fn clear(&mut self) {
        if !self.cart.items.is_empty() {
            self.cart.items.clear();
            self.revision += 1;
        }
    }
}
