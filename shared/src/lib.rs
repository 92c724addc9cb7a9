//! Shared types for the storefront ordering system
//!
//! Common types used by both the customer ordering surface and the admin
//! surface: catalog models, promotion rules, cart/checkout/order types and
//! time utilities.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
