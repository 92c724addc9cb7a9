//! Promotion pricing
//!
//! `matcher` decides whether a rule applies at a given instant; `engine`
//! turns the cart plus the currently-valid rules into discount allocations.

pub mod engine;
pub mod matcher;

pub use engine::{compute_discounts, discount_total, grand_total};
pub use matcher::is_rule_valid;
