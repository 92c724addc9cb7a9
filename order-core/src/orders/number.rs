//! Order number generation
//!
//! Local timestamp plus a 4-digit random suffix: readable over the counter,
//! sortable by creation time, and collision-resistant at a single
//! establishment's daily volume.

use chrono::NaiveDateTime;
use rand::Rng;

/// Generate an order number like `20240604-123005-0831`
pub fn generate_order_number(now_local: NaiveDateTime) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{}-{:04}", now_local.format("%Y%m%d-%H%M%S"), suffix)
}
