//! Order placement errors

use shared::order::CheckoutStep;
use thiserror::Error;

/// Errors surfaced to the checkout flow when placing an order
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout has not been started")]
    CheckoutNotStarted,

    #[error("checkout is at step {0:?}, not ready for submission")]
    NotReady(CheckoutStep),

    #[error("cash amount {offered} does not cover the total {required}")]
    InsufficientCash { required: f64, offered: f64 },

    #[error("no notification recipients configured")]
    NoRecipients,

    #[error("order could not be submitted: all {attempted} notification recipients failed")]
    NotificationFailed { attempted: usize },
}
