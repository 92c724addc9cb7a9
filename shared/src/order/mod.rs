//! Order domain types: cart lines, checkout data, order snapshots

pub mod checkout;
pub mod snapshot;
pub mod types;

pub use checkout::{
    CheckoutStep, ContactInfo, DeliveryInfo, DeliveryMode, PaymentInfo, PaymentMethod,
};
pub use snapshot::Order;
pub use types::{Cart, DiscountAllocation, LineItem, OptionSelection, line_identity};
