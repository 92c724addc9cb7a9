//! Checkout data types
//!
//! The four-step checkout collects these records; the state machine that
//! gates progression between steps lives in `order-core`.

use serde::{Deserialize, Serialize};

/// Checkout step, in forward order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStep {
    #[default]
    Contact,
    Delivery,
    Payment,
    Review,
}

impl CheckoutStep {
    /// Step index (Contact=0 .. Review=3)
    pub fn index(&self) -> u8 {
        match self {
            CheckoutStep::Contact => 0,
            CheckoutStep::Delivery => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }

    /// Next step, capped at Review
    pub fn next(&self) -> CheckoutStep {
        match self {
            CheckoutStep::Contact => CheckoutStep::Delivery,
            CheckoutStep::Delivery => CheckoutStep::Payment,
            CheckoutStep::Payment | CheckoutStep::Review => CheckoutStep::Review,
        }
    }

    /// Previous step, floored at Contact
    pub fn back(&self) -> CheckoutStep {
        match self {
            CheckoutStep::Contact | CheckoutStep::Delivery => CheckoutStep::Contact,
            CheckoutStep::Payment => CheckoutStep::Delivery,
            CheckoutStep::Review => CheckoutStep::Payment,
        }
    }
}

/// Delivery mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    #[default]
    Pickup,
    Deliver,
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

/// Customer contact data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

impl ContactInfo {
    /// Phone with every non-digit character stripped
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// Delivery data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeliveryInfo {
    pub mode: DeliveryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// (latitude, longitude) when the customer pinned a location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<(f64, f64)>,
}

/// Payment data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    /// Cash amount the customer will pay with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_amount: Option<f64>,
    /// Customer pays with exact change
    #[serde(default)]
    pub exact_change: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(CheckoutStep::Contact.next(), CheckoutStep::Delivery);
        assert_eq!(CheckoutStep::Payment.next(), CheckoutStep::Review);
        // Capped at Review, floored at Contact
        assert_eq!(CheckoutStep::Review.next(), CheckoutStep::Review);
        assert_eq!(CheckoutStep::Contact.back(), CheckoutStep::Contact);
        assert_eq!(CheckoutStep::Review.back(), CheckoutStep::Payment);
    }

    #[test]
    fn test_phone_digits_stripped() {
        let contact = ContactInfo {
            name: "Ana".to_string(),
            phone: "(555) 123-45 67".to_string(),
        };
        assert_eq!(contact.phone_digits(), "5551234567");
    }
}
