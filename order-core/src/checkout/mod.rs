//! Checkout state machine
//!
//! Four ordered steps: Contact -> Delivery -> Payment -> Review. `next()` is
//! gated by the current step's validation; `back()` is always allowed and
//! never discards data. Validation failures are data in the session's error
//! map, not errors: the customer corrects the field and tries again.

use shared::order::{
    CheckoutStep, ContactInfo, DeliveryInfo, DeliveryMode, PaymentInfo, PaymentMethod,
};
use std::collections::HashMap;

/// Required digit count for a contact phone number
const PHONE_DIGITS: usize = 10;

/// One customer's checkout progress
///
/// Created empty when checkout begins. A pre-authenticated identity skips the
/// contact-collection step: the machine starts at Delivery with the contact
/// fields pre-populated.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    step: CheckoutStep,
    identity: Option<ContactInfo>,
    contact: ContactInfo,
    delivery: DeliveryInfo,
    payment: PaymentInfo,
    notes: String,
    errors: HashMap<CheckoutStep, Vec<String>>,
}

impl CheckoutSession {
    /// Start checkout for an anonymous customer (begins at Contact)
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Contact,
            identity: None,
            contact: ContactInfo::default(),
            delivery: DeliveryInfo::default(),
            payment: PaymentInfo::default(),
            notes: String::new(),
            errors: HashMap::new(),
        }
    }

    /// Start checkout for an identified customer (begins at Delivery)
    pub fn with_identity(identity: ContactInfo) -> Self {
        Self {
            step: CheckoutStep::Delivery,
            contact: identity.clone(),
            identity: Some(identity),
            delivery: DeliveryInfo::default(),
            payment: PaymentInfo::default(),
            notes: String::new(),
            errors: HashMap::new(),
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Contact used on the order: the entered data, or the identity when the
    /// contact step was skipped
    pub fn effective_contact(&self) -> &ContactInfo {
        if self.contact.name.is_empty() {
            if let Some(identity) = &self.identity {
                return identity;
            }
        }
        &self.contact
    }

    pub fn delivery(&self) -> &DeliveryInfo {
        &self.delivery
    }

    pub fn payment(&self) -> &PaymentInfo {
        &self.payment
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Validation errors for a step, if any
    pub fn errors_for(&self, step: CheckoutStep) -> &[String] {
        self.errors.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The machine is ready for order submission
    pub fn is_ready(&self) -> bool {
        self.step == CheckoutStep::Review
    }

    // ========== Update operations ==========

    pub fn update_contact(&mut self, contact: ContactInfo) {
        self.contact = contact;
        self.errors.remove(&CheckoutStep::Contact);
    }

    pub fn update_delivery(&mut self, delivery: DeliveryInfo) {
        self.delivery = delivery;
        self.errors.remove(&CheckoutStep::Delivery);
    }

    pub fn update_payment(&mut self, payment: PaymentInfo) {
        self.payment = payment;
        self.errors.remove(&CheckoutStep::Payment);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    // ========== Transitions ==========

    /// Validate the current step and advance on success
    ///
    /// Returns whether the step advanced. On failure the error map is
    /// populated for display and the step stays put.
    pub fn next(&mut self) -> bool {
        let problems = self.validate_step(self.step);
        if !problems.is_empty() {
            tracing::debug!(step = ?self.step, errors = problems.len(), "Checkout step blocked");
            self.errors.insert(self.step, problems);
            return false;
        }

        self.errors.remove(&self.step);
        let advanced = self.step.next();
        if advanced != self.step {
            tracing::debug!(from = ?self.step, to = ?advanced, "Checkout step advanced");
            self.step = advanced;
            return true;
        }
        false
    }

    /// Go back one step; always allowed, data is retained
    pub fn back(&mut self) {
        self.step = self.step.back();
    }

    /// Reset to the initial state, clearing collected data and errors
    pub fn reset(&mut self) {
        *self = match self.identity.take() {
            Some(identity) => CheckoutSession::with_identity(identity),
            None => CheckoutSession::new(),
        };
    }

    // ========== Validation ==========

    fn validate_step(&self, step: CheckoutStep) -> Vec<String> {
        match step {
            CheckoutStep::Contact => self.validate_contact(),
            CheckoutStep::Delivery => self.validate_delivery(),
            CheckoutStep::Payment => self.validate_payment(),
            // Review only displays the summary and collects notes
            CheckoutStep::Review => Vec::new(),
        }
    }

    fn validate_contact(&self) -> Vec<String> {
        // Identified customers already have contact data on file
        if self.identity.is_some() {
            return Vec::new();
        }

        let mut problems = Vec::new();
        if self.contact.name.trim().is_empty() {
            problems.push("name is required".to_string());
        }
        if self.contact.phone_digits().len() != PHONE_DIGITS {
            problems.push(format!("phone must have {} digits", PHONE_DIGITS));
        }
        problems
    }

    fn validate_delivery(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.delivery.mode == DeliveryMode::Deliver {
            let has_address = self
                .delivery
                .address
                .as_deref()
                .is_some_and(|a| !a.trim().is_empty());
            if !has_address {
                problems.push("address is required for delivery".to_string());
            }
        }
        problems
    }

    fn validate_payment(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.payment.method == PaymentMethod::Cash
            && !self.payment.exact_change
            && self.payment.cash_amount.is_none()
        {
            problems.push("cash payment requires an amount or exact change".to_string());
        }
        problems
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
