//! Per-customer order session
//!
//! One `OrderSession` owns the cart store and the checkout state machine for
//! a single customer. It is the only mutation path for either, and it is the
//! single owner of the checkout lifecycle: begin at checkout start, reset at
//! cancel, clear at completion. There are no ambient singletons; every
//! component that needs the session receives it by reference.

use crate::cart::CartStore;
use crate::checkout::CheckoutSession;
use shared::order::ContactInfo;

/// Cart + checkout state for one customer
#[derive(Debug, Default)]
pub struct OrderSession {
    cart: CartStore,
    checkout: Option<CheckoutSession>,
}

impl OrderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Begin checkout, creating an empty checkout session
    ///
    /// A known identity skips the contact step. Calling this while a checkout
    /// is already in progress returns the existing session untouched.
    pub fn begin_checkout(&mut self, identity: Option<ContactInfo>) -> &mut CheckoutSession {
        self.checkout.get_or_insert_with(|| match identity {
            Some(identity) => CheckoutSession::with_identity(identity),
            None => CheckoutSession::new(),
        })
    }

    pub fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutSession> {
        self.checkout.as_mut()
    }

    /// Cancel checkout (cart view closed); the cart itself is kept
    ///
    /// Already-dispatched notification/persistence calls are unaffected.
    pub fn cancel_checkout(&mut self) {
        self.checkout = None;
    }

    /// Clear everything after a successfully placed order
    pub fn finish(&mut self) {
        self.cart.clear();
        self.checkout = None;
    }
}
