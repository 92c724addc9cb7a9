//! Order placement
//!
//! `OrderService` ties the engines together: it prices the cart for the
//! review step, and on submission assembles the immutable order, fans the
//! confirmation out to notification recipients (at-least-one-of-N policy)
//! and hands the snapshot to the persistence collaborator best-effort.

pub mod assembler;
pub mod dispatch;
pub mod error;
pub mod number;

pub use assembler::{assemble_order, confirmation_message};
pub use dispatch::{
    DispatchOutcome, NotificationSink, OrderRepository, PromotionSource, dispatch_notifications,
    persist_detached,
};
pub use error::OrderError;
pub use number::generate_order_number;

use crate::clock::Clock;
use crate::config::Config;
use crate::money::to_decimal;
use crate::pricing::{compute_discounts, discount_total, grand_total};
use crate::session::OrderSession;
use shared::models::PromotionRule;
use shared::order::{DeliveryMode, DiscountAllocation, Order, PaymentMethod};
use std::sync::Arc;

/// Priced view of the cart for the review step
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Quote {
    pub subtotal: f64,
    pub delivery_surcharge: f64,
    pub discounts: Vec<DiscountAllocation>,
    pub discount_total: f64,
    pub grand_total: f64,
    /// Cart revision the quote was computed against
    pub cart_revision: u64,
}

/// Result of a successfully placed order
#[derive(Debug)]
pub struct PlacedOrder {
    pub order: Order,
    pub confirmation: String,
    pub outcome: DispatchOutcome,
}

/// Order placement service for one storefront
pub struct OrderService {
    delivery_surcharge: f64,
    notify_recipients: Vec<String>,
    require_cash_covers_total: bool,
    clock: Arc<dyn Clock>,
    promotions: Arc<dyn PromotionSource>,
    notifier: Arc<dyn NotificationSink>,
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(
        config: &Config,
        clock: Arc<dyn Clock>,
        promotions: Arc<dyn PromotionSource>,
        notifier: Arc<dyn NotificationSink>,
        repository: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            delivery_surcharge: config.delivery_surcharge,
            notify_recipients: config.notify_recipients.clone(),
            require_cash_covers_total: config.require_cash_covers_total,
            clock,
            promotions,
            notifier,
            repository,
        }
    }

    /// Load the current promotion rules
    ///
    /// A failing promotion source prices the cart without promotions rather
    /// than blocking the customer.
    fn load_rules(&self) -> Vec<PromotionRule> {
        match self.promotions.active_rules() {
            Ok(rules) => rules,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load promotion rules");
                Vec::new()
            }
        }
    }

    /// Surcharge for the session's current delivery mode
    fn surcharge_for(&self, session: &OrderSession) -> f64 {
        let delivering = session
            .checkout()
            .is_some_and(|c| c.delivery().mode == DeliveryMode::Deliver);
        if delivering { self.delivery_surcharge } else { 0.0 }
    }

    /// Price the cart as of now
    ///
    /// Called on every display of totals; allocations are always recomputed
    /// against the current cart revision, never reused across mutations.
    pub fn quote(&self, session: &OrderSession) -> Quote {
        let rules = self.load_rules();
        let now = self.clock.now_local();
        let cart = session.cart().cart();

        let discounts = compute_discounts(cart, &rules, now);
        let subtotal = cart.subtotal();
        let delivery_surcharge = self.surcharge_for(session);
        let discount_sum = discount_total(&discounts);

        Quote {
            subtotal,
            delivery_surcharge,
            discount_total: discount_sum,
            grand_total: grand_total(subtotal, delivery_surcharge, discount_sum),
            discounts,
            cart_revision: session.cart().revision(),
        }
    }

    /// Place the order at the end of the review step
    ///
    /// On success the session is cleared. On total notification failure the
    /// session is left intact so the customer can retry. Persistence is
    /// issued independently of the notification fan-out and never blocks
    /// either outcome.
    pub async fn place_order(&self, session: &mut OrderSession) -> Result<PlacedOrder, OrderError> {
        if session.cart().is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let checkout = session.checkout().ok_or(OrderError::CheckoutNotStarted)?;
        if !checkout.is_ready() {
            return Err(OrderError::NotReady(checkout.step()));
        }
        if self.notify_recipients.is_empty() {
            return Err(OrderError::NoRecipients);
        }

        let quote = self.quote(session);
        self.check_cash_coverage(session, quote.grand_total)?;

        let now = self.clock.now_local();
        let checkout = session.checkout().ok_or(OrderError::CheckoutNotStarted)?;
        let order = assemble_order(
            generate_order_number(now),
            session.cart().cart(),
            quote.discounts,
            quote.delivery_surcharge,
            checkout,
        );
        let confirmation = confirmation_message(&order);

        // Best-effort secondary write, independent of the notification result
        persist_detached(Arc::clone(&self.repository), order.clone());

        let outcome = dispatch_notifications(
            Arc::clone(&self.notifier),
            &self.notify_recipients,
            &confirmation,
        )
        .await;

        if !outcome.is_success() {
            tracing::error!(
                order_number = %order.order_number,
                attempted = self.notify_recipients.len(),
                "Order submission failed: no recipient reachable"
            );
            return Err(OrderError::NotificationFailed {
                attempted: self.notify_recipients.len(),
            });
        }

        tracing::info!(
            order_number = %order.order_number,
            grand_total = order.grand_total,
            recipients_notified = outcome.recipients_notified,
            "Order placed"
        );
        session.finish();

        Ok(PlacedOrder {
            order,
            confirmation,
            outcome,
        })
    }

    fn check_cash_coverage(
        &self,
        session: &OrderSession,
        grand_total: f64,
    ) -> Result<(), OrderError> {
        if !self.require_cash_covers_total {
            return Ok(());
        }
        let Some(checkout) = session.checkout() else {
            return Ok(());
        };
        let payment = checkout.payment();
        if payment.method == PaymentMethod::Cash
            && !payment.exact_change
            && let Some(offered) = payment.cash_amount
            && to_decimal(offered) < to_decimal(grand_total)
        {
            return Err(OrderError::InsufficientCash {
                required: grand_total,
                offered,
            });
        }
        Ok(())
    }
}
