//! Order assembler
//!
//! Snapshots cart + discounts + checkout data into the immutable `Order`
//! record and formats the human-readable confirmation message sent to staff.

use crate::checkout::CheckoutSession;
use crate::pricing::{discount_total, grand_total};
use shared::order::{Cart, DeliveryMode, DiscountAllocation, Order, PaymentMethod};
use shared::util::now_millis;

/// Assemble the immutable order snapshot
///
/// Totals are recomputed here from the cart and allocations passed in; the
/// caller is responsible for having computed the allocations against the
/// current cart revision.
pub fn assemble_order(
    order_number: String,
    cart: &Cart,
    discounts: Vec<DiscountAllocation>,
    delivery_surcharge: f64,
    checkout: &CheckoutSession,
) -> Order {
    let subtotal = cart.subtotal();
    let discount_sum = discount_total(&discounts);
    let total = grand_total(subtotal, delivery_surcharge, discount_sum);

    let notes = checkout.notes().trim();

    Order {
        order_number,
        items: cart.items.clone(),
        subtotal,
        delivery_surcharge,
        discounts,
        discount_total: discount_sum,
        grand_total: total,
        contact: checkout.effective_contact().clone(),
        delivery: checkout.delivery().clone(),
        payment: checkout.payment().clone(),
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        },
        created_at: now_millis(),
    }
}

/// Format the confirmation message dispatched to notification recipients
pub fn confirmation_message(order: &Order) -> String {
    let mut lines = Vec::new();
    lines.push(format!("New order #{}", order.order_number));
    lines.push(String::new());

    for item in &order.items {
        let summary = item.customization_summary();
        if summary.is_empty() {
            lines.push(format!(
                "{}x {} = {:.2}",
                item.quantity,
                item.name,
                item.line_subtotal()
            ));
        } else {
            lines.push(format!(
                "{}x {} ({}) = {:.2}",
                item.quantity,
                item.name,
                summary,
                item.line_subtotal()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Subtotal: {:.2}", order.subtotal));
    if order.delivery_surcharge > 0.0 {
        lines.push(format!("Delivery: {:.2}", order.delivery_surcharge));
    }
    for discount in &order.discounts {
        lines.push(format!("{}: -{:.2}", discount.name, discount.amount));
    }
    lines.push(format!("Total: {:.2}", order.grand_total));
    lines.push(String::new());

    lines.push(format!(
        "Customer: {} ({})",
        order.contact.name,
        order.contact.phone_digits()
    ));
    match order.delivery.mode {
        DeliveryMode::Pickup => lines.push("Pickup at store".to_string()),
        DeliveryMode::Deliver => lines.push(format!(
            "Deliver to: {}",
            order.delivery.address.as_deref().unwrap_or("(no address)")
        )),
    }
    match order.payment.method {
        PaymentMethod::Card => lines.push("Payment: card".to_string()),
        PaymentMethod::Cash => {
            if order.payment.exact_change {
                lines.push("Payment: cash (exact change)".to_string());
            } else if let Some(amount) = order.payment.cash_amount {
                lines.push(format!("Payment: cash (pays with {:.2})", amount));
            } else {
                lines.push("Payment: cash".to_string());
            }
        }
    }
    if let Some(notes) = &order.notes {
        lines.push(format!("Notes: {}", notes));
    }

    lines.join("\n")
}
