//! Discount engine
//!
//! Pure evaluation of bundle promotions over the cart: identical inputs
//! produce identical allocations, the cart is never mutated, and a rule with
//! nothing to contribute is normal, not an error.
//!
//! Each currently-valid rule is evaluated independently against the full
//! cart. A unit eligible under two overlapping rules is therefore discounted
//! under both; that stacking is observed production behavior and is kept
//! as-is. Likewise exactly one unit is freed per completed bundle regardless
//! of the rule's `items_free` value.

use super::matcher::is_rule_valid;
use crate::money::{to_decimal, to_f64};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::models::PromotionRule;
use shared::order::{Cart, DiscountAllocation};
use std::cmp::Ordering;

/// Compute discount allocations for the cart at the given instant
///
/// Per valid rule: every eligible line is expanded into per-unit records,
/// the records are stable-sorted ascending by unit price, and for each
/// complete bundle the record at flat index `i * items_required` (the
/// cheapest unit of its bundle-group) is granted free.
pub fn compute_discounts(
    cart: &Cart,
    rules: &[PromotionRule],
    now: NaiveDateTime,
) -> Vec<DiscountAllocation> {
    let mut allocations = Vec::new();

    for rule in rules {
        if !is_rule_valid(rule, now) {
            continue;
        }
        if let Some(allocation) = evaluate_rule(cart, rule) {
            allocations.push(allocation);
        }
    }

    allocations
}

/// Evaluate a single rule against the cart
fn evaluate_rule(cart: &Cart, rule: &PromotionRule) -> Option<DiscountAllocation> {
    // items_required >= 1 is enforced at the promotion-source boundary;
    // a malformed rule simply contributes nothing here.
    if rule.items_required == 0 {
        return None;
    }

    // Expand eligible lines into per-unit prices, in encounter order
    let mut unit_prices: Vec<f64> = Vec::new();
    for line in &cart.items {
        if rule.is_eligible(&line.product_id) {
            for _ in 0..line.quantity.max(0) {
                unit_prices.push(line.unit_price);
            }
        }
    }

    let required = rule.items_required as usize;
    let bundles = unit_prices.len() / required;
    if bundles == 0 {
        return None;
    }

    // Stable sort keeps encounter order among equal prices
    unit_prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut amount = Decimal::ZERO;
    let mut freed_unit_price = 0.0;
    for bundle in 0..bundles {
        let freed = unit_prices[bundle * required];
        if bundle == 0 {
            freed_unit_price = freed;
        }
        amount += to_decimal(freed);
    }

    Some(DiscountAllocation {
        rule_id: rule.id,
        name: rule.name.clone(),
        free_units: bundles as u32,
        amount: to_f64(amount),
        freed_unit_price,
    })
}

/// Sum of allocation amounts, rounded to cents
pub fn discount_total(allocations: &[DiscountAllocation]) -> f64 {
    let total: Decimal = allocations.iter().map(|a| to_decimal(a.amount)).sum();
    to_f64(total)
}

/// `max(0, subtotal + delivery_surcharge - discount_total)`
pub fn grand_total(subtotal: f64, delivery_surcharge: f64, discount_total: f64) -> f64 {
    let total =
        to_decimal(subtotal) + to_decimal(delivery_surcharge) - to_decimal(discount_total);
    to_f64(total.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::TimeWindow;
    use shared::order::{LineItem, line_identity};

    fn make_rule(id: i64, products: &[&str], required: u32) -> PromotionRule {
        PromotionRule {
            id,
            name: format!("rule_{}", id),
            is_active: true,
            eligible_products: products.iter().map(|p| p.to_string()).collect(),
            items_required: required,
            items_free: 1,
            active_days: None,
            window: None,
        }
    }

    fn make_line(product_id: &str, price: f64, qty: i32) -> LineItem {
        LineItem {
            line_id: line_identity(product_id, &[]),
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            unit_price: price,
            quantity: qty,
            customizations: Vec::new(),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_frees_cheapest_of_single_bundle() {
        // Three eligible units priced [10, 8, 6]; bundle size 2.
        // Sorted [6, 8, 10], one bundle, index 0 freed -> 6.
        let cart = Cart {
            items: vec![
                make_line("a", 10.0, 1),
                make_line("b", 8.0, 1),
                make_line("c", 6.0, 1),
            ],
        };
        let rules = vec![make_rule(1, &["a", "b", "c"], 2)];

        let allocations = compute_discounts(&cart, &rules, noon());

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].free_units, 1);
        assert_eq!(allocations[0].amount, 6.0);
        assert_eq!(allocations[0].freed_unit_price, 6.0);
    }

    #[test]
    fn test_frees_cheapest_per_bundle_group() {
        // Four units [10, 8, 6, 4]; bundle size 2 -> two bundles.
        // Sorted [4, 6, 8, 10]: indices 0 and 2 freed -> 4 + 8 = 12.
        let cart = Cart {
            items: vec![
                make_line("a", 10.0, 1),
                make_line("b", 8.0, 1),
                make_line("c", 6.0, 1),
                make_line("d", 4.0, 1),
            ],
        };
        let rules = vec![make_rule(1, &["a", "b", "c", "d"], 2)];

        let allocations = compute_discounts(&cart, &rules, noon());

        assert_eq!(allocations[0].free_units, 2);
        assert_eq!(allocations[0].amount, 12.0);
        assert_eq!(allocations[0].freed_unit_price, 4.0);
    }

    #[test]
    fn test_quantity_expands_to_units() {
        // One line of quantity 3 counts as three eligible units
        let cart = Cart {
            items: vec![make_line("taco", 2.5, 3)],
        };
        let rules = vec![make_rule(1, &["taco"], 3)];

        let allocations = compute_discounts(&cart, &rules, noon());

        assert_eq!(allocations[0].free_units, 1);
        assert_eq!(allocations[0].amount, 2.5);
    }

    #[test]
    fn test_incomplete_bundle_contributes_nothing() {
        let cart = Cart {
            items: vec![make_line("taco", 2.5, 1)],
        };
        let rules = vec![make_rule(1, &["taco"], 2)];

        assert!(compute_discounts(&cart, &rules, noon()).is_empty());
    }

    #[test]
    fn test_ineligible_products_ignored() {
        let cart = Cart {
            items: vec![make_line("torta", 5.0, 4)],
        };
        let rules = vec![make_rule(1, &["taco"], 2)];

        assert!(compute_discounts(&cart, &rules, noon()).is_empty());
    }

    #[test]
    fn test_rule_outside_window_contributes_nothing() {
        let cart = Cart {
            items: vec![make_line("taco", 2.5, 2)],
        };
        let mut rule = make_rule(1, &["taco"], 2);
        rule.window = Some(TimeWindow::parse("18:00", "21:00").unwrap());

        assert!(compute_discounts(&cart, &[rule.clone()], noon()).is_empty());

        // Same cart inside the window does contribute
        let evening = NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        assert_eq!(compute_discounts(&cart, &[rule], evening).len(), 1);
    }

    #[test]
    fn test_overlapping_rules_both_apply() {
        // Stacking is preserved: both rules discount the same units
        let cart = Cart {
            items: vec![make_line("taco", 3.0, 2)],
        };
        let rules = vec![make_rule(1, &["taco"], 2), make_rule(2, &["taco"], 2)];

        let allocations = compute_discounts(&cart, &rules, noon());

        assert_eq!(allocations.len(), 2);
        assert_eq!(discount_total(&allocations), 6.0);
    }

    #[test]
    fn test_inactive_rule_skipped() {
        let cart = Cart {
            items: vec![make_line("taco", 3.0, 2)],
        };
        let mut rule = make_rule(1, &["taco"], 2);
        rule.is_active = false;

        assert!(compute_discounts(&cart, &[rule], noon()).is_empty());
    }

    #[test]
    fn test_grand_total_never_negative() {
        assert_eq!(grand_total(10.0, 0.0, 25.0), 0.0);
        assert_eq!(grand_total(10.0, 2.0, 3.0), 9.0);
        assert_eq!(grand_total(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_deterministic_over_random_carts() {
        use rand::{Rng, SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(42);
        let products = ["a", "b", "c", "d", "e"];

        for _ in 0..200 {
            let items: Vec<LineItem> = (0..rng.gen_range(1..8))
                .map(|_| {
                    let product = products[rng.gen_range(0..products.len())];
                    make_line(
                        product,
                        (rng.gen_range(50..2000) as f64) / 100.0,
                        rng.gen_range(1..5),
                    )
                })
                .collect();
            let cart = Cart { items };
            let rules = vec![
                make_rule(1, &["a", "b", "c"], 2),
                make_rule(2, &["c", "d", "e"], 3),
            ];

            let first = compute_discounts(&cart, &rules, noon());
            let second = compute_discounts(&cart, &rules, noon());
            assert_eq!(first, second);

            // The cart itself is untouched
            assert_eq!(compute_discounts(&cart, &rules, noon()), first);
        }
    }

    #[test]
    fn test_stable_sort_keeps_encounter_order_on_ties() {
        // Two lines at the same price: the first encountered unit is freed
        let cart = Cart {
            items: vec![make_line("a", 5.0, 1), make_line("b", 5.0, 1)],
        };
        let rules = vec![make_rule(1, &["a", "b"], 2)];

        let allocations = compute_discounts(&cart, &rules, noon());
        assert_eq!(allocations[0].amount, 5.0);
        assert_eq!(allocations[0].freed_unit_price, 5.0);
    }
}
