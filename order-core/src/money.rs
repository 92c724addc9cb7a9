//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as `f64` in snapshots and DTOs; all arithmetic goes
//! through `Decimal` and is rounded back to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per unit
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal
///
/// Non-finite input converts to zero; callers validate first via
/// [`require_finite`].
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp(DECIMAL_PLACES)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 amount to 2 decimal places via Decimal
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Check that a value is finite (not NaN, not Infinity)
pub fn require_finite(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!(
            "{} must be a finite number, got {}",
            field_name, value
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(10.004), 10.0);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite(1.5, "price").is_ok());
        assert!(require_finite(f64::NAN, "price").is_err());
        assert!(require_finite(f64::INFINITY, "price").is_err());
    }

    #[test]
    fn test_decimal_roundtrip() {
        assert_eq!(to_f64(to_decimal(12.345)), 12.35);
        assert_eq!(to_f64(to_decimal(f64::NAN)), 0.0);
    }
}
