//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64`, but every calculation goes
//! through `Decimal` so repeated arithmetic cannot accumulate float error.
//! Payment amounts leave this module as integer minor units (cents), which
//! is the unit the payment processor expects.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input cannot come from our own storage, only from a caller
/// that skipped validation. Log it and treat it as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal's full range sits well inside f64's representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Line total for an order: unit_price * quantity, rounded to 2 decimal places
pub fn order_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Charge amount in minor units (cents): unit_price * quantity * 100
///
/// Returns `None` when the price is not a finite number, so callers can
/// reject the request before contacting the payment processor.
pub fn to_minor_units(unit_price: f64, quantity: i64) -> Option<i64> {
    let amount = Decimal::from_f64(unit_price)? * Decimal::from(quantity) * Decimal::from(100);
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_exact() {
        assert_eq!(to_minor_units(12.50, 3), Some(3750));
        assert_eq!(to_minor_units(19.99, 2), Some(3998));
        assert_eq!(to_minor_units(0.0, 5), Some(0));
    }

    #[test]
    fn minor_units_rejects_non_finite() {
        assert_eq!(to_minor_units(f64::NAN, 1), None);
        assert_eq!(to_minor_units(f64::INFINITY, 2), None);
    }

    #[test]
    fn order_total_rounds_to_cents() {
        assert_eq!(order_total(12.50, 3), 37.50);
        assert_eq!(order_total(19.99, 2), 39.98);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 10.005 as an exact Decimal, not via f64
        let value = Decimal::new(10_005, 3);
        assert_eq!(to_f64(value), 10.01);
        assert_eq!(to_f64(-value), -10.01);
    }

    #[test]
    fn non_finite_defaults_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
