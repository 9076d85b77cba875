//! # Discount Pricing
//!
//! A discount is described either by its rate or by its amount; the other is
//! derived. [`DiscountMode`] makes "exactly one is supplied" a type-level fact.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::discount::{discount, DiscountMode};
//!
//! let by_rate = discount(50_000.0, DiscountMode::Rate(20.0)).unwrap();
//! let by_amount = discount(50_000.0, DiscountMode::Amount(10_000.0)).unwrap();
//! assert!((by_rate.final_price - 40_000.0).abs() < 1e-6);
//! assert!((by_amount.discount_rate - 20.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::errors::{CalcError, CalcResult};
use crate::units::Percent;

/// Which side of the discount the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum DiscountMode {
    /// Discount rate in percent (0-100)
    Rate(f64),
    /// Discount amount in currency units
    Amount(f64),
}

/// Result of a discount calculation.
///
/// `final_price = original_price - discount_amount` and `savings = discount_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub original_price: f64,
    /// Discount rate in percent
    pub discount_rate: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub savings: f64,
}

/// Apply a discount to `original`, deriving whichever of rate/amount was not given.
///
/// Fails with `InvalidInput` if the price is not positive, the rate lies
/// outside `[0, 100]`, or the amount is negative or not below the price.
pub fn discount(original: f64, mode: DiscountMode) -> CalcResult<DiscountResult> {
    if !original.is_finite() || original <= 0.0 {
        return Err(CalcError::invalid_input(
            "original_price",
            original.to_string(),
            "Price must be positive",
        ));
    }

    let (rate, amount) = match mode {
        DiscountMode::Rate(rate) => {
            if !(0.0..=100.0).contains(&rate) {
                return Err(CalcError::invalid_input(
                    "discount_rate",
                    rate.to_string(),
                    "Rate must be between 0 and 100",
                ));
            }
            (rate, original * Percent(rate).as_fraction())
        }
        DiscountMode::Amount(amount) => {
            if !amount.is_finite() || amount < 0.0 {
                return Err(CalcError::invalid_input(
                    "discount_amount",
                    amount.to_string(),
                    "Amount cannot be negative",
                ));
            }
            if amount >= original {
                return Err(CalcError::invalid_input(
                    "discount_amount",
                    amount.to_string(),
                    "Amount must be less than the original price",
                ));
            }
            let rate = Percent::from_fraction(safe_div(amount, original, "discount rate")?);
            (rate.0, amount)
        }
    };

    Ok(DiscountResult {
        original_price: original,
        discount_rate: rate,
        discount_amount: amount,
        final_price: original - amount,
        savings: amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rate_mode() {
        let result = discount(100_000.0, DiscountMode::Rate(30.0)).unwrap();
        assert!((result.discount_amount - 30_000.0).abs() < 1e-6);
        assert!((result.final_price - 70_000.0).abs() < 1e-6);
        assert_eq!(result.savings, result.discount_amount);
    }

    #[test]
    fn test_amount_mode() {
        let result = discount(80_000.0, DiscountMode::Amount(20_000.0)).unwrap();
        assert!((result.discount_rate - 25.0).abs() < 1e-9);
        assert_eq!(result.final_price, 60_000.0);
    }

    #[test]
    fn test_full_rate_is_free() {
        let result = discount(10_000.0, DiscountMode::Rate(100.0)).unwrap();
        assert_eq!(result.final_price, 0.0);
    }

    #[test]
    fn test_rejections() {
        assert!(discount(10_000.0, DiscountMode::Rate(100.1)).is_err());
        assert!(discount(10_000.0, DiscountMode::Rate(-1.0)).is_err());
        assert!(discount(10_000.0, DiscountMode::Amount(10_000.0)).is_err());
        assert!(discount(10_000.0, DiscountMode::Amount(-5.0)).is_err());
        assert!(discount(0.0, DiscountMode::Rate(10.0)).is_err());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&DiscountMode::Rate(15.0)).unwrap();
        assert_eq!(json, r#"{"mode":"rate","value":15.0}"#);
    }

    proptest! {
        #[test]
        fn prop_rate_amount_duality(original in 1.0f64..1e9, rate in 0.0f64..100.0) {
            let by_rate = discount(original, DiscountMode::Rate(rate)).unwrap();
            let by_amount = discount(original, DiscountMode::Amount(original * rate / 100.0)).unwrap();
            prop_assert!((by_rate.final_price - by_amount.final_price).abs() < 1e-6 * original);
            prop_assert!((by_rate.discount_rate - by_amount.discount_rate).abs() < 1e-9 * 100.0);
        }
    }
}
