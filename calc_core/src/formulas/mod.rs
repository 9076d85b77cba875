//! # Formula Library
//!
//! Stateless pure functions behind the calculators. Each function takes its
//! inputs by value or shared reference and returns a fresh value; nothing is
//! cached between calls.
//!
//! - [`bmi`] - Body-mass index, category table, ideal-weight range
//! - [`discount`] - Discount rate/amount duality
//! - [`cost_basis`] - Weighted-average cost of a stock position
//! - [`growth`] - Compound growth

pub mod bmi;
pub mod cost_basis;
pub mod discount;
pub mod growth;

pub use bmi::{bmi, bmi_category, ideal_weight_range, BmiCategory, WeightRange};
pub use cost_basis::{
    weighted_average_cost, StockPosition, StockTransaction, TransactionKind, QUANTITY_THRESHOLD,
};
pub use discount::{discount, DiscountMode, DiscountResult};
pub use growth::compound_growth;

use crate::errors::{CalcError, CalcResult};

/// Divide, refusing zero or non-finite denominators.
///
/// Façades validate inputs before reaching here, so tripping this guard means
/// a formula was called directly with a degenerate value.
pub fn safe_div(numerator: f64, denominator: f64, operation: &str) -> CalcResult<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(CalcError::division_guard(operation));
    }
    let quotient = numerator / denominator;
    if !quotient.is_finite() {
        return Err(CalcError::division_guard(operation));
    }
    Ok(quotient)
}
