//! # Compound Growth

use crate::errors::{CalcError, CalcResult};
use crate::units::Percent;

/// Value of `principal` after `periods` compounding periods at `rate` per period.
///
/// `principal * (1 + rate)^periods`. A rate of -100% or below is rejected.
pub fn compound_growth(principal: f64, rate: Percent, periods: u32) -> CalcResult<f64> {
    let factor = 1.0 + rate.as_fraction();
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "rate",
            rate.0.to_string(),
            "Rate must be greater than -100%",
        ));
    }
    Ok(principal * factor.powf(f64::from(periods)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_growth() {
        let value = compound_growth(1_000_000.0, Percent(5.0), 2).unwrap();
        assert!((value - 1_102_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_periods_is_principal() {
        assert_eq!(compound_growth(500.0, Percent(10.0), 0).unwrap(), 500.0);
    }

    #[test]
    fn test_total_loss_rejected() {
        assert!(compound_growth(500.0, Percent(-100.0), 3).is_err());
    }
}
