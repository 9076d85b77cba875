//! # Discount Calculator
//!
//! The user enters the original price and either a discount rate or a
//! discount amount; [`crate::formulas::discount`] derives the rest.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::errors::CalcResult;
use crate::formulas::discount::{discount, DiscountMode, DiscountResult};
use crate::settings::EngineSettings;
use crate::validation::{require_non_negative, require_positive, require_rate, NumericInput};

/// Which field the user filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountInputMode {
    #[default]
    Rate,
    Amount,
}

/// Raw discount calculator input.
///
/// ## JSON Example
///
/// ```json
/// { "original_price": "100,000", "mode": "rate", "value": "30" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountInput {
    pub original_price: NumericInput,
    #[serde(default)]
    pub mode: DiscountInputMode,
    /// Rate in percent or amount in currency, depending on `mode`
    pub value: NumericInput,
}

impl DiscountInput {
    /// Switch to rate mode with one of the quick-pick presets.
    pub fn apply_preset(&mut self, preset_rate: f64) {
        self.mode = DiscountInputMode::Rate;
        self.value = NumericInput::Number(preset_rate);
    }

    /// Parse the price and the user-supplied side of the discount.
    pub fn parse(&self) -> CalcResult<(f64, DiscountMode)> {
        let price = require_positive("original_price", &self.original_price)?;
        let mode = match self.mode {
            DiscountInputMode::Rate => DiscountMode::Rate(require_rate("discount_rate", &self.value)?),
            DiscountInputMode::Amount => {
                DiscountMode::Amount(require_non_negative("discount_amount", &self.value)?)
            }
        };
        Ok((price, mode))
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let (price, mode) = self.parse()?;
        discount(price, mode).map(|_| ())
    }
}

/// Calculate the discounted price.
pub fn calculate(input: &DiscountInput) -> CalcResult<DiscountResult> {
    let reject = log_rejection(CalculatorKind::Discount);
    let (price, mode) = input.parse().inspect_err(&reject)?;
    let result = discount(price, mode).inspect_err(&reject)?;

    debug!(
        "discount: {:.0} - {:.1}% = {:.0}",
        result.original_price, result.discount_rate, result.final_price
    );
    Ok(result)
}

/// [`Calculator`] handle for the discount façade.
pub struct DiscountCalculator;

impl Calculator for DiscountCalculator {
    type Input = DiscountInput;
    type Output = DiscountResult;

    const KIND: CalculatorKind = CalculatorKind::Discount;

    fn calculate(input: &DiscountInput, _settings: &EngineSettings) -> CalcResult<DiscountResult> {
        calculate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_rate_mode() {
        let input = DiscountInput {
            original_price: "100,000".into(),
            mode: DiscountInputMode::Rate,
            value: "30".into(),
        };
        let result = calculate(&input).unwrap();
        assert!((result.final_price - 70_000.0).abs() < 1e-6);
        assert_eq!(result.savings, result.discount_amount);
    }

    #[test]
    fn test_amount_mode() {
        let input = DiscountInput {
            original_price: 80_000.0.into(),
            mode: DiscountInputMode::Amount,
            value: 12_000.0.into(),
        };
        let result = calculate(&input).unwrap();
        assert!((result.discount_rate - 15.0).abs() < 1e-9);
        assert_eq!(result.final_price, 68_000.0);
    }

    #[test]
    fn test_presets_from_settings() {
        let settings = EngineSettings::default();
        let mut input = DiscountInput {
            original_price: "20000".into(),
            mode: DiscountInputMode::Amount,
            value: "500".into(),
        };
        for preset in &settings.discount_presets {
            input.apply_preset(*preset);
            assert_eq!(input.mode, DiscountInputMode::Rate);
            let result = calculate(&input).unwrap();
            assert!((result.discount_rate - preset).abs() < 1e-12);
        }
    }

    #[test]
    fn test_amount_not_below_price_rejected() {
        let input = DiscountInput {
            original_price: "10000".into(),
            mode: DiscountInputMode::Amount,
            value: "10000".into(),
        };
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "discount_amount"
        ));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rate_over_hundred_rejected() {
        let input = DiscountInput {
            original_price: "10000".into(),
            mode: DiscountInputMode::Rate,
            value: "150".into(),
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_mode_defaults_to_rate() {
        let input: DiscountInput =
            serde_json::from_str(r#"{ "original_price": 5000, "value": 10 }"#).unwrap();
        assert_eq!(input.mode, DiscountInputMode::Rate);
    }
}
