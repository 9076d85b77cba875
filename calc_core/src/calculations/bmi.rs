//! # BMI Calculator
//!
//! Body-mass index with category, ideal-weight range, and the distance from
//! the middle of that range.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bmi::{calculate, BmiInput};
//! use calc_core::formulas::BmiCategory;
//!
//! let input = BmiInput {
//!     height_cm: "170".into(),
//!     weight_kg: 65.0.into(),
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.category, BmiCategory::Normal);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::errors::CalcResult;
use crate::formulas::bmi::{bmi, bmi_category, ideal_weight_range, BmiCategory};
use crate::settings::EngineSettings;
use crate::units::{Centimeters, Kilograms};
use crate::validation::{require_positive, NumericInput};

/// Raw BMI calculator input.
///
/// ## JSON Example
///
/// ```json
/// { "height_cm": "170", "weight_kg": 65 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub height_cm: NumericInput,
    pub weight_kg: NumericInput,
}

impl BmiInput {
    /// Parse and validate both fields.
    pub fn parse(&self) -> CalcResult<(Centimeters, Kilograms)> {
        let height = require_positive("height_cm", &self.height_cm)?;
        let weight = require_positive("weight_kg", &self.weight_kg)?;
        Ok((Centimeters(height), Kilograms(weight)))
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.parse().map(|_| ())
    }
}

/// BMI calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    /// Weight at BMI 18.5 for this height (kg)
    pub ideal_weight_min: f64,
    /// Weight at BMI 22.9 for this height (kg)
    pub ideal_weight_max: f64,
    /// Current weight minus the midpoint of the ideal range (kg)
    pub weight_difference: f64,
}

/// Calculate BMI.
pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    let (height, weight) = input.parse().inspect_err(log_rejection(CalculatorKind::Bmi))?;

    let value = bmi(height, weight)?;
    let category = bmi_category(value);
    let ideal = ideal_weight_range(height);

    debug!("bmi: {:.1}cm {:.1}kg -> {:.2} ({:?})", height.0, weight.0, value, category);

    Ok(BmiResult {
        height_cm: height.0,
        weight_kg: weight.0,
        bmi: value,
        category,
        ideal_weight_min: ideal.min,
        ideal_weight_max: ideal.max,
        weight_difference: weight.0 - ideal.midpoint(),
    })
}

/// [`Calculator`] handle for the BMI façade.
pub struct BmiCalculator;

impl Calculator for BmiCalculator {
    type Input = BmiInput;
    type Output = BmiResult;

    const KIND: CalculatorKind = CalculatorKind::Bmi;

    fn calculate(input: &BmiInput, _settings: &EngineSettings) -> CalcResult<BmiResult> {
        calculate(input)
    }
}
