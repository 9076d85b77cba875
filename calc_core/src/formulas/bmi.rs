//! # Body-Mass Index
//!
//! BMI = weight (kg) / height (m)², classified on the Asia-Pacific cut-offs.
//! The category table is a fixed partition of `[0, ∞)` into half-open
//! intervals; a value sitting exactly on a cut-off belongs to the upper
//! category.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::bmi::{bmi, bmi_category, BmiCategory};
//! use calc_core::units::{Centimeters, Kilograms};
//!
//! let value = bmi(Centimeters(170.0), Kilograms(65.0)).unwrap();
//! assert!((value - 22.49).abs() < 0.01);
//! assert_eq!(bmi_category(value), BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Kilograms, Meters};

/// Lower BMI bound of the "normal" band, used for the ideal-weight minimum
pub const IDEAL_BMI_MIN: f64 = 18.5;

/// Upper BMI bound used for the ideal-weight maximum
pub const IDEAL_BMI_MAX: f64 = 22.9;

/// BMI classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BmiCategory {
    Under,
    Normal,
    Over,
    ObeseMild,
    ObeseModerate,
    ObeseSevere,
}

/// Lower bound of each category, ascending. Each interval runs up to the next
/// entry's bound (exclusive); the last is unbounded.
const CATEGORY_TABLE: [(f64, BmiCategory); 6] = [
    (0.0, BmiCategory::Under),
    (18.5, BmiCategory::Normal),
    (23.0, BmiCategory::Over),
    (25.0, BmiCategory::ObeseMild),
    (30.0, BmiCategory::ObeseModerate),
    (35.0, BmiCategory::ObeseSevere),
];

impl BmiCategory {
    /// All categories in ascending order
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Under,
        BmiCategory::Normal,
        BmiCategory::Over,
        BmiCategory::ObeseMild,
        BmiCategory::ObeseModerate,
        BmiCategory::ObeseSevere,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Under => "저체중",
            BmiCategory::Normal => "정상체중",
            BmiCategory::Over => "과체중",
            BmiCategory::ObeseMild => "경도비만",
            BmiCategory::ObeseModerate => "중등도비만",
            BmiCategory::ObeseSevere => "고도비만",
        }
    }

    /// Half-open BMI interval `[lower, upper)` covered by this category.
    pub fn range(&self) -> (f64, f64) {
        let index = CATEGORY_TABLE
            .iter()
            .position(|(_, category)| category == self)
            .unwrap_or(0);
        let lower = CATEGORY_TABLE[index].0;
        let upper = CATEGORY_TABLE
            .get(index + 1)
            .map(|(bound, _)| *bound)
            .unwrap_or(f64::INFINITY);
        (lower, upper)
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ideal weight range in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    /// Midpoint of the range
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Compute BMI from height and weight.
///
/// Fails with `InvalidInput` if height is not positive.
pub fn bmi(height: Centimeters, weight: Kilograms) -> CalcResult<f64> {
    if !height.0.is_finite() || height.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "height_cm",
            height.0.to_string(),
            "Height must be positive",
        ));
    }
    let height_m: Meters = height.into();
    safe_div(weight.0, height_m.squared(), "bmi")
}

/// Classify a BMI value.
///
/// Values below zero (or NaN) fall into [`BmiCategory::Under`].
pub fn bmi_category(bmi: f64) -> BmiCategory {
    CATEGORY_TABLE
        .iter()
        .rev()
        .find(|(lower, _)| bmi >= *lower)
        .map(|(_, category)| *category)
        .unwrap_or(BmiCategory::Under)
}

/// Weight range corresponding to BMI 18.5-22.9 at the given height.
pub fn ideal_weight_range(height: Centimeters) -> WeightRange {
    let h2 = Meters::from(height).squared();
    WeightRange {
        min: IDEAL_BMI_MIN * h2,
        max: IDEAL_BMI_MAX * h2,
    }
}
