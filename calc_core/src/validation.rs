//! # Input Validation
//!
//! Raw user input arrives as loosely-typed scalars (text from an input box or
//! a number from a JSON document). Every façade runs these checks before any
//! formula is evaluated; a failed check aborts the calculation with a
//! structured [`CalcError`] naming the field.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::validation::{is_valid_positive_number, is_valid_non_negative_rate, parse_number};
//!
//! assert!(is_valid_positive_number("1,000,000"));
//! assert!(!is_valid_positive_number("0"));
//! assert!(is_valid_non_negative_rate("0"));
//! assert!(!is_valid_non_negative_rate("100.5"));
//! assert_eq!(parse_number(" 12,345.5 "), Some(12345.5));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A user-supplied scalar: either the raw text of an input box or a number.
///
/// Deserializes from either a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Text(String::new())
    }
}

impl NumericInput {
    /// Parse to a finite number, if possible.
    pub fn parse(&self) -> Option<f64> {
        match self {
            NumericInput::Number(n) if n.is_finite() => Some(*n),
            NumericInput::Number(_) => None,
            NumericInput::Text(s) => parse_number(s),
        }
    }

    /// True if the user left the field empty.
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }

    /// Raw representation, used when echoing a rejected value back.
    pub fn raw(&self) -> String {
        match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

/// Parse user text into a finite number.
///
/// Surrounding whitespace and thousands separators (`,`) are ignored.
/// Returns `None` for empty, unparsable, or non-finite input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// True iff the text parses to a finite number `> 0`.
pub fn is_valid_positive_number(raw: &str) -> bool {
    parse_number(raw).is_some_and(|n| n > 0.0)
}

/// True iff the text parses to a finite number in `[0, 100]`.
pub fn is_valid_non_negative_rate(raw: &str) -> bool {
    parse_number(raw).is_some_and(|n| (0.0..=100.0).contains(&n))
}

/// True iff the text parses to a finite number `>= 0`.
pub fn is_valid_non_negative_number(raw: &str) -> bool {
    parse_number(raw).is_some_and(|n| n >= 0.0)
}

fn parse_field(field: &str, input: &NumericInput) -> CalcResult<f64> {
    if input.is_blank() {
        return Err(CalcError::missing_field(field));
    }
    input
        .parse()
        .ok_or_else(|| CalcError::invalid_input(field, input.raw(), "Not a valid number"))
}

/// Parse a field that must be strictly positive.
pub fn require_positive(field: &str, input: &NumericInput) -> CalcResult<f64> {
    let value = parse_field(field, input)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, input.raw(), "Value must be positive"));
    }
    Ok(value)
}

/// Parse a percentage field that must lie in `[0, 100]`.
pub fn require_rate(field: &str, input: &NumericInput) -> CalcResult<f64> {
    let value = parse_field(field, input)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            input.raw(),
            "Rate must be between 0 and 100",
        ));
    }
    Ok(value)
}

/// Parse a field that must be zero or greater.
pub fn require_non_negative(field: &str, input: &NumericInput) -> CalcResult<f64> {
    let value = parse_field(field, input)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, input.raw(), "Value cannot be negative"));
    }
    Ok(value)
}

/// Like [`require_non_negative`], but a blank field counts as zero.
pub fn optional_non_negative(field: &str, input: &NumericInput) -> CalcResult<f64> {
    if input.is_blank() {
        return Ok(0.0);
    }
    require_non_negative(field, input)
}
