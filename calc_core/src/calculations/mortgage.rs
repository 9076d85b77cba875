//! # Mortgage Calculator
//!
//! Wraps the [`crate::amortization`] engine: validates raw input, generates
//! the full schedule, reports full-term totals, and keeps only the first
//! `schedule_display_months` rows for display.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::amortization::RepaymentType;
//! use calc_core::calculations::mortgage::{calculate, MortgageInput};
//! use calc_core::settings::EngineSettings;
//!
//! let input = MortgageInput {
//!     principal: "300,000,000".into(),
//!     annual_rate_percent: "3.5".into(),
//!     term_years: "30".into(),
//!     repayment_type: RepaymentType::EqualInstallment,
//! };
//! let result = calculate(&input, &EngineSettings::default()).unwrap();
//! assert_eq!(result.schedule.len(), 12);
//! assert_eq!(result.total_months, 360);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::amortization::{amortize, LoanPayment, LoanTerms, RepaymentType};
use crate::errors::CalcResult;
use crate::settings::EngineSettings;
use crate::validation::{require_positive, require_rate, NumericInput};

/// Raw mortgage calculator input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "principal": "300,000,000",
///   "annual_rate_percent": 3.5,
///   "term_years": 30,
///   "repayment_type": "EQUAL_PRINCIPAL"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub principal: NumericInput,
    pub annual_rate_percent: NumericInput,
    pub term_years: NumericInput,
    #[serde(default)]
    pub repayment_type: RepaymentType,
}

impl MortgageInput {
    /// Parse and validate into loan terms.
    pub fn to_terms(&self) -> CalcResult<LoanTerms> {
        let principal = require_positive("principal", &self.principal)?;
        let rate = require_rate("annual_rate_percent", &self.annual_rate_percent)?;
        let years = require_positive("term_years", &self.term_years)?;
        LoanTerms::from_years(principal, rate, years, self.repayment_type)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.to_terms().map(|_| ())
    }
}

/// Mortgage calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub repayment_type: RepaymentType,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub total_months: u32,
    pub first_month_payment: f64,
    /// Payment in the final month of the term
    pub last_month_payment: f64,
    /// Interest over the full term
    pub total_interest: f64,
    /// Principal plus interest over the full term
    pub total_payment: f64,
    /// Leading rows of the schedule, for display
    pub schedule: Vec<LoanPayment>,
}

/// Calculate the repayment schedule.
pub fn calculate(input: &MortgageInput, settings: &EngineSettings) -> CalcResult<MortgageResult> {
    let terms = input.to_terms().inspect_err(log_rejection(CalculatorKind::Mortgage))?;
    let schedule = amortize(&terms)?;

    let result = MortgageResult {
        repayment_type: terms.repayment_type,
        principal: terms.principal,
        annual_rate_percent: terms.annual_rate_percent,
        total_months: terms.total_months,
        first_month_payment: schedule.first_month_payment(),
        last_month_payment: schedule.payments.last().map(|p| p.total_payment).unwrap_or(0.0),
        total_interest: schedule.total_interest(),
        total_payment: schedule.total_payment(),
        schedule: schedule.truncated(settings.schedule_display_months as usize),
    };

    debug!(
        "mortgage: {:?} {:.0} @ {}% x {}mo -> first {:.0}, interest {:.0}",
        terms.repayment_type,
        terms.principal,
        terms.annual_rate_percent,
        terms.total_months,
        result.first_month_payment,
        result.total_interest
    );

    Ok(result)
}

/// [`Calculator`] handle for the mortgage façade.
pub struct MortgageCalculator;

impl Calculator for MortgageCalculator {
    type Input = MortgageInput;
    type Output = MortgageResult;

    const KIND: CalculatorKind = CalculatorKind::Mortgage;

    fn calculate(input: &MortgageInput, settings: &EngineSettings) -> CalcResult<MortgageResult> {
        calculate(input, settings)
    }
}
