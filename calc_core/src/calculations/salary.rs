//! # Salary Net-Pay Calculator
//!
//! Monthly take-home pay from an annual salary. Deductions are computed on
//! the monthly gross:
//!
//! 1. Social insurance at fixed rates (national pension capped, long-term
//!    care as a surcharge on health insurance)
//! 2. Income tax over `gross - insurance - standard deduction`, floored at zero,
//!    using the payroll bracket table
//! 3. Local income tax as a surtax on income tax
//!
//! This is a simplified estimate, not a withholding-table lookup.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::errors::{CalcError, CalcResult};
use crate::settings::{EngineSettings, PayrollRates};
use crate::tax::{progressive_tax, TaxBracketResult};
use crate::validation::{require_positive, NumericInput};

/// Allowed range for the number of dependents
pub const DEPENDENTS_RANGE: std::ops::RangeInclusive<u32> = 1..=8;

fn default_dependents() -> u32 {
    1
}

/// Raw salary calculator input.
///
/// ## JSON Example
///
/// ```json
/// { "annual_salary": "36,000,000", "dependents": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    pub annual_salary: NumericInput,
    /// Dependents including the employee. Recorded for display; the
    /// simplified tax does not vary with it.
    #[serde(default = "default_dependents")]
    pub dependents: u32,
}

impl Default for SalaryInput {
    fn default() -> Self {
        SalaryInput {
            annual_salary: NumericInput::default(),
            dependents: default_dependents(),
        }
    }
}

impl SalaryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.parse().map(|_| ())
    }

    fn parse(&self) -> CalcResult<f64> {
        let annual = require_positive("annual_salary", &self.annual_salary)?;
        if !DEPENDENTS_RANGE.contains(&self.dependents) {
            return Err(CalcError::invalid_input(
                "dependents",
                self.dependents.to_string(),
                "Dependents must be between 1 and 8",
            ));
        }
        Ok(annual)
    }
}

/// Employee social-insurance contributions for one month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InsuranceBreakdown {
    pub national_pension: f64,
    pub health_insurance: f64,
    pub long_term_care: f64,
    pub employment_insurance: f64,
    pub industrial_accident: f64,
}

impl InsuranceBreakdown {
    pub fn total(&self) -> f64 {
        self.national_pension
            + self.health_insurance
            + self.long_term_care
            + self.employment_insurance
            + self.industrial_accident
    }
}

/// Social-insurance contributions on a monthly gross.
pub fn social_insurance(monthly_gross: f64, rates: &PayrollRates) -> InsuranceBreakdown {
    let health_insurance = monthly_gross * rates.health_insurance_rate;
    InsuranceBreakdown {
        national_pension: (monthly_gross * rates.national_pension_rate).min(rates.national_pension_cap),
        health_insurance,
        long_term_care: health_insurance * rates.long_term_care_rate,
        employment_insurance: monthly_gross * rates.employment_insurance_rate,
        industrial_accident: monthly_gross * rates.industrial_accident_rate,
    }
}

/// Salary calculation result (monthly figures unless noted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub annual_salary: f64,
    pub dependents: u32,
    pub monthly_gross: f64,
    pub insurance_breakdown: InsuranceBreakdown,
    pub total_insurance: f64,
    /// Bracket detail behind `income_tax`
    pub income_tax_detail: TaxBracketResult,
    pub income_tax: f64,
    pub local_tax: f64,
    pub total_tax: f64,
    pub net_monthly: f64,
    pub net_annual: f64,
}

/// Calculate net pay.
pub fn calculate(input: &SalaryInput, settings: &EngineSettings) -> CalcResult<SalaryResult> {
    let annual_salary = input.parse().inspect_err(log_rejection(CalculatorKind::Salary))?;
    let rates = &settings.payroll;

    let monthly_gross = annual_salary / 12.0;
    let insurance = social_insurance(monthly_gross, rates);
    let total_insurance = insurance.total();

    let taxable_base = (monthly_gross - total_insurance - rates.standard_deduction).max(0.0);
    let income_tax_detail = progressive_tax(taxable_base, &rates.income_tax_brackets)?;
    let income_tax = income_tax_detail.total_tax;
    let local_tax = income_tax * rates.local_tax_rate;
    let total_tax = income_tax + local_tax;

    let net_monthly = monthly_gross - total_insurance - total_tax;

    debug!(
        "salary: gross {:.0}/mo insurance {:.0} tax {:.0} net {:.0}",
        monthly_gross, total_insurance, total_tax, net_monthly
    );

    Ok(SalaryResult {
        annual_salary,
        dependents: input.dependents,
        monthly_gross,
        insurance_breakdown: insurance,
        total_insurance,
        income_tax_detail,
        income_tax,
        local_tax,
        total_tax,
        net_monthly,
        net_annual: net_monthly * 12.0,
    })
}

/// [`Calculator`] handle for the salary façade.
pub struct SalaryCalculator;

impl Calculator for SalaryCalculator {
    type Input = SalaryInput;
    type Output = SalaryResult;

    const KIND: CalculatorKind = CalculatorKind::Salary;

    fn calculate(input: &SalaryInput, settings: &EngineSettings) -> CalcResult<SalaryResult> {
        calculate(input, settings)
    }
}
