//! # Amortization Engine
//!
//! Generates a month-by-month loan repayment schedule under one of two
//! repayment policies:
//!
//! - **Equal installment** (원리금균등): constant total payment from the
//!   annuity formula `P·r·(1+r)^n / ((1+r)^n - 1)`, or `P/n` when `r = 0`.
//! - **Equal principal** (원금균등): constant principal `P/n`; interest is
//!   charged on the declining balance so the total payment shrinks.
//!
//! The final month repays whatever balance remains, so cumulative principal
//! equals the loan amount and the last remaining balance is exactly zero.
//! Totals always cover the full term; [`AmortizationSchedule::truncated`]
//! is for display only.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::amortization::{amortize, LoanTerms, RepaymentType};
//!
//! let terms = LoanTerms::from_years(300_000_000.0, 3.5, 30.0, RepaymentType::EqualInstallment).unwrap();
//! let schedule = amortize(&terms).unwrap();
//! assert_eq!(schedule.payments.len(), 360);
//! assert!((schedule.first_month_payment() - 1_347_134.06).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Percent;

/// Longest supported term (100 years).
pub const MAX_TERM_MONTHS: u32 = 1_200;

/// Repayment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentType {
    /// Constant total monthly payment
    #[default]
    #[serde(alias = "equal_installment")]
    EqualInstallment,
    /// Constant monthly principal
    #[serde(alias = "equal_principal")]
    EqualPrincipal,
}

impl RepaymentType {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentType::EqualInstallment => "원리금균등",
            RepaymentType::EqualPrincipal => "원금균등",
        }
    }
}

impl std::fmt::Display for RepaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validated loan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual interest rate in percent (3.5 = 3.5%)
    pub annual_rate_percent: f64,
    pub total_months: u32,
    pub repayment_type: RepaymentType,
}

impl LoanTerms {
    /// Build terms from a term in years.
    ///
    /// The month count is `term_years * 12` rounded to the nearest month and
    /// must lie in `1..=MAX_TERM_MONTHS`.
    pub fn from_years(
        principal: f64,
        annual_rate_percent: f64,
        term_years: f64,
        repayment_type: RepaymentType,
    ) -> CalcResult<Self> {
        if !term_years.is_finite() || term_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "term_years",
                term_years.to_string(),
                "Term must be positive",
            ));
        }
        let months = (term_years * 12.0).round();
        if months < 1.0 {
            return Err(CalcError::invalid_input(
                "term_years",
                term_years.to_string(),
                "Term must cover at least one month",
            ));
        }
        if months > f64::from(MAX_TERM_MONTHS) {
            return Err(CalcError::invalid_input(
                "term_years",
                term_years.to_string(),
                format!("Term cannot exceed {} years", MAX_TERM_MONTHS / 12),
            ));
        }
        let terms = LoanTerms {
            principal,
            annual_rate_percent,
            total_months: months as u32,
            repayment_type,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Validate the parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Principal must be positive",
            ));
        }
        if !(0.0..=100.0).contains(&self.annual_rate_percent) {
            return Err(CalcError::invalid_input(
                "annual_rate_percent",
                self.annual_rate_percent.to_string(),
                "Rate must be between 0 and 100",
            ));
        }
        if self.total_months == 0 {
            return Err(CalcError::invalid_input(
                "total_months",
                "0",
                "Term must cover at least one month",
            ));
        }
        if self.total_months > MAX_TERM_MONTHS {
            return Err(CalcError::invalid_input(
                "total_months",
                self.total_months.to_string(),
                format!("Term cannot exceed {MAX_TERM_MONTHS} months"),
            ));
        }
        Ok(())
    }

    /// Monthly interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        Percent(self.annual_rate_percent).as_fraction() / 12.0
    }
}

/// One month of the schedule.
///
/// `total_payment = principal_payment + interest_payment`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanPayment {
    /// 1-based month number
    pub month: u32,
    pub total_payment: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    /// Balance after this month's payment
    pub remaining_balance: f64,
}

/// Full repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub repayment_type: RepaymentType,
    pub payments: Vec<LoanPayment>,
}

impl AmortizationSchedule {
    /// Total payment in the first month
    pub fn first_month_payment(&self) -> f64 {
        self.payments.first().map(|p| p.total_payment).unwrap_or(0.0)
    }

    /// Interest paid over the full term
    pub fn total_interest(&self) -> f64 {
        self.payments.iter().map(|p| p.interest_payment).sum()
    }

    /// Principal repaid over the full term
    pub fn total_principal(&self) -> f64 {
        self.payments.iter().map(|p| p.principal_payment).sum()
    }

    /// Everything paid over the full term
    pub fn total_payment(&self) -> f64 {
        self.payments.iter().map(|p| p.total_payment).sum()
    }

    /// The first `months` payments (or all of them if the term is shorter)
    pub fn truncated(&self, months: usize) -> Vec<LoanPayment> {
        self.payments.iter().take(months).copied().collect()
    }
}

/// Constant monthly payment for an equal-installment loan.
///
/// Falls back to straight-line `P/n` when the rate is zero or too small for
/// the annuity denominator to be distinguishable from zero.
pub fn monthly_installment(principal: f64, monthly_rate: f64, months: u32) -> CalcResult<f64> {
    if months == 0 {
        return Err(CalcError::division_guard("monthly installment"));
    }
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return Ok(principal / n);
    }
    let growth = (1.0 + monthly_rate).powf(n);
    let denominator = growth - 1.0;
    if denominator <= 0.0 || !growth.is_finite() {
        return Ok(principal / n);
    }
    Ok(principal * monthly_rate * growth / denominator)
}

/// Generate the full schedule for `terms`.
pub fn amortize(terms: &LoanTerms) -> CalcResult<AmortizationSchedule> {
    terms.validate()?;

    let rate = terms.monthly_rate();
    let months = terms.total_months;
    let level_amount = match terms.repayment_type {
        RepaymentType::EqualInstallment => monthly_installment(terms.principal, rate, months)?,
        RepaymentType::EqualPrincipal => terms.principal / f64::from(months),
    };

    let mut balance = terms.principal;
    let mut payments = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest_payment = balance * rate;
        let scheduled_principal = match terms.repayment_type {
            RepaymentType::EqualInstallment => level_amount - interest_payment,
            RepaymentType::EqualPrincipal => level_amount,
        };
        // Last month clears the balance and absorbs rounding drift.
        let principal_payment = if month == months {
            balance
        } else {
            scheduled_principal.clamp(0.0, balance)
        };
        balance = if month == months {
            0.0
        } else {
            (balance - principal_payment).max(0.0)
        };

        payments.push(LoanPayment {
            month,
            total_payment: principal_payment + interest_payment,
            principal_payment,
            interest_payment,
            remaining_balance: balance,
        });
    }

    Ok(AmortizationSchedule {
        repayment_type: terms.repayment_type,
        payments,
    })
}
