//! # Calculators
//!
//! One façade per calculator. Each follows the pattern:
//!
//! - `*Input` - Raw user input (loosely-typed numbers, JSON-serializable)
//! - `*Result` - Immutable result record (JSON-serializable)
//! - `calculate(input, ...) -> Result<*Result, CalcError>` - Validates, then
//!   runs the formulas
//!
//! Validation always completes before any formula runs, so a rejected input
//! never yields a partial result.
//!
//! ## Available Calculators
//!
//! - [`stock_average`] - Weighted-average cost of a stock position
//! - [`lottery`] - Prize withholding and take-home amount
//! - [`salary`] - Monthly net pay from annual salary
//! - [`mortgage`] - Loan repayment schedule
//! - [`discount`] - Discount rate/amount
//! - [`bmi`] - Body-mass index

pub mod bmi;
pub mod discount;
pub mod lottery;
pub mod mortgage;
pub mod salary;
pub mod stock_average;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::EngineSettings;

// Re-export commonly used types
pub use bmi::{BmiInput, BmiResult};
pub use discount::{DiscountInput, DiscountInputMode};
pub use lottery::{LotteryInput, LotteryResult, LotteryType};
pub use mortgage::{MortgageInput, MortgageResult};
pub use salary::{InsuranceBreakdown, SalaryInput, SalaryResult};
pub use stock_average::{StockAverageInput, StockAverageResult, TransactionInput};

/// Sidebar grouping of calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorCategory {
    Finance,
    Loan,
    Life,
    Health,
}

impl CalculatorCategory {
    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            CalculatorCategory::Finance => "금융/투자 계산기",
            CalculatorCategory::Loan => "대출/부동산 계산기",
            CalculatorCategory::Life => "생활/소비 계산기",
            CalculatorCategory::Health => "건강/운동 계산기",
        }
    }
}

/// Catalogue of the available calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    StockAverage,
    Lottery,
    Salary,
    Mortgage,
    Discount,
    Bmi,
}

impl CalculatorKind {
    /// Every calculator, in menu order
    pub const ALL: [CalculatorKind; 6] = [
        CalculatorKind::StockAverage,
        CalculatorKind::Lottery,
        CalculatorKind::Salary,
        CalculatorKind::Mortgage,
        CalculatorKind::Discount,
        CalculatorKind::Bmi,
    ];

    /// Stable identifier (also the route slug)
    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::StockAverage => "stock-average",
            CalculatorKind::Lottery => "lottery",
            CalculatorKind::Salary => "salary",
            CalculatorKind::Mortgage => "mortgage",
            CalculatorKind::Discount => "discount",
            CalculatorKind::Bmi => "bmi",
        }
    }

    /// Look up a calculator by identifier
    pub fn from_id(id: &str) -> Option<CalculatorKind> {
        CalculatorKind::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::StockAverage => "주식 평단가 계산기",
            CalculatorKind::Lottery => "로또 실수령액 계산기",
            CalculatorKind::Salary => "연봉 실수령액 계산기",
            CalculatorKind::Mortgage => "주택담보대출 계산기",
            CalculatorKind::Discount => "할인율 계산기",
            CalculatorKind::Bmi => "BMI 계산기",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::StockAverage => "매수/매도 시 평균 단가를 계산합니다",
            CalculatorKind::Lottery => "복권 당첨금의 세후 실수령액을 계산합니다",
            CalculatorKind::Salary => "연봉 대비 월 실수령액을 계산합니다",
            CalculatorKind::Mortgage => "대출 원리금 상환액을 계산합니다",
            CalculatorKind::Discount => "할인된 가격을 계산합니다",
            CalculatorKind::Bmi => "체질량지수를 계산합니다",
        }
    }

    pub fn category(&self) -> CalculatorCategory {
        match self {
            CalculatorKind::StockAverage | CalculatorKind::Lottery | CalculatorKind::Salary => {
                CalculatorCategory::Finance
            }
            CalculatorKind::Mortgage => CalculatorCategory::Loan,
            CalculatorKind::Discount => CalculatorCategory::Life,
            CalculatorKind::Bmi => CalculatorCategory::Health,
        }
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Common entry point implemented by every calculator.
///
/// Lets caller-side state (see [`crate::session::Session`]) be written once
/// for all calculators.
pub trait Calculator {
    type Input: Default + Clone;
    type Output: Clone;

    const KIND: CalculatorKind;

    fn calculate(input: &Self::Input, settings: &EngineSettings) -> CalcResult<Self::Output>;
}

/// Log a rejected input. Used with `Result::inspect_err` by the façades.
pub(crate) fn log_rejection(kind: CalculatorKind) -> impl Fn(&CalcError) {
    move |err| warn!("{} rejected input: {}", kind.id(), err)
}

/// Enum wrapper for all calculator inputs.
///
/// Lets a single JSON document drive any calculator:
///
/// ```json
/// { "type": "bmi", "height_cm": "170", "weight_kg": 65 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationItem {
    StockAverage(StockAverageInput),
    Lottery(LotteryInput),
    Salary(SalaryInput),
    Mortgage(MortgageInput),
    Discount(DiscountInput),
    Bmi(BmiInput),
}

impl CalculationItem {
    /// Which calculator this input is for
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::StockAverage(_) => CalculatorKind::StockAverage,
            CalculationItem::Lottery(_) => CalculatorKind::Lottery,
            CalculationItem::Salary(_) => CalculatorKind::Salary,
            CalculationItem::Mortgage(_) => CalculatorKind::Mortgage,
            CalculationItem::Discount(_) => CalculatorKind::Discount,
            CalculationItem::Bmi(_) => CalculatorKind::Bmi,
        }
    }
}

/// Result of any calculator, tagged like [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationOutcome {
    StockAverage(StockAverageResult),
    Lottery(LotteryResult),
    Salary(SalaryResult),
    Mortgage(MortgageResult),
    Discount(crate::formulas::DiscountResult),
    Bmi(BmiResult),
}

impl CalculationOutcome {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutcome::StockAverage(_) => CalculatorKind::StockAverage,
            CalculationOutcome::Lottery(_) => CalculatorKind::Lottery,
            CalculationOutcome::Salary(_) => CalculatorKind::Salary,
            CalculationOutcome::Mortgage(_) => CalculatorKind::Mortgage,
            CalculationOutcome::Discount(_) => CalculatorKind::Discount,
            CalculationOutcome::Bmi(_) => CalculatorKind::Bmi,
        }
    }
}

/// Run whichever calculator `item` targets.
pub fn calculate_item(item: &CalculationItem, settings: &EngineSettings) -> CalcResult<CalculationOutcome> {
    Ok(match item {
        CalculationItem::StockAverage(input) => {
            CalculationOutcome::StockAverage(stock_average::calculate(input)?)
        }
        CalculationItem::Lottery(input) => CalculationOutcome::Lottery(lottery::calculate(input, settings)?),
        CalculationItem::Salary(input) => CalculationOutcome::Salary(salary::calculate(input, settings)?),
        CalculationItem::Mortgage(input) => CalculationOutcome::Mortgage(mortgage::calculate(input, settings)?),
        CalculationItem::Discount(input) => CalculationOutcome::Discount(discount::calculate(input)?),
        CalculationItem::Bmi(input) => CalculationOutcome::Bmi(bmi::calculate(input)?),
    })
}
