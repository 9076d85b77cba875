//! # Lottery Prize Calculator
//!
//! Take-home amount of a lottery prize after withholding. The ticket price
//! is deducted as a necessary expense before tax, then the tiered
//! withholding in [`crate::tax::lottery_withholding`] applies.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::lottery::{calculate, LotteryInput, LotteryType};
//! use calc_core::settings::EngineSettings;
//!
//! let input = LotteryInput {
//!     win_amount: "1,000,000,000".into(),
//!     lottery_type: LotteryType::Lotto,
//! };
//! let result = calculate(&input, &EngineSettings::default()).unwrap();
//! assert!((result.take_home - 703_000_330.0).abs() < 1e-3);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::errors::CalcResult;
use crate::settings::EngineSettings;
use crate::tax::{lottery_withholding, TaxBracketResult, WithholdingTier};
use crate::units::Percent;
use crate::validation::{require_positive, NumericInput};

/// Ticket price deducted from every prize
pub const TICKET_PRICE: f64 = 1_000.0;

/// Kind of lottery the prize came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryType {
    #[default]
    Lotto,
    Pension,
    Scratch,
    Other,
}

impl LotteryType {
    pub const ALL: [LotteryType; 4] = [
        LotteryType::Lotto,
        LotteryType::Pension,
        LotteryType::Scratch,
        LotteryType::Other,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            LotteryType::Lotto => "로또 6/45",
            LotteryType::Pension => "연금복권",
            LotteryType::Scratch => "즉석복권",
            LotteryType::Other => "기타 복권",
        }
    }

    /// Price of one ticket, deducted before tax
    pub fn ticket_price(&self) -> f64 {
        TICKET_PRICE
    }
}

/// Raw lottery calculator input.
///
/// ## JSON Example
///
/// ```json
/// { "win_amount": "1,000,000,000", "lottery_type": "lotto" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotteryInput {
    pub win_amount: NumericInput,
    #[serde(default)]
    pub lottery_type: LotteryType,
}

impl LotteryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("win_amount", &self.win_amount).map(|_| ())
    }
}

/// Lottery withholding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryResult {
    pub lottery_type: LotteryType,
    pub win_amount: f64,
    pub ticket_cost: f64,
    /// Prize minus ticket cost
    pub taxable_amount: f64,
    pub tier: WithholdingTier,
    pub withholding: TaxBracketResult,
    /// Tax on the part up to the high threshold
    pub base_tax: f64,
    /// Tax on the excess above the high threshold
    pub excess_tax: f64,
    pub total_tax: f64,
    /// Prize minus total tax
    pub take_home: f64,
    /// Total tax as a percentage of the prize
    pub effective_tax_rate: f64,
}

/// Calculate withholding and take-home amount.
pub fn calculate(input: &LotteryInput, settings: &EngineSettings) -> CalcResult<LotteryResult> {
    let win_amount =
        require_positive("win_amount", &input.win_amount).inspect_err(log_rejection(CalculatorKind::Lottery))?;

    let ticket_cost = input.lottery_type.ticket_price();
    let taxable_amount = win_amount - ticket_cost;
    let withholding = lottery_withholding(taxable_amount, &settings.lottery)?;
    let total_tax = withholding.result.total_tax;

    debug!(
        "lottery: win {:.0} taxable {:.0} tier {:?} tax {:.0}",
        win_amount, taxable_amount, withholding.tier, total_tax
    );

    Ok(LotteryResult {
        lottery_type: input.lottery_type,
        win_amount,
        ticket_cost,
        taxable_amount,
        tier: withholding.tier,
        base_tax: withholding.base_tax(),
        excess_tax: withholding.excess_tax(),
        total_tax,
        take_home: win_amount - total_tax,
        effective_tax_rate: Percent::from_fraction(total_tax / win_amount).0,
        withholding: withholding.result,
    })
}

/// [`Calculator`] handle for the lottery façade.
pub struct LotteryCalculator;

impl Calculator for LotteryCalculator {
    type Input = LotteryInput;
    type Output = LotteryResult;

    const KIND: CalculatorKind = CalculatorKind::Lottery;

    fn calculate(input: &LotteryInput, settings: &EngineSettings) -> CalcResult<LotteryResult> {
        calculate(input, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    fn run(amount: &str) -> CalcResult<LotteryResult> {
        let input = LotteryInput {
            win_amount: amount.into(),
            lottery_type: LotteryType::Lotto,
        };
        calculate(&input, &EngineSettings::default())
    }

    #[test]
    fn test_jackpot_reference() {
        let result = run("1000000000").unwrap();
        assert_eq!(result.taxable_amount, 999_999_000.0);
        assert_eq!(result.tier, WithholdingTier::Progressive);
        assert!((result.base_tax - 66_000_000.0).abs() < 1e-3);
        assert!((result.excess_tax - 230_999_670.0).abs() < 1e-3);
        assert!((result.total_tax - 296_999_670.0).abs() < 1e-3);
        assert!((result.take_home - 703_000_330.0).abs() < 1e-3);
        assert!((result.effective_tax_rate - 29.699967).abs() < 1e-6);
    }

    #[test]
    fn test_small_prize_tax_free() {
        let result = run("5000").unwrap();
        assert_eq!(result.tier, WithholdingTier::TaxFree);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.take_home, 5_000.0);
    }

    #[test]
    fn test_prize_below_ticket_price() {
        let result = run("500").unwrap();
        assert_eq!(result.taxable_amount, -500.0);
        assert_eq!(result.total_tax, 0.0);
        assert!(result.withholding.breakdown.is_empty());
    }

    #[test]
    fn test_mid_prize_flat() {
        // 1,001,000 - 1,000 = 1,000,000 taxable at 22%
        let result = run("1,001,000").unwrap();
        assert_eq!(result.tier, WithholdingTier::Flat);
        assert!((result.total_tax - 220_000.0).abs() < 1e-6);
        assert!((result.take_home - 781_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_rejected() {
        assert!(matches!(run("0"), Err(CalcError::InvalidInput { .. })));
        assert!(matches!(run("lots"), Err(CalcError::InvalidInput { .. })));
        assert_eq!(run("").unwrap_err(), CalcError::missing_field("win_amount"));
    }

    #[test]
    fn test_lottery_type_defaults_when_omitted() {
        let input: LotteryInput = serde_json::from_str(r#"{ "win_amount": 20000 }"#).unwrap();
        assert_eq!(input.lottery_type, LotteryType::Lotto);
        let input: LotteryInput =
            serde_json::from_str(r#"{ "win_amount": 20000, "lottery_type": "scratch" }"#).unwrap();
        assert_eq!(input.lottery_type.name(), "즉석복권");
    }
}
