//! # Progressive Tax Evaluator
//!
//! Two evaluators share the same result shape ([`TaxBracketResult`]):
//!
//! - [`progressive_tax`] - textbook marginal brackets. Each bracket's rate
//!   applies only to the slice of the base that falls inside it.
//! - [`lottery_withholding`] - prize withholding, which is *not* purely
//!   marginal: up to the high threshold the flat rate applies to the whole
//!   taxable base, and only the excess above it is taxed at the high rate.
//!   Modelled as an explicit three-way branch.
//!
//! In both cases `total_tax` is the sum of `tax_in_bracket` over the
//! breakdown, and breakdown entries appear in ascending bracket order.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::tax::{lottery_withholding, LotteryTaxTable, WithholdingTier};
//!
//! let table = LotteryTaxTable::default();
//! let w = lottery_withholding(999_999_000.0, &table).unwrap();
//! assert_eq!(w.tier, WithholdingTier::Progressive);
//! assert!((w.result.total_tax - 296_999_670.0).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Prize amounts at or below this are not withheld
pub const LOTTERY_TAX_FREE_CEILING: f64 = 50_000.0;

/// Withholding rate (income tax 20% + local tax 2%) up to the high threshold
pub const LOTTERY_FLAT_RATE: f64 = 0.22;

/// Taxable amount above which the excess is withheld at the high rate
pub const LOTTERY_HIGH_THRESHOLD: f64 = 300_000_000.0;

/// Withholding rate (income tax 30% + local tax 3%) on the excess
pub const LOTTERY_HIGH_RATE: f64 = 0.33;

/// One marginal bracket: `rate` applies from `threshold` up to the next
/// bracket's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive)
    pub threshold: f64,
    /// Marginal rate as a fraction (0.06 = 6%)
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(threshold: f64, rate: f64) -> Self {
        TaxBracket { threshold, rate }
    }
}

/// Portion of the base taxed within one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub bracket_label: String,
    pub amount_in_bracket: f64,
    /// Rate as a fraction
    pub rate: f64,
    pub tax_in_bracket: f64,
}

/// Tax computed over an ordered bracket table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracketResult {
    pub taxable_amount: f64,
    pub total_tax: f64,
    pub breakdown: Vec<BracketBreakdown>,
}

impl TaxBracketResult {
    fn from_breakdown(taxable_amount: f64, breakdown: Vec<BracketBreakdown>) -> Self {
        let total_tax = breakdown.iter().map(|b| b.tax_in_bracket).sum();
        TaxBracketResult {
            taxable_amount,
            total_tax,
            breakdown,
        }
    }

    /// Result with no tax due
    pub fn zero(taxable_amount: f64) -> Self {
        TaxBracketResult {
            taxable_amount,
            total_tax: 0.0,
            breakdown: Vec::new(),
        }
    }

    /// Total tax as a fraction of the taxable amount (0 when nothing is taxable)
    pub fn effective_rate(&self) -> f64 {
        if self.taxable_amount > 0.0 {
            self.total_tax / self.taxable_amount
        } else {
            0.0
        }
    }
}

fn bracket_label(lower: f64, upper: f64) -> String {
    if upper.is_finite() {
        format!("{lower:.0} ~ {upper:.0}")
    } else {
        format!("{lower:.0}+")
    }
}

/// Check a bracket table: non-empty, ascending thresholds starting at or
/// above zero, rates within `[0, 1]`.
pub fn validate_brackets(brackets: &[TaxBracket]) -> CalcResult<()> {
    if brackets.is_empty() {
        return Err(CalcError::missing_field("brackets"));
    }
    for (index, bracket) in brackets.iter().enumerate() {
        if !bracket.threshold.is_finite() || bracket.threshold < 0.0 {
            return Err(CalcError::invalid_input(
                format!("brackets[{index}].threshold"),
                bracket.threshold.to_string(),
                "Threshold cannot be negative",
            ));
        }
        if !(0.0..=1.0).contains(&bracket.rate) {
            return Err(CalcError::invalid_input(
                format!("brackets[{index}].rate"),
                bracket.rate.to_string(),
                "Rate must be a fraction between 0 and 1",
            ));
        }
        if index > 0 && bracket.threshold <= brackets[index - 1].threshold {
            return Err(CalcError::invalid_input(
                format!("brackets[{index}].threshold"),
                bracket.threshold.to_string(),
                "Thresholds must be strictly ascending",
            ));
        }
    }
    Ok(())
}

/// Marginal tax on `taxable_amount` over `brackets`.
///
/// Amounts below the first threshold are untaxed and do not appear in the
/// breakdown; neither do brackets the amount never reaches.
pub fn progressive_tax(taxable_amount: f64, brackets: &[TaxBracket]) -> CalcResult<TaxBracketResult> {
    validate_brackets(brackets)?;
    if !taxable_amount.is_finite() {
        return Err(CalcError::invalid_input(
            "taxable_amount",
            taxable_amount.to_string(),
            "Not a finite amount",
        ));
    }
    if taxable_amount <= 0.0 {
        return Ok(TaxBracketResult::zero(taxable_amount));
    }

    let breakdown = brackets
        .iter()
        .enumerate()
        .take_while(|(_, b)| taxable_amount > b.threshold)
        .map(|(index, b)| {
            let upper = brackets
                .get(index + 1)
                .map(|next| next.threshold)
                .unwrap_or(f64::INFINITY);
            let amount_in_bracket = taxable_amount.min(upper) - b.threshold;
            BracketBreakdown {
                bracket_label: bracket_label(b.threshold, upper),
                amount_in_bracket,
                rate: b.rate,
                tax_in_bracket: amount_in_bracket * b.rate,
            }
        })
        .collect();

    Ok(TaxBracketResult::from_breakdown(taxable_amount, breakdown))
}

/// Withholding tiers for lottery prizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithholdingTier {
    /// At or below the tax-free ceiling
    TaxFree,
    /// Flat rate on the whole taxable base
    Flat,
    /// Flat rate up to the high threshold plus the high rate on the excess
    Progressive,
}

/// Lottery withholding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryTaxTable {
    pub tax_free_ceiling: f64,
    pub flat_rate: f64,
    pub high_threshold: f64,
    pub high_rate: f64,
}

impl Default for LotteryTaxTable {
    fn default() -> Self {
        LotteryTaxTable {
            tax_free_ceiling: LOTTERY_TAX_FREE_CEILING,
            flat_rate: LOTTERY_FLAT_RATE,
            high_threshold: LOTTERY_HIGH_THRESHOLD,
            high_rate: LOTTERY_HIGH_RATE,
        }
    }
}

impl LotteryTaxTable {
    /// Validate table parameters
    pub fn validate(&self) -> CalcResult<()> {
        if !self.tax_free_ceiling.is_finite() || self.tax_free_ceiling < 0.0 {
            return Err(CalcError::invalid_input(
                "lottery.tax_free_ceiling",
                self.tax_free_ceiling.to_string(),
                "Ceiling cannot be negative",
            ));
        }
        if !self.high_threshold.is_finite() || self.high_threshold <= self.tax_free_ceiling {
            return Err(CalcError::invalid_input(
                "lottery.high_threshold",
                self.high_threshold.to_string(),
                "High threshold must exceed the tax-free ceiling",
            ));
        }
        for (field, rate) in [("lottery.flat_rate", self.flat_rate), ("lottery.high_rate", self.high_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CalcError::invalid_input(
                    field,
                    rate.to_string(),
                    "Rate must be a fraction between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

/// Lottery withholding: the tier that applied and the itemized tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryWithholding {
    pub tier: WithholdingTier,
    pub result: TaxBracketResult,
}

impl LotteryWithholding {
    /// Tax on the part of the base up to the high threshold
    pub fn base_tax(&self) -> f64 {
        self.result
            .breakdown
            .first()
            .map(|b| b.tax_in_bracket)
            .unwrap_or(0.0)
    }

    /// Tax on the excess above the high threshold (zero outside the top tier)
    pub fn excess_tax(&self) -> f64 {
        match self.tier {
            WithholdingTier::Progressive => self
                .result
                .breakdown
                .get(1)
                .map(|b| b.tax_in_bracket)
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Withholding on a lottery prize's taxable amount.
pub fn lottery_withholding(taxable_amount: f64, table: &LotteryTaxTable) -> CalcResult<LotteryWithholding> {
    table.validate()?;
    if !taxable_amount.is_finite() {
        return Err(CalcError::invalid_input(
            "taxable_amount",
            taxable_amount.to_string(),
            "Not a finite amount",
        ));
    }

    if taxable_amount <= table.tax_free_ceiling {
        let mut breakdown = Vec::new();
        if taxable_amount > 0.0 {
            breakdown.push(BracketBreakdown {
                bracket_label: bracket_label(0.0, table.tax_free_ceiling),
                amount_in_bracket: taxable_amount,
                rate: 0.0,
                tax_in_bracket: 0.0,
            });
        }
        return Ok(LotteryWithholding {
            tier: WithholdingTier::TaxFree,
            result: TaxBracketResult::from_breakdown(taxable_amount, breakdown),
        });
    }

    if taxable_amount <= table.high_threshold {
        let breakdown = vec![BracketBreakdown {
            bracket_label: bracket_label(table.tax_free_ceiling, table.high_threshold),
            amount_in_bracket: taxable_amount,
            rate: table.flat_rate,
            tax_in_bracket: taxable_amount * table.flat_rate,
        }];
        return Ok(LotteryWithholding {
            tier: WithholdingTier::Flat,
            result: TaxBracketResult::from_breakdown(taxable_amount, breakdown),
        });
    }

    let excess = taxable_amount - table.high_threshold;
    let breakdown = vec![
        BracketBreakdown {
            bracket_label: bracket_label(0.0, table.high_threshold),
            amount_in_bracket: table.high_threshold,
            rate: table.flat_rate,
            tax_in_bracket: table.high_threshold * table.flat_rate,
        },
        BracketBreakdown {
            bracket_label: bracket_label(table.high_threshold, f64::INFINITY),
            amount_in_bracket: excess,
            rate: table.high_rate,
            tax_in_bracket: excess * table.high_rate,
        },
    ];
    Ok(LotteryWithholding {
        tier: WithholdingTier::Progressive,
        result: TaxBracketResult::from_breakdown(taxable_amount, breakdown),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, 0.06),
            TaxBracket::new(14_000_000.0, 0.15),
            TaxBracket::new(50_000_000.0, 0.24),
        ]
    }

    #[test]
    fn test_marginal_slices() {
        let result = progressive_tax(60_000_000.0, &three_brackets()).unwrap();
        assert_eq!(result.breakdown.len(), 3);
        // 14M*6% + 36M*15% + 10M*24% = 0.84M + 5.4M + 2.4M
        assert!((result.total_tax - 8_640_000.0).abs() < 1e-3);
        assert!((result.breakdown[1].amount_in_bracket - 36_000_000.0).abs() < 1e-6);
        assert_eq!(result.breakdown[2].bracket_label, "50000000+");
    }

    #[test]
    fn test_unreached_brackets_omitted() {
        let result = progressive_tax(10_000_000.0, &three_brackets()).unwrap();
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].bracket_label, "0 ~ 14000000");
    }

    #[test]
    fn test_amount_below_first_threshold_untaxed() {
        let brackets = [TaxBracket::new(1_000.0, 0.1)];
        let result = progressive_tax(500.0, &brackets).unwrap();
        assert_eq!(result.total_tax, 0.0);
        assert!(result.breakdown.is_empty());

        let result = progressive_tax(1_500.0, &brackets).unwrap();
        assert!((result.total_tax - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_and_negative_amounts() {
        assert_eq!(progressive_tax(0.0, &three_brackets()).unwrap().total_tax, 0.0);
        assert_eq!(progressive_tax(-10.0, &three_brackets()).unwrap().total_tax, 0.0);
    }

    #[test]
    fn test_bad_tables_rejected() {
        assert!(progressive_tax(1.0, &[]).is_err());
        assert!(progressive_tax(1.0, &[TaxBracket::new(0.0, 1.5)]).is_err());
        assert!(progressive_tax(
            1.0,
            &[TaxBracket::new(10.0, 0.1), TaxBracket::new(5.0, 0.2)]
        )
        .is_err());
    }

    #[test]
    fn test_lottery_tax_free() {
        let table = LotteryTaxTable::default();
        let w = lottery_withholding(49_000.0, &table).unwrap();
        assert_eq!(w.tier, WithholdingTier::TaxFree);
        assert_eq!(w.result.total_tax, 0.0);

        let at_ceiling = lottery_withholding(50_000.0, &table).unwrap();
        assert_eq!(at_ceiling.tier, WithholdingTier::TaxFree);

        let nothing = lottery_withholding(0.0, &table).unwrap();
        assert!(nothing.result.breakdown.is_empty());
    }

    #[test]
    fn test_lottery_flat_applies_to_whole_base() {
        let w = lottery_withholding(1_000_000.0, &LotteryTaxTable::default()).unwrap();
        assert_eq!(w.tier, WithholdingTier::Flat);
        assert!((w.result.total_tax - 220_000.0).abs() < 1e-6);
        assert_eq!(w.excess_tax(), 0.0);
    }

    #[test]
    fn test_lottery_jackpot() {
        let w = lottery_withholding(999_999_000.0, &LotteryTaxTable::default()).unwrap();
        assert_eq!(w.tier, WithholdingTier::Progressive);
        assert!((w.base_tax() - 66_000_000.0).abs() < 1e-3);
        assert!((w.excess_tax() - 230_999_670.0).abs() < 1e-3);
        assert!((w.result.total_tax - 296_999_670.0).abs() < 1e-3);
    }

    #[test]
    fn test_lottery_branches_agree_at_high_threshold() {
        let table = LotteryTaxTable::default();
        let at = lottery_withholding(LOTTERY_HIGH_THRESHOLD, &table).unwrap();
        let above = lottery_withholding(LOTTERY_HIGH_THRESHOLD + 1e-3, &table).unwrap();
        assert_eq!(at.tier, WithholdingTier::Flat);
        assert_eq!(above.tier, WithholdingTier::Progressive);
        assert!((at.result.total_tax - 66_000_000.0).abs() < 1e-3);
        assert!((above.result.total_tax - at.result.total_tax).abs() < 1e-2);
    }

    proptest! {
        #[test]
        fn prop_breakdown_sums_to_total(amount in 0.0f64..1e9) {
            let result = progressive_tax(amount, &three_brackets()).unwrap();
            let sum: f64 = result.breakdown.iter().map(|b| b.tax_in_bracket).sum();
            prop_assert_eq!(sum, result.total_tax);
            let covered: f64 = result.breakdown.iter().map(|b| b.amount_in_bracket).sum();
            prop_assert!((covered - amount).abs() < 1e-6);
        }

        #[test]
        fn prop_progressive_monotonic(a in 0.0f64..1e9, b in 0.0f64..1e9) {
            let (lo, hi) = (a.min(b), a.max(b));
            let t_lo = progressive_tax(lo, &three_brackets()).unwrap().total_tax;
            let t_hi = progressive_tax(hi, &three_brackets()).unwrap().total_tax;
            prop_assert!(t_lo <= t_hi + 1e-6);
        }

        #[test]
        fn prop_lottery_monotonic(a in 0.0f64..2e9, b in 0.0f64..2e9) {
            let table = LotteryTaxTable::default();
            let (lo, hi) = (a.min(b), a.max(b));
            let t_lo = lottery_withholding(lo, &table).unwrap().result.total_tax;
            let t_hi = lottery_withholding(hi, &table).unwrap().result.total_tax;
            prop_assert!(t_lo <= t_hi + 1e-6);
        }
    }
}
