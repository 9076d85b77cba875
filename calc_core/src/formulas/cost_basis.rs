//! # Weighted-Average Cost Basis
//!
//! A position is replayed as a left fold over its transactions:
//!
//! - **Buy** blends the new lot into the average:
//!   `avg' = (shares·avg + n·price) / (shares + n)`
//! - **Sell** realizes cost at the existing average. The remaining shares keep
//!   their average cost; a position sold down to zero resets to an empty
//!   position.
//!
//! Share counts may be fractional, so holdings are compared within
//! [`QUANTITY_THRESHOLD`] rather than exactly.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::cost_basis::{weighted_average_cost, StockPosition, StockTransaction};
//!
//! let start = StockPosition::new(100.0, 50_000.0);
//! let txs = [
//!     StockTransaction::buy(100.0, 40_000.0),
//!     StockTransaction::sell(50.0, 60_000.0),
//! ];
//! let position = weighted_average_cost(start, &txs).unwrap();
//! assert_eq!(position.shares, 150.0);
//! assert_eq!(position.average_cost, 45_000.0);
//! ```

use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::errors::{CalcError, CalcResult};

/// Share quantities closer than this are treated as equal.
pub const QUANTITY_THRESHOLD: f64 = 1e-8;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl TransactionKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "매수",
            TransactionKind::Sell => "매도",
        }
    }
}

/// One trade. Shares may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub kind: TransactionKind,
    pub shares: f64,
    pub price: f64,
}

impl StockTransaction {
    pub fn buy(shares: f64, price: f64) -> Self {
        StockTransaction {
            kind: TransactionKind::Buy,
            shares,
            price,
        }
    }

    pub fn sell(shares: f64, price: f64) -> Self {
        StockTransaction {
            kind: TransactionKind::Sell,
            shares,
            price,
        }
    }
}

/// Shares held and their average cost per share.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StockPosition {
    pub shares: f64,
    pub average_cost: f64,
}

impl StockPosition {
    pub fn new(shares: f64, average_cost: f64) -> Self {
        StockPosition {
            shares,
            average_cost,
        }
    }

    /// Total cost of the shares held
    pub fn total_cost(&self) -> f64 {
        self.shares * self.average_cost
    }

    /// True when nothing is held
    pub fn is_empty(&self) -> bool {
        self.shares.abs() < QUANTITY_THRESHOLD
    }

    /// Add a lot at `price`, blending it into the average cost.
    pub fn buy(self, shares: f64, price: f64) -> CalcResult<StockPosition> {
        if shares == 0.0 {
            return Ok(self);
        }
        let total_shares = self.shares + shares;
        let average_cost = safe_div(
            self.total_cost() + shares * price,
            total_shares,
            "average cost",
        )?;
        Ok(StockPosition::new(total_shares, average_cost))
    }

    /// Remove `shares` at the current average cost.
    ///
    /// Returns the reduced position and the cost basis released by the sale.
    /// A sale within [`QUANTITY_THRESHOLD`] of the holding closes it.
    pub fn sell(self, shares: f64) -> CalcResult<(StockPosition, f64)> {
        if shares > self.shares + QUANTITY_THRESHOLD {
            return Err(CalcError::insufficient_shares(shares, self.shares));
        }
        let remaining = self.shares - shares;
        if remaining.abs() < QUANTITY_THRESHOLD {
            return Ok((StockPosition::default(), self.total_cost()));
        }
        Ok((StockPosition::new(remaining, self.average_cost), shares * self.average_cost))
    }
}

/// Outcome of replaying a transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBasisReplay {
    /// Position after the last transaction
    pub position: StockPosition,
    /// Cost basis released by sales, at the average cost in effect at each sale
    pub realized_cost: f64,
}

fn check_transaction(index: usize, tx: &StockTransaction) -> CalcResult<()> {
    if !tx.shares.is_finite() || tx.shares < 0.0 {
        return Err(CalcError::invalid_input(
            format!("transactions[{index}].shares"),
            tx.shares.to_string(),
            "Share count cannot be negative",
        ));
    }
    if !tx.price.is_finite() || tx.price < 0.0 {
        return Err(CalcError::invalid_input(
            format!("transactions[{index}].price"),
            tx.price.to_string(),
            "Price cannot be negative",
        ));
    }
    Ok(())
}

/// Replay `transactions` in order on top of `existing`.
pub fn replay(existing: StockPosition, transactions: &[StockTransaction]) -> CalcResult<CostBasisReplay> {
    if !existing.shares.is_finite() || existing.shares < 0.0 {
        return Err(CalcError::invalid_input(
            "existing_shares",
            existing.shares.to_string(),
            "Share count cannot be negative",
        ));
    }
    if !existing.average_cost.is_finite() || existing.average_cost < 0.0 {
        return Err(CalcError::invalid_input(
            "existing_average_cost",
            existing.average_cost.to_string(),
            "Average cost cannot be negative",
        ));
    }

    let start = CostBasisReplay {
        position: existing,
        realized_cost: 0.0,
    };

    transactions
        .iter()
        .enumerate()
        .try_fold(start, |acc, (index, tx)| {
            check_transaction(index, tx)?;
            match tx.kind {
                TransactionKind::Buy => Ok(CostBasisReplay {
                    position: acc.position.buy(tx.shares, tx.price)?,
                    realized_cost: acc.realized_cost,
                }),
                TransactionKind::Sell => {
                    let (position, released) = acc.position.sell(tx.shares)?;
                    Ok(CostBasisReplay {
                        position,
                        realized_cost: acc.realized_cost + released,
                    })
                }
            }
        })
}

/// Fold `transactions` into `existing` and return the resulting position.
///
/// Fails with `InsufficientShares` if any sale exceeds the holding at that point.
pub fn weighted_average_cost(
    existing: StockPosition,
    transactions: &[StockTransaction],
) -> CalcResult<StockPosition> {
    replay(existing, transactions).map(|r| r.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_buy_blends_average() {
        let position = StockPosition::new(10.0, 100.0).buy(10.0, 200.0).unwrap();
        assert_eq!(position.shares, 20.0);
        assert_eq!(position.average_cost, 150.0);
    }

    #[test]
    fn test_first_buy_from_empty() {
        let position = StockPosition::default().buy(3.0, 70_000.0).unwrap();
        assert_eq!(position, StockPosition::new(3.0, 70_000.0));
    }

    #[test]
    fn test_sell_keeps_average() {
        let (position, released) = StockPosition::new(100.0, 50_000.0).sell(40.0).unwrap();
        assert_eq!(position.shares, 60.0);
        assert_eq!(position.average_cost, 50_000.0);
        assert_eq!(released, 2_000_000.0);
    }

    #[test]
    fn test_sell_everything() {
        let (position, released) = StockPosition::new(10.0, 1_234.0).sell(10.0).unwrap();
        assert!(position.is_empty());
        assert_eq!(position.average_cost, 0.0);
        assert_eq!(released, 12_340.0);
    }

    #[test]
    fn test_fractional_full_sale_closes_position() {
        let txs = [StockTransaction::buy(0.1, 100.0), StockTransaction::sell(0.8, 120.0)];
        let position = weighted_average_cost(StockPosition::new(0.7, 100.0), &txs).unwrap();
        assert_eq!(position, StockPosition::default());

        let txs = [StockTransaction::buy(0.2, 100.0), StockTransaction::sell(0.3, 120.0)];
        let result = replay(StockPosition::new(0.1, 100.0), &txs).unwrap();
        assert_eq!(result.position, StockPosition::default());
        assert!((result.realized_cost - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversell_beyond_threshold_rejected() {
        let err = StockPosition::new(0.8, 100.0).sell(0.8001).unwrap_err();
        assert_eq!(err, CalcError::insufficient_shares(0.8001, 0.8));
    }

    #[test]
    fn test_oversell_rejected() {
        let txs = [StockTransaction::buy(5.0, 100.0), StockTransaction::sell(20.0, 100.0)];
        let err = weighted_average_cost(StockPosition::new(10.0, 100.0), &txs).unwrap_err();
        assert_eq!(err, CalcError::insufficient_shares(20.0, 15.0));
    }

    #[test]
    fn test_negative_transaction_rejected() {
        let txs = [StockTransaction::buy(-1.0, 100.0)];
        assert!(matches!(
            weighted_average_cost(StockPosition::default(), &txs),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_realized_cost_tracks_average_at_sale() {
        let txs = [
            StockTransaction::buy(10.0, 100.0),
            StockTransaction::sell(5.0, 500.0),
            StockTransaction::buy(5.0, 200.0),
            StockTransaction::sell(10.0, 10.0),
        ];
        let result = replay(StockPosition::default(), &txs).unwrap();
        // 5 @ 100 then 10 @ 150
        assert!((result.realized_cost - 2_000.0).abs() < 1e-9);
        assert!(result.position.is_empty());
    }

    proptest! {
        #[test]
        fn prop_zero_share_buy_is_noop(shares in 0.0f64..1e6, avg in 0.0f64..1e6, price in 0.0f64..1e6) {
            let start = StockPosition::new(shares, avg);
            let after = weighted_average_cost(start, &[StockTransaction::buy(0.0, price)]).unwrap();
            prop_assert_eq!(after, start);
        }

        #[test]
        fn prop_partial_sale_keeps_average(shares in 1.0f64..1e6, avg in 0.0f64..1e6, fraction in 0.0f64..1.0) {
            let start = StockPosition::new(shares, avg);
            let sold = shares * fraction;
            let after = weighted_average_cost(start, &[StockTransaction::sell(sold, 1.0)]).unwrap();
            prop_assert!(after.shares <= shares);
            if !after.is_empty() {
                prop_assert_eq!(after.average_cost, avg);
            }
        }

        #[test]
        fn prop_average_between_lot_prices(p1 in 1.0f64..1e6, p2 in 1.0f64..1e6, n1 in 0.1f64..1e4, n2 in 0.1f64..1e4) {
            let txs = [StockTransaction::buy(n1, p1), StockTransaction::buy(n2, p2)];
            let position = weighted_average_cost(StockPosition::default(), &txs).unwrap();
            let (lo, hi) = (p1.min(p2), p1.max(p2));
            prop_assert!(position.average_cost >= lo * (1.0 - 1e-12));
            prop_assert!(position.average_cost <= hi * (1.0 + 1e-12));
        }
    }
}
