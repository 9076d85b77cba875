//! # Stock Average-Cost Calculator
//!
//! Starts from an existing holding (shares and average cost, either may be
//! left blank) and replays a list of buy/sell rows through
//! [`crate::formulas::cost_basis`].
//!
//! Rows where both shares and price are blank are skipped, so an unused
//! trailing row in a form does not block the calculation. A row with only
//! one of the two filled in is rejected.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{log_rejection, Calculator, CalculatorKind};
use crate::errors::CalcResult;
use crate::formulas::cost_basis::{replay, StockPosition, StockTransaction, TransactionKind};
use crate::settings::EngineSettings;
use crate::validation::{optional_non_negative, require_non_negative, NumericInput};

/// One raw buy/sell row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    #[serde(default)]
    pub shares: NumericInput,
    #[serde(default)]
    pub price: NumericInput,
}

impl Default for TransactionInput {
    fn default() -> Self {
        TransactionInput {
            kind: TransactionKind::Buy,
            shares: NumericInput::default(),
            price: NumericInput::default(),
        }
    }
}

impl TransactionInput {
    pub fn new(kind: TransactionKind, shares: impl Into<NumericInput>, price: impl Into<NumericInput>) -> Self {
        TransactionInput {
            kind,
            shares: shares.into(),
            price: price.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.shares.is_blank() && self.price.is_blank()
    }
}

/// Raw stock average calculator input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "existing_shares": "100",
///   "existing_average_cost": "50,000",
///   "transactions": [
///     { "kind": "BUY", "shares": 50, "price": 44000 },
///     { "kind": "SELL", "shares": 30, "price": 52000 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAverageInput {
    #[serde(default)]
    pub existing_shares: NumericInput,
    #[serde(default)]
    pub existing_average_cost: NumericInput,
    #[serde(default)]
    pub transactions: Vec<TransactionInput>,
}

impl Default for StockAverageInput {
    fn default() -> Self {
        StockAverageInput {
            existing_shares: NumericInput::default(),
            existing_average_cost: NumericInput::default(),
            transactions: vec![TransactionInput::default()],
        }
    }
}

impl StockAverageInput {
    /// Parse the starting position and the non-blank transaction rows.
    pub fn parse(&self) -> CalcResult<(StockPosition, Vec<StockTransaction>)> {
        let shares = optional_non_negative("existing_shares", &self.existing_shares)?;
        let average_cost = optional_non_negative("existing_average_cost", &self.existing_average_cost)?;

        let transactions = self
            .transactions
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(index, row)| {
                Ok(StockTransaction {
                    kind: row.kind,
                    shares: require_non_negative(&format!("transactions[{index}].shares"), &row.shares)?,
                    price: require_non_negative(&format!("transactions[{index}].price"), &row.price)?,
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;

        Ok((StockPosition::new(shares, average_cost), transactions))
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.parse().map(|_| ())
    }
}

/// Position after all transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAverageResult {
    pub total_shares: f64,
    /// Cost basis of the shares still held
    pub total_cost: f64,
    pub average_cost: f64,
    /// Cost basis released by sales
    pub realized_cost: f64,
    /// Sale proceeds (shares × sale price)
    pub realized_proceeds: f64,
    /// Proceeds minus released cost basis
    pub realized_gain: f64,
}

/// Calculate the resulting average cost.
pub fn calculate(input: &StockAverageInput) -> CalcResult<StockAverageResult> {
    let reject = log_rejection(CalculatorKind::StockAverage);
    let (start, transactions) = input.parse().inspect_err(&reject)?;
    let outcome = replay(start, &transactions).inspect_err(&reject)?;

    let realized_proceeds: f64 = transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Sell)
        .map(|tx| tx.shares * tx.price)
        .sum();

    let position = outcome.position;
    debug!(
        "stock average: {} rows -> {} shares @ {:.2}",
        transactions.len(),
        position.shares,
        position.average_cost
    );

    Ok(StockAverageResult {
        total_shares: position.shares,
        total_cost: position.total_cost(),
        average_cost: position.average_cost,
        realized_cost: outcome.realized_cost,
        realized_proceeds,
        realized_gain: realized_proceeds - outcome.realized_cost,
    })
}

/// [`Calculator`] handle for the stock average façade.
pub struct StockAverageCalculator;

impl Calculator for StockAverageCalculator {
    type Input = StockAverageInput;
    type Output = StockAverageResult;

    const KIND: CalculatorKind = CalculatorKind::StockAverage;

    fn calculate(input: &StockAverageInput, _settings: &EngineSettings) -> CalcResult<StockAverageResult> {
        calculate(input)
    }
}
