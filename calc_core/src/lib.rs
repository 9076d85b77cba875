//! # calc_core - Everyday Calculation Engine
//!
//! `calc_core` is the computational heart of Gyesangi, a collection of
//! everyday calculators: stock average cost, lottery take-home, salary net
//! pay, mortgage repayment, discounts and BMI. All inputs and outputs are
//! JSON-serializable so any front end (the bundled CLI, a web view, a script)
//! can drive it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Settings**: Tax tables and rates are passed in, never read from globals
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{calculate_item, CalculationItem, CalculationOutcome};
//! use calc_core::EngineSettings;
//!
//! let item: CalculationItem = serde_json::from_str(
//!     r#"{ "type": "discount", "original_price": "100,000", "mode": "rate", "value": 30 }"#,
//! ).unwrap();
//!
//! match calculate_item(&item, &EngineSettings::default()).unwrap() {
//!     CalculationOutcome::Discount(result) => assert!((result.final_price - 70_000.0).abs() < 1e-6),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - One façade per calculator, plus the catalogue
//! - [`formulas`] - BMI, discount, cost basis and growth formulas
//! - [`tax`] - Progressive bracket evaluator and lottery withholding
//! - [`amortization`] - Loan repayment schedules
//! - [`settings`] - Tunable rate tables with defaults
//! - [`validation`] - Parsing of loosely-typed user input
//! - [`session`] - Caller-held input/result state for one calculator
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading settings overrides from JSON

pub mod amortization;
pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod formulas;
pub mod session;
pub mod settings;
pub mod tax;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_item, CalculationItem, CalculationOutcome, Calculator, CalculatorKind};
pub use errors::{CalcError, CalcResult};
pub use file_io::load_settings;
pub use settings::EngineSettings;
pub use validation::NumericInput;
