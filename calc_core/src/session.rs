//! # Calculator Session
//!
//! Caller-held state for one open calculator: the input being edited and the
//! last successful result. The engine itself stays stateless; a session only
//! remembers what the presentation layer would otherwise keep in its view.
//!
//! ```rust
//! use calc_core::calculations::bmi::BmiCalculator;
//! use calc_core::session::Session;
//! use calc_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::default();
//! let mut session = Session::<BmiCalculator>::new();
//! session.input.height_cm = "170".into();
//! session.input.weight_kg = "65".into();
//! session.submit(&settings).unwrap();
//! assert!(session.result().is_some());
//! ```

use crate::calculations::{Calculator, CalculatorKind};
use crate::errors::{CalcError, CalcResult};
use crate::settings::EngineSettings;

/// Input and last result of one calculator.
pub struct Session<C: Calculator> {
    /// Input currently being edited
    pub input: C::Input,
    result: Option<C::Output>,
    last_error: Option<CalcError>,
}

impl<C: Calculator> Default for Session<C> {
    fn default() -> Self {
        Session {
            input: C::Input::default(),
            result: None,
            last_error: None,
        }
    }
}

impl<C: Calculator> Session<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an existing input.
    pub fn with_input(input: C::Input) -> Self {
        Session {
            input,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        C::KIND
    }

    /// Run the calculator on the current input.
    ///
    /// On success the stored result is replaced. On failure the previous
    /// result is kept and the error is remembered until the next submit.
    pub fn submit(&mut self, settings: &EngineSettings) -> CalcResult<&C::Output> {
        match C::calculate(&self.input, settings) {
            Ok(output) => {
                self.last_error = None;
                Ok(&*self.result.insert(output))
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Clear input, result and error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn result(&self) -> Option<&C::Output> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::discount::{DiscountCalculator, DiscountInputMode};
    use crate::calculations::lottery::LotteryCalculator;
    use crate::validation::NumericInput;

    #[test]
    fn test_failed_submit_keeps_previous_result() {
        let settings = EngineSettings::default();
        let mut session = Session::<LotteryCalculator>::new();
        session.input.win_amount = "1,001,000".into();
        let take_home = session.submit(&settings).unwrap().take_home;

        session.input.win_amount = "abc".into();
        assert!(session.submit(&settings).is_err());
        assert_eq!(session.result().map(|r| r.take_home), Some(take_home));
        assert_eq!(session.last_error().map(|e| e.error_code()), Some("INVALID_INPUT"));

        session.input.win_amount = "2,001,000".into();
        session.submit(&settings).unwrap();
        assert!(session.last_error().is_none());
        assert!(session.result().map(|r| r.take_home).unwrap_or_default() > take_home);
    }

    #[test]
    fn test_reset_clears_everything() {
        let settings = EngineSettings::default();
        let mut session = Session::<DiscountCalculator>::new();
        session.input.original_price = "10000".into();
        session.input.mode = DiscountInputMode::Amount;
        session.input.value = "2500".into();
        session.submit(&settings).unwrap();
        assert_eq!(session.kind(), CalculatorKind::Discount);

        session.reset();
        assert!(session.result().is_none());
        assert_eq!(session.input.original_price, NumericInput::default());
        assert_eq!(session.input.mode, DiscountInputMode::Rate);
    }

    #[test]
    fn test_empty_input_reports_missing_field() {
        let mut session = Session::<LotteryCalculator>::new();
        let err = session.submit(&EngineSettings::default()).unwrap_err();
        assert_eq!(err, CalcError::missing_field("win_amount"));
        assert!(session.result().is_none());
    }
}
