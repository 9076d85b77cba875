//! # Engine Settings
//!
//! Rate tables and display parameters used by the calculators. The defaults
//! are built once per process and never mutated; callers that need different
//! figures (a new tax year, a what-if) construct their own [`EngineSettings`]
//! and pass it explicitly to each `calculate` call.
//!
//! ```text
//! EngineSettings
//! ├── lottery: LotteryTaxTable (tax-free ceiling, 22% / 33% withholding)
//! ├── payroll: PayrollRates (social insurance, income/local tax)
//! ├── schedule_display_months: u32
//! └── discount_presets: Vec<f64>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::{EngineSettings, DEFAULT_SETTINGS};
//!
//! let mut settings = EngineSettings::default();
//! assert_eq!(settings, *DEFAULT_SETTINGS);
//!
//! settings.schedule_display_months = 24;
//! settings.validate().unwrap();
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tax::{validate_brackets, LotteryTaxTable, TaxBracket};

/// Current schema version for settings files
pub const SETTINGS_SCHEMA_VERSION: &str = "0.1.0";

/// Process-wide default settings.
pub static DEFAULT_SETTINGS: Lazy<EngineSettings> = Lazy::new(|| EngineSettings {
    schema_version: SETTINGS_SCHEMA_VERSION.to_string(),
    lottery: LotteryTaxTable::default(),
    payroll: PayrollRates::default(),
    schedule_display_months: 12,
    discount_presets: vec![10.0, 20.0, 30.0, 50.0, 70.0],
});

/// Simplified payroll income-tax table: a flat 6% on the taxable base.
pub static DEFAULT_INCOME_TAX_BRACKETS: Lazy<Vec<TaxBracket>> =
    Lazy::new(|| vec![TaxBracket::new(0.0, 0.06)]);

/// Employee-side payroll deduction rates (monthly basis).
///
/// All rates are fractions of monthly gross pay except `long_term_care_rate`,
/// which is a fraction of the health-insurance premium, and `local_tax_rate`,
/// which is a fraction of income tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRates {
    /// National pension (국민연금)
    pub national_pension_rate: f64,
    /// Maximum monthly national pension contribution
    pub national_pension_cap: f64,
    /// Health insurance (건강보험)
    pub health_insurance_rate: f64,
    /// Long-term care (장기요양보험), as a fraction of health insurance
    pub long_term_care_rate: f64,
    /// Employment insurance (고용보험)
    pub employment_insurance_rate: f64,
    /// Industrial accident insurance (산재보험), employer-paid so zero by default
    pub industrial_accident_rate: f64,
    /// Monthly standard deduction subtracted before income tax
    pub standard_deduction: f64,
    /// Marginal brackets applied to the monthly taxable base
    pub income_tax_brackets: Vec<TaxBracket>,
    /// Local income tax (지방소득세), as a fraction of income tax
    pub local_tax_rate: f64,
}

impl Default for PayrollRates {
    fn default() -> Self {
        PayrollRates {
            national_pension_rate: 0.045,
            national_pension_cap: 243_000.0,
            health_insurance_rate: 0.03545,
            long_term_care_rate: 0.1295,
            employment_insurance_rate: 0.009,
            industrial_accident_rate: 0.0,
            standard_deduction: 150_000.0,
            income_tax_brackets: DEFAULT_INCOME_TAX_BRACKETS.clone(),
            local_tax_rate: 0.1,
        }
    }
}

impl PayrollRates {
    /// Validate rates and brackets
    pub fn validate(&self) -> CalcResult<()> {
        let rates = [
            ("payroll.national_pension_rate", self.national_pension_rate),
            ("payroll.health_insurance_rate", self.health_insurance_rate),
            ("payroll.long_term_care_rate", self.long_term_care_rate),
            ("payroll.employment_insurance_rate", self.employment_insurance_rate),
            ("payroll.industrial_accident_rate", self.industrial_accident_rate),
            ("payroll.local_tax_rate", self.local_tax_rate),
        ];
        for (field, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CalcError::invalid_input(
                    field,
                    rate.to_string(),
                    "Rate must be a fraction between 0 and 1",
                ));
            }
        }
        for (field, amount) in [
            ("payroll.national_pension_cap", self.national_pension_cap),
            ("payroll.standard_deduction", self.standard_deduction),
        ] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    amount.to_string(),
                    "Amount cannot be negative",
                ));
            }
        }
        validate_brackets(&self.income_tax_brackets)
    }
}

/// All tunable parameters of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Settings file schema version
    pub schema_version: String,
    pub lottery: LotteryTaxTable,
    pub payroll: PayrollRates,
    /// Number of schedule rows a mortgage result carries for display
    pub schedule_display_months: u32,
    /// Quick-pick discount rates in percent
    pub discount_presets: Vec<f64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

impl EngineSettings {
    /// Validate every table.
    pub fn validate(&self) -> CalcResult<()> {
        self.lottery.validate()?;
        self.payroll.validate()?;
        if self.schedule_display_months == 0 {
            return Err(CalcError::invalid_input(
                "schedule_display_months",
                "0",
                "Display window must be at least one month",
            ));
        }
        if let Some(bad) = self
            .discount_presets
            .iter()
            .find(|rate| !(0.0..=100.0).contains(*rate))
        {
            return Err(CalcError::invalid_input(
                "discount_presets",
                bad.to_string(),
                "Preset rates must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        EngineSettings::default().validate().unwrap();
        assert_eq!(DEFAULT_SETTINGS.schedule_display_months, 12);
        assert_eq!(DEFAULT_SETTINGS.payroll.national_pension_cap, 243_000.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{ "schedule_display_months": 6, "payroll": { "local_tax_rate": 0.2 } }"#;
        let settings: EngineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.schedule_display_months, 6);
        assert_eq!(settings.payroll.local_tax_rate, 0.2);
        assert_eq!(settings.payroll.health_insurance_rate, 0.03545);
        assert_eq!(settings.lottery, LotteryTaxTable::default());
        assert_eq!(settings.schema_version, SETTINGS_SCHEMA_VERSION);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = EngineSettings::default();
        settings.schedule_display_months = 0;
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.payroll.health_insurance_rate = 3.545;
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.payroll.income_tax_brackets.clear();
        assert!(settings.validate().is_err());

        let mut settings = EngineSettings::default();
        settings.discount_presets.push(150.0);
        assert!(settings.validate().is_err());
    }
}
