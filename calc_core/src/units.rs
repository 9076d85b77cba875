//! # Unit Types
//!
//! Type-safe wrappers for the quantities the formulas pass around. These
//! provide compile-time safety against mixing centimeters with meters or a
//! percentage with a fraction while remaining lightweight (just f64 wrappers).
//!
//! Result records still carry plain `f64` fields so they serialize as bare
//! numbers; the wrappers are used at formula boundaries.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, Meters, Percent};
//!
//! let height = Centimeters(170.0);
//! let height_m: Meters = height.into();
//! assert_eq!(height_m.0, 1.7);
//!
//! let rate = Percent(3.5);
//! assert!((rate.as_fraction() - 0.035).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl Meters {
    /// Square of the length, used by body-mass formulas (m²)
    pub fn squared(self) -> f64 {
        self.0 * self.0
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Ratios
// ============================================================================

/// A percentage on the 0-100 scale (3.5 means 3.5%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Convert to a fraction (3.5% -> 0.035)
    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Build from a fraction (0.035 -> 3.5%)
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }
}
