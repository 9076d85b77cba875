//! # Settings File I/O
//!
//! Reads [`EngineSettings`] overrides from JSON. Files are read-only input;
//! the engine never writes them back.
//! - **Partial files**: Missing fields fall back to the built-in defaults
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("rates.json"))?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::settings::{EngineSettings, SETTINGS_SCHEMA_VERSION};

/// Load settings from a JSON file.
///
/// # Returns
///
/// * `Ok(EngineSettings)` - Loaded and validated settings
/// * `Err(CalcError::InvalidInput)` - Incompatible schema version or bad rates
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<EngineSettings> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: EngineSettings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.schema_version)?;
    settings.validate()?;

    info!("loaded settings from {}", path.display());
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
///
/// Only the major version has to match.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let major = |v: &str| v.split('.').next().and_then(|p| p.parse::<u32>().ok());

    match (major(file_version), major(SETTINGS_SCHEMA_VERSION)) {
        (Some(file), Some(current)) if file == current => Ok(()),
        _ => Err(CalcError::invalid_input(
            "schema_version",
            file_version,
            format!("Expected schema version {SETTINGS_SCHEMA_VERSION}"),
        )),
    }
}
