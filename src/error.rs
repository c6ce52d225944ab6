//! Configuration errors
//!
//! Raised once, at construction. The physics step itself is infallible.

use std::fmt;

/// Invalid simulation or boat configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A quantity that must be strictly positive (mass, area, inertia...)
    NonPositive { field: &'static str, value: f64 },
    /// A quantity outside its allowed closed range
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// NaN or infinity where a real number is required
    NonFinite { field: &'static str },
    /// Boat geometry that cannot carry a surface (e.g. zero-length boom)
    DegenerateGeometry(&'static str),
    /// Malformed JSON
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}] (got {value})"),
            ConfigError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ConfigError::DegenerateGeometry(what) => write!(f, "degenerate boat geometry: {what}"),
            ConfigError::Parse(msg) => write!(f, "invalid configuration JSON: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Require a finite, strictly positive value
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(value)
}

/// Require a finite value within `[min, max]`
pub(crate) fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
