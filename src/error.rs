//! Error types
//!
//! The simulation itself has no recoverable runtime errors. These cover
//! construction-time contract violations and configuration loading.

use std::fmt;

/// Errors reported when building simulation objects or loading settings
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Blob radius must be positive and finite
    InvalidRadius(f64),
    /// Ring point count must be even and at least 4
    InvalidRingCount(usize),
    /// Population capacity must be at least 1
    ZeroCapacity,
    /// Arena width and height must be positive and finite
    InvalidArena { width: f64, height: f64 },
    /// Timestep must be positive and finite
    InvalidTimestep(f64),
    /// Pixel scale factor must be positive and finite
    InvalidScaleFactor(f64),
    /// Settings file could not be read
    Io(String),
    /// Settings file could not be parsed
    Parse(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRadius(r) => {
                write!(f, "blob radius must be positive and finite (got {})", r)
            }
            SimError::InvalidRingCount(n) => {
                write!(f, "ring point count must be even and at least 4 (got {})", n)
            }
            SimError::ZeroCapacity => write!(f, "population capacity must be at least 1"),
            SimError::InvalidArena { width, height } => {
                write!(f, "arena must have positive size (got {} x {})", width, height)
            }
            SimError::InvalidTimestep(dt) => {
                write!(f, "timestep must be positive and finite (got {})", dt)
            }
            SimError::InvalidScaleFactor(s) => {
                write!(f, "scale factor must be positive and finite (got {})", s)
            }
            SimError::Io(msg) => write!(f, "failed to read settings: {}", msg),
            SimError::Parse(msg) => write!(f, "failed to parse settings: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e.to_string())
    }
}

/// Positive and finite
pub(crate) fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
