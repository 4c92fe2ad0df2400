#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// One or more of the supplied parameters is invalid
    InvalidParameter,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::InvalidParameter => "invalid parameter",
        }
    }
}

/// Raised when a needle, line family, field, or simulation is configured
/// with values that cannot produce a meaningful experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ConfigError {
    /// The needle length is less than or equal to zero
    LengthTooLow { length: f64 },
    /// The needle length is infinite or NaN
    LengthNotFinite { length: f64 },
    /// The line spacing is less than or equal to zero
    SpacingTooLow { spacing: f64 },
    /// The line spacing is infinite or NaN
    SpacingNotFinite { spacing: f64 },
    /// Batches must hold at least one needle
    BatchSizeZero,
    /// A field axis has `min >= max`
    InvalidInterval { axis: char, min: f64, max: f64 },
    /// A field bound is infinite or NaN
    BoundNotFinite { axis: char, bound: f64 },
    /// More crossings than needles were reported
    HitsExceedNeedles { needles: usize, hits: usize },
    /// Adding needles would overflow the running count
    CountOverflow { total: usize, added: usize },
    /// Two estimators built for different needles or lines were combined
    MismatchedGeometry {
        length: (f64, f64),
        spacing: (f64, f64),
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidParameter
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthTooLow { length } => {
                write!(f, "needle length ({}) must be greater than zero", length)
            }
            Self::LengthNotFinite { length } => {
                write!(f, "non-finite needle length: {}", length)
            }
            Self::SpacingTooLow { spacing } => {
                write!(f, "line spacing ({}) must be greater than zero", spacing)
            }
            Self::SpacingNotFinite { spacing } => {
                write!(f, "non-finite line spacing: {}", spacing)
            }
            Self::BatchSizeZero => write!(f, "batch size must be at least one"),
            Self::InvalidInterval { axis, min, max } => write!(
                f,
                "{}_min ({}) must be less than {}_max ({})",
                axis, min, axis, max
            ),
            Self::BoundNotFinite { axis, bound } => {
                write!(f, "non-finite {} bound: {}", axis, bound)
            }
            Self::HitsExceedNeedles { needles, hits } => write!(
                f,
                "{} crossings reported for only {} needles",
                hits, needles
            ),
            Self::CountOverflow { total, added } => write!(
                f,
                "adding {} needles to {} overflows the needle count",
                added, total
            ),
            Self::MismatchedGeometry { length, spacing } => write!(
                f,
                "cannot combine estimators with L = ({}, {}) and D = ({}, {})",
                length.0, length.1, spacing.0, spacing.1
            ),
        }
    }
}

/// Validate a needle length
pub(crate) fn check_length(length: f64) -> Result<f64, ConfigError> {
    if !length.is_finite() {
        Err(ConfigError::LengthNotFinite { length })
    } else if length <= 0.0 {
        Err(ConfigError::LengthTooLow { length })
    } else {
        Ok(length)
    }
}

/// Validate a line spacing
pub(crate) fn check_spacing(spacing: f64) -> Result<f64, ConfigError> {
    if !spacing.is_finite() {
        Err(ConfigError::SpacingNotFinite { spacing })
    } else if spacing <= 0.0 {
        Err(ConfigError::SpacingTooLow { spacing })
    } else {
        Ok(spacing)
    }
}
