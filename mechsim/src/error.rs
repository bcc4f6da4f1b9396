// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Configuration errors
//!
//! Recoverable checks on user-supplied parameters. Precondition violations
//! inside the integration core (dimension mismatch, zero substeps) are not
//! represented here: they panic.

use thiserror::Error;

/// Errors reported when validating simulation or model configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter that must be strictly positive was zero, negative, or not finite
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A parameter that may take any sign was NaN or infinite
    #[error("{name} must be finite, got {value}")]
    NotFinite {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Timestep is small enough to lose precision when accumulated in f64
    #[error("Timestep {dt} is extremely small and may cause precision loss with f64")]
    TimestepTooSmall {
        /// Offending timestep
        dt: f64,
    },

    /// Timestep is large enough to make explicit methods unstable
    #[error("Timestep {dt} is large and may cause instability")]
    TimestepTooLarge {
        /// Offending timestep
        dt: f64,
    },

    /// Filter cutoff ratio `dt / T` is at or above the Nyquist limit of 0.5
    #[error("cutoff ratio {ratio} is at or above the Nyquist limit (0.5)")]
    CutoffAboveNyquist {
        /// Requested `dt / T`
        ratio: f64,
    },
}

/// Check that `value` is strictly positive and finite
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Check that `value` is finite
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert_eq!(
            ensure_positive("mass", 0.0),
            Err(ConfigError::NotPositive { name: "mass", value: 0.0 })
        );
        assert!(ensure_positive("mass", -2.0).is_err());
        assert!(ensure_positive("mass", f64::INFINITY).is_err());
        assert!(ensure_positive("mass", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("damping", -0.25).is_ok());
        assert!(ensure_finite("damping", f64::NAN).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NotPositive { name: "length", value: -1.0 };
        assert_eq!(err.to_string(), "length must be positive and finite, got -1");

        let err = ConfigError::TimestepTooSmall { dt: 1e-10 };
        assert!(err.to_string().contains("extremely small"));

        let err = ConfigError::CutoffAboveNyquist { ratio: 0.6 };
        assert!(err.to_string().contains("Nyquist"));
    }
}
