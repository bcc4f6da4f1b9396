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
//! Second-order Butterworth low-pass filter
//!
//! A discrete IIR filter for smoothing noisy telemetry such as a finite
//! difference of energy or angle samples. The coefficients come from the
//! bilinear transform of the analog second-order Butterworth prototype:
//!
//! ```text
//! r  = dt / T
//! c  = 1 / tan(pi * r)
//! b0 = 1 / (1 + sqrt(2) c + c^2),  b1 = 2 b0,  b2 = b0
//! a1 = 2 (c^2 - 1) b0
//! a2 = -(1 - sqrt(2) c + c^2) b0
//!
//! y[k] = b0 z[k] + b1 z[k-1] + b2 z[k-2] + a1 y[k-1] + a2 y[k-2]
//! ```
//!
//! The filter has unit gain at DC and a zero at the Nyquist frequency.

use crate::error::ConfigError;
use std::f64::consts::{PI, SQRT_2};

/// Largest usable cutoff ratio `dt / T`
const NYQUIST_RATIO: f64 = 0.5;

/// Ratio substituted when the requested cutoff is unusable
const CLAMPED_RATIO: f64 = 0.45;

/// How much input history the filter has seen since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum History {
    /// No samples yet and no seed value
    Uninitialized,
    /// Fewer than two samples; input is passed through unchanged
    Warming(u8),
    /// Full history available; the recurrence is applied
    Steady,
}

/// Second-order Butterworth low-pass filter
///
/// # Example
///
/// ```
/// use mechsim::ButterworthFilter;
///
/// let mut filter = ButterworthFilter::new(0.01, 0.1, None);
/// let mut y = 0.0;
/// for _ in 0..500 {
///     y = filter.run(5.0);
/// }
/// assert!((y - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ButterworthFilter {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    /// z[k], z[k-1], z[k-2]
    inputs: [f64; 3],
    /// y[k], y[k-1], y[k-2]
    outputs: [f64; 3],
    history: History,
    cutoff_clamped: bool,
}

impl ButterworthFilter {
    /// Create a filter for samples every `dt` seconds with time constant `period`
    ///
    /// `initial` seeds the whole history so filtering starts immediately;
    /// with `None` the first two samples are passed through unchanged.
    ///
    /// A cutoff at or above the Nyquist limit (`dt / period >= 0.5`) cannot
    /// be realised. The ratio is clamped to 0.45 and a warning is printed.
    ///
    /// # Panics
    ///
    /// Panics if `dt` or `period` is non-positive or not finite
    pub fn new(dt: f64, period: f64, initial: Option<f64>) -> Self {
        assert!(dt > 0.0 && dt.is_finite(), "Sample interval must be positive and finite");
        assert!(
            period > 0.0 && period.is_finite(),
            "Filter period must be positive and finite"
        );

        let (ratio, cutoff_clamped) = match Self::check_cutoff(dt, period) {
            Ok(ratio) => (ratio, false),
            Err(err) => {
                eprintln!("Warning: Butterworth {}; using {} instead", err, CLAMPED_RATIO);
                (CLAMPED_RATIO, true)
            }
        };

        let c = 1.0 / (PI * ratio).tan();
        let b0 = 1.0 / (1.0 + SQRT_2 * c + c * c);

        let mut filter = ButterworthFilter {
            b0,
            b1: 2.0 * b0,
            b2: b0,
            a1: 2.0 * (c * c - 1.0) * b0,
            a2: -(1.0 - SQRT_2 * c + c * c) * b0,
            inputs: [0.0; 3],
            outputs: [0.0; 3],
            history: History::Uninitialized,
            cutoff_clamped,
        };
        filter.reset(initial);
        filter
    }

    /// Return the cutoff ratio `dt / period`, or an error at or above Nyquist
    pub fn check_cutoff(dt: f64, period: f64) -> Result<f64, ConfigError> {
        let ratio = dt / period;
        if ratio >= NYQUIST_RATIO {
            Err(ConfigError::CutoffAboveNyquist { ratio })
        } else {
            Ok(ratio)
        }
    }

    /// Whether the requested cutoff was replaced by the clamped ratio
    pub fn cutoff_clamped(&self) -> bool {
        self.cutoff_clamped
    }

    /// `(b0, b1, b2, a1, a2)`
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64) {
        (self.b0, self.b1, self.b2, self.a1, self.a2)
    }

    /// Most recent output, if any sample has been filtered or seeded
    pub fn output(&self) -> Option<f64> {
        match self.history {
            History::Uninitialized => None,
            _ => Some(self.outputs[0]),
        }
    }

    /// Clear the history
    ///
    /// `Some(value)` fills the history with `value`; `None` makes the next
    /// two samples pass straight through.
    pub fn reset(&mut self, initial: Option<f64>) {
        match initial {
            Some(value) => {
                self.inputs = [value; 3];
                self.outputs = [value; 3];
                self.history = History::Steady;
            }
            None => {
                self.inputs = [0.0; 3];
                self.outputs = [0.0; 3];
                self.history = History::Uninitialized;
            }
        }
    }

    /// Feed one sample and return the filtered estimate
    pub fn run(&mut self, z: f64) -> f64 {
        self.inputs = [z, self.inputs[0], self.inputs[1]];
        self.outputs = [0.0, self.outputs[0], self.outputs[1]];

        let y = match self.history {
            History::Uninitialized => {
                self.history = History::Warming(1);
                z
            }
            History::Warming(n) if n < 2 => {
                self.history = History::Warming(n + 1);
                z
            }
            History::Warming(_) | History::Steady => {
                self.history = History::Steady;
                let [z0, z1, z2] = self.inputs;
                let [_, y1, y2] = self.outputs;
                self.b0 * z0 + self.b1 * z1 + self.b2 * z2 + self.a1 * y1 + self.a2 * y2
            }
        };

        self.outputs[0] = y;
        y
    }
}
