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
//! Binding a system to its integrator
//!
//! [`Simulator`] owns one model and the [`Integrator`] sized for it, and adds
//! the driver-facing operations: single steps, substepped frames, and
//! `simulate(duration)`, which never lets a substep exceed the configured
//! maximum.
//!
//! # Example
//!
//! ```
//! use mechsim::models::Pendulum;
//! use mechsim::Simulator;
//!
//! let mut sim = Simulator::new(Pendulum::default());
//! sim.system_mut().set_damping(0.01);
//! sim.set_max_time_step(0.005);
//!
//! sim.simulate(1.0 / 30.0);
//! let [total, kinetic, potential] = sim.energy().as_array();
//! assert!((total - (kinetic + potential)).abs() < 1e-12);
//! ```

use crate::error::ConfigError;
use crate::integration::{Integrator, Method};
use crate::system::{DynamicalSystem, Energy, MechanicalSystem};

/// Upper bound on the substeps a single `simulate` call may take
pub const MAX_SUBSTEPS: usize = 100_000_000;

/// A model together with the integrator that advances it
pub struct Simulator<S> {
    system: S,
    integrator: Integrator,
    max_time_step: f64,
    warn_on_invalid: bool,
}

impl<S: DynamicalSystem> Simulator<S> {
    /// Wrap `system` using its default method and maximum step
    pub fn new(system: S) -> Self {
        let method = system.default_method();
        Self::with_method(system, method)
    }

    /// Wrap `system` with an explicit integration method
    pub fn with_method(system: S, method: Method) -> Self {
        let max_time_step = system.default_max_time_step();
        assert!(
            max_time_step > 0.0 && max_time_step.is_finite(),
            "Timestep must be positive and finite"
        );
        let integrator = Integrator::for_system(&system, method);
        Simulator {
            system,
            integrator,
            max_time_step,
            warn_on_invalid: true,
        }
    }

    /// The wrapped system
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Mutable access for parameter changes between simulate calls
    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }

    /// Unwrap the system
    pub fn into_inner(self) -> S {
        self.system
    }

    /// Integration method in use
    pub fn method(&self) -> Method {
        self.integrator.method()
    }

    /// Switch integration method
    pub fn set_method(&mut self, method: Method) {
        self.integrator.set_method(method);
    }

    /// Largest substep `simulate` takes (s)
    pub fn max_time_step(&self) -> f64 {
        self.max_time_step
    }

    /// Set the largest substep `simulate` may take
    ///
    /// # Panics
    ///
    /// Panics if `dt` is non-positive, NaN, or infinite
    pub fn set_max_time_step(&mut self, dt: f64) {
        assert!(dt > 0.0 && dt.is_finite(), "Timestep must be positive and finite");
        self.max_time_step = dt;
    }

    /// Whether a warning is printed when a step produces a non-finite state
    pub fn set_warn_on_invalid(&mut self, warn: bool) {
        self.warn_on_invalid = warn;
    }

    /// Check the maximum step for likely precision or stability problems
    ///
    /// Extremely small steps lose precision when accumulated in f64, while
    /// steps above one second are almost certainly unstable for the models
    /// in this crate.
    pub fn validate_time_step(&self) -> Result<(), ConfigError> {
        let dt = self.max_time_step;
        if dt < 1e-9 {
            return Err(ConfigError::TimestepTooSmall { dt });
        }
        if dt > 1.0 {
            return Err(ConfigError::TimestepTooLarge { dt });
        }
        Ok(())
    }

    /// Advance one step of `dt`
    ///
    /// # Panics
    ///
    /// Panics if `dt` is non-positive or not finite
    pub fn time_step(&mut self, dt: f64) {
        self.integrator.time_step(&mut self.system, dt);
        self.check_state();
    }

    /// Advance `total` seconds in `substeps` equal substeps
    ///
    /// # Panics
    ///
    /// Panics if `total` is non-positive or not finite, or `substeps` is zero
    pub fn time_step_substeps(&mut self, total: f64, substeps: usize) {
        self.integrator
            .time_step_substeps(&mut self.system, total, substeps);
        self.check_state();
    }

    /// Advance `duration` seconds without any substep exceeding the maximum
    ///
    /// Uses `n = ceil(duration / max_time_step)` substeps of `duration / n`.
    /// A zero duration does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or not finite, or if it needs more
    /// than [`MAX_SUBSTEPS`] substeps
    pub fn simulate(&mut self, duration: f64) {
        assert!(
            duration >= 0.0 && duration.is_finite(),
            "Duration must be non-negative and finite"
        );
        if duration == 0.0 {
            return;
        }
        let substeps = self.substeps_for(duration);
        self.time_step_substeps(duration, substeps);
    }

    /// Number of substeps `simulate(duration)` would take
    ///
    /// # Panics
    ///
    /// Panics if the count would exceed [`MAX_SUBSTEPS`]
    pub fn substeps_for(&self, duration: f64) -> usize {
        let substeps = (duration / self.max_time_step).ceil();
        assert!(
            substeps <= MAX_SUBSTEPS as f64,
            "Substep count must not exceed {}, got {}",
            MAX_SUBSTEPS,
            substeps
        );
        (substeps as usize).max(1)
    }

    /// Return the system to its initial condition
    pub fn reset(&mut self) {
        self.system.reset();
    }

    /// Elapsed simulation time (s)
    pub fn time(&self) -> f64 {
        self.system.time()
    }

    /// Current position
    pub fn position(&self) -> &[f64] {
        self.system.position()
    }

    /// Current velocity
    pub fn velocity(&self) -> &[f64] {
        self.system.velocity()
    }

    /// Packed state `[position..., velocity...]`
    pub fn state(&self) -> Vec<f64> {
        self.system.state()
    }

    fn check_state(&self) {
        if !self.warn_on_invalid {
            return;
        }
        let valid = self
            .system
            .position()
            .iter()
            .chain(self.system.velocity())
            .all(|v| v.is_finite());
        if !valid {
            eprintln!(
                "Warning: {} step produced a non-finite state at t = {}",
                self.integrator.method(),
                self.system.time()
            );
        }
    }
}

impl<S: MechanicalSystem> Simulator<S> {
    /// Mechanical energy at the current state
    pub fn energy(&self) -> Energy {
        self.system.energy()
    }
}
