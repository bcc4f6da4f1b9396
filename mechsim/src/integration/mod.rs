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
//! Fixed-step numerical integration of second-order systems
//!
//! This module advances any [`DynamicalSystem`] with one of four fixed-step
//! methods. Each method has different accuracy, stability, and energy
//! behaviour.
//!
//! # Methods
//!
//! - **Euler**: First order, one evaluation per step. Energy grows on
//!   oscillatory systems; useful mainly as a baseline.
//! - **RK4 (Runge-Kutta 4th order)**: Four evaluations per step, high
//!   pointwise accuracy, slow energy drift.
//! - **Semi-implicit Euler**: First order, one evaluation, symplectic.
//! - **Velocity Verlet**: Second order, two evaluations, symplectic.
//!
//! # Choosing a Method
//!
//! - **Velocity Verlet**: Best for long-running undamped oscillators where
//!   bounded energy error matters more than phase accuracy.
//!
//! - **RK4**: Best for chaotic or strongly nonlinear models (the double
//!   pendulum) where short-horizon accuracy matters.
//!
//! # Timestep Guidelines
//!
//! - Too small: Numerical precision issues and wasted computation
//! - Too large: Instability and inaccuracy
//! - Substeps: `time_step_substeps` splits a frame into equal substeps but
//!   advances the clock once, so repeated frames do not accumulate rounding
//!   error in the time value.

use crate::system::DynamicalSystem;
use std::fmt;

mod euler;
mod rk4;
mod verlet;

/// Integration method applied on every substep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Explicit (forward) Euler
    Euler,
    /// Classic 4-stage Runge-Kutta
    Rk4,
    /// Semi-implicit (symplectic) Euler: velocity first, then position
    SemiImplicitEuler,
    /// Velocity Verlet (second-order symplectic)
    VelocityVerlet,
}

impl Method {
    /// Every supported method
    pub const ALL: [Method; 4] = [
        Method::Euler,
        Method::Rk4,
        Method::SemiImplicitEuler,
        Method::VelocityVerlet,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Method::Euler => "Euler",
            Method::Rk4 => "Runge-Kutta 4",
            Method::SemiImplicitEuler => "Semi-implicit Euler",
            Method::VelocityVerlet => "Velocity Verlet",
        }
    }

    /// Global order of accuracy
    pub fn order(&self) -> usize {
        match self {
            Method::Euler | Method::SemiImplicitEuler => 1,
            Method::VelocityVerlet => 2,
            Method::Rk4 => 4,
        }
    }

    /// Calls to [`DynamicalSystem::dynamics`] per substep
    pub fn evaluations_per_step(&self) -> usize {
        match self {
            Method::Euler | Method::SemiImplicitEuler => 1,
            Method::VelocityVerlet => 2,
            Method::Rk4 => 4,
        }
    }

    /// Whether the method preserves phase-space volume (bounded energy error)
    pub fn is_symplectic(&self) -> bool {
        matches!(self, Method::SemiImplicitEuler | Method::VelocityVerlet)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Buffers owned by one integrator and reused across steps
///
/// `position`/`velocity` hold the working copy of the state. Every other
/// buffer is stage storage and never aliases the working copy.
struct Scratch {
    position: Vec<f64>,
    velocity: Vec<f64>,
    acceleration: Vec<f64>,
    stage_position: Vec<f64>,
    stage_velocity: Vec<f64>,
    stage_acceleration: Vec<f64>,
    sum_position: Vec<f64>,
    sum_velocity: Vec<f64>,
}

impl Scratch {
    fn new(dimension: usize) -> Self {
        Scratch {
            position: vec![0.0; dimension],
            velocity: vec![0.0; dimension],
            acceleration: vec![0.0; dimension],
            stage_position: vec![0.0; dimension],
            stage_velocity: vec![0.0; dimension],
            stage_acceleration: vec![0.0; dimension],
            sum_position: vec![0.0; dimension],
            sum_velocity: vec![0.0; dimension],
        }
    }

    fn dimension(&self) -> usize {
        self.position.len()
    }
}

/// Fixed-step integrator for one system
///
/// The integrator owns no physical state. It is sized for a single system
/// dimension when built and must only be used with systems of that
/// dimension; anything else is a programming error and panics.
///
/// # Example
///
/// ```
/// use mechsim::integration::{Integrator, Method};
/// use mechsim::models::Pendulum;
/// use mechsim::DynamicalSystem;
///
/// let mut pendulum = Pendulum::default();
/// let mut integrator = Integrator::for_system(&pendulum, Method::VelocityVerlet);
///
/// integrator.time_step_substeps(&mut pendulum, 0.1, 10);
/// assert_eq!(pendulum.time(), 0.1);
/// ```
pub struct Integrator {
    method: Method,
    scratch: Scratch,
}

impl Integrator {
    /// Create an integrator for systems of the given dimension
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero
    pub fn new(dimension: usize, method: Method) -> Self {
        assert!(dimension > 0, "State dimension must be at least 1");
        Integrator {
            method,
            scratch: Scratch::new(dimension),
        }
    }

    /// Create an integrator sized for `system`
    pub fn for_system<S: DynamicalSystem + ?Sized>(system: &S, method: Method) -> Self {
        Self::new(system.dimension(), method)
    }

    /// Dimension this integrator was built for
    pub fn dimension(&self) -> usize {
        self.scratch.dimension()
    }

    /// Method applied on each substep
    pub fn method(&self) -> Method {
        self.method
    }

    /// Change the method; takes effect on the next call
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Advance `system` by a single step of `dt`
    ///
    /// # Panics
    ///
    /// Panics if `dt` is non-positive or not finite, or on dimension mismatch
    pub fn time_step<S: DynamicalSystem + ?Sized>(&mut self, system: &mut S, dt: f64) {
        self.time_step_substeps(system, dt, 1);
    }

    /// Advance `system` by `total` seconds using `substeps` equal substeps
    ///
    /// The state is copied in once, the method is applied `substeps` times
    /// with `dt = total / substeps`, and the result is written back. Time is
    /// advanced by `total` exactly once.
    ///
    /// # Panics
    ///
    /// Panics if `total` is non-positive or not finite, if `substeps` is
    /// zero, or if the system's dimension differs from the integrator's.
    pub fn time_step_substeps<S: DynamicalSystem + ?Sized>(
        &mut self,
        system: &mut S,
        total: f64,
        substeps: usize,
    ) {
        assert!(
            total > 0.0 && total.is_finite(),
            "Timestep must be positive and finite"
        );
        assert!(substeps > 0, "Number of substeps must be at least 1");
        self.check_dimension(system);

        let dt = total / substeps as f64;
        let scratch = &mut self.scratch;
        scratch.position.copy_from_slice(system.position());
        scratch.velocity.copy_from_slice(system.velocity());

        for _ in 0..substeps {
            match self.method {
                Method::Euler => euler::explicit_step(&*system, scratch, dt),
                Method::SemiImplicitEuler => euler::semi_implicit_step(&*system, scratch, dt),
                Method::Rk4 => rk4::step(&*system, scratch, dt),
                Method::VelocityVerlet => verlet::step(&*system, scratch, dt),
            }
        }

        system.set_position(&scratch.position);
        system.set_velocity(&scratch.velocity);
        let t = system.time();
        system.set_time(t + total);
    }

    fn check_dimension<S: DynamicalSystem + ?Sized>(&self, system: &S) {
        let expected = self.dimension();
        assert_eq!(
            system.dimension(),
            expected,
            "System dimension does not match integrator dimension"
        );
        assert_eq!(
            system.position().len(),
            expected,
            "Position length does not match integrator dimension"
        );
        assert_eq!(
            system.velocity().len(),
            expected,
            "Velocity length does not match integrator dimension"
        );
    }
}
