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
//! Single rigid pendulum with damping and applied torque
//!
//! # Equation of Motion
//!
//! ```text
//! m*l²*θ'' + c*θ' + m*g*l*sin(θ) = τ
//! θ'' = τ/(m*l²) - c*θ'/(m*l²) - (g/l)*sin(θ)
//! ```
//!
//! θ is measured from the hanging-down position, so the potential energy
//! datum at θ = 0 makes the rest state carry exactly zero energy.

use crate::error::{ensure_finite, ensure_positive, ConfigError};
use crate::integration::Method;
use crate::models::{wrap_angle, STANDARD_GRAVITY};
use crate::system::{DynamicalSystem, Energy, MechanicalSystem};

/// Physical parameters of a [`Pendulum`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    /// Bob mass (kg)
    pub mass: f64,
    /// Rod length (m)
    pub length: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Viscous damping at the pivot (N·m·s); negative values pump energy in
    pub damping: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        PendulumParams {
            mass: 1.0,
            length: 0.3,
            gravity: STANDARD_GRAVITY,
            damping: 0.0,
        }
    }
}

impl PendulumParams {
    /// Check that mass and length are positive and every value is finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("length", self.length)?;
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("damping", self.damping)?;
        Ok(())
    }
}

/// Single pendulum, state `(θ, ω)`
///
/// # Example
///
/// ```
/// use mechsim::models::{Pendulum, PendulumParams};
/// use mechsim::MechanicalSystem;
///
/// let pendulum = Pendulum::new(PendulumParams::default(), 0.0, 0.0);
/// assert_eq!(pendulum.energy().as_array(), [0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Pendulum {
    params: PendulumParams,
    initial_angle: f64,
    initial_rate: f64,
    angle: [f64; 1],
    rate: [f64; 1],
    torque: f64,
    time: f64,
}

impl Pendulum {
    /// Create a pendulum released at `angle` (rad) with `rate` (rad/s)
    ///
    /// # Panics
    ///
    /// Panics if the parameters fail [`PendulumParams::validate`]
    pub fn new(params: PendulumParams, angle: f64, rate: f64) -> Self {
        match Self::try_new(params, angle, rate) {
            Ok(pendulum) => pendulum,
            Err(err) => panic!("Invalid pendulum configuration: {}", err),
        }
    }

    /// Create a pendulum, reporting invalid parameters as an error
    pub fn try_new(params: PendulumParams, angle: f64, rate: f64) -> Result<Self, ConfigError> {
        params.validate()?;
        ensure_finite("initial angle", angle)?;
        ensure_finite("initial rate", rate)?;
        Ok(Pendulum {
            params,
            initial_angle: angle,
            initial_rate: rate,
            angle: [angle],
            rate: [rate],
            torque: 0.0,
            time: 0.0,
        })
    }

    /// Physical parameters
    pub fn params(&self) -> &PendulumParams {
        &self.params
    }

    /// Current angle θ (rad), unwrapped
    pub fn angle(&self) -> f64 {
        self.angle[0]
    }

    /// Current angle wrapped into `(-π, π]`
    pub fn wrapped_angle(&self) -> f64 {
        wrap_angle(self.angle[0])
    }

    /// Current angular rate ω (rad/s)
    pub fn rate(&self) -> f64 {
        self.rate[0]
    }

    /// Damping constant c (N·m·s)
    pub fn damping(&self) -> f64 {
        self.params.damping
    }

    /// Set the damping constant
    ///
    /// # Panics
    ///
    /// Panics if `c` is not finite
    pub fn set_damping(&mut self, c: f64) {
        assert!(c.is_finite(), "Damping must be finite");
        self.params.damping = c;
    }

    /// Applied torque τ (N·m)
    pub fn torque(&self) -> f64 {
        self.torque
    }

    /// Set the applied torque
    ///
    /// # Panics
    ///
    /// Panics if `tau` is not finite
    pub fn set_torque(&mut self, tau: f64) {
        assert!(tau.is_finite(), "Torque must be finite");
        self.torque = tau;
    }

    /// Change the state `reset` returns to; the current state is unchanged
    pub fn set_initial_state(&mut self, angle: f64, rate: f64) {
        assert!(
            angle.is_finite() && rate.is_finite(),
            "Initial state must be finite"
        );
        self.initial_angle = angle;
        self.initial_rate = rate;
    }

    /// Bob position `(x, y)` with the pivot at the origin and y up
    pub fn bob_position(&self) -> (f64, f64) {
        let l = self.params.length;
        let th = self.angle[0];
        (l * th.sin(), -l * th.cos())
    }

    /// Small-angle period `2π√(l/g)` (s)
    pub fn small_angle_period(&self) -> f64 {
        2.0 * std::f64::consts::PI * (self.params.length / self.params.gravity).sqrt()
    }
}

impl Default for Pendulum {
    fn default() -> Self {
        Pendulum::new(PendulumParams::default(), 1.8, 0.0)
    }
}

impl DynamicalSystem for Pendulum {
    fn dimension(&self) -> usize {
        1
    }

    fn position(&self) -> &[f64] {
        &self.angle
    }

    fn velocity(&self) -> &[f64] {
        &self.rate
    }

    fn set_position(&mut self, position: &[f64]) {
        self.angle.copy_from_slice(position);
    }

    fn set_velocity(&mut self, velocity: &[f64]) {
        self.rate.copy_from_slice(velocity);
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn reset(&mut self) {
        self.angle = [self.initial_angle];
        self.rate = [self.initial_rate];
        self.time = 0.0;
    }

    fn dynamics(&self, position: &[f64], velocity: &[f64], acceleration: &mut [f64]) {
        let PendulumParams { mass: m, length: l, gravity: g, damping: c } = self.params;
        let th = position[0];
        let w = velocity[0];
        let inertia = m * l * l;

        acceleration[0] = self.torque / inertia - (c * w) / inertia - (g / l) * th.sin();
    }

    fn default_method(&self) -> Method {
        Method::VelocityVerlet
    }

    fn default_max_time_step(&self) -> f64 {
        0.02
    }
}

impl MechanicalSystem for Pendulum {
    fn energy(&self) -> Energy {
        let PendulumParams { mass: m, length: l, gravity: g, .. } = self.params;
        let th = self.angle[0];
        let w = self.rate[0];

        let y = -l * th.cos();
        let dx = l * th.cos() * w;
        let dy = l * th.sin() * w;
        let kinetic = 0.5 * m * (dx * dx + dy * dy);
        let potential = m * g * (y + l);
        Energy::new(kinetic, potential)
    }
}
