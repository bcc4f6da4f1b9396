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
//! Planar double pendulum
//!
//! Two massless links of equal length `l` in series, with point masses `m1`
//! at the elbow and `m2` at the tip. Angles are measured from the horizontal
//! x-axis with y up, so the hanging rest state is `(-π/2, -π/2)` and the
//! inverted equilibrium is `(π/2, π/2)`.
//!
//! # Equations of Motion
//!
//! The accelerations are the closed-form Lagrangian equations of motion,
//! including joint moments `M1`, `M2` and external forces `F1`, `F2` applied
//! at the two joints. Viscous joint damping enters as
//!
//! ```text
//! M1 = -c*ω1
//! M2 = -c*(ω2 - ω1)
//! ```
//!
//! The system is chaotic: the expressions below must be kept term for term,
//! since any algebraic rearrangement changes trajectories after a few
//! seconds of simulated time.

use crate::error::{ensure_finite, ensure_positive, ConfigError};
use crate::integration::Method;
use crate::models::STANDARD_GRAVITY;
use crate::system::{DynamicalSystem, Energy, MechanicalSystem};

/// Physical parameters of a [`DoublePendulum`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulumParams {
    /// Mass at the end of the first link (kg)
    pub mass1: f64,
    /// Mass at the end of the second link (kg)
    pub mass2: f64,
    /// Length of each link (m)
    pub length: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Viscous damping in both joints (N·m·s)
    pub damping: f64,
}

impl Default for DoublePendulumParams {
    fn default() -> Self {
        DoublePendulumParams {
            mass1: 1.0,
            mass2: 1.0,
            length: 1.0,
            gravity: STANDARD_GRAVITY,
            damping: 0.0,
        }
    }
}

impl DoublePendulumParams {
    /// Check that masses and length are positive and every value is finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("mass1", self.mass1)?;
        ensure_positive("mass2", self.mass2)?;
        ensure_positive("length", self.length)?;
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("damping", self.damping)?;
        Ok(())
    }

    /// Potential energy of the hanging rest state, used as the energy datum
    fn energy_datum(&self) -> f64 {
        -self.mass1 * self.gravity * self.length + -self.mass2 * self.gravity * (2.0 * self.length)
    }
}

/// Double pendulum, state `(θ1, θ2, ω1, ω2)`
#[derive(Debug, Clone)]
pub struct DoublePendulum {
    params: DoublePendulumParams,
    initial_angles: [f64; 2],
    initial_rates: [f64; 2],
    angles: [f64; 2],
    rates: [f64; 2],
    /// External forces `[F1x, F1y, F2x, F2y]` at the elbow and the tip (N)
    joint_forces: [f64; 4],
    time: f64,
}

impl DoublePendulum {
    /// Create a double pendulum with initial link angles and rates
    ///
    /// # Panics
    ///
    /// Panics if the parameters fail [`DoublePendulumParams::validate`]
    pub fn new(params: DoublePendulumParams, angles: [f64; 2], rates: [f64; 2]) -> Self {
        match Self::try_new(params, angles, rates) {
            Ok(pendulum) => pendulum,
            Err(err) => panic!("Invalid double pendulum configuration: {}", err),
        }
    }

    /// Create a double pendulum, reporting invalid parameters as an error
    pub fn try_new(
        params: DoublePendulumParams,
        angles: [f64; 2],
        rates: [f64; 2],
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        for &a in &angles {
            ensure_finite("initial angle", a)?;
        }
        for &w in &rates {
            ensure_finite("initial rate", w)?;
        }
        Ok(DoublePendulum {
            params,
            initial_angles: angles,
            initial_rates: rates,
            angles,
            rates,
            joint_forces: [0.0; 4],
            time: 0.0,
        })
    }

    /// Physical parameters
    pub fn params(&self) -> &DoublePendulumParams {
        &self.params
    }

    /// Link angles `[θ1, θ2]` (rad)
    pub fn angles(&self) -> [f64; 2] {
        self.angles
    }

    /// Link rates `[ω1, ω2]` (rad/s)
    pub fn rates(&self) -> [f64; 2] {
        self.rates
    }

    /// Joint damping constant
    pub fn damping(&self) -> f64 {
        self.params.damping
    }

    /// Set the joint damping constant
    ///
    /// # Panics
    ///
    /// Panics if `c` is not finite
    pub fn set_damping(&mut self, c: f64) {
        assert!(c.is_finite(), "Damping must be finite");
        self.params.damping = c;
    }

    /// External forces `[F1x, F1y, F2x, F2y]`
    pub fn joint_forces(&self) -> [f64; 4] {
        self.joint_forces
    }

    /// Apply external forces at the elbow (`f1`) and the tip (`f2`)
    ///
    /// # Panics
    ///
    /// Panics if any component is not finite
    pub fn set_joint_forces(&mut self, f1: (f64, f64), f2: (f64, f64)) {
        let forces = [f1.0, f1.1, f2.0, f2.1];
        assert!(forces.iter().all(|f| f.is_finite()), "Joint forces must be finite");
        self.joint_forces = forces;
    }

    /// Change the state `reset` returns to; the current state is unchanged
    pub fn set_initial_state(&mut self, angles: [f64; 2], rates: [f64; 2]) {
        assert!(
            angles.iter().chain(rates.iter()).all(|v| v.is_finite()),
            "Initial state must be finite"
        );
        self.initial_angles = angles;
        self.initial_rates = rates;
    }

    /// Positions of the elbow and the tip with the pivot at the origin
    pub fn joint_positions(&self) -> [(f64, f64); 2] {
        let l = self.params.length;
        let [th, phi] = self.angles;
        let x1 = l * th.cos();
        let y1 = l * th.sin();
        let x2 = x1 + l * phi.cos();
        let y2 = y1 + l * phi.sin();
        [(x1, y1), (x2, y2)]
    }
}

impl Default for DoublePendulum {
    fn default() -> Self {
        DoublePendulum::new(DoublePendulumParams::default(), [1.8, 0.5], [0.0, 0.0])
    }
}

impl DynamicalSystem for DoublePendulum {
    fn dimension(&self) -> usize {
        2
    }

    fn position(&self) -> &[f64] {
        &self.angles
    }

    fn velocity(&self) -> &[f64] {
        &self.rates
    }

    fn set_position(&mut self, position: &[f64]) {
        self.angles.copy_from_slice(position);
    }

    fn set_velocity(&mut self, velocity: &[f64]) {
        self.rates.copy_from_slice(velocity);
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn reset(&mut self) {
        self.angles = self.initial_angles;
        self.rates = self.initial_rates;
        self.time = 0.0;
    }

    fn default_method(&self) -> Method {
        Method::Rk4
    }

    fn dynamics(&self, position: &[f64], velocity: &[f64], acceleration: &mut [f64]) {
        let DoublePendulumParams { mass1: m1, mass2: m2, length: l, gravity: g, damping } =
            self.params;
        let [f1x, f1y, f2x, f2y] = self.joint_forces;

        let th = position[0];
        let phi = position[1];
        let dth = velocity[0];
        let dphi = velocity[1];

        let m1_moment = -dth * damping;
        let m2_moment = -(dphi - dth) * damping;

        // First link
        let two_phi = phi * 2.0;
        let two_phi_th = two_phi - th;
        let cos_th = th.cos();
        let sin_th = th.sin();
        let phi_th = phi - th;
        let l_sq = l * l;
        let two_phi_two_th = two_phi - th * 2.0;
        let cos_two_phi_th = two_phi_th.cos();

        let ddth = (1.0 / (l * l)
            * (m1_moment * 2.0 - m2_moment * 2.0 - m2_moment * phi_th.cos() * 2.0
                - f1x * l * sin_th * 2.0
                + f1y * l * cos_th * 2.0
                - f2x * l * sin_th
                + f2y * l * cos_th
                - f2y * l * cos_two_phi_th
                + f2x * l * two_phi_th.sin()
                + (dphi * dphi) * m2 * l_sq * phi_th.sin() * 2.0
                + (dth * dth) * m2 * l_sq * two_phi_two_th.sin()
                - l * g * m1 * cos_th * 2.0
                - l * g * m2 * cos_th
                + l * g * m2 * cos_two_phi_th))
            / (m1 * 2.0 + m2 - m2 * two_phi_two_th.cos());

        // Second link
        let cos_phi_th = phi_th.cos();
        let cos_phi = phi.cos();
        let sin_phi = phi.sin();
        let two_th = th * 2.0;
        let phi_two_th = phi - two_th;
        let cos_phi_two_th = phi_two_th.cos();
        let sin_phi_two_th = phi_two_th.sin();
        let m2_sq = m2 * m2;
        let dth_sq = dth * dth;
        let sin_phi_th = phi_th.sin();
        let two_phi_minus_two_th = -two_th + two_phi;

        let ddphi = -(1.0 / (l * l)
            * (m2_moment * m1 * -2.0 - m2_moment * m2 * 2.0 + m1_moment * m2 * cos_phi_th * 2.0
                - m2_moment * m2 * cos_phi_th * 2.0
                + m2_sq * l_sq * dth_sq * sin_phi_th * 2.0
                - f1x * l * m2 * sin_phi
                + f1y * l * m2 * cos_phi
                + f2x * l * m1 * sin_phi * 2.0
                - f2y * l * m1 * cos_phi * 2.0
                + f2x * l * m2 * sin_phi
                - f2y * l * m2 * cos_phi
                + f1y * l * m2 * cos_phi_two_th
                + f1x * l * m2 * sin_phi_two_th
                + f2y * l * m2 * cos_phi_two_th
                + f2x * l * m2 * sin_phi_two_th
                + (dphi * dphi) * m2_sq * l_sq * two_phi_minus_two_th.sin()
                + l * g * cos_phi * m2_sq
                - l * g * cos_phi_two_th * m2_sq
                + l * g * m1 * m2 * cos_phi
                - l * g * m1 * m2 * cos_phi_two_th
                + m1 * m2 * l_sq * dth_sq * sin_phi_th * 2.0))
            / (m2 * (m1 * 2.0 + m2 - m2 * two_phi_minus_two_th.cos()));

        acceleration[0] = ddth;
        acceleration[1] = ddphi;
    }
}

impl MechanicalSystem for DoublePendulum {
    fn energy(&self) -> Energy {
        let DoublePendulumParams { mass1: m1, mass2: m2, length: l, gravity: g, .. } = self.params;
        let [th, phi] = self.angles;
        let [w1, w2] = self.rates;

        let y1 = l * th.sin();
        let y2 = y1 + l * phi.sin();
        let dx1 = -l * th.sin() * w1;
        let dy1 = l * th.cos() * w1;
        let dx2 = dx1 - l * phi.sin() * w2;
        let dy2 = dy1 + l * phi.cos() * w2;

        let kinetic = 0.5 * (m1 * (dx1 * dx1 + dy1 * dy1) + m2 * (dx2 * dx2 + dy2 * dy2));
        let potential = g * (m1 * y1 + m2 * y2) - self.params.energy_datum();
        Energy::new(kinetic, potential)
    }
}
