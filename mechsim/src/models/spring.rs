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
//! Spring-mass-damper
//!
//! ```text
//! m*x'' + c*x' + k*x = F
//! ```
//!
//! The linear model has a closed-form solution, which makes it the reference
//! system for checking integrator order and phase error.

use crate::error::{ensure_finite, ensure_positive, ConfigError};
use crate::integration::Method;
use crate::system::{DynamicalSystem, Energy, MechanicalSystem};

/// Physical parameters of a [`SpringMassDamper`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Mass (kg)
    pub mass: f64,
    /// Spring stiffness k (N/m)
    pub stiffness: f64,
    /// Viscous damping c (N·s/m)
    pub damping: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        SpringParams {
            mass: 1.0,
            stiffness: 10.0,
            damping: 0.0,
        }
    }
}

impl SpringParams {
    /// Check that mass and stiffness are positive and damping is finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("stiffness", self.stiffness)?;
        ensure_finite("damping", self.damping)?;
        Ok(())
    }
}

/// Mass on a linear spring with viscous damping, state `(x, v)`
#[derive(Debug, Clone)]
pub struct SpringMassDamper {
    params: SpringParams,
    initial_position: f64,
    initial_velocity: f64,
    x: [f64; 1],
    v: [f64; 1],
    force: f64,
    time: f64,
}

impl SpringMassDamper {
    /// Create a spring-mass-damper displaced by `x0` and moving at `v0`
    ///
    /// # Panics
    ///
    /// Panics if the parameters fail [`SpringParams::validate`]
    pub fn new(params: SpringParams, x0: f64, v0: f64) -> Self {
        match Self::try_new(params, x0, v0) {
            Ok(system) => system,
            Err(err) => panic!("Invalid spring configuration: {}", err),
        }
    }

    /// Create a spring-mass-damper, reporting invalid parameters as an error
    pub fn try_new(params: SpringParams, x0: f64, v0: f64) -> Result<Self, ConfigError> {
        params.validate()?;
        ensure_finite("initial position", x0)?;
        ensure_finite("initial velocity", v0)?;
        Ok(SpringMassDamper {
            params,
            initial_position: x0,
            initial_velocity: v0,
            x: [x0],
            v: [v0],
            force: 0.0,
            time: 0.0,
        })
    }

    /// Physical parameters
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Displacement from the unstretched length (m)
    pub fn displacement(&self) -> f64 {
        self.x[0]
    }

    /// Velocity (m/s)
    pub fn speed(&self) -> f64 {
        self.v[0]
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

    /// Set the applied force F (N)
    ///
    /// # Panics
    ///
    /// Panics if `force` is not finite
    pub fn set_force(&mut self, force: f64) {
        assert!(force.is_finite(), "Force must be finite");
        self.force = force;
    }

    /// Undamped natural frequency √(k/m) (rad/s)
    pub fn natural_frequency(&self) -> f64 {
        (self.params.stiffness / self.params.mass).sqrt()
    }

    /// Damping ratio c / (2√(km))
    pub fn damping_ratio(&self) -> f64 {
        self.params.damping / (2.0 * (self.params.stiffness * self.params.mass).sqrt())
    }
}

impl Default for SpringMassDamper {
    fn default() -> Self {
        SpringMassDamper::new(SpringParams::default(), 1.0, 0.0)
    }
}

impl DynamicalSystem for SpringMassDamper {
    fn dimension(&self) -> usize {
        1
    }

    fn position(&self) -> &[f64] {
        &self.x
    }

    fn velocity(&self) -> &[f64] {
        &self.v
    }

    fn set_position(&mut self, position: &[f64]) {
        self.x.copy_from_slice(position);
    }

    fn set_velocity(&mut self, velocity: &[f64]) {
        self.v.copy_from_slice(velocity);
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn reset(&mut self) {
        self.x = [self.initial_position];
        self.v = [self.initial_velocity];
        self.time = 0.0;
    }

    fn dynamics(&self, position: &[f64], velocity: &[f64], acceleration: &mut [f64]) {
        let SpringParams { mass, stiffness, damping } = self.params;
        acceleration[0] = (self.force - damping * velocity[0] - stiffness * position[0]) / mass;
    }

    fn default_method(&self) -> Method {
        Method::VelocityVerlet
    }
}

impl MechanicalSystem for SpringMassDamper {
    fn energy(&self) -> Energy {
        let kinetic = 0.5 * self.params.mass * self.v[0] * self.v[0];
        let potential = 0.5 * self.params.stiffness * self.x[0] * self.x[0];
        Energy::new(kinetic, potential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamics() {
        let params = SpringParams { mass: 2.0, stiffness: 8.0, damping: 1.0 };
        let mut spring = SpringMassDamper::new(params, 0.0, 0.0);
        let mut acc = [0.0];

        spring.dynamics(&[0.5], &[2.0], &mut acc);
        // (0 - 1*2 - 8*0.5) / 2
        assert_eq!(acc[0], -3.0);

        spring.set_force(4.0);
        spring.dynamics(&[0.0], &[0.0], &mut acc);
        assert_eq!(acc[0], 2.0);
    }

    #[test]
    fn test_energy() {
        let spring = SpringMassDamper::new(SpringParams::default(), 0.5, 2.0);
        let energy = spring.energy();
        assert_eq!(energy.kinetic, 2.0);
        assert_eq!(energy.potential, 1.25);
        assert_eq!(energy.total, 3.25);
    }

    #[test]
    fn test_characteristics() {
        let params = SpringParams { mass: 4.0, stiffness: 16.0, damping: 4.0 };
        let spring = SpringMassDamper::new(params, 1.0, 0.0);
        assert_eq!(spring.natural_frequency(), 2.0);
        assert_eq!(spring.damping_ratio(), 0.25);
    }

    #[test]
    fn test_reset() {
        let mut spring = SpringMassDamper::default();
        spring.set_position(&[0.2]);
        spring.set_velocity(&[-1.0]);
        spring.set_time(3.0);
        spring.reset();
        assert_eq!(spring.displacement(), 1.0);
        assert_eq!(spring.speed(), 0.0);
        assert_eq!(spring.time(), 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = SpringParams { stiffness: -1.0, ..Default::default() };
        assert!(SpringMassDamper::try_new(params, 0.0, 0.0).is_err());
    }
}
