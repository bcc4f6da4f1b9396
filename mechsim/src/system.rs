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
//! The second-order dynamical system contract
//!
//! Every model in this crate is a second-order system whose state is split
//! into a position vector and a velocity vector of equal, fixed length. The
//! integrator only ever talks to a model through [`DynamicalSystem`]:
//!
//! ```text
//! d(position)/dt = velocity
//! d(velocity)/dt = dynamics(position, velocity)
//! ```
//!
//! Implementations own their state and elapsed time. The integrator reads the
//! state once per call, advances private copies of it, and writes the result
//! back through the setters.

use crate::integration::Method;

/// A second-order system that can be advanced by an [`Integrator`](crate::integration::Integrator)
///
/// # Contract
///
/// - `dimension()` is fixed for the lifetime of the value, and `position()`
///   and `velocity()` always have that length.
/// - `dynamics()` is a pure function of its arguments, the fixed physical
///   parameters, and the current control inputs (applied torque or force).
///   It must not read `self.position()` or `self.velocity()`, because
///   intermediate integrator stages evaluate it away from the committed state.
pub trait DynamicalSystem {
    /// Number of position coordinates (equal to the number of velocity coordinates)
    fn dimension(&self) -> usize;

    /// Current position (generalised coordinates)
    fn position(&self) -> &[f64];

    /// Current velocity (generalised rates)
    fn velocity(&self) -> &[f64];

    /// Overwrite the position
    fn set_position(&mut self, position: &[f64]);

    /// Overwrite the velocity
    fn set_velocity(&mut self, velocity: &[f64]);

    /// Elapsed simulation time in seconds
    fn time(&self) -> f64;

    /// Overwrite the elapsed simulation time
    fn set_time(&mut self, time: f64);

    /// Return to the initial condition with time zero
    fn reset(&mut self);

    /// Evaluate the accelerations at `(position, velocity)`
    ///
    /// Writes `dimension()` values into `acceleration`.
    fn dynamics(&self, position: &[f64], velocity: &[f64], acceleration: &mut [f64]);

    /// Packed state `[position..., velocity...]`
    fn state(&self) -> Vec<f64> {
        let mut state = Vec::with_capacity(2 * self.dimension());
        state.extend_from_slice(self.position());
        state.extend_from_slice(self.velocity());
        state
    }

    /// Integration method this model is usually run with
    fn default_method(&self) -> Method {
        Method::Rk4
    }

    /// Largest substep `simulate` should take for this model, in seconds
    fn default_max_time_step(&self) -> f64 {
        0.01
    }
}

/// A system that can report its mechanical energy
pub trait MechanicalSystem: DynamicalSystem {
    /// Energy at the current state
    fn energy(&self) -> Energy;
}

/// Mechanical energy breakdown in joules
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Energy {
    /// Kinetic plus potential
    pub total: f64,
    /// Kinetic energy
    pub kinetic: f64,
    /// Potential energy relative to the model's datum
    pub potential: f64,
}

impl Energy {
    /// Build from kinetic and potential parts
    pub fn new(kinetic: f64, potential: f64) -> Self {
        Energy {
            total: kinetic + potential,
            kinetic,
            potential,
        }
    }

    /// `[total, kinetic, potential]`
    pub fn as_array(&self) -> [f64; 3] {
        [self.total, self.kinetic, self.potential]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FreeParticle {
        x: [f64; 2],
        v: [f64; 2],
        t: f64,
    }

    impl DynamicalSystem for FreeParticle {
        fn dimension(&self) -> usize {
            2
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
            self.t
        }
        fn set_time(&mut self, time: f64) {
            self.t = time;
        }
        fn reset(&mut self) {
            self.x = [0.0; 2];
            self.v = [0.0; 2];
            self.t = 0.0;
        }
        fn dynamics(&self, _position: &[f64], _velocity: &[f64], acceleration: &mut [f64]) {
            acceleration.fill(0.0);
        }
    }

    #[test]
    fn test_packed_state_order() {
        let particle = FreeParticle { x: [1.0, 2.0], v: [3.0, 4.0], t: 0.0 };
        assert_eq!(particle.state(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_default_configuration() {
        let particle = FreeParticle { x: [0.0; 2], v: [0.0; 2], t: 0.0 };
        assert_eq!(particle.default_method(), Method::Rk4);
        assert_eq!(particle.default_max_time_step(), 0.01);
    }

    #[test]
    fn test_energy_sum() {
        let energy = Energy::new(1.5, 2.0);
        assert_eq!(energy.total, 3.5);
        assert_eq!(energy.as_array(), [3.5, 1.5, 2.0]);
        assert_eq!(Energy::default().as_array(), [0.0, 0.0, 0.0]);
    }
}
