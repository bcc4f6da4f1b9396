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
//! Physical models
//!
//! Each model is a small struct implementing [`DynamicalSystem`] and
//! [`MechanicalSystem`]. Physical parameters are grouped in a `*Params`
//! struct with sensible defaults and a `validate()` check; models are built
//! with `new` (panics on invalid parameters) or `try_new` (returns the
//! [`ConfigError`]).
//!
//! | Model | Coordinates | Default method | Default max step |
//! |-------|-------------|----------------|------------------|
//! | [`Pendulum`] | θ | Velocity Verlet | 0.02 s |
//! | [`DoublePendulum`] | θ1, θ2 | RK4 | 0.01 s |
//! | [`SpringMassDamper`] | x | Velocity Verlet | 0.01 s |
//!
//! [`DynamicalSystem`]: crate::system::DynamicalSystem
//! [`MechanicalSystem`]: crate::system::MechanicalSystem
//! [`ConfigError`]: crate::error::ConfigError

mod double_pendulum;
mod pendulum;
mod spring;

pub use double_pendulum::{DoublePendulum, DoublePendulumParams};
pub use pendulum::{Pendulum, PendulumParams};
pub use spring::{SpringMassDamper, SpringParams};

use std::f64::consts::PI;

/// Standard gravitational acceleration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Wrap an angle into `(-π, π]`
///
/// The integrator never wraps angles; models expose wrapped views for display.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert_eq!(wrap_angle(-PI), PI);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-15);
    }
}
