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
//! Runge-Kutta 4th order (RK4) step
//!
//! The RK4 method computes four intermediate derivatives per step:
//!
//! ```text
//! k1 = f(z)
//! k2 = f(z + k1*dt/2)
//! k3 = f(z + k2*dt/2)
//! k4 = f(z + k3*dt)
//! z(t + dt) = z(t) + (k1 + 2*k2 + 2*k3 + k4)*dt/6
//! ```
//!
//! For a second-order system the state is `z = [x, v]` and the derivative
//! is `f(z) = [v, a(x, v)]`, so the position slope of each stage is simply
//! the velocity of the point it was evaluated at.
//!
//! Fourth order with four evaluations per step. It is not symplectic, so on
//! long undamped runs the energy drifts slowly, but its short-horizon
//! accuracy makes it the default for the double pendulum.
//!
//! Reference: Press et al., Numerical Recipes (3rd ed., 2007), Section 17.1.

use super::Scratch;
use crate::system::DynamicalSystem;

pub(super) fn step<S: DynamicalSystem + ?Sized>(system: &S, s: &mut Scratch, dt: f64) {
    let n = s.position.len();
    let half_dt = 0.5 * dt;

    // k1 = f(z)
    system.dynamics(&s.position, &s.velocity, &mut s.acceleration);
    for i in 0..n {
        s.sum_position[i] = s.velocity[i];
        s.sum_velocity[i] = s.acceleration[i];
        s.stage_position[i] = s.position[i] + half_dt * s.velocity[i];
        s.stage_velocity[i] = s.velocity[i] + half_dt * s.acceleration[i];
    }

    // k2 = f(z + k1*dt/2)
    system.dynamics(&s.stage_position, &s.stage_velocity, &mut s.stage_acceleration);
    for i in 0..n {
        let kx = s.stage_velocity[i];
        let kv = s.stage_acceleration[i];
        s.sum_position[i] += 2.0 * kx;
        s.sum_velocity[i] += 2.0 * kv;
        s.stage_position[i] = s.position[i] + half_dt * kx;
        s.stage_velocity[i] = s.velocity[i] + half_dt * kv;
    }

    // k3 = f(z + k2*dt/2)
    system.dynamics(&s.stage_position, &s.stage_velocity, &mut s.stage_acceleration);
    for i in 0..n {
        let kx = s.stage_velocity[i];
        let kv = s.stage_acceleration[i];
        s.sum_position[i] += 2.0 * kx;
        s.sum_velocity[i] += 2.0 * kv;
        s.stage_position[i] = s.position[i] + dt * kx;
        s.stage_velocity[i] = s.velocity[i] + dt * kv;
    }

    // k4 = f(z + k3*dt)
    system.dynamics(&s.stage_position, &s.stage_velocity, &mut s.stage_acceleration);
    let sixth_dt = dt / 6.0;
    for i in 0..n {
        s.sum_position[i] += s.stage_velocity[i];
        s.sum_velocity[i] += s.stage_acceleration[i];
        s.position[i] += sixth_dt * s.sum_position[i];
        s.velocity[i] += sixth_dt * s.sum_velocity[i];
    }
}
