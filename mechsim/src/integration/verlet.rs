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
//! Velocity Verlet step (SYM2)
//!
//! Two evaluations per step, second order, symplectic. For conservative
//! models (undamped pendulum, undamped spring) the energy error oscillates
//! around zero instead of accumulating, which is why the single pendulum and
//! the spring default to it.
//!
//! ```text
//! p' = p + v*dt + a(p, v)*dt²/2
//! a' = a(p', v)
//! v' = v + (a(p, v) + a')*dt/2
//! ```
//!
//! `a'` is evaluated with the old velocity, so velocity-dependent terms
//! (damping) are only first-order accurate.
//!
//! Reference: Hairer, Lubich & Wanner, Geometric Numerical Integration
//! (2nd ed., 2006), Section I.1.4.

use super::Scratch;
use crate::system::DynamicalSystem;

pub(super) fn step<S: DynamicalSystem + ?Sized>(system: &S, s: &mut Scratch, dt: f64) {
    let n = s.position.len();
    let half_dt_sq = 0.5 * dt * dt;

    system.dynamics(&s.position, &s.velocity, &mut s.acceleration);
    for i in 0..n {
        s.stage_position[i] = s.position[i] + s.velocity[i] * dt + s.acceleration[i] * half_dt_sq;
    }

    system.dynamics(&s.stage_position, &s.velocity, &mut s.stage_acceleration);
    for i in 0..n {
        s.velocity[i] += 0.5 * (s.acceleration[i] + s.stage_acceleration[i]) * dt;
        s.position[i] = s.stage_position[i];
    }
}
