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
//! Explicit and semi-implicit Euler steps
//!
//! ```text
//! explicit:       x(t + dt) = x(t) + v(t)*dt
//!                 v(t + dt) = v(t) + a(x(t), v(t))*dt
//!
//! semi-implicit:  v(t + dt) = v(t) + a(x(t), v(t))*dt
//!                 x(t + dt) = x(t) + v(t + dt)*dt
//! ```
//!
//! Both are first order. Using the updated velocity makes the semi-implicit
//! variant symplectic, so its energy error stays bounded on oscillators while
//! explicit Euler gains energy every step.

use super::Scratch;
use crate::system::DynamicalSystem;

pub(super) fn explicit_step<S: DynamicalSystem + ?Sized>(system: &S, s: &mut Scratch, dt: f64) {
    system.dynamics(&s.position, &s.velocity, &mut s.acceleration);

    for i in 0..s.position.len() {
        s.position[i] += dt * s.velocity[i];
        s.velocity[i] += dt * s.acceleration[i];
    }
}

pub(super) fn semi_implicit_step<S: DynamicalSystem + ?Sized>(
    system: &S,
    s: &mut Scratch,
    dt: f64,
) {
    system.dynamics(&s.position, &s.velocity, &mut s.acceleration);

    for i in 0..s.position.len() {
        s.velocity[i] += dt * s.acceleration[i];
        s.position[i] += dt * s.velocity[i];
    }
}
