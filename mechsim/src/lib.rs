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
//! # mechsim
//!
//! Small mechanical simulations driven by fixed-step numerical integrators.
//!
//! ## Features
//!
//! - **Second-order system contract**: models expose split position/velocity
//!   state and an acceleration function through [`DynamicalSystem`]
//! - **Fixed-step integrators**: explicit Euler, classic RK4, semi-implicit
//!   Euler and velocity Verlet, sharing pre-sized scratch buffers
//! - **Models**: single pendulum, double pendulum, spring-mass-damper, each
//!   reporting kinetic and potential energy
//! - **Ensembles**: batches of perturbed runs, stepped with Rayon when the
//!   `parallel` feature is enabled
//! - **Filtering**: a second-order Butterworth low-pass for noisy telemetry
//!
//! ## Example
//!
//! ```rust
//! use mechsim::models::DoublePendulum;
//! use mechsim::{Method, Simulator};
//!
//! let mut sim = Simulator::with_method(DoublePendulum::default(), Method::Rk4);
//! let start = sim.energy().total;
//!
//! for _ in 0..60 {
//!     sim.simulate(1.0 / 60.0);
//! }
//!
//! assert!((sim.time() - 1.0).abs() < 1e-9);
//! assert!((sim.energy().total - start).abs() < 1e-3 * start.abs().max(1.0));
//! ```

#![warn(missing_docs)]

/// Configuration errors
pub mod error;

/// The dynamical system contract
pub mod system;

/// Numerical integration methods
pub mod integration;

/// Binding a system to its integrator
pub mod simulation;

/// Physical models
pub mod models;

/// Batches of independent simulations
pub mod ensemble;

/// Low-pass filtering of telemetry
pub mod filter;

pub use ensemble::Ensemble;
pub use error::ConfigError;
pub use filter::ButterworthFilter;
pub use integration::{Integrator, Method};
pub use simulation::Simulator;
pub use system::{DynamicalSystem, Energy, MechanicalSystem};
