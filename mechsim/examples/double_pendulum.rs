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
//! Double pendulum trajectory and sensitivity to initial conditions
//!
//! Prints the link endpoints of the default double pendulum, then runs a
//! small ensemble whose first angle differs by 1e-10 rad between members and
//! reports how quickly the spread grows.

use mechsim::models::{DoublePendulum, DoublePendulumParams};
use mechsim::{Ensemble, Simulator};

fn main() {
    println!("mechsim - Double Pendulum Example");
    println!("=================================\n");

    let mut sim = Simulator::new(DoublePendulum::default());
    let initial = sim.energy();
    println!(
        "Method: {}, max step: {} s, initial energy: {:.4} J\n",
        sim.method(),
        sim.max_time_step(),
        initial.total
    );

    println!("{:>6}  {:>18}  {:>18}  {:>12}", "t (s)", "elbow (x, y)", "tip (x, y)", "ΔE (J)");
    for _ in 0..10 {
        sim.simulate(0.5);
        let [(x1, y1), (x2, y2)] = sim.system().joint_positions();
        println!(
            "{:>6.1}  ({:>7.3}, {:>7.3})  ({:>7.3}, {:>7.3})  {:>12.3e}",
            sim.time(),
            x1,
            y1,
            x2,
            y2,
            sim.energy().total - initial.total
        );
    }

    println!("\nSensitivity: 8 members, θ1 offsets of 1e-10 rad");
    let mut ensemble = Ensemble::from_fn(8, |i| {
        DoublePendulum::new(
            DoublePendulumParams::default(),
            [1.8 + i as f64 * 1e-10, 0.5],
            [0.0, 0.0],
        )
    });

    println!("{:>6}  {:>12}  {:>12}", "t (s)", "spread θ1", "spread θ2");
    for _ in 0..15 {
        ensemble.simulate(2.0);
        let spread = ensemble.position_spread();
        let time = ensemble.member(0).map(|m| m.time()).unwrap_or_default();
        println!("{:>6.1}  {:>12.3e}  {:>12.3e}", time, spread[0], spread[1]);
    }
}
