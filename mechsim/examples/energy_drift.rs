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
//! Energy drift of each integration method
//!
//! Runs the default pendulum for twenty seconds with every method at the same
//! step size and prints the relative energy error every four seconds. The rate
//! of change of energy is noisy step to step, so it is smoothed with a
//! Butterworth filter before printing.

use mechsim::models::Pendulum;
use mechsim::{ButterworthFilter, Method, Simulator};

const DURATION: f64 = 20.0;
const FRAME: f64 = 0.05;
const STEP: f64 = 0.005;

fn main() {
    println!("mechsim - Energy Drift Example");
    println!("==============================\n");
    println!("Pendulum: θ0 = 1.8 rad, l = 0.3 m, step = {} s\n", STEP);

    for method in Method::ALL {
        let mut sim = Simulator::with_method(Pendulum::default(), method);
        sim.set_max_time_step(STEP);
        if let Err(err) = sim.validate_time_step() {
            eprintln!("Warning: {}", err);
        }

        let initial = sim.energy().total;
        let mut previous = initial;
        let mut rate = ButterworthFilter::new(FRAME, 1.0, None);

        println!(
            "{} (order {}, {} evaluations/step{})",
            method,
            method.order(),
            method.evaluations_per_step(),
            if method.is_symplectic() { ", symplectic" } else { "" }
        );
        println!("  {:>6}  {:>14}  {:>14}", "t (s)", "rel. error", "dE/dt (J/s)");

        let frames = (DURATION / FRAME).round() as usize;
        let per_second = (1.0 / FRAME).round() as usize;
        for frame in 1..=frames {
            sim.simulate(FRAME);
            let energy = sim.energy().total;
            let smoothed = rate.run((energy - previous) / FRAME);
            previous = energy;

            if frame % (4 * per_second) == 0 {
                println!(
                    "  {:>6.1}  {:>14.3e}  {:>14.3e}",
                    sim.time(),
                    (energy - initial) / initial,
                    smoothed
                );
            }
        }
        println!();
    }
}
