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
//! Edge case tests for time bookkeeping, preconditions, and resets

use mechsim::models::{
    DoublePendulum, DoublePendulumParams, Pendulum, PendulumParams, SpringMassDamper,
    SpringParams,
};
use mechsim::{ConfigError, DynamicalSystem, Integrator, MechanicalSystem, Method, Simulator};

#[test]
fn test_substeps_advance_time_exactly() {
    for method in Method::ALL {
        for substeps in 1..=17 {
            let mut sim = Simulator::with_method(Pendulum::default(), method);
            sim.time_step_substeps(0.1, substeps);
            assert_eq!(
                sim.time(),
                0.1,
                "{} with {} substeps should advance exactly 0.1 s",
                method,
                substeps
            );
        }
    }
}

#[test]
fn test_repeated_frames_accumulate_one_addition_each() {
    let mut sim = Simulator::new(DoublePendulum::default());
    let frame = 1.0 / 60.0;
    let mut expected = 0.0;
    for _ in 0..120 {
        sim.simulate(frame);
        expected += frame;
        assert_eq!(sim.time(), expected);
    }
}

#[test]
fn test_simulate_zero_duration_is_noop() {
    let mut sim = Simulator::new(Pendulum::default());
    let before = sim.state();
    sim.simulate(0.0);
    assert_eq!(sim.state(), before);
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn test_short_duration_single_substep() {
    let mut a = Simulator::new(Pendulum::default());
    let mut b = Simulator::new(Pendulum::default());
    a.simulate(0.001);
    b.time_step(0.001);
    assert_eq!(a.state(), b.state());
}

#[test]
fn test_energy_exactly_zero_at_rest() {
    let pendulum = Pendulum::new(PendulumParams::default(), 0.0, 0.0);
    assert_eq!(pendulum.energy().as_array(), [0.0, 0.0, 0.0]);

    let spring = SpringMassDamper::new(SpringParams::default(), 0.0, 0.0);
    assert_eq!(spring.energy().as_array(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_pendulum_at_rest_stays_at_rest() {
    for method in Method::ALL {
        let mut sim = Simulator::with_method(
            Pendulum::new(PendulumParams::default(), 0.0, 0.0),
            method,
        );
        sim.simulate(5.0);
        assert_eq!(sim.position(), &[0.0]);
        assert_eq!(sim.velocity(), &[0.0]);
    }
}

#[test]
fn test_reset_restores_initial_condition() {
    let mut sim = Simulator::new(DoublePendulum::default());
    let initial = sim.state();
    let initial_energy = sim.energy();
    sim.simulate(2.0);
    assert_ne!(sim.state(), initial);

    sim.reset();
    assert_eq!(sim.state(), initial);
    assert_eq!(sim.time(), 0.0);
    assert_eq!(sim.energy(), initial_energy);
}

#[test]
fn test_parameter_change_between_calls() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.simulate(0.5);
    sim.system_mut().set_damping(0.05);
    let before = sim.energy().total;
    sim.simulate(1.0);
    assert!(sim.energy().total < before);
}

#[test]
fn test_method_switch_mid_run() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.simulate(0.2);
    sim.set_method(Method::Rk4);
    assert_eq!(sim.method(), Method::Rk4);
    sim.simulate(0.2);
    assert!((sim.time() - 0.4).abs() < 1e-15);
}

#[test]
fn test_invalid_parameters_rejected() {
    let params = PendulumParams { length: 0.0, ..PendulumParams::default() };
    assert_eq!(
        Pendulum::try_new(params, 0.0, 0.0).err(),
        Some(ConfigError::NotPositive { name: "length", value: 0.0 })
    );

    let params = DoublePendulumParams { gravity: f64::NAN, ..DoublePendulumParams::default() };
    assert!(DoublePendulum::try_new(params, [0.0, 0.0], [0.0, 0.0]).is_err());

    let params = SpringParams { mass: -1.0, ..SpringParams::default() };
    assert!(SpringMassDamper::try_new(params, 0.0, 0.0).is_err());
}

#[test]
fn test_non_finite_state_is_reported_not_fatal() {
    let mut sim = Simulator::with_method(SpringMassDamper::default(), Method::Euler);
    sim.set_warn_on_invalid(false);
    sim.set_max_time_step(1.0);
    // Explicit Euler on a stiff spring with a huge step diverges
    for _ in 0..2000 {
        sim.simulate(1.0);
    }
    assert!(!sim.position()[0].is_finite());
    assert_eq!(sim.time(), 2000.0);
}

#[test]
#[should_panic(expected = "Timestep must be positive and finite")]
fn test_zero_max_time_step() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.set_max_time_step(0.0);
}

#[test]
#[should_panic(expected = "Timestep must be positive and finite")]
fn test_nan_timestep() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.time_step(f64::NAN);
}

#[test]
#[should_panic(expected = "Number of substeps must be at least 1")]
fn test_zero_substeps() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.time_step_substeps(0.1, 0);
}

#[test]
#[should_panic(expected = "System dimension does not match integrator dimension")]
fn test_dimension_mismatch() {
    let mut integrator = Integrator::new(2, Method::Rk4);
    let mut pendulum = Pendulum::default();
    integrator.time_step(&mut pendulum, 0.01);
}

#[test]
#[should_panic(expected = "Duration must be non-negative and finite")]
fn test_infinite_duration() {
    let mut sim = Simulator::new(Pendulum::default());
    sim.simulate(f64::INFINITY);
}

#[test]
#[should_panic(expected = "Invalid double pendulum configuration")]
fn test_new_panics_on_invalid_params() {
    let params = DoublePendulumParams { length: -1.0, ..DoublePendulumParams::default() };
    DoublePendulum::new(params, [0.0, 0.0], [0.0, 0.0]);
}

#[test]
fn test_integrator_reusable_across_systems() {
    let mut integrator = Integrator::new(1, Method::VelocityVerlet);
    let mut a = Pendulum::default();
    let mut b = SpringMassDamper::default();
    integrator.time_step(&mut a, 0.01);
    integrator.time_step(&mut b, 0.01);
    assert_eq!(a.time(), 0.01);
    assert_eq!(b.time(), 0.01);
    assert_eq!(integrator.dimension(), 1);
}
