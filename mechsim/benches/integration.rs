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
//! Benchmarks comparing integrator cost on the bundled models
//!
//! These benchmarks measure:
//! - Cost of one simulated second per method for the single and double pendulum
//! - Substep overhead of `simulate` against hand-rolled `time_step` loops
//! - Ensemble throughput for growing member counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mechsim::models::{DoublePendulum, DoublePendulumParams, Pendulum};
use mechsim::{Ensemble, Method, Simulator};

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_second");

    for method in Method::ALL {
        group.bench_with_input(
            BenchmarkId::new("pendulum", method.name()),
            &method,
            |b, &method| {
                let mut sim = Simulator::with_method(Pendulum::default(), method);
                sim.set_max_time_step(0.001);
                b.iter(|| {
                    sim.reset();
                    sim.simulate(black_box(1.0));
                    black_box(sim.position()[0])
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("double_pendulum", method.name()),
            &method,
            |b, &method| {
                let mut sim = Simulator::with_method(DoublePendulum::default(), method);
                sim.set_max_time_step(0.001);
                b.iter(|| {
                    sim.reset();
                    sim.simulate(black_box(1.0));
                    black_box(sim.position()[1])
                });
            },
        );
    }

    group.finish();
}

fn bench_substeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("substeps");
    group.sample_size(50);

    group.bench_function("simulate", |b| {
        let mut sim = Simulator::new(DoublePendulum::default());
        sim.set_max_time_step(0.001);
        b.iter(|| sim.simulate(black_box(1.0 / 60.0)));
    });

    group.bench_function("time_step_loop", |b| {
        let mut sim = Simulator::new(DoublePendulum::default());
        let dt = (1.0 / 60.0) / 17.0;
        b.iter(|| {
            for _ in 0..17 {
                sim.time_step(black_box(dt));
            }
        });
    });

    group.finish();
}

fn bench_ensemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble");
    group.sample_size(20);

    for members in [1usize, 16, 128] {
        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &members, |b, &members| {
            let mut ensemble = Ensemble::from_fn(members, |i| {
                DoublePendulum::new(
                    DoublePendulumParams::default(),
                    [1.8 + i as f64 * 1e-9, 0.5],
                    [0.0, 0.0],
                )
            });
            b.iter(|| ensemble.simulate(black_box(0.1)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_methods, bench_substeps, bench_ensemble);
criterion_main!(benches);
