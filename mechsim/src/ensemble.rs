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
//! Batches of independent simulations
//!
//! Chaotic models are studied by running many copies that differ only by a
//! tiny perturbation and watching them separate. [`Ensemble`] holds such a
//! batch and advances every member by the same duration. Members share
//! nothing, so with the `parallel` feature they are stepped on the rayon
//! thread pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::simulation::Simulator;
use crate::system::{DynamicalSystem, Energy, MechanicalSystem};

/// A batch of simulators advanced in lock step
///
/// # Example
///
/// ```
/// use mechsim::models::{DoublePendulum, DoublePendulumParams};
/// use mechsim::Ensemble;
///
/// let mut ensemble = Ensemble::from_fn(4, |i| {
///     let theta1 = 1.8 + i as f64 * 1e-9;
///     DoublePendulum::new(DoublePendulumParams::default(), [theta1, 0.5], [0.0, 0.0])
/// });
/// ensemble.simulate(0.5);
/// assert!(ensemble.position_spread()[0] < 1e-6);
/// ```
pub struct Ensemble<S> {
    members: Vec<Simulator<S>>,
}

impl<S: DynamicalSystem + Send> Ensemble<S> {
    /// Wrap already configured simulators
    ///
    /// # Panics
    ///
    /// Panics if the members do not all have the same dimension
    pub fn new(members: Vec<Simulator<S>>) -> Self {
        if let Some(first) = members.first() {
            let dimension = first.system().dimension();
            assert!(
                members.iter().all(|m| m.system().dimension() == dimension),
                "Ensemble members must share one dimension"
            );
        }
        Ensemble { members }
    }

    /// Build `n` members from `f(index)`, each with its model's defaults
    pub fn from_fn(n: usize, mut f: impl FnMut(usize) -> S) -> Self {
        Self::new((0..n).map(|i| Simulator::new(f(i))).collect())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the ensemble has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All members
    pub fn members(&self) -> &[Simulator<S>] {
        &self.members
    }

    /// Member at `index`
    pub fn member(&self, index: usize) -> Option<&Simulator<S>> {
        self.members.get(index)
    }

    /// Mutable member at `index`
    pub fn member_mut(&mut self, index: usize) -> Option<&mut Simulator<S>> {
        self.members.get_mut(index)
    }

    /// Advance every member by `duration` seconds
    ///
    /// Runs on the rayon pool with the `parallel` feature, otherwise
    /// falls back to [`Ensemble::simulate_sequential`].
    pub fn simulate(&mut self, duration: f64) {
        #[cfg(feature = "parallel")]
        {
            self.members
                .par_iter_mut()
                .for_each(|member| member.simulate(duration));
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.simulate_sequential(duration);
        }
    }

    /// Advance every member by `duration` seconds on the calling thread
    pub fn simulate_sequential(&mut self, duration: f64) {
        for member in &mut self.members {
            member.simulate(duration);
        }
    }

    /// Reset every member to its initial condition
    pub fn reset(&mut self) {
        for member in &mut self.members {
            member.reset();
        }
    }

    /// Per position coordinate, the largest minus the smallest value across members
    ///
    /// Empty for an empty ensemble.
    pub fn position_spread(&self) -> Vec<f64> {
        let Some(first) = self.members.first() else {
            return Vec::new();
        };
        let mut min = first.position().to_vec();
        let mut max = min.clone();
        for member in &self.members[1..] {
            for (i, &p) in member.position().iter().enumerate() {
                min[i] = min[i].min(p);
                max[i] = max[i].max(p);
            }
        }
        max.iter().zip(&min).map(|(hi, lo)| hi - lo).collect()
    }
}

impl<S: MechanicalSystem + Send> Ensemble<S> {
    /// Energy of every member, in member order
    pub fn energies(&self) -> Vec<Energy> {
        self.members.iter().map(|m| m.energy()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::Method;
    use crate::models::{
        DoublePendulum, DoublePendulumParams, Pendulum, PendulumParams, SpringMassDamper,
        SpringParams,
    };

    #[test]
    fn test_identical_members_stay_identical() {
        let mut ensemble = Ensemble::from_fn(8, |_| Pendulum::default());
        ensemble.simulate(1.0);
        assert_eq!(ensemble.len(), 8);
        assert_eq!(ensemble.position_spread(), vec![0.0]);
        for member in ensemble.members() {
            assert!((member.time() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spread_reflects_initial_conditions() {
        let ensemble = Ensemble::from_fn(3, |i| {
            Pendulum::new(PendulumParams::default(), 0.1 * i as f64, 0.0)
        });
        let spread = ensemble.position_spread();
        assert!((spread[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_members_match_individual_runs() {
        let params = SpringParams { damping: 0.3, ..SpringParams::default() };
        let mut ensemble = Ensemble::from_fn(4, |i| {
            SpringMassDamper::new(params, 1.0 + i as f64, 0.0)
        });
        ensemble.simulate(2.0);

        let mut single = Simulator::new(SpringMassDamper::new(params, 3.0, 0.0));
        single.simulate(2.0);
        let member = ensemble.member(2).unwrap();
        assert_eq!(member.position(), single.position());
        assert_eq!(member.velocity(), single.velocity());
    }

    #[test]
    fn test_sequential_matches_simulate() {
        let build = || {
            Ensemble::from_fn(5, |i| {
                DoublePendulum::new(
                    DoublePendulumParams::default(),
                    [1.8 + i as f64 * 1e-6, 0.5],
                    [0.0, 0.0],
                )
            })
        };
        let mut a = build();
        let mut b = build();
        a.simulate(2.0);
        b.simulate_sequential(2.0);

        for (x, y) in a.members().iter().zip(b.members()) {
            assert_eq!(x.state(), y.state());
            assert_eq!(x.time(), y.time());
        }
        assert_eq!(a.position_spread(), b.position_spread());
    }

    #[test]
    fn test_mixed_methods_and_reset() {
        let mut ensemble = Ensemble::new(
            Method::ALL
                .iter()
                .map(|&m| Simulator::with_method(Pendulum::default(), m))
                .collect(),
        );
        ensemble.simulate(0.5);
        assert!(ensemble.position_spread()[0] > 0.0);

        ensemble.reset();
        assert_eq!(ensemble.position_spread(), vec![0.0]);
        assert!(ensemble.energies().iter().all(|e| e.kinetic == 0.0));
    }

    #[test]
    fn test_empty_ensemble() {
        let mut ensemble: Ensemble<Pendulum> = Ensemble::new(Vec::new());
        assert!(ensemble.is_empty());
        ensemble.simulate(1.0);
        assert!(ensemble.position_spread().is_empty());
        assert!(ensemble.member(0).is_none());
    }
}
