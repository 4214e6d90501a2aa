//! One generation of trucks driven in lock-step.

use crate::aco::AcoConfig;
use crate::models::ProblemInstance;
use crate::pheromone::PheromoneModel;
use crate::random::RandomSource;

use super::truck::Truck;

/// Owns the trucks of the current generation.
///
/// Trucks only read the pheromone model while they build routes; the
/// caller updates it after the generation is finished.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::aco::AcoConfig;
/// use u_aco_cvrp::colony::Colony;
/// use u_aco_cvrp::instances::reference_instance;
/// use u_aco_cvrp::pheromone::PheromoneModel;
/// use u_aco_cvrp::random::RngSource;
///
/// let instance = reference_instance().unwrap();
/// let tau = PheromoneModel::new(instance.node_count(), 1.0);
/// let config = AcoConfig::default();
/// let mut rng = RngSource::seeded(42);
///
/// let mut colony = Colony::new(&instance);
/// colony.begin_generation(4);
/// colony.run_to_completion(&tau, &config, &mut rng, 10_000);
/// assert!(colony.all_complete());
/// assert!(colony.best_of_generation().is_some());
/// ```
pub struct Colony<'a> {
    instance: &'a ProblemInstance,
    trucks: Vec<Truck>,
}

impl<'a> Colony<'a> {
    /// Creates an empty colony for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            trucks: Vec::new(),
        }
    }

    /// Replaces the current generation with `truck_count` fresh trucks.
    pub fn begin_generation(&mut self, truck_count: usize) {
        self.trucks = (0..truck_count).map(|_| Truck::new(self.instance)).collect();
    }

    /// Advances every truck by exactly one step, in order.
    pub fn advance_all<S: RandomSource + ?Sized>(
        &mut self,
        pheromone: &PheromoneModel,
        config: &AcoConfig,
        rng: &mut S,
    ) {
        for truck in &mut self.trucks {
            truck.step(self.instance, pheromone, config, rng);
        }
    }

    /// Advances all trucks until each is complete or `max_steps` rounds
    /// have run. Returns the number of rounds taken.
    pub fn run_to_completion<S: RandomSource + ?Sized>(
        &mut self,
        pheromone: &PheromoneModel,
        config: &AcoConfig,
        rng: &mut S,
        max_steps: usize,
    ) -> usize {
        let mut steps = 0;
        while steps < max_steps && !self.all_complete() {
            self.advance_all(pheromone, config, rng);
            steps += 1;
        }
        steps
    }

    /// Returns `true` if every truck has served all customers and is back
    /// at the depot.
    pub fn all_complete(&self) -> bool {
        self.trucks.iter().all(Truck::is_complete)
    }

    /// Trucks of the current generation.
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    /// The truck with the cheapest route; ties go to the earliest truck.
    pub fn best_of_generation(&self) -> Option<&Truck> {
        let mut best: Option<(&Truck, f64)> = None;
        for truck in &self.trucks {
            let cost = truck.cost(self.instance);
            match best {
                Some((_, c)) if cost >= c => {}
                _ => best = Some((truck, cost)),
            }
        }
        best.map(|(t, _)| t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::StepPolicy;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::TourEvaluator;
    use crate::instances::reference_instance;
    use crate::models::{ViolationType, DEPOT};
    use crate::random::{RngSource, ScriptedSource};
    use proptest::prelude::*;

    fn triangle() -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 20.0],
            vec![10.0, 0.0, 15.0],
            vec![20.0, 15.0, 0.0],
        ])
        .expect("square rows");
        ProblemInstance::new(dm, vec![0, 5, 5], 10).expect("valid")
    }

    #[test]
    fn test_begin_generation_resets() {
        let p = triangle();
        let tau = PheromoneModel::new(3, 1.0);
        let mut colony = Colony::new(&p);
        colony.begin_generation(3);
        let mut rng = ScriptedSource::new(vec![0.5, 0.0]);
        colony.advance_all(&tau, &AcoConfig::default(), &mut rng);
        assert!(colony.trucks().iter().all(|t| t.path().len() == 2));
        colony.begin_generation(2);
        assert_eq!(colony.trucks().len(), 2);
        assert!(colony.trucks().iter().all(|t| t.path() == [DEPOT]));
    }

    #[test]
    fn test_advance_all_steps_each_truck_once() {
        let p = triangle();
        let tau = PheromoneModel::new(3, 1.0);
        let mut colony = Colony::new(&p);
        colony.begin_generation(2);
        // Both trucks: probabilistic move, roulette draw 0 → node 1.
        let mut rng = ScriptedSource::new(vec![0.5, 0.0]);
        colony.advance_all(&tau, &AcoConfig::default(), &mut rng);
        assert_eq!(rng.consumed(), 4);
        for t in colony.trucks() {
            assert_eq!(t.path(), &[0, 1]);
        }
    }

    #[test]
    fn test_best_of_generation_prefers_first_on_tie() {
        let p = triangle();
        let tau = PheromoneModel::new(3, 1.0);
        let mut colony = Colony::new(&p);
        colony.begin_generation(3);
        let mut rng = ScriptedSource::new(vec![0.5, 0.0]);
        colony.run_to_completion(&tau, &AcoConfig::default(), &mut rng, 50);
        assert!(colony.all_complete());
        let best = colony.best_of_generation().expect("non-empty");
        assert!(std::ptr::eq(best, &colony.trucks()[0]));
    }

    #[test]
    fn test_best_of_generation_picks_cheapest() {
        let p = triangle();
        let tau = PheromoneModel::new(3, 1.0);
        let config = AcoConfig::default();
        let mut colony = Colony::new(&p);
        colony.begin_generation(2);
        // Truck 0 picks node 2 first (r = 0.9), truck 1 picks node 1 (r = 0.0).
        let mut rng = ScriptedSource::new(vec![0.5, 0.9, 0.5, 0.0]);
        colony.advance_all(&tau, &config, &mut rng);
        assert_eq!(colony.trucks()[0].path(), &[0, 2]);
        assert_eq!(colony.trucks()[1].path(), &[0, 1]);
        let best = colony.best_of_generation().expect("non-empty");
        assert_eq!(best.path(), &[0, 1]);
    }

    #[test]
    fn test_empty_generation_has_no_best() {
        let p = triangle();
        let colony = Colony::new(&p);
        assert!(colony.best_of_generation().is_none());
        assert!(colony.all_complete());
    }

    #[test]
    fn test_run_to_completion_respects_cap() {
        let p = reference_instance().expect("valid");
        let tau = PheromoneModel::new(p.node_count(), 1.0);
        let mut colony = Colony::new(&p);
        colony.begin_generation(2);
        let mut rng = RngSource::seeded(3);
        let steps = colony.run_to_completion(&tau, &AcoConfig::default(), &mut rng, 2);
        assert_eq!(steps, 2);
        assert!(!colony.all_complete());
    }

    #[test]
    fn test_fixed_steps_on_reference_instance_keep_laws() {
        let p = reference_instance().expect("valid");
        let tau = PheromoneModel::new(p.node_count(), 1.0);
        let config = AcoConfig::default();
        assert_eq!(config.step_policy, StepPolicy::FixedSteps);
        let mut rng = RngSource::seeded(11);
        let mut colony = Colony::new(&p);
        colony.begin_generation(config.truck_count(p.node_count()));
        for _ in 0..p.node_count() {
            colony.advance_all(&tau, &config, &mut rng);
        }
        let evaluator = TourEvaluator::new(&p);
        for truck in colony.trucks() {
            assert!(truck.path().len() <= p.node_count() + 1);
            let (_, violations) = evaluator.build_tour(truck.path());
            assert!(violations.is_empty(), "{violations:?}");
        }
    }

    fn instance_strategy() -> impl Strategy<Value = ProblemInstance> {
        (3usize..10).prop_flat_map(|n| {
            (
                proptest::collection::vec(1.0f64..100.0, n * n),
                proptest::collection::vec(0i32..=8, n),
                8i32..20,
            )
                .prop_map(move |(raw, mut demands, capacity)| {
                    let mut dm = DistanceMatrix::new(n);
                    for i in 0..n {
                        for j in (i + 1)..n {
                            dm.set(i, j, raw[i * n + j]);
                            dm.set(j, i, raw[i * n + j]);
                        }
                    }
                    demands[0] = 0;
                    ProblemInstance::new(dm, demands, capacity).expect("generated instance is valid")
                })
        })
    }

    proptest! {
        #[test]
        fn prop_completed_routes_are_feasible(
            instance in instance_strategy(),
            seed in any::<u64>(),
            trucks in 1usize..5,
        ) {
            let n = instance.node_count();
            let tau = PheromoneModel::new(n, 1.0);
            let config = AcoConfig::default();
            let mut rng = RngSource::seeded(seed);
            let mut colony = Colony::new(&instance);
            colony.begin_generation(trucks);
            colony.run_to_completion(&tau, &config, &mut rng, 4 * n * n);

            let evaluator = TourEvaluator::new(&instance).require_complete();
            for truck in colony.trucks() {
                let (tour, violations) = evaluator.build_tour(truck.path());
                if truck.is_complete() {
                    prop_assert!(violations.is_empty(), "{:?}", violations);
                    prop_assert!(tour.ends_at_depot());
                } else {
                    let only_unvisited = violations
                        .iter()
                        .all(|v| matches!(v.kind, ViolationType::NodeUnvisited { .. }));
                    prop_assert!(only_unvisited, "{:?}", violations);
                }
                for leg in tour.legs() {
                    let load: i32 = leg.iter().map(|&c| instance.demand(c)).sum();
                    prop_assert!(load <= instance.capacity());
                }
            }
        }
    }
}
