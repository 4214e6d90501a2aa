//! ACO execution loop.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{AcoConfig, BestTracking, StepPolicy};
use crate::colony::Colony;
use crate::evaluation::TourEvaluator;
use crate::models::{ProblemInstance, Tour};
use crate::pheromone::PheromoneModel;
use crate::random::{RandomSource, RngSource};
use crate::report;

/// Result of an ant colony run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcoResult {
    /// The reported route, chosen according to [`BestTracking`].
    pub best: Tour,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Cheapest generation-best cost seen during the run.
    pub best_ever_cost: f64,

    /// Pheromone matrix after the final update.
    pub pheromone: PheromoneModel,

    /// Number of generations run.
    pub iterations: usize,

    /// Best route cost of each generation, in order.
    pub cost_history: Vec<f64>,

    /// Generations in which some truck hit the step cap before finishing.
    pub incomplete_generations: usize,
}

impl AcoResult {
    /// Text report: the best route followed by the pheromone matrix.
    pub fn report(&self) -> String {
        format!(
            "{}\npheromoneTrails:\n{}",
            report::format_tour(&self.best),
            report::format_pheromones(&self.pheromone)
        )
    }
}

/// Executes the ant colony optimization loop.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::aco::{AcoConfig, AcoRunner};
/// use u_aco_cvrp::instances::reference_instance;
///
/// let instance = reference_instance().unwrap();
/// let config = AcoConfig::default().with_iterations(20).with_seed(42);
/// let result = AcoRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.cost_history.len(), 20);
/// assert_eq!(result.best.path()[0], 0);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the solver with a generator seeded from `config.seed`, or from
    /// fresh entropy when no seed is set.
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoResult, String> {
        let mut rng = RngSource::from_optional_seed(config.seed);
        Self::run_with_source(instance, config, &mut rng)
    }

    /// Runs the solver drawing randomness from `rng`.
    pub fn run_with_source<S: RandomSource + ?Sized>(
        instance: &ProblemInstance,
        config: &AcoConfig,
        rng: &mut S,
    ) -> Result<AcoResult, String> {
        config.validate()?;

        let n = instance.node_count();
        let truck_count = config.truck_count(n);
        let step_cap = 4 * n * n;
        let evaluator = TourEvaluator::new(instance);

        let mut pheromone = PheromoneModel::new(n, config.initial_pheromone);
        let mut colony = Colony::new(instance);
        let mut best: Option<Tour> = None;
        let mut best_ever_cost = f64::INFINITY;
        let mut cost_history = Vec::new();
        let mut incomplete_generations = 0usize;

        info!(
            nodes = n,
            trucks = truck_count,
            iterations = config.iterations,
            policy = ?config.step_policy,
            "starting ant colony run"
        );

        for generation in 0..config.iterations {
            colony.begin_generation(truck_count);

            match config.step_policy {
                StepPolicy::FixedSteps => {
                    for _ in 0..n {
                        colony.advance_all(&pheromone, config, rng);
                    }
                }
                StepPolicy::UntilComplete => {
                    let steps = colony.run_to_completion(&pheromone, config, rng, step_cap);
                    if !colony.all_complete() {
                        incomplete_generations += 1;
                        warn!(generation, steps, "step cap reached before every truck returned");
                    }
                }
            }

            update_pheromones(&mut pheromone, &colony, instance, config);

            let Some(truck) = colony.best_of_generation() else {
                continue;
            };
            let (tour, violations) = evaluator.build_tour(truck.path());
            if !violations.is_empty() {
                warn!(
                    generation,
                    violations = violations.len(),
                    "generation best breaks routing constraints"
                );
            }

            let cost = tour.total_distance();
            debug!(generation, cost, "generation best");
            cost_history.push(cost);
            best_ever_cost = best_ever_cost.min(cost);

            best = match (config.best_tracking, best) {
                (BestTracking::AllTime, Some(prev)) if prev.total_distance() <= cost => Some(prev),
                _ => Some(tour),
            };
        }

        let best = best.ok_or_else(|| "no generation produced a route".to_string())?;
        let best_cost = best.total_distance();

        info!(best_cost, best_ever_cost, "ant colony run finished");

        Ok(AcoResult {
            best,
            best_cost,
            best_ever_cost,
            pheromone,
            iterations: config.iterations,
            cost_history,
            incomplete_generations,
        })
    }
}

/// Evaporates the whole matrix, then lets every truck of the generation
/// deposit `deposit_scale / cost` on each edge of its route.
fn update_pheromones(
    pheromone: &mut PheromoneModel,
    colony: &Colony<'_>,
    instance: &ProblemInstance,
    config: &AcoConfig,
) {
    pheromone.evaporate(config.evaporation_rate);
    for truck in colony.trucks() {
        let amount = PheromoneModel::deposit_amount(
            truck.path().len(),
            truck.cost(instance),
            config.deposit_scale,
        );
        pheromone.deposit(truck.path(), amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::instances::reference_instance;
    use crate::random::ScriptedSource;

    fn triangle(capacity: i32) -> ProblemInstance {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 20.0],
            vec![10.0, 0.0, 15.0],
            vec![20.0, 15.0, 0.0],
        ])
        .expect("square rows");
        ProblemInstance::new(dm, vec![0, 5, 5], capacity).expect("valid")
    }

    /// One truck, one generation, always the probabilistic move with a
    /// roulette draw of zero (the nearest feasible customer here).
    fn greedy_config() -> AcoConfig {
        AcoConfig::default().with_truck_factor(0.3).with_iterations(1)
    }

    fn greedy_draws() -> ScriptedSource {
        ScriptedSource::new(vec![0.5, 0.0])
    }

    #[test]
    fn test_end_to_end_capacity_boundary_inclusive() {
        let p = triangle(10);
        let result = AcoRunner::run_with_source(&p, &greedy_config(), &mut greedy_draws())
            .expect("valid config");
        assert_eq!(result.best.path(), &[0, 1, 2, 0]);
        assert_eq!(result.best.load(), 0);
        assert!((result.best_cost - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_end_to_end_returns_between_legs() {
        let p = triangle(9);
        let config = greedy_config().with_step_policy(StepPolicy::UntilComplete);
        let result =
            AcoRunner::run_with_source(&p, &config, &mut greedy_draws()).expect("valid config");
        assert_eq!(result.best.path(), &[0, 1, 0, 2, 0]);
        assert!((result.best_cost - 60.0).abs() < 1e-10);
        assert_eq!(result.incomplete_generations, 0);
    }

    #[test]
    fn test_fixed_steps_truncate_route() {
        let p = triangle(9);
        let result = AcoRunner::run_with_source(&p, &greedy_config(), &mut greedy_draws())
            .expect("valid config");
        assert_eq!(result.best.path(), &[0, 1, 0, 2]);
        assert_eq!(result.best.load(), 5);
    }

    #[test]
    fn test_unservable_customer_is_skipped() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 10.0, 20.0],
            vec![10.0, 0.0, 15.0],
            vec![20.0, 15.0, 0.0],
        ])
        .expect("square rows");
        let p = ProblemInstance::new(dm, vec![0, 12, 5], 10).expect("well-formed");

        let config = AcoConfig::default().with_iterations(5).with_seed(7);
        let result = AcoRunner::run(&p, &config).expect("valid config");
        assert!(!result.best.path().contains(&1));
        assert_eq!(result.cost_history.len(), 5);
        assert_eq!(result.incomplete_generations, 0);

        let config = config.with_step_policy(StepPolicy::UntilComplete);
        let result = AcoRunner::run(&p, &config).expect("valid config");
        assert!(!result.best.path().contains(&1));
        assert_eq!(result.incomplete_generations, 5);
    }

    #[test]
    fn test_single_generation_pheromone_update() {
        let p = triangle(10);
        let config = greedy_config().with_evaporation_rate(0.0);
        let result =
            AcoRunner::run_with_source(&p, &config, &mut greedy_draws()).expect("valid config");
        let q = 1000.0 / 45.0;
        let tau = &result.pheromone;
        for i in 0..3 {
            for j in 0..3 {
                let on_route = matches!((i, j), (0, 1) | (1, 2) | (2, 0));
                let expected = if on_route { q } else { 0.0 };
                assert!((tau.get(i, j) - expected).abs() < 1e-9, "entry ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_zero_evaporation_collapse_on_reference_instance() {
        let p = reference_instance().expect("valid");
        let config = AcoConfig::default().with_evaporation_rate(0.0);
        let mut pheromone = PheromoneModel::new(p.node_count(), 1.0);
        let mut colony = Colony::new(&p);
        colony.begin_generation(config.truck_count(p.node_count()));
        let mut rng = RngSource::seeded(5);
        for _ in 0..p.node_count() {
            colony.advance_all(&pheromone, &config, &mut rng);
        }
        update_pheromones(&mut pheromone, &colony, &p, &config);

        let n = p.node_count();
        let mut used = vec![false; n * n];
        for truck in colony.trucks() {
            for w in truck.path().windows(2) {
                used[w[0] * n + w[1]] = true;
            }
        }
        for i in 0..n {
            for j in 0..n {
                if !used[i * n + j] {
                    assert_eq!(pheromone.get(i, j), 0.0, "entry ({i}, {j})");
                } else {
                    assert!(pheromone.get(i, j) > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let p = triangle(10);
        let config = AcoConfig::default().with_evaporation_rate(1.5);
        assert!(AcoRunner::run(&p, &config).is_err());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let p = reference_instance().expect("valid");
        let config = AcoConfig::default().with_iterations(30).with_seed(42);
        let a = AcoRunner::run(&p, &config).expect("valid config");
        let b = AcoRunner::run(&p, &config).expect("valid config");
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
        assert_eq!(a.pheromone, b.pheromone);
    }

    #[test]
    fn test_last_generation_tracking_reports_final_best() {
        let p = reference_instance().expect("valid");
        let config = AcoConfig::default().with_iterations(40).with_seed(7);
        let result = AcoRunner::run(&p, &config).expect("valid config");
        assert_eq!(result.cost_history.len(), 40);
        let last = *result.cost_history.last().expect("non-empty");
        assert_eq!(result.best_cost, last);
        assert!(result.best_ever_cost <= result.best_cost);
    }

    #[test]
    fn test_all_time_tracking_reports_minimum() {
        let p = reference_instance().expect("valid");
        let config = AcoConfig::default()
            .with_iterations(40)
            .with_seed(7)
            .with_step_policy(StepPolicy::UntilComplete)
            .with_best_tracking(BestTracking::AllTime);
        let result = AcoRunner::run(&p, &config).expect("valid config");
        let min = result
            .cost_history
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_cost, min);
        assert_eq!(result.best_ever_cost, min);
        assert_eq!(result.incomplete_generations, 0);

        let (_, violations) = TourEvaluator::new(&p)
            .require_complete()
            .build_tour(result.best.path());
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_pheromone_stays_non_negative() {
        let p = reference_instance().expect("valid");
        let config = AcoConfig::default().with_iterations(25).with_seed(99);
        let result = AcoRunner::run(&p, &config).expect("valid config");
        assert!(result.pheromone.min_value().expect("non-empty") >= 0.0);
    }

    #[test]
    fn test_report_layout() {
        let p = triangle(10);
        let result = AcoRunner::run_with_source(&p, &greedy_config(), &mut greedy_draws())
            .expect("valid config");
        let text = result.report();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Truck (load = 0, distance = 45): [0, 1, 2, 0]");
        assert_eq!(lines[1], "pheromoneTrails:");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "{ 0.40, 22.62, 0.40 }");
    }

    #[test]
    fn test_result_serializes() {
        let p = triangle(10);
        let result = AcoRunner::run_with_source(&p, &greedy_config(), &mut greedy_draws())
            .expect("valid config");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["best"]["path"], serde_json::json!([0, 1, 2, 0]));
        assert_eq!(json["iterations"], 1);
    }
}
