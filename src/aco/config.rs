//! ACO configuration.

use serde::{Deserialize, Serialize};

/// How many construction steps a generation gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPolicy {
    /// Advance every truck exactly `node_count` times, in lock-step.
    ///
    /// Enough for instances whose routes never need more depot returns than
    /// nodes; trucks that are not finished afterwards keep a partial route.
    FixedSteps,

    /// Advance until every truck has visited all customers and is back at
    /// the depot, bounded by `4 * node_count²` steps.
    UntilComplete,
}

/// Which route is reported as the run's best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestTracking {
    /// The best route of the final generation only.
    LastGeneration,

    /// The cheapest route of any generation.
    AllTime,
}

/// Configuration for the ant colony solver.
///
/// Defaults reproduce the classic parameter set: `alpha = 1`, `beta = 2`,
/// 10% random moves with up to 10 tries, `round(0.5 * n)` trucks,
/// 1000 generations, 40% of pheromone retained per generation and a deposit
/// scale of 1000.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::aco::{AcoConfig, BestTracking, StepPolicy};
///
/// let config = AcoConfig::default()
///     .with_iterations(200)
///     .with_evaporation_rate(0.6)
///     .with_step_policy(StepPolicy::UntilComplete)
///     .with_best_tracking(BestTracking::AllTime)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.truck_count(17), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoConfig {
    /// Exponent on pheromone strength in the candidate weight.
    pub alpha: f64,

    /// Exponent on inverse distance in the candidate weight.
    pub beta: f64,

    /// Probability that a construction step tries random nodes instead of
    /// the roulette wheel.
    pub random_move_probability: f64,

    /// Random picks per random move before falling back to the depot.
    pub max_random_tries: usize,

    /// Trucks per generation as a fraction of the node count.
    pub truck_factor: f64,

    /// Number of generations.
    pub iterations: usize,

    /// Fraction of pheromone retained per generation, in `[0, 1)`.
    pub evaporation_rate: f64,

    /// Deposit scale `Q`; a route of cost `L` deposits `Q / L` per edge.
    pub deposit_scale: f64,

    /// Initial strength of every trail.
    pub initial_pheromone: f64,

    /// Construction step budget per generation.
    pub step_policy: StepPolicy,

    /// Best-route bookkeeping across generations.
    pub best_tracking: BestTracking,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            random_move_probability: 0.1,
            max_random_tries: 10,
            truck_factor: 0.5,
            iterations: 1000,
            evaporation_rate: 0.4,
            deposit_scale: 1000.0,
            initial_pheromone: 1.0,
            step_policy: StepPolicy::FixedSteps,
            best_tracking: BestTracking::LastGeneration,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_random_move_probability(mut self, p: f64) -> Self {
        self.random_move_probability = p;
        self
    }

    pub fn with_max_random_tries(mut self, n: usize) -> Self {
        self.max_random_tries = n;
        self
    }

    pub fn with_truck_factor(mut self, factor: f64) -> Self {
        self.truck_factor = factor;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_deposit_scale(mut self, scale: f64) -> Self {
        self.deposit_scale = scale;
        self
    }

    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    pub fn with_step_policy(mut self, policy: StepPolicy) -> Self {
        self.step_policy = policy;
        self
    }

    pub fn with_best_tracking(mut self, tracking: BestTracking) -> Self {
        self.best_tracking = tracking;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Trucks per generation for an instance with `node_count` nodes:
    /// `round(truck_factor * node_count)`, at least one.
    pub fn truck_count(&self, node_count: usize) -> usize {
        ((self.truck_factor * node_count as f64).round() as usize).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!("alpha must be finite and non-negative, got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(format!("beta must be finite and non-negative, got {}", self.beta));
        }
        if !(0.0..=1.0).contains(&self.random_move_probability) {
            return Err(format!(
                "random_move_probability must be in [0, 1], got {}",
                self.random_move_probability
            ));
        }
        if !self.truck_factor.is_finite() || self.truck_factor <= 0.0 {
            return Err(format!("truck_factor must be positive, got {}", self.truck_factor));
        }
        if self.iterations == 0 {
            return Err("iterations must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            ));
        }
        if !self.deposit_scale.is_finite() || self.deposit_scale < 0.0 {
            return Err(format!(
                "deposit_scale must be finite and non-negative, got {}",
                self.deposit_scale
            ));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone < 0.0 {
            return Err(format!(
                "initial_pheromone must be finite and non-negative, got {}",
                self.initial_pheromone
            ));
        }
        Ok(())
    }
}
