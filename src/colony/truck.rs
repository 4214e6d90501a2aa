//! Single-truck route construction.
//!
//! A truck (ant) starts at the depot and appends one node per step. Each
//! step is either a *random move* (uniform node picks, up to a try budget)
//! or a *probabilistic move* (roulette wheel over feasible customers):
//!
//! ```text
//! w(j) = tau[i][j]^alpha * (1 / d[i][j])^beta
//! p(j) = w(j) / sum_k w(k)
//! ```
//!
//! Once every customer has been served, the truck only returns to the depot.

use crate::aco::AcoConfig;
use crate::models::{ProblemInstance, Tour, DEPOT};
use crate::pheromone::PheromoneModel;
use crate::random::RandomSource;

/// Construction state of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckState {
    /// Some customers are still unserved.
    Constructing,
    /// Every customer is served; only depot returns remain.
    ReturningHome,
}

/// A truck building one route.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::colony::Truck;
/// use u_aco_cvrp::distance::DistanceMatrix;
/// use u_aco_cvrp::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let instance = ProblemInstance::new(dm, vec![0, 5, 5], 9).unwrap();
///
/// let mut truck = Truck::new(&instance);
/// assert!(truck.try_visit(&instance, 1));
/// assert!(!truck.try_visit(&instance, 2)); // 5 + 5 > 9
/// assert!(truck.try_visit(&instance, 0));
/// assert!(truck.try_visit(&instance, 2));
/// assert_eq!(truck.path(), &[0, 1, 0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Truck {
    path: Vec<usize>,
    load: i32,
    visited: Vec<bool>,
    visited_count: usize,
    state: TruckState,
}

impl Truck {
    /// Creates a truck parked at the depot of `instance`.
    pub fn new(instance: &ProblemInstance) -> Self {
        let mut truck = Self {
            path: vec![DEPOT],
            load: 0,
            visited: vec![false; instance.node_count().max(1)],
            visited_count: 0,
            state: TruckState::Constructing,
        };
        truck.refresh_state();
        truck
    }

    /// Route so far, starting at the depot.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Load carried since the last depot visit.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Current construction state.
    pub fn state(&self) -> TruckState {
        self.state
    }

    /// Node the truck is standing at.
    pub fn current(&self) -> usize {
        self.path.last().copied().unwrap_or(DEPOT)
    }

    /// Returns `true` if `node` has been served.
    pub fn has_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Number of customers served.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Returns `true` once every customer is served and the truck is back
    /// at the depot.
    pub fn is_complete(&self) -> bool {
        self.state == TruckState::ReturningHome && self.current() == DEPOT
    }

    /// Route cost: sum of consecutive-pair distances.
    pub fn cost(&self, instance: &ProblemInstance) -> f64 {
        instance.path_cost(&self.path)
    }

    /// Snapshot of the route as a [`Tour`].
    pub fn tour(&self, instance: &ProblemInstance) -> Tour {
        Tour::new(self.path.clone(), self.load, self.cost(instance))
    }

    /// Advances the truck by one construction step.
    pub fn step<S: RandomSource + ?Sized>(
        &mut self,
        instance: &ProblemInstance,
        pheromone: &PheromoneModel,
        config: &AcoConfig,
        rng: &mut S,
    ) {
        self.refresh_state();
        match self.state {
            TruckState::ReturningHome => {
                self.try_visit(instance, DEPOT);
            }
            TruckState::Constructing => {
                if rng.next_f64() < config.random_move_probability {
                    self.random_move(instance, config, rng);
                } else {
                    self.probabilistic_move(instance, pheromone, config, rng);
                }
            }
        }
    }

    /// Tries to move to `node`, returning whether the move was accepted.
    ///
    /// Moving to the current node is always rejected. The depot is otherwise
    /// always accepted and empties the truck. A customer is accepted if it
    /// has not been served yet and its demand fits the remaining capacity.
    pub fn try_visit(&mut self, instance: &ProblemInstance, node: usize) -> bool {
        if node == self.current() || node >= self.visited.len() {
            return false;
        }
        if node == DEPOT {
            self.path.push(DEPOT);
            self.load = 0;
            return true;
        }
        if self.load + instance.demand(node) > instance.capacity() || self.visited[node] {
            return false;
        }
        self.load += instance.demand(node);
        self.visited[node] = true;
        self.visited_count += 1;
        self.path.push(node);
        self.refresh_state();
        true
    }

    /// Feasible next customers with their selection probabilities, in
    /// ascending node order.
    ///
    /// Without a feasible customer the depot is the only candidate. An
    /// infinite weight (zero distance) takes all the probability mass; so
    /// does the first candidate when the weights sum to zero.
    pub fn candidate_probabilities(
        &self,
        instance: &ProblemInstance,
        pheromone: &PheromoneModel,
        config: &AcoConfig,
    ) -> Vec<(usize, f64)> {
        let from = self.current();
        let mut weights: Vec<(usize, f64)> = (1..instance.node_count())
            .filter(|&j| {
                !self.has_visited(j) && self.load + instance.demand(j) <= instance.capacity()
            })
            .map(|j| {
                let tau = pheromone.get(from, j).powf(config.alpha);
                let eta = (1.0 / instance.distance(from, j)).powf(config.beta);
                let w = tau * eta;
                (j, if w.is_nan() { 0.0 } else { w })
            })
            .collect();

        if weights.is_empty() {
            return vec![(DEPOT, 1.0)];
        }

        if let Some(k) = weights.iter().position(|&(_, w)| w == f64::INFINITY) {
            return one_hot(weights, k);
        }

        let total: f64 = weights.iter().map(|&(_, w)| w).sum();
        if total <= 0.0 || !total.is_finite() {
            return one_hot(weights, 0);
        }
        for (_, w) in &mut weights {
            *w /= total;
        }
        weights
    }

    fn random_move<S: RandomSource + ?Sized>(
        &mut self,
        instance: &ProblemInstance,
        config: &AcoConfig,
        rng: &mut S,
    ) {
        for _ in 0..config.max_random_tries {
            let node = rng.next_index(instance.node_count());
            if self.try_visit(instance, node) {
                return;
            }
        }
        self.try_visit(instance, DEPOT);
    }

    fn probabilistic_move<S: RandomSource + ?Sized>(
        &mut self,
        instance: &ProblemInstance,
        pheromone: &PheromoneModel,
        config: &AcoConfig,
        rng: &mut S,
    ) {
        let candidates = self.candidate_probabilities(instance, pheromone, config);
        let node = roulette_select(&candidates, rng.next_f64()).unwrap_or(DEPOT);
        self.try_visit(instance, node);
    }

    fn refresh_state(&mut self) {
        if self.visited_count + 1 >= self.visited.len() {
            self.state = TruckState::ReturningHome;
        }
    }
}

fn one_hot(mut weights: Vec<(usize, f64)>, k: usize) -> Vec<(usize, f64)> {
    for (i, (_, w)) in weights.iter_mut().enumerate() {
        *w = if i == k { 1.0 } else { 0.0 };
    }
    weights
}

/// Roulette-wheel selection over `(node, probability)` pairs.
///
/// Walks the candidates in order, subtracting each probability from `r`;
/// the first candidate with `r < p` wins. If rounding leaves nothing
/// selected, the first candidate is returned. `None` only for an empty list.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::colony::roulette_select;
///
/// let wheel = [(4, 0.5), (7, 0.3), (9, 0.2)];
/// assert_eq!(roulette_select(&wheel, 0.1), Some(4));
/// assert_eq!(roulette_select(&wheel, 0.6), Some(7));
/// assert_eq!(roulette_select(&wheel, 0.95), Some(9));
/// ```
pub fn roulette_select(candidates: &[(usize, f64)], r: f64) -> Option<usize> {
    let mut r = r;
    for &(node, p) in candidates {
        if r < p {
            return Some(node);
        }
        r -= p;
    }
    candidates.first().map(|&(node, _)| node)
}
