//! Dense pheromone matrix.
//!
//! # Update rule
//!
//! After every truck of a generation finished its route:
//!
//! ```text
//! tau[i][j] = rate * tau[i][j]                       (evaporation)
//! tau[a][b] = tau[a][b] + Q / L(route)   for (a,b) in route   (deposit)
//! ```
//!
//! where `rate` is the retained fraction, `Q` the deposit scale and `L` the
//! route cost. Cheaper routes reinforce their edges more strongly.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use serde::{Deserialize, Serialize};

/// A dense n×n pheromone matrix stored in row-major order.
///
/// Entries never go negative: evaporation multiplies by a factor in `[0, 1)`
/// and deposits add non-negative amounts.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::pheromone::PheromoneModel;
///
/// let mut tau = PheromoneModel::new(3, 1.0);
/// tau.evaporate(0.4);
/// tau.deposit(&[0, 2, 0], 0.5);
/// assert!((tau.get(0, 2) - 0.9).abs() < 1e-12);
/// assert!((tau.get(0, 1) - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneModel {
    trail: Vec<f64>,
    size: usize,
}

impl PheromoneModel {
    /// Creates a matrix of the given size with every entry set to `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            trail: vec![initial.max(0.0); size * size],
            size,
        }
    }

    /// Resets every entry to `initial`.
    pub fn initialize(&mut self, initial: f64) {
        self.trail.fill(initial.max(0.0));
    }

    /// Multiplies every entry by `rate`, the fraction of pheromone retained.
    pub fn evaporate(&mut self, rate: f64) {
        let rate = rate.max(0.0);
        for t in &mut self.trail {
            *t *= rate;
        }
    }

    /// Adds `amount` to the trail of every consecutive pair in `path`.
    ///
    /// Negative amounts are ignored.
    pub fn deposit(&mut self, path: &[usize], amount: f64) {
        if amount <= 0.0 {
            return;
        }
        for w in path.windows(2) {
            self.trail[w[0] * self.size + w[1]] += amount;
        }
    }

    /// Deposit amount for a route: `scale / cost`.
    ///
    /// Zero for paths with fewer than two nodes, and for routes whose cost
    /// is not strictly positive.
    pub fn deposit_amount(path_len: usize, cost: f64, scale: f64) -> f64 {
        if path_len < 2 || cost <= 0.0 || !cost.is_finite() {
            return 0.0;
        }
        scale / cost
    }

    /// Trail strength on edge `from -> to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.trail[from * self.size + to]
    }

    /// Row of trail strengths leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.trail[from * self.size..(from + 1) * self.size]
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min_value(&self) -> Option<f64> {
        self.trail.iter().copied().reduce(f64::min)
    }

    /// Largest entry, or `None` for an empty matrix.
    pub fn max_value(&self) -> Option<f64> {
        self.trail.iter().copied().reduce(f64::max)
    }
}
