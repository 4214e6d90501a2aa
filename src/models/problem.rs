//! Capacitated routing problem instance.

use serde::Serialize;

use crate::distance::DistanceMatrix;

/// Index of the depot node.
pub const DEPOT: usize = 0;

/// An immutable CVRP instance: distances, per-node demand and vehicle capacity.
///
/// Node 0 is the depot. Construction validates the instance so that the
/// solver never has to deal with malformed input.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::distance::DistanceMatrix;
/// use u_aco_cvrp::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let instance = ProblemInstance::new(dm, vec![0, 5, 5], 10).unwrap();
/// assert_eq!(instance.node_count(), 3);
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.demand(2), 5);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ProblemInstance {
    distances: DistanceMatrix,
    demands: Vec<i32>,
    capacity: i32,
}

impl ProblemInstance {
    /// Creates a validated problem instance.
    ///
    /// Fails if the matrix is empty, asymmetric, has a non-zero diagonal or
    /// negative entries, if the demand vector doesn't match the matrix, if
    /// the depot has demand, or if any demand is negative. A customer whose
    /// demand exceeds `capacity` is accepted; no truck can ever serve it.
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<i32>,
        capacity: i32,
    ) -> Result<Self, String> {
        let n = distances.size();
        if n == 0 {
            return Err("instance must contain at least the depot".into());
        }
        if demands.len() != n {
            return Err(format!(
                "demand vector has {} entries, distance matrix has {n} nodes",
                demands.len()
            ));
        }
        if !distances.is_non_negative() {
            return Err("distances must be finite and non-negative".into());
        }
        if !distances.has_zero_diagonal() {
            return Err("distance from a node to itself must be zero".into());
        }
        if !distances.is_symmetric(1e-9) {
            return Err("distance matrix must be symmetric".into());
        }
        if capacity <= 0 {
            return Err(format!("capacity must be positive, got {capacity}"));
        }
        if demands[DEPOT] != 0 {
            return Err(format!("depot demand must be zero, got {}", demands[DEPOT]));
        }
        if let Some((node, &d)) = demands.iter().enumerate().find(|&(_, &d)| d < 0) {
            return Err(format!("demand of node {node} is negative ({d})"));
        }
        Ok(Self {
            distances,
            demands,
            capacity,
        })
    }

    /// Number of nodes, depot included.
    pub fn node_count(&self) -> usize {
        self.demands.len()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.node_count() - 1
    }

    /// Travel distance between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Demand at `node`.
    pub fn demand(&self, node: usize) -> i32 {
        self.demands[node]
    }

    /// All demands, indexed by node.
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Maximum load a vehicle may carry between depot visits.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Sum of consecutive-pair distances along `path`; zero for paths
    /// shorter than two nodes.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        self.distances.path_length(path)
    }
}
