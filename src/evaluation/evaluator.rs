//! Tour evaluator that computes distance, load, and feasibility.

use crate::models::{ProblemInstance, Tour, Violation, ViolationType, DEPOT};

/// Evaluates a node path against a problem instance: total distance, load
/// carried at the end, and violations of the capacity and no-revisit laws.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::distance::DistanceMatrix;
/// use u_aco_cvrp::models::ProblemInstance;
/// use u_aco_cvrp::evaluation::TourEvaluator;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let instance = ProblemInstance::new(dm, vec![0, 5, 5], 10).unwrap();
///
/// let evaluator = TourEvaluator::new(&instance);
/// let (tour, violations) = evaluator.build_tour(&[0, 1, 2, 0]);
/// assert_eq!(tour.total_distance(), 45.0);
/// assert!(violations.is_empty());
/// ```
pub struct TourEvaluator<'a> {
    instance: &'a ProblemInstance,
    require_complete: bool,
}

impl<'a> TourEvaluator<'a> {
    /// Creates an evaluator that does not require every customer to be served.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            require_complete: false,
        }
    }

    /// Also report customers missing from the path.
    pub fn require_complete(mut self) -> Self {
        self.require_complete = true;
        self
    }

    /// Builds a tour from a node path, computing distance and final load.
    ///
    /// Returns the tour and any constraint violations found. Unknown node
    /// indices are reported and skipped for distance and load.
    pub fn build_tour(&self, path: &[usize]) -> (Tour, Vec<Violation>) {
        let n = self.instance.node_count();
        let capacity = self.instance.capacity();
        let mut violations = Vec::new();

        if path.first() != Some(&DEPOT) {
            violations.push(Violation::new(ViolationType::MissingDepotStart));
        }

        let mut seen = vec![false; n];
        let mut total_distance = 0.0;
        let mut load: i32 = 0;
        let mut leg_index = 0;
        let mut leg_open = false;
        let mut prev: Option<usize> = None;

        for (position, &node) in path.iter().enumerate() {
            if node >= n {
                violations.push(Violation::new(ViolationType::UnknownNode { position, node }));
                continue;
            }
            if let Some(p) = prev {
                if p == node {
                    violations.push(Violation::new(ViolationType::SelfLoop { position, node }));
                }
                total_distance += self.instance.distance(p, node);
            }
            prev = Some(node);

            if node == DEPOT {
                if leg_open {
                    leg_index += 1;
                    leg_open = false;
                }
                load = 0;
                continue;
            }

            if seen[node] {
                violations.push(Violation::new(ViolationType::NodeRevisited { node }));
            }
            seen[node] = true;

            let before = load;
            load += self.instance.demand(node);
            leg_open = true;
            // Report each overloaded leg once, at the first overflow.
            if load > capacity && before <= capacity {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    leg_index,
                    load,
                    capacity,
                }));
            }
        }

        if self.require_complete {
            for node in (1..n).filter(|&i| !seen[i]) {
                violations.push(Violation::new(ViolationType::NodeUnvisited { node }));
            }
        }

        (Tour::new(path.to_vec(), load, total_distance), violations)
    }
}
