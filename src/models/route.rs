//! Constructed tour type.

use serde::{Deserialize, Serialize};

use super::problem::DEPOT;

/// A route built by one truck: a node sequence starting at the depot that
/// may return to the depot any number of times.
///
/// Each maximal run of customers between two depot visits is a *leg*.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::models::Tour;
///
/// let tour = Tour::new(vec![0, 1, 0, 2, 3, 0], 0, 60.0);
/// assert_eq!(tour.legs(), vec![&[1][..], &[2, 3][..]]);
/// assert_eq!(tour.customer_ids(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    path: Vec<usize>,
    load: i32,
    total_distance: f64,
}

impl Tour {
    /// Creates a tour from its path, the load carried at the end of the
    /// path, and its total distance.
    pub fn new(path: Vec<usize>, load: i32, total_distance: f64) -> Self {
        Self {
            path,
            load,
            total_distance,
        }
    }

    /// Full node sequence, depot visits included.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Load carried since the last depot visit.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Sum of consecutive-pair distances along the path.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Number of nodes in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Customer IDs in visit order, depot visits removed.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.path.iter().copied().filter(|&n| n != DEPOT).collect()
    }

    /// Non-empty customer runs between depot visits.
    pub fn legs(&self) -> Vec<&[usize]> {
        self.path
            .split(|&n| n == DEPOT)
            .filter(|leg| !leg.is_empty())
            .collect()
    }

    /// Returns `true` if the path ends at the depot.
    pub fn ends_at_depot(&self) -> bool {
        self.path.last() == Some(&DEPOT)
    }
}
