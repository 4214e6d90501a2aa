//! Plain-text rendering of solver output.

use crate::models::Tour;
use crate::pheromone::PheromoneModel;

/// One-line summary of a tour: final load, total distance and node sequence.
///
/// # Examples
///
/// ```
/// use u_aco_cvrp::models::Tour;
/// use u_aco_cvrp::report::format_tour;
///
/// let tour = Tour::new(vec![0, 2, 1, 0], 0, 45.0);
/// assert_eq!(format_tour(&tour), "Truck (load = 0, distance = 45): [0, 2, 1, 0]");
/// ```
pub fn format_tour(tour: &Tour) -> String {
    format!(
        "Truck (load = {}, distance = {}): {:?}",
        tour.load(),
        tour.total_distance(),
        tour.path()
    )
}

/// The pheromone matrix, one `{ a, b, ... }` row per line, entries at two
/// decimals.
pub fn format_pheromones(pheromone: &PheromoneModel) -> String {
    (0..pheromone.size())
        .map(|i| {
            let cells: Vec<String> = pheromone.row(i).iter().map(|t| format!("{t:.2}")).collect();
            format!("{{ {} }}", cells.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
