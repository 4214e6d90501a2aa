//! Pheromone trail model shared by every truck of a run.
//!
//! - [`PheromoneModel`] — N×N matrix of non-negative trail strengths,
//!   evaporated and reinforced once per generation

mod model;

pub use model::PheromoneModel;
