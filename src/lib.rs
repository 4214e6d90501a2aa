//! # u-aco-cvrp
//!
//! Capacitated vehicle routing with Ant Colony Optimization: a pheromone
//! model, capacity-aware probabilistic route construction, and the
//! construct-evaluate-update loop that drives convergence.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (ProblemInstance, Tour, Violation)
//! - [`distance`] — Distance matrix
//! - [`evaluation`] — Tour cost and constraint checking
//! - [`pheromone`] — Pheromone trail matrix (evaporation and deposit)
//! - [`random`] — Injectable random sources (seeded or scripted)
//! - [`colony`] — Trucks (ants), roulette selection, and the colony of one generation
//! - [`aco`] — Configuration and the optimization loop
//! - [`report`] — Text output of the best route and pheromone matrix
//! - [`instances`] — Built-in benchmark instance

pub mod aco;
pub mod colony;
pub mod distance;
pub mod evaluation;
pub mod instances;
pub mod models;
pub mod pheromone;
pub mod random;
pub mod report;
