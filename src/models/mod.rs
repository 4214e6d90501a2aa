//! Domain model types for capacitated vehicle routing.
//!
//! Provides the problem instance (distances, demands, capacity), the tour
//! produced by a single truck, and the violation types reported when a
//! tour breaks a routing constraint.

mod problem;
mod route;
mod violation;

pub use problem::{ProblemInstance, DEPOT};
pub use route::Tour;
pub use violation::{Violation, ViolationType};
