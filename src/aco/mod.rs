//! Ant Colony Optimization for capacitated vehicle routing.
//!
//! Each generation, a colony of trucks builds routes guided by the shared
//! pheromone matrix; afterwards the matrix is evaporated and every route
//! deposits pheromone in inverse proportion to its cost.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant system: optimization by a colony of cooperating agents"
//! - Bullnheimer, Hartl & Strauss (1999), "An improved Ant System algorithm for the Vehicle Routing Problem"

mod config;
mod runner;

pub use config::{AcoConfig, BestTracking, StepPolicy};
pub use runner::{AcoResult, AcoRunner};
