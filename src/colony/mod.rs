//! Route construction by a colony of trucks (ants).
//!
//! - [`Truck`] — builds one route through capacity-constrained node selection
//! - [`roulette_select`] — weighted selection over normalized candidate probabilities
//! - [`Colony`] — one generation of trucks advanced in lock-step

#[allow(clippy::module_inception)]
mod colony;
mod truck;

pub use colony::Colony;
pub use truck::{roulette_select, Truck, TruckState};
