//! Tour evaluation: cost, carried load and constraint checking.

mod evaluator;

pub use evaluator::TourEvaluator;
