//! Constraint violation types.

/// A type of constraint violation in a tour.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// The tour does not start at the depot.
    MissingDepotStart,
    /// A node index outside the instance.
    UnknownNode {
        /// Position in the path.
        position: usize,
        /// Offending node index.
        node: usize,
    },
    /// Two consecutive path entries are the same node.
    SelfLoop {
        /// Position of the repeated entry.
        position: usize,
        /// Repeated node.
        node: usize,
    },
    /// The demand served on one leg exceeds vehicle capacity.
    CapacityExceeded {
        /// Leg index within the tour.
        leg_index: usize,
        /// Demand carried on the leg.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A customer was visited more than once.
    NodeRevisited {
        /// Customer ID.
        node: usize,
    },
    /// A customer was never visited.
    NodeUnvisited {
        /// Customer ID.
        node: usize,
    },
}

/// A constraint violation in a tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}
