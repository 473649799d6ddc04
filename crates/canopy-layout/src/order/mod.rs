//! Node ordering / crossing minimization.
//!
//! An initial DFS order followed by alternating barycenter sweeps; the layering with the fewest
//! crossings seen so far wins.

mod barycenter;
pub use barycenter::{BarycenterEntry, barycenter, sort};

mod init_order;
pub use init_order::init_order;

mod cross_count;
pub use cross_count::cross_count;

mod ordering;
pub use ordering::{OrderOptions, order};

/// Which neighbours of a layer are held fixed while it is reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Predecessors (downward sweep).
    InEdges,
    /// Successors (upward sweep).
    OutEdges,
}
