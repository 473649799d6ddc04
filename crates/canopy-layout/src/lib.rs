//! Layered (rank-based) graph layout.
//!
//! The pipeline follows the classic Sugiyama phases as dagre implements them: break cycles,
//! assign longest-path ranks, reduce crossings with barycenter sweeps, then assign coordinates.
//! Every call works on the caller's graph only; there is no shared layout state.

pub use canopy_graphlib as graphlib;

mod model;
pub use model::{EdgeLabel, GraphLabel, NodeLabel, ParseRankDirError, RankDir};

pub mod acyclic;
pub mod coordinate_system;
pub mod order;
pub mod position;
pub mod rank;
pub mod util;

mod pipeline;
pub use pipeline::{layout, layout_with_options};
