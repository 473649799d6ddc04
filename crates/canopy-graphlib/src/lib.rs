//! Directed graph container used by `canopy-layout`.
//!
//! Nodes are keyed by string id and iterate in insertion order, which keeps every algorithm that
//! walks `nodes()` or `edges()` deterministic.

mod graph;

pub use graph::{EdgeKey, Graph, alg};
