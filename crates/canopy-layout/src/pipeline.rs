//! The layered layout pipeline.

use crate::graphlib::Graph;
use crate::order::{OrderOptions, order};
use crate::{EdgeLabel, GraphLabel, NodeLabel, acyclic, coordinate_system, position, rank, util};

/// Lays out `g` in place: every node gets `rank`, `order` and center `x`/`y`, and the graph
/// label gets the drawing `width`/`height`.
///
/// Self-loops are dropped from `g`; reversed back edges are restored before returning.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    layout_with_options(g, OrderOptions::default());
}

pub fn layout_with_options(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) {
    acyclic::remove_self_edges(g);
    acyclic::run(g);
    rank::rank(g);
    order(g, opts);
    coordinate_system::adjust(g);
    position::position(g);
    coordinate_system::undo(g);
    util::translate_graph(g);
    acyclic::undo(g);
}
