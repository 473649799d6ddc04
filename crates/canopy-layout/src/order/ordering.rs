use super::{Relationship, barycenter, cross_count, init_order, sort};
use crate::graphlib::Graph;
use crate::util::build_layer_matrix;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

/// Sweeps without improvement after which ordering stops.
const MAX_STALE_SWEEPS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOptions {
    /// Keep the initial DFS order and skip the barycenter sweeps.
    pub disable_optimal_order_heuristic: bool,
}

/// Assigns `order` to every ranked node.
pub fn order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) {
    let layering = init_order(g);
    if layering.is_empty() {
        return;
    }
    assign_order(g, &layering);

    if opts.disable_optimal_order_heuristic {
        return;
    }

    let mut best_cc: f64 = cross_count(g, &layering);
    let mut best_layering: Vec<Vec<String>> = layering;

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < MAX_STALE_SWEEPS && best_cc > 0.0 {
        let use_down = i % 2 == 1;
        let bias_right = i % 4 >= 2;

        let mut layering_now = build_layer_matrix(g);
        if use_down {
            for r in 1..layering_now.len() {
                sweep_layer(g, &mut layering_now, r, Relationship::InEdges, bias_right);
            }
        } else {
            for r in (0..layering_now.len().saturating_sub(1)).rev() {
                sweep_layer(g, &mut layering_now, r, Relationship::OutEdges, bias_right);
            }
        }

        let cc = cross_count(g, &layering_now);
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best_layering = layering_now;
        }

        i += 1;
        last_best += 1;
    }

    assign_order(g, &best_layering);
}

fn sweep_layer(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layering: &mut [Vec<String>],
    rank: usize,
    relationship: Relationship,
    bias_right: bool,
) {
    let entries = barycenter(g, &layering[rank], relationship);
    let sorted = sort(entries, bias_right);
    for (i, v) in sorted.iter().enumerate() {
        if let Some(n) = g.node_mut(v) {
            n.order = Some(i);
        }
    }
    layering[rank] = sorted;
}

fn assign_order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}
