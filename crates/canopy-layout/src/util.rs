//! Shared helpers for the layout passes.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn max_rank<E, G>(g: &Graph<NodeLabel, E, G>) -> Option<i32>
where
    E: Default + 'static,
    G: Default,
{
    g.nodes()
        .filter_map(|v| g.node(v).and_then(|n| n.rank))
        .max()
}

/// Node ids grouped by rank, each layer sorted by `order` (insertion order breaks ties).
pub fn build_layer_matrix<E, G>(g: &Graph<NodeLabel, E, G>) -> Vec<Vec<String>>
where
    E: Default + 'static,
    G: Default,
{
    let Some(max_rank) = max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<(usize, usize, String)>> =
        vec![Vec::new(); (max_rank.max(0) + 1) as usize];
    for (idx, v) in g.nodes().enumerate() {
        let Some(node) = g.node(v) else {
            continue;
        };
        let Some(rank) = node.rank else {
            continue;
        };
        let order = node.order.unwrap_or(usize::MAX);
        layers[rank.max(0) as usize].push((order, idx, v.to_string()));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, idx, _)| (*order, *idx));
            layer.into_iter().map(|(_, _, v)| v).collect()
        })
        .collect()
}

/// Bounding box of all positioned nodes (centers expanded by half their size).
pub fn bounding_box(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Option<Rect> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;
    for v in g.nodes() {
        let Some(n) = g.node(v) else {
            continue;
        };
        let (Some(x), Some(y)) = (n.x, n.y) else {
            continue;
        };
        any = true;
        min_x = min_x.min(x - n.width / 2.0);
        min_y = min_y.min(y - n.height / 2.0);
        max_x = max_x.max(x + n.width / 2.0);
        max_y = max_y.max(y + n.height / 2.0);
    }
    any.then_some(Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

/// Moves the drawing so its top-left corner sits at `(marginx, marginy)` and records its size.
pub fn translate_graph(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let marginx = g.graph().marginx;
    let marginy = g.graph().marginy;
    let Some(bbox) = bounding_box(g) else {
        let label = g.graph_mut();
        label.width = Some(2.0 * marginx);
        label.height = Some(2.0 * marginy);
        return;
    };

    let dx = marginx - bbox.x;
    let dy = marginy - bbox.y;
    g.for_each_node_mut(|_id, n| {
        if let Some(x) = n.x.as_mut() {
            *x += dx;
        }
        if let Some(y) = n.y.as_mut() {
            *y += dy;
        }
    });

    let label = g.graph_mut();
    label.width = Some(bbox.width + 2.0 * marginx);
    label.height = Some(bbox.height + 2.0 * marginy);
}
