//! Coordinate assignment.
//!
//! Ranks are stacked along y, `ranksep` apart, each rank as tall as its tallest node. Along x,
//! every layer is first packed left to right with `nodesep` gaps, then pulled toward the mean
//! position of its neighbours in alternating downward and upward passes. A pass never reorders a
//! layer and never brings two nodes closer than `nodesep`.

use crate::graphlib::Graph;
use crate::order::Relationship;
use crate::util::build_layer_matrix;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashMap as HashMap;

const ALIGN_PASSES: usize = 2;

pub fn position(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let layering = build_layer_matrix(g);
    position_y(g, &layering);
    position_x(g, &layering);
}

fn position_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    let rank_sep = g.graph().ranksep;
    let mut prev_y: f64 = 0.0;
    for layer in layering {
        let max_h = layer
            .iter()
            .filter_map(|v| g.node(v).map(|n| n.height))
            .fold(0.0_f64, f64::max);
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(prev_y + max_h / 2.0);
            }
        }
        prev_y += max_h + rank_sep;
    }
}

fn position_x(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    let node_sep = g.graph().nodesep;
    let mut xs: HashMap<String, f64> = HashMap::default();

    for layer in layering {
        let mut cursor: f64 = 0.0;
        for v in layer {
            let width = g.node(v).map(|n| n.width).unwrap_or(0.0);
            xs.insert(v.clone(), cursor + width / 2.0);
            cursor += width + node_sep;
        }
    }

    for _ in 0..ALIGN_PASSES {
        for layer in layering.iter().skip(1) {
            align_layer(g, layer, &mut xs, Relationship::InEdges, node_sep);
        }
        for layer in layering.iter().rev().skip(1) {
            align_layer(g, layer, &mut xs, Relationship::OutEdges, node_sep);
        }
    }

    g.for_each_node_mut(|id, n| {
        if let Some(&x) = xs.get(id) {
            n.x = Some(x);
        }
    });
}

fn align_layer(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layer: &[String],
    xs: &mut HashMap<String, f64>,
    relationship: Relationship,
    node_sep: f64,
) {
    let desired: Vec<Option<f64>> = layer
        .iter()
        .map(|v| {
            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            let mut visit = |u: &str, lbl: &EdgeLabel| {
                if let Some(&x) = xs.get(u) {
                    sum += lbl.weight * x;
                    weight += lbl.weight;
                }
            };
            match relationship {
                Relationship::InEdges => g.for_each_in_edge(v, |e, lbl| visit(&e.v, lbl)),
                Relationship::OutEdges => g.for_each_out_edge(v, |e, lbl| visit(&e.w, lbl)),
            }
            (weight > 0.0).then(|| sum / weight)
        })
        .collect();

    if desired.iter().all(Option::is_none) {
        return;
    }

    let widths: Vec<f64> = layer
        .iter()
        .map(|v| g.node(v).map(|n| n.width).unwrap_or(0.0))
        .collect();

    let mut placed: Vec<f64> = Vec::with_capacity(layer.len());
    for (i, v) in layer.iter().enumerate() {
        let current = xs.get(v).copied().unwrap_or(0.0);
        let target = desired[i].unwrap_or(current);
        let x = match placed.last() {
            Some(&prev) => target.max(prev + widths[i - 1] / 2.0 + node_sep + widths[i] / 2.0),
            None => target,
        };
        placed.push(x);
    }

    // The left-to-right pass only pushes nodes right; shifting the whole layer by the mean
    // residual of the anchored nodes recentres it without breaking separation.
    let (residual_sum, anchored) = desired
        .iter()
        .zip(&placed)
        .filter_map(|(d, x)| d.map(|d| d - x))
        .fold((0.0_f64, 0usize), |(s, n), r| (s + r, n + 1));
    let shift = if anchored > 0 {
        residual_sum / anchored as f64
    } else {
        0.0
    };

    for (v, x) in layer.iter().zip(placed) {
        xs.insert(v.clone(), x + shift);
    }
}
