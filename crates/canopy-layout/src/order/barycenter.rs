//! Barycenter computation and the bias-aware sort used by each sweep.

use super::Relationship;
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    /// Position of `v` in the layer before sorting.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean `order` of each node's fixed-side neighbours.
///
/// Nodes without neighbours on the fixed side get `barycenter: None` and keep their slot when
/// the layer is sorted.
pub fn barycenter(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    movable: &[String],
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mut sum: f64 = 0.0;
            let mut weight: f64 = 0.0;
            let mut visit = |u: &str, lbl: &EdgeLabel| {
                let u_order = g
                    .node(u)
                    .and_then(|n| n.order)
                    .map(|o| o as f64)
                    .unwrap_or(0.0);
                sum += lbl.weight * u_order;
                weight += lbl.weight;
            };
            match relationship {
                Relationship::InEdges => g.for_each_in_edge(v, |e, lbl| visit(&e.v, lbl)),
                Relationship::OutEdges => g.for_each_out_edge(v, |e, lbl| visit(&e.w, lbl)),
            }

            if weight <= 0.0 {
                return BarycenterEntry {
                    v: v.clone(),
                    i,
                    barycenter: None,
                    weight: None,
                };
            }
            BarycenterEntry {
                v: v.clone(),
                i,
                barycenter: Some(sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}

/// Sorts a layer by barycenter. Entries without a barycenter stay at their original index;
/// ties are broken by original index, reversed when `bias_right` is set.
pub fn sort(entries: Vec<BarycenterEntry>, bias_right: bool) -> Vec<String> {
    let (mut sortable, mut unsortable): (Vec<BarycenterEntry>, Vec<BarycenterEntry>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());

    sortable.sort_by(|a, b| {
        let (ba, bb) = (a.barycenter.unwrap_or(0.0), b.barycenter.unwrap_or(0.0));
        ba.partial_cmp(&bb).unwrap_or(Ordering::Equal).then_with(|| {
            if bias_right {
                b.i.cmp(&a.i)
            } else {
                a.i.cmp(&b.i)
            }
        })
    });
    // Highest index first so `pop` yields the next fixed slot.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));

    let mut vs: Vec<String> = Vec::with_capacity(sortable.len() + unsortable.len());
    let mut vs_index: usize = 0;
    consume_unsortable(&mut vs, &mut unsortable, &mut vs_index);
    for entry in sortable {
        vs.push(entry.v);
        vs_index += 1;
        consume_unsortable(&mut vs, &mut unsortable, &mut vs_index);
    }
    vs.extend(unsortable.into_iter().rev().map(|e| e.v));
    vs
}

fn consume_unsortable(
    vs: &mut Vec<String>,
    unsortable: &mut Vec<BarycenterEntry>,
    index: &mut usize,
) {
    while unsortable.last().is_some_and(|last| last.i <= *index) {
        if let Some(last) = unsortable.pop() {
            vs.push(last.v);
            *index += 1;
        }
    }
}
