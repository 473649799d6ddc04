//! Rank assignment.
//!
//! A node's rank is its longest-path distance from a source, so every edge spans at least its
//! `minlen` and siblings of a parent share a rank.

use crate::graphlib::{Graph, alg};
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashMap as HashMap;

pub fn rank(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    longest_path(g);
}

pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    // `acyclic::run` leaves a DAG; if a caller skipped it, fall back to insertion order so the
    // pass still terminates.
    let topo = alg::topsort(g).unwrap_or_else(|| g.node_ids());

    let mut ranks: HashMap<String, i32> = HashMap::default();
    for v in &topo {
        let r = ranks.get(v).copied().unwrap_or(0);
        ranks.entry(v.clone()).or_insert(r);
        for e in g.out_edges(v) {
            if e.is_self_loop() {
                continue;
            }
            let minlen = g.edge_by_key(&e).map(|lbl| lbl.minlen).unwrap_or(1).max(1) as i32;
            let next = r.saturating_add(minlen);
            let entry = ranks.entry(e.w.clone()).or_insert(0);
            if next > *entry {
                *entry = next;
            }
        }
    }

    g.for_each_node_mut(|id, n| {
        n.rank = Some(ranks.get(id).copied().unwrap_or(0));
    });
}

/// Edge slack: how much longer than `minlen` the edge is.
pub fn slack(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, w: &str) -> i32 {
    let w_rank = g.node(w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(v).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge(v, w).map(|lbl| lbl.minlen as i32).unwrap_or(1);
    w_rank - v_rank - minlen
}
