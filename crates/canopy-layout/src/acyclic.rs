//! Break cycles by reversing a DFS feedback arc set, and drop self-loops.
//!
//! Ranking needs a DAG. Visible hierarchies are forests already, but the layout accepts any edge
//! set, so back edges are reversed for the duration of the layout and restored by [`undo`].

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

/// Removes self-loops. They do not influence rank, order or position.
pub fn remove_self_edges(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> usize {
    let loops: Vec<EdgeKey> = g.edges().filter(|e| e.is_self_loop()).cloned().collect();
    for e in &loops {
        let _ = g.remove_edge(&e.v, &e.w);
    }
    loops.len()
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in dfs_fas(g) {
        let Some(mut label) = g.remove_edge(&e.v, &e.w) else {
            continue;
        };
        // An existing opposite edge absorbs the reversed one.
        if let Some(existing) = g.edge_mut(&e.w, &e.v) {
            existing.weight += label.weight;
            existing.minlen = existing.minlen.max(label.minlen);
            continue;
        }
        label.reversed = true;
        g.set_edge_with_label(e.w, e.v, label);
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edge_keys() {
        let reversed = g.edge_by_key(&e).is_some_and(|lbl| lbl.reversed);
        if !reversed {
            continue;
        }
        let Some(mut label) = g.remove_edge(&e.v, &e.w) else {
            continue;
        };
        label.reversed = false;
        g.set_edge_with_label(e.w, e.v, label);
    }
}

fn dfs_fas(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<EdgeKey> {
    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut on_stack: HashSet<String> = HashSet::default();
    let mut visited: HashSet<String> = HashSet::default();
    // (node, its out-edges, next edge index)
    let mut stack: Vec<(String, Vec<EdgeKey>, usize)> = Vec::new();

    for root in g.nodes() {
        if !visited.insert(root.to_string()) {
            continue;
        }
        on_stack.insert(root.to_string());
        stack.push((root.to_string(), g.out_edges(root), 0));

        while let Some((v, out, pos)) = stack.last_mut() {
            let Some(e) = out.get(*pos) else {
                on_stack.remove(v.as_str());
                stack.pop();
                continue;
            };
            *pos += 1;
            if e.is_self_loop() {
                continue;
            }
            if on_stack.contains(&e.w) {
                fas.push(e.clone());
            } else if visited.insert(e.w.clone()) {
                let w = e.w.clone();
                let out = g.out_edges(&w);
                on_stack.insert(w.clone());
                stack.push((w, out, 0));
            }
        }
    }
    fas
}
