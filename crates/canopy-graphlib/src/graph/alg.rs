//! Traversal helpers over [`Graph`].

use super::Graph;
use rustc_hash::FxHashMap as HashMap;
use std::collections::{BTreeSet, VecDeque};

/// Depth-first preorder starting from `roots`, visiting successors in edge insertion order.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut out: Vec<String> = Vec::new();
    for &root in roots {
        if !g.has_node(root) {
            continue;
        }
        let mut stack: Vec<String> = vec![root.to_string()];
        while let Some(v) = stack.pop() {
            if !visited.insert(v.clone()) {
                continue;
            }
            // Push in reverse so the first successor is popped first.
            for w in g.successors(&v).into_iter().rev() {
                if !visited.contains(w) {
                    stack.push(w.to_string());
                }
            }
            out.push(v);
        }
    }
    out
}

/// Kahn topological sort. Ready nodes are emitted in insertion order, so the result is stable.
///
/// Returns `None` when the graph contains a cycle (self-loops included).
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Option<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut indegree: HashMap<&str, usize> = g.nodes().map(|v| (v, 0)).collect();
    for e in g.edges() {
        if let Some(d) = indegree.get_mut(e.w.as_str()) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<&str> = g
        .nodes()
        .filter(|v| indegree.get(v).copied().unwrap_or(0) == 0)
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        out.push(v.to_string());
        for w in g.successors(v) {
            let Some(d) = indegree.get_mut(w) else {
                continue;
            };
            *d = d.saturating_sub(1);
            if *d == 0 {
                queue.push_back(w);
            }
        }
    }

    (out.len() == g.node_count()).then_some(out)
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    topsort(g).is_some()
}
