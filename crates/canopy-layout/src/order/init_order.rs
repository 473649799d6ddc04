use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

/// Initial layering: nodes are visited depth-first, starting from the lowest ranks, and appended
/// to their rank's layer in visit order. Subtrees therefore start out contiguous.
pub fn init_order(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<Vec<String>> {
    let Some(max_rank) = crate::util::max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];
    let mut visited: HashSet<String> = HashSet::default();

    let mut ordered_vs: Vec<(i32, usize, &str)> = g
        .nodes()
        .enumerate()
        .map(|(idx, v)| {
            let rank = g.node(v).and_then(|n| n.rank).unwrap_or(i32::MAX);
            (rank, idx, v)
        })
        .collect();
    // Insertion order breaks rank ties so symmetric inputs do not produce mirrored layouts.
    ordered_vs.sort_by_key(|(rank, idx, _)| (*rank, *idx));

    for (_, _, start) in ordered_vs {
        let mut stack: Vec<&str> = vec![start];
        while let Some(v) = stack.pop() {
            if !visited.insert(v.to_string()) {
                continue;
            }
            if let Some(rank) = g.node(v).and_then(|n| n.rank) {
                if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
                    layer.push(v.to_string());
                }
            }
            for w in g.successors(v).into_iter().rev() {
                if !visited.contains(w) {
                    stack.push(w);
                }
            }
        }
    }

    layers
}
