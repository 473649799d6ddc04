use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashMap as HashMap;

/// Weighted number of edge crossings between each pair of adjacent layers.
///
/// Edges that skip a layer are not counted.
pub fn cross_count(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) -> f64 {
    let mut cc: f64 = 0.0;
    for i in 1..layering.len() {
        cc += two_layer_cross_count(g, &layering[i - 1], &layering[i]);
    }
    cc
}

fn two_layer_cross_count(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    north: &[String],
    south: &[String],
) -> f64 {
    if south.is_empty() {
        return 0.0;
    }

    let south_pos: HashMap<&str, usize> = south
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    #[derive(Debug, Clone, Copy)]
    struct SouthEntry {
        pos: usize,
        weight: f64,
    }

    let mut south_entries: Vec<SouthEntry> = Vec::new();
    for v in north {
        let mut entries: Vec<SouthEntry> = Vec::new();
        g.for_each_out_edge(v, |e, lbl| {
            if let Some(&pos) = south_pos.get(e.w.as_str()) {
                entries.push(SouthEntry {
                    pos,
                    weight: lbl.weight,
                });
            }
        });
        entries.sort_by_key(|e| e.pos);
        south_entries.extend(entries);
    }

    // Accumulator tree (Barth, Jünger & Mutzel): leaves are south positions.
    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<f64> = vec![0.0; tree_size];

    let mut cc: f64 = 0.0;
    for entry in south_entries {
        let mut index = entry.pos + first_index;
        tree[index] += entry.weight;
        let mut weight_sum: f64 = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += entry.weight;
        }
        cc += entry.weight * weight_sum;
    }

    cc
}
