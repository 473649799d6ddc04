//! Filter/collapse visibility.
//!
//! Depth-first from every root in dataset order. A node failing the filter is dropped with its
//! whole subtree; a collapsed node stays visible but its children are not visited. Edges come
//! from `children` and are emitted when the parent is visible, expanded, and the child passes.

use crate::error::CyclicGraphError;
use crate::filter::Filter;
use crate::model::{AssetGraph, Node};
use crate::state::CollapseState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleNode {
    #[serde(flatten)]
    pub node: Node,
    pub collapsed: bool,
    /// At least one child resolves, regardless of the filter.
    pub collapsible: bool,
}

impl VisibleNode {
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleEdge {
    /// `"<source>-<target>"`.
    pub id: String,
    pub source: String,
    pub target: String,
    /// Category of the target node; drives the edge color.
    pub target_category: String,
}

impl VisibleEdge {
    fn between(parent: &Node, child: &Node) -> Self {
        Self {
            id: format!("{}-{}", parent.id, child.id),
            source: parent.id.clone(),
            target: child.id.clone(),
            target_category: child.category.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibleGraph {
    pub nodes: Vec<VisibleNode>,
    pub edges: Vec<VisibleEdge>,
}

impl VisibleGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&VisibleNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.node.id.as_str()).collect()
    }

    pub fn edge_ids(&self) -> Vec<&str> {
        self.edges.iter().map(|e| e.id.as_str()).collect()
    }
}

/// Computes the visible subset. Pure: equal inputs give equal, identically ordered output.
///
/// Fails when the `children` relation has a cycle anywhere, reachable from a root or not.
/// Dangling child ids are skipped. A node shared by two parents is emitted once, at its first
/// visit; every visible parent still gets an edge to it.
pub fn compute_visible(
    graph: &AssetGraph,
    collapse: &CollapseState,
    filter: Filter,
) -> Result<VisibleGraph, CyclicGraphError> {
    graph.check_acyclic()?;

    let mut out = VisibleGraph::default();
    let mut emitted = vec![false; graph.len()];
    // (node, position of the next child to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for &root in graph.root_indices() {
        let Some(node) = graph.node_at(root) else {
            continue;
        };
        if emitted[root] || !filter.passes(node) {
            continue;
        }
        if emit(graph, collapse, root, &mut emitted, &mut out) {
            stack.push((root, 0));
        }

        while let Some(frame) = stack.last_mut() {
            let (v, pos) = *frame;
            let Some(&w) = graph.children_of(v).get(pos) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let (Some(parent), Some(child)) = (graph.node_at(v), graph.node_at(w)) else {
                continue;
            };
            if !filter.passes(child) {
                continue;
            }
            out.edges.push(VisibleEdge::between(parent, child));
            if emitted[w] {
                continue;
            }
            if emit(graph, collapse, w, &mut emitted, &mut out) {
                stack.push((w, 0));
            }
        }
    }

    tracing::debug!(
        filter = %filter,
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        "visible graph computed"
    );
    Ok(out)
}

/// Appends the node at `ix`; returns `true` when its children should be visited.
fn emit(
    graph: &AssetGraph,
    collapse: &CollapseState,
    ix: usize,
    emitted: &mut [bool],
    out: &mut VisibleGraph,
) -> bool {
    let Some(node) = graph.node_at(ix) else {
        return false;
    };
    emitted[ix] = true;
    let collapsed = collapse.is_collapsed(&node.id);
    out.nodes.push(VisibleNode {
        node: node.clone(),
        collapsed,
        collapsible: !graph.children_of(ix).is_empty(),
    });
    !collapsed
}
