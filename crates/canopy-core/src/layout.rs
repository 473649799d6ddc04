//! Positions a visible graph with the layered layout engine.

use crate::config::ViewConfig;
use crate::visibility::{VisibleEdge, VisibleGraph, VisibleNode};
use canopy_layout::graphlib::Graph;
use canopy_layout::{EdgeLabel, GraphLabel, NodeLabel, RankDir};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub direction: RankDir,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbours of one rank.
    pub node_sep: f64,
    /// Gap between ranks.
    pub rank_sep: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: RankDir::LR,
            node_width: 160.0,
            node_height: 80.0,
            node_sep: 100.0,
            rank_sep: 80.0,
        }
    }
}

impl From<&ViewConfig> for LayoutOptions {
    fn from(config: &ViewConfig) -> Self {
        Self {
            direction: config.direction,
            node_width: config.node_width,
            node_height: config.node_height,
            node_sep: config.node_sep,
            rank_sep: config.rank_sep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[serde(flatten)]
    pub visible: VisibleNode,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        self.visible.id()
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedGraph {
    pub direction: RankDir,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<VisibleEdge>,
}

impl PositionedGraph {
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }
}

pub fn layout_visible(visible: &VisibleGraph, options: &LayoutOptions) -> PositionedGraph {
    layout(&visible.nodes, &visible.edges, options)
}

/// Lays out `nodes` in a fresh graph. Edges with an endpoint outside `nodes` are ignored.
///
/// Deterministic: equal inputs give equal coordinates.
pub fn layout(
    nodes: &[VisibleNode],
    edges: &[VisibleEdge],
    options: &LayoutOptions,
) -> PositionedGraph {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new();
    g.set_graph(GraphLabel {
        rankdir: options.direction,
        nodesep: options.node_sep,
        ranksep: options.rank_sep,
        ..Default::default()
    });
    for n in nodes {
        g.set_node(
            n.id(),
            NodeLabel::with_size(options.node_width, options.node_height),
        );
    }
    for e in edges {
        if g.has_node(&e.source) && g.has_node(&e.target) {
            g.set_edge(e.source.as_str(), e.target.as_str());
        }
    }

    canopy_layout::layout(&mut g);

    let positioned: Vec<PositionedNode> = nodes
        .iter()
        .map(|n| {
            let label = g.node(n.id());
            let (cx, cy, width, height) = label.map_or(
                (0.0, 0.0, options.node_width, options.node_height),
                |l| (l.x.unwrap_or(0.0), l.y.unwrap_or(0.0), l.width, l.height),
            );
            PositionedNode {
                visible: n.clone(),
                x: cx - width / 2.0,
                y: cy - height / 2.0,
                width,
                height,
            }
        })
        .collect();

    let out = PositionedGraph {
        direction: options.direction,
        width: g.graph().width.unwrap_or(0.0),
        height: g.graph().height.unwrap_or(0.0),
        nodes: positioned,
        edges: edges.to_vec(),
    };
    tracing::debug!(
        direction = %options.direction,
        nodes = out.nodes.len(),
        width = out.width,
        height = out.height,
        "layout finished"
    );
    out
}
