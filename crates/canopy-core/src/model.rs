//! Asset dataset and its indexed, immutable graph form.

use crate::error::{CyclicGraphError, Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// One asset of the inventory.
///
/// `children` encodes containment and drives both visibility and layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(alias = "type", default)]
    pub category: String,
    #[serde(alias = "alerts", default)]
    pub alert_count: u32,
    #[serde(alias = "misconfigs", default)]
    pub misconfig_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            alert_count: 0,
            misconfig_count: 0,
            children: Vec::new(),
        }
    }

    pub fn with_counts(mut self, alert_count: u32, misconfig_count: u32) -> Self {
        self.alert_count = alert_count;
        self.misconfig_count = misconfig_count;
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }
}

/// A declared adjacency. Kept for diagnostics; hierarchy comes from `children`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredEdge {
    pub source: String,
    pub target: String,
}

impl DeclaredEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The raw dataset as loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<DeclaredEdge>,
}

impl Dataset {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Dataset {
            message: e.to_string(),
        })
    }

    /// The built-in cloud inventory used by `canopy-cli --demo`.
    pub fn demo() -> Self {
        let nodes = vec![
            Node::new("cloud", "Cloud", "cloud")
                .with_counts(253, 18)
                .with_children(["aws1", "aws2", "gcp", "saas"]),
            Node::new("aws1", "AWS 1", "aws")
                .with_counts(84, 3)
                .with_children(["s3"]),
            Node::new("aws2", "AWS 2", "aws")
                .with_counts(124, 4)
                .with_children(["rds"]),
            Node::new("gcp", "GCP", "gcp").with_counts(28, 9),
            Node::new("saas", "SaaS", "saas").with_counts(123, 5),
            Node::new("s3", "S3", "service").with_counts(66, 3),
            Node::new("lambda", "Lambda", "service").with_counts(66, 3),
            Node::new("dynamo", "DynamoDB", "database").with_counts(0, 1),
            Node::new("rds", "RDS", "service")
                .with_counts(68, 3)
                .with_children(["lambda", "dynamo"]),
        ];
        let edges = [
            ("cloud", "aws1"),
            ("cloud", "aws2"),
            ("cloud", "gcp"),
            ("cloud", "saas"),
            ("aws1", "s3"),
            ("aws2", "rds"),
        ]
        .into_iter()
        .map(|(s, t)| DeclaredEdge::new(s, t))
        .collect();
        Self { nodes, edges }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingChild {
    pub parent: String,
    pub child: String,
}

/// Load diagnostics. None of these are errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphReport {
    pub node_count: usize,
    pub roots: Vec<String>,
    pub dangling_children: Vec<DanglingChild>,
    pub duplicate_ids: Vec<String>,
    /// Declared edges that repeat a `children` relation.
    pub hierarchy_edges: Vec<DeclaredEdge>,
    /// Declared edges with no matching `children` relation. They are not rendered.
    pub cross_links: Vec<DeclaredEdge>,
    /// Present when the hierarchy contains a cycle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
}

/// The full dataset (hidden nodes included) indexed into an arena.
///
/// Child ids are resolved once; dangling ids and repeated children are dropped from the
/// resolved lists but kept in each [`Node::children`].
#[derive(Debug, Clone, Default)]
pub struct AssetGraph {
    nodes: Vec<Node>,
    index: FxHashMap<String, usize>,
    children_ix: Vec<Vec<usize>>,
    roots: Vec<usize>,
    edges: Vec<DeclaredEdge>,
    report: GraphReport,
}

impl AssetGraph {
    pub fn new(dataset: Dataset) -> Self {
        let mut report = GraphReport::default();

        let mut nodes: Vec<Node> = Vec::with_capacity(dataset.nodes.len());
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for mut node in dataset.nodes {
            if index.contains_key(&node.id) {
                tracing::warn!(id = %node.id, "duplicate node id ignored");
                report.duplicate_ids.push(node.id);
                continue;
            }
            if node.label.is_empty() {
                node.label = node.id.clone();
            }
            index.insert(node.id.clone(), nodes.len());
            nodes.push(node);
        }

        let mut children_ix: Vec<Vec<usize>> = Vec::with_capacity(nodes.len());
        let mut referenced = vec![false; nodes.len()];
        for (ix, node) in nodes.iter().enumerate() {
            let mut resolved: Vec<usize> = Vec::with_capacity(node.children.len());
            for child in &node.children {
                let Some(&child_ix) = index.get(child) else {
                    tracing::warn!(parent = %node.id, child = %child, "dangling child reference");
                    report.dangling_children.push(DanglingChild {
                        parent: node.id.clone(),
                        child: child.clone(),
                    });
                    continue;
                };
                if resolved.contains(&child_ix) {
                    continue;
                }
                if child_ix != ix {
                    referenced[child_ix] = true;
                }
                resolved.push(child_ix);
            }
            children_ix.push(resolved);
        }

        let roots: Vec<usize> = (0..nodes.len()).filter(|&ix| !referenced[ix]).collect();

        let hierarchy: FxHashSet<(usize, usize)> = children_ix
            .iter()
            .enumerate()
            .flat_map(|(v, ws)| ws.iter().map(move |&w| (v, w)))
            .collect();
        for e in &dataset.edges {
            let pair = index
                .get(&e.source)
                .zip(index.get(&e.target))
                .map(|(&v, &w)| (v, w));
            if pair.is_some_and(|p| hierarchy.contains(&p)) {
                report.hierarchy_edges.push(e.clone());
            } else {
                report.cross_links.push(e.clone());
            }
        }

        let mut graph = Self {
            nodes,
            index,
            children_ix,
            roots,
            edges: dataset.edges,
            report,
        };
        graph.report.node_count = graph.nodes.len();
        graph.report.roots = graph.roots().map(|n| n.id.clone()).collect();
        graph.report.cycle = graph.check_acyclic().err().map(|e| e.path);
        tracing::debug!(
            nodes = graph.nodes.len(),
            roots = graph.roots.len(),
            "asset graph indexed"
        );
        graph
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::new(Dataset::from_json_str(text)?))
    }

    pub fn demo() -> Self {
        Self::new(Dataset::demo())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|ix| &self.nodes[ix])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node_at(&self, ix: usize) -> Option<&Node> {
        self.nodes.get(ix)
    }

    /// Resolved child indices of the node at `ix`, in declaration order.
    pub fn children_of(&self, ix: usize) -> &[usize] {
        self.children_ix.get(ix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes not listed in any other node's `children`, in dataset order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots.iter().map(|&ix| &self.nodes[ix])
    }

    pub(crate) fn root_indices(&self) -> &[usize] {
        &self.roots
    }

    pub fn declared_edges(&self) -> &[DeclaredEdge] {
        &self.edges
    }

    pub fn report(&self) -> &GraphReport {
        &self.report
    }

    /// A node is collapsible when at least one of its children resolves.
    pub fn is_collapsible(&self, id: &str) -> bool {
        self.index_of(id)
            .is_some_and(|ix| !self.children_of(ix).is_empty())
    }

    /// Checks the whole `children` relation for cycles, roots or not.
    ///
    /// Iterative depth-first search with a visiting/done marker per arena slot.
    pub fn check_acyclic(&self) -> std::result::Result<(), CyclicGraphError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            Visiting,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        // (node, position of the next child to visit)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for start in 0..self.nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::Visiting;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (v, pos) = *frame;
                let Some(&w) = self.children_ix[v].get(pos) else {
                    marks[v] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;
                match marks[w] {
                    Mark::Unvisited => {
                        marks[w] = Mark::Visiting;
                        stack.push((w, 0));
                    }
                    Mark::Visiting => {
                        let from = stack.iter().position(|&(u, _)| u == w).unwrap_or(0);
                        let mut path: Vec<String> = stack[from..]
                            .iter()
                            .map(|&(u, _)| self.nodes[u].id.clone())
                            .collect();
                        path.push(self.nodes[w].id.clone());
                        return Err(CyclicGraphError { path });
                    }
                    Mark::Done => {}
                }
            }
        }
        Ok(())
    }
}

impl From<Dataset> for AssetGraph {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}
