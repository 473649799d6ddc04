//! Core `Graph` container plus the traversal helpers in [`alg`].

use rustc_hash::FxBuildHasher;
use std::cell::RefCell;

mod adj_cache;
pub mod alg;
mod edge_key;

use adj_cache::AdjCache;
use edge_key::EdgeKeyView;
pub use edge_key::EdgeKey;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

/// A simple directed graph: at most one edge per ordered `(v, w)` pair.
///
/// `N`, `E` and `G` are the node, edge and graph label types. Missing labels are filled from the
/// configurable default label factories when nodes are created implicitly by `set_edge`.
pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    graph_label: G,
    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Rank/order passes query successors and predecessors for every node on every sweep. The
    // adjacency is rebuilt on demand after any structural change, keyed by a generation counter.
    adj_gen: u64,
    adj_cache: RefCell<Option<AdjCache>>,
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new() -> Self {
        Self {
            graph_label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adj_gen: 0,
            adj_cache: RefCell::new(None),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
        *self.adj_cache.get_mut() = None;
    }

    fn ensure_adj(&self) -> std::cell::Ref<'_, AdjCache> {
        let generation = self.adj_gen;
        let stale = self
            .adj_cache
            .borrow()
            .as_ref()
            .is_none_or(|c| c.generation != generation);
        if stale {
            let mut out: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
            let mut in_: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
            for (edge_idx, e) in self.edges.iter().enumerate() {
                let Some(&v_idx) = self.node_index.get(e.key.v.as_str()) else {
                    continue;
                };
                let Some(&w_idx) = self.node_index.get(e.key.w.as_str()) else {
                    continue;
                };
                out[v_idx].push(edge_idx);
                in_[w_idx].push(edge_idx);
            }
            *self.adj_cache.borrow_mut() = Some(AdjCache {
                generation,
                out,
                in_,
            });
        }
        std::cell::Ref::map(self.adj_cache.borrow(), |c| {
            c.as_ref()
                .expect("adjacency cache should be present after rebuild")
        })
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(id.as_str()) {
            self.nodes[idx].label = label;
            return self;
        }
        self.invalidate_adj();
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(id.as_str()) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in &mut self.nodes {
            f(&n.id, &mut n.label);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), Some(label))
    }

    fn set_edge_inner(&mut self, v: String, w: String, label: Option<E>) -> &mut Self {
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let key = EdgeKey { v, w };
        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.invalidate_adj();
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    fn edge_index_of(&self, v: &str, w: &str) -> Option<usize> {
        self.edge_index.get(&EdgeKeyView { v, w }).copied()
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index_of(v, w).is_some()
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        let idx = self.edge_index_of(v, w)?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str) -> Option<&mut E> {
        let idx = self.edge_index_of(v, w)?;
        Some(&mut self.edges[idx].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w)
    }

    /// Removes the edge `v -> w` and returns its label.
    pub fn remove_edge(&mut self, v: &str, w: &str) -> Option<E> {
        let idx = self.edge_index_of(v, w)?;
        self.invalidate_adj();
        let entry = self.edges.remove(idx);
        let _ = self.edge_index.remove(&entry.key);
        for i in idx..self.edges.len() {
            if let Some(slot) = self.edge_index.get_mut(&self.edges[i].key) {
                *slot = i;
            }
        }
        Some(entry.label)
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let out: Vec<&str> = cache.out[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.w.as_str())
            .collect();
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let out: Vec<&str> = cache.in_[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.v.as_str())
            .collect();
        out
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let out: Vec<EdgeKey> = cache.out[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.clone())
            .collect();
        out
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(&v_idx) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.ensure_adj();
        let out: Vec<EdgeKey> = cache.in_[v_idx]
            .iter()
            .map(|&edge_idx| self.edges[edge_idx].key.clone())
            .collect();
        out
    }

    /// Visits every incoming edge of `v` with its label, in edge insertion order.
    pub fn for_each_in_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(&v_idx) = self.node_index.get(v) else {
            return;
        };
        let cache = self.ensure_adj();
        for &edge_idx in &cache.in_[v_idx] {
            let e = &self.edges[edge_idx];
            f(&e.key, &e.label);
        }
    }

    /// Visits every outgoing edge of `v` with its label, in edge insertion order.
    pub fn for_each_out_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(&v_idx) = self.node_index.get(v) else {
            return;
        };
        let cache = self.ensure_adj();
        for &edge_idx in &cache.out[v_idx] {
            let e = &self.edges[edge_idx];
            f(&e.key, &e.label);
        }
    }

    /// Nodes without incoming edges, in insertion order. Self-loops count as incoming.
    pub fn sources(&self) -> Vec<&str> {
        let cache = self.ensure_adj();
        let out: Vec<&str> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(idx, _)| cache.in_[*idx].is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect();
        out
    }

    /// Nodes without outgoing edges, in insertion order.
    pub fn sinks(&self) -> Vec<&str> {
        let cache = self.ensure_adj();
        let out: Vec<&str> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(idx, _)| cache.out[*idx].is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect();
        out
    }
}
