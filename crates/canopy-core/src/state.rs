//! Interaction state snapshots.
//!
//! Snapshots are never mutated in place. Every effective change yields a new snapshot with a
//! bumped revision; no-op requests yield `None`.

use crate::filter::Filter;
use crate::model::AssetGraph;
use rustc_hash::FxHashMap;

/// Per-node collapse flags. Absent ids are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    flags: FxHashMap<String, bool>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: impl Into<String>, collapsed: bool) {
        self.flags.insert(id.into(), collapsed);
    }

    /// Flips the flag for `id` and returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let slot = self.flags.entry(id.to_string()).or_insert(false);
        *slot = !*slot;
        *slot
    }

    /// Ids currently collapsed, sorted.
    pub fn collapsed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .flags
            .iter()
            .filter(|(_, c)| **c)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<S> for CollapseState {
    /// Collapses every id yielded by the iterator.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut state = Self::new();
        for id in iter {
            state.set(id, true);
        }
        state
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    collapse: CollapseState,
    filter: Filter,
    revision: u64,
}

impl InteractionState {
    pub fn new(collapse: CollapseState, filter: Filter) -> Self {
        Self {
            collapse,
            filter,
            revision: 0,
        }
    }

    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn with_filter(&self, filter: Filter) -> Option<Self> {
        if filter == self.filter {
            return None;
        }
        Some(Self {
            collapse: self.collapse.clone(),
            filter,
            revision: self.revision + 1,
        })
    }

    /// Toggles `id` when it is a known node with at least one resolvable child.
    pub fn with_toggled(&self, graph: &AssetGraph, id: &str) -> Option<Self> {
        if !graph.is_collapsible(id) {
            tracing::debug!(id, "toggle ignored: node is not collapsible");
            return None;
        }
        let mut collapse = self.collapse.clone();
        let collapsed = collapse.toggle(id);
        tracing::debug!(id, collapsed, "collapse toggled");
        Some(Self {
            collapse,
            filter: self.filter,
            revision: self.revision + 1,
        })
    }
}
