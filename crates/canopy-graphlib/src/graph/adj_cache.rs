/// Per-node outgoing/incoming edge indices, rebuilt lazily after structural changes.
#[derive(Debug, Clone)]
pub(super) struct AdjCache {
    pub(super) generation: u64,
    pub(super) out: Vec<Vec<usize>>,
    pub(super) in_: Vec<Vec<usize>>,
}
