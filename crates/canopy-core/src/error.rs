pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Cyclic(#[from] CyclicGraphError),

    #[error("Invalid dataset: {message}")]
    Dataset { message: String },

    #[error("Invalid view config: {message}")]
    Config { message: String },

    #[error("Unknown filter `{name}` (expected All, Alerts or Misconfigurations)")]
    InvalidFilter { name: String },

    #[error(transparent)]
    InvalidDirection(#[from] canopy_layout::ParseRankDirError),
}

/// The `children` relation loops back on itself.
///
/// `path` lists the node ids along the cycle; the first id is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cycle in node hierarchy: {}", .path.join(" -> "))]
pub struct CyclicGraphError {
    pub path: Vec<String>,
}

