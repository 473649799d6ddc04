#![forbid(unsafe_code)]

//! Asset-graph visibility and view coordination (headless).
//!
//! An [`AssetGraph`] holds the full inventory. [`compute_visible`] applies a [`Filter`] and a
//! [`CollapseState`] to it, [`layout_visible`] positions the result, and [`ViewCoordinator`]
//! ties both to user interaction and a [`Renderer`].

pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod fit;
pub mod layout;
pub mod model;
pub mod state;
pub mod theme;
pub mod visibility;

pub use canopy_layout::RankDir;
pub use config::ViewConfig;
pub use coordinator::{Renderer, ViewCoordinator};
pub use error::{CyclicGraphError, Error, Result};
pub use filter::Filter;
pub use fit::{FitScheduler, FitViewRequest};
pub use layout::{LayoutOptions, PositionedGraph, PositionedNode, layout, layout_visible};
pub use model::{AssetGraph, Dataset, DeclaredEdge, GraphReport, Node};
pub use state::{CollapseState, InteractionState};
pub use theme::{DefaultTheme, EdgeVisualStyle, Icon, NodeVisualStyle, Theme};
pub use visibility::{VisibleEdge, VisibleGraph, VisibleNode, compute_visible};
