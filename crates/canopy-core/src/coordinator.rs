//! Glue between interaction state, the engines and a renderer.

use crate::config::ViewConfig;
use crate::error::CyclicGraphError;
use crate::filter::Filter;
use crate::fit::{FitScheduler, FitViewRequest};
use crate::layout::{LayoutOptions, PositionedGraph, layout_visible};
use crate::model::AssetGraph;
use crate::state::InteractionState;
use crate::theme::{DefaultTheme, Theme};
use crate::visibility::compute_visible;
use std::sync::Arc;
use std::time::Instant;

/// Draws positioned graphs. Clicks come back through [`ViewCoordinator::on_node_click`].
pub trait Renderer {
    fn render(&mut self, graph: &PositionedGraph, theme: &dyn Theme);
    fn request_fit_view(&mut self, request: FitViewRequest);
}

/// Recomputes visibility and layout on every state change and hands the result to the renderer.
///
/// The positioned graph is memoized per state revision. When recomputation fails the new state
/// is kept but the previously positioned graph stays on screen.
pub struct ViewCoordinator<R, T = DefaultTheme> {
    graph: Arc<AssetGraph>,
    options: LayoutOptions,
    theme: T,
    renderer: R,
    state: Arc<InteractionState>,
    positioned: Option<Arc<PositionedGraph>>,
    positioned_revision: Option<u64>,
    fit: FitScheduler,
}

impl<R: Renderer> ViewCoordinator<R> {
    pub fn new(graph: Arc<AssetGraph>, config: &ViewConfig, renderer: R) -> Self {
        Self::with_theme(graph, config, DefaultTheme, renderer)
    }
}

impl<R: Renderer, T: Theme> ViewCoordinator<R, T> {
    pub fn with_theme(graph: Arc<AssetGraph>, config: &ViewConfig, theme: T, renderer: R) -> Self {
        Self {
            graph,
            options: LayoutOptions::from(config),
            theme,
            renderer,
            state: Arc::new(InteractionState::default()),
            positioned: None,
            positioned_revision: None,
            fit: config.fit_scheduler(),
        }
    }

    /// Starts from `state` instead of the default (everything expanded, `All`).
    pub fn with_state(mut self, state: InteractionState) -> Self {
        self.state = Arc::new(state);
        self.positioned_revision = None;
        self
    }

    pub fn graph(&self) -> &Arc<AssetGraph> {
        &self.graph
    }

    pub fn state(&self) -> Arc<InteractionState> {
        Arc::clone(&self.state)
    }

    /// The graph currently on screen, if any computation has succeeded yet.
    pub fn positioned(&self) -> Option<Arc<PositionedGraph>> {
        self.positioned.clone()
    }

    /// `true` when the graph on screen reflects the current state.
    pub fn is_current(&self) -> bool {
        self.positioned_revision == Some(self.state.revision())
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Computes and renders the current state unless it is already on screen.
    pub fn refresh(&mut self) -> Result<Arc<PositionedGraph>, CyclicGraphError> {
        if let Some(positioned) = self.positioned.as_ref().filter(|_| self.is_current()) {
            return Ok(Arc::clone(positioned));
        }

        let state = Arc::clone(&self.state);
        let visible = match compute_visible(&self.graph, state.collapse(), state.filter()) {
            Ok(visible) => visible,
            Err(err) => {
                tracing::warn!(
                    revision = state.revision(),
                    error = %err,
                    "recomputation failed; keeping the previous graph"
                );
                return Err(err);
            }
        };
        let positioned = Arc::new(layout_visible(&visible, &self.options));
        self.renderer.render(&positioned, &self.theme);
        self.positioned = Some(Arc::clone(&positioned));
        self.positioned_revision = Some(state.revision());
        tracing::debug!(revision = state.revision(), "view refreshed");
        Ok(positioned)
    }

    /// Swaps in a reloaded dataset and recomputes. The interaction state carries over.
    pub fn replace_graph(
        &mut self,
        graph: Arc<AssetGraph>,
    ) -> Result<Arc<PositionedGraph>, CyclicGraphError> {
        self.graph = graph;
        self.positioned_revision = None;
        self.refresh()
    }

    /// Toggles collapse on a node with resolvable children and schedules a fit-view.
    ///
    /// Returns `Ok(false)` when the click changed nothing.
    pub fn on_node_click(&mut self, id: &str, now: Instant) -> Result<bool, CyclicGraphError> {
        let Some(next) = self.state.with_toggled(&self.graph, id) else {
            return Ok(false);
        };
        self.state = Arc::new(next);
        self.refresh()?;
        self.fit.schedule(now);
        Ok(true)
    }

    /// Replaces the active filter. Returns `Ok(false)` when it was already active.
    pub fn set_filter(&mut self, filter: Filter) -> Result<bool, CyclicGraphError> {
        let Some(next) = self.state.with_filter(filter) else {
            return Ok(false);
        };
        self.state = Arc::new(next);
        self.refresh()?;
        Ok(true)
    }

    /// Fires the pending fit-view once it is due. Returns `true` when a request was sent.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(request) = self.fit.tick(now) else {
            return false;
        };
        tracing::info!(
            padding = request.padding,
            duration_ms = request.duration.as_millis() as u64,
            "fit view requested"
        );
        self.renderer.request_fit_view(request);
        true
    }

    pub fn fit_pending(&self) -> bool {
        self.fit.is_pending()
    }
}
