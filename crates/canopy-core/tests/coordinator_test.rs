use canopy_core::{
    AssetGraph, Dataset, Filter, FitViewRequest, InteractionState, Node, PositionedGraph,
    Renderer, Theme, ViewConfig, ViewCoordinator,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Recorder {
    renders: Vec<Vec<String>>,
    edge_colors: Vec<Vec<String>>,
    fits: Vec<FitViewRequest>,
}

impl Renderer for Recorder {
    fn render(&mut self, graph: &PositionedGraph, theme: &dyn Theme) {
        self.renders
            .push(graph.nodes.iter().map(|n| n.id().to_string()).collect());
        self.edge_colors.push(
            graph
                .edges
                .iter()
                .map(|e| theme.edge_color(&e.target_category).to_string())
                .collect(),
        );
    }

    fn request_fit_view(&mut self, request: FitViewRequest) {
        self.fits.push(request);
    }
}

fn coordinator(graph: AssetGraph) -> ViewCoordinator<Recorder> {
    ViewCoordinator::new(Arc::new(graph), &ViewConfig::default(), Recorder::default())
}

fn cyclic() -> AssetGraph {
    AssetGraph::new(Dataset {
        nodes: vec![
            Node::new("x", "X", "cloud").with_children(["y"]),
            Node::new("y", "Y", "cloud").with_children(["x"]),
        ],
        edges: vec![],
    })
}

#[test]
fn refresh_renders_once_per_revision() {
    let mut view = coordinator(AssetGraph::demo());
    let first = view.refresh().unwrap();
    let again = view.refresh().unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(view.renderer().renders.len(), 1);
    assert_eq!(view.renderer().renders[0].len(), 9);
    assert_eq!(view.renderer().edge_colors[0][0], "#F97316");
}

#[test]
fn click_toggles_collapse_and_recomputes() {
    let t0 = Instant::now();
    let mut view = coordinator(AssetGraph::demo());
    view.refresh().unwrap();

    assert!(view.on_node_click("aws2", t0).unwrap());
    assert!(view.state().collapse().is_collapsed("aws2"));
    let shown = view.renderer().renders.last().unwrap().clone();
    assert!(shown.contains(&"aws2".to_string()));
    assert!(!shown.contains(&"rds".to_string()));
    assert!(view.fit_pending());

    assert!(view.on_node_click("aws2", t0).unwrap());
    assert_eq!(view.positioned().unwrap().nodes.len(), 9);
}

#[test]
fn clicks_on_leaves_and_unknown_ids_change_nothing() {
    let t0 = Instant::now();
    let mut view = coordinator(AssetGraph::demo());
    view.refresh().unwrap();
    let revision = view.state().revision();

    assert!(!view.on_node_click("gcp", t0).unwrap());
    assert!(!view.on_node_click("nope", t0).unwrap());
    assert_eq!(view.state().revision(), revision);
    assert_eq!(view.renderer().renders.len(), 1);
    assert!(!view.fit_pending());
}

#[test]
fn rapid_collapses_produce_a_single_fit_request() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut view = coordinator(AssetGraph::demo());
    view.refresh().unwrap();

    view.on_node_click("aws1", t0).unwrap();
    view.on_node_click("aws2", t0 + ms(100)).unwrap();
    view.on_node_click("rds", t0 + ms(200)).unwrap();

    assert!(!view.tick(t0 + ms(350)));
    assert!(!view.tick(t0 + ms(499)));
    assert!(view.tick(t0 + ms(500)));
    assert!(!view.tick(t0 + ms(5_000)));

    let fits = &view.renderer().fits;
    assert_eq!(fits.len(), 1);
    assert_eq!(fits[0].padding, 0.2);
    assert_eq!(fits[0].duration, ms(800));
}

#[test]
fn filter_change_recomputes_without_scheduling_a_fit() {
    let mut view = coordinator(AssetGraph::demo());
    view.refresh().unwrap();

    assert!(view.set_filter(Filter::HasAlerts).unwrap());
    assert!(!view.set_filter(Filter::HasAlerts).unwrap());
    assert_eq!(view.renderer().renders.len(), 2);
    assert!(!view.renderer().renders[1].contains(&"dynamo".to_string()));
    assert!(!view.fit_pending());
}

#[test]
fn failed_recomputation_keeps_the_previous_graph() {
    let mut view = coordinator(AssetGraph::demo());
    let before = view.refresh().unwrap();

    let err = view.replace_graph(Arc::new(cyclic())).unwrap_err();
    assert_eq!(err.path, vec!["x", "y", "x"]);
    assert!(Arc::ptr_eq(&view.positioned().unwrap(), &before));
    assert!(!view.is_current());
    assert_eq!(view.renderer().renders.len(), 1);

    // The state still changes; the screen does not.
    assert!(view.set_filter(Filter::HasAlerts).is_err());
    assert_eq!(view.state().filter(), Filter::HasAlerts);
    assert!(Arc::ptr_eq(&view.positioned().unwrap(), &before));

    view.replace_graph(Arc::new(AssetGraph::demo())).unwrap();
    assert_eq!(view.renderer().renders.len(), 2);
    assert_eq!(view.positioned().unwrap().nodes.len(), 8);
}

#[test]
fn cyclic_dataset_never_renders() {
    let mut view = coordinator(cyclic());
    assert!(view.refresh().is_err());
    assert!(view.positioned().is_none());
    assert!(view.renderer().renders.is_empty());
}

#[test]
fn initial_state_can_be_supplied() {
    let collapsed = ["cloud"].into_iter().collect();
    let mut view = coordinator(AssetGraph::demo())
        .with_state(InteractionState::new(collapsed, Filter::All));
    let out = view.refresh().unwrap();
    assert_eq!(out.nodes.len(), 1);
    assert!(out.nodes[0].visible.collapsed);
}
