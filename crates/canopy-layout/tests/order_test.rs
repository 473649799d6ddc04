use canopy_layout::graphlib::Graph;
use canopy_layout::order::{OrderOptions, cross_count, init_order, order};
use canopy_layout::{EdgeLabel, GraphLabel, NodeLabel, rank};

fn new_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    Graph::new()
}

fn layer(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn order_of(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str) -> usize {
    g.node(v).unwrap().order.unwrap()
}

#[test]
fn cross_count_returns_0_for_an_empty_layering() {
    let g = new_graph();
    assert_eq!(cross_count(&g, &[]), 0.0);
}

#[test]
fn cross_count_returns_0_for_a_layering_with_no_crossings() {
    let mut g = new_graph();
    g.set_edge("a1", "b1");
    g.set_edge("a2", "b2");
    assert_eq!(
        cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b1", "b2"])]),
        0.0
    );
}

#[test]
fn cross_count_returns_1_for_a_layering_with_1_crossing() {
    let mut g = new_graph();
    g.set_edge("a1", "b1");
    g.set_edge("a2", "b2");
    assert_eq!(
        cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b2", "b1"])]),
        1.0
    );
}

#[test]
fn cross_count_returns_a_weighted_crossing_count() {
    let mut g = new_graph();
    g.set_edge_with_label(
        "a1",
        "b1",
        EdgeLabel {
            weight: 2.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label(
        "a2",
        "b2",
        EdgeLabel {
            weight: 3.0,
            ..Default::default()
        },
    );
    assert_eq!(
        cross_count(&g, &[layer(&["a1", "a2"]), layer(&["b2", "b1"])]),
        6.0
    );
}

#[test]
fn cross_count_sums_over_all_layer_pairs() {
    let mut g = new_graph();
    g.set_path(&["a1", "b1", "c1"]);
    g.set_path(&["a2", "b2", "c2"]);
    assert_eq!(
        cross_count(
            &g,
            &[
                layer(&["a1", "a2"]),
                layer(&["b2", "b1"]),
                layer(&["c1", "c2"])
            ]
        ),
        2.0
    );
}

#[test]
fn init_order_keeps_subtrees_contiguous() {
    let mut g = new_graph();
    g.set_path(&["root", "a", "a1"]);
    g.set_path(&["root", "b", "b1"]);
    g.set_path(&["a", "a2"]);
    rank::rank(&mut g);

    assert_eq!(
        init_order(&g),
        vec![
            layer(&["root"]),
            layer(&["a", "b"]),
            layer(&["a1", "a2", "b1"])
        ]
    );
}

#[test]
fn order_removes_a_crossing_left_by_the_initial_order() {
    let mut g = new_graph();
    g.set_path(&["a", "z"]);
    g.set_path(&["a", "w"]);
    g.set_path(&["b", "z"]);
    rank::rank(&mut g);

    let initial = init_order(&g);
    assert_eq!(initial, vec![layer(&["a", "b"]), layer(&["z", "w"])]);
    assert_eq!(cross_count(&g, &initial), 1.0);

    order(&mut g, OrderOptions::default());
    assert_eq!(order_of(&g, "b"), 0);
    assert_eq!(order_of(&g, "a"), 1);
    assert_eq!(order_of(&g, "z"), 0);
    assert_eq!(order_of(&g, "w"), 1);
    assert_eq!(
        cross_count(&g, &[layer(&["b", "a"]), layer(&["z", "w"])]),
        0.0
    );
}

#[test]
fn order_can_skip_the_sweeps() {
    let mut g = new_graph();
    g.set_path(&["a", "z"]);
    g.set_path(&["a", "w"]);
    g.set_path(&["b", "z"]);
    rank::rank(&mut g);

    order(
        &mut g,
        OrderOptions {
            disable_optimal_order_heuristic: true,
        },
    );
    assert_eq!(order_of(&g, "a"), 0);
    assert_eq!(order_of(&g, "b"), 1);
}
