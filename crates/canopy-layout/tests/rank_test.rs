use canopy_layout::graphlib::Graph;
use canopy_layout::rank;
use canopy_layout::{EdgeLabel, GraphLabel, NodeLabel};

fn gansner_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new();
    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);
    g
}

fn assert_respects_minlen(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edges() {
        let v_rank = g.node(&e.v).unwrap().rank.unwrap();
        let w_rank = g.node(&e.w).unwrap().rank.unwrap();
        let minlen = g.edge_by_key(e).unwrap().minlen as i32;
        assert!(
            w_rank - v_rank >= minlen,
            "edge {e} violates minlen {minlen}: {w_rank} - {v_rank}"
        );
    }
}

#[test]
fn rank_assigns_longest_path_distance_from_the_source() {
    let mut g = gansner_graph();
    rank::rank(&mut g);

    let ranks: Vec<(&str, i32)> = g
        .nodes()
        .map(|v| (v, g.node(v).unwrap().rank.unwrap()))
        .collect();
    assert_eq!(
        ranks,
        vec![
            ("a", 0),
            ("b", 1),
            ("c", 2),
            ("d", 3),
            ("h", 4),
            ("e", 1),
            ("g", 2),
            ("f", 1),
        ]
    );
    assert_respects_minlen(&g);
}

#[test]
fn rank_respects_the_minlen_attribute() {
    let mut g = gansner_graph();
    g.set_edge_with_label(
        "a",
        "e",
        EdgeLabel {
            minlen: 3,
            ..Default::default()
        },
    );
    rank::rank(&mut g);

    assert_respects_minlen(&g);
    assert_eq!(g.node("e").unwrap().rank, Some(3));
    assert_eq!(g.node("h").unwrap().rank, Some(5));
}

#[test]
fn rank_puts_every_source_on_rank_zero() {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new();
    g.set_path(&["a", "b"]);
    g.set_path(&["c", "d", "e"]);
    g.set_node("lonely", NodeLabel::default());
    rank::rank(&mut g);

    for v in ["a", "c", "lonely"] {
        assert_eq!(g.node(v).unwrap().rank, Some(0), "{v}");
    }
    assert_eq!(g.node("e").unwrap().rank, Some(2));
}

#[test]
fn rank_slack_measures_extra_edge_length() {
    let mut g = gansner_graph();
    rank::rank(&mut g);

    assert_eq!(rank::slack(&g, "a", "b"), 0);
    assert_eq!(rank::slack(&g, "g", "h"), 1);
    assert_eq!(rank::slack(&g, "f", "g"), 0);
}
