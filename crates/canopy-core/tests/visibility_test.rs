use canopy_core::{
    AssetGraph, CollapseState, CyclicGraphError, Dataset, Filter, Node, compute_visible,
};

fn graph(nodes: Vec<Node>) -> AssetGraph {
    AssetGraph::new(Dataset {
        nodes,
        edges: vec![],
    })
}

fn cloud_aws_gcp() -> AssetGraph {
    graph(vec![
        Node::new("cloud", "Cloud", "cloud")
            .with_counts(5, 1)
            .with_children(["aws", "gcp"]),
        Node::new("aws", "AWS", "aws")
            .with_counts(3, 0)
            .with_children(["s3"]),
        Node::new("gcp", "GCP", "gcp").with_counts(2, 2),
        Node::new("s3", "S3", "service").with_counts(1, 1),
    ])
}

#[test]
fn scenario_all_expanded_shows_every_reachable_node() {
    let g = graph(vec![
        Node::new("cloud", "Cloud", "cloud").with_children(["aws", "gcp"]),
        Node::new("aws", "AWS", "aws"),
        Node::new("gcp", "GCP", "gcp"),
    ]);
    let visible = compute_visible(&g, &CollapseState::new(), Filter::All).unwrap();

    assert_eq!(visible.node_ids(), vec!["cloud", "aws", "gcp"]);
    assert_eq!(visible.edge_ids(), vec!["cloud-aws", "cloud-gcp"]);
    assert_eq!(visible.edges[0].source, "cloud");
    assert_eq!(visible.edges[0].target, "aws");
    assert_eq!(visible.edges[0].target_category, "aws");
    assert_eq!(visible.edges[1].target_category, "gcp");
}

#[test]
fn scenario_collapsed_root_hides_everything_below() {
    let g = cloud_aws_gcp();
    let collapse: CollapseState = ["cloud"].into_iter().collect();
    let visible = compute_visible(&g, &collapse, Filter::All).unwrap();

    assert_eq!(visible.node_ids(), vec!["cloud"]);
    assert!(visible.edges.is_empty());
    let cloud = visible.node("cloud").unwrap();
    assert!(cloud.collapsed);
    assert!(cloud.collapsible);
}

#[test]
fn scenario_failing_node_is_pruned_with_its_subtree() {
    let g = graph(vec![
        Node::new("cloud", "Cloud", "cloud")
            .with_counts(5, 1)
            .with_children(["aws", "gcp"]),
        Node::new("aws", "AWS", "aws")
            .with_counts(0, 4)
            .with_children(["s3"]),
        Node::new("gcp", "GCP", "gcp").with_counts(2, 0),
        // Passes on its own, but its parent does not.
        Node::new("s3", "S3", "service").with_counts(9, 9),
    ]);
    let visible = compute_visible(&g, &CollapseState::new(), Filter::HasAlerts).unwrap();

    assert_eq!(visible.node_ids(), vec!["cloud", "gcp"]);
    assert_eq!(visible.edge_ids(), vec!["cloud-gcp"]);
}

#[test]
fn scenario_two_node_cycle_is_an_error() {
    let g = graph(vec![
        Node::new("x", "X", "cloud").with_children(["y"]),
        Node::new("y", "Y", "cloud").with_children(["x"]),
    ]);
    assert_eq!(g.roots().count(), 0);

    let err = compute_visible(&g, &CollapseState::new(), Filter::All).unwrap_err();
    assert_eq!(
        err,
        CyclicGraphError {
            path: vec!["x".to_string(), "y".to_string(), "x".to_string()]
        }
    );
    assert_eq!(err.to_string(), "Cycle in node hierarchy: x -> y -> x");
}

#[test]
fn cycle_below_a_root_is_detected_even_when_collapsed() {
    let g = graph(vec![
        Node::new("root", "Root", "cloud").with_children(["a"]),
        Node::new("a", "A", "aws").with_children(["b"]),
        Node::new("b", "B", "aws").with_children(["a"]),
    ]);
    let collapse: CollapseState = ["root"].into_iter().collect();
    let err = compute_visible(&g, &collapse, Filter::All).unwrap_err();
    assert_eq!(err.path, vec!["a", "b", "a"]);
}

#[test]
fn compute_visible_is_idempotent() {
    let g = AssetGraph::demo();
    let collapse: CollapseState = ["aws2"].into_iter().collect();
    for filter in Filter::ALL {
        let first = compute_visible(&g, &collapse, filter).unwrap();
        let second = compute_visible(&g, &collapse, filter).unwrap();
        assert_eq!(first, second, "{filter}");
    }
}

#[test]
fn collapse_keeps_the_node_and_hides_only_its_descendants() {
    let g = cloud_aws_gcp();
    let collapse: CollapseState = ["aws"].into_iter().collect();
    let visible = compute_visible(&g, &collapse, Filter::All).unwrap();

    assert_eq!(visible.node_ids(), vec!["cloud", "aws", "gcp"]);
    assert_eq!(visible.edge_ids(), vec!["cloud-aws", "cloud-gcp"]);
    assert!(visible.node("aws").unwrap().collapsed);
    assert!(!visible.node("gcp").unwrap().collapsible);
}

#[test]
fn every_visible_edge_connects_visible_nodes() {
    let g = AssetGraph::demo();
    for filter in Filter::ALL {
        for collapsed in [vec![], vec!["rds"], vec!["aws1", "aws2"], vec!["cloud"]] {
            let collapse: CollapseState = collapsed.iter().copied().collect();
            let visible = compute_visible(&g, &collapse, filter).unwrap();
            for e in &visible.edges {
                assert!(visible.contains(&e.source), "{}", e.id);
                assert!(visible.contains(&e.target), "{}", e.id);
                assert!(!visible.node(&e.source).unwrap().collapsed, "{}", e.id);
            }
            for n in &visible.nodes {
                assert!(filter.passes(&n.node), "{}", n.id());
            }
        }
    }
}

#[test]
fn roots_do_not_depend_on_filter_or_collapse() {
    let g = graph(vec![
        Node::new("a", "A", "cloud").with_children(["a1"]),
        Node::new("a1", "A1", "aws"),
        Node::new("b", "B", "cloud").with_counts(1, 0),
    ]);
    let roots: Vec<&str> = g.roots().map(|n| n.id.as_str()).collect();
    assert_eq!(roots, vec!["a", "b"]);

    let visible = compute_visible(&g, &CollapseState::new(), Filter::HasAlerts).unwrap();
    assert_eq!(visible.node_ids(), vec!["b"]);
    let roots_after: Vec<&str> = g.roots().map(|n| n.id.as_str()).collect();
    assert_eq!(roots_after, roots);
}

#[test]
fn multiple_roots_are_concatenated_in_dataset_order() {
    let g = graph(vec![
        Node::new("b", "B", "cloud").with_children(["b1"]),
        Node::new("a", "A", "cloud").with_children(["a1"]),
        Node::new("a1", "A1", "aws"),
        Node::new("b1", "B1", "aws"),
    ]);
    let visible = compute_visible(&g, &CollapseState::new(), Filter::All).unwrap();
    assert_eq!(visible.node_ids(), vec!["b", "b1", "a", "a1"]);
    assert_eq!(visible.edge_ids(), vec!["b-b1", "a-a1"]);
}

#[test]
fn dangling_children_are_skipped() {
    let g = graph(vec![
        Node::new("cloud", "Cloud", "cloud").with_children(["ghost", "aws"]),
        Node::new("aws", "AWS", "aws"),
    ]);
    let visible = compute_visible(&g, &CollapseState::new(), Filter::All).unwrap();
    assert_eq!(visible.node_ids(), vec!["cloud", "aws"]);
    assert_eq!(visible.edge_ids(), vec!["cloud-aws"]);
    assert_eq!(g.report().dangling_children.len(), 1);
    assert_eq!(g.report().dangling_children[0].child, "ghost");
}

#[test]
fn shared_descendant_is_emitted_once_with_an_edge_from_each_parent() {
    let g = graph(vec![
        Node::new("root", "Root", "cloud").with_children(["p", "q"]),
        Node::new("p", "P", "aws").with_children(["shared"]),
        Node::new("q", "Q", "gcp").with_children(["shared"]),
        Node::new("shared", "Shared", "database"),
    ]);
    let visible = compute_visible(&g, &CollapseState::new(), Filter::All).unwrap();
    assert_eq!(visible.node_ids(), vec!["root", "p", "shared", "q"]);
    assert_eq!(
        visible.edge_ids(),
        vec!["root-p", "p-shared", "root-q", "q-shared"]
    );
}

#[test]
fn demo_dataset_under_each_filter() {
    let g = AssetGraph::demo();
    let none = CollapseState::new();

    let all = compute_visible(&g, &none, Filter::All).unwrap();
    assert_eq!(
        all.node_ids(),
        vec![
            "cloud", "aws1", "s3", "aws2", "rds", "lambda", "dynamo", "gcp", "saas"
        ]
    );
    assert_eq!(
        all.edge_ids(),
        vec![
            "cloud-aws1",
            "aws1-s3",
            "cloud-aws2",
            "aws2-rds",
            "rds-lambda",
            "rds-dynamo",
            "cloud-gcp",
            "cloud-saas"
        ]
    );

    let alerts = compute_visible(&g, &none, Filter::HasAlerts).unwrap();
    assert!(!alerts.contains("dynamo"));
    assert_eq!(alerts.nodes.len(), 8);
    assert!(!alerts.edge_ids().contains(&"rds-dynamo"));

    let misconfigs = compute_visible(&g, &none, Filter::HasMisconfigurations).unwrap();
    assert_eq!(misconfigs.nodes.len(), 9);
}

#[test]
fn demo_report_classifies_declared_edges() {
    let g = AssetGraph::demo();
    let report = g.report();
    assert_eq!(report.node_count, 9);
    assert_eq!(report.roots, vec!["cloud"]);
    assert_eq!(report.hierarchy_edges.len(), 6);
    assert!(report.cross_links.is_empty());
    assert!(report.duplicate_ids.is_empty());
    assert!(report.cycle.is_none());
}

#[test]
fn duplicate_ids_keep_the_first_node() {
    let g = graph(vec![
        Node::new("a", "First", "cloud"),
        Node::new("a", "Second", "aws"),
    ]);
    assert_eq!(g.len(), 1);
    assert_eq!(g.node("a").unwrap().label, "First");
    assert_eq!(g.report().duplicate_ids, vec!["a"]);
}
