use callgraph_viz::aggregator::{CallGraph, Fractions, ProfileNode};
use callgraph_viz::graphviz::{edge_color, generate_dot, node_color, ColorScheme, GraphvizConfig};
use callgraph_viz::utils::GraphError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn two_node_graph() -> CallGraph {
    let mut graph = CallGraph::new();
    graph.add_node(ProfileNode::with_fractions("main", 1.0, 1.0));
    graph.add_node(ProfileNode::with_fractions("helper", 0.2, 0.5));
    graph.add_call(None, "main", 1);
    graph.add_call(Some("main"), "helper", 5);
    graph
}

fn section<'a>(doc: &'a str, title: &str) -> Vec<&'a str> {
    let header = format!("    // {}", title);
    doc.lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::trim)
        .collect()
}

#[test]
fn test_two_node_document() {
    let doc = generate_dot(
        &two_node_graph(),
        &GraphvizConfig::default(),
        &ColorScheme::default(),
    )
    .unwrap();

    let expected = format!(
        r#"digraph G {{

    // Attributes
    graph [ overlap = "scalexy", fontname = "Verdana", fontsize = "7", fontcolor = "0 0 0.5", label = "Generated by callgraph-viz v{version}" ];
    node [ fontname = "Verdana", fontsize = "7", color = ".5 0 .9", style = "filled", shape = "rect" ];
    edge [ fontname = "Verdana", fontsize = "7", color = "0 0 0" ];

    // Groups


    // Nodes
    "main" [color = "1.000000 1.000000 0.900000", label = "main\ncalls: n/a\ntotal time: n/a"];
    "helper" [color = "0.650000 0.300000 0.900000", label = "helper\ncalls: n/a\ntotal time: n/a"];

    // Edges
    "main" -> "helper" [color = "0.733333 0.466667 0.700000", label = "5"];

}}
"#,
        version = env!("CARGO_PKG_VERSION")
    );

    assert_eq!(doc, expected);
}

#[test]
fn test_two_node_sections() {
    let doc = generate_dot(
        &two_node_graph(),
        &GraphvizConfig::default(),
        &ColorScheme::default(),
    )
    .unwrap();

    assert_eq!(section(&doc, "Attributes").len(), 3);
    assert!(section(&doc, "Groups").is_empty());
    assert_eq!(section(&doc, "Nodes").len(), 2);

    let edges = section(&doc, "Edges");
    assert_eq!(edges.len(), 1);
    assert!(edges[0].starts_with(r#""main" -> "helper" ["#));
}

#[test]
fn test_generation_is_idempotent() {
    let graph = two_node_graph();
    let config = GraphvizConfig::default().with_groups(true);
    let colors = ColorScheme::default();

    let first = generate_dot(&graph, &config, &colors).unwrap();
    let second = generate_dot(&graph, &config, &colors).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_single_group_lists_both_members() {
    let mut graph = CallGraph::new().with_grouping(true);
    graph.add_node(ProfileNode::with_fractions("f1", 0.5, 0.5).with_group("A"));
    graph.add_node(ProfileNode::with_fractions("f2", 0.5, 0.5).with_group("A"));
    graph.add_call(Some("f1"), "f2", 1);

    let config = GraphvizConfig::default().with_groups(true);
    let doc = generate_dot(&graph, &config, &ColorScheme::default()).unwrap();

    let groups = section(&doc, "Groups");
    assert_eq!(groups.len(), 1);
    assert!(groups[0].starts_with(r#"subgraph "cluster_A" { "f1" "f2";"#));
    assert!(groups[0].contains(r#"label = "A";"#));
}

#[test]
fn test_no_groups_when_config_disabled() {
    let mut graph = CallGraph::new().with_grouping(true);
    graph.add_node(ProfileNode::with_fractions("f1", 0.5, 0.5).with_group("A"));

    let doc = generate_dot(&graph, &GraphvizConfig::default(), &ColorScheme::default()).unwrap();

    assert!(section(&doc, "Groups").is_empty());
}

#[test]
fn test_quotes_in_function_names_are_escaped() {
    let mut graph = CallGraph::new();
    graph.add_node(ProfileNode::with_fractions(r#"say"hi"\x"#, 1.0, 1.0));
    graph.add_node(ProfileNode::with_fractions("plain", 0.5, 0.5));
    graph.add_call(Some(r#"say"hi"\x"#), "plain", 1);

    let doc = generate_dot(&graph, &GraphvizConfig::default(), &ColorScheme::default()).unwrap();

    assert!(doc.contains(r#""say\"hi\"\\x" [color = "#));
    assert!(doc.contains(r#"label = "say\"hi\"\\x\ncalls: "#));
    assert!(doc.contains(r#""say\"hi\"\\x" -> "plain" ["#));
}

#[test]
fn test_empty_graph_is_well_formed() {
    let doc = generate_dot(&CallGraph::new(), &GraphvizConfig::default(), &ColorScheme::default())
        .unwrap();

    assert_eq!(doc.matches('{').count(), doc.matches('}').count());
    assert!(section(&doc, "Nodes").is_empty());
    assert!(section(&doc, "Edges").is_empty());
}

#[test]
fn test_dangling_edge_is_malformed() {
    let mut graph = CallGraph::new();
    graph.add_node(ProfileNode::with_fractions("main", 1.0, 1.0));
    graph.add_call(Some("ghost"), "main", 1);

    let result = generate_dot(&graph, &GraphvizConfig::default(), &ColorScheme::default());

    assert!(matches!(result, Err(GraphError::MalformedInput(_))));
}

#[test]
fn test_out_of_range_fraction_is_malformed() {
    let mut graph = CallGraph::new();
    graph.add_node(ProfileNode::with_fractions("main", 1.0, -0.1));

    let result = generate_dot(&graph, &GraphvizConfig::default(), &ColorScheme::default());

    assert!(result.is_err());
}

#[test]
fn test_time_filter_outside_unit_range_is_malformed() {
    for cutoff in [f64::NAN, -0.1, 1.5] {
        let config = GraphvizConfig::default().with_time_filter(Some(cutoff));

        let result = generate_dot(&two_node_graph(), &config, &ColorScheme::default());

        assert!(matches!(result, Err(GraphError::MalformedInput(_))));
    }
}

#[test]
fn test_time_filter_bounds_are_accepted() {
    for cutoff in [0.0, 1.0] {
        let config = GraphvizConfig::default().with_time_filter(Some(cutoff));
        assert!(generate_dot(&two_node_graph(), &config, &ColorScheme::default()).is_ok());
    }
}

fn components(color: &str) -> Vec<f64> {
    color.split(' ').map(|c| c.parse().unwrap()).collect()
}

proptest! {
    #[test]
    fn prop_colors_follow_weighted_heat(time in 0.0f64..=1.0, calls in 0.0f64..=1.0) {
        let fractions = Fractions { time, calls };
        let value = (time * 2.0 + calls) / 3.0;

        let node = components(&node_color(fractions));
        let edge = components(&edge_color(fractions));

        prop_assert_eq!(node.len(), 3);
        prop_assert_eq!(edge.len(), 3);
        prop_assert!((node[0] - (value / 2.0 + 0.5)).abs() < 1e-6);
        prop_assert!((edge[1] - value).abs() < 1e-6);
        prop_assert_eq!(node_color(fractions), node_color(fractions));
    }

    #[test]
    fn prop_every_edge_endpoint_has_a_node(
        fractions in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 1..12),
        calls in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), 1u64..50), 0..30),
    ) {
        let mut graph = CallGraph::new();
        let names: Vec<String> = (0..fractions.len()).map(|i| format!("mod.func_{}", i)).collect();
        for (name, (time, calls)) in names.iter().zip(&fractions) {
            graph.add_node(ProfileNode::with_fractions(name.clone(), *time, *calls));
        }
        for (caller, callee, count) in &calls {
            graph.add_call(Some(caller.get(&names).as_str()), callee.get::<String>(&names), *count);
        }

        let doc = generate_dot(&graph, &GraphvizConfig::default(), &ColorScheme::default()).unwrap();
        let nodes = section(&doc, "Nodes");
        let edges = section(&doc, "Edges");

        prop_assert!(nodes.len() >= names.len());
        for edge in &edges {
            let endpoints: Vec<&str> = edge.split('"').collect();
            let (caller, callee) = (endpoints[1], endpoints[3]);
            let caller_key = format!("\"{}\" [", caller);
            let callee_key = format!("\"{}\" [", callee);
            prop_assert!(nodes.iter().any(|n| n.starts_with(&caller_key)));
            prop_assert!(nodes.iter().any(|n| n.starts_with(&callee_key)));
        }
    }
}
