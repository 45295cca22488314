mod common;

use canopy_canon::{canonize_graph, canonize_multigraph, CanonizeOpts};
use canopy_graph::{
    multigraph_canonical_bytes, standardize_multigraph, ColoredGraph, ColoredMultigraph, EdgeKey,
};
use common::{color, swap_map, two_level_diagram, v};

#[test]
fn symmetric_diagram_swap_yields_identical_canonical_form() {
    let graph = two_level_diagram();
    let swapped = graph.relabel(&swap_map(&graph, v(4), v(5))).unwrap();

    // The two inputs differ on the wire but share an isomorphism class.
    assert_ne!(
        multigraph_canonical_bytes(&graph),
        multigraph_canonical_bytes(&swapped)
    );

    let opts = CanonizeOpts::default();
    let result = canonize_multigraph(&graph, &opts).unwrap();
    let swapped_result = canonize_multigraph(&swapped, &opts).unwrap();
    assert_eq!(result.canonical, swapped_result.canonical);

    for outcome in [&result, &swapped_result] {
        assert!(!outcome.generators.is_empty());
        assert!(outcome
            .generators
            .iter()
            .any(|generator| generator.apply(v(4)) == Some(v(5))));
    }
}

#[test]
fn distinct_colors_leave_a_trivial_group() {
    let mut triangle = ColoredMultigraph::new();
    for (raw, name) in [(0, "red"), (1, "green"), (2, "blue")] {
        triangle.add_vertex(v(raw), color(name));
    }
    triangle.add_edge(v(0), v(1), color("orange")).unwrap();
    triangle.add_edge(v(1), v(2), color("violet")).unwrap();
    triangle.add_edge(v(0), v(2), color("cyan")).unwrap();

    let result = canonize_multigraph(&triangle, &CanonizeOpts::default()).unwrap();
    assert!(result.generators.is_empty());
    let back = result
        .canonical
        .relabel(result.canonical_map.forward_map())
        .unwrap();
    assert_eq!(standardize_multigraph(&back), standardize_multigraph(&triangle));
}

#[test]
fn path_with_matching_ends_has_one_reflection() {
    let mut path = ColoredMultigraph::new();
    for (raw, name) in [(0, "red"), (1, "blue"), (2, "red")] {
        path.add_vertex(v(raw), color(name));
    }
    path.add_edge(v(0), v(1), color("black")).unwrap();
    path.add_edge(v(1), v(2), color("black")).unwrap();

    let result = canonize_multigraph(&path, &CanonizeOpts::default()).unwrap();
    assert_eq!(result.generators.len(), 1);
    let reflection = &result.generators[0];
    assert_eq!(reflection.apply(v(0)), Some(v(2)));
    assert_eq!(reflection.apply(v(2)), Some(v(0)));
    assert_eq!(reflection.apply(v(1)), Some(v(1)));
}

#[test]
fn arbitrary_relabelings_share_the_canonical_form() {
    let graph = two_level_diagram();
    // A 6-cycle on the labels, nothing like an automorphism.
    let rotation = graph
        .vertex_ids()
        .map(|id| (id, v((id.as_raw() + 1) % 6)))
        .collect();
    let rotated = graph.relabel(&rotation).unwrap();

    let opts = CanonizeOpts::default();
    let result = canonize_multigraph(&graph, &opts).unwrap();
    let rotated_result = canonize_multigraph(&rotated, &opts).unwrap();
    assert_eq!(result.canonical, rotated_result.canonical);
    assert_eq!(
        multigraph_canonical_bytes(&result.canonical),
        multigraph_canonical_bytes(&rotated_result.canonical)
    );
}

#[test]
fn empty_multigraph_canonizes_to_itself() {
    let empty = ColoredMultigraph::new();
    let result = canonize_multigraph(&empty, &CanonizeOpts::default()).unwrap();
    assert_eq!(result.canonical.order(), 0);
    assert!(result.generators.is_empty());
    assert!(result.canonical_map.is_empty());
}

#[test]
fn parallel_edges_rekey_in_attribute_order() {
    let mut graph = ColoredMultigraph::new();
    graph.add_vertex(v(0), color("black"));
    graph.add_vertex(v(1), color("white"));
    graph.add_edge(v(0), v(1), color("red")).unwrap();
    graph.add_edge(v(0), v(1), color("blue")).unwrap();

    let result = canonize_multigraph(&graph, &CanonizeOpts::default()).unwrap();
    let pair: Vec<EdgeKey> = result.canonical.edges().map(|(key, _)| key).collect();
    assert_eq!(pair.len(), 2);
    assert_eq!(
        result.canonical.edge_attrs(EdgeKey::new(pair[0].u, pair[0].v, 0)),
        Some(&color("blue"))
    );
    assert_eq!(
        result.canonical.edge_attrs(EdgeKey::new(pair[0].u, pair[0].v, 1)),
        Some(&color("red"))
    );
}

#[test]
fn canonical_map_round_trips_the_input() {
    let graph = two_level_diagram();
    let result = canonize_multigraph(&graph, &CanonizeOpts::default()).unwrap();
    let relabeled = result
        .canonical
        .relabel(result.canonical_map.forward_map())
        .unwrap();
    assert_eq!(
        standardize_multigraph(&relabeled),
        standardize_multigraph(&graph)
    );
}

#[test]
fn uniform_colors_form_a_single_cell() {
    let mut path = ColoredMultigraph::new();
    for raw in 0..3 {
        path.add_vertex(v(raw), color("black"));
    }
    path.add_edge(v(0), v(1), color("black")).unwrap();
    path.add_edge(v(1), v(2), color("black")).unwrap();

    let result = canonize_multigraph(&path, &CanonizeOpts::default()).unwrap();
    assert_eq!(result.generators.len(), 1);
    assert_eq!(result.canonical.order(), 3);
}

#[test]
fn simple_graph_driver_reports_the_reflection() {
    let mut path = ColoredGraph::new();
    for (raw, name) in [(0, "red"), (1, "blue"), (2, "red")] {
        path.add_vertex(v(raw), color(name));
    }
    path.add_edge(v(0), v(1)).unwrap();
    path.add_edge(v(1), v(2)).unwrap();

    let result = canonize_graph(&path, &CanonizeOpts::default()).unwrap();
    assert_eq!(result.generators.len(), 1);
    assert_eq!(result.generators[0].apply(v(0)), Some(v(2)));

    let relabeled = result
        .canonical
        .relabel(result.canonical_map.forward_map())
        .unwrap();
    assert_eq!(relabeled, path);
}

#[test]
fn simple_graph_empty_input() {
    let empty = ColoredGraph::new();
    let result = canonize_graph(&empty, &CanonizeOpts::default()).unwrap();
    assert_eq!(result.canonical.order(), 0);
    assert!(result.generators.is_empty());
    assert!(result.canonical_map.is_empty());
}
