#![allow(dead_code)]

use std::collections::BTreeMap;

use canopy_core::{AttrSet, VertexId};
use canopy_graph::ColoredMultigraph;

pub fn v(raw: u64) -> VertexId {
    VertexId::from_raw(raw)
}

pub fn color(name: &str) -> AttrSet {
    [("color", name)].into_iter().collect()
}

/// A two-level diagram: colored external legs `0..4` hanging off an
/// internally symmetric `4-5` pair joined by two blue parallel edges. Its
/// automorphism group is generated by the involution `(0 2)(1 3)(4 5)`.
pub fn two_level_diagram() -> ColoredMultigraph {
    let mut graph = ColoredMultigraph::new();
    for (raw, name) in [
        (0, "red"),
        (1, "green"),
        (2, "red"),
        (3, "green"),
        (4, "black"),
        (5, "black"),
    ] {
        graph.add_vertex(v(raw), color(name));
    }
    graph.add_edge(v(0), v(4), color("red")).unwrap();
    graph.add_edge(v(1), v(4), color("green")).unwrap();
    graph.add_edge(v(2), v(5), color("red")).unwrap();
    graph.add_edge(v(3), v(5), color("green")).unwrap();
    graph.add_edge(v(4), v(5), color("blue")).unwrap();
    graph.add_edge(v(4), v(5), color("blue")).unwrap();
    graph
}

/// Builds the permutation map swapping two identifiers and fixing the rest.
pub fn swap_map(
    graph: &ColoredMultigraph,
    a: VertexId,
    b: VertexId,
) -> BTreeMap<VertexId, VertexId> {
    graph
        .vertex_ids()
        .map(|id| {
            if id == a {
                (id, b)
            } else if id == b {
                (id, a)
            } else {
                (id, id)
            }
        })
        .collect()
}
