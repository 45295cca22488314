mod common;

use canopy_canon::{
    canonize_multigraph, canonize_multigraph_with_host, CanonizeOpts, KIND_EDGE, KIND_KEY,
    KIND_LOOP, KIND_VERTEX,
};
use canopy_core::{AttrValue, VertexId};
use canopy_graph::{ColoredGraph, ColoredMultigraph};
use common::{color, two_level_diagram, v};

fn kind_of(host: &ColoredGraph, id: VertexId) -> &AttrValue {
    host.vertex_attrs(id)
        .and_then(|attrs| attrs.get(KIND_KEY))
        .expect("host vertices carry a kind tag")
}

fn count_kind(host: &ColoredGraph, kind: &str) -> usize {
    host.vertex_ids()
        .filter(|&id| kind_of(host, id) == &AttrValue::from(kind))
        .count()
}

#[test]
fn host_has_one_node_per_vertex_and_edge() {
    let graph = two_level_diagram();
    let (_, capture) =
        canonize_multigraph_with_host(&graph, &CanonizeOpts::default()).unwrap();

    assert_eq!(
        capture.embedded.order(),
        graph.order() + graph.size()
    );
    assert_eq!(count_kind(&capture.embedded, KIND_VERTEX), graph.order());
    assert_eq!(count_kind(&capture.embedded, KIND_EDGE), graph.size());

    // Every ordinary edge node joins exactly its two endpoints.
    for raw in graph.order() as u64..(graph.order() + graph.size()) as u64 {
        assert_eq!(capture.embedded.degree(v(raw)), 2);
    }
    // The canonical host is a relabeling of the embedded host.
    assert_eq!(capture.canonical.order(), capture.embedded.order());
    assert_eq!(capture.canonical.size(), capture.embedded.size());
    assert_eq!(count_kind(&capture.canonical, KIND_VERTEX), graph.order());
}

#[test]
fn self_loops_become_degree_one_loop_nodes() {
    let mut graph = ColoredMultigraph::new();
    graph.add_vertex(v(0), color("red"));
    graph.add_vertex(v(1), color("blue"));
    graph.add_edge(v(0), v(0), color("black")).unwrap();
    graph.add_edge(v(0), v(1), color("black")).unwrap();

    let (_, capture) =
        canonize_multigraph_with_host(&graph, &CanonizeOpts::default()).unwrap();
    assert_eq!(count_kind(&capture.embedded, KIND_LOOP), 1);
    assert_eq!(count_kind(&capture.embedded, KIND_EDGE), 1);

    let loop_node = capture
        .embedded
        .vertex_ids()
        .find(|&id| kind_of(&capture.embedded, id) == &AttrValue::from(KIND_LOOP))
        .unwrap();
    assert_eq!(capture.embedded.degree(loop_node), 1);
}

#[test]
fn loops_and_parallel_edges_stay_distinguishable() {
    // One vertex with two loops versus two vertices with two parallel
    // edges: same edge count, different isomorphism classes.
    let mut loops = ColoredMultigraph::new();
    loops.add_vertex(v(0), color("black"));
    loops.add_edge(v(0), v(0), color("red")).unwrap();
    loops.add_edge(v(0), v(0), color("red")).unwrap();

    let mut parallels = ColoredMultigraph::new();
    parallels.add_vertex(v(0), color("black"));
    parallels.add_vertex(v(1), color("black"));
    parallels.add_edge(v(0), v(1), color("red")).unwrap();
    parallels.add_edge(v(0), v(1), color("red")).unwrap();

    let opts = CanonizeOpts::default();
    let canonical_loops = canonize_multigraph(&loops, &opts).unwrap().canonical;
    let canonical_parallels = canonize_multigraph(&parallels, &opts).unwrap().canonical;
    assert_ne!(
        canopy_graph::multigraph_canonical_bytes(&canonical_loops),
        canopy_graph::multigraph_canonical_bytes(&canonical_parallels)
    );
}

#[test]
fn reserved_kind_attribute_is_rejected() {
    let mut graph = ColoredMultigraph::new();
    let mut poisoned = color("red");
    poisoned.insert(KIND_KEY, "vertex");
    graph.add_vertex(v(0), poisoned);

    let err = canonize_multigraph(&graph, &CanonizeOpts::default()).unwrap_err();
    assert_eq!(err.info().code, "reserved-kind-key");
}
