use canopy_core::{AttrSet, VertexId};
use canopy_graph::{
    gen_random_multigraph, graph_canonical_bytes, graph_canonical_hash, multigraph_canonical_bytes,
    multigraph_canonical_hash, recolor_nth_vertex, standardize_graph, ColoredGraph,
};
use proptest::prelude::*;

fn v(raw: u64) -> VertexId {
    VertexId::from_raw(raw)
}

#[test]
fn graph_bytes_ignore_insertion_order() {
    let mut forward = ColoredGraph::new();
    for raw in 0..3 {
        let mut attrs = AttrSet::new();
        attrs.insert("color", "red");
        attrs.insert("flavor", raw as i64);
        forward.add_vertex(v(raw), attrs);
    }
    forward.add_edge(v(0), v(1)).unwrap();
    forward.add_edge(v(1), v(2)).unwrap();

    let mut reverse = ColoredGraph::new();
    for raw in (0..3).rev() {
        let mut attrs = AttrSet::new();
        attrs.insert("flavor", raw as i64);
        attrs.insert("color", "red");
        reverse.add_vertex(v(raw), attrs);
    }
    reverse.add_edge(v(1), v(2)).unwrap();
    reverse.add_edge(v(0), v(1)).unwrap();

    assert_eq!(forward, reverse);
    assert_eq!(
        graph_canonical_bytes(&forward),
        graph_canonical_bytes(&reverse)
    );
    assert_eq!(
        graph_canonical_hash(&forward),
        graph_canonical_hash(&reverse)
    );
}

#[test]
fn standardize_graph_is_idempotent() {
    let mut graph = ColoredGraph::new();
    graph.add_vertex(v(4), AttrSet::new());
    graph.add_vertex(v(2), AttrSet::new());
    graph.add_edge(v(4), v(2)).unwrap();
    let once = standardize_graph(&graph);
    assert_eq!(standardize_graph(&once), once);
    assert_eq!(once, graph);
}

#[test]
fn hash_changes_with_content() {
    let palette = ["red", "green", "blue"];
    let graph = gen_random_multigraph(8, 4, &palette, 11).unwrap();
    let baseline = multigraph_canonical_hash(&graph);

    let mut recolored = graph.clone();
    recolor_nth_vertex(&mut recolored, 0, "magenta").unwrap();
    assert_ne!(baseline, multigraph_canonical_hash(&recolored));
}

proptest! {
    #[test]
    fn multigraph_bytes_are_deterministic(seed in any::<u64>(), nodes in 2usize..9, extra in 0usize..6) {
        let palette = ["red", "green", "blue"];
        let graph = gen_random_multigraph(nodes, extra, &palette, seed).unwrap();
        let again = gen_random_multigraph(nodes, extra, &palette, seed).unwrap();
        prop_assert_eq!(&graph, &again);
        prop_assert_eq!(
            multigraph_canonical_bytes(&graph),
            multigraph_canonical_bytes(&again)
        );
    }
}
