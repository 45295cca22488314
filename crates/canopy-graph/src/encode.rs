//! Standardized graph encodings and canonical content hashes.
//!
//! Standardization fixes the one degree of freedom the ordered containers do
//! not already remove (parallel-edge key assignment) and re-emits the graph
//! through its public constructors. The byte encodings are pure functions of
//! the standardized contents: two graphs with the same vertex set, edge
//! multiset, and attribute sets are bitwise-identical on the wire no matter
//! how they were built.

use sha2::{Digest, Sha256};

use crate::graph::ColoredGraph;
use crate::multigraph::ColoredMultigraph;

/// Returns an encoding-canonical copy of a simple graph.
///
/// Idempotent and graph-preserving: vertices ascend, attribute keys ascend,
/// edges ascend by `(min, max)`.
pub fn standardize_graph(graph: &ColoredGraph) -> ColoredGraph {
    let mut out = ColoredGraph::with_attrs(graph.graph_attrs().clone());
    for id in graph.vertex_ids() {
        out.add_vertex(id, graph.vertex_attrs(id).cloned().unwrap_or_default());
    }
    for (u, v) in graph.edges() {
        // Endpoints were vertices of the source graph; re-insertion cannot fail.
        let _ = out.add_edge(u, v);
    }
    out
}

/// Returns an encoding-canonical copy of a multigraph.
///
/// On top of the ordering guarantees of [`standardize_graph`], parallel
/// edges of each vertex pair are re-keyed `0, 1, …` in ascending
/// attribute-set order, so the encoding is independent of edge insertion
/// order.
pub fn standardize_multigraph(graph: &ColoredMultigraph) -> ColoredMultigraph {
    graph.rekey_parallel_edges()
}

/// Canonical byte encoding of a simple graph.
pub fn graph_canonical_bytes(graph: &ColoredGraph) -> Vec<u8> {
    let graph = standardize_graph(graph);
    let mut out = Vec::new();
    out.extend_from_slice(b"canopy:graph");
    graph.graph_attrs().encode_into(&mut out);
    out.extend_from_slice(&(graph.order() as u64).to_le_bytes());
    for id in graph.vertex_ids() {
        out.extend_from_slice(&id.as_raw().to_le_bytes());
        graph
            .vertex_attrs(id)
            .expect("vertex listed by vertex_ids")
            .encode_into(&mut out);
    }
    let edges = graph.edges();
    out.extend_from_slice(&(edges.len() as u64).to_le_bytes());
    for (u, v) in edges {
        out.extend_from_slice(&u.as_raw().to_le_bytes());
        out.extend_from_slice(&v.as_raw().to_le_bytes());
    }
    out
}

/// Canonical byte encoding of a multigraph.
pub fn multigraph_canonical_bytes(graph: &ColoredMultigraph) -> Vec<u8> {
    let graph = standardize_multigraph(graph);
    let mut out = Vec::new();
    out.extend_from_slice(b"canopy:multigraph");
    graph.graph_attrs().encode_into(&mut out);
    out.extend_from_slice(&(graph.order() as u64).to_le_bytes());
    for id in graph.vertex_ids() {
        out.extend_from_slice(&id.as_raw().to_le_bytes());
        graph
            .vertex_attrs(id)
            .expect("vertex listed by vertex_ids")
            .encode_into(&mut out);
    }
    out.extend_from_slice(&(graph.size() as u64).to_le_bytes());
    for (key, attrs) in graph.edges() {
        out.extend_from_slice(&key.u.as_raw().to_le_bytes());
        out.extend_from_slice(&key.v.as_raw().to_le_bytes());
        out.extend_from_slice(&key.parallel.to_le_bytes());
        attrs.encode_into(&mut out);
    }
    out
}

/// SHA-256 hex digest of the canonical simple-graph encoding.
pub fn graph_canonical_hash(graph: &ColoredGraph) -> String {
    hex_digest(&graph_canonical_bytes(graph))
}

/// SHA-256 hex digest of the canonical multigraph encoding.
pub fn multigraph_canonical_hash(graph: &ColoredMultigraph) -> String {
    hex_digest(&multigraph_canonical_bytes(graph))
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
