//! Host-graph embedding of colored multigraphs.
//!
//! A multigraph with edge colors, self-loops, and parallel edges is reduced
//! to a vertex-colored *simple* graph by materializing every multigraph edge
//! as an extra host vertex carrying the edge's color. Host vertices are
//! tagged with a reserved `kind` attribute: `vertex` for original vertices,
//! `edge` for ordinary edge nodes (joined to both endpoints by plain edges),
//! and `loop` for self-loop edge nodes (joined to their single incident
//! vertex by one plain edge). The distinct `loop` tag keeps the embedding
//! injective on isomorphism classes while the host stays strictly simple.

use std::collections::BTreeSet;

use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::{AttrSet, VertexId};
use canopy_graph::ColoredGraph;

/// Reserved attribute key marking the role of a host vertex.
pub const KIND_KEY: &str = "kind";
/// `kind` value for host vertices mirroring multigraph vertices.
pub const KIND_VERTEX: &str = "vertex";
/// `kind` value for host vertices representing ordinary multigraph edges.
pub const KIND_EDGE: &str = "edge";
/// `kind` value for host vertices representing self-loops.
pub const KIND_LOOP: &str = "loop";

/// Dense zero-indexed view of a multigraph, the embedding input.
#[derive(Debug, Clone)]
pub(crate) struct ZeroMultigraph {
    /// Vertex colors, indexed `0..n`.
    pub colors: Vec<AttrSet>,
    /// Edges as `(u, w, color)` triples in canonical key order.
    pub edges: Vec<(usize, usize, AttrSet)>,
}

/// Dense simple host graph produced by the embedding.
#[derive(Debug, Clone)]
pub(crate) struct HostEmbedding {
    /// Host vertex colors: `n` vertex nodes followed by `m` edge nodes.
    pub colors: Vec<AttrSet>,
    /// Symmetric adjacency over `0..n+m`.
    pub adj: Vec<BTreeSet<usize>>,
    /// Number of original multigraph vertices.
    pub n_vertices: usize,
}

/// Embeds a zero-indexed multigraph into a simple vertex-colored host graph.
///
/// Edge nodes are numbered `n, n+1, …` in the edge-iteration order of the
/// input, so the embedding is a pure function of the zero-indexed multigraph.
pub(crate) fn embed_multigraph(zero: &ZeroMultigraph) -> Result<HostEmbedding, CanonError> {
    let n = zero.colors.len();
    let total = n + zero.edges.len();
    let mut colors = Vec::with_capacity(total);
    let mut adj = vec![BTreeSet::new(); total];

    for attrs in &zero.colors {
        colors.push(tag_kind(attrs, KIND_VERTEX)?);
    }
    for (offset, (u, w, attrs)) in zero.edges.iter().enumerate() {
        let node = n + offset;
        let kind = if u == w { KIND_LOOP } else { KIND_EDGE };
        colors.push(tag_kind(attrs, kind)?);
        // For self-loops both insertions coincide, leaving a single plain
        // edge; the loop tag carries the lost multiplicity.
        adj[node].insert(*u);
        adj[*u].insert(node);
        adj[node].insert(*w);
        adj[*w].insert(node);
    }

    Ok(HostEmbedding {
        colors,
        adj,
        n_vertices: n,
    })
}

/// Converts an embedding into a [`ColoredGraph`] on zero-indexed identifiers,
/// the diagnostic surface exposed by the multigraph driver.
pub(crate) fn host_to_graph(host: &HostEmbedding, graph_attrs: &AttrSet) -> ColoredGraph {
    let mut graph = ColoredGraph::with_attrs(graph_attrs.clone());
    for (index, attrs) in host.colors.iter().enumerate() {
        graph.add_vertex(VertexId::from_raw(index as u64), attrs.clone());
    }
    for (index, neighbors) in host.adj.iter().enumerate() {
        for &other in neighbors.iter().filter(|&&other| index < other) {
            // Both endpoints were added above and the embedding never
            // produces self-adjacency, so insertion cannot fail.
            let _ = graph.add_edge(
                VertexId::from_raw(index as u64),
                VertexId::from_raw(other as u64),
            );
        }
    }
    graph
}

fn tag_kind(attrs: &AttrSet, kind: &str) -> Result<AttrSet, CanonError> {
    if attrs.get(KIND_KEY).is_some() {
        return Err(CanonError::Graph(
            ErrorInfo::new("reserved-kind-key", "attribute key `kind` is reserved")
                .with_hint("rename the attribute before canonicalizing the multigraph"),
        ));
    }
    Ok(attrs.with(KIND_KEY, kind))
}
