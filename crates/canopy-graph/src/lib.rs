#![deny(missing_docs)]

//! Colored graph and multigraph containers with deterministic encodings.
//!
//! The containers here are the value types the canonicalization drivers in
//! `canopy-canon` operate on: a vertex-colored simple graph, a vertex- and
//! edge-colored multigraph, their standardized byte encodings and content
//! hashes, serialization helpers, and seeded random generators used by the
//! test suites.

mod encode;
mod generators;
mod graph;
mod multigraph;
mod serialization;

pub use encode::{
    graph_canonical_bytes, graph_canonical_hash, multigraph_canonical_bytes,
    multigraph_canonical_hash, standardize_graph, standardize_multigraph,
};
pub use generators::{
    gen_random_multigraph, random_relabeling, recolor_nth_edge, recolor_nth_vertex,
};
pub use graph::ColoredGraph;
pub use multigraph::{ColoredMultigraph, EdgeKey};
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, multigraph_from_bytes,
    multigraph_from_json, multigraph_to_bytes, multigraph_to_json,
};
