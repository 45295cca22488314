#![deny(missing_docs)]

//! Canonical forms of vertex- and edge-colored (multi)graphs.
//!
//! Given a colored graph or multigraph, the drivers here compute a canonical
//! isomorph (isomorphic inputs produce byte-identical standardized outputs),
//! the canonical vertex map realizing it, and a generating set for the
//! color-preserving automorphism group. Multigraphs with self-loops and
//! parallel colored edges are reduced to simple vertex-colored host graphs,
//! canonicalized there, and lifted back.
//!
//! The underlying simple-graph canonizer is pluggable through the
//! [`SimpleCanonizer`] trait; [`RefinementCanonizer`] is the in-tree
//! refinement-and-search backend used by default.

mod bijection;
mod host;
mod multi;
mod partition;
mod refine;
mod simple;
mod sparse;

pub use bijection::VertexBijection;
pub use host::{KIND_EDGE, KIND_KEY, KIND_LOOP, KIND_VERTEX};
pub use multi::{
    canonize_multigraph, canonize_multigraph_with, canonize_multigraph_with_host, HostCapture,
    MultigraphCanonization,
};
pub use partition::{color_partition, Partition, SortCondition};
pub use refine::RefinementCanonizer;
pub use simple::{canonize_graph, canonize_graph_with, CanonizeOpts, GraphCanonization};
pub use sparse::{CanonicalLabeling, SimpleCanonizer, SparseGraph};
