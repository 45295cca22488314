//! Seeded random multigraph generators for tests and benchmarks.
//!
//! The generated graphs follow the shape used throughout the test suites:
//! a random recursive spanning tree plus a number of extra uniformly chosen
//! edges (self-loops permitted), with vertex and edge colors drawn from a
//! palette. All randomness flows through [`RngHandle`] substreams of a
//! single master seed.

use std::collections::BTreeMap;

use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::{AttrSet, RngHandle, VertexId};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::multigraph::{ColoredMultigraph, EdgeKey};

const TREE_STREAM: u64 = 0;
const EXTRA_STREAM: u64 = 1;
const VERTEX_COLOR_STREAM: u64 = 2;
const EDGE_COLOR_STREAM: u64 = 3;
const RELABEL_STREAM: u64 = 4;

/// Generates a connected random colored multigraph on `n_vertices` vertices
/// with `extra_edges` additional edges beyond the spanning tree.
pub fn gen_random_multigraph(
    n_vertices: usize,
    extra_edges: usize,
    palette: &[&str],
    seed: u64,
) -> Result<ColoredMultigraph, CanonError> {
    if n_vertices == 0 {
        return Err(CanonError::Graph(ErrorInfo::new(
            "empty-graph",
            "random multigraph generator requires at least one vertex",
        )));
    }
    if palette.is_empty() {
        return Err(CanonError::Graph(ErrorInfo::new(
            "empty-palette",
            "random multigraph generator requires at least one color",
        )));
    }

    let mut endpoints: Vec<(u64, u64)> = Vec::with_capacity(n_vertices - 1 + extra_edges);
    let mut tree_rng = RngHandle::substream(seed, TREE_STREAM);
    for child in 1..n_vertices as u64 {
        let parent = tree_rng.gen_range(0..child);
        endpoints.push((parent, child));
    }
    let mut extra_rng = RngHandle::substream(seed, EXTRA_STREAM);
    for _ in 0..extra_edges {
        let a = extra_rng.gen_range(0..n_vertices as u64);
        let b = extra_rng.gen_range(0..n_vertices as u64);
        endpoints.push((a, b));
    }

    let mut vertex_rng = RngHandle::substream(seed, VERTEX_COLOR_STREAM);
    let mut graph = ColoredMultigraph::new();
    for id in 0..n_vertices as u64 {
        let color = palette[vertex_rng.gen_range(0..palette.len())];
        let mut attrs = AttrSet::new();
        attrs.insert("color", color);
        graph.add_vertex(VertexId::from_raw(id), attrs);
    }

    let mut edge_rng = RngHandle::substream(seed, EDGE_COLOR_STREAM);
    for (a, b) in endpoints {
        let color = palette[edge_rng.gen_range(0..palette.len())];
        let mut attrs = AttrSet::new();
        attrs.insert("color", color);
        graph.add_edge(VertexId::from_raw(a), VertexId::from_raw(b), attrs)?;
    }
    Ok(graph)
}

/// Applies a random permutation of the vertex identifiers, returning the
/// relabeled multigraph together with the map that was applied.
pub fn random_relabeling(
    graph: &ColoredMultigraph,
    seed: u64,
) -> Result<(ColoredMultigraph, BTreeMap<VertexId, VertexId>), CanonError> {
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let mut shuffled = ids.clone();
    let mut rng = RngHandle::substream(seed, RELABEL_STREAM);
    shuffled.shuffle(&mut rng);
    let map: BTreeMap<VertexId, VertexId> = ids.into_iter().zip(shuffled).collect();
    let relabeled = graph.relabel(&map)?;
    Ok((relabeled, map))
}

/// Replaces the `color` attribute of the `index`-th vertex (ascending order).
pub fn recolor_nth_vertex(
    graph: &mut ColoredMultigraph,
    index: usize,
    color: &str,
) -> Result<(), CanonError> {
    let id = graph.vertex_ids().nth(index).ok_or_else(|| {
        CanonError::Graph(
            ErrorInfo::new("vertex-index", "vertex index out of range")
                .with_context("index", index.to_string()),
        )
    })?;
    let mut attrs = graph.vertex_attrs(id).cloned().unwrap_or_default();
    attrs.insert("color", color);
    graph.add_vertex(id, attrs);
    Ok(())
}

/// Replaces the `color` attribute of the `index`-th edge (key order).
pub fn recolor_nth_edge(
    graph: &mut ColoredMultigraph,
    index: usize,
    color: &str,
) -> Result<(), CanonError> {
    let (key, attrs): (EdgeKey, AttrSet) = graph
        .edges()
        .nth(index)
        .map(|(key, attrs)| (key, attrs.clone()))
        .ok_or_else(|| {
            CanonError::Graph(
                ErrorInfo::new("edge-index", "edge index out of range")
                    .with_context("index", index.to_string()),
            )
        })?;
    graph.set_edge_attrs(key, attrs.with("color", color))
}
