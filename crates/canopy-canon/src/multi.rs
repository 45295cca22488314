//! Multigraph canonicalization driver.
//!
//! The driver standardizes and zero-indexes the input, embeds it into a
//! simple vertex-colored host graph, canonicalizes the host with a
//! `kind=vertex` sort condition prepended (so every original-vertex cell
//! sorts ahead of every edge-node cell), and restricts the host labeling and
//! automorphisms back to the multigraph vertices. Parallel edges of the
//! relabeled result are re-keyed into canonical attribute order before the
//! final standardization.

use std::collections::{BTreeMap, BTreeSet};

use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::{AttrSet, VertexId};
use canopy_graph::{standardize_multigraph, ColoredGraph, ColoredMultigraph};

use crate::bijection::VertexBijection;
use crate::host::{embed_multigraph, host_to_graph, HostEmbedding, ZeroMultigraph, KIND_KEY, KIND_VERTEX};
use crate::partition::SortCondition;
use crate::refine::RefinementCanonizer;
use crate::simple::{canonize_indexed, lift_generator, CanonizeOpts};
use crate::sparse::SimpleCanonizer;

/// Result of canonicalizing a colored multigraph.
#[derive(Debug, Clone)]
pub struct MultigraphCanonization {
    /// The canonical isomorph, standardized and canonically re-keyed.
    pub canonical: ColoredMultigraph,
    /// Generators of the color-preserving automorphism group of the input.
    pub generators: Vec<VertexBijection>,
    /// Bijection sending canonical labels to input labels; its inverse
    /// relabels the input onto the canonical isomorph.
    pub canonical_map: VertexBijection,
}

/// Host graphs captured for diagnostics, both on zero-indexed identifiers:
/// the multigraph vertices come first, edge nodes follow in canonical edge
/// order.
#[derive(Debug, Clone)]
pub struct HostCapture {
    /// The host graph as embedded, before canonicalization.
    pub embedded: ColoredGraph,
    /// The canonical isomorph of the host graph.
    pub canonical: ColoredGraph,
}

/// Canonicalizes a colored multigraph with the default backend.
pub fn canonize_multigraph(
    graph: &ColoredMultigraph,
    opts: &CanonizeOpts,
) -> Result<MultigraphCanonization, CanonError> {
    canonize_multigraph_with(&RefinementCanonizer, graph, opts)
}

/// Canonicalizes a colored multigraph with an explicit backend.
pub fn canonize_multigraph_with(
    backend: &dyn SimpleCanonizer,
    graph: &ColoredMultigraph,
    opts: &CanonizeOpts,
) -> Result<MultigraphCanonization, CanonError> {
    let (result, _) = canonize_multigraph_inner(backend, graph, opts)?;
    Ok(result)
}

/// Canonicalizes a colored multigraph and captures both host graphs.
pub fn canonize_multigraph_with_host(
    graph: &ColoredMultigraph,
    opts: &CanonizeOpts,
) -> Result<(MultigraphCanonization, HostCapture), CanonError> {
    canonize_multigraph_inner(&RefinementCanonizer, graph, opts)
}

fn canonize_multigraph_inner(
    backend: &dyn SimpleCanonizer,
    graph: &ColoredMultigraph,
    opts: &CanonizeOpts,
) -> Result<(MultigraphCanonization, HostCapture), CanonError> {
    graph.validate()?;
    let standardized = standardize_multigraph(graph);
    let ids: Vec<VertexId> = standardized.vertex_ids().collect();
    let n = ids.len();

    if n == 0 {
        let empty_host = ColoredGraph::with_attrs(standardized.graph_attrs().clone());
        return Ok((
            MultigraphCanonization {
                canonical: standardized,
                generators: Vec::new(),
                canonical_map: VertexBijection::identity(std::iter::empty()),
            },
            HostCapture {
                embedded: empty_host.clone(),
                canonical: empty_host,
            },
        ));
    }

    let index_of: BTreeMap<VertexId, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();
    let zero = ZeroMultigraph {
        colors: ids
            .iter()
            .map(|&id| standardized.vertex_attrs(id).cloned().unwrap_or_default())
            .collect(),
        edges: standardized
            .edges()
            .map(|(key, attrs)| (index_of[&key.u], index_of[&key.v], attrs.clone()))
            .collect(),
    };
    let host = embed_multigraph(&zero)?;

    let mut conditions = Vec::with_capacity(1 + opts.sort_conditions.len());
    conditions.push(SortCondition::new(KIND_KEY, KIND_VERTEX));
    conditions.extend(opts.sort_conditions.iter().cloned());
    let outcome = canonize_indexed(backend, &host.colors, &host.adj, &conditions)?;

    // The kind=vertex condition pins the original vertices to the first n
    // canonical positions; anything else is an invariant violation.
    for position in 0..n {
        if outcome.lab[position] >= n {
            return Err(CanonError::Internal(
                ErrorInfo::new(
                    "host-restriction",
                    "edge node occupies a vertex position in the host labeling",
                )
                .with_context("position", position.to_string())
                .with_context("host_vertex", outcome.lab[position].to_string()),
            ));
        }
    }

    let forward: BTreeMap<VertexId, VertexId> = (0..n)
        .map(|position| (ids[position], ids[outcome.lab[position]]))
        .collect();
    let canonical_map = VertexBijection::from_forward(forward)?;

    let mut generators = Vec::new();
    let mut seen = BTreeSet::new();
    for host_generator in &outcome.generators {
        let restricted = restrict_generator(host_generator, n)?;
        let lifted = lift_generator(&ids, &restricted)?;
        if !lifted.is_identity() && seen.insert(restricted) {
            generators.push(lifted);
        }
    }

    let relabeled = standardized.relabel(canonical_map.inverse_map())?;
    let canonical = standardize_multigraph(&relabeled);

    let capture = HostCapture {
        embedded: host_to_graph(&host, standardized.graph_attrs()),
        canonical: canonical_host(&host, &outcome.lab, standardized.graph_attrs())?,
    };

    Ok((
        MultigraphCanonization {
            canonical,
            generators,
            canonical_map,
        },
        capture,
    ))
}

/// Restricts a host-graph automorphism to the multigraph vertices.
///
/// Every host automorphism stabilizes the `kind=vertex` color cells, so the
/// restriction must again be a permutation of `0..n`.
fn restrict_generator(host_generator: &[usize], n: usize) -> Result<Vec<usize>, CanonError> {
    let restricted: Vec<usize> = host_generator[..n].to_vec();
    if restricted.iter().any(|&image| image >= n) {
        return Err(CanonError::Internal(
            ErrorInfo::new(
                "restricted-generator",
                "host automorphism does not stabilize the vertex cells",
            )
            .with_context("n", n.to_string()),
        ));
    }
    Ok(restricted)
}

/// Relabels the host graph by the inverse of its canonical labeling.
fn canonical_host(
    host: &HostEmbedding,
    lab: &[usize],
    graph_attrs: &AttrSet,
) -> Result<ColoredGraph, CanonError> {
    let embedded = host_to_graph(host, graph_attrs);
    let inverse: BTreeMap<VertexId, VertexId> = lab
        .iter()
        .enumerate()
        .map(|(position, &vertex)| {
            (
                VertexId::from_raw(vertex as u64),
                VertexId::from_raw(position as u64),
            )
        })
        .collect();
    Ok(canopy_graph::standardize_graph(&embedded.relabel(&inverse)?))
}
