//! Simple-graph canonicalization driver.

use std::collections::{BTreeMap, BTreeSet};

use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::{AttrSet, VertexId};
use canopy_graph::{standardize_graph, ColoredGraph};
use serde::{Deserialize, Serialize};

use crate::bijection::VertexBijection;
use crate::partition::{color_partition, SortCondition};
use crate::refine::RefinementCanonizer;
use crate::sparse::{SimpleCanonizer, SparseGraph};

/// Options shared by the canonicalization drivers.
///
/// Sort conditions bias the ordering of color cells (earlier conditions more
/// significant, matches first); the canonical form is a pure function of the
/// input graph *and* these options. Defaults live on the call, not in
/// process state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonizeOpts {
    /// Ordered sort conditions applied by the color partition builder.
    #[serde(default)]
    pub sort_conditions: Vec<SortCondition>,
}

/// Result of canonicalizing a colored simple graph.
#[derive(Debug, Clone)]
pub struct GraphCanonization {
    /// The canonical isomorph, standardized.
    pub canonical: ColoredGraph,
    /// Generators of the color-preserving automorphism group of the input.
    pub generators: Vec<VertexBijection>,
    /// Bijection sending canonical labels to input labels; its inverse
    /// relabels the input onto the canonical isomorph.
    pub canonical_map: VertexBijection,
}

/// Canonicalizes a colored simple graph with the default backend.
pub fn canonize_graph(
    graph: &ColoredGraph,
    opts: &CanonizeOpts,
) -> Result<GraphCanonization, CanonError> {
    canonize_graph_with(&RefinementCanonizer, graph, opts)
}

/// Canonicalizes a colored simple graph with an explicit backend.
pub fn canonize_graph_with(
    backend: &dyn SimpleCanonizer,
    graph: &ColoredGraph,
    opts: &CanonizeOpts,
) -> Result<GraphCanonization, CanonError> {
    graph.validate()?;
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    if ids.is_empty() {
        return Ok(GraphCanonization {
            canonical: standardize_graph(graph),
            generators: Vec::new(),
            canonical_map: VertexBijection::identity(std::iter::empty()),
        });
    }

    let index_of: BTreeMap<VertexId, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, index))
        .collect();
    let colors: Vec<AttrSet> = ids
        .iter()
        .map(|&id| graph.vertex_attrs(id).cloned().unwrap_or_default())
        .collect();
    let adjacency: Vec<BTreeSet<usize>> = ids
        .iter()
        .map(|&id| graph.neighbors(id).map(|other| index_of[&other]).collect())
        .collect();

    let outcome = canonize_indexed(backend, &colors, &adjacency, &opts.sort_conditions)?;

    let forward: BTreeMap<VertexId, VertexId> = (0..ids.len())
        .map(|position| (ids[position], ids[outcome.lab[position]]))
        .collect();
    let canonical_map = VertexBijection::from_forward(forward)?;
    let canonical = standardize_graph(&graph.relabel(canonical_map.inverse_map())?);
    let generators = outcome
        .generators
        .iter()
        .map(|generator| lift_generator(&ids, generator))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GraphCanonization {
        canonical,
        generators,
        canonical_map,
    })
}

/// Lifts a zero-indexed permutation to a bijection on input identifiers.
pub(crate) fn lift_generator(
    ids: &[VertexId],
    generator: &[usize],
) -> Result<VertexBijection, CanonError> {
    let forward: BTreeMap<VertexId, VertexId> = generator
        .iter()
        .enumerate()
        .map(|(index, &image)| (ids[index], ids[image]))
        .collect();
    VertexBijection::from_forward(forward)
}

/// Zero-indexed canonicalization outcome shared by both drivers.
#[derive(Debug, Clone)]
pub(crate) struct IndexedOutcome {
    /// Canonical labeling in one-line notation.
    pub lab: Vec<usize>,
    /// Automorphism generators as permutations of `0..n`.
    pub generators: Vec<Vec<usize>>,
}

/// Runs partition construction, sparse packing, and the backend on a dense
/// zero-indexed graph, then validates the backend's output.
pub(crate) fn canonize_indexed(
    backend: &dyn SimpleCanonizer,
    colors: &[AttrSet],
    adjacency: &[BTreeSet<usize>],
    conditions: &[SortCondition],
) -> Result<IndexedOutcome, CanonError> {
    let n = colors.len();
    let partition = color_partition(colors, conditions);
    let sparse = SparseGraph::from_adjacency(adjacency);
    let labeling = backend.canonize(&sparse, &partition.lab, &partition.ptn)?;

    check_permutation(n, &labeling.lab, "canonical labeling")?;
    for generator in &labeling.generators {
        check_permutation(n, generator, "automorphism generator")?;
    }
    // The bridge contract requires cell-block preservation: the vertex at
    // position i must carry the same color as the partition's occupant.
    for position in 0..n {
        if colors[labeling.lab[position]] != colors[partition.lab[position]] {
            return Err(CanonError::Internal(
                ErrorInfo::new(
                    "cell-block",
                    "canonical labeling does not preserve color cell blocks",
                )
                .with_context("position", position.to_string()),
            ));
        }
    }

    Ok(IndexedOutcome {
        lab: labeling.lab,
        generators: labeling.generators,
    })
}

fn check_permutation(n: usize, candidate: &[usize], role: &str) -> Result<(), CanonError> {
    let mut seen = vec![false; n];
    let valid = candidate.len() == n
        && candidate.iter().all(|&vertex| {
            if vertex >= n || seen[vertex] {
                false
            } else {
                seen[vertex] = true;
                true
            }
        });
    if valid {
        Ok(())
    } else {
        Err(CanonError::Internal(
            ErrorInfo::new("not-a-permutation", "backend output is not a permutation")
                .with_context("role", role.to_string())
                .with_context("n", n.to_string()),
        ))
    }
}
