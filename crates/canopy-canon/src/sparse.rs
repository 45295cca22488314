//! Sparse adjacency packing and the simple-graph canonizer contract.

use std::collections::BTreeSet;

use canopy_core::CanonError;

/// A zero-indexed simple graph in sparse adjacency form.
///
/// `d[i]` is the degree of vertex `i`, `v[i]` the offset of its neighbor
/// list inside `e`, and `e[v[i] .. v[i] + d[i]]` the neighbors themselves.
/// `nde` is twice the number of undirected edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseGraph {
    /// Number of vertices.
    pub nv: usize,
    /// Number of directed edge slots (`2 × |E|`).
    pub nde: usize,
    /// Neighbor-list offsets, one per vertex.
    pub v: Vec<usize>,
    /// Degrees, one per vertex.
    pub d: Vec<usize>,
    /// Concatenated neighbor lists.
    pub e: Vec<usize>,
}

impl SparseGraph {
    /// Packs a dense symmetric adjacency structure into sparse form.
    pub fn from_adjacency(adj: &[BTreeSet<usize>]) -> Self {
        let nv = adj.len();
        let nde: usize = adj.iter().map(BTreeSet::len).sum();
        let mut v = Vec::with_capacity(nv);
        let mut d = Vec::with_capacity(nv);
        let mut e = Vec::with_capacity(nde);
        for neighbors in adj {
            v.push(e.len());
            d.push(neighbors.len());
            e.extend(neighbors.iter().copied());
        }
        Self { nv, nde, v, d, e }
    }

    /// Returns the neighbor list of vertex `i`.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.e[self.v[i]..self.v[i] + self.d[i]]
    }
}

/// Canonical labeling and automorphism generators returned by a canonizer.
///
/// `lab` is in one-line notation: `lab[i]` is the input vertex occupying
/// position `i` of the canonical order. The permutation taking the input
/// graph to its canonical isomorph is therefore the *inverse* of `lab`.
/// Each generator row is a permutation of `0..nv` in one-line notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLabeling {
    /// Canonical labeling in one-line notation.
    pub lab: Vec<usize>,
    /// Automorphism-group generators in one-line notation.
    pub generators: Vec<Vec<usize>>,
}

/// Contract for the underlying vertex-colored simple-graph canonizer.
///
/// Implementations consume the sparse graph together with an ordered color
/// partition in `(lab, ptn)` form (`ptn[i] = 1` while position `i` shares a
/// cell with position `i + 1`, `0` at each cell's end) and must map every
/// input cell onto that cell's own position block in the returned labeling.
/// Implementations must be reentrant; the drivers may be called from
/// independent threads.
pub trait SimpleCanonizer {
    /// Computes a canonical labeling and automorphism generators.
    fn canonize(
        &self,
        graph: &SparseGraph,
        lab: &[usize],
        ptn: &[u32],
    ) -> Result<CanonicalLabeling, CanonError>;
}
