use std::collections::BTreeMap;

use canopy_core::{AttrSet, CanonError, ErrorInfo, VertexId};
use serde::{Deserialize, Serialize};

use crate::graph::check_relabeling;

/// Identifies one edge of a multigraph: an unordered vertex pair plus a
/// parallel index separating edges that share the pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeKey {
    /// Smaller endpoint.
    pub u: VertexId,
    /// Larger endpoint (equal to `u` for self-loops).
    pub v: VertexId,
    /// Index among the edges sharing the same pair.
    pub parallel: u32,
}

impl EdgeKey {
    /// Creates a key, normalizing the endpoint order.
    pub fn new(a: VertexId, b: VertexId, parallel: u32) -> Self {
        let (u, v) = if a <= b { (a, b) } else { (b, a) };
        Self { u, v, parallel }
    }

    /// Returns whether the edge is a self-loop.
    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }
}

/// A vertex- and edge-colored multigraph admitting self-loops and any number
/// of parallel edges per vertex pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColoredMultigraph {
    attrs: AttrSet,
    vertices: BTreeMap<VertexId, AttrSet>,
    edges: BTreeMap<EdgeKey, AttrSet>,
}

impl ColoredMultigraph {
    /// Creates an empty multigraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty multigraph with the provided graph-level attributes.
    pub fn with_attrs(attrs: AttrSet) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    /// Returns the graph-level attribute set.
    pub fn graph_attrs(&self) -> &AttrSet {
        &self.attrs
    }

    /// Replaces the graph-level attribute set.
    pub fn set_graph_attrs(&mut self, attrs: AttrSet) {
        self.attrs = attrs;
    }

    /// Inserts a vertex, replacing the attribute set if it already exists.
    pub fn add_vertex(&mut self, id: VertexId, attrs: AttrSet) {
        self.vertices.insert(id, attrs);
    }

    /// Adds an edge between two existing vertices, assigning the next free
    /// parallel index for the pair. Self-loops are allowed.
    pub fn add_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        attrs: AttrSet,
    ) -> Result<EdgeKey, CanonError> {
        for endpoint in [a, b] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(CanonError::Graph(
                    ErrorInfo::new("unknown-endpoint", "edge endpoint is not a vertex")
                        .with_context("vertex", endpoint.as_raw().to_string()),
                ));
            }
        }
        let key = EdgeKey::new(a, b, self.multiplicity(a, b) as u32);
        self.edges.insert(key, attrs);
        Ok(key)
    }

    /// Replaces the attribute set of an existing edge.
    pub fn set_edge_attrs(&mut self, key: EdgeKey, attrs: AttrSet) -> Result<(), CanonError> {
        match self.edges.get_mut(&key) {
            Some(slot) => {
                *slot = attrs;
                Ok(())
            }
            None => Err(CanonError::Graph(
                ErrorInfo::new("unknown-edge", "edge key is not present")
                    .with_context("u", key.u.as_raw().to_string())
                    .with_context("v", key.v.as_raw().to_string())
                    .with_context("parallel", key.parallel.to_string()),
            )),
        }
    }

    /// Returns the number of vertices.
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the total number of edges, counting parallels.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over vertex identifiers in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Returns the attribute set of a vertex.
    pub fn vertex_attrs(&self, id: VertexId) -> Option<&AttrSet> {
        self.vertices.get(&id)
    }

    /// Returns whether the vertex is present.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Returns the attribute set of an edge.
    pub fn edge_attrs(&self, key: EdgeKey) -> Option<&AttrSet> {
        self.edges.get(&key)
    }

    /// Iterates over all edges in `(min, max, parallel)` order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &AttrSet)> + '_ {
        self.edges.iter().map(|(key, attrs)| (*key, attrs))
    }

    /// Returns the number of edges between the unordered pair `{a, b}`.
    pub fn multiplicity(&self, a: VertexId, b: VertexId) -> usize {
        let probe = EdgeKey::new(a, b, 0);
        self.edges
            .range(probe..=EdgeKey::new(a, b, u32::MAX))
            .filter(|(key, _)| key.u == probe.u && key.v == probe.v)
            .count()
    }

    /// Checks every attribute set in the multigraph.
    pub fn validate(&self) -> Result<(), CanonError> {
        self.attrs.validate()?;
        for attrs in self.vertices.values() {
            attrs.validate()?;
        }
        for attrs in self.edges.values() {
            attrs.validate()?;
        }
        Ok(())
    }

    /// Returns a copy with every vertex renamed through the bijective `map`.
    ///
    /// Parallel indices are carried over untouched; callers that need a
    /// canonical key assignment follow up with [`Self::rekey_parallel_edges`].
    pub fn relabel(&self, map: &BTreeMap<VertexId, VertexId>) -> Result<Self, CanonError> {
        check_relabeling(self.vertices.keys(), map)?;
        let mut out = Self::with_attrs(self.attrs.clone());
        for (id, attrs) in &self.vertices {
            out.add_vertex(map[id], attrs.clone());
        }
        for (key, attrs) in &self.edges {
            out.edges.insert(
                EdgeKey::new(map[&key.u], map[&key.v], key.parallel),
                attrs.clone(),
            );
        }
        Ok(out)
    }

    /// Returns a copy where, for every vertex pair, the parallel edges are
    /// re-keyed `0, 1, …` in ascending attribute-set order.
    ///
    /// This removes the one piece of insertion history an edge key can carry
    /// and makes encodings of equal edge multisets identical.
    pub fn rekey_parallel_edges(&self) -> Self {
        let mut out = Self::with_attrs(self.attrs.clone());
        out.vertices = self.vertices.clone();
        let mut run: Vec<(VertexId, VertexId, AttrSet)> = Vec::new();
        for (key, attrs) in &self.edges {
            run.push((key.u, key.v, attrs.clone()));
        }
        run.sort_by(|a, b| (a.0, a.1, &a.2).cmp(&(b.0, b.1, &b.2)));
        let mut previous: Option<(VertexId, VertexId)> = None;
        let mut next_parallel = 0u32;
        for (u, v, attrs) in run {
            if previous != Some((u, v)) {
                previous = Some((u, v));
                next_parallel = 0;
            }
            out.edges.insert(EdgeKey::new(u, v, next_parallel), attrs);
            next_parallel += 1;
        }
        out
    }
}
