use std::collections::{BTreeMap, BTreeSet};

use canopy_core::{AttrSet, CanonError, ErrorInfo, VertexId};

/// A vertex-colored simple graph: no self-loops, no parallel edges, no edge
/// attributes.
///
/// All containers are ordered, so iteration order is a function of the graph
/// contents alone and never of insertion history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColoredGraph {
    attrs: AttrSet,
    vertices: BTreeMap<VertexId, AttrSet>,
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
}

impl ColoredGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the provided graph-level attributes.
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
        self.adjacency.entry(id).or_default();
    }

    /// Inserts an undirected edge between two existing, distinct vertices.
    ///
    /// Duplicate insertions are idempotent.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), CanonError> {
        if u == v {
            return Err(CanonError::Graph(
                ErrorInfo::new("simple-self-loop", "self-loops are not allowed in simple graphs")
                    .with_context("vertex", u.as_raw().to_string()),
            ));
        }
        for endpoint in [u, v] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(CanonError::Graph(
                    ErrorInfo::new("unknown-endpoint", "edge endpoint is not a vertex")
                        .with_context("vertex", endpoint.as_raw().to_string()),
                ));
            }
        }
        self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        Ok(())
    }

    /// Returns the number of vertices.
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    pub fn size(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
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

    /// Returns the neighbors of a vertex in ascending order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Returns the degree of a vertex.
    pub fn degree(&self, id: VertexId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    /// Returns whether the edge `{u, v}` is present.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency.get(&u).is_some_and(|set| set.contains(&v))
    }

    /// Lists the edges as `(min, max)` pairs in ascending order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::with_capacity(self.size());
        for (&u, neighbors) in &self.adjacency {
            for &v in neighbors.iter().filter(|&&v| u < v) {
                out.push((u, v));
            }
        }
        out
    }

    /// Checks every attribute set in the graph.
    pub fn validate(&self) -> Result<(), CanonError> {
        self.attrs.validate()?;
        for attrs in self.vertices.values() {
            attrs.validate()?;
        }
        Ok(())
    }

    /// Returns a copy with every vertex renamed through the bijective `map`.
    ///
    /// The map must mention every vertex exactly once and send distinct
    /// vertices to distinct targets.
    pub fn relabel(&self, map: &BTreeMap<VertexId, VertexId>) -> Result<Self, CanonError> {
        check_relabeling(self.vertices.keys(), map)?;
        let mut out = Self::with_attrs(self.attrs.clone());
        for (id, attrs) in &self.vertices {
            out.add_vertex(map[id], attrs.clone());
        }
        for (u, v) in self.edges() {
            out.add_edge(map[&u], map[&v])?;
        }
        Ok(out)
    }
}

/// Validates that `map` is a bijection covering exactly the given vertices.
pub(crate) fn check_relabeling<'a>(
    vertices: impl Iterator<Item = &'a VertexId>,
    map: &BTreeMap<VertexId, VertexId>,
) -> Result<(), CanonError> {
    let mut covered = 0usize;
    let mut targets = BTreeSet::new();
    for id in vertices {
        covered += 1;
        let target = map.get(id).ok_or_else(|| {
            CanonError::Graph(
                ErrorInfo::new("relabel-missing", "relabeling map does not cover a vertex")
                    .with_context("vertex", id.as_raw().to_string()),
            )
        })?;
        if !targets.insert(*target) {
            return Err(CanonError::Graph(
                ErrorInfo::new("relabel-collision", "relabeling map is not injective")
                    .with_context("target", target.as_raw().to_string()),
            ));
        }
    }
    if covered != map.len() {
        return Err(CanonError::Graph(
            ErrorInfo::new("relabel-extra", "relabeling map mentions unknown vertices")
                .with_context("map_len", map.len().to_string())
                .with_context("graph_order", covered.to_string()),
        ));
    }
    Ok(())
}
