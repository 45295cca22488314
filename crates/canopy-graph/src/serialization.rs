use canopy_core::errors::{CanonError, ErrorInfo};
use canopy_core::{AttrSet, VertexId};
use serde::{Deserialize, Serialize};

use crate::graph::ColoredGraph;
use crate::multigraph::ColoredMultigraph;

/// Serializes a simple graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &ColoredGraph) -> Result<Vec<u8>, CanonError> {
    bincode::serialize(&GraphDoc::from_graph(graph))
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a simple graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<ColoredGraph, CanonError> {
    let doc: GraphDoc = bincode::deserialize(bytes)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    doc.into_graph()
}

/// Serializes a simple graph to a JSON string.
pub fn graph_to_json(graph: &ColoredGraph) -> Result<String, CanonError> {
    serde_json::to_string_pretty(&GraphDoc::from_graph(graph))
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a simple graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<ColoredGraph, CanonError> {
    let doc: GraphDoc = serde_json::from_str(json)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    doc.into_graph()
}

/// Serializes a multigraph to a compact binary representation using `bincode`.
pub fn multigraph_to_bytes(graph: &ColoredMultigraph) -> Result<Vec<u8>, CanonError> {
    bincode::serialize(&MultigraphDoc::from_graph(graph))
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a multigraph from its binary representation.
pub fn multigraph_from_bytes(bytes: &[u8]) -> Result<ColoredMultigraph, CanonError> {
    let doc: MultigraphDoc = bincode::deserialize(bytes)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    doc.into_graph()
}

/// Serializes a multigraph to a JSON string.
pub fn multigraph_to_json(graph: &ColoredMultigraph) -> Result<String, CanonError> {
    serde_json::to_string_pretty(&MultigraphDoc::from_graph(graph))
        .map_err(|err| CanonError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a multigraph from a JSON string.
pub fn multigraph_from_json(json: &str) -> Result<ColoredMultigraph, CanonError> {
    let doc: MultigraphDoc = serde_json::from_str(json)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    doc.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct GraphDoc {
    attrs: AttrSet,
    vertices: Vec<VertexRecord>,
    edges: Vec<(u64, u64)>,
}

impl GraphDoc {
    fn from_graph(graph: &ColoredGraph) -> Self {
        Self {
            attrs: graph.graph_attrs().clone(),
            vertices: graph
                .vertex_ids()
                .map(|id| VertexRecord {
                    id: id.as_raw(),
                    attrs: graph.vertex_attrs(id).cloned().unwrap_or_default(),
                })
                .collect(),
            edges: graph
                .edges()
                .into_iter()
                .map(|(u, v)| (u.as_raw(), v.as_raw()))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<ColoredGraph, CanonError> {
        let mut graph = ColoredGraph::with_attrs(self.attrs);
        for record in self.vertices {
            graph.add_vertex(VertexId::from_raw(record.id), record.attrs);
        }
        for (u, v) in self.edges {
            graph.add_edge(VertexId::from_raw(u), VertexId::from_raw(v))?;
        }
        Ok(graph)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MultigraphDoc {
    attrs: AttrSet,
    vertices: Vec<VertexRecord>,
    edges: Vec<EdgeRecord>,
}

impl MultigraphDoc {
    fn from_graph(graph: &ColoredMultigraph) -> Self {
        Self {
            attrs: graph.graph_attrs().clone(),
            vertices: graph
                .vertex_ids()
                .map(|id| VertexRecord {
                    id: id.as_raw(),
                    attrs: graph.vertex_attrs(id).cloned().unwrap_or_default(),
                })
                .collect(),
            edges: graph
                .edges()
                .map(|(key, attrs)| EdgeRecord {
                    u: key.u.as_raw(),
                    v: key.v.as_raw(),
                    attrs: attrs.clone(),
                })
                .collect(),
        }
    }

    fn into_graph(self) -> Result<ColoredMultigraph, CanonError> {
        let mut graph = ColoredMultigraph::with_attrs(self.attrs);
        for record in self.vertices {
            graph.add_vertex(VertexId::from_raw(record.id), record.attrs);
        }
        // Records are stored in key order, so re-insertion reproduces the
        // parallel indices of any standardized multigraph.
        for record in self.edges {
            graph.add_edge(
                VertexId::from_raw(record.u),
                VertexId::from_raw(record.v),
                record.attrs,
            )?;
        }
        Ok(graph)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct VertexRecord {
    id: u64,
    attrs: AttrSet,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    u: u64,
    v: u64,
    attrs: AttrSet,
}
