use crate::graph::{arena::Arena, *};
use crate::{Error, InsertionConflict, Position, Result};
use ahash::RandomState;
use std::collections::HashMap;
use tracing::debug;

/// A directed graph for sparse topologies, carrying payloads and labels on vertices and edges.
///
/// Self-loops are rejected, and so is a second edge with the same source and sink.
/// The opposite direction is independent, so `u -> v` and `v -> u` may coexist.
///
/// Handles are checked on every call. A handle from another graph,
/// or of a removed vertex or edge, fails with [Error::InvalidPosition].
///
/// | Operation                     | Complexity                            |
/// | ----------------------------- | ------------------------------------- |
/// | `insert_vertex`               | O(log \|V\|)                          |
/// | `insert_edge`                 | O(log \|E\|)                          |
/// | `remove_edge`                 | O(log \|E\|)                          |
/// | `remove_vertex`               | O(log \|V\|)                          |
/// | `edge_between`                | O(1)                                  |
/// | `in_edges`, `out_edges`       | O(1) to start, O(1) per item          |
/// | `vertices`, `edges`           | O(1) per item, in insertion order     |
/// | labels and payloads           | O(1)                                  |
pub struct SparseGraph<V, E> {
    tag: GraphTag,
    vertices: Arena<VertexNode<V>>,
    edges: Arena<EdgeNode<E>>,
}

struct VertexNode<V> {
    data: V,
    label: Option<Label>,
    // keyed by the opposite endpoint
    out_edges: HashMap<VertexId, EdgeId, RandomState>,
    in_edges: HashMap<VertexId, EdgeId, RandomState>,
}

struct EdgeNode<E> {
    data: E,
    label: Option<Label>,
    source: VertexId,
    sink: VertexId,
}

impl<V, E> Default for SparseGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> SparseGraph<V, E> {
    /// Creates an empty graph with an identity of its own.
    pub fn new() -> Self {
        Self {
            tag: GraphTag::one_more(),
            vertices: Arena::new(),
            edges: Arena::new(),
        }
    }

    pub fn tag(&self) -> GraphTag {
        self.tag
    }

    pub fn insert_vertex(&mut self, data: V) -> VertexId {
        let key = self.vertices.insert(VertexNode {
            data,
            label: None,
            out_edges: HashMap::with_hasher(RandomState::new()),
            in_edges: HashMap::with_hasher(RandomState::new()),
        });
        VertexId::new(self.tag, key)
    }

    pub fn insert_edge(&mut self, source: VertexId, sink: VertexId, data: E) -> Result<EdgeId> {
        let src = self.vertex_node(&source)?;
        self.vertex_node(&sink)?;
        if source == sink {
            debug!(vertex = ?source, "reject self-loop");
            return Err(Error::InvalidInsertion {
                from: source,
                to: sink,
                conflict: InsertionConflict::SelfLoop,
            });
        }
        if let Some(existing) = src.out_edges.get(&sink) {
            debug!(?source, ?sink, ?existing, "reject duplicate edge");
            return Err(Error::InvalidInsertion {
                from: source,
                to: sink,
                conflict: InsertionConflict::Duplicate(*existing),
            });
        }
        let key = self.edges.insert(EdgeNode {
            data,
            label: None,
            source,
            sink,
        });
        let eid = EdgeId::new(self.tag, key);
        if let Some(src) = self.vertices.get_mut(source.key) {
            src.out_edges.insert(sink, eid);
        }
        if let Some(snk) = self.vertices.get_mut(sink.key) {
            snk.in_edges.insert(source, eid);
        }
        Ok(eid)
    }

    pub fn remove_edge(&mut self, edge: &EdgeId) -> Result<E> {
        self.edge_node(edge)?;
        let node = self
            .edges
            .remove(edge.key)
            .ok_or(Error::InvalidPosition(Position::Edge(*edge)))?;
        if let Some(src) = self.vertices.get_mut(node.source.key) {
            src.out_edges.remove(&node.sink);
        }
        if let Some(snk) = self.vertices.get_mut(node.sink.key) {
            snk.in_edges.remove(&node.source);
        }
        debug!(?edge, source = ?node.source, sink = ?node.sink, "edge removed");
        Ok(node.data)
    }

    pub fn remove_vertex(&mut self, vertex: &VertexId) -> Result<V> {
        let node = self.vertex_node(vertex)?;
        if !node.in_edges.is_empty() || !node.out_edges.is_empty() {
            return Err(Error::NotRemovable {
                vertex: *vertex,
                in_degree: node.in_edges.len(),
                out_degree: node.out_edges.len(),
            });
        }
        let node = self
            .vertices
            .remove(vertex.key)
            .ok_or(Error::InvalidPosition(Position::Vertex(*vertex)))?;
        debug!(?vertex, "vertex removed");
        Ok(node.data)
    }

    pub fn vertex_size(&self) -> usize {
        self.vertices.len()
    }

    /// Live vertices in insertion order. Each call starts over.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        let tag = self.tag;
        self.vertices.iter().map(move |(key, _)| VertexId::new(tag, key))
    }

    pub fn contains_vertex(&self, v: &VertexId) -> bool {
        self.vertex_node(v).is_ok()
    }

    pub fn edge_size(&self) -> usize {
        self.edges.len()
    }

    /// Live edges in insertion order. Each call starts over.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let tag = self.tag;
        self.edges.iter().map(move |(key, node)| Edge {
            id: EdgeId::new(tag, key),
            source: node.source,
            sink: node.sink,
        })
    }

    pub fn contains_edge(&self, e: &EdgeId) -> bool {
        self.edge_node(e).is_ok()
    }

    pub fn edge(&self, e: &EdgeId) -> Result<Edge> {
        let node = self.edge_node(e)?;
        Ok(Edge {
            id: *e,
            source: node.source,
            sink: node.sink,
        })
    }

    pub fn source(&self, e: &EdgeId) -> Result<VertexId> {
        self.edge_node(e).map(|node| node.source)
    }

    pub fn sink(&self, e: &EdgeId) -> Result<VertexId> {
        self.edge_node(e).map(|node| node.sink)
    }

    pub fn edge_between(&self, source: &VertexId, sink: &VertexId) -> Result<Option<Edge>> {
        let src = self.vertex_node(source)?;
        self.vertex_node(sink)?;
        let res = src.out_edges.get(sink).map(|eid| Edge {
            id: *eid,
            source: *source,
            sink: *sink,
        });
        Ok(res)
    }

    pub fn out_edges(&self, v: &VertexId) -> Result<impl Iterator<Item = Edge> + '_> {
        let source = *v;
        let node = self.vertex_node(v)?;
        let it = node.out_edges.iter().map(move |(sink, eid)| Edge {
            id: *eid,
            source,
            sink: *sink,
        });
        Ok(it)
    }

    pub fn in_edges(&self, v: &VertexId) -> Result<impl Iterator<Item = Edge> + '_> {
        let sink = *v;
        let node = self.vertex_node(v)?;
        let it = node.in_edges.iter().map(move |(source, eid)| Edge {
            id: *eid,
            source: *source,
            sink,
        });
        Ok(it)
    }

    pub fn out_degree(&self, v: &VertexId) -> Result<usize> {
        self.vertex_node(v).map(|node| node.out_edges.len())
    }

    pub fn in_degree(&self, v: &VertexId) -> Result<usize> {
        self.vertex_node(v).map(|node| node.in_edges.len())
    }

    pub fn vertex(&self, v: &VertexId) -> Result<&V> {
        self.vertex_node(v).map(|node| &node.data)
    }

    pub fn vertex_mut(&mut self, v: &VertexId) -> Result<&mut V> {
        self.vertex_node_mut(v).map(|node| &mut node.data)
    }

    pub fn edge_data(&self, e: &EdgeId) -> Result<&E> {
        self.edge_node(e).map(|node| &node.data)
    }

    pub fn edge_data_mut(&mut self, e: &EdgeId) -> Result<&mut E> {
        self.edge_node_mut(e).map(|node| &mut node.data)
    }

    fn vertex_node(&self, v: &VertexId) -> Result<&VertexNode<V>> {
        if v.graph != self.tag {
            return Err(Error::InvalidPosition(Position::Vertex(*v)));
        }
        self.vertices
            .get(v.key)
            .ok_or(Error::InvalidPosition(Position::Vertex(*v)))
    }

    fn vertex_node_mut(&mut self, v: &VertexId) -> Result<&mut VertexNode<V>> {
        if v.graph != self.tag {
            return Err(Error::InvalidPosition(Position::Vertex(*v)));
        }
        self.vertices
            .get_mut(v.key)
            .ok_or(Error::InvalidPosition(Position::Vertex(*v)))
    }

    fn edge_node(&self, e: &EdgeId) -> Result<&EdgeNode<E>> {
        if e.graph != self.tag {
            return Err(Error::InvalidPosition(Position::Edge(*e)));
        }
        self.edges
            .get(e.key)
            .ok_or(Error::InvalidPosition(Position::Edge(*e)))
    }

    fn edge_node_mut(&mut self, e: &EdgeId) -> Result<&mut EdgeNode<E>> {
        if e.graph != self.tag {
            return Err(Error::InvalidPosition(Position::Edge(*e)));
        }
        self.edges
            .get_mut(e.key)
            .ok_or(Error::InvalidPosition(Position::Edge(*e)))
    }
}

impl<V, E> PayloadGraph for SparseGraph<V, E> {
    type VertexData = V;
    type EdgeData = E;

    fn vertex(&self, v: &VertexId) -> Result<&V> {
        SparseGraph::vertex(self, v)
    }

    fn vertex_mut(&mut self, v: &VertexId) -> Result<&mut V> {
        SparseGraph::vertex_mut(self, v)
    }

    fn edge_data(&self, e: &EdgeId) -> Result<&E> {
        SparseGraph::edge_data(self, e)
    }

    fn edge_data_mut(&mut self, e: &EdgeId) -> Result<&mut E> {
        SparseGraph::edge_data_mut(self, e)
    }
}

impl<V, E> GrowableGraph for SparseGraph<V, E> {
    fn new() -> Self {
        SparseGraph::new()
    }

    fn insert_vertex(&mut self, data: V) -> VertexId {
        SparseGraph::insert_vertex(self, data)
    }

    fn insert_edge(&mut self, source: VertexId, sink: VertexId, data: E) -> Result<EdgeId> {
        SparseGraph::insert_edge(self, source, sink, data)
    }
}

impl<V, E> EdgeShrinkableGraph for SparseGraph<V, E> {
    fn remove_edge(&mut self, edge: &EdgeId) -> Result<E> {
        SparseGraph::remove_edge(self, edge)
    }
}

impl<V, E> VertexShrinkableGraph for SparseGraph<V, E> {
    fn remove_vertex(&mut self, vertex: &VertexId) -> Result<V> {
        SparseGraph::remove_vertex(self, vertex)
    }
}

impl<V, E> QueryableGraph for SparseGraph<V, E> {
    fn vertex_size(&self) -> usize {
        SparseGraph::vertex_size(self)
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(SparseGraph::vertices(self))
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        SparseGraph::contains_vertex(self, v)
    }

    fn edge_size(&self) -> usize {
        SparseGraph::edge_size(self)
    }

    fn edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        Box::new(SparseGraph::edges(self))
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        SparseGraph::contains_edge(self, e)
    }

    fn edge(&self, e: &EdgeId) -> Result<Edge> {
        SparseGraph::edge(self, e)
    }

    fn edge_between(&self, source: &VertexId, sink: &VertexId) -> Result<Option<Edge>> {
        SparseGraph::edge_between(self, source, sink)
    }

    fn in_edges(&self, v: &VertexId) -> Result<Box<dyn Iterator<Item = Edge> + '_>> {
        let it = SparseGraph::in_edges(self, v)?;
        Ok(Box::new(it))
    }

    fn out_edges(&self, v: &VertexId) -> Result<Box<dyn Iterator<Item = Edge> + '_>> {
        let it = SparseGraph::out_edges(self, v)?;
        Ok(Box::new(it))
    }
}

impl<V, E> LabeledGraph for SparseGraph<V, E> {
    fn label_slot(&self, pos: Position) -> Result<Option<&Label>> {
        match pos {
            Position::Vertex(v) => self.vertex_node(&v).map(|node| node.label.as_ref()),
            Position::Edge(e) => self.edge_node(&e).map(|node| node.label.as_ref()),
        }
    }

    fn label_slot_mut(&mut self, pos: Position) -> Result<&mut Option<Label>> {
        match pos {
            Position::Vertex(v) => self.vertex_node_mut(&v).map(|node| &mut node.label),
            Position::Edge(e) => self.edge_node_mut(&e).map(|node| &mut node.label),
        }
    }

    fn clear_labels(&mut self) {
        for node in self.vertices.values_mut() {
            node.label = None;
        }
        for node in self.edges.values_mut() {
            node.label = None;
        }
    }
}

impl<V, E> std::fmt::Debug for SparseGraph<V, E>
where
    V: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SparseGraph {{")?;
        write!(f, "{:?}", self.debug().indent(2, 2))?;
        writeln!(f, "}}")?;
        Ok(())
    }
}
