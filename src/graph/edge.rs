use super::{arena::SlotKey, GraphTag, VertexId};

/// Handle to an edge, which behaves like [VertexId].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub(crate) graph: GraphTag,
    pub(crate) key: SlotKey,
}

/// Information about an edge: its handle and endpoints.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub sink: VertexId,
}

impl EdgeId {
    pub(crate) fn new(graph: GraphTag, key: SlotKey) -> Self {
        Self { graph, key }
    }

    pub fn graph(&self) -> GraphTag {
        self.graph
    }

    /// Slot index, unique among live edges of the graph.
    pub fn to_raw(&self) -> usize {
        self.key.index
    }
}
