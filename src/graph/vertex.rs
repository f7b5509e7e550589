use super::arena::SlotKey;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a graph instance. Every handle carries the tag of the graph which minted it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct GraphTag(u64);

static NEXT_GRAPH_TAG: AtomicU64 = AtomicU64::new(0);

impl GraphTag {
    /// A tag distinct from every tag issued before in this process.
    pub(crate) fn one_more() -> Self {
        Self(NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a vertex.
///
/// It stays valid, against the graph which minted it only, until the vertex is removed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    pub(crate) graph: GraphTag,
    pub(crate) key: SlotKey,
}

impl VertexId {
    pub(crate) fn new(graph: GraphTag, key: SlotKey) -> Self {
        Self { graph, key }
    }

    pub fn graph(&self) -> GraphTag {
        self.graph
    }

    /// Slot index, unique among live vertices of the graph.
    pub fn to_raw(&self) -> usize {
        self.key.index
    }
}
