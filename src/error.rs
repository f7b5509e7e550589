//! Errors reported by graph and search operations.
use crate::graph::{EdgeId, VertexId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The handle was minted by another graph, or its vertex/edge has been removed.
    #[error("invalid position: {0:?}")]
    InvalidPosition(Position),

    #[error("cannot insert edge {from:?} -> {to:?}: {conflict}")]
    InvalidInsertion {
        from: VertexId,
        to: VertexId,
        conflict: InsertionConflict,
    },

    #[error("vertex {vertex:?} still has {in_degree} incoming and {out_degree} outgoing edges")]
    NotRemovable {
        vertex: VertexId,
        in_degree: usize,
        out_degree: usize,
    },

    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// An edge met during a search carries no weight label of the requested type.
    #[error("edge {0:?} has no weight label")]
    MissingWeight(EdgeId),

    #[error("search cancelled")]
    Cancelled,
}

/// A vertex or an edge handle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Position {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl From<VertexId> for Position {
    fn from(v: VertexId) -> Self {
        Position::Vertex(v)
    }
}

impl From<EdgeId> for Position {
    fn from(e: EdgeId) -> Self {
        Position::Edge(e)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionConflict {
    #[error("self-loop")]
    SelfLoop,
    #[error("duplicates edge {0:?}")]
    Duplicate(EdgeId),
}
