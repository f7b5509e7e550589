use crate::{graph::*, Position, Result};
use std::any::Any;

/// A type-erased value attached to a vertex or an edge.
pub type Label = Box<dyn Any + Send + Sync>;

/// Access to payloads carried by vertices and edges.
pub trait PayloadGraph {
    type VertexData;
    type EdgeData;

    fn vertex(&self, v: &VertexId) -> Result<&Self::VertexData>;
    fn vertex_mut(&mut self, v: &VertexId) -> Result<&mut Self::VertexData>;
    fn edge_data(&self, e: &EdgeId) -> Result<&Self::EdgeData>;
    fn edge_data_mut(&mut self, e: &EdgeId) -> Result<&mut Self::EdgeData>;
}

pub trait GrowableGraph: PayloadGraph {
    fn new() -> Self;
    fn insert_vertex(&mut self, data: Self::VertexData) -> VertexId;
    /// Fails on foreign or removed endpoints,
    /// then on self-loops and on a second edge with the same source and sink.
    fn insert_edge(
        &mut self,
        source: VertexId,
        sink: VertexId,
        data: Self::EdgeData,
    ) -> Result<EdgeId>;
}

pub trait EdgeShrinkableGraph: PayloadGraph {
    fn remove_edge(&mut self, edge: &EdgeId) -> Result<Self::EdgeData>;
}

pub trait VertexShrinkableGraph: EdgeShrinkableGraph {
    /// Only isolated vertices can be removed.
    fn remove_vertex(&mut self, vertex: &VertexId) -> Result<Self::VertexData>;
}

pub trait QueryableGraph {
    fn vertex_size(&self) -> usize;
    fn vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_>;
    fn contains_vertex(&self, v: &VertexId) -> bool;

    fn edge_size(&self) -> usize;
    fn edges(&self) -> Box<dyn Iterator<Item = Edge> + '_>;
    fn contains_edge(&self, e: &EdgeId) -> bool;
    fn edge(&self, e: &EdgeId) -> Result<Edge>;
    /// The edge from `source` to `sink`, if any. The opposite direction is not considered.
    fn edge_between(&self, source: &VertexId, sink: &VertexId) -> Result<Option<Edge>>;
    fn in_edges(&self, v: &VertexId) -> Result<Box<dyn Iterator<Item = Edge> + '_>>;
    fn out_edges(&self, v: &VertexId) -> Result<Box<dyn Iterator<Item = Edge> + '_>>;

    fn source(&self, e: &EdgeId) -> Result<VertexId> {
        self.edge(e).map(|e| e.source)
    }

    fn sink(&self, e: &EdgeId) -> Result<VertexId> {
        self.edge(e).map(|e| e.sink)
    }

    fn debug<'a>(&'a self) -> GraphDebug<'a, Self>
    where
        Self: Sized,
    {
        GraphDebug::new(self)
    }
}

/// Labels are caller-owned annotations, distinct from payloads.
///
/// A label can be any `Send + Sync` value and is read back by its type.
pub trait LabeledGraph {
    fn label_slot(&self, pos: Position) -> Result<Option<&Label>>;
    fn label_slot_mut(&mut self, pos: Position) -> Result<&mut Option<Label>>;
    /// Empties labels of all vertices and edges.
    fn clear_labels(&mut self);

    /// Gets the label if it is present and of type `T`.
    fn label<T: Any>(&self, pos: impl Into<Position>) -> Result<Option<&T>> {
        let slot = self.label_slot(pos.into())?;
        Ok(slot.and_then(|l| l.downcast_ref::<T>()))
    }

    /// Attaches a label, replacing the former one whatever its type is.
    fn set_label<T: Any + Send + Sync>(&mut self, pos: impl Into<Position>, value: T) -> Result<()> {
        *self.label_slot_mut(pos.into())? = Some(Box::new(value));
        Ok(())
    }

    /// Detaches the label if it is of type `T`, otherwise leaves it in place.
    fn take_label<T: Any>(&mut self, pos: impl Into<Position>) -> Result<Option<T>> {
        let slot = self.label_slot_mut(pos.into())?;
        match slot.take().map(|l| l.downcast::<T>()) {
            None => Ok(None),
            Some(Ok(x)) => Ok(Some(*x)),
            Some(Err(l)) => {
                *slot = Some(l);
                Ok(None)
            }
        }
    }

    fn clear_label(&mut self, pos: impl Into<Position>) -> Result<()> {
        *self.label_slot_mut(pos.into())? = None;
        Ok(())
    }
}
