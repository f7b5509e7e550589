use crate::graph::*;
use crate::{Error, Result};
use ahash::RandomState;
use keyed_priority_queue::KeyedPriorityQueue;
use std::any::Any;
use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};
use std::ops::Add;
use std::sync::atomic::{self, AtomicBool};
use tracing::{debug, trace};

/// Numeric edge weights, read from edge labels.
///
/// Weights are assumed non-negative.
pub trait Weight: Copy + PartialOrd + Add<Output = Self> + Any + Send + Sync + std::fmt::Debug {
    const ZERO: Self;

    /// `None` if the sum is not representable.
    /// Floats never overflow, they go to infinity instead.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0.0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

macro_rules! impl_int_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_float_weight!(f32, f64);
impl_int_weight!(u8, u16, u32, u64, usize, i32, i64);

/// A path found by a search, from its start to its end.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<W> {
    pub edges: Vec<EdgeId>,
    pub distance: W,
}

/// Knobs of a search.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchOptions<'a> {
    cancel: Option<&'a AtomicBool>,
}

impl<'a> SearchOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The search stops with [Error::Cancelled] once `flag` is raised.
    /// It is checked before each vertex is taken from the queue.
    pub fn cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .map_or(false, |flag| flag.load(atomic::Ordering::Relaxed))
    }
}

/// Dijkstra's algorithm over graphs whose edges are labeled with weights of type `W`.
///
/// Labels are only read. Bookkeeping, including predecessors, lives in the search itself,
/// so callers' labels on vertices are left alone and nothing leaks from one search to another.
///
/// Among paths of equal weight, which one is returned is unspecified.
pub trait ShortestPath
where
    Self: QueryableGraph + LabeledGraph + Sized,
{
    /// Finds a path of minimum total weight from `from` to `to`.
    ///
    /// * `Ok(None)` if `to` is unreachable.
    /// * An empty path of distance zero if `from == to`.
    /// * [Error::UnknownEndpoint] if either endpoint is not in this graph.
    /// * [Error::MissingWeight] if an edge met on the way carries no weight of type `W`.
    fn shortest_path<W: Weight>(&self, from: &VertexId, to: &VertexId) -> Result<Option<Path<W>>> {
        self.shortest_path_with(from, to, &SearchOptions::default())
    }

    fn shortest_path_with<W: Weight>(
        &self,
        from: &VertexId,
        to: &VertexId,
        options: &SearchOptions<'_>,
    ) -> Result<Option<Path<W>>> {
        check_endpoint(self, from)?;
        check_endpoint(self, to)?;
        if from == to {
            return Ok(Some(Path {
                edges: vec![],
                distance: W::ZERO,
            }));
        }
        debug!(?from, ?to, "search shortest path");
        let mut search = Dijkstra::<Self, W>::new(self, *from);
        search.run(Some(to), options)?;
        let res = search.path_to(to);
        debug!(
            ?from,
            ?to,
            finalized = search.finalized.len(),
            found = res.is_some(),
            "search done"
        );
        Ok(res)
    }

    /// Minimum distances from `from` to every vertex reachable from it, `from` included.
    fn shortest_distances<W: Weight>(&self, from: &VertexId) -> Result<HashMap<VertexId, W>> {
        check_endpoint(self, from)?;
        let mut search = Dijkstra::<Self, W>::new(self, *from);
        search.run(None, &SearchOptions::default())?;
        Ok(search.distances.into_iter().collect())
    }
}

impl<G> ShortestPath for G where G: QueryableGraph + LabeledGraph {}

fn check_endpoint<G: QueryableGraph>(graph: &G, v: &VertexId) -> Result<()> {
    if graph.contains_vertex(v) {
        Ok(())
    } else {
        Err(Error::UnknownEndpoint(format!("{:?}", v)))
    }
}

/// Total order over weights for the queue. Incomparable weights, i.e. NaN, tie.
#[derive(Debug, Clone, Copy)]
struct Distance<W>(W);

impl<W: PartialOrd> PartialEq for Distance<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for Distance<W> {}

impl<W: PartialOrd> PartialOrd for Distance<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for Distance<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

struct Dijkstra<'a, G, W: PartialOrd> {
    graph: &'a G,
    source: VertexId,
    // absent means unreached
    distances: HashMap<VertexId, W, RandomState>,
    finalized: HashSet<VertexId, RandomState>,
    predecessors: HashMap<VertexId, EdgeId, RandomState>,
    queue: KeyedPriorityQueue<VertexId, Reverse<Distance<W>>, RandomState>,
}

impl<'a, G, W> Dijkstra<'a, G, W>
where
    G: QueryableGraph + LabeledGraph,
    W: Weight,
{
    fn new(graph: &'a G, source: VertexId) -> Self {
        let capacity = graph.vertex_size();
        let mut res = Self {
            graph,
            source,
            distances: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            finalized: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
            predecessors: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            queue: KeyedPriorityQueue::with_capacity_and_hasher(capacity, RandomState::new()),
        };
        res.distances.insert(source, W::ZERO);
        res.queue.push(source, Reverse(Distance(W::ZERO)));
        res
    }

    /// Settles vertices until `target` is finalized or nothing is left to settle.
    fn run(&mut self, target: Option<&VertexId>, options: &SearchOptions<'_>) -> Result<()> {
        loop {
            if let Some(target) = target {
                if self.finalized.contains(target) {
                    return Ok(());
                }
            }
            if options.cancelled() {
                debug!(source = ?self.source, "search cancelled");
                return Err(Error::Cancelled);
            }
            let (vert, Reverse(Distance(dist))) = match self.queue.pop() {
                Some(x) => x,
                None => return Ok(()),
            };
            if !self.finalized.insert(vert) {
                continue;
            }
            trace!(?vert, ?dist, "finalize");
            self.relax_out_edges(&vert, dist)?;
        }
    }

    fn relax_out_edges(&mut self, vert: &VertexId, dist: W) -> Result<()> {
        let graph = self.graph;
        for e in graph.out_edges(vert)? {
            let weight = *graph
                .label::<W>(e.id)?
                .ok_or(Error::MissingWeight(e.id))?;
            let candidate = match dist.checked_add(weight) {
                Some(x) => x,
                None => {
                    trace!(sink = ?e.sink, via = ?e.id, "skip overflowing distance");
                    continue;
                }
            };
            let improved = match self.distances.get(&e.sink) {
                None => true,
                Some(known) => candidate < *known,
            };
            if improved {
                trace!(sink = ?e.sink, ?candidate, via = ?e.id, "relax");
                self.distances.insert(e.sink, candidate);
                self.predecessors.insert(e.sink, e.id);
                self.queue.push(e.sink, Reverse(Distance(candidate)));
            }
        }
        Ok(())
    }

    /// Walks predecessors back from `target` to the source.
    fn path_to(&self, target: &VertexId) -> Option<Path<W>> {
        let distance = *self.distances.get(target)?;
        let mut edges = vec![];
        let mut cur = *target;
        while cur != self.source {
            // a chain longer than the graph means a cycle of predecessors
            if edges.len() > self.graph.vertex_size() {
                return None;
            }
            let e = *self.predecessors.get(&cur)?;
            edges.push(e);
            cur = self.graph.source(&e).ok()?;
        }
        edges.reverse();
        Some(Path { edges, distance })
    }
}
