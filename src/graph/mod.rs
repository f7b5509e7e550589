//! A directed graph with explicit vertex and edge identity.
//!
//! # Handles
//!
//! Vertices and edges are addressed by [VertexId] and [EdgeId].
//! They are small `Copy` values, so callers may store them freely.
//! Behind them, a graph keeps its vertices and edges in slot tables.
//! A handle is the slot index together with the generation of the slot
//! and the [GraphTag] of the graph which minted it.
//! Removing a vertex or an edge bumps the generation of its slot,
//! so the old handle fails from then on, even after the slot is reused.
//! Handles never work across graphs.
//!
//! # Payloads and labels
//!
//! Each vertex and edge carries a payload, given at insertion, and a label slot,
//! which is empty at first. Labels are annotations of any type,
//! e.g. a weight on an edge, and are read back by their type.

pub(crate) mod arena;
mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod r#trait;
pub use self::r#trait::*;
mod graph_debug;
pub use self::graph_debug::*;
mod sparse;
pub use self::sparse::*;

#[cfg(test)]
pub use self::tests::*;

#[cfg(test)]
mod tests {
    use quickcheck::Arbitrary;
    use rs_quickcheck_util::*;
    use std::collections::{BTreeMap, BTreeSet};

    /// Operations over ID's of a model graph.
    ///
    /// Vertex and edge ID's grow monotonically, so ordering by ID is ordering by insertion.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Op {
        AddVertex(usize),
        RemoveVertex(usize),
        AddEdge((usize, usize, usize)),
        RemoveEdge(usize),
    }

    #[derive(Clone)]
    pub struct Ops {
        pub ops: Vec<Op>,
    }

    impl std::fmt::Debug for Ops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.ops)
        }
    }

    impl Ops {
        pub fn iter(&self) -> impl Iterator<Item = &Op> + '_ {
            self.ops.iter()
        }
    }

    impl Arbitrary for Ops {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let mut next_vid = 0usize;
            let mut next_eid = 0usize;
            let mut known_vid = BTreeSet::new();
            let mut known_eid = BTreeSet::new();
            let ops = gen_bytes(g, b"abcd.", b'.', 0..)
                .iter()
                .filter_map(|_| match u8::arbitrary(g) % 4 {
                    0 => {
                        let vid = next_vid;
                        next_vid += 1;
                        known_vid.insert(vid);
                        Some(Op::AddVertex(vid))
                    }
                    1 => {
                        if known_vid.is_empty() {
                            None
                        } else {
                            let vid = {
                                let idx = usize::arbitrary(g) % known_vid.len();
                                *known_vid.iter().nth(idx).unwrap()
                            };
                            known_vid.remove(&vid);
                            Some(Op::RemoveVertex(vid))
                        }
                    }
                    2 => {
                        if known_vid.is_empty() {
                            None
                        } else {
                            let src_vid = {
                                let idx = usize::arbitrary(g) % known_vid.len();
                                *known_vid.iter().nth(idx).unwrap()
                            };
                            let sink_vid = {
                                let idx = usize::arbitrary(g) % known_vid.len();
                                *known_vid.iter().nth(idx).unwrap()
                            };
                            let eid = next_eid;
                            next_eid += 1;
                            known_eid.insert(eid);
                            Some(Op::AddEdge((src_vid, sink_vid, eid)))
                        }
                    }
                    3 => {
                        if known_eid.is_empty() {
                            None
                        } else {
                            let eid = {
                                let idx = usize::arbitrary(g) % known_eid.len();
                                *known_eid.iter().nth(idx).unwrap()
                            };
                            known_eid.remove(&eid);
                            Some(Op::RemoveEdge(eid))
                        }
                    }
                    _ => unreachable!(),
                })
                .collect();
            Self { ops }
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let l = self.ops.len();
            let me = self.clone();
            let it = std::iter::successors(Some(l / 2), move |n| {
                let nxt = (n + l) / 2 + 1;
                if nxt >= l {
                    None
                } else {
                    Some(nxt)
                }
            })
            .map(move |n| {
                let mut res = me.clone();
                res.ops = me.ops[0..n].to_vec();
                res
            });
            Box::new(it)
        }
    }

    /// A plain reference model of a directed graph without self-loops and parallel edges.
    #[derive(Debug, Default)]
    pub struct Model {
        vertices: BTreeSet<usize>,
        edges: BTreeMap<usize, (usize, usize)>,
    }

    impl Model {
        pub fn add_vertex(&mut self, v: usize) {
            self.vertices.insert(v);
        }

        pub fn remove_vertex(&mut self, v: usize) -> Result<(), ()> {
            if self
                .edges
                .values()
                .any(|(src, snk)| *src == v || *snk == v)
            {
                return Err(());
            }
            self.vertices.remove(&v);
            Ok(())
        }

        /// Returns whether the edge is accepted.
        pub fn add_edge(&mut self, src: usize, snk: usize, e: usize) -> bool {
            if src == snk || self.edges.values().any(|x| *x == (src, snk)) {
                return false;
            }
            self.edges.insert(e, (src, snk));
            true
        }

        pub fn remove_edge(&mut self, e: usize) {
            self.edges.remove(&e);
        }

        pub fn vertices(&self) -> Vec<usize> {
            self.vertices.iter().copied().collect()
        }

        pub fn edges(&self) -> Vec<(usize, usize, usize)> {
            self.edges
                .iter()
                .map(|(e, (src, snk))| (*src, *snk, *e))
                .collect()
        }

        pub fn out_edges(&self, v: usize) -> Vec<usize> {
            self.edges
                .iter()
                .filter(|(_, (src, _))| *src == v)
                .map(|(e, _)| *e)
                .collect()
        }

        pub fn in_edges(&self, v: usize) -> Vec<usize> {
            self.edges
                .iter()
                .filter(|(_, (_, snk))| *snk == v)
                .map(|(e, _)| *e)
                .collect()
        }
    }
}
