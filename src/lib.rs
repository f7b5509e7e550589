//! A directed sparse graph with generational handles and caller-attached labels,
//! plus Dijkstra's shortest paths over edge weights stored in those labels.
//!
//! ```
//! use sparsegraph::{algorithm::ShortestPath, graph::*};
//!
//! let mut g = SparseGraph::<&str, &str>::new();
//! let a = g.insert_vertex("a");
//! let b = g.insert_vertex("b");
//! let ab = g.insert_edge(a, b, "a-b").unwrap();
//! g.set_label(ab, 2.5f64).unwrap();
//!
//! let path = g.shortest_path::<f64>(&a, &b).unwrap().unwrap();
//! assert_eq!(path.distance, 2.5);
//! assert_eq!(path.edges, vec![ab]);
//! ```
pub mod algorithm;
mod error;
pub use self::error::*;
pub mod graph;
pub mod network;
