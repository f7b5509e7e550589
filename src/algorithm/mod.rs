//! Graph algorithms
mod shortest_path;
pub use self::shortest_path::*;
