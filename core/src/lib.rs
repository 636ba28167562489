//! densegraph-core: dense-index graph engine.
//!
//! Adjacency-list graphs and digraphs over vertices `0..V`, breadth-first
//! shortest paths, Eulerian cycle and path construction with an independent
//! reference check, a name-to-id layer for building graphs from delimited
//! text records, and generators for graphs with exact structural guarantees.
//!
//! Everything is synchronous: each analysis runs to completion in its
//! constructor and is immutable afterwards.

mod error;
pub mod euler;
pub mod generate;
mod graph;
mod symbol;
mod traversal;

pub use error::{GraphError, Result};
pub use euler::{DirectedEulerianCycle, DirectedEulerianPath};
pub use graph::{Adjacency, Digraph, EdgeSink, Graph, Vertex};
pub use symbol::{SymbolDigraph, SymbolGraph, SymbolUndirected};
pub use traversal::BreadthFirstPaths;
