//! Runtime model of generated vector-storage graphs.
//!
//! `VecGraph` behaves like the C++ a vector-storage bidirectional graph
//! compiles to: `u32` descriptors, per-vertex out/in incidence lists, and a
//! renumbering sweep on `remove_vertex`. The AST ownership tree is stored in
//! one, so the generated semantics are exercised by the generator itself.

mod vec_graph;

#[cfg(test)]
mod vec_graph_tests;

pub use vec_graph::{Edge, IncidenceKind, NULL_VERTEX, VecGraph, VertexId};
