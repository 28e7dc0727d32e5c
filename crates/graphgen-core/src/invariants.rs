//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::graph::VecGraph;
use crate::syntax::{Composition, Graph, SyntaxGraph, Vertex, VertexId};

impl<V> VecGraph<V> {
    pub(crate) fn ensure_index(&self, v: VertexId) -> usize {
        let index = v as usize;
        if index >= self.num_vertices() as usize {
            panic!(
                "VecGraph: vertex {v} out of range (num_vertices = {})",
                self.num_vertices()
            );
        }
        index
    }
}

impl SyntaxGraph {
    pub(crate) fn ensure_path_complete(v: VertexId, unwritten: usize) {
        assert_eq!(
            unwritten, 0,
            "SyntaxGraph: path of vertex {v} left {unwritten} bytes unwritten"
        );
    }

    /// Names are copied whole, so a composed path is valid UTF-8.
    pub(crate) fn ensure_utf8_path(v: VertexId, buffer: Vec<u8>) -> String {
        String::from_utf8(buffer)
            .unwrap_or_else(|e| panic!("SyntaxGraph: path of vertex {v} is not UTF-8: {e}"))
    }

    pub(crate) fn ensure_vertex(&self, v: VertexId) -> &Vertex {
        self.get(v).unwrap_or_else(|| {
            panic!("SyntaxGraph: vertex {v} not found (ids come from this graph)")
        })
    }

    pub(crate) fn ensure_vertex_mut(&mut self, v: VertexId) -> &mut Vertex {
        let n = self.num_vertices();
        self.get_mut(v)
            .unwrap_or_else(|| panic!("SyntaxGraph: vertex {v} not found (num_vertices = {n})"))
    }

    /// Composition payload of a vertex the builder already checked.
    pub(crate) fn ensure_composition(&self, v: VertexId) -> &Composition {
        self.ensure_vertex(v).kind.composition().unwrap_or_else(|| {
            panic!(
                "SyntaxGraph: vertex {v} '{}' is not a struct or graph",
                self.get_path(v)
            )
        })
    }

    pub(crate) fn ensure_graph(&self, v: VertexId) -> &Graph {
        self.ensure_vertex(v).kind.graph().unwrap_or_else(|| {
            panic!("SyntaxGraph: vertex {v} '{}' is not a graph", self.get_path(v))
        })
    }

    pub(crate) fn ensure_composition_mut(&mut self, v: VertexId) -> &mut Composition {
        let path = self.get_path(v);
        self.ensure_vertex_mut(v)
            .kind
            .composition_mut()
            .unwrap_or_else(|| panic!("SyntaxGraph: vertex {v} '{path}' is not a struct or graph"))
    }

    pub(crate) fn ensure_graph_mut(&mut self, v: VertexId) -> &mut Graph {
        let path = self.get_path(v);
        self.ensure_vertex_mut(v)
            .kind
            .graph_mut()
            .unwrap_or_else(|| panic!("SyntaxGraph: vertex {v} '{path}' is not a graph"))
    }
}
