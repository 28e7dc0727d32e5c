//! The AST of declared types.
//!
//! `SyntaxGraph` is an ownership tree (namespace or owning struct/graph to
//! child) stored in a `VecGraph`, plus a path index from type path to vertex.
//! Resolution, trait inference and TypeScript queries are `impl SyntaxGraph`
//! blocks in the sibling modules.

mod graph_desc;
mod imports;
mod infer;
mod kind;
mod resolve;
mod traits;
mod typescript;

#[cfg(test)]
mod resolve_tests;
#[cfg(test)]
mod typescript_tests;

use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::{IncidenceKind, VecGraph};
use crate::typename::join_path;
use crate::{Error, Result};

pub use crate::graph::{NULL_VERTEX, VertexId};
pub use graph_desc::{
    Addressable, Component, Directedness, GraphDesc, ListKind, NamedConcept, OutEdgeListKind,
    Ownership, PolymorphicPair, VertexMap,
};
pub use imports::ImportedTypes;
pub use infer::ImplEnum;
pub use resolve::is_pmr_string;
pub use kind::{
    Alias, Composition, Constructor, Define, Enum, EnumValue, Graph, Instance, Kind, Member,
    Method, Tag, Variant,
};
pub use traits::{GenerationFlags, Traits, Typescript};
pub use typescript::{is_typed_array, is_typescript_data};

/// One declared entity.
#[derive(Debug, Clone, Serialize)]
pub struct Vertex {
    pub name: String,
    #[serde(flatten)]
    pub kind: Kind,
    pub traits: Traits,
    /// Module that declared this vertex.
    pub module_path: String,
    pub typescript: Typescript,
    /// Base type paths.
    pub inherits: Vec<String>,
    /// Concept type paths.
    pub constraints: Vec<String>,
}

impl Vertex {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            traits: Traits::default(),
            module_path: String::new(),
            typescript: Typescript::default(),
            inherits: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxGraph {
    tree: VecGraph<Vertex>,
    paths: IndexMap<String, VertexId>,
}

impl Default for SyntaxGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxGraph {
    pub fn new() -> Self {
        Self {
            tree: VecGraph::new(IncidenceKind::Sequence),
            paths: IndexMap::new(),
        }
    }

    pub fn num_vertices(&self) -> u32 {
        self.tree.num_vertices()
    }

    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        self.tree.vertices()
    }

    pub fn get(&self, v: VertexId) -> Option<&Vertex> {
        self.tree.get(v)
    }

    pub fn get_mut(&mut self, v: VertexId) -> Option<&mut Vertex> {
        self.tree.get_mut(v)
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        self.ensure_vertex(v)
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut Vertex {
        self.ensure_vertex_mut(v)
    }

    pub fn kind(&self, v: VertexId) -> &Kind {
        &self.ensure_vertex(v).kind
    }

    pub fn traits(&self, v: VertexId) -> &Traits {
        &self.ensure_vertex(v).traits
    }

    pub fn composition(&self, v: VertexId) -> &Composition {
        self.ensure_composition(v)
    }

    pub fn graph(&self, v: VertexId) -> &Graph {
        self.ensure_graph(v)
    }

    /// Owning vertex; `None` for root level declarations.
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.tree.in_edges(v).next().map(|e| e.source)
    }

    pub fn children(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.tree.out_edges(v).map(|e| e.target)
    }

    pub fn num_children(&self, v: VertexId) -> u32 {
        self.tree.out_degree(v)
    }

    /// Root level vertices in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(|&v| self.parent(v).is_none())
    }

    /// Type path lookup.
    pub fn locate(&self, path: &str) -> Option<VertexId> {
        self.paths.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Vertex `name` declared directly under `parent`.
    pub fn locate_child(&self, parent: Option<VertexId>, name: &str) -> Option<VertexId> {
        let scope = parent.map(|p| self.get_path(p)).unwrap_or_default();
        self.locate(&join_path(&scope, name))
    }

    fn path_length(&self, v: VertexId) -> usize {
        let mut sz = 0;
        let mut u = Some(v);
        while let Some(cur) = u {
            sz += self.ensure_vertex(cur).name.len() + 1;
            u = self.parent(cur);
        }
        sz
    }

    fn path_composite(&self, output: &mut [u8], mut sz: usize, v: VertexId) -> usize {
        let mut u = Some(v);
        while let Some(cur) = u {
            let name = self.ensure_vertex(cur).name.as_bytes();
            sz -= name.len();
            output[sz..sz + name.len()].copy_from_slice(name);
            sz -= 1;
            output[sz] = b'/';
            u = self.parent(cur);
        }
        sz
    }

    /// Type path of a vertex, composed by walking the ownership chain twice:
    /// once for the length, once to fill the buffer back to front.
    pub fn get_path(&self, v: VertexId) -> String {
        let len = self.path_length(v);
        let mut buffer = vec![0u8; len];
        let sz = self.path_composite(&mut buffer, len, v);
        Self::ensure_path_complete(v, sz);
        Self::ensure_utf8_path(v, buffer)
    }

    /// Adds `name` under `parent` and registers its path.
    pub fn add_vertex(&mut self, parent: Option<VertexId>, vertex: Vertex) -> Result<VertexId> {
        let scope = parent.map(|p| self.get_path(p)).unwrap_or_default();
        let path = join_path(&scope, &vertex.name);
        if self.paths.contains_key(&path) {
            return Err(Error::DuplicateName {
                scope,
                name: vertex.name,
            });
        }
        let v = self.tree.add_vertex(vertex);
        if let Some(p) = parent {
            self.tree.add_edge(p, v);
        }
        self.paths.insert(path, v);
        Ok(v)
    }

    /// Removes a leaf vertex and renumbers the path index.
    ///
    /// Vertices with children cannot be removed.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<Vertex> {
        let path = self.get_path(v);
        if self.num_children(v) != 0 {
            return Err(Error::HasChildren(path));
        }
        self.paths.shift_remove(&path);
        let vertex = self.tree.remove_vertex(v);
        for id in self.paths.values_mut() {
            if *id > v {
                *id -= 1;
            }
        }
        Ok(vertex)
    }

    /// All type paths in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, VertexId)> {
        self.paths.iter().map(|(p, &v)| (p.as_str(), v))
    }

    /// Vertices declared by `module_path`, in declaration order.
    pub fn module_vertices<'a>(&'a self, module_path: &'a str) -> impl Iterator<Item = VertexId> + 'a {
        self.vertices()
            .filter(move |&v| self.ensure_vertex(v).module_path == module_path)
    }
}

/// Serializable view used by `graphgen dump --json`.
#[derive(Debug, Serialize)]
pub struct VertexDump<'a> {
    pub id: VertexId,
    pub path: String,
    #[serde(flatten)]
    pub vertex: &'a Vertex,
}

impl SyntaxGraph {
    pub fn dump(&self) -> Vec<VertexDump<'_>> {
        self.vertices()
            .map(|v| VertexDump {
                id: v,
                path: self.get_path(v),
                vertex: self.ensure_vertex(v),
            })
            .collect()
    }
}
