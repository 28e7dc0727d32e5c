//! Vector-storage bidirectional graph.

use serde::{Deserialize, Serialize};

/// Positional vertex descriptor. Renumbered when a lower vertex is removed.
pub type VertexId = u32;

pub const NULL_VERTEX: VertexId = u32::MAX;

/// Storage of per-vertex incidence lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidenceKind {
    /// `std::vector`-like: parallel edges allowed, insertion order kept.
    #[default]
    Sequence,
    /// `std::set`-like: sorted, duplicates rejected.
    Unique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }
}

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    out_edges: Vec<VertexId>,
    in_edges: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct VecGraph<V> {
    vertices: Vec<Slot<V>>,
    incidence: IncidenceKind,
}

impl<V> Default for VecGraph<V> {
    fn default() -> Self {
        Self::new(IncidenceKind::Sequence)
    }
}

/// Inserts `v` into an incidence list; false when `Unique` rejects it.
fn insert_incidence(kind: IncidenceKind, list: &mut Vec<VertexId>, v: VertexId) -> bool {
    match kind {
        IncidenceKind::Sequence => {
            list.push(v);
            true
        }
        IncidenceKind::Unique => match list.binary_search(&v) {
            Ok(_) => false,
            Err(pos) => {
                list.insert(pos, v);
                true
            }
        },
    }
}

fn remove_incidence(kind: IncidenceKind, list: &mut Vec<VertexId>, v: VertexId) {
    match kind {
        IncidenceKind::Sequence => {
            if let Some(pos) = list.iter().position(|&x| x == v) {
                list.remove(pos);
            }
        }
        IncidenceKind::Unique => {
            if let Ok(pos) = list.binary_search(&v) {
                list.remove(pos);
            }
        }
    }
}

fn renumber(list: &mut [VertexId], removed: VertexId) {
    for x in list.iter_mut() {
        if *x > removed {
            *x -= 1;
        }
    }
}

impl<V> VecGraph<V> {
    pub fn new(incidence: IncidenceKind) -> Self {
        Self {
            vertices: Vec::new(),
            incidence,
        }
    }

    pub fn incidence(&self) -> IncidenceKind {
        self.incidence
    }

    pub fn reserve(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }

    pub fn num_vertices(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn num_edges(&self) -> u32 {
        self.vertices.iter().map(|s| s.out_edges.len() as u32).sum()
    }

    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.num_vertices()
    }

    pub fn get(&self, v: VertexId) -> Option<&V> {
        self.vertices.get(v as usize).map(|s| &s.value)
    }

    pub fn get_mut(&mut self, v: VertexId) -> Option<&mut V> {
        self.vertices.get_mut(v as usize).map(|s| &mut s.value)
    }

    /// Appends a vertex; its descriptor is the previous vertex count.
    pub fn add_vertex(&mut self, value: V) -> VertexId {
        let v = self.num_vertices();
        self.vertices.push(Slot {
            value,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        });
        v
    }

    /// Adds `u -> v`. With `Unique` incidence a duplicate leaves both
    /// endpoints untouched and returns false.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> (Edge, bool) {
        let ui = self.ensure_index(u);
        let vi = self.ensure_index(v);
        let kind = self.incidence;

        if !insert_incidence(kind, &mut self.vertices[ui].out_edges, v) {
            return (Edge::new(u, v), false);
        }
        if !insert_incidence(kind, &mut self.vertices[vi].in_edges, u) {
            // roll back the out half
            remove_incidence(kind, &mut self.vertices[ui].out_edges, v);
            return (Edge::new(u, v), false);
        }
        (Edge::new(u, v), true)
    }

    /// Removes every `u -> v` edge and returns how many were removed.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> usize {
        let ui = self.ensure_index(u);
        let vi = self.ensure_index(v);
        let before = self.vertices[ui].out_edges.len();
        self.vertices[ui].out_edges.retain(|&t| t != v);
        let removed = before - self.vertices[ui].out_edges.len();
        self.vertices[vi].in_edges.retain(|&s| s != u);
        removed
    }

    pub fn clear_out_edges(&mut self, u: VertexId) {
        let ui = self.ensure_index(u);
        let targets = std::mem::take(&mut self.vertices[ui].out_edges);
        for t in targets {
            self.vertices[t as usize].in_edges.retain(|&s| s != u);
        }
    }

    pub fn clear_in_edges(&mut self, u: VertexId) {
        let ui = self.ensure_index(u);
        let sources = std::mem::take(&mut self.vertices[ui].in_edges);
        for s in sources {
            self.vertices[s as usize].out_edges.retain(|&t| t != u);
        }
    }

    pub fn clear_vertex(&mut self, u: VertexId) {
        self.clear_out_edges(u);
        self.clear_in_edges(u);
    }

    /// Clears and erases `u`, then renumbers every stored descriptor
    /// greater than `u` by -1.
    pub fn remove_vertex(&mut self, u: VertexId) -> V {
        self.clear_vertex(u);
        let ui = self.ensure_index(u);
        let slot = self.vertices.remove(ui);
        for s in &mut self.vertices {
            renumber(&mut s.out_edges, u);
            renumber(&mut s.in_edges, u);
        }
        slot.value
    }

    pub fn edge(&self, u: VertexId, v: VertexId) -> bool {
        let ui = self.ensure_index(u);
        self.vertices[ui].out_edges.contains(&v)
    }

    pub fn out_edges(&self, u: VertexId) -> impl Iterator<Item = Edge> + '_ {
        let ui = self.ensure_index(u);
        self.vertices[ui]
            .out_edges
            .iter()
            .map(move |&t| Edge::new(u, t))
    }

    pub fn in_edges(&self, u: VertexId) -> impl Iterator<Item = Edge> + '_ {
        let ui = self.ensure_index(u);
        self.vertices[ui]
            .in_edges
            .iter()
            .map(move |&s| Edge::new(s, u))
    }

    pub fn adjacent_vertices(&self, u: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_edges(u).map(|e| e.target)
    }

    pub fn out_degree(&self, u: VertexId) -> u32 {
        self.vertices[self.ensure_index(u)].out_edges.len() as u32
    }

    pub fn in_degree(&self, u: VertexId) -> u32 {
        self.vertices[self.ensure_index(u)].in_edges.len() as u32
    }

    pub fn degree(&self, u: VertexId) -> u32 {
        self.out_degree(u) + self.in_degree(u)
    }

    /// Values in descriptor order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter().map(|s| &s.value)
    }
}
