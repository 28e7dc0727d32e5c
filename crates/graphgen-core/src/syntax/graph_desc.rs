//! Axes of a generated graph type.
//!
//! Every graph emitter is a function of one `GraphDesc`; nothing else about
//! a graph vertex influences the shape of the generated code.

use serde::{Deserialize, Serialize};

/// Storage of the vertex list and of the optional edge list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Contiguous; descriptors are indices and get renumbered on erase.
    #[default]
    Vector,
    /// Node based; descriptors are stable pointers.
    List,
}

/// Storage of per-vertex incidence lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutEdgeListKind {
    #[default]
    Sequence,
    /// Sorted, duplicates rejected.
    UniqueAssociative,
    /// Sorted, duplicates kept.
    MultiAssociative,
}

impl OutEdgeListKind {
    pub fn is_associative(self) -> bool {
        !matches!(self, OutEdgeListKind::Sequence)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directedness {
    Directed,
    #[default]
    Bidirectional,
    Undirected,
}

/// Parent/child relation kept next to the primary edge set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    #[default]
    None,
    /// Separate children/parents incidence lists.
    Reference,
    /// The primary edges are the ownership edges.
    Alias,
}

/// Named vertex storage, one container per component.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Component {
    pub name: String,
    /// Type path of the stored value.
    pub value_path: String,
    pub member_name: String,
}

/// One alternative of a polymorphic vertex.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolymorphicPair {
    /// Tag type path.
    pub tag: String,
    /// Value type path.
    pub value: String,
    /// Container member holding values of this alternative; empty stores
    /// the value inside the handle.
    pub member_name: String,
    /// Storage of the container member. Vector handles are indices, list
    /// handles are iterators.
    pub container: ListKind,
}

impl PolymorphicPair {
    pub fn is_vector(&self) -> bool {
        self.container == ListKind::Vector
    }

    pub fn is_stored(&self) -> bool {
        !self.member_name.is_empty()
    }
}

/// Where `get(boost::vertex_name, g, v)` reads the name from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedConcept {
    /// Component name; `None` reads the vertex property.
    pub component: Option<String>,
    /// Member inside the component or property; empty for the whole value.
    pub member_name: String,
}

/// Path index of an addressable graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Addressable {
    /// Map from path string to vertex descriptor.
    pub member_name: String,
    /// Paths are `std::u8string`.
    pub utf8: bool,
}

/// Key to vertex map (uuid graph).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexMap {
    pub key_type: String,
    pub member_name: String,
    /// Component holding the key; the map mirrors it.
    pub component_name: String,
    /// Key member inside the component; empty for the whole value.
    pub component_member_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphDesc {
    pub vertex_list: ListKind,
    pub edge_list: bool,
    pub edge_list_kind: ListKind,
    pub out_edge_list: OutEdgeListKind,
    pub directedness: Directedness,
    pub adjacency: bool,
    pub vertex_list_graph: bool,
    pub mutable_graph: bool,
    /// Type path; empty when vertices carry no property.
    pub vertex_property: String,
    pub edge_property: String,
    pub components: Vec<Component>,
    pub polymorphic: Vec<PolymorphicPair>,
    pub named: Option<NamedConcept>,
    pub ownership: Ownership,
    pub mutable_reference: bool,
    pub addressable: Option<Addressable>,
    pub vertex_maps: Vec<VertexMap>,
    pub vertex_size_type: String,
    pub edge_size_type: String,
    pub degree_size_type: String,
    pub difference_type: String,
}

impl Default for GraphDesc {
    fn default() -> Self {
        Self {
            vertex_list: ListKind::Vector,
            edge_list: false,
            edge_list_kind: ListKind::List,
            out_edge_list: OutEdgeListKind::Sequence,
            directedness: Directedness::Bidirectional,
            adjacency: true,
            vertex_list_graph: true,
            mutable_graph: true,
            vertex_property: String::new(),
            edge_property: String::new(),
            components: Vec::new(),
            polymorphic: Vec::new(),
            named: None,
            ownership: Ownership::None,
            mutable_reference: true,
            addressable: None,
            vertex_maps: Vec::new(),
            vertex_size_type: "uint32_t".to_owned(),
            edge_size_type: "uint32_t".to_owned(),
            degree_size_type: "uint32_t".to_owned(),
            difference_type: "std::ptrdiff_t".to_owned(),
        }
    }
}

impl GraphDesc {
    pub fn is_vector(&self) -> bool {
        self.vertex_list == ListKind::Vector
    }

    pub fn is_directed_only(&self) -> bool {
        self.directedness == Directedness::Directed
    }

    pub fn is_undirected(&self) -> bool {
        self.directedness == Directedness::Undirected
    }

    /// In-edge lists are stored.
    pub fn has_in_edges(&self) -> bool {
        self.directedness == Directedness::Bidirectional
    }

    pub fn has_vertex_property(&self) -> bool {
        !self.vertex_property.is_empty()
    }

    pub fn has_edge_property(&self) -> bool {
        !self.edge_property.is_empty()
    }

    /// A separate edge container is stored.
    pub fn need_edge_list(&self) -> bool {
        self.edge_list || self.has_edge_property() || self.is_undirected()
    }

    pub fn is_edge_list_not_needed(&self) -> bool {
        !self.need_edge_list()
    }

    pub fn is_edge_list_vector(&self) -> bool {
        self.edge_list_kind == ListKind::Vector
    }

    pub fn is_polymorphic(&self) -> bool {
        !self.polymorphic.is_empty()
    }

    pub fn has_properties(&self) -> bool {
        self.named.is_some() || self.has_vertex_property() || !self.components.is_empty()
    }

    pub fn is_reference(&self) -> bool {
        self.ownership != Ownership::None
    }

    pub fn is_alias_graph(&self) -> bool {
        self.ownership == Ownership::Alias
    }

    pub fn need_reference_edges(&self) -> bool {
        self.ownership == Ownership::Reference
    }

    pub fn is_mutable_reference(&self) -> bool {
        self.is_reference() && self.mutable_reference
    }

    pub fn is_addressable(&self) -> bool {
        self.addressable.is_some()
    }

    pub fn is_uuid_graph(&self) -> bool {
        !self.vertex_maps.is_empty()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn has_string_path(&self) -> bool {
        self.addressable.as_ref().is_some_and(|a| !a.utf8)
    }

    /// Reason this axis combination cannot be generated, if any.
    pub fn unsupported_reason(&self) -> Option<&'static str> {
        if self.is_addressable() && !self.is_reference() {
            return Some("addressable graphs need an ownership relation");
        }
        if !self.is_vector() && self.is_uuid_graph() {
            return Some("vertex maps need vector storage");
        }
        if !self.is_vector() && !self.components.is_empty() {
            return Some("components need vector storage");
        }
        if !self.is_vector() && self.is_addressable() && self.need_reference_edges() {
            return Some("separated children lists need vector storage");
        }
        if self.is_undirected() && self.out_edge_list.is_associative() {
            return Some("undirected graphs need sequence incidence lists");
        }
        if self.is_alias_graph() && self.is_directed_only() {
            return Some("alias ownership needs in-edges");
        }
        let named_component = self.named.as_ref().and_then(|n| n.component.as_deref());
        if named_component.is_some_and(|c| self.component(c).is_none()) {
            return Some("named concept refers to a missing component");
        }
        if self.vertex_maps.iter().any(|m| self.component(&m.component_name).is_none()) {
            return Some("vertex map refers to a missing component");
        }
        None
    }
}
