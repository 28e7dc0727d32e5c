//! Vertex payloads of the AST.

use serde::{Deserialize, Serialize};

use super::graph_desc::GraphDesc;
use super::traits::GenerationFlags;

/// One payload per vertex. Emitters dispatch on this with exhaustive `match`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Kind {
    Namespace,
    Value,
    Enum(Enum),
    Alias(Alias),
    Instance(Instance),
    Struct(Composition),
    Graph(Box<Graph>),
    Variant(Variant),
    Concept,
    Tag(Tag),
    Define(Define),
    /// Sequence template head (`vector`, `list`, `set`).
    Container,
    /// Associative template head (`map`, `unordered_map`).
    Map,
    /// `optional` template head.
    Optional,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Namespace => "namespace",
            Kind::Value => "value",
            Kind::Enum(_) => "enum",
            Kind::Alias(_) => "alias",
            Kind::Instance(_) => "instance",
            Kind::Struct(_) => "struct",
            Kind::Graph(_) => "graph",
            Kind::Variant(_) => "variant",
            Kind::Concept => "concept",
            Kind::Tag(_) => "tag",
            Kind::Define(_) => "define",
            Kind::Container => "container",
            Kind::Map => "map",
            Kind::Optional => "optional",
        }
    }

    pub fn composition(&self) -> Option<&Composition> {
        match self {
            Kind::Struct(s) => Some(s),
            Kind::Graph(g) => Some(&g.composition),
            _ => None,
        }
    }

    pub fn composition_mut(&mut self) -> Option<&mut Composition> {
        match self {
            Kind::Struct(s) => Some(s),
            Kind::Graph(g) => Some(&mut g.composition),
            _ => None,
        }
    }

    pub fn graph(&self) -> Option<&Graph> {
        match self {
            Kind::Graph(g) => Some(g),
            _ => None,
        }
    }

    pub fn graph_mut(&mut self) -> Option<&mut Graph> {
        match self {
            Kind::Graph(g) => Some(g),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Kind::Instance(i) => Some(i),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Kind::Namespace)
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Kind::Container | Kind::Map | Kind::Optional)
    }

    /// Kinds that may contain nested declarations.
    pub fn is_scope(&self) -> bool {
        matches!(self, Kind::Namespace | Kind::Struct(_) | Kind::Graph(_))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnumValue {
    pub name: String,
    /// Explicit initializer text, empty for the implicit value.
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Enum {
    pub values: Vec<EnumValue>,
    pub underlying_type: String,
    pub is_flags: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Alias {
    /// Target type path.
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Instance {
    pub template: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Variant {
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Tag {
    pub entity: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Define {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Member {
    pub type_path: String,
    /// `mName` convention.
    pub member_name: String,
    pub default_value: String,
    /// Overrides the transcoded default in TypeScript output.
    pub typescript_default: String,
    pub public: bool,
    pub is_const: bool,
    pub pointer: bool,
    pub reference: bool,
    pub flags: GenerationFlags,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Constructor {
    /// Member indices, in declaration order.
    pub indices: Vec<u32>,
    pub has_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    pub function_name: String,
    pub getter: bool,
    pub setter: bool,
    pub skip: bool,
}

/// Struct data, shared by struct and graph vertices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Composition {
    pub members: Vec<Member>,
    pub constructors: Vec<Constructor>,
    pub methods: Vec<Method>,
    /// Verbatim C++ member function declarations.
    pub member_functions: Vec<String>,
    /// Verbatim TypeScript method text.
    pub typescript_functions: Vec<String>,
}

impl Composition {
    pub fn member(&self, name: &str) -> Option<(usize, &Member)> {
        self.members
            .iter()
            .enumerate()
            .find(|(_, m)| m.member_name == name)
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub composition: Composition,
    pub desc: GraphDesc,
}
