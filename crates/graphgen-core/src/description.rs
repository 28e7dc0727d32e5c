//! JSON description format.
//!
//! A description is a tree of modules, each holding namespaces of
//! declarations. `apply` replays it through `ModuleBuilder` in document
//! order, so a declaration may only refer to types declared before it.

use serde::{Deserialize, Serialize};

use crate::builder::{Compiled, Features, ModuleBuilder, ModuleInfo};
use crate::syntax::{
    Directedness, GenerationFlags, ListKind, Method, NamedConcept, OutEdgeListKind, Ownership,
    Traits, VertexId, VertexMap,
};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Description {
    #[serde(default)]
    pub modules: Vec<ModuleDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleDescription {
    pub name: String,
    pub folder: String,
    pub prefix: String,
    pub api: String,
    /// `"fwd|types|graphs"`.
    pub features: String,
    pub typescript_include: String,
    pub to_js_prefix: String,
    pub to_js_namespace: String,
    pub to_js_configs: String,
    pub hpp_headers: Vec<String>,
    pub cpp_headers: Vec<String>,
    pub namespaces: Vec<NamespaceDescription>,
    pub modules: Vec<ModuleDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamespaceDescription {
    pub name: String,
    pub declarations: Vec<Declaration>,
    pub namespaces: Vec<NamespaceDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraitsDescription {
    pub import: bool,
    pub pmr: bool,
    pub interface: bool,
    pub class: bool,
    pub unknown: bool,
    /// `"equal|hash_combine"`.
    pub flags: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumValueDescription {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDescription {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub typescript_default: String,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub flags: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstructorDescription {
    pub members: Vec<String>,
    pub has_default: bool,
}

/// Struct data shared by struct and graph declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDescription {
    pub inherits: Vec<String>,
    pub members: Vec<MemberDescription>,
    pub constructors: Vec<ConstructorDescription>,
    pub methods: Vec<Method>,
    pub member_functions: Vec<String>,
    pub typescript_functions: Vec<String>,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub member: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolymorphicDescription {
    pub tag: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub member: String,
    pub container: ListKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddressableDescription {
    pub member: String,
    pub utf8: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDescription {
    pub name: String,
    pub vertex: String,
    pub edge: String,
    pub traits: TraitsDescription,
    pub vertex_list: ListKind,
    pub edge_list: bool,
    pub edge_list_kind: ListKind,
    pub out_edge_list: OutEdgeListKind,
    pub directedness: Directedness,
    pub adjacency: bool,
    pub vertex_list_graph: bool,
    pub mutable_graph: bool,
    pub components: Vec<ComponentDescription>,
    pub polymorphic: Vec<PolymorphicDescription>,
    pub named: Option<NamedConcept>,
    pub ownership: Ownership,
    pub mutable_reference: bool,
    pub addressable: Option<AddressableDescription>,
    pub vertex_maps: Vec<VertexMap>,
    #[serde(flatten)]
    pub body: BodyDescription,
}

impl Default for GraphDescription {
    fn default() -> Self {
        Self {
            name: String::new(),
            vertex: String::new(),
            edge: String::new(),
            traits: TraitsDescription::default(),
            vertex_list: ListKind::Vector,
            edge_list: false,
            edge_list_kind: ListKind::List,
            out_edge_list: OutEdgeListKind::Sequence,
            directedness: Directedness::Bidirectional,
            adjacency: true,
            vertex_list_graph: true,
            mutable_graph: true,
            components: Vec::new(),
            polymorphic: Vec::new(),
            named: None,
            ownership: Ownership::None,
            mutable_reference: true,
            addressable: None,
            vertex_maps: Vec::new(),
            body: BodyDescription::default(),
        }
    }
}

/// One declaration inside a namespace or struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Value {
        name: String,
        #[serde(default)]
        traits: TraitsDescription,
    },
    Enum {
        name: String,
        #[serde(default)]
        traits: TraitsDescription,
        #[serde(default)]
        underlying_type: String,
        #[serde(default)]
        flags: bool,
        #[serde(default)]
        values: Vec<EnumValueDescription>,
    },
    Tag {
        name: String,
        #[serde(default)]
        entity: bool,
    },
    Alias {
        name: String,
        target: String,
    },
    Define {
        name: String,
        content: String,
    },
    Concept {
        name: String,
    },
    Struct {
        name: String,
        #[serde(default)]
        traits: TraitsDescription,
        #[serde(flatten)]
        body: BodyDescription,
        /// Nested declarations, resolved inside the struct scope.
        #[serde(default)]
        declarations: Vec<Declaration>,
    },
    Variant {
        name: String,
        #[serde(default)]
        flags: String,
        elements: Vec<String>,
    },
    Graph(Box<GraphDescription>),
    /// TypeScript projection of an existing type.
    Typescript {
        cpp: String,
        ts: String,
    },
}

fn default_true() -> bool {
    true
}

fn parse_flags(text: &str) -> Result<GenerationFlags> {
    GenerationFlags::parse(text).ok_or_else(|| Error::InvalidOption {
        what: "generation flag",
        value: text.to_owned(),
    })
}

impl TraitsDescription {
    fn to_traits(&self) -> Result<Traits> {
        Ok(Traits {
            import: self.import,
            pmr: self.pmr,
            interface: self.interface,
            class: self.class,
            unknown: self.unknown,
            flags: parse_flags(&self.flags)?,
        })
    }
}

impl ModuleDescription {
    fn to_info(&self) -> Result<ModuleInfo> {
        Ok(ModuleInfo {
            folder: self.folder.clone(),
            file_prefix: self.prefix.clone(),
            api: self.api.clone(),
            features: Features::from_text(&self.features)?,
            typescript_include: self.typescript_include.clone(),
            to_js_prefix: self.to_js_prefix.clone(),
            to_js_namespace: self.to_js_namespace.clone(),
            to_js_configs: self.to_js_configs.clone(),
            hpp_headers: self.hpp_headers.clone(),
            cpp_headers: self.cpp_headers.clone(),
        })
    }
}

impl Description {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replays every module into `builder`.
    pub fn apply(&self, builder: &mut ModuleBuilder) -> Result<()> {
        for module in &self.modules {
            apply_module(builder, module)?;
        }
        Ok(())
    }

    /// Builds on top of the `std` prelude and freezes the result.
    pub fn compile(&self) -> Result<Compiled> {
        let mut builder = ModuleBuilder::with_std()?;
        self.apply(&mut builder)?;
        builder.compile()
    }
}

fn apply_module(b: &mut ModuleBuilder, module: &ModuleDescription) -> Result<()> {
    b.open_module(&module.name, module.to_info()?)?;
    for ns in &module.namespaces {
        apply_namespace(b, ns)?;
    }
    for sub in &module.modules {
        apply_module(b, sub)?;
    }
    b.close_module();
    Ok(())
}

fn apply_namespace(b: &mut ModuleBuilder, ns: &NamespaceDescription) -> Result<()> {
    b.open_namespace(&ns.name)?;
    for decl in &ns.declarations {
        apply_declaration(b, decl)?;
    }
    for nested in &ns.namespaces {
        apply_namespace(b, nested)?;
    }
    b.close_scope();
    Ok(())
}

fn apply_body(b: &mut ModuleBuilder, v: VertexId, body: &BodyDescription) -> Result<()> {
    for base in &body.inherits {
        b.add_inherits(v, base)?;
    }
    for m in &body.members {
        b.add_member(v, m.public, &m.type_name, &m.name, &m.default, parse_flags(&m.flags)?)?;
        if !m.typescript_default.is_empty() {
            b.set_typescript_default(v, &m.name, &m.typescript_default)?;
        }
    }
    for c in &body.constructors {
        let members: Vec<&str> = c.members.iter().map(String::as_str).collect();
        b.add_constructor(v, &members, c.has_default)?;
    }
    for method in &body.methods {
        b.add_method(v, method.clone())?;
    }
    for text in &body.member_functions {
        b.add_member_function(v, text)?;
    }
    for text in &body.typescript_functions {
        b.add_typescript_function(v, text)?;
    }
    for concept in &body.constraints {
        b.add_constraints(v, concept)?;
    }
    Ok(())
}

fn apply_graph(b: &mut ModuleBuilder, g: &GraphDescription) -> Result<()> {
    let v = b.add_graph(&g.name, &g.vertex, &g.edge, g.traits.to_traits()?)?;
    {
        let desc = b.graph_desc_mut(v)?;
        desc.vertex_list = g.vertex_list;
        desc.edge_list = g.edge_list;
        desc.edge_list_kind = g.edge_list_kind;
        desc.out_edge_list = g.out_edge_list;
        desc.directedness = g.directedness;
        desc.adjacency = g.adjacency;
        desc.vertex_list_graph = g.vertex_list_graph;
        desc.mutable_graph = g.mutable_graph;
    }
    for c in &g.components {
        b.add_graph_component(v, &c.name, &c.type_name, &c.member)?;
    }
    for p in &g.polymorphic {
        b.add_graph_polymorphic(v, &p.tag, &p.type_name, &p.member, p.container)?;
    }
    if let Some(named) = &g.named {
        b.set_named(v, named.clone())?;
    }
    b.set_reference(v, g.ownership, g.mutable_reference)?;
    if let Some(a) = &g.addressable {
        b.set_addressable(v, &a.member, a.utf8)?;
    }
    for map in &g.vertex_maps {
        b.add_vertex_map(v, map.clone())?;
    }
    apply_body(b, v, &g.body)
}

fn apply_declaration(b: &mut ModuleBuilder, decl: &Declaration) -> Result<()> {
    match decl {
        Declaration::Value { name, traits } => {
            b.add_value(name, traits.to_traits()?)?;
        }
        Declaration::Enum {
            name,
            traits,
            underlying_type,
            flags,
            values,
        } => {
            let traits = traits.to_traits()?;
            let v = if *flags {
                b.add_flags(name, traits)?
            } else {
                b.add_enum(name, traits)?
            };
            if !underlying_type.is_empty() {
                b.set_underlying_type(v, underlying_type)?;
            }
            for value in values {
                b.add_enum_element(v, &value.name, &value.value)?;
            }
        }
        Declaration::Tag { name, entity } => {
            b.add_tag(name, *entity)?;
        }
        Declaration::Alias { name, target } => {
            b.add_alias(name, target)?;
        }
        Declaration::Define { name, content } => {
            b.add_define(name, content)?;
        }
        Declaration::Concept { name } => {
            b.add_concept(name)?;
        }
        Declaration::Struct {
            name,
            traits,
            body,
            declarations,
        } => {
            let v = b.add_struct(name, traits.to_traits()?)?;
            if !declarations.is_empty() {
                b.open_scope(v)?;
                for nested in declarations {
                    apply_declaration(b, nested)?;
                }
                b.close_scope();
            }
            apply_body(b, v, body)?;
        }
        Declaration::Variant {
            name,
            flags,
            elements,
        } => {
            let v = b.add_variant(name, parse_flags(flags)?)?;
            for element in elements {
                b.add_variant_element(v, element)?;
            }
        }
        Declaration::Graph(g) => apply_graph(b, g)?,
        Declaration::Typescript { cpp, ts } => b.project_typescript(cpp, ts)?,
    }
    Ok(())
}
