//! `ModuleBuilder`: the mutation API that populates the AST.
//!
//! The builder keeps two cursors: the current scope (`/render/Pass`) and the
//! current module (`/Render`). Every declaration lands under the scope and is
//! owned by the module. `compile()` freezes the result into `Compiled`.

mod module;
mod prelude;

#[cfg(test)]
mod mod_tests;

use tracing::debug;

use crate::naming::get_parameter_name;
use crate::syntax::{
    Addressable, Alias, Composition, Constructor, Define, Enum, EnumValue, Graph, GraphDesc,
    Kind, ListKind, Member, Method, NamedConcept, Ownership, PolymorphicPair, SyntaxGraph, Tag,
    Traits, Variant, Vertex, VertexId, VertexMap,
};
use crate::syntax::{Component, GenerationFlags, ImportedTypes};
use crate::typename::{
    convert_typename, is_instance, join_path, peel_qualifiers, remove_parenthesis, validate,
};
use crate::{Error, Result};

pub use module::{Features, ModuleGraph, ModuleInfo};

/// Populates a `SyntaxGraph` and a `ModuleGraph`.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    syntax: SyntaxGraph,
    modules: ModuleGraph,
    scope: String,
    module: String,
    scope_stack: Vec<String>,
    module_stack: Vec<usize>,
}

impl ModuleBuilder {
    /// An empty builder without any predeclared type.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with the `std` prelude (`int`, `std/pmr/string`,
    /// `std/vector`, ...) already declared.
    pub fn with_std() -> Result<Self> {
        let mut builder = Self::new();
        prelude::declare_std(&mut builder)?;
        Ok(builder)
    }

    pub fn syntax(&self) -> &SyntaxGraph {
        &self.syntax
    }

    pub fn modules(&self) -> &ModuleGraph {
        &self.modules
    }

    pub fn current_scope(&self) -> &str {
        &self.scope
    }

    pub fn current_module(&self) -> &str {
        &self.module
    }

    // ========================================================================
    // Scopes and modules
    // ========================================================================

    fn scope_vertex(&self) -> Result<Option<VertexId>> {
        if self.scope.is_empty() {
            return Ok(None);
        }
        self.syntax
            .locate(&self.scope)
            .map(Some)
            .ok_or_else(|| Error::PathNotFound(self.scope.clone()))
    }

    fn push_scope(&mut self, name: &str) {
        self.scope_stack.push(self.scope.clone());
        self.scope.push('/');
        self.scope.push_str(name);
    }

    /// Enters namespace `name`, declaring it on first use.
    pub fn open_namespace(&mut self, name: &str) -> Result<VertexId> {
        let name = convert_typename(name);
        validate(&name)?;
        let parent = self.scope_vertex()?;
        if parent.is_some_and(|p| !self.syntax.kind(p).is_namespace()) {
            return Err(Error::InvalidScope(self.scope.clone()));
        }
        let v = match self.syntax.locate_child(parent, &name) {
            Some(v) if self.syntax.kind(v).is_namespace() => v,
            Some(_) => {
                return Err(Error::DuplicateName {
                    scope: self.scope.clone(),
                    name,
                });
            }
            None => self
                .syntax
                .add_vertex(parent, Vertex::new(name.as_str(), Kind::Namespace))?,
        };
        self.push_scope(&name);
        Ok(v)
    }

    /// Enters the scope of a struct or graph so that nested declarations land
    /// under it.
    pub fn open_scope(&mut self, v: VertexId) -> Result<()> {
        let path = self.syntax.get_path(v);
        if !self.syntax.kind(v).is_scope() {
            return Err(Error::InvalidScope(path));
        }
        let previous = std::mem::replace(&mut self.scope, path);
        self.scope_stack.push(previous);
        Ok(())
    }

    /// Leaves the innermost namespace or struct scope.
    pub fn close_scope(&mut self) {
        if let Some(previous) = self.scope_stack.pop() {
            self.scope = previous;
        }
    }

    /// Enters module `name`, registering it on first use.
    pub fn open_module(&mut self, name: &str, info: ModuleInfo) -> Result<()> {
        let path = join_path(&self.module, name);
        if self.modules.get(&path).is_none() {
            debug!(module = %path, folder = %info.folder, "register module");
            self.modules.add_module(path, info)?;
        }
        self.module_stack.push(self.module.len());
        self.module.push('/');
        self.module.push_str(name);
        Ok(())
    }

    pub fn close_module(&mut self) {
        if let Some(len) = self.module_stack.pop() {
            self.module.truncate(len);
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declare(&mut self, name: &str, kind: Kind, traits: Traits) -> Result<VertexId> {
        let name = convert_typename(name);
        validate(&name)?;
        let parent = self.scope_vertex()?;
        if parent.is_some_and(|p| !self.syntax.kind(p).is_scope()) {
            return Err(Error::InvalidScope(self.scope.clone()));
        }
        let mut vertex = Vertex::new(name, kind);
        vertex.traits = traits;
        vertex.module_path = self.module.clone();
        self.syntax.add_vertex(parent, vertex)
    }

    fn declare_in_namespace(&mut self, name: &str, kind: Kind, traits: Traits) -> Result<VertexId> {
        if !self.scope.is_empty() && !self.syntax.is_namespace(&self.scope) {
            return Err(Error::InvalidScope(self.scope.clone()));
        }
        self.declare(name, kind, traits)
    }

    pub fn add_value(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Value, traits)
    }

    pub fn add_enum(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Enum(Enum::default()), traits)
    }

    /// An enum whose values combine as bit flags.
    pub fn add_flags(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        let kind = Kind::Enum(Enum {
            is_flags: true,
            ..Enum::default()
        });
        self.declare(name, kind, traits)
    }

    pub fn set_underlying_type(&mut self, v: VertexId, underlying: &str) -> Result<()> {
        let path = self.syntax.get_path(v);
        match &mut self.syntax.vertex_mut(v).kind {
            Kind::Enum(e) => {
                e.underlying_type = underlying.trim().to_owned();
                Ok(())
            }
            _ => Err(Error::NotAnEnum(path)),
        }
    }

    pub fn add_enum_element(&mut self, v: VertexId, name: &str, value: &str) -> Result<()> {
        let path = self.syntax.get_path(v);
        let Kind::Enum(e) = &mut self.syntax.vertex_mut(v).kind else {
            return Err(Error::NotAnEnum(path));
        };
        if e.values.iter().any(|x| x.name == name) {
            return Err(Error::DuplicateName {
                scope: path,
                name: name.to_owned(),
            });
        }
        e.values.push(EnumValue {
            name: name.trim().to_owned(),
            value: value.trim().to_owned(),
        });
        Ok(())
    }

    pub fn add_tag(&mut self, name: &str, entity: bool) -> Result<VertexId> {
        self.declare(name, Kind::Tag(Tag { entity }), Traits::default())
    }

    pub fn add_concept(&mut self, name: &str) -> Result<VertexId> {
        self.declare_in_namespace(name, Kind::Concept, Traits::default())
    }

    pub fn add_define(&mut self, name: &str, content: &str) -> Result<VertexId> {
        let kind = Kind::Define(Define {
            content: content.to_owned(),
        });
        self.declare(name, kind, Traits::default())
    }

    pub fn add_alias(&mut self, name: &str, target: &str) -> Result<VertexId> {
        let scope = self.scope.clone();
        let target = self.resolve_type(&scope, target)?;
        let kind = Kind::Alias(Alias {
            target: self.syntax.get_path(target),
        });
        self.declare(name, kind, Traits::default())
    }

    /// Sequence template head (`vector`, `list`, `set`).
    pub fn add_container(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Container, traits)
    }

    /// Associative template head (`map`, `unordered_map`).
    pub fn add_map(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Map, traits)
    }

    pub fn add_optional(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Optional, traits)
    }

    /// Resolves a dependent name from `scope`, instantiating templates on
    /// demand.
    fn resolve_type(&mut self, scope: &str, name: &str) -> Result<VertexId> {
        let name = convert_typename(name);
        validate(&name)?;
        if is_instance(&name) {
            return self.syntax.instantiate(scope, &name);
        }
        self.syntax
            .lookup_identifier(scope, &name)
            .ok_or_else(|| Error::IdentifierNotFound {
                scope: scope.to_owned(),
                name,
            })
    }

    /// Like `resolve_type`, but `_` and the empty string mean "no type".
    fn resolve_optional_path(&mut self, scope: &str, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() || name == "_" {
            return Ok(String::new());
        }
        let v = self.resolve_type(scope, name)?;
        Ok(self.syntax.get_path(v))
    }

    // ========================================================================
    // Structs
    // ========================================================================

    pub fn add_struct(&mut self, name: &str, traits: Traits) -> Result<VertexId> {
        self.declare(name, Kind::Struct(Composition::default()), traits)
    }

    fn composition_path(&self, v: VertexId) -> Result<String> {
        let path = self.syntax.get_path(v);
        if self.syntax.kind(v).composition().is_none() {
            return Err(Error::NotAComposition(path));
        }
        Ok(path)
    }

    fn composition_mut(&mut self, v: VertexId) -> &mut Composition {
        self.syntax.ensure_composition_mut(v)
    }

    pub fn add_inherits(&mut self, v: VertexId, base: &str) -> Result<()> {
        let scope = self.composition_path(v)?;
        let base = self.resolve_type(&scope, base)?;
        let base_path = self.syntax.get_path(base);
        self.syntax.vertex_mut(v).inherits.push(base_path);
        Ok(())
    }

    /// Appends a member. `type_name` may carry `const`, `*` and `&`; a
    /// default of `_` means no default.
    pub fn add_member(
        &mut self,
        v: VertexId,
        public: bool,
        type_name: &str,
        member_name: &str,
        default_value: &str,
        flags: GenerationFlags,
    ) -> Result<()> {
        let owner = self.composition_path(v)?;
        let member_name = member_name.trim();
        get_parameter_name(member_name)?;
        if self.syntax.composition(v).member(member_name).is_some() {
            return Err(Error::DuplicateName {
                scope: owner,
                name: member_name.to_owned(),
            });
        }

        let converted = convert_typename(type_name);
        let (qualifiers, base) = peel_qualifiers(&converted)?;
        let t = self.resolve_type(&owner, base)?;

        let by_value = !qualifiers.pointer && !qualifiers.reference;
        if by_value && self.syntax.holds_by_value(t, v) {
            return Err(Error::SelfContainment {
                owner,
                member: member_name.to_owned(),
            });
        }

        let default_value = match default_value.trim() {
            "_" => "",
            other => other,
        };
        let member = Member {
            type_path: self.syntax.get_path(t),
            member_name: member_name.to_owned(),
            default_value: default_value.to_owned(),
            typescript_default: String::new(),
            public,
            is_const: qualifiers.is_const,
            pointer: qualifiers.pointer,
            reference: qualifiers.reference,
            flags,
        };
        self.composition_mut(v).members.push(member);
        Ok(())
    }

    /// Overrides the transcoded TypeScript default of a member.
    pub fn set_typescript_default(&mut self, v: VertexId, member: &str, text: &str) -> Result<()> {
        let owner = self.composition_path(v)?;
        let composition = self.composition_mut(v);
        let m = composition
            .members
            .iter_mut()
            .find(|m| m.member_name == member)
            .ok_or_else(|| Error::MemberNotFound {
                owner,
                member: member.to_owned(),
            })?;
        m.typescript_default = text.to_owned();
        Ok(())
    }

    /// Constructor taking the named members, in the given order.
    pub fn add_constructor(&mut self, v: VertexId, members: &[&str], has_default: bool) -> Result<()> {
        let owner = self.composition_path(v)?;
        let composition = self.syntax.composition(v);
        let indices = members
            .iter()
            .map(|name| {
                composition
                    .member(name.trim())
                    .map(|(i, _)| i as u32)
                    .ok_or_else(|| Error::MemberNotFound {
                        owner: owner.clone(),
                        member: (*name).to_owned(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        self.composition_mut(v).constructors.push(Constructor {
            indices,
            has_default,
        });
        Ok(())
    }

    pub fn add_method(&mut self, v: VertexId, method: Method) -> Result<()> {
        self.composition_path(v)?;
        self.composition_mut(v).methods.push(method);
        Ok(())
    }

    /// Verbatim C++ member function declaration.
    pub fn add_member_function(&mut self, v: VertexId, text: &str) -> Result<()> {
        self.composition_path(v)?;
        self.composition_mut(v)
            .member_functions
            .push(text.to_owned());
        Ok(())
    }

    pub fn add_typescript_function(&mut self, v: VertexId, text: &str) -> Result<()> {
        self.composition_path(v)?;
        self.composition_mut(v)
            .typescript_functions
            .push(text.to_owned());
        Ok(())
    }

    pub fn add_constraints(&mut self, v: VertexId, concept: &str) -> Result<()> {
        let scope = self.scope.clone();
        let c = self.resolve_type(&scope, concept)?;
        let path = self.syntax.get_path(c);
        if !matches!(self.syntax.kind(c), Kind::Concept) {
            return Err(Error::InvalidOption {
                what: "concept",
                value: path,
            });
        }
        self.syntax.vertex_mut(v).constraints.push(path);
        Ok(())
    }

    // ========================================================================
    // Variants
    // ========================================================================

    pub fn add_variant(&mut self, name: &str, flags: GenerationFlags) -> Result<VertexId> {
        let traits = Traits {
            flags,
            ..Traits::default()
        };
        self.declare_in_namespace(name, Kind::Variant(Variant::default()), traits)
    }

    pub fn add_variant_element(&mut self, v: VertexId, type_name: &str) -> Result<()> {
        let path = self.syntax.get_path(v);
        if !matches!(self.syntax.kind(v), Kind::Variant(_)) {
            return Err(Error::NotAVariant(path));
        }
        let scope = self.scope.clone();
        let t = self.resolve_type(&scope, type_name)?;
        let type_path = self.syntax.get_path(t);
        if let Kind::Variant(variant) = &mut self.syntax.vertex_mut(v).kind {
            variant.variants.push(type_path);
        }
        Ok(())
    }

    // ========================================================================
    // Graphs
    // ========================================================================

    /// Declares a graph with optional vertex and edge properties (`_` for
    /// none). Axes start at `GraphDesc::default()`.
    pub fn add_graph(
        &mut self,
        name: &str,
        vertex_property: &str,
        edge_property: &str,
        traits: Traits,
    ) -> Result<VertexId> {
        let scope = self.scope.clone();
        let vertex_property = self.resolve_optional_path(&scope, vertex_property)?;
        let edge_property = self.resolve_optional_path(&scope, edge_property)?;
        let desc = GraphDesc {
            vertex_property,
            edge_property,
            ..GraphDesc::default()
        };
        let graph = Graph {
            composition: Composition::default(),
            desc,
        };
        let v = self.declare_in_namespace(name, Kind::Graph(Box::new(graph)), traits)?;
        debug!(graph = %self.syntax.get_path(v), "add graph");
        Ok(v)
    }

    fn graph_path(&self, v: VertexId) -> Result<String> {
        let path = self.syntax.get_path(v);
        if self.syntax.kind(v).graph().is_none() {
            return Err(Error::NotAGraph(path));
        }
        Ok(path)
    }

    /// Axes of a graph vertex.
    pub fn graph_desc_mut(&mut self, v: VertexId) -> Result<&mut GraphDesc> {
        self.graph_path(v)?;
        Ok(&mut self.syntax.ensure_graph_mut(v).desc)
    }

    /// Resolves a type referenced by graph `v`, rejecting the graph itself.
    fn resolve_graph_value(&mut self, v: VertexId, type_name: &str, place: &'static str) -> Result<String> {
        let graph = self.graph_path(v)?;
        let scope = self.scope.clone();
        let t = self.resolve_type(&scope, type_name)?;
        if self.syntax.holds_by_value(t, v) {
            return Err(Error::GraphSelfReference { graph, place });
        }
        Ok(self.syntax.get_path(t))
    }

    pub fn add_graph_component(
        &mut self,
        v: VertexId,
        name: &str,
        type_name: &str,
        member_name: &str,
    ) -> Result<()> {
        let value_path = self.resolve_graph_value(v, type_name, "a component")?;
        let desc = self.graph_desc_mut(v)?;
        desc.components.push(Component {
            name: name.trim().to_owned(),
            value_path,
            member_name: member_name.trim().to_owned(),
        });
        Ok(())
    }

    pub fn add_graph_polymorphic(
        &mut self,
        v: VertexId,
        tag: &str,
        type_name: &str,
        member_name: &str,
        container: ListKind,
    ) -> Result<()> {
        let tag = self.resolve_graph_value(v, tag, "a polymorphic tag")?;
        let value = self.resolve_graph_value(v, type_name, "a polymorphic value")?;
        let desc = self.graph_desc_mut(v)?;
        desc.polymorphic.push(PolymorphicPair {
            tag,
            value,
            member_name: member_name.trim().to_owned(),
            container,
        });
        Ok(())
    }

    pub fn add_vertex_map(&mut self, v: VertexId, map: VertexMap) -> Result<()> {
        let key_type = self.resolve_graph_value(v, &map.key_type, "a vertex map")?;
        self.graph_desc_mut(v)?.vertex_maps.push(VertexMap { key_type, ..map });
        Ok(())
    }

    pub fn set_named(&mut self, v: VertexId, named: NamedConcept) -> Result<()> {
        self.graph_desc_mut(v)?.named = Some(named);
        Ok(())
    }

    pub fn set_reference(&mut self, v: VertexId, ownership: Ownership, mutable: bool) -> Result<()> {
        let desc = self.graph_desc_mut(v)?;
        desc.ownership = ownership;
        desc.mutable_reference = mutable;
        Ok(())
    }

    pub fn set_addressable(&mut self, v: VertexId, member_name: &str, utf8: bool) -> Result<()> {
        self.graph_desc_mut(v)?.addressable = Some(Addressable {
            member_name: member_name.trim().to_owned(),
            utf8,
        });
        Ok(())
    }

    // ========================================================================
    // TypeScript
    // ========================================================================

    /// Projects a C++ type onto a TypeScript name (`std/vector<float>` to
    /// `Float32Array`).
    pub fn project_typescript(&mut self, cpp: &str, ts: &str) -> Result<()> {
        let scope = self.scope.clone();
        let v = self.resolve_type(&scope, cpp)?;
        let ts = remove_parenthesis(ts);
        let typescript = &mut self.syntax.vertex_mut(v).typescript;
        typescript.array = ts.ends_with("[]");
        typescript.name = ts.to_owned();
        Ok(())
    }

    // ========================================================================
    // Freezing
    // ========================================================================

    /// Computes module dependencies from cross-module type usage and freezes
    /// the AST.
    pub fn compile(mut self) -> Result<Compiled> {
        let paths: Vec<String> = self.modules.modules().map(|(p, _)| p.to_owned()).collect();
        for module in &paths {
            let imported = self.syntax.get_imported_types(module);
            for dependency in imported.keys() {
                if self.modules.get(dependency).is_some() {
                    self.modules.add_dependency(module, dependency)?;
                }
            }
        }
        debug!(
            vertices = self.syntax.num_vertices(),
            modules = self.modules.len(),
            "compile"
        );
        Ok(Compiled {
            syntax: self.syntax,
            modules: self.modules,
        })
    }
}

/// Frozen AST and module graph, borrowed by every emitter.
#[derive(Debug)]
pub struct Compiled {
    syntax: SyntaxGraph,
    modules: ModuleGraph,
}

impl Compiled {
    pub fn syntax(&self) -> &SyntaxGraph {
        &self.syntax
    }

    pub fn modules(&self) -> &ModuleGraph {
        &self.modules
    }

    pub fn module(&self, path: &str) -> Result<&ModuleInfo> {
        self.modules.module(path)
    }

    pub fn imported_types(&self, module: &str) -> ImportedTypes {
        self.syntax.get_imported_types(module)
    }

    /// Vertices a module emits: declared by it and not imported.
    pub fn module_vertices<'a>(&'a self, module: &'a str) -> impl Iterator<Item = VertexId> + 'a {
        self.syntax
            .module_vertices(module)
            .filter(|&v| !self.syntax.traits(v).import)
    }
}
