//! Trait inference over the AST.
//!
//! Every query is recomputed per call. Composite queries recurse through
//! members held by value; pointer, reference and self members are skipped.
//! The builder rejects by-value cycles (see [`SyntaxGraph::holds_by_value`]),
//! so the recursion terminates.

use super::{GenerationFlags, Kind, Member, SyntaxGraph, VertexId};
use super::resolve::is_pmr_string;

/// How a special member function is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplEnum {
    /// Nothing is emitted; the compiler provides it.
    None,
    /// Declared and defined in the header.
    Inline,
    /// Declared in the header, defined in the source file.
    Separated,
    /// Declared `= delete`.
    Delete,
}

impl SyntaxGraph {
    /// Member types held by value, excluding the owner itself.
    fn value_members<'a>(
        &'a self,
        owner: VertexId,
        members: &'a [Member],
    ) -> impl Iterator<Item = VertexId> + 'a {
        members
            .iter()
            .filter(|m| !m.pointer && !m.reference)
            .filter_map(|m| self.locate(&m.type_path))
            .filter(move |&t| t != owner)
    }

    /// Value types a composite stores: members, plus graph properties,
    /// components and polymorphic values.
    fn stored_types(&self, v: VertexId) -> Vec<VertexId> {
        let mut types = Vec::new();
        if let Some(composition) = self.kind(v).composition() {
            types.extend(self.value_members(v, &composition.members));
        }
        if let Some(graph) = self.kind(v).graph() {
            let desc = &graph.desc;
            let paths = [desc.vertex_property.as_str(), desc.edge_property.as_str()]
                .into_iter()
                .chain(desc.components.iter().map(|c| c.value_path.as_str()))
                .chain(desc.polymorphic.iter().map(|p| p.value.as_str()));
            types.extend(paths.filter_map(|p| self.locate(p)).filter(|&t| t != v));
        }
        types
    }

    /// Types `v` embeds directly: stored values, bases, optional payloads,
    /// variant alternatives and alias targets.
    fn embedded_types(&self, v: VertexId) -> Vec<VertexId> {
        let mut types = self.stored_types(v);
        types.extend(self.vertex(v).inherits.iter().filter_map(|b| self.locate(b)));
        match self.kind(v) {
            Kind::Alias(_) => types.push(self.resolve_alias(v)),
            Kind::Instance(_) if self.is_optional(v) => types.extend(self.instance_parameters(v)),
            Kind::Variant(variant) => {
                types.extend(variant.variants.iter().filter_map(|p| self.locate(p)));
            }
            _ => {}
        }
        types
    }

    /// `true` when `v` is `target` or embeds it by value, directly or
    /// through other types.
    pub fn holds_by_value(&self, v: VertexId, target: VertexId) -> bool {
        let mut visited = vec![false; self.num_vertices() as usize];
        let mut stack = vec![v];
        while let Some(u) = stack.pop() {
            if u == target {
                return true;
            }
            let seen = &mut visited[u as usize];
            if *seen {
                continue;
            }
            *seen = true;
            stack.extend(self.embedded_types(u));
        }
        false
    }

    fn any_base(&self, v: VertexId, pred: &dyn Fn(VertexId) -> bool) -> bool {
        self.vertex(v)
            .inherits
            .iter()
            .filter_map(|b| self.locate(b))
            .any(|b| pred(b) || self.any_base(b, pred))
    }

    pub fn is_composition(&self, v: VertexId) -> bool {
        self.kind(v).composition().is_some()
    }

    pub fn is_derived(&self, v: VertexId) -> bool {
        !self.vertex(v).inherits.is_empty()
    }

    pub fn is_interface(&self, v: VertexId) -> bool {
        self.traits(v).interface
    }

    pub fn has_flag(&self, v: VertexId, flag: GenerationFlags) -> bool {
        self.traits(v).has(flag)
    }

    /// Allocator aware: flagged, or storing an allocator aware value.
    pub fn is_pmr(&self, v: VertexId) -> bool {
        let traits = self.traits(v);
        if traits.pmr {
            return true;
        }
        if traits.unknown || traits.import {
            return false;
        }
        match self.kind(v) {
            Kind::Struct(_) | Kind::Graph(_) => {
                self.stored_types(v).into_iter().any(|t| self.is_pmr(t))
                    || self.any_base(v, &|b| self.is_pmr(b))
            }
            Kind::Alias(_) => {
                let target = self.resolve_alias(v);
                target != v && self.is_pmr(target)
            }
            Kind::Instance(_) => {
                let template_pmr = self.get_template(v).is_some_and(|t| self.traits(t).pmr);
                template_pmr
                    || (self.is_optional(v)
                        && self.instance_parameters(v).into_iter().any(|p| self.is_pmr(p)))
            }
            _ => false,
        }
    }

    /// Pooled in TypeScript: flagged, or storing a pooled value.
    pub fn is_pool_object(&self, v: VertexId) -> bool {
        if self.has_flag(v, GenerationFlags::POOL_OBJECT) {
            return true;
        }
        match self.kind(v) {
            Kind::Struct(_) | Kind::Graph(_) => self
                .stored_types(v)
                .into_iter()
                .any(|t| self.is_pool_object(t)),
            _ => false,
        }
    }

    /// Constructors taking members can be `noexcept`.
    pub fn is_noexcept(&self, v: VertexId) -> bool {
        let traits = self.traits(v);
        if traits.interface || (traits.pmr && traits.has(GenerationFlags::CUSTOM_CNTR)) {
            return false;
        }
        let Some(composition) = self.kind(v).composition() else {
            return true;
        };
        composition
            .members
            .iter()
            .filter(|m| !m.pointer && !m.reference)
            .all(|m| {
                if is_pmr_string(&m.type_path) {
                    return false;
                }
                match self.locate(&m.type_path) {
                    Some(t) if t != v && self.is_composition(t) => self.is_noexcept(t),
                    _ => true,
                }
            })
    }

    /// Trivially copyable value semantics.
    pub fn is_value_type(&self, v: VertexId) -> bool {
        let traits = self.traits(v);
        if traits.pmr || traits.interface || traits.has(GenerationFlags::CUSTOM_DTOR) {
            return false;
        }
        match self.kind(v) {
            Kind::Value | Kind::Enum(_) | Kind::Tag(_) => true,
            Kind::Alias(_) => {
                let target = self.resolve_alias(v);
                target != v && self.is_value_type(target)
            }
            Kind::Struct(composition) => self
                .value_members(v, &composition.members)
                .all(|t| self.is_value_type(t)),
            Kind::Variant(variant) => variant
                .variants
                .iter()
                .filter_map(|p| self.locate(p))
                .all(|t| self.is_value_type(t)),
            _ => false,
        }
    }

    /// An `optional` member wrapping an allocator aware value.
    pub fn has_pmr_optional(&self, v: VertexId) -> bool {
        let Some(composition) = self.kind(v).composition() else {
            return false;
        };
        self.value_members(v, &composition.members)
            .any(|t| self.is_optional(t) && self.is_pmr(t))
    }

    pub fn has_custom_dtor(&self, v: VertexId) -> bool {
        self.has_flag(v, GenerationFlags::CUSTOM_DTOR)
            || self.any_base(v, &|b| self.has_flag(b, GenerationFlags::CUSTOM_DTOR))
    }

    pub fn is_jsb(&self, v: VertexId) -> bool {
        self.has_flag(v, GenerationFlags::JSB)
    }

    fn base_forbids_move(&self, v: VertexId) -> bool {
        self.any_base(v, &|b| self.has_flag(b, GenerationFlags::NO_MOVE_NO_COPY))
    }

    fn needs_separation(&self, v: VertexId) -> bool {
        self.is_pmr(v) || self.is_interface(v)
    }

    pub fn need_default_cntr(&self, v: VertexId) -> ImplEnum {
        if self.has_flag(v, GenerationFlags::NO_DEFAULT_CNTR) {
            return ImplEnum::Delete;
        }
        if self.needs_separation(v) || self.has_flag(v, GenerationFlags::CUSTOM_CNTR) {
            return ImplEnum::Separated;
        }
        match self.kind(v).composition() {
            Some(c) if !c.constructors.is_empty() => ImplEnum::Inline,
            _ => ImplEnum::None,
        }
    }

    pub fn need_move_cntr(&self, v: VertexId) -> ImplEnum {
        if self.base_forbids_move(v) {
            return ImplEnum::None;
        }
        if self.has_flag(v, GenerationFlags::NO_MOVE_NO_COPY) {
            return ImplEnum::Delete;
        }
        if self.is_pmr(v) {
            return ImplEnum::Separated;
        }
        if self.has_custom_dtor(v) && self.is_composition(v) {
            return ImplEnum::Inline;
        }
        ImplEnum::None
    }

    pub fn need_copy_cntr(&self, v: VertexId) -> ImplEnum {
        if self.base_forbids_move(v) {
            return ImplEnum::None;
        }
        if self.has_flag(v, GenerationFlags::NO_MOVE_NO_COPY)
            || self.has_flag(v, GenerationFlags::NO_COPY)
        {
            return ImplEnum::Delete;
        }
        if self.is_pmr(v) {
            return ImplEnum::Separated;
        }
        if self.has_custom_dtor(v) && self.is_composition(v) {
            return ImplEnum::Inline;
        }
        ImplEnum::None
    }

    pub fn need_dtor(&self, v: VertexId) -> ImplEnum {
        if self.has_flag(v, GenerationFlags::CUSTOM_DTOR) {
            return ImplEnum::Separated;
        }
        if self.is_interface(v) {
            return ImplEnum::Inline;
        }
        ImplEnum::None
    }
}
