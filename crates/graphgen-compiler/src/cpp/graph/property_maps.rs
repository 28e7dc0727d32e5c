//! `boost::property_map` specializations, `get`/`put` overloads and the
//! uuid lookups.
//!
//! Specializations live in `namespace boost` and spell every type from the
//! global namespace; getters live next to the graph.

use std::collections::HashSet;

use graphgen_core::syntax::Component;

use super::{GraphEmitter, Site};
use crate::CodeWriter;
use crate::writer::Separator;

const LVALUE: &str = "lvalue_property_map_tag";
const READ_WRITE: &str = "read_write_property_map_tag";

/// One `property_map<G, Key>` specialization and its getters.
struct PropertyMap {
    comment: &'static str,
    /// Member pointer maps are templates over the member type `T`.
    template: bool,
    /// Key spelled inside `namespace boost`.
    key: String,
    /// Key spelled from the graph's namespace.
    local_key: String,
    const_type: String,
    mutable_type: String,
    /// Getter parameter.
    param: String,
    /// Braced initializer of the map.
    init: String,
}

impl GraphEmitter<'_> {
    fn storage(&self) -> &'static str {
        if self.desc.is_vector() { "Vector" } else { "Pointer" }
    }

    fn is_struct_path(&self, path: &str) -> bool {
        self.ctx
            .syntax
            .locate(path)
            .is_some_and(|t| self.ctx.syntax.is_composition(t))
    }

    /// Components always live in vector containers beside the vertices.
    fn component_source(&self, c: &Component, constant: bool) -> String {
        let cv = if constant { "const " } else { "" };
        format!(
            "{cv}{}<{}>",
            self.container("vector"),
            self.spell(&c.value_path, Site::Global)
        )
    }

    fn component_init(&self, c: &Component) -> String {
        format!("g.{}", c.member_name)
    }

    fn property_maps(&self) -> Vec<PropertyMap> {
        let desc = self.desc;
        let full = &self.full;
        let storage = self.storage();
        let mut maps = Vec::new();

        if desc.is_vector() {
            maps.push(PropertyMap {
                comment: "Vertex Index",
                template: false,
                key: "vertex_index_t".to_owned(),
                local_key: "boost::vertex_index_t".to_owned(),
                const_type: "identity_property_map".to_owned(),
                mutable_type: "identity_property_map".to_owned(),
                param: "boost::vertex_index_t /*tag*/".to_owned(),
                init: String::new(),
            });
        }

        let mut members = HashSet::new();
        if desc.has_vertex_property() {
            let vp = self.spell(&desc.vertex_property, Site::Global);
            maps.push(PropertyMap {
                comment: "Vertex Bundle",
                template: false,
                key: "vertex_bundle_t".to_owned(),
                local_key: "boost::vertex_bundle_t".to_owned(),
                const_type: format!(
                    "Impl::{storage}VertexBundlePropertyMap<{LVALUE}, const {full}, const {vp}, const {vp}&>"
                ),
                mutable_type: format!(
                    "Impl::{storage}VertexBundlePropertyMap<{LVALUE}, {full}, {vp}, {vp}&>"
                ),
                param: "boost::vertex_bundle_t /*tag*/".to_owned(),
                init: "g".to_owned(),
            });
            if self.is_struct_path(&desc.vertex_property) {
                members.insert(desc.vertex_property.clone());
                let local = self.spell(&desc.vertex_property, Site::Namespace);
                maps.push(PropertyMap {
                    comment: "Vertex BundleMember",
                    template: true,
                    key: format!("T {vp}::*"),
                    local_key: format!("T {local}::*"),
                    const_type: format!(
                        "Impl::{storage}VertexBundleMemberPropertyMap<{LVALUE}, const {full}, const T, const T&, T {vp}::*>"
                    ),
                    mutable_type: format!(
                        "Impl::{storage}VertexBundleMemberPropertyMap<{LVALUE}, {full}, T, T&, T {vp}::*>"
                    ),
                    param: format!("T {local}::*memberPointer"),
                    init: "g, memberPointer".to_owned(),
                });
            }
        }

        for c in &desc.components {
            let value = self.spell(&c.value_path, Site::Global);
            let tag = format!("{full}::{}Tag", c.name);
            maps.push(PropertyMap {
                comment: "Vertex Component",
                template: false,
                key: tag.clone(),
                local_key: format!("{}::{}Tag", self.qualified, c.name),
                const_type: format!(
                    "Impl::VectorVertexComponentPropertyMap<{LVALUE}, const {full}, {}, const {value}, const {value}&>",
                    self.component_source(c, true)
                ),
                mutable_type: format!(
                    "Impl::VectorVertexComponentPropertyMap<{LVALUE}, {full}, {}, {value}, {value}&>",
                    self.component_source(c, false)
                ),
                param: format!("{}::{}Tag /*tag*/", self.qualified, c.name),
                init: self.component_init(c),
            });
            if self.is_struct_path(&c.value_path) && members.insert(c.value_path.clone()) {
                let local = self.spell(&c.value_path, Site::Namespace);
                maps.push(PropertyMap {
                    comment: "Vertex ComponentMember",
                    template: true,
                    key: format!("T {value}::*"),
                    local_key: format!("T {local}::*"),
                    const_type: format!(
                        "Impl::VectorVertexComponentMemberPropertyMap<{LVALUE}, const {full}, {}, const T, const T&, T {value}::*>",
                        self.component_source(c, true)
                    ),
                    mutable_type: format!(
                        "Impl::VectorVertexComponentMemberPropertyMap<{LVALUE}, {full}, {}, T, T&, T {value}::*>",
                        self.component_source(c, false)
                    ),
                    param: format!("T {local}::*memberPointer"),
                    init: format!("{}, memberPointer", self.component_init(c)),
                });
            }
        }

        if let Some(named) = &desc.named {
            maps.push(self.named_map(named));
        }

        if desc.has_edge_property() {
            let ep = self.spell(&desc.edge_property, Site::Global);
            maps.push(PropertyMap {
                comment: "Edge Bundle",
                template: false,
                key: "edge_bundle_t".to_owned(),
                local_key: "boost::edge_bundle_t".to_owned(),
                const_type: format!(
                    "Impl::EdgeBundlePropertyMap<{LVALUE}, const {full}, const {ep}, const {ep}&>"
                ),
                mutable_type: format!("Impl::EdgeBundlePropertyMap<{LVALUE}, {full}, {ep}, {ep}&>"),
                param: "boost::edge_bundle_t /*tag*/".to_owned(),
                init: "g".to_owned(),
            });
            if self.is_struct_path(&desc.edge_property) && members.insert(desc.edge_property.clone()) {
                let local = self.spell(&desc.edge_property, Site::Namespace);
                maps.push(PropertyMap {
                    comment: "Edge BundleMember",
                    template: true,
                    key: format!("T {ep}::*"),
                    local_key: format!("T {local}::*"),
                    const_type: format!(
                        "Impl::EdgeBundleMemberPropertyMap<{LVALUE}, const {full}, const T, const T&, T {ep}::*>"
                    ),
                    mutable_type: format!(
                        "Impl::EdgeBundleMemberPropertyMap<{LVALUE}, {full}, T, T&, T {ep}::*>"
                    ),
                    param: format!("T {local}::*memberPointer"),
                    init: "g, memberPointer".to_owned(),
                });
            }
        }
        maps
    }

    /// Names read through `boost::string_view` from a component or from the
    /// vertex property.
    fn named_map(&self, named: &graphgen_core::syntax::NamedConcept) -> PropertyMap {
        let full = &self.full;
        let storage = self.storage();
        let view = "boost::string_view";
        let component = named.component.as_deref().and_then(|c| self.desc.component(c));
        let holder = component.map_or(self.desc.vertex_property.as_str(), |c| c.value_path.as_str());
        let holder_ty = self.spell(holder, Site::Global);
        let holder_local = self.spell(holder, Site::Namespace);
        let member_ty = if named.member_name.is_empty() {
            holder_ty.clone()
        } else {
            self.named_member_type(holder, &named.member_name)
        };

        let (const_type, mutable_type, init) = match (component, named.member_name.is_empty()) {
            (Some(c), true) => (
                format!(
                    "Impl::VectorVertexComponentPropertyMap<{READ_WRITE}, const {full}, {}, {view}, const {member_ty}&>",
                    self.component_source(c, true)
                ),
                format!(
                    "Impl::VectorVertexComponentPropertyMap<{READ_WRITE}, {full}, {}, {view}, {member_ty}&>",
                    self.component_source(c, false)
                ),
                self.component_init(c),
            ),
            (Some(c), false) => (
                format!(
                    "Impl::VectorVertexComponentMemberPropertyMap<{READ_WRITE}, const {full}, {}, {view}, const {member_ty}&, {member_ty} {holder_ty}::*>",
                    self.component_source(c, true)
                ),
                format!(
                    "Impl::VectorVertexComponentMemberPropertyMap<{READ_WRITE}, {full}, {}, {view}, {member_ty}&, {member_ty} {holder_ty}::*>",
                    self.component_source(c, false)
                ),
                format!("{}, &{holder_local}::{}", self.component_init(c), named.member_name),
            ),
            (None, true) => (
                format!(
                    "Impl::{storage}VertexBundlePropertyMap<{READ_WRITE}, const {full}, {view}, const {member_ty}&>"
                ),
                format!("Impl::{storage}VertexBundlePropertyMap<{READ_WRITE}, {full}, {view}, {member_ty}&>"),
                "g".to_owned(),
            ),
            (None, false) => (
                format!(
                    "Impl::{storage}VertexBundleMemberPropertyMap<{READ_WRITE}, const {full}, {view}, const {member_ty}&, {member_ty} {holder_ty}::*>"
                ),
                format!(
                    "Impl::{storage}VertexBundleMemberPropertyMap<{READ_WRITE}, {full}, {view}, {member_ty}&, {member_ty} {holder_ty}::*>"
                ),
                format!("g, &{holder_local}::{}", named.member_name),
            ),
        };
        PropertyMap {
            comment: "Vertex Name",
            template: false,
            key: "vertex_name_t".to_owned(),
            local_key: "boost::vertex_name_t".to_owned(),
            const_type,
            mutable_type,
            param: "boost::vertex_name_t /*tag*/".to_owned(),
            init,
        }
    }

    /// Type of `member` inside struct `holder`, spelled globally.
    fn named_member_type(&self, holder: &str, member: &str) -> String {
        let syntax = self.ctx.syntax;
        syntax
            .locate(holder)
            .and_then(|h| syntax.kind(h).composition())
            .and_then(|c| c.member(member))
            .map_or_else(
                || "std::string".to_owned(),
                |(_, m)| self.spell(&m.type_path, Site::Global),
            )
    }

    // ========================================================================
    // namespace boost
    // ========================================================================

    pub(super) fn emit_property_map_traits(&self, w: &mut CodeWriter) {
        let full = &self.full;
        for map in self.property_maps() {
            w.blank();
            w.line(format!("// {}", map.comment));
            w.line(if map.template { "template <class T>" } else { "template <>" });
            w.open(format!("struct property_map<{full}, {}> {{", map.key));
            w.line(format!("using const_type = {};", map.const_type));
            w.line(format!("using type = {};", map.mutable_type));
            w.close("};");
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub(super) fn emit_property_getters(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let maps = self.property_maps();
        if maps.is_empty() {
            return;
        }
        w.blank();
        w.line("// PropertyGraph");
        let mut comment = "";
        for map in &maps {
            if map.comment != comment {
                w.blank();
                w.line(format!("// {}", map.comment));
                comment = map.comment;
            }
            let typename = if map.template { "typename " } else { "" };
            let graph = if map.init.starts_with('g') { "g" } else { "/*g*/" };
            for (constness, member) in [("const ", "const_type"), ("", "type")] {
                if map.template {
                    w.line("template <class T>");
                }
                w.line(format!(
                    "inline {typename}boost::property_map<{g}, {}>::{member}",
                    map.local_key
                ));
                w.open(format!(
                    "get({}, {constness}{g}& {graph}) noexcept {{",
                    map.param
                ));
                w.line(format!("return {{{}}};", map.init));
                w.close("}");
            }
        }

        let desc = self.desc;
        if desc.is_vector() || desc.has_properties() {
            self.emit_generic_access(w, "Vertex", &format!("{g}::vertex_descriptor v"), "v");
        }
        if desc.has_edge_property() {
            self.emit_generic_access(w, "Edge", &format!("const {g}::edge_descriptor& e"), "e");
        }
    }

    fn emit_generic_access(&self, w: &mut CodeWriter, what: &str, key: &str, name: &str) {
        let g = &self.qualified;
        for (label, constness) in [("Constant Getter", "const "), ("Mutable Getter", "")] {
            w.blank();
            w.line(format!("// {what} {label}"));
            w.line("template <class Tag>");
            w.line("[[nodiscard]] inline decltype(auto)");
            w.open(format!("get(Tag tag, {constness}{g}& g, {key}) noexcept {{"));
            w.line(format!("return get(get(tag, g), {name});"));
            w.close("}");
        }
        w.blank();
        w.line(format!("// {what} Setter"));
        w.line("template <class Tag, class... Args>");
        w.line("inline void put(");
        w.indented(|w| {
            w.line(format!("Tag tag, {g}& g,"));
            w.line(format!("{key},"));
            w.line("Args&&... args) {");
        });
        w.indent();
        w.line(format!("put(get(tag, g), {name}, std::forward<Args>(args)...);"));
        w.close("}");
    }

    // ========================================================================
    // UuidGraph
    // ========================================================================

    pub(super) fn emit_uuid(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// UuidGraph");
        let single = self.desc.vertex_maps.len() == 1;
        let mut sep = Separator::new();
        for map in &self.desc.vertex_maps {
            let key = self.spell(&map.key_type, Site::Namespace);
            let index = &map.member_name;
            sep.next(w);
            w.line(format!("inline {g}::vertex_descriptor"));
            w.open(format!("vertex(const {key}& key, const {g}& g) {{"));
            w.line(format!("return g.{index}.at(key);"));
            w.close("}");
            w.blank();
            w.line("inline bool");
            w.open(format!("contains(const {key}& key, const {g}& g) noexcept {{"));
            w.line(format!("return g.{index}.find(key) != g.{index}.end();"));
            w.close("}");
            if !single {
                continue;
            }
            w.blank();
            w.line("template <class KeyLike>");
            w.line(format!("inline {g}::vertex_descriptor"));
            w.open(format!("find_vertex(const KeyLike& key, const {g}& g) noexcept {{"));
            w.line(format!("auto iter = g.{index}.find(key);"));
            w.open(format!("if (iter == g.{index}.end()) {{"));
            w.line(format!("return {g}::null_vertex();"));
            w.close("}");
            w.line("return iter->second;");
            w.close("}");
            w.blank();
            w.line("template <class KeyLike>");
            w.line("inline bool");
            w.open(format!("contains(const KeyLike& key, const {g}& g) noexcept {{"));
            w.line(format!("return g.{index}.find(key) != g.{index}.end();"));
            w.close("}");
        }
    }
}
