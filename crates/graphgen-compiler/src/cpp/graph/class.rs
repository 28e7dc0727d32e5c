//! Graph class declaration (`Types.h`) and its out-of-line members
//! (`Types.cpp`).

use graphgen_core::syntax::OutEdgeListKind;
use graphgen_core::{GenerationFlags, ImplEnum};

use super::{GraphEmitter, Site};
use crate::cpp::structs::write_init_list;
use crate::cpp::{ALLOCATOR_TYPE, DEFAULT_RESOURCE};
use crate::writer::Separator;
use crate::{CodeWriter, Result};

/// A data member of the graph or of one of its node types.
pub(super) struct Field {
    ty: String,
    name: String,
    pmr: bool,
    default: String,
}

impl Field {
    fn new(ty: impl Into<String>, name: impl Into<String>, pmr: bool) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            pmr,
            default: String::new(),
        }
    }

    fn declaration(&self) -> String {
        if self.default.is_empty() {
            format!("{} {};", self.ty, self.name)
        } else {
            format!("{} {} = {};", self.ty, self.name, self.default)
        }
    }
}

fn alloc_entries(fields: &[Field]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.pmr)
        .map(|f| format!("{}(alloc)", f.name))
        .collect()
}

fn transfer_entries(fields: &[Field], moving: bool) -> Vec<String> {
    fields
        .iter()
        .map(|f| {
            let name = &f.name;
            let source = if moving {
                format!("std::move(rhs.{name})")
            } else {
                format!("rhs.{name}")
            };
            if f.pmr {
                format!("{name}({source}, alloc)")
            } else {
                format!("{name}({source})")
            }
        })
        .collect()
}

impl GraphEmitter<'_> {
    // ========================================================================
    // Fields
    // ========================================================================

    fn vertex_fields(&self) -> Vec<Field> {
        let desc = self.desc;
        let mut fields = vec![Field::new(
            self.incidence_container("out_edge_type"),
            "mOutEdges",
            self.pmr,
        )];
        if desc.has_in_edges() {
            fields.push(Field::new(
                self.incidence_container("in_edge_type"),
                "mInEdges",
                self.pmr,
            ));
        }
        if !desc.is_vector() && desc.need_reference_edges() {
            fields.extend(self.object_fields());
        }
        if desc.has_vertex_property() {
            fields.push(Field::new(
                self.vertex_property(),
                "mProperty",
                self.is_pmr_path(&desc.vertex_property),
            ));
        }
        if desc.is_polymorphic() {
            fields.push(Field::new("vertex_handle_type", "mHandle", false));
        }
        if !desc.is_vector() {
            fields.push(Field::new(
                format!("{}::iterator", self.vertex_list_container()),
                "mPosition",
                false,
            ));
        }
        fields
    }

    fn object_fields(&self) -> Vec<Field> {
        let list = |element: &str| format!("{}<{element}>", self.container("vector"));
        vec![
            Field::new(list("children_edge_type"), "mChildren", self.pmr),
            Field::new(list("parent_edge_type"), "mParents", self.pmr),
        ]
    }

    fn graph_fields(&self) -> Vec<Field> {
        let desc = self.desc;
        let mut fields = vec![Field::new(self.vertex_list_container(), "mVertices", self.pmr)];
        if desc.need_edge_list() {
            fields.push(Field::new(self.edge_list_container(), "mEdges", self.pmr));
        }
        if desc.is_vector() && desc.need_reference_edges() {
            fields.push(Field::new(
                format!("{}<object_type>", self.container("vector")),
                "mObjects",
                self.pmr,
            ));
        }
        for c in &desc.components {
            fields.push(Field::new(
                self.component_container(&c.value_path),
                c.member_name.as_str(),
                self.pmr,
            ));
        }
        for pair in desc.polymorphic.iter().filter(|p| p.is_stored()) {
            fields.push(Field::new(
                self.polymorphic_container(pair, Site::Class),
                pair.member_name.as_str(),
                self.pmr,
            ));
        }
        if desc.is_addressable() {
            fields.push(Field::new(
                format!(
                    "{}<{}, vertex_descriptor, std::less<>>",
                    self.container("map"),
                    self.path_string()
                ),
                self.path_index(),
                self.pmr,
            ));
        }
        for map in &desc.vertex_maps {
            fields.push(Field::new(
                format!(
                    "{}<{}, vertex_descriptor, std::less<>>",
                    self.container("map"),
                    self.type_name(&map.key_type)
                ),
                map.member_name.as_str(),
                self.pmr,
            ));
        }
        for m in &self.composition.members {
            let mut field = Field::new(
                self.ctx.member_type(&self.scope, m),
                m.member_name.as_str(),
                self.ctx.is_pmr_member(m),
            );
            field.default = m.default_value.clone();
            fields.push(field);
        }
        fields
    }

    // ========================================================================
    // Header
    // ========================================================================

    pub(crate) fn emit_class(&self, w: &mut CodeWriter) -> Result<()> {
        let api = if self.pmr { self.ctx.api() } else { String::new() };
        w.open(format!("struct {api}{} {{", self.name));
        let mut sep = Separator::new();
        for child in self.ctx.nested(self.v) {
            sep.next(w);
            crate::cpp::types::emit_declaration(self.ctx, w, child)?;
        }
        if self.pmr {
            sep.next(w);
            w.line(format!("using allocator_type = {ALLOCATOR_TYPE};"));
            w.open("allocator_type get_allocator() const noexcept { // NOLINT");
            w.line("return {mVertices.get_allocator().resource()};");
            w.close("}");
        }
        let mut special = CodeWriter::new();
        self.emit_special_members(&mut special);
        if !special.is_empty() {
            sep.next(w);
            w.text(special.as_str());
        }

        sep.next(w);
        self.emit_typedefs(w);
        w.blank();
        self.emit_accessors(w);
        if self.desc.is_vector() {
            w.blank();
            w.line("// ContinuousContainer");
            w.line("void reserve(vertices_size_type sz);");
        }
        if !self.composition.member_functions.is_empty() {
            w.blank();
            for f in &self.composition.member_functions {
                w.text(f);
            }
        }

        w.blank();
        self.emit_node_type(w, "vertex_type", &self.vertex_fields());
        if self.desc.is_vector() && self.desc.need_reference_edges() {
            w.blank();
            self.emit_node_type(w, "object_type", &self.object_fields());
        }

        w.blank();
        for field in self.graph_fields() {
            w.line(field.declaration());
        }
        w.close("};");
        Ok(())
    }

    fn emit_special_members(&self, w: &mut CodeWriter) {
        let syntax = self.ctx.syntax;
        let name = self.name;
        let noexcept = if syntax.is_noexcept(self.v) { " noexcept" } else { "" };
        match syntax.need_default_cntr(self.v) {
            ImplEnum::None => {}
            ImplEnum::Delete => w.line(format!("{name}() = delete;")),
            ImplEnum::Inline => w.line(format!("{name}() = default;")),
            ImplEnum::Separated if self.pmr => {
                let default = if syntax.has_flag(self.v, GenerationFlags::PMR_DEFAULT) {
                    format!(" = {DEFAULT_RESOURCE}")
                } else {
                    String::new()
                };
                w.line(format!(
                    "{name}(const allocator_type& alloc{default}){noexcept}; // NOLINT"
                ));
            }
            ImplEnum::Separated => w.line(format!("{name}(){noexcept};")),
        }
        let mv = syntax.need_move_cntr(self.v);
        let cp = syntax.need_copy_cntr(self.v);
        if mv == ImplEnum::Separated {
            w.line(format!("{name}({name}&& rhs, const allocator_type& alloc);"));
        }
        if cp == ImplEnum::Separated {
            w.line(format!("{name}({name} const& rhs, const allocator_type& alloc);"));
        }
        if mv == ImplEnum::None && cp == ImplEnum::None {
            return;
        }
        if !w.is_empty() {
            w.blank();
        }
        let moved = if mv == ImplEnum::Delete { "delete" } else { "default" };
        let copied = match cp {
            ImplEnum::Delete | ImplEnum::Separated => "delete",
            _ => "default",
        };
        let noexcept_move = if mv == ImplEnum::Delete { "" } else { " noexcept" };
        w.line(format!("{name}({name}&& rhs){noexcept_move} = {moved};"));
        w.line(format!("{name}({name} const& rhs) = {copied};"));
        w.line(format!("{name}& operator=({name}&& rhs) = {moved};"));
        let assign = if cp == ImplEnum::Delete { "delete" } else { "default" };
        w.line(format!("{name}& operator=({name} const& rhs) = {assign};"));
    }

    fn emit_typedefs(&self, w: &mut CodeWriter) {
        let desc = self.desc;
        let name = self.name;

        w.line("// Graph");
        w.line(format!("using directed_category = {};", self.directed_category()));
        if desc.is_vector() {
            w.line(format!("using vertex_descriptor = {};", desc.vertex_size_type));
        } else {
            w.line("using vertex_descriptor = void*;");
        }
        if desc.has_edge_property() || desc.is_undirected() {
            w.line("using edge_descriptor = Impl::EdgeDescriptorWithProperty<directed_category, vertex_descriptor>;");
        } else {
            w.line("using edge_descriptor = Impl::EdgeDescriptor<directed_category, vertex_descriptor>;");
        }
        let parallel = if desc.out_edge_list == OutEdgeListKind::UniqueAssociative {
            "boost::disallow_parallel_edge_tag"
        } else {
            "boost::allow_parallel_edge_tag"
        };
        w.line(format!("using edge_parallel_category = {parallel};"));
        let mut tags = vec!["boost::incidence_graph_tag"];
        if self.has_in_edge_access() {
            tags.push("boost::bidirectional_graph_tag");
        }
        if desc.adjacency {
            tags.push("boost::adjacency_graph_tag");
        }
        if desc.vertex_list_graph {
            tags.push("boost::vertex_list_graph_tag");
        }
        tags.push("boost::edge_list_graph_tag");
        w.line("struct traversal_category // NOLINT");
        w.indented(|w| {
            let last = tags.len() - 1;
            for (i, tag) in tags.iter().enumerate() {
                let lead = if i == 0 { ": " } else { "  " };
                let tail = if i == last { " {};" } else { "," };
                w.line(format!("{lead}virtual {tag}{tail}"));
            }
        });
        w.blank();
        w.open("constexpr static vertex_descriptor null_vertex() noexcept {");
        if desc.is_vector() {
            w.line("return std::numeric_limits<vertex_descriptor>::max();");
        } else {
            w.line("return nullptr;");
        }
        w.close("}");

        w.blank();
        w.line("// IncidenceGraph");
        w.line(format!("using out_edge_type = {};", self.stored_edge()));
        w.line("using out_edge_iterator = Impl::OutEdgeIter<");
        w.indented(|w| {
            w.line(format!("{}::iterator,", self.incidence_container("out_edge_type")));
            w.line(format!(
                "vertex_descriptor, edge_descriptor, {}>;",
                desc.difference_type
            ));
        });
        w.line(format!("using degree_size_type = {};", desc.degree_size_type));

        if self.has_in_edge_access() {
            w.blank();
            w.line("// BidirectionalGraph");
            if desc.is_undirected() {
                w.line("using in_edge_type = out_edge_type;");
            } else {
                w.line(format!("using in_edge_type = {};", self.stored_edge()));
            }
            w.line("using in_edge_iterator = Impl::InEdgeIter<");
            let list = if desc.is_undirected() { "out_edge_type" } else { "in_edge_type" };
            w.indented(|w| {
                w.line(format!("{}::iterator,", self.incidence_container(list)));
                w.line(format!(
                    "vertex_descriptor, edge_descriptor, {}>;",
                    desc.difference_type
                ));
            });
        }

        if desc.adjacency {
            w.blank();
            w.line("// AdjacencyGraph");
            w.line("using adjacency_iterator = boost::adjacency_iterator_generator<");
            w.indented(|w| w.line(format!("{name}, vertex_descriptor, out_edge_iterator>::type;")));
        }

        // Edge iteration without an edge list walks the vertices.
        w.blank();
        w.line("// VertexListGraph");
        if desc.is_vector() {
            w.line("using vertex_iterator = boost::integer_range<vertex_descriptor>::iterator;");
        } else {
            w.line(format!(
                "using vertex_iterator = Impl::VertexIter<{}::iterator, vertex_descriptor>;",
                self.vertex_list_container()
            ));
        }
        w.line(format!("using vertices_size_type = {};", desc.vertex_size_type));

        w.blank();
        w.line("// EdgeListGraph");
        if desc.need_edge_list() {
            w.line(format!(
                "using edge_type = Impl::ListEdge<vertex_descriptor, {}>;",
                self.edge_property()
            ));
            w.line(format!(
                "using edge_iterator = Impl::EdgeIter<{}::iterator, edge_descriptor, {}>;",
                self.edge_list_container(),
                desc.difference_type
            ));
        } else {
            w.line(format!(
                "using edge_iterator = Impl::DirectedEdgeIterator<vertex_iterator, out_edge_iterator, {name}>;"
            ));
        }
        w.line(format!("using edges_size_type = {};", desc.edge_size_type));

        if desc.is_reference() {
            w.blank();
            w.line("// ReferenceGraph");
            if desc.is_alias_graph() {
                w.line("using ownership_descriptor = edge_descriptor;");
                w.line("using child_iterator = out_edge_iterator;");
                w.line("using children_size_type = degree_size_type;");
                w.line("using parent_iterator = in_edge_iterator;");
            } else {
                w.line("using ownership_descriptor = Impl::EdgeDescriptor<boost::bidirectional_tag, vertex_descriptor>;");
                w.line("using children_edge_type = Impl::StoredEdge<vertex_descriptor>;");
                w.line("using child_iterator = Impl::OutEdgeIter<");
                w.indented(|w| {
                    w.line(format!("{}<children_edge_type>::iterator,", self.container("vector")));
                    w.line(format!(
                        "vertex_descriptor, ownership_descriptor, {}>;",
                        desc.difference_type
                    ));
                });
                w.line(format!("using children_size_type = {};", desc.degree_size_type));
                w.line("using parent_edge_type = Impl::StoredEdge<vertex_descriptor>;");
                w.line("using parent_iterator = Impl::InEdgeIter<");
                w.indented(|w| {
                    w.line(format!("{}<parent_edge_type>::iterator,", self.container("vector")));
                    w.line(format!(
                        "vertex_descriptor, ownership_descriptor, {}>;",
                        desc.difference_type
                    ));
                });
            }
        }

        if desc.is_polymorphic() {
            w.blank();
            w.line("// PolymorphicGraph");
            let tags: Vec<String> = desc
                .polymorphic
                .iter()
                .map(|p| self.spell(&p.tag, Site::Class))
                .collect();
            let values: Vec<String> = desc
                .polymorphic
                .iter()
                .map(|p| self.spell(&p.value, Site::Class))
                .collect();
            w.line(format!("using vertex_tag_type = std::variant<{}>;", tags.join(", ")));
            let pointers: Vec<String> = values.iter().map(|v| format!("{v}*")).collect();
            w.line(format!("using vertex_value_type = std::variant<{}>;", pointers.join(", ")));
            let pointers: Vec<String> = values.iter().map(|v| format!("const {v}*")).collect();
            w.line(format!(
                "using vertex_const_value_type = std::variant<{}>;",
                pointers.join(", ")
            ));
            w.line("using vertex_handle_type = std::variant<");
            w.indented(|w| {
                let last = desc.polymorphic.len() - 1;
                for (i, pair) in desc.polymorphic.iter().enumerate() {
                    let tail = if i == last { ">;" } else { "," };
                    w.line(format!("{}{tail}", self.handle_type(pair, Site::Class)));
                }
            });
        }

        if !desc.components.is_empty() {
            w.blank();
            w.line("// ComponentGraph");
            for c in &desc.components {
                w.line(format!(
                    "struct {n}Tag {{}} static constexpr {n}{{}}; // NOLINT",
                    n = c.name
                ));
            }
        }
    }

    /// Incidence list element per the edge list axis.
    fn stored_edge(&self) -> String {
        let desc = self.desc;
        if !desc.need_edge_list() {
            "Impl::StoredEdge<vertex_descriptor>".to_owned()
        } else if desc.is_edge_list_vector() {
            format!(
                "Impl::StoredEdgeWithRandomAccessEdgeIter<vertex_descriptor, {}>",
                self.edge_list_container()
            )
        } else {
            format!(
                "Impl::StoredEdgeWithEdgeIter<vertex_descriptor, {}::iterator, {}>",
                self.edge_list_container(),
                self.edge_property()
            )
        }
    }

    fn emit_accessors(&self, w: &mut CodeWriter) {
        let desc = self.desc;
        let node = |constness: &str, field: &str| {
            if desc.is_vector() {
                format!("return mVertices[v].{field};")
            } else {
                format!("return static_cast<{constness}vertex_type*>(v)->{field};")
            }
        };
        let mut lists = vec![("getOutEdgeList", "mOutEdges")];
        match desc.directedness {
            graphgen_core::syntax::Directedness::Bidirectional => {
                lists.push(("getInEdgeList", "mInEdges"));
            }
            graphgen_core::syntax::Directedness::Undirected => {
                lists.push(("getInEdgeList", "mOutEdges"));
            }
            graphgen_core::syntax::Directedness::Directed => {}
        }
        let mut sep = Separator::new();
        for (getter, field) in lists {
            sep.next(w);
            w.open(format!(
                "[[nodiscard]] const auto& {getter}(vertex_descriptor v) const noexcept {{"
            ));
            w.line(node("const ", field));
            w.close("}");
            w.open(format!("[[nodiscard]] auto& {getter}(vertex_descriptor v) noexcept {{"));
            w.line(node("", field));
            w.close("}");
        }
        if desc.need_reference_edges() {
            for (getter, field) in [("getChildrenList", "mChildren"), ("getParentsList", "mParents")] {
                sep.next(w);
                let access = |constness: &str| {
                    if desc.is_vector() {
                        format!("return mObjects[v].{field};")
                    } else {
                        node(constness, field)
                    }
                };
                w.open(format!(
                    "[[nodiscard]] const auto& {getter}(vertex_descriptor v) const noexcept {{"
                ));
                w.line(access("const "));
                w.close("}");
                w.open(format!("[[nodiscard]] auto& {getter}(vertex_descriptor v) noexcept {{"));
                w.line(access(""));
                w.close("}");
            }
        }
        if desc.is_vector() {
            sep.next(w);
            w.open("[[nodiscard]] boost::integer_range<vertex_descriptor> getVertexList() const noexcept {");
            w.line("return {0, static_cast<vertex_descriptor>(mVertices.size())};");
            w.close("}");
        }
    }

    fn emit_node_type(&self, w: &mut CodeWriter, name: &str, fields: &[Field]) {
        w.open(format!("struct {name} {{"));
        if self.pmr {
            w.line(format!("using allocator_type = {ALLOCATOR_TYPE};"));
            w.open("allocator_type get_allocator() const noexcept { // NOLINT");
            w.line(format!(
                "return {{{}.get_allocator().resource()}};",
                fields[0].name
            ));
            w.close("}");
            w.blank();
            w.line(format!("{name}(const allocator_type& alloc) noexcept; // NOLINT"));
            w.line(format!("{name}({name}&& rhs, const allocator_type& alloc);"));
            w.line(format!("{name}({name} const& rhs, const allocator_type& alloc);"));
            w.blank();
            w.line(format!("{name}({name}&& rhs) noexcept = default;"));
            w.line(format!("{name}({name} const& rhs) = delete;"));
            w.line(format!("{name}& operator=({name}&& rhs) = default;"));
            w.line(format!("{name}& operator=({name} const& rhs) = default;"));
            w.blank();
        }
        for field in fields {
            w.line(field.declaration());
        }
        w.close("};");
    }

    // ========================================================================
    // Source
    // ========================================================================

    pub(crate) fn emit_definitions(&self, w: &mut CodeWriter) -> Result<()> {
        let syntax = self.ctx.syntax;
        let q = &self.qualified;
        let name = self.name;
        let mut sep = Separator::new();
        if self.pmr {
            let fields = self.graph_fields();
            let custom = syntax.has_flag(self.v, GenerationFlags::CUSTOM_CNTR);
            if syntax.need_default_cntr(self.v) == ImplEnum::Separated && !custom {
                sep.next(w);
                let noexcept = if syntax.is_noexcept(self.v) { " noexcept" } else { "" };
                let signature = format!("{q}::{name}(const allocator_type& alloc){noexcept}");
                write_init_list(w, &signature, &alloc_entries(&fields));
            }
            if syntax.need_move_cntr(self.v) == ImplEnum::Separated {
                sep.next(w);
                let signature = format!("{q}::{name}({name}&& rhs, const allocator_type& alloc)");
                write_init_list(w, &signature, &transfer_entries(&fields, true));
            }
            if syntax.need_copy_cntr(self.v) == ImplEnum::Separated {
                sep.next(w);
                let signature = format!("{q}::{name}({name} const& rhs, const allocator_type& alloc)");
                write_init_list(w, &signature, &transfer_entries(&fields, false));
            }
        }

        if self.desc.is_vector() {
            sep.next(w);
            w.line("// ContinuousContainer");
            w.open(format!("void {q}::reserve(vertices_size_type sz) {{"));
            w.line("mVertices.reserve(sz);");
            if self.desc.need_reference_edges() {
                w.line("mObjects.reserve(sz);");
            }
            for c in &self.desc.components {
                w.line(format!("{}.reserve(sz);", c.member_name));
            }
            w.close("}");
        }

        if self.pmr {
            self.emit_node_definitions(w, &mut sep, "vertex_type", &self.vertex_fields());
            if self.desc.is_vector() && self.desc.need_reference_edges() {
                self.emit_node_definitions(w, &mut sep, "object_type", &self.object_fields());
            }
        }
        Ok(())
    }

    fn emit_node_definitions(&self, w: &mut CodeWriter, sep: &mut Separator, node: &str, fields: &[Field]) {
        let prefix = format!("{}::{node}::{node}", self.qualified);
        sep.next(w);
        write_init_list(
            w,
            &format!("{prefix}(const allocator_type& alloc) noexcept"),
            &alloc_entries(fields),
        );
        sep.next(w);
        write_init_list(
            w,
            &format!("{prefix}({node}&& rhs, const allocator_type& alloc)"),
            &transfer_entries(fields, true),
        );
        sep.next(w);
        write_init_list(
            w,
            &format!("{prefix}({node} const& rhs, const allocator_type& alloc)"),
            &transfer_entries(fields, false),
        );
    }
}
