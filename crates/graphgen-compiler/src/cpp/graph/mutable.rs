//! Edge and vertex mutation.
//!
//! Vector storage renumbers descriptors above an erased vertex in every
//! index that stores them: incidence lists, owner lists, path index and
//! vertex maps.

use graphgen_core::syntax::{OutEdgeListKind, Ownership, PolymorphicPair};

use super::{GraphEmitter, Site};
use crate::CodeWriter;

/// Overloads of `add_vertex`. Graphs without polymorphic values only get
/// [`AddVertex::Tagged`], which then takes no tag.
#[derive(Clone, Copy, PartialEq, Eq)]
enum AddVertex {
    /// Values forwarded, alternative picked by a `Tag` argument.
    Tagged,
    /// Values forwarded, alternative picked by the value type.
    Typed,
    /// Everything default constructed, alternative picked by `Tag`.
    Defaulted,
}

impl GraphEmitter<'_> {
    /// Removes every element of `list` whose target is `target`.
    fn erase_target(&self, w: &mut CodeWriter, list: &str, element: &str, target: &str) {
        let g = &self.qualified;
        if self.desc.out_edge_list.is_associative() {
            w.line(format!("{list}.erase({g}::{element}({target}));"));
        } else {
            w.line(format!(
                "{list}.erase(std::remove({list}.begin(), {list}.end(), {g}::{element}({target})), {list}.end());"
            ));
        }
    }

    fn insert(&self) -> &'static str {
        if self.desc.out_edge_list.is_associative() {
            "emplace"
        } else {
            "emplace_back"
        }
    }

    /// Erases the stored edge an incidence iterator refers to.
    fn erase_stored_edge(&self, w: &mut CodeWriter, iter: &str) {
        if self.desc.is_edge_list_vector() {
            w.line(format!("Impl::removeVectorEdge(g, {iter}->get_index());"));
        } else {
            w.line(format!("g.mEdges.erase({iter}->get_iter());"));
        }
    }

    // ========================================================================
    // Edges
    // ========================================================================

    pub(super) fn emit_mutable_edges(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// MutableGraph(Edge)");
        self.emit_add_edge(w);

        w.blank();
        w.open(format!(
            "inline void remove_edge({g}::vertex_descriptor u, {g}::vertex_descriptor v, {g}& g) noexcept {{ // NOLINT"
        ));
        if self.desc.need_edge_list() {
            w.line("auto& outEdgeList = g.getOutEdgeList(u);");
            w.open("for (auto iter = outEdgeList.begin(); iter != outEdgeList.end();) {");
            w.open("if (iter->get_target() == v) {");
            self.erase_stored_edge(w, "iter");
            w.line("iter = outEdgeList.erase(iter);");
            w.close("} else {");
            w.indented(|w| w.line("++iter;"));
            w.line("}");
            w.close("}");
        } else {
            w.line("auto& outEdgeList = g.getOutEdgeList(u);");
            self.erase_target(w, "outEdgeList", "out_edge_type", "v");
        }
        if self.has_in_edge_access() {
            w.line("auto& inEdgeList = g.getInEdgeList(v);");
            self.erase_target(w, "inEdgeList", "in_edge_type", "u");
        }
        w.close("}");

        w.blank();
        w.open(format!(
            "inline void remove_edge({g}::out_edge_iterator outIter, {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("auto e = *outIter;");
        w.line("const auto u = source(e, g);");
        w.line("const auto v = target(e, g);");
        if self.has_in_edge_access() {
            w.line("auto& inEdgeList = g.getInEdgeList(v);");
            w.line(format!(
                "auto inIter = std::find(inEdgeList.begin(), inEdgeList.end(), {g}::in_edge_type(u));"
            ));
            w.line("Expects(inIter != inEdgeList.end());");
            w.line("inEdgeList.erase(inIter);");
        }
        if self.desc.need_edge_list() {
            self.erase_stored_edge(w, "outIter.base()");
        }
        w.line("g.getOutEdgeList(u).erase(outIter.base());");
        w.close("}");

        w.blank();
        w.open(format!(
            "inline void remove_edge({g}::edge_descriptor e, {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("const auto u = source(e, g);");
        w.line("auto& outEdgeList = g.getOutEdgeList(u);");
        w.line(format!(
            "auto outIter = std::find(outEdgeList.begin(), outEdgeList.end(), {g}::out_edge_type(target(e, g)));"
        ));
        w.line("Expects(outIter != outEdgeList.end());");
        w.line(format!("remove_edge({g}::out_edge_iterator(outIter, u), g);"));
        w.close("}");

        self.emit_remove_if(w, "remove_out_edge_if", Some("u"), "out_edges(u, g)");
        if self.desc.has_in_edges() {
            self.emit_remove_if(w, "remove_in_edge_if", Some("v"), "in_edges(v, g)");
        }
        self.emit_remove_if(w, "remove_edge_if", None, "edges(g)");
        self.emit_clear(w);
    }

    fn emit_add_edge(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let desc = self.desc;
        let stored = desc.need_edge_list();
        let insert = self.insert();
        let unique = desc.out_edge_list == OutEdgeListKind::UniqueAssociative;

        w.blank();
        if stored {
            w.line("template <class... T>");
        }
        w.line(format!("inline std::pair<{g}::edge_descriptor, bool>"));
        w.line("add_edge( // NOLINT");
        w.indented(|w| {
            w.line(format!("{g}::vertex_descriptor u,"));
            if stored {
                w.line(format!("{g}::vertex_descriptor v, {g}& g, T&&... args) {{"));
            } else {
                w.line(format!("{g}::vertex_descriptor v, {g}& g) {{"));
            }
        });
        w.indent();
        w.line("auto& outEdgeList = g.getOutEdgeList(u);");
        if unique {
            w.open(format!(
                "if (outEdgeList.find({g}::out_edge_type(v)) != outEdgeList.end()) {{"
            ));
            w.line(format!(
                "return std::make_pair({}, false);",
                self.edge_descriptor("u", "v", "nullptr")
            ));
            w.close("}");
        }
        if !stored {
            w.line(format!("outEdgeList.{insert}(v);"));
            if desc.has_in_edges() {
                w.line("auto& inEdgeList = g.getInEdgeList(v);");
                w.line(format!("inEdgeList.{insert}(u);"));
            }
            w.line(format!(
                "return std::make_pair({}, true);",
                self.edge_descriptor("u", "v", "nullptr")
            ));
        } else {
            let link = if desc.is_edge_list_vector() {
                w.line(format!(
                    "auto edgeID = gsl::narrow_cast<{g}::edges_size_type>(g.mEdges.size());"
                ));
                w.line("g.mEdges.emplace_back(u, v, std::forward<T>(args)...);");
                w.line("auto* edgeProperty = &g.mEdges.back().get_property();");
                "edgeID, &g.mEdges"
            } else {
                w.line("auto edgeIter = g.mEdges.emplace(g.mEdges.end(), u, v, std::forward<T>(args)...);");
                w.line("auto* edgeProperty = &edgeIter->get_property();");
                "edgeIter"
            };
            w.line(format!("outEdgeList.{insert}(v, {link});"));
            if self.has_in_edge_access() {
                w.line("auto& inEdgeList = g.getInEdgeList(v);");
                w.line(format!("inEdgeList.{insert}(u, {link});"));
            }
            w.line(format!(
                "return std::make_pair({}, true);",
                self.edge_descriptor("u", "v", "edgeProperty")
            ));
        }
        w.close("}");
    }

    /// Collects matching edges first; removal invalidates the range.
    fn emit_remove_if(&self, w: &mut CodeWriter, name: &str, vertex: Option<&str>, range: &str) {
        let g = &self.qualified;
        w.blank();
        w.line("template <class Predicate>");
        match vertex {
            Some(v) => w.open(format!(
                "inline void {name}({g}::vertex_descriptor {v}, Predicate&& pred, {g}& g) noexcept {{ // NOLINT"
            )),
            None => w.open(format!(
                "inline void {name}(Predicate&& pred, {g}& g) noexcept {{ // NOLINT"
            )),
        }
        w.line(format!("std::vector<{g}::edge_descriptor> edges;"));
        w.line(format!("auto range = {range};"));
        w.open("for (auto iter = range.first; iter != range.second; ++iter) {");
        w.open("if (pred(*iter)) {");
        w.line("edges.emplace_back(*iter);");
        w.close("}");
        w.close("}");
        w.open("for (const auto& e : edges) {");
        w.line("remove_edge(e, g);");
        w.close("}");
        w.close("}");
    }

    fn emit_clear(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let desc = self.desc;
        let direct = desc.is_edge_list_not_needed();
        let clear_all = format!("[](const {g}::edge_descriptor& /*e*/) {{ return true; }}");

        w.blank();
        w.open(format!(
            "inline void clear_out_edges({g}::vertex_descriptor u, {g}& g) noexcept {{ // NOLINT"
        ));
        if direct && desc.has_in_edges() {
            w.line("auto& outEdgeList = g.getOutEdgeList(u);");
            w.open("for (const auto& edge : outEdgeList) {");
            w.line("auto& inEdgeList = g.getInEdgeList(edge.get_target());");
            self.erase_target(w, "inEdgeList", "in_edge_type", "u");
            w.close("}");
            w.line("outEdgeList.clear();");
        } else if direct && desc.is_directed_only() {
            w.line("g.getOutEdgeList(u).clear();");
        } else {
            w.line(format!("remove_out_edge_if(u, {clear_all}, g);"));
        }
        w.close("}");

        if desc.has_in_edges() {
            w.blank();
            w.open(format!(
                "inline void clear_in_edges({g}::vertex_descriptor u, {g}& g) noexcept {{ // NOLINT"
            ));
            if direct {
                w.line("auto& inEdgeList = g.getInEdgeList(u);");
                w.open("for (const auto& edge : inEdgeList) {");
                w.line("auto& outEdgeList = g.getOutEdgeList(edge.get_target());");
                self.erase_target(w, "outEdgeList", "out_edge_type", "u");
                w.close("}");
                w.line("inEdgeList.clear();");
            } else {
                w.line(format!("remove_in_edge_if(u, {clear_all}, g);"));
            }
            w.close("}");
        }

        w.blank();
        w.open(format!(
            "inline void clear_vertex({g}::vertex_descriptor u, {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("clear_out_edges(u, g);");
        if desc.has_in_edges() {
            w.line("clear_in_edges(u, g);");
        }
        w.close("}");
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    pub(super) fn emit_mutable_vertices(&self, w: &mut CodeWriter) {
        w.blank();
        w.line("// MutableGraph(Vertex)");
        self.emit_remove_vertex(w);
        self.emit_add_vertex(w, AddVertex::Tagged);
        if self.desc.is_polymorphic() {
            self.emit_add_vertex(w, AddVertex::Typed);
            self.emit_add_vertex(w, AddVertex::Defaulted);
        }
    }

    fn emit_remove_vertex(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let desc = self.desc;
        w.open(format!(
            "inline void remove_vertex({g}::vertex_descriptor u, {g}& g) noexcept {{ // NOLINT"
        ));
        for map in &desc.vertex_maps {
            let key = self.vertex_map_key(map, "g", "[u]");
            w.line("// UuidGraph");
            w.open("{");
            w.line(format!("auto num = g.{}.erase({key});", map.member_name));
            w.line("Ensures(num == 1);");
            w.open(format!("for (auto&& pair : g.{}) {{", map.member_name));
            w.line("auto& v = pair.second;");
            w.open("if (v > u) {");
            w.line("--v;");
            w.close("}");
            w.close("}");
            w.close("}");
        }
        if desc.is_addressable() {
            w.line("// AddressableGraph");
            w.line("remove_path_impl(u, g);");
            w.line("Expects(num_children(u, g) == 0);");
        }
        if desc.need_reference_edges() {
            w.line("// ReferenceGraph");
            for (list, other, element) in [
                ("getParentsList", "getChildrenList", "children_edge_type"),
                ("getChildrenList", "getParentsList", "parent_edge_type"),
            ] {
                w.open(format!("for (const auto& edge : g.{list}(u)) {{"));
                w.line(format!("auto& list = g.{other}(edge.get_target());"));
                w.line(format!(
                    "list.erase(std::remove(list.begin(), list.end(), {g}::{element}(u)), list.end());"
                ));
                w.close("}");
            }
        }
        if desc.is_polymorphic() {
            w.line("// PolymorphicGraph");
            w.line(format!(
                "remove_polymorphic_value_impl({}.mHandle, g);",
                self.vertex_of("u")
            ));
        }
        w.line("clear_vertex(u, g);");
        if desc.is_vector() {
            w.line(format!("Impl::removeVectorVertex(g, u, {g}::directed_category{{}});"));
            if desc.need_reference_edges() {
                w.line("Impl::removeVectorOwner(g, u);");
            }
            if !desc.components.is_empty() {
                w.line("// ComponentGraph");
                for c in &desc.components {
                    w.line(format!(
                        "g.{m}.erase(g.{m}.begin() + std::ptrdiff_t(u));",
                        m = c.member_name
                    ));
                }
            }
        } else {
            w.line(format!("g.mVertices.erase({}.mPosition);", self.vertex_of("u")));
        }
        w.close("}");
    }

    /// Key of `map` read from component storage of graph `g` at `index`.
    pub(super) fn vertex_map_key(
        &self,
        map: &graphgen_core::syntax::VertexMap,
        g: &str,
        index: &str,
    ) -> String {
        let component = self
            .desc
            .component(&map.component_name)
            .map_or("", |c| c.member_name.as_str());
        if map.component_member_name.is_empty() {
            format!("{g}.{component}{index}")
        } else {
            format!("{g}.{component}{index}.{}", map.component_member_name)
        }
    }

    fn emit_add_vertex(&self, w: &mut CodeWriter, form: AddVertex) {
        let g = &self.qualified;
        let desc = self.desc;
        let forwarded = form != AddVertex::Defaulted;
        let tagged = desc.is_polymorphic() && form != AddVertex::Typed;
        let mut templates = Vec::new();
        let mut params = vec![format!("{g}& g")];
        if tagged {
            templates.push("class Tag".to_owned());
            params.push("Tag /*tag*/".to_owned());
        }
        if forwarded {
            if desc.has_vertex_property() {
                templates.push("class VertexProperty".to_owned());
                params.push("VertexProperty&& p".to_owned());
            }
            for (i, _) in desc.components.iter().enumerate() {
                templates.push(format!("class Component{i}"));
                params.push(format!("Component{i}&& c{i}"));
            }
            if desc.is_polymorphic() {
                templates.push("class ValueT".to_owned());
                params.push("ValueT&& val".to_owned());
            }
        }
        if desc.is_reference() {
            params.push(format!("{g}::vertex_descriptor u = {g}::null_vertex()"));
        }

        w.blank();
        if !templates.is_empty() {
            w.line(format!("template <{}>", templates.join(", ")));
        }
        if form == AddVertex::Typed {
            let alternatives: Vec<String> = desc
                .polymorphic
                .iter()
                .map(|pair| self.is_value_type_of(pair))
                .collect();
            w.line(format!("    requires({})", alternatives.join(" || ")));
        }
        w.line(format!("inline {g}::vertex_descriptor"));
        w.open(format!("add_vertex({}) {{", params.join(", ")));
        if desc.is_vector() {
            w.line(format!("auto v = {};", self.narrow("g.mVertices.size()")));
            if desc.need_reference_edges() {
                w.line("g.mObjects.emplace_back();");
            }
            w.line("g.mVertices.emplace_back();");
            w.line("auto& vert = g.mVertices.back();");
        } else {
            w.line("auto iter = g.mVertices.emplace(g.mVertices.end());");
            w.line("auto& vert = *iter;");
            w.line("vert.mPosition = iter;");
            w.line(format!("auto v = static_cast<{g}::vertex_descriptor>(&vert);"));
        }
        if forwarded && desc.has_vertex_property() {
            w.line("vert.mProperty = std::forward<VertexProperty>(p);");
        }
        for (i, c) in desc.components.iter().enumerate() {
            let arg = if forwarded {
                format!("std::forward<Component{i}>(c{i})")
            } else {
                String::new()
            };
            w.line(format!("g.{}.emplace_back({arg});", c.member_name));
        }
        if desc.is_polymorphic() {
            w.line("// PolymorphicGraph");
            let val = if forwarded { "std::forward<ValueT>(val)" } else { "" };
            for (i, pair) in desc.polymorphic.iter().enumerate() {
                let test = if form == AddVertex::Typed {
                    self.is_value_type_of(pair)
                } else {
                    format!("std::is_same_v<Tag, {}>", self.spell(&pair.tag, Site::Namespace))
                };
                let head = format!("if constexpr ({test}) {{");
                if i == 0 {
                    w.open(head);
                } else {
                    w.close(format!("}} else {head}"));
                    w.indent();
                }
                let handle = self.handle_type(pair, Site::Namespace);
                let m = &pair.member_name;
                if !pair.is_stored() {
                    w.line(format!("vert.mHandle = {handle}{{{val}}};"));
                } else if pair.is_vector() {
                    w.line(format!(
                        "vert.mHandle = {handle}{{{}}};",
                        self.narrow(&format!("g.{m}.size()"))
                    ));
                    w.line(format!("g.{m}.emplace_back({val});"));
                } else {
                    let tail = if forwarded { format!(", {val}") } else { String::new() };
                    w.line(format!(
                        "vert.mHandle = {handle}{{g.{m}.emplace(g.{m}.end(){tail})}};"
                    ));
                }
            }
            let missing = if form == AddVertex::Typed { "ValueT" } else { "Tag" };
            self.static_assert_branch(w, &format!("{missing} is not in {}", self.name));
        }
        for map in &desc.vertex_maps {
            w.line("// UuidGraph");
            w.open("{");
            w.line(format!(
                "auto res = g.{}.emplace({}, v);",
                map.member_name,
                self.vertex_map_key(map, "g", ".back()")
            ));
            w.line("Ensures(res.second);");
            w.close("}");
        }
        if desc.is_addressable() {
            w.line("// AddressableGraph");
            w.line("add_path_impl(u, v, g);");
        } else if desc.is_reference() {
            w.open(format!("if (u != {g}::null_vertex()) {{"));
            match desc.ownership {
                Ownership::Alias => w.line("add_edge(u, v, g);"),
                _ => {
                    w.line("g.getChildrenList(u).emplace_back(v);");
                    w.line("g.getParentsList(v).emplace_back(u);");
                }
            }
            w.close("}");
        }
        w.line("return v;");
        w.close("}");
    }

    fn is_value_type_of(&self, pair: &PolymorphicPair) -> String {
        format!(
            "std::is_same_v<std::remove_cvref_t<ValueT>, {}>",
            self.spell(&pair.value, Site::Namespace)
        )
    }

    /// Closes an `if constexpr` chain with a dependent `static_assert`.
    pub(super) fn static_assert_branch(&self, w: &mut CodeWriter, message: &str) {
        w.close("} else {");
        w.indent();
        w.open("[]<bool flag = false>() {");
        w.line(format!("static_assert(flag, \"{message}\");"));
        w.close("}");
        w.line("();");
        w.close("}");
    }
}
