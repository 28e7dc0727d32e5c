//! Ownership relation and path addressing.

use super::GraphEmitter;
use crate::CodeWriter;

impl GraphEmitter<'_> {
    pub(super) fn emit_reference(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let alias = self.desc.is_alias_graph();
        w.blank();
        w.line("// ReferenceGraph");
        for (name, field) in [("parent", "source"), ("child", "target")] {
            w.line(format!("inline {g}::vertex_descriptor"));
            w.open(format!(
                "{name}(const {g}::ownership_descriptor& e, const {g}& /*g*/) noexcept {{"
            ));
            w.line(format!("return e.{field};"));
            w.close("}");
            w.blank();
        }

        let relations = [
            ("children", "child_iterator", "getChildrenList", "out_edges"),
            ("parents", "parent_iterator", "getParentsList", "in_edges"),
        ];
        for (name, iterator, getter, edges) in relations {
            w.line(format!("inline std::pair<{g}::{iterator}, {g}::{iterator}>"));
            w.open(format!(
                "{name}({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
            ));
            if alias {
                w.line(format!("return {edges}(u, g);"));
            } else {
                w.line("return std::make_pair(");
                w.indented(|w| {
                    w.line(format!(
                        "{g}::{iterator}(const_cast<{g}&>(g).{getter}(u).begin(), u),"
                    ));
                    w.line(format!(
                        "{g}::{iterator}(const_cast<{g}&>(g).{getter}(u).end(), u));"
                    ));
                });
            }
            w.close("}");
            w.blank();
        }
        for (name, getter, degree) in [
            ("num_children", "getChildrenList", "out_degree"),
            ("num_parents", "getParentsList", "in_degree"),
        ] {
            w.line(format!("inline {g}::children_size_type"));
            w.open(format!(
                "{name}({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
            ));
            if alias {
                w.line(format!("return {degree}(u, g);"));
            } else {
                w.line(format!(
                    "return gsl::narrow_cast<{g}::children_size_type>(g.{getter}(u).size());"
                ));
            }
            w.close("}");
            w.blank();
        }

        w.line(format!("inline std::pair<{g}::ownership_descriptor, bool>"));
        w.open(format!(
            "reference({g}::vertex_descriptor u, {g}::vertex_descriptor v, const {g}& g) noexcept {{"
        ));
        if alias {
            w.line("return edge(u, v, g);");
        } else {
            w.line("const auto& children = g.getChildrenList(u);");
            w.line(format!(
                "auto iter = std::find(children.begin(), children.end(), {g}::children_edge_type(v));"
            ));
            w.line("bool hasEdge = (iter != children.end());");
            w.line(format!("return {{{g}::ownership_descriptor(u, v), hasEdge}};"));
        }
        w.close("}");

        w.blank();
        w.line(format!("inline {g}::vertex_descriptor"));
        w.open(format!(
            "parent({g}::vertex_descriptor u, const {g}& g) noexcept {{"
        ));
        w.line("auto r = parents(u, g);");
        w.open("if (r.first == r.second) {");
        w.line(format!("return {g}::null_vertex();"));
        w.close("}");
        w.line("return parent(*r.first, g);");
        w.close("}");

        w.blank();
        w.line("inline bool");
        w.open(format!(
            "ancestor({g}::vertex_descriptor u, {g}::vertex_descriptor v, const {g}& g) noexcept {{"
        ));
        w.line("Expects(u != v);");
        w.line("bool isAncestor = false;");
        w.line("auto r = parents(v, g);");
        w.open("while (r.first != r.second) {");
        w.line("v = parent(*r.first, g);");
        w.open("if (u == v) {");
        w.line("isAncestor = true;");
        w.line("break;");
        w.close("}");
        w.line("r = parents(v, g);");
        w.close("}");
        w.line("return isAncestor;");
        w.close("}");

        if self.desc.is_mutable_reference() {
            self.emit_mutable_reference(w);
        }
    }

    fn emit_mutable_reference(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let alias = self.desc.is_alias_graph();
        w.blank();
        w.line("// MutableReferenceGraph");
        w.line(format!("inline std::pair<{g}::ownership_descriptor, bool>"));
        w.open(format!(
            "add_reference({g}::vertex_descriptor u, {g}::vertex_descriptor v, {g}& g) {{ // NOLINT"
        ));
        if alias {
            w.line("return add_edge(u, v, g);");
        } else {
            w.line("g.getChildrenList(u).emplace_back(v);");
            w.line("g.getParentsList(v).emplace_back(u);");
            w.line(format!("return std::make_pair({g}::ownership_descriptor(u, v), true);"));
        }
        w.close("}");

        w.blank();
        w.open(format!(
            "inline void remove_reference({g}::vertex_descriptor u, {g}::vertex_descriptor v, {g}& g) noexcept {{ // NOLINT"
        ));
        if alias {
            w.line("remove_edge(u, v, g);");
        } else {
            w.line("auto& children = g.getChildrenList(u);");
            w.line(format!(
                "children.erase(std::remove(children.begin(), children.end(), {g}::children_edge_type(v)), children.end());"
            ));
            w.line("auto& parents = g.getParentsList(v);");
            w.line(format!(
                "parents.erase(std::remove(parents.begin(), parents.end(), {g}::parent_edge_type(u)), parents.end());"
            ));
        }
        w.close("}");

        w.blank();
        w.open(format!(
            "inline void remove_reference({g}::ownership_descriptor e, {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("remove_reference(e.source, e.target, g);");
        w.close("}");
    }

    // ========================================================================
    // Paths
    // ========================================================================

    pub(super) fn emit_addressable(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let view = self.path_view();
        let ch = self.path_char();
        let index = self.path_index();
        let owned = if ch == "char" { "std::string" } else { "std::u8string" };
        let basic = format!("std::basic_string<{ch}, std::char_traits<{ch}>, Allocator>");

        w.blank();
        w.line("// AddressableGraph");
        w.line("inline std::ptrdiff_t");
        w.open(format!(
            "path_length({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("return Impl::pathLength(u, g);");
        w.close("}");

        w.blank();
        w.line("template <class Allocator>");
        w.line("inline void");
        w.line("path_composite( // NOLINT");
        w.indented(|w| {
            w.line(format!("{basic}& str,"));
            w.line(format!("std::ptrdiff_t& sz, {g}::vertex_descriptor u,"));
            w.line(format!("const {g}& g) noexcept {{"));
        });
        w.indent();
        w.line("Impl::pathComposite(str, sz, u, g);");
        w.close("}");

        w.blank();
        w.line("template <class Allocator>");
        w.line("inline void");
        w.line("get_path( // NOLINT");
        w.indented(|w| {
            w.line(format!("{g}::vertex_descriptor u0, const {g}& g,"));
            w.line(format!("{basic}& output,"));
            w.line(format!("{g}::vertex_descriptor parent = {g}::null_vertex()) {{"));
        });
        w.indent();
        w.line("output.clear();");
        w.line("auto sz = Impl::pathLength(u0, g, parent);");
        w.line("output.resize(sz);");
        w.line("Impl::pathComposite(output, sz, u0, g, parent);");
        w.line("Ensures(sz == 0);");
        w.close("}");

        w.blank();
        w.line(format!("inline {owned}"));
        w.open(format!(
            "get_path({g}::vertex_descriptor u0, const {g}& g, {g}::vertex_descriptor parent = {g}::null_vertex()) {{ // NOLINT"
        ));
        w.line(format!("{owned} output;"));
        w.line("get_path(u0, g, output, parent);");
        w.line("return output;");
        w.close("}");

        w.blank();
        w.line(format!("inline {owned}"));
        w.open(format!(
            "get_path({g}::vertex_descriptor parent, {view} name, const {g}& g) {{ // NOLINT"
        ));
        w.line(format!("{owned} output;"));
        w.line("auto sz = path_length(parent, g);");
        w.line("output.resize(sz + name.size() + 1);");
        w.line("output[sz] = '/';");
        w.line("std::copy(name.begin(), name.end(), output.begin() + sz + 1);");
        w.line("path_composite(output, sz, parent, g);");
        w.line("Ensures(sz == 0);");
        w.line("return output;");
        w.close("}");

        w.blank();
        w.line(format!("inline {g}::vertex_descriptor"));
        w.open(format!("locate({view} absolute, const {g}& g) noexcept {{"));
        w.line(format!("auto iter = g.{index}.find(absolute);"));
        w.open(format!("if (iter != g.{index}.end()) {{"));
        w.line("return iter->second;");
        w.close("}");
        w.line(format!("return {g}::null_vertex();"));
        w.close("}");

        w.blank();
        w.line(format!("inline {g}::vertex_descriptor"));
        w.open(format!(
            "locate({g}::vertex_descriptor u, {view} relative, const {g}& g) {{"
        ));
        w.line("Expects(!relative.starts_with('/'));");
        w.line("Expects(!relative.ends_with('/'));");
        w.line("auto key = get_path(u, relative, g);");
        w.line("Impl::cleanPath(key);");
        w.line("return locate(key, g);");
        w.close("}");

        w.blank();
        w.line("inline bool");
        w.open(format!("contains({view} absolute, const {g}& g) noexcept {{"));
        w.line(format!("return locate(absolute, g) != {g}::null_vertex();"));
        w.close("}");

        if self.desc.is_polymorphic() {
            for constness in ["", "const "] {
                w.blank();
                w.line("template <class ValueT>");
                w.line(format!("[[nodiscard]] inline {constness}ValueT&"));
                w.open(format!("get({view} pt, {constness}{g}& g) {{"));
                w.line("auto v = locate(pt, g);");
                w.open(format!("if (v == {g}::null_vertex()) {{"));
                w.line(format!("throw std::out_of_range(\"at {}\");", self.name));
                w.close("}");
                w.line("return get<ValueT>(v, g);");
                w.close("}");
            }
            for constness in ["", "const "] {
                w.blank();
                w.line("template <class ValueT>");
                w.line(format!("[[nodiscard]] inline {constness}ValueT*"));
                w.open(format!(
                    "get_if({view} pt, {constness}{g}* pGraph) noexcept {{ // NOLINT"
                ));
                w.open("if (pGraph) {");
                w.line("auto v = locate(pt, *pGraph);");
                w.open(format!("if (v != {g}::null_vertex()) {{"));
                w.line("return get_if<ValueT>(v, pGraph);");
                w.close("}");
                w.close("}");
                w.line("return nullptr;");
                w.close("}");
            }
        }

        if !self.desc.mutable_graph {
            return;
        }
        w.blank();
        w.open(format!(
            "inline void add_path_impl({g}::vertex_descriptor u, {g}::vertex_descriptor v, {g}& g) {{ // NOLINT"
        ));
        w.line("// add to parent");
        w.open(format!("if (u != {g}::null_vertex()) {{"));
        if self.desc.is_alias_graph() {
            w.line("add_edge(u, v, g);");
        } else {
            w.line("g.getChildrenList(u).emplace_back(v);");
            w.line("g.getParentsList(v).emplace_back(u);");
        }
        w.close("}");
        w.blank();
        w.line("// add to external path index");
        w.line("auto pathName = get_path(v, g);");
        w.line(format!("auto res = g.{index}.emplace(std::move(pathName), v);"));
        w.line("Ensures(res.second);");
        w.close("}");

        w.blank();
        w.open(format!(
            "inline void remove_path_impl({g}::vertex_descriptor u, {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("auto pathName = get_path(u, g);");
        w.line(format!("auto iter = g.{index}.find({view}(pathName));"));
        w.line(format!("Expects(iter != g.{index}.end());"));
        w.line(format!("g.{index}.erase(iter);"));
        if self.desc.is_vector() {
            w.open(format!("for (auto&& nvp : g.{index}) {{"));
            w.line("auto& v = nvp.second;");
            w.open("if (v > u) {");
            w.line("--v;");
            w.close("}");
            w.close("}");
        }
        w.close("}");
    }
}
