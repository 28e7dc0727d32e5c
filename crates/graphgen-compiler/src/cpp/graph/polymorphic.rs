//! Accessors of polymorphic vertices.
//!
//! Each vertex holds a `vertex_handle_type` variant; a handle is an index
//! (vector storage), an iterator (list storage) or the value itself.

use graphgen_core::syntax::PolymorphicPair;

use super::{GraphEmitter, Site};
use crate::CodeWriter;

impl GraphEmitter<'_> {
    fn pairs(&self) -> &[PolymorphicPair] {
        &self.desc.polymorphic
    }

    /// `std::visit(Impl::overload(...), handle)` with one lambda per pair.
    fn visit(
        &self,
        w: &mut CodeWriter,
        lead: &str,
        handle: &str,
        constness: &str,
        body: impl Fn(&PolymorphicPair) -> String,
    ) {
        w.line(format!("{lead}std::visit("));
        w.indented(|w| {
            w.line("Impl::overload(");
            w.indented(|w| {
                let last = self.pairs().len() - 1;
                for (i, pair) in self.pairs().iter().enumerate() {
                    let ty = self.handle_type(pair, Site::Namespace);
                    let text = body(pair);
                    let h = if text.contains("h.") { "h" } else { "/*h*/" };
                    w.open(format!("[&]({constness}{ty}& {h}) {{"));
                    if !text.is_empty() {
                        w.text(&text);
                    }
                    w.close(if i == last { "})," } else { "}," });
                }
            });
            w.line(format!("{handle});"));
        });
    }

    /// `if constexpr` chain over pairs matching `Tag` or `ValueT`.
    fn dispatch(
        &self,
        w: &mut CodeWriter,
        param: &str,
        by_tag: bool,
        body: impl Fn(&mut CodeWriter, &PolymorphicPair),
    ) {
        for (i, pair) in self.pairs().iter().enumerate() {
            let path = if by_tag { &pair.tag } else { &pair.value };
            let ty = self.spell(path, Site::Namespace);
            let head = format!("if constexpr (std::is_same_v<std::remove_cvref_t<{param}>, {ty}>) {{");
            if i == 0 {
                w.open(head);
            } else {
                w.close(format!("}} else {head}"));
                w.indent();
            }
            body(w, pair);
        }
        let what = if by_tag { "Tag" } else { "Value type" };
        self.static_assert_branch(w, &format!("{what} is not in {}", self.name));
    }

    pub(super) fn emit_polymorphic(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let handle = format!("{}.mHandle", self.vertex_of("u"));
        w.blank();
        w.line("// PolymorphicGraph");

        if self.desc.is_vector() && self.pairs().iter().any(|p| p.is_stored() && p.is_vector()) {
            w.line(format!("[[nodiscard]] inline {g}::vertices_size_type"));
            w.open(format!(
                "value_id({g}::vertex_descriptor u, const {g}& g) noexcept {{"
            ));
            self.visit(w, "return ", &handle, "const ", |pair| {
                if pair.is_stored() && pair.is_vector() {
                    "return h.mValue;".to_owned()
                } else {
                    format!("return {g}::null_vertex();")
                }
            });
            w.close("}");
            w.blank();
        }

        w.line(format!("[[nodiscard]] inline {g}::vertex_tag_type"));
        w.open(format!("tag({g}::vertex_descriptor u, const {g}& g) noexcept {{"));
        self.visit(w, "return ", &handle, "const ", |pair| {
            format!(
                "return {g}::vertex_tag_type{{{}{{}}}};",
                self.spell(&pair.tag, Site::Namespace)
            )
        });
        w.close("}");

        for (constness, ty) in [("", "vertex_value_type"), ("const ", "vertex_const_value_type")] {
            w.blank();
            w.line(format!("[[nodiscard]] inline {g}::{ty}"));
            w.open(format!(
                "value({g}::vertex_descriptor u, {constness}{g}& g) noexcept {{"
            ));
            self.visit(w, "return ", &handle, constness, |pair| {
                format!("return {g}::{ty}{{&{}}};", self.handle_value(pair, "h."))
            });
            w.close("}");
        }

        for (name, param, by_tag) in [("holds_tag", "Tag", true), ("holds_alternative", "ValueT", false)] {
            w.blank();
            w.line(format!("template <class {param}>"));
            w.line("[[nodiscard]] inline bool");
            w.open(format!(
                "{name}({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
            ));
            self.dispatch(w, param, by_tag, |w, pair| {
                w.line("return std::holds_alternative<");
                w.indented(|w| {
                    w.line(format!("{}>(", self.handle_type(pair, Site::Namespace)));
                    w.line(format!("{handle});"));
                });
            });
            w.line("return false;");
            w.close("}");
        }

        for (name, param, by_tag) in [("get", "ValueT", false), ("get_by_tag", "Tag", true)] {
            for constness in ["", "const "] {
                w.blank();
                w.line(format!("template <class {param}>"));
                let result = if by_tag { "decltype(auto)".to_owned() } else { format!("{constness}ValueT&") };
                w.line(format!("[[nodiscard]] inline {result}"));
                w.open(format!(
                    "{name}({g}::vertex_descriptor u, {constness}{g}& g) {{"
                ));
                self.dispatch(w, param, by_tag, |w, pair| {
                    w.line(format!(
                        "auto& h = std::get<{}>(",
                        self.handle_type(pair, Site::Namespace)
                    ));
                    w.indented(|w| w.line(format!("{handle});")));
                    if by_tag {
                        w.line(format!("return ({});", self.handle_value(pair, "h.")));
                    } else {
                        w.line(format!("return {};", self.handle_value(pair, "h.")));
                    }
                });
                w.close("}");
            }
        }

        for constness in ["", "const "] {
            w.blank();
            w.line("template <class ValueT>");
            w.line(format!("[[nodiscard]] inline {constness}ValueT*"));
            w.open(format!(
                "get_if({g}::vertex_descriptor u, {constness}{g}* pGraph) noexcept {{ // NOLINT"
            ));
            w.line(format!("{constness}ValueT* ptr = nullptr;"));
            w.open("if (!pGraph) {");
            w.line("return ptr;");
            w.close("}");
            w.line("auto& g = *pGraph;");
            self.dispatch(w, "ValueT", false, |w, pair| {
                w.line(format!(
                    "auto* pHandle = std::get_if<{}>(",
                    self.handle_type(pair, Site::Namespace)
                ));
                w.indented(|w| w.line(format!("&{handle});")));
                w.open("if (pHandle) {");
                w.line(format!("ptr = &{};", self.handle_value(pair, "pHandle->")));
                w.close("}");
            });
            w.line("return ptr;");
            w.close("}");
        }

        w.blank();
        w.line("template <class... Ts>");
        w.open(format!(
            "inline auto visit_vertex({g}::vertex_descriptor u, {g}& g, Ts&&... args) {{"
        ));
        self.visit(w, "return ", &handle, "", |pair| {
            format!(
                "return Impl::overload(std::forward<Ts>(args)...)({});",
                self.handle_value(pair, "h.")
            )
        });
        w.close("}");

        if self.desc.mutable_graph {
            self.emit_remove_polymorphic_value(w);
        }
    }

    fn emit_remove_polymorphic_value(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.open(format!(
            "inline void remove_polymorphic_value_impl(const {g}::vertex_handle_type& handle, {g}& g) noexcept {{ // NOLINT"
        ));
        self.visit(w, "", "handle", "const ", |pair| {
            let m = &pair.member_name;
            if !pair.is_stored() {
                String::new()
            } else if pair.is_vector() {
                let tag = self.spell(&pair.tag, Site::Namespace);
                format!(
                    "g.{m}.erase(g.{m}.begin() + std::ptrdiff_t(h.mValue));\nImpl::reindexVectorHandle<{tag}>(g.mVertices, h.mValue);"
                )
            } else {
                format!("g.{m}.erase(h.mValue);")
            }
        });
        w.close("}");
    }
}
