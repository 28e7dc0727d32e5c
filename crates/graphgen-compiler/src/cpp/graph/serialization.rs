//! Graph `save`/`load`.
//!
//! A vertex is written as its polymorphic alternative index, vertex
//! property, components, parent and polymorphic value; loading replays
//! `add_vertex` in index order, so parents are always loaded first. Alias
//! graphs keep no edge list of their own: their edges are the ownership
//! relation.

use graphgen_core::naming::get_tag_variable_name;

use super::{GraphEmitter, Site};
use crate::CodeWriter;
use crate::cpp::DEFAULT_RESOURCE;
use crate::cpp::serialization::is_serialized;

impl GraphEmitter<'_> {
    fn saves_edges(&self) -> bool {
        !self.desc.is_alias_graph()
    }

    /// Declaration of a default value of `path` named `var`.
    fn local_value(&self, path: &str, var: &str) -> String {
        let ty = self.spell(path, Site::Namespace);
        if !self.is_pmr_path(path) {
            format!("{ty} {var}{{}};")
        } else if self.pmr {
            format!("{ty} {var}(g.get_allocator());")
        } else {
            format!("{ty} {var}({DEFAULT_RESOURCE});")
        }
    }

    fn emit_size_types(&self, w: &mut CodeWriter) {
        w.line(format!("using Graph = {};", self.qualified));
        w.line("using VertexT = Graph::vertex_descriptor;");
        w.line("using SizeT = Graph::vertices_size_type;");
        w.line("static_assert(std::is_same_v<SizeT, VertexT>);");
    }

    /// `save` and `load` of one graph. Loading replays `add_vertex`, so only
    /// mutable graphs with vector storage are serialized.
    pub(crate) fn emit_serialization(&self, w: &mut CodeWriter) {
        if !self.desc.is_vector() {
            w.line(format!("// skip, {}: list storage", self.name));
            return;
        }
        if !self.desc.mutable_graph {
            w.line(format!("// skip, {}: immutable graph", self.name));
            return;
        }
        self.emit_save(w);
        w.blank();
        self.emit_load(w);
    }

    fn emit_save(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let desc = self.desc;
        w.open(format!("inline void save(OutputArchive& ar, const {g}& g) {{"));
        self.emit_size_types(w);
        w.line("const auto numVertices = gsl::narrow_cast<SizeT>(g.mVertices.size());");
        w.line("save(ar, numVertices);");
        if self.saves_edges() {
            w.line("const auto numEdges = gsl::narrow_cast<SizeT>(num_edges(g));");
            w.line("save(ar, numEdges);");
        }

        w.blank();
        w.open("for (VertexT v = 0; v != numVertices; ++v) {");
        if desc.is_polymorphic() {
            w.line("save(ar, static_cast<SizeT>(tag(v, g).index()));");
        }
        if desc.has_vertex_property() {
            w.line("save(ar, get(boost::vertex_bundle, g, v));");
        }
        for c in &desc.components {
            w.line(format!("save(ar, get({g}::{}Tag{{}}, g, v));", c.name));
        }
        if desc.is_reference() {
            w.line("save(ar, parent(v, g));");
        }
        if desc.is_polymorphic() {
            w.line("visit_vertex(");
            w.indented(|w| {
                w.line("v, const_cast<Graph&>(g),");
                w.line("[&](const auto& object) {");
                w.indented(|w| w.line("save(ar, object);"));
                w.line("});");
            });
        }
        w.close("}");

        if self.saves_edges() {
            w.blank();
            w.open("for (auto [iter, end] = edges(g); iter != end; ++iter) {");
            w.line("save(ar, source(*iter, g));");
            w.line("save(ar, target(*iter, g));");
            if desc.has_edge_property() {
                w.line("save(ar, get(boost::edge_bundle, g, *iter));");
            }
            w.close("}");
        }

        let members: Vec<&str> = self
            .composition
            .members
            .iter()
            .filter(|m| is_serialized(m))
            .map(|m| m.member_name.as_str())
            .collect();
        if !members.is_empty() {
            w.blank();
            for m in members {
                w.line(format!("save(ar, g.{m});"));
            }
        }
        w.close("}");
    }

    fn emit_load(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        let desc = self.desc;
        w.open(format!("inline void load(InputArchive& ar, {g}& g) {{"));
        self.emit_size_types(w);
        w.line("SizeT numVertices = 0;");
        w.line("load(ar, numVertices);");
        if self.saves_edges() {
            w.line("SizeT numEdges = 0;");
            w.line("load(ar, numEdges);");
        }
        w.line("g.reserve(numVertices);");

        w.blank();
        w.open("for (SizeT i = 0; i != numVertices; ++i) {");
        let mut args = Vec::new();
        if desc.is_polymorphic() {
            w.line("auto id = std::numeric_limits<SizeT>::max();");
            w.line("load(ar, id);");
        }
        if desc.has_vertex_property() {
            w.line(self.local_value(&desc.vertex_property, "property"));
            w.line("load(ar, property);");
            args.push("std::move(property)".to_owned());
        }
        for c in &desc.components {
            let var = get_tag_variable_name(&c.name);
            w.line(self.local_value(&c.value_path, &var));
            w.line(format!("load(ar, {var});"));
            args.push(format!("std::move({var})"));
        }
        if desc.is_reference() {
            w.line("auto u = Graph::null_vertex();");
            w.line("load(ar, u);");
        }
        let tail = if desc.is_reference() { ", u" } else { "" };

        if desc.is_polymorphic() {
            w.open("switch (id) {");
            for (i, pair) in desc.polymorphic.iter().enumerate() {
                let tag = self.spell(&pair.tag, Site::Namespace);
                let mut call = vec!["g".to_owned(), format!("{tag}{{}}")];
                call.extend(args.iter().cloned());
                call.push("std::move(val)".to_owned());
                w.open(format!("case {i}: {{"));
                w.line(self.local_value(&pair.value, "val"));
                w.line("load(ar, val);");
                w.line(format!("add_vertex({}{tail});", call.join(", ")));
                w.line("break;");
                w.close("}");
            }
            w.line("default:");
            w.indented(|w| w.line("throw std::out_of_range(\"vertex type out of range\");"));
            w.close("}");
        } else {
            let mut call = vec!["g".to_owned()];
            call.extend(args);
            w.line(format!("add_vertex({}{tail});", call.join(", ")));
        }
        w.close("}");

        if self.saves_edges() {
            w.blank();
            w.open("for (SizeT i = 0; i != numEdges; ++i) {");
            w.line("auto u = Graph::null_vertex();");
            w.line("auto v = Graph::null_vertex();");
            w.line("load(ar, u);");
            w.line("load(ar, v);");
            if desc.has_edge_property() {
                w.line(self.local_value(&desc.edge_property, "property"));
                w.line("load(ar, property);");
                w.line("add_edge(u, v, g, std::move(property));");
            } else {
                w.line("add_edge(u, v, g);");
            }
            w.close("}");
        }

        let members: Vec<&str> = self
            .composition
            .members
            .iter()
            .filter(|m| is_serialized(m))
            .map(|m| m.member_name.as_str())
            .collect();
        if !members.is_empty() {
            w.blank();
            for m in members {
                w.line(format!("load(ar, g.{m});"));
            }
        }
        w.close("}");
    }
}
