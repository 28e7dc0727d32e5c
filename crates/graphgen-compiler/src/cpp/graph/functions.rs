//! Read-only graph concepts: incidence, bidirectional, adjacency, vertex
//! list and edge list.

use super::GraphEmitter;
use crate::CodeWriter;

impl GraphEmitter<'_> {
    /// `G::edge_descriptor(u, v[, property])`.
    pub(super) fn edge_descriptor(&self, u: &str, v: &str, property: &str) -> String {
        let g = &self.qualified;
        if self.desc.has_edge_property() || self.desc.is_undirected() {
            format!("{g}::edge_descriptor({u}, {v}, {property})")
        } else {
            format!("{g}::edge_descriptor({u}, {v})")
        }
    }

    /// Iterator range over one of the vertex incidence lists.
    fn incidence_range(&self, w: &mut CodeWriter, name: &str, iterator: &str, getter: &str) {
        let g = &self.qualified;
        w.blank();
        w.line(format!("inline std::pair<{g}::{iterator}, {g}::{iterator}>"));
        w.open(format!(
            "{name}({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("return std::make_pair(");
        w.indented(|w| {
            w.line(format!(
                "{g}::{iterator}(const_cast<{g}&>(g).{getter}(u).begin(), u),"
            ));
            w.line(format!(
                "{g}::{iterator}(const_cast<{g}&>(g).{getter}(u).end(), u));"
            ));
        });
        w.close("}");
    }

    fn incidence_size(&self, w: &mut CodeWriter, name: &str, size_type: &str, getter: &str) {
        let g = &self.qualified;
        w.blank();
        w.line(format!("inline {g}::{size_type}"));
        w.open(format!(
            "{name}({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
        ));
        w.line(format!(
            "return gsl::narrow_cast<{g}::{size_type}>(g.{getter}(u).size());"
        ));
        w.close("}");
    }

    pub(super) fn emit_incidence(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// IncidenceGraph");
        for (name, field) in [("source", "source"), ("target", "target")] {
            if name == "target" {
                w.blank();
            }
            w.line(format!("inline {g}::vertex_descriptor"));
            w.open(format!(
                "{name}(const {g}::edge_descriptor& e, const {g}& /*g*/) noexcept {{"
            ));
            w.line(format!("return e.{field};"));
            w.close("}");
        }
        self.incidence_range(w, "out_edges", "out_edge_iterator", "getOutEdgeList");
        self.incidence_size(w, "out_degree", "degree_size_type", "getOutEdgeList");

        w.blank();
        w.line(format!("inline std::pair<{g}::edge_descriptor, bool>"));
        w.open(format!(
            "edge({g}::vertex_descriptor u, {g}::vertex_descriptor v, const {g}& g) noexcept {{"
        ));
        w.line("const auto& outEdgeList = g.getOutEdgeList(u);");
        if self.desc.out_edge_list.is_associative() {
            w.line(format!("auto iter = outEdgeList.find({g}::out_edge_type(v));"));
        } else {
            w.line(format!(
                "auto iter = std::find(outEdgeList.begin(), outEdgeList.end(), {g}::out_edge_type(v));"
            ));
        }
        w.line("bool hasEdge = (iter != outEdgeList.end());");
        let property = "hasEdge ? &(*iter).get_property() : nullptr";
        w.line(format!(
            "return {{{}, hasEdge}};",
            self.edge_descriptor("u", "v", property)
        ));
        w.close("}");
    }

    pub(super) fn emit_bidirectional(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// BidirectionalGraph");
        self.incidence_range(w, "in_edges", "in_edge_iterator", "getInEdgeList");
        self.incidence_size(w, "in_degree", "degree_size_type", "getInEdgeList");
        w.blank();
        w.line(format!("inline {g}::degree_size_type"));
        w.open(format!(
            "degree({g}::vertex_descriptor u, const {g}& g) noexcept {{"
        ));
        if self.desc.is_undirected() {
            w.line("return out_degree(u, g);");
        } else {
            w.line("return in_degree(u, g) + out_degree(u, g);");
        }
        w.close("}");
    }

    pub(super) fn emit_adjacency(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// AdjacencyGraph");
        w.line(format!(
            "inline std::pair<{g}::adjacency_iterator, {g}::adjacency_iterator>"
        ));
        w.open(format!(
            "adjacent_vertices({g}::vertex_descriptor u, const {g}& g) noexcept {{ // NOLINT"
        ));
        w.line("auto edges = out_edges(u, g);");
        w.line(format!(
            "return std::make_pair({g}::adjacency_iterator(edges.first, &g), {g}::adjacency_iterator(edges.second, &g));"
        ));
        w.close("}");
    }

    pub(super) fn emit_vertex_list(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// VertexListGraph");
        w.line(format!(
            "inline std::pair<{g}::vertex_iterator, {g}::vertex_iterator>"
        ));
        w.open(format!("vertices(const {g}& g0) noexcept {{"));
        w.line(format!("auto& g = const_cast<{g}&>(g0);"));
        if self.desc.is_vector() {
            w.line("return std::make_pair(g.getVertexList().begin(), g.getVertexList().end());");
        } else {
            w.line(format!(
                "return std::make_pair({g}::vertex_iterator(g.mVertices.begin()), {g}::vertex_iterator(g.mVertices.end()));"
            ));
        }
        w.close("}");
        w.blank();
        w.line(format!("inline {g}::vertices_size_type"));
        w.open(format!("num_vertices(const {g}& g) noexcept {{ // NOLINT"));
        w.line(format!(
            "return gsl::narrow_cast<{g}::vertices_size_type>(g.mVertices.size());"
        ));
        w.close("}");
    }

    pub(super) fn emit_edge_list(&self, w: &mut CodeWriter) {
        let g = &self.qualified;
        w.blank();
        w.line("// EdgeListGraph");
        w.line(format!("inline std::pair<{g}::edge_iterator, {g}::edge_iterator>"));
        w.open(format!("edges(const {g}& g0) noexcept {{"));
        w.line(format!("auto& g = const_cast<{g}&>(g0);"));
        if self.desc.need_edge_list() {
            w.line(format!(
                "return std::make_pair({g}::edge_iterator(g.mEdges.begin()), {g}::edge_iterator(g.mEdges.end()));"
            ));
        } else {
            w.line("auto range = vertices(g);");
            w.line("return std::make_pair(");
            w.indented(|w| {
                w.line(format!(
                    "{g}::edge_iterator(range.first, range.second, range.second, g),"
                ));
                w.line(format!(
                    "{g}::edge_iterator(range.second, range.second, range.second, g));"
                ));
            });
        }
        w.close("}");

        w.blank();
        w.line(format!("inline {g}::edges_size_type"));
        w.open(format!("num_edges(const {g}& g) noexcept {{ // NOLINT"));
        if self.desc.need_edge_list() {
            w.line(format!(
                "return gsl::narrow_cast<{g}::edges_size_type>(g.mEdges.size());"
            ));
        } else {
            w.line(format!("{g}::edges_size_type numEdges = 0;"));
            w.line("auto range = vertices(g);");
            w.open("for (auto iter = range.first; iter != range.second; ++iter) {");
            w.line("numEdges += out_degree(*iter, g);");
            w.close("}");
            w.line("return numEdges;");
        }
        w.close("}");
    }
}
