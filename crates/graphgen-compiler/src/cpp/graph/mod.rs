//! BGL-style graph classes and their free functions.
//!
//! A graph is a function of its `GraphDesc`. The class (`Types.h`) holds the
//! typedefs and storage; `Graphs.h` holds the free functions and the
//! `boost::property_map` specializations, each section present only when
//! its axis is enabled.

mod class;
mod functions;
mod mutable;
mod polymorphic;
mod property_maps;
mod reference;
mod serialization;

#[cfg(test)]
mod reference_tests;

use graphgen_core::syntax::{Composition, Directedness, GraphDesc, PolymorphicPair};
use graphgen_core::{Features, Kind, VertexId};
use tracing::debug;

use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Error, Result};

/// Where a type spelling appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Site {
    /// Inside the graph class.
    Class,
    /// Free functions in the graph's namespace.
    Namespace,
    /// `namespace boost` specializations.
    Global,
}

/// Emitter for one graph vertex.
pub struct GraphEmitter<'a> {
    pub(super) ctx: &'a CppContext<'a>,
    pub(super) v: VertexId,
    /// Class name.
    pub(super) name: &'a str,
    /// Spelling from the graph's namespace, used by free functions.
    pub(super) qualified: String,
    /// Spelling from the global namespace, used inside `namespace boost`.
    pub(super) full: String,
    /// Path of the graph; stored types resolve from inside it.
    pub(super) scope: String,
    /// Namespace path of the graph.
    pub(super) ns: String,
    pub(super) desc: &'a GraphDesc,
    pub(super) composition: &'a Composition,
    pub(super) pmr: bool,
}

impl<'a> GraphEmitter<'a> {
    /// Fails with `UnsupportedGraph` for axis combinations that have no
    /// implementation.
    pub fn new(ctx: &'a CppContext<'a>, v: VertexId) -> Result<Self> {
        let syntax = ctx.syntax;
        let scope = syntax.get_path(v);
        let graph = syntax.graph(v);
        if let Some(reason) = graph.desc.unsupported_reason() {
            return Err(Error::UnsupportedGraph {
                graph: scope,
                reason,
            });
        }
        let ns = syntax.get_namespace(v);
        Ok(Self {
            ctx,
            v,
            name: &syntax.vertex(v).name,
            qualified: syntax.get_cpp_name(&ns, v),
            full: syntax.get_cpp_name("", v),
            scope,
            ns,
            desc: &graph.desc,
            composition: &graph.composition,
            pmr: syntax.is_pmr(v),
        })
    }

    // ========================================================================
    // Spelling helpers
    // ========================================================================

    /// `boost::container[::pmr]::<kind>`.
    pub(super) fn container(&self, kind: &str) -> String {
        if self.pmr {
            format!("boost::container::pmr::{kind}")
        } else {
            format!("boost::container::{kind}")
        }
    }

    pub(super) fn vertex_list_container(&self) -> String {
        let kind = if self.desc.is_vector() { "vector" } else { "list" };
        format!("{}<vertex_type>", self.container(kind))
    }

    pub(super) fn edge_list_container(&self) -> String {
        let kind = if self.desc.is_edge_list_vector() {
            "vector"
        } else {
            "list"
        };
        format!("{}<edge_type>", self.container(kind))
    }

    /// Incidence list of `element` per the out-edge list axis.
    pub(super) fn incidence_container(&self, element: &str) -> String {
        use graphgen_core::syntax::OutEdgeListKind::*;
        let kind = match self.desc.out_edge_list {
            Sequence => "vector",
            UniqueAssociative => "flat_set",
            MultiAssociative => "flat_multiset",
        };
        format!("{}<{element}>", self.container(kind))
    }

    pub(super) fn type_name(&self, path: &str) -> String {
        self.ctx.type_name(&self.scope, path)
    }

    pub(super) fn vertex_property(&self) -> String {
        self.type_name(&self.desc.vertex_property)
    }

    pub(super) fn edge_property(&self) -> String {
        if self.desc.has_edge_property() {
            self.type_name(&self.desc.edge_property)
        } else {
            "boost::no_property".to_owned()
        }
    }

    pub(super) fn is_pmr_path(&self, path: &str) -> bool {
        self.ctx
            .syntax
            .locate(path)
            .is_some_and(|t| self.ctx.syntax.is_pmr(t))
    }

    pub(super) fn directed_category(&self) -> &'static str {
        match self.desc.directedness {
            Directedness::Directed => "boost::directed_tag",
            Directedness::Bidirectional => "boost::bidirectional_tag",
            Directedness::Undirected => "boost::undirected_tag",
        }
    }

    /// Stored in-edge lists, or the out-edge lists of an undirected graph.
    pub(super) fn has_in_edge_access(&self) -> bool {
        !self.desc.is_directed_only()
    }

    /// `vertex_type` lvalue of descriptor `v` inside a free function.
    pub(super) fn vertex_of(&self, v: &str) -> String {
        if self.desc.is_vector() {
            format!("g.mVertices[{v}]")
        } else {
            format!("(*static_cast<{}::vertex_type*>({v}))", self.qualified)
        }
    }

    fn utf8_paths(&self) -> bool {
        self.desc.addressable.as_ref().is_some_and(|a| a.utf8)
    }

    pub(super) fn path_string(&self) -> &'static str {
        match (self.pmr, self.utf8_paths()) {
            (true, true) => "std::pmr::u8string",
            (true, false) => "std::pmr::string",
            (false, true) => "std::u8string",
            (false, false) => "std::string",
        }
    }

    pub(super) fn path_view(&self) -> &'static str {
        if self.utf8_paths() {
            "std::u8string_view"
        } else {
            "boost::string_view"
        }
    }

    pub(super) fn path_char(&self) -> &'static str {
        if self.utf8_paths() { "char8_t" } else { "char" }
    }

    pub(super) fn path_index(&self) -> &str {
        self.desc
            .addressable
            .as_ref()
            .map_or("mPathIndex", |a| a.member_name.as_str())
    }

    /// Spelling of type `path` at `site`.
    pub(super) fn spell(&self, path: &str, site: Site) -> String {
        let scope = match site {
            Site::Class => self.scope.as_str(),
            Site::Namespace => self.ns.as_str(),
            Site::Global => "",
        };
        self.ctx.type_name(scope, path)
    }

    /// Spelling of the graph itself at `site`; empty inside the class.
    fn prefix(&self, site: Site) -> String {
        match site {
            Site::Class => String::new(),
            Site::Namespace => format!("{}::", self.qualified),
            Site::Global => format!("{}::", self.full),
        }
    }

    /// `Impl::ValueHandle` alternative of a polymorphic pair.
    pub(super) fn handle_type(&self, pair: &PolymorphicPair, site: Site) -> String {
        let tag = self.spell(&pair.tag, site);
        if !pair.is_stored() {
            format!("Impl::ValueHandle<{tag}, {}>", self.spell(&pair.value, site))
        } else if pair.is_vector() {
            format!("Impl::ValueHandle<{tag}, {}vertex_descriptor>", self.prefix(site))
        } else {
            format!(
                "Impl::ValueHandle<{tag}, {}::iterator>",
                self.polymorphic_container(pair, site)
            )
        }
    }

    pub(super) fn polymorphic_container(&self, pair: &PolymorphicPair, site: Site) -> String {
        let kind = if pair.is_vector() { "vector" } else { "list" };
        format!("{}<{}>", self.container(kind), self.spell(&pair.value, site))
    }

    /// Value reached from handle `h` followed by `.` or `->`.
    pub(super) fn handle_value(&self, pair: &PolymorphicPair, h: &str) -> String {
        if !pair.is_stored() {
            format!("{h}mValue")
        } else if pair.is_vector() {
            format!("g.{}[{h}mValue]", pair.member_name)
        } else {
            format!("*{h}mValue")
        }
    }

    /// Container of a component's values under vector storage.
    pub(super) fn component_container(&self, value_path: &str) -> String {
        format!("{}<{}>", self.container("vector"), self.type_name(value_path))
    }

    /// `vertex_descriptor` to index cast for vector storage.
    pub(super) fn narrow(&self, expr: &str) -> String {
        format!("gsl::narrow_cast<{}::vertex_descriptor>({expr})", self.qualified)
    }
}

/// `<prefix>Graphs.h`: property map specializations, then free functions.
pub fn emit_graphs(ctx: &CppContext<'_>) -> Result<String> {
    let graphs: Vec<VertexId> = ctx
        .compiled
        .module_vertices(ctx.module_path)
        .filter(|&v| matches!(ctx.syntax.kind(v), Kind::Graph(_)))
        .collect();
    let emitters = graphs
        .iter()
        .map(|&v| GraphEmitter::new(ctx, v))
        .collect::<Result<Vec<_>>>()?;

    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    for header in [
        "<boost/graph/adjacency_iterator.hpp>",
        "<boost/graph/graph_traits.hpp>",
        "<boost/graph/properties.hpp>",
        "<boost/range/irange.hpp>",
        "<gsl/gsl>",
        "<stdexcept>",
        "<variant>",
    ] {
        include(&mut w, header);
    }
    if ctx.module.has(Features::TYPES) {
        include(&mut w, &ctx.module.file_path("Types.h"));
    }
    include(&mut w, &ctx.config.impl_header);

    w.blank();
    w.line("namespace boost {");
    for g in &emitters {
        debug!(graph = %g.scope, "emit property maps");
        g.emit_property_map_traits(&mut w);
    }
    w.blank();
    w.line("} // namespace boost");

    let mut ns = Namespaces::new();
    for g in &emitters {
        debug!(graph = %g.scope, "emit graph functions");
        ns.enter(&mut w, &ctx.syntax.get_namespace(g.v));
        ns.separate(&mut w);
        g.emit_functions(&mut w);
    }
    ns.close_all(&mut w);
    ctx.footer(&mut w);
    Ok(w.finish())
}

impl GraphEmitter<'_> {
    /// Free functions of one graph, in dependency order.
    pub(super) fn emit_functions(&self, w: &mut CodeWriter) {
        w.line(format!("// {}", self.name));
        self.emit_incidence(w);
        if self.has_in_edge_access() {
            self.emit_bidirectional(w);
        }
        if self.desc.adjacency {
            self.emit_adjacency(w);
        }
        if self.desc.vertex_list_graph || self.desc.is_edge_list_not_needed() {
            self.emit_vertex_list(w);
        }
        self.emit_edge_list(w);
        if self.desc.mutable_graph {
            self.emit_mutable_edges(w);
        }
        if self.desc.is_polymorphic() {
            self.emit_polymorphic(w);
        }
        if self.desc.is_reference() {
            self.emit_reference(w);
        }
        if self.desc.is_addressable() {
            self.emit_addressable(w);
        }
        self.emit_property_getters(w);
        if self.desc.is_uuid_graph() {
            self.emit_uuid(w);
        }
        if self.desc.mutable_graph {
            self.emit_mutable_vertices(w);
        }
    }
}
