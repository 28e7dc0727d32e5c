//! Graph classes over the TypeScript `impl` runtime.
//!
//! The projection is always bidirectional with sequence incidence lists;
//! an edge container is stored only for edge properties. Sections follow
//! the same axes as the C++ graph.

use graphgen_core::naming::{
    convert_tag, get_tag_variable_name, get_typescript_tag_type, get_variable_name,
};
use graphgen_core::syntax::{Component, Composition, GraphDesc, PolymorphicPair};
use graphgen_core::typename::extract_name;
use graphgen_core::VertexId;
use tracing::debug;

use super::TsContext;
use super::structs::ClassBody;
use crate::{CodeWriter, Error, Result, Separator};

const BANNER_RULE: &str = "//=================================================================";
const SECTION_RULE: &str = "//-----------------------------------------------------------------";

/// Incidence lists of one relation.
#[derive(Debug, Clone, Copy)]
struct Lists {
    out: &'static str,
    in_: &'static str,
}

const EDGES: Lists = Lists {
    out: "_outEdges",
    in_: "_inEdges",
};

const REFERENCES: Lists = Lists {
    out: "_children",
    in_: "_parents",
};

pub(super) struct TsGraphEmitter<'a> {
    ctx: &'a TsContext<'a>,
    v: VertexId,
    name: String,
    desc: &'a GraphDesc,
    composition: &'a Composition,
    vertex_class: String,
    edge_class: String,
    /// `number` for vector storage, the vertex class otherwise.
    vertex_desc: String,
    nullable_desc: String,
    null_vertex: &'static str,
    edge_desc: &'static str,
    out_edge: &'static str,
    out_edge_iter: &'static str,
    in_edge_iter: &'static str,
    vertex_property: String,
    edge_property: String,
}

impl<'a> TsGraphEmitter<'a> {
    pub(super) fn new(ctx: &'a TsContext<'a>, v: VertexId) -> Result<Self> {
        let syntax = ctx.syntax;
        let graph = syntax.graph(v);
        let desc = &graph.desc;
        if let Some(reason) = desc.unsupported_reason() {
            return Err(Error::UnsupportedGraph {
                graph: syntax.get_path(v),
                reason,
            });
        }
        let name = syntax.get_typescript_typename(v);
        let vertex_class = format!("{name}Vertex");
        let (vertex_desc, nullable_desc, null_vertex) = if desc.is_vector() {
            ("number".to_owned(), "number".to_owned(), "0xFFFFFFFF")
        } else {
            (vertex_class.clone(), format!("{vertex_class} | null"), "null")
        };
        let property = desc.has_edge_property();
        Ok(Self {
            ctx,
            v,
            edge_class: format!("{name}Edge"),
            vertex_class,
            vertex_desc,
            nullable_desc,
            null_vertex,
            edge_desc: if property { "impl.EPD" } else { "impl.ED" },
            out_edge: if property { "impl.OutEP" } else { "impl.OutE" },
            out_edge_iter: if property { "impl.OutEPI" } else { "impl.OutEI" },
            in_edge_iter: if property { "impl.InEPI" } else { "impl.InEI" },
            vertex_property: ctx.type_name(&desc.vertex_property),
            edge_property: ctx.type_name(&desc.edge_property),
            name,
            desc,
            composition: &graph.composition,
        })
    }

    pub(super) fn emit(&self, w: &mut CodeWriter) -> Result<()> {
        debug!(graph = %self.name, "emitting typescript graph");
        w.line(BANNER_RULE);
        w.line(format!("// {}", self.name));
        w.line(BANNER_RULE);
        if self.desc.is_polymorphic() {
            w.line("// PolymorphicGraph Concept");
            self.emit_polymorphic_types(w);
            w.blank();
            w.line(SECTION_RULE);
        }
        w.line("// Graph Concept");
        self.emit_vertex_class(w)?;
        if self.has_edge_list() {
            w.blank();
            self.emit_edge_class(w);
        }
        if self.has_property_maps() {
            w.blank();
            w.line(SECTION_RULE);
            w.line("// PropertyGraph Concept");
            self.emit_property_maps(w)?;
        }
        if !self.desc.components.is_empty() {
            w.blank();
            w.line(SECTION_RULE);
            w.line("// ComponentGraph Concept");
            self.emit_component_types(w);
        }
        w.blank();
        w.line(SECTION_RULE);
        w.line(format!("// {} Implementation", self.name));
        self.emit_graph_class(w)
    }

    // ============================================================
    // Naming
    // ============================================================

    fn has_edge_list(&self) -> bool {
        self.desc.has_edge_property()
    }

    fn has_property_maps(&self) -> bool {
        self.desc.has_vertex_property() || !self.desc.components.is_empty()
    }

    fn is_vector(&self) -> bool {
        self.desc.is_vector()
    }

    /// Vertex object of descriptor expression `var`.
    fn deref(&self, var: &str) -> String {
        if self.is_vector() {
            format!("this._vertices[{var}]")
        } else {
            var.to_owned()
        }
    }

    /// `oe.target` read back as a descriptor.
    fn target_of(&self, var: &str) -> String {
        format!("{var}.target as {}", self.vertex_desc)
    }

    fn tag_name(pair: &PolymorphicPair) -> &str {
        get_typescript_tag_type(extract_name(&pair.tag))
    }

    fn component_field(&self, c: &Component) -> Result<String> {
        self.ctx.member_name(&c.member_name, false)
    }

    fn component_type(&self, c: &Component) -> String {
        self.ctx.type_name(&c.value_path)
    }

    fn component_map(&self, c: &Component) -> String {
        format!("{}{}Map", self.name, convert_tag(&c.name))
    }

    /// Value of component `c` at vertex `var`.
    fn component_value(&self, c: &Component, var: &str) -> Result<String> {
        Ok(format!("this.{}[{var}]", self.component_field(c)?))
    }

    /// Name expression of vertex `var`, when the graph is named.
    fn vertex_name(&self, var: &str) -> Result<Option<String>> {
        let Some(named) = &self.desc.named else {
            return Ok(None);
        };
        let mut expr = match named.component.as_deref().and_then(|c| self.desc.component(c)) {
            Some(c) => self.component_value(c, var)?,
            None => format!("{}._property", self.deref(var)),
        };
        if !named.member_name.is_empty() {
            expr.push('.');
            expr.push_str(&self.ctx.member_name(&named.member_name, true)?);
        }
        Ok(Some(expr))
    }

    /// Reference relation stored by the graph: edges for alias ownership,
    /// dedicated lists otherwise.
    fn reference_lists(&self) -> Lists {
        if self.desc.is_alias_graph() {
            EDGES
        } else {
            REFERENCES
        }
    }

    fn reference_desc(&self) -> &'static str {
        if self.desc.is_alias_graph() {
            self.edge_desc
        } else {
            "impl.ED"
        }
    }

    fn reference_iters(&self) -> (&'static str, &'static str) {
        if self.desc.is_alias_graph() {
            (self.out_edge_iter, self.in_edge_iter)
        } else {
            ("impl.OutEI", "impl.InEI")
        }
    }

    // ============================================================
    // Declarations before the graph class
    // ============================================================

    fn emit_polymorphic_types(&self, w: &mut CodeWriter) {
        let name = &self.name;
        let pairs = &self.desc.polymorphic;
        w.open(format!("export const enum {name}Value {{"));
        for pair in pairs {
            w.line(format!("{},", Self::tag_name(pair)));
        }
        w.close("}");
        w.blank();
        w.open(format!("export interface {name}ValueType {{"));
        for pair in pairs {
            w.line(format!(
                "[{name}Value.{}]: {};",
                Self::tag_name(pair),
                self.ctx.type_name(&pair.value)
            ));
        }
        w.close("}");
        w.blank();
        w.open(format!("export interface {name}Visitor {{"));
        for pair in pairs {
            w.line(format!(
                "{}(value: {}): unknown;",
                get_variable_name(Self::tag_name(pair)),
                self.ctx.type_name(&pair.value)
            ));
        }
        w.close("}");
        w.blank();
        w.line(format!(
            "export type {name}Object = {};",
            self.ctx.syntax.get_typescript_graph_polymorphic_variant(self.desc)
        ));
    }

    fn emit_vertex_class(&self, w: &mut CodeWriter) -> Result<()> {
        let name = &self.name;
        let list = !self.is_vector();
        if list {
            w.open(format!("export class {} implements impl.Vertex {{", self.vertex_class));
            w.line("nullVertex (): null { return null; }");
        } else {
            w.open(format!("export class {} {{", self.vertex_class));
        }

        let mut params = Vec::new();
        let mut assigns = Vec::new();
        let mut fields = vec![
            format!("readonly _outEdges: {}[] = [];", self.out_edge),
            format!("readonly _inEdges: {}[] = [];", self.out_edge),
        ];
        if self.desc.need_reference_edges() {
            fields.push("readonly _children: impl.OutE[] = [];".to_owned());
            fields.push("readonly _parents: impl.OutE[] = [];".to_owned());
        }
        if self.desc.is_polymorphic() {
            params.push(format!("id: {name}Value"));
            params.push(format!("object: {name}Object"));
            assigns.push("this._id = id;".to_owned());
            assigns.push("this._object = object;".to_owned());
            fields.push(format!("readonly _id: {name}Value;"));
            fields.push(format!("readonly _object: {name}Object;"));
        }
        if self.desc.has_vertex_property() {
            params.push(format!("property: {}", self.vertex_property));
            assigns.push("this._property = property;".to_owned());
            fields.push(format!("readonly _property: {};", self.vertex_property));
        }

        if !params.is_empty() {
            w.open("constructor (");
            for p in &params {
                w.line(format!("{p},"));
            }
            w.close(") {");
            w.indented(|w| {
                for a in &assigns {
                    w.line(a);
                }
            });
            w.line("}");
        }
        for f in &fields {
            w.line(f);
        }
        w.close("}");
        Ok(())
    }

    fn emit_edge_class(&self, w: &mut CodeWriter) {
        let vd = &self.vertex_desc;
        let ep = &self.edge_property;
        w.open(format!("export class {} implements impl.Edge {{", self.edge_class));
        w.open(format!("constructor (source: {vd}, target: {vd}, property: {ep}) {{"));
        w.line("this.source = source;");
        w.line("this.target = target;");
        w.line("this.property = property;");
        w.close("}");
        w.open(format!("getProperty (): {ep} {{"));
        w.line("return this.property;");
        w.close("}");
        w.line(format!("source: {vd};"));
        w.line(format!("target: {vd};"));
        w.line(format!("readonly property: {ep};"));
        w.close("}");
    }

    /// One map class reading `value` of every vertex. Under vector storage
    /// the map holds the container it reads.
    fn emit_property_map(
        &self,
        w: &mut CodeWriter,
        class: &str,
        container: (&str, &str),
        read: &str,
        ty: &str,
    ) {
        let (field, element) = container;
        let param = field.trim_start_matches('_');
        w.open(format!("export class {class} implements impl.PropertyMap {{"));
        if self.is_vector() {
            w.open(format!("constructor ({param}: {element}[]) {{"));
            w.line(format!("this.{field} = {param};"));
            w.close("}");
        }
        w.open(format!("get (v: {}): {ty} {{", self.vertex_desc));
        w.line(format!("return {read};"));
        w.close("}");
        if self.is_vector() {
            w.line(format!("readonly {field}: {element}[];"));
        }
        w.close("}");
    }

    fn emit_property_maps(&self, w: &mut CodeWriter) -> Result<()> {
        let mut sep = Separator::new();
        if self.desc.has_vertex_property() {
            sep.next(w);
            let read = if self.is_vector() {
                "this._vertices[v]._property"
            } else {
                "v._property"
            };
            self.emit_property_map(
                w,
                &format!("{}VertexPropertyMap", self.name),
                ("_vertices", self.vertex_class.as_str()),
                read,
                &self.vertex_property,
            );
        }
        for c in &self.desc.components {
            sep.next(w);
            let field = self.component_field(c)?;
            let ty = self.component_type(c);
            let read = format!("this.{field}[v]");
            self.emit_property_map(w, &self.component_map(c), (field.as_str(), ty.as_str()), &read, &ty);
        }
        Ok(())
    }

    fn emit_component_types(&self, w: &mut CodeWriter) {
        let name = &self.name;
        let components = &self.desc.components;
        w.open(format!("export const enum {name}Component {{"));
        for c in components {
            w.line(format!("{},", get_typescript_tag_type(&c.name)));
        }
        w.close("}");
        w.blank();
        w.open(format!("export interface {name}ComponentType {{"));
        for c in components {
            w.line(format!(
                "[{name}Component.{}]: {};",
                get_typescript_tag_type(&c.name),
                self.component_type(c)
            ));
        }
        w.close("}");
        w.blank();
        w.open(format!("export interface {name}ComponentPropertyMap {{"));
        for c in components {
            w.line(format!(
                "[{name}Component.{}]: {};",
                get_typescript_tag_type(&c.name),
                self.component_map(c)
            ));
        }
        w.close("}");
    }

    // ============================================================
    // Graph class
    // ============================================================

    fn interfaces(&self) -> Vec<String> {
        let desc = self.desc;
        let mut list: Vec<String> = vec![
            "impl.BidirectionalGraph".into(),
            "impl.AdjacencyGraph".into(),
            "impl.VertexListGraph".into(),
        ];
        if desc.mutable_graph {
            list.push("impl.MutableGraph".into());
        }
        if self.has_property_maps() {
            list.push("impl.PropertyGraph".into());
        }
        if desc.named.is_some() {
            list.push("impl.NamedGraph".into());
        }
        if !desc.components.is_empty() {
            list.push("impl.ComponentGraph".into());
        }
        if desc.is_polymorphic() {
            list.push("impl.PolymorphicGraph".into());
        }
        if desc.is_reference() {
            list.push("impl.ReferenceGraph".into());
        }
        if desc.is_mutable_reference() {
            list.push("impl.MutableReferenceGraph".into());
        }
        if desc.is_addressable() {
            list.push("impl.AddressableGraph".into());
        }
        if let Some(map) = desc.vertex_maps.first() {
            list.push(format!("impl.UuidGraph<{}>", self.ctx.type_name(&map.key_type)));
        }
        list
    }

    fn emit_graph_class(&self, w: &mut CodeWriter) -> Result<()> {
        let interfaces = self.interfaces();
        let last = interfaces.len() - 1;
        for (i, iface) in interfaces.iter().enumerate() {
            let line = match (i == 0, i == last) {
                (true, true) => format!("export class {} implements {iface} {{", self.name),
                (true, false) => format!("export class {} implements {iface},", self.name),
                (false, true) => format!("    {iface} {{"),
                (false, false) => format!("    {iface},"),
            };
            w.line(line);
        }
        w.indent();

        self.emit_basics(w);
        self.emit_incidence(w);
        if self.desc.mutable_graph {
            self.emit_mutable(w)?;
        }
        if self.desc.named.is_some() {
            self.emit_named(w)?;
        }
        if self.has_property_maps() {
            self.emit_property_graph(w)?;
        }
        if !self.desc.components.is_empty() {
            self.emit_component_graph(w)?;
        }
        if self.desc.is_polymorphic() {
            self.emit_polymorphic_graph(w);
        }
        if self.desc.is_reference() {
            self.emit_reference_graph(w);
        }
        if self.desc.is_mutable_reference() {
            self.emit_mutable_reference(w);
        }
        if self.desc.is_addressable() {
            self.emit_addressable(w)?;
        }
        if !self.desc.vertex_maps.is_empty() {
            self.emit_uuid(w);
        }
        self.emit_storage(w)?;
        w.close("}");
        Ok(())
    }

    fn section(w: &mut CodeWriter, title: &str) {
        w.line(SECTION_RULE);
        w.line(format!("// {title}"));
    }

    fn emit_basics(&self, w: &mut CodeWriter) {
        Self::section(w, "Graph");
        w.line(format!("// type vertex_descriptor = {};", self.vertex_desc));
        if self.is_vector() {
            w.line("nullVertex (): number { return 0xFFFFFFFF; }");
        } else {
            w.line("nullVertex (): null { return null; }");
        }
        w.line(format!("// type edge_descriptor = {};", self.edge_desc));
        w.line("readonly directed_category: impl.directional = impl.directional.bidirectional;");
        w.line("readonly edge_parallel_category: impl.parallel = impl.parallel.allow;");
        w.line("readonly traversal_category: impl.traversal = impl.traversal.incidence");
        w.line("    | impl.traversal.bidirectional");
        w.line("    | impl.traversal.adjacency");
        w.line("    | impl.traversal.vertex_list;");
    }

    /// Incidence, bidirectional, adjacency and vertex list queries.
    fn emit_incidence(&self, w: &mut CodeWriter) {
        let vd = &self.vertex_desc;
        let ed = self.edge_desc;
        Self::section(w, "IncidenceGraph");
        w.line(format!("// type out_edge_iterator = {};", self.out_edge_iter));
        w.line("// type degree_size_type = number;");
        w.open(format!("edge (u: {vd}, v: {vd}): boolean {{"));
        self.emit_find_target(w, &format!("{}._outEdges", self.deref("u")));
        w.close("}");
        w.open(format!("source (e: {ed}): {vd} {{"));
        w.line(format!("return e.source as {vd};"));
        w.close("}");
        w.open(format!("target (e: {ed}): {vd} {{"));
        w.line(format!("return e.target as {vd};"));
        w.close("}");
        w.open(format!("outEdges (v: {vd}): {} {{", self.out_edge_iter));
        w.line(format!(
            "return new {}({}._outEdges.values(), v);",
            self.out_edge_iter,
            self.deref("v")
        ));
        w.close("}");
        w.open(format!("outDegree (v: {vd}): number {{"));
        w.line(format!("return {}._outEdges.length;", self.deref("v")));
        w.close("}");

        Self::section(w, "BidirectionalGraph");
        w.line(format!("// type in_edge_iterator = {};", self.in_edge_iter));
        w.open(format!("inEdges (v: {vd}): {} {{", self.in_edge_iter));
        w.line(format!(
            "return new {}({}._inEdges.values(), v);",
            self.in_edge_iter,
            self.deref("v")
        ));
        w.close("}");
        w.open(format!("inDegree (v: {vd}): number {{"));
        w.line(format!("return {}._inEdges.length;", self.deref("v")));
        w.close("}");
        w.open(format!("degree (v: {vd}): number {{"));
        w.line("return this.outDegree(v) + this.inDegree(v);");
        w.close("}");

        Self::section(w, "AdjacencyGraph");
        let adj = if self.desc.has_edge_property() {
            "impl.AdjPI"
        } else {
            "impl.AdjI"
        };
        w.line(format!("// type adjacency_iterator = {adj};"));
        w.open(format!("adjacentVertices (v: {vd}): {adj} {{"));
        w.line(format!("return new {adj}(this, this.outEdges(v));"));
        w.close("}");

        Self::section(w, "VertexListGraph");
        w.open(format!("vertices (): IterableIterator<{vd}> {{"));
        if self.is_vector() {
            w.line("return this._vertices.keys();");
        } else {
            w.line("return this._vertices.values();");
        }
        w.close("}");
        w.open("numVertices (): number {");
        if self.is_vector() {
            w.line("return this._vertices.length;");
        } else {
            w.line("return this._vertices.size;");
        }
        w.close("}");
    }

    /// `true` when `list` holds an edge to `v`.
    fn emit_find_target(&self, w: &mut CodeWriter, list: &str) {
        w.open(format!("for (const oe of {list}) {{"));
        w.open(format!("if (v === {}) {{", self.target_of("oe")));
        w.line("return true;");
        w.close("}");
        w.close("}");
        w.line("return false;");
    }

    /// Splices entries of `list` whose `field` equals `value`.
    fn emit_splice(w: &mut CodeWriter, list: &str, field: &str, value: &str, one: bool) {
        let scope = if one { "remove one edge" } else { "remove all edges" };
        w.open(format!("for (let i = 0; i !== {list}.length;) {{ // {scope}"));
        w.open(format!("if ({list}[i].{field} === {value}) {{"));
        w.line(format!("{list}.splice(i, 1);"));
        if one {
            w.line("break;");
        }
        w.close("} else {");
        w.indented(|w| w.line("++i;"));
        w.line("}");
        w.close("}");
    }

    // ============================================================
    // MutableGraph
    // ============================================================

    fn emit_mutable(&self, w: &mut CodeWriter) -> Result<()> {
        Self::section(w, "MutableGraph");
        self.emit_add_vertex(w)?;
        self.emit_clear_vertex(w);
        self.emit_remove_vertex(w)?;

        let vd = &self.vertex_desc;
        let ed = self.edge_desc;
        if self.has_edge_list() {
            w.open(format!(
                "addEdge (u: {vd}, v: {vd}, p: {}): {ed} | null {{",
                self.edge_property
            ));
        } else {
            w.open(format!("addEdge (u: {vd}, v: {vd}): {ed} | null {{"));
        }
        self.emit_add_edge(w, EDGES, self.has_edge_list(), self.out_edge, ed);
        w.close("}");
        w.open(format!("removeEdges (u: {vd}, v: {vd}): void {{"));
        self.emit_remove_edges(w, EDGES, self.has_edge_list());
        w.close("}");
        w.open(format!("removeEdge (e: {ed}): void {{"));
        self.emit_remove_edge(w, EDGES, self.has_edge_list());
        w.close("}");
        Ok(())
    }

    fn emit_add_vertex(&self, w: &mut CodeWriter) -> Result<()> {
        let name = &self.name;
        let desc = self.desc;
        let mut params = Vec::new();
        let mut args = Vec::new();
        if desc.is_polymorphic() {
            params.push("id: T".to_owned());
            params.push(format!("object: {name}ValueType[T]"));
            args.push("id".to_owned());
            args.push("object".to_owned());
        }
        if desc.has_vertex_property() {
            params.push(format!("vertex: {}", self.vertex_property));
            args.push("vertex".to_owned());
        }
        for c in &desc.components {
            let var = get_tag_variable_name(&c.name);
            params.push(format!("{var}: {}", self.component_type(c)));
        }
        let alias_property = desc.is_alias_graph() && desc.has_edge_property();
        if desc.is_reference() {
            if alias_property {
                params.push(format!("ep: {}", self.edge_property));
            }
            if self.is_vector() {
                params.push(format!("u = {}", self.null_vertex));
            } else {
                params.push(format!("u: {} = {}", self.nullable_desc, self.null_vertex));
            }
        }

        let generic = if desc.is_polymorphic() {
            format!("<T extends {name}Value>")
        } else {
            String::new()
        };
        if params.is_empty() {
            w.open(format!("addVertex (): {} {{", self.vertex_desc));
        } else {
            w.open(format!("addVertex{generic} ("));
            for p in &params {
                w.line(format!("{p},"));
            }
            w.close(format!("): {} {{", self.vertex_desc));
            w.indent();
        }

        let ctor = format!("new {}({})", self.vertex_class, args.join(", "));
        if self.is_vector() {
            w.line(format!("const vert = {ctor};"));
            w.line("const v = this._vertices.length;");
            w.line("this._vertices.push(vert);");
            for c in &desc.components {
                w.line(format!(
                    "this.{}.push({});",
                    self.component_field(c)?,
                    get_tag_variable_name(&c.name)
                ));
            }
            for map in &desc.vertex_maps {
                let Some(c) = desc.component(&map.component_name) else {
                    continue;
                };
                let mut key = get_tag_variable_name(&c.name);
                if !map.component_member_name.is_empty() {
                    key.push('.');
                    key.push_str(&self.ctx.member_name(&map.component_member_name, true)?);
                }
                w.line(format!(
                    "this.{}.set({key}, v);",
                    self.ctx.member_name(&map.member_name, false)?
                ));
            }
        } else {
            w.line(format!("const v = {ctor};"));
            w.line("this._vertices.add(v);");
        }

        if desc.is_reference() {
            w.blank();
            w.line("// ReferenceGraph");
            w.open(format!("if (u !== {}) {{", self.null_vertex));
            if desc.is_alias_graph() {
                if alias_property {
                    w.line("this.addEdge(u, v, ep);");
                } else {
                    w.line("this.addEdge(u, v);");
                }
            } else {
                let (parent, child) = if self.is_vector() {
                    ("this._vertices[u]", "vert")
                } else {
                    ("u", "v")
                };
                w.line(format!("{parent}._children.push(new impl.OutE(v));"));
                w.line(format!("{child}._parents.push(new impl.OutE(u));"));
            }
            w.close("}");
            w.blank();
        }
        w.line("return v;");
        w.close("}");
        Ok(())
    }

    fn emit_clear_lists(&self, w: &mut CodeWriter, lists: Lists, edge_list: bool) {
        let separated = lists.out == REFERENCES.out;
        let cast = if self.is_vector() { "number" } else { self.vertex_desc.as_str() };
        for (list, opposite, var, label) in [
            (lists.out, lists.in_, "oe", if separated { "child" } else { "out" }),
            (lists.in_, lists.out, "ie", if separated { "parent" } else { "in" }),
        ] {
            w.line(format!("// clear {label} edges"));
            w.open(format!("for (const {var} of vert.{list}) {{"));
            let other = if var == "oe" { "target" } else { "source" };
            w.line(format!(
                "const {other} = {};",
                self.deref(&format!("{var}.target as {cast}"))
            ));
            Self::emit_splice(w, &format!("{other}.{opposite}"), "target", "v", false);
            if edge_list {
                w.line("// remove edge from edge list");
                w.line(format!("this._edges.delete({var}.edge as {});", self.edge_class));
            }
            w.close("}");
            w.line(format!("vert.{list}.length = 0;"));
            if var == "oe" {
                w.blank();
            }
        }
    }

    fn emit_clear_vertex(&self, w: &mut CodeWriter) {
        w.open(format!("clearVertex (v: {}): void {{", self.vertex_desc));
        if self.desc.is_reference() {
            if self.desc.is_alias_graph() {
                w.line("// ReferenceGraph(Alias)");
            } else {
                w.line("// ReferenceGraph(Separated)");
            }
        }
        w.line(format!("const vert = {};", self.deref("v")));
        self.emit_clear_lists(w, EDGES, self.has_edge_list());
        if self.desc.need_reference_edges() {
            w.blank();
            self.emit_clear_lists(w, REFERENCES, false);
        }
        w.close("}");
    }

    fn emit_remove_vertex(&self, w: &mut CodeWriter) -> Result<()> {
        let desc = self.desc;
        w.open(format!("removeVertex (u: {}): void {{", self.vertex_desc));
        if desc.is_addressable() {
            w.open("if (this.numChildren(u) !== 0) {");
            w.line("throw Error('vertex has children');");
            w.close("}");
        }
        w.line("this.clearVertex(u);");
        if !self.is_vector() {
            w.line("this._vertices.delete(u);");
            w.close("}");
            return Ok(());
        }
        for map in &desc.vertex_maps {
            let Some(c) = desc.component(&map.component_name) else {
                continue;
            };
            let mut key = format!("this.{}[u]", self.component_field(c)?);
            if !map.component_member_name.is_empty() {
                key.push('.');
                key.push_str(&self.ctx.member_name(&map.component_member_name, true)?);
            }
            w.line(format!(
                "this.{}.delete({key});",
                self.ctx.member_name(&map.member_name, false)?
            ));
        }
        w.line("this._vertices.splice(u, 1);");
        for c in &desc.components {
            w.line(format!("this.{}.splice(u, 1);", self.component_field(c)?));
        }
        w.blank();
        w.line("const sz = this._vertices.length;");
        w.open("if (u === sz) {");
        w.line("return;");
        w.close("}");
        w.blank();
        w.open("for (let v = 0; v !== sz; ++v) {");
        w.line("const vert = this._vertices[v];");
        w.line("impl.reindexEdgeList(vert._outEdges, u);");
        w.line("impl.reindexEdgeList(vert._inEdges, u);");
        if desc.need_reference_edges() {
            w.line("// ReferenceGraph (Separated)");
            w.line("impl.reindexEdgeList(vert._children, u);");
            w.line("impl.reindexEdgeList(vert._parents, u);");
        }
        w.close("}");
        if self.has_edge_list() {
            w.blank();
            w.open("for (const e of this._edges) {");
            w.open("if (e.source > u) {");
            w.line("--e.source;");
            w.close("}");
            w.open("if (e.target > u) {");
            w.line("--e.target;");
            w.close("}");
            w.close("}");
        }
        for map in &desc.vertex_maps {
            let index = self.ctx.member_name(&map.member_name, false)?;
            w.blank();
            w.open(format!("for (const [key, v] of this.{index}) {{"));
            w.open("if (v > u) {");
            w.line(format!("this.{index}.set(key, v - 1);"));
            w.close("}");
            w.close("}");
        }
        w.close("}");
        Ok(())
    }

    fn emit_add_edge(
        &self,
        w: &mut CodeWriter,
        lists: Lists,
        edge_list: bool,
        out_edge: &str,
        edge_desc: &str,
    ) {
        if edge_list {
            w.line("// insert new edge");
            w.line(format!("const edge = new {}(u, v, p);", self.edge_class));
            w.line("this._edges.add(edge);");
        }
        w.line("// update in/out edge list");
        let (to_v, to_u) = if edge_list {
            ("v, edge", "u, edge")
        } else {
            ("v", "u")
        };
        w.line(format!(
            "{}.{}.push(new {out_edge}({to_v}));",
            self.deref("u"),
            lists.out
        ));
        w.line(format!(
            "{}.{}.push(new {out_edge}({to_u}));",
            self.deref("v"),
            lists.in_
        ));
        if edge_list {
            w.line(format!("return new {edge_desc}(u, v, edge);"));
        } else {
            w.line(format!("return new {edge_desc}(u, v);"));
        }
    }

    fn emit_remove_edges(&self, w: &mut CodeWriter, lists: Lists, edge_list: bool) {
        w.line(format!("const source = {};", self.deref("u")));
        if edge_list {
            w.line("// remove all edges from edge list");
            w.line(format!(
                "impl.removeAllEdgesFromList(this._edges, source.{}, v);",
                lists.out
            ));
        }
        w.line("// remove out edges of u");
        Self::emit_splice(w, &format!("source.{}", lists.out), "target", "v", false);
        w.line("// remove in edges of v");
        w.line(format!("const target = {};", self.deref("v")));
        Self::emit_splice(w, &format!("target.{}", lists.in_), "target", "u", false);
    }

    fn emit_remove_edge(&self, w: &mut CodeWriter, lists: Lists, edge_list: bool) {
        let vd = &self.vertex_desc;
        w.line(format!("const u = e.source as {vd};"));
        w.line(format!("const v = e.target as {vd};"));
        w.line(format!("const source = {};", self.deref("u")));
        let out = format!("source.{}", lists.out);
        let in_ = format!("target.{}", lists.in_);
        if edge_list {
            Self::emit_splice(w, &out, "edge", "e.edge", true);
        } else {
            Self::emit_splice(w, &out, "target", "v", true);
        }
        w.line(format!("const target = {};", self.deref("v")));
        if edge_list {
            Self::emit_splice(w, &in_, "edge", "e.edge", true);
            w.line("// remove edge");
            w.line(format!("this._edges.delete(e.edge as {});", self.edge_class));
        } else {
            Self::emit_splice(w, &in_, "target", "u", true);
        }
    }

    // ============================================================
    // Property, component and polymorphic access
    // ============================================================

    fn emit_named(&self, w: &mut CodeWriter) -> Result<()> {
        let Some(name) = self.vertex_name("v")? else {
            return Ok(());
        };
        Self::section(w, "NamedGraph");
        w.open(format!("vertexName (v: {}): string {{", self.vertex_desc));
        w.line(format!("return {name};"));
        w.close("}");
        Ok(())
    }

    fn map_construction(&self, class: &str, container: &str) -> String {
        if self.is_vector() {
            format!("new {class}(this.{container})")
        } else {
            format!("new {class}()")
        }
    }

    fn emit_property_graph(&self, w: &mut CodeWriter) -> Result<()> {
        let name = &self.name;
        let vd = &self.vertex_desc;
        let vertex_map = format!("{name}VertexPropertyMap");
        Self::section(w, "PropertyGraph");
        let mut maps = Vec::new();
        if self.desc.has_vertex_property() {
            w.open(format!("vertexProperty (v: {vd}): {} {{", self.vertex_property));
            w.line(format!("return {}._property;", self.deref("v")));
            w.close("}");
            w.open(format!("vertexPropertyMap (): {vertex_map} {{"));
            w.line(format!("return {};", self.map_construction(&vertex_map, "_vertices")));
            w.close("}");
            maps.push(vertex_map.clone());
        }
        maps.extend(self.desc.components.iter().map(|c| self.component_map(c)));

        w.open(format!("get (tag: string): {} {{", maps.join(" | ")));
        w.line("switch (tag) {");
        if self.desc.has_vertex_property() {
            w.line("// VertexProperty");
            w.line("case 'vertex':");
            w.indented(|w| {
                w.line(format!("return {};", self.map_construction(&vertex_map, "_vertices")));
            });
        }
        if !self.desc.components.is_empty() {
            w.line("// Components");
        }
        for c in &self.desc.components {
            let field = self.component_field(c)?;
            w.line(format!("case '{}':", get_typescript_tag_type(&c.name)));
            w.indented(|w| {
                w.line(format!("return {};", self.map_construction(&self.component_map(c), &field)));
            });
        }
        w.line("default:");
        w.indented(|w| w.line("throw Error('property map not found');"));
        w.line("}");
        w.close("}");
        Ok(())
    }

    fn emit_component_graph(&self, w: &mut CodeWriter) -> Result<()> {
        let name = &self.name;
        let vd = &self.vertex_desc;
        Self::section(w, "ComponentGraph");
        w.open(format!(
            "component<T extends {name}Component> (id: T, v: {vd}): {name}ComponentType[T] {{"
        ));
        w.line("switch (id) {");
        for c in &self.desc.components {
            let value = self.component_value(c, "v")?;
            w.line(format!("case {name}Component.{}:", get_typescript_tag_type(&c.name)));
            w.indented(|w| w.line(format!("return {value} as {name}ComponentType[T];")));
        }
        w.line("default:");
        w.indented(|w| w.line("throw Error('component not found');"));
        w.line("}");
        w.close("}");

        w.open(format!(
            "componentMap<T extends {name}Component> (id: T): {name}ComponentPropertyMap[T] {{"
        ));
        w.line("switch (id) {");
        for c in &self.desc.components {
            let field = self.component_field(c)?;
            let map = self.map_construction(&self.component_map(c), &field);
            w.line(format!("case {name}Component.{}:", get_typescript_tag_type(&c.name)));
            w.indented(|w| w.line(format!("return {map} as {name}ComponentPropertyMap[T];")));
        }
        w.line("default:");
        w.indented(|w| w.line("throw Error('component map not found');"));
        w.line("}");
        w.close("}");

        for c in &self.desc.components {
            w.open(format!(
                "get{} (v: {vd}): {} {{",
                convert_tag(&c.name),
                self.component_type(c)
            ));
            w.line(format!("return {};", self.component_value(c, "v")?));
            w.close("}");
        }
        Ok(())
    }

    /// `if (vert._id === id) return object; else null or throw`.
    fn emit_checked_value(w: &mut CodeWriter, vert: &str, id: &str, cast: &str, fallible: bool) {
        w.open(format!("if ({vert}._id === {id}) {{"));
        w.line(format!("return {vert}._object as {cast};"));
        w.close("} else {");
        w.indented(|w| {
            if fallible {
                w.line("return null;");
            } else {
                w.line("throw Error('value id not match');");
            }
        });
        w.line("}");
    }

    fn emit_polymorphic_graph(&self, w: &mut CodeWriter) {
        let name = &self.name;
        let vd = &self.vertex_desc;
        let vert = self.deref("v");
        Self::section(w, "PolymorphicGraph");
        w.open(format!("holds (id: {name}Value, v: {vd}): boolean {{"));
        w.line(format!("return {vert}._id === id;"));
        w.close("}");
        w.open(format!("id (v: {vd}): {name}Value {{"));
        w.line(format!("return {vert}._id;"));
        w.close("}");
        w.open(format!("object (v: {vd}): {name}Object {{"));
        w.line(format!("return {vert}._object;"));
        w.close("}");
        for (method, fallible) in [("value", false), ("tryValue", true)] {
            let nullable = if fallible { " | null" } else { "" };
            w.open(format!(
                "{method}<T extends {name}Value> (id: T, v: {vd}): {name}ValueType[T]{nullable} {{"
            ));
            Self::emit_checked_value(w, &vert, "id", &format!("{name}ValueType[T]"), fallible);
            w.close("}");
        }

        w.open(format!("visitVertex (visitor: {name}Visitor, v: {vd}): unknown {{"));
        w.line(format!("const vert = {vert};"));
        w.line("switch (vert._id) {");
        for pair in &self.desc.polymorphic {
            let tag = Self::tag_name(pair);
            w.line(format!("case {name}Value.{tag}:"));
            w.indented(|w| {
                w.line(format!(
                    "return visitor.{}(vert._object as {});",
                    get_variable_name(tag),
                    self.ctx.type_name(&pair.value)
                ));
            });
        }
        w.line("default:");
        w.indented(|w| w.line("throw Error('polymorphic type not found');"));
        w.line("}");
        w.close("}");

        for (prefix, fallible) in [("get", false), ("tryGet", true)] {
            for pair in &self.desc.polymorphic {
                let tag = Self::tag_name(pair);
                let ty = self.ctx.type_name(&pair.value);
                let nullable = if fallible { " | null" } else { "" };
                w.open(format!("{prefix}{tag} (v: {vd}): {ty}{nullable} {{"));
                Self::emit_checked_value(w, &vert, &format!("{name}Value.{tag}"), &ty, fallible);
                w.close("}");
            }
        }
    }

    // ============================================================
    // Ownership and lookup
    // ============================================================

    fn emit_reference_graph(&self, w: &mut CodeWriter) {
        let vd = &self.vertex_desc;
        let nd = &self.nullable_desc;
        let null = self.null_vertex;
        let rd = self.reference_desc();
        let lists = self.reference_lists();
        let (child_iter, parent_iter) = self.reference_iters();

        Self::section(w, "ReferenceGraph");
        w.line(format!("// type reference_descriptor = {rd};"));
        w.line(format!("// type child_iterator = {child_iter};"));
        w.line(format!("// type parent_iterator = {parent_iter};"));
        w.open(format!("reference (u: {vd}, v: {vd}): boolean {{"));
        self.emit_find_target(w, &format!("{}.{}", self.deref("u"), lists.out));
        w.close("}");
        w.open(format!("parent (e: {rd}): {vd} {{"));
        w.line(format!("return e.source as {vd};"));
        w.close("}");
        w.open(format!("child (e: {rd}): {vd} {{"));
        w.line(format!("return e.target as {vd};"));
        w.close("}");
        w.open(format!("parents (v: {vd}): {parent_iter} {{"));
        w.line(format!(
            "return new {parent_iter}({}.{}.values(), v);",
            self.deref("v"),
            lists.in_
        ));
        w.close("}");
        w.open(format!("children (v: {vd}): {child_iter} {{"));
        w.line(format!(
            "return new {child_iter}({}.{}.values(), v);",
            self.deref("v"),
            lists.out
        ));
        w.close("}");
        w.open(format!("numParents (v: {vd}): number {{"));
        w.line(format!("return {}.{}.length;", self.deref("v"), lists.in_));
        w.close("}");
        w.open(format!("numChildren (v: {vd}): number {{"));
        w.line(format!("return {}.{}.length;", self.deref("v"), lists.out));
        w.close("}");

        w.open(format!("getParent (v: {vd}): {nd} {{"));
        w.open(format!("if (v === {null}) {{"));
        w.line(format!("return {null};"));
        w.close("}");
        w.line(format!("const list = {}.{};", self.deref("v"), lists.in_));
        w.open("if (list.length === 0) {");
        w.line(format!("return {null};"));
        w.close("} else {");
        w.indented(|w| w.line(format!("return {};", self.target_of("list[0]"))));
        w.line("}");
        w.close("}");

        w.open(format!("isAncestor (ancestor: {vd}, descendent: {vd}): boolean {{"));
        w.line(format!("const pseudo = {null};"));
        w.open("if (ancestor === descendent) {");
        w.line("// a vertex is not its own ancestor");
        w.line("return false;");
        w.close("}");
        w.open("if (ancestor === pseudo) {");
        w.line("// the pseudo root is the ancestor of every vertex");
        w.line("return true;");
        w.close("}");
        w.open("if (descendent === pseudo) {");
        w.line("return false;");
        w.close("}");
        w.open("for (let parent = this.getParent(descendent); parent !== pseudo;) {");
        w.open("if (ancestor === parent) {");
        w.line("return true;");
        w.close("}");
        w.line("parent = this.getParent(parent);");
        w.close("}");
        w.line("return false;");
        w.close("}");
    }

    fn emit_mutable_reference(&self, w: &mut CodeWriter) {
        let vd = &self.vertex_desc;
        let rd = self.reference_desc();
        let alias = self.desc.is_alias_graph();
        let property = alias && self.desc.has_edge_property();
        Self::section(w, "MutableReferenceGraph");
        if property {
            w.open(format!(
                "addReference (u: {vd}, v: {vd}, p: {}): {rd} | null {{",
                self.edge_property
            ));
            w.line("return this.addEdge(u, v, p);");
        } else {
            w.open(format!("addReference (u: {vd}, v: {vd}): {rd} | null {{"));
            if alias {
                w.line("return this.addEdge(u, v);");
            } else {
                self.emit_add_edge(w, REFERENCES, false, "impl.OutE", rd);
            }
        }
        w.close("}");
        w.open(format!("removeReference (e: {rd}): void {{"));
        if alias {
            w.line("this.removeEdge(e);");
        } else {
            self.emit_remove_edge(w, REFERENCES, false);
        }
        w.close("}");
        w.open(format!("removeReferences (u: {vd}, v: {vd}): void {{"));
        if alias {
            w.line("this.removeEdges(u, v);");
        } else {
            self.emit_remove_edges(w, REFERENCES, false);
        }
        w.close("}");
    }

    fn emit_addressable(&self, w: &mut CodeWriter) -> Result<()> {
        let vd = &self.vertex_desc;
        let nd = &self.nullable_desc;
        let null = self.null_vertex;
        let lists = self.reference_lists();
        if let (Some(root_name), Some(child_name)) = (self.vertex_name("v")?, self.vertex_name("child")?) {
            Self::section(w, "ParentGraph");
            w.open(format!("locateChild (u: {nd}, name: string): {nd} {{"));
            w.open(format!("if (u === {null}) {{"));
            if self.is_vector() {
                w.open("for (const v of this._vertices.keys()) {");
            } else {
                w.open("for (const v of this._vertices) {");
            }
            w.open(format!(
                "if ({}.{}.length === 0 && {root_name} === name) {{",
                self.deref("v"),
                lists.in_
            ));
            w.line("return v;");
            w.close("}");
            w.close("}");
            w.line(format!("return {null};"));
            w.close("}");
            w.open(format!("for (const oe of {}.{}) {{", self.deref("u"), lists.out));
            w.line(format!("const child = {};", self.target_of("oe")));
            w.open(format!("if (name === {child_name}) {{"));
            w.line("return child;");
            w.close("}");
            w.close("}");
            w.line(format!("return {null};"));
            w.close("}");
        }

        Self::section(w, "AddressableGraph");
        w.open("contains (absPath: string): boolean {");
        w.line(format!(
            "return impl.findRelative(this, {null}, absPath) as {vd} !== {null};"
        ));
        w.close("}");
        w.open(format!("locate (absPath: string): {vd} {{"));
        w.line(format!("return impl.findRelative(this, {null}, absPath) as {vd};"));
        w.close("}");
        if self.is_vector() {
            w.open(format!("locateRelative (path: string, start = {null}): {vd} {{"));
        } else {
            w.open(format!(
                "locateRelative (path: string, start: {nd} = {null}): {nd} {{"
            ));
        }
        w.line(format!("return impl.findRelative(this, start, path) as {nd};"));
        w.close("}");
        w.open(format!("path (v: {vd}): string {{"));
        w.line("return impl.getPath(this, v);");
        w.close("}");
        Ok(())
    }

    fn emit_uuid(&self, w: &mut CodeWriter) {
        let Some(map) = self.desc.vertex_maps.first() else {
            return;
        };
        let Ok(index) = self.ctx.member_name(&map.member_name, false) else {
            return;
        };
        let key = self.ctx.type_name(&map.key_type);
        let vd = &self.vertex_desc;
        Self::section(w, "UuidGraph");
        w.open(format!("vertex (key: {key}): {vd} {{"));
        w.line(format!("const v = this.{index}.get(key);"));
        w.open("if (v === undefined) {");
        w.line("throw Error('vertex not found');");
        w.close("}");
        w.line("return v;");
        w.close("}");
        w.open(format!("find (key: {key}): {vd} {{"));
        w.line(format!("return this.{index}.get(key) ?? {};", self.null_vertex));
        w.close("}");
    }

    fn emit_storage(&self, w: &mut CodeWriter) -> Result<()> {
        let desc = self.desc;
        w.blank();
        if !desc.components.is_empty() {
            let names: Vec<String> = desc
                .components
                .iter()
                .map(|c| format!("'{}'", get_typescript_tag_type(&c.name)))
                .collect();
            w.line(format!("readonly components: string[] = [{}];", names.join(", ")));
        }
        let vertex = &self.vertex_class;
        if self.is_vector() {
            w.line(format!("readonly _vertices: {vertex}[] = [];"));
        } else {
            w.line(format!("readonly _vertices: Set<{vertex}> = new Set<{vertex}>();"));
        }
        if self.has_edge_list() {
            let edge = &self.edge_class;
            w.line(format!("readonly _edges: Set<{edge}> = new Set<{edge}>();"));
        }
        if self.is_vector() {
            for c in &desc.components {
                w.line(format!(
                    "readonly {}: {}[] = [];",
                    self.component_field(c)?,
                    self.component_type(c)
                ));
            }
        }
        for map in &desc.vertex_maps {
            let key = self.ctx.type_name(&map.key_type);
            w.line(format!(
                "readonly {}: Map<{key}, number> = new Map<{key}, number>();",
                self.ctx.member_name(&map.member_name, false)?
            ));
        }
        ClassBody::new(self.ctx, self.v, self.composition, None).emit(w, false)
    }
}
