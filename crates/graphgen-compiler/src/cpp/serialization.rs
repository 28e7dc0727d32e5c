//! `Serialization.h`: `save`/`load` overloads over `OutputArchive` and
//! `InputArchive`.
//!
//! Root-level structs write their members in declaration order. Graphs write
//! their vertices in index order, then the edges their ownership relation
//! does not already imply. Declarations and members flagged
//! `no_serialization` are left out, and so are `impl_detail` members and
//! pointers.

use graphgen_core::syntax::{Composition, Member};
use graphgen_core::{Features, GenerationFlags, Kind, VertexId};
use tracing::debug;

use super::graph::GraphEmitter;
use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Result};

pub fn emit_serialization(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    let has_graph = ctx.has_kind(|k| matches!(k, Kind::Graph(_)));
    if has_graph {
        include(&mut w, "<limits>");
        include(&mut w, "<stdexcept>");
    }
    include(&mut w, &ctx.config.archive_header);
    if ctx.module.has(Features::TYPES) {
        include(&mut w, &ctx.module.file_path("Types.h"));
    }
    if has_graph && ctx.module.has(Features::GRAPHS) {
        include(&mut w, &ctx.module.file_path("Graphs.h"));
    }
    for dep in ctx.dependency_files(Features::SERIALIZATION, "Serialization.h") {
        include(&mut w, &dep);
    }

    let syntax = ctx.syntax;
    let mut ns = Namespaces::new();
    for v in ctx.top_level() {
        let traits = syntax.traits(v);
        if traits.unknown || traits.has(GenerationFlags::NO_SERIALIZATION) {
            continue;
        }
        let namespace = syntax.get_namespace(v);
        match syntax.kind(v) {
            Kind::Struct(c) if !traits.interface => {
                ns.enter(&mut w, &namespace);
                ns.separate(&mut w);
                emit_struct(ctx, &mut w, v, &namespace, c);
            }
            Kind::Graph(_) => {
                let graph = GraphEmitter::new(ctx, v)?;
                debug!(graph = %syntax.get_path(v), "emit graph serialization");
                ns.enter(&mut w, &namespace);
                ns.separate(&mut w);
                graph.emit_serialization(&mut w);
            }
            _ => {}
        }
    }
    ns.close_all(&mut w);
    ctx.footer(&mut w);
    Ok(w.finish())
}

/// Members written by value, in declaration order.
pub(crate) fn is_serialized(m: &Member) -> bool {
    !m.pointer
        && !m.flags.contains(GenerationFlags::NO_SERIALIZATION)
        && !m.flags.contains(GenerationFlags::IMPL_DETAIL)
}

fn emit_struct(ctx: &CppContext<'_>, w: &mut CodeWriter, v: VertexId, namespace: &str, c: &Composition) {
    let name = ctx.syntax.get_cpp_name(namespace, v);
    let empty = !c.members.iter().any(is_serialized);
    for (op, archive, constness) in [("save", "OutputArchive", "const "), ("load", "InputArchive", "")] {
        if op == "load" {
            w.blank();
        }
        if empty {
            w.line(format!(
                "inline void {op}({archive}& /*ar*/, {constness}{name}& /*v*/) {{}}"
            ));
            continue;
        }
        w.open(format!("inline void {op}({archive}& ar, {constness}{name}& v) {{"));
        for m in &c.members {
            if m.flags.contains(GenerationFlags::NO_SERIALIZATION)
                || m.flags.contains(GenerationFlags::IMPL_DETAIL)
            {
                continue;
            }
            if m.pointer {
                w.line(format!(
                    "// skip, {}: {}",
                    m.member_name,
                    ctx.type_name(namespace, &m.type_path)
                ));
                continue;
            }
            w.line(format!("{op}(ar, v.{});", m.member_name));
        }
        w.close("}");
    }
}
