//! `Names.h`: `getName` overloads for enums, tags, structs and graphs.

use graphgen_core::{Kind, VertexId};

use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Result};

pub fn emit_names(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    include(&mut w, &ctx.module.file_path("Types.h"));

    let mut ns = Namespaces::new();
    for v in ctx.top_level() {
        emit_vertex(ctx, &mut w, &mut ns, v);
    }
    ns.close_all(&mut w);
    ctx.footer(&mut w);
    Ok(w.finish())
}

fn emit_vertex(ctx: &CppContext<'_>, w: &mut CodeWriter, ns: &mut Namespaces, v: VertexId) {
    let syntax = ctx.syntax;
    let vertex = syntax.vertex(v);
    let namespace = syntax.get_namespace(v);
    let qualified = syntax.get_cpp_name(&namespace, v);
    match &vertex.kind {
        Kind::Enum(e) => {
            ns.enter(w, &namespace);
            ns.separate(w);
            w.open(format!("inline const char* getName({qualified} e) noexcept {{"));
            w.open("switch (e) {");
            for value in &e.values {
                w.line(format!("case {qualified}::{}:", value.name));
                w.indented(|w| w.line(format!("return \"{}\";", value.name)));
            }
            w.close("}");
            w.line("return \"\";");
            w.close("}");
        }
        Kind::Tag(_) | Kind::Struct(_) | Kind::Graph(_) => {
            ns.enter(w, &namespace);
            ns.separate(w);
            w.line(format!(
                "inline const char* getName(const {qualified}& /*v*/) noexcept {{ return \"{}\"; }}",
                vertex.name
            ));
            for child in ctx.nested(v) {
                emit_vertex(ctx, w, ns, child);
            }
        }
        _ => {}
    }
}
