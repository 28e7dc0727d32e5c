//! `Reflection.h`: member visitors and enumerator tables.
//!
//! Structs and members flagged `no_serialization` are left out.

use graphgen_core::naming::get_member_name;
use graphgen_core::{GenerationFlags, Kind, VertexId};

use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Result};

pub fn emit_reflection(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    include(&mut w, "<array>");
    include(&mut w, "<string_view>");
    include(&mut w, "<utility>");
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
    if syntax.has_flag(v, GenerationFlags::NO_SERIALIZATION) {
        return;
    }
    let vertex = syntax.vertex(v);
    let namespace = syntax.get_namespace(v);
    let qualified = syntax.get_cpp_name(&namespace, v);
    match &vertex.kind {
        Kind::Enum(e) => {
            ns.enter(w, &namespace);
            ns.separate(w);
            let table = qualified.replace("::", "");
            w.open(format!(
                "inline constexpr std::array<std::pair<{qualified}, std::string_view>, {}> {table}Enumerators{{{{",
                e.values.len()
            ));
            for value in &e.values {
                w.line(format!("{{{qualified}::{n}, \"{n}\"}},", n = value.name));
            }
            w.close("}};");
        }
        Kind::Struct(composition) if !vertex.traits.interface => {
            ns.enter(w, &namespace);
            ns.separate(w);
            let members: Vec<&str> = composition
                .members
                .iter()
                .filter(|m| !m.flags.contains(GenerationFlags::NO_SERIALIZATION))
                .map(|m| m.member_name.as_str())
                .collect();
            for constness in ["const ", ""] {
                if constness.is_empty() {
                    w.blank();
                }
                w.line("template <class Visitor>");
                w.open(format!(
                    "void visitMembers({constness}{qualified}& v, Visitor&& visitor) {{"
                ));
                for m in &members {
                    let key = get_member_name(m, true).unwrap_or_default();
                    w.line(format!("visitor(\"{key}\", v.{m});"));
                }
                w.close("}");
            }
            for child in ctx.nested(v) {
                emit_vertex(ctx, w, ns, child);
            }
        }
        _ => {}
    }
}
