//! `Fwd.h`: forward declarations and variant aliases.

use graphgen_core::{Features, Kind};

use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Result};

pub fn emit_fwd(ctx: &CppContext<'_>) -> Result<String> {
    let syntax = ctx.syntax;
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    if ctx.has_kind(|k| matches!(k, Kind::Variant(_))) {
        include(&mut w, "<variant>");
    }
    for dep in ctx.dependency_files(Features::FWD, "Fwd.h") {
        include(&mut w, &dep);
    }

    let mut ns = Namespaces::new();
    for v in ctx.top_level() {
        let vertex = syntax.vertex(v);
        let name = &vertex.name;
        let line = match &vertex.kind {
            Kind::Struct(_) if vertex.traits.class => format!("class {name};"),
            Kind::Struct(_) | Kind::Graph(_) | Kind::Tag(_) => format!("struct {name};"),
            Kind::Enum(e) if vertex.traits.class || !e.underlying_type.is_empty() => {
                let class = if vertex.traits.class { "class " } else { "" };
                if e.underlying_type.is_empty() {
                    format!("enum {class}{name};")
                } else {
                    format!("enum {class}{name} : {};", e.underlying_type)
                }
            }
            Kind::Variant(variant) => {
                let scope = syntax.get_scope(v);
                let alternatives: Vec<String> = variant
                    .variants
                    .iter()
                    .map(|p| ctx.type_name(&scope, p))
                    .collect();
                format!("using {name} = std::variant<{}>;", alternatives.join(", "))
            }
            _ => continue,
        };
        ns.enter(&mut w, &syntax.get_namespace(v));
        ns.begin(&mut w);
        w.line(line);
    }
    ns.close_all(&mut w);
    ctx.footer(&mut w);
    Ok(w.finish())
}
