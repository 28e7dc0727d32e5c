//! `Types.h` and `Types.cpp`.

use graphgen_core::syntax::Enum;
use graphgen_core::{Features, GenerationFlags, Kind, VertexId};

use super::graph::GraphEmitter;
use super::structs::StructEmitter;
use super::{CppContext, Namespaces, include};
use crate::{CodeWriter, Result};

/// Declaration of `v` in the header: enums, tags, structs, graphs, aliases,
/// defines. Variants live in `Fwd.h` when that file is generated.
pub(super) fn emit_declaration(ctx: &CppContext<'_>, w: &mut CodeWriter, v: VertexId) -> Result<()> {
    let syntax = ctx.syntax;
    let vertex = syntax.vertex(v);
    let scope = syntax.get_scope(v);
    match &vertex.kind {
        Kind::Enum(e) => emit_enum(ctx, w, v, e),
        Kind::Tag(tag) => {
            w.line(format!("struct {} {{}};", vertex.name));
            if tag.entity {
                let name = &vertex.name;
                w.blank();
                w.line(format!(
                    "inline bool operator<(const {name}& /*lhs*/, const {name}& /*rhs*/) noexcept {{ return false; }}"
                ));
                w.line(format!(
                    "inline bool operator==(const {name}& /*lhs*/, const {name}& /*rhs*/) noexcept {{ return true; }}"
                ));
            }
        }
        Kind::Struct(_) => StructEmitter::new(ctx, v).emit_declaration(w)?,
        Kind::Graph(_) => GraphEmitter::new(ctx, v)?.emit_class(w)?,
        Kind::Alias(alias) => {
            w.line(format!(
                "using {} = {};",
                vertex.name,
                ctx.type_name(&scope, &alias.target)
            ));
        }
        Kind::Variant(variant) => {
            let alternatives: Vec<String> = variant
                .variants
                .iter()
                .map(|p| ctx.type_name(&scope, p))
                .collect();
            w.line(format!(
                "using {} = std::variant<{}>;",
                vertex.name,
                alternatives.join(", ")
            ));
        }
        Kind::Define(define) => w.text(&define.content),
        Kind::Namespace
        | Kind::Value
        | Kind::Instance(_)
        | Kind::Concept
        | Kind::Container
        | Kind::Map
        | Kind::Optional => {}
    }
    Ok(())
}

/// Kinds with a declaration at namespace level in the header.
fn is_declared(ctx: &CppContext<'_>, v: VertexId) -> bool {
    match ctx.syntax.kind(v) {
        Kind::Variant(_) => !ctx.module.has(Features::FWD),
        Kind::Enum(_)
        | Kind::Tag(_)
        | Kind::Struct(_)
        | Kind::Graph(_)
        | Kind::Alias(_)
        | Kind::Define(_) => true,
        _ => false,
    }
}

fn emit_enum(ctx: &CppContext<'_>, w: &mut CodeWriter, v: VertexId, e: &Enum) {
    let vertex = ctx.syntax.vertex(v);
    let name = &vertex.name;
    let class = if vertex.traits.class { "class " } else { "" };
    let underlying = if e.underlying_type.is_empty() {
        String::new()
    } else {
        format!(" : {}", e.underlying_type)
    };
    w.open(format!("enum {class}{name}{underlying} {{"));
    for value in &e.values {
        if value.value.is_empty() {
            w.line(format!("{},", value.name));
        } else {
            w.line(format!("{} = {},", value.name, value.value));
        }
    }
    w.close("};");
    if e.is_flags {
        let nested = ctx
            .syntax
            .parent(v)
            .is_some_and(|p| !ctx.syntax.kind(p).is_namespace());
        emit_flag_operators(w, name, &e.underlying_type, nested);
    }
}

fn emit_flag_operators(w: &mut CodeWriter, name: &str, underlying: &str, nested: bool) {
    let prefix = if nested { "friend inline" } else { "inline" };
    let ut = if underlying.is_empty() {
        format!("std::underlying_type_t<{name}>")
    } else {
        underlying.to_owned()
    };
    for op in ["|", "&"] {
        w.blank();
        w.open(format!(
            "{prefix} {name} operator{op}(const {name} lhs, const {name} rhs) noexcept {{"
        ));
        w.line(format!(
            "return static_cast<{name}>(static_cast<{ut}>(lhs) {op} static_cast<{ut}>(rhs));"
        ));
        w.close("}");
    }
    for op in ["|", "&"] {
        w.blank();
        w.open(format!(
            "{prefix} {name}& operator{op}=({name}& lhs, const {name} rhs) noexcept {{"
        ));
        w.line(format!("return lhs = lhs {op} rhs;"));
        w.close("}");
    }
    w.blank();
    w.open(format!("{prefix} bool operator!({name} e) noexcept {{"));
    w.line(format!("return e == static_cast<{name}>(0);"));
    w.close("}");
    w.blank();
    w.open(format!("{prefix} {name} operator~({name} e) noexcept {{"));
    w.line(format!("return static_cast<{name}>(~static_cast<{ut}>(e));"));
    w.close("}");
    w.blank();
    w.open(format!("{prefix} bool any({name} e) noexcept {{"));
    w.line("return !!e;");
    w.close("}");
}

/// `<prefix>Types.h`.
pub fn emit_types_header(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    if ctx.module.has(Features::FWD) {
        include(&mut w, &ctx.module.file_path("Fwd.h"));
    } else if ctx.has_kind(|k| matches!(k, Kind::Variant(_))) {
        include(&mut w, "<variant>");
    }
    for dep in ctx.dependency_files(Features::TYPES, "Types.h") {
        include(&mut w, &dep);
    }
    if ctx.has_kind(|k| matches!(k, Kind::Graph(_))) {
        include(&mut w, &ctx.config.impl_header);
    }
    for header in &ctx.module.hpp_headers {
        include(&mut w, header);
    }

    let mut ns = Namespaces::new();
    let mut hashed = Vec::new();
    for v in ctx.top_level() {
        if !is_declared(ctx, v) {
            continue;
        }
        ns.enter(&mut w, &ctx.syntax.get_namespace(v));
        ns.separate(&mut w);
        emit_declaration(ctx, &mut w, v)?;
        if ctx.syntax.has_flag(v, GenerationFlags::HASH_COMBINE) && ctx.syntax.is_composition(v) {
            hashed.push(v);
        }
    }
    ns.close_all(&mut w);

    if !hashed.is_empty() {
        w.blank();
        w.line("namespace std {");
        for v in hashed {
            w.blank();
            StructEmitter::new(ctx, v).emit_hash(&mut w);
        }
        w.blank();
        w.line("} // namespace std");
    }
    ctx.footer(&mut w);
    Ok(w.finish())
}

/// `<prefix>Types.cpp`: out-of-line constructors and graph members.
pub fn emit_types_source(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    include(&mut w, &ctx.module.file_path("Types.h"));
    for header in &ctx.module.cpp_headers {
        include(&mut w, header);
    }

    let mut order = Vec::new();
    for v in ctx.top_level() {
        collect_compositions(ctx, v, &mut order);
    }

    let mut ns = Namespaces::new();
    for v in order {
        let mut body = CodeWriter::new();
        if ctx.syntax.kind(v).graph().is_some() {
            GraphEmitter::new(ctx, v)?.emit_definitions(&mut body)?;
        } else {
            StructEmitter::new(ctx, v).emit_definitions(&mut body)?;
        }
        if body.is_empty() {
            continue;
        }
        ns.enter(&mut w, &ctx.syntax.get_namespace(v));
        ns.separate(&mut w);
        w.text(body.as_str());
    }
    ns.close_all(&mut w);
    ctx.footer(&mut w);
    Ok(w.finish())
}

/// Structs and graphs in definition order, nested structs after their owner.
fn collect_compositions(ctx: &CppContext<'_>, v: VertexId, order: &mut Vec<VertexId>) {
    if !ctx.syntax.is_composition(v) {
        return;
    }
    order.push(v);
    for child in ctx.nested(v) {
        collect_compositions(ctx, child, order);
    }
}
