//! Classes, enums and variants.

use graphgen_core::naming::camel_to_variable;
use graphgen_core::syntax::{Composition, Constructor, Enum, Member, Variant};
use graphgen_core::{GenerationFlags, VertexId};

use super::TsContext;
use crate::{CodeWriter, Error, Result};

const MAX_INLINE_PARAMS: usize = 4;

pub(super) fn emit_enum(ctx: &TsContext<'_>, w: &mut CodeWriter, v: VertexId, e: &Enum) {
    let name = ctx.syntax.get_typescript_typename(v);
    w.open(format!("export const enum {name} {{"));
    for value in &e.values {
        if value.value.is_empty() {
            w.line(format!("{},", value.name));
        } else {
            w.line(format!("{} = {},", value.name, value.value.replace("::", ".")));
        }
    }
    w.close("}");
    if e.is_flags {
        w.blank();
        w.open(format!(
            "export function combine{name} (lhs: {name}, rhs: {name}): {name} {{"
        ));
        w.line(format!("return (lhs | rhs) as {name};"));
        w.close("}");
        w.blank();
        w.open(format!(
            "export function has{name} (flags: {name}, bits: {name}): boolean {{"
        ));
        w.line("return (flags & bits) !== 0;");
        w.close("}");
    }
}

/// Tag variants become enums over their tags, others a union type.
pub(super) fn emit_variant(ctx: &TsContext<'_>, w: &mut CodeWriter, v: VertexId, variant: &Variant) {
    let syntax = ctx.syntax;
    let name = syntax.get_typescript_typename(v);
    if syntax.is_tag(v) {
        w.open(format!("export const enum {name} {{"));
        for t in variant.variants.iter().filter_map(|p| syntax.locate(p)) {
            w.line(format!("{},", syntax.get_typescript_tag_name(t)));
        }
        w.close("}");
    } else {
        let alternatives: Vec<String> = variant
            .variants
            .iter()
            .map(|p| ctx.type_name(p))
            .collect();
        w.line(format!("export type {name} = {};", alternatives.join(" | ")));
    }
}

pub(super) fn emit_class(ctx: &TsContext<'_>, w: &mut CodeWriter, v: VertexId) -> Result<()> {
    let syntax = ctx.syntax;
    let vertex = syntax.vertex(v);
    let name = syntax.get_typescript_typename(v);
    let base = vertex.inherits.first().and_then(|p| syntax.locate(p));
    match base {
        Some(b) => w.open(format!(
            "export class {name} extends {} {{",
            syntax.get_typescript_typename(b)
        )),
        None => w.open(format!("export class {name} {{")),
    }
    let pooled = vertex.traits.has(GenerationFlags::POOL_OBJECT);
    ClassBody::new(ctx, v, syntax.composition(v), base).emit(w, pooled)?;
    w.close("}");
    Ok(())
}

/// Constructor, accessors, verbatim functions and fields of a class. Shared
/// with graph classes, which append their own members.
pub(super) struct ClassBody<'a> {
    ctx: &'a TsContext<'a>,
    owner: VertexId,
    composition: &'a Composition,
    base: Option<VertexId>,
}

impl<'a> ClassBody<'a> {
    pub(super) fn new(
        ctx: &'a TsContext<'a>,
        owner: VertexId,
        composition: &'a Composition,
        base: Option<VertexId>,
    ) -> Self {
        Self {
            ctx,
            owner,
            composition,
            base,
        }
    }

    pub(super) fn emit(&self, w: &mut CodeWriter, pooled: bool) -> Result<()> {
        if let Some(ctor) = self.composition.constructors.first() {
            self.emit_constructor(w, ctor)?;
        }
        self.emit_accessors(w)?;
        for function in &self.composition.typescript_functions {
            w.text(function);
        }
        if pooled {
            self.emit_reset(w)?;
        }
        self.emit_fields(w, pooled)
    }

    fn ctor_members(&self, owner: VertexId, c: &'a Composition, ctor: &Constructor) -> Result<Vec<&'a Member>> {
        ctor.indices
            .iter()
            .map(|&i| {
                c.members.get(i as usize).ok_or_else(|| Error::InvalidConstructor {
                    owner: self.ctx.syntax.get_path(owner),
                    index: i,
                })
            })
            .collect()
    }

    /// Parameters of the first constructor, base parameters first.
    pub(super) fn parameters(&self, ctor: &Constructor) -> Result<Vec<String>> {
        let mut params = Vec::new();
        if let Some((base, base_ctor)) = self.base_constructor() {
            let c = self.ctx.syntax.composition(base);
            for m in self.ctor_members(base, c, base_ctor)? {
                params.push(self.parameter(m, base_ctor.has_default)?);
            }
        }
        for m in self.ctor_members(self.owner, self.composition, ctor)? {
            params.push(self.parameter(m, ctor.has_default)?);
        }
        Ok(params)
    }

    fn parameter(&self, m: &Member, has_default: bool) -> Result<String> {
        Ok(if has_default {
            format!(
                "{} = {}",
                self.ctx.typed_member_name(m, true, false)?,
                self.ctx.initial_value(m)
            )
        } else {
            self.ctx.typed_member_name(m, true, true)?
        })
    }

    fn base_constructor(&self) -> Option<(VertexId, &'a Constructor)> {
        let base = self.base?;
        let c = self.ctx.syntax.kind(base).composition()?;
        c.constructors.first().map(|ctor| (base, ctor))
    }

    fn open_signature(w: &mut CodeWriter, head: &str, params: &[String], tail: &str) {
        if params.len() > MAX_INLINE_PARAMS {
            w.open(format!("{head}("));
            for p in params {
                w.line(format!("{p},"));
            }
            w.close(format!("){tail} {{"));
            w.indent();
        } else {
            w.open(format!("{head}({}){tail} {{", params.join(", ")));
        }
    }

    fn emit_constructor(&self, w: &mut CodeWriter, ctor: &Constructor) -> Result<()> {
        let params = self.parameters(ctor)?;
        Self::open_signature(w, "constructor ", &params, "");
        if let Some((base, base_ctor)) = self.base_constructor() {
            let c = self.ctx.syntax.composition(base);
            let args = self
                .ctor_members(base, c, base_ctor)?
                .into_iter()
                .map(|m| self.ctx.member_name(&m.member_name, true))
                .collect::<Result<Vec<_>>>()?;
            w.line(format!("super({});", args.join(", ")));
        }
        for (i, m) in self.composition.members.iter().enumerate() {
            if ctor.indices.contains(&(i as u32)) {
                w.line(format!(
                    "this.{} = {};",
                    self.ctx.member_name(&m.member_name, m.public)?,
                    self.ctx.member_name(&m.member_name, true)?
                ));
            }
        }
        w.close("}");
        Ok(())
    }

    /// `getX`/`setX` methods over private `mX` members.
    fn emit_accessors(&self, w: &mut CodeWriter) -> Result<()> {
        for method in self.composition.methods.iter().filter(|m| !m.skip) {
            let stem = match (method.getter, method.setter) {
                (true, _) => method.function_name.strip_prefix("get"),
                (_, true) => method.function_name.strip_prefix("set"),
                _ => None,
            };
            let Some(stem) = stem.filter(|s| !s.is_empty()) else {
                continue;
            };
            let Some((_, m)) = self.composition.member(&format!("m{stem}")) else {
                continue;
            };
            let accessor = camel_to_variable(stem);
            let field = self.ctx.member_name(&m.member_name, m.public)?;
            if accessor == field {
                continue;
            }
            let ty = self.ctx.type_name(&m.type_path);
            if method.getter {
                w.open(format!("get {accessor} (): {ty} {{"));
                w.line(format!("return this.{field};"));
            } else {
                w.open(format!("set {accessor} (value: {ty}) {{"));
                w.line(format!("this.{field} = value;"));
            }
            w.close("}");
        }
        Ok(())
    }

    /// Reinitializes a pooled object in place; containers are emptied.
    fn emit_reset(&self, w: &mut CodeWriter) -> Result<()> {
        let (params, indices) = match self.composition.constructors.first() {
            Some(ctor) => (
                self.ctor_members(self.owner, self.composition, ctor)?
                    .into_iter()
                    .map(|m| self.parameter(m, ctor.has_default))
                    .collect::<Result<Vec<_>>>()?,
                ctor.indices.clone(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        Self::open_signature(w, "reset ", &params, ": void");
        for (i, m) in self.composition.members.iter().enumerate() {
            if m.flags.contains(GenerationFlags::IMPL_DETAIL) {
                continue;
            }
            let field = self.ctx.member_name(&m.member_name, m.public)?;
            if indices.contains(&(i as u32)) {
                let param = self.ctx.member_name(&m.member_name, true)?;
                w.line(format!("this.{field} = {param};"));
                continue;
            }
            let initial = self.ctx.initial_value(m);
            if initial == "[]" {
                w.line(format!("this.{field}.length = 0;"));
            } else if initial.starts_with("new Map") || initial.starts_with("new Set") {
                w.line(format!("this.{field}.clear();"));
            } else {
                w.line(format!("this.{field} = {initial};"));
            }
        }
        w.close("}");
        Ok(())
    }

    fn emit_fields(&self, w: &mut CodeWriter, pooled: bool) -> Result<()> {
        let ctor = self.composition.constructors.first();
        for (i, m) in self.composition.members.iter().enumerate() {
            if m.flags.contains(GenerationFlags::IMPL_DETAIL) {
                continue;
            }
            let mut field = String::new();
            if !m.public {
                field.push_str("private ");
            }
            if m.pointer {
                field.push_str("/*pointer*/ ");
            } else if !pooled
                && (m.reference || m.is_const || !self.ctx.is_value_type(&m.type_path))
            {
                field.push_str("readonly ");
            }
            let initialized = ctor.is_some_and(|c| c.indices.contains(&(i as u32)));
            if initialized {
                field.push_str(&self.ctx.typed_member_name(m, m.public, true)?);
            } else {
                field.push_str(&self.ctx.typed_member_name(m, m.public, false)?);
                field.push_str(" = ");
                field.push_str(&self.ctx.initial_value(m));
            }
            field.push(';');
            w.line(field);
        }
        Ok(())
    }
}
