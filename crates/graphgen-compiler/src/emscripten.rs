//! Embind registrations for WebAssembly builds.
//!
//! `<prefix>Wasm.h` registers every exported struct of a module inside one
//! `EMSCRIPTEN_BINDINGS` block. Plain aggregates become `value_object`s;
//! structs with methods, bases or an allocator become `class_`es whose
//! public members are exposed through generated getter and setter helpers.

use graphgen_core::naming::{camel_to_variable, get_member_name};
use graphgen_core::syntax::{Composition, Member};
use graphgen_core::{GenerationFlags, Kind, VertexId};
use indexmap::IndexSet;
use tracing::debug;

use crate::cpp::{CppContext, DEFAULT_RESOURCE, include};
use crate::{CodeWriter, Error, Result};

/// Exported structs of the module, in declaration order.
fn exports<'a>(ctx: &CppContext<'a>) -> Vec<(VertexId, &'a Composition)> {
    let syntax = ctx.syntax;
    ctx.compiled
        .module_vertices(ctx.module_path)
        .filter(|&v| {
            let traits = syntax.traits(v);
            !traits.import
                && !traits.unknown
                && !traits.interface
                && !traits.has(GenerationFlags::IMPL_DETAIL)
        })
        .filter_map(|v| match syntax.kind(v) {
            Kind::Struct(c) => Some((v, c)),
            _ => None,
        })
        .collect()
}

fn exported_members(c: &Composition) -> impl Iterator<Item = &Member> {
    c.members
        .iter()
        .filter(|m| !m.flags.contains(GenerationFlags::IMPL_DETAIL))
}

/// `Render` for module `/Render`.
fn module_name(module_path: &str) -> &str {
    module_path.rsplit('/').next().unwrap_or(module_path)
}

/// Registration of one struct plus the helpers it refers to.
struct Binding<'a, 'c> {
    ctx: &'c CppContext<'a>,
    v: VertexId,
    composition: &'a Composition,
    /// Script-visible name.
    name: &'a str,
    cpp: String,
    pmr: bool,
}

impl<'a, 'c> Binding<'a, 'c> {
    fn new(ctx: &'c CppContext<'a>, v: VertexId, composition: &'a Composition) -> Self {
        let syntax = ctx.syntax;
        Self {
            ctx,
            v,
            composition,
            name: &syntax.vertex(v).name,
            cpp: syntax.get_cpp_name("", v),
            pmr: syntax.is_pmr(v),
        }
    }

    fn is_value_object(&self) -> bool {
        let c = self.composition;
        c.member_functions.is_empty()
            && c.methods.is_empty()
            && !self.pmr
            && !self.ctx.syntax.is_derived(self.v)
    }

    fn field_name(m: &Member) -> Result<String> {
        Ok(get_member_name(&m.member_name, true)?)
    }

    fn helper(&self, m: &Member, suffix: &str) -> String {
        format!("{}_{}_{suffix}", self.name, m.member_name)
    }

    /// Allocator default construction and member-wise assignment.
    fn emit_pmr_helpers(&self, w: &mut CodeWriter) {
        let cpp = &self.cpp;
        w.blank();
        w.line("template <>");
        w.open(format!("inline {cpp} creator<{cpp}>() {{"));
        w.line(format!("return {cpp}{{{DEFAULT_RESOURCE}}};"));
        w.close("}");

        w.blank();
        w.line("template <>");
        let members: Vec<&Member> = exported_members(self.composition)
            .filter(|m| !m.is_const)
            .collect();
        if members.is_empty() {
            w.line(format!(
                "inline void assignVal({cpp}& /*t*/, const {cpp}& /*v*/) {{}}"
            ));
            return;
        }
        w.open(format!("inline void assignVal({cpp}& t, const {cpp}& v) {{"));
        for m in members {
            w.line(format!("assignVal(t.{0}, v.{0});", m.member_name));
        }
        w.close("}");
    }

    /// Accessors behind the `.property` entries of public members.
    fn emit_accessors(&self, w: &mut CodeWriter) {
        let cpp = &self.cpp;
        for m in exported_members(self.composition).filter(|m| m.public) {
            let ty = self.ctx.type_name("", &m.type_path);
            w.blank();
            w.open(format!(
                "inline const auto& {}(const {cpp}& v) {{",
                self.helper(m, "getter")
            ));
            w.line(format!("return v.{};", m.member_name));
            w.close("}");
            if m.is_const {
                continue;
            }

            w.blank();
            if m.pointer {
                w.open(format!("inline void {}({cpp}& t, {ty}* v) {{", self.helper(m, "setter")));
                w.line(format!("t.{} = v;", m.member_name));
            } else {
                w.open(format!(
                    "inline void {}({cpp}& t, const {ty}& v) {{",
                    self.helper(m, "setter")
                ));
                w.line(format!("assignVal(t.{}, v);", m.member_name));
            }
            w.close("}");
        }
    }

    fn emit_value_object(&self, w: &mut CodeWriter) -> Result<()> {
        let cpp = &self.cpp;
        let fields = exported_members(self.composition)
            .map(|m| {
                Ok(format!(
                    ".field(\"{}\", &{cpp}::{})",
                    Self::field_name(m)?,
                    m.member_name
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        if fields.is_empty() {
            w.line(format!("value_object<{cpp}>(\"{}\");", self.name));
            return Ok(());
        }
        w.line(format!("value_object<{cpp}>(\"{}\")", self.name));
        w.indented(|w| emit_chain(w, fields));
        Ok(())
    }

    fn emit_class(&self, w: &mut CodeWriter) -> Result<()> {
        let cpp = &self.cpp;
        let c = self.composition;
        let mut head = format!("class_<{cpp}");
        for base in &self.ctx.syntax.vertex(self.v).inherits {
            head.push_str(&format!(", base<{}>", self.ctx.type_name("", base)));
        }
        head.push_str(&format!(">(\"{}\")", self.name));

        let mut chain = Vec::new();
        if self.pmr {
            chain.push(format!(".constructor<>(&creator<{cpp}>)"));
        }
        for ctor in &c.constructors {
            let types = ctor
                .indices
                .iter()
                .map(|&i| {
                    c.members
                        .get(i as usize)
                        .map(|m| self.ctx.type_name("", &m.type_path))
                        .ok_or_else(|| Error::InvalidConstructor {
                            owner: self.ctx.syntax.get_path(self.v),
                            index: i,
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            chain.push(format!(".constructor<{}>()", types.join(", ")));
        }

        let methods = &c.methods;
        for (i, method) in methods.iter().enumerate() {
            let f = &method.function_name;
            if method.skip {
                continue;
            }
            if method.setter {
                if !methods.get(i.wrapping_sub(1)).is_some_and(|p| p.getter) {
                    debug!(owner = %self.cpp, method = %f, "setter without getter, not exported");
                }
                continue;
            }
            if !method.getter {
                chain.push(format!(".function(\"{f}\", &{cpp}::{f})"));
                continue;
            }
            let stem = f.strip_prefix("get").filter(|s| !s.is_empty()).unwrap_or(f);
            let mut property = format!(".property(\"{}\", &{cpp}::{f}", camel_to_variable(stem));
            if let Some(setter) = methods.get(i + 1).filter(|m| m.setter && !m.skip) {
                property.push_str(&format!(", &{cpp}::{}", setter.function_name));
            }
            property.push(')');
            chain.push(property);
        }

        for m in exported_members(c).filter(|m| m.public) {
            let mut property = format!(
                ".property(\"{}\", &{}",
                Self::field_name(m)?,
                self.helper(m, "getter")
            );
            if !m.is_const {
                property.push_str(&format!(", &{}", self.helper(m, "setter")));
            }
            property.push(')');
            chain.push(property);
        }

        if chain.is_empty() {
            w.line(format!("{head};"));
            return Ok(());
        }
        w.line(head);
        w.indented(|w| emit_chain(w, chain));
        Ok(())
    }
}

/// One call per line; the last ends the statement.
fn emit_chain(w: &mut CodeWriter, calls: Vec<String>) {
    let n = calls.len();
    for (i, call) in calls.into_iter().enumerate() {
        if i + 1 == n {
            w.line(format!("{call};"));
        } else {
            w.line(call);
        }
    }
}

/// `<prefix>Wasm.h`.
pub fn emit_wasm_exports(ctx: &CppContext<'_>) -> Result<String> {
    let bindings: Vec<Binding<'_, '_>> = exports(ctx)
        .into_iter()
        .map(|(v, c)| Binding::new(ctx, v, c))
        .collect();

    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    include(&mut w, "<emscripten/bind.h>");
    include(&mut w, &ctx.config.wasm_header);
    include(&mut w, &ctx.module.file_path("Types.h"));

    let mut pointers = IndexSet::new();
    for b in &bindings {
        for m in exported_members(b.composition).filter(|m| m.pointer) {
            pointers.insert(ctx.type_name("", &m.type_path));
        }
    }
    if !pointers.is_empty() {
        w.blank();
        w.line(format!(
            "REGISTER_PTRS({});",
            pointers.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    for b in bindings.iter().filter(|b| !b.is_value_object()) {
        if b.pmr {
            b.emit_pmr_helpers(&mut w);
        }
        b.emit_accessors(&mut w);
    }

    if !bindings.is_empty() {
        let module = module_name(ctx.module_path);
        debug!(module, count = bindings.len(), "emit embind registrations");
        w.blank();
        w.open(format!("EMSCRIPTEN_BINDINGS({module}_WASM_EXPORT) {{"));
        w.line("using emscripten::base;");
        w.line("using emscripten::class_;");
        w.line("using emscripten::value_object;");
        for b in &bindings {
            w.blank();
            if b.is_value_object() {
                b.emit_value_object(&mut w)?;
            } else {
                b.emit_class(&mut w)?;
            }
        }
        w.close(format!("}} // EMSCRIPTEN_BINDINGS({module}_WASM_EXPORT)"));
    }
    ctx.footer(&mut w);
    Ok(w.finish())
}
