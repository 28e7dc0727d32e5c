//! TypeScript emitters.
//!
//! The module file holds one declaration per exported vertex, flattened out
//! of namespaces and owners. Graphs become classes over the `impl` runtime.
//! Object pools live in a file of their own.

mod graph;
mod pool;
mod structs;

#[cfg(test)]
mod structs_tests;

use graphgen_core::naming::{get_member_name, get_relative_path};
use graphgen_core::syntax::{Member, is_typescript_data};
use graphgen_core::{Compiled, GenerationFlags, Kind, ModuleInfo, SyntaxGraph, VertexId};

use crate::config::BANNER;
use crate::{CodeWriter, Config, Result, Separator};

pub use pool::emit_object_pool;

/// Borrowed state of one TypeScript module emission.
pub struct TsContext<'a> {
    pub(crate) compiled: &'a Compiled,
    pub(crate) syntax: &'a SyntaxGraph,
    pub(crate) module_path: &'a str,
    pub(crate) module: &'a ModuleInfo,
    pub(crate) config: &'a Config,
}

impl<'a> TsContext<'a> {
    pub fn new(compiled: &'a Compiled, module_path: &'a str, config: &'a Config) -> Result<Self> {
        Ok(Self {
            compiled,
            syntax: compiled.syntax(),
            module_path,
            module: compiled.module(module_path)?,
            config,
        })
    }

    /// Field name of `mName`: `name` when public, `_name` otherwise.
    pub(crate) fn member_name(&self, member: &str, public: bool) -> Result<String> {
        Ok(get_member_name(
            member,
            public || !self.config.underscore_member_names,
        )?)
    }

    pub(crate) fn type_name(&self, path: &str) -> String {
        self.syntax.get_typescript_typename_of_path(path)
    }

    /// `name: Type` when `full` or when the type cannot be inferred from
    /// the initializer; pointers are nullable.
    pub(crate) fn typed_member_name(&self, m: &Member, public: bool, full: bool) -> Result<String> {
        let mut name = self.member_name(&m.member_name, public)?;
        let ty = self.type_name(&m.type_path);
        if full || !is_typescript_data(&ty) {
            name.push_str(": ");
            name.push_str(&ty);
            if m.pointer {
                name.push_str(" | null");
            }
        }
        Ok(name)
    }

    /// Initializer expression of a field or defaulted parameter.
    pub(crate) fn initial_value(&self, m: &Member) -> String {
        if !m.typescript_default.is_empty() {
            return m.typescript_default.clone();
        }
        if m.pointer {
            return "null".to_owned();
        }
        match self.syntax.locate(&m.type_path) {
            Some(t) => self.syntax.get_typescript_initial_value(t, &m.default_value),
            None => "null".to_owned(),
        }
    }

    /// Numbers, strings, booleans and enums are reassigned rather than
    /// mutated in place.
    pub(crate) fn is_value_type(&self, path: &str) -> bool {
        let Some(t) = self.syntax.locate(path) else {
            return false;
        };
        match self.syntax.kind(self.syntax.resolve_alias(t)) {
            Kind::Enum(_) => true,
            Kind::Variant(_) => self.syntax.is_tag(t),
            _ => is_typescript_data(&self.syntax.get_typescript_typename(t)),
        }
    }

    fn declarations(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.compiled.module_vertices(self.module_path).filter(|&v| {
            matches!(
                self.syntax.kind(v),
                Kind::Enum(_) | Kind::Struct(_) | Kind::Graph(_) | Kind::Variant(_)
            )
        })
    }

    pub(crate) fn pool_objects(&self) -> Vec<VertexId> {
        self.compiled
            .module_vertices(self.module_path)
            .filter(|&v| {
                matches!(self.syntax.kind(v), Kind::Struct(_))
                    && self.syntax.traits(v).has(GenerationFlags::POOL_OBJECT)
            })
            .collect()
    }

    pub(crate) fn banner(&self, w: &mut CodeWriter) {
        if self.config.emit_comments {
            w.line(format!("// {BANNER}"));
            w.line("/* eslint-disable max-len */");
        }
    }

    /// `import { A, B } from './Other';` per module providing used types.
    pub(crate) fn emit_type_imports(&self, w: &mut CodeWriter, current_file: &str) -> Result<()> {
        let modules = self.compiled.modules();
        for (module_path, types) in self.syntax.get_imported_types(self.module_path) {
            let module = modules.module(&module_path)?;
            let names: Vec<String> = types
                .iter()
                .filter_map(|p| self.syntax.locate(p))
                .filter(|&t| {
                    matches!(
                        self.syntax.kind(t),
                        Kind::Enum(_) | Kind::Struct(_) | Kind::Graph(_) | Kind::Variant(_)
                    )
                })
                .map(|t| self.syntax.get_typescript_typename(t))
                .collect();
            if names.is_empty() {
                continue;
            }
            let target = get_relative_path(current_file, &module.file_path(""));
            w.line(format!("import {{ {} }} from '{target}';", names.join(", ")));
        }
        Ok(())
    }
}

/// `<prefix>.ts`: imports, then every exported declaration of the module.
pub fn emit_typescript(ctx: &TsContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    if ctx.syntax.module_uses_graph(ctx.module_path) {
        w.line(format!(
            "import * as impl from '{}';",
            ctx.config.typescript_graph_import
        ));
    }
    ctx.emit_type_imports(&mut w, &ctx.module.file_path(".ts"))?;
    if !ctx.module.typescript_include.is_empty() {
        w.text(&ctx.module.typescript_include);
    }
    if !w.is_empty() {
        w.blank();
    }

    let mut sep = Separator::new();
    for v in ctx.declarations() {
        sep.next(&mut w);
        match ctx.syntax.kind(v) {
            Kind::Enum(e) => structs::emit_enum(ctx, &mut w, v, e),
            Kind::Variant(variant) => structs::emit_variant(ctx, &mut w, v, variant),
            Kind::Struct(_) => structs::emit_class(ctx, &mut w, v)?,
            Kind::Graph(_) => graph::TsGraphEmitter::new(ctx, v)?.emit(&mut w)?,
            _ => {}
        }
    }
    Ok(w.finish())
}
