//! C++ emitters.
//!
//! One function per generated file; each takes a `CppContext` bound to the
//! module being emitted. Declarations are grouped by namespace in module
//! declaration order, and nested declarations are emitted inside their owner.

mod fwd;
pub mod graph;
mod names;
mod reflection;
mod serialization;
mod structs;
mod types;

#[cfg(test)]
mod names_tests;
#[cfg(test)]
mod reflection_tests;
#[cfg(test)]
mod serialization_tests;
#[cfg(test)]
mod structs_tests;
#[cfg(test)]
mod types_tests;

use graphgen_core::syntax::Member;
use graphgen_core::{Compiled, Kind, ModuleInfo, SyntaxGraph, VertexId};

use crate::config::BANNER;
use crate::{CodeWriter, Config, Result};

pub use fwd::emit_fwd;
pub use graph::emit_graphs;
pub use names::emit_names;
pub use reflection::emit_reflection;
pub use serialization::emit_serialization;
pub use types::{emit_types_header, emit_types_source};

pub(crate) const ALLOCATOR_TYPE: &str = "boost::container::pmr::polymorphic_allocator<char>";
pub(crate) const DEFAULT_RESOURCE: &str = "boost::container::pmr::get_default_resource()";

/// Borrowed state of one module emission.
pub struct CppContext<'a> {
    pub(crate) compiled: &'a Compiled,
    pub(crate) syntax: &'a SyntaxGraph,
    pub(crate) module_path: &'a str,
    pub(crate) module: &'a ModuleInfo,
    pub(crate) config: &'a Config,
}

impl<'a> CppContext<'a> {
    pub fn new(compiled: &'a Compiled, module_path: &'a str, config: &'a Config) -> Result<Self> {
        Ok(Self {
            compiled,
            syntax: compiled.syntax(),
            module_path,
            module: compiled.module(module_path)?,
            config,
        })
    }

    /// Export macro followed by a space, or nothing.
    pub(crate) fn api(&self) -> String {
        if self.module.api.is_empty() {
            String::new()
        } else {
            format!("{} ", self.module.api)
        }
    }

    /// Emitted vertices whose owner is a namespace (or the root).
    pub(crate) fn top_level(&self) -> Vec<VertexId> {
        self.compiled
            .module_vertices(self.module_path)
            .filter(|&v| {
                self.syntax
                    .parent(v)
                    .is_none_or(|p| self.syntax.kind(p).is_namespace())
            })
            .collect()
    }

    /// Emitted declarations nested inside struct or graph `owner`.
    pub(crate) fn nested(&self, owner: VertexId) -> Vec<VertexId> {
        self.syntax
            .children(owner)
            .filter(|&c| {
                let vertex = self.syntax.vertex(c);
                !vertex.traits.import && vertex.module_path == self.module_path
            })
            .collect()
    }

    pub(crate) fn has_kind(&self, pred: impl Fn(&Kind) -> bool) -> bool {
        self.compiled
            .module_vertices(self.module_path)
            .any(|v| pred(self.syntax.kind(v)))
    }

    /// Dependencies of this module that enable `feature`.
    pub(crate) fn dependency_files(&self, feature: graphgen_core::Features, suffix: &str) -> Vec<String> {
        let modules = self.compiled.modules();
        modules
            .dependencies(self.module_path)
            .filter_map(|d| modules.get(d))
            .filter(|m| m.has(feature))
            .map(|m| m.file_path(suffix))
            .collect()
    }

    /// C++ spelling of `path` seen from `scope`.
    pub(crate) fn type_name(&self, scope: &str, path: &str) -> String {
        self.syntax.get_cpp_name_of_path(scope, path)
    }

    /// Member type with its qualifiers.
    pub(crate) fn member_type(&self, scope: &str, m: &Member) -> String {
        let mut ty = String::new();
        if m.is_const {
            ty.push_str("const ");
        }
        ty.push_str(&self.type_name(scope, &m.type_path));
        if m.pointer {
            ty.push('*');
        }
        if m.reference {
            ty.push('&');
        }
        ty
    }

    /// Held by value and allocator aware, excluding `optional`.
    pub(crate) fn is_pmr_member(&self, m: &Member) -> bool {
        if m.pointer || m.reference {
            return false;
        }
        self.syntax
            .locate(&m.type_path)
            .is_some_and(|t| self.syntax.is_pmr(t) && !self.syntax.is_optional(t))
    }

    pub(crate) fn is_pmr_optional_member(&self, m: &Member) -> bool {
        if m.pointer || m.reference {
            return false;
        }
        self.syntax
            .locate(&m.type_path)
            .is_some_and(|t| self.syntax.is_optional(t) && self.syntax.is_pmr(t))
    }

    pub(crate) fn banner(&self, w: &mut CodeWriter) {
        if self.config.emit_comments {
            w.line(format!("// {BANNER}"));
            w.line("// clang-format off");
        }
    }

    pub(crate) fn footer(&self, w: &mut CodeWriter) {
        if self.config.emit_comments {
            w.blank();
            w.line("// clang-format on");
        }
    }
}

/// `#include` line; system headers keep their angle brackets.
pub(crate) fn include(w: &mut CodeWriter, header: &str) {
    if header.starts_with('<') {
        w.line(format!("#include {header}"));
    } else {
        w.line(format!("#include \"{header}\""));
    }
}

/// Tracks the open namespaces of a file and switches between them.
#[derive(Debug)]
pub(crate) struct Namespaces {
    open: Vec<String>,
    fresh: bool,
}

impl Namespaces {
    pub(crate) fn new() -> Self {
        Self {
            open: Vec::new(),
            fresh: true,
        }
    }

    /// Closes and opens namespaces until `ns` (a slash path) is current.
    pub(crate) fn enter(&mut self, w: &mut CodeWriter, ns: &str) {
        let target: Vec<&str> = ns.split('/').filter(|s| !s.is_empty()).collect();
        let common = self
            .open
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a.as_str() == **b)
            .count();
        if common == self.open.len() && common == target.len() {
            return;
        }
        while self.open.len() > common {
            if let Some(segment) = self.open.pop() {
                w.blank();
                w.line(format!("}} // namespace {segment}"));
            }
        }
        for segment in &target[common..] {
            w.blank();
            w.line(format!("namespace {segment} {{"));
            self.open.push((*segment).to_owned());
        }
        self.fresh = true;
    }

    /// Blank line before a declaration.
    pub(crate) fn separate(&mut self, w: &mut CodeWriter) {
        w.blank();
        self.fresh = false;
    }

    /// Blank line only after a namespace opener, for compact lists.
    pub(crate) fn begin(&mut self, w: &mut CodeWriter) {
        if self.fresh {
            w.blank();
        }
        self.fresh = false;
    }

    pub(crate) fn close_all(&mut self, w: &mut CodeWriter) {
        self.enter(w, "");
    }
}
