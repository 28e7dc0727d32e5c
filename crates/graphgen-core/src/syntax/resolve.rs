//! Scope walking name resolution and on-demand template instantiation.

use tracing::debug;

use super::{Instance, Kind, SyntaxGraph, Vertex, VertexId};
use crate::typename::{
    extract_template, get_cpp_path, get_dependent_path, get_template_name, is_instance,
    join_path, parent_path, split_type_path,
};
use crate::{Error, Result};

impl SyntaxGraph {
    /// Resolves `name` from `scope` outwards to the root. Absolute names are
    /// located directly.
    pub fn lookup_identifier(&self, scope: &str, name: &str) -> Option<VertexId> {
        if name.starts_with('/') {
            return self.locate(name);
        }
        let mut scope = scope;
        loop {
            if let Some(v) = self.locate(&join_path(scope, name)) {
                return Some(v);
            }
            if scope.is_empty() {
                return None;
            }
            scope = parent_path(scope);
        }
    }

    /// Canonical type path of a dependent name.
    ///
    /// Instance names resolve the template and every parameter; the instance
    /// itself need not exist yet.
    pub fn get_type_path(&self, scope: &str, name: &str) -> Result<String> {
        if name.is_empty() {
            return Ok(String::new());
        }
        if !is_instance(name) {
            let v = self
                .lookup_identifier(scope, name)
                .ok_or_else(|| Error::IdentifierNotFound {
                    scope: scope.to_owned(),
                    name: name.to_owned(),
                })?;
            return Ok(self.get_path(v));
        }

        let (template, params) = extract_template(name)?;
        let template_id = self
            .lookup_identifier(scope, template)
            .ok_or_else(|| Error::TemplateNotFound(template.to_owned()))?;

        let mut path = self.get_path(template_id);
        path.push('<');
        for (i, param) in params.iter().enumerate() {
            if i != 0 {
                path.push(',');
            }
            path.push_str(&self.get_type_path(scope, param)?);
        }
        path.push('>');
        Ok(path)
    }

    /// Materializes an instance vertex, returning the existing one on repeat.
    pub fn instantiate(&mut self, scope: &str, name: &str) -> Result<VertexId> {
        let (_, params) = extract_template(name)?;
        for param in params {
            if is_instance(param) {
                self.instantiate(scope, param)?;
            }
        }

        let path = self.get_type_path(scope, name)?;
        if let Some(v) = self.locate(&path) {
            return Ok(v);
        }

        let (ns, rest) = split_type_path(&path);
        let parent = if ns.is_empty() {
            None
        } else {
            Some(
                self.locate(ns)
                    .ok_or_else(|| Error::PathNotFound(ns.to_owned()))?,
            )
        };
        let (template, parameters) = extract_template(&path)?;
        if !self.contains(template) {
            return Err(Error::TemplateNotFound(template.to_owned()));
        }

        // instances belong to no module; imports follow their parameters
        let vertex = Vertex::new(
            rest,
            Kind::Instance(Instance {
                template: template.to_owned(),
                parameters: parameters.into_iter().map(str::to_owned).collect(),
            }),
        );

        debug!(path = %path, "instantiate");
        self.add_vertex(parent, vertex)
    }

    /// Speculative resolution: a missing identifier or template is `None`.
    pub fn lookup_type(&mut self, scope: &str, name: &str) -> Result<Option<VertexId>> {
        if !is_instance(name) {
            return Ok(self.lookup_identifier(scope, name));
        }
        match self.instantiate(scope, name) {
            Ok(v) => Ok(Some(v)),
            Err(Error::IdentifierNotFound { .. } | Error::TemplateNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Shortest name of `v` that resolves back to `v` from namespace `ns`.
    pub fn get_dependent_name(&self, ns: &str, v: VertexId) -> String {
        if let Kind::Instance(instance) = self.kind(v) {
            let template = match self.locate(&instance.template) {
                Some(t) => self.get_dependent_name(ns, t),
                None => instance.template.clone(),
            };
            let params: Vec<String> = instance
                .parameters
                .iter()
                .map(|p| match self.locate(p) {
                    Some(pv) => self.get_dependent_name(ns, pv),
                    None => p.clone(),
                })
                .collect();
            return format!("{template}<{}>", params.join(", "));
        }

        let path = self.get_path(v);
        let dependent = get_dependent_path(ns, &path).trim_start_matches('/');
        if dependent.is_empty() || self.lookup_identifier(ns, dependent) != Some(v) {
            return path[1..].to_owned();
        }
        dependent.to_owned()
    }

    /// `get_dependent_name` spelled as C++.
    pub fn get_cpp_name(&self, ns: &str, v: VertexId) -> String {
        get_cpp_path(&self.get_dependent_name(ns, v))
    }

    /// C++ spelling of a type path seen from `ns`; unknown paths are spelled
    /// as given.
    pub fn get_cpp_name_of_path(&self, ns: &str, path: &str) -> String {
        match self.locate(path) {
            Some(v) => self.get_cpp_name(ns, v),
            None => get_cpp_path(path),
        }
    }

    /// Path of the nearest enclosing namespace; empty at root level.
    pub fn get_namespace(&self, v: VertexId) -> String {
        let mut u = self.parent(v);
        while let Some(cur) = u {
            if self.kind(cur).is_namespace() {
                return self.get_path(cur);
            }
            u = self.parent(cur);
        }
        String::new()
    }

    /// Path of the owning scope (namespace, struct or graph).
    pub fn get_scope(&self, v: VertexId) -> String {
        self.parent(v).map(|p| self.get_path(p)).unwrap_or_default()
    }

    pub fn is_namespace(&self, path: &str) -> bool {
        self.locate(path)
            .is_some_and(|v| self.kind(v).is_namespace())
    }

    /// A tag, or a variant whose alternatives are all tags.
    pub fn is_tag(&self, v: VertexId) -> bool {
        match self.kind(v) {
            Kind::Tag(_) => true,
            Kind::Variant(variant) => variant
                .variants
                .iter()
                .all(|p| self.locate(p).is_some_and(|a| matches!(self.kind(a), Kind::Tag(_)))),
            _ => false,
        }
    }

    pub fn is_instantiation(&self, v: VertexId) -> bool {
        matches!(self.kind(v), Kind::Instance(_))
    }

    /// Template head of an instance.
    pub fn get_template(&self, v: VertexId) -> Option<VertexId> {
        match self.kind(v) {
            Kind::Instance(instance) => self.locate(&instance.template),
            _ => None,
        }
    }

    /// Template head of an instance type path, even before instantiation.
    pub fn get_template_of_path(&self, path: &str) -> Option<VertexId> {
        get_template_name(path).ok().and_then(|t| self.locate(t))
    }

    pub fn is_optional(&self, v: VertexId) -> bool {
        self.get_template(v)
            .is_some_and(|t| matches!(self.kind(t), Kind::Optional))
    }

    pub fn is_container(&self, v: VertexId) -> bool {
        self.get_template(v)
            .is_some_and(|t| matches!(self.kind(t), Kind::Container))
    }

    pub fn is_map(&self, v: VertexId) -> bool {
        self.get_template(v)
            .is_some_and(|t| matches!(self.kind(t), Kind::Map))
    }

    /// Instance parameter vertices, in order.
    pub fn instance_parameters(&self, v: VertexId) -> Vec<VertexId> {
        match self.kind(v) {
            Kind::Instance(instance) => instance
                .parameters
                .iter()
                .filter_map(|p| self.locate(p))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Follows alias chains to the aliased vertex.
    pub fn resolve_alias(&self, mut v: VertexId) -> VertexId {
        while let Kind::Alias(alias) = self.kind(v) {
            match self.locate(&alias.target) {
                Some(target) if target != v => v = target,
                _ => break,
            }
        }
        v
    }
}

pub fn is_pmr_string(path: &str) -> bool {
    path == "/std/pmr/string" || path == "/ccstd/pmr/string"
}
