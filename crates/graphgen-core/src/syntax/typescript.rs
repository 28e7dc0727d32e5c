//! TypeScript projection queries.

use super::{GraphDesc, Kind, SyntaxGraph, VertexId};
use crate::naming::convert_tag;

const TYPED_ARRAYS: &[&str] = &[
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "BigInt64Array",
    "Uint8Array",
    "Uint16Array",
    "Uint32Array",
    "BigUint64Array",
    "Float32Array",
    "Float64Array",
];

pub fn is_typescript_data(name: &str) -> bool {
    matches!(name, "number" | "string" | "boolean")
}

pub fn is_typed_array(name: &str) -> bool {
    TYPED_ARRAYS.contains(&name)
}

/// Strips `{}` braces and whitespace around a C++ initializer.
fn strip_braces(initial: &str) -> &str {
    let trimmed = initial.trim();
    match trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

impl SyntaxGraph {
    /// A one-parameter container instance without a dedicated projection.
    pub fn is_typescript_array(&self, v: VertexId) -> bool {
        let Kind::Instance(instance) = self.kind(v) else {
            return false;
        };
        if !self.vertex(v).typescript.name.is_empty() {
            return false;
        }
        self.get_template(v).is_some_and(|t| {
            matches!(self.kind(t), Kind::Container)
                && instance.parameters.len() == 1
                && self.vertex(t).typescript.name.is_empty()
        })
    }

    fn typescript_or_name(&self, v: VertexId) -> String {
        let vertex = self.vertex(v);
        if vertex.typescript.name.is_empty() {
            vertex.name.clone()
        } else {
            vertex.typescript.name.clone()
        }
    }

    fn typescript_template_arguments(&self, v: VertexId) -> String {
        self.instance_parameters(v)
            .into_iter()
            .map(|p| self.get_typescript_typename(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn get_typescript_typename(&self, v: VertexId) -> String {
        if !self.is_instantiation(v) {
            return self.typescript_or_name(v);
        }
        let ts = &self.vertex(v).typescript;
        if !ts.name.is_empty() {
            return ts.name.clone();
        }
        if self.is_typescript_array(v) {
            let param = self.instance_parameters(v).into_iter().next();
            return format!(
                "{}[]",
                param
                    .map(|p| self.get_typescript_typename(p))
                    .unwrap_or_default()
            );
        }
        if self.is_optional(v) {
            let param = self.instance_parameters(v).into_iter().next();
            return format!(
                "{} | null",
                param
                    .map(|p| self.get_typescript_typename(p))
                    .unwrap_or_default()
            );
        }
        let template = self
            .get_template(v)
            .map(|t| self.typescript_or_name(t))
            .unwrap_or_default();
        format!("{template}<{}>", self.typescript_template_arguments(v))
    }

    pub fn get_typescript_typename_of_path(&self, path: &str) -> String {
        self.locate(path)
            .map(|v| self.get_typescript_typename(v))
            .unwrap_or_default()
    }

    pub fn get_typescript_tag_name(&self, v: VertexId) -> String {
        convert_tag(&self.get_typescript_typename(v)).to_owned()
    }

    fn typescript_initial_value(&self, v: VertexId, initial: &str) -> String {
        let ts = self.vertex(v).typescript.name.as_str();
        match ts {
            "number" | "BigInt" => {
                let number = initial
                    .strip_suffix('u')
                    .or_else(|| initial.strip_suffix('f'))
                    .unwrap_or(initial);
                if ts == "BigInt" {
                    format!("BigInt({number})")
                } else {
                    number.to_owned()
                }
            }
            "string" => initial
                .strip_prefix("u8")
                .unwrap_or(initial)
                .replace('"', "'"),
            "boolean" => initial.to_owned(),
            _ if is_typed_array(ts) => format!("new {ts}({initial})"),
            _ => format!("new {}({initial})", self.get_typescript_typename(v)),
        }
    }

    fn typescript_default_value(&self, v: VertexId) -> String {
        let ts = self.vertex(v).typescript.name.as_str();
        match ts {
            "number" | "BigInt" => "0".to_owned(),
            "string" => "''".to_owned(),
            "boolean" => "false".to_owned(),
            _ if is_typed_array(ts) => format!("new {ts}(0)"),
            _ => format!("new {}()", self.get_typescript_typename(v)),
        }
    }

    /// Transcodes a C++ initializer into a TypeScript expression.
    pub fn get_typescript_initial_value(&self, v: VertexId, initial: &str) -> String {
        let initial = strip_braces(initial);
        if initial == "nullptr" {
            return "null".to_owned();
        }
        match self.kind(v) {
            Kind::Enum(e) => {
                if !initial.is_empty() {
                    initial.replace("::", ".")
                } else {
                    let first = e.values.first().map(|x| x.name.as_str()).unwrap_or_default();
                    format!("{}.{first}", self.get_typescript_typename(v))
                }
            }
            Kind::Variant(variant) => {
                if !initial.is_empty() {
                    initial.to_owned()
                } else {
                    let first = variant
                        .variants
                        .first()
                        .and_then(|p| self.locate(p))
                        .map(|t| self.get_typescript_tag_name(t))
                        .unwrap_or_default();
                    format!("{}.{first}", self.get_typescript_typename(v))
                }
            }
            Kind::Instance(_) => {
                if !self.vertex(v).typescript.name.is_empty() {
                    if initial.is_empty() {
                        self.typescript_default_value(v)
                    } else {
                        self.typescript_initial_value(v, initial)
                    }
                } else if self.is_typescript_array(v) {
                    format!("[{initial}]")
                } else if self.is_optional(v) {
                    "null".to_owned()
                } else {
                    let template = self
                        .get_template(v)
                        .map(|t| self.typescript_or_name(t))
                        .unwrap_or_default();
                    format!(
                        "new {template}<{}>({initial})",
                        self.typescript_template_arguments(v)
                    )
                }
            }
            _ => {
                if initial.is_empty() {
                    self.typescript_default_value(v)
                } else {
                    self.typescript_initial_value(v, initial)
                }
            }
        }
    }

    /// Union of the polymorphic value types of a graph.
    pub fn get_typescript_graph_polymorphic_variant(&self, desc: &GraphDesc) -> String {
        desc.polymorphic
            .iter()
            .map(|c| self.get_typescript_typename_of_path(&c.value))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Some graph is declared by this module.
    pub fn module_uses_graph(&self, module_path: &str) -> bool {
        self.module_vertices(module_path)
            .any(|v| matches!(self.kind(v), Kind::Graph(_)))
    }
}
