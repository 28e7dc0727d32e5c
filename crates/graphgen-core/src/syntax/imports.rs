//! Cross-module type usage.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::{Kind, SyntaxGraph, VertexId};

/// Declaring module path to the type paths used from it, both ordered.
pub type ImportedTypes = BTreeMap<String, BTreeSet<String>>;

impl SyntaxGraph {
    fn add_imported(
        &self,
        v: VertexId,
        module_path: &str,
        imported: &mut ImportedTypes,
        visited: &mut HashSet<VertexId>,
    ) {
        if !visited.insert(v) {
            return;
        }
        let vertex = self.vertex(v);
        if !vertex.module_path.is_empty() && vertex.module_path != module_path {
            imported
                .entry(vertex.module_path.clone())
                .or_default()
                .insert(self.get_path(v));
        }
        match &vertex.kind {
            Kind::Struct(_) | Kind::Graph(_) => {
                let composition = self.composition(v);
                for m in &composition.members {
                    if let Some(t) = self.locate(&m.type_path) {
                        self.add_imported(t, module_path, imported, visited);
                    }
                }
            }
            Kind::Instance(instance) => {
                for p in &instance.parameters {
                    if let Some(t) = self.locate(p) {
                        self.add_imported(t, module_path, imported, visited);
                    }
                }
            }
            _ => {}
        }
    }

    /// Types declared by other modules that `module_path` refers to through
    /// members, graph properties, components and polymorphic values.
    pub fn get_imported_types(&self, module_path: &str) -> ImportedTypes {
        let mut imported = ImportedTypes::new();
        let mut visited = HashSet::new();
        for v in self.module_vertices(module_path) {
            let mut used: Vec<&str> = Vec::new();
            if let Some(composition) = self.kind(v).composition() {
                used.extend(composition.members.iter().map(|m| m.type_path.as_str()));
            }
            if let Some(graph) = self.kind(v).graph() {
                let desc = &graph.desc;
                used.push(&desc.vertex_property);
                used.push(&desc.edge_property);
                used.extend(desc.components.iter().map(|c| c.value_path.as_str()));
                used.extend(desc.polymorphic.iter().map(|c| c.value.as_str()));
            }
            if let Kind::Variant(variant) = self.kind(v) {
                used.extend(variant.variants.iter().map(String::as_str));
            }
            for path in used.into_iter().filter(|p| !p.is_empty()) {
                if let Some(t) = self.locate(path) {
                    self.add_imported(t, module_path, &mut imported, &mut visited);
                }
            }
        }
        imported
    }
}
