//! Output modules and their dependencies.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::{Error, Result};

flag_set! {
    /// Generator passes enabled for a module.
    pub struct Features: u32 {
        const FWD = 0, "fwd";
        const TYPES = 1, "types";
        const NAMES = 2, "names";
        const REFLECTION = 3, "reflection";
        const GRAPHS = 4, "graphs";
        const TYPESCRIPTS = 5, "typescripts";
        const JSB = 6, "jsb";
        const TO_JS = 7, "to_js";
        const TS_POOL = 8, "ts_pool";
        const SERIALIZATION = 9, "serialization";
        const WASM = 10, "wasm";
    }
}

impl Features {
    pub fn from_text(text: &str) -> Result<Self> {
        Self::parse(text).ok_or_else(|| Error::InvalidFeature(text.to_owned()))
    }
}

/// Settings of one output module.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleInfo {
    /// Output folder relative to the output root.
    pub folder: String,
    /// Prefix of every generated file name (`RenderGraph` gives
    /// `RenderGraphTypes.h`).
    pub file_prefix: String,
    /// Export macro placed before exported declarations.
    pub api: String,
    pub features: Features,
    /// Verbatim text after the TypeScript imports.
    pub typescript_include: String,
    pub to_js_prefix: String,
    pub to_js_namespace: String,
    /// Extra ToJs ini lines.
    pub to_js_configs: String,
    /// Extra includes of the generated header.
    pub hpp_headers: Vec<String>,
    /// Extra includes of the generated source file.
    pub cpp_headers: Vec<String>,
}

impl ModuleInfo {
    pub fn new(folder: impl Into<String>, file_prefix: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file_prefix: file_prefix.into(),
            ..Default::default()
        }
    }

    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    pub fn typescript_include(mut self, text: impl Into<String>) -> Self {
        self.typescript_include = text.into();
        self
    }

    /// `<folder>/<prefix><suffix>`.
    pub fn file_path(&self, suffix: &str) -> String {
        if self.folder.is_empty() {
            format!("{}{suffix}", self.file_prefix)
        } else {
            format!("{}/{}{suffix}", self.folder, self.file_prefix)
        }
    }

    pub fn has(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }
}

/// Modules by path (`/Render`, `/Render/Layout`), in declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleGraph {
    modules: IndexMap<String, ModuleInfo>,
    dependencies: IndexMap<String, IndexSet<String>>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, path: String, info: ModuleInfo) -> Result<()> {
        if self.modules.contains_key(&path) {
            let (scope, name) = crate::typename::split_type_path(&path);
            return Err(Error::DuplicateName {
                scope: scope.to_owned(),
                name: name.to_owned(),
            });
        }
        self.modules.insert(path, info);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&ModuleInfo> {
        self.modules.get(path)
    }

    pub fn module(&self, path: &str) -> Result<&ModuleInfo> {
        self.get(path)
            .ok_or_else(|| Error::ModuleNotFound(path.to_owned()))
    }

    pub fn module_mut(&mut self, path: &str) -> Result<&mut ModuleInfo> {
        self.modules
            .get_mut(path)
            .ok_or_else(|| Error::ModuleNotFound(path.to_owned()))
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &ModuleInfo)> {
        self.modules.iter().map(|(p, m)| (p.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn add_dependency(&mut self, module: &str, dependency: &str) -> Result<()> {
        self.module(module)?;
        self.module(dependency)?;
        if module != dependency {
            self.dependencies
                .entry(module.to_owned())
                .or_default()
                .insert(dependency.to_owned());
        }
        Ok(())
    }

    /// Direct dependencies, in insertion order.
    pub fn dependencies(&self, module: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(module)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }
}
