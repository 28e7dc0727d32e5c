//! Emitter configuration.

use serde::Deserialize;

/// Text placed at the top of every generated file.
pub const BANNER: &str = "This file is generated by graphgen. Do not edit.";

/// Options shared by every emitter.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Header providing the `Impl` graph runtime (descriptors, iterators,
    /// property maps)
    pub(crate) impl_header: String,
    /// Prefix private TypeScript fields with `_`
    pub(crate) underscore_member_names: bool,
    /// Module the TypeScript graph runtime (`impl`) is imported from
    pub(crate) typescript_graph_import: String,
    /// Module `RecyclePool` is imported from by object pools
    pub(crate) typescript_pool_import: String,
    /// Header declaring the script engine value conversions
    pub(crate) jsb_header: String,
    /// Header providing `variant_from_index`, included by Jsb sources that
    /// convert tag variants
    pub(crate) overload_header: String,
    /// Header declaring `OutputArchive`, `InputArchive` and the `save`/`load`
    /// overloads of standard types
    pub(crate) archive_header: String,
    /// Header declaring `creator`, `assignVal` and `REGISTER_PTRS` for
    /// Emscripten bindings
    pub(crate) wasm_header: String,
    /// Emit the generated-file banner and `clang-format off` guards
    pub(crate) emit_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            impl_header: "graph/GraphImpl.h".to_owned(),
            underscore_member_names: true,
            typescript_graph_import: "./graph".to_owned(),
            typescript_pool_import: "./pool".to_owned(),
            jsb_header: "cocos/bindings/manual/jsb_conversions.h".to_owned(),
            overload_header: "cocos/renderer/pipeline/custom/Overload.h".to_owned(),
            archive_header: "cocos/renderer/pipeline/custom/ArchiveTypes.h".to_owned(),
            wasm_header: "WasmDefine.h".to_owned(),
            emit_comments: true,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header included for the graph runtime.
    pub fn impl_header(mut self, value: impl Into<String>) -> Self {
        self.impl_header = value.into();
        self
    }

    /// Set whether private TypeScript fields get a leading underscore.
    pub fn underscore_member_names(mut self, value: bool) -> Self {
        self.underscore_member_names = value;
        self
    }

    /// Set the import path of the TypeScript graph runtime.
    pub fn typescript_graph_import(mut self, value: impl Into<String>) -> Self {
        self.typescript_graph_import = value.into();
        self
    }

    /// Set the import path of `RecyclePool`.
    pub fn typescript_pool_import(mut self, value: impl Into<String>) -> Self {
        self.typescript_pool_import = value.into();
        self
    }

    /// Set the header declaring script engine conversions.
    pub fn jsb_header(mut self, value: impl Into<String>) -> Self {
        self.jsb_header = value.into();
        self
    }

    /// Set the header providing `variant_from_index`.
    pub fn overload_header(mut self, value: impl Into<String>) -> Self {
        self.overload_header = value.into();
        self
    }

    /// Set the header declaring the archive types.
    pub fn archive_header(mut self, value: impl Into<String>) -> Self {
        self.archive_header = value.into();
        self
    }

    /// Set the header included by Emscripten bindings.
    pub fn wasm_header(mut self, value: impl Into<String>) -> Self {
        self.wasm_header = value.into();
        self
    }

    /// Set whether to emit file banners.
    pub fn emit_comments(mut self, value: bool) -> Self {
        self.emit_comments = value;
        self
    }
}
