//! Per-module output assembly.
//!
//! Each enabled feature of a module contributes files keyed by their path
//! relative to the output root. Nothing is written here; callers persist
//! the map once every module compiled.

use graphgen_core::{Compiled, Features, Kind, ModuleInfo};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::cpp::{self, CppContext};
use crate::typescript::{self, TsContext};
use crate::{Config, Error, Result, emscripten, wasm};

/// Relative output path to file contents, in emission order.
pub type GeneratedFiles = IndexMap<String, String>;

fn insert(files: &mut GeneratedFiles, module: &ModuleInfo, suffix: &str, text: String) -> Result<()> {
    let path = module.file_path(suffix);
    info!(path = %path, bytes = text.len(), "generated");
    if files.insert(path.clone(), text).is_some() {
        return Err(Error::DuplicateOutput(path));
    }
    Ok(())
}

/// Emits every file enabled by the features of `module_path`.
pub fn compile_module(compiled: &Compiled, module_path: &str, config: &Config) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    compile_into(&mut files, compiled, module_path, config)?;
    Ok(files)
}

fn compile_into(
    files: &mut GeneratedFiles,
    compiled: &Compiled,
    module_path: &str,
    config: &Config,
) -> Result<()> {
    let module = compiled.module(module_path)?;
    debug!(module = module_path, features = ?module.features, "compiling module");
    let ctx = CppContext::new(compiled, module_path, config)?;

    if module.has(Features::FWD) {
        insert(files, module, "Fwd.h", cpp::emit_fwd(&ctx)?)?;
    }
    if module.has(Features::TYPES) {
        insert(files, module, "Types.h", cpp::emit_types_header(&ctx)?)?;
        insert(files, module, "Types.cpp", cpp::emit_types_source(&ctx)?)?;
    }
    if module.has(Features::NAMES) {
        insert(files, module, "Names.h", cpp::emit_names(&ctx)?)?;
    }
    if module.has(Features::REFLECTION) {
        insert(files, module, "Reflection.h", cpp::emit_reflection(&ctx)?)?;
    }
    if module.has(Features::GRAPHS) {
        if ctx.has_kind(|k| matches!(k, Kind::Graph(_))) {
            insert(files, module, "Graphs.h", cpp::emit_graphs(&ctx)?)?;
        } else {
            debug!(module = module_path, "no graphs, skipping Graphs.h");
        }
    }
    if module.has(Features::SERIALIZATION) {
        insert(files, module, "Serialization.h", cpp::emit_serialization(&ctx)?)?;
    }
    if module.has(Features::JSB) {
        insert(files, module, "Jsb.h", wasm::emit_jsb_header(&ctx)?)?;
        insert(files, module, "Jsb.cpp", wasm::emit_jsb_source(&ctx)?)?;
    }
    if module.has(Features::TO_JS) {
        insert(files, module, ".ini", wasm::emit_to_js_ini(&ctx)?)?;
    }
    if module.has(Features::WASM) {
        insert(files, module, "Wasm.h", emscripten::emit_wasm_exports(&ctx)?)?;
    }

    if module.has(Features::TYPESCRIPTS) || module.has(Features::TS_POOL) {
        let ts = TsContext::new(compiled, module_path, config)?;
        if module.has(Features::TYPESCRIPTS) {
            insert(files, module, ".ts", typescript::emit_typescript(&ts)?)?;
        }
        if module.has(Features::TS_POOL) {
            insert(files, module, "ObjectPool.ts", typescript::emit_object_pool(&ts)?)?;
        }
    }
    Ok(())
}

/// Emits every module in declaration order. Fails on the first error, so a
/// returned map is always complete.
pub fn compile_all(compiled: &Compiled, config: &Config) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    for (path, _) in compiled.modules().modules() {
        compile_into(&mut files, compiled, path, config)?;
    }
    Ok(files)
}
