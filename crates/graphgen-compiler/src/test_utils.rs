//! Shared fixtures for emitter tests.

use graphgen_core::syntax::GenerationFlags;
use graphgen_core::{Compiled, Features, ModuleBuilder, ModuleInfo, Traits, VertexId};

use crate::cpp::graph::GraphEmitter;
use crate::cpp::{CppContext, emit_graphs};
use crate::typescript::{TsContext, emit_typescript};
use crate::{CodeWriter, Config};

pub const MODULE: &str = "/Render";

pub fn all_features() -> Features {
    Features::FWD
        | Features::TYPES
        | Features::NAMES
        | Features::REFLECTION
        | Features::GRAPHS
        | Features::TYPESCRIPTS
        | Features::JSB
        | Features::TO_JS
        | Features::TS_POOL
}

pub fn render_info() -> ModuleInfo {
    ModuleInfo::new("renderer/pipeline", "Render").features(all_features())
}

/// Describes `render` types inside module `/Render` and compiles.
pub fn compile(f: impl FnOnce(&mut ModuleBuilder)) -> Compiled {
    let mut b = ModuleBuilder::with_std().unwrap();
    b.open_module("Render", render_info()).unwrap();
    b.open_namespace("render").unwrap();
    f(&mut b);
    b.close_scope();
    b.close_module();
    b.compile().unwrap()
}

pub fn flags(text: &str) -> GenerationFlags {
    GenerationFlags::parse(text).unwrap()
}

pub fn traits(text: &str) -> Traits {
    Traits {
        flags: flags(text),
        ..Traits::default()
    }
}

pub fn pmr() -> Traits {
    Traits {
        pmr: true,
        ..Traits::default()
    }
}

/// `struct Point { int mX; int mY; }` with a two-argument constructor.
pub fn point(b: &mut ModuleBuilder) -> VertexId {
    let v = b.add_struct("Point", Traits::default()).unwrap();
    b.add_member(v, true, "int", "mX", "_", GenerationFlags::NONE)
        .unwrap();
    b.add_member(v, true, "int", "mY", "_", GenerationFlags::NONE)
        .unwrap();
    b.add_constructor(v, &["mX", "mY"], true).unwrap();
    v
}

pub fn with_context<R>(compiled: &Compiled, f: impl FnOnce(&CppContext<'_>) -> R) -> R {
    let config = Config::new().emit_comments(false);
    let ctx = CppContext::new(compiled, MODULE, &config).unwrap();
    f(&ctx)
}

pub fn locate(compiled: &Compiled, path: &str) -> VertexId {
    compiled.syntax().locate(path).unwrap()
}

/// `Types.h` body of graph `path`.
pub fn graph_class(compiled: &Compiled, path: &str) -> String {
    let v = locate(compiled, path);
    with_context(compiled, |ctx| {
        let mut w = CodeWriter::new();
        GraphEmitter::new(ctx, v).unwrap().emit_class(&mut w).unwrap();
        w.finish()
    })
}

/// `Types.cpp` body of graph `path`.
pub fn graph_definitions(compiled: &Compiled, path: &str) -> String {
    let v = locate(compiled, path);
    with_context(compiled, |ctx| {
        let mut w = CodeWriter::new();
        GraphEmitter::new(ctx, v)
            .unwrap()
            .emit_definitions(&mut w)
            .unwrap();
        w.finish()
    })
}

/// `Graphs.h` of the test module.
pub fn graphs_header(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_graphs(ctx).unwrap())
}

/// `struct Light { float mIntensity; }`.
pub fn light(b: &mut ModuleBuilder) -> VertexId {
    let v = b.add_struct("Light", Traits::default()).unwrap();
    b.add_member(v, true, "float", "mIntensity", "_", GenerationFlags::NONE)
        .unwrap();
    v
}

pub fn with_ts_context<R>(compiled: &Compiled, f: impl FnOnce(&TsContext<'_>) -> R) -> R {
    let config = Config::new().emit_comments(false);
    let ctx = TsContext::new(compiled, MODULE, &config).unwrap();
    f(&ctx)
}

/// `Render.ts` of the test module.
pub fn typescript(compiled: &Compiled) -> String {
    with_ts_context(compiled, |ctx| emit_typescript(ctx).unwrap())
}

/// The block whose first line contains `head`, through the closing brace at
/// the same indentation, with that indentation removed.
pub fn block(text: &str, head: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|l| l.contains(head))
        .unwrap_or_else(|| panic!("no line contains {head:?}"));
    let indent = lines[start].len() - lines[start].trim_start().len();
    let end = lines[start..]
        .iter()
        .position(|l| {
            let body = l.get(indent..).unwrap_or_default();
            l.len() - l.trim_start().len() == indent && body.starts_with('}') && !body.ends_with('{')
        })
        .map(|i| start + i)
        .unwrap_or_else(|| panic!("block {head:?} is not closed"));
    lines[start..=end]
        .iter()
        .map(|l| l.get(indent..).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}
