#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Emitters turning a compiled `SyntaxGraph` into C++ and TypeScript sources.
//!
//! Every emitter borrows the frozen AST and appends to a `CodeWriter`:
//! - `cpp` - forward declarations, types, names, reflection, graphs and
//!   serialization
//! - `typescript` - classes, enums, graphs and object pools
//! - `wasm` - script binding conversions and the ToJs ini
//! - `emscripten` - embind registrations for WebAssembly builds
//! - `module` - per-module file assembly gated by `Features`

pub mod config;
pub mod cpp;
pub mod emscripten;
pub mod module;
pub mod typescript;
pub mod wasm;
pub mod writer;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod emscripten_tests;
#[cfg(test)]
mod writer_tests;

pub use config::Config;
pub use module::{GeneratedFiles, compile_all, compile_module};
pub use writer::{CodeWriter, Separator};

/// Errors raised while emitting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] graphgen_core::Error),

    #[error("graph '{graph}' cannot be generated: {reason}")]
    UnsupportedGraph { graph: String, reason: &'static str },

    #[error("constructor of '{owner}' refers to member #{index}, which does not exist")]
    InvalidConstructor { owner: String, index: u32 },

    #[error("'{0}' is allocator aware but has no allocator aware member")]
    NoAllocatorMember(String),

    #[error("output '{0}' is produced by more than one module")]
    DuplicateOutput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
