#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Type description AST and resolution for graphgen.
//!
//! Two layers:
//! - **Description layer**: `ModuleBuilder` populates a `SyntaxGraph` and a
//!   `ModuleGraph`, either directly or by replaying a JSON `Description`.
//! - **Query layer**: resolver and trait inference over the frozen AST,
//!   consumed by the emitters in `graphgen-compiler`.
//!
//! Modules:
//! - `typename` - slash path and typename string utilities
//! - `naming` - identifier conventions (`mX`, `xIn`, tags, relative paths)
//! - `graph` - `VecGraph`, the runtime model of vector-storage graphs
//! - `syntax` - AST vertices, resolver, trait inference, TypeScript queries
//! - `builder` - `ModuleBuilder`, `ModuleGraph`, `Compiled`
//! - `description` - serde description format replayed into the builder

#[macro_use]
mod flags;

pub mod builder;
pub mod description;
pub mod graph;
pub mod naming;
pub mod syntax;
pub mod typename;

mod invariants;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod naming_tests;
#[cfg(test)]
mod typename_tests;

pub use builder::{Compiled, Features, ModuleBuilder, ModuleGraph, ModuleInfo};
pub use description::Description;
pub use syntax::{GenerationFlags, ImplEnum, Kind, SyntaxGraph, Traits, Vertex, VertexId};

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while describing types or resolving names.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("identifier not found: '{name}' (scope: '{scope}')")]
    IdentifierNotFound { scope: String, name: String },

    #[error("template not found: '{0}'")]
    TemplateNotFound(String),

    #[error("type path not found: '{0}'")]
    PathNotFound(String),

    #[error("'{name}' already declared in '{scope}'")]
    DuplicateName { scope: String, name: String },

    #[error("member '{member}' not found in '{owner}'")]
    MemberNotFound { owner: String, member: String },

    #[error("'{0}' is not a struct or graph")]
    NotAComposition(String),

    #[error("'{0}' is not a graph")]
    NotAGraph(String),

    #[error("'{0}' is not an enum")]
    NotAnEnum(String),

    #[error("'{0}' is not a variant")]
    NotAVariant(String),

    #[error("'{0}' cannot declare types here")]
    InvalidScope(String),

    #[error("'{0}' still owns declarations")]
    HasChildren(String),

    #[error("const and volatile cannot be combined: '{0}'")]
    ConstVolatile(String),

    #[error("'{owner}' contains itself by value through '{member}'")]
    SelfContainment { owner: String, member: String },

    #[error("'{graph}' cannot reference itself from {place}")]
    GraphSelfReference { graph: String, place: &'static str },

    #[error("invalid typename: '{0}'")]
    InvalidTypename(String),

    #[error("invalid member name '{0}', expected `mName`")]
    InvalidMemberName(String),

    #[error("module not found: '{0}'")]
    ModuleNotFound(String),

    #[error("no module is open")]
    NoModule,

    #[error("unknown feature '{0}'")]
    InvalidFeature(String),

    #[error("unknown {what} '{value}'")]
    InvalidOption { what: &'static str, value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
