//! Predeclared primitives and `std` templates.
//!
//! Everything here is imported: it resolves and projects to TypeScript but
//! is never emitted.

use super::ModuleBuilder;
use crate::Result;
use crate::syntax::Traits;

const NUMBERS: &[&str] = &[
    "char", "int", "float", "double", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
    "uint16_t", "uint32_t", "uint64_t", "size_t",
];

/// Element type to typed array projection of `vector<T>`.
const TYPED_ARRAYS: &[(&str, &str)] = &[
    ("float", "Float32Array"),
    ("double", "Float64Array"),
    ("int32_t", "Int32Array"),
    ("uint32_t", "Uint32Array"),
    ("uint8_t", "Uint8Array"),
];

fn imported() -> Traits {
    Traits {
        import: true,
        ..Traits::default()
    }
}

fn imported_pmr() -> Traits {
    Traits {
        import: true,
        pmr: true,
        ..Traits::default()
    }
}

fn declare_containers(b: &mut ModuleBuilder, traits: fn() -> Traits) -> Result<()> {
    b.add_container("vector", traits())?;
    b.add_container("list", traits())?;
    b.add_container("set", traits())?;
    b.add_map("map", traits())?;
    b.add_map("unordered_map", traits())?;
    b.project_typescript("set", "Set")?;
    b.project_typescript("map", "Map")?;
    b.project_typescript("unordered_map", "Map")?;
    Ok(())
}

pub(super) fn declare_std(b: &mut ModuleBuilder) -> Result<()> {
    b.add_value("bool", imported())?;
    b.project_typescript("bool", "boolean")?;
    for name in NUMBERS {
        b.add_value(name, imported())?;
        b.project_typescript(name, "number")?;
    }

    b.open_namespace("std")?;
    b.add_value("string", imported())?;
    b.add_value("string_view", imported())?;
    b.project_typescript("string", "string")?;
    b.project_typescript("string_view", "string")?;
    declare_containers(b, imported)?;
    b.add_optional("optional", imported())?;

    b.open_namespace("pmr")?;
    b.add_value("string", imported_pmr())?;
    b.project_typescript("string", "string")?;
    declare_containers(b, imported_pmr)?;
    b.close_scope();

    for (element, array) in TYPED_ARRAYS {
        b.project_typescript(&format!("vector<{element}>"), array)?;
        b.project_typescript(&format!("pmr/vector<{element}>"), array)?;
    }
    b.close_scope();
    Ok(())
}
