use crate::syntax::{GenerationFlags, Traits, is_typed_array, is_typescript_data};
use crate::{ModuleBuilder, ModuleInfo, SyntaxGraph};

fn graph() -> SyntaxGraph {
    let mut b = ModuleBuilder::with_std().unwrap();
    b.open_module("Test", ModuleInfo::new("test", "Test")).unwrap();
    b.open_namespace("test").unwrap();
    let color = b.add_enum("Color", Traits::default()).unwrap();
    b.add_enum_element(color, "Red", "").unwrap();
    b.add_enum_element(color, "Green", "").unwrap();
    b.add_tag("Raster_", false).unwrap();
    b.add_tag("Compute_", false).unwrap();
    let v = b.add_variant("PassType", GenerationFlags::NONE).unwrap();
    b.add_variant_element(v, "Raster_").unwrap();
    b.add_variant_element(v, "Compute_").unwrap();
    let node = b.add_struct("Node", Traits::default()).unwrap();
    b.add_member(node, true, "int", "mId", "", GenerationFlags::NONE)
        .unwrap();
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    for (ty, name) in [
        ("std::vector<int>", "mInts"),
        ("std::pmr::vector<float>", "mFloats"),
        ("std::optional<Node>", "mNext"),
        ("std::map<std::string, int>", "mIndex"),
        ("std::set<uint32_t>", "mIds"),
        ("std::vector<std::vector<int>>", "mGrid"),
    ] {
        b.add_member(pass, true, ty, name, "", GenerationFlags::NONE)
            .unwrap_or_else(|e| panic!("{ty}: {e}"));
    }
    b.close_scope();
    b.close_module();
    b.compile().unwrap().syntax().clone()
}

fn ts(g: &SyntaxGraph, path: &str) -> String {
    g.get_typescript_typename_of_path(path)
}

#[test]
fn typescript_typenames() {
    let g = graph();
    assert_eq!(ts(&g, "/int"), "number");
    assert_eq!(ts(&g, "/bool"), "boolean");
    assert_eq!(ts(&g, "/std/pmr/string"), "string");
    assert_eq!(ts(&g, "/test/Pass"), "Pass");
    assert_eq!(ts(&g, "/std/vector</int>"), "number[]");
    assert_eq!(ts(&g, "/std/pmr/vector</float>"), "Float32Array");
    assert_eq!(ts(&g, "/std/optional</test/Node>"), "Node | null");
    assert_eq!(ts(&g, "/std/map</std/string,/int>"), "Map<string, number>");
    assert_eq!(ts(&g, "/std/set</uint32_t>"), "Set<number>");
    assert_eq!(ts(&g, "/std/vector</std/vector</int>>"), "number[][]");
    assert_eq!(ts(&g, "/missing"), "");
}

#[test]
fn typescript_arrays() {
    let g = graph();
    let ints = g.locate("/std/vector</int>").unwrap();
    let floats = g.locate("/std/pmr/vector</float>").unwrap();
    let set = g.locate("/std/set</uint32_t>").unwrap();
    assert!(g.is_typescript_array(ints));
    assert!(!g.is_typescript_array(floats));
    assert!(!g.is_typescript_array(set));
}

#[test]
fn initial_values_of_primitives() {
    let g = graph();
    let at = |path: &str, init: &str| {
        let v = g.locate(path).unwrap();
        g.get_typescript_initial_value(v, init)
    };
    assert_eq!(at("/int", ""), "0");
    assert_eq!(at("/int", "{}"), "0");
    assert_eq!(at("/float", "1.5f"), "1.5");
    assert_eq!(at("/uint32_t", "{ 3u }"), "3");
    assert_eq!(at("/bool", ""), "false");
    assert_eq!(at("/bool", "true"), "true");
    assert_eq!(at("/std/string", "u8\"main\""), "'main'");
    assert_eq!(at("/std/pmr/string", ""), "''");
    assert_eq!(at("/test/Pass", ""), "new Pass()");
    assert_eq!(at("/test/Pass", "nullptr"), "null");
}

#[test]
fn initial_values_of_enums_and_variants() {
    let g = graph();
    let color = g.locate("/test/Color").unwrap();
    let variant = g.locate("/test/PassType").unwrap();
    assert_eq!(g.get_typescript_initial_value(color, ""), "Color.Red");
    assert_eq!(g.get_typescript_initial_value(color, "Color::Green"), "Color.Green");
    assert_eq!(g.get_typescript_initial_value(variant, ""), "PassType.Raster");
}

#[test]
fn initial_values_of_instances() {
    let g = graph();
    let at = |path: &str| {
        let v = g.locate(path).unwrap();
        g.get_typescript_initial_value(v, "")
    };
    assert_eq!(at("/std/vector</int>"), "[]");
    assert_eq!(at("/std/pmr/vector</float>"), "new Float32Array(0)");
    assert_eq!(at("/std/optional</test/Node>"), "null");
    assert_eq!(at("/std/map</std/string,/int>"), "new Map<string, number>()");
}

#[test]
fn tag_names_drop_trailing_underscore() {
    let g = graph();
    let raster = g.locate("/test/Raster_").unwrap();
    assert_eq!(g.get_typescript_tag_name(raster), "Raster");
}

#[test]
fn typescript_data_and_typed_arrays() {
    assert!(is_typescript_data("number"));
    assert!(is_typescript_data("boolean"));
    assert!(!is_typescript_data("Pass"));
    assert!(is_typed_array("Float64Array"));
    assert!(!is_typed_array("Array"));
}
