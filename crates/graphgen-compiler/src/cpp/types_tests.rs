use graphgen_core::{Compiled, Features, GenerationFlags, ModuleBuilder, ModuleInfo, Traits};

use crate::Config;
use crate::cpp::{CppContext, emit_types_header, emit_types_source};
use crate::test_utils::*;

fn header(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_types_header(ctx).unwrap())
}

fn class() -> Traits {
    Traits {
        class: true,
        ..Traits::default()
    }
}

#[test]
fn header_layout() {
    let text = header(&compile(|b| {
        point(b);
    }));

    assert!(text.starts_with("#pragma once\n#include \"renderer/pipeline/RenderFwd.h\""));
    assert!(text.contains("namespace render {\n\nstruct Point {"));
    assert!(text.trim_end().ends_with("} // namespace render"));
    assert!(!text.contains("GraphImpl.h"));
}

#[test]
fn scoped_enum_with_values() {
    let text = header(&compile(|b| {
        let v = b.add_enum("QueueType", class()).unwrap();
        b.set_underlying_type(v, "uint8_t").unwrap();
        b.add_enum_element(v, "GRAPHICS", "").unwrap();
        b.add_enum_element(v, "COMPUTE", "4").unwrap();
    }));

    assert!(text.contains(
        "enum class QueueType : uint8_t {\n    GRAPHICS,\n    COMPUTE = 4,\n};"
    ));
    assert!(!text.contains("operator|"));
}

#[test]
fn flags_get_bit_operators() {
    let text = header(&compile(|b| {
        let v = b.add_flags("Usage", class()).unwrap();
        b.set_underlying_type(v, "uint32_t").unwrap();
        b.add_enum_element(v, "NONE", "0").unwrap();
        b.add_enum_element(v, "COLOR", "0x1").unwrap();
    }));

    assert!(text.contains("enum class Usage : uint32_t {"));
    assert!(text.contains("inline Usage operator|(const Usage lhs, const Usage rhs) noexcept {"));
    assert!(text.contains(
        "return static_cast<Usage>(static_cast<uint32_t>(lhs) | static_cast<uint32_t>(rhs));"
    ));
    assert!(text.contains("inline Usage& operator&=(Usage& lhs, const Usage rhs) noexcept {"));
    assert!(text.contains("return e == static_cast<Usage>(0);"));
    assert!(text.contains("return static_cast<Usage>(~static_cast<uint32_t>(e));"));
    assert!(text.contains("inline bool any(Usage e) noexcept {\n    return !!e;\n}"));
}

#[test]
fn nested_flags_are_friends() {
    let text = header(&compile(|b| {
        let owner = b.add_struct("Pass", Traits::default()).unwrap();
        b.open_scope(owner).unwrap();
        b.add_flags("Bits", Traits::default()).unwrap();
        b.close_scope();
    }));

    assert!(text.contains("struct Pass {\n    enum Bits {"));
    assert!(text.contains(
        "friend inline Bits operator|(const Bits lhs, const Bits rhs) noexcept {"
    ));
    assert!(text.contains("static_cast<std::underlying_type_t<Bits>>(lhs)"));
}

#[test]
fn entity_tags_compare_equal() {
    let text = header(&compile(|b| {
        b.add_tag("RenderTag", true).unwrap();
        b.add_tag("PlainTag", false).unwrap();
    }));

    assert!(text.contains("struct RenderTag {};"));
    assert!(text.contains(
        "inline bool operator<(const RenderTag& /*lhs*/, const RenderTag& /*rhs*/) noexcept { return false; }"
    ));
    assert!(text.contains(
        "inline bool operator==(const RenderTag& /*lhs*/, const RenderTag& /*rhs*/) noexcept { return true; }"
    ));
    assert!(text.contains("struct PlainTag {};"));
    assert!(!text.contains("const PlainTag&"));
}

#[test]
fn aliases_and_defines() {
    let text = header(&compile(|b| {
        b.add_alias("Index", "uint32_t").unwrap();
        b.add_define("RenderLimit", "#define RENDER_MAX_PASSES 8").unwrap();
    }));

    assert!(text.contains("using Index = uint32_t;"));
    assert!(text.contains("#define RENDER_MAX_PASSES 8"));
}

#[test]
fn variants_move_to_fwd_header() {
    let build = |features: Features| {
        let mut b = ModuleBuilder::with_std().unwrap();
        let info = ModuleInfo::new("renderer/pipeline", "Render").features(features);
        b.open_module("Render", info).unwrap();
        b.open_namespace("render").unwrap();
        let v = b.add_variant("Value", GenerationFlags::NONE).unwrap();
        b.add_variant_element(v, "int").unwrap();
        b.add_variant_element(v, "float").unwrap();
        b.close_scope();
        b.close_module();
        b.compile().unwrap()
    };

    let with_fwd = header(&build(Features::FWD | Features::TYPES));
    assert!(!with_fwd.contains("using Value"));

    let without_fwd = header(&build(Features::TYPES));
    assert!(without_fwd.contains("#include <variant>"));
    assert!(without_fwd.contains("using Value = std::variant<int, float>;"));
}

#[test]
fn hashed_structs_specialize_std_hash() {
    let text = header(&compile(|b| {
        let v = b.add_struct("Key", traits("equal | hash_combine")).unwrap();
        b.add_member(v, true, "int", "mX", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "int", "mY", "_", GenerationFlags::NONE)
            .unwrap();
    }));

    let ns_close = text.find("} // namespace render").unwrap();
    let std_open = text.find("namespace std {").unwrap();
    assert!(ns_close < std_open);
    assert!(text.contains("template <>\nstruct hash<render::Key> {"));
    assert!(text.contains("size_t operator()(const render::Key& val) const noexcept {"));
    assert!(text.contains(
        "        boost::hash_combine(seed, val.mX);\n        boost::hash_combine(seed, val.mY);\n        return seed;"
    ));
    assert!(text.trim_end().ends_with("} // namespace std"));
}

#[test]
fn graphs_pull_in_the_impl_header() {
    let text = header(&compile(|b| {
        light(b);
        b.add_graph("LightGraph", "Light", "_", Traits::default())
            .unwrap();
    }));

    assert!(text.contains("#include \"graph/GraphImpl.h\""));
    assert!(text.contains("struct LightGraph {"));
}

#[test]
fn dependencies_include_their_types_header() {
    let mut b = ModuleBuilder::with_std().unwrap();
    b.open_module("Render", render_info()).unwrap();
    b.open_namespace("render").unwrap();
    point(&mut b);
    b.close_scope();
    b.close_module();

    let layout = ModuleInfo::new("renderer/layout", "Layout").features(Features::TYPES);
    b.open_module("Layout", layout).unwrap();
    b.open_namespace("layout").unwrap();
    let v = b.add_struct("Box", Traits::default()).unwrap();
    b.add_member(v, true, "render::Point", "mOrigin", "_", GenerationFlags::NONE)
        .unwrap();
    b.close_scope();
    b.close_module();
    let compiled = b.compile().unwrap();

    let config = Config::new().emit_comments(false);
    let ctx = CppContext::new(&compiled, "/Layout", &config).unwrap();
    let text = emit_types_header(&ctx).unwrap();
    assert!(text.contains("#include \"renderer/pipeline/RenderTypes.h\""));
    assert!(text.contains("render::Point mOrigin;"));
    assert!(!text.contains("struct Point {"));
}

#[test]
fn source_skips_inline_structs() {
    let compiled = compile(|b| {
        point(b);
    });
    let text = with_context(&compiled, |ctx| emit_types_source(ctx).unwrap());

    assert!(text.starts_with("#include \"renderer/pipeline/RenderTypes.h\""));
    assert!(!text.contains("namespace render"));
}

#[test]
fn banner_when_comments_are_enabled() {
    let compiled = compile(|b| {
        point(b);
    });
    let config = Config::new();
    let ctx = CppContext::new(&compiled, MODULE, &config).unwrap();
    let text = emit_types_header(&ctx).unwrap();

    assert!(text.contains("// clang-format off"));
    assert!(text.trim_end().ends_with("// clang-format on"));
}
