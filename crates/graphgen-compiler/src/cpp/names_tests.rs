use graphgen_core::Traits;

use crate::cpp::emit_names;
use crate::test_utils::*;

#[test]
fn enum_names_switch_on_value() {
    let compiled = compile(|b| {
        let v = b.add_enum("Mode", Traits::default()).unwrap();
        b.add_enum_element(v, "Forward", "").unwrap();
        b.add_enum_element(v, "Deferred", "").unwrap();
    });
    let text = with_context(&compiled, |ctx| emit_names(ctx).unwrap());

    assert!(text.contains("#include \"renderer/pipeline/RenderTypes.h\""));
    assert!(text.contains("inline const char* getName(Mode e) noexcept {"));
    assert!(text.contains("case Mode::Forward:\n"));
    assert!(text.contains("return \"Deferred\";"));
    assert!(text.contains("return \"\";"));
}

#[test]
fn nested_structs_are_qualified() {
    let compiled = compile(|b| {
        let outer = b.add_struct("Pass", Traits::default()).unwrap();
        b.open_scope(outer).unwrap();
        b.add_struct("Attachment", Traits::default()).unwrap();
        b.close_scope();
        b.add_tag("SpotTag", false).unwrap();
    });
    let text = with_context(&compiled, |ctx| emit_names(ctx).unwrap());

    assert!(text.contains(
        "inline const char* getName(const Pass& /*v*/) noexcept { return \"Pass\"; }"
    ));
    assert!(text.contains(
        "inline const char* getName(const Pass::Attachment& /*v*/) noexcept { return \"Attachment\"; }"
    ));
    assert!(text.contains("getName(const SpotTag& /*v*/)"));
    assert!(text.contains("} // namespace render"));
}
