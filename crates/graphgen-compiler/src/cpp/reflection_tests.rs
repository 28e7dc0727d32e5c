use graphgen_core::{GenerationFlags, Traits};

use crate::cpp::emit_reflection;
use crate::test_utils::*;

#[test]
fn members_are_visited_by_public_name() {
    let compiled = compile(|b| {
        let v = point(b);
        b.add_member(v, true, "int", "mCache", "_", GenerationFlags::NO_SERIALIZATION)
            .unwrap();
    });
    let text = with_context(&compiled, |ctx| emit_reflection(ctx).unwrap());

    assert!(text.contains("#include <string_view>"));
    assert!(text.contains(
        "template <class Visitor>\nvoid visitMembers(const Point& v, Visitor&& visitor) {"
    ));
    assert!(text.contains("void visitMembers(Point& v, Visitor&& visitor) {"));
    assert!(text.contains("visitor(\"x\", v.mX);"));
    assert!(text.contains("visitor(\"y\", v.mY);"));
    assert!(!text.contains("mCache"));
}

#[test]
fn enumerator_tables() {
    let compiled = compile(|b| {
        let v = b.add_enum("Mode", Traits::default()).unwrap();
        b.add_enum_element(v, "Forward", "").unwrap();
        b.add_enum_element(v, "Deferred", "").unwrap();
    });
    let text = with_context(&compiled, |ctx| emit_reflection(ctx).unwrap());

    assert!(text.contains(
        "inline constexpr std::array<std::pair<Mode, std::string_view>, 2> ModeEnumerators{{"
    ));
    assert!(text.contains("{Mode::Forward, \"Forward\"},"));
    assert!(text.contains("}};"));
}

#[test]
fn opted_out_structs_are_skipped() {
    let compiled = compile(|b| {
        let v = b.add_struct("Scratch", traits("no_serialization")).unwrap();
        b.add_member(v, true, "int", "mSize", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_struct("Shader", Traits { interface: true, ..Traits::default() })
            .unwrap();
    });
    let text = with_context(&compiled, |ctx| emit_reflection(ctx).unwrap());

    assert!(!text.contains("Scratch"));
    assert!(!text.contains("Shader"));
}
