use graphgen_core::syntax::Method;
use graphgen_core::{Compiled, GenerationFlags, Traits};

use crate::emscripten::emit_wasm_exports;
use crate::test_utils::*;

fn method(name: &str, getter: bool, setter: bool, skip: bool) -> Method {
    Method {
        function_name: name.to_owned(),
        getter,
        setter,
        skip,
    }
}

fn exports(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_wasm_exports(ctx).unwrap())
}

/// Plain `Light`, plus a `Camera` with accessors, a pointer and a constant.
fn camera() -> Compiled {
    compile(|b| {
        light(b);
        let v = b.add_struct("Camera", Traits::default()).unwrap();
        b.add_member(v, true, "Light*", "mTarget", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "const int", "mId", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, false, "float", "mFov", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_constructor(v, &["mId"], false).unwrap();
        b.add_method(v, method("getFov", true, false, false)).unwrap();
        b.add_method(v, method("setFov", false, true, false)).unwrap();
        b.add_method(v, method("update", false, false, false)).unwrap();
        b.add_method(v, method("reset", false, false, true)).unwrap();
    })
}

#[test]
fn structs_and_classes() {
    insta::assert_snapshot!(exports(&camera()), @r#"
    #pragma once
    #include <emscripten/bind.h>
    #include "WasmDefine.h"
    #include "renderer/pipeline/RenderTypes.h"

    REGISTER_PTRS(render::Light);

    inline const auto& Camera_mTarget_getter(const render::Camera& v) {
        return v.mTarget;
    }

    inline void Camera_mTarget_setter(render::Camera& t, render::Light* v) {
        t.mTarget = v;
    }

    inline const auto& Camera_mId_getter(const render::Camera& v) {
        return v.mId;
    }

    EMSCRIPTEN_BINDINGS(Render_WASM_EXPORT) {
        using emscripten::base;
        using emscripten::class_;
        using emscripten::value_object;

        value_object<render::Light>("Light")
            .field("intensity", &render::Light::mIntensity);

        class_<render::Camera>("Camera")
            .constructor<int>()
            .property("fov", &render::Camera::getFov, &render::Camera::setFov)
            .function("update", &render::Camera::update)
            .property("target", &Camera_mTarget_getter, &Camera_mTarget_setter)
            .property("id", &Camera_mId_getter);
    } // EMSCRIPTEN_BINDINGS(Render_WASM_EXPORT)
    "#);
}

#[test]
fn allocator_aware_struct_is_created_with_default_resource() {
    let compiled = compile(|b| {
        let v = b.add_struct("Material", Traits::default()).unwrap();
        b.add_member(v, true, "std::pmr::string", "mName", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "int", "mId", "_", GenerationFlags::NONE)
            .unwrap();
    });
    let text = exports(&compiled);

    assert!(text.contains(
        "template <>\ninline render::Material creator<render::Material>() {\n    return render::Material{boost::container::pmr::get_default_resource()};\n}"
    ));
    assert!(text.contains(
        "template <>\ninline void assignVal(render::Material& t, const render::Material& v) {\n    assignVal(t.mName, v.mName);\n    assignVal(t.mId, v.mId);\n}"
    ));
    assert!(text.contains(
        "    class_<render::Material>(\"Material\")\n        .constructor<>(&creator<render::Material>)\n        .property(\"name\", &Material_mName_getter, &Material_mName_setter)\n        .property(\"id\", &Material_mId_getter, &Material_mId_setter);"
    ));
    assert!(!text.contains("value_object"));
}

#[test]
fn derived_struct_names_its_base() {
    let compiled = compile(|b| {
        light(b);
        let v = b.add_struct("Spot", Traits::default()).unwrap();
        b.add_inherits(v, "Light").unwrap();
    });
    let text = exports(&compiled);

    assert!(text.contains("    class_<render::Spot, base<render::Light>>(\"Spot\");\n"));
    assert!(!text.contains("REGISTER_PTRS"));
}

#[test]
fn hidden_declarations_are_not_registered() {
    let compiled = compile(|b| {
        let i = b
            .add_struct(
                "Renderer",
                Traits {
                    interface: true,
                    ..Traits::default()
                },
            )
            .unwrap();
        b.add_method(i, method("render", false, false, false)).unwrap();
        let d = b.add_struct("Cache", traits("impl_detail")).unwrap();
        b.add_member(d, true, "int", "mSize", "_", GenerationFlags::NONE)
            .unwrap();
    });
    let text = exports(&compiled);

    assert!(!text.contains("EMSCRIPTEN_BINDINGS"));
    assert!(!text.contains("Renderer"));
    assert!(!text.contains("Cache"));
}

#[test]
fn impl_detail_members_are_not_fields() {
    let compiled = compile(|b| {
        let v = point(b);
        b.add_member(v, true, "int", "mCache", "_", flags("impl_detail"))
            .unwrap();
    });
    let text = exports(&compiled);

    assert!(text.contains(
        "    value_object<render::Point>(\"Point\")\n        .field(\"x\", &render::Point::mX)\n        .field(\"y\", &render::Point::mY);\n"
    ));
    assert!(!text.contains("mCache"));
}
