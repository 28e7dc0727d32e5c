use graphgen_core::{GenerationFlags, ModuleBuilder, Traits};

use crate::test_utils::*;

#[test]
fn point_class_with_defaulted_constructor() {
    let text = typescript(&compile(|b| {
        point(b);
    }));

    assert!(text.contains(
        "export class Point {\n    constructor (x = 0, y = 0) {\n        this.x = x;\n        this.y = y;\n    }\n    x: number;\n    y: number;\n}"
    ));
    assert!(!text.contains("import * as impl"));

    let class = &text[text.find("export class Point").unwrap()..];
    insta::assert_snapshot!(class, @r"
    export class Point {
        constructor (x = 0, y = 0) {
            this.x = x;
            this.y = y;
        }
        x: number;
        y: number;
    }
    ");
}

#[test]
fn fields_without_constructor_are_initialized() {
    let text = typescript(&compile(|b| {
        light(b);
    }));

    assert!(text.contains("export class Light {\n    intensity = 0;\n}"));
}

#[test]
fn private_fields_are_prefixed() {
    let text = typescript(&compile(|b| {
        let v = b.add_struct("Counter", Traits::default()).unwrap();
        b.add_member(v, false, "int", "mCount", "_", GenerationFlags::NONE)
            .unwrap();
    }));

    assert!(text.contains("private _count = 0;"));
}

#[test]
fn object_fields_are_readonly() {
    let text = typescript(&compile(|b| {
        light(b);
        let v = b.add_struct("Lamp", Traits::default()).unwrap();
        b.add_member(v, true, "Light", "mLight", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "bool", "mOn", "_", GenerationFlags::NONE)
            .unwrap();
    }));

    assert!(text.contains("readonly light: Light = new Light();"));
    assert!(text.contains("on = false;"));
    assert!(!text.contains("readonly on"));
}

#[test]
fn impl_detail_members_are_hidden() {
    let text = typescript(&compile(|b| {
        let v = b.add_struct("Cache", Traits::default()).unwrap();
        b.add_member(v, true, "int", "mSize", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "int", "mHidden", "_", flags("impl_detail"))
            .unwrap();
    }));

    assert!(text.contains("size = 0;"));
    assert!(!text.contains("hidden"));
}

#[test]
fn long_constructors_break_parameters() {
    let text = typescript(&compile(|b| {
        let v = b.add_struct("Rect", Traits::default()).unwrap();
        for m in ["mA", "mB", "mC", "mD", "mE"] {
            b.add_member(v, true, "int", m, "_", GenerationFlags::NONE)
                .unwrap();
        }
        b.add_constructor(v, &["mA", "mB", "mC", "mD", "mE"], false)
            .unwrap();
    }));

    assert!(text.contains(
        "    constructor (\n        a: number,\n        b: number,\n        c: number,\n        d: number,\n        e: number,\n    ) {\n        this.a = a;"
    ));
    assert!(text.contains("    a: number;\n"));
}

#[test]
fn derived_class_forwards_base_parameters() {
    let text = typescript(&compile(|b| {
        point(b);
        let v = b.add_struct("Point3", Traits::default()).unwrap();
        b.add_inherits(v, "Point").unwrap();
        b.add_member(v, true, "int", "mZ", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_constructor(v, &["mZ"], true).unwrap();
    }));

    assert!(text.contains("export class Point3 extends Point {"));
    assert!(text.contains("constructor (x = 0, y = 0, z = 0) {\n        super(x, y);\n        this.z = z;"));
}

#[test]
fn typescript_default_overrides_initializer() {
    let text = typescript(&compile(|b| {
        let v = b.add_struct("Viewport", Traits::default()).unwrap();
        b.add_member(v, true, "float", "mScale", "1.0F", GenerationFlags::NONE)
            .unwrap();
        b.set_typescript_default(v, "mScale", "2").unwrap();
    }));

    assert!(text.contains("scale = 2;"));
}

#[test]
fn verbatim_functions_are_kept() {
    let text = typescript(&compile(|b| {
        let v = light(b);
        b.add_typescript_function(v, "dim (): void {\n    this.intensity = 0;\n}")
            .unwrap();
    }));

    assert!(text.contains("    dim (): void {\n        this.intensity = 0;\n    }"));
}

#[test]
fn enums_and_flags() {
    let text = typescript(&compile(|b| {
        let v = b.add_enum("Color", Traits::default()).unwrap();
        b.add_enum_element(v, "Red", "").unwrap();
        b.add_enum_element(v, "Green", "2").unwrap();
        let f = b.add_flags("Mask", Traits::default()).unwrap();
        b.add_enum_element(f, "None", "0").unwrap();
        b.add_enum_element(f, "Depth", "1").unwrap();
    }));

    assert!(text.contains("export const enum Color {\n    Red,\n    Green = 2,\n}"));
    assert!(text.contains("export const enum Mask {\n    None = 0,\n    Depth = 1,\n}"));
    assert!(text.contains(
        "export function combineMask (lhs: Mask, rhs: Mask): Mask {\n    return (lhs | rhs) as Mask;\n}"
    ));
    assert!(text.contains("export function hasMask (flags: Mask, bits: Mask): boolean {"));
    assert!(!text.contains("combineColor"));
}

fn tags(b: &mut ModuleBuilder) {
    b.add_tag("Spot_", false).unwrap();
    b.add_tag("Sun_", false).unwrap();
}

#[test]
fn tag_variant_is_an_enum() {
    let text = typescript(&compile(|b| {
        tags(b);
        let v = b.add_variant("LightKind", GenerationFlags::NONE).unwrap();
        b.add_variant_element(v, "Spot_").unwrap();
        b.add_variant_element(v, "Sun_").unwrap();
    }));

    assert!(text.contains("export const enum LightKind {\n    Spot,\n    Sun,\n}"));
}

#[test]
fn value_variant_is_a_union() {
    let text = typescript(&compile(|b| {
        light(b);
        point(b);
        let v = b.add_variant("Shape", GenerationFlags::NONE).unwrap();
        b.add_variant_element(v, "Light").unwrap();
        b.add_variant_element(v, "Point").unwrap();
    }));

    assert!(text.contains("export type Shape = Light | Point;"));
}

#[test]
fn pool_objects_reset_in_place() {
    let text = typescript(&compile(|b| {
        light(b);
        let v = b.add_struct("Particle", traits("pool_object")).unwrap();
        b.add_member(v, true, "float", "mLife", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "Light", "mLight", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_constructor(v, &["mLife"], true).unwrap();
    }));

    assert!(text.contains("reset (life = 0): void {\n        this.life = life;\n        this.light = new Light();\n    }"));
    assert!(text.contains("    life: number;\n    light: Light = new Light();"));
    assert!(!text.contains("readonly light"));
}

#[test]
fn declarations_are_separated() {
    let text = typescript(&compile(|b| {
        light(b);
        point(b);
    }));

    assert!(text.contains("}\n\nexport class Point {"));
}
