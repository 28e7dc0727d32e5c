use graphgen_core::{Compiled, GenerationFlags, ModuleBuilder, Traits};

use crate::Error;
use crate::cpp::{emit_types_header, emit_types_source};
use crate::test_utils::*;

fn header(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_types_header(ctx).unwrap())
}

fn source(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_types_source(ctx).unwrap())
}

/// `struct Material { std::pmr::string mName; int mId; }`, allocator aware
/// through its string member.
fn material(b: &mut ModuleBuilder) {
    let v = b.add_struct("Material", Traits::default()).unwrap();
    b.add_member(v, true, "std::pmr::string", "mName", "_", GenerationFlags::NONE)
        .unwrap();
    b.add_member(v, true, "int", "mId", "_", GenerationFlags::NONE)
        .unwrap();
    b.add_constructor(v, &["mName", "mId"], false).unwrap();
}

#[test]
fn member_constructor_inline() {
    let text = header(&compile(|b| {
        point(b);
    }));

    assert!(text.contains("struct Point {"));
    assert!(text.contains("Point() = default;"));
    assert!(text.contains(
        "    Point(int xIn, int yIn) noexcept\n    : mX(std::move(xIn))\n    , mY(std::move(yIn)) {}"
    ));
    assert!(text.contains("    int mX;\n    int mY;\n};"));
    assert!(!text.contains("allocator_type"));
}

#[test]
fn member_defaults_in_declaration_and_parameters() {
    let text = header(&compile(|b| {
        let v = b.add_struct("Viewport", Traits::default()).unwrap();
        b.add_member(v, true, "float", "mScale", "1.0F", GenerationFlags::NONE)
            .unwrap();
        b.add_constructor(v, &["mScale"], true).unwrap();
    }));

    assert!(text.contains("float mScale = 1.0F;"));
    assert!(text.contains("Viewport(float scaleIn = 1.0F) noexcept"));
}

#[test]
fn pmr_struct_declares_allocator_constructors() {
    let text = header(&compile(material));

    assert!(text.contains("using allocator_type = boost::container::pmr::polymorphic_allocator<char>;"));
    assert!(text.contains("return {mName.get_allocator().resource()};"));
    assert!(text.contains("Material(const allocator_type& alloc); // NOLINT"));
    assert!(text.contains("Material(std::string_view nameIn, int idIn, const allocator_type& alloc);"));
    assert!(text.contains("Material(Material&& rhs, const allocator_type& alloc);"));
    assert!(text.contains("Material(Material const& rhs, const allocator_type& alloc);"));
    assert!(text.contains("Material(Material&& rhs) noexcept = default;"));
    assert!(text.contains("Material(Material const& rhs) = delete;"));
    assert!(text.contains("Material& operator=(Material const& rhs) = default;"));
}

#[test]
fn pmr_struct_definitions() {
    let text = source(&compile(material));

    assert!(text.contains("#include \"renderer/pipeline/RenderTypes.h\""));
    assert!(text.contains("Material::Material(const allocator_type& alloc)\n: mName(alloc) {}"));
    assert!(text.contains(
        "Material::Material(std::string_view nameIn, int idIn, const allocator_type& alloc)\n: mName(nameIn, alloc)\n, mId(std::move(idIn)) {}"
    ));
    assert!(text.contains(
        "Material::Material(Material&& rhs, const allocator_type& alloc)\n: mName(std::move(rhs.mName), alloc)\n, mId(std::move(rhs.mId)) {}"
    ));
    assert!(text.contains(
        "Material::Material(Material const& rhs, const allocator_type& alloc)\n: mName(rhs.mName, alloc)\n, mId(rhs.mId) {}"
    ));
}

#[test]
fn pmr_default_resource() {
    let text = header(&compile(|b| {
        let v = b
            .add_struct(
                "Pass",
                Traits {
                    flags: GenerationFlags::PMR_DEFAULT,
                    ..Traits::default()
                },
            )
            .unwrap();
        b.add_member(v, true, "std::pmr::string", "mName", "_", GenerationFlags::NONE)
            .unwrap();
    }));

    assert!(text.contains(
        "Pass(const allocator_type& alloc = boost::container::pmr::get_default_resource()); // NOLINT"
    ));
}

#[test]
fn class_with_member_operators() {
    let text = header(&compile(|b| {
        let v = b
            .add_struct(
                "Handle",
                Traits {
                    class: true,
                    flags: flags("equal | less"),
                    ..Traits::default()
                },
            )
            .unwrap();
        b.add_member(v, true, "int", "mId", "_", GenerationFlags::NONE)
            .unwrap();
    }));

    assert!(text.contains("class Handle {\npublic:\n"));
    assert!(text.contains("bool operator==(const Handle& rhs) const noexcept {"));
    assert!(text.contains("return std::forward_as_tuple(mId) ==\n"));
    assert!(text.contains("       std::forward_as_tuple(rhs.mId);"));
    assert!(text.contains("return !(*this == rhs);"));
    assert!(text.contains("bool operator<(const Handle& rhs) const noexcept {"));
    assert!(!text.contains("inline bool operator==(const Handle& lhs"));
}

#[test]
fn struct_with_free_operators() {
    let text = header(&compile(|b| {
        let v = b.add_struct("Extent", traits("equal | spaceship")).unwrap();
        b.add_member(v, true, "int", "mWidth", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "int", "mHeight", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_struct("Empty", traits("equal")).unwrap();
    }));

    assert!(text.contains("inline bool operator==(const Extent& lhs, const Extent& rhs) noexcept {"));
    assert!(text.contains("return std::forward_as_tuple(lhs.mWidth, lhs.mHeight) <=>"));
    assert!(text.contains("inline bool operator==(const Empty& lhs, const Empty& rhs) noexcept {\n    return true;\n}"));
}

#[test]
fn interface_and_derived() {
    let text = header(&compile(|b| {
        b.add_struct(
            "Shader",
            Traits {
                interface: true,
                ..Traits::default()
            },
        )
        .unwrap();
        let v = b.add_struct("Forward", Traits::default()).unwrap();
        b.add_inherits(v, "Shader").unwrap();
    }));

    assert!(text.contains("Shader() noexcept = default;"));
    assert!(text.contains("virtual ~Shader() noexcept = 0;"));
    assert!(text.contains("inline Shader::~Shader() noexcept = default;"));
    assert!(text.contains("struct Forward : public Shader {"));
}

#[test]
fn member_functions_get_export_macro() {
    let mut b = ModuleBuilder::with_std().unwrap();
    b.open_module("Render", render_info().api("RENDER_API")).unwrap();
    b.open_namespace("render").unwrap();
    let v = b.add_struct("Queue", Traits::default()).unwrap();
    b.add_member_function(v, "[[dll]] void submit();").unwrap();
    b.add_member(v, true, "std::pmr::string", "mName", "_", GenerationFlags::NONE)
        .unwrap();
    b.close_scope();
    b.close_module();
    let text = header(&b.compile().unwrap());

    assert!(text.contains("struct RENDER_API Queue {"));
    assert!(text.contains("RENDER_API void submit();"));
    assert!(text.contains("allocator_type get_allocator() const noexcept;"));
    assert!(text.contains("Queue(Queue&& rhs) noexcept;"));
}

#[test]
fn missing_allocator_member_is_rejected() {
    let compiled = compile(|b| {
        let v = b.add_struct("Scratch", pmr()).unwrap();
        b.add_member(v, true, "int", "mSize", "_", GenerationFlags::NONE)
            .unwrap();
    });
    let err = with_context(&compiled, |ctx| emit_types_header(ctx).err().unwrap());
    assert!(matches!(err, Error::NoAllocatorMember(ref path) if path == "/render/Scratch"));
}
