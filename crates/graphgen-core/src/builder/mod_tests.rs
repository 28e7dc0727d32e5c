use crate::syntax::{GenerationFlags as F, Kind, ListKind, NamedConcept, Ownership, Traits, VertexMap};
use crate::{Error, Features, ModuleBuilder, ModuleInfo};

fn open(b: &mut ModuleBuilder, module: &str, ns: &str) {
    b.open_module(module, ModuleInfo::new(module.to_lowercase(), module))
        .unwrap();
    b.open_namespace(ns).unwrap();
}

fn close(b: &mut ModuleBuilder) {
    b.close_scope();
    b.close_module();
}

#[test]
fn cursors_follow_open_and_close() {
    let mut b = ModuleBuilder::new();
    b.open_module("Render", ModuleInfo::default()).unwrap();
    b.open_module("Layout", ModuleInfo::default()).unwrap();
    assert_eq!(b.current_module(), "/Render/Layout");
    b.open_namespace("render").unwrap();
    b.open_namespace("detail").unwrap();
    assert_eq!(b.current_scope(), "/render/detail");
    b.close_scope();
    assert_eq!(b.current_scope(), "/render");
    b.close_scope();
    b.close_module();
    assert_eq!(b.current_module(), "/Render");
    assert_eq!(b.current_scope(), "");
    assert_eq!(b.modules().len(), 2);
}

#[test]
fn namespaces_are_reopened() {
    let mut b = ModuleBuilder::new();
    let a = b.open_namespace("render").unwrap();
    b.close_scope();
    let c = b.open_namespace("render").unwrap();
    assert_eq!(a, c);
    assert_eq!(b.syntax().num_vertices(), 1);
}

#[test]
fn declarations_record_their_module() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    close(&mut b);
    let g = b.syntax();
    assert_eq!(g.vertex(pass).module_path, "/Render");
    assert_eq!(g.get_path(pass), "/render/Pass");
    assert_eq!(g.vertex(g.locate("/int").unwrap()).module_path, "");
    assert!(g.traits(g.locate("/int").unwrap()).import);
}

#[test]
fn nested_scope_declarations() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.open_scope(pass).unwrap();
    let kind = b.add_enum("Kind", Traits::default()).unwrap();
    b.close_scope();
    b.add_member(pass, true, "Kind", "mKind", "", F::NONE).unwrap();
    close(&mut b);

    let g = b.syntax();
    assert_eq!(g.get_path(kind), "/render/Pass/Kind");
    assert_eq!(g.composition(pass).members[0].type_path, "/render/Pass/Kind");
}

#[test]
fn members_peel_qualifiers() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.add_member(pass, false, "const Pass*", "mParent", "nullptr", F::NONE)
        .unwrap();
    b.add_member(pass, true, "uint32_t", "mCount", "_", F::NONE)
        .unwrap();
    close(&mut b);

    let members = &b.syntax().composition(pass).members;
    assert_eq!(members[0].type_path, "/render/Pass");
    assert!(members[0].is_const && members[0].pointer && !members[0].public);
    assert_eq!(members[0].default_value, "nullptr");
    assert_eq!(members[1].type_path, "/uint32_t");
    assert_eq!(members[1].default_value, "");
}

#[test]
fn member_errors() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    let tag = b.add_tag("Raster_", false).unwrap();

    assert!(matches!(
        b.add_member(pass, true, "Pass", "mSelf", "", F::NONE),
        Err(Error::SelfContainment { .. })
    ));
    assert!(matches!(
        b.add_member(pass, true, "std::optional<Pass>", "mNext", "", F::NONE),
        Err(Error::SelfContainment { .. })
    ));
    assert!(matches!(
        b.add_member(pass, true, "const volatile int", "mX", "", F::NONE),
        Err(Error::ConstVolatile(_))
    ));
    assert!(matches!(
        b.add_member(pass, true, "int", "count", "", F::NONE),
        Err(Error::InvalidMemberName(_))
    ));
    assert!(matches!(
        b.add_member(pass, true, "Missing", "mX", "", F::NONE),
        Err(Error::IdentifierNotFound { .. })
    ));
    assert!(matches!(
        b.add_member(tag, true, "int", "mX", "", F::NONE),
        Err(Error::NotAComposition(_))
    ));
    b.add_member(pass, true, "int", "mX", "", F::NONE).unwrap();
    assert!(matches!(
        b.add_member(pass, true, "float", "mX", "", F::NONE),
        Err(Error::DuplicateName { .. })
    ));
    b.add_member(pass, true, "Pass*", "mNext", "", F::NONE).unwrap();
}

#[test]
fn constructors_index_members() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Geometry", "geometry");
    let point = b.add_struct("Point", Traits::default()).unwrap();
    b.add_member(point, true, "int", "mX", "0", F::NONE).unwrap();
    b.add_member(point, true, "int", "mY", "0", F::NONE).unwrap();
    b.add_constructor(point, &["mY", "mX"], true).unwrap();
    let err = b.add_constructor(point, &["mZ"], false).unwrap_err();
    assert_eq!(err.to_string(), "member 'mZ' not found in '/geometry/Point'");

    let ctors = &b.syntax().composition(point).constructors;
    assert_eq!(ctors.len(), 1);
    assert_eq!(ctors[0].indices, [1, 0]);
    assert!(ctors[0].has_default);
}

#[test]
fn graphs_collect_axes() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let data = b.add_struct("Data", Traits::default()).unwrap();
    b.add_member(data, true, "std::pmr::string", "mName", "", F::NONE)
        .unwrap();
    let g = b.add_graph("RenderGraph", "_", "_", Traits::default()).unwrap();
    b.add_graph_component(g, "Name", "std::pmr::string", "mNames").unwrap();
    b.add_graph_component(g, "Data", "Data", "mData").unwrap();
    b.set_named(
        g,
        NamedConcept {
            component: Some("Name".into()),
            member_name: String::new(),
        },
    )
    .unwrap();
    b.set_reference(g, Ownership::Reference, true).unwrap();
    b.set_addressable(g, "mPathIndex", false).unwrap();
    close(&mut b);

    let desc = &b.syntax().graph(g).desc;
    assert!(desc.vertex_property.is_empty());
    assert_eq!(desc.components.len(), 2);
    assert_eq!(desc.components[0].value_path, "/std/pmr/string");
    assert!(desc.need_reference_edges());
    assert!(desc.has_string_path());
    assert_eq!(desc.unsupported_reason(), None);
    assert!(b.syntax().is_pmr(g));
}

#[test]
fn members_reject_indirect_self_containment() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.open_scope(pass).unwrap();
    let stage = b.add_struct("Stage", Traits::default()).unwrap();
    b.close_scope();
    b.add_member(stage, true, "Pass", "mOwner", "", F::NONE)
        .unwrap();

    assert!(matches!(
        b.add_member(pass, true, "Stage", "mStage", "", F::NONE),
        Err(Error::SelfContainment { ref member, .. }) if member == "mStage"
    ));
    assert!(matches!(
        b.add_member(pass, true, "std::optional<Stage>", "mNext", "", F::NONE),
        Err(Error::SelfContainment { .. })
    ));
    b.add_member(pass, true, "Stage*", "mFirst", "nullptr", F::NONE)
        .unwrap();

    let queue = b.add_struct("Queue", Traits::default()).unwrap();
    b.add_member(queue, true, "Pass::Stage", "mStage", "", F::NONE)
        .unwrap();
    assert!(matches!(
        b.add_member(pass, true, "Queue", "mQueue", "", F::NONE),
        Err(Error::SelfContainment { .. })
    ));

    assert!(!b.syntax().is_pmr(pass));
    assert!(b.syntax().is_noexcept(pass));
}

#[test]
fn graphs_reject_values_holding_the_graph() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let g = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
    let node = b.add_struct("Node", Traits::default()).unwrap();
    b.add_member(node, true, "Tree", "mSubtree", "", F::NONE)
        .unwrap();

    assert!(matches!(
        b.add_graph_component(g, "Node", "Node", "mNodes"),
        Err(Error::GraphSelfReference { place: "a component", .. })
    ));
    assert!(!b.syntax().is_pool_object(node));
}

#[test]
fn graphs_reject_self_reference() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let err = b
        .add_graph("Loop", "Loop", "_", Traits::default())
        .unwrap_err();
    assert!(matches!(err, Error::IdentifierNotFound { .. }));

    let g = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
    assert!(matches!(
        b.add_graph_component(g, "Self", "Tree", "mSelf"),
        Err(Error::GraphSelfReference { place: "a component", .. })
    ));
    b.add_tag("Node_", false).unwrap();
    assert!(matches!(
        b.add_graph_polymorphic(g, "Node_", "Tree", "mNodes", ListKind::Vector),
        Err(Error::GraphSelfReference { .. })
    ));
    let map = VertexMap {
        key_type: "Tree".into(),
        ..VertexMap::default()
    };
    assert!(matches!(
        b.add_vertex_map(g, map),
        Err(Error::GraphSelfReference { .. })
    ));
}

#[test]
fn graphs_only_in_namespaces() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.open_scope(pass).unwrap();
    assert!(matches!(
        b.add_graph("Inner", "_", "_", Traits::default()),
        Err(Error::InvalidScope(_))
    ));
    b.close_scope();
    assert!(matches!(
        b.add_graph_component(pass, "A", "int", "mA"),
        Err(Error::NotAGraph(_))
    ));
}

#[test]
fn variants_and_enums() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    b.add_tag("Raster_", false).unwrap();
    let v = b.add_variant("PassType", F::JSB).unwrap();
    b.add_variant_element(v, "Raster_").unwrap();
    let e = b.add_flags("Usage", Traits::default()).unwrap();
    b.set_underlying_type(e, "uint32_t").unwrap();
    b.add_enum_element(e, "NONE", "0").unwrap();
    b.add_enum_element(e, "SAMPLED", "1 << 0").unwrap();
    assert!(matches!(
        b.add_enum_element(e, "NONE", "0"),
        Err(Error::DuplicateName { .. })
    ));
    assert!(matches!(b.add_enum_element(v, "X", ""), Err(Error::NotAnEnum(_))));
    assert!(matches!(
        b.add_variant_element(e, "Raster_"),
        Err(Error::NotAVariant(_))
    ));
    close(&mut b);

    let g = b.syntax();
    let Kind::Enum(usage) = g.kind(e) else {
        panic!("expected enum");
    };
    assert!(usage.is_flags);
    assert_eq!(usage.underlying_type, "uint32_t");
    assert_eq!(usage.values[1].value, "1 << 0");
    assert!(g.has_flag(v, F::JSB));
}

#[test]
fn constraints_need_concepts() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    b.add_concept("Resource").unwrap();
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.add_constraints(pass, "Resource").unwrap();
    assert!(matches!(
        b.add_constraints(pass, "Pass"),
        Err(Error::InvalidOption { what: "concept", .. })
    ));
    assert_eq!(b.syntax().vertex(pass).constraints, ["/render/Resource"]);
}

#[test]
fn typescript_projection_instantiates() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Render", "render");
    b.project_typescript("std::vector<int8_t>", "(Int8Array)").unwrap();
    let g = b.syntax();
    let v = g.locate("/std/vector</int8_t>").unwrap();
    assert_eq!(g.vertex(v).typescript.name, "Int8Array");
}

#[test]
fn compile_derives_module_dependencies() {
    let mut b = ModuleBuilder::with_std().unwrap();
    open(&mut b, "Core", "core");
    let id = b.add_struct("Id", Traits::default()).unwrap();
    b.add_member(id, true, "uint32_t", "mValue", "0", F::NONE).unwrap();
    close(&mut b);
    open(&mut b, "Render", "render");
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.add_member(pass, true, "std::vector<core::Id>", "mIds", "", F::NONE)
        .unwrap();
    b.add_member(pass, true, "std::pmr::string", "mName", "", F::NONE)
        .unwrap();
    close(&mut b);

    let compiled = b.compile().unwrap();
    let deps: Vec<_> = compiled.modules().dependencies("/Render").collect();
    assert_eq!(deps, ["/Core"]);
    assert_eq!(compiled.modules().dependencies("/Core").count(), 0);

    let imported = compiled.imported_types("/Render");
    assert_eq!(imported.len(), 1);
    assert!(imported["/Core"].contains("/core/Id"));
    assert_eq!(compiled.module_vertices("/Render").count(), 1);
}

#[test]
fn features_parse_from_text() {
    let f = Features::from_text("fwd | types|GRAPHS").unwrap();
    assert!(f.contains(Features::FWD | Features::TYPES | Features::GRAPHS));
    assert!(!f.contains(Features::JSB));
    assert_eq!(f.names().collect::<Vec<_>>(), ["fwd", "types", "graphs"]);
    assert!(matches!(
        Features::from_text("fwd|bogus"),
        Err(Error::InvalidFeature(_))
    ));
}

#[test]
fn module_file_paths() {
    let info = ModuleInfo::new("cocos/renderer", "RenderGraph");
    assert_eq!(info.file_path("Types.h"), "cocos/renderer/RenderGraphTypes.h");
    let root = ModuleInfo::new("", "Render");
    assert_eq!(root.file_path(".ts"), "Render.ts");
}
