use indoc::indoc;

use crate::syntax::{Directedness, Kind, ListKind};
use crate::{Description, Error, Features};

const DESCRIPTION: &str = indoc! {r#"
    {
        "modules": [
            {
                "name": "Geometry",
                "folder": "geometry",
                "prefix": "Geometry",
                "features": "fwd|types|typescripts",
                "namespaces": [
                    {
                        "name": "geometry",
                        "declarations": [
                            {
                                "kind": "struct",
                                "name": "Point",
                                "traits": { "flags": "equal|hash_combine" },
                                "members": [
                                    { "type": "int", "name": "mX", "default": "0" },
                                    { "type": "int", "name": "mY", "default": "0" }
                                ],
                                "constructors": [{ "members": ["mX", "mY"] }]
                            },
                            {
                                "kind": "enum",
                                "name": "Axis",
                                "underlying_type": "uint8_t",
                                "values": [{ "name": "X" }, { "name": "Y" }]
                            }
                        ]
                    }
                ]
            },
            {
                "name": "Scene",
                "folder": "scene",
                "prefix": "Scene",
                "features": "graphs",
                "namespaces": [
                    {
                        "name": "scene",
                        "declarations": [
                            { "kind": "tag", "name": "Mesh_" },
                            {
                                "kind": "graph",
                                "name": "SceneGraph",
                                "vertex": "geometry::Point",
                                "vertex_list": "list",
                                "directedness": "directed",
                                "members": [{ "type": "uint32_t", "name": "mVersion" }]
                            }
                        ]
                    }
                ]
            }
        ]
    }
"#};

#[test]
fn description_compiles() {
    let compiled = Description::from_json(DESCRIPTION).unwrap().compile().unwrap();
    let g = compiled.syntax();

    let point = g.locate("/geometry/Point").unwrap();
    assert_eq!(g.composition(point).members.len(), 2);
    assert_eq!(g.composition(point).constructors[0].indices, [0, 1]);
    assert!(g.traits(point).flags.contains(crate::GenerationFlags::EQUAL));

    let axis = g.locate("/geometry/Axis").unwrap();
    let Kind::Enum(e) = g.kind(axis) else {
        panic!("expected enum");
    };
    assert_eq!(e.underlying_type, "uint8_t");

    let scene = g.locate("/scene/SceneGraph").unwrap();
    let desc = &g.graph(scene).desc;
    assert_eq!(desc.vertex_property, "/geometry/Point");
    assert_eq!(desc.vertex_list, ListKind::List);
    assert_eq!(desc.directedness, Directedness::Directed);
    assert!(desc.mutable_graph);
    assert_eq!(g.composition(scene).members[0].member_name, "mVersion");

    let geometry = compiled.module("/Geometry").unwrap();
    assert!(geometry.has(Features::TYPESCRIPTS));
    assert_eq!(geometry.file_prefix, "Geometry");
    let deps: Vec<_> = compiled.modules().dependencies("/Scene").collect();
    assert_eq!(deps, ["/Geometry"]);
}

#[test]
fn description_round_trips_through_json() {
    let description = Description::from_json(DESCRIPTION).unwrap();
    let json = description.to_json().unwrap();
    let again = Description::from_json(&json).unwrap();
    assert_eq!(again.modules.len(), 2);
    assert_eq!(again.modules[1].namespaces[0].declarations.len(), 2);
}

#[test]
fn description_errors() {
    let bad_json = Description::from_json("{ \"modules\": 3 }").unwrap_err();
    assert!(matches!(bad_json, Error::Json(_)));

    let unknown_field = Description::from_json(r#"{ "module": [] }"#).unwrap_err();
    assert!(matches!(unknown_field, Error::Json(_)));

    let bad_feature = Description::from_json(
        r#"{ "modules": [{ "name": "A", "features": "types|nope" }] }"#,
    )
    .unwrap()
    .compile()
    .unwrap_err();
    assert_eq!(bad_feature.to_string(), "unknown feature 'types|nope'");

    let missing = Description::from_json(indoc! {r#"
        { "modules": [{ "name": "A", "namespaces": [{ "name": "a", "declarations": [
            { "kind": "alias", "name": "B", "target": "Missing" }
        ] }] }] }
    "#})
    .unwrap()
    .compile()
    .unwrap_err();
    assert_eq!(
        missing.to_string(),
        "identifier not found: 'Missing' (scope: '/a')"
    );
}

#[test]
fn error_messages() {
    let err = Error::SelfContainment {
        owner: "/a/B".into(),
        member: "mSelf".into(),
    };
    assert_eq!(err.to_string(), "'/a/B' contains itself by value through 'mSelf'");
    let err = Error::GraphSelfReference {
        graph: "/a/G".into(),
        place: "a component",
    };
    assert_eq!(err.to_string(), "'/a/G' cannot reference itself from a component");
}

#[test]
fn feature_names_parse_and_print() {
    let features = Features::from_text("fwd | names|TS_POOL").unwrap();
    assert_eq!(features, Features::FWD | Features::NAMES | Features::TS_POOL);
    assert_eq!(format!("{features:?}"), "Features(fwd|names|ts_pool)");
    assert_eq!(format!("{:?}", Features::NONE), "Features(none)");
}
