use graphgen_core::syntax::{ListKind, Ownership};
use graphgen_core::{Compiled, GenerationFlags, ModuleBuilder, Traits};

use crate::cpp::emit_serialization;
use crate::test_utils::*;

fn serialization(compiled: &Compiled) -> String {
    with_context(compiled, |ctx| emit_serialization(ctx).unwrap())
}

fn header(f: impl FnOnce(&mut ModuleBuilder)) -> String {
    serialization(&compile(f))
}

#[test]
fn structs_save_members_in_order() {
    let text = header(|b| {
        light(b);
        let v = b.add_struct("Camera", Traits::default()).unwrap();
        b.add_member(v, true, "Light*", "mTarget", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, true, "float", "mFov", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_member(v, false, "int", "mCache", "_", flags("no_serialization"))
            .unwrap();
        b.add_member(v, false, "int", "mFrame", "_", flags("impl_detail"))
            .unwrap();
    });

    insta::assert_snapshot!(text, @r#"
    #pragma once
    #include "cocos/renderer/pipeline/custom/ArchiveTypes.h"
    #include "renderer/pipeline/RenderTypes.h"

    namespace render {

    inline void save(OutputArchive& ar, const Light& v) {
        save(ar, v.mIntensity);
    }

    inline void load(InputArchive& ar, Light& v) {
        load(ar, v.mIntensity);
    }

    inline void save(OutputArchive& ar, const Camera& v) {
        // skip, mTarget: Light
        save(ar, v.mFov);
    }

    inline void load(InputArchive& ar, Camera& v) {
        // skip, mTarget: Light
        load(ar, v.mFov);
    }

    } // namespace render
    "#);
}

#[test]
fn flagged_and_empty_structs() {
    let text = header(|b| {
        let v = b.add_struct("Scratch", traits("no_serialization")).unwrap();
        b.add_member(v, true, "int", "mSize", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_struct("Marker", Traits::default()).unwrap();
    });

    assert!(!text.contains("Scratch"));
    assert!(text.contains("inline void save(OutputArchive& /*ar*/, const Marker& /*v*/) {}"));
    assert!(text.contains("inline void load(InputArchive& /*ar*/, Marker& /*v*/) {}"));
    assert!(!text.contains("RenderGraphs.h"));
}

/// `LightGraph` with a `Light` property, a `Weight` component and a version.
fn light_graph(b: &mut ModuleBuilder) {
    light(b);
    let v = b.add_graph("LightGraph", "Light", "_", Traits::default()).unwrap();
    b.add_graph_component(v, "Weight", "float", "mWeights").unwrap();
    b.add_member(v, true, "int", "mVersion", "_", GenerationFlags::NONE)
        .unwrap();
}

#[test]
fn graph_saves_vertices_edges_and_members() {
    let text = header(light_graph);

    assert!(text.starts_with("#pragma once\n#include <limits>\n#include <stdexcept>\n"));
    assert!(text.contains("#include \"renderer/pipeline/RenderGraphs.h\""));
    insta::assert_snapshot!(block(&text, "inline void save(OutputArchive& ar, const LightGraph& g) {"), @r"
    inline void save(OutputArchive& ar, const LightGraph& g) {
        using Graph = LightGraph;
        using VertexT = Graph::vertex_descriptor;
        using SizeT = Graph::vertices_size_type;
        static_assert(std::is_same_v<SizeT, VertexT>);
        const auto numVertices = gsl::narrow_cast<SizeT>(g.mVertices.size());
        save(ar, numVertices);
        const auto numEdges = gsl::narrow_cast<SizeT>(num_edges(g));
        save(ar, numEdges);

        for (VertexT v = 0; v != numVertices; ++v) {
            save(ar, get(boost::vertex_bundle, g, v));
            save(ar, get(LightGraph::WeightTag{}, g, v));
        }

        for (auto [iter, end] = edges(g); iter != end; ++iter) {
            save(ar, source(*iter, g));
            save(ar, target(*iter, g));
        }

        save(ar, g.mVersion);
    }
    ");
}

#[test]
fn graph_load_replays_add_vertex() {
    let text = header(light_graph);

    insta::assert_snapshot!(block(&text, "inline void load(InputArchive& ar, LightGraph& g) {"), @r"
    inline void load(InputArchive& ar, LightGraph& g) {
        using Graph = LightGraph;
        using VertexT = Graph::vertex_descriptor;
        using SizeT = Graph::vertices_size_type;
        static_assert(std::is_same_v<SizeT, VertexT>);
        SizeT numVertices = 0;
        load(ar, numVertices);
        SizeT numEdges = 0;
        load(ar, numEdges);
        g.reserve(numVertices);

        for (SizeT i = 0; i != numVertices; ++i) {
            Light property{};
            load(ar, property);
            float weight{};
            load(ar, weight);
            add_vertex(g, std::move(property), std::move(weight));
        }

        for (SizeT i = 0; i != numEdges; ++i) {
            auto u = Graph::null_vertex();
            auto v = Graph::null_vertex();
            load(ar, u);
            load(ar, v);
            add_edge(u, v, g);
        }

        load(ar, g.mVersion);
    }
    ");
}

/// Polymorphic `Scene` whose vertices keep a parent.
fn scene(ownership: Ownership) -> Compiled {
    compile(|b| {
        light(b);
        b.add_tag("SpotTag", false).unwrap();
        b.add_tag("SunTag", false).unwrap();
        let v = b.add_graph("Scene", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().ownership = ownership;
        b.add_graph_polymorphic(v, "SpotTag", "Light", "mLights", ListKind::Vector)
            .unwrap();
        b.add_graph_polymorphic(v, "SunTag", "float", "mSuns", ListKind::Vector)
            .unwrap();
    })
}

#[test]
fn polymorphic_vertices_save_their_alternative() {
    let text = serialization(&scene(Ownership::Reference));

    insta::assert_snapshot!(block(&text, "for (VertexT v = 0; v != numVertices; ++v) {"), @r"
    for (VertexT v = 0; v != numVertices; ++v) {
        save(ar, static_cast<SizeT>(tag(v, g).index()));
        save(ar, parent(v, g));
        visit_vertex(
            v, const_cast<Graph&>(g),
            [&](const auto& object) {
                save(ar, object);
            });
    }
    ");
}

#[test]
fn polymorphic_vertices_load_by_alternative() {
    let text = serialization(&scene(Ownership::Reference));

    insta::assert_snapshot!(block(&text, "for (SizeT i = 0; i != numVertices; ++i) {"), @r#"
    for (SizeT i = 0; i != numVertices; ++i) {
        auto id = std::numeric_limits<SizeT>::max();
        load(ar, id);
        auto u = Graph::null_vertex();
        load(ar, u);
        switch (id) {
            case 0: {
                Light val{};
                load(ar, val);
                add_vertex(g, SpotTag{}, std::move(val), u);
                break;
            }
            case 1: {
                float val{};
                load(ar, val);
                add_vertex(g, SunTag{}, std::move(val), u);
                break;
            }
            default:
                throw std::out_of_range("vertex type out of range");
        }
    }
    "#);
    assert!(text.contains("load(ar, numEdges);"));
}

#[test]
fn alias_graph_edges_are_its_parents() {
    let text = serialization(&scene(Ownership::Alias));

    assert!(text.contains("save(ar, parent(v, g));"));
    assert!(text.contains("add_vertex(g, SunTag{}, std::move(val), u);"));
    assert!(!text.contains("numEdges"));
    assert!(!text.contains("edges(g)"));
}

#[test]
fn edge_properties_are_saved_with_their_edge() {
    let text = header(|b| {
        light(b);
        b.add_graph("Links", "_", "Light", Traits::default()).unwrap();
    });

    assert!(text.contains("        save(ar, get(boost::edge_bundle, g, *iter));\n"));
    assert!(text.contains(
        "        Light property{};\n        load(ar, property);\n        add_edge(u, v, g, std::move(property));\n"
    ));
    assert!(text.contains("        add_vertex(g);\n"));
}

#[test]
fn allocator_aware_values_use_the_graph_allocator() {
    let text = header(|b| {
        let v = b.add_struct("Material", Traits::default()).unwrap();
        b.add_member(v, true, "std::pmr::string", "mName", "_", GenerationFlags::NONE)
            .unwrap();
        b.add_graph("MaterialGraph", "Material", "_", Traits::default())
            .unwrap();
    });

    assert!(text.contains("Material property(g.get_allocator());"));
}

#[test]
fn unreplayable_graphs_are_skipped() {
    let text = header(|b| {
        let v = b.add_graph("Dag", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().vertex_list = ListKind::List;
        let v = b.add_graph("Frozen", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().mutable_graph = false;
    });

    assert!(text.contains("// skip, Dag: list storage"));
    assert!(text.contains("// skip, Frozen: immutable graph"));
    assert!(!text.contains("inline void save(OutputArchive& ar, const Dag& g)"));
}
