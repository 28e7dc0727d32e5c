use graphgen_core::syntax::{Directedness, ListKind, Ownership};
use graphgen_core::{Compiled, Traits};

use crate::Error;
use crate::cpp::graph::GraphEmitter;
use crate::test_utils::*;

fn tree(ownership: Ownership, mutable: bool) -> Compiled {
    compile(|b| {
        let v = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
        b.set_reference(v, ownership, mutable).unwrap();
    })
}

fn addressable(traits: Traits, utf8: bool) -> Compiled {
    compile(|b| {
        let v = b.add_graph("Tree", "_", "_", traits).unwrap();
        b.set_reference(v, Ownership::Reference, true).unwrap();
        b.set_addressable(v, "mPathIndex", utf8).unwrap();
    })
}

#[test]
fn reference_graph_stores_owner_lists() {
    let compiled = tree(Ownership::Reference, true);
    let class = graph_class(&compiled, "/render/Tree");

    assert!(class.contains("// ReferenceGraph"));
    assert!(class.contains(
        "using ownership_descriptor = Impl::EdgeDescriptor<boost::bidirectional_tag, vertex_descriptor>;"
    ));
    assert!(class.contains("using children_size_type = uint32_t;"));
    assert!(class.contains("return mObjects[v].mChildren;"));
    assert!(class.contains("struct object_type {"));
    assert!(class.contains("boost::container::vector<children_edge_type> mChildren;"));
    assert!(class.contains("boost::container::vector<parent_edge_type> mParents;"));
    assert!(class.contains("boost::container::vector<object_type> mObjects;"));

    let source = graph_definitions(&compiled, "/render/Tree");
    assert!(source.contains("mObjects.reserve(sz);"));
}

#[test]
fn reference_functions() {
    let text = graphs_header(&tree(Ownership::Reference, true));

    assert!(text.contains("parent(const Tree::ownership_descriptor& e, const Tree& /*g*/) noexcept {"));
    assert!(text.contains("children(Tree::vertex_descriptor u, const Tree& g) noexcept { // NOLINT"));
    assert!(text.contains("Tree::child_iterator(const_cast<Tree&>(g).getChildrenList(u).begin(), u),"));
    assert!(text.contains("return gsl::narrow_cast<Tree::children_size_type>(g.getParentsList(u).size());"));
    assert!(text.contains("return {Tree::ownership_descriptor(u, v), hasEdge};"));
    assert!(text.contains("return parent(*r.first, g);"));
    assert!(text.contains("ancestor(Tree::vertex_descriptor u, Tree::vertex_descriptor v, const Tree& g) noexcept {"));
    assert!(text.contains("// MutableReferenceGraph"));
    assert!(text.contains("return std::make_pair(Tree::ownership_descriptor(u, v), true);"));
    assert!(text.contains(
        "parents.erase(std::remove(parents.begin(), parents.end(), Tree::parent_edge_type(u)), parents.end());"
    ));
    assert!(text.contains("remove_reference(e.source, e.target, g);"));
}

#[test]
fn reference_vertices_link_their_owner() {
    let text = graphs_header(&tree(Ownership::Reference, true));

    assert!(text.contains("add_vertex(Tree& g, Tree::vertex_descriptor u = Tree::null_vertex()) {"));
    assert!(text.contains("g.mObjects.emplace_back();"));
    assert!(text.contains("g.getChildrenList(u).emplace_back(v);"));
    assert!(text.contains("auto& list = g.getChildrenList(edge.get_target());"));
    assert!(text.contains("Impl::removeVectorOwner(g, u);"));
}

#[test]
fn alias_graph_reuses_edges() {
    let compiled = tree(Ownership::Alias, true);
    let class = graph_class(&compiled, "/render/Tree");
    assert!(class.contains("using ownership_descriptor = edge_descriptor;"));
    assert!(class.contains("using child_iterator = out_edge_iterator;"));
    assert!(!class.contains("mObjects"));

    let text = graphs_header(&compiled);
    assert!(text.contains("return out_edges(u, g);"));
    assert!(text.contains("return in_degree(u, g);"));
    assert!(text.contains("return edge(u, v, g);"));
    assert!(text.contains("return add_edge(u, v, g);"));
    assert!(!text.contains("removeVectorOwner"));
}

#[test]
fn immutable_reference_has_no_mutators() {
    let text = graphs_header(&tree(Ownership::Reference, false));

    assert!(text.contains("// ReferenceGraph"));
    assert!(!text.contains("add_reference"));
    assert!(!text.contains("remove_reference"));
}

#[test]
fn alias_needs_in_edges() {
    let compiled = compile(|b| {
        let v = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
        b.set_reference(v, Ownership::Alias, true).unwrap();
        b.graph_desc_mut(v).unwrap().directedness = Directedness::Directed;
    });
    let v = locate(&compiled, "/render/Tree");
    with_context(&compiled, |ctx| {
        assert!(matches!(
            GraphEmitter::new(ctx, v),
            Err(Error::UnsupportedGraph { reason: "alias ownership needs in-edges", .. })
        ));
    });
}

#[test]
fn path_index_with_narrow_strings() {
    let compiled = addressable(Traits::default(), false);
    let class = graph_class(&compiled, "/render/Tree");
    assert!(class.contains(
        "boost::container::map<std::string, vertex_descriptor, std::less<>> mPathIndex;"
    ));

    let text = graphs_header(&compiled);
    assert!(text.contains("// AddressableGraph"));
    assert!(text.contains("return Impl::pathLength(u, g);"));
    assert!(text.contains("std::basic_string<char, std::char_traits<char>, Allocator>& output,"));
    assert!(text.contains("locate(boost::string_view absolute, const Tree& g) noexcept {"));
    assert!(text.contains("auto iter = g.mPathIndex.find(absolute);"));
    assert!(text.contains("locate(Tree::vertex_descriptor u, boost::string_view relative, const Tree& g) {"));
    assert!(text.contains("Impl::cleanPath(key);"));
    assert!(text.contains("contains(boost::string_view absolute, const Tree& g) noexcept {"));
    assert!(text.contains("auto res = g.mPathIndex.emplace(std::move(pathName), v);"));
    assert!(text.contains("auto iter = g.mPathIndex.find(boost::string_view(pathName));"));
    assert!(text.contains("for (auto&& nvp : g.mPathIndex) {"));
}

#[test]
fn path_index_joins_vertex_lifecycle() {
    let text = graphs_header(&addressable(Traits::default(), false));

    assert!(text.contains("add_path_impl(u, v, g);"));
    insta::assert_snapshot!(block(&text, "inline void remove_vertex("), @r#"
    inline void remove_vertex(Tree::vertex_descriptor u, Tree& g) noexcept { // NOLINT
        // AddressableGraph
        remove_path_impl(u, g);
        Expects(num_children(u, g) == 0);
        // ReferenceGraph
        for (const auto& edge : g.getParentsList(u)) {
            auto& list = g.getChildrenList(edge.get_target());
            list.erase(std::remove(list.begin(), list.end(), Tree::children_edge_type(u)), list.end());
        }
        for (const auto& edge : g.getChildrenList(u)) {
            auto& list = g.getParentsList(edge.get_target());
            list.erase(std::remove(list.begin(), list.end(), Tree::parent_edge_type(u)), list.end());
        }
        clear_vertex(u, g);
        Impl::removeVectorVertex(g, u, Tree::directed_category{});
        Impl::removeVectorOwner(g, u);
    }
    "#);
}

#[test]
fn separated_addressable_needs_vector_storage() {
    let compiled = compile(|b| {
        let v = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().vertex_list = ListKind::List;
        b.set_reference(v, Ownership::Reference, true).unwrap();
        b.set_addressable(v, "mPathIndex", false).unwrap();
    });
    let v = locate(&compiled, "/render/Tree");
    with_context(&compiled, |ctx| {
        assert!(matches!(
            GraphEmitter::new(ctx, v),
            Err(Error::UnsupportedGraph { reason: "separated children lists need vector storage", .. })
        ));
    });
}

#[test]
fn alias_addressable_on_list_storage() {
    let text = graphs_header(&compile(|b| {
        let v = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().vertex_list = ListKind::List;
        b.set_reference(v, Ownership::Alias, true).unwrap();
        b.set_addressable(v, "mPathIndex", false).unwrap();
    }));

    assert!(text.contains("remove_path_impl(u, g);\n    Expects(num_children(u, g) == 0);"));
}

#[test]
fn utf8_paths_under_pmr() {
    let compiled = addressable(pmr(), true);
    let class = graph_class(&compiled, "/render/Tree");
    assert!(class.contains(
        "boost::container::pmr::map<std::pmr::u8string, vertex_descriptor, std::less<>> mPathIndex;"
    ));

    let text = graphs_header(&compiled);
    assert!(text.contains("std::basic_string<char8_t, std::char_traits<char8_t>, Allocator>& output,"));
    assert!(text.contains("locate(std::u8string_view absolute, const Tree& g) noexcept {"));
    assert!(text.contains("inline std::u8string"));
}

#[test]
fn polymorphic_values_by_path() {
    let compiled = compile(|b| {
        b.add_tag("LeafTag", false).unwrap();
        let v = b.add_graph("Tree", "_", "_", Traits::default()).unwrap();
        b.graph_desc_mut(v).unwrap().vertex_list = ListKind::Vector;
        b.set_reference(v, Ownership::Reference, true).unwrap();
        b.set_addressable(v, "mPathIndex", false).unwrap();
        b.add_graph_polymorphic(v, "LeafTag", "int", "", ListKind::Vector)
            .unwrap();
    });
    let text = graphs_header(&compiled);

    assert!(text.contains("get(boost::string_view pt, const Tree& g) {"));
    assert!(text.contains("throw std::out_of_range(\"at Tree\");"));
    assert!(text.contains("return get<ValueT>(v, g);"));
    assert!(text.contains("return get_if<ValueT>(v, pGraph);"));
}
