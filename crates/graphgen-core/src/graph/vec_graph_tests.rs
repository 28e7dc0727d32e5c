use crate::graph::{Edge, IncidenceKind, VecGraph};

fn three_vertices(kind: IncidenceKind) -> VecGraph<&'static str> {
    let mut g = VecGraph::new(kind);
    g.add_vertex("a");
    g.add_vertex("b");
    g.add_vertex("c");
    g
}

#[test]
fn add_then_remove_vertex_is_inverse() {
    let mut g = three_vertices(IncidenceKind::Sequence);
    g.add_edge(0, 1);

    let v = g.add_vertex("d");
    assert_eq!(v, 3);
    assert_eq!(g.remove_vertex(v), "d");

    assert_eq!(g.num_vertices(), 3);
    assert_eq!(g.get(0), Some(&"a"));
    assert_eq!(g.get(2), Some(&"c"));
    assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![Edge::new(0, 1)]);
}

#[test]
fn remove_vertex_renumbers_descriptors() {
    let mut g = three_vertices(IncidenceKind::Sequence);
    g.add_edge(0, 2);
    g.add_edge(1, 2);

    g.remove_vertex(0);

    assert_eq!(g.num_vertices(), 2);
    assert_eq!(g.get(0), Some(&"b"));
    assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![Edge::new(0, 1)]);
    assert_eq!(g.in_edges(1).collect::<Vec<_>>(), vec![Edge::new(0, 1)]);
    assert_eq!(g.num_edges(), 1);
}

#[test]
fn unique_add_edge_is_all_or_nothing() {
    let mut g = three_vertices(IncidenceKind::Unique);
    assert!(g.add_edge(0, 1).1);

    let (edge, added) = g.add_edge(0, 1);
    assert_eq!(edge, Edge::new(0, 1));
    assert!(!added);
    assert_eq!(g.out_degree(0), 1);
    assert_eq!(g.in_degree(1), 1);
}

#[test]
fn sequence_allows_parallel_edges() {
    let mut g = three_vertices(IncidenceKind::Sequence);
    assert!(g.add_edge(0, 1).1);
    assert!(g.add_edge(0, 1).1);
    assert_eq!(g.out_degree(0), 2);
    assert_eq!(g.remove_edge(0, 1), 2);
    assert_eq!(g.in_degree(1), 0);
}

#[test]
fn clear_vertex_detaches_both_directions() {
    let mut g = three_vertices(IncidenceKind::Sequence);
    g.add_edge(0, 1);
    g.add_edge(1, 2);
    g.add_edge(2, 1);

    g.clear_vertex(1);

    assert_eq!(g.num_edges(), 0);
    assert_eq!(g.degree(0), 0);
    assert_eq!(g.degree(2), 0);
}

#[test]
fn unique_incidence_stays_sorted() {
    let mut g = three_vertices(IncidenceKind::Unique);
    g.add_edge(0, 2);
    g.add_edge(0, 1);
    assert_eq!(g.adjacent_vertices(0).collect::<Vec<_>>(), vec![1, 2]);
    assert!(g.edge(0, 2));
    assert!(!g.edge(2, 0));
}
