use crate::typename::*;

#[test]
fn convert_typename_normalizes_spacing() {
    assert_eq!(convert_typename("std::vector< int >"), "std/vector<int>");
    assert_eq!(convert_typename("( std::map<int , Foo> )"), "std/map<int,Foo>");
    assert_eq!(convert_typename("const   Foo *"), "const Foo*");
    assert_eq!(convert_typename("unsigned\tint"), "unsigned int");
    assert_eq!(convert_typename("  Foo  "), "Foo");
}

#[test]
fn validate_typename_rejects_unbalanced() {
    assert!(validate_typename("vector<Foo>"));
    assert!(!validate_typename("vector<Foo"));
    assert!(!validate_typename("Foo>"));
    assert!(!validate_typename("std::Foo"));
    assert!(!validate_typename("Foo{}"));
    assert!(validate("map<int,(x)>").is_ok());
}

#[test]
fn parent_path_and_name() {
    assert_eq!(parent_path("/a/b/C"), "/a/b");
    assert_eq!(parent_path("/C"), "");
    assert_eq!(parent_path("C"), "");
    assert_eq!(parent_path("/std/vector</a/B>"), "/std");
    assert_eq!(extract_name("/a/b/C"), "C");
    assert_eq!(extract_name("/std/vector</a/B>"), "vector</a/B>");
    assert_eq!(split_type_path("/a/C"), ("/a", "C"));
}

#[test]
fn template_extraction_is_bracket_aware() {
    let (name, params) = extract_template("map<int, vector<a, b>>").unwrap();
    assert_eq!(name, "map");
    assert_eq!(params, vec!["int", "vector<a, b>"]);

    let (name, params) = extract_template("/std/vector</a/B>").unwrap();
    assert_eq!(name, "/std/vector");
    assert_eq!(params, vec!["/a/B"]);

    assert!(extract_template("vector").is_err());
    assert_eq!(get_template_name("optional<X>").unwrap(), "optional");
}

#[test]
fn dependent_path_strips_common_scope() {
    assert_eq!(get_dependent_path("/a/b", "/a/b/C"), "C");
    assert_eq!(get_dependent_path("/a/b", "/a/C"), "C");
    assert_eq!(get_dependent_path("/a", "/b/C"), "b/C");
    assert_eq!(get_dependent_path("/a/b", "/a/b"), "");
    assert_eq!(get_dependent_path("/a/b", "/a"), "a");
    assert_eq!(get_dependent_path("", "/a/C"), "/a/C");
    assert_eq!(get_dependent_path("/std", "/std/vector</a/B>"), "vector</a/B>");
}

#[test]
fn qualifiers_are_peeled_and_reattached() {
    let (q, rest) = peel_qualifiers("const Foo*").unwrap();
    assert!(q.is_const && q.pointer && !q.reference);
    assert_eq!(rest, "Foo");
    assert_eq!(q.apply("ns::Foo"), "const ns::Foo*");

    let (q, rest) = peel_qualifiers("Bar&").unwrap();
    assert!(q.reference);
    assert_eq!(rest, "Bar");
}

#[test]
fn const_volatile_is_rejected() {
    assert!(matches!(
        peel_qualifiers("const volatile int"),
        Err(crate::Error::ConstVolatile(_))
    ));
    assert!(peel_qualifiers("volatile const int").is_err());
    assert_eq!(remove_cv_pointer_ref("volatile int*").unwrap(), "int");
}

#[test]
fn cpp_path_drops_leading_separator() {
    assert_eq!(get_cpp_path("/std/pmr/string"), "std::pmr::string");
    assert_eq!(get_cpp_path("Foo"), "Foo");
    assert_eq!(join_path("/a", "B"), "/a/B");
    assert_eq!(join_path("", "B"), "/B");
}
