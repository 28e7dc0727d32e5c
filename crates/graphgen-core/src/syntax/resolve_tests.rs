use crate::syntax::{GenerationFlags, Kind, Traits};
use crate::{Error, ModuleBuilder, ModuleInfo, SyntaxGraph};

fn render() -> SyntaxGraph {
    let mut b = ModuleBuilder::with_std().unwrap();
    b.open_module("Render", ModuleInfo::new("render", "Render")).unwrap();
    b.open_namespace("render").unwrap();
    let pass = b.add_struct("Pass", Traits::default()).unwrap();
    b.add_member(pass, true, "int", "mCount", "0", GenerationFlags::NONE)
        .unwrap();
    let queue = b.add_struct("Queue", Traits::default()).unwrap();
    b.add_member(queue, true, "std::vector<Pass>", "mPasses", "", GenerationFlags::NONE)
        .unwrap();
    b.add_member(queue, true, "std::optional<Pass>", "mFirst", "", GenerationFlags::NONE)
        .unwrap();
    b.add_tag("Raster_", false).unwrap();
    b.add_tag("Compute_", false).unwrap();
    let v = b.add_variant("PassType", GenerationFlags::NONE).unwrap();
    b.add_variant_element(v, "Raster_").unwrap();
    b.add_variant_element(v, "Compute_").unwrap();
    b.add_alias("PassList", "std::vector<Pass>").unwrap();
    b.close_scope();
    b.close_module();
    b.compile().unwrap().syntax().clone()
}

#[test]
fn lookup_walks_scopes_outwards() {
    let g = render();
    let pass = g.locate("/render/Pass");
    assert_eq!(g.lookup_identifier("/render", "Pass"), pass);
    assert_eq!(g.lookup_identifier("/render/Queue", "Pass"), pass);
    assert_eq!(g.lookup_identifier("/render", "int"), g.locate("/int"));
    assert_eq!(g.lookup_identifier("", "render/Pass"), pass);
    assert_eq!(g.lookup_identifier("/render", "/render/Pass"), pass);
    assert_eq!(g.lookup_identifier("", "Pass"), None);
}

#[test]
fn type_path_of_instance() {
    let g = render();
    assert_eq!(
        g.get_type_path("/render", "std/vector<Pass>").unwrap(),
        "/std/vector</render/Pass>"
    );
    assert_eq!(
        g.get_type_path("/render", "std/map<std/string, std/vector<Pass>>")
            .unwrap(),
        "/std/map</std/string,/std/vector</render/Pass>>"
    );
    assert_eq!(g.get_type_path("/render", "").unwrap(), "");
}

#[test]
fn type_path_errors() {
    let g = render();
    assert!(matches!(
        g.get_type_path("/render", "Missing"),
        Err(Error::IdentifierNotFound { .. })
    ));
    assert!(matches!(
        g.get_type_path("/render", "nope<int>"),
        Err(Error::TemplateNotFound(name)) if name == "nope"
    ));
}

#[test]
fn instantiation_is_idempotent() {
    let mut g = render();
    let n = g.num_vertices();
    let a = g.instantiate("/render", "std/vector<Pass>").unwrap();
    assert_eq!(g.num_vertices(), n);
    let b = g.instantiate("/render", "/std/vector<Pass>").unwrap();
    assert_eq!(a, b);

    let c = g.instantiate("/render", "std/list<Pass>").unwrap();
    let d = g.instantiate("/render", "std/list<Pass>").unwrap();
    assert_eq!(c, d);
    assert_eq!(g.num_vertices(), n + 1);
    assert_eq!(g.get_path(c), "/std/list</render/Pass>");
    assert_eq!(g.parent(c), g.locate("/std"));
}

#[test]
fn nested_instances_materialize_parameters_first() {
    let mut g = render();
    let v = g
        .instantiate("/render", "std/map<int, std/list<Pass>>")
        .unwrap();
    assert!(g.contains("/std/list</render/Pass>"));
    let Kind::Instance(instance) = g.kind(v) else {
        panic!("expected instance");
    };
    assert_eq!(instance.template, "/std/map");
    assert_eq!(instance.parameters, ["/int", "/std/list</render/Pass>"]);
}

#[test]
fn lookup_type_is_speculative_for_templates() {
    let mut g = render();
    assert_eq!(g.lookup_type("/render", "nope<int>").unwrap(), None);
    assert_eq!(g.lookup_type("/render", "Missing").unwrap(), None);
    assert!(g.lookup_type("/render", "std/set<int>").unwrap().is_some());
    assert!(matches!(
        g.lookup_type("/render", "std/set<int>>"),
        Err(Error::InvalidTypename(_))
    ));
}

#[test]
fn dependent_names_resolve_back() {
    let g = render();
    for ns in ["", "/render", "/std", "/std/pmr"] {
        for v in g.vertices() {
            let name = g.get_dependent_name(ns, v);
            let path = g.get_type_path(ns, &name).unwrap();
            assert_eq!(path, g.get_path(v), "ns '{ns}', name '{name}'");
        }
    }
}

#[test]
fn dependent_names_are_short() {
    let g = render();
    let pass = g.locate("/render/Pass").unwrap();
    let list = g.locate("/std/vector</render/Pass>").unwrap();
    assert_eq!(g.get_dependent_name("/render", pass), "Pass");
    assert_eq!(g.get_dependent_name("", pass), "render/Pass");
    assert_eq!(g.get_dependent_name("/render", list), "std/vector<Pass>");
    assert_eq!(g.get_cpp_name("/render", list), "std::vector<Pass>");
    assert_eq!(g.get_cpp_name("/other", list), "std::vector<render::Pass>");
    assert_eq!(g.get_cpp_name_of_path("/render", "/std/pmr/string"), "std::pmr::string");
}

#[test]
fn scope_queries() {
    let g = render();
    let pass = g.locate("/render/Pass").unwrap();
    assert_eq!(g.get_namespace(pass), "/render");
    assert_eq!(g.get_scope(pass), "/render");
    assert!(g.is_namespace("/render"));
    assert!(!g.is_namespace("/render/Pass"));
    assert_eq!(g.get_namespace(g.locate("/int").unwrap()), "");
}

#[test]
fn template_queries() {
    let g = render();
    let vector = g.locate("/std/vector</render/Pass>").unwrap();
    let optional = g.locate("/std/optional</render/Pass>").unwrap();
    assert!(g.is_instantiation(vector));
    assert!(g.is_container(vector));
    assert!(!g.is_optional(vector));
    assert!(g.is_optional(optional));
    assert_eq!(g.get_template(vector), g.locate("/std/vector"));
    assert_eq!(
        g.get_template_of_path("/std/vector</render/Pass>"),
        g.locate("/std/vector")
    );
    assert_eq!(g.instance_parameters(vector), vec![g.locate("/render/Pass").unwrap()]);
}

#[test]
fn tag_variants_are_tags() {
    let g = render();
    assert!(g.is_tag(g.locate("/render/Raster_").unwrap()));
    assert!(g.is_tag(g.locate("/render/PassType").unwrap()));
    assert!(!g.is_tag(g.locate("/render/Pass").unwrap()));
}

#[test]
fn alias_resolves_to_target() {
    let g = render();
    let alias = g.locate("/render/PassList").unwrap();
    assert_eq!(
        g.resolve_alias(alias),
        g.locate("/std/vector</render/Pass>").unwrap()
    );
}

#[test]
fn pmr_strings() {
    use crate::syntax::is_pmr_string;
    assert!(is_pmr_string("/std/pmr/string"));
    assert!(is_pmr_string("/ccstd/pmr/string"));
    assert!(!is_pmr_string("/std/string"));
}
