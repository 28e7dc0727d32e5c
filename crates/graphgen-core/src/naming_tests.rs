use crate::naming::*;

#[test]
fn camel_to_variable_lowercases_leading_capitals() {
    assert_eq!(camel_to_variable("Pass"), "pass");
    assert_eq!(camel_to_variable("UIName"), "uiName");
    assert_eq!(camel_to_variable("ID"), "id");
    assert_eq!(camel_to_variable("X"), "x");
    assert_eq!(camel_to_variable("passID"), "passID");
}

#[test]
fn parameter_names_follow_member_convention() {
    assert_eq!(get_parameter_name("mX").unwrap(), "xIn");
    assert_eq!(get_parameter_name("mPassID").unwrap(), "passIDIn");
    assert!(get_parameter_name("m").is_err());
    assert!(get_parameter_name("x").is_err());
}

#[test]
fn member_names_for_typescript() {
    assert_eq!(get_member_name("mX", true).unwrap(), "x");
    assert_eq!(get_member_name("mX", false).unwrap(), "_x");
    assert_eq!(get_member_name("mOutEdges", true).unwrap(), "outEdges");
}

#[test]
fn tags() {
    assert_eq!(convert_tag("Raster_"), "Raster");
    assert_eq!(get_tag_type("Raster_"), "RasterTag");
    assert_eq!(get_tag_variable_name("Raster_"), "raster");
    assert_eq!(get_typescript_tag_type("Raster"), "Raster");
}

#[test]
fn relative_paths() {
    assert_eq!(get_relative_path("cocos/render/Types", "cocos/render/Other"), "./Other");
    assert_eq!(get_relative_path("cocos/render/Types", "cocos/core/Base"), "../core/Base");
    assert_eq!(get_relative_path("cocos/render/Types", "cocos/render/sub/X"), "./sub/X");
    assert_eq!(get_relative_path("a/b/c/T", "x/Y"), "../../../x/Y");
}

#[test]
fn pascal_case() {
    assert_eq!(to_pascal_case("render_graph"), "RenderGraph");
    assert_eq!(to_pascal_case("Render"), "Render");
    assert_eq!(to_pascal_case("layout-graph"), "LayoutGraph");
}
