use crate::Config;

#[test]
fn settings_file_keeps_unset_defaults() {
    let config: Config = serde_json::from_str(
        r#"{ "emit_comments": false, "typescript_graph_import": "../graph" }"#,
    )
    .unwrap();

    assert!(!config.emit_comments);
    assert_eq!(config.typescript_graph_import, "../graph");
    assert_eq!(config.impl_header, "graph/GraphImpl.h");
    assert!(config.underscore_member_names);
}

#[test]
fn unknown_setting_is_rejected() {
    let result = serde_json::from_str::<Config>(r#"{ "emit_banner": false }"#);
    assert!(result.is_err());
}

#[test]
fn setters_chain() {
    let config = Config::new()
        .jsb_header("bindings/jsb.h")
        .overload_header("util/Overload.h")
        .typescript_pool_import("../pool")
        .archive_header("io/Archive.h")
        .wasm_header("web/Wasm.h")
        .underscore_member_names(false);

    assert_eq!(config.jsb_header, "bindings/jsb.h");
    assert_eq!(config.overload_header, "util/Overload.h");
    assert_eq!(config.typescript_pool_import, "../pool");
    assert_eq!(config.archive_header, "io/Archive.h");
    assert_eq!(config.wasm_header, "web/Wasm.h");
    assert!(!config.underscore_member_names);
}
