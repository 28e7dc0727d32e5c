//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// JSON description file (positional).
pub fn description_arg() -> Arg {
    Arg::new("description")
        .value_name("DESCRIPTION")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("JSON description file (use \"-\" for stdin)")
}

/// Output root (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .default_value(".")
        .help("Directory generated paths are relative to")
}

/// Emitter settings file (-c/--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON emitter settings; flags below override it")
}

/// Restrict to one module (-m/--module).
pub fn module_arg() -> Arg {
    Arg::new("module")
        .short('m')
        .long("module")
        .value_name("PATH")
        .help("Only generate this module (e.g. /Render)")
}

/// List instead of writing (--dry-run).
pub fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Print the files that would be written")
}

/// Drop banners (--no-comments).
pub fn no_comments_arg() -> Arg {
    Arg::new("no_comments")
        .long("no-comments")
        .action(ArgAction::SetTrue)
        .help("Omit the generated-file banner and formatter guards")
}

/// TypeScript private member naming (--no-underscore).
pub fn no_underscore_arg() -> Arg {
    Arg::new("no_underscore")
        .long("no-underscore")
        .action(ArgAction::SetTrue)
        .help("Name private TypeScript members without a leading underscore")
}

/// Import path of the TypeScript graph interfaces (--ts-graph-import).
pub fn ts_graph_import_arg() -> Arg {
    Arg::new("ts_graph_import")
        .long("ts-graph-import")
        .value_name("PATH")
        .help("Module specifier of the TypeScript graph interfaces")
}

/// Import path of the TypeScript recycle pool (--ts-pool-import).
pub fn ts_pool_import_arg() -> Arg {
    Arg::new("ts_pool_import")
        .long("ts-pool-import")
        .value_name("PATH")
        .help("Module specifier of the TypeScript RecyclePool")
}

/// Machine readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (-v info, -vv debug); GRAPHGEN_LOG applies otherwise")
}
