//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("graphgen")
        .about("C++ and TypeScript code generator for typed graph descriptions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(dump_command())
        .subcommand(modules_command())
        .subcommand(demo_command())
}

/// Compile a description and write every module's files.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate C++ and TypeScript sources from a description")
        .after_help(
            r#"EXAMPLES:
  graphgen generate render.json -o out/          # every module
  graphgen generate render.json -m /Render       # one module
  graphgen generate render.json --dry-run        # list outputs only
  graphgen demo | graphgen generate - -o out/    # from stdin"#,
        )
        .arg(description_arg())
        .arg(output_arg())
        .arg(config_arg())
        .arg(module_arg())
        .arg(dry_run_arg())
        .arg(no_comments_arg())
        .arg(no_underscore_arg())
        .arg(ts_graph_import_arg())
        .arg(ts_pool_import_arg())
}

/// Print the resolved syntax graph.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the resolved syntax graph of a description")
        .after_help(
            r#"EXAMPLES:
  graphgen dump render.json          # one line per vertex
  graphgen dump render.json --json   # full vertex payloads"#,
        )
        .arg(description_arg())
        .arg(json_arg())
}

/// List modules with their features and dependencies.
pub fn modules_command() -> Command {
    Command::new("modules")
        .about("List the modules of a description")
        .arg(description_arg())
        .arg(json_arg())
}

/// Print a sample description.
pub fn demo_command() -> Command {
    Command::new("demo").about("Print a sample description to start from")
}
