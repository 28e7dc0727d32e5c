use std::fs;
use std::path::{Path, PathBuf};

use graphgen_compiler::{Config, GeneratedFiles, compile_all, compile_module};
use tracing::info;

use super::loader::{load_description, or_exit};
use super::writer::write_files;

pub struct GenerateArgs {
    pub description: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub module: Option<String>,
    pub dry_run: bool,
    pub no_comments: bool,
    pub no_underscore: bool,
    pub ts_graph_import: Option<String>,
    pub ts_pool_import: Option<String>,
}

pub fn run(args: GenerateArgs) {
    let config = or_exit(load_config(&args));
    let compiled = or_exit(load_description(&args.description));

    let files: GeneratedFiles = or_exit(
        match &args.module {
            Some(module) => compile_module(&compiled, module, &config),
            None => compile_all(&compiled, &config),
        }
        .map_err(|e| e.to_string()),
    );

    if args.dry_run {
        for path in files.keys() {
            println!("{}", args.output.join(path).display());
        }
        return;
    }

    let report = or_exit(
        write_files(&args.output, &files)
            .map_err(|e| format!("failed to write into '{}': {}", args.output.display(), e)),
    );
    info!(
        written = report.written,
        unchanged = report.unchanged,
        "generation finished"
    );
}

/// Settings file first, then command line overrides.
fn load_config(args: &GenerateArgs) -> Result<Config, String> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => Config::new(),
    };
    if args.no_comments {
        config = config.emit_comments(false);
    }
    if args.no_underscore {
        config = config.underscore_member_names(false);
    }
    if let Some(import) = &args.ts_graph_import {
        config = config.typescript_graph_import(import.as_str());
    }
    if let Some(import) = &args.ts_pool_import {
        config = config.typescript_pool_import(import.as_str());
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid config '{}': {}", path.display(), e))
}
