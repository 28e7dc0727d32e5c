use std::path::PathBuf;

use graphgen_core::Compiled;
use serde::Serialize;

use super::loader::{load_description, or_exit};

pub struct ModulesArgs {
    pub description: PathBuf,
    pub json: bool,
}

#[derive(Serialize)]
struct ModuleEntry<'a> {
    path: &'a str,
    folder: &'a str,
    prefix: &'a str,
    features: Vec<&'static str>,
    dependencies: Vec<&'a str>,
}

fn entries(compiled: &Compiled) -> Vec<ModuleEntry<'_>> {
    compiled
        .modules()
        .modules()
        .map(|(path, info)| ModuleEntry {
            path,
            folder: &info.folder,
            prefix: &info.file_prefix,
            features: info.features.names().collect(),
            dependencies: compiled.modules().dependencies(path).collect(),
        })
        .collect()
}

pub fn run(args: ModulesArgs) {
    let compiled = or_exit(load_description(&args.description));
    let text = if args.json {
        or_exit(serde_json::to_string_pretty(&entries(&compiled)).map_err(|e| e.to_string()))
    } else {
        render(&compiled)
    };
    println!("{}", text);
}

/// `path  folder/prefix  features  <- dependencies`, one module per line.
pub fn render(compiled: &Compiled) -> String {
    entries(compiled)
        .iter()
        .map(|m| {
            let location = if m.folder.is_empty() {
                m.prefix.to_owned()
            } else {
                format!("{}/{}", m.folder, m.prefix)
            };
            let mut line = format!("{}  {}  {}", m.path, location, m.features.join("|"));
            if !m.dependencies.is_empty() {
                line.push_str("  <- ");
                line.push_str(&m.dependencies.join(", "));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
