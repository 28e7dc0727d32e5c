use std::path::PathBuf;

use graphgen_core::Compiled;

use super::loader::{load_description, or_exit};

pub struct DumpArgs {
    pub description: PathBuf,
    pub json: bool,
}

pub fn run(args: DumpArgs) {
    let compiled = or_exit(load_description(&args.description));
    let text = if args.json {
        or_exit(serde_json::to_string_pretty(&compiled.syntax().dump()).map_err(|e| e.to_string()))
    } else {
        render(&compiled)
    };
    println!("{}", text);
}

/// One `id kind path` line per vertex, with the declaring module when set.
pub fn render(compiled: &Compiled) -> String {
    let mut out = String::new();
    for entry in compiled.syntax().dump() {
        let line = format!("{:>4} {:<10} {}", entry.id, entry.vertex.kind.name(), entry.path);
        out.push_str(line.trim_end());
        if !entry.vertex.module_path.is_empty() {
            out.push_str("  [");
            out.push_str(&entry.vertex.module_path);
            out.push(']');
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}
