use std::fs;
use std::io::{self, Read};
use std::path::Path;

use graphgen_core::{Compiled, Description};
use tracing::debug;

/// Reads a description from `path` (`-` for stdin) and compiles it.
pub fn load_description(path: &Path) -> Result<Compiled, String> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?
    };
    compile_description(&json)
}

pub fn compile_description(json: &str) -> Result<Compiled, String> {
    let description = Description::from_json(json).map_err(|e| e.to_string())?;
    let compiled = description.compile().map_err(|e| e.to_string())?;
    debug!(
        vertices = compiled.syntax().vertices().len(),
        modules = compiled.modules().len(),
        "description compiled"
    );
    Ok(compiled)
}

/// Unwraps or reports `error: <message>` and exits with status 1.
pub fn or_exit<T>(result: Result<T, String>) -> T {
    result.unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    })
}
