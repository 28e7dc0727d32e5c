mod args;
mod commands;
mod dispatch;


use tracing_subscriber::EnvFilter;

pub use commands::build_cli;
pub use dispatch::{DemoParams, DumpParams, GenerateParams, ModulesParams};

/// Environment variable holding the log filter (`GRAPHGEN_LOG=debug`).
pub const LOG_ENV: &str = "GRAPHGEN_LOG";

/// Maps the `-v` count to a filter. Without `-v` the environment decides,
/// falling back to warnings only.
pub fn log_filter(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    }
}

/// Installs the stderr subscriber. Stdout stays reserved for command output.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
