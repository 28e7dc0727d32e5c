//! Dispatch logic: extract params from `ArgMatches` and convert them to
//! command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::modules::ModulesArgs;

pub struct GenerateParams {
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

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            description: description(m),
            output: m
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            config: m.get_one::<PathBuf>("config").cloned(),
            module: m.get_one::<String>("module").cloned(),
            dry_run: m.get_flag("dry_run"),
            no_comments: m.get_flag("no_comments"),
            no_underscore: m.get_flag("no_underscore"),
            ts_graph_import: m.get_one::<String>("ts_graph_import").cloned(),
            ts_pool_import: m.get_one::<String>("ts_pool_import").cloned(),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            description: p.description,
            output: p.output,
            config: p.config,
            module: p.module,
            dry_run: p.dry_run,
            no_comments: p.no_comments,
            no_underscore: p.no_underscore,
            ts_graph_import: p.ts_graph_import,
            ts_pool_import: p.ts_pool_import,
        }
    }
}

pub struct DumpParams {
    pub description: PathBuf,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            description: description(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            description: p.description,
            json: p.json,
        }
    }
}

pub struct ModulesParams {
    pub description: PathBuf,
    pub json: bool,
}

impl ModulesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            description: description(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<ModulesParams> for ModulesArgs {
    fn from(p: ModulesParams) -> Self {
        Self {
            description: p.description,
            json: p.json,
        }
    }
}

pub struct DemoParams;

impl DemoParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// The description positional is required, so clap has always set it.
fn description(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("description")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}
