mod cli;
mod commands;

use cli::{DemoParams, DumpParams, GenerateParams, ModulesParams, build_cli, init_logging};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };
    init_logging(m.get_count("verbose"));

    match name {
        "generate" => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        "dump" => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        "modules" => {
            let params = ModulesParams::from_matches(m);
            commands::modules::run(params.into());
        }
        "demo" => {
            let _params = DemoParams::from_matches(m);
            commands::demo::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}
