use anyhow::Result;
use echo::cli::{self, CliAction};
use echo::config::Config;
use echo::context::{AppContext, StandardContext};
use echo::controller::Session;
use std::env;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let binary_name = env::args()
        .next()
        .unwrap_or_else(|| "echo-tasks".to_string());

    let root = match cli::parse_args(env::args().skip(1)) {
        Ok(CliAction::Run { root }) => root,
        Ok(CliAction::Help) => {
            cli::print_help(&binary_name);
            return Ok(ExitCode::SUCCESS);
        }
        Ok(CliAction::Version) => {
            println!("echo-tasks {}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::SUCCESS);
        }
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Try '{binary_name} --help'.");
            return Ok(ExitCode::from(2));
        }
    };

    let ctx = StandardContext::new(root);
    let config = Config::load_or_default(&ctx)?;
    let first_run = !ctx.get_config_file_path()?.exists();

    // A broken log file should not keep anyone from their tasks.
    if let Err(e) = echo::logging::init(&ctx, config.level_filter()?) {
        eprintln!("Logging disabled: {e:#}");
    }
    if first_run && let Err(e) = config.save(&ctx) {
        log::warn!("Could not write default config: {e:#}");
    }

    let mut session = Session::open(&ctx, &config)?;
    echo::repl::run(&mut session)?;
    Ok(ExitCode::SUCCESS)
}
