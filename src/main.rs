//! pod - the podkit command-line entry point

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use podkit::dispatch::{self, Outcome};
use podkit::plugins::Registry;
use podkit::preflight::Preflight;
use podkit::ui::Ui;
use podkit::{commands, Condition, Config};

fn main() -> Result<ExitCode, Condition> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    // A coarse pre-scan picks the log filter; the config-level flags
    // are applied properly during leaf construction.
    let filter = if argv.iter().any(|a| a == "--verbose") {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_cwd();
    let mut ui = Ui::new(false);
    let mut root = commands::root();
    let registry = Registry::builtin();

    match dispatch::run(
        &mut root,
        &registry,
        &Preflight::default(),
        argv,
        &mut config,
        &mut ui,
    ) {
        Outcome::Exit(code) => Ok(ExitCode::from(code.clamp(0, 255) as u8)),
        Outcome::Reraise(condition) => Err(condition),
    }
}
