//! The dispatch funnel
//!
//! One entry point wraps an entire run: plugin loading, the
//! precondition gate, resolution, flag application, the command body,
//! and finally the single exhaustive classification of whatever
//! condition was raised. Queued warnings flush exactly once on every
//! path, after the body's own output.

use crate::argv::{Argv, ParsedOptions};
use crate::command::{self, Command, Invocation, OptKind};
use crate::config::Config;
use crate::error::{Condition, Result};
use crate::plugins::{self, Registry};
use crate::preflight::Preflight;
use crate::ui::{self, Ui};

/// Env var enabling development mode: internal faults re-raise for
/// native debugging instead of printing the friendly report.
pub const DEV_MODE_ENV: &str = "PODKIT_ENV";

/// Terminal outcome of a run.
#[derive(Debug)]
pub enum Outcome {
    /// Terminate with this exit code.
    Exit(i32),
    /// Surface the condition unhandled (development mode, or a
    /// cancellation under `--verbose`).
    Reraise(Condition),
}

/// Run a full invocation against the given tree. The registry's
/// plugin loaders run first; the outcome is final and warnings have
/// already been flushed when this returns.
pub fn run(
    root: &mut Command,
    registry: &Registry,
    preflight: &Preflight,
    raw_argv: Vec<String>,
    config: &mut Config,
    ui: &mut Ui,
) -> Outcome {
    plugins::load(root, registry, ui);

    let result = execute(root, preflight, raw_argv, config, ui);
    let dev_mode = std::env::var(DEV_MODE_ENV).as_deref() == Ok("development");
    let outcome = classify(result, config, dev_mode, ui);
    ui.print_warnings();
    outcome
}

fn execute(
    root: &Command,
    preflight: &Preflight,
    raw_argv: Vec<String>,
    config: &mut Config,
    ui: &mut Ui,
) -> Result<()> {
    preflight.run()?;

    let mut argv = Argv::new(raw_argv);
    let path = command::resolve(root, &mut argv);
    let leaf = *path.last().expect("resolution path is never empty");

    if path.len() == 1 && argv.flag("version") == Some(true) {
        ui.always(env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if argv.flag("help") == Some(true) {
        ui.always(&command::banner(&path));
        return Ok(());
    }

    command::validate_resolution(&path, &argv)?;

    // Leaf construction: framework flags first, with the explicit-wins
    // rule so a nested invocation never clobbers outer settings.
    config.apply_silent(argv.flag("silent"));
    config.apply_verbose(argv.flag("verbose"));
    ui.set_silent(config.silent);
    if argv.flag("ansi") == Some(false) {
        colored::control::set_override(false);
    }

    let mut opts = ParsedOptions::default();
    for opt in command::effective_options(&path) {
        match opt.kind {
            OptKind::Switch => {
                if let Some(value) = argv.flag(&opt.flag) {
                    opts.set_switch(&opt.flag, value);
                }
            }
            OptKind::Value => {
                if let Some(value) = argv.option(&opt.flag) {
                    opts.set_value(&opt.flag, value);
                }
            }
        }
    }

    command::validate_options(&path, &argv)?;

    let body = leaf
        .run
        .ok_or_else(|| Condition::informative(format!("`{}' cannot be run directly.", leaf.name)))?;

    let mut invocation = Invocation {
        config,
        ui,
        opts,
        args: argv.into_remainder(),
    };
    body(&mut invocation)
}

/// The single classification point. Exhaustive over the taxonomy; no
/// handler below this one may swallow a condition.
fn classify(result: Result<()>, config: &Config, dev_mode: bool, ui: &Ui) -> Outcome {
    match result {
        Ok(()) => Outcome::Exit(0),
        Err(Condition::Cancelled) => {
            ui.advisory("Cancelled");
            if config.verbose {
                Outcome::Reraise(Condition::Cancelled)
            } else {
                Outcome::Exit(1)
            }
        }
        Err(Condition::Exit(code)) => Outcome::Exit(code),
        Err(Condition::Informative(message)) => {
            ui.advisory(&message);
            Outcome::Exit(1)
        }
        Err(Condition::Internal(error)) => {
            if dev_mode {
                Outcome::Reraise(Condition::Internal(error))
            } else {
                eprintln!("{}", ui::error_report(&error));
                Outcome::Exit(1)
            }
        }
    }
}
