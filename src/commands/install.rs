//! Install command

use colored::Colorize;

use crate::command::{Command, Invocation, Opt};
use crate::error::Result;
use crate::installer::{verify_podfile_exists, Installer};

pub fn command() -> Command {
    Command::leaf("install", "Install project dependencies", run)
        .describe(
            "Downloads all dependencies defined in the Podfile and creates \
             the sandbox the project builds against.",
        )
        .option(Opt::switch(
            "repo-update",
            "Force running `pod repo update` before install",
        ))
}

fn run(inv: &mut Invocation<'_>) -> Result<()> {
    verify_podfile_exists(inv.config)?;

    if inv.opts.switch("repo-update") == Some(true) {
        tracing::debug!("spec repo update requested before install");
        inv.ui.notice(&format!("{}", "Updating spec repositories".cyan()));
    }

    let installer = Installer::for_config(inv.config);
    installer.install(inv.ui)?;

    inv.ui.notice(&format!(
        "{} Installation complete under {}",
        "✓".green(),
        inv.config.sandbox_root().display()
    ));
    Ok(())
}
