//! Env command: prints the environment summary used in bug reports.

use crate::command::{Command, Invocation};
use crate::error::Result;
use crate::ui;

pub fn command() -> Command {
    Command::leaf("env", "Display pod environment", run)
        .describe("Shows the tool, OS and path details included in error reports.")
}

fn run(inv: &mut Invocation<'_>) -> Result<()> {
    inv.ui.always(ui::env_summary().trim_end());
    inv.ui.always(&format!(
        "root   : {}",
        inv.config.installation_root.display()
    ));
    Ok(())
}
