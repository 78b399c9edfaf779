//! Update command

use crate::command::{Command, Invocation};
use crate::error::Result;
use crate::installer::{verify_lockfile_exists, verify_podfile_exists, Installer};

pub fn command() -> Command {
    Command::leaf("update", "Update outdated project dependencies", run).describe(
        "Updates the pods identified by the given names, or all pods when no \
         name is given, ignoring the versions pinned by the lockfile.",
    )
}

fn run(inv: &mut Invocation<'_>) -> Result<()> {
    verify_podfile_exists(inv.config)?;
    verify_lockfile_exists(inv.config)?;

    if !inv.args.is_empty() {
        tracing::debug!(pods = ?inv.args, "updating a subset of pods");
    }

    let installer = Installer::for_config(inv.config);
    installer.update(inv.ui)
}
