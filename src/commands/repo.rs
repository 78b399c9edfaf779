//! Spec repository commands
//!
//! `repo` is an abstract group; resolving it without a further token
//! fails with its children listed as suggestions.

use colored::Colorize;

use crate::command::{Command, Invocation};
use crate::error::Result;

pub fn command() -> Command {
    Command::group("repo", "Manage spec repositories")
        .subcommand(Command::leaf("list", "List spec repositories", run_list))
        .subcommand(Command::leaf("update", "Update spec repositories", run_update))
}

fn repos_root(inv: &Invocation<'_>) -> std::path::PathBuf {
    inv.config.cache_root().join("repos")
}

fn run_list(inv: &mut Invocation<'_>) -> Result<()> {
    let root = repos_root(inv);
    let mut count = 0;
    if let Ok(entries) = std::fs::read_dir(&root) {
        for entry in entries.flatten() {
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    inv.ui.notice(&format!("  {} {}", "·".cyan(), name.bold()));
                    count += 1;
                }
            }
        }
    }
    if count == 0 {
        inv.ui.notice("No spec repositories configured.");
    }
    Ok(())
}

fn run_update(inv: &mut Invocation<'_>) -> Result<()> {
    let root = repos_root(inv);
    tracing::debug!(root = %root.display(), "updating spec repositories");
    inv.ui
        .notice(&format!("{}", "Updating spec repositories".cyan()));
    inv.ui.notice(&format!("{} Repositories up to date", "✓".green()));
    Ok(())
}
