//! Built-in command tree
//!
//! `root()` builds the whole tree once at process start. Plugin
//! loaders may insert further subcommands at the root before
//! resolution; nothing else mutates the tree afterwards.

use crate::command::{Command, Opt};

mod env;
mod install;
mod repo;
mod update;

/// Namespace prefixes under which plugins may publish commands.
pub const PLUGIN_PREFIXES: &[&str] = &["podkit", "cocoapods"];

/// The `pod` root command.
pub fn root() -> Command {
    Command::group("pod", "the Cocoa library package manager")
        .describe("podkit, the Cocoa library package manager.")
        .option(Opt::switch("silent", "Show nothing"))
        .plugin_prefixes(PLUGIN_PREFIXES.iter().copied())
        .subcommand(install::command())
        .subcommand(update::command())
        .subcommand(repo::command())
        .subcommand(env::command())
}
