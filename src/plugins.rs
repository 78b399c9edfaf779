//! Plugin discovery: a static table of namespace prefix -> loader
//!
//! Plugins publish extra subcommands under recognized namespace
//! prefixes. The registry is assembled once at startup; before
//! resolution every loader whose prefix the root recognizes runs, and
//! its commands are inserted at the root. A loader failure is queued as
//! a warning for the post-run flush and never blocks other loaders.

use crate::command::Command;
use crate::ui::Ui;

/// Produces the commands a plugin publishes under its prefix.
pub type LoaderFn = fn() -> anyhow::Result<Vec<Command>>;

/// Table of namespace prefix -> loader function.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, LoaderFn)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry compiled into the binary. Plugins link their
    /// loaders in here; the base distribution ships none.
    pub fn builtin() -> Self {
        Self::new()
    }

    pub fn register(&mut self, prefix: impl Into<String>, loader: LoaderFn) {
        self.entries.push((prefix.into(), loader));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run every loader whose prefix the root recognizes, inserting the
/// returned commands as root subcommands. Idempotent: already-
/// registered names are skipped. Failures are collected as warnings.
pub fn load(root: &mut Command, registry: &Registry, ui: &mut Ui) {
    for (prefix, loader) in &registry.entries {
        if !root.plugin_prefixes.iter().any(|p| p == prefix) {
            tracing::debug!(%prefix, "prefix not recognized by root, skipping");
            continue;
        }
        match loader() {
            Ok(commands) => {
                for command in commands {
                    let name = command.name.clone();
                    if root.register_subcommand(command) {
                        tracing::debug!(%prefix, %name, "registered plugin command");
                    }
                }
            }
            Err(err) => {
                tracing::debug!(%prefix, error = %err, "plugin loader failed");
                ui.warn(format!(
                    "Failed to load plugins under `{prefix}': {err}"
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Invocation;
    use crate::error::Result;

    fn noop(_inv: &mut Invocation<'_>) -> Result<()> {
        Ok(())
    }

    fn root_with_prefixes() -> Command {
        Command::group("pod", "the Cocoa library package manager").plugin_prefixes(["podkit"])
    }

    fn good_loader() -> anyhow::Result<Vec<Command>> {
        Ok(vec![Command::leaf("trunk", "Interact with trunk", noop)])
    }

    fn failing_loader() -> anyhow::Result<Vec<Command>> {
        anyhow::bail!("gem metadata is corrupt")
    }

    #[test]
    fn test_failure_in_one_loader_does_not_hide_another() {
        let mut root = root_with_prefixes();
        let mut ui = Ui::new(true);
        let mut registry = Registry::new();
        registry.register("podkit", failing_loader);
        registry.register("podkit", good_loader);

        load(&mut root, &registry, &mut ui);

        assert!(root.has_subcommand("trunk"));
        assert_eq!(ui.queued_warnings().len(), 1);
        assert!(ui.queued_warnings()[0].contains("gem metadata is corrupt"));
    }

    #[test]
    fn test_unrecognized_prefix_is_ignored() {
        let mut root = root_with_prefixes();
        let mut ui = Ui::new(true);
        let mut registry = Registry::new();
        registry.register("cocoapods", good_loader);

        load(&mut root, &registry, &mut ui);

        assert!(!root.has_subcommand("trunk"));
        assert!(ui.queued_warnings().is_empty());
    }

    #[test]
    fn test_reloading_does_not_duplicate_commands() {
        let mut root = root_with_prefixes();
        let mut ui = Ui::new(true);
        let mut registry = Registry::new();
        registry.register("podkit", good_loader);

        load(&mut root, &registry, &mut ui);
        load(&mut root, &registry, &mut ui);

        assert_eq!(
            root.subcommands.iter().filter(|c| c.name == "trunk").count(),
            1
        );
    }
}
