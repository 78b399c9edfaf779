//! Command tree: nodes, option declarations, resolution, banners
//!
//! The tree is built once at startup ([`crate::commands::root`]) and is
//! immutable afterwards, except for plugin insertions performed before
//! resolution begins. Abstract nodes group subcommands and can never be
//! the final target of resolution.

use colored::Colorize;

use crate::argv::{Argv, ParsedOptions};
use crate::config::Config;
use crate::error::{Condition, Result};
use crate::ui::Ui;

/// Value shape of a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    /// Boolean switch, `--flag` / `--no-flag`.
    Switch,
    /// String-valued, `--flag=value`.
    Value,
}

/// A long-flag option declared on a command node. Visible to the node
/// and all of its descendants.
#[derive(Debug, Clone)]
pub struct Opt {
    pub flag: String,
    pub description: String,
    pub kind: OptKind,
}

impl Opt {
    pub fn switch(flag: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            description: description.into(),
            kind: OptKind::Switch,
        }
    }

    pub fn value(flag: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            description: description.into(),
            kind: OptKind::Value,
        }
    }
}

/// Everything a leaf body receives: the per-invocation config and UI,
/// its parsed declared options, and the free-form arguments left after
/// flag consumption.
pub struct Invocation<'a> {
    pub config: &'a mut Config,
    pub ui: &'a mut Ui,
    pub opts: ParsedOptions,
    pub args: Vec<String>,
}

/// Body of a leaf command.
pub type RunFn = fn(&mut Invocation<'_>) -> Result<()>;

/// A node in the command tree.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub is_abstract: bool,
    pub options: Vec<Opt>,
    pub subcommands: Vec<Command>,
    /// Namespace prefixes under which plugins may register additional
    /// subcommands. Only meaningful on the root; also shields unknown
    /// flags from rejection so they can be forwarded to plugins.
    pub plugin_prefixes: Vec<String>,
    pub run: Option<RunFn>,
}

impl Command {
    /// A concrete, runnable command.
    pub fn leaf(name: impl Into<String>, summary: impl Into<String>, run: RunFn) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            description: String::new(),
            is_abstract: false,
            options: Vec::new(),
            subcommands: Vec::new(),
            plugin_prefixes: Vec::new(),
            run: Some(run),
        }
    }

    /// An abstract grouping node. Cannot be the terminal match.
    pub fn group(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            description: String::new(),
            is_abstract: true,
            options: Vec::new(),
            subcommands: Vec::new(),
            plugin_prefixes: Vec::new(),
            run: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn option(mut self, opt: Opt) -> Self {
        self.options.push(opt);
        self
    }

    pub fn subcommand(mut self, command: Command) -> Self {
        debug_assert!(
            !self.has_subcommand(&command.name),
            "duplicate subcommand name `{}'",
            command.name
        );
        self.subcommands.push(command);
        self
    }

    pub fn plugin_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugin_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_subcommand(&self, name: &str) -> bool {
        self.subcommands.iter().any(|c| c.name == name)
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|c| c.name == name)
    }

    /// Insert a plugin-provided subcommand. Skips silently when a node
    /// with the same name is already registered, which makes plugin
    /// loading idempotent.
    pub fn register_subcommand(&mut self, command: Command) -> bool {
        if self.has_subcommand(&command.name) {
            tracing::debug!(name = %command.name, "subcommand already registered, skipping");
            return false;
        }
        self.subcommands.push(command);
        true
    }
}

/// Walk the tree greedily: at each level consume the next non-flag
/// token if it names a child, case-sensitively. Returns the root-to-
/// match path; the final node may still be abstract, which
/// [`validate_resolution`] rejects.
pub fn resolve<'a>(root: &'a Command, argv: &mut Argv) -> Vec<&'a Command> {
    let mut path = vec![root];
    loop {
        let current = *path.last().unwrap();
        let matched = match argv.peek_argument() {
            Some(token) => current.find_subcommand(token),
            None => None,
        };
        match matched {
            Some(child) => {
                let token = argv.shift_argument().unwrap();
                tracing::debug!(command = %token, "matched subcommand");
                path.push(child);
            }
            None => return path,
        }
    }
}

/// Reject a resolution whose final node is abstract. The condition
/// lists the node's children as suggestions and embeds its banner so
/// usage help prints alongside the advisory.
pub fn validate_resolution(path: &[&Command], argv: &Argv) -> Result<()> {
    let leaf = *path.last().expect("resolution path is never empty");
    if !leaf.is_abstract {
        return Ok(());
    }

    let mut message = match argv.peek_argument() {
        Some(token) => format!("Unknown command: `{token}'"),
        None => "A subcommand is required.".to_string(),
    };
    let children: Vec<&str> = leaf.subcommands.iter().map(|c| c.name.as_str()).collect();
    if !children.is_empty() {
        message.push_str(&format!("\nDid you mean one of: {}?", children.join(", ")));
    }
    message.push_str("\n\n");
    message.push_str(&banner(path));
    Err(Condition::Informative(message))
}

/// Reject flag tokens that matched no effective option, unless the
/// node declares plugin prefixes (its plugins may recognize them).
pub fn validate_options(path: &[&Command], argv: &Argv) -> Result<()> {
    let leaf = *path.last().expect("resolution path is never empty");
    if !leaf.plugin_prefixes.is_empty() {
        return Ok(());
    }
    if let Some(unknown) = argv.remaining_flags().first() {
        let message = format!("Unknown option: `{unknown}'\n\n{}", banner(path));
        return Err(Condition::Informative(message));
    }
    Ok(())
}

/// Effective option sequence for the node at the end of `path`:
/// ancestor declarations root-first, the node's own appended last.
pub fn effective_options<'a>(path: &[&'a Command]) -> Vec<&'a Opt> {
    path.iter().flat_map(|c| c.options.iter()).collect()
}

/// Options the framework supplies on every node without declaration.
fn builtin_options(is_root: bool) -> Vec<Opt> {
    let mut opts = vec![
        Opt::switch("verbose", "Show more debugging information"),
        Opt::switch("no-ansi", "Show output without ANSI codes"),
        Opt::switch("help", "Show help banner of specified command"),
    ];
    if is_root {
        opts.push(Opt::switch("version", "Show the version of the tool"));
    }
    opts
}

/// Help banner for the node at the end of `path`: usage line,
/// description, subcommand table, effective options table.
pub fn banner(path: &[&Command]) -> String {
    let leaf = *path.last().expect("resolution path is never empty");
    let full_name = path
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Usage:".underline()));
    let usage_suffix = if leaf.is_abstract { "COMMAND" } else { "[options]" };
    out.push_str(&format!("    $ {full_name} {usage_suffix}\n"));
    let about = if leaf.description.is_empty() {
        &leaf.summary
    } else {
        &leaf.description
    };
    if !about.is_empty() {
        out.push_str(&format!("\n      {about}\n"));
    }

    if !leaf.subcommands.is_empty() {
        out.push_str(&format!("\n{}\n\n", "Commands:".underline()));
        let width = leaf
            .subcommands
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);
        for child in &leaf.subcommands {
            let name = format!("{:width$}", child.name, width = width);
            out.push_str(&format!("    + {}   {}\n", name.green(), child.summary));
        }
    }

    let declared = effective_options(path);
    let builtins = builtin_options(path.len() == 1);
    out.push_str(&format!("\n{}\n\n", "Options:".underline()));
    let width = declared
        .iter()
        .map(|o| o.flag.len())
        .chain(builtins.iter().map(|o| o.flag.len()))
        .max()
        .unwrap_or(0);
    for opt in declared.iter().copied().chain(builtins.iter()) {
        let flag = format!("--{:width$}", opt.flag, width = width);
        out.push_str(&format!("    {}   {}\n", flag.blue(), opt.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_inv: &mut Invocation<'_>) -> Result<()> {
        Ok(())
    }

    fn sample_tree() -> Command {
        Command::group("pod", "the Cocoa library package manager")
            .option(Opt::switch("silent", "Show nothing"))
            .subcommand(Command::leaf("install", "Install dependencies", noop))
            .subcommand(
                Command::group("repo", "Manage spec repositories")
                    .option(Opt::value("cdn", "Override the CDN base URL"))
                    .subcommand(Command::leaf("update", "Update spec repos", noop))
                    .subcommand(Command::leaf("list", "List spec repos", noop)),
            )
    }

    #[test]
    fn test_resolution_walks_depth_first() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["repo", "update", "extra"]);
        let path = resolve(&root, &mut argv);

        let names: Vec<&str> = path.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["pod", "repo", "update"]);
        assert_eq!(argv.peek_argument(), Some("extra"));
        assert!(validate_resolution(&path, &argv).is_ok());
    }

    #[test]
    fn test_resolution_is_case_sensitive() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["Install"]);
        let path = resolve(&root, &mut argv);
        assert_eq!(path.len(), 1);
        assert!(validate_resolution(&path, &argv).is_err());
    }

    #[test]
    fn test_abstract_final_match_lists_children() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["repo"]);
        let path = resolve(&root, &mut argv);

        let err = validate_resolution(&path, &argv).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("A subcommand is required."));
        assert!(text.contains("update, list"));
    }

    #[test]
    fn test_unknown_root_token_names_the_token() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["bogus"]);
        let path = resolve(&root, &mut argv);

        let err = validate_resolution(&path, &argv).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Unknown command: `bogus'"));
        assert!(text.contains("install"));
        assert!(text.contains("repo"));
    }

    #[test]
    fn test_effective_options_are_ancestors_then_own() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["repo", "update"]);
        let path = resolve(&root, &mut argv);

        let flags: Vec<&str> = effective_options(&path)
            .iter()
            .map(|o| o.flag.as_str())
            .collect();
        assert_eq!(flags, vec!["silent", "cdn"]);
    }

    #[test]
    fn test_unknown_option_rejected_without_plugin_shield() {
        let root = sample_tree();
        let mut argv = Argv::from_args(["install", "--bogus"]);
        let path = resolve(&root, &mut argv);

        let err = validate_options(&path, &argv).unwrap_err();
        assert!(err.to_string().contains("Unknown option: `--bogus'"));
    }

    #[test]
    fn test_plugin_prefixes_shield_unknown_options() {
        let root = sample_tree().plugin_prefixes(["podkit"]);
        let argv = Argv::from_args(["--plugin-only"]);
        let path = vec![&root];
        assert!(validate_options(&path, &argv).is_ok());
    }

    #[test]
    fn test_register_subcommand_is_idempotent() {
        let mut root = sample_tree();
        assert!(root.register_subcommand(Command::leaf("trunk", "Interact with trunk", noop)));
        assert!(!root.register_subcommand(Command::leaf("trunk", "Interact with trunk", noop)));
        assert_eq!(
            root.subcommands.iter().filter(|c| c.name == "trunk").count(),
            1
        );
    }

    #[test]
    fn test_banner_lists_commands_and_options() {
        colored::control::set_override(false);
        let root = sample_tree();
        let path = vec![&root];
        let text = banner(&path);
        assert!(text.contains("$ pod COMMAND"));
        assert!(text.contains("install"));
        assert!(text.contains("--silent"));
        assert!(text.contains("--verbose"));
        assert!(text.contains("--version"));
    }
}
