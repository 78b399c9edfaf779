//! Per-invocation configuration for podkit
//!
//! One `Config` value is constructed per invocation and threaded by
//! reference through dispatch and every command body. It is never a
//! process-wide global: a command that programmatically invokes another
//! command hands its own `Config` down, and the propagation rules below
//! keep the inner invocation from clobbering the outer one's settings.

use std::path::{Path, PathBuf};

use crate::installer::{Lockfile, Podfile, Sandbox};

/// Shared settings for a single CLI invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Suppress all non-warning output.
    pub silent: bool,

    /// Show verbose diagnostics; also makes a cancellation re-raise
    /// instead of exiting.
    pub verbose: bool,

    /// Directory the command operates in (where the Podfile lives).
    pub installation_root: PathBuf,

    /// Sandbox handle for the installer collaborator.
    pub sandbox: Sandbox,

    /// Podfile handle, present only when one exists in the
    /// installation root.
    pub podfile: Option<Podfile>,

    /// Lockfile handle, present only when one exists in the
    /// installation root.
    pub lockfile: Option<Lockfile>,
}

impl Config {
    /// Build a config rooted at `dir`, detecting the Podfile and
    /// lockfile handles from disk.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let installation_root = dir.into();
        let sandbox = Sandbox::new(installation_root.join("Pods"));
        let podfile = Podfile::from_dir(&installation_root);
        let lockfile = Lockfile::from_dir(&installation_root);

        Self {
            silent: false,
            verbose: false,
            installation_root,
            sandbox,
            podfile,
            lockfile,
        }
    }

    /// Build a config rooted at the current working directory.
    pub fn from_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd)
    }

    /// Apply a parsed `--silent` value. An absent flag (`None`) leaves
    /// any previously set value untouched; only an explicit value on
    /// the command line wins.
    pub fn apply_silent(&mut self, flag: Option<bool>) {
        if let Some(value) = flag {
            self.silent = value;
        }
    }

    /// Apply a parsed `--verbose` value, with the same explicit-wins
    /// rule as [`Config::apply_silent`].
    pub fn apply_verbose(&mut self, flag: Option<bool>) {
        if let Some(value) = flag {
            self.verbose = value;
        }
    }

    /// Cache directory reported by `pod env`.
    pub fn cache_root(&self) -> PathBuf {
        directories::ProjectDirs::from("org", "podkit", "podkit")
            .map(|d| d.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("~/.cache/podkit"))
    }

    /// Directory the sandbox materializes under.
    pub fn sandbox_root(&self) -> &Path {
        self.sandbox.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in_tempdir() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        (dir, config)
    }

    #[test]
    fn test_absent_silent_flag_preserves_prior_value() {
        let (_dir, mut config) = config_in_tempdir();
        config.silent = true;

        config.apply_silent(None);
        assert!(config.silent, "absent flag must not reset silent");

        config.apply_silent(Some(false));
        assert!(!config.silent, "explicit --no-silent must win");

        config.apply_silent(Some(true));
        assert!(config.silent, "explicit --silent must win");
    }

    #[test]
    fn test_absent_verbose_flag_preserves_prior_value() {
        let (_dir, mut config) = config_in_tempdir();
        config.verbose = true;

        config.apply_verbose(None);
        assert!(config.verbose);

        config.apply_verbose(Some(false));
        assert!(!config.verbose);
    }

    #[test]
    fn test_podfile_detected_only_when_present() {
        let (dir, config) = config_in_tempdir();
        assert!(config.podfile.is_none());
        assert!(config.lockfile.is_none());

        std::fs::write(dir.path().join("Podfile"), "").unwrap();
        std::fs::write(dir.path().join("Podfile.lock"), "").unwrap();
        let config = Config::new(dir.path());
        assert!(config.podfile.is_some());
        assert!(config.lockfile.is_some());
    }

    #[test]
    fn test_sandbox_rooted_under_installation_root() {
        let (dir, config) = config_in_tempdir();
        assert_eq!(config.sandbox_root(), dir.path().join("Pods"));
    }
}
