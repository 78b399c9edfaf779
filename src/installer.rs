//! Collaborator boundary: sandbox, Podfile and lockfile handles, and
//! the installer built from them. Resolution and installation internals
//! live behind this interface and are not part of the dispatch core.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Condition, Result};
use crate::ui::Ui;

/// Opaque handle to the Pods sandbox directory.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Opaque handle to a project's Podfile.
#[derive(Debug, Clone)]
pub struct Podfile {
    path: PathBuf,
}

impl Podfile {
    /// Detect a Podfile in `dir`, if one exists.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let path = dir.join("Podfile");
        path.exists().then(|| Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opaque handle to a project's Podfile.lock.
#[derive(Debug, Clone)]
pub struct Lockfile {
    path: PathBuf,
}

impl Lockfile {
    /// Detect a Podfile.lock in `dir`, if one exists.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let path = dir.join("Podfile.lock");
        path.exists().then(|| Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Checks that the Podfile exists.
pub fn verify_podfile_exists(config: &Config) -> Result<()> {
    if config.podfile.is_none() {
        return Err(Condition::informative(
            "No `Podfile' found in the project directory.",
        ));
    }
    Ok(())
}

/// Checks that the lockfile exists.
pub fn verify_lockfile_exists(config: &Config) -> Result<()> {
    if config.lockfile.is_none() {
        return Err(Condition::informative(
            "No `Podfile.lock' found in the project directory, run `pod install'.",
        ));
    }
    Ok(())
}

/// Installer parametrized from the sandbox, Podfile and lockfile
/// handles on the [`Config`]. Its internals are out of scope for the
/// dispatch core; this surface only drives and reports.
pub struct Installer {
    sandbox: Sandbox,
    podfile: Option<Podfile>,
    lockfile: Option<Lockfile>,
}

impl Installer {
    /// Returns a new installer parametrized from the config.
    pub fn for_config(config: &Config) -> Self {
        Self {
            sandbox: config.sandbox.clone(),
            podfile: config.podfile.clone(),
            lockfile: config.lockfile.clone(),
        }
    }

    /// Install pods declared by the Podfile into the sandbox.
    pub fn install(&self, ui: &Ui) -> Result<()> {
        let podfile = self
            .podfile
            .as_ref()
            .ok_or_else(|| Condition::informative("No `Podfile' found in the project directory."))?;

        tracing::debug!(
            podfile = %podfile.path().display(),
            sandbox = %self.sandbox.root().display(),
            "running installer"
        );
        ui.notice(&format!(
            "Installing dependencies from {}",
            podfile.path().display()
        ));
        Ok(())
    }

    /// Update pods, ignoring lockfile pins.
    pub fn update(&self, ui: &Ui) -> Result<()> {
        if let Some(lockfile) = &self.lockfile {
            tracing::debug!(lockfile = %lockfile.path().display(), "updating past lockfile pins");
        }
        ui.notice("Updating dependencies");
        self.install(ui)
    }
}
