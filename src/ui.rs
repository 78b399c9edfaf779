//! Output surface: notices, advisories, queued warnings, error report
//!
//! Warnings collected during a run (plugin failures, deprecations) are
//! queued and flushed exactly once, after the command body's output,
//! whatever the outcome of the run.

use colored::Colorize;

/// Per-invocation output handle.
#[derive(Debug, Default)]
pub struct Ui {
    silent: bool,
    warnings: Vec<String>,
    warnings_flushed: bool,
}

impl Ui {
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            warnings: Vec::new(),
            warnings_flushed: false,
        }
    }

    /// Re-sync with the config after flag application.
    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Informational line on stdout, dropped when silent.
    pub fn notice(&self, message: &str) {
        if !self.silent {
            println!("{message}");
        }
    }

    /// Line that must reach the user even when silent (help banners,
    /// version output).
    pub fn always(&self, message: &str) {
        println!("{message}");
    }

    /// Short red advisory for expected failures and cancellation.
    pub fn advisory(&self, message: &str) {
        eprintln!("{}", format!("[!] {message}").red());
    }

    /// Queue a non-fatal warning for the post-run flush.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn queued_warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Flush queued warnings to stderr. Runs at most once; warnings
    /// print even when silent.
    pub fn print_warnings(&mut self) {
        if self.warnings_flushed {
            return;
        }
        self.warnings_flushed = true;
        for warning in self.warnings.drain(..) {
            eprintln!("{}", format!("[!] {warning}").yellow());
        }
    }
}

/// One-line-per-fact summary of the host environment, shared by the
/// error report and `pod env`.
pub fn env_summary() -> String {
    let mut out = String::new();
    out.push_str(&format!("podkit : {}\n", env!("CARGO_PKG_VERSION")));
    out.push_str(&format!(
        "os     : {} ({})\n",
        std::env::consts::OS,
        std::env::consts::ARCH
    ));
    if let Ok(exe) = std::env::current_exe() {
        out.push_str(&format!("binary : {}\n", exe.display()));
    }
    out
}

/// Full diagnostic report for internal faults, printed when
/// development mode is not active.
pub fn error_report(error: &anyhow::Error) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "─── Error ─────────────────────────────".red()));
    out.push_str(&format!("{error}\n"));
    for cause in error.chain().skip(1) {
        out.push_str(&format!("  caused by: {cause}\n"));
    }
    out.push_str(&format!(
        "\n{}\n\n{}",
        "─── Environment ───────────────────────".red(),
        env_summary()
    ));
    out.push_str(&format!(
        "\n{}\n\n{:?}\n",
        "─── Backtrace ─────────────────────────".red(),
        error.backtrace()
    ));
    out.push_str("\nIf this looks like a bug, please file an issue and include the report above.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_queue_and_flush_once() {
        let mut ui = Ui::new(false);
        ui.warn("plugin `podkit-frobnicate' failed to load");
        assert_eq!(ui.queued_warnings().len(), 1);

        ui.print_warnings();
        assert!(ui.queued_warnings().is_empty());

        // A second flush is a no-op even if something queues late.
        ui.warn("late warning");
        ui.print_warnings();
        assert_eq!(ui.queued_warnings().len(), 1);
    }

    #[test]
    fn test_env_summary_names_version_and_os() {
        let summary = env_summary();
        assert!(summary.contains(env!("CARGO_PKG_VERSION")));
        assert!(summary.contains(std::env::consts::OS));
    }

    #[test]
    fn test_error_report_includes_cause_chain() {
        let err = anyhow::anyhow!("root cause").context("while resolving dependencies");
        let report = error_report(&err);
        assert!(report.contains("while resolving dependencies"));
        assert!(report.contains("caused by: root cause"));
        assert!(report.contains("podkit"));
    }
}
