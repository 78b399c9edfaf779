//! Error taxonomy for podkit
//!
//! Every failure raised during dispatch is one of four kinds, classified
//! exactly once at the top of the run. Nothing below the dispatch funnel
//! is allowed to swallow a condition silently.

use thiserror::Error;

/// A condition raised during command dispatch or execution.
#[derive(Error, Debug)]
pub enum Condition {
    /// User-initiated interrupt, recoverable at top level.
    #[error("cancelled by user")]
    Cancelled,

    /// Explicit termination request carrying its own exit code.
    /// Never reclassified by the reporter.
    #[error("process exit ({0})")]
    Exit(i32),

    /// Expected, user-facing failure. Shown as a short advisory
    /// with no stack detail.
    #[error("{0}")]
    Informative(String),

    /// Anything else: an unanticipated fault, shown as a full
    /// diagnostic report unless development mode re-raises it.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Condition {
    /// Build an `Informative` condition from any displayable message.
    pub fn informative(message: impl Into<String>) -> Self {
        Condition::Informative(message.into())
    }

    /// Whether this condition is the expected, user-facing kind.
    pub fn is_informative(&self) -> bool {
        matches!(self, Condition::Informative(_))
    }
}

impl From<std::io::Error> for Condition {
    fn from(err: std::io::Error) -> Self {
        Condition::Internal(err.into())
    }
}

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, Condition>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_informative_display_is_the_raw_message() {
        let err = Condition::informative("No `Podfile' found in the project directory.");
        assert_eq!(
            err.to_string(),
            "No `Podfile' found in the project directory."
        );
        assert!(err.is_informative());
    }

    #[test]
    fn test_exit_carries_its_code() {
        let err = Condition::Exit(64);
        assert!(matches!(err, Condition::Exit(64)));
        assert!(!err.is_informative());
    }

    #[test]
    fn test_internal_wraps_anyhow() {
        let err: Condition = anyhow::anyhow!("resolver blew up").into();
        assert!(matches!(err, Condition::Internal(_)));
        assert_eq!(err.to_string(), "resolver blew up");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Condition = io_err.into();
        assert!(matches!(err, Condition::Internal(_)));
    }

    #[test]
    fn test_result_type() {
        fn operation_that_fails() -> Result<i32> {
            Err(Condition::Cancelled)
        }

        assert!(matches!(operation_that_fails(), Err(Condition::Cancelled)));
    }
}
