//! Error types for cmdpanel
//!
//! One enum covers every failure the core can report to the panel. The
//! binary and the event loop wrap it in `anyhow` at the top level.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cmdpanel operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// A placeholder in the template has no value; re-prompt the user.
    #[error("missing value for placeholder {{{0}}}")]
    MissingValue(String),

    /// The shell (or the command itself) could not be started.
    #[error("failed to start `{program}`: {reason}")]
    Spawn { program: String, reason: String },

    /// The process ran but returned a non-zero status. Device tools use
    /// this for informational conditions too, so it is reported as a warning.
    #[error("command exited with status {0}")]
    NonZeroExit(i32),

    /// The command list could not be read or written.
    #[error("failed to persist {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    /// A second execution was requested while one is still running.
    #[error("a command is already running")]
    Busy,

    /// Index outside the command list.
    #[error("no command at position {0}")]
    NoSuchCommand(usize),

    /// Configuration file errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// Create a persistence error for `path`
    pub fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a spawn error for `program`
    pub fn spawn(program: impl Into<String>, reason: impl ToString) -> Self {
        Self::Spawn {
            program: program.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the panel should treat this as a warning rather than a failure.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NonZeroExit(_) | Self::Busy | Self::MissingValue(_))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_names_placeholder() {
        let err = PanelError::MissingValue("remote_path".to_string());
        assert_eq!(err.to_string(), "missing value for placeholder {remote_path}");
    }

    #[test]
    fn test_persistence_message_includes_path() {
        let err = PanelError::persistence("/tmp/commands.json", "disk full");
        assert_eq!(err.to_string(), "failed to persist /tmp/commands.json: disk full");
    }

    #[test]
    fn test_warning_classification() {
        assert!(PanelError::NonZeroExit(1).is_warning());
        assert!(PanelError::Busy.is_warning());
        assert!(!PanelError::spawn("sh", "not found").is_warning());
    }
}
