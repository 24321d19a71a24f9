//! Error handling for the doctrim CLI.
//!
//! Library errors from `doctrim-config` and `doctrim-graph` convert into
//! [`CliError`] through `#[from]`, so commands can use `?` throughout.
//! `main` turns the final error into a miette report with
//! [`cli_error_to_miette`].

mod miette;

pub use self::miette::cli_error_to_miette;

use doctrim_graph::ConfigurationError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config files, environment or flags could not be turned into a configuration
    #[error("Configuration error: {0}")]
    Config(#[from] doctrim_config::ConfigError),

    /// Analysis could not run (bad roots, missing project directory, listing failure)
    #[error("{0}")]
    Analysis(#[from] doctrim_graph::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some planned deletions failed; the rest were applied
    #[error("Failed to delete {failed} of {total} planned files\n\nHint: Fix the errors listed above and run again; the plan is recomputed from disk")]
    DeletionFailed {
        /// Number of paths that could not be deleted
        failed: usize,
        /// Number of paths in the plan
        total: usize,
    },
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        Self::Analysis(err.into())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deletion_failed_message() {
        let err = CliError::DeletionFailed { failed: 1, total: 3 };
        let msg = err.to_string();
        assert!(msg.contains("Failed to delete 1 of 3"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_cli_error_from_configuration_error() {
        let cli_err: CliError = ConfigurationError::EmptyRootSet.into();
        assert!(matches!(
            cli_err,
            CliError::Analysis(doctrim_graph::Error::Configuration(ConfigurationError::EmptyRootSet))
        ));
        assert!(cli_err.to_string().contains("no root documents"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = doctrim_config::ConfigError::NotFound(PathBuf::from("doctrim.toml"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("doctrim.toml"));
    }
}
