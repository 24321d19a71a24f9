//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use doctrim_graph::{ConfigurationError, Error as GraphError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analysis(GraphError::Configuration(e)) => configuration_error_to_miette(e),
        CliError::Analysis(GraphError::Runtime(e)) => {
            miette::miette!(code = "doctrim::io", "{}", e)
        }
        CliError::Config(e) => miette::miette!(
            code = "doctrim::config",
            help = "Check doctrim.toml, ~/.doctrim.toml and DOCTRIM_* variables",
            "Configuration error: {}",
            e
        ),
        CliError::DeletionFailed { failed, total } => miette::miette!(
            code = "doctrim::partial",
            help = "Fix the errors listed above and run again; the plan is recomputed from disk",
            "Failed to delete {} of {} planned files",
            failed,
            total
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigurationError to miette Report
pub fn configuration_error_to_miette(err: ConfigurationError) -> Report {
    let help = match &err {
        ConfigurationError::EmptyRootSet => "Pass --root <DOC> or set `roots` in doctrim.toml",
        ConfigurationError::UnknownRoot(_) => {
            "Roots are docnames relative to PATH, for example `index` for PATH/index.rst"
        }
        ConfigurationError::MissingProjectRoot(_) | ConfigurationError::NotADirectory(_) => {
            "PATH must be the directory containing your documentation sources"
        }
        ConfigurationError::InvalidGlob { .. } => {
            "Patterns use gitignore syntax relative to PATH, for example `drafts/**`"
        }
    };
    let message = err.to_string();
    let headline = message.split("\n\n").next().unwrap_or(&message).to_string();
    miette::miette!(code = "doctrim::configuration", help = help, "{}", headline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configuration_errors_carry_help() {
        let report = configuration_error_to_miette(ConfigurationError::UnknownRoot(PathBuf::from(
            "/docs/contents.rst",
        )));
        assert!(report.to_string().contains("/docs/contents.rst"));
        assert!(report.help().is_some());
    }

    #[test]
    fn test_deletion_failed_report() {
        let report = cli_error_to_miette(CliError::DeletionFailed { failed: 2, total: 5 });
        assert_eq!(report.to_string(), "Failed to delete 2 of 5 planned files");
    }
}
