//! Config validation.

use crate::config::DoctrimConfig;
use crate::error::{ConfigError, Result};

/// Pluggable validation strategy.
pub trait ConfigValidator {
    fn validate(&self, config: &DoctrimConfig) -> Result<()>;
}

/// Shape-only checks, no file-system access.
///
/// # Example
///
/// ```
/// use doctrim_config::{ConfigValidator, DoctrimConfig, SchemaValidator};
///
/// SchemaValidator.validate(&DoctrimConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &DoctrimConfig) -> Result<()> {
        if config.roots.is_empty() {
            return Err(ConfigError::NoRoots);
        }
        if config.roots.iter().any(|root| root.trim().is_empty()) {
            return Err(invalid("roots", "root names cannot be empty"));
        }

        let extension = config.document_extension.trim_start_matches('.');
        if extension.trim().is_empty() {
            return Err(invalid("document_extension", "use an extension such as \"rst\""));
        }
        if extension.contains(['/', '\\']) {
            return Err(invalid("document_extension", "extensions cannot contain path separators"));
        }

        for directive in &config.directives {
            let valid = directive.starts_with(|c: char| c.is_ascii_alphanumeric())
                && !directive.ends_with(':')
                && directive
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+'));
            if !valid {
                return Err(invalid(
                    "directives",
                    &format!("'{directive}' is not a valid directive name"),
                ));
            }
        }

        for (field, patterns) in [("include", &config.include), ("exclude", &config.exclude)] {
            if patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(invalid(field, "glob patterns cannot be empty"));
            }
        }

        Ok(())
    }
}

impl DoctrimConfig {
    /// Validate with [`SchemaValidator`].
    pub fn validate(&self) -> Result<()> {
        SchemaValidator.validate(self)
    }
}

fn invalid(field: &str, hint: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        hint: Some(hint.to_string()),
    }
}
