//! Include/exclude filtering of discovered documents.

use std::path::Path;

use ignore::overrides::{Override, OverrideBuilder};

use crate::reachability::ConfigurationError;

/// Gitignore-style glob filter rooted at the project directory.
///
/// A document is kept when it matches at least one include glob (or no
/// include globs were given) and matches no exclude glob. Patterns are
/// matched against the path relative to the root, so `drafts/**` excludes
/// everything below `<root>/drafts`.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Option<Override>,
    exclude: Option<Override>,
}

impl PathFilter {
    pub fn new(root: &Path, include: &[String], exclude: &[String]) -> Result<Self, ConfigurationError> {
        Ok(Self {
            include: build_override(root, include)?,
            exclude: build_override(root, exclude)?,
        })
    }

    /// Whether `path` survives the filter.
    pub fn allows(&self, path: &Path) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|globs| globs.matched(path, false).is_whitelist());
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|globs| globs.matched(path, false).is_whitelist());
        included && !excluded
    }

    /// Build a matcher for a single anchored pattern.
    pub(crate) fn single(root: &Path, pattern: &str) -> Result<Self, ConfigurationError> {
        Ok(Self {
            include: build_override(root, &[pattern.to_string()])?,
            exclude: None,
        })
    }
}

fn build_override(root: &Path, patterns: &[String]) -> Result<Option<Override>, ConfigurationError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = OverrideBuilder::new(root);
    for pattern in patterns {
        builder
            .add(pattern)
            .map_err(|err| ConfigurationError::InvalidGlob {
                pattern: pattern.clone(),
                message: err.to_string(),
            })?;
    }

    builder
        .build()
        .map(Some)
        .map_err(|err| ConfigurationError::InvalidGlob {
            pattern: patterns.join(", "),
            message: err.to_string(),
        })
}
