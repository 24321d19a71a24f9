//! The `DoctrimConfig` structure and its figment layering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discovery::{user_config_path, ConfigDiscovery};
use crate::error::{ConfigError, Result};

/// Prefix of environment variables read by the loader.
pub const ENV_PREFIX: &str = "DOCTRIM_";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctrimConfig {
    /// Root docnames, relative to the docs directory (default `["index"]`)
    pub roots: Vec<String>,
    /// Extension of documentation sources, without the dot
    pub document_extension: String,
    /// Extra directive names whose argument is an asset path
    pub directives: Vec<String>,
    /// Only documents matching these globs are considered
    pub include: Vec<String>,
    /// Documents matching these globs are ignored
    pub exclude: Vec<String>,
    /// Remove directories emptied by a deletion
    pub prune_empty_dirs: bool,
}

impl Default for DoctrimConfig {
    fn default() -> Self {
        Self {
            roots: vec!["index".to_string()],
            document_extension: "rst".to_string(),
            directives: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            prune_empty_dirs: false,
        }
    }
}

/// Command-line values layered on top of every other source.
///
/// `None` leaves the lower layers alone. `directives` are appended to the
/// configured list instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_extension: Option<String>,
    #[serde(skip)]
    pub directives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prune_empty_dirs: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct DirectiveList {
    #[serde(default)]
    directives: Vec<String>,
}

/// Builds a `DoctrimConfig` from all configuration sources.
///
/// Priority: CLI overrides > environment > project file > user file > defaults
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    project_dir: PathBuf,
    config_file: Option<PathBuf>,
    user_file: Option<PathBuf>,
    env_prefix: String,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Loader for the docs directory `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            config_file: None,
            user_file: user_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Use this project file instead of discovering one. It must exist.
    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Override (or disable, with `None`) the user-level config file.
    pub fn user_file(mut self, path: Option<PathBuf>) -> Self {
        self.user_file = path;
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Project config file in effect, if any.
    pub fn project_file(&self) -> Result<Option<PathBuf>> {
        match &self.config_file {
            Some(path) if path.is_file() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigError::NotFound(path.clone())),
            None => Ok(ConfigDiscovery::new(&self.project_dir).find()),
        }
    }

    /// Merge every layer and extract the effective configuration.
    pub fn load(&self) -> Result<DoctrimConfig> {
        let files = self.file_layers()?;

        let mut figment = Figment::new().merge(Serialized::defaults(DoctrimConfig::default()));
        for file in &files {
            figment = figment.merge(Toml::file(file));
        }
        figment = figment
            .merge(Env::prefixed(&self.env_prefix))
            .merge(Serialized::defaults(&self.overrides));

        let mut config: DoctrimConfig = figment.extract()?;
        config.directives = self.collect_directives(&files)?;

        debug!(?config, "loaded configuration");
        Ok(config)
    }

    fn file_layers(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if let Some(user) = self.user_file.as_ref().filter(|p| p.is_file()) {
            debug!(path = %user.display(), "using user config");
            files.push(user.clone());
        }
        if let Some(project) = self.project_file()? {
            debug!(path = %project.display(), "using project config");
            files.push(project);
        }
        Ok(files)
    }

    /// Concatenate directive lists from every layer, keeping first occurrences.
    fn collect_directives(&self, files: &[PathBuf]) -> Result<Vec<String>> {
        let mut figment = Figment::new();
        for file in files {
            figment = figment.admerge(Toml::file(file));
        }
        figment = figment.admerge(Env::prefixed(&self.env_prefix).only(&["directives"]));

        let DirectiveList { mut directives } = figment.extract()?;
        directives.extend(self.overrides.directives.iter().cloned());

        let mut seen = HashSet::new();
        directives.retain(|name| seen.insert(name.trim().to_string()));
        Ok(directives)
    }
}
