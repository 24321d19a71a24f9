//! Config file discovery.

use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["doctrim.toml", ".doctrim.toml"];

/// User-level config file name, looked up in the home directory.
pub const USER_CONFIG_NAME: &str = ".doctrim.toml";

/// Finds the project config file next to the documentation sources.
///
/// # Example
///
/// ```no_run
/// use doctrim_config::ConfigDiscovery;
///
/// if let Some(path) = ConfigDiscovery::new("docs").find() {
///     println!("using {}", path.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// First existing file of [`PROJECT_CONFIG_NAMES`] in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }
}

/// `~/.doctrim.toml`, when a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_CONFIG_NAME))
}
