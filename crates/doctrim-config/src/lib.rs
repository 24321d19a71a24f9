//! Configuration for doctrim.
//!
//! Settings are layered with `figment`: built-in defaults, the user file
//! `~/.doctrim.toml`, the project file `doctrim.toml`, `DOCTRIM_*`
//! environment variables and finally command-line overrides. Asset directive
//! lists from every layer are concatenated rather than replaced, so a
//! project can add directives on top of the ones a user configured globally.

pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use config::{ConfigLoader, ConfigOverrides, DoctrimConfig, ENV_PREFIX};
pub use discovery::{user_config_path, ConfigDiscovery, PROJECT_CONFIG_NAMES, USER_CONFIG_NAME};
pub use error::{ConfigError, Result};
pub use validation::{ConfigValidator, SchemaValidator};
