//! Configuration loading for CLI commands.
//!
//! Priority: CLI args > environment variables > project config > user config > defaults

use doctrim_config::{ConfigLoader, ConfigOverrides, DoctrimConfig};
use doctrim_graph::{ExecuteOptions, ScanOptions};

use crate::cli::RmArgs;
use crate::error::Result;

/// Load and validate the effective configuration for `doctrim rm`.
pub fn load(args: &RmArgs) -> Result<DoctrimConfig> {
    load_with(loader(args))
}

/// Loader for PATH with the command-line overrides applied.
pub fn loader(args: &RmArgs) -> ConfigLoader {
    ConfigLoader::new(&args.path)
        .config_file(args.config.clone())
        .overrides(overrides_from_args(args))
}

pub fn load_with(loader: ConfigLoader) -> Result<DoctrimConfig> {
    let config = loader.load()?;
    config.validate()?;
    Ok(config)
}

/// Command-line values as the top configuration layer.
///
/// Flags that were not given leave the lower layers untouched.
pub fn overrides_from_args(args: &RmArgs) -> ConfigOverrides {
    ConfigOverrides {
        roots: (!args.roots.is_empty()).then(|| args.roots.clone()),
        document_extension: args.extension.clone(),
        directives: args.directives.clone(),
        include: (!args.include.is_empty()).then(|| args.include.clone()),
        exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
        prune_empty_dirs: args.prune_dirs.then_some(true),
    }
}

pub fn scan_options(config: &DoctrimConfig) -> ScanOptions {
    ScanOptions::default()
        .with_extension(config.document_extension.clone())
        .with_directives(config.directives.iter().cloned())
        .with_include(config.include.iter().cloned())
        .with_exclude(config.exclude.iter().cloned())
}

pub fn execute_options(config: &DoctrimConfig) -> ExecuteOptions {
    ExecuteOptions {
        prune_empty_dirs: config.prune_empty_dirs,
    }
}
