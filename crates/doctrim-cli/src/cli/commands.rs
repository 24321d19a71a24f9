use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_directive, parse_extension};

/// Available doctrim subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete unreachable documents and assets used only by them
    ///
    /// Builds the reference graph of the documentation under PATH, computes
    /// the documents no root reaches, and deletes them along with every image,
    /// figure or download that no surviving document references.
    Rm(RmArgs),
}

/// Arguments for the rm command
#[derive(Args, Debug, Clone, Default)]
pub struct RmArgs {
    /// Documentation source directory
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Show what would be deleted without deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Root document (docname relative to PATH, repeatable)
    ///
    /// Defaults to `roots` from the config file, or `index`.
    ///
    /// Examples:
    ///   doctrim rm docs --root index --root api/index
    #[arg(long = "root", value_name = "DOC")]
    pub roots: Vec<String>,

    /// Extension of documentation sources
    #[arg(long = "ext", value_name = "EXT", value_parser = parse_extension)]
    pub extension: Option<String>,

    /// Only consider documents matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Ignore documents matching this glob (repeatable)
    ///
    /// Examples:
    ///   doctrim rm docs --exclude 'drafts/**' --exclude '_build/**'
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Additional directive whose argument is an asset path (repeatable)
    ///
    /// Extends the directives configured in ~/.doctrim.toml and doctrim.toml.
    #[arg(long = "directive", value_name = "NAME", value_parser = parse_directive)]
    pub directives: Vec<String>,

    /// Remove directories left empty by the deletion
    #[arg(long)]
    pub prune_dirs: bool,

    /// Use this config file instead of PATH/doctrim.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the plan and report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
