//! Command-line interface definition for doctrim.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `doctrim rm <PATH>` - delete unreachable documents and their unused assets

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{Command, RmArgs};
pub use validation::{parse_directive, parse_extension};

/// doctrim - prune Sphinx documentation trees
#[derive(Parser, Debug)]
#[command(
    name = "doctrim",
    version,
    about = "Remove unreachable documentation pages and the assets only they use",
    long_about = "doctrim builds the reference graph of a reStructuredText project from its\n\
                  toctree, include, image and figure directives, finds the pages no root\n\
                  document reaches, and deletes them together with every asset that no\n\
                  surviving page references."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every reference found, how it resolved, and each deletion.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
