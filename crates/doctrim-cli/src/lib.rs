//! doctrim CLI - remove unreachable pages and unused assets from Sphinx
//! documentation.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for the command line
//! - [`commands`] - command implementations (`doctrim rm`)
//! - [`config`] - turning arguments into a layered `DoctrimConfig`
//! - [`error`] - CLI error types with actionable messages
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - status messages and plan/report rendering
//!
//! # Example
//!
//! ```rust
//! use doctrim_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
