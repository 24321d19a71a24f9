//! Command implementations for the doctrim CLI.
//!
//! - [`rm`] - delete unreachable documents and the assets only they use
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod rm;

pub use rm::execute as rm_execute;
