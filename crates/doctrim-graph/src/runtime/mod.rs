//! File-system abstraction for doctrim.
//!
//! This module defines the `Runtime` trait that the analysis core depends on
//! instead of touching `std::fs` directly. The native implementation walks the
//! real disk; `TestRuntime` keeps a virtual tree in memory so every part of the
//! pipeline can be exercised without temp directories.

pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

impl RuntimeError {
    /// Map a `std::io::Error` for `path`, keeping `NotFound` distinguishable.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }

    /// Whether the error means the path is simply not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

/// File-system capability set consumed by the graph builder and executor.
///
/// Implementations must be deterministic for a given disk state: `list_files`
/// may return paths in any order (callers sort), but the same state must yield
/// the same set.
///
/// # Example
///
/// ```rust,ignore
/// use doctrim_graph::runtime::{Runtime, RuntimeResult};
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// impl Runtime for MyRuntime {
///     fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
///         // Platform-specific implementation
///     }
///
///     // ... implement other methods
/// }
/// ```
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// List every regular file under `root` whose extension equals `extension`
    /// (given without the leading dot).
    fn list_files(&self, root: &Path, extension: &str) -> RuntimeResult<Vec<PathBuf>>;

    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String>;

    /// Check if a regular file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Resolve `path` to its canonical absolute form
    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> RuntimeResult<()>;

    /// List the direct children (files and directories) of a directory
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> RuntimeResult<()>;
}
