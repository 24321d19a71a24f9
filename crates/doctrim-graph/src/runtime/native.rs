//! Native runtime backed by the real file system.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{Runtime, RuntimeError, RuntimeResult};

/// `Runtime` implementation for native targets.
///
/// Directory walking uses `walkdir` without following symlinks, so a link
/// pointing back into the tree cannot make the walk loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl Runtime for NativeRuntime {
    fn list_files(&self, root: &Path, extension: &str) -> RuntimeResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Unreadable subdirectories are skipped, the rest of the tree still counts
                    debug!(error = %err, "skipping unreadable entry during walk");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == extension);
            if matches {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        fs::read_to_string(path).map_err(|e| RuntimeError::from_io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        fs::canonicalize(path).map_err(|e| RuntimeError::from_io(path, e))
    }

    fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        fs::remove_file(path).map_err(|e| RuntimeError::from_io(path, e))
    }

    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| RuntimeError::from_io(path, e))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RuntimeError::from_io(path, e))?;
            children.push(entry.path());
        }
        Ok(children)
    }

    fn remove_dir(&self, path: &Path) -> RuntimeResult<()> {
        fs::remove_dir(path).map_err(|e| RuntimeError::from_io(path, e))
    }
}
