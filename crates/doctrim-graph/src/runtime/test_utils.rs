//! In-memory runtime for tests.
//!
//! `TestRuntime` keeps a virtual directory tree behind a mutex so tests can
//! build a documentation project, run the full pipeline against it, and then
//! inspect what was deleted. Individual reads and deletes can be forced to fail.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use path_clean::PathClean;

use super::{Runtime, RuntimeError, RuntimeResult};

#[derive(Debug, Default)]
struct VirtualFs {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    failing_reads: BTreeSet<PathBuf>,
    failing_deletes: BTreeSet<PathBuf>,
}

impl VirtualFs {
    fn insert_ancestors(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }
}

/// In-memory `Runtime` implementation.
#[derive(Debug, Default)]
pub struct TestRuntime {
    fs: Mutex<VirtualFs>,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`TestRuntime::add_file`].
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Create (or overwrite) a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().clean();
        let mut fs = self.fs.lock();
        fs.insert_ancestors(&path);
        fs.files.insert(path, content.into());
    }

    /// Create an empty directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().clean();
        let mut fs = self.fs.lock();
        fs.insert_ancestors(&path);
        fs.dirs.insert(path);
    }

    /// Make every subsequent read of `path` fail with an I/O error.
    pub fn fail_read(&self, path: impl AsRef<Path>) {
        self.fs.lock().failing_reads.insert(path.as_ref().clean());
    }

    /// Make every subsequent delete of `path` fail with an I/O error.
    pub fn fail_delete(&self, path: impl AsRef<Path>) {
        self.fs.lock().failing_deletes.insert(path.as_ref().clean());
    }

    /// Whether a regular file exists at `path`.
    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.fs.lock().files.contains_key(&path.as_ref().clean())
    }

    /// Whether a directory exists at `path`.
    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.fs.lock().dirs.contains(&path.as_ref().clean())
    }

    /// Sorted snapshot of every file path.
    pub fn files(&self) -> Vec<PathBuf> {
        self.fs.lock().files.keys().cloned().collect()
    }
}

impl Runtime for TestRuntime {
    fn list_files(&self, root: &Path, extension: &str) -> RuntimeResult<Vec<PathBuf>> {
        let fs = self.fs.lock();
        Ok(fs
            .files
            .keys()
            .filter(|path| path.starts_with(root))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.to_string_lossy() == extension)
            })
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let path = path.clean();
        let fs = self.fs.lock();
        if fs.failing_reads.contains(&path) {
            return Err(RuntimeError::Io {
                path,
                message: "simulated read failure".to_string(),
            });
        }
        fs.files
            .get(&path)
            .cloned()
            .ok_or(RuntimeError::FileNotFound(path))
    }

    fn exists(&self, path: &Path) -> bool {
        let path = path.clean();
        let fs = self.fs.lock();
        fs.files.contains_key(&path) || fs.dirs.contains(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.fs.lock().dirs.contains(&path.clean())
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        let cleaned = path.clean();
        if self.exists(&cleaned) {
            Ok(cleaned)
        } else {
            Err(RuntimeError::FileNotFound(cleaned))
        }
    }

    fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        let path = path.clean();
        let mut fs = self.fs.lock();
        if fs.failing_deletes.contains(&path) {
            return Err(RuntimeError::Io {
                path,
                message: "permission denied".to_string(),
            });
        }
        match fs.files.remove(&path) {
            Some(_) => Ok(()),
            None => Err(RuntimeError::FileNotFound(path)),
        }
    }

    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>> {
        let path = path.clean();
        let fs = self.fs.lock();
        if !fs.dirs.contains(&path) {
            return Err(RuntimeError::FileNotFound(path));
        }
        let is_child = |candidate: &&PathBuf| candidate.parent() == Some(path.as_path());
        let mut children: Vec<PathBuf> = fs.files.keys().filter(is_child).cloned().collect();
        children.extend(fs.dirs.iter().filter(is_child).cloned());
        children.sort();
        Ok(children)
    }

    fn remove_dir(&self, path: &Path) -> RuntimeResult<()> {
        let path = path.clean();
        let mut fs = self.fs.lock();
        if !fs.dirs.contains(&path) {
            return Err(RuntimeError::FileNotFound(path));
        }
        let occupied = fs.files.keys().any(|f| f.parent() == Some(path.as_path()))
            || fs.dirs.iter().any(|d| d.parent() == Some(path.as_path()));
        if occupied {
            return Err(RuntimeError::Io {
                path,
                message: "directory not empty".to_string(),
            });
        }
        fs.dirs.remove(&path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_create_their_parent_directories() {
        let rt = TestRuntime::new().with_file("/docs/guide/intro.rst", "Intro");
        assert!(rt.is_dir(Path::new("/docs/guide")));
        assert!(rt.is_dir(Path::new("/docs")));
        assert!(!rt.is_dir(Path::new("/docs/guide/intro.rst")));
    }

    #[test]
    fn remove_dir_refuses_non_empty_directories() {
        let rt = TestRuntime::new().with_file("/docs/a.rst", "");
        assert!(rt.remove_dir(Path::new("/docs")).is_err());

        rt.remove_file(Path::new("/docs/a.rst")).unwrap();
        rt.remove_dir(Path::new("/docs")).unwrap();
        assert!(!rt.has_dir("/docs"));
    }

    #[test]
    fn injected_failures_surface_as_io_errors() {
        let rt = TestRuntime::new().with_file("/docs/a.rst", "text");
        rt.fail_read("/docs/a.rst");
        rt.fail_delete("/docs/a.rst");

        assert!(matches!(
            rt.read_to_string(Path::new("/docs/a.rst")),
            Err(RuntimeError::Io { .. })
        ));
        assert!(matches!(
            rt.remove_file(Path::new("/docs/a.rst")),
            Err(RuntimeError::Io { .. })
        ));
        assert!(rt.has_file("/docs/a.rst"));
    }
}
