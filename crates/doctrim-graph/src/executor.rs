//! Applying a deletion plan.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::file_id::FileId;
use crate::plan::DeletionPlan;
use crate::runtime::Runtime;

/// Whether the executor touches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Apply,
    DryRun,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Remove directories left empty by the deletions (never the project root)
    pub prune_empty_dirs: bool,
}

/// A path the executor failed to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    pub path: PathBuf,
    pub error: String,
}

/// Per-path outcome of executing a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub dry_run: bool,
    pub deleted: Vec<FileId>,
    pub already_absent: Vec<FileId>,
    pub failed: Vec<FailedDeletion>,
    /// Directories removed, or in a dry run the ones that would be
    pub pruned_dirs: Vec<PathBuf>,
}

impl ExecutionReport {
    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Execute `plan` against `runtime`.
///
/// In [`Mode::DryRun`] nothing is touched; the report only carries the flag
/// and, with pruning enabled, the directories the plan would empty. In [`Mode::Apply`] entries are deleted in plan order; a file that
/// is already gone counts as success, any other failure is recorded and the
/// loop moves on to the next entry.
pub fn execute<R>(plan: &DeletionPlan, mode: Mode, runtime: &R, options: &ExecuteOptions) -> ExecutionReport
where
    R: Runtime + ?Sized,
{
    let mut report = ExecutionReport {
        dry_run: mode == Mode::DryRun,
        ..ExecutionReport::default()
    };

    if mode == Mode::DryRun {
        if options.prune_empty_dirs {
            let planned: Vec<FileId> = plan.entries().iter().map(|entry| entry.path.clone()).collect();
            report.pruned_dirs = prune_empty_dirs(plan.root(), &planned, runtime, true);
        }
        info!(
            entries = plan.len(),
            pruned_dirs = report.pruned_dirs.len(),
            "dry run, nothing deleted"
        );
        return report;
    }

    for entry in plan.entries() {
        match runtime.remove_file(entry.path.as_path()) {
            Ok(()) => {
                debug!(path = %entry.path, kind = ?entry.kind, "deleted");
                report.deleted.push(entry.path.clone());
            }
            Err(err) if err.is_not_found() => {
                debug!(path = %entry.path, "already absent");
                report.already_absent.push(entry.path.clone());
            }
            Err(err) => {
                warn!(path = %entry.path, error = %err, "failed to delete");
                report.failed.push(FailedDeletion {
                    path: entry.path.as_path().to_path_buf(),
                    error: err.to_string(),
                });
            }
        }
    }

    if options.prune_empty_dirs {
        report.pruned_dirs = prune_empty_dirs(plan.root(), &report.deleted, runtime, false);
    }

    info!(
        deleted = report.deleted.len(),
        already_absent = report.already_absent.len(),
        failed = report.failed.len(),
        pruned_dirs = report.pruned_dirs.len(),
        "deletion finished"
    );

    report
}

/// Remove directories emptied by removing `removed`, deepest first.
///
/// With `simulate` set nothing is touched: a directory counts as emptied when
/// every child is either in `removed` or an emptied directory itself.
fn prune_empty_dirs<R>(root: &Path, removed: &[FileId], runtime: &R, simulate: bool) -> Vec<PathBuf>
where
    R: Runtime + ?Sized,
{
    let mut candidates: FxHashSet<PathBuf> = FxHashSet::default();
    for file in removed {
        let mut current = file.as_path().parent();
        while let Some(dir) = current {
            if dir == root || !dir.starts_with(root) {
                break;
            }
            candidates.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    let mut candidates: Vec<PathBuf> = candidates.into_iter().collect();
    candidates.sort_by(|a, b| {
        b.components()
            .count()
            .cmp(&a.components().count())
            .then_with(|| a.cmp(b))
    });

    let mut gone: FxHashSet<PathBuf> = removed.iter().map(|file| file.as_path().to_path_buf()).collect();
    let mut pruned = Vec::new();

    for dir in candidates {
        if !runtime.is_dir(&dir) {
            continue;
        }
        match runtime.read_dir(&dir) {
            Ok(children) if children.iter().all(|child| gone.contains(child)) => {}
            Ok(_) => continue,
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "cannot list directory, leaving it");
                continue;
            }
        }

        if simulate {
            debug!(dir = %dir.display(), "would remove empty directory");
        } else if let Err(err) = runtime.remove_dir(&dir) {
            warn!(dir = %dir.display(), error = %err, "failed to remove empty directory");
            continue;
        } else {
            debug!(dir = %dir.display(), "removed empty directory");
        }
        gone.insert(dir.clone());
        pruned.push(dir);
    }

    pruned
}
