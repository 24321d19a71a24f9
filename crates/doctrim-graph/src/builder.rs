//! Reference graph construction.
//!
//! The builder is the only part of the analysis that reads from disk. It lists
//! the project's documents through a [`Runtime`], scans each one, resolves
//! every reference and records whatever does not line up as a diagnostic
//! instead of failing the run.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::file_id::FileId;
use crate::filter::PathFilter;
use crate::graph::{DanglingReference, ReadFailure, ReferenceGraph, ResolutionWarning};
use crate::reachability::ConfigurationError;
use crate::resolver::{self, ResolutionError};
use crate::runtime::Runtime;
use crate::scanner::{ReferenceKind, ScannedReference, Scanner};
use crate::Result;

/// Default extension of documentation sources.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "rst";

/// Options controlling document discovery and scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension of documentation sources, without the dot
    pub document_extension: String,
    /// Extra directive names whose argument is an asset path
    pub directives: Vec<String>,
    /// Only documents matching one of these globs are discovered (all when empty)
    pub include: Vec<String>,
    /// Documents matching any of these globs are skipped
    pub exclude: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
            directives: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl ScanOptions {
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.document_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_directives(mut self, directives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.directives.extend(directives.into_iter().map(Into::into));
        self
    }

    pub fn with_include(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// Build the reference graph for the project rooted at `root`.
///
/// Fails only when the project itself is unusable (missing root, bad glob,
/// listing failure). Per-document and per-reference problems end up in the
/// graph's diagnostics.
pub fn build_graph<R>(root: &Path, runtime: &R, options: &ScanOptions) -> Result<ReferenceGraph>
where
    R: Runtime + ?Sized,
{
    if !runtime.exists(root) {
        return Err(ConfigurationError::MissingProjectRoot(root.to_path_buf()).into());
    }
    if !runtime.is_dir(root) {
        return Err(ConfigurationError::NotADirectory(root.to_path_buf()).into());
    }

    let root = FileId::new(runtime.canonicalize(root)?).into_path();
    let filter = PathFilter::new(&root, &options.include, &options.exclude)?;
    let extension = options.document_extension.as_str();

    let mut documents: Vec<FileId> = runtime
        .list_files(&root, extension)?
        .into_iter()
        .map(FileId::new)
        .collect();
    documents.sort();
    documents.dedup();

    // Filtered-out documents stay in the graph as protected nodes so that
    // what they include or use is never planned for deletion.
    let (analyzed, protected): (Vec<FileId>, Vec<FileId>) =
        documents.iter().cloned().partition(|doc| filter.allows(doc.as_path()));

    debug!(
        root = %root.display(),
        documents = analyzed.len(),
        protected = protected.len(),
        "discovered documents"
    );

    let mut builder = GraphBuilder {
        graph: ReferenceGraph::new(&root),
        known: documents.iter().cloned().collect(),
        documents: &documents,
        root: &root,
        extension,
        runtime,
    };
    for doc in analyzed {
        builder.graph.add_document(doc);
    }
    for doc in protected {
        builder.graph.add_protected_document(doc);
    }

    let scanner = Scanner::with_asset_directives(options.directives.iter().cloned());
    for doc in &documents {
        builder.scan_document(&scanner, doc);
    }

    let graph = builder.graph;
    let stats = graph.stats();
    if stats.dangling > 0 {
        warn!(count = stats.dangling, "references point at files that do not exist");
    }
    info!(
        documents = stats.documents,
        protected = stats.protected,
        assets = stats.assets,
        edges = stats.document_edges,
        "built reference graph"
    );

    Ok(graph)
}

struct GraphBuilder<'a, R: ?Sized> {
    graph: ReferenceGraph,
    known: FxHashSet<FileId>,
    documents: &'a [FileId],
    root: &'a Path,
    extension: &'a str,
    runtime: &'a R,
}

impl<R: Runtime + ?Sized> GraphBuilder<'_, R> {
    fn scan_document(&mut self, scanner: &Scanner, doc: &FileId) {
        let text = match self.runtime.read_to_string(doc.as_path()) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %doc, error = %err, "could not read document, treating it as having no references");
                self.graph.record_read_failure(ReadFailure {
                    path: doc.clone(),
                    error: err.to_string(),
                });
                return;
            }
        };

        for reference in scanner.scan(&text) {
            debug!(
                source = %doc,
                line = reference.line,
                directive = %reference.directive,
                target = %reference.target,
                "found reference"
            );

            if reference.glob {
                self.add_glob_entry(doc, &reference);
                continue;
            }

            match resolver::resolve(
                &reference.target,
                reference.kind,
                doc.as_path(),
                self.root,
                self.extension,
            ) {
                Ok(resolved) => self.add_resolved(doc, &reference, resolved),
                Err(error) => self.warn_unresolved(doc, &reference, error),
            }
        }
    }

    fn add_resolved(&mut self, doc: &FileId, reference: &ScannedReference, resolved: PathBuf) {
        let target = FileId::new(&resolved);

        match reference.kind {
            ReferenceKind::ChildDocument | ReferenceKind::Include if self.known.contains(&target) => {
                self.graph.add_document_edge(doc.clone(), target, reference.kind);
            }
            ReferenceKind::Include | ReferenceKind::Asset if self.is_existing_file(&resolved) => {
                self.graph.add_asset_edge(doc.clone(), target);
            }
            _ => {
                debug!(source = %doc, line = reference.line, target = %reference.target, "dangling reference");
                self.graph.record_dangling(DanglingReference {
                    source: doc.clone(),
                    line: reference.line,
                    kind: reference.kind,
                    target: reference.target.clone(),
                    resolved,
                });
            }
        }
    }

    fn add_glob_entry(&mut self, doc: &FileId, reference: &ScannedReference) {
        let pattern = match resolver::glob_pattern(&reference.target, doc.as_path(), self.root, self.extension) {
            Ok(pattern) => pattern,
            Err(error) => return self.warn_unresolved(doc, reference, error),
        };

        let matcher = match PathFilter::single(self.root, &pattern) {
            Ok(matcher) => matcher,
            Err(err) => {
                let error = ResolutionError::InvalidPattern {
                    pattern: reference.target.clone(),
                    message: err.to_string(),
                };
                return self.warn_unresolved(doc, reference, error);
            }
        };

        let matches: Vec<FileId> = self
            .documents
            .iter()
            .filter(|candidate| *candidate != doc && matcher.allows(candidate.as_path()))
            .cloned()
            .collect();

        if matches.is_empty() {
            debug!(source = %doc, pattern = %pattern, "glob entry matched no documents");
            self.graph.record_dangling(DanglingReference {
                source: doc.clone(),
                line: reference.line,
                kind: reference.kind,
                target: reference.target.clone(),
                resolved: PathBuf::from(pattern),
            });
            return;
        }

        for target in matches {
            self.graph.add_document_edge(doc.clone(), target, ReferenceKind::ChildDocument);
        }
    }

    fn warn_unresolved(&mut self, doc: &FileId, reference: &ScannedReference, error: ResolutionError) {
        warn!(source = %doc, line = reference.line, target = %reference.target, %error, "ignoring unresolvable reference");
        self.graph.record_warning(ResolutionWarning {
            source: doc.clone(),
            line: reference.line,
            target: reference.target.clone(),
            error,
        });
    }

    fn is_existing_file(&self, path: &Path) -> bool {
        self.runtime.exists(path) && !self.runtime.is_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::TestRuntime;

    fn build(runtime: &TestRuntime) -> ReferenceGraph {
        build_graph(Path::new("/docs"), runtime, &ScanOptions::default()).unwrap()
    }

    #[test]
    fn toctree_and_assets_become_edges() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. toctree::\n\n   guide/intro\n\n.. image:: logo.png\n")
            .with_file("/docs/guide/intro.rst", ".. figure:: ../_static/fig.svg\n")
            .with_file("/docs/logo.png", "")
            .with_file("/docs/_static/fig.svg", "");

        let graph = build(&runtime);
        let index = FileId::from("/docs/index.rst");
        let intro = FileId::from("/docs/guide/intro.rst");

        assert_eq!(graph.children(&index).collect::<Vec<_>>(), vec![&intro]);
        assert_eq!(graph.assets_of(&index), &[FileId::from("/docs/logo.png")]);
        assert_eq!(graph.referrers(&FileId::from("/docs/_static/fig.svg")), vec![intro]);
        assert!(graph.dangling().is_empty());
    }

    #[test]
    fn missing_targets_are_dangling() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. toctree::\n\n   ghost\n\n.. image:: missing.png\n");

        let graph = build(&runtime);
        let targets: Vec<&str> = graph.dangling().iter().map(|d| d.target.as_str()).collect();
        assert_eq!(targets, vec!["ghost", "missing.png"]);
        assert_eq!(graph.document_count(), 1);
    }

    #[test]
    fn escaping_references_become_warnings() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. image:: ../../outside.png\n")
            .with_file("/outside.png", "");

        let graph = build(&runtime);
        assert_eq!(graph.warnings().len(), 1);
        assert!(graph.assets().is_empty());
    }

    #[test]
    fn unreadable_document_is_kept_without_references() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. toctree::\n\n   broken\n")
            .with_file("/docs/broken.rst", ".. image:: logo.png\n")
            .with_file("/docs/logo.png", "");
        runtime.fail_read("/docs/broken.rst");

        let graph = build(&runtime);
        let broken = FileId::from("/docs/broken.rst");
        assert!(graph.contains_document(&broken));
        assert!(graph.assets_of(&broken).is_empty());
        assert_eq!(graph.read_failures().len(), 1);
    }

    #[test]
    fn non_document_include_is_an_asset() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. include:: snippets/usage.txt\n")
            .with_file("/docs/snippets/usage.txt", "usage");

        let graph = build(&runtime);
        assert_eq!(
            graph.assets_of(&FileId::from("/docs/index.rst")),
            &[FileId::from("/docs/snippets/usage.txt")]
        );
    }

    #[test]
    fn glob_toctree_expands_against_documents() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", ".. toctree::\n   :glob:\n\n   chapters/*\n")
            .with_file("/docs/chapters/one.rst", "")
            .with_file("/docs/chapters/two.rst", "")
            .with_file("/docs/chapters/deep/three.rst", "");

        let graph = build(&runtime);
        let children: Vec<String> = graph
            .children(&FileId::from("/docs/index.rst"))
            .map(|c| c.to_string())
            .collect();
        assert_eq!(children, vec!["/docs/chapters/one.rst", "/docs/chapters/two.rst"]);
    }

    #[test]
    fn excluded_documents_are_protected_and_scanned() {
        let runtime = TestRuntime::new()
            .with_file("/docs/index.rst", "")
            .with_file("/docs/drafts/wip.rst", ".. image:: ../logo.png\n")
            .with_file("/docs/logo.png", "");

        let options = ScanOptions::default().with_exclude(["drafts/**"]);
        let graph = build_graph(Path::new("/docs"), &runtime, &options).unwrap();
        let wip = FileId::from("/docs/drafts/wip.rst");

        assert_eq!(graph.protected(), vec![wip.clone()]);
        assert!(!graph.is_protected(&FileId::from("/docs/index.rst")));
        assert_eq!(graph.referrers(&FileId::from("/docs/logo.png")), vec![wip]);
        assert_eq!(graph.stats().protected, 1);
    }

    #[test]
    fn missing_project_root_is_a_configuration_error() {
        let runtime = TestRuntime::new();
        let err = build_graph(Path::new("/nowhere"), &runtime, &ScanOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Configuration(ConfigurationError::MissingProjectRoot(_))
        ));
    }
}
