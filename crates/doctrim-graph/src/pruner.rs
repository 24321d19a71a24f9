//! One-stop analysis API.
//!
//! `Pruner` wires discovery, reachability and planning together. It uses the
//! typestate pattern so `analyze()` is only available once at least one root
//! document has been configured.
//!
//! ```rust,no_run
//! use doctrim_graph::{Mode, Pruner};
//!
//! # fn main() -> doctrim_graph::Result<()> {
//! let analysis = Pruner::new("docs")
//!     .root("index")
//!     .directives(["drawio-figure"])
//!     .analyze()?;
//!
//! for orphan in analysis.orphans() {
//!     println!("unreachable: {orphan}");
//! }
//! let report = analysis.execute(Mode::DryRun, &Default::default());
//! assert!(report.dry_run);
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::{build_graph, ScanOptions};
use crate::executor::{execute, ExecuteOptions, ExecutionReport, Mode};
use crate::file_id::FileId;
use crate::graph::ReferenceGraph;
use crate::plan::{plan, DeletionPlan};
use crate::reachability::{orphans, RootSet};
use crate::runtime::native::NativeRuntime;
use crate::runtime::Runtime;
use crate::Result;

/// Typestate marker: no root documents yet.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured;

/// Typestate marker: root documents configured.
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Builder for an [`Analysis`] of one documentation project.
#[derive(Debug)]
pub struct Pruner<State = Unconfigured> {
    project_root: PathBuf,
    roots: Vec<String>,
    options: ScanOptions,
    runtime: Option<Arc<dyn Runtime>>,
    _state: PhantomData<State>,
}

impl Pruner<Unconfigured> {
    /// Start configuring an analysis of the project at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            roots: Vec::new(),
            options: ScanOptions::default(),
            runtime: None,
            _state: PhantomData,
        }
    }
}

impl<State> Pruner<State> {
    /// Add a root docname (relative to the project root, extension optional).
    pub fn root(self, name: impl Into<String>) -> Pruner<Configured> {
        self.roots([name])
    }

    /// Add several root docnames.
    ///
    /// An empty iterator still moves to `Configured`; `analyze()` then
    /// reports the empty root set as a configuration error.
    pub fn roots(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Pruner<Configured> {
        self.roots.extend(names.into_iter().map(Into::into));
        Pruner {
            project_root: self.project_root,
            roots: self.roots,
            options: self.options,
            runtime: self.runtime,
            _state: PhantomData,
        }
    }

    /// Replace the scan options wholesale.
    pub fn options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the document extension (default `rst`).
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.options = self.options.with_extension(extension);
        self
    }

    /// Treat these directive names as asset references.
    pub fn directives(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = self.options.with_directives(names);
        self
    }

    pub fn include(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = self.options.with_include(patterns);
        self
    }

    pub fn exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = self.options.with_exclude(patterns);
        self
    }

    /// Set the runtime used for all file-system access.
    ///
    /// Defaults to [`NativeRuntime`].
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }
}

impl Pruner<Configured> {
    /// Build the graph, compute orphans and plan the deletion.
    ///
    /// Reads the disk but never modifies it.
    pub fn analyze(self) -> Result<Analysis> {
        let runtime = self.runtime.unwrap_or_else(|| Arc::new(NativeRuntime::new()));

        let graph = build_graph(&self.project_root, runtime.as_ref(), &self.options)?;
        let roots = RootSet::from_names(graph.root(), &self.roots, &self.options.document_extension);
        let orphans = orphans(&graph, &roots)?;
        let plan = plan(&graph, &orphans);

        Ok(Analysis {
            graph,
            roots,
            orphans,
            plan,
            runtime,
        })
    }
}

/// Result of analysing a project: the graph, its orphans and the plan.
#[derive(Debug)]
pub struct Analysis {
    graph: ReferenceGraph,
    roots: RootSet,
    orphans: Vec<FileId>,
    plan: DeletionPlan,
    runtime: Arc<dyn Runtime>,
}

impl Analysis {
    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }

    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    /// Unreachable documents, sorted.
    pub fn orphans(&self) -> &[FileId] {
        &self.orphans
    }

    pub fn plan(&self) -> &DeletionPlan {
        &self.plan
    }

    /// Apply (or dry-run) the plan with the runtime used for the analysis.
    pub fn execute(&self, mode: Mode, options: &ExecuteOptions) -> ExecutionReport {
        execute(&self.plan, mode, self.runtime.as_ref(), options)
    }
}
