//! # doctrim-graph
//!
//! Reference graph and reachability analysis for reStructuredText documentation
//! projects.
//!
//! ## Overview
//!
//! A documentation project is a tree of `.rst` sources linked together by
//! `toctree` and `include` directives, plus media files pulled in by `image`,
//! `figure`, `literalinclude` and the `:download:` role. This crate builds that
//! reference graph, finds the pages no root document reaches, and plans the
//! removal of those pages together with every asset that only they use.
//!
//! ## Architecture
//!
//! ```text
//!  Runtime ──► build_graph ──► ReferenceGraph ──► orphans ──► plan ──► execute
//!               │   │                                │           │
//!          Scanner  Resolver                      RootSet   DeletionPlan
//! ```
//!
//! - [`scanner`]: text in, typed references out
//! - [`resolver`]: pure path resolution and bounds checking
//! - [`builder`]: the only stage that reads from disk
//! - [`reachability`]: BFS over child-document and include edges
//! - [`plan`]: pure set computation, documents then assets
//! - [`executor`]: applies the plan and reports per-path outcomes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doctrim_graph::{ExecuteOptions, Mode, Pruner};
//!
//! # fn main() -> doctrim_graph::Result<()> {
//! let analysis = Pruner::new("docs").root("index").analyze()?;
//! println!("{} files would be removed", analysis.plan().len());
//!
//! let report = analysis.execute(Mode::Apply, &ExecuteOptions::default());
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod executor;
pub mod file_id;
pub mod filter;
pub mod graph;
pub mod plan;
pub mod pruner;
pub mod reachability;
pub mod resolver;
pub mod runtime;
pub mod scanner;


pub use builder::{build_graph, ScanOptions, DEFAULT_DOCUMENT_EXTENSION};
pub use executor::{execute, ExecuteOptions, ExecutionReport, FailedDeletion, Mode};
pub use file_id::FileId;
pub use filter::PathFilter;
pub use graph::{
    DanglingReference, DocumentEdge, GraphStats, ReadFailure, ReferenceGraph, ResolutionWarning,
};
pub use plan::{plan, DeletionPlan, EntryKind, PlanEntry};
pub use pruner::{Analysis, Configured, Pruner, Unconfigured};
pub use reachability::{orphans, reachable, ConfigurationError, RootSet};
pub use resolver::{resolve, ResolutionError};
pub use runtime::native::NativeRuntime;
pub use runtime::{Runtime, RuntimeError, RuntimeResult};
pub use scanner::{ReferenceKind, ScannedReference, Scanner};

/// Errors that abort an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, Error>;
