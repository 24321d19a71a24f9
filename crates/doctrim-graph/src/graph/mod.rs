//! In-memory reference graph.
//!
//! `ReferenceGraph` is a plain hash-map graph: documents are nodes, toctree and
//! include references are document edges, and image/figure/download references
//! are asset edges with a reverse index from each asset to the documents that
//! use it. The graph is built once per run and only read afterwards.

mod construction;
mod diagnostics;
mod queries;

pub use diagnostics::{DanglingReference, ReadFailure, ResolutionWarning};
pub use queries::GraphStats;

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::file_id::FileId;
use crate::scanner::ReferenceKind;

/// A document-to-document edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentEdge {
    pub target: FileId,
    /// `ChildDocument` or `Include`
    pub kind: ReferenceKind,
}

/// Reference graph for one documentation project.
#[derive(Debug, Clone)]
pub struct ReferenceGraph {
    pub(crate) root: PathBuf,
    pub(crate) documents: FxHashSet<FileId>,
    /// Documents kept out of the analysis by include/exclude filters. Still
    /// scanned, never deleted.
    pub(crate) protected: FxHashSet<FileId>,
    pub(crate) document_edges: FxHashMap<FileId, Vec<DocumentEdge>>,
    pub(crate) asset_edges: FxHashMap<FileId, Vec<FileId>>,
    pub(crate) asset_referrers: FxHashMap<FileId, FxHashSet<FileId>>,
    pub(crate) dangling: Vec<DanglingReference>,
    pub(crate) warnings: Vec<ResolutionWarning>,
    pub(crate) read_failures: Vec<ReadFailure>,
}

impl ReferenceGraph {
    /// Create an empty graph for the project rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: FileId::new(root).into_path(),
            documents: FxHashSet::default(),
            protected: FxHashSet::default(),
            document_edges: FxHashMap::default(),
            asset_edges: FxHashMap::default(),
            asset_referrers: FxHashMap::default(),
            dangling: Vec::new(),
            warnings: Vec::new(),
            read_failures: Vec::new(),
        }
    }

    /// Project root every path in the graph lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
