//! Read-only queries on `ReferenceGraph`.

use serde::Serialize;

use super::{DanglingReference, DocumentEdge, ReadFailure, ReferenceGraph, ResolutionWarning};
use crate::file_id::FileId;

/// Summary counts for logging and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub documents: usize,
    pub protected: usize,
    pub document_edges: usize,
    pub assets: usize,
    pub asset_edges: usize,
    pub dangling: usize,
    pub warnings: usize,
    pub read_failures: usize,
}

impl ReferenceGraph {
    /// All documents, sorted by path.
    pub fn documents(&self) -> Vec<FileId> {
        let mut documents: Vec<FileId> = self.documents.iter().cloned().collect();
        documents.sort();
        documents
    }

    pub fn contains_document(&self, id: &FileId) -> bool {
        self.documents.contains(id)
    }

    /// Whether `id` was filtered out of the analysis and must be kept.
    pub fn is_protected(&self, id: &FileId) -> bool {
        self.protected.contains(id)
    }

    /// Protected documents, sorted by path.
    pub fn protected(&self) -> Vec<FileId> {
        let mut protected: Vec<FileId> = self.protected.iter().cloned().collect();
        protected.sort();
        protected
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Outgoing child-document and include edges of `id`, in document order.
    pub fn document_edges(&self, id: &FileId) -> &[DocumentEdge] {
        self.document_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Targets of the outgoing document edges of `id`.
    pub fn children(&self, id: &FileId) -> impl Iterator<Item = &FileId> + '_ {
        self.document_edges(id).iter().map(|edge| &edge.target)
    }

    /// Assets referenced directly by `id`.
    pub fn assets_of(&self, id: &FileId) -> &[FileId] {
        self.asset_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every referenced asset, sorted by path.
    pub fn assets(&self) -> Vec<FileId> {
        let mut assets: Vec<FileId> = self.asset_referrers.keys().cloned().collect();
        assets.sort();
        assets
    }

    /// Documents referencing `asset`, sorted by path.
    pub fn referrers(&self, asset: &FileId) -> Vec<FileId> {
        let mut referrers: Vec<FileId> = self
            .asset_referrers
            .get(asset)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        referrers.sort();
        referrers
    }

    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    pub fn read_failures(&self) -> &[ReadFailure] {
        &self.read_failures
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            documents: self.documents.len(),
            protected: self.protected.len(),
            document_edges: self.document_edges.values().map(Vec::len).sum(),
            assets: self.asset_referrers.len(),
            asset_edges: self.asset_edges.values().map(Vec::len).sum(),
            dangling: self.dangling.len(),
            warnings: self.warnings.len(),
            read_failures: self.read_failures.len(),
        }
    }
}
