//! Mutation methods used while building a `ReferenceGraph`.

use super::{DanglingReference, DocumentEdge, ReadFailure, ReferenceGraph, ResolutionWarning};
use crate::file_id::FileId;
use crate::scanner::ReferenceKind;

impl ReferenceGraph {
    /// Register a document node. Adding the same document twice is a no-op.
    pub fn add_document(&mut self, id: FileId) {
        self.document_edges.entry(id.clone()).or_default();
        self.documents.insert(id);
    }

    /// Register a document that must survive regardless of reachability.
    pub fn add_protected_document(&mut self, id: FileId) {
        self.add_document(id.clone());
        self.protected.insert(id);
    }

    /// Add a child-document or include edge between two documents.
    ///
    /// Both ends are registered as documents. Duplicate edges are dropped so
    /// a page that lists the same child twice still has one edge.
    pub fn add_document_edge(&mut self, from: FileId, to: FileId, kind: ReferenceKind) {
        debug_assert!(kind.is_document_edge());
        self.add_document(to.clone());
        self.add_document(from.clone());

        let edges = self.document_edges.entry(from).or_default();
        let edge = DocumentEdge { target: to, kind };
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    /// Record that `document` uses `asset`, updating the reverse index.
    pub fn add_asset_edge(&mut self, document: FileId, asset: FileId) {
        self.add_document(document.clone());

        let assets = self.asset_edges.entry(document.clone()).or_default();
        if !assets.contains(&asset) {
            assets.push(asset.clone());
        }
        self.asset_referrers.entry(asset).or_default().insert(document);
    }

    pub fn record_dangling(&mut self, reference: DanglingReference) {
        self.dangling.push(reference);
    }

    pub fn record_warning(&mut self, warning: ResolutionWarning) {
        self.warnings.push(warning);
    }

    pub fn record_read_failure(&mut self, failure: ReadFailure) {
        self.read_failures.push(failure);
    }
}
