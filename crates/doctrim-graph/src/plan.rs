//! Deletion planning.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::file_id::FileId;
use crate::graph::ReferenceGraph;

/// What a plan entry removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Document,
    Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub path: FileId,
    pub kind: EntryKind,
}

/// Ordered list of files to delete: documents first, then assets, each
/// sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPlan {
    root: PathBuf,
    entries: Vec<PlanEntry>,
}

impl DeletionPlan {
    /// Project root the plan was computed for.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn documents(&self) -> impl Iterator<Item = &FileId> {
        self.entries_of(EntryKind::Document)
    }

    pub fn assets(&self) -> impl Iterator<Item = &FileId> {
        self.entries_of(EntryKind::Asset)
    }

    pub fn contains(&self, path: &FileId) -> bool {
        self.entries.iter().any(|entry| &entry.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &FileId> {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == kind)
            .map(|entry| &entry.path)
    }
}

/// Compute the deletion plan for `orphans`.
///
/// Every orphan is planned. An asset is planned only when it has at least one
/// referrer and all of its referrers are orphans, so an asset shared with a
/// surviving document is never removed. An asset path that is itself a
/// surviving document is never planned either. Protected documents are
/// dropped from `orphans` and keep whatever they reference.
pub fn plan(graph: &ReferenceGraph, orphans: &[FileId]) -> DeletionPlan {
    let orphans: Vec<&FileId> = orphans
        .iter()
        .filter(|doc| !graph.is_protected(doc))
        .collect();
    let orphaned: FxHashSet<&FileId> = orphans.iter().copied().collect();

    let mut documents: Vec<FileId> = orphans.into_iter().cloned().collect();
    documents.sort();
    documents.dedup();

    let mut assets: Vec<FileId> = graph
        .asset_referrers
        .iter()
        .filter(|(asset, referrers)| {
            !referrers.is_empty()
                && referrers.iter().all(|doc| orphaned.contains(doc))
                && !graph.contains_document(asset)
        })
        .map(|(asset, _)| asset.clone())
        .collect();
    assets.sort();

    let entries = documents
        .into_iter()
        .map(|path| PlanEntry {
            path,
            kind: EntryKind::Document,
        })
        .chain(assets.into_iter().map(|path| PlanEntry {
            path,
            kind: EntryKind::Asset,
        }))
        .collect();

    DeletionPlan {
        root: graph.root().to_path_buf(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ReferenceKind;

    fn doc(name: &str) -> FileId {
        FileId::new(format!("/docs/{name}.rst"))
    }

    fn asset(name: &str) -> FileId {
        FileId::new(format!("/docs/{name}"))
    }

    #[test]
    fn shared_assets_survive() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_asset_edge(doc("x"), asset("img.png"));
        graph.add_asset_edge(doc("y"), asset("img.png"));
        graph.add_asset_edge(doc("x"), asset("only-x.png"));

        let plan = plan(&graph, &[doc("x")]);
        assert_eq!(plan.documents().collect::<Vec<_>>(), vec![&doc("x")]);
        assert_eq!(plan.assets().collect::<Vec<_>>(), vec![&asset("only-x.png")]);
    }

    #[test]
    fn documents_come_before_assets_sorted() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_asset_edge(doc("b"), asset("z.png"));
        graph.add_asset_edge(doc("a"), asset("a.png"));

        let plan = plan(&graph, &[doc("b"), doc("a")]);
        let kinds: Vec<(String, EntryKind)> = plan
            .entries()
            .iter()
            .map(|e| (e.path.to_string(), e.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("/docs/a.rst".to_string(), EntryKind::Document),
                ("/docs/b.rst".to_string(), EntryKind::Document),
                ("/docs/a.png".to_string(), EntryKind::Asset),
                ("/docs/z.png".to_string(), EntryKind::Asset),
            ]
        );
    }

    #[test]
    fn no_orphans_means_empty_plan() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document_edge(doc("index"), doc("a"), ReferenceKind::ChildDocument);
        graph.add_asset_edge(doc("a"), asset("logo.png"));

        assert!(plan(&graph, &[]).is_empty());
    }

    #[test]
    fn protected_documents_are_never_planned() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_protected_document(doc("wip"));
        graph.add_asset_edge(doc("wip"), asset("draft.png"));

        let plan = plan(&graph, &[doc("wip")]);
        assert!(plan.is_empty());
    }

    #[test]
    fn serializes_with_lowercase_kinds() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document(doc("old"));

        let json = serde_json::to_string(&plan(&graph, &[doc("old")])).unwrap();
        assert_eq!(
            json,
            r#"{"root":"/docs","entries":[{"path":"/docs/old.rst","kind":"document"}]}"#
        );
    }
}
