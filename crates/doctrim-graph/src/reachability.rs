//! Reachability from the root documents.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::file_id::FileId;
use crate::graph::ReferenceGraph;

/// Fatal problems with how a run was set up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No root documents were configured.
    #[error("no root documents configured\n\nHint: pass --root <DOC> or set `roots` in doctrim.toml")]
    EmptyRootSet,

    /// A configured root is not one of the discovered documents.
    #[error("root document {} was not found among the project's documents", .0.display())]
    UnknownRoot(PathBuf),

    /// The project directory does not exist.
    #[error("project root {} does not exist", .0.display())]
    MissingProjectRoot(PathBuf),

    /// The project path exists but is not a directory.
    #[error("project root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// An include or exclude pattern failed to compile.
    #[error("invalid glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },
}

/// The entry documents reachability starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: Vec<FileId>,
}

impl RootSet {
    pub fn new(roots: impl IntoIterator<Item = FileId>) -> Self {
        let mut roots: Vec<FileId> = roots.into_iter().collect();
        roots.sort();
        roots.dedup();
        Self { roots }
    }

    /// Build a root set from docnames such as `index` or `guide/start.rst`.
    ///
    /// Names are relative to the project root; the document extension is
    /// appended when missing, the same way toctree entries are treated.
    pub fn from_names<S: AsRef<str>>(project_root: &Path, names: &[S], document_extension: &str) -> Self {
        let suffix = format!(".{document_extension}");
        Self::new(names.iter().map(|name| {
            let name = name.as_ref().trim().trim_start_matches('/');
            let path = if name.ends_with(&suffix) {
                project_root.join(name)
            } else {
                project_root.join(format!("{name}{suffix}"))
            };
            FileId::new(path)
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileId> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Check the root set against a graph.
    pub fn validate(&self, graph: &ReferenceGraph) -> Result<(), ConfigurationError> {
        if self.roots.is_empty() {
            return Err(ConfigurationError::EmptyRootSet);
        }
        match self.roots.iter().find(|root| !graph.contains_document(root)) {
            Some(unknown) => Err(ConfigurationError::UnknownRoot(unknown.as_path().to_path_buf())),
            None => Ok(()),
        }
    }
}

/// Every document reachable from `roots` over child-document and include edges.
///
/// The roots themselves are part of the result, and so are protected
/// documents, which seed the traversal like extra roots. Asset edges are
/// never followed. Each document is visited at most once, so cycles terminate.
pub fn reachable(graph: &ReferenceGraph, roots: &RootSet) -> Result<FxHashSet<FileId>, ConfigurationError> {
    roots.validate(graph)?;

    let mut visited = FxHashSet::default();
    let mut queue: VecDeque<FileId> = roots.iter().cloned().collect();
    queue.extend(graph.protected());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        for child in graph.children(&current) {
            if !visited.contains(child) {
                queue.push_back(child.clone());
            }
        }
    }

    Ok(visited)
}

/// Documents not reachable from `roots`, sorted by path.
pub fn orphans(graph: &ReferenceGraph, roots: &RootSet) -> Result<Vec<FileId>, ConfigurationError> {
    let reached = reachable(graph, roots)?;
    Ok(graph
        .documents()
        .into_iter()
        .filter(|doc| !reached.contains(doc))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ReferenceKind;

    fn id(name: &str) -> FileId {
        FileId::new(format!("/docs/{name}.rst"))
    }

    #[test]
    fn chain_is_fully_reachable() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document_edge(id("a"), id("b"), ReferenceKind::ChildDocument);
        graph.add_document_edge(id("b"), id("c"), ReferenceKind::Include);

        let roots = RootSet::new([id("a")]);
        let reached = reachable(&graph, &roots).unwrap();
        assert_eq!(reached.len(), 3);
        assert!(orphans(&graph, &roots).unwrap().is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document_edge(id("a"), id("b"), ReferenceKind::ChildDocument);
        graph.add_document_edge(id("b"), id("a"), ReferenceKind::ChildDocument);
        graph.add_document(id("lonely"));

        let orphaned = orphans(&graph, &RootSet::new([id("a")])).unwrap();
        assert_eq!(orphaned, vec![id("lonely")]);
    }

    #[test]
    fn asset_edges_do_not_carry_reachability() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document(id("index"));
        graph.add_asset_edge(id("index"), FileId::from("/docs/other.rst"));
        graph.add_document(FileId::from("/docs/other.rst"));

        let orphaned = orphans(&graph, &RootSet::new([id("index")])).unwrap();
        assert_eq!(orphaned, vec![FileId::from("/docs/other.rst")]);
    }

    #[test]
    fn protected_documents_keep_their_subtree() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document(id("index"));
        graph.add_protected_document(id("drafts/wip"));
        graph.add_document_edge(id("drafts/wip"), id("drafts/part"), ReferenceKind::Include);
        graph.add_document(id("old"));

        let roots = RootSet::new([id("index")]);
        let reached = reachable(&graph, &roots).unwrap();
        assert!(reached.contains(&id("drafts/wip")));
        assert!(reached.contains(&id("drafts/part")));
        assert_eq!(orphans(&graph, &roots).unwrap(), vec![id("old")]);
    }

    #[test]
    fn empty_root_set_is_rejected() {
        let graph = ReferenceGraph::new("/docs");
        assert_eq!(
            reachable(&graph, &RootSet::default()).unwrap_err(),
            ConfigurationError::EmptyRootSet
        );
    }

    #[test]
    fn unknown_root_is_rejected() {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document(id("index"));
        let err = reachable(&graph, &RootSet::new([id("nope")])).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownRoot(PathBuf::from("/docs/nope.rst")));
    }

    #[test]
    fn root_names_get_the_document_extension() {
        let roots = RootSet::from_names(Path::new("/docs"), &["index", "guide/start.rst", "/api"], "rst");
        let names: Vec<String> = roots.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            names,
            vec!["/docs/api.rst", "/docs/guide/start.rst", "/docs/index.rst"]
        );
    }
}
