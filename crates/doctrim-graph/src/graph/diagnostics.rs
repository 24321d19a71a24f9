//! Recoverable problems found while building the graph.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::file_id::FileId;
use crate::resolver::ResolutionError;
use crate::scanner::ReferenceKind;

/// A reference whose target is neither a discovered document nor an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub source: FileId,
    pub line: usize,
    pub kind: ReferenceKind,
    /// Target as written
    pub target: String,
    /// Where the target was looked for
    pub resolved: PathBuf,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: '{}' not found ({})",
            self.source,
            self.line,
            self.target,
            self.resolved.display()
        )
    }
}

/// A reference that could not be resolved into a project path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionWarning {
    pub source: FileId,
    pub line: usize,
    pub target: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: ResolutionError,
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.source, self.line, self.error)
    }
}

/// A document that could not be read; it stays in the graph with no references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadFailure {
    pub path: FileId,
    pub error: String,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
