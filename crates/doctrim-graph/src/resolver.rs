//! Pure path resolution for scanned references.
//!
//! Nothing in here touches the file system: the resolver only joins, cleans
//! and bounds-checks paths. Existence checks happen in the builder.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::scanner::ReferenceKind;

/// Why a raw reference could not be turned into a project path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The reference target is blank.
    #[error("empty reference target")]
    Empty,

    /// The resolved path leaves the project root.
    #[error("'{target}' resolves to {} which is outside the project root", .resolved.display())]
    EscapesRoot { target: String, resolved: PathBuf },

    /// A `:glob:` toctree entry is not a valid pattern.
    #[error("invalid glob entry '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Resolve `raw` as written in `source` into an absolute path under `root`.
///
/// A leading `/` makes the target root-relative; anything else is relative to
/// the directory of `source`. Child-document targets are docnames and get
/// `.{document_extension}` appended unless they already end with it. Include
/// targets get the extension only when they have none. Asset targets are
/// used as written.
pub fn resolve(
    raw: &str,
    kind: ReferenceKind,
    source: &Path,
    root: &Path,
    document_extension: &str,
) -> Result<PathBuf, ResolutionError> {
    let target = raw.trim();
    if target.is_empty() {
        return Err(ResolutionError::Empty);
    }

    let joined = match target.strip_prefix('/') {
        Some(rooted) => root.join(rooted),
        None => source.parent().unwrap_or(root).join(target),
    };
    let cleaned = with_document_extension(joined.clean(), kind, document_extension);

    let root = root.clean();
    if !cleaned.starts_with(&root) || cleaned == root {
        return Err(ResolutionError::EscapesRoot {
            target: target.to_string(),
            resolved: cleaned,
        });
    }

    Ok(cleaned)
}

/// Root-relative glob pattern for a `:glob:` toctree entry written in `source`.
///
/// The pattern is anchored with a leading `/` so it can be fed to a gitignore
/// style matcher rooted at `root`.
pub fn glob_pattern(
    raw: &str,
    source: &Path,
    root: &Path,
    document_extension: &str,
) -> Result<String, ResolutionError> {
    let resolved = resolve(raw, ReferenceKind::ChildDocument, source, root, document_extension)?;
    let relative = resolved
        .strip_prefix(root.clean())
        .map_err(|_| ResolutionError::EscapesRoot {
            target: raw.trim().to_string(),
            resolved: resolved.clone(),
        })?;
    Ok(format!("/{}", relative.to_string_lossy().replace('\\', "/")))
}

fn with_document_extension(path: PathBuf, kind: ReferenceKind, extension: &str) -> PathBuf {
    let suffix = format!(".{extension}");
    match kind {
        ReferenceKind::ChildDocument if !path.to_string_lossy().ends_with(&suffix) => {
            append_suffix(path, &suffix)
        }
        ReferenceKind::Include if path.extension().is_none() => append_suffix(path, &suffix),
        _ => path,
    }
}

fn append_suffix(path: PathBuf, suffix: &str) -> PathBuf {
    let mut raw = path.into_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
