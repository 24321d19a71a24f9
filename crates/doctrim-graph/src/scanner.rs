//! Reference extraction from reStructuredText sources.
//!
//! The scanner only recognizes the handful of constructs that link files
//! together: `toctree` bodies, `include`, image-like directives and the
//! `:download:` role. Everything else in the document is ignored, and
//! malformed constructs are skipped rather than reported.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)\.\.[ \t]+(?:\|(?P<sub>[^|]+)\|[ \t]+)?(?P<name>[A-Za-z0-9][\w.+:-]*?)::(?:[ \t]+(?P<arg>.*?))?[ \t]*$")
        .expect("directive pattern is valid")
});

static DOWNLOAD_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":download:`(?P<body>[^`]+)`").expect("download role pattern is valid")
});

/// What a reference contributes to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    /// A toctree entry: the target is a child page of the referencing page.
    ChildDocument,
    /// A verbatim inclusion of another source file.
    Include,
    /// A media or download file used by the page.
    Asset,
}

impl ReferenceKind {
    /// Whether edges of this kind carry reachability between documents.
    pub fn is_document_edge(self) -> bool {
        matches!(self, Self::ChildDocument | Self::Include)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChildDocument => "toctree",
            Self::Include => "include",
            Self::Asset => "asset",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a directive carries its target(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// One target in the directive argument (`.. image:: logo.png`).
    Argument,
    /// One target per indented body line (`.. toctree::`).
    EntryLines,
}

/// A single row of the recognizer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognizer {
    pub name: String,
    pub kind: ReferenceKind,
    pub body: BodyStyle,
}

impl Recognizer {
    pub fn new(name: impl Into<String>, kind: ReferenceKind, body: BodyStyle) -> Self {
        Self {
            name: name.into(),
            kind,
            body,
        }
    }

    /// Whether the directive may appear in a substitution definition
    /// (`.. |logo| image:: logo.png`). Only single-argument asset directives can.
    pub fn accepts_substitution(&self) -> bool {
        self.kind == ReferenceKind::Asset && self.body == BodyStyle::Argument
    }
}

/// An unresolved reference as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedReference {
    pub kind: ReferenceKind,
    /// Directive or role that produced the reference (`toctree`, `image`, `download`, ...)
    pub directive: String,
    /// Raw target text, trimmed
    pub target: String,
    /// 1-based line number of the target
    pub line: usize,
    /// Entry of a `:glob:` toctree that contains wildcard characters
    pub glob: bool,
}

/// Directive names recognized out of the box.
pub const BUILTIN_RECOGNIZERS: &[(&str, ReferenceKind, BodyStyle)] = &[
    ("toctree", ReferenceKind::ChildDocument, BodyStyle::EntryLines),
    ("include", ReferenceKind::Include, BodyStyle::Argument),
    ("literalinclude", ReferenceKind::Asset, BodyStyle::Argument),
    ("image", ReferenceKind::Asset, BodyStyle::Argument),
    ("figure", ReferenceKind::Asset, BodyStyle::Argument),
];

/// Table-driven reference scanner.
#[derive(Debug, Clone)]
pub struct Scanner {
    recognizers: Vec<Recognizer>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Scanner with the built-in recognizer table.
    pub fn new() -> Self {
        let recognizers = BUILTIN_RECOGNIZERS
            .iter()
            .map(|(name, kind, body)| Recognizer::new(*name, *kind, *body))
            .collect();
        Self { recognizers }
    }

    /// Scanner with additional asset directives on top of the built-ins.
    ///
    /// Names already in the table are ignored, so a user cannot turn
    /// `toctree` into an asset directive by accident.
    pub fn with_asset_directives<I, S>(directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scanner = Self::new();
        for name in directives {
            scanner.register(Recognizer::new(name, ReferenceKind::Asset, BodyStyle::Argument));
        }
        scanner
    }

    /// Add a recognizer unless one with the same name exists.
    pub fn register(&mut self, recognizer: Recognizer) {
        let name = recognizer.name.trim();
        if name.is_empty() || self.recognizer(name).is_some() {
            return;
        }
        self.recognizers.push(Recognizer {
            name: name.to_string(),
            ..recognizer
        });
    }

    /// Look up the recognizer for a directive name.
    pub fn recognizer(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.name == name)
    }

    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// Extract every recognized reference from `text`, in document order.
    pub fn scan(&self, text: &str) -> Vec<ScannedReference> {
        let lines: Vec<&str> = text.lines().collect();
        let mut references = Vec::new();

        let mut index = 0;
        while index < lines.len() {
            let Some(caps) = DIRECTIVE_RE.captures(lines[index]) else {
                index += 1;
                continue;
            };
            let Some(recognizer) = self.recognizer(&caps["name"]) else {
                index += 1;
                continue;
            };
            if caps.name("sub").is_some() && !recognizer.accepts_substitution() {
                index += 1;
                continue;
            }

            match recognizer.body {
                BodyStyle::Argument => {
                    let target = caps.name("arg").map(|m| m.as_str().trim()).unwrap_or("");
                    if !target.is_empty() && !is_external(target) {
                        references.push(ScannedReference {
                            kind: recognizer.kind,
                            directive: recognizer.name.clone(),
                            target: target.to_string(),
                            line: index + 1,
                            glob: false,
                        });
                    }
                    index += 1;
                }
                BodyStyle::EntryLines => {
                    let indent = indent_width(&caps["indent"]);
                    let consumed = scan_entry_block(
                        &lines[index + 1..],
                        indent,
                        index + 2,
                        recognizer,
                        &mut references,
                    );
                    index += 1 + consumed;
                }
            }
        }

        for (offset, line) in lines.iter().enumerate() {
            for caps in DOWNLOAD_ROLE_RE.captures_iter(line) {
                let target = role_target(&caps["body"]);
                if !target.is_empty() && !is_external(target) {
                    references.push(ScannedReference {
                        kind: ReferenceKind::Asset,
                        directive: "download".to_string(),
                        target: target.to_string(),
                        line: offset + 1,
                        glob: false,
                    });
                }
            }
        }

        // Stable: keeps directive-before-role order within one line
        references.sort_by_key(|r| r.line);
        references
    }
}

/// Parse the indented body of an entry-style directive.
///
/// Returns how many lines were consumed.
fn scan_entry_block(
    body: &[&str],
    directive_indent: usize,
    first_line_number: usize,
    recognizer: &Recognizer,
    out: &mut Vec<ScannedReference>,
) -> usize {
    let mut glob = false;
    let mut consumed = 0;

    for (offset, raw) in body.iter().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            consumed = offset + 1;
            continue;
        }
        if indent_width(raw) <= directive_indent {
            break;
        }
        consumed = offset + 1;

        if trimmed.starts_with(':') {
            if trimmed == ":glob:" {
                glob = true;
            }
            continue;
        }

        let target = entry_target(trimmed);
        if target.is_empty() || target == "self" || is_external(target) {
            continue;
        }

        out.push(ScannedReference {
            kind: recognizer.kind,
            directive: recognizer.name.clone(),
            target: target.to_string(),
            line: first_line_number + offset,
            glob: glob && has_glob_chars(target),
        });
    }

    consumed
}

/// `Title <target>` → `target`; bare entries are returned unchanged.
fn entry_target(entry: &str) -> &str {
    if entry.ends_with('>') {
        if let Some(open) = entry.rfind('<') {
            return entry[open + 1..entry.len() - 1].trim();
        }
    }
    entry
}

fn role_target(body: &str) -> &str {
    entry_target(body.trim())
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Targets pointing outside the project (URLs, mail links, inline data).
pub fn is_external(target: &str) -> bool {
    target.contains("://") || target.starts_with("mailto:") || target.starts_with("data:")
}

fn has_glob_chars(target: &str) -> bool {
    target.contains(['*', '?', '['])
}
