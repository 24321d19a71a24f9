//! Rendering of deletion plans, execution reports and graph diagnostics.

use std::path::Path;

use console::{style, Term};
use doctrim_graph::{DeletionPlan, EntryKind, ExecutionReport, ReferenceGraph};

use super::messages::{error, info, success, warning};

/// Display `path` relative to `root` when it lies inside it.
///
/// ```
/// use doctrim_cli::ui::relative_path;
/// use std::path::Path;
///
/// assert_eq!(relative_path(Path::new("/docs/guide/a.rst"), Path::new("/docs")), "guide/a.rst");
/// assert_eq!(relative_path(Path::new("/elsewhere/b.png"), Path::new("/docs")), "/elsewhere/b.png");
/// ```
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Document => "document",
        EntryKind::Asset => "asset",
    }
}

/// Print the plan listing to stdout and a one-line summary to stderr.
pub fn print_plan(plan: &DeletionPlan, dry_run: bool) {
    if plan.is_empty() {
        success("Nothing to delete: every document is reachable");
        return;
    }

    let term = Term::stdout();
    let width = (term.size().1 as usize).min(80);

    println!("{}", style("─".repeat(width)).dim());
    for entry in plan.entries() {
        let label = match entry.kind {
            EntryKind::Document => style(format!("{:<8}", kind_label(entry.kind))).red(),
            EntryKind::Asset => style(format!("{:<8}", kind_label(entry.kind))).yellow(),
        };
        println!(
            "  {}  {}",
            label,
            style(relative_path(entry.path.as_path(), plan.root())).bold()
        );
    }
    println!("{}", style("─".repeat(width)).dim());

    let documents = plan.documents().count();
    let assets = plan.assets().count();
    let verb = if dry_run { "Would delete" } else { "Deleting" };
    info(&format!(
        "{verb} {documents} document{} and {assets} asset{}",
        plural(documents),
        plural(assets)
    ));
}

/// Summarize an execution report on stderr.
pub fn print_report(report: &ExecutionReport, root: &Path) {
    if report.dry_run {
        for dir in &report.pruned_dirs {
            info(&format!("Would remove empty directory {}", relative_path(dir, root)));
        }
        info("Dry run: nothing was deleted");
        return;
    }

    for failure in &report.failed {
        error(&format!(
            "could not delete {}: {}",
            relative_path(&failure.path, root),
            failure.error
        ));
    }

    if !report.deleted.is_empty() {
        success(&format!(
            "Deleted {} file{}",
            report.deleted.len(),
            plural(report.deleted.len())
        ));
    }
    if !report.already_absent.is_empty() {
        info(&format!(
            "{} file{} already gone",
            report.already_absent.len(),
            plural(report.already_absent.len())
        ));
    }
    if !report.pruned_dirs.is_empty() {
        info(&format!(
            "Removed {} empty director{}",
            report.pruned_dirs.len(),
            if report.pruned_dirs.len() == 1 { "y" } else { "ies" }
        ));
    }
}

/// Warn about dangling references, unresolvable targets and unreadable files.
pub fn print_diagnostics(graph: &ReferenceGraph) {
    let root = graph.root();
    for dangling in graph.dangling() {
        warning(&format!(
            "{}:{}: {} target '{}' not found",
            relative_path(dangling.source.as_path(), root),
            dangling.line,
            dangling.kind,
            dangling.target
        ));
    }
    for unresolved in graph.warnings() {
        warning(&format!(
            "{}:{}: {}",
            relative_path(unresolved.source.as_path(), root),
            unresolved.line,
            unresolved.error
        ));
    }
    for failure in graph.read_failures() {
        warning(&format!(
            "could not read {}: {}",
            relative_path(failure.path.as_path(), root),
            failure.error
        ));
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctrim_graph::{orphans, plan, FailedDeletion, FileId, ReferenceKind, RootSet};

    fn sample_plan() -> DeletionPlan {
        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document(FileId::from("/docs/index.rst"));
        graph.add_document(FileId::from("/docs/old/page.rst"));
        graph.add_asset_edge(FileId::from("/docs/old/page.rst"), FileId::from("/docs/old/fig.png"));
        let roots = RootSet::from_names(graph.root(), &["index"], "rst");
        let orphaned = orphans(&graph, &roots).unwrap();
        plan(&graph, &orphaned)
    }

    #[test]
    fn test_relative_path_outside_root() {
        assert_eq!(relative_path(Path::new("/tmp/x"), Path::new("/docs")), "/tmp/x");
    }

    #[test]
    fn test_print_functions_do_not_panic() {
        let plan = sample_plan();
        print_plan(&plan, true);
        print_report(
            &ExecutionReport {
                dry_run: true,
                pruned_dirs: vec!["/docs/old".into()],
                ..Default::default()
            },
            plan.root(),
        );
        print_report(&ExecutionReport::default(), plan.root());
        print_report(
            &ExecutionReport {
                failed: vec![FailedDeletion {
                    path: "/docs/old/page.rst".into(),
                    error: "permission denied".into(),
                }],
                ..Default::default()
            },
            plan.root(),
        );

        let mut graph = ReferenceGraph::new("/docs");
        graph.add_document_edge(
            FileId::from("/docs/index.rst"),
            FileId::from("/docs/a.rst"),
            ReferenceKind::ChildDocument,
        );
        print_diagnostics(&graph);
    }
}
