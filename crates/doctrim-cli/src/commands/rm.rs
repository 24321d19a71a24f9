//! `doctrim rm`: analyze a documentation tree and delete what no root reaches.
//!
//! Steps:
//! 1. Load configuration (defaults, user file, project file, env, flags)
//! 2. Build the reference graph and report diagnostics
//! 3. Compute orphans and the deletion plan
//! 4. Print the plan, then delete (or stop, with `--dry-run`)

use std::path::Path;
use std::sync::Arc;

use doctrim_config::DoctrimConfig;
use doctrim_graph::{
    Analysis, DanglingReference, ExecutionReport, FileId, Mode, NativeRuntime, PlanEntry, Pruner,
    ReadFailure, ResolutionWarning, Runtime,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::RmArgs;
use crate::config::{execute_options, load, scan_options};
use crate::error::{CliError, Result};
use crate::ui;

/// Machine-readable output of `doctrim rm --json`.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub root: &'a Path,
    pub dry_run: bool,
    pub roots: Vec<&'a FileId>,
    pub plan: &'a [PlanEntry],
    pub report: &'a ExecutionReport,
    pub dangling: &'a [DanglingReference],
    pub warnings: &'a [ResolutionWarning],
    pub read_failures: &'a [ReadFailure],
}

impl<'a> JsonOutput<'a> {
    pub fn new(analysis: &'a Analysis, report: &'a ExecutionReport) -> Self {
        let graph = analysis.graph();
        Self {
            root: graph.root(),
            dry_run: report.dry_run,
            roots: analysis.roots().iter().collect(),
            plan: analysis.plan().entries(),
            report,
            dangling: graph.dangling(),
            warnings: graph.warnings(),
            read_failures: graph.read_failures(),
        }
    }
}

/// Execute the rm command.
///
/// # Errors
///
/// - configuration cannot be loaded or is invalid
/// - PATH is missing or not a directory, or a root document does not exist
/// - one or more planned deletions failed (the others are still applied)
pub fn execute(args: RmArgs) -> Result<()> {
    let config = load(&args)?;
    run(&args, &config, Arc::new(NativeRuntime::new()))
}

/// Analyze, report and apply the plan through `runtime`.
pub fn run(args: &RmArgs, config: &DoctrimConfig, runtime: Arc<dyn Runtime>) -> Result<()> {
    debug!(path = %args.path.display(), roots = ?config.roots, "starting analysis");

    let analysis = analyze(&args.path, config, runtime)?;
    let stats = analysis.graph().stats();
    info!(
        documents = stats.documents,
        protected = stats.protected,
        assets = stats.assets,
        orphans = analysis.orphans().len(),
        "analysis complete"
    );

    let mode = if args.dry_run { Mode::DryRun } else { Mode::Apply };

    if !args.json {
        ui::print_diagnostics(analysis.graph());
        if stats.protected > 0 {
            ui::info(&format!(
                "{} document{} outside the include/exclude filters will be kept",
                stats.protected,
                if stats.protected == 1 { "" } else { "s" }
            ));
        }
        ui::print_plan(analysis.plan(), args.dry_run);
    }

    let report = analysis.execute(mode, &execute_options(config));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::new(&analysis, &report))?);
    } else if !analysis.plan().is_empty() {
        ui::print_report(&report, analysis.graph().root());
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::DeletionFailed {
            failed: report.failed.len(),
            total: analysis.plan().len(),
        })
    }
}

fn analyze(path: &Path, config: &DoctrimConfig, runtime: Arc<dyn Runtime>) -> Result<Analysis> {
    let analysis = Pruner::new(path)
        .roots(config.roots.iter().cloned())
        .options(scan_options(config))
        .runtime(runtime)
        .analyze()?;
    Ok(analysis)
}
