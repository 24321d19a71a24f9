//! Terminal output: status messages and plan/report rendering.
//!
//! Status lines go to stderr; the plan listing goes to stdout so it can be
//! piped. Colors follow `--no-color`, `NO_COLOR`/`FORCE_COLOR` and TTY detection.
//!
//! ```no_run
//! use doctrim_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Deleted 3 files");
//! ui::warning("2 references point at missing files");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{print_diagnostics, print_plan, print_report, relative_path};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call once, early in `main`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
