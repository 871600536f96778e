//! Operator-facing diagnostics. Everything here writes to stderr.

use crate::colors::{Colors, Tone};
use crate::writer::{Outcome, RepairPolicy};
use std::path::Path;

pub struct Config {
    pub extensions: Vec<String>,
    pub repair: RepairPolicy,
}

pub struct OutputContext {
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }

    /// Warnings only, no colour or progress bar
    pub fn silent() -> Self {
        Self::new(false, false, false)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_checked: usize,
    pub files_compliant: usize,
    pub files_appended: usize,
    pub files_repaired: usize,
    pub files_skipped: usize,
}

impl RunSummary {
    pub fn files_changed(&self) -> usize {
        self.files_appended + self.files_repaired
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Untouched => self.files_compliant += 1,
            Outcome::Appended => self.files_appended += 1,
            Outcome::Repaired { .. } => self.files_repaired += 1,
        }
    }
}

pub fn print_warning(message: &str, ctx: &OutputContext) {
    eprintln!("{} {message}", ctx.colors.paint(Tone::Warning, "Warning:"));
}

pub fn print_error(message: &str, ctx: &OutputContext) {
    eprintln!("{} {message}", ctx.colors.paint(Tone::Error, "Error:"));
}

pub fn print_outcome(path: &Path, outcome: Outcome, ctx: &OutputContext) {
    if !ctx.verbose {
        return;
    }
    let label = match outcome {
        Outcome::Untouched => ctx.colors.paint(Tone::Info, "Checked:"),
        Outcome::Appended => ctx.colors.paint(Tone::Success, "Appended:"),
        Outcome::Repaired { rule } => {
            ctx.colors.paint(Tone::Success, &format!("Repaired ({rule}):"))
        }
    };
    eprintln!("{label} {}", path.display());
}

pub fn print_skipped(path: &Path, reason: &str, ctx: &OutputContext) {
    if !ctx.verbose {
        return;
    }
    eprintln!(
        "{} {}",
        ctx.colors.paint(Tone::Info, &format!("Skipping {reason}:")),
        path.display()
    );
}

pub fn print_summary(summary: &RunSummary, ctx: &OutputContext) {
    if !ctx.verbose {
        return;
    }

    eprintln!();
    let mut parts = vec![format!("{} files checked", summary.files_checked)];
    if summary.files_appended > 0 {
        parts.push(ctx.colors.paint(
            Tone::Success,
            &format!("{} appended", summary.files_appended),
        ));
    }
    if summary.files_repaired > 0 {
        parts.push(ctx.colors.paint(
            Tone::Success,
            &format!("{} repaired", summary.files_repaired),
        ));
    }
    if summary.files_skipped > 0 {
        parts.push(ctx.colors.paint(
            Tone::Warning,
            &format!("{} skipped", summary.files_skipped),
        ));
    }
    eprintln!("{}", parts.join(", "));
}
