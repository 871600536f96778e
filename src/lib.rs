pub mod batch;
pub mod classify;
pub mod colors;
pub mod comments;
pub mod config;
mod error;
pub mod output;
pub mod progress;
pub mod walker;
pub mod writer;

pub use batch::{Interrupt, OpenBatch, OpenedFile};
pub use classify::{
    classify, classify_file, is_binary, line_ending, Classification, ClassifiedFile, Inspection, Tail,
    VariantRule, VARIANT_RULES,
};
pub use colors::{should_use_colors, Colors, Tone};
pub use comments::{CommentTable, Marker};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_repair_policy, CliRepairOptions,
    ConfigError, EofmarkToml, RepairSection, EOFMARK_TOML_TEMPLATE,
};
pub use error::RunError;
pub use output::{Config, OutputContext, RunSummary};
pub use progress::ProgressReporter;
pub use walker::{discover, match_extension, DiscoveredFile};
pub use writer::{repair_content, write_fix, Outcome, RepairPolicy};

/// Main entry point: check every matching file under `roots` and fix the
/// ones whose end-of-file comment is missing or mangled.
///
/// Every file is classified before any file is written.
pub fn run(
    roots: &[String],
    config: &Config,
    interrupt: &Interrupt,
    ctx: &OutputContext,
) -> Result<RunSummary, RunError> {
    let table = CommentTable::builtin();
    let mut summary = RunSummary::default();

    let files = discover(roots, config.extensions.as_slice(), interrupt)?;
    let classified = check_files(files, table, interrupt, ctx, &mut summary)?;

    if summary.files_checked == 0 {
        return Err(RunError::NoMatchingFiles);
    }

    fix_files(&classified, table, config, interrupt, ctx, &mut summary)?;

    output::print_summary(&summary, ctx);

    Ok(summary)
}

fn check_files(
    files: Vec<DiscoveredFile>,
    table: &CommentTable,
    interrupt: &Interrupt,
    ctx: &OutputContext,
    summary: &mut RunSummary,
) -> Result<Vec<ClassifiedFile>, RunError> {
    let progress = ProgressReporter::new(files.len() as u64, ctx.show_progress, "checking");
    let mut classified = vec![];

    for opened in OpenBatch::new(files, interrupt, ctx) {
        let opened = opened?;
        summary.files_checked += 1;

        if let Some(name) = opened.file.path.file_name() {
            progress.set_message(&name.to_string_lossy());
        }

        let Some(marker) = table.get(&opened.file.ext) else {
            output::print_warning(
                &format!("No comment known for extension `{}`", opened.file.ext),
                ctx,
            );
            summary.files_skipped += 1;
            continue;
        };

        let path = opened.file.path.clone();
        match classify_file(opened, marker) {
            Ok(Inspection::Classified(file)) => classified.push(file),
            Ok(Inspection::Skipped(file, reason)) => {
                output::print_skipped(&file.path, reason, ctx);
                summary.files_skipped += 1;
            }
            Err(e) => {
                output::print_warning(&format!("Failed to read `{}`: {e}", path.display()), ctx);
                summary.files_skipped += 1;
            }
        }

        progress.inc();
    }

    progress.finish();

    Ok(classified)
}

fn fix_files(
    classified: &[ClassifiedFile],
    table: &CommentTable,
    config: &Config,
    interrupt: &Interrupt,
    ctx: &OutputContext,
    summary: &mut RunSummary,
) -> Result<(), RunError> {
    let pending = classified
        .iter()
        .filter(|f| !f.classification.is_compliant())
        .count();
    let progress = ProgressReporter::new(pending as u64, ctx.show_progress, "fixing");

    for file in classified {
        interrupt.check()?;

        let Some(marker) = table.get(&file.file.ext) else {
            continue;
        };

        let path = &file.file.path;
        match write_fix(file, marker, config.repair) {
            Ok(outcome) => {
                summary.record(outcome);
                output::print_outcome(path, outcome, ctx);
                if outcome != Outcome::Untouched {
                    progress.inc();
                }
            }
            Err(e) => {
                output::print_warning(&format!("Failed to update `{}`: {e}", path.display()), ctx);
                summary.files_skipped += 1;
            }
        }
    }

    progress.finish();

    Ok(())
}
