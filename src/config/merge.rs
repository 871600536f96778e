//! Configuration merging logic
//!
//! Priority: CLI args > eofmark.toml > defaults

use crate::writer::RepairPolicy;

use super::toml_schema::RepairSection;

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliRepairOptions {
    pub blank_line_before: Option<bool>,
}

/// Merge configurations from CLI, TOML, and defaults.
pub fn merge_repair_policy(cli: &CliRepairOptions, toml: Option<&RepairSection>) -> RepairPolicy {
    let defaults = RepairPolicy::default();

    RepairPolicy {
        blank_line_before: cli
            .blank_line_before
            .or_else(|| toml.and_then(|t| t.blank_line_before))
            .unwrap_or(defaults.blank_line_before),
    }
}
