//! TOML schema definitions for eofmark.toml

use serde::{Deserialize, Serialize};

/// Root structure for eofmark.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EofmarkToml {
    /// Repair settings
    #[serde(default)]
    pub repair: RepairSection,
}

/// `[repair]` section in eofmark.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepairSection {
    /// Insert a blank line before a repaired comment (default: false)
    pub blank_line_before: Option<bool>,
}
