//! Configuration file support for eofmark.
//!
//! This module provides:
//! - Loading configuration from `eofmark.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`
//!
//! The comment table itself is built in and cannot be configured.

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config, ConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, EOFMARK_TOML_TEMPLATE};
pub use merge::{merge_repair_policy, CliRepairOptions};
pub use toml_schema::{EofmarkToml, RepairSection};
