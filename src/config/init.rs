//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template eofmark.toml with documentation
pub const EOFMARK_TOML_TEMPLATE: &str = r#"# eofmark.toml - Configuration for eofmark
#
# eofmark makes sure every matching source file ends with the Vim modeline
# comment for its extension:
# - Files without the comment get it appended as a new last line
# - Recognisably mangled comments (dropped spaces, stray leading '-') are
#   replaced in place
#
# The comment text per extension is built in and cannot be changed here.

[repair]
# Insert one blank line before a repaired comment, unless the line above
# is already blank. Applies to every extension alike.
# Default: false
# blank_line_before = false
"#;

/// Generate eofmark.toml in the specified directory (or current directory if None).
///
/// Returns an error if eofmark.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(
        || PathBuf::from(CONFIG_FILE_NAME),
        |d| d.join(CONFIG_FILE_NAME),
    );

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, EOFMARK_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate eofmark.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
