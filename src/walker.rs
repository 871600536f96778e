use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::Interrupt;
use crate::error::RunError;

/// A file found under one of the roots, with the extension it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub ext: String,
}

/// Return the first extension (in the given order) that `name` ends with.
///
/// An extension `e` matches when the name ends with `.e` and has at least one
/// character before the dot.
pub fn match_extension<'a, S: AsRef<str>>(name: &str, extensions: &'a [S]) -> Option<&'a str> {
    for ext in extensions {
        let ext: &str = ext.as_ref();
        if name.len() > ext.len() + 1
            && name
                .strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with('.'))
        {
            return Some(ext);
        }
    }
    None
}

/// Walk every root recursively and collect files carrying a requested extension.
///
/// Missing or non-directory roots contribute nothing. Hidden and ignored files
/// are not filtered out. Symlinks to regular files are kept, symlinked
/// directories are not descended into. Each file is reported once even if
/// roots overlap or several links point at it.
pub fn discover<S: AsRef<str>>(
    roots: &[S],
    extensions: &[S],
    interrupt: &Interrupt,
) -> Result<Vec<DiscoveredFile>, RunError> {
    let mut seen = HashSet::new();
    let mut found = vec![];

    for root in roots {
        interrupt.check()?;

        let root = Path::new(root.as_ref());
        if !root.is_dir() {
            continue;
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        // Unreadable entries are skipped
        for entry in walker.flatten() {
            interrupt.check()?;

            let is_file = entry
                .file_type()
                .is_some_and(|ft| ft.is_file() || (ft.is_symlink() && entry.path().is_file()));
            if !is_file {
                continue;
            }

            // Lossy names still match, the replaced bytes never include the dot
            let Some(ext) = match_extension(&entry.file_name().to_string_lossy(), extensions)
            else {
                continue;
            };

            let key = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
            if seen.insert(key) {
                found.push(DiscoveredFile {
                    ext: ext.to_string(),
                    path: entry.into_path(),
                });
            }
        }
    }

    Ok(found)
}
