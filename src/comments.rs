//! Built-in table of canonical end-of-file comments.
//!
//! Every supported extension maps to exactly one modeline comment. The table
//! is built once and only ever handed out by shared reference.

use std::collections::BTreeMap;
use std::sync::LazyLock;

const C_FAMILY: &str = "/// vim:ts=2:sts=2:sw=2:et:ai:si:sta:";
const LUA: &str = "-- vim:ts=2:sts=2:sw=2:et:ai:si:sta:";
const MARKUP: &str = "<!--\nvim:ts=2:sts=2:sw=2:et:ai:si:sta:\n-->";
const CSS: &str = "/* vim:ts=2:sts=2:sw=2:et:ai:si:sta: */";
const HASH_4: &str = "# vim:ts=4:sts=4:sw=4:et:ai:si:sta:";

const BUILTIN: &[(&str, &str)] = &[
    // C
    ("c", C_FAMILY),
    ("h", C_FAMILY),
    // C++
    ("cc", C_FAMILY),
    ("c++", C_FAMILY),
    ("cpp", C_FAMILY),
    ("C", C_FAMILY),
    ("hh", C_FAMILY),
    ("h++", C_FAMILY),
    ("hpp", C_FAMILY),
    ("H", C_FAMILY),
    // Lua
    ("lua", LUA),
    // Markdown / HTML
    ("md", MARKUP),
    ("markdown", MARKUP),
    ("html", MARKUP),
    ("htm", MARKUP),
    // CSS
    ("css", CSS),
    // Python
    ("py", HASH_4),
    ("pyi", HASH_4),
    // Shell
    ("sh", HASH_4),
    ("bash", HASH_4),
    ("fish", HASH_4),
    ("zsh", HASH_4),
];

static TABLE: LazyLock<CommentTable> = LazyLock::new(|| CommentTable {
    markers: BUILTIN
        .iter()
        .map(|&(ext, text)| (ext, Marker::new(text)))
        .collect(),
});

/// A canonical comment together with its line split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    text: &'static str,
    lines: Vec<&'static str>,
}

impl Marker {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            lines: text.split('\n').collect(),
        }
    }

    /// The exact comment text, without a trailing newline
    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn lines(&self) -> &[&'static str] {
        &self.lines
    }

    /// Number of lines the comment occupies in a file
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Immutable mapping from extension (no leading dot) to its marker
#[derive(Debug)]
pub struct CommentTable {
    markers: BTreeMap<&'static str, Marker>,
}

impl CommentTable {
    /// The process-wide built-in table
    pub fn builtin() -> &'static CommentTable {
        &TABLE
    }

    pub fn get(&self, ext: &str) -> Option<&Marker> {
        self.markers.get(ext)
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.markers.contains_key(ext)
    }

    /// Supported extensions in sorted order
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.markers.keys().copied()
    }
}
