//! Deciding whether a file already ends with its canonical comment.

use std::io::{self, Read};

use crate::batch::OpenedFile;
use crate::comments::Marker;
use crate::walker::DiscoveredFile;

const BINARY_CHECK_SIZE: usize = 8192;

/// Check if content is binary by looking for null bytes in first 8192 bytes
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_CHECK_SIZE);
    content[..check_len].contains(&0)
}

/// Result of inspecting a file's trailing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The file already ends with the canonical comment and a newline
    Compliant,
    /// The last `span` lines are a known mangled form of the comment
    RecoverableMismatch { span: usize, rule: &'static str },
    /// No comment found. `needs_break` is set when the file does not end in `\n`.
    Missing { needs_break: bool },
}

impl Classification {
    pub fn is_compliant(&self) -> bool {
        matches!(self, Classification::Compliant)
    }
}

/// Outcome of reading a file for classification
#[derive(Debug)]
pub enum Inspection {
    Classified(ClassifiedFile),
    /// The file was readable but is not text we will touch
    Skipped(DiscoveredFile, &'static str),
}

#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub file: DiscoveredFile,
    pub classification: Classification,
    /// Line break the file already uses, reused for anything written to it
    pub line_ending: &'static str,
}

/// A recognised malformed variant of a canonical comment
pub struct VariantRule {
    pub name: &'static str,
    pub matches: fn(window: &str, tail: &Tail<'_>, marker: &Marker) -> bool,
}

/// Variant rules, tried in order against each trailing window
pub const VARIANT_RULES: &[VariantRule] = &[
    VariantRule {
        name: "unterminated",
        matches: unterminated,
    },
    VariantRule {
        name: "stray-hyphen",
        matches: stray_hyphen,
    },
    VariantRule {
        name: "respaced",
        matches: respaced,
    },
    VariantRule {
        name: "spacing-dropped",
        matches: spacing_dropped,
    },
    VariantRule {
        name: "spacing-dropped-hyphen",
        matches: spacing_dropped_hyphen,
    },
];

// Only reached with two or more segments. A file that is nothing but the
// comment without a newline is Missing and gets the comment appended.
fn unterminated(window: &str, tail: &Tail<'_>, marker: &Marker) -> bool {
    !tail.terminated && window == marker.text()
}

fn stray_hyphen(window: &str, _: &Tail<'_>, marker: &Marker) -> bool {
    window.strip_prefix('-') == Some(marker.text())
}

/// Same tokens as the comment, different whitespace between them
fn respaced(window: &str, _: &Tail<'_>, marker: &Marker) -> bool {
    window != marker.text() && window.split_whitespace().eq(marker.text().split_whitespace())
}

fn spacing_dropped(window: &str, _: &Tail<'_>, marker: &Marker) -> bool {
    window == strip_whitespace(marker.text())
}

fn spacing_dropped_hyphen(window: &str, _: &Tail<'_>, marker: &Marker) -> bool {
    window
        .strip_prefix('-')
        .is_some_and(|rest| rest == strip_whitespace(marker.text()))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `"\r\n"` when the first line break in `content` is CRLF, `"\n"` otherwise
pub fn line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(i) if content[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// The lines of a file as seen by the classifier and the writer.
///
/// Content is split on `\n` and one trailing `\r` is stripped from each line.
/// A final empty segment (from a trailing newline) is dropped and recorded
/// as `terminated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tail<'a> {
    pub lines: Vec<&'a str>,
    pub terminated: bool,
    pub line_ending: &'static str,
}

impl<'a> Tail<'a> {
    /// `None` when the content has fewer than two `\n`-separated segments
    pub fn parse(content: &'a str) -> Option<Self> {
        let mut lines: Vec<&str> = content
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        if lines.len() < 2 {
            return None;
        }
        let terminated = lines.last().is_some_and(|l| l.is_empty());
        if terminated {
            lines.pop();
        }
        Some(Self {
            lines,
            terminated,
            line_ending: line_ending(content),
        })
    }

    /// Last `size` lines joined with `\n`, if the file has that many
    pub fn window(&self, size: usize) -> Option<String> {
        let start = self.lines.len().checked_sub(size)?;
        Some(self.lines[start..].join("\n"))
    }
}

/// Classify content against the marker for its extension
pub fn classify(content: &str, marker: &Marker) -> Classification {
    let missing = Classification::Missing {
        needs_break: !content.is_empty() && !content.ends_with('\n'),
    };

    let Some(tail) = Tail::parse(content) else {
        return missing;
    };

    let k = marker.line_count();
    if tail.terminated && tail.window(k).as_deref() == Some(marker.text()) {
        return Classification::Compliant;
    }

    for span in (1..=k).rev() {
        let Some(window) = tail.window(span) else {
            continue;
        };
        if let Some(rule) = VARIANT_RULES
            .iter()
            .find(|rule| (rule.matches)(&window, &tail, marker))
        {
            return Classification::RecoverableMismatch {
                span,
                rule: rule.name,
            };
        }
    }

    missing
}

/// Read an opened file to the end, release its handle, and classify it
pub fn classify_file(opened: OpenedFile, marker: &Marker) -> io::Result<Inspection> {
    let OpenedFile { file, mut handle } = opened;
    let mut bytes = vec![];
    handle.read_to_end(&mut bytes)?;
    drop(handle);

    if is_binary(&bytes) {
        return Ok(Inspection::Skipped(file, "binary"));
    }
    let Ok(content) = String::from_utf8(bytes) else {
        return Ok(Inspection::Skipped(file, "non-UTF-8"));
    };

    let classification = classify(&content, marker);
    Ok(Inspection::Classified(ClassifiedFile {
        file,
        classification,
        line_ending: line_ending(&content),
    }))
}
