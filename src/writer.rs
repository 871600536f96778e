//! Appending or repairing end-of-file comments on disk.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::classify::{Classification, ClassifiedFile, Tail};
use crate::comments::Marker;

/// How a repaired comment is laid out.
///
/// Applied identically for every extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairPolicy {
    /// Insert one blank line before a repaired comment (unless already present)
    pub blank_line_before: bool,
}

/// What the writer did to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Untouched,
    Appended,
    Repaired { rule: &'static str },
}

/// Bring one classified file into compliance.
///
/// Compliant files are never opened for writing.
pub fn write_fix(
    classified: &ClassifiedFile,
    marker: &Marker,
    policy: RepairPolicy,
) -> io::Result<Outcome> {
    let path = &classified.file.path;
    match classified.classification {
        Classification::Compliant => Ok(Outcome::Untouched),
        Classification::Missing { needs_break } => {
            append_comment(path, marker, needs_break, classified.line_ending)?;
            Ok(Outcome::Appended)
        }
        Classification::RecoverableMismatch { span, rule } => {
            let content = fs::read_to_string(path)?;
            let repaired = repair_content(&content, span, marker, policy)?;
            fs::write(path, repaired)?;
            Ok(Outcome::Repaired { rule })
        }
    }
}

fn append_comment(
    path: &Path,
    marker: &Marker,
    needs_break: bool,
    line_ending: &str,
) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    let mut text = String::new();
    if needs_break {
        text.push_str(line_ending);
    }
    text.push_str(&marker.lines().join(line_ending));
    text.push_str(line_ending);
    file.write_all(text.as_bytes())
}

/// Replace the last `span` lines of `content` with the canonical comment.
///
/// The result keeps the line ending of the original content.
pub fn repair_content(
    content: &str,
    span: usize,
    marker: &Marker,
    policy: RepairPolicy,
) -> io::Result<String> {
    let tail = Tail::parse(content).ok_or_else(|| stale(span))?;
    let keep = tail.lines.len().checked_sub(span).ok_or_else(|| stale(span))?;

    let mut lines: Vec<&str> = tail.lines[..keep].to_vec();
    if policy.blank_line_before && lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push("");
    }
    lines.extend_from_slice(marker.lines());

    let mut repaired = lines.join(tail.line_ending);
    repaired.push_str(tail.line_ending);
    Ok(repaired)
}

fn stale(span: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("file changed since it was checked (expected at least {span} lines)"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, line_ending};
    use crate::comments::CommentTable;
    use crate::walker::DiscoveredFile;
    use tempfile::TempDir;

    const LUA: &str = "-- vim:ts=2:sts=2:sw=2:et:ai:si:sta:";

    fn marker(ext: &str) -> &'static Marker {
        CommentTable::builtin().get(ext).unwrap()
    }

    fn classified(path: &Path, ext: &str) -> ClassifiedFile {
        let content = fs::read_to_string(path).unwrap();
        ClassifiedFile {
            file: DiscoveredFile {
                path: path.to_path_buf(),
                ext: ext.to_string(),
            },
            classification: classify(&content, marker(ext)),
            line_ending: line_ending(&content),
        }
    }

    #[test]
    fn test_append_preserves_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, "local a = 1\nreturn a\n").unwrap();

        let outcome = write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default());

        assert_eq!(outcome.unwrap(), Outcome::Appended);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("local a = 1\nreturn a\n{LUA}\n")
        );
    }

    #[test]
    fn test_append_adds_missing_line_break() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, "return 1").unwrap();

        write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("return 1\n{LUA}\n")
        );
    }

    #[test]
    fn test_append_to_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.lua");
        fs::write(&path, "").unwrap();

        write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{LUA}\n"));
    }

    #[test]
    fn test_repair_replaces_mangled_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, "return 1\n---vim:ts=2:sts=2:sw=2:et:ai:si:sta:\n").unwrap();

        let outcome =
            write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(
            outcome,
            Outcome::Repaired {
                rule: "spacing-dropped-hyphen"
            }
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("return 1\n{LUA}\n")
        );
    }

    #[test]
    fn test_compliant_file_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, format!("return 1\n{LUA}\n")).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome =
            write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(outcome, Outcome::Untouched);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_repair_with_blank_line_policy() {
        let policy = RepairPolicy {
            blank_line_before: true,
        };
        let repaired = repair_content(
            "return 1\n-- vim:ts=2:sts=2:sw=2:et:ai:si:sta:",
            1,
            marker("lua"),
            policy,
        )
        .unwrap();
        assert_eq!(repaired, format!("return 1\n\n{LUA}\n"));
    }

    #[test]
    fn test_blank_line_policy_does_not_stack() {
        let policy = RepairPolicy {
            blank_line_before: true,
        };
        let repaired = repair_content(
            "return 1\n\n-- vim:ts=2:sts=2:sw=2:et:ai:si:sta:",
            1,
            marker("lua"),
            policy,
        )
        .unwrap();
        assert_eq!(repaired, format!("return 1\n\n{LUA}\n"));
    }

    #[test]
    fn test_repair_multiline_marker() {
        let repaired = repair_content(
            "# Doc\n<!--\nvim:ts=2:sts=2:sw=2:et:ai:si:sta:\n-->",
            3,
            marker("md"),
            RepairPolicy::default(),
        )
        .unwrap();
        assert_eq!(
            repaired,
            "# Doc\n<!--\nvim:ts=2:sts=2:sw=2:et:ai:si:sta:\n-->\n"
        );
    }

    #[test]
    fn test_repair_of_shrunk_file_is_an_error() {
        let err = repair_content("x\n", 3, marker("md"), RepairPolicy::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_repair_keeps_crlf_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, "local a = 1\r\nreturn a\r\n-- vim:ts=2:sts=2:sw=2:et:ai:si:sta:").unwrap();

        let outcome =
            write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(outcome, Outcome::Repaired { rule: "unterminated" });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("local a = 1\r\nreturn a\r\n{LUA}\r\n")
        );
    }

    #[test]
    fn test_append_keeps_crlf_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        fs::write(&path, "# Title\r\nbody").unwrap();

        write_fix(&classified(&path, "md"), marker("md"), RepairPolicy::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Title\r\nbody\r\n<!--\r\nvim:ts=2:sts=2:sw=2:et:ai:si:sta:\r\n-->\r\n"
        );
    }

    #[test]
    fn test_compliant_crlf_file_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("init.lua");
        fs::write(&path, format!("return 1\r\n{LUA}\r\n")).unwrap();

        let outcome =
            write_fix(&classified(&path, "lua"), marker("lua"), RepairPolicy::default()).unwrap();

        assert_eq!(outcome, Outcome::Untouched);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("return 1\r\n{LUA}\r\n")
        );
    }
}
