use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// Semantic colour of a diagnostic label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Success,
    Info,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Error => "\x1b[31m",   // Red
            Tone::Warning => "\x1b[33m", // Yellow
            Tone::Success => "\x1b[32m", // Green
            Tone::Info => "\x1b[36m",    // Cyan
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Wrap `text` in the tone's escape codes when colours are enabled
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", tone.code())
        } else {
            text.to_string()
        }
    }
}

/// Diagnostics go to stderr, so colour follows whether stderr is a terminal.
pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_colors_leave_text_alone() {
        assert_eq!(Colors::new(false).paint(Tone::Error, "Error:"), "Error:");
    }

    #[test]
    fn test_enabled_colors_wrap_and_reset() {
        let painted = Colors::new(true).paint(Tone::Success, "Appended:");
        assert_eq!(painted, "\x1b[32mAppended:\x1b[0m");
    }

    #[test]
    fn test_no_color_beats_force() {
        assert!(!should_use_colors(true, true));
        assert!(should_use_colors(true, false));
    }
}
