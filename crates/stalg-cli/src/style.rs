//! Shared styling helpers for CLI output.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::cli::ColorMode;

/// Colours text when enabled, passes it through otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Resolves `auto` against whether stdout is a terminal.
    pub fn for_stdout(mode: ColorMode) -> Self {
        Self::new(match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        })
    }

    pub fn for_stderr() -> Self {
        Self::new(std::io::stderr().is_terminal())
    }

    pub fn success(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            format!("{}", text.green())
        } else {
            text.to_string()
        }
    }

    pub fn warning(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            format!("{}", text.yellow())
        } else {
            text.to_string()
        }
    }

    pub fn error(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            format!("{}", text.red())
        } else {
            text.to_string()
        }
    }

    pub fn accent(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            format!("{}", text.cyan())
        } else {
            text.to_string()
        }
    }

    pub fn dim(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            format!("{}", text.dimmed())
        } else {
            text.to_string()
        }
    }
}
