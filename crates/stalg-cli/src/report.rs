//! Rendering diagnostics with file positions.

use std::path::Path;

use serde::Serialize;
use stalg_syntax::{Diagnostic, DiagnosticSeverity};
use text_size::TextSize;

use crate::style::Palette;

/// Maps byte offsets to 1-based line and column numbers.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(index, _)| index + 1));
        Self { text, line_starts }
    }

    /// Line and column of `offset`. Columns count characters.
    pub fn line_col(&self, offset: TextSize) -> (usize, usize) {
        let offset = usize::from(offset).min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self
            .text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line + 1, column + 1)
    }
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    path: String,
    line: usize,
    column: usize,
    start: u32,
    end: u32,
    code: &'static str,
    severity: DiagnosticSeverity,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<&'a str>,
}

/// `path:line:col: error[E001]: message`, one line per diagnostic, at most
/// `limit` of them followed by a count of the rest.
pub fn render_text(
    path: &Path,
    text: &str,
    diagnostics: &[Diagnostic],
    limit: usize,
    palette: Palette,
) -> String {
    let index = LineIndex::new(text);
    let mut out = String::new();

    for diagnostic in diagnostics.iter().take(limit) {
        let (line, column) = index.line_col(diagnostic.range.start());
        let location = format!("{}:{line}:{column}:", path.display());
        let label = format!("{}[{}]:", diagnostic.severity, diagnostic.code.code());
        let label = match diagnostic.severity {
            DiagnosticSeverity::Error => palette.error(label),
            DiagnosticSeverity::Warning => palette.warning(label),
        };
        out.push_str(&format!(
            "{} {label} {}\n",
            palette.accent(location),
            diagnostic.message
        ));
    }

    let hidden = diagnostics.len().saturating_sub(limit);
    if hidden > 0 {
        out.push_str(&palette.dim(format!(
            "{}: {hidden} more diagnostic(s) not shown",
            path.display()
        )));
        out.push('\n');
    }
    out
}

/// One JSON object per line, at most `limit` of them.
pub fn render_json(
    path: &Path,
    text: &str,
    diagnostics: &[Diagnostic],
    limit: usize,
) -> serde_json::Result<String> {
    let index = LineIndex::new(text);
    let mut out = String::new();

    for diagnostic in diagnostics.iter().take(limit) {
        let (line, column) = index.line_col(diagnostic.range.start());
        let record = JsonDiagnostic {
            path: path.display().to_string(),
            line,
            column,
            start: diagnostic.range.start().into(),
            end: diagnostic.range.end().into(),
            code: diagnostic.code.code(),
            severity: diagnostic.severity,
            message: &diagnostic.message,
            expected: diagnostic.expected.as_deref(),
        };
        out.push_str(&serde_json::to_string(&record)?);
        out.push('\n');
    }
    Ok(out)
}
