//! Diagnostic types for syntax errors.
//!
//! Every entry point returns its diagnostics alongside the tree. Diagnostics
//! are data: nothing here prints or aborts.

use serde::Serialize;
use smol_str::SmolStr;
use text_size::TextRange;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Error - the input is not valid ST.
    Error,
    /// Warning - accepted, but suspicious.
    Warning,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A diagnostic code identifying the type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// An expected token or production was not found.
    SyntaxError,
    /// A typed literal's prefix disagrees with its value.
    MalformedLiteral,
    /// The token stream ended in the middle of a construct.
    UnexpectedEndOfStream,
}

impl DiagnosticCode {
    /// Returns the string code (e.g., "E001").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SyntaxError => "E001",
            Self::MalformedLiteral => "E002",
            Self::UnexpectedEndOfStream => "E003",
        }
    }

    /// Returns the default severity for this diagnostic code.
    #[must_use]
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            Self::SyntaxError | Self::MalformedLiteral | Self::UnexpectedEndOfStream => {
                DiagnosticSeverity::Error
            }
        }
    }
}

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: DiagnosticSeverity,
    /// The source range where the diagnostic applies.
    pub range: TextRange,
    /// The diagnostic message.
    pub message: String,
    /// The token or production the parser was looking for, if any.
    pub expected: Option<SmolStr>,
}

impl Diagnostic {
    /// Creates a new diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            range,
            message: message.into(),
            expected: None,
        }
    }

    /// Attaches an expected-token hint.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<SmolStr>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Returns true if this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: {} (at {}..{})",
            self.severity,
            self.code.code(),
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Builder for collecting diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticBuilder {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Consumes the builder and returns the diagnostics in source order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Diagnostic> {
        // Stable: equal offsets keep the order they were reported in.
        self.diagnostics.sort_by_key(|d| d.range.start());
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::new(
            DiagnosticCode::MalformedLiteral,
            TextRange::new(10.into(), 15.into()),
            "expected a string after STRING#",
        );

        assert!(diag.is_error());
        assert_eq!(diag.code.code(), "E002");
        assert_eq!(diag.expected, None);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            DiagnosticCode::SyntaxError,
            TextRange::new(3.into(), 4.into()),
            "expected ';'",
        )
        .with_expected(";");

        assert_eq!(diag.to_string(), "error[E001]: expected ';' (at 3..4)");
        assert_eq!(diag.expected.as_deref(), Some(";"));
    }

    #[test]
    fn test_diagnostic_builder_orders_by_offset() {
        let mut builder = DiagnosticBuilder::new();

        builder.add(Diagnostic::new(
            DiagnosticCode::SyntaxError,
            TextRange::new(20.into(), 25.into()),
            "second",
        ));
        builder.add(Diagnostic::new(
            DiagnosticCode::MalformedLiteral,
            TextRange::new(0.into(), 10.into()),
            "first",
        ));
        builder.add(Diagnostic::new(
            DiagnosticCode::UnexpectedEndOfStream,
            TextRange::new(20.into(), 20.into()),
            "third",
        ));

        let diagnostics = builder.finish();
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert!(diagnostics.iter().all(Diagnostic::is_error));
    }
}
