//! Parser state and the helpers shared by all grammar functions.

use text_size::{TextRange, TextSize};

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::lexer::{Token, TokenKind};
use crate::parser::source::Source;

/// Why a grammar function gave up.
///
/// The diagnostic has already been recorded when an `Abort` is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Abort {
    /// Recoverable: the caller skips to a synchronization point.
    Syntax,
    /// The stream ended mid-construct; the whole parse call fails.
    EndOfStream,
    /// The input nests deeper than [`MAX_NESTING`]; the whole parse call
    /// fails.
    TooDeep,
}

pub(crate) type PResult<T> = Result<T, Abort>;

/// Deepest nesting of parentheses, brackets, unary operators, calls,
/// initializers, `REF_TO` types and block statements the parser descends
/// into. Bounds the recursion depth, and with it the stack.
pub(crate) const MAX_NESTING: u32 = 128;

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    pub(crate) source: Source<'t, 'src>,
    diagnostics: DiagnosticBuilder,
    depth: u32,
}

fn quote(expected: &str) -> String {
    if expected
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '_' || c == ' ')
    {
        expected.to_string()
    } else {
        format!("'{expected}'")
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    pub(crate) fn new(tokens: &'t [Token], text: &'src str) -> Self {
        Self {
            source: Source::new(tokens, text),
            diagnostics: DiagnosticBuilder::new(),
            depth: 0,
        }
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics.finish()
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    /// Consumes the current token. At end of input this returns an empty
    /// `Eof` token and consumes nothing.
    pub(crate) fn bump(&mut self) -> Token {
        let range = self.source.current_range();
        self.source
            .bump()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, range))
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    pub(crate) fn text(&self, token: &Token) -> &'src str {
        self.source.text(token)
    }

    /// Start offset for a node beginning at the current token.
    pub(crate) fn start(&self) -> TextSize {
        self.source.current_start()
    }

    /// Range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.source.last_end().max(start))
    }

    /// Runs `rule` one nesting level deeper. Past [`MAX_NESTING`] the
    /// construct at the current token is reported and the parse call fails.
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        rule: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            self.error(format!("{what} nested too deeply"));
            return Err(Abort::TooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Records a syntax error at the current token.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.source.current_range();
        self.diagnostics
            .add(Diagnostic::new(DiagnosticCode::SyntaxError, range, message));
    }

    /// Records a syntax error with an expected-token hint at the current token.
    pub(crate) fn error_expected(&mut self, expected: &str) {
        let range = self.source.current_range();
        self.diagnostics.add(
            Diagnostic::new(
                DiagnosticCode::SyntaxError,
                range,
                format!("expected {}", quote(expected)),
            )
            .with_expected(expected),
        );
    }

    /// Records a diagnostic with an explicit code and range.
    pub(crate) fn report(&mut self, code: DiagnosticCode, range: TextRange, message: impl Into<String>) {
        self.diagnostics.add(Diagnostic::new(code, range, message));
    }

    /// Records why the current production cannot continue and returns the
    /// matching abort. Running out of tokens is reported as end of stream.
    pub(crate) fn fail(&mut self, expected: &str) -> Abort {
        let message = format!("expected {}", quote(expected));
        let range = self.source.current_range();
        if self.at_end() {
            self.diagnostics.add(
                Diagnostic::new(
                    DiagnosticCode::UnexpectedEndOfStream,
                    range,
                    format!("{message}, found end of input"),
                )
                .with_expected(expected),
            );
            Abort::EndOfStream
        } else {
            let found = self.source.current_text();
            self.diagnostics.add(
                Diagnostic::new(
                    DiagnosticCode::SyntaxError,
                    range,
                    format!("{message}, found '{found}'"),
                )
                .with_expected(expected),
            );
            Abort::Syntax
        }
    }

    /// Consumes a token of the given kind or fails.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, Abort> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.fail(expected))
        }
    }

    /// Consumes the keyword closing a block statement. A missing keyword is
    /// reported and the statement is kept, unless the input has run out.
    pub(crate) fn expect_block_end(&mut self, kind: TokenKind, expected: &str) -> PResult<()> {
        if self.eat(kind).is_some() {
            return Ok(());
        }
        if self.at_end() {
            return Err(self.fail(expected));
        }
        self.error_expected(expected);
        Ok(())
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Returns true if the current token is a synchronization point.
    pub(crate) fn is_sync_point(&self) -> bool {
        matches!(
            self.current(),
            // Statement terminators
            TokenKind::Semicolon
            // Control flow continuations and ends
            | TokenKind::KwElsif
            | TokenKind::KwElse
            | TokenKind::KwEndIf
            | TokenKind::KwEndCase
            | TokenKind::KwEndFor
            | TokenKind::KwEndWhile
            | TokenKind::KwUntil
            | TokenKind::KwEndRepeat
            // Blocks and units
            | TokenKind::KwEndVar
            | TokenKind::KwEndAlgorithm
            | TokenKind::KwEndMethod
            | TokenKind::KwAlgorithm
            | TokenKind::KwMethod
            // Variable blocks
            | TokenKind::KwVar
            | TokenKind::KwVarTemp
            | TokenKind::KwVarInput
            | TokenKind::KwVarOutput
            | TokenKind::KwVarInOut
        )
    }

    /// Returns true when a statement list should stop for recovery.
    pub(crate) fn at_stmt_list_end(&self) -> bool {
        self.is_sync_point() && !self.at(TokenKind::Semicolon)
    }

    /// Returns true where a new statement clearly begins: a statement
    /// keyword, or a name followed by `:=`, `.`, `[`, `(` or `::`. A bare
    /// name does not count; it may be the rest of a broken statement.
    pub(crate) fn at_statement_start(&self) -> bool {
        match self.current() {
            kind if kind.is_statement_keyword() => true,
            TokenKind::Ident | TokenKind::KwThis | TokenKind::KwSuper => matches!(
                self.peek_kind_n(1),
                TokenKind::Assign
                    | TokenKind::Dot
                    | TokenKind::LBracket
                    | TokenKind::LParen
                    | TokenKind::ColonColon
            ),
            _ => false,
        }
    }

    /// Returns true at the first label of the next `CASE` arm.
    pub(crate) fn at_case_label(&self) -> bool {
        self.current().can_start_expr() && self.source.has_case_label_ahead()
    }

    /// Skips the rest of a malformed statement: up to and including its
    /// `;`, or up to a sync point or statement keyword.
    pub(crate) fn recover_statement(&mut self) {
        let mut skipped = 0usize;
        while !self.at_end() {
            if self.at(TokenKind::Semicolon) {
                self.bump();
                skipped += 1;
                break;
            }
            if self.is_sync_point() || self.current().is_statement_keyword() {
                break;
            }
            self.bump();
            skipped += 1;
        }
        tracing::trace!(skipped, "recovered at statement boundary");
    }

    /// Consume a statement terminator, or insert it when unambiguous.
    pub(crate) fn expect_semicolon(&mut self) {
        if self.eat(TokenKind::Semicolon).is_some() {
            return;
        }

        self.error_expected(";");
        if !self.at_semicolon_insertion_point() {
            self.recover_statement();
        }
    }

    fn at_semicolon_insertion_point(&self) -> bool {
        self.at_end()
            || self.is_sync_point()
            || self.at_statement_start()
            || self.at_case_label()
    }

    /// Reports trailing tokens after a complete root construct and drops them.
    pub(crate) fn expect_end_of_input(&mut self) {
        if self.at_end() {
            return;
        }
        let start = self.start();
        let found = self.source.current_text().to_string();
        while !self.at_end() {
            self.bump();
        }
        self.diagnostics.add(
            Diagnostic::new(
                DiagnosticCode::SyntaxError,
                self.range_from(start),
                format!("expected end of input, found '{found}'"),
            )
            .with_expected("end of input"),
        );
    }
}
