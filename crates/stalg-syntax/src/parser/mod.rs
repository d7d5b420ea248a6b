//! Parser for algorithm and method bodies.
//!
//! This module provides a hand-written recursive descent parser that builds
//! the typed AST in [`crate::ast`] directly from a token stream.
//!
//! # Design
//!
//! - **Error-tolerant**: syntax errors are recorded and parsing resumes at the
//!   next statement or declaration boundary
//! - **Pure**: every entry point owns its state, so independent parses can run
//!   on separate threads
//! - **Bounded lookahead**: decisions peek a fixed number of tokens; the only
//!   scan is the case-label check, which never crosses a statement end
//!
//! Every entry point returns a [`Parse`] holding the tree (absent only when
//! the input ended mid-construct) and all diagnostics.

#![allow(clippy::module_inception)]

mod grammar;
mod parser;
mod source;

use crate::ast::{Algorithm, Expr, InitializerSource, Method, SourceFile, StatementSource};
use crate::diagnostics::Diagnostic;
use crate::lexer::{lex, Token};
use parser::{PResult, Parser};

/// Tokens to parse together with the text they were lexed from.
///
/// Built from a `&str` (lexed here) or from an already lexed token vector.
/// Trivia tokens are skipped; an `Eof` token, if present, ends the stream.
#[derive(Debug, Clone)]
pub struct TokenStream<'src> {
    tokens: Vec<Token>,
    text: &'src str,
}

impl<'src> TokenStream<'src> {
    /// Wraps tokens lexed elsewhere.
    #[must_use]
    pub fn new(tokens: Vec<Token>, text: &'src str) -> Self {
        Self { tokens, text }
    }

    /// The tokens, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The source text.
    #[must_use]
    pub fn text(&self) -> &'src str {
        self.text
    }
}

impl<'src> From<&'src str> for TokenStream<'src> {
    fn from(text: &'src str) -> Self {
        Self::new(lex(text), text)
    }
}

impl<'src> From<(Vec<Token>, &'src str)> for TokenStream<'src> {
    fn from((tokens, text): (Vec<Token>, &'src str)) -> Self {
        Self::new(tokens, text)
    }
}

/// Result of parsing: an optional tree plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Parse<T> {
    tree: Option<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Parse<T> {
    /// Returns the tree, absent when the input ended mid-construct.
    #[must_use]
    pub fn tree(&self) -> Option<&T> {
        self.tree.as_ref()
    }

    /// Returns all diagnostics in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if a tree was produced and no errors were reported.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.tree.is_some() && !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Splits into the tree and the diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        (self.tree, self.diagnostics)
    }

    /// Returns the tree if parsing succeeded without errors.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailed`] carrying every diagnostic when the tree is
    /// missing or any error was reported.
    pub fn into_result(self) -> Result<T, ParseFailed> {
        match self.tree {
            Some(tree) if !self.diagnostics.iter().any(Diagnostic::is_error) => Ok(tree),
            _ => Err(ParseFailed {
                diagnostics: self.diagnostics,
            }),
        }
    }
}

/// A parse that produced errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parsing failed with {} diagnostic(s)", .diagnostics.len())]
pub struct ParseFailed {
    /// Every diagnostic of the failed parse.
    pub diagnostics: Vec<Diagnostic>,
}

fn run<'src, T>(
    input: impl Into<TokenStream<'src>>,
    entry: &'static str,
    rule: impl FnOnce(&mut Parser<'_, 'src>) -> PResult<T>,
) -> Parse<T> {
    let stream = input.into();
    let mut parser = Parser::new(&stream.tokens, stream.text);
    let tree = rule(&mut parser).ok();
    let diagnostics = parser.finish();

    tracing::debug!(
        entry,
        tokens = stream.tokens.len(),
        tree = tree.is_some(),
        diagnostics = diagnostics.len(),
        "parse finished"
    );
    Parse { tree, diagnostics }
}

/// Parses a single `ALGORITHM ... END_ALGORITHM` unit.
pub fn parse_algorithm<'src>(input: impl Into<TokenStream<'src>>) -> Parse<Algorithm> {
    run(input, "algorithm", |p| p.algorithm_root())
}

/// Parses a single `METHOD ... END_METHOD` unit.
pub fn parse_method<'src>(input: impl Into<TokenStream<'src>>) -> Parse<Method> {
    run(input, "method", |p| p.method_root())
}

/// Parses an expression, optionally followed by `;`.
pub fn parse_expression_source<'src>(input: impl Into<TokenStream<'src>>) -> Parse<Expr> {
    run(input, "expression", |p| p.expression_root())
}

/// Parses `[name :=] initializer [;]`.
pub fn parse_initializer_expression_source<'src>(
    input: impl Into<TokenStream<'src>>,
) -> Parse<InitializerSource> {
    run(input, "initializer", |p| p.initializer_root())
}

/// Parses a file holding any number of `ALGORITHM` and `METHOD` units.
pub fn parse_source<'src>(input: impl Into<TokenStream<'src>>) -> Parse<SourceFile> {
    let parse = run(input, "source", |p| p.source_file());
    if let Some(file) = parse.tree() {
        tracing::debug!(units = file.units.len(), "parsed source file");
    }
    parse
}

/// Parses a bare statement list.
pub fn parse_statements<'src>(input: impl Into<TokenStream<'src>>) -> Parse<StatementSource> {
    run(input, "statements", |p| p.statement_root())
}
