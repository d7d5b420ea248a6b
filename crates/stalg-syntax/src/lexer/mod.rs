//! Lexer for IEC 61131-3 Structured Text algorithm and method bodies.
//!
//! This module tokenizes ST source into a stream of tokens with their
//! positions in the source text. Trivia is kept in the stream; the parser's
//! token source skips it.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the token text within `source`.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(usize::from(self.range.start())..usize::from(self.range.end()))
            .unwrap_or("")
    }
}

fn text_range(span: std::ops::Range<usize>) -> TextRange {
    TextRange::new(
        TextSize::from(span.start as u32),
        TextSize::from(span.end as u32),
    )
}

/// Lexer for Structured Text source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    pending: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let kind = self.inner.next()?;
        let span = self.inner.span();
        let kind = kind.unwrap_or(TokenKind::Error);

        // `1..10` may come back as an integer swallowing the first dot.
        if kind == TokenKind::IntLiteral {
            let text = &self.source[span.start..span.end];
            if text.ends_with('.') && span.end > span.start + 1 {
                let dot_start = span.end - 1;
                self.pending.push_back(Token::new(
                    TokenKind::IntLiteral,
                    text_range(span.start..dot_start),
                ));

                if let Some(next_kind) = self.inner.next() {
                    let next_span = self.inner.span();
                    let next_kind = next_kind.unwrap_or(TokenKind::Error);
                    if next_kind == TokenKind::Dot && next_span.start == span.end {
                        self.pending.push_back(Token::new(
                            TokenKind::DotDot,
                            text_range(dot_start..next_span.end),
                        ));
                    } else {
                        self.pending
                            .push_back(Token::new(TokenKind::Dot, text_range(dot_start..span.end)));
                        self.pending
                            .push_back(Token::new(next_kind, text_range(next_span)));
                    }
                } else {
                    self.pending
                        .push_back(Token::new(TokenKind::Dot, text_range(dot_start..span.end)));
                }

                return self.pending.pop_front();
            }
        }

        Some(Token::new(kind, text_range(span)))
    }
}

/// Lex the entire source and return all tokens, trivia included.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    tracing::trace!(count = tokens.len(), "lexed source");
    tokens
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| (token, token.text(source)))
        .collect()
}
