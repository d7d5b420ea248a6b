//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides trivia-skipping lookahead and consumption operations.

use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub(crate) struct Source<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    cursor: usize,
    last_end: TextSize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a new source from tokens and source text.
    pub(crate) fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            tokens,
            source,
            cursor: 0,
            last_end: TextSize::from(0),
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub(crate) fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub(crate) fn current_token(&self) -> Option<&'t Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead.
    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n).map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub(crate) fn peek_token_n(&self, n: usize) -> Option<&'t Token> {
        let mut non_trivia_seen = 0;

        for token in self.tokens.get(self.cursor..)? {
            if token.kind == TokenKind::Eof {
                return None;
            }
            if !token.kind.is_trivia() {
                if non_trivia_seen == n {
                    return Some(token);
                }
                non_trivia_seen += 1;
            }
        }

        None
    }

    /// Advances past the current token and returns it.
    pub(crate) fn bump(&mut self) -> Option<Token> {
        while let Some(token) = self.tokens.get(self.cursor) {
            if token.kind == TokenKind::Eof {
                return None;
            }
            self.cursor += 1;
            if !token.kind.is_trivia() {
                self.last_end = token.range.end();
                return Some(*token);
            }
        }
        None
    }

    /// Returns `true` if at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Raw position in the token vector, used to detect lack of progress.
    pub(crate) fn position(&self) -> usize {
        self.cursor
    }

    /// End offset of the last consumed non-trivia token.
    pub(crate) fn last_end(&self) -> TextSize {
        self.last_end
    }

    /// Start offset of the current token, or the end of input.
    pub(crate) fn current_start(&self) -> TextSize {
        self.current_range().start()
    }

    /// Range of the current token, or an empty range at the end of input.
    pub(crate) fn current_range(&self) -> TextRange {
        self.current_token()
            .map_or_else(|| TextRange::empty(self.end_offset()), |t| t.range)
    }

    fn end_offset(&self) -> TextSize {
        let text_end = TextSize::from(u32::try_from(self.source.len()).unwrap_or(u32::MAX));
        self.tokens
            .iter()
            .rev()
            .find(|t| t.kind != TokenKind::Eof)
            .map_or(text_end, |t| t.range.end().max(self.last_end))
    }

    /// Returns the text of the given token.
    pub(crate) fn text(&self, token: &Token) -> &'src str {
        token.text(self.source)
    }

    /// Returns the source text covered by `range`.
    pub(crate) fn slice(&self, range: TextRange) -> &'src str {
        self.source
            .get(usize::from(range.start())..usize::from(range.end()))
            .unwrap_or("")
    }

    /// Returns the text of the current token.
    pub(crate) fn current_text(&self) -> &'src str {
        self.current_token().map_or("", |t| t.text(self.source))
    }

    /// Returns true if the next `n + 1` non-trivia tokens touch each other.
    pub(crate) fn adjacent_n(&self, n: usize) -> bool {
        let mut previous: Option<&Token> = None;
        for i in 0..=n {
            let Some(token) = self.peek_token_n(i) else {
                return false;
            };
            if let Some(prev) = previous {
                if prev.range.end() != token.range.start() {
                    return false;
                }
            }
            previous = Some(token);
        }
        true
    }

    /// Returns true if there is a top-level colon before statement end.
    pub(crate) fn has_case_label_ahead(&self) -> bool {
        let mut paren_depth = 0u32;
        let mut bracket_depth = 0u32;

        for token in self.tokens.get(self.cursor..).unwrap_or(&[]) {
            if token.kind.is_trivia() {
                continue;
            }

            match token.kind {
                TokenKind::LParen => paren_depth += 1,
                TokenKind::RParen => paren_depth = paren_depth.saturating_sub(1),
                TokenKind::LBracket => bracket_depth += 1,
                TokenKind::RBracket => bracket_depth = bracket_depth.saturating_sub(1),
                TokenKind::Colon if paren_depth == 0 && bracket_depth == 0 => return true,
                TokenKind::Eof => return false,
                TokenKind::Semicolon
                | TokenKind::Assign
                | TokenKind::KwThen
                | TokenKind::KwDo
                | TokenKind::KwOf
                | TokenKind::KwElse
                | TokenKind::KwElsif
                | TokenKind::KwEndIf
                | TokenKind::KwEndCase
                | TokenKind::KwEndFor
                | TokenKind::KwEndWhile
                | TokenKind::KwEndRepeat
                | TokenKind::KwEndAlgorithm
                | TokenKind::KwEndMethod
                    if paren_depth == 0 && bracket_depth == 0 =>
                {
                    return false;
                }
                _ => {}
            }
        }

        false
    }
}
