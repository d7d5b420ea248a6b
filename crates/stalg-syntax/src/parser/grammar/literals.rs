//! Literal parsing.
//!
//! Single-token literals come straight from the lexer. Typed literals are a
//! `NAME#` prefix token followed by an optionally signed value token; the
//! prefix is checked against the value's shape here.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::ast::{Literal, LiteralKind, Name};
use crate::diagnostics::DiagnosticCode;
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::{PResult, Parser};

/// What a `NAME#` prefix promises about the value that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefixClass {
    Bool,
    Integer,
    Real,
    String,
    WideString,
    Duration,
    Date,
    TimeOfDay,
    DateAndTime,
    Unknown,
}

impl PrefixClass {
    fn of(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BOOL" => Self::Bool,
            "SINT" | "INT" | "DINT" | "LINT" | "USINT" | "UINT" | "UDINT" | "ULINT" | "BYTE"
            | "WORD" | "DWORD" | "LWORD" => Self::Integer,
            "REAL" | "LREAL" => Self::Real,
            "STRING" | "CHAR" => Self::String,
            "WSTRING" | "WCHAR" => Self::WideString,
            "T" | "TIME" | "LT" | "LTIME" => Self::Duration,
            "D" | "DATE" | "LD" | "LDATE" => Self::Date,
            "TOD" | "TIME_OF_DAY" | "LTOD" | "LTIME_OF_DAY" => Self::TimeOfDay,
            "DT" | "DATE_AND_TIME" | "LDT" | "LDATE_AND_TIME" => Self::DateAndTime,
            _ => Self::Unknown,
        }
    }

    /// Checks a value of shape `kind`, written with or without a sign.
    fn accepts(self, kind: LiteralKind, signed: bool) -> Result<(), &'static str> {
        use LiteralKind as K;
        match (self, kind) {
            (Self::Unknown, _) => Err("unknown literal type prefix"),
            (_, K::NonDecimal) if signed => Err("non-decimal literals cannot carry a sign"),
            (Self::Bool, K::Bool | K::Integer | K::NonDecimal)
            | (Self::Integer, K::Integer | K::NonDecimal)
            | (Self::Real, K::Integer | K::Real | K::NonDecimal) => Ok(()),
            (Self::Integer | Self::Real, K::Bool) => Err("boolean values need a BOOL prefix"),
            (Self::Integer | Self::Bool, K::Real) => Err("real value under an integer prefix"),
            (Self::String, K::String) | (Self::WideString, K::WideString) if !signed => Ok(()),
            (Self::String, _) => Err("expected a single-quoted string"),
            (Self::WideString, _) => Err("expected a double-quoted string"),
            (Self::Duration, _) => Err("expected a duration such as T#1h30m"),
            (Self::Date, _) => Err("expected a date such as D#2024-01-15"),
            (Self::TimeOfDay, _) => Err("expected a time of day such as TOD#12:30:00"),
            (Self::DateAndTime, _) => Err("expected a date and time such as DT#2024-01-15-12:30:00"),
            (Self::Bool | Self::Integer | Self::Real, _) => Err("expected a numeric value"),
        }
    }
}

/// Shape of a single-token literal.
fn token_literal_kind(kind: TokenKind) -> Option<LiteralKind> {
    Some(match kind {
        TokenKind::KwTrue | TokenKind::KwFalse => LiteralKind::Bool,
        TokenKind::IntLiteral => LiteralKind::Integer,
        TokenKind::NonDecimalLiteral => LiteralKind::NonDecimal,
        TokenKind::RealLiteral => LiteralKind::Real,
        TokenKind::StringLiteral => LiteralKind::String,
        TokenKind::WideStringLiteral => LiteralKind::WideString,
        TokenKind::TimeLiteral => LiteralKind::Duration,
        TokenKind::DateLiteral => LiteralKind::Date,
        TokenKind::TimeOfDayLiteral => LiteralKind::TimeOfDay,
        TokenKind::DateAndTimeLiteral => LiteralKind::DateAndTime,
        _ => return None,
    })
}

/// Decodes `$` escapes in a quoted string, dropping the quotes.
pub(crate) fn decode_string(text: &str, wide: bool) -> String {
    let inner = text
        .get(1..text.len().saturating_sub(1))
        .unwrap_or_default();
    let hex_len = if wide { 4 } else { 2 };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('L' | 'l' | 'N' | 'n') => out.push('\n'),
            Some('P' | 'p') => out.push('\x0C'),
            Some('R' | 'r') => out.push('\r'),
            Some('T' | 't') => out.push('\t'),
            Some(c @ ('$' | '\'' | '"')) => out.push(c),
            Some(first) if first.is_ascii_hexdigit() => {
                let mut digits = String::from(first);
                while digits.len() < hex_len {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            digits.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.push(decoded);
            }
            Some(other) => {
                out.push('$');
                out.push(other);
            }
            None => out.push('$'),
        }
    }

    out
}

fn strip_separators(text: &str) -> String {
    text.replace('_', "")
}

impl<'t, 'src> Parser<'t, 'src> {
    /// True when the current `NAME#` prefix names an elementary type.
    pub(crate) fn at_elementary_prefix(&self) -> bool {
        self.at(TokenKind::TypedLiteralPrefix)
            && PrefixClass::of(self.source.current_text().trim_end_matches('#'))
                != PrefixClass::Unknown
    }

    /// Parses a literal at the current token.
    pub(crate) fn literal(&mut self) -> PResult<Literal> {
        match self.current() {
            TokenKind::TypedLiteralPrefix => self.typed_literal(),
            TokenKind::IntLiteral if self.at_bare_time_of_day() => Ok(self.bare_time_of_day()),
            kind => match token_literal_kind(kind) {
                Some(literal_kind) => {
                    let token = self.bump();
                    Ok(self.single_token_literal(literal_kind, &token))
                }
                None => Err(self.fail("literal")),
            },
        }
    }

    fn single_token_literal(&self, kind: LiteralKind, token: &Token) -> Literal {
        let text = self.text(token);
        let (type_prefix, value) = match kind {
            LiteralKind::Bool => (None, text.to_ascii_uppercase()),
            LiteralKind::Integer | LiteralKind::NonDecimal | LiteralKind::Real => {
                (None, strip_separators(text))
            }
            LiteralKind::String => (None, decode_string(text, false)),
            LiteralKind::WideString => (None, decode_string(text, true)),
            LiteralKind::Duration
            | LiteralKind::Date
            | LiteralKind::TimeOfDay
            | LiteralKind::DateAndTime => match text.split_once('#') {
                Some((prefix, value)) => {
                    let prefix_end = token.range.start() + TextSize::of(prefix);
                    let prefix_range = TextRange::new(token.range.start(), prefix_end);
                    (Some(Name::new(prefix, prefix_range)), value.to_string())
                }
                None => (None, text.to_string()),
            },
        };

        Literal {
            kind,
            type_prefix,
            value: SmolStr::from(value),
            range: token.range,
        }
    }

    /// `hh:mm:ss` written as adjacent integer and colon tokens.
    fn at_bare_time_of_day(&self) -> bool {
        self.peek_kind_n(1) == TokenKind::Colon
            && self.peek_kind_n(2) == TokenKind::IntLiteral
            && self.peek_kind_n(3) == TokenKind::Colon
            && matches!(
                self.peek_kind_n(4),
                TokenKind::IntLiteral | TokenKind::RealLiteral
            )
            && self.source.adjacent_n(4)
    }

    fn bare_time_of_day(&mut self) -> Literal {
        let start = self.start();
        let mut value = String::new();
        for _ in 0..5 {
            let token = self.bump();
            value.push_str(self.text(&token));
        }
        Literal {
            kind: LiteralKind::TimeOfDay,
            type_prefix: None,
            value: value.into(),
            range: self.range_from(start),
        }
    }

    fn typed_literal(&mut self) -> PResult<Literal> {
        let prefix_token = self.bump();
        let prefix_text = self.text(&prefix_token).trim_end_matches('#');
        let prefix_range = TextRange::at(prefix_token.range.start(), TextSize::of(prefix_text));
        let prefix = Name::new(prefix_text, prefix_range);
        let class = PrefixClass::of(prefix_text);

        let sign = match self.current() {
            TokenKind::Minus | TokenKind::Plus => {
                let token = self.bump();
                Some(self.text(&token))
            }
            _ => None,
        };

        let Some(kind) = token_literal_kind(self.current()) else {
            return Err(self.fail("literal value"));
        };
        let value_token = self.bump();
        let mut literal = self.single_token_literal(kind, &value_token);
        let range = prefix_token.range.cover(value_token.range);

        if let Err(reason) = class.accepts(kind, sign.is_some()) {
            let message = format!("malformed literal {}: {reason}", self.source.slice(range));
            self.report(DiagnosticCode::MalformedLiteral, range, message);
        }

        // A whole-token date/time literal after a prefix keeps its own
        // prefix in the value.
        let mut value = sign.map(str::to_string).unwrap_or_default();
        if let Some(inner) = literal.type_prefix.take() {
            value.push_str(&inner.text);
            value.push('#');
        }
        value.push_str(&literal.value);

        literal.type_prefix = Some(prefix);
        literal.value = value.into();
        literal.range = range;
        Ok(literal)
    }
}
