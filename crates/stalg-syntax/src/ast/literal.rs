use serde::Serialize;
use smol_str::SmolStr;
use text_size::TextRange;

use super::Name;

/// Lexical shape of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    /// `TRUE`, `FALSE`
    Bool,
    /// `42`, `1_000`
    Integer,
    /// `16#FF`, `8#17`, `2#1010`
    NonDecimal,
    /// `3.14`, `1.0E10`
    Real,
    /// `'text'`
    String,
    /// `"text"`
    WideString,
    /// `T#1h30m`
    Duration,
    /// `D#2024-01-15`
    Date,
    /// `TOD#12:30:00`
    TimeOfDay,
    /// `DT#2024-01-15-12:30:00`
    DateAndTime,
}

/// A literal value.
///
/// `value` holds the resolved text: digit separators removed, sign kept,
/// string escapes decoded, and any `PREFIX#` stripped. The prefix, when
/// written, is kept in `type_prefix` without its `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    /// Lexical shape.
    pub kind: LiteralKind,
    /// Explicit type annotation such as `INT` in `INT#5`.
    pub type_prefix: Option<Name>,
    /// Resolved value text.
    pub value: SmolStr,
    /// Range of the whole literal, prefix included.
    pub range: TextRange,
}

impl Literal {
    /// Returns the numeric radix of an integer or non-decimal literal.
    #[must_use]
    pub fn radix(&self) -> Option<u32> {
        match self.kind {
            LiteralKind::Integer => Some(10),
            LiteralKind::NonDecimal => {
                let digits = self.value.trim_start_matches(['+', '-']);
                let (base, _) = digits.split_once('#')?;
                base.parse().ok()
            }
            _ => None,
        }
    }
}

fn escape(value: &str, quote: char, wide: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '$' => out.push_str("$$"),
            '\n' => out.push_str("$N"),
            '\r' => out.push_str("$R"),
            '\t' => out.push_str("$T"),
            '\x0C' => out.push_str("$P"),
            c if c == quote => {
                out.push('$');
                out.push(c);
            }
            c if c.is_control() => {
                if wide {
                    out.push_str(&format!("${:04X}", u32::from(c)));
                } else {
                    out.push_str(&format!("${:02X}", u32::from(c)));
                }
            }
            c => out.push(c),
        }
    }
    out
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.type_prefix {
            write!(f, "{prefix}#")?;
        }
        match self.kind {
            LiteralKind::String => write!(f, "'{}'", escape(&self.value, '\'', false)),
            LiteralKind::WideString => write!(f, "\"{}\"", escape(&self.value, '"', true)),
            _ => f.write_str(&self.value),
        }
    }
}
