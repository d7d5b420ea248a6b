//! Token definitions for IEC 61131-3 Structured Text algorithm and method bodies.
//!
//! This module defines every lexical token that can appear in the ST dialect
//! used for algorithm and method bodies. The token kinds are generated with
//! the `logos` lexer generator.

use logos::Logos;

fn lex_block_comment_pascal(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_nested_comment(lex, b"(*", b"*)")
}

fn lex_block_comment_c(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_nested_comment(lex, b"/*", b"*/")
}

fn lex_nested_comment(lex: &mut logos::Lexer<TokenKind>, open: &[u8], close: &[u8]) -> bool {
    let mut depth = 1usize;
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == open[0] && bytes[i + 1] == open[1] {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == close[0] && bytes[i + 1] == close[1] {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
            continue;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

/// All token kinds of the Structured Text dialect.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments, pragmas) - kept in the stream, skipped by the parser
/// - Punctuation and operators
/// - Keywords (reserved words, case-insensitive)
/// - Literals (numbers, strings, durations, dates)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Single-line comment: // ...
    #[regex(r"//[^\r\n]*")]
    LineComment,

    /// Block comment: (* ... *) or /* ... */ (supports nesting).
    #[token("(*", lex_block_comment_pascal)]
    #[token("/*", lex_block_comment_c)]
    BlockComment,

    /// Pragma: { ... }
    #[regex(r"\{[^}]*\}")]
    Pragma,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `::`
    #[token("::")]
    ColonColon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `..`
    #[token("..")]
    DotDot,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `#`
    #[token("#")]
    Hash,

    // =========================================================================
    // OPERATORS - Assignment
    // =========================================================================
    /// `:=`
    #[token(":=")]
    Assign,

    /// `=>`
    #[token("=>")]
    Arrow,

    // =========================================================================
    // OPERATORS - Comparison
    // =========================================================================
    /// `=`
    #[token("=")]
    Eq,

    /// `<>`
    #[token("<>")]
    Neq,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    GtEq,

    // =========================================================================
    // OPERATORS - Arithmetic
    // =========================================================================
    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `**`
    #[token("**")]
    Power,

    /// `&`
    #[token("&")]
    Ampersand,

    // =========================================================================
    // MULTIBIT PARTIAL ACCESS SPECIFIERS
    // =========================================================================
    /// `%X`
    #[token("%X", ignore(ascii_case))]
    PartialBit,

    /// `%B`
    #[token("%B", ignore(ascii_case))]
    PartialByte,

    /// `%W`
    #[token("%W", ignore(ascii_case))]
    PartialWord,

    /// `%D`
    #[token("%D", ignore(ascii_case))]
    PartialDWord,

    /// `%L`
    #[token("%L", ignore(ascii_case))]
    PartialLWord,

    // =========================================================================
    // KEYWORDS - Units
    // =========================================================================
    /// `ALGORITHM`
    #[token("ALGORITHM", ignore(ascii_case))]
    KwAlgorithm,

    /// `END_ALGORITHM`
    #[token("END_ALGORITHM", ignore(ascii_case))]
    KwEndAlgorithm,

    /// `METHOD`
    #[token("METHOD", ignore(ascii_case))]
    KwMethod,

    /// `END_METHOD`
    #[token("END_METHOD", ignore(ascii_case))]
    KwEndMethod,

    // =========================================================================
    // KEYWORDS - Variable Declarations
    // =========================================================================
    /// `VAR`
    #[token("VAR", ignore(ascii_case))]
    KwVar,

    /// `VAR_TEMP`
    #[token("VAR_TEMP", ignore(ascii_case))]
    KwVarTemp,

    /// `VAR_INPUT`
    #[token("VAR_INPUT", ignore(ascii_case))]
    KwVarInput,

    /// `VAR_OUTPUT`
    #[token("VAR_OUTPUT", ignore(ascii_case))]
    KwVarOutput,

    /// `VAR_IN_OUT`
    #[token("VAR_IN_OUT", ignore(ascii_case))]
    KwVarInOut,

    /// `END_VAR`
    #[token("END_VAR", ignore(ascii_case))]
    KwEndVar,

    /// `CONSTANT`
    #[token("CONSTANT", ignore(ascii_case))]
    KwConstant,

    /// `AT`
    #[token("AT", ignore(ascii_case))]
    KwAt,

    /// `ARRAY`
    #[token("ARRAY", ignore(ascii_case))]
    KwArray,

    /// `OF`
    #[token("OF", ignore(ascii_case))]
    KwOf,

    /// `REF_TO`
    #[token("REF_TO", ignore(ascii_case))]
    KwRefTo,

    // =========================================================================
    // KEYWORDS - Control Flow
    // =========================================================================
    /// `IF`
    #[token("IF", ignore(ascii_case))]
    KwIf,

    /// `THEN`
    #[token("THEN", ignore(ascii_case))]
    KwThen,

    /// `ELSIF`
    #[token("ELSIF", ignore(ascii_case))]
    KwElsif,

    /// `ELSE`
    #[token("ELSE", ignore(ascii_case))]
    KwElse,

    /// `END_IF`
    #[token("END_IF", ignore(ascii_case))]
    KwEndIf,

    /// `CASE`
    #[token("CASE", ignore(ascii_case))]
    KwCase,

    /// `END_CASE`
    #[token("END_CASE", ignore(ascii_case))]
    KwEndCase,

    /// `FOR`
    #[token("FOR", ignore(ascii_case))]
    KwFor,

    /// `TO`
    #[token("TO", ignore(ascii_case))]
    KwTo,

    /// `BY`
    #[token("BY", ignore(ascii_case))]
    KwBy,

    /// `DO`
    #[token("DO", ignore(ascii_case))]
    KwDo,

    /// `END_FOR`
    #[token("END_FOR", ignore(ascii_case))]
    KwEndFor,

    /// `WHILE`
    #[token("WHILE", ignore(ascii_case))]
    KwWhile,

    /// `END_WHILE`
    #[token("END_WHILE", ignore(ascii_case))]
    KwEndWhile,

    /// `REPEAT`
    #[token("REPEAT", ignore(ascii_case))]
    KwRepeat,

    /// `UNTIL`
    #[token("UNTIL", ignore(ascii_case))]
    KwUntil,

    /// `END_REPEAT`
    #[token("END_REPEAT", ignore(ascii_case))]
    KwEndRepeat,

    /// `RETURN`
    #[token("RETURN", ignore(ascii_case))]
    KwReturn,

    /// `EXIT`
    #[token("EXIT", ignore(ascii_case))]
    KwExit,

    /// `CONTINUE`
    #[token("CONTINUE", ignore(ascii_case))]
    KwContinue,

    // =========================================================================
    // KEYWORDS - Operators
    // =========================================================================
    /// `AND`
    #[token("AND", ignore(ascii_case))]
    KwAnd,

    /// `OR`
    #[token("OR", ignore(ascii_case))]
    KwOr,

    /// `XOR`
    #[token("XOR", ignore(ascii_case))]
    KwXor,

    /// `NOT`
    #[token("NOT", ignore(ascii_case))]
    KwNot,

    /// `MOD`
    #[token("MOD", ignore(ascii_case))]
    KwMod,

    // =========================================================================
    // KEYWORDS - Builtin features
    // =========================================================================
    /// `THIS`
    #[token("THIS", ignore(ascii_case))]
    KwThis,

    /// `SUPER`
    #[token("SUPER", ignore(ascii_case))]
    KwSuper,

    /// `TRUE`
    #[token("TRUE", ignore(ascii_case))]
    KwTrue,

    /// `FALSE`
    #[token("FALSE", ignore(ascii_case))]
    KwFalse,

    // =========================================================================
    // KEYWORDS - Elementary Types
    // =========================================================================
    /// `BOOL`
    #[token("BOOL", ignore(ascii_case))]
    KwBool,

    /// `SINT`
    #[token("SINT", ignore(ascii_case))]
    KwSInt,

    /// `INT`
    #[token("INT", ignore(ascii_case))]
    KwInt,

    /// `DINT`
    #[token("DINT", ignore(ascii_case))]
    KwDInt,

    /// `LINT`
    #[token("LINT", ignore(ascii_case))]
    KwLInt,

    /// `USINT`
    #[token("USINT", ignore(ascii_case))]
    KwUSInt,

    /// `UINT`
    #[token("UINT", ignore(ascii_case))]
    KwUInt,

    /// `UDINT`
    #[token("UDINT", ignore(ascii_case))]
    KwUDInt,

    /// `ULINT`
    #[token("ULINT", ignore(ascii_case))]
    KwULInt,

    /// `REAL`
    #[token("REAL", ignore(ascii_case))]
    KwReal,

    /// `LREAL`
    #[token("LREAL", ignore(ascii_case))]
    KwLReal,

    /// `BYTE`
    #[token("BYTE", ignore(ascii_case))]
    KwByte,

    /// `WORD`
    #[token("WORD", ignore(ascii_case))]
    KwWord,

    /// `DWORD`
    #[token("DWORD", ignore(ascii_case))]
    KwDWord,

    /// `LWORD`
    #[token("LWORD", ignore(ascii_case))]
    KwLWord,

    /// `TIME`
    #[token("TIME", ignore(ascii_case))]
    KwTime,

    /// `LTIME`
    #[token("LTIME", ignore(ascii_case))]
    KwLTime,

    /// `DATE`
    #[token("DATE", ignore(ascii_case))]
    KwDate,

    /// `LDATE`
    #[token("LDATE", ignore(ascii_case))]
    KwLDate,

    /// `TIME_OF_DAY` or `TOD`
    #[token("TIME_OF_DAY", ignore(ascii_case))]
    #[token("TOD", ignore(ascii_case))]
    KwTimeOfDay,

    /// `LTIME_OF_DAY` or `LTOD`
    #[token("LTIME_OF_DAY", ignore(ascii_case))]
    #[token("LTOD", ignore(ascii_case))]
    KwLTimeOfDay,

    /// `DATE_AND_TIME` or `DT`
    #[token("DATE_AND_TIME", ignore(ascii_case))]
    #[token("DT", ignore(ascii_case))]
    KwDateAndTime,

    /// `LDATE_AND_TIME` or `LDT`
    #[token("LDATE_AND_TIME", ignore(ascii_case))]
    #[token("LDT", ignore(ascii_case))]
    KwLDateAndTime,

    /// `STRING`
    #[token("STRING", ignore(ascii_case))]
    KwString,

    /// `WSTRING`
    #[token("WSTRING", ignore(ascii_case))]
    KwWString,

    /// `CHAR`
    #[token("CHAR", ignore(ascii_case))]
    KwChar,

    /// `WCHAR`
    #[token("WCHAR", ignore(ascii_case))]
    KwWChar,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: 123, 1_000_000
    #[regex(r"[0-9]([0-9]|_[0-9])*")]
    IntLiteral,

    /// Non-decimal integer literal: 16#FF, 2#1010, 8#77
    #[regex(r"16#[0-9A-Fa-f]([0-9A-Fa-f]|_[0-9A-Fa-f])*")]
    #[regex(r"2#[01]([01]|_[01])*")]
    #[regex(r"8#[0-7]([0-7]|_[0-7])*")]
    NonDecimalLiteral,

    /// Real literal: 3.14, 1.0E10, 2.5e-3
    #[regex(r"[0-9]([0-9]|_[0-9])*\.[0-9]([0-9]|_[0-9])*([eE][+-]?[0-9]([0-9]|_[0-9])*)?")]
    RealLiteral,

    /// Duration literal: T#1h30m, TIME#-5s, LT#14.7s, LTIME#5m_30s_500ms_100.1us
    #[regex(
        r"(?:T|TIME|LT|LTIME)#[+-]?(?:[0-9]+(?:\.[0-9]+)?(?:ms|us|ns|d|h|m|s))(?:_?(?:[0-9]+(?:\.[0-9]+)?(?:ms|us|ns|d|h|m|s)))*",
        ignore(ascii_case)
    )]
    TimeLiteral,

    /// Date literal: D#2024-01-15, DATE#2024-01-15, LDATE#2012-02-29, LD#1984-06-25
    #[regex(r"(?:DATE|D|LDATE|LD)#[0-9]{4}-[0-9]{2}-[0-9]{2}", ignore(ascii_case))]
    DateLiteral,

    /// Time of day literal: TOD#14:30:00, LTOD#15:36:55.360_227_400
    #[regex(
        r"(?:TOD|TIME_OF_DAY|LTOD|LTIME_OF_DAY)#[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9][0-9_]*)?",
        ignore(ascii_case)
    )]
    TimeOfDayLiteral,

    /// Date and time literal: DT#2024-01-15-14:30:00, LDT#1984-06-25-15:36:55.360_227_400
    #[regex(
        r"(?:DT|DATE_AND_TIME|LDT|LDATE_AND_TIME)#[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9][0-9_]*)?",
        ignore(ascii_case)
    )]
    DateAndTimeLiteral,

    /// Single-quoted string: 'hello$Nworld'
    #[regex(
        r"'([^$'\r\n]|\$\$|\$[LlNnPpRrTt]|\$'|\$[0-9A-Fa-f]{2})*'",
        priority = 2
    )]
    StringLiteral,

    /// Wide string: "hello$Nworld"
    #[regex(
        r#""([^$"\r\n]|\$\$|\$[LlNnPpRrTt]|\$"|\$[0-9A-Fa-f]{4})*""#,
        priority = 2
    )]
    WideStringLiteral,

    /// Typed literal prefix: INT#, REAL#, STRING#, etc.
    /// Captures the type name together with the trailing `#`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*#")]
    TypedLiteralPrefix,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: starts with letter or underscore, contains letters, digits, underscores
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character or malformed string
    #[regex(r"'[^'\r\n]*'", priority = 1)]
    #[regex(r#""[^"\r\n]*""#, priority = 1)]
    #[default]
    Error,

    /// End of file marker (not produced by lexer, reported by the token source)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace, comment, or pragma).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Pragma
        )
    }

    /// Returns `true` if this token opens a variable block.
    pub fn is_var_keyword(self) -> bool {
        matches!(
            self,
            Self::KwVar | Self::KwVarInput | Self::KwVarOutput | Self::KwVarInOut | Self::KwVarTemp
        )
    }

    /// Returns `true` if this token is a single-token literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::NonDecimalLiteral
                | Self::RealLiteral
                | Self::StringLiteral
                | Self::WideStringLiteral
                | Self::TimeLiteral
                | Self::DateLiteral
                | Self::TimeOfDayLiteral
                | Self::DateAndTimeLiteral
                | Self::KwTrue
                | Self::KwFalse
        )
    }

    /// Returns `true` if this token can start an expression.
    pub fn can_start_expr(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                Self::Ident
                    | Self::TypedLiteralPrefix
                    | Self::KwNot
                    | Self::LParen
                    | Self::Minus
                    | Self::Plus
                    | Self::KwThis
                    | Self::KwSuper
            )
    }

    /// Returns `true` if this keyword begins a statement. Such keywords never
    /// appear inside an expression.
    pub fn is_statement_keyword(self) -> bool {
        matches!(
            self,
            Self::KwIf
                | Self::KwCase
                | Self::KwFor
                | Self::KwWhile
                | Self::KwRepeat
                | Self::KwReturn
                | Self::KwExit
                | Self::KwContinue
        )
    }
}
