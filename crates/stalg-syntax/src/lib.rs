//! `stalg-syntax` - Lexer, parser, and typed AST for IEC 61131-3 Structured
//! Text algorithm and method bodies.
//!
//! This crate provides the syntactic analysis for `ALGORITHM` and `METHOD`
//! units, bare statement lists, expressions, and declaration initializers:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens, trivia included
//! - **Parser**: Builds a typed AST from tokens, recovering from errors
//! - **Diagnostics**: Coded, ranged messages reported in source order
//!
//! # Design Principles
//!
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Case-insensitive**: Keywords match in any case; names keep their spelling
//! - **Spanned**: Every node carries the byte range it was parsed from
//!
//! # Example
//!
//! ```
//! use stalg_syntax::ast::StmtKind;
//! use stalg_syntax::parse_statements;
//!
//! let parse = parse_statements("x := 42; IF x > 1 THEN y := x; END_IF");
//! assert!(parse.ok());
//!
//! let statements = &parse.tree().unwrap().statements;
//! assert!(matches!(statements[0].kind, StmtKind::Assignment { .. }));
//! assert!(matches!(statements[1].kind, StmtKind::If { .. }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode, DiagnosticSeverity};
pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{
    parse_algorithm, parse_expression_source, parse_initializer_expression_source, parse_method,
    parse_source, parse_statements, Parse, ParseFailed, TokenStream,
};
