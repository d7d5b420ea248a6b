//! Grammar rules for algorithm and method bodies.
//!
//! The rules are `impl Parser` blocks organized by category:
//!
//! - `units.rs` - `ALGORITHM` / `METHOD` units and entry point roots
//! - `declarations.rs` - `VAR_*` blocks, types and initializers
//! - `statements.rs` - Statement parsing
//! - `expressions.rs` - Expression parsing (one function per precedence tier)
//! - `literals.rs` - Literal values and typed literal prefixes

mod declarations;
mod expressions;
mod literals;
mod statements;
mod units;
