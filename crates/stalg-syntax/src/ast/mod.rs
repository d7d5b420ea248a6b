//! Typed abstract syntax tree for algorithm and method bodies.
//!
//! Every node owns its children and carries the byte range it was parsed
//! from. Names are stored unresolved: linking them to declarations is left
//! to whoever consumes the tree.

mod expr;
mod literal;
mod stmt;

pub use expr::{BinaryOp, BinaryTier, BitAccess, CallArg, Expr, ExprKind, PartialIndex, UnaryOp};
pub use literal::{Literal, LiteralKind};
pub use stmt::{CaseArm, ElsifBranch, Stmt, StmtKind};

use serde::Serialize;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::lexer::TokenKind;

/// An identifier as written in the source, possibly qualified (`pkg::Name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Name {
    /// The identifier text.
    pub text: SmolStr,
    /// Where it was written.
    pub range: TextRange,
}

impl Name {
    /// Creates a name.
    pub fn new(text: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    /// Returns true if `other` names the same thing, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Elementary IEC 61131-3 data types spelled with a reserved keyword.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinType {
    Bool,
    SInt,
    Int,
    DInt,
    LInt,
    USInt,
    UInt,
    UDInt,
    ULInt,
    Real,
    LReal,
    Byte,
    Word,
    DWord,
    LWord,
    Time,
    LTime,
    Date,
    LDate,
    TimeOfDay,
    LTimeOfDay,
    DateAndTime,
    LDateAndTime,
    String,
    WString,
    Char,
    WChar,
}

impl BuiltinType {
    /// Maps a type keyword token to its type.
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::KwBool => Self::Bool,
            TokenKind::KwSInt => Self::SInt,
            TokenKind::KwInt => Self::Int,
            TokenKind::KwDInt => Self::DInt,
            TokenKind::KwLInt => Self::LInt,
            TokenKind::KwUSInt => Self::USInt,
            TokenKind::KwUInt => Self::UInt,
            TokenKind::KwUDInt => Self::UDInt,
            TokenKind::KwULInt => Self::ULInt,
            TokenKind::KwReal => Self::Real,
            TokenKind::KwLReal => Self::LReal,
            TokenKind::KwByte => Self::Byte,
            TokenKind::KwWord => Self::Word,
            TokenKind::KwDWord => Self::DWord,
            TokenKind::KwLWord => Self::LWord,
            TokenKind::KwTime => Self::Time,
            TokenKind::KwLTime => Self::LTime,
            TokenKind::KwDate => Self::Date,
            TokenKind::KwLDate => Self::LDate,
            TokenKind::KwTimeOfDay => Self::TimeOfDay,
            TokenKind::KwLTimeOfDay => Self::LTimeOfDay,
            TokenKind::KwDateAndTime => Self::DateAndTime,
            TokenKind::KwLDateAndTime => Self::LDateAndTime,
            TokenKind::KwString => Self::String,
            TokenKind::KwWString => Self::WString,
            TokenKind::KwChar => Self::Char,
            TokenKind::KwWChar => Self::WChar,
            _ => return None,
        })
    }

    /// Canonical spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::SInt => "SINT",
            Self::Int => "INT",
            Self::DInt => "DINT",
            Self::LInt => "LINT",
            Self::USInt => "USINT",
            Self::UInt => "UINT",
            Self::UDInt => "UDINT",
            Self::ULInt => "ULINT",
            Self::Real => "REAL",
            Self::LReal => "LREAL",
            Self::Byte => "BYTE",
            Self::Word => "WORD",
            Self::DWord => "DWORD",
            Self::LWord => "LWORD",
            Self::Time => "TIME",
            Self::LTime => "LTIME",
            Self::Date => "DATE",
            Self::LDate => "LDATE",
            Self::TimeOfDay => "TIME_OF_DAY",
            Self::LTimeOfDay => "LTIME_OF_DAY",
            Self::DateAndTime => "DATE_AND_TIME",
            Self::LDateAndTime => "LDATE_AND_TIME",
            Self::String => "STRING",
            Self::WString => "WSTRING",
            Self::Char => "CHAR",
            Self::WChar => "WCHAR",
        }
    }
}

/// A reference to a data type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    /// An elementary type keyword.
    Builtin {
        /// Which type.
        ty: BuiltinType,
        /// Keyword range.
        range: TextRange,
    },
    /// A user-defined type, unresolved.
    Named(Name),
    /// `REF_TO <type>`.
    Reference {
        /// Referenced type.
        target: Box<TypeRef>,
        /// Range from `REF_TO` to the end of the target.
        range: TextRange,
    },
}

impl TypeRef {
    /// Source range of the whole type reference.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Builtin { range, .. } | Self::Reference { range, .. } => *range,
            Self::Named(name) => name.range,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin { ty, .. } => f.write_str(ty.as_str()),
            Self::Named(name) => write!(f, "{name}"),
            Self::Reference { target, .. } => write!(f, "REF_TO {target}"),
        }
    }
}

/// A file holding any number of units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    /// Units in source order.
    pub units: Vec<Unit>,
    /// Range of the parsed text.
    pub range: TextRange,
}

/// A bare statement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSource {
    /// Statements in source order.
    pub statements: Vec<Stmt>,
    /// Range of the parsed text.
    pub range: TextRange,
}

/// A top-level construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Unit {
    /// `ALGORITHM name ... END_ALGORITHM`
    Algorithm(Algorithm),
    /// `METHOD name [: type] ... END_METHOD`
    Method(Method),
}

impl Unit {
    /// The unit's name.
    #[must_use]
    pub fn name(&self) -> &Name {
        match self {
            Self::Algorithm(algorithm) => &algorithm.name,
            Self::Method(method) => &method.name,
        }
    }

    /// The unit's body.
    #[must_use]
    pub fn body(&self) -> &Body {
        match self {
            Self::Algorithm(algorithm) => &algorithm.body,
            Self::Method(method) => &method.body,
        }
    }

    /// Source range of the unit.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Algorithm(algorithm) => algorithm.range,
            Self::Method(method) => method.range,
        }
    }
}

/// `ALGORITHM name VAR_TEMP ... END_VAR statements END_ALGORITHM`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Algorithm {
    /// Algorithm name.
    pub name: Name,
    /// Declarations and statements.
    pub body: Body,
    /// Range from `ALGORITHM` to `END_ALGORITHM`.
    pub range: TextRange,
}

/// `METHOD name [: type] blocks statements END_METHOD`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    /// Method name.
    pub name: Name,
    /// Declared return type, if any.
    pub return_type: Option<TypeRef>,
    /// Declarations and statements.
    pub body: Body,
    /// Range from `METHOD` to `END_METHOD`.
    pub range: TextRange,
}

/// Declaration blocks followed by statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Body {
    /// Declaration blocks in source order.
    pub declarations: Vec<DeclarationBlock>,
    /// Statements in source order.
    pub statements: Vec<Stmt>,
}

/// Which `VAR_*` keyword opened a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    /// `VAR_TEMP`
    Temp,
    /// `VAR_INPUT`
    Input,
    /// `VAR_OUTPUT`
    Output,
    /// `VAR_IN_OUT`
    InOut,
}

impl DeclarationKind {
    /// The opening keyword.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Temp => "VAR_TEMP",
            Self::Input => "VAR_INPUT",
            Self::Output => "VAR_OUTPUT",
            Self::InOut => "VAR_IN_OUT",
        }
    }
}

/// `VAR_* [CONSTANT] declarations END_VAR`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationBlock {
    /// Block kind.
    pub kind: DeclarationKind,
    /// `CONSTANT` was present.
    pub is_constant: bool,
    /// Declarations in source order.
    pub declarations: Vec<VarDeclaration>,
    /// Range from the block keyword to `END_VAR`.
    pub range: TextRange,
}

/// One variable declaration inside a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    /// Variable name.
    pub name: Name,
    /// `AT <name>` location, unresolved.
    pub located_at: Option<Name>,
    /// `ARRAY [...] OF` prefix.
    pub array_spec: Option<ArraySpec>,
    /// Element or variable type.
    pub type_ref: TypeRef,
    /// `[n]` length bound for string types.
    pub max_length: Option<Expr>,
    /// `:= initializer`.
    pub default_value: Option<Initializer>,
    /// Range from the name to the terminating `;`.
    pub range: TextRange,
}

/// Dimensions of an array declaration. Always at least one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArraySpec {
    /// `ARRAY [l1..u1, l2..u2] OF`
    Ranges(Vec<ArrayRange>),
    /// `ARRAY [*, *] OF`, holding the number of `*` placeholders.
    Count(usize),
}

impl ArraySpec {
    /// Number of dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        match self {
            Self::Ranges(ranges) => ranges.len(),
            Self::Count(count) => *count,
        }
    }
}

/// `lower..upper`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayRange {
    /// Lower bound.
    pub lower: Expr,
    /// Upper bound.
    pub upper: Expr,
    /// Range covering both bounds.
    pub range: TextRange,
}

/// The right-hand side of `:=` in a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Initializer {
    /// A plain expression.
    Elementary(Expr),
    /// `[a, b, n(c)]`
    Array {
        /// Elements in source order.
        elements: Vec<ArrayInitElement>,
        /// Range including the brackets.
        range: TextRange,
    },
    /// `(field := value, ...)`
    Struct {
        /// Fields in source order.
        fields: Vec<StructInitField>,
        /// Range including the parentheses.
        range: TextRange,
    },
}

impl Initializer {
    /// Source range.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Elementary(expr) => expr.range,
            Self::Array { range, .. } | Self::Struct { range, .. } => *range,
        }
    }
}

/// One element of an array initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrayInitElement {
    /// A single value.
    Value(Initializer),
    /// `count(values)` repeats `values` `count` times.
    Repeat {
        /// The repeat count literal.
        count: Literal,
        /// The repeated group; empty means default values.
        values: Vec<Initializer>,
        /// Range from the count to `)`.
        range: TextRange,
    },
}

impl ArrayInitElement {
    /// Source range.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Value(value) => value.range(),
            Self::Repeat { range, .. } => *range,
        }
    }
}

/// `field := value` inside a struct initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructInitField {
    /// Field name, unresolved.
    pub field: Name,
    /// Field value.
    pub value: Initializer,
    /// Range from the field name to the end of the value.
    pub range: TextRange,
}

/// Root of an initializer source: `[name :=] initializer [;]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializerSource {
    /// Leading `name :=` binding, if written.
    pub target: Option<Name>,
    /// The initializer.
    pub value: Initializer,
    /// Range of the parsed construct.
    pub range: TextRange,
}
