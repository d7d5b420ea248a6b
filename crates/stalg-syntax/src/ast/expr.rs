use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;
use text_size::TextRange;

use super::{Literal, Name};

/// An expression with its source range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    /// What kind of expression this is.
    pub kind: ExprKind,
    /// Range covering the expression and all of its operands.
    pub range: TextRange,
}

impl Expr {
    /// Creates an expression node.
    #[must_use]
    pub fn new(kind: ExprKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns true if a `( ... )` call suffix may follow this expression.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Name(_) | ExprKind::Member { .. } | ExprKind::This | ExprKind::Super
        )
    }
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// `left op right`
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `op operand`
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// `receiver.member`
    Member {
        /// Accessed expression.
        receiver: Box<Expr>,
        /// Member name.
        member: Name,
    },
    /// `receiver.%X3`, `receiver.%D(i)` or `receiver.3`
    Partial {
        /// Accessed expression.
        receiver: Box<Expr>,
        /// Width specifier, `None` for the short `.n` bit form.
        specifier: Option<BitAccess>,
        /// Which bit, byte, or word.
        index: PartialIndex,
    },
    /// `receiver[i, j]`
    Index {
        /// Indexed expression.
        receiver: Box<Expr>,
        /// Subscripts, at least one.
        indices: Vec<Expr>,
    },
    /// `callee(args)`
    Call {
        /// Called expression.
        callee: Box<Expr>,
        /// Arguments in source order.
        args: Vec<CallArg>,
    },
    /// A variable, constant, or function name.
    Name(Name),
    /// `THIS`
    This,
    /// `SUPER`
    Super,
    /// `( expr )`
    Paren(Box<Expr>),
    /// A literal value.
    Literal(Literal),
}

/// Precedence tiers from lowest to highest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BinaryTier {
    /// `..`
    Subrange,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `AND`, `&`
    And,
    /// `=`, `<>`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Comparison,
    /// `+`, `-`
    AddSub,
    /// `*`, `/`, `MOD`
    MulDivMod,
    /// `**`
    Power,
}

/// Binary operators.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Range,
    Or,
    Xor,
    And,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Power,
}

impl BinaryOp {
    /// The precedence tier this operator belongs to.
    #[must_use]
    pub fn tier(self) -> BinaryTier {
        match self {
            Self::Range => BinaryTier::Subrange,
            Self::Or => BinaryTier::Or,
            Self::Xor => BinaryTier::Xor,
            Self::And => BinaryTier::And,
            Self::Eq | Self::Neq => BinaryTier::Equality,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => BinaryTier::Comparison,
            Self::Add | Self::Sub => BinaryTier::AddSub,
            Self::Mul | Self::Div | Self::Mod => BinaryTier::MulDivMod,
            Self::Power => BinaryTier::Power,
        }
    }

    /// Source spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "..",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::Neq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "MOD",
            Self::Power => "**",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `NOT`
    Not,
}

impl UnaryOp {
    /// Source spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
        }
    }
}

/// Multibit partial access width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BitAccess {
    /// `%X`
    Bit,
    /// `%B`
    Byte,
    /// `%W`
    Word,
    /// `%D`
    DWord,
    /// `%L`
    LWord,
}

impl BitAccess {
    /// Source spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bit => "%X",
            Self::Byte => "%B",
            Self::Word => "%W",
            Self::DWord => "%D",
            Self::LWord => "%L",
        }
    }
}

/// Position selected by a partial access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PartialIndex {
    /// `%X3`
    Constant {
        /// Integer text, separators removed.
        value: SmolStr,
        /// Range of the integer.
        range: TextRange,
    },
    /// `%X(expr)`
    Dynamic(Box<Expr>),
}

/// A call argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CallArg {
    /// `value`
    Positional(Expr),
    /// `param := value`
    NamedInput {
        /// Parameter name, unresolved.
        param: Name,
        /// Argument value.
        value: Expr,
        /// Range from the parameter to the value.
        range: TextRange,
    },
    /// `[NOT] param => target`
    NamedOutput {
        /// Parameter name, unresolved.
        param: Name,
        /// `NOT` preceded the parameter.
        negated: bool,
        /// Expression receiving the output.
        value: Expr,
        /// Range from `NOT` or the parameter to the value.
        range: TextRange,
    },
}

impl CallArg {
    /// Source range.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Positional(expr) => expr.range,
            Self::NamedInput { range, .. } | Self::NamedOutput { range, .. } => *range,
        }
    }

    /// The argument value.
    #[must_use]
    pub fn value(&self) -> &Expr {
        match self {
            Self::Positional(value)
            | Self::NamedInput { value, .. }
            | Self::NamedOutput { value, .. } => value,
        }
    }
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(value) => write!(f, "{value}"),
            Self::NamedInput { param, value, .. } => write!(f, "{param} := {value}"),
            Self::NamedOutput {
                param,
                negated,
                value,
                ..
            } => {
                if *negated {
                    f.write_str("NOT ")?;
                }
                write!(f, "{param} => {value}")
            }
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Binary {
                op: BinaryOp::Range,
                left,
                right,
            } => write!(f, "{left}..{right}"),
            ExprKind::Binary { op, left, right } => write!(f, "{left} {} {right}", op.as_str()),
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => write!(f, "NOT {operand}"),
            ExprKind::Unary { op, operand } => write!(f, "{}{operand}", op.as_str()),
            ExprKind::Member { receiver, member } => write!(f, "{receiver}.{member}"),
            ExprKind::Partial {
                receiver,
                specifier,
                index,
            } => {
                write!(f, "{receiver}.")?;
                if let Some(specifier) = specifier {
                    f.write_str(specifier.as_str())?;
                }
                match index {
                    PartialIndex::Constant { value, .. } => f.write_str(value),
                    PartialIndex::Dynamic(expr) => write!(f, "({expr})"),
                }
            }
            ExprKind::Index { receiver, indices } => {
                write!(f, "{receiver}[")?;
                write_list(f, indices)?;
                f.write_str("]")
            }
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Name(name) => write!(f, "{name}"),
            ExprKind::This => f.write_str("THIS"),
            ExprKind::Super => f.write_str("SUPER"),
            ExprKind::Paren(inner) => write!(f, "({inner})"),
            ExprKind::Literal(literal) => write!(f, "{literal}"),
        }
    }
}
