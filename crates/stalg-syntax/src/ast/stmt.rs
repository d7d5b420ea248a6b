use serde::Serialize;
use text_size::TextRange;

use super::{Expr, Name};

/// A statement with its source range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    /// What kind of statement this is.
    pub kind: StmtKind,
    /// Range including the terminating `;` when one was consumed.
    pub range: TextRange,
}

impl Stmt {
    /// Creates a statement node.
    #[must_use]
    pub fn new(kind: StmtKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// `IF .. THEN .. ELSIF .. ELSE .. END_IF`
    If {
        /// Condition of the `IF` branch.
        condition: Expr,
        /// Statements of the `IF` branch.
        then_branch: Vec<Stmt>,
        /// `ELSIF` branches in order.
        elsif_branches: Vec<ElsifBranch>,
        /// `ELSE` statements.
        else_branch: Option<Vec<Stmt>>,
    },
    /// `CASE .. OF .. ELSE .. END_CASE`
    Case {
        /// Selector expression.
        selector: Expr,
        /// Labelled arms in order.
        arms: Vec<CaseArm>,
        /// `ELSE` statements.
        else_branch: Option<Vec<Stmt>>,
    },
    /// `FOR v := a TO b BY c DO .. END_FOR`
    For {
        /// Loop variable, unresolved.
        var: Name,
        /// Start value.
        from: Expr,
        /// End value.
        to: Expr,
        /// Step.
        by: Option<Expr>,
        /// Loop body.
        body: Vec<Stmt>,
    },
    /// `WHILE .. DO .. END_WHILE`
    While {
        /// Loop condition.
        condition: Expr,
        /// Loop body.
        body: Vec<Stmt>,
    },
    /// `REPEAT .. UNTIL .. END_REPEAT`
    Repeat {
        /// Loop body.
        body: Vec<Stmt>,
        /// Exit condition.
        until: Expr,
    },
    /// `left := right;`
    Assignment {
        /// Assigned access expression.
        left: Expr,
        /// Assigned value.
        right: Expr,
    },
    /// `access;`, usually a call.
    Call(Expr),
    /// `RETURN;`
    Return,
    /// `CONTINUE;`
    Continue,
    /// `EXIT;`
    Exit,
    /// `;`
    Nop,
}

/// `ELSIF condition THEN body`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElsifBranch {
    /// Branch condition.
    pub condition: Expr,
    /// Branch statements.
    pub body: Vec<Stmt>,
    /// Range from `ELSIF` to the last statement.
    pub range: TextRange,
}

/// `label, label: body`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseArm {
    /// Values or subranges selecting this arm.
    pub labels: Vec<Expr>,
    /// Arm statements.
    pub body: Vec<Stmt>,
    /// Range from the first label to the last statement.
    pub range: TextRange,
}
