//! Expression parsing.
//!
//! One function per precedence tier, lowest first:
//! subrange, OR, XOR, AND, equality, comparison, add/sub, mul/div/mod,
//! power, unary, access, primary. Every binary tier is left-associative.

use crate::ast::{BinaryOp, BitAccess, CallArg, Expr, ExprKind, Name, PartialIndex, UnaryOp};
use crate::lexer::TokenKind;
use crate::parser::parser::{PResult, Parser};

type TierFn<'t, 'src> = fn(&mut Parser<'t, 'src>) -> PResult<Expr>;

fn subrange_op(kind: TokenKind) -> Option<BinaryOp> {
    (kind == TokenKind::DotDot).then_some(BinaryOp::Range)
}

fn or_op(kind: TokenKind) -> Option<BinaryOp> {
    (kind == TokenKind::KwOr).then_some(BinaryOp::Or)
}

fn xor_op(kind: TokenKind) -> Option<BinaryOp> {
    (kind == TokenKind::KwXor).then_some(BinaryOp::Xor)
}

fn and_op(kind: TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::KwAnd | TokenKind::Ampersand).then_some(BinaryOp::And)
}

fn equality_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::Neq => Some(BinaryOp::Neq),
        _ => None,
    }
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn add_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn mul_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::KwMod => Some(BinaryOp::Mod),
        _ => None,
    }
}

fn power_op(kind: TokenKind) -> Option<BinaryOp> {
    (kind == TokenKind::Power).then_some(BinaryOp::Power)
}

fn bit_access(kind: TokenKind) -> Option<BitAccess> {
    match kind {
        TokenKind::PartialBit => Some(BitAccess::Bit),
        TokenKind::PartialByte => Some(BitAccess::Byte),
        TokenKind::PartialWord => Some(BitAccess::Word),
        TokenKind::PartialDWord => Some(BitAccess::DWord),
        TokenKind::PartialLWord => Some(BitAccess::LWord),
        _ => None,
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Parses a full expression.
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::or_expr, subrange_op)
    }

    /// Parses an expression that cannot contain `..` at the top level.
    pub(crate) fn or_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::xor_expr, or_op)
    }

    fn xor_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::and_expr, xor_op)
    }

    fn and_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::equality_expr, and_op)
    }

    fn equality_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::comparison_expr, equality_op)
    }

    fn comparison_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::add_expr, comparison_op)
    }

    fn add_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::mul_expr, add_op)
    }

    fn mul_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::power_expr, mul_op)
    }

    fn power_expr(&mut self) -> PResult<Expr> {
        self.binary_tier(Self::unary_expr, power_op)
    }

    /// Parses `next (op next)*`, folding to the left.
    fn binary_tier(
        &mut self,
        next: TierFn<'t, 'src>,
        op_for: fn(TokenKind) -> Option<BinaryOp>,
    ) -> PResult<Expr> {
        let mut left = next(self)?;
        while let Some(op) = op_for(self.current()) {
            self.bump();
            let right = next(self)?;
            let range = left.range.cover(right.range);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                range,
            );
        }
        Ok(left)
    }

    fn unary_expr(&mut self) -> PResult<Expr> {
        let op = match self.current() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::KwNot => UnaryOp::Not,
            _ => return self.access_expr(),
        };
        let start = self.start();
        self.bump();
        let operand = self.nested("expression", Self::unary_expr)?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.range_from(start),
        ))
    }

    /// Parses a primary followed by any number of `.member`, `.%X3`, `[i]`
    /// and `(args)` suffixes.
    pub(crate) fn access_expr(&mut self) -> PResult<Expr> {
        let start = self.start();
        let mut expr = self.primary_expr()?;

        loop {
            let kind = match self.current() {
                TokenKind::Dot => {
                    self.bump();
                    self.member_suffix(expr)?
                }
                TokenKind::LBracket => {
                    let indices = self.nested("expression", Self::index_list)?;
                    ExprKind::Index {
                        receiver: Box::new(expr),
                        indices,
                    }
                }
                TokenKind::LParen if expr.is_callable() => {
                    let args = self.nested("expression", Self::call_args)?;
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                _ => break,
            };
            expr = Expr::new(kind, self.range_from(start));
        }

        Ok(expr)
    }

    fn member_suffix(&mut self, receiver: Expr) -> PResult<ExprKind> {
        let receiver = Box::new(receiver);
        match self.current() {
            TokenKind::Ident => {
                let token = self.bump();
                let member = Name::new(self.text(&token), token.range);
                Ok(ExprKind::Member { receiver, member })
            }
            TokenKind::IntLiteral => {
                let index = self.partial_constant();
                Ok(ExprKind::Partial {
                    receiver,
                    specifier: None,
                    index,
                })
            }
            kind => {
                let Some(specifier) = bit_access(kind) else {
                    return Err(self.fail("member name"));
                };
                self.bump();
                let index = match self.current() {
                    TokenKind::IntLiteral => self.partial_constant(),
                    TokenKind::LParen => {
                        let index = self.nested("expression", |p| {
                            p.bump();
                            let index = p.expression()?;
                            p.expect(TokenKind::RParen, ")")?;
                            Ok(index)
                        })?;
                        PartialIndex::Dynamic(Box::new(index))
                    }
                    _ => return Err(self.fail("partial access index")),
                };
                Ok(ExprKind::Partial {
                    receiver,
                    specifier: Some(specifier),
                    index,
                })
            }
        }
    }

    fn partial_constant(&mut self) -> PartialIndex {
        let token = self.bump();
        PartialIndex::Constant {
            value: self.text(&token).replace('_', "").into(),
            range: token.range,
        }
    }

    /// `[i, j, ...]`
    fn index_list(&mut self) -> PResult<Vec<Expr>> {
        self.bump();
        let mut indices = vec![self.expression()?];
        while self.eat(TokenKind::Comma).is_some() {
            indices.push(self.expression()?);
        }
        self.expect(TokenKind::RBracket, "]")?;
        Ok(indices)
    }

    fn call_args(&mut self) -> PResult<Vec<CallArg>> {
        self.expect(TokenKind::LParen, "(")?;
        let mut args = Vec::new();
        if self.eat(TokenKind::RParen).is_some() {
            return Ok(args);
        }
        loop {
            args.push(self.call_arg()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        Ok(args)
    }

    fn call_arg(&mut self) -> PResult<CallArg> {
        let start = self.start();
        let negated = self.at(TokenKind::KwNot)
            && self.peek_kind_n(1) == TokenKind::Ident
            && self.peek_kind_n(2) == TokenKind::Arrow;

        if negated || (self.at(TokenKind::Ident) && self.peek_kind_n(1) == TokenKind::Arrow) {
            if negated {
                self.bump();
            }
            let param = self.ident("parameter name")?;
            self.bump();
            let value = self.expression()?;
            return Ok(CallArg::NamedOutput {
                param,
                negated,
                value,
                range: self.range_from(start),
            });
        }

        if self.at(TokenKind::Ident) && self.peek_kind_n(1) == TokenKind::Assign {
            let param = self.ident("parameter name")?;
            self.bump();
            let value = self.expression()?;
            return Ok(CallArg::NamedInput {
                param,
                value,
                range: self.range_from(start),
            });
        }

        Ok(CallArg::Positional(self.expression()?))
    }

    fn primary_expr(&mut self) -> PResult<Expr> {
        let start = self.start();
        match self.current() {
            TokenKind::LParen => self.nested("expression", |p| {
                p.bump();
                let inner = p.expression()?;
                p.expect(TokenKind::RParen, ")")?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    p.range_from(start),
                ))
            }),
            TokenKind::Ident => {
                let name = self.qualified_name("name")?;
                let range = name.range;
                Ok(Expr::new(ExprKind::Name(name), range))
            }
            TokenKind::KwThis => {
                let token = self.bump();
                Ok(Expr::new(ExprKind::This, token.range))
            }
            TokenKind::KwSuper => {
                let token = self.bump();
                Ok(Expr::new(ExprKind::Super, token.range))
            }
            TokenKind::TypedLiteralPrefix
                if self.peek_kind_n(1) == TokenKind::Ident && !self.at_elementary_prefix() =>
            {
                // `Color#Red`: an enumerated value, kept as an unresolved name.
                let prefix = self.bump();
                let value = self.bump();
                let text = format!("{}{}", self.text(&prefix), self.text(&value));
                let range = prefix.range.cover(value.range);
                Ok(Expr::new(ExprKind::Name(Name::new(text, range)), range))
            }
            kind if kind.is_literal() || kind == TokenKind::TypedLiteralPrefix => {
                let literal = self.literal()?;
                let range = literal.range;
                Ok(Expr::new(ExprKind::Literal(literal), range))
            }
            _ => Err(self.fail("expression")),
        }
    }

    /// Parses a single identifier.
    pub(crate) fn ident(&mut self, expected: &str) -> PResult<Name> {
        let token = self.expect(TokenKind::Ident, expected)?;
        Ok(Name::new(self.text(&token), token.range))
    }

    /// Parses `Ident (:: Ident)*`.
    pub(crate) fn qualified_name(&mut self, expected: &str) -> PResult<Name> {
        let first = self.ident(expected)?;
        if !self.at(TokenKind::ColonColon) {
            return Ok(first);
        }

        let mut text = first.text.to_string();
        let mut range = first.range;
        while self.eat(TokenKind::ColonColon).is_some() {
            let segment = self.ident("name")?;
            text.push_str("::");
            text.push_str(&segment.text);
            range = range.cover(segment.range);
        }
        Ok(Name::new(text, range))
    }
}
