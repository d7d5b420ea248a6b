//! Statement parsing.
//!
//! A leading keyword selects block statements directly. Anything starting
//! with a name, `THIS` or `SUPER` is parsed once as an access expression and
//! becomes an assignment if `:=` follows, a call statement otherwise.

use crate::ast::{CaseArm, ElsifBranch, Stmt, StmtKind};
use crate::lexer::TokenKind;
use crate::parser::parser::{Abort, PResult, Parser};

type StopFn<'t, 'src> = fn(&Parser<'t, 'src>) -> bool;

impl<'t, 'src> Parser<'t, 'src> {
    /// Parses statements until a block end, a sync keyword, or end of input.
    pub(crate) fn statement_list(&mut self) -> PResult<Vec<Stmt>> {
        self.statements_until(|_| false)
    }

    /// Parses statements, additionally stopping where `stop` says so.
    /// Malformed statements are reported and skipped.
    fn statements_until(&mut self, stop: StopFn<'t, 'src>) -> PResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.at_end() && !self.at_stmt_list_end() && !stop(self) {
            let before = self.source.position();
            match self.statement() {
                Ok(statement) => statements.push(statement),
                Err(Abort::Syntax) => {
                    self.recover_statement();
                    if self.source.position() == before {
                        self.bump();
                    }
                }
                Err(abort) => return Err(abort),
            }
        }

        Ok(statements)
    }

    /// Parses a single statement.
    pub(crate) fn statement(&mut self) -> PResult<Stmt> {
        match self.current() {
            TokenKind::KwIf => self.nested("statement", Self::if_stmt),
            TokenKind::KwCase => self.nested("statement", Self::case_stmt),
            TokenKind::KwFor => self.nested("statement", Self::for_stmt),
            TokenKind::KwWhile => self.nested("statement", Self::while_stmt),
            TokenKind::KwRepeat => self.nested("statement", Self::repeat_stmt),
            TokenKind::KwReturn => Ok(self.keyword_stmt(StmtKind::Return)),
            TokenKind::KwExit => Ok(self.keyword_stmt(StmtKind::Exit)),
            TokenKind::KwContinue => Ok(self.keyword_stmt(StmtKind::Continue)),
            TokenKind::Semicolon => {
                let token = self.bump();
                Ok(Stmt::new(StmtKind::Nop, token.range))
            }
            TokenKind::Ident | TokenKind::KwThis | TokenKind::KwSuper => {
                self.assignment_or_call()
            }
            _ => Err(self.fail("statement")),
        }
    }

    fn keyword_stmt(&mut self, kind: StmtKind) -> Stmt {
        let start = self.start();
        self.bump();
        self.expect_semicolon();
        Stmt::new(kind, self.range_from(start))
    }

    fn assignment_or_call(&mut self) -> PResult<Stmt> {
        let start = self.start();
        let target = self.access_expr()?;

        let kind = if self.eat(TokenKind::Assign).is_some() {
            let right = self.expression()?;
            StmtKind::Assignment {
                left: target,
                right,
            }
        } else {
            StmtKind::Call(target)
        };

        self.expect_semicolon();
        Ok(Stmt::new(kind, self.range_from(start)))
    }

    /// Finishes a block statement: an optional `;` belongs to it.
    fn block_stmt(&mut self, start: text_size::TextSize, kind: StmtKind) -> Stmt {
        self.eat(TokenKind::Semicolon);
        Stmt::new(kind, self.range_from(start))
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let condition = self.expression()?;
        self.expect(TokenKind::KwThen, "THEN")?;
        let then_branch = self.statement_list()?;

        let mut elsif_branches = Vec::new();
        while self.at(TokenKind::KwElsif) {
            let branch_start = self.start();
            self.bump();
            let condition = self.expression()?;
            self.expect(TokenKind::KwThen, "THEN")?;
            let body = self.statement_list()?;
            elsif_branches.push(ElsifBranch {
                condition,
                body,
                range: self.range_from(branch_start),
            });
        }

        let else_branch = if self.eat(TokenKind::KwElse).is_some() {
            Some(self.statement_list()?)
        } else {
            None
        };

        self.expect_block_end(TokenKind::KwEndIf, "END_IF")?;
        Ok(self.block_stmt(
            start,
            StmtKind::If {
                condition,
                then_branch,
                elsif_branches,
                else_branch,
            },
        ))
    }

    fn case_stmt(&mut self) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let selector = self.expression()?;
        self.expect(TokenKind::KwOf, "OF")?;

        // At least one arm is required; the statement is still kept.
        if matches!(self.current(), TokenKind::KwElse | TokenKind::KwEndCase) {
            self.error_expected("case label");
        }

        let mut arms = Vec::new();
        while !self.at_end() && !self.at_stmt_list_end() {
            let before = self.source.position();
            match self.case_arm() {
                Ok(arm) => arms.push(arm),
                Err(Abort::Syntax) => {
                    self.recover_statement();
                    if self.source.position() == before {
                        self.bump();
                    }
                }
                Err(abort) => return Err(abort),
            }
        }

        let else_branch = if self.eat(TokenKind::KwElse).is_some() {
            Some(self.statement_list()?)
        } else {
            None
        };

        self.expect_block_end(TokenKind::KwEndCase, "END_CASE")?;
        Ok(self.block_stmt(
            start,
            StmtKind::Case {
                selector,
                arms,
                else_branch,
            },
        ))
    }

    fn case_arm(&mut self) -> PResult<CaseArm> {
        let start = self.start();
        if !self.current().can_start_expr() {
            return Err(self.fail("case label"));
        }

        let mut labels = vec![self.expression()?];
        while self.eat(TokenKind::Comma).is_some() {
            labels.push(self.expression()?);
        }
        self.expect(TokenKind::Colon, ":")?;

        let body = self.statements_until(Self::at_case_label)?;
        Ok(CaseArm {
            labels,
            body,
            range: self.range_from(start),
        })
    }

    fn for_stmt(&mut self) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let var = self.ident("loop variable")?;
        self.expect(TokenKind::Assign, ":=")?;
        let from = self.expression()?;
        self.expect(TokenKind::KwTo, "TO")?;
        let to = self.expression()?;
        let by = if self.eat(TokenKind::KwBy).is_some() {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::KwDo, "DO")?;
        let body = self.statement_list()?;
        self.expect_block_end(TokenKind::KwEndFor, "END_FOR")?;

        Ok(self.block_stmt(
            start,
            StmtKind::For {
                var,
                from,
                to,
                by,
                body,
            },
        ))
    }

    fn while_stmt(&mut self) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let condition = self.expression()?;
        self.expect(TokenKind::KwDo, "DO")?;
        let body = self.statement_list()?;
        self.expect_block_end(TokenKind::KwEndWhile, "END_WHILE")?;

        Ok(self.block_stmt(start, StmtKind::While { condition, body }))
    }

    fn repeat_stmt(&mut self) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let body = self.statement_list()?;
        self.expect(TokenKind::KwUntil, "UNTIL")?;
        let until = self.expression()?;
        self.expect_block_end(TokenKind::KwEndRepeat, "END_REPEAT")?;

        Ok(self.block_stmt(start, StmtKind::Repeat { body, until }))
    }
}
