//! `ALGORITHM` and `METHOD` units and the root constructs of each entry point.

use crate::ast::{
    Algorithm, Body, Expr, InitializerSource, Method, Name, SourceFile, StatementSource, Unit,
};
use crate::lexer::TokenKind;
use crate::parser::grammar::declarations::UnitKind;
use crate::parser::parser::{Abort, PResult, Parser};

impl UnitKind {
    fn end_keyword(self) -> TokenKind {
        match self {
            Self::Algorithm => TokenKind::KwEndAlgorithm,
            Self::Method => TokenKind::KwEndMethod,
        }
    }

    fn end_text(self) -> &'static str {
        match self {
            Self::Algorithm => "END_ALGORITHM",
            Self::Method => "END_METHOD",
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Any number of units.
    pub(crate) fn source_file(&mut self) -> PResult<SourceFile> {
        let start = self.start();
        let mut units = Vec::new();

        while !self.at_end() {
            match self.current() {
                TokenKind::KwAlgorithm => units.push(Unit::Algorithm(self.algorithm()?)),
                TokenKind::KwMethod => units.push(Unit::Method(self.method()?)),
                _ => {
                    self.error_expected("ALGORITHM or METHOD");
                    let before = self.source.position();
                    while !self.at_end()
                        && !matches!(self.current(), TokenKind::KwAlgorithm | TokenKind::KwMethod)
                    {
                        self.bump();
                    }
                    tracing::trace!(
                        skipped = self.source.position() - before,
                        "skipped tokens between units"
                    );
                }
            }
        }

        Ok(SourceFile {
            units,
            range: self.range_from(start),
        })
    }

    /// A single `ALGORITHM` filling the whole input.
    pub(crate) fn algorithm_root(&mut self) -> PResult<Algorithm> {
        if !self.at(TokenKind::KwAlgorithm) {
            return Err(self.fail("ALGORITHM"));
        }
        let algorithm = self.algorithm()?;
        self.expect_end_of_input();
        Ok(algorithm)
    }

    /// A single `METHOD` filling the whole input.
    pub(crate) fn method_root(&mut self) -> PResult<Method> {
        if !self.at(TokenKind::KwMethod) {
            return Err(self.fail("METHOD"));
        }
        let method = self.method()?;
        self.expect_end_of_input();
        Ok(method)
    }

    /// A bare statement list.
    pub(crate) fn statement_root(&mut self) -> PResult<StatementSource> {
        let start = self.start();
        let mut statements = Vec::new();

        loop {
            statements.extend(self.statement_list()?);
            if self.at_end() {
                break;
            }
            let found = self.source.current_text();
            self.error(format!("unexpected '{found}' outside of a block"));
            self.bump();
        }

        Ok(StatementSource {
            statements,
            range: self.range_from(start),
        })
    }

    /// An expression with an optional trailing `;`.
    pub(crate) fn expression_root(&mut self) -> PResult<Expr> {
        let expr = self.expression()?;
        self.eat(TokenKind::Semicolon);
        self.expect_end_of_input();
        Ok(expr)
    }

    /// `[name :=] initializer [;]`
    pub(crate) fn initializer_root(&mut self) -> PResult<InitializerSource> {
        let start = self.start();
        let target = if self.at(TokenKind::Ident) && self.peek_kind_n(1) == TokenKind::Assign {
            let name = self.ident("name")?;
            self.bump();
            Some(name)
        } else {
            None
        };
        let value = self.initializer()?;
        let range = self.range_from(start);
        self.eat(TokenKind::Semicolon);
        self.expect_end_of_input();

        Ok(InitializerSource {
            target,
            value,
            range,
        })
    }

    fn algorithm(&mut self) -> PResult<Algorithm> {
        let start = self.start();
        self.bump();
        let name = self.unit_name()?;
        let body = self.body(UnitKind::Algorithm)?;

        Ok(Algorithm {
            name,
            body,
            range: self.range_from(start),
        })
    }

    fn method(&mut self) -> PResult<Method> {
        let start = self.start();
        self.bump();
        let name = self.unit_name()?;

        let return_type = if self.eat(TokenKind::Colon).is_some() {
            match self.type_ref() {
                Ok(ty) => Some(ty),
                Err(Abort::Syntax) => None,
                Err(abort) => return Err(abort),
            }
        } else {
            None
        };

        let body = self.body(UnitKind::Method)?;
        Ok(Method {
            name,
            return_type,
            body,
            range: self.range_from(start),
        })
    }

    /// The unit name. A missing name is reported and left empty so the body
    /// still gets parsed.
    fn unit_name(&mut self) -> PResult<Name> {
        if self.at(TokenKind::Ident) {
            return self.ident("name");
        }
        if self.at_end() {
            return Err(self.fail("name"));
        }
        self.error_expected("name");
        Ok(Name::new("", text_size::TextRange::empty(self.start())))
    }

    fn body(&mut self, unit: UnitKind) -> PResult<Body> {
        let mut body = Body::default();
        while self.current().is_var_keyword() {
            body.declarations.push(self.declaration_block(unit)?);
        }

        loop {
            body.statements.extend(self.statement_list()?);

            let current = self.current();
            if current == unit.end_keyword() {
                self.bump();
                self.eat(TokenKind::Semicolon);
                break;
            }

            match current {
                TokenKind::Eof => return Err(self.fail(unit.end_text())),
                kind if kind.is_var_keyword() => {
                    self.error("declaration blocks must come before the first statement");
                    body.declarations.push(self.declaration_block(unit)?);
                }
                TokenKind::KwEndAlgorithm | TokenKind::KwEndMethod => {
                    self.error_expected(unit.end_text());
                    self.bump();
                    break;
                }
                TokenKind::KwAlgorithm | TokenKind::KwMethod => {
                    self.error_expected(unit.end_text());
                    break;
                }
                _ => {
                    let found = self.source.current_text();
                    self.error(format!("unexpected '{found}'"));
                    self.bump();
                }
            }
        }

        tracing::trace!(
            blocks = body.declarations.len(),
            statements = body.statements.len(),
            "parsed unit body"
        );
        Ok(body)
    }
}
