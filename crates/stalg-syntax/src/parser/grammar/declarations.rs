//! Variable declaration blocks, types, and initializers.

use crate::ast::{
    ArrayInitElement, ArrayRange, ArraySpec, BuiltinType, DeclarationBlock, DeclarationKind,
    Initializer, StructInitField, TypeRef, VarDeclaration,
};
use crate::diagnostics::DiagnosticCode;
use crate::lexer::TokenKind;
use crate::parser::parser::{Abort, PResult, Parser};
use text_size::TextRange;

/// Which unit a declaration block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitKind {
    Algorithm,
    Method,
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Parses `VAR_* [CONSTANT] declarations END_VAR`.
    pub(crate) fn declaration_block(&mut self, unit: UnitKind) -> PResult<DeclarationBlock> {
        let start = self.start();
        let keyword_range = self.source.current_range();
        let keyword = self.bump();

        let kind = match keyword.kind {
            TokenKind::KwVarInput => DeclarationKind::Input,
            TokenKind::KwVarOutput => DeclarationKind::Output,
            TokenKind::KwVarInOut => DeclarationKind::InOut,
            TokenKind::KwVarTemp => DeclarationKind::Temp,
            _ => {
                self.report_block(keyword_range, "VAR blocks are not allowed here, use VAR_TEMP");
                DeclarationKind::Temp
            }
        };
        if unit == UnitKind::Algorithm && kind != DeclarationKind::Temp {
            self.report_block(
                keyword_range,
                format!("{} blocks are not allowed in an ALGORITHM", kind.keyword()),
            );
        }

        let is_constant = self.eat(TokenKind::KwConstant).is_some();

        let mut declarations = Vec::new();
        loop {
            match self.current() {
                TokenKind::KwEndVar => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => return Err(self.fail("END_VAR")),
                // A name starting a statement: the block is missing its `END_VAR`.
                TokenKind::Ident if self.at_statement_start() => {
                    self.error_expected("END_VAR");
                    break;
                }
                TokenKind::Ident => match self.var_declaration() {
                    Ok(declaration) => declarations.push(declaration),
                    Err(Abort::Syntax) => self.recover_declaration(),
                    Err(abort) => return Err(abort),
                },
                _ if self.at_declaration_sync() => {
                    self.error_expected("END_VAR");
                    break;
                }
                _ => {
                    self.error_expected("variable name");
                    self.recover_declaration();
                }
            }
        }

        tracing::trace!(
            kind = kind.keyword(),
            count = declarations.len(),
            "parsed declaration block"
        );
        Ok(DeclarationBlock {
            kind,
            is_constant,
            declarations,
            range: self.range_from(start),
        })
    }

    fn report_block(&mut self, range: TextRange, message: impl Into<String>) {
        self.report(DiagnosticCode::SyntaxError, range, message);
    }

    /// Tokens where a declaration block without `END_VAR` gives up.
    fn at_declaration_sync(&self) -> bool {
        let kind = self.current();
        kind.is_var_keyword()
            || matches!(
                kind,
                TokenKind::KwEndAlgorithm
                    | TokenKind::KwEndMethod
                    | TokenKind::KwAlgorithm
                    | TokenKind::KwMethod
            )
            || kind.is_statement_keyword()
    }

    /// A name followed by `:` or `AT` begins the next declaration.
    fn at_declaration_start(&self) -> bool {
        self.at(TokenKind::Ident)
            && matches!(self.peek_kind_n(1), TokenKind::Colon | TokenKind::KwAt)
    }

    /// Skips a malformed declaration up to and including its `;`.
    fn recover_declaration(&mut self) {
        let mut skipped = 0usize;
        while !self.at_end() {
            if self.at(TokenKind::Semicolon) {
                self.bump();
                skipped += 1;
                break;
            }
            if self.at(TokenKind::KwEndVar) || self.at_declaration_sync() {
                break;
            }
            self.bump();
            skipped += 1;
        }
        tracing::trace!(skipped, "recovered at declaration boundary");
    }

    /// `name [AT loc] : [ARRAY [..] OF] type [[len]] [:= init];`
    fn var_declaration(&mut self) -> PResult<VarDeclaration> {
        let start = self.start();
        let name = self.ident("variable name")?;
        let located_at = if self.eat(TokenKind::KwAt).is_some() {
            Some(self.qualified_name("location")?)
        } else {
            None
        };
        self.expect(TokenKind::Colon, ":")?;

        let array_spec = if self.at(TokenKind::KwArray) {
            Some(self.array_spec()?)
        } else {
            None
        };
        let type_ref = self.type_ref()?;

        let max_length = if self.eat(TokenKind::LBracket).is_some() {
            let length = self.expression()?;
            self.expect(TokenKind::RBracket, "]")?;
            Some(length)
        } else {
            None
        };

        let default_value = if self.eat(TokenKind::Assign).is_some() {
            Some(self.initializer()?)
        } else {
            None
        };

        if self.eat(TokenKind::Semicolon).is_none() {
            if self.at_declaration_start()
                || self.at_statement_start()
                || self.at(TokenKind::KwEndVar)
                || self.at_declaration_sync()
                || self.at_end()
            {
                self.error_expected(";");
            } else {
                return Err(self.fail(";"));
            }
        }

        Ok(VarDeclaration {
            name,
            located_at,
            array_spec,
            type_ref,
            max_length,
            default_value,
            range: self.range_from(start),
        })
    }

    /// `ARRAY [l..u, ...] OF` or `ARRAY [*, ...] OF`.
    fn array_spec(&mut self) -> PResult<ArraySpec> {
        self.bump();
        self.expect(TokenKind::LBracket, "[")?;

        let spec = if self.at(TokenKind::Star) {
            let mut count = 0;
            loop {
                self.expect(TokenKind::Star, "*")?;
                count += 1;
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            ArraySpec::Count(count)
        } else {
            let mut ranges = Vec::new();
            loop {
                let start = self.start();
                let lower = self.or_expr()?;
                self.expect(TokenKind::DotDot, "..")?;
                let upper = self.or_expr()?;
                ranges.push(ArrayRange {
                    lower,
                    upper,
                    range: self.range_from(start),
                });
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            ArraySpec::Ranges(ranges)
        };

        self.expect(TokenKind::RBracket, "]")?;
        self.expect(TokenKind::KwOf, "OF")?;
        Ok(spec)
    }

    /// Parses a type reference.
    pub(crate) fn type_ref(&mut self) -> PResult<TypeRef> {
        let kind = self.current();
        if let Some(ty) = BuiltinType::from_token(kind) {
            let token = self.bump();
            return Ok(TypeRef::Builtin {
                ty,
                range: token.range,
            });
        }

        match kind {
            TokenKind::KwRefTo => {
                let start = self.start();
                self.bump();
                let target = self.nested("type", Self::type_ref)?;
                Ok(TypeRef::Reference {
                    target: Box::new(target),
                    range: self.range_from(start),
                })
            }
            TokenKind::Ident => Ok(TypeRef::Named(self.qualified_name("type name")?)),
            _ => Err(self.fail("type name")),
        }
    }

    /// Parses the right-hand side of a declaration's `:=`.
    pub(crate) fn initializer(&mut self) -> PResult<Initializer> {
        match self.current() {
            TokenKind::LBracket => self.nested("initializer", Self::array_initializer),
            TokenKind::LParen
                if self.peek_kind_n(1) == TokenKind::Ident
                    && self.peek_kind_n(2) == TokenKind::Assign =>
            {
                self.nested("initializer", Self::struct_initializer)
            }
            _ => Ok(Initializer::Elementary(self.expression()?)),
        }
    }

    fn array_initializer(&mut self) -> PResult<Initializer> {
        let start = self.start();
        self.bump();

        let mut elements = Vec::new();
        loop {
            elements.push(self.array_init_element()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "]")?;

        Ok(Initializer::Array {
            elements,
            range: self.range_from(start),
        })
    }

    fn array_init_element(&mut self) -> PResult<ArrayInitElement> {
        if !(self.at(TokenKind::IntLiteral) && self.peek_kind_n(1) == TokenKind::LParen) {
            return Ok(ArrayInitElement::Value(self.initializer()?));
        }

        let start = self.start();
        let count = self.literal()?;
        self.bump();

        let mut values = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                values.push(self.initializer()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;

        Ok(ArrayInitElement::Repeat {
            count,
            values,
            range: self.range_from(start),
        })
    }

    fn struct_initializer(&mut self) -> PResult<Initializer> {
        let start = self.start();
        self.bump();

        let mut fields = Vec::new();
        loop {
            let field_start = self.start();
            let field = self.ident("field name")?;
            self.expect(TokenKind::Assign, ":=")?;
            let value = self.initializer()?;
            fields.push(StructInitField {
                field,
                value,
                range: self.range_from(field_start),
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, ")")?;

        Ok(Initializer::Struct {
            fields,
            range: self.range_from(start),
        })
    }
}
