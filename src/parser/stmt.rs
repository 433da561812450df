use crate::{
    ast::{
        ast::{Expr, ExprWrapper, StmtWrapper},
        expressions::FunctionExpr,
        statements::{
            BlockStmt, ExportStmt, ExpressionStmt, FnDeclStmt, IfStmt, ImportSpecifier, ImportStmt,
            ReturnStmt, ThrowStmt, VarDeclStmt, VarKind, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_function},
        lookups::BindingPower,
    },
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    consume_semicolon(parser)?;

    Ok(StmtWrapper::new(ExpressionStmt {
        span: expr.get_span().clone(),
        expression: expr,
    }))
}

/// Accepts `;`, or nothing when the statement ends a block or the file.
fn consume_semicolon(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            Ok(())
        }
        TokenKind::CloseCurly | TokenKind::EOF => Ok(()),
        _ => Err(parser.unexpected_detailed("expected `;`")),
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start_token = parser.advance();
    let kind = match start_token.kind {
        TokenKind::Let => VarKind::Let,
        TokenKind::Const => VarKind::Const,
        _ => VarKind::Var,
    };

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let explicit_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Comma)?)
    } else {
        None
    };

    if kind == VarKind::Const && assigned_value.is_none() {
        return Err(parser.unexpected_detailed("expected rhs in constant definition"));
    }

    consume_semicolon(parser)?;

    Ok(StmtWrapper::new(VarDeclStmt {
        span: Span {
            start: start_token.span.start,
            end: parser.previous_end(),
        },
        kind,
        identifier,
        explicit_type,
        assigned_value,
    }))
}

/// Handles
///
/// - `import 'module';`
/// - `import name from 'module';`
/// - `import name, { a, b as c } from 'module';`
/// - `import * as name from 'module';`
pub fn parse_import_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Import)?.span.start;

    let mut specifiers = vec![];

    if parser.current_token_kind() != TokenKind::String {
        if parser.current_token_kind() == TokenKind::Identifier {
            let local = parser.advance().value;
            specifiers.push(ImportSpecifier::Default { local });

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                parse_import_clause(parser, &mut specifiers)?;
            }
        } else {
            parse_import_clause(parser, &mut specifiers)?;
        }

        parser.expect_contextual("from")?;
    }

    let error = parser.unexpected_detailed("expected module name");
    let source = parser.expect_error(TokenKind::String, Some(error))?.value;

    consume_semicolon(parser)?;

    Ok(StmtWrapper::new(ImportStmt {
        specifiers,
        source,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

/// `{ a, b as c }` or `* as ns`
fn parse_import_clause(parser: &mut Parser, specifiers: &mut Vec<ImportSpecifier>) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Star => {
            parser.advance();
            parser.expect_contextual("as")?;
            let local = parser.expect(TokenKind::Identifier)?.value;
            specifiers.push(ImportSpecifier::Namespace { local });
        }
        TokenKind::OpenCurly => {
            parser.advance();
            while parser.current_token_kind() != TokenKind::CloseCurly {
                if !parser.current_token().is_identifier_name() {
                    return Err(parser.unexpected_detailed("expected imported name"));
                }
                let imported = parser.advance().value;

                let local = if parser.current_token().value == "as" {
                    parser.advance();
                    parser.expect(TokenKind::Identifier)?.value
                } else {
                    imported.clone()
                };

                specifiers.push(ImportSpecifier::Named { imported, local });

                if parser.current_token_kind() == TokenKind::Comma {
                    parser.advance();
                } else {
                    break;
                }
            }
            parser.expect(TokenKind::CloseCurly)?;
        }
        _ => return Err(parser.unexpected_detailed("expected import specifier")),
    }

    Ok(())
}

pub fn parse_export_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Export)?.span.start;

    let is_default = parser.current_token_kind() == TokenKind::Default;
    if is_default {
        parser.advance();
    }

    let declaration = if !is_default {
        parse_stmt(parser)?
    } else if parser.current_token_kind() == TokenKind::Function
        && parser.peek_kind(1) == TokenKind::Identifier
    {
        parse_fn_decl_stmt(parser)?
    } else if parser.current_token_kind() == TokenKind::Function {
        // Anonymous default export; not followed by call or member access
        let function = parse_function(parser)?;
        let expression = ExprWrapper::new(FunctionExpr {
            span: function.span.clone(),
            function,
        });
        consume_semicolon(parser)?;
        expression.to_stmt_wrapper()
    } else {
        let expression = parse_expr(parser, BindingPower::Comma)?;
        consume_semicolon(parser)?;
        expression.to_stmt_wrapper()
    };

    Ok(StmtWrapper::new(ExportStmt {
        is_default,
        declaration,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_stmt(parser)?)
    } else {
        None
    };

    Ok(StmtWrapper::new(IfStmt {
        condition,
        then_body,
        else_body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(StmtWrapper::new(WhileStmt {
        condition,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

/// `{ statements }` as a node, shared by block statements and function bodies.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::EOF => return Err(parser.unexpected_detailed("expected `}`")),
            _ => statements.push(parse_stmt(parser)?),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body: statements,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    Ok(StmtWrapper::new(parse_block(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if parser.peek_kind(1) != TokenKind::Identifier {
        parser.advance();
        return Err(parser.unexpected_detailed("expected function name"));
    }

    let function = parse_function(parser)?;

    Ok(StmtWrapper::new(FnDeclStmt {
        span: function.span.clone(),
        function,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => Some(parse_expr(parser, BindingPower::Default)?),
    };

    consume_semicolon(parser)?;

    Ok(StmtWrapper::new(ReturnStmt {
        value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Throw)?.span.start;

    let value = parse_expr(parser, BindingPower::Default)?;

    consume_semicolon(parser)?;

    Ok(StmtWrapper::new(ThrowStmt {
        value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
