use crate::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, FunctionExpr, IndexExpr,
            LiteralExpr, Literals, MemberExpr, NewExpr, NumberExpr, ObjectExpr, PrefixExpr, StringExpr,
            SymbolExpr, ThisExpr,
        },
        functions::{Function, FunctionBody, Parameter},
        types::TypeAnnotation,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(current_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()).copied() {
        if current_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Number => {
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError { token: token.value.clone() },
                    token.span.start.clone(),
                )
            })?;
            Ok(ExprWrapper::new(NumberExpr {
                value,
                raw: token.value,
                span: token.span,
            }))
        }
        TokenKind::String => Ok(ExprWrapper::new(StringExpr {
            value: token.value,
            span: token.span,
        })),
        TokenKind::This => Ok(ExprWrapper::new(ThisExpr { span: token.span })),
        TokenKind::Null => Ok(ExprWrapper::new(LiteralExpr {
            literal: Literals::Null,
            span: token.span,
        })),
        TokenKind::True | TokenKind::False => Ok(ExprWrapper::new(LiteralExpr {
            literal: Literals::Boolean(token.kind == TokenKind::True),
            span: token.span,
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

/// Identifier, or the parameter of a single-parameter arrow function.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    if parser.peek_kind(1) == TokenKind::FatArrow {
        let token = parser.advance();
        let mut parameter = Parameter::new(token.value);
        parameter.span = token.span.clone();
        return parse_arrow_body(parser, vec![parameter], None, token.span.start);
    }

    let token = parser.expect(TokenKind::Identifier)?;
    Ok(ExprWrapper::new(SymbolExpr {
        value: token.value,
        span: token.span,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: ExprWrapper, bp: BindingPower) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left,
        operator: operator_token,
        right,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(ExprWrapper::new(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token,
        right_expr: rhs,
    }))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance();
    // Right associative: `a = b = c` assigns `b = c` first
    let rhs = parse_expr(parser, BindingPower::Comma)?;

    Ok(ExprWrapper::new(AssignmentExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token,
        value: rhs,
        assignee: left,
    }))
}

pub fn parse_conditional_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::Question)?;
    let consequent = parse_expr(parser, BindingPower::Comma)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_expr(parser, BindingPower::Comma)?;

    Ok(ExprWrapper::new(ConditionalExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: alternate.get_span().end.clone(),
        },
        test: left,
        consequent,
        alternate,
    }))
}

/// `(` starts either an arrow function or a parenthesised expression.
pub fn parse_paren_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.get_position();

    if let Some((parameters, return_type)) = try_parse_arrow_head(parser) {
        return parse_arrow_body(parser, parameters, return_type, start);
    }

    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses `(params): ReturnType` when it is followed by `=>`, otherwise
/// rewinds and returns `None`.
fn try_parse_arrow_head(parser: &mut Parser) -> Option<(Vec<Parameter>, Option<TypeAnnotation>)> {
    let saved = parser.save();

    match parse_arrow_head(parser) {
        Ok(head) if parser.current_token_kind() == TokenKind::FatArrow => Some(head),
        _ => {
            parser.restore(saved);
            None
        }
    }
}

fn parse_arrow_head(parser: &mut Parser) -> Result<(Vec<Parameter>, Option<TypeAnnotation>), Error> {
    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    let return_type = parse_return_type(parser)?;
    Ok((parameters, return_type))
}

fn parse_arrow_body(
    parser: &mut Parser,
    parameters: Vec<Parameter>,
    return_type: Option<TypeAnnotation>,
    start: crate::Position,
) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::FatArrow)?;

    let body = if parser.current_token_kind() == TokenKind::OpenCurly {
        FunctionBody::Block(parse_block(parser)?)
    } else {
        FunctionBody::Expression(parse_expr(parser, BindingPower::Comma)?)
    };

    let span = Span {
        start,
        end: parser.previous_end(),
    };

    Ok(ExprWrapper::new(FunctionExpr {
        function: Function {
            identifier: None,
            parameters,
            return_type,
            body,
            is_arrow: true,
            span: span.clone(),
        },
        span,
    }))
}

/// Parameter list up to, not including, the closing `)`.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    let mut parameters = Vec::new();

    while parser.current_token_kind() != TokenKind::CloseParen {
        let error = parser.unexpected_detailed("expected parameter name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

        let annotation = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        let default_value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Comma)?)
        } else {
            None
        };

        parameters.push(Parameter {
            span: Span {
                start: name.span.start.clone(),
                end: parser.previous_end(),
            },
            name: name.value,
            annotation,
            default_value,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(parameters)
}

/// Optional `: Type` after a parameter list.
pub fn parse_return_type(parser: &mut Parser) -> Result<Option<TypeAnnotation>, Error> {
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Ok(Some(parse_type(parser, BindingPower::Default)?))
    } else {
        Ok(None)
    }
}

/// `function name?(params): ReturnType { body }`
pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect(TokenKind::Function)?.span.start;

    let identifier = if parser.current_token_kind() == TokenKind::Identifier {
        Some(parser.advance().value)
    } else {
        None
    };

    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_type = parse_return_type(parser)?;
    let body = parse_block(parser)?;

    Ok(Function {
        identifier,
        parameters,
        return_type,
        body: FunctionBody::Block(body),
        is_arrow: false,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let function = parse_function(parser)?;

    Ok(ExprWrapper::new(FunctionExpr {
        span: function.span.clone(),
        function,
    }))
}

/// Comma separated expressions up to, not including, `close`.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<ExprWrapper>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != close {
        items.push(parse_expr(parser, BindingPower::Comma)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(items)
}

pub fn parse_call_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(ExprWrapper::new(CallExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: parser.previous_end(),
        },
        callee: left,
        arguments,
    }))
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::New)?.span.start;
    let callee = parse_expr(parser, BindingPower::Call)?;

    let arguments = if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
        parser.expect(TokenKind::CloseParen)?;
        arguments
    } else {
        vec![]
    };

    Ok(ExprWrapper::new(NewExpr {
        span: Span {
            start,
            end: parser.previous_end(),
        },
        callee,
        arguments,
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::Dot)?;

    if !parser.current_token().is_identifier_name() {
        return Err(parser.unexpected_detailed("expected property name after `.`"));
    }
    let property = parser.advance();

    Ok(ExprWrapper::new(MemberExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: property.span.end.clone(),
        },
        object: left,
        property: property.value,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(IndexExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: parser.previous_end(),
        },
        object: left,
        index,
    }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(ArrayExpr {
        elements,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_object_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    // { name: value, 'quoted': value, shorthand }
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut properties = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key = parser.current_token().clone();
        let is_key = key.is_identifier_name()
            || key.kind == TokenKind::String
            || key.kind == TokenKind::Number;
        if !is_key {
            return Err(parser.unexpected_detailed("expected property name"));
        }
        parser.advance();

        let value = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            parse_expr(parser, BindingPower::Comma)?
        } else if key.kind == TokenKind::Identifier {
            ExprWrapper::new(SymbolExpr {
                value: key.value.clone(),
                span: key.span.clone(),
            })
        } else {
            return Err(parser.unexpected_detailed("expected `:` after property name"));
        };

        properties.push((key.value, value));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(ExprWrapper::new(ObjectExpr {
        properties,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
