//! Type annotation parsing.
//!
//! Annotations use the same NUD/LED scheme as expressions, with their own
//! lookup tables:
//!
//! - Named types, qualified names and generic arguments
//! - Keyword and literal types
//! - Nullable (`?T`), array (`T[]`) and tuple (`[A, B]`) types
//! - Object types with properties and indexers
//! - Function types (`(a: A) => R`)
//! - Unions and intersections

use std::collections::HashMap;

use crate::{
    ast::types::{
        FunctionAnnotation, FunctionAnnotationParam, Indexer, Keyword, ObjectAnnotation,
        ObjectProperty, QualifiedName, TypeAnnotation,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Initializes the type parsing lookup tables.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_nud(TokenKind::Null, parse_literal_type);
    parser.type_nud(TokenKind::True, parse_literal_type);
    parser.type_nud(TokenKind::False, parse_literal_type);
    parser.type_nud(TokenKind::String, parse_literal_type);
    parser.type_nud(TokenKind::Number, parse_literal_type);
    parser.type_nud(TokenKind::Question, parse_nullable_type);
    parser.type_nud(TokenKind::OpenBracket, parse_tuple_type);
    parser.type_nud(TokenKind::OpenCurly, parse_object_type);
    parser.type_nud(TokenKind::OpenParen, parse_paren_type);

    parser.type_led(TokenKind::Pipe, BindingPower::LogicalOr, parse_union_type);
    parser.type_led(TokenKind::Ampersand, BindingPower::LogicalAnd, parse_intersection_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // Leading `|` or `&` is allowed, e.g. `| A | B`
    if matches!(parser.current_token_kind(), TokenKind::Pipe | TokenKind::Ampersand)
        && bp == BindingPower::Default
    {
        parser.advance();
    }

    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    while let Some(current_bp) = parser.get_type_bp_lookup().get(&parser.current_token_kind()).copied() {
        if current_bp <= bp {
            break;
        }
        // `|}` closes an exact object type
        if parser.current_token_kind() == TokenKind::Pipe && parser.peek_kind(1) == TokenKind::CloseCurly {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

/// `string`, `Name`, `A.B.C`, `Name<Args>`
pub fn parse_named_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() != TokenKind::Dot {
        if let Some(keyword) = Keyword::from_name(&token.value) {
            return Ok(TypeAnnotation::Keyword(keyword));
        }
    }

    let mut name = QualifiedName::new(token.value);
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        if !parser.current_token().is_identifier_name() {
            return Err(parser.unexpected_detailed("expected type name after `.`"));
        }
        name = name.qualify(parser.advance().value);
    }

    let type_arguments = if parser.current_token_kind() == TokenKind::Less {
        parser.advance();
        let mut arguments = vec![];
        while parser.current_token_kind() != TokenKind::Greater {
            arguments.push(parse_type(parser, BindingPower::Default)?);
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
        parser.expect(TokenKind::Greater)?;
        Some(arguments)
    } else {
        None
    };

    Ok(TypeAnnotation::Named { name, type_arguments })
}

pub fn parse_literal_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.advance();

    Ok(match token.kind {
        TokenKind::Null => TypeAnnotation::Keyword(Keyword::Null),
        TokenKind::True => TypeAnnotation::BooleanLiteral(true),
        TokenKind::False => TypeAnnotation::BooleanLiteral(false),
        TokenKind::String => TypeAnnotation::StringLiteral(token.value),
        _ => TypeAnnotation::NumberLiteral(token.value),
    })
}

/// `?T`
pub fn parse_nullable_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::Question)?;
    let inner = parse_type(parser, BindingPower::Unary)?;

    Ok(TypeAnnotation::Nullable(Box::new(inner)))
}

/// `[A, B, C]`
pub fn parse_tuple_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut types = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        types.push(parse_type(parser, BindingPower::Default)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Tuple(types))
}

/// `{ name: T, optional?: T, [key: K]: V }`, or exact with `{| ... |}`.
pub fn parse_object_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    // `{||}` lexes as `{`, `||`, `}`
    if parser.current_token_kind() == TokenKind::Or {
        parser.advance();
        parser.expect(TokenKind::CloseCurly)?;
        return Ok(TypeAnnotation::Object(ObjectAnnotation {
            properties: vec![],
            indexers: vec![],
            exact: true,
        }));
    }

    let exact = parser.current_token_kind() == TokenKind::Pipe;
    if exact {
        parser.advance();
    }
    let close = if exact { TokenKind::Pipe } else { TokenKind::CloseCurly };

    let mut properties = vec![];
    let mut indexers = vec![];

    while parser.current_token_kind() != close {
        if parser.current_token_kind() == TokenKind::OpenBracket {
            indexers.push(parse_indexer(parser)?);
        } else {
            properties.push(parse_object_property(parser)?);
        }

        if matches!(parser.current_token_kind(), TokenKind::Comma | TokenKind::Semicolon) {
            parser.advance();
        } else {
            break;
        }
    }

    if exact {
        parser.expect(TokenKind::Pipe)?;
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(TypeAnnotation::Object(ObjectAnnotation {
        properties,
        indexers,
        exact,
    }))
}

fn parse_indexer(parser: &mut Parser) -> Result<Indexer, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let name = if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Colon
    {
        let name = parser.advance().value;
        parser.advance();
        Some(name)
    } else {
        None
    };

    let key = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;
    parser.expect(TokenKind::Colon)?;
    let value = parse_type(parser, BindingPower::Default)?;

    Ok(Indexer { name, key, value })
}

fn parse_object_property(parser: &mut Parser) -> Result<ObjectProperty, Error> {
    let token = parser.current_token();
    if !token.is_identifier_name() && token.kind != TokenKind::String {
        return Err(parser.unexpected_detailed("expected property name"));
    }
    let name = parser.advance().value;

    let optional = parser.current_token_kind() == TokenKind::Question;
    if optional {
        parser.advance();
    }

    parser.expect(TokenKind::Colon)?;
    let value = parse_type(parser, BindingPower::Default)?;

    Ok(ObjectProperty { name, optional, value })
}

/// `(A)` grouping, or a function type `(a: A, B) => R`.
pub fn parse_paren_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let saved = parser.save();

    match parse_function_type(parser) {
        Ok(function) => return Ok(function),
        Err(_) => parser.restore(saved),
    }

    parser.expect(TokenKind::OpenParen)?;
    let inner = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(inner)
}

fn parse_function_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let is_named = parser.current_token_kind() == TokenKind::Identifier
            && matches!(parser.peek_kind(1), TokenKind::Colon | TokenKind::Question);

        let name = if is_named {
            let name = parser.advance().value;
            if parser.current_token_kind() == TokenKind::Question {
                parser.advance();
            }
            parser.expect(TokenKind::Colon)?;
            Some(name)
        } else {
            None
        };

        parameters.push(FunctionAnnotationParam {
            name,
            annotation: parse_type(parser, BindingPower::Default)?,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::FatArrow)?;
    let return_type = parse_type(parser, BindingPower::Default)?;

    Ok(TypeAnnotation::Function(FunctionAnnotation {
        parameters,
        return_type: Box::new(return_type),
    }))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Array(Box::new(left)))
}

/// `A | B | C` flattens into one union.
pub fn parse_union_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    let mut members = vec![left];

    while parser.current_token_kind() == TokenKind::Pipe && parser.peek_kind(1) != TokenKind::CloseCurly {
        parser.advance();
        members.push(parse_type(parser, bp)?);
    }

    Ok(TypeAnnotation::Union(members))
}

/// `A & B & C` flattens into one intersection.
pub fn parse_intersection_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    let mut members = vec![left];

    while parser.current_token_kind() == TokenKind::Ampersand {
        parser.advance();
        members.push(parse_type(parser, bp)?);
    }

    Ok(TypeAnnotation::Intersection(members))
}
