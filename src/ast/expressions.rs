use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{impl_expr, ExprType, ExprWrapper},
    functions::Function,
};

// LITERALS

/// Number Expression
/// Keeps the literal's source spelling so printing reproduces it exactly.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: f64,
    pub raw: String,
    pub span: Span,
}

impl_expr!(NumberExpr, ExprType::Number);

/// String Expression
/// Holds the decoded value; the printer re-escapes it.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl_expr!(StringExpr, ExprType::String);

/// Symbol Expression
/// Represents an identifier reference.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl SymbolExpr {
    pub fn new(value: impl Into<String>) -> Self {
        SymbolExpr {
            value: value.into(),
            span: Span::null(),
        }
    }
}

impl_expr!(SymbolExpr, ExprType::Symbol);

#[derive(Debug, Clone)]
pub struct ThisExpr {
    pub span: Span,
}

impl_expr!(ThisExpr, ExprType::This);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literals {
    Null,
    Boolean(bool),
}

/// `null`, `true` or `false`.
#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub literal: Literals,
    pub span: Span,
}

impl_expr!(LiteralExpr, ExprType::Literal);

// COMPOUND

/// `[a, b, c]`
#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
}

impl ArrayExpr {
    pub fn new(elements: Vec<ExprWrapper>) -> Self {
        ArrayExpr {
            elements,
            span: Span::null(),
        }
    }
}

impl_expr!(ArrayExpr, ExprType::Array);

/// `{ key: value }`
#[derive(Debug, Clone)]
pub struct ObjectExpr {
    pub properties: Vec<(String, ExprWrapper)>,
    pub span: Span,
}

impl_expr!(ObjectExpr, ExprType::Object);

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: Token,
    pub right: ExprWrapper,
    pub span: Span,
}

impl_expr!(BinaryExpr, ExprType::Binary);

/// `!x`, `-x`, `+x`, `typeof x`
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: ExprWrapper,
    pub span: Span,
}

impl_expr!(PrefixExpr, ExprType::Prefix);

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: ExprWrapper,
    pub operator: Token,
    pub value: ExprWrapper,
    pub span: Span,
}

impl_expr!(AssignmentExpr, ExprType::Assignment);

/// `test ? consequent : alternate`
#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub test: ExprWrapper,
    pub consequent: ExprWrapper,
    pub alternate: ExprWrapper,
    pub span: Span,
}

impl_expr!(ConditionalExpr, ExprType::Conditional);

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl CallExpr {
    pub fn new(callee: ExprWrapper, arguments: Vec<ExprWrapper>) -> Self {
        CallExpr {
            callee,
            arguments,
            span: Span::null(),
        }
    }
}

impl_expr!(CallExpr, ExprType::CallExpr);

/// `new Callee(args)`
#[derive(Debug, Clone)]
pub struct NewExpr {
    pub callee: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl_expr!(NewExpr, ExprType::New);

/// `object.property`
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: ExprWrapper,
    pub property: String,
    pub span: Span,
}

impl MemberExpr {
    pub fn new(object: ExprWrapper, property: impl Into<String>) -> Self {
        MemberExpr {
            object,
            property: property.into(),
            span: Span::null(),
        }
    }
}

impl_expr!(MemberExpr, ExprType::Member);

/// `object[index]`
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: ExprWrapper,
    pub index: ExprWrapper,
    pub span: Span,
}

impl_expr!(IndexExpr, ExprType::Index);

/// Function Expression
/// Covers both `function (...) {}` and arrow functions.
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub function: Function,
    pub span: Span,
}

impl_expr!(FunctionExpr, ExprType::Function);
