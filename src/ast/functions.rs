//! Function nodes shared by declarations and expressions.

use crate::Span;

use super::{ast::ExprWrapper, statements::BlockStmt, types::TypeAnnotation};

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
    pub default_value: Option<ExprWrapper>,
    pub span: Span,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            annotation: None,
            default_value: None,
            span: Span::null(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FunctionBody {
    Block(BlockStmt),
    /// Arrow function with an implicit `return`, e.g. `x => x + 1`
    Expression(ExprWrapper),
}

#[derive(Debug, Clone)]
pub struct Function {
    pub identifier: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: FunctionBody,
    pub is_arrow: bool,
    pub span: Span,
}

impl Function {
    /// True when any parameter or the return value carries an annotation.
    pub fn has_annotations(&self) -> bool {
        self.return_type.is_some()
            || self
                .parameters
                .iter()
                .any(|parameter| parameter.annotation.is_some())
    }

    pub fn has_expression_body(&self) -> bool {
        matches!(self.body, FunctionBody::Expression(_))
    }

    /// Name used in log output.
    pub fn display_name(&self) -> &str {
        self.identifier.as_deref().unwrap_or("<anonymous>")
    }
}
