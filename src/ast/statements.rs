use std::slice::{Iter, IterMut};

use crate::Span;

use super::{
    ast::{impl_stmt, ExprWrapper, StmtType, StmtWrapper},
    functions::Function,
    types::TypeAnnotation,
};

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl BlockStmt {
    pub fn new(body: Vec<StmtWrapper>) -> Self {
        BlockStmt {
            body,
            span: Span::null(),
        }
    }
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, StmtWrapper> {
        self.body.iter_mut()
    }
}

impl_stmt!(BlockStmt, StmtType::BlockStmt);

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl_stmt!(ExpressionStmt, StmtType::ExpressionStmt);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub kind: VarKind,
    pub identifier: String,
    pub explicit_type: Option<TypeAnnotation>,
    pub assigned_value: Option<ExprWrapper>,
    pub span: Span,
}

impl_stmt!(VarDeclStmt, StmtType::VarDeclStmt);

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import local from '...'`
    Default { local: String },
    /// `import { imported as local } from '...'`
    Named { imported: String, local: String },
    /// `import * as local from '...'`
    Namespace { local: String },
}

#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub span: Span,
}

impl ImportStmt {
    /// Local name of the first default-style binding, if any.
    pub fn default_binding(&self) -> Option<&str> {
        self.specifiers.iter().find_map(|specifier| match specifier {
            ImportSpecifier::Default { local } => Some(local.as_str()),
            _ => None,
        })
    }
}

impl_stmt!(ImportStmt, StmtType::ImportStmt);

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub then_body: StmtWrapper,
    pub else_body: Option<StmtWrapper>,
    pub span: Span,
}

impl_stmt!(IfStmt, StmtType::IfStmt);

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: ExprWrapper,
    pub body: StmtWrapper,
    pub span: Span,
}

impl_stmt!(WhileStmt, StmtType::WhileStmt);

#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub function: Function,
    pub span: Span,
}

impl_stmt!(FnDeclStmt, StmtType::FnDeclStmt);

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<ExprWrapper>,
    pub span: Span,
}

impl_stmt!(ReturnStmt, StmtType::ReturnStmt);

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub value: ExprWrapper,
    pub span: Span,
}

impl_stmt!(ThrowStmt, StmtType::ThrowStmt);

/// `export <declaration>` or `export default <expression>;`
#[derive(Debug, Clone)]
pub struct ExportStmt {
    pub is_default: bool,
    pub declaration: StmtWrapper,
    pub span: Span,
}

impl_stmt!(ExportStmt, StmtType::ExportStmt);
