use std::{any::Any, fmt::Debug, ops::Deref};

use crate::Span;

use super::statements::ExpressionStmt;

/// Statement Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum StmtType {
    ExpressionStmt,
    BlockStmt,
    ImportStmt,
    VarDeclStmt,
    IfStmt,
    WhileStmt,
    FnDeclStmt,
    ReturnStmt,
    ThrowStmt,
    ExportStmt,
}

/// Statement Trait
///
/// Defines the behavior of all statement types in the AST.
pub trait Stmt: Debug {
    /// Returns the type of the statement.
    fn get_stmt_type(&self) -> StmtType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Mutable counterpart of `as_any`, used by passes that rewrite in place.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Clones the statement into a StmtWrapper.
    /// Clone cannot be derived for trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> StmtWrapper;
    /// Returns the span of the statement.
    fn get_span(&self) -> &Span;
}

/// Statement Wrapper
///
/// A wrapper that allows for any statement kind to be stored with helper methods
#[derive(Debug)]
pub struct StmtWrapper(Box<dyn Stmt>);

impl StmtWrapper {
    pub fn new<T: Stmt + 'static>(stmt: T) -> Self {
        StmtWrapper(Box::new(stmt))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }
}

impl Deref for StmtWrapper {
    type Target = Box<dyn Stmt>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Stmt for StmtWrapper {
    fn get_stmt_type(&self) -> StmtType {
        self.0.get_stmt_type()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self.0.as_any_mut()
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
}

impl Clone for StmtWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Number,
    String,
    Symbol,
    This,
    Literal,
    Array,
    Object,
    Binary,
    Prefix,
    Assignment,
    Conditional,
    CallExpr,
    New,
    Member,
    Index,
    Function,
}

pub trait Expr: Debug {
    /// Returns the expression type of the expression.
    fn get_expr_type(&self) -> ExprType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Mutable counterpart of `as_any`, used by passes that rewrite in place.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Clones the expression into an ExprWrapper.
    /// Clone cannot be derived for trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> ExprWrapper;
    /// Returns the span of the expression.
    fn get_span(&self) -> &Span;
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    /// Wraps a copy of the expression in an expression statement.
    pub fn to_stmt_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(ExpressionStmt {
            expression: self.0.clone_wrapper(),
            span: self.0.get_span().clone(),
        })
    }
}

impl Expr for ExprWrapper {
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self.0.as_any_mut()
    }
    fn get_expr_type(&self) -> ExprType {
        self.0.get_expr_type()
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
}

impl Clone for ExprWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

/// Implements `Stmt` for a cloneable node with a `span` field.
macro_rules! impl_stmt {
    ($node:ty, $kind:expr) => {
        impl $crate::ast::ast::Stmt for $node {
            fn get_stmt_type(&self) -> $crate::ast::ast::StmtType {
                $kind
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
            fn clone_wrapper(&self) -> $crate::ast::ast::StmtWrapper {
                $crate::ast::ast::StmtWrapper::new(self.clone())
            }
            fn get_span(&self) -> &$crate::Span {
                &self.span
            }
        }
    };
}

/// Implements `Expr` for a cloneable node with a `span` field.
macro_rules! impl_expr {
    ($node:ty, $kind:expr) => {
        impl $crate::ast::ast::Expr for $node {
            fn get_expr_type(&self) -> $crate::ast::ast::ExprType {
                $kind
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
            fn clone_wrapper(&self) -> $crate::ast::ast::ExprWrapper {
                $crate::ast::ast::ExprWrapper::new(self.clone())
            }
            fn get_span(&self) -> &$crate::Span {
                &self.span
            }
        }
    };
}

pub(crate) use impl_expr;
pub(crate) use impl_stmt;
