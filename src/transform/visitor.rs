//! Depth-first walk over a program that fires the transform hooks.
//!
//! Hooks fire in source order. A function is handed to `on_function` before
//! its own subtree is visited, so whatever the hook leaves in the body
//! (including functions it synthesised) is walked afterwards.

use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper, Stmt, StmtType, StmtWrapper},
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, FunctionExpr, IndexExpr,
            MemberExpr, NewExpr, ObjectExpr, PrefixExpr,
        },
        functions::{Function, FunctionBody},
        statements::{
            BlockStmt, ExportStmt, ExpressionStmt, FnDeclStmt, IfStmt, ImportStmt, ReturnStmt, ThrowStmt,
            VarDeclStmt, WhileStmt,
        },
    },
    config::TransformConfig,
    errors::errors::Error,
};

use super::{alias::AliasTracker, rewriter::FunctionRewriter};

pub trait TransformHooks {
    /// Fires once per program, before any other hook.
    fn on_file_enter(&mut self) {}

    fn on_import(&mut self, _import: &ImportStmt) {}

    /// May rewrite the function in place. An error stops the traversal.
    fn on_function(&mut self, _function: &mut Function) -> Result<(), Error> {
        Ok(())
    }
}

/// The runtime type check pass: alias tracking plus function rewriting.
pub struct TypeAssertionPass {
    tracker: AliasTracker,
    rewriter: FunctionRewriter,
}

impl TypeAssertionPass {
    pub fn new(config: &TransformConfig) -> Self {
        TypeAssertionPass {
            tracker: AliasTracker::new(config),
            rewriter: FunctionRewriter::new(config),
        }
    }

    pub fn current_alias(&self) -> &str {
        self.tracker.current_alias()
    }
}

impl TransformHooks for TypeAssertionPass {
    fn on_file_enter(&mut self) {
        self.tracker.on_file_enter();
    }

    fn on_import(&mut self, import: &ImportStmt) {
        self.tracker.on_import(import);
    }

    fn on_function(&mut self, function: &mut Function) -> Result<(), Error> {
        self.rewriter.rewrite(&self.tracker.context(), function)
    }
}

pub fn traverse_program(program: &mut BlockStmt, hooks: &mut dyn TransformHooks) -> Result<(), Error> {
    hooks.on_file_enter();
    walk_block(program, hooks)
}

fn walk_block(block: &mut BlockStmt, hooks: &mut dyn TransformHooks) -> Result<(), Error> {
    for stmt in block.iter_mut() {
        walk_stmt(stmt, hooks)?;
    }

    Ok(())
}

fn walk_function(function: &mut Function, hooks: &mut dyn TransformHooks) -> Result<(), Error> {
    hooks.on_function(function)?;

    for parameter in function.parameters.iter_mut() {
        if let Some(default_value) = &mut parameter.default_value {
            walk_expr(default_value, hooks)?;
        }
    }

    match &mut function.body {
        FunctionBody::Block(block) => walk_block(block, hooks),
        FunctionBody::Expression(expression) => walk_expr(expression, hooks),
    }
}

fn walk_stmt(stmt: &mut StmtWrapper, hooks: &mut dyn TransformHooks) -> Result<(), Error> {
    match stmt.get_stmt_type() {
        StmtType::BlockStmt => {
            if let Some(block) = stmt.downcast_mut::<BlockStmt>() {
                walk_block(block, hooks)?;
            }
        }
        StmtType::ExpressionStmt => {
            if let Some(stmt) = stmt.downcast_mut::<ExpressionStmt>() {
                walk_expr(&mut stmt.expression, hooks)?;
            }
        }
        StmtType::ImportStmt => {
            if let Some(import) = stmt.downcast_ref::<ImportStmt>() {
                hooks.on_import(import);
            }
        }
        StmtType::VarDeclStmt => {
            if let Some(value) = stmt
                .downcast_mut::<VarDeclStmt>()
                .and_then(|decl| decl.assigned_value.as_mut())
            {
                walk_expr(value, hooks)?;
            }
        }
        StmtType::IfStmt => {
            if let Some(stmt) = stmt.downcast_mut::<IfStmt>() {
                walk_expr(&mut stmt.condition, hooks)?;
                walk_stmt(&mut stmt.then_body, hooks)?;
                if let Some(else_body) = &mut stmt.else_body {
                    walk_stmt(else_body, hooks)?;
                }
            }
        }
        StmtType::WhileStmt => {
            if let Some(stmt) = stmt.downcast_mut::<WhileStmt>() {
                walk_expr(&mut stmt.condition, hooks)?;
                walk_stmt(&mut stmt.body, hooks)?;
            }
        }
        StmtType::FnDeclStmt => {
            if let Some(decl) = stmt.downcast_mut::<FnDeclStmt>() {
                walk_function(&mut decl.function, hooks)?;
            }
        }
        StmtType::ReturnStmt => {
            if let Some(value) = stmt
                .downcast_mut::<ReturnStmt>()
                .and_then(|stmt| stmt.value.as_mut())
            {
                walk_expr(value, hooks)?;
            }
        }
        StmtType::ThrowStmt => {
            if let Some(stmt) = stmt.downcast_mut::<ThrowStmt>() {
                walk_expr(&mut stmt.value, hooks)?;
            }
        }
        StmtType::ExportStmt => {
            if let Some(export) = stmt.downcast_mut::<ExportStmt>() {
                walk_stmt(&mut export.declaration, hooks)?;
            }
        }
    }

    Ok(())
}

fn walk_expr(expr: &mut ExprWrapper, hooks: &mut dyn TransformHooks) -> Result<(), Error> {
    match expr.get_expr_type() {
        ExprType::Array => {
            if let Some(array) = expr.downcast_mut::<ArrayExpr>() {
                for element in array.elements.iter_mut() {
                    walk_expr(element, hooks)?;
                }
            }
        }
        ExprType::Object => {
            if let Some(object) = expr.downcast_mut::<ObjectExpr>() {
                for (_, value) in object.properties.iter_mut() {
                    walk_expr(value, hooks)?;
                }
            }
        }
        ExprType::Binary => {
            if let Some(binary) = expr.downcast_mut::<BinaryExpr>() {
                walk_expr(&mut binary.left, hooks)?;
                walk_expr(&mut binary.right, hooks)?;
            }
        }
        ExprType::Prefix => {
            if let Some(prefix) = expr.downcast_mut::<PrefixExpr>() {
                walk_expr(&mut prefix.right_expr, hooks)?;
            }
        }
        ExprType::Assignment => {
            if let Some(assignment) = expr.downcast_mut::<AssignmentExpr>() {
                walk_expr(&mut assignment.assignee, hooks)?;
                walk_expr(&mut assignment.value, hooks)?;
            }
        }
        ExprType::Conditional => {
            if let Some(conditional) = expr.downcast_mut::<ConditionalExpr>() {
                walk_expr(&mut conditional.test, hooks)?;
                walk_expr(&mut conditional.consequent, hooks)?;
                walk_expr(&mut conditional.alternate, hooks)?;
            }
        }
        ExprType::CallExpr => {
            if let Some(call) = expr.downcast_mut::<CallExpr>() {
                walk_expr(&mut call.callee, hooks)?;
                for argument in call.arguments.iter_mut() {
                    walk_expr(argument, hooks)?;
                }
            }
        }
        ExprType::New => {
            if let Some(new) = expr.downcast_mut::<NewExpr>() {
                walk_expr(&mut new.callee, hooks)?;
                for argument in new.arguments.iter_mut() {
                    walk_expr(argument, hooks)?;
                }
            }
        }
        ExprType::Member => {
            if let Some(member) = expr.downcast_mut::<MemberExpr>() {
                walk_expr(&mut member.object, hooks)?;
            }
        }
        ExprType::Index => {
            if let Some(index) = expr.downcast_mut::<IndexExpr>() {
                walk_expr(&mut index.object, hooks)?;
                walk_expr(&mut index.index, hooks)?;
            }
        }
        ExprType::Function => {
            if let Some(function) = expr.downcast_mut::<FunctionExpr>() {
                walk_function(&mut function.function, hooks)?;
            }
        }
        ExprType::Number | ExprType::String | ExprType::Symbol | ExprType::This | ExprType::Literal => {}
    }

    Ok(())
}
