//! Inserts argument and return value checks into annotated functions.
//!
//! ```text
//! function f(a: A): R { body }
//! ```
//!
//! becomes
//!
//! ```text
//! function f(a: A): R {
//!   t.assert(A.is(a));
//!   const ret = (function (a) { body }).call(this, a);
//!   t.assert(R.is(ret));
//!   return ret;
//! }
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper, Stmt, StmtType, StmtWrapper},
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, FunctionExpr, IndexExpr,
            MemberExpr, NewExpr, ObjectExpr, PrefixExpr, SymbolExpr, ThisExpr,
        },
        functions::{Function, FunctionBody, Parameter},
        statements::{
            BlockStmt, ExportStmt, ExpressionStmt, FnDeclStmt, IfStmt, ImportSpecifier, ImportStmt,
            ReturnStmt, ThrowStmt, VarDeclStmt, VarKind, WhileStmt,
        },
    },
    config::TransformConfig,
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{alias::TranslationContext, assertion::emit_type_assertion};

pub struct FunctionRewriter {
    result_binding: String,
}

/// Everything a rewrite inserts, computed before the function is touched.
struct RewritePlan {
    body: BlockStmt,
    parameter_checks: usize,
    return_check: bool,
}

impl FunctionRewriter {
    pub fn new(config: &TransformConfig) -> Self {
        FunctionRewriter {
            result_binding: config.result_binding.clone(),
        }
    }

    /// Rewrites `function` in place. On error the function is left as it was
    /// and the error carries the `[typeguard]` prefix.
    pub fn rewrite(&self, ctx: &TranslationContext, function: &mut Function) -> Result<(), Error> {
        if !function.has_annotations() && !function.has_expression_body() {
            return Ok(());
        }

        let plan = self
            .plan(ctx, function)
            .map_err(|reason| Error::new(reason.into_rewrite_error(), function.span.start.clone()))?;

        if plan.parameter_checks > 0 || plan.return_check {
            debug!(
                function = function.display_name(),
                parameter_checks = plan.parameter_checks,
                return_check = plan.return_check,
                alias = %ctx.alias,
                "inserted runtime type checks"
            );
        }

        function.body = FunctionBody::Block(plan.body);
        Ok(())
    }

    fn plan(&self, ctx: &TranslationContext, function: &Function) -> Result<RewritePlan, ErrorImpl> {
        let mut body = normalized_body(function);

        let mut checks = vec![];
        for parameter in &function.parameters {
            let Some(annotation) = &parameter.annotation else {
                continue;
            };
            if parameter.default_value.is_some() {
                return Err(ErrorImpl::TypedDefaultValueUnsupported {
                    parameter: parameter.name.clone(),
                });
            }

            let value = ExprWrapper::new(SymbolExpr::new(parameter.name.as_str()));
            checks.push(emit_type_assertion(ctx, annotation, value)?);
        }

        let return_check = function.return_type.is_some();
        if let Some(return_type) = &function.return_type {
            let binding = self.fresh_binding(ctx, function);

            let result = ExprWrapper::new(SymbolExpr::new(binding.as_str()));
            let assertion = emit_type_assertion(ctx, return_type, result.clone())?;

            let span = body.span.clone();
            let capture = StmtWrapper::new(VarDeclStmt {
                kind: VarKind::Const,
                identifier: binding,
                explicit_type: None,
                assigned_value: Some(invoke_original_body(function, body)),
                span: Span::null(),
            });
            let ret = StmtWrapper::new(ReturnStmt {
                value: Some(result),
                span: Span::null(),
            });

            body = BlockStmt {
                body: vec![capture, assertion, ret],
                span,
            };
        }

        let parameter_checks = checks.len();
        checks.append(&mut body.body);
        body.body = checks;

        Ok(RewritePlan {
            body,
            parameter_checks,
            return_check,
        })
    }

    /// `ret`, `ret1`, `ret2`, ... whichever is not already used in the
    /// function or taken by the library alias.
    fn fresh_binding(&self, ctx: &TranslationContext, function: &Function) -> String {
        let mut taken = HashSet::new();
        taken.insert(ctx.alias.clone());
        collect_function(function, &mut taken);

        let mut candidate = self.result_binding.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}{}", self.result_binding, suffix);
            suffix += 1;
        }

        candidate
    }
}

/// The body as a block; `x => expr` becomes `{ return expr; }`.
fn normalized_body(function: &Function) -> BlockStmt {
    match &function.body {
        FunctionBody::Block(block) => block.clone(),
        FunctionBody::Expression(expression) => {
            let span = expression.get_span().clone();
            BlockStmt {
                body: vec![StmtWrapper::new(ReturnStmt {
                    value: Some(expression.clone()),
                    span: span.clone(),
                })],
                span,
            }
        }
    }
}

/// `(function (a, b) { body }).call(this, a, b)`
fn invoke_original_body(function: &Function, body: BlockStmt) -> ExprWrapper {
    let names: Vec<&str> = function
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();

    let inner = Function {
        identifier: None,
        parameters: names.iter().map(|name| Parameter::new(*name)).collect(),
        return_type: None,
        body: FunctionBody::Block(body),
        is_arrow: false,
        span: Span::null(),
    };

    let mut arguments = vec![ExprWrapper::new(ThisExpr { span: Span::null() })];
    arguments.extend(names.iter().map(|name| ExprWrapper::new(SymbolExpr::new(*name))));

    let callee = ExprWrapper::new(MemberExpr::new(
        ExprWrapper::new(FunctionExpr {
            function: inner,
            span: Span::null(),
        }),
        "call",
    ));

    ExprWrapper::new(CallExpr::new(callee, arguments))
}

fn collect_function(function: &Function, names: &mut HashSet<String>) {
    if let Some(identifier) = &function.identifier {
        names.insert(identifier.clone());
    }

    for parameter in &function.parameters {
        names.insert(parameter.name.clone());
        if let Some(annotation) = &parameter.annotation {
            annotation.for_each_root_name(&mut |name| {
                names.insert(name.to_string());
            });
        }
        if let Some(default_value) = &parameter.default_value {
            collect_expr(default_value, names);
        }
    }

    if let Some(return_type) = &function.return_type {
        return_type.for_each_root_name(&mut |name| {
            names.insert(name.to_string());
        });
    }

    match &function.body {
        FunctionBody::Block(block) => collect_block(block, names),
        FunctionBody::Expression(expression) => collect_expr(expression, names),
    }
}

fn collect_block(block: &BlockStmt, names: &mut HashSet<String>) {
    for stmt in block.iter() {
        collect_stmt(stmt, names);
    }
}

fn collect_stmt(stmt: &StmtWrapper, names: &mut HashSet<String>) {
    match stmt.get_stmt_type() {
        StmtType::BlockStmt => {
            if let Some(block) = stmt.downcast_ref::<BlockStmt>() {
                collect_block(block, names);
            }
        }
        StmtType::ExpressionStmt => {
            if let Some(stmt) = stmt.downcast_ref::<ExpressionStmt>() {
                collect_expr(&stmt.expression, names);
            }
        }
        StmtType::ImportStmt => {
            if let Some(import) = stmt.downcast_ref::<ImportStmt>() {
                for specifier in &import.specifiers {
                    let local = match specifier {
                        ImportSpecifier::Default { local }
                        | ImportSpecifier::Named { local, .. }
                        | ImportSpecifier::Namespace { local } => local,
                    };
                    names.insert(local.clone());
                }
            }
        }
        StmtType::VarDeclStmt => {
            if let Some(decl) = stmt.downcast_ref::<VarDeclStmt>() {
                names.insert(decl.identifier.clone());
                if let Some(value) = &decl.assigned_value {
                    collect_expr(value, names);
                }
            }
        }
        StmtType::IfStmt => {
            if let Some(stmt) = stmt.downcast_ref::<IfStmt>() {
                collect_expr(&stmt.condition, names);
                collect_stmt(&stmt.then_body, names);
                if let Some(else_body) = &stmt.else_body {
                    collect_stmt(else_body, names);
                }
            }
        }
        StmtType::WhileStmt => {
            if let Some(stmt) = stmt.downcast_ref::<WhileStmt>() {
                collect_expr(&stmt.condition, names);
                collect_stmt(&stmt.body, names);
            }
        }
        StmtType::FnDeclStmt => {
            if let Some(decl) = stmt.downcast_ref::<FnDeclStmt>() {
                collect_function(&decl.function, names);
            }
        }
        StmtType::ReturnStmt => {
            if let Some(value) = stmt.downcast_ref::<ReturnStmt>().and_then(|stmt| stmt.value.as_ref()) {
                collect_expr(value, names);
            }
        }
        StmtType::ThrowStmt => {
            if let Some(stmt) = stmt.downcast_ref::<ThrowStmt>() {
                collect_expr(&stmt.value, names);
            }
        }
        StmtType::ExportStmt => {
            if let Some(export) = stmt.downcast_ref::<ExportStmt>() {
                collect_stmt(&export.declaration, names);
            }
        }
    }
}

fn collect_expr(expr: &ExprWrapper, names: &mut HashSet<String>) {
    match expr.get_expr_type() {
        ExprType::Symbol => {
            if let Some(symbol) = expr.downcast_ref::<SymbolExpr>() {
                names.insert(symbol.value.clone());
            }
        }
        ExprType::Array => {
            if let Some(array) = expr.downcast_ref::<ArrayExpr>() {
                array.elements.iter().for_each(|element| collect_expr(element, names));
            }
        }
        ExprType::Object => {
            if let Some(object) = expr.downcast_ref::<ObjectExpr>() {
                object.properties.iter().for_each(|(_, value)| collect_expr(value, names));
            }
        }
        ExprType::Binary => {
            if let Some(binary) = expr.downcast_ref::<BinaryExpr>() {
                collect_expr(&binary.left, names);
                collect_expr(&binary.right, names);
            }
        }
        ExprType::Prefix => {
            if let Some(prefix) = expr.downcast_ref::<PrefixExpr>() {
                collect_expr(&prefix.right_expr, names);
            }
        }
        ExprType::Assignment => {
            if let Some(assignment) = expr.downcast_ref::<AssignmentExpr>() {
                collect_expr(&assignment.assignee, names);
                collect_expr(&assignment.value, names);
            }
        }
        ExprType::Conditional => {
            if let Some(conditional) = expr.downcast_ref::<ConditionalExpr>() {
                collect_expr(&conditional.test, names);
                collect_expr(&conditional.consequent, names);
                collect_expr(&conditional.alternate, names);
            }
        }
        ExprType::CallExpr => {
            if let Some(call) = expr.downcast_ref::<CallExpr>() {
                collect_expr(&call.callee, names);
                call.arguments.iter().for_each(|argument| collect_expr(argument, names));
            }
        }
        ExprType::New => {
            if let Some(new) = expr.downcast_ref::<NewExpr>() {
                collect_expr(&new.callee, names);
                new.arguments.iter().for_each(|argument| collect_expr(argument, names));
            }
        }
        ExprType::Member => {
            if let Some(member) = expr.downcast_ref::<MemberExpr>() {
                collect_expr(&member.object, names);
            }
        }
        ExprType::Index => {
            if let Some(index) = expr.downcast_ref::<IndexExpr>() {
                collect_expr(&index.object, names);
                collect_expr(&index.index, names);
            }
        }
        ExprType::Function => {
            if let Some(function) = expr.downcast_ref::<FunctionExpr>() {
                collect_function(&function.function, names);
            }
        }
        ExprType::Number | ExprType::String | ExprType::This | ExprType::Literal => {}
    }
}
