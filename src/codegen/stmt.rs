use crate::ast::{
    ast::{Stmt, StmtType, StmtWrapper},
    statements::{
        BlockStmt, ExportStmt, ExpressionStmt, FnDeclStmt, IfStmt, ImportSpecifier, ImportStmt, ReturnStmt,
        ThrowStmt, VarDeclStmt, WhileStmt,
    },
};

use super::{
    expr::{gen_expression, gen_function, quote},
    printer::{indentation, Printer},
    types::gen_type,
};

pub fn gen_statement(printer: &mut Printer, statement: &StmtWrapper) {
    match statement.get_stmt_type() {
        StmtType::ExpressionStmt => {
            let Some(stmt) = statement.downcast_ref::<ExpressionStmt>() else {
                return;
            };
            let text = gen_expression(&stmt.expression, printer.indent());
            // A leading `function` or `{` would read as a declaration or block
            if text.starts_with("function ") || text.starts_with('{') {
                printer.line(&format!("({});", text));
            } else {
                printer.line(&format!("{};", text));
            }
        }
        StmtType::BlockStmt => {
            if let Some(block) = statement.downcast_ref::<BlockStmt>() {
                let text = gen_block(block, printer.indent());
                printer.line(&text);
            }
        }
        StmtType::VarDeclStmt => {
            let Some(decl) = statement.downcast_ref::<VarDeclStmt>() else {
                return;
            };
            let mut text = format!("{} {}", decl.kind.keyword(), decl.identifier);
            if let Some(annotation) = &decl.explicit_type {
                text.push_str(": ");
                text.push_str(&gen_type(annotation));
            }
            if let Some(value) = &decl.assigned_value {
                text.push_str(" = ");
                text.push_str(&gen_expression(value, printer.indent()));
            }
            text.push(';');
            printer.line(&text);
        }
        StmtType::ImportStmt => {
            if let Some(import) = statement.downcast_ref::<ImportStmt>() {
                printer.line(&gen_import(import));
            }
        }
        StmtType::IfStmt => {
            if let Some(stmt) = statement.downcast_ref::<IfStmt>() {
                let text = gen_if(stmt, printer.indent());
                printer.line(&text);
            }
        }
        StmtType::WhileStmt => {
            let Some(stmt) = statement.downcast_ref::<WhileStmt>() else {
                return;
            };
            let header = format!("while ({})", gen_expression(&stmt.condition, printer.indent()));
            let text = gen_clause(&header, &stmt.body, printer.indent());
            printer.line(&text);
        }
        StmtType::FnDeclStmt => {
            if let Some(decl) = statement.downcast_ref::<FnDeclStmt>() {
                let text = gen_function(&decl.function, printer.indent());
                printer.line(&text);
            }
        }
        StmtType::ReturnStmt => {
            let Some(stmt) = statement.downcast_ref::<ReturnStmt>() else {
                return;
            };
            match &stmt.value {
                Some(value) => printer.line(&format!("return {};", gen_expression(value, printer.indent()))),
                None => printer.line("return;"),
            }
        }
        StmtType::ThrowStmt => {
            if let Some(stmt) = statement.downcast_ref::<ThrowStmt>() {
                printer.line(&format!("throw {};", gen_expression(&stmt.value, printer.indent())));
            }
        }
        StmtType::ExportStmt => {
            if let Some(export) = statement.downcast_ref::<ExportStmt>() {
                let text = gen_export(export, printer.indent());
                printer.line(&text);
            }
        }
    }
}

/// `{ ... }` whose closing brace lines up with a statement at `indent`.
pub fn gen_block(block: &BlockStmt, indent: usize) -> String {
    if block.body.is_empty() {
        return String::from("{}");
    }

    let mut inner = Printer::new(indent + 1);
    for stmt in block.iter() {
        gen_statement(&mut inner, stmt);
    }

    format!("{{\n{}{}}}", inner.finish(), indentation(indent))
}

/// Prints one statement at `indent` and strips the leading indentation and
/// trailing newline, so the text can follow other text on the same line.
fn gen_inline_statement(statement: &StmtWrapper, indent: usize) -> String {
    let mut printer = Printer::new(indent);
    gen_statement(&mut printer, statement);

    let text = printer.finish();
    let prefix = indentation(indent);
    text.strip_prefix(prefix.as_str())
        .unwrap_or(text.as_str())
        .trim_end_matches('\n')
        .to_string()
}

/// `header { ... }`, or `header` with the statement on the next line.
fn gen_clause(header: &str, body: &StmtWrapper, indent: usize) -> String {
    match body.downcast_ref::<BlockStmt>() {
        Some(block) => format!("{} {}", header, gen_block(block, indent)),
        None => format!(
            "{}\n{}{}",
            header,
            indentation(indent + 1),
            gen_inline_statement(body, indent + 1)
        ),
    }
}

fn gen_if(stmt: &IfStmt, indent: usize) -> String {
    let header = format!("if ({})", gen_expression(&stmt.condition, indent));
    let mut text = gen_clause(&header, &stmt.then_body, indent);

    if let Some(else_body) = &stmt.else_body {
        let separator = if stmt.then_body.get_stmt_type() == StmtType::BlockStmt {
            String::from(" ")
        } else {
            format!("\n{}", indentation(indent))
        };
        text.push_str(&separator);

        match else_body.get_stmt_type() {
            StmtType::IfStmt | StmtType::BlockStmt => {
                text.push_str("else ");
                text.push_str(&gen_inline_statement(else_body, indent));
            }
            _ => text.push_str(&gen_clause("else", else_body, indent)),
        }
    }

    text
}

fn gen_import(import: &ImportStmt) -> String {
    let source = quote(&import.source);
    if import.specifiers.is_empty() {
        return format!("import {};", source);
    }

    let mut clauses = vec![];
    let mut named = vec![];

    for specifier in &import.specifiers {
        match specifier {
            ImportSpecifier::Default { local } => clauses.push(local.clone()),
            ImportSpecifier::Namespace { local } => clauses.push(format!("* as {}", local)),
            ImportSpecifier::Named { imported, local } if imported == local => named.push(local.clone()),
            ImportSpecifier::Named { imported, local } => named.push(format!("{} as {}", imported, local)),
        }
    }

    if !named.is_empty() {
        clauses.push(format!("{{ {} }}", named.join(", ")));
    }

    format!("import {} from {};", clauses.join(", "), source)
}

fn gen_export(export: &ExportStmt, indent: usize) -> String {
    let keyword = if export.is_default { "export default" } else { "export" };

    // `export default function () {}` needs neither parentheses nor `;`
    if let Some(stmt) = export.declaration.downcast_ref::<ExpressionStmt>() {
        let text = gen_expression(&stmt.expression, indent);
        if text.starts_with("function ") {
            return format!("{} {}", keyword, text);
        }
        return format!("{} {};", keyword, text);
    }

    format!("{} {}", keyword, gen_inline_statement(&export.declaration, indent))
}
