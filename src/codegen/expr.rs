use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper},
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, FunctionExpr, IndexExpr,
            LiteralExpr, Literals, MemberExpr, NewExpr, NumberExpr, ObjectExpr, PrefixExpr, StringExpr,
            SymbolExpr,
        },
        functions::{Function, FunctionBody, Parameter},
    },
    lexer::tokens::TokenKind,
    parser::lookups::BindingPower,
};

use super::{stmt::gen_block, types::gen_type};

/// Prints an expression that appears at `indent`, in a position that
/// accepts any expression.
pub fn gen_expression(expr: &ExprWrapper, indent: usize) -> String {
    gen_operand(expr, indent, BindingPower::Default)
}

/// Prints `expr`, parenthesised when it binds looser than `min`.
fn gen_operand(expr: &ExprWrapper, indent: usize, min: BindingPower) -> String {
    let text = gen_bare(expr, indent);

    if precedence(expr) < min {
        format!("({})", text)
    } else {
        text
    }
}

/// Operand of a left associative operator on its right side: an operand of
/// equal precedence needs parentheses too, `a - (b - c)`.
fn gen_right_operand(expr: &ExprWrapper, indent: usize, operator: BindingPower) -> String {
    let text = gen_bare(expr, indent);

    if precedence(expr) <= operator {
        format!("({})", text)
    } else {
        text
    }
}

/// Callee of a call or object of a member access. A function expression
/// there must be parenthesised, and so must an integer literal, whose `.`
/// would otherwise read as a decimal point.
fn gen_callee(expr: &ExprWrapper, indent: usize) -> String {
    let needs_parens = match expr.get_expr_type() {
        ExprType::Function => true,
        ExprType::Number => expr
            .downcast_ref::<NumberExpr>()
            .map(|number| !number.raw.contains(|c: char| matches!(c, '.' | 'e' | 'E')))
            .unwrap_or(false),
        _ => false,
    };

    if needs_parens {
        return format!("({})", gen_bare(expr, indent));
    }

    gen_operand(expr, indent, BindingPower::Call)
}

/// Whether a call sits anywhere along the member and index chain of a `new`
/// callee. Printed bare, that call would take the `new` arguments.
fn chain_contains_call(expr: &ExprWrapper) -> bool {
    match expr.get_expr_type() {
        ExprType::CallExpr => true,
        ExprType::Member => expr
            .downcast_ref::<MemberExpr>()
            .is_some_and(|member| chain_contains_call(&member.object)),
        ExprType::Index => expr
            .downcast_ref::<IndexExpr>()
            .is_some_and(|index| chain_contains_call(&index.object)),
        _ => false,
    }
}

pub fn precedence(expr: &ExprWrapper) -> BindingPower {
    match expr.get_expr_type() {
        ExprType::Number
        | ExprType::String
        | ExprType::Symbol
        | ExprType::This
        | ExprType::Literal
        | ExprType::Array
        | ExprType::Object => BindingPower::Primary,
        ExprType::Function => match expr.downcast_ref::<FunctionExpr>() {
            Some(function) if function.function.is_arrow => BindingPower::Assignment,
            _ => BindingPower::Primary,
        },
        ExprType::Binary => expr
            .downcast_ref::<BinaryExpr>()
            .map(|binary| binary_precedence(binary.operator.kind))
            .unwrap_or(BindingPower::Primary),
        ExprType::Prefix => BindingPower::Unary,
        ExprType::Assignment => BindingPower::Assignment,
        ExprType::Conditional => BindingPower::Conditional,
        ExprType::CallExpr | ExprType::New => BindingPower::Call,
        ExprType::Member | ExprType::Index => BindingPower::Member,
    }
}

fn binary_precedence(kind: TokenKind) -> BindingPower {
    match kind {
        TokenKind::Or => BindingPower::LogicalOr,
        TokenKind::And => BindingPower::LogicalAnd,
        TokenKind::Equals | TokenKind::NotEquals | TokenKind::StrictEquals | TokenKind::StrictNotEquals => {
            BindingPower::Equality
        }
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals
        | TokenKind::Instanceof
        | TokenKind::In => BindingPower::Relational,
        TokenKind::Plus | TokenKind::Dash => BindingPower::Additive,
        _ => BindingPower::Multiplicative,
    }
}

fn gen_bare(expr: &ExprWrapper, indent: usize) -> String {
    match expr.get_expr_type() {
        ExprType::Number => expr
            .downcast_ref::<NumberExpr>()
            .map(|number| number.raw.clone())
            .unwrap_or_default(),
        ExprType::String => expr
            .downcast_ref::<StringExpr>()
            .map(|string| quote(&string.value))
            .unwrap_or_default(),
        ExprType::Symbol => expr
            .downcast_ref::<SymbolExpr>()
            .map(|symbol| symbol.value.clone())
            .unwrap_or_default(),
        ExprType::This => String::from("this"),
        ExprType::Literal => match expr.downcast_ref::<LiteralExpr>().map(|literal| literal.literal) {
            Some(Literals::Boolean(true)) => String::from("true"),
            Some(Literals::Boolean(false)) => String::from("false"),
            _ => String::from("null"),
        },
        ExprType::Array => {
            let Some(array) = expr.downcast_ref::<ArrayExpr>() else {
                return String::new();
            };
            format!("[{}]", gen_arguments(&array.elements, indent))
        }
        ExprType::Object => {
            let Some(object) = expr.downcast_ref::<ObjectExpr>() else {
                return String::new();
            };
            if object.properties.is_empty() {
                return String::from("{}");
            }
            let properties: Vec<String> = object
                .properties
                .iter()
                .map(|(key, value)| {
                    format!(
                        "{}: {}",
                        property_key(key),
                        gen_operand(value, indent, BindingPower::Assignment)
                    )
                })
                .collect();
            format!("{{ {} }}", properties.join(", "))
        }
        ExprType::Binary => {
            let Some(binary) = expr.downcast_ref::<BinaryExpr>() else {
                return String::new();
            };
            let operator = binary_precedence(binary.operator.kind);
            format!(
                "{} {} {}",
                gen_operand(&binary.left, indent, operator),
                binary.operator.value,
                gen_right_operand(&binary.right, indent, operator)
            )
        }
        ExprType::Prefix => {
            let Some(prefix) = expr.downcast_ref::<PrefixExpr>() else {
                return String::new();
            };
            let operand = gen_operand(&prefix.right_expr, indent, BindingPower::Unary);
            let operator = &prefix.operator.value;
            // `typeof x`, and `- -x` rather than the decrement `--x`
            if prefix.operator.kind == TokenKind::Typeof || operand.starts_with(operator.as_str()) {
                format!("{} {}", operator, operand)
            } else {
                format!("{}{}", operator, operand)
            }
        }
        ExprType::Assignment => {
            let Some(assignment) = expr.downcast_ref::<AssignmentExpr>() else {
                return String::new();
            };
            format!(
                "{} {} {}",
                gen_operand(&assignment.assignee, indent, BindingPower::Call),
                assignment.operator.value,
                gen_operand(&assignment.value, indent, BindingPower::Assignment)
            )
        }
        ExprType::Conditional => {
            let Some(conditional) = expr.downcast_ref::<ConditionalExpr>() else {
                return String::new();
            };
            format!(
                "{} ? {} : {}",
                gen_operand(&conditional.test, indent, BindingPower::LogicalOr),
                gen_operand(&conditional.consequent, indent, BindingPower::Assignment),
                gen_operand(&conditional.alternate, indent, BindingPower::Assignment)
            )
        }
        ExprType::CallExpr => {
            let Some(call) = expr.downcast_ref::<CallExpr>() else {
                return String::new();
            };
            format!(
                "{}({})",
                gen_callee(&call.callee, indent),
                gen_arguments(&call.arguments, indent)
            )
        }
        ExprType::New => {
            let Some(new) = expr.downcast_ref::<NewExpr>() else {
                return String::new();
            };
            let callee = if chain_contains_call(&new.callee) {
                format!("({})", gen_bare(&new.callee, indent))
            } else {
                gen_callee(&new.callee, indent)
            };
            format!("new {}({})", callee, gen_arguments(&new.arguments, indent))
        }
        ExprType::Member => {
            let Some(member) = expr.downcast_ref::<MemberExpr>() else {
                return String::new();
            };
            format!("{}.{}", gen_callee(&member.object, indent), member.property)
        }
        ExprType::Index => {
            let Some(index) = expr.downcast_ref::<IndexExpr>() else {
                return String::new();
            };
            format!(
                "{}[{}]",
                gen_callee(&index.object, indent),
                gen_expression(&index.index, indent)
            )
        }
        ExprType::Function => expr
            .downcast_ref::<FunctionExpr>()
            .map(|function| gen_function(&function.function, indent))
            .unwrap_or_default(),
    }
}

fn gen_arguments(arguments: &[ExprWrapper], indent: usize) -> String {
    arguments
        .iter()
        .map(|argument| gen_operand(argument, indent, BindingPower::Assignment))
        .collect::<Vec<_>>()
        .join(", ")
}

fn gen_parameter(parameter: &Parameter, indent: usize) -> String {
    let mut text = parameter.name.clone();

    if let Some(annotation) = &parameter.annotation {
        text.push_str(": ");
        text.push_str(&gen_type(annotation));
    }
    if let Some(default_value) = &parameter.default_value {
        text.push_str(" = ");
        text.push_str(&gen_operand(default_value, indent, BindingPower::Assignment));
    }

    text
}

/// `function name(a: A): R { ... }` or `(a: A): R => ...`
///
/// The body is laid out for a function whose first line sits at `indent`.
pub fn gen_function(function: &Function, indent: usize) -> String {
    let parameters = function
        .parameters
        .iter()
        .map(|parameter| gen_parameter(parameter, indent))
        .collect::<Vec<_>>()
        .join(", ");

    let return_type = function
        .return_type
        .as_ref()
        .map(|annotation| format!(": {}", gen_type(annotation)))
        .unwrap_or_default();

    let body = match &function.body {
        FunctionBody::Block(block) => gen_block(block, indent),
        FunctionBody::Expression(expression) => {
            // `() => ({})` keeps the object from reading as a block
            if expression.get_expr_type() == ExprType::Object {
                format!("({})", gen_bare(expression, indent))
            } else {
                gen_operand(expression, indent, BindingPower::Assignment)
            }
        }
    };

    if function.is_arrow {
        format!("({}){} => {}", parameters, return_type, body)
    } else {
        match &function.identifier {
            Some(name) => format!("function {}({}){} {}", name, parameters, return_type, body),
            None => format!("function ({}){} {}", parameters, return_type, body),
        }
    }
}

/// Object literal keys that are not plain identifiers are quoted.
fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .map(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        .unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Single quoted string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');

    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // `\0` before a digit would read as an octal escape
            '\0' => out.push_str("\\x00"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }

    out.push('\'');
    out
}
