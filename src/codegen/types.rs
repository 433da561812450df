use crate::ast::types::{ObjectAnnotation, TypeAnnotation};

use super::expr::quote;

/// Annotation precedence, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy)]
enum TypePrecedence {
    Function,
    Union,
    Intersection,
    Prefix,
    Postfix,
    Primary,
}

fn type_precedence(annotation: &TypeAnnotation) -> TypePrecedence {
    match annotation {
        TypeAnnotation::Function(_) => TypePrecedence::Function,
        TypeAnnotation::Union(_) => TypePrecedence::Union,
        TypeAnnotation::Intersection(_) => TypePrecedence::Intersection,
        TypeAnnotation::Nullable(_) => TypePrecedence::Prefix,
        TypeAnnotation::Array(_) => TypePrecedence::Postfix,
        _ => TypePrecedence::Primary,
    }
}

/// Prints an annotation in Flow syntax.
pub fn gen_type(annotation: &TypeAnnotation) -> String {
    gen_type_operand(annotation, TypePrecedence::Function)
}

fn gen_type_operand(annotation: &TypeAnnotation, min: TypePrecedence) -> String {
    let text = gen_bare_type(annotation);

    if type_precedence(annotation) < min {
        format!("({})", text)
    } else {
        text
    }
}

fn gen_type_list(types: &[TypeAnnotation], separator: &str, min: TypePrecedence) -> String {
    types
        .iter()
        .map(|ty| gen_type_operand(ty, min))
        .collect::<Vec<_>>()
        .join(separator)
}

fn gen_bare_type(annotation: &TypeAnnotation) -> String {
    match annotation {
        TypeAnnotation::Named {
            name,
            type_arguments,
        } => match type_arguments {
            Some(arguments) => format!(
                "{}<{}>",
                name,
                gen_type_list(arguments, ", ", TypePrecedence::Function)
            ),
            None => name.to_string(),
        },
        TypeAnnotation::Array(element) => format!("{}[]", gen_type_operand(element, TypePrecedence::Postfix)),
        TypeAnnotation::Nullable(inner) => format!("?{}", gen_type_operand(inner, TypePrecedence::Prefix)),
        TypeAnnotation::Tuple(types) => format!("[{}]", gen_type_list(types, ", ", TypePrecedence::Function)),
        TypeAnnotation::Union(types) => gen_type_list(types, " | ", TypePrecedence::Intersection),
        TypeAnnotation::Intersection(types) => gen_type_list(types, " & ", TypePrecedence::Prefix),
        TypeAnnotation::Object(object) => gen_object_type(object),
        TypeAnnotation::Function(function) => {
            let parameters = function
                .parameters
                .iter()
                .map(|parameter| match &parameter.name {
                    Some(name) => format!("{}: {}", name, gen_type(&parameter.annotation)),
                    None => gen_type(&parameter.annotation),
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("({}) => {}", parameters, gen_type(&function.return_type))
        }
        TypeAnnotation::Keyword(keyword) => keyword.name().to_string(),
        TypeAnnotation::StringLiteral(value) => quote(value),
        TypeAnnotation::NumberLiteral(raw) => raw.clone(),
        TypeAnnotation::BooleanLiteral(value) => value.to_string(),
    }
}

fn gen_object_type(object: &ObjectAnnotation) -> String {
    let mut members: Vec<String> = object
        .indexers
        .iter()
        .map(|indexer| {
            let key = match &indexer.name {
                Some(name) => format!("{}: {}", name, gen_type(&indexer.key)),
                None => gen_type(&indexer.key),
            };
            format!("[{}]: {}", key, gen_type(&indexer.value))
        })
        .collect();

    members.extend(object.properties.iter().map(|property| {
        format!(
            "{}{}: {}",
            property.name,
            if property.optional { "?" } else { "" },
            gen_type(&property.value)
        )
    }));

    match (object.exact, members.is_empty()) {
        (true, true) => String::from("{||}"),
        (false, true) => String::from("{}"),
        (true, false) => format!("{{| {} |}}", members.join(", ")),
        (false, false) => format!("{{ {} }}", members.join(", ")),
    }
}
