//! Turns a type annotation into an expression that evaluates to a runtime
//! validator.
//!
//! | annotation            | validator                         |
//! |-----------------------|-----------------------------------|
//! | `Array<T>`, `T[]`     | `alias.list(T)`                   |
//! | `?T`                  | `alias.maybe(T)`                  |
//! | `[A, B]`              | `alias.tuple([A, B])`             |
//! | `A \| B`              | `alias.union([A, B])`             |
//! | `{ [k: K]: V }`       | `alias.dict(K, V)`                |
//! | `A & B`               | `alias.intersection([A, B])`      |
//! | `(a: A, B) => R`      | `alias.func([A, B], R)`           |
//! | `Mod.Type`            | `Mod.Type`                        |

use crate::{
    ast::{
        ast::ExprWrapper,
        expressions::{ArrayExpr, CallExpr, MemberExpr, SymbolExpr},
        types::{QualifiedName, TypeAnnotation},
    },
    errors::errors::ErrorImpl,
};

use super::alias::TranslationContext;

pub fn translate(ctx: &TranslationContext, annotation: &TypeAnnotation) -> Result<ExprWrapper, ErrorImpl> {
    match annotation {
        TypeAnnotation::Named {
            name,
            type_arguments,
        } if name.is_simple("Array") => match type_arguments.as_deref() {
            Some([element]) => Ok(library_call(ctx, "list", vec![translate(ctx, element)?])),
            _ => Err(ErrorImpl::UnsupportedArrayAnnotation),
        },
        // Type arguments of any other generic are not checked
        TypeAnnotation::Named { name, .. } => Ok(qualified_reference(name)),
        TypeAnnotation::Array(element) => Ok(library_call(ctx, "list", vec![translate(ctx, element)?])),
        TypeAnnotation::Nullable(inner) => Ok(library_call(ctx, "maybe", vec![translate(ctx, inner)?])),
        TypeAnnotation::Tuple(types) => Ok(library_call(ctx, "tuple", vec![translate_list(ctx, types)?])),
        TypeAnnotation::Union(types) => Ok(library_call(ctx, "union", vec![translate_list(ctx, types)?])),
        TypeAnnotation::Object(object) => match object.indexers.as_slice() {
            [indexer] => Ok(library_call(
                ctx,
                "dict",
                vec![translate(ctx, &indexer.key)?, translate(ctx, &indexer.value)?],
            )),
            _ => Err(ErrorImpl::UnsupportedObjectAnnotation),
        },
        TypeAnnotation::Intersection(types) => Ok(library_call(
            ctx,
            "intersection",
            vec![translate_list(ctx, types)?],
        )),
        TypeAnnotation::Function(function) => {
            let domain = function
                .parameters
                .iter()
                .map(|parameter| translate(ctx, &parameter.annotation))
                .collect::<Result<Vec<_>, _>>()?;
            let codomain = translate(ctx, &function.return_type)?;

            Ok(library_call(
                ctx,
                "func",
                vec![ExprWrapper::new(ArrayExpr::new(domain)), codomain],
            ))
        }
        TypeAnnotation::Keyword(_)
        | TypeAnnotation::StringLiteral(_)
        | TypeAnnotation::NumberLiteral(_)
        | TypeAnnotation::BooleanLiteral(_) => Err(ErrorImpl::UnsupportedAnnotation {
            kind: annotation.kind(),
        }),
    }
}

/// `[translate(a), translate(b), ...]`
fn translate_list(ctx: &TranslationContext, types: &[TypeAnnotation]) -> Result<ExprWrapper, ErrorImpl> {
    let elements = types
        .iter()
        .map(|ty| translate(ctx, ty))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExprWrapper::new(ArrayExpr::new(elements)))
}

/// `alias.name(arguments)`
pub fn library_call(ctx: &TranslationContext, name: &str, arguments: Vec<ExprWrapper>) -> ExprWrapper {
    let callee = ExprWrapper::new(MemberExpr::new(
        ExprWrapper::new(SymbolExpr::new(ctx.alias.as_str())),
        name,
    ));

    ExprWrapper::new(CallExpr::new(callee, arguments))
}

/// `A.B.C` as nested member accesses rooted at identifier `A`.
pub fn qualified_reference(name: &QualifiedName) -> ExprWrapper {
    name.segments()[1..]
        .iter()
        .fold(ExprWrapper::new(SymbolExpr::new(name.root())), |object, member| {
            ExprWrapper::new(MemberExpr::new(object, member.as_str()))
        })
}
