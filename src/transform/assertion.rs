use crate::{
    ast::{
        ast::{ExprWrapper, StmtWrapper},
        expressions::{CallExpr, MemberExpr},
        types::TypeAnnotation,
    },
    errors::errors::ErrorImpl,
};

use super::{
    alias::TranslationContext,
    translator::{library_call, translate},
};

/// `alias.assert(validator.is(value));`
///
/// `value` is placed in the output once and never duplicated.
pub fn emit_assertion(ctx: &TranslationContext, validator: ExprWrapper, value: ExprWrapper) -> StmtWrapper {
    let is = ExprWrapper::new(CallExpr::new(
        ExprWrapper::new(MemberExpr::new(validator, "is")),
        vec![value],
    ));

    library_call(ctx, "assert", vec![is]).to_stmt_wrapper()
}

/// Translates `annotation` and asserts `value` against it.
pub fn emit_type_assertion(
    ctx: &TranslationContext,
    annotation: &TypeAnnotation,
    value: ExprWrapper,
) -> Result<StmtWrapper, ErrorImpl> {
    let validator = translate(ctx, annotation)?;
    Ok(emit_assertion(ctx, validator, value))
}
