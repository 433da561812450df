//! Unit tests for the transform module.
//!
//! This module contains tests for:
//! - Annotation translation, one case per annotation shape
//! - Assertion emission
//! - Alias tracking across imports and files
//! - Function rewriting, including error cases

use std::rc::Rc;

use crate::{
    ast::{
        ast::ExprWrapper,
        expressions::SymbolExpr,
        functions::Function,
        statements::{BlockStmt, FnDeclStmt, ImportSpecifier, ImportStmt},
        types::{
            FunctionAnnotation, FunctionAnnotationParam, Indexer, Keyword, ObjectAnnotation, ObjectProperty,
            QualifiedName, TypeAnnotation,
        },
    },
    codegen::{
        expr::gen_expression,
        printer::Printer,
        stmt::gen_statement,
    },
    config::TransformConfig,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    transform_source, Span,
};

use super::{
    alias::{AliasState, AliasTracker, TranslationContext},
    assertion::{emit_assertion, emit_type_assertion},
    rewriter::FunctionRewriter,
    translator::translate,
    visitor::{traverse_program, TransformHooks, TypeAssertionPass},
};

fn ctx() -> TranslationContext {
    TranslationContext::new("t")
}

fn translated(annotation: &TypeAnnotation) -> String {
    gen_expression(&translate(&ctx(), annotation).unwrap(), 0)
}

fn named(name: &str) -> TypeAnnotation {
    TypeAnnotation::named(name)
}

fn generic(name: &str, arguments: Vec<TypeAnnotation>) -> TypeAnnotation {
    TypeAnnotation::Named {
        name: QualifiedName::new(name),
        type_arguments: Some(arguments),
    }
}

fn dictionary(indexers: usize) -> TypeAnnotation {
    TypeAnnotation::Object(ObjectAnnotation {
        properties: vec![],
        indexers: (0..indexers)
            .map(|_| Indexer {
                name: Some("key".to_string()),
                key: named("K"),
                value: named("V"),
            })
            .collect(),
        exact: false,
    })
}

fn transform(source: &str) -> String {
    transform_source(source, "test.js", &TransformConfig::default()).unwrap()
}

fn import(source: &str, specifiers: Vec<ImportSpecifier>) -> ImportStmt {
    ImportStmt {
        specifiers,
        source: source.to_string(),
        span: Span::null(),
    }
}

fn parse_program(source: &str) -> BlockStmt {
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();
    parse(tokens, Rc::new("test.js".to_string())).unwrap()
}

fn parse_function(source: &str) -> Function {
    let program = parse_program(source);
    program.body[0]
        .downcast_ref::<FnDeclStmt>()
        .unwrap()
        .function
        .clone()
}

#[test]
fn test_translate_named_types() {
    assert_eq!(translated(&named("String")), "String");
    assert_eq!(
        translated(&TypeAnnotation::Named {
            name: QualifiedName::new("Mod").qualify("Sub").qualify("Type"),
            type_arguments: None,
        }),
        "Mod.Sub.Type"
    );
}

#[test]
fn test_translate_generic_ignores_arguments() {
    assert_eq!(translated(&generic("Promise", vec![named("T")])), "Promise");
}

#[test]
fn test_translate_both_array_spellings_agree() {
    let generic_form = translated(&generic("Array", vec![named("Number")]));
    let native_form = translated(&TypeAnnotation::Array(Box::new(named("Number"))));

    assert_eq!(generic_form, "t.list(Number)");
    assert_eq!(generic_form, native_form);
}

#[test]
fn test_translate_array_argument_count() {
    assert_eq!(
        translate(&ctx(), &generic("Array", vec![])).unwrap_err(),
        ErrorImpl::UnsupportedArrayAnnotation
    );
    assert_eq!(
        translate(&ctx(), &generic("Array", vec![named("A"), named("B")])).unwrap_err(),
        ErrorImpl::UnsupportedArrayAnnotation
    );
    assert_eq!(
        translate(&ctx(), &named("Array")).unwrap_err(),
        ErrorImpl::UnsupportedArrayAnnotation
    );
}

#[test]
fn test_translate_nullable_wraps_inner_translation() {
    let inner = TypeAnnotation::Union(vec![named("A"), named("B")]);
    let nullable = TypeAnnotation::Nullable(Box::new(inner.clone()));

    assert_eq!(translated(&nullable), format!("t.maybe({})", translated(&inner)));
    assert_eq!(translated(&nullable), "t.maybe(t.union([A, B]))");
}

#[test]
fn test_translate_list_constructors() {
    assert_eq!(
        translated(&TypeAnnotation::Tuple(vec![named("A"), named("B")])),
        "t.tuple([A, B])"
    );
    assert_eq!(
        translated(&TypeAnnotation::Intersection(vec![named("A"), named("B")])),
        "t.intersection([A, B])"
    );
}

#[test]
fn test_translate_dictionary() {
    assert_eq!(translated(&dictionary(1)), "t.dict(K, V)");
    assert_eq!(
        translate(&ctx(), &dictionary(2)).unwrap_err(),
        ErrorImpl::UnsupportedObjectAnnotation
    );
}

#[test]
fn test_translate_object_shape_is_unsupported() {
    let shape = TypeAnnotation::Object(ObjectAnnotation {
        properties: vec![ObjectProperty {
            name: "name".to_string(),
            optional: false,
            value: named("String"),
        }],
        indexers: vec![],
        exact: true,
    });

    assert_eq!(
        translate(&ctx(), &shape).unwrap_err(),
        ErrorImpl::UnsupportedObjectAnnotation
    );
}

#[test]
fn test_translate_function_type_drops_parameter_names() {
    let function = TypeAnnotation::Function(FunctionAnnotation {
        parameters: vec![
            FunctionAnnotationParam {
                name: Some("a".to_string()),
                annotation: named("A"),
            },
            FunctionAnnotationParam {
                name: None,
                annotation: TypeAnnotation::Array(Box::new(named("B"))),
            },
        ],
        return_type: Box::new(named("R")),
    });

    assert_eq!(translated(&function), "t.func([A, t.list(B)], R)");
}

#[test]
fn test_translate_keyword_is_unsupported() {
    let error = translate(&ctx(), &TypeAnnotation::Keyword(Keyword::String)).unwrap_err();

    assert_eq!(
        error,
        ErrorImpl::UnsupportedAnnotation {
            kind: "string".to_string()
        }
    );
    assert_eq!(error.to_string(), "Unsupported type annotation: string");
}

#[test]
fn test_translate_nested_error_propagates() {
    let annotation = TypeAnnotation::Tuple(vec![named("A"), generic("Array", vec![])]);

    assert_eq!(
        translate(&ctx(), &annotation).unwrap_err(),
        ErrorImpl::UnsupportedArrayAnnotation
    );
}

#[test]
fn test_translate_uses_context_alias() {
    let ctx = TranslationContext::new("types");
    let validator = translate(&ctx, &TypeAnnotation::Array(Box::new(named("T")))).unwrap();

    assert_eq!(gen_expression(&validator, 0), "types.list(T)");
}

#[test]
fn test_emit_assertion() {
    let value = ExprWrapper::new(SymbolExpr::new("x"));
    let validator = ExprWrapper::new(SymbolExpr::new("T"));

    let mut printer = Printer::new(0);
    gen_statement(&mut printer, &emit_assertion(&ctx(), validator, value));

    assert_eq!(printer.finish(), "t.assert(T.is(x));\n");
}

#[test]
fn test_emit_type_assertion() {
    let value = ExprWrapper::new(SymbolExpr::new("x"));
    let stmt = emit_type_assertion(&ctx(), &TypeAnnotation::Nullable(Box::new(named("T"))), value).unwrap();

    let mut printer = Printer::new(0);
    gen_statement(&mut printer, &stmt);

    assert_eq!(printer.finish(), "t.assert(t.maybe(T).is(x));\n");
}

#[test]
fn test_alias_tracker_states() {
    let mut tracker = AliasTracker::new(&TransformConfig::default());
    tracker.on_file_enter();
    assert_eq!(tracker.state(), &AliasState::Default);
    assert_eq!(tracker.current_alias(), "t");

    tracker.on_import(&import(
        "lodash",
        vec![ImportSpecifier::Default {
            local: "_".to_string(),
        }],
    ));
    assert_eq!(tracker.current_alias(), "t");

    tracker.on_import(&import(
        "tcomb-validation",
        vec![
            ImportSpecifier::Named {
                imported: "validate".to_string(),
                local: "validate".to_string(),
            },
            ImportSpecifier::Default {
                local: "types".to_string(),
            },
        ],
    ));
    assert_eq!(tracker.state(), &AliasState::Bound("types".to_string()));
    assert_eq!(tracker.context(), TranslationContext::new("types"));

    tracker.on_file_enter();
    assert_eq!(tracker.current_alias(), "t");
}

#[test]
fn test_alias_tracker_later_import_wins() {
    let mut tracker = AliasTracker::new(&TransformConfig::default());
    tracker.on_file_enter();

    for local in ["t1", "t2"] {
        tracker.on_import(&import(
            "tcomb",
            vec![ImportSpecifier::Default {
                local: local.to_string(),
            }],
        ));
    }

    assert_eq!(tracker.state(), &AliasState::Bound("t2".to_string()));

    let output = transform("import t1 from 'tcomb';\nimport t2 from 'tcomb-validation';\nfunction f(a: A) {}");
    assert!(output.contains("  t2.assert(A.is(a));"));
}

#[test]
fn test_alias_tracker_import_without_default() {
    let mut tracker = AliasTracker::new(&TransformConfig::default());
    tracker.on_file_enter();

    tracker.on_import(&import(
        "tcomb",
        vec![ImportSpecifier::Namespace {
            local: "ns".to_string(),
        }],
    ));

    assert_eq!(tracker.state(), &AliasState::Default);
    assert_eq!(tracker.current_alias(), "t");
}

#[test]
fn test_alias_tracker_configured_default() {
    let config = TransformConfig::default().with_default_alias("tc");
    let tracker = AliasTracker::new(&config);

    assert_eq!(tracker.current_alias(), "tc");
}

#[test]
fn test_rewrite_canonical_function() {
    let output = transform("function f(a: Array<Number>, b: String): Boolean { return true; }");

    assert_eq!(
        output,
        "function f(a: Array<Number>, b: String): Boolean {\n  t.assert(t.list(Number).is(a));\n  t.assert(String.is(b));\n  const ret = (function (a, b) {\n    return true;\n  }).call(this, a, b);\n  t.assert(Boolean.is(ret));\n  return ret;\n}\n"
    );
}

#[test]
fn test_rewrite_parameters_only() {
    let output = transform("function f(a: A, b, c: ?C) { go(a, b, c); }");

    assert_eq!(
        output,
        "function f(a: A, b, c: ?C) {\n  t.assert(A.is(a));\n  t.assert(t.maybe(C).is(c));\n  go(a, b, c);\n}\n"
    );
}

#[test]
fn test_rewrite_untyped_function_unchanged() {
    let output = transform("function f(a, b = 1) {\n  return a;\n}");

    assert_eq!(output, "function f(a, b = 1) {\n  return a;\n}\n");
}

#[test]
fn test_rewrite_untyped_default_beside_typed_parameter() {
    let output = transform("function f(a: A, b = 1) {}");

    assert_eq!(output, "function f(a: A, b = 1) {\n  t.assert(A.is(a));\n}\n");
}

#[test]
fn test_rewrite_typed_default_value_fails() {
    let mut function = parse_function("function f(a: A = 1): R { return a; }");
    let before = format!("{:?}", function.body);

    let rewriter = FunctionRewriter::new(&TransformConfig::default());
    let error = rewriter.rewrite(&ctx(), &mut function).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::Rewrite {
            reason: Box::new(ErrorImpl::TypedDefaultValueUnsupported {
                parameter: "a".to_string()
            })
        }
    );
    assert_eq!(error.to_string(), "[typeguard] Typed default values are not supported");
    assert_eq!(format!("{:?}", function.body), before);
}

#[test]
fn test_rewrite_failure_in_return_type_leaves_function_untouched() {
    let mut function = parse_function("function f(a: A): { name: String } { return a; }");
    let before = format!("{:?}", function.body);

    let rewriter = FunctionRewriter::new(&TransformConfig::default());
    let error = rewriter.rewrite(&ctx(), &mut function).unwrap_err();

    assert_eq!(error.get_internal_error().root_cause(), &ErrorImpl::UnsupportedObjectAnnotation);
    assert_eq!(error.to_string(), "[typeguard] Unsupported Object type annotation");
    assert_eq!(format!("{:?}", function.body), before);
}

#[test]
fn test_rewrite_result_binding_avoids_collisions() {
    let output = transform("function f(ret: A, ret1): R { var ret2 = ret; return ret2; }");

    assert!(output.contains("const ret3 = (function (ret, ret1) {"));
    assert!(output.contains("t.assert(R.is(ret3));"));
    assert!(output.contains("return ret3;"));
}

#[test]
fn test_rewrite_result_binding_avoids_alias() {
    let config = TransformConfig::default().with_default_alias("ret");
    let output = transform_source("function f(): R { return 1; }", "test.js", &config).unwrap();

    assert!(output.contains("const ret1 = (function () {"));
    assert!(output.contains("ret.assert(R.is(ret1));"));
}

#[test]
fn test_rewrite_arrow_expression_body() {
    let output = transform("var f = (x: T): R => x + 1;");

    assert_eq!(
        output,
        "var f = (x: T): R => {\n  t.assert(T.is(x));\n  const ret = (function (x) {\n    return x + 1;\n  }).call(this, x);\n  t.assert(R.is(ret));\n  return ret;\n};\n"
    );
}

#[test]
fn test_untyped_arrow_body_is_normalized() {
    let output = transform("var g = x => x;");

    assert_eq!(output, "var g = (x) => {\n  return x;\n};\n");
}

#[test]
fn test_imported_alias_is_used() {
    let output = transform("import tc from 'tcomb';\nfunction f(a: A[]) {}");

    assert_eq!(
        output,
        "import tc from 'tcomb';\nfunction f(a: A[]) {\n  tc.assert(tc.list(A).is(a));\n}\n"
    );
}

#[test]
fn test_alias_follows_traversal_order() {
    let output = transform("function f(a: A) {}\nimport tc from 'tcomb';\nfunction g(b: B) {}");

    assert!(output.contains("  t.assert(A.is(a));"));
    assert!(output.contains("  tc.assert(B.is(b));"));
}

#[test]
fn test_nested_functions_rewritten_once() {
    let output = transform("function outer(a: A): R { function inner(b: B) { return b; } return inner(a); }");

    assert_eq!(output.matches("B.is(b)").count(), 1);
    assert_eq!(output.matches("A.is(a)").count(), 1);
    assert_eq!(output.matches("R.is(ret)").count(), 1);
}

#[test]
fn test_function_expressions_are_rewritten() {
    let output = transform("register(function (a: A) { return a; });\nexport default function (b: B) {}");

    assert!(output.contains("t.assert(A.is(a));"));
    assert!(output.contains("export default function (b: B) {\n  t.assert(B.is(b));\n}"));
}

#[test]
fn test_error_aborts_file_with_position() {
    let source = "function ok(a: A) {}\nfunction bad(b: [A, Array]) {}";
    let error = transform_source(source, "test.js", &TransformConfig::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedArrayAnnotation");
    assert_eq!(error.get_position().0, 21);
    assert_eq!(error.to_string(), "[typeguard] Unsupported Array type annotation");
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl TransformHooks for Recorder {
    fn on_file_enter(&mut self) {
        self.events.push("enter".to_string());
    }

    fn on_import(&mut self, import: &ImportStmt) {
        self.events.push(format!("import {}", import.source));
    }

    fn on_function(&mut self, function: &mut Function) -> Result<(), Error> {
        let name = function.identifier.clone().unwrap_or_else(|| "<anonymous>".to_string());
        self.events.push(format!("function {}", name));
        Ok(())
    }
}

#[test]
fn test_hooks_fire_in_source_order() {
    let mut program = parse_program(
        "function a() { function b() {} }\nimport t from 'tcomb';\nif (x) { go(function () {}); }",
    );
    let mut recorder = Recorder::default();

    traverse_program(&mut program, &mut recorder).unwrap();

    assert_eq!(
        recorder.events,
        vec![
            "enter",
            "function a",
            "function b",
            "import tcomb",
            "function <anonymous>",
        ]
    );
}

#[test]
fn test_pass_tracks_alias_across_traversal() {
    let mut program = parse_program("import types from 'tcomb-react';\nfunction f(a: A) {}");
    let mut pass = TypeAssertionPass::new(&TransformConfig::default());

    traverse_program(&mut program, &mut pass).unwrap();

    assert_eq!(pass.current_alias(), "types");
}
