//! Unit tests for the codegen module.
//!
//! Most cases parse a snippet and print it back, since the printer only
//! sees what the parser can produce.

use std::rc::Rc;

use crate::{
    ast::{
        ast::ExprWrapper,
        expressions::{CallExpr, MemberExpr, StringExpr, SymbolExpr},
        types::{QualifiedName, TypeAnnotation},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    Span,
};

use super::{
    expr::{gen_expression, quote},
    printer::print_program,
    types::gen_type,
};

fn print(source: &str) -> String {
    let tokens = tokenize(source, Some("test.js".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.js".to_string())).unwrap();
    print_program(&program)
}

/// Prints `var x: <annotation>;` and returns the annotation text.
fn print_type(annotation: &str) -> String {
    let output = print(&format!("var x: {};", annotation));
    output
        .strip_prefix("var x: ")
        .and_then(|rest| rest.strip_suffix(";\n"))
        .unwrap()
        .to_string()
}

#[test]
fn test_parentheses_follow_precedence() {
    assert_eq!(print("x = (a + b) * c;"), "x = (a + b) * c;\n");
    assert_eq!(print("x = a + b * c;"), "x = a + b * c;\n");
    assert_eq!(print("x = ((a * b)) + c;"), "x = a * b + c;\n");
    assert_eq!(print("x = (a ? b : c) + 1;"), "x = (a ? b : c) + 1;\n");
}

#[test]
fn test_left_associative_right_operand() {
    assert_eq!(print("x = a - b - c;"), "x = a - b - c;\n");
    assert_eq!(print("x = a - (b - c);"), "x = a - (b - c);\n");
}

#[test]
fn test_assignment_chain() {
    assert_eq!(print("a = b = c;"), "a = b = c;\n");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(print("x = !a;"), "x = !a;\n");
    assert_eq!(print("x = typeof a;"), "x = typeof a;\n");
    assert_eq!(print("x = - -a;"), "x = - -a;\n");
    assert_eq!(print("x = -(a + b);"), "x = -(a + b);\n");
}

#[test]
fn test_function_expression_callee_is_parenthesised() {
    assert_eq!(print("(function () {})();"), "(function () {})();\n");
    assert_eq!(print("(function () {}).call(this);"), "(function () {}).call(this);\n");
}

#[test]
fn test_function_expression_statement_is_parenthesised() {
    assert_eq!(print("(function () {});"), "(function () {});\n");
}

#[test]
fn test_synthesised_call() {
    let callee = ExprWrapper::new(MemberExpr::new(ExprWrapper::new(SymbolExpr::new("t")), "assert"));
    let call = ExprWrapper::new(CallExpr::new(
        callee,
        vec![ExprWrapper::new(StringExpr {
            value: "ok".to_string(),
            span: Span::null(),
        })],
    ));

    assert_eq!(gen_expression(&call, 0), "t.assert('ok')");
}

#[test]
fn test_new_expressions() {
    assert_eq!(print("x = new Foo(a, b);"), "x = new Foo(a, b);\n");
    assert_eq!(print("x = new (f())();"), "x = new (f())();\n");
}

#[test]
fn test_new_keeps_call_inside_member_chain() {
    assert_eq!(print("var x = new (a.b().c)();"), "var x = new (a.b().c)();\n");
    assert_eq!(print("var x = new (a().b[0])(1);"), "var x = new (a().b[0])(1);\n");
    assert_eq!(print("var x = new a.b.C();"), "var x = new a.b.C();\n");
}

#[test]
fn test_integer_member_object_is_parenthesised() {
    assert_eq!(print("var x = (1).toString();"), "var x = (1).toString();\n");
    assert_eq!(print("var x = 1.5.toFixed(1);"), "var x = 1.5.toFixed(1);\n");
    assert_eq!(print("var x = 1e3.toString();"), "var x = 1e3.toString();\n");
}

#[test]
fn test_member_and_index_chains() {
    assert_eq!(print("a.b[c](d).e;"), "a.b[c](d).e;\n");
    assert_eq!(print("(a + b).c;"), "(a + b).c;\n");
}

#[test]
fn test_object_literals() {
    assert_eq!(print("x = {};"), "x = {};\n");
    assert_eq!(
        print("x = { a: 1, 'b-c': 2, d };"),
        "x = { a: 1, 'b-c': 2, d: d };\n"
    );
}

#[test]
fn test_arrow_object_body_is_parenthesised() {
    assert_eq!(print("f = () => ({ a: 1 });"), "f = () => ({ a: 1 });\n");
}

#[test]
fn test_strings_use_single_quotes() {
    assert_eq!(print("x = \"it's\";"), "x = 'it\\'s';\n");
    assert_eq!(print("x = 'a\\nb';"), "x = 'a\\nb';\n");
}

#[test]
fn test_quote_escapes() {
    assert_eq!(quote("plain"), "'plain'");
    assert_eq!(quote("back\\slash"), "'back\\\\slash'");
    assert_eq!(quote("tab\there"), "'tab\\there'");
    assert_eq!(quote("\u{1}"), "'\\u0001'");
}

#[test]
fn test_nul_before_digit_stays_a_nul() {
    assert_eq!(quote("\u{0}1"), "'\\x001'");
    assert_eq!(print("var s = '\\x001';"), "var s = '\\x001';\n");
}

#[test]
fn test_nested_blocks_are_indented() {
    assert_eq!(
        print("function f() { if (a) { return 1; } }"),
        "function f() {\n  if (a) {\n    return 1;\n  }\n}\n"
    );
}

#[test]
fn test_if_else_chains() {
    assert_eq!(
        print("if (a) { b(); } else if (c) d(); else { e(); }"),
        "if (a) {\n  b();\n} else if (c)\n  d();\nelse {\n  e();\n}\n"
    );
}

#[test]
fn test_while_without_block() {
    assert_eq!(print("while (i < 10) i = i + 1;"), "while (i < 10)\n  i = i + 1;\n");
}

#[test]
fn test_empty_return_and_throw() {
    assert_eq!(
        print("function f() { return; throw new Error('x'); }"),
        "function f() {\n  return;\n  throw new Error('x');\n}\n"
    );
}

#[test]
fn test_imports() {
    assert_eq!(
        print("import def, { a, b as c } from \"mod\";"),
        "import def, { a, b as c } from 'mod';\n"
    );
    assert_eq!(print("import * as ns from 'm';"), "import * as ns from 'm';\n");
    assert_eq!(print("import 'side';"), "import 'side';\n");
}

#[test]
fn test_exports() {
    assert_eq!(print("export const x = 1;"), "export const x = 1;\n");
    assert_eq!(print("export default a + b;"), "export default a + b;\n");
    assert_eq!(
        print("export default function () {}"),
        "export default function () {}\n"
    );
}

#[test]
fn test_function_annotations_are_kept() {
    assert_eq!(
        print("function f(a: A, b = 1): R {}"),
        "function f(a: A, b = 1): R {}\n"
    );
    assert_eq!(print("g = (x: T): R => x;"), "g = (x: T): R => x;\n");
}

#[test]
fn test_annotation_round_trip() {
    for annotation in [
        "string",
        "?A[]",
        "(A | B)[]",
        "?(A | B)",
        "A & B | C",
        "Mod.Sub<T, U>",
        "[A, B]",
        "{ [key: K]: V, name?: N }",
        "{| a: A |}",
        "{}",
        "(x: A, B) => R",
        "'lit' | 1 | true",
    ] {
        assert_eq!(print_type(annotation), annotation);
    }
}

#[test]
fn test_union_inside_intersection_is_parenthesised() {
    let annotation = TypeAnnotation::Intersection(vec![
        TypeAnnotation::Union(vec![TypeAnnotation::named("A"), TypeAnnotation::named("B")]),
        TypeAnnotation::Named {
            name: QualifiedName::new("C"),
            type_arguments: None,
        },
    ]);

    assert_eq!(gen_type(&annotation), "(A | B) & C");
}
