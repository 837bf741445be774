//! Integration tests for the public parsing API.
//!
//! These tests drive the crate the way an evaluator or driver would: raw
//! source text in, a program plus diagnostics out.

use monkey_parser::{
    ast::ast::{Expr, Node, Stmt},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::{parse, parse_with_errors, Parser},
    render_diagnostic,
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "
let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
let max = fn(a, b) { if (a > b) { a } else { b } };
let apply = fn(f, v) { return f(v); };
!-five / 5 * ten;
5 < 10 > 5;
if (5 < 10) {
  return true;
} else {
  return false;
}
10 == 10;
10 != 9;
apply(fn(n) { n * 2 }, max(1, 2))(3);
";

/// Reparses every top-level statement's rendering and checks it is stable.
fn assert_round_trip(source: &str) {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);

    for stmt in &program.statements {
        let rendered = stmt.to_string();
        let (reparsed, errors) = parse(&rendered);

        assert!(errors.is_empty(), "errors reparsing {:?}: {:?}", rendered, errors);
        assert_eq!(reparsed.statements.len(), 1, "reparsing {:?}", rendered);
        assert_eq!(reparsed.statements[0].to_string(), rendered);
    }
}

#[test]
fn test_parse_full_program() {
    let (program, errors) = parse(PROGRAM);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.statements.len(), 12);

    let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "let five = 5;",
            "let ten = 10;",
            "let add = fn(x, y) { (x + y); };",
            "let result = add(five, ten);",
            "let max = fn(a, b) { if (a > b) { a; } else { b; }; };",
            "let apply = fn(f, v) { return f(v); };",
            "(((!(-five)) / 5) * ten)",
            "((5 < 10) > 5)",
            "if (5 < 10) { return true; } else { return false; }",
            "(10 == 10)",
            "(10 != 9)",
            "apply(fn(n) { (n * 2); }, max(1, 2))(3)",
        ]
    );
}

#[test]
fn test_let_statement_property() {
    let cases = [
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y;", "foobar", "y"),
        ("let _under_score1 = false", "_under_score1", "false"),
    ];

    for (source, name, value) in cases {
        let (program, errors) = parse(source);

        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::Let(stmt) => {
                assert_eq!(stmt.name.value, name);
                assert_eq!(stmt.value.to_string(), value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_return_statement_property() {
    for source in ["return 5;", "return x;", "return add(1, 2);", "return fn() {};"] {
        let (program, errors) = parse(source);

        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Stmt::Return(_)));
    }
}

#[test]
fn test_round_trip_is_stable() {
    assert_round_trip(PROGRAM);
    assert_round_trip("-a * b; a + b + c; a + b * c + d / e - f; 3 + 4; -5 * 5");
    assert_round_trip("1 + (2 + 3) + 4; a + add(b * c) + d; add(a, b)(c)");
    assert_round_trip("if (x) { x }; if (!x) { } else { let y = 1; y }");
    assert_round_trip("fn() {}; fn(x) { x }(1); -(fn(x) { x })(2)");
    assert_round_trip("if (a) { b } + 1; (if (a) { b })(c)");
}

#[test]
fn test_canonical_rendering_reparses_to_the_same_tree_shape() {
    let (first, _) = parse("let f = fn(a, b) { if (a < b) { return a } b }; f(1, 2)");
    let source: String = first.statements.iter().map(|s| format!("{} ", s)).collect();
    let (second, errors) = parse(&source);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_malformed_input_reports_without_panicking() {
    let (program, errors) = parse("let x 5;");

    assert!(!errors.is_empty());
    assert!(program.is_empty());
}

#[test]
fn test_structured_diagnostics_and_rendering() {
    let source = "let a = 1;\nlet b = (a + ;\nlet c = 3;";
    let (program, errors) = parse_with_errors(source);

    assert_eq!(program.to_string(), "let a = 1;let c = 3;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NoPrefixParseFn");

    let rendered = render_diagnostic(&errors[0], source, "bad.mk");
    assert!(rendered.contains("-> bad.mk"));
    assert!(rendered.contains("2 | let b = (a + ;"));
}

#[test]
fn test_parser_exposes_errors_after_parse() {
    let mut parser = Parser::new("let = 1; fn(x {}");
    let program = parser.parse_program();

    assert!(program.is_empty());
    assert_eq!(parser.errors().len(), 2);
    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Identifier, got Assignment instead",
            "expected next token to be CloseParen, got OpenCurly instead",
        ]
    );
}

#[test]
fn test_tokenize_ends_with_single_eof() {
    let tokens = tokenize("let x = 1;");

    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(),
        1
    );
}

#[test]
fn test_independent_parses_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("let v{} = {} * (1 + {});", i, i, i);
                let (program, errors) = parse(&source);
                assert!(errors.is_empty());
                program
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let program = handle.join().expect("parser thread panicked");
        assert_eq!(program.to_string(), format!("let v{} = ({} * (1 + {}));", i, i, i));
    }
}

#[test]
fn test_token_literals_are_retained() {
    let (program, _) = parse("add(1, true)");

    match &program.statements[0] {
        Stmt::Expression(stmt) => {
            assert_eq!(stmt.token_literal(), "add");
            match &stmt.expression {
                Expr::Call(call) => {
                    assert_eq!(call.token_literal(), "(");
                    assert_eq!(call.callee.token_literal(), "add");
                    assert_eq!(call.arguments[1].token_literal(), "true");
                }
                other => panic!("expected call expression, got {:?}", other),
            }
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}
