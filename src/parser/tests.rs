//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Operator precedence and associativity
//! - Declarations and statements
//! - Non-fatal diagnostics
//! - Panic-mode recovery

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::LiteralValue,
    },
    config::Config,
    errors::{errors::Error, reporter::Diagnostics},
    lexer::lexer::tokenize,
};

use super::parser::{parse, parse_expression, parse_with_config};

fn parse_source(source: &str) -> (Vec<Option<Stmt>>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source).unwrap();
    let statements = parse(tokens, &mut diagnostics);
    (statements, diagnostics)
}

fn parse_expr_source(source: &str) -> (Result<Expr, Error>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source).unwrap();
    let expr = parse_expression(tokens, &mut diagnostics);
    (expr, diagnostics)
}

fn render(source: &str) -> String {
    let (expr, diagnostics) = parse_expr_source(source);
    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.entries());
    expr.unwrap().to_string()
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(render("1+2*3"), "(+ 1 (* 2 3))");
    assert_eq!(render("1*2+3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_binary_operators_associate_left() {
    assert_eq!(render("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(render("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    assert_eq!(render("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(render("a or b and c"), "(or a (and b c))");
    assert_eq!(render("a || b && c"), "(|| a (&& b c))");
}

#[test]
fn test_ternary_sits_between_and_and_equality() {
    assert_eq!(render("a == b ? 1 : 2"), "(?: (== a b) 1 2)");
    assert_eq!(render("x and y ? 1 : 2"), "(and x (?: y 1 2))");
}

#[test]
fn test_nested_ternary_needs_parentheses() {
    let (expr, diagnostics) = parse_expr_source("a ? b ? 1 : 2 : 3");
    assert!(expr.is_err());
    assert!(diagnostics.contains("Expect ':' after then branch of ternary."));

    assert_eq!(render("a ? (b ? 1 : 2) : 3"), "(?: a (group (?: b 1 2)) 3)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(render("a = b = 1"), "(= a (= b 1))");
    assert_eq!(render("a = 1 + 2"), "(= a (+ 1 2))");
}

#[test]
fn test_unary_operators_nest() {
    assert_eq!(render("-!x"), "(- (! x))");
    assert_eq!(render("--1"), "(- (- 1))");
    assert_eq!(render("-a * b"), "(* (- a) b)");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(render("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
}

#[test]
fn test_call_arguments() {
    assert_eq!(render("f()"), "(call f)");
    assert_eq!(render("f(1, a + 2)"), "(call f 1 (+ a 2))");
    assert_eq!(render("-f(1)"), "(- (call f 1))");
}

#[test]
fn test_literals() {
    let (expr, _) = parse_expr_source("true");
    assert!(matches!(expr.unwrap().as_literal(), Some(LiteralValue::Boolean(true))));

    let (expr, _) = parse_expr_source("false");
    assert!(matches!(expr.unwrap().as_literal(), Some(LiteralValue::Boolean(false))));

    let (expr, _) = parse_expr_source("nil");
    assert!(matches!(expr.unwrap().as_literal(), Some(LiteralValue::Nil)));

    let (expr, _) = parse_expr_source("\"hi\"");
    assert_eq!(
        expr.unwrap().as_literal(),
        Some(&LiteralValue::Str("hi".to_string()))
    );

    let (expr, _) = parse_expr_source("2.5");
    assert_eq!(expr.unwrap().as_literal(), Some(&LiteralValue::Number(2.5)));
}

#[test]
fn test_invalid_assignment_target_is_not_raised() {
    let (expr, diagnostics) = parse_expr_source("1 = 2");

    let expr = expr.unwrap();
    assert_eq!(expr.as_literal(), Some(&LiteralValue::Number(1.0)));
    assert!(!matches!(expr, Expr::Assign(_)));
    assert_eq!(diagnostics.entries().len(), 1);
    assert_eq!(
        diagnostics.entries()[0].message,
        "at '=': Invalid assignment target."
    );
}

#[test]
fn test_invalid_assignment_target_keeps_statement() {
    let (statements, diagnostics) = parse_source("1 = 2;");

    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Some(Stmt::Expression(stmt)) => {
            assert_eq!(stmt.expression.as_literal(), Some(&LiteralValue::Number(1.0)))
        }
        other => panic!("Expected expression statement, got {:?}", other),
    }
    assert!(diagnostics.contains("Invalid assignment target."));
}

#[test]
fn test_calling_non_variable_is_a_syntax_error() {
    let (expr, diagnostics) = parse_expr_source("(1)()");

    let error = expr.unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCallTarget");
    assert!(diagnostics.contains("at '(': Can only call variables."));
}

#[test]
fn test_chained_call_is_a_syntax_error() {
    let (statements, diagnostics) = parse_source("f(1)(2);\nlog 1;");

    assert_eq!(statements.len(), 2);
    assert!(statements[0].is_none());
    assert!(matches!(statements[1], Some(Stmt::Print(_))));
    assert!(diagnostics.contains("Can only call variables."));
}

#[test]
fn test_var_declaration() {
    let (statements, diagnostics) = parse_source("let x = 42;\nlet y;");

    assert!(!diagnostics.has_errors());
    match &statements[0] {
        Some(Stmt::VarDecl(decl)) => {
            assert_eq!(decl.name.value, "x");
            assert_eq!(decl.initializer.as_literal(), Some(&LiteralValue::Number(42.0)));
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
    match &statements[1] {
        Some(Stmt::VarDecl(decl)) => {
            assert_eq!(decl.name.value, "y");
            assert_eq!(decl.initializer.as_literal(), Some(&LiteralValue::Nil));
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_function_declaration() {
    let (statements, diagnostics) = parse_source("fn add(a, b) { log a + b; }");

    assert!(!diagnostics.has_errors());
    match &statements[0] {
        Some(Stmt::FnDecl(function)) => {
            assert_eq!(function.name.value, "add");
            let names: Vec<&str> = function
                .parameters
                .iter()
                .map(|param| param.value.as_str())
                .collect();
            assert_eq!(names, vec!["a", "b"]);
            assert_eq!(function.body.body.len(), 1);
        }
        other => panic!("Expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_too_many_parameters_is_not_fatal() {
    let mut diagnostics = Diagnostics::new();
    let config = Config {
        max_parameters: 2,
        ..Config::default()
    };
    let tokens = tokenize("fn f(a, b, c) { }").unwrap();
    let statements = parse_with_config(tokens, config, &mut diagnostics);

    match &statements[0] {
        Some(Stmt::FnDecl(function)) => assert_eq!(function.parameters.len(), 3),
        other => panic!("Expected function declaration, got {:?}", other),
    }
    assert!(diagnostics.contains("Can't have more than 2 parameters."));
}

#[test]
fn test_default_parameter_limit_is_255() {
    let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
    let source = format!("fn f({}) {{ }}", params.join(", "));
    let (statements, diagnostics) = parse_source(&source);

    assert!(matches!(statements[0], Some(Stmt::FnDecl(_))));
    assert_eq!(diagnostics.entries().len(), 1);
    assert!(diagnostics.contains("Can't have more than 255 parameters."));
}

#[test]
fn test_too_many_arguments_is_not_fatal() {
    let mut diagnostics = Diagnostics::new();
    let config = Config {
        max_arguments: 1,
        ..Config::default()
    };
    let tokens = tokenize("f(1, 2);").unwrap();
    let statements = parse_with_config(tokens, config, &mut diagnostics);

    assert!(matches!(statements[0], Some(Stmt::Expression(_))));
    assert!(diagnostics.contains("Can't have more than 1 arguments."));
}

#[test]
fn test_if_else_statement() {
    let (statements, diagnostics) = parse_source("if x > 0 { log 1; } else { log 2; log 3; }");

    assert!(!diagnostics.has_errors());
    match &statements[0] {
        Some(Stmt::If(if_stmt)) => {
            assert_eq!(if_stmt.condition.to_string(), "(> x 0)");
            assert_eq!(if_stmt.then_branch.body.len(), 1);
            assert_eq!(if_stmt.else_branch.as_ref().map(|block| block.body.len()), Some(2));
        }
        other => panic!("Expected if statement, got {:?}", other),
    }
}

#[test]
fn test_if_without_else() {
    let (statements, _) = parse_source("if x { log 1; }");

    match &statements[0] {
        Some(Stmt::If(if_stmt)) => assert!(if_stmt.else_branch.is_none()),
        other => panic!("Expected if statement, got {:?}", other),
    }
}

#[test]
fn test_if_requires_braces() {
    let (statements, diagnostics) = parse_source("if x log 1;");

    assert!(statements[0].is_none());
    assert!(diagnostics.contains("Expect '{' after if condition."));
}

#[test]
fn test_else_requires_braces() {
    let (statements, diagnostics) = parse_source("if x { log 1; } else log 2;");

    assert!(statements[0].is_none());
    assert!(diagnostics.contains("Expect '{' after 'else'."));
}

#[test]
fn test_while_statement() {
    let (statements, diagnostics) = parse_source("while (x > 0) x = x - 1;");

    assert!(!diagnostics.has_errors());
    match &statements[0] {
        Some(Stmt::While(while_stmt)) => {
            assert_eq!(while_stmt.condition.to_string(), "(> x 0)");
            assert!(matches!(*while_stmt.body, Stmt::Expression(_)));
        }
        other => panic!("Expected while statement, got {:?}", other),
    }
}

#[test]
fn test_while_requires_parentheses() {
    let (statements, diagnostics) = parse_source("while x { }");

    assert!(statements[0].is_none());
    assert!(diagnostics.contains("Expect '(' after 'while'."));
}

#[test]
fn test_block_statement() {
    let (statements, _) = parse_source("{ let a = 1; log a; }");

    match &statements[0] {
        Some(Stmt::Block(block)) => assert_eq!(block.body.len(), 2),
        other => panic!("Expected block, got {:?}", other),
    }
}

#[test]
fn test_recovery_yields_placeholder_then_valid_statement() {
    let (statements, diagnostics) = parse_source("let = 5;\nx = 1;");

    assert_eq!(statements.len(), 2);
    assert!(statements[0].is_none());
    match &statements[1] {
        Some(Stmt::Expression(stmt)) => assert_eq!(stmt.expression.to_string(), "(= x 1)"),
        other => panic!("Expected assignment statement, got {:?}", other),
    }
    assert_eq!(diagnostics.entries().len(), 1);
    assert_eq!(diagnostics.entries()[0].line, 1);
    assert_eq!(diagnostics.entries()[0].message, "at '=': Expect variable name.");
}

#[test]
fn test_recovery_stops_before_statement_keyword() {
    let (statements, diagnostics) = parse_source("foo bar log 1;");

    assert_eq!(statements.len(), 2);
    assert!(statements[0].is_none());
    assert!(matches!(statements[1], Some(Stmt::Print(_))));
    assert!(diagnostics.contains("at 'bar': Expect ';' after expression."));
}

#[test]
fn test_recovery_inside_block_drops_declaration() {
    let (statements, diagnostics) = parse_source("{ let = 1; log 2; }");

    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Some(Stmt::Block(block)) => {
            assert_eq!(block.body.len(), 1);
            assert!(matches!(block.body[0], Stmt::Print(_)));
        }
        other => panic!("Expected block, got {:?}", other),
    }
    assert!(diagnostics.contains("Expect variable name."));
}

#[test]
fn test_unclosed_block_reports_at_end() {
    let (statements, diagnostics) = parse_source("{ log 1;");

    assert!(statements[0].is_none());
    assert!(diagnostics.contains("at end: Expect '}' after block."));
}

#[test]
fn test_parse_never_fails_on_garbage() {
    let (statements, diagnostics) = parse_source("} } )");

    assert!(!statements.is_empty());
    assert!(statements.iter().all(|stmt| stmt.is_none()));
    assert!(diagnostics.contains("Expect expression."));
}

#[test]
fn test_diagnostics_carry_lines() {
    let (_, diagnostics) = parse_source("log 1;\n\nlog ;");

    assert_eq!(diagnostics.entries().len(), 1);
    assert_eq!(diagnostics.entries()[0].line, 3);
}

#[test]
fn test_empty_program() {
    let (statements, diagnostics) = parse_source("");

    assert!(statements.is_empty());
    assert!(!diagnostics.has_errors());
}
