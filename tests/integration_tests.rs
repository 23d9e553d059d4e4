//! Integration tests for end-to-end compilation.
//!
//! These tests verify that the complete pipeline works correctly from source
//! text through tokenization, parsing with recovery, and lowering to assembly info.

use scriptc::{
    compile_source,
    compiler::{
        assembly::{Instruction, ValueType},
        compiler::compile,
    },
    config::Config,
    display_error,
    errors::{
        errors::Severity,
        reporter::{Diagnostics, LogReporter},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

#[test]
fn test_compile_simple_program() {
    let mut diagnostics = Diagnostics::new();
    let unit = compile_source("let x = 42;", Config::default(), &mut diagnostics).unwrap();

    assert!(!diagnostics.has_errors());
    assert_eq!(unit.name, "main");
    assert_eq!(unit.local_variables.len(), 1);
    assert_eq!(unit.local_variables[0].name, "x");
    assert_eq!(unit.local_variables[0].value_type, ValueType::Decimal);
}

#[test]
fn test_compile_function() {
    let source = "fn add(a, b) {\n    log a + b;\n}\nlet total = add(1, 2);\nlog total;";
    let mut diagnostics = Diagnostics::new();
    let unit = compile_source(source, Config::new("math"), &mut diagnostics).unwrap();

    assert!(!diagnostics.has_errors());
    assert_eq!(unit.functions.len(), 1);
    assert_eq!(unit.functions[0].parameters, vec!["a", "b"]);

    let table: Vec<(&str, ValueType)> = unit
        .local_variables
        .iter()
        .map(|local| (local.name.as_str(), local.value_type))
        .collect();
    assert_eq!(
        table,
        vec![("add", ValueType::Function), ("total", ValueType::Object)]
    );

    let rendered = unit.to_string();
    assert!(rendered.starts_with(".unit math\n.function add(a, b)\n"));
    assert!(rendered.contains("    call 2\n"));
    assert!(rendered.contains("    print.a\n"));
}

#[test]
fn test_compile_control_flow() {
    let source = r#"
let count = 0;
let label = "start";
while (count < 10) {
    if count == 5 {
        log label;
    } else {
        log count;
    }
    count = count + 1;
}
"#;
    let mut diagnostics = Diagnostics::new();
    let unit = compile_source(source, Config::default(), &mut diagnostics).unwrap();

    assert!(!diagnostics.has_errors());

    let labels = unit
        .code
        .code
        .iter()
        .filter(|instruction| matches!(instruction, Instruction::Label(_)))
        .count();
    assert_eq!(labels, 4);
    assert!(unit.code.code.contains(&Instruction::Print(ValueType::Str)));
    assert!(unit.code.code.contains(&Instruction::Print(ValueType::Decimal)));
}

#[test]
fn test_recovery_then_compile() {
    let source = "let = 1;\nlet ok = 2;\nlog ok;\nlog (1;\nlog ok * 2;";
    let mut diagnostics = Diagnostics::new();
    let statements = parse(tokenize(source).unwrap(), &mut diagnostics);

    assert_eq!(statements.len(), 5);
    assert!(statements[0].is_none());
    assert!(statements[3].is_none());
    assert_eq!(diagnostics.entries().len(), 2);
    assert_eq!(diagnostics.entries()[0].line, 1);
    assert_eq!(diagnostics.entries()[1].line, 4);
    assert!(diagnostics.contains("at ';': Expect ')' after expression."));

    let unit = compile(&statements, Config::default()).unwrap();
    assert_eq!(unit.local_variables.len(), 1);
    assert!(unit.code.code.contains(&Instruction::Multiply));
}

#[test]
fn test_log_reporter_counts() {
    let mut reporter = LogReporter::default();
    let unit = compile_source("1 = 2;\nlog 3;", Config::default(), &mut reporter).unwrap();

    assert_eq!(reporter.count(), 1);
    assert!(unit.code.code.contains(&Instruction::Print(ValueType::Decimal)));
}

#[test]
fn test_lexer_error_is_returned() {
    let mut diagnostics = Diagnostics::new();
    let error = compile_source("let x = @;", Config::default(), &mut diagnostics).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_fatal_error_rendering() {
    let source = "let x = 1;\nlog \"a\" + x;";
    let mut diagnostics = Diagnostics::new();
    let error = compile_source(source, Config::default(), &mut diagnostics).unwrap_err();

    assert_eq!(error.severity(), Severity::Fatal);
    assert_eq!(error.get_line(), 2);

    let rendered = display_error(&error, source);
    assert!(rendered.starts_with("Fatal error: OperandsMustBeNumbers"));
    assert!(rendered.contains("2 | log \"a\" + x;"));
}

#[test]
fn test_unreached_branch_not_checked() {
    let source = "if false { log -\"a\"; }\nlet y = nil or 4;\nlog false and (\"a\" + 1);";
    let mut diagnostics = Diagnostics::new();
    let unit = compile_source(source, Config::default(), &mut diagnostics).unwrap();

    assert_eq!(unit.local_variables[0].value_type, ValueType::Decimal);
    assert!(unit
        .code
        .code
        .contains(&Instruction::Print(ValueType::Boolean)));
}
