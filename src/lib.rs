#![allow(clippy::module_inception)]

use log::info;

use crate::{
    compiler::compiler::{compile, CompiledUnit},
    config::Config,
    errors::{
        errors::{Error, ErrorTip, Severity},
        reporter::Reporter,
    },
    lexer::lexer::tokenize,
    parser::parser::parse_with_config,
};

pub mod ast;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Runs the whole pipeline over `source`: tokenize, parse, compile.
///
/// Syntax errors go to `reporter` and the declarations they occur in are left out of
/// the unit. Lexer errors and fatal compile errors are returned.
pub fn compile_source(
    source: &str,
    config: Config,
    reporter: &mut dyn Reporter,
) -> Result<CompiledUnit, Error> {
    info!("Compiling source for unit {}", config.unit_name);

    let tokens = tokenize(source)?;
    let statements = parse_with_config(tokens, config.clone(), reporter);
    compile(&statements, config)
}

/// Returns the 1-based `line` of `source`, without its line terminator.
pub fn get_source_line(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source.lines().nth(index)
}

/// Renders an error against the source it came from. Fatal errors are headed
/// `Fatal error`, everything else `Error`.
///
/// ```text
/// Fatal error: OperandsMustBeNumbers (`+` expects decimal operands on both sides)
///  --> line 2
///   |
/// 2 | log "a" + 1;
///   |
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let heading = match error.severity() {
        Severity::Recoverable => "Error",
        Severity::Fatal => "Fatal error",
    };

    let mut output = match error.get_tip() {
        ErrorTip::None => format!("{}: {}\n", heading, error.get_error_name()),
        tip => format!("{}: {} ({})\n", heading, error.get_error_name(), tip),
    };

    let line_string = error.get_line().to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>width$} line {}\n", "-->", line_string, width = padding + 1));

    if let Some(line_text) = get_source_line(source, error.get_line()) {
        output.push_str(&format!("{:>padding$}\n", "|"));
        output.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        output.push_str(&format!("{:>padding$}\n", "|"));
    }

    output
}
