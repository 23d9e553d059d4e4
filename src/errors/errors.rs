use std::fmt::Display;

use thiserror::Error;

use crate::compiler::assembly::ValueType;

/// How far an error is allowed to travel.
///
/// Recoverable errors are syntax errors and diagnostics: the parser reports them and
/// resumes at the next declaration. Fatal errors abort compilation of the whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::OperandMustBeNumber { .. }
            | ErrorImpl::OperandsMustBeNumbers { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::AssignmentTypeMismatch { .. }
            | ErrorImpl::UnsupportedOperator { .. } => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::InvalidCallTarget => "InvalidCallTarget",
            ErrorImpl::TooManyParameters { .. } => "TooManyParameters",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::OperandMustBeNumber { .. } => "OperandMustBeNumber",
            ErrorImpl::OperandsMustBeNumbers { .. } => "OperandsMustBeNumbers",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::AssignmentTypeMismatch { .. } => "AssignmentTypeMismatch",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables can appear on the left of `=`",
            )),
            ErrorImpl::InvalidCallTarget => ErrorTip::Suggestion(String::from(
                "Only named functions can be called",
            )),
            ErrorImpl::TooManyParameters { limit } => {
                ErrorTip::Suggestion(format!("Functions take at most {} parameters", limit))
            }
            ErrorImpl::TooManyArguments { limit } => {
                ErrorTip::Suggestion(format!("Calls take at most {} arguments", limit))
            }
            ErrorImpl::OperandMustBeNumber { operator } => ErrorTip::Suggestion(format!(
                "`{}` expects a decimal operand",
                operator
            )),
            ErrorImpl::OperandsMustBeNumbers { operator } => ErrorTip::Suggestion(format!(
                "`{}` expects decimal operands on both sides",
                operator
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::AssignmentTypeMismatch { variable, .. } => ErrorTip::Suggestion(format!(
                "Declare a new variable with `let` instead of reassigning `{}`",
                variable
            )),
            ErrorImpl::UnsupportedOperator { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("{message}")]
    UnexpectedToken { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    #[error("Can only call variables.")]
    InvalidCallTarget,
    #[error("Can't have more than {limit} parameters.")]
    TooManyParameters { limit: usize },
    #[error("Can't have more than {limit} arguments.")]
    TooManyArguments { limit: usize },
    #[error("Operand must be a number (operator {operator:?}).")]
    OperandMustBeNumber { operator: String },
    #[error("Operands must be numbers (operator {operator:?}).")]
    OperandsMustBeNumbers { operator: String },
    #[error("Undefined variable {variable:?}.")]
    VariableNotDeclared { variable: String },
    #[error("Cannot assign a {found} value to {variable:?}, which holds {expected}.")]
    AssignmentTypeMismatch {
        variable: String,
        expected: ValueType,
        found: ValueType,
    },
    #[error("Unsupported operator {operator:?}.")]
    UnsupportedOperator { operator: String },
}
