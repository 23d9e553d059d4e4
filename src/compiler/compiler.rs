//! Main compiler module.
//!
//! This module holds the per-unit compilation state and the `compile` entry point
//! that lowers a parsed program into assembly info plus a local-variable table.
//! Expression and statement lowering live in the sibling `expr` and `stmt` modules.

use std::fmt::Display;

use log::{debug, info};

use crate::{
    ast::{ast::Stmt, expressions::LiteralValue, statements::BlockStmt},
    config::Config,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
};

use super::{
    assembly::{AssemblyInfo, Instruction, Label, LocalVariable, ValueType},
    environment::Environment,
    stmt::gen_statement,
};

/// A function declaration recorded for later emission.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRecord {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: BlockStmt,
}

/// State carried through one compilation unit.
pub struct Compiler {
    pub config: Config,
    /// Rows of the local-variable table, in the order they were generated
    pub local_variables: Vec<LocalVariable>,
    /// Function declarations seen so far
    pub functions: Vec<FunctionRecord>,

    next_label: Label,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        Compiler {
            config,
            local_variables: Vec::new(),
            functions: Vec::new(),
            next_label: 0,
        }
    }

    /// Allocates a fresh jump label, unique within the unit.
    pub fn new_label(&mut self) -> Label {
        let label = self.next_label;
        self.next_label += 1;

        debug!("Allocated label L{}", label);
        label
    }

    /// Emits a `.local` entry for every variable currently defined in `environment`,
    /// in ascending slot order, and records each in the local-variable table.
    pub fn generate_local_variables(&mut self, info: &mut AssemblyInfo, environment: &Environment) {
        for variable in environment.variables() {
            let local = LocalVariable {
                index: variable.index,
                name: variable.name.clone(),
                value_type: variable.value_type,
            };

            info.push(Instruction::Local(local.clone()));
            self.local_variables.push(local);
        }
    }
}

/// Only `nil` and `false` are falsy.
pub fn is_truthy(value: &LiteralValue) -> bool {
    !matches!(value, LiteralValue::Nil | LiteralValue::Boolean(false))
}

pub fn check_number_operand(operator: &Token, operand: ValueType) -> Result<(), Error> {
    if operand == ValueType::Decimal {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::OperandMustBeNumber {
            operator: operator.value.clone(),
        },
        operator.line,
    ))
}

pub fn check_number_operands(
    operator: &Token,
    left: ValueType,
    right: ValueType,
) -> Result<(), Error> {
    if left == ValueType::Decimal && right == ValueType::Decimal {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::OperandsMustBeNumbers {
            operator: operator.value.clone(),
        },
        operator.line,
    ))
}

/// The output of one compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledUnit {
    pub name: String,
    /// `.local` directives followed by the unit's code
    pub code: AssemblyInfo,
    pub local_variables: Vec<LocalVariable>,
    pub functions: Vec<FunctionRecord>,
}

impl Display for CompiledUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, ".unit {}", self.name)?;

        for function in self.functions.iter() {
            writeln!(
                f,
                ".function {}({})",
                function.name,
                function.parameters.join(", ")
            )?;
        }

        write!(f, "{}", self.code)
    }
}

/// Compiles a parsed program.
///
/// `None` entries (declarations the parser recovered from) are skipped. The first
/// fatal error aborts the unit.
pub fn compile(statements: &[Option<Stmt>], config: Config) -> Result<CompiledUnit, Error> {
    info!("Compiling unit {}", config.unit_name);

    let mut compiler = Compiler::new(config);
    let mut environment = Environment::new();
    let mut body = AssemblyInfo::new(ValueType::Void);

    for statement in statements.iter().flatten() {
        body.append(gen_statement(&mut compiler, &mut environment, statement)?);
    }

    let mut code = AssemblyInfo::new(ValueType::Void);
    compiler.generate_local_variables(&mut code, &environment);
    code.append(body);

    info!(
        "Compiled unit {}: {} instructions, {} locals in {} slots",
        compiler.config.unit_name,
        code.code.len(),
        compiler.local_variables.len(),
        environment.variable_count()
    );

    Ok(CompiledUnit {
        name: compiler.config.unit_name,
        code,
        local_variables: compiler.local_variables,
        functions: compiler.functions,
    })
}
