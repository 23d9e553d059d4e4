use log::debug;

use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, FnDeclStmt, IfStmt, VarDeclStmt, WhileStmt},
    },
    errors::errors::Error,
};

use super::{
    assembly::{AssemblyInfo, Instruction, ValueType},
    compiler::{is_truthy, Compiler, FunctionRecord},
    environment::Environment,
    expr::gen_expression,
};

/// Lowers a statement to assembly info. Statements leave the stack as they found it.
pub fn gen_statement(
    compiler: &mut Compiler,
    environment: &mut Environment,
    statement: &Stmt,
) -> Result<AssemblyInfo, Error> {
    debug!("Compiling {}", statement.get_stmt_name());

    match statement {
        Stmt::Expression(expression) => {
            let mut info = AssemblyInfo::new(ValueType::Void);
            info.append(gen_expression(compiler, environment, &expression.expression)?);
            info.push(Instruction::Pop);
            Ok(info)
        }
        Stmt::Print(print) => {
            let value = gen_expression(compiler, environment, &print.expression)?;
            let value_type = value.value_type;

            let mut info = AssemblyInfo::new(ValueType::Void);
            info.append(value);
            info.push(Instruction::Print(value_type));
            Ok(info)
        }
        Stmt::VarDecl(declaration) => gen_var_decl(compiler, environment, declaration),
        Stmt::Block(block) => gen_block(compiler, environment, block),
        Stmt::If(if_stmt) => gen_if(compiler, environment, if_stmt),
        Stmt::While(while_stmt) => gen_while(compiler, environment, while_stmt),
        Stmt::FnDecl(declaration) => gen_fn_decl(compiler, environment, declaration),
    }
}

/// Compiles each statement of a block in order, in the same environment.
pub fn gen_block(
    compiler: &mut Compiler,
    environment: &mut Environment,
    block: &BlockStmt,
) -> Result<AssemblyInfo, Error> {
    let mut info = AssemblyInfo::new(ValueType::Void);

    for statement in block.iter() {
        info.append(gen_statement(compiler, environment, statement)?);
    }

    Ok(info)
}

fn gen_var_decl(
    compiler: &mut Compiler,
    environment: &mut Environment,
    declaration: &VarDeclStmt,
) -> Result<AssemblyInfo, Error> {
    let value = gen_expression(compiler, environment, &declaration.initializer)?;
    let value_type = value.value_type;
    let index = environment.define(&declaration.name.value, value_type);

    let mut info = AssemblyInfo::new(ValueType::Void);
    info.append(value);
    info.push(Instruction::Store { index, value_type });
    Ok(info)
}

fn gen_if(
    compiler: &mut Compiler,
    environment: &mut Environment,
    if_stmt: &IfStmt,
) -> Result<AssemblyInfo, Error> {
    if let Some(truthy) = if_stmt.condition.as_literal().map(is_truthy) {
        return match (truthy, &if_stmt.else_branch) {
            (true, _) => gen_block(compiler, environment, &if_stmt.then_branch),
            (false, Some(else_branch)) => gen_block(compiler, environment, else_branch),
            (false, None) => Ok(AssemblyInfo::new(ValueType::Void)),
        };
    }

    let condition = gen_expression(compiler, environment, &if_stmt.condition)?;
    let then_branch = gen_block(compiler, environment, &if_stmt.then_branch)?;
    let else_label = compiler.new_label();

    let mut info = AssemblyInfo::new(ValueType::Void);
    info.append(condition);
    info.push(Instruction::JumpIfFalse(else_label));
    info.append(then_branch);

    match &if_stmt.else_branch {
        Some(else_branch) => {
            let else_branch = gen_block(compiler, environment, else_branch)?;
            let end_label = compiler.new_label();

            info.push(Instruction::Jump(end_label));
            info.push(Instruction::Label(else_label));
            info.append(else_branch);
            info.push(Instruction::Label(end_label));
        }
        None => info.push(Instruction::Label(else_label)),
    }

    Ok(info)
}

fn gen_while(
    compiler: &mut Compiler,
    environment: &mut Environment,
    while_stmt: &WhileStmt,
) -> Result<AssemblyInfo, Error> {
    let known = while_stmt.condition.as_literal().map(is_truthy);

    // Never entered
    if known == Some(false) {
        return Ok(AssemblyInfo::new(ValueType::Void));
    }

    let start_label = compiler.new_label();
    let mut info = AssemblyInfo::new(ValueType::Void);
    info.push(Instruction::Label(start_label));

    if known == Some(true) {
        info.append(gen_statement(compiler, environment, &while_stmt.body)?);
        info.push(Instruction::Jump(start_label));
        return Ok(info);
    }

    let condition = gen_expression(compiler, environment, &while_stmt.condition)?;
    let body = gen_statement(compiler, environment, &while_stmt.body)?;
    let end_label = compiler.new_label();

    info.append(condition);
    info.push(Instruction::JumpIfFalse(end_label));
    info.append(body);
    info.push(Instruction::Jump(start_label));
    info.push(Instruction::Label(end_label));
    Ok(info)
}

fn gen_fn_decl(
    compiler: &mut Compiler,
    environment: &mut Environment,
    declaration: &FnDeclStmt,
) -> Result<AssemblyInfo, Error> {
    let name = declaration.name.value.clone();
    let arity = declaration.parameters.len();

    compiler.functions.push(FunctionRecord {
        name: name.clone(),
        parameters: declaration
            .parameters
            .iter()
            .map(|parameter| parameter.value.clone())
            .collect(),
        body: declaration.body.clone(),
    });

    let index = environment.define(&name, ValueType::Function);

    Ok(AssemblyInfo::with(
        ValueType::Void,
        vec![
            Instruction::FunctionRef { name, arity },
            Instruction::Store {
                index,
                value_type: ValueType::Function,
            },
        ],
    ))
}
