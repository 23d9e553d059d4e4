use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, LiteralValue, LogicalExpr, TernaryExpr,
            UnaryExpr, VariableExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    assembly::{AssemblyInfo, Instruction, ValueType},
    compiler::{check_number_operand, check_number_operands, is_truthy, Compiler},
    environment::Environment,
};

/// Lowers an expression to assembly info.
pub fn gen_expression(
    compiler: &mut Compiler,
    environment: &mut Environment,
    expression: &Expr,
) -> Result<AssemblyInfo, Error> {
    match expression {
        Expr::Literal(literal) => Ok(gen_literal(&literal.value)),
        Expr::Grouping(grouping) => gen_expression(compiler, environment, &grouping.expression),
        Expr::Unary(unary) => gen_unary(compiler, environment, unary),
        Expr::Binary(binary) => gen_binary(compiler, environment, binary),
        Expr::Logical(logical) => gen_logical(compiler, environment, logical),
        Expr::Ternary(ternary) => gen_ternary(compiler, environment, ternary),
        Expr::Variable(variable) => gen_variable(environment, variable),
        Expr::Assign(assignment) => gen_assignment(compiler, environment, assignment),
        Expr::Call(call) => gen_call(compiler, environment, call),
    }
}

fn gen_literal(value: &LiteralValue) -> AssemblyInfo {
    match value {
        LiteralValue::Number(number) => {
            AssemblyInfo::with(ValueType::Decimal, vec![Instruction::PushDecimal(*number)])
        }
        LiteralValue::Str(string) => AssemblyInfo::with(
            ValueType::Str,
            vec![Instruction::PushString(string.clone())],
        ),
        LiteralValue::Boolean(boolean) => {
            AssemblyInfo::with(ValueType::Boolean, vec![Instruction::PushBoolean(*boolean)])
        }
        LiteralValue::Nil => AssemblyInfo::with(ValueType::Nil, vec![Instruction::PushNil]),
    }
}

fn gen_unary(
    compiler: &mut Compiler,
    environment: &mut Environment,
    unary: &UnaryExpr,
) -> Result<AssemblyInfo, Error> {
    let right = gen_expression(compiler, environment, &unary.right)?;

    let (value_type, instruction) = match unary.operator.kind {
        TokenKind::Dash => {
            check_number_operand(&unary.operator, right.value_type)?;
            (ValueType::Decimal, Instruction::Negate)
        }
        TokenKind::Not => (ValueType::Boolean, Instruction::Not),
        _ => return Err(unsupported_operator(&unary.operator)),
    };

    let mut info = AssemblyInfo::new(value_type);
    info.append(right);
    info.push(instruction);
    Ok(info)
}

/// Operator the parser never builds into this node kind.
fn unsupported_operator(operator: &Token) -> Error {
    Error::new(
        ErrorImpl::UnsupportedOperator {
            operator: operator.value.clone(),
        },
        operator.line,
    )
}

fn gen_binary(
    compiler: &mut Compiler,
    environment: &mut Environment,
    binary: &BinaryExpr,
) -> Result<AssemblyInfo, Error> {
    let left = gen_expression(compiler, environment, &binary.left)?;
    let right = gen_expression(compiler, environment, &binary.right)?;
    let operator = &binary.operator;

    // (result type, instruction, numeric operands only)
    let (value_type, instruction, numeric) = match operator.kind {
        TokenKind::Equals => (ValueType::Boolean, Instruction::Equal, false),
        TokenKind::NotEquals => (ValueType::Boolean, Instruction::NotEqual, false),
        TokenKind::Plus => (ValueType::Decimal, Instruction::Add, true),
        TokenKind::Dash => (ValueType::Decimal, Instruction::Subtract, true),
        TokenKind::Star => (ValueType::Decimal, Instruction::Multiply, true),
        TokenKind::Slash => (ValueType::Decimal, Instruction::Divide, true),
        TokenKind::Greater => (ValueType::Boolean, Instruction::Greater, true),
        TokenKind::GreaterEquals => (ValueType::Boolean, Instruction::GreaterEqual, true),
        TokenKind::Less => (ValueType::Boolean, Instruction::Less, true),
        TokenKind::LessEquals => (ValueType::Boolean, Instruction::LessEqual, true),
        _ => return Err(unsupported_operator(operator)),
    };

    if numeric {
        check_number_operands(operator, left.value_type, right.value_type)?;
    }

    let mut info = AssemblyInfo::new(value_type);
    info.append(left);
    info.append(right);
    info.push(instruction);
    Ok(info)
}

fn gen_logical(
    compiler: &mut Compiler,
    environment: &mut Environment,
    logical: &LogicalExpr,
) -> Result<AssemblyInfo, Error> {
    let is_or = logical.operator.kind == TokenKind::Or;

    // A literal left operand decides which side is the result.
    if let Some(truthy) = logical.left.as_literal().map(is_truthy) {
        return if truthy == is_or {
            gen_expression(compiler, environment, &logical.left)
        } else {
            gen_expression(compiler, environment, &logical.right)
        };
    }

    let left = gen_expression(compiler, environment, &logical.left)?;
    let right = gen_expression(compiler, environment, &logical.right)?;
    let end = compiler.new_label();

    let mut info = AssemblyInfo::new(left.value_type.merge(right.value_type));
    info.append(left);
    info.push(Instruction::Dup);
    info.push(if is_or {
        Instruction::JumpIfTrue(end)
    } else {
        Instruction::JumpIfFalse(end)
    });
    info.push(Instruction::Pop);
    info.append(right);
    info.push(Instruction::Label(end));
    Ok(info)
}

fn gen_ternary(
    compiler: &mut Compiler,
    environment: &mut Environment,
    ternary: &TernaryExpr,
) -> Result<AssemblyInfo, Error> {
    if let Some(truthy) = ternary.condition.as_literal().map(is_truthy) {
        let branch = if truthy {
            &ternary.then_branch
        } else {
            &ternary.else_branch
        };
        return gen_expression(compiler, environment, branch);
    }

    let condition = gen_expression(compiler, environment, &ternary.condition)?;
    let then_branch = gen_expression(compiler, environment, &ternary.then_branch)?;
    let else_branch = gen_expression(compiler, environment, &ternary.else_branch)?;
    let else_label = compiler.new_label();
    let end_label = compiler.new_label();

    let mut info = AssemblyInfo::new(then_branch.value_type.merge(else_branch.value_type));
    info.append(condition);
    info.push(Instruction::JumpIfFalse(else_label));
    info.append(then_branch);
    info.push(Instruction::Jump(end_label));
    info.push(Instruction::Label(else_label));
    info.append(else_branch);
    info.push(Instruction::Label(end_label));
    Ok(info)
}

fn gen_variable(environment: &Environment, variable: &VariableExpr) -> Result<AssemblyInfo, Error> {
    let Some(record) = environment.get(&variable.name.value) else {
        return Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: variable.name.value.clone(),
            },
            variable.name.line,
        ));
    };

    Ok(AssemblyInfo::with(
        record.value_type,
        vec![Instruction::Load {
            index: record.index,
            value_type: record.value_type,
        }],
    ))
}

fn gen_assignment(
    compiler: &mut Compiler,
    environment: &mut Environment,
    assignment: &AssignmentExpr,
) -> Result<AssemblyInfo, Error> {
    let value = gen_expression(compiler, environment, &assignment.value)?;
    let value_type = value.value_type;
    let name = &assignment.name.value;

    // A variable keeps one slot for the whole unit. Object slots take any value,
    // nil slots widen to Object, any other type change is fatal.
    let (index, slot_type) = match environment.get(name) {
        None => (environment.define(name, value_type), value_type),
        Some(existing)
            if existing.value_type == value_type || existing.value_type == ValueType::Object =>
        {
            (existing.index, existing.value_type)
        }
        Some(existing) if existing.value_type == ValueType::Nil => {
            let index = environment
                .retype(name, ValueType::Object)
                .unwrap_or(existing.index);
            (index, ValueType::Object)
        }
        Some(existing) => {
            return Err(Error::new(
                ErrorImpl::AssignmentTypeMismatch {
                    variable: name.clone(),
                    expected: existing.value_type,
                    found: value_type,
                },
                assignment.value.get_line(),
            ))
        }
    };

    let mut info = AssemblyInfo::new(value_type);
    info.append(value);
    info.push(Instruction::Dup);
    info.push(Instruction::Store {
        index,
        value_type: slot_type,
    });
    Ok(info)
}

fn gen_call(
    compiler: &mut Compiler,
    environment: &mut Environment,
    call: &CallExpr,
) -> Result<AssemblyInfo, Error> {
    let mut info = AssemblyInfo::new(ValueType::Object);
    info.append(gen_expression(compiler, environment, &call.callee)?);

    for argument in call.arguments.iter() {
        info.append(gen_expression(compiler, environment, argument)?);
    }

    info.push(Instruction::Call {
        arity: call.arguments.len(),
    });
    Ok(info)
}
