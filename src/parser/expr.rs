//! Expression productions.
//!
//! Binary levels are parsed by precedence climbing over the binding-power table:
//! each level parses its operands one level tighter and folds left. Assignment,
//! ternary, unary, call and primary have their own productions.

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, GroupingExpr, LiteralExpr, LiteralValue,
            LogicalExpr, TernaryExpr, UnaryExpr, VariableExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Literal, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

/// Right-associative. An invalid target is reported but not raised; the left side is returned as is.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let expr = parse_binary_expr(parser, BindingPower::LogicalOr)?;

    if parser.matches(&[TokenKind::Assignment]) {
        let equals = parser.previous().clone();
        let value = parse_assignment_expr(parser)?;

        if let Expr::Variable(variable) = expr {
            return Ok(Expr::Assign(AssignmentExpr {
                name: variable.name,
                value: Box::new(value),
            }));
        }

        parser.error(&equals, ErrorImpl::InvalidAssignmentTarget);
    }

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    match bp {
        BindingPower::Ternary => return parse_ternary_expr(parser),
        BindingPower::Unary => return parse_unary_expr(parser),
        _ => {}
    }

    let mut left = parse_binary_expr(parser, bp.next())?;

    while parser.current_binding_power() == Some(bp) {
        let operator = parser.advance().clone();
        let right = parse_binary_expr(parser, bp.next())?;

        left = if bp.is_logical() {
            Expr::Logical(LogicalExpr {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            })
        } else {
            Expr::Binary(BinaryExpr {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            })
        };
    }

    Ok(left)
}

/// Both branches parse at equality level, so nested ternaries need parentheses.
pub fn parse_ternary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let condition = parse_binary_expr(parser, BindingPower::Equality)?;

    if !parser.matches(&[TokenKind::Question]) {
        return Ok(condition);
    }

    let then_branch = parse_binary_expr(parser, BindingPower::Equality)?;
    parser.expect(TokenKind::Colon, "Expect ':' after then branch of ternary.")?;
    let else_branch = parse_binary_expr(parser, BindingPower::Equality)?;

    Ok(Expr::Ternary(TernaryExpr {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.matches(&[TokenKind::Not, TokenKind::Dash]) {
        let operator = parser.previous().clone();
        let right = parse_unary_expr(parser)?;

        return Ok(Expr::Unary(UnaryExpr {
            operator,
            right: Box::new(right),
        }));
    }

    parse_call_expr(parser)
}

pub fn parse_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_primary_expr(parser)?;

    while parser.matches(&[TokenKind::OpenParen]) {
        if !matches!(expr, Expr::Variable(_)) {
            let paren = parser.previous().clone();
            return Err(parser.error(&paren, ErrorImpl::InvalidCallTarget));
        }

        expr = finish_call(parser, expr)?;
    }

    Ok(expr)
}

fn finish_call(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    let limit = parser.get_config().max_arguments;
    let mut arguments = vec![];

    if !parser.check(TokenKind::CloseParen) {
        loop {
            if arguments.len() >= limit {
                parser.error_at_current(ErrorImpl::TooManyArguments { limit });
            }
            arguments.push(parse_expr(parser)?);

            if !parser.matches(&[TokenKind::Comma]) {
                break;
            }
        }
    }

    let paren = parser.expect(TokenKind::CloseParen, "Expect ')' after arguments.")?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(callee),
        paren,
        arguments,
    }))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let line = parser.current_token().line;

    let value = match parser.current_token_kind() {
        TokenKind::Identifier => {
            let name = parser.advance().clone();
            return Ok(Expr::Variable(VariableExpr { name }));
        }
        TokenKind::OpenParen => {
            parser.advance();
            let expression = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(GroupingExpr {
                expression: Box::new(expression),
            }));
        }
        TokenKind::True => LiteralValue::Boolean(true),
        TokenKind::False => LiteralValue::Boolean(false),
        TokenKind::Nil => LiteralValue::Nil,
        TokenKind::Number => number_value(parser)?,
        TokenKind::String => string_value(parser),
        _ => {
            return Err(parser.error_at_current(ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
                message: String::from("Expect expression."),
            }))
        }
    };

    parser.advance();
    Ok(Expr::Literal(LiteralExpr { value, line }))
}

/// Hand-built tokens may omit the literal, in which case the lexeme is parsed.
fn number_value(parser: &mut Parser) -> Result<LiteralValue, Error> {
    let token = parser.current_token().clone();

    match token.literal {
        Some(Literal::Number(value)) => Ok(LiteralValue::Number(value)),
        _ => token
            .value
            .parse::<f64>()
            .map(LiteralValue::Number)
            .map_err(|_| {
                parser.error(
                    &token,
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                )
            }),
    }
}

fn string_value(parser: &Parser) -> LiteralValue {
    let token = parser.current_token();

    match &token.literal {
        Some(Literal::Str(value)) => LiteralValue::Str(value.clone()),
        _ => LiteralValue::Str(token.value.trim_matches('"').to_string()),
    }
}
