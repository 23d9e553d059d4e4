use log::debug;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{LiteralExpr, LiteralValue},
        statements::{
            BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, PrintStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::expr::parse_expr,
};

use super::parser::Parser;

/// Parses one declaration, recovering from any syntax error inside it.
///
/// This is the only place a parse error is caught. On error the parser
/// synchronizes to the next statement boundary and the declaration becomes `None`.
pub fn parse_declaration(parser: &mut Parser) -> Option<Stmt> {
    debug!("Entering declaration at {}", parser.current_token());

    let handler = parser
        .get_decl_lookup()
        .get(&parser.current_token_kind())
        .copied();

    let result = match handler {
        Some(handler) => handler(parser),
        None => parse_stmt(parser),
    };

    match result {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            debug!("Recovering from {}", error);
            parser.synchronize();
            None
        }
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "Expect variable name.")?;

    let initializer = if parser.matches(&[TokenKind::Assignment]) {
        parse_expr(parser)?
    } else {
        Expr::Literal(LiteralExpr {
            value: LiteralValue::Nil,
            line: name.line,
        })
    };

    parser.expect(TokenKind::Semicolon, "Expect ';' after value.")?;

    Ok(Stmt::VarDecl(VarDeclStmt { name, initializer }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier, "Expect function name.")?;
    parser.expect(TokenKind::OpenParen, "Expect '(' after function name.")?;

    let limit = parser.get_config().max_parameters;
    let mut parameters = Vec::new();

    if !parser.check(TokenKind::CloseParen) {
        loop {
            if parameters.len() >= limit {
                parser.error_at_current(ErrorImpl::TooManyParameters { limit });
            }
            parameters.push(parser.expect(TokenKind::Identifier, "Expect parameter name.")?);

            if !parser.matches(&[TokenKind::Comma]) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "Expect ')' after parameters.")?;
    parser.expect(TokenKind::OpenCurly, "Expect '{' before function body.")?;
    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        name,
        parameters,
        body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen, "Expect '(' after 'while'.")?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "Expect ')' after condition.")?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let expression = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "Expect ';' after value.")?;

    Ok(Stmt::Print(PrintStmt { expression }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    Ok(Stmt::Block(parse_block(parser)?))
}

/// Parses the rest of a block after its `{`.
///
/// Declarations inside the block recover on their own; a recovered one is left out.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let mut body = Vec::new();

    while !parser.check(TokenKind::CloseCurly) && !parser.is_at_end() {
        if let Some(stmt) = parse_declaration(parser) {
            body.push(stmt);
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expect '}' after block.")?;

    Ok(BlockStmt { body })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_expr(parser)?;

    parser.expect(TokenKind::OpenCurly, "Expect '{' after if condition.")?;
    let then_branch = parse_block(parser)?;

    let else_branch = if parser.matches(&[TokenKind::Else]) {
        parser.expect(TokenKind::OpenCurly, "Expect '{' after 'else'.")?;
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_branch,
        else_branch,
    }))
}
