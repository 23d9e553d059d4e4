use std::collections::HashMap;

use crate::{ast::ast::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

/// Precedence levels, lowest binding first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Default,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Ternary,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Primary,
}

impl BindingPower {
    /// The level that binds one step tighter.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Assignment,
            BindingPower::Assignment => BindingPower::LogicalOr,
            BindingPower::LogicalOr => BindingPower::LogicalAnd,
            BindingPower::LogicalAnd => BindingPower::Ternary,
            BindingPower::Ternary => BindingPower::Equality,
            BindingPower::Equality => BindingPower::Comparison,
            BindingPower::Comparison => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Unary,
            BindingPower::Unary => BindingPower::Call,
            BindingPower::Call | BindingPower::Primary => BindingPower::Primary,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BindingPower::LogicalOr | BindingPower::LogicalAnd)
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.binary(TokenKind::Or, BindingPower::LogicalOr);
    parser.binary(TokenKind::And, BindingPower::LogicalAnd);

    // Equality and comparison
    parser.binary(TokenKind::Equals, BindingPower::Equality);
    parser.binary(TokenKind::NotEquals, BindingPower::Equality);
    parser.binary(TokenKind::Greater, BindingPower::Comparison);
    parser.binary(TokenKind::GreaterEquals, BindingPower::Comparison);
    parser.binary(TokenKind::Less, BindingPower::Comparison);
    parser.binary(TokenKind::LessEquals, BindingPower::Comparison);

    // Additive and multiplicative
    parser.binary(TokenKind::Plus, BindingPower::Additive);
    parser.binary(TokenKind::Dash, BindingPower::Additive);
    parser.binary(TokenKind::Star, BindingPower::Multiplicative);
    parser.binary(TokenKind::Slash, BindingPower::Multiplicative);

    // Declarations
    parser.decl(TokenKind::Let, parse_var_decl_stmt);
    parser.decl(TokenKind::Fn, parse_fn_decl_stmt);

    // Statements
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Log, parse_print_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
