use std::slice::Iter;

use crate::lexer::tokens::Token;

use super::ast::{Expr, Stmt};

/// `{ ... }` - a sequence of declarations sharing the enclosing environment.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// `log expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
}

/// `let name [= initializer];` - a missing initializer is stored as a `nil` literal.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub name: Token,
    pub initializer: Expr,
}

/// Both arms are blocks; the grammar requires braces.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: BlockStmt,
    pub else_branch: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: Token,
    pub parameters: Vec<Token>,
    pub body: BlockStmt,
}
