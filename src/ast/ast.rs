use std::fmt::Display;

use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, GroupingExpr, LiteralExpr, LiteralValue,
        LogicalExpr, TernaryExpr, UnaryExpr, VariableExpr,
    },
    statements::{BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, PrintStmt, VarDeclStmt, WhileStmt},
};

/// Expression node
///
/// A closed set of expression kinds. Every consumer matches on it exhaustively,
/// so adding a kind is checked at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
    Variable(VariableExpr),
    Assign(AssignmentExpr),
    Logical(LogicalExpr),
    Ternary(TernaryExpr),
    Call(CallExpr),
}

impl Expr {
    /// Source line the expression starts on.
    pub fn get_line(&self) -> u32 {
        match self {
            Expr::Literal(literal) => literal.line,
            Expr::Unary(unary) => unary.operator.line,
            Expr::Binary(binary) => binary.left.get_line(),
            Expr::Grouping(grouping) => grouping.expression.get_line(),
            Expr::Variable(variable) => variable.name.line,
            Expr::Assign(assign) => assign.name.line,
            Expr::Logical(logical) => logical.left.get_line(),
            Expr::Ternary(ternary) => ternary.condition.get_line(),
            Expr::Call(call) => call.callee.get_line(),
        }
    }

    /// Returns the literal value if the expression is a literal, looking through parentheses.
    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            Expr::Literal(literal) => Some(&literal.value),
            Expr::Grouping(grouping) => grouping.expression.as_literal(),
            _ => None,
        }
    }
}

/// Renders the expression as a fully parenthesized prefix form, e.g. `(+ 1 (* 2 3))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal.value),
            Expr::Unary(unary) => write!(f, "({} {})", unary.operator.value, unary.right),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.operator.value, binary.left, binary.right
            ),
            Expr::Grouping(grouping) => write!(f, "(group {})", grouping.expression),
            Expr::Variable(variable) => write!(f, "{}", variable.name.value),
            Expr::Assign(assign) => write!(f, "(= {} {})", assign.name.value, assign.value),
            Expr::Logical(logical) => write!(
                f,
                "({} {} {})",
                logical.operator.value, logical.left, logical.right
            ),
            Expr::Ternary(ternary) => write!(
                f,
                "(?: {} {} {})",
                ternary.condition, ternary.then_branch, ternary.else_branch
            ),
            Expr::Call(call) => {
                write!(f, "(call {}", call.callee)?;
                for argument in call.arguments.iter() {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
    VarDecl(VarDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    FnDecl(FnDeclStmt),
}

impl Stmt {
    pub fn get_stmt_name(&self) -> &str {
        match self {
            Stmt::Expression(_) => "ExpressionStmt",
            Stmt::Print(_) => "PrintStmt",
            Stmt::VarDecl(_) => "VarDeclStmt",
            Stmt::Block(_) => "BlockStmt",
            Stmt::If(_) => "IfStmt",
            Stmt::While(_) => "WhileStmt",
            Stmt::FnDecl(_) => "FnDeclStmt",
        }
    }
}
