/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Expr` and `Stmt` node enums
/// - expressions: Definitions for the expression node payloads
/// - statements: Definitions for the statement node payloads
pub mod ast;
pub mod expressions;
pub mod statements;
