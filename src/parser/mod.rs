//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a stream
//! of tokens into a sequence of declarations. Binary operators are parsed by
//! precedence climbing over a binding-power table.
//!
//! - Declaration parsing (`let`, `fn`)
//! - Statement parsing (`while`, `log`, blocks, `if`, expression statements)
//! - Expression parsing (assignment, logical, ternary, binary, unary, calls)
//! - Panic-mode error recovery at declaration boundaries

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
