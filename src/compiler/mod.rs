//! Code generation module for the compiler.
//!
//! This module lowers the parsed program into typed stack-machine assembly info.
//! It handles:
//!
//! - Slot allocation through a flat environment
//! - Compilation of expressions and statements
//! - Static numeric-operand checks
//! - The local-variable table and recorded function declarations

pub mod assembly;
pub mod compiler;
pub mod environment;
pub mod expr;
pub mod stmt;
