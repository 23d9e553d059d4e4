//! Lexical analysis module.
//!
//! This module contains the reference lexer that turns source text into the
//! token stream the parser consumes. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
