//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures carrying the source line
//! - Specific error variants for lexing, parsing and lowering
//! - The severity split between recoverable and fatal errors
//! - The diagnostic sink the parser reports into

pub mod errors;
pub mod reporter;
