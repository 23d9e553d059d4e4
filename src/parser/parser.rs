//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, the token cursor helpers and
//! the panic-mode recovery routine. Expression and statement productions live
//! in `expr` and `stmt`.
//!
//! It maintains lookup tables for:
//! - Declaration handlers (`let`, `fn`)
//! - Statement handlers (`while`, `log`, `{`, `if`)
//! - Binding powers for binary operator precedence

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    ast::ast::{Expr, Stmt},
    config::Config,
    errors::{
        errors::{Error, ErrorImpl},
        reporter::Reporter,
    },
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::parse_expr,
    lookups::{create_token_lookups, BPLookup, BindingPower, StmtHandler, StmtLookup},
    stmt::parse_declaration,
};

/// Tokens that start a declaration or statement; recovery stops in front of them.
const SYNC_KINDS: [TokenKind; 8] = [
    TokenKind::Class,
    TokenKind::Fn,
    TokenKind::Let,
    TokenKind::For,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Log,
    TokenKind::Return,
];

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream, the diagnostic sink and the lookup
/// tables for declarations, statements and binary operators. It tracks the
/// current position in the token stream and provides methods for token
/// consumption.
pub struct Parser<'r> {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Parameter and argument limits
    config: Config,
    /// Receives every syntax error and diagnostic
    reporter: &'r mut dyn Reporter,
    /// Lookup table for declaration handlers
    decl_lookup: StmtLookup,
    /// Lookup table for statement handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for binary operator binding powers
    binding_power_lookup: BPLookup,
}

impl<'r> Parser<'r> {
    /// Creates a new Parser instance with its lookup tables populated.
    ///
    /// A missing trailing `EOF` token is appended so the cursor always has a token to look at.
    pub fn new(mut tokens: Vec<Token>, config: Config, reporter: &'r mut dyn Reporter) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token::new(TokenKind::EOF, "", line));
        }

        info!("Parser created with {} tokens", tokens.len());

        let mut parser = Parser {
            tokens,
            pos: 0,
            config,
            reporter,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Parses declarations until `EOF`.
    ///
    /// Never fails: a declaration that hits a syntax error is recovered from and
    /// leaves a `None` in its slot.
    pub fn parse(&mut self) -> Vec<Option<Stmt>> {
        info!("Beginning parse phase");

        let mut statements = vec![];
        while !self.is_at_end() {
            statements.push(parse_declaration(self));
        }

        info!(
            "Parsed {} declarations ({} recovered)",
            statements.len(),
            statements.iter().filter(|stmt| stmt.is_none()).count()
        );
        statements
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Returns the most recently consumed token.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Advances to the next token and returns the consumed one. Never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    pub fn is_at_end(&self) -> bool {
        self.current_token_kind() == TokenKind::EOF
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current_token_kind() == kind
    }

    /// Consumes the current token if it is one of `kinds`.
    pub fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            return true;
        }
        false
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// The consumed token, or a reported `UnexpectedToken` error carrying `message`.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(expected_kind) {
            return Ok(self.advance().clone());
        }

        let token = self.current_token().clone();
        debug!("Expected {} but found {}", expected_kind, token);

        Err(self.error(
            &token,
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                message: message.to_string(),
            },
        ))
    }

    /// Reports `error_impl` at `token` and returns it as an [`Error`].
    ///
    /// Callers decide whether the error is raised (`return Err(..)`) or only reported.
    pub fn error(&mut self, token: &Token, error_impl: ErrorImpl) -> Error {
        let location = if token.kind == TokenKind::EOF {
            String::from("at end")
        } else {
            format!("at '{}'", token.value)
        };

        self.reporter
            .report(token.line, &format!("{}: {}", location, error_impl));
        Error::new(error_impl, token.line)
    }

    /// Reports `error_impl` at the current token.
    pub fn error_at_current(&mut self, error_impl: ErrorImpl) -> Error {
        let token = self.current_token().clone();
        self.error(&token, error_impl)
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// Stops after a `;` or in front of a token that starts a declaration or statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                break;
            }
            if SYNC_KINDS.contains(&self.current_token_kind()) {
                break;
            }
            self.advance();
        }

        debug!("Synchronized at {}", self.current_token());
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &StmtLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Binding power of the current token, if it is a binary operator.
    pub fn current_binding_power(&self) -> Option<BindingPower> {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
    }

    /// Registers a binary operator at the given precedence level.
    pub fn binary(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: StmtHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a token stream into a sequence of top-level declarations.
///
/// This is the main entry point for parsing. Malformed declarations are
/// reported to `reporter` and appear as `None`.
pub fn parse(tokens: Vec<Token>, reporter: &mut dyn Reporter) -> Vec<Option<Stmt>> {
    parse_with_config(tokens, Config::default(), reporter)
}

pub fn parse_with_config(
    tokens: Vec<Token>,
    config: Config,
    reporter: &mut dyn Reporter,
) -> Vec<Option<Stmt>> {
    Parser::new(tokens, config, reporter).parse()
}

/// Parses a single expression. Trailing tokens are an error.
pub fn parse_expression(tokens: Vec<Token>, reporter: &mut dyn Reporter) -> Result<Expr, Error> {
    let mut parser = Parser::new(tokens, Config::default(), reporter);
    let expr = parse_expr(&mut parser)?;

    if !parser.is_at_end() {
        return Err(parser.error_at_current(ErrorImpl::UnexpectedToken {
            token: parser.current_token().value.clone(),
            message: String::from("Expect end of expression."),
        }));
    }

    Ok(expr)
}
