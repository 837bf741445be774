//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser pulls tokens from a [`Lexer`] one at a time and uses a Pratt
//! parser approach with NUD/LED handlers for expressions and a statement
//! lookup for keyword-led statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Diagnostics are collected rather than returned early: a statement that
//! fails to parse is dropped, its error is recorded, and parsing resumes
//! after the next `;` at the brace depth the statement started on.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions and blocks may be open at once before the parser
/// gives up on the statement instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer it pulls from, the token under the cursor and
/// the diagnostics recorded so far, alongside the lookup tables that drive
/// statement and expression dispatch.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The token under the cursor
    current: Token,
    /// Diagnostics in the order they were recorded
    errors: Vec<Error>,
    /// `{` consumed minus `}` consumed
    brace_depth: i32,
    /// Expressions and blocks currently being parsed
    nesting: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `source` with all lookup tables registered.
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            errors: vec![],
            brace_depth: 0,
            nesting: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the infix binding power of the current token, `Default` when
    /// it is not an infix operator.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current.kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        match self.current.kind {
            TokenKind::OpenCurly => self.brace_depth += 1,
            TokenKind::CloseCurly => self.brace_depth -= 1,
            _ => {}
        }

        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns the current token and advances past it if it matches.
    /// Otherwise returns an `UnexpectedToken` error naming both kinds and
    /// leaves the cursor where it is.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: token.kind,
                    token: token.literal.clone(),
                },
                token.span.start,
            ));
        }

        Ok(self.advance())
    }

    /// Opens one level of nesting, failing with `NestingTooDeep` once
    /// [`MAX_NESTING_DEPTH`] levels are already open.
    ///
    /// Every successful call must be paired with [`Parser::exit_nested`].
    pub fn enter_nested(&mut self) -> Result<(), Error> {
        if self.nesting >= MAX_NESTING_DEPTH {
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                    token: token.literal.clone(),
                },
                token.span.start,
            ));
        }

        self.nesting += 1;
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Returns true while the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start
    }

    /// Diagnostics recorded so far, in order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Diagnostics recorded so far, rendered as messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Parses statements until EOF.
    ///
    /// A statement that fails is dropped, its diagnostic recorded, and the
    /// parser skips ahead past the `;` that ends it before trying again.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.has_tokens() {
            let depth = self.brace_depth;

            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    debug!(position = error.get_position().0, "{}", error);
                    self.errors.push(error);
                    self.synchronize(depth);
                }
            }
        }

        trace!(
            statements = statements.len(),
            diagnostics = self.errors.len(),
            "parsed program"
        );

        Program::new(statements)
    }

    /// Skips to just past the next `;` outside any block opened since
    /// `depth`, or to EOF. A `;` inside the failed statement's own blocks
    /// does not end it.
    fn synchronize(&mut self, depth: i32) {
        while self.has_tokens()
            && !(self.current_token_kind() == TokenKind::Semicolon && self.brace_depth <= depth)
        {
            self.advance();
        }

        if self.current_token_kind() == TokenKind::Semicolon {
            self.advance();
        }
    }
}

/// Parses `source` into a program and its diagnostics as messages.
///
/// The diagnostics list is empty exactly when the parse was clean. When it is
/// not, the program holds the statements that did parse.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (program, parser.error_messages())
}

/// Same as [`parse`] but keeps the structured diagnostics, including their
/// positions.
pub fn parse_with_errors(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (program, parser.errors)
}
