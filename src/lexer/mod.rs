//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Token span tracking for error reporting
//! - Unknown characters, which become `Illegal` tokens instead of errors

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
