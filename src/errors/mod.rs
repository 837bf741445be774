//! Diagnostic types produced while parsing.
//!
//! Lexical problems surface as `Illegal` tokens and are reported once the
//! parser reaches them. Structural and expression problems are reported as
//! they are detected. Every diagnostic carries the source position it was
//! detected at, a short name and a suggestion used by the caret renderer.

pub mod errors;
