//! Lexical analysis for Scala-like source.
//!
//! This module converts source text into a stream of tokens for parsing. It
//! handles:
//!
//! - Rune level scanning over UTF-8 input, reporting undecodable bytes
//! - Keywords, identifiers (including symbolic and backtick-quoted ones),
//!   numbers, strings, character and symbol literals
//! - Nested block comments and line comments
//! - Bracket region tracking
//! - Inferring statement separators from newlines via lookahead

pub mod chars;
pub mod cursor;
pub mod lexer;
pub mod lookahead;
pub mod newline;
pub mod states;
pub mod tokens;
