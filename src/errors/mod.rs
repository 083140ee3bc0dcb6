//! Error types for the lexer.
//!
//! Two families live here:
//!
//! - Lexical errors, whose message becomes the text of an `Error` token and
//!   which never stop the token stream
//! - Caller-visible failures (undecodable input, misuse of lookahead) that are
//!   returned as `Err` from the driver

pub mod errors;
