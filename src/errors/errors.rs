use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Lexical errors travel through the token stream; everything else is a
    /// failure of the caller or of the input itself.
    pub fn is_lexical(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::InvalidEncoding { .. } | ErrorImpl::LookaheadMisuse { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnmatchedClosingBracket { .. } => "UnmatchedClosingBracket",
            ErrorImpl::MismatchedBracket { .. } => "MismatchedBracket",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnterminatedCharacter { .. } => "UnterminatedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedMultiLineString => "UnterminatedMultiLineString",
            ErrorImpl::UnterminatedQuotedIdentifier => "UnterminatedQuotedIdentifier",
            ErrorImpl::UnknownLexeme { .. } => "UnknownLexeme",
            ErrorImpl::InvalidEncoding { .. } => "InvalidEncoding",
            ErrorImpl::LookaheadMisuse { .. } => "LookaheadMisuse",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnmatchedClosingBracket { bracket } => ErrorTip::Suggestion(format!(
                "`{}` closes a region that was never opened, is an opening bracket missing?",
                bracket
            )),
            ErrorImpl::MismatchedBracket { expected, found } => ErrorTip::Suggestion(format!(
                "Expected `{}` to close the innermost region, found `{}`",
                expected, found
            )),
            ErrorImpl::MalformedNumber { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, only `l`, `f` and `d` suffixes are allowed",
                literal
            )),
            ErrorImpl::UnterminatedCharacter { .. } => ErrorTip::Suggestion(String::from(
                "Character literals hold exactly one (possibly escaped) character",
            )),
            ErrorImpl::UnterminatedString | ErrorImpl::UnterminatedMultiLineString => {
                ErrorTip::Suggestion(String::from("Did you forget the closing quote?"))
            }
            ErrorImpl::UnterminatedQuotedIdentifier => {
                ErrorTip::Suggestion(String::from("Did you forget the closing backtick?"))
            }
            ErrorImpl::UnknownLexeme { .. } => ErrorTip::None,
            ErrorImpl::InvalidEncoding { .. } => {
                ErrorTip::Suggestion(String::from("Source files must be valid UTF-8"))
            }
            ErrorImpl::LookaheadMisuse { .. } => ErrorTip::Suggestion(String::from(
                "Emit or ignore the pending lexeme before looking ahead",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("closing bracket {bracket:?} found without a matching opening bracket")]
    UnmatchedClosingBracket { bracket: String },
    #[error("unmatched bracket: expected {expected:?}, found {found:?}")]
    MismatchedBracket { expected: String, found: String },
    #[error("bad number syntax: {literal:?}")]
    MalformedNumber { literal: String },
    #[error("consumed open single quote, expected closing single quote but found {found:?}")]
    UnterminatedCharacter { found: String },
    #[error("unexpected end of string")]
    UnterminatedString,
    #[error("unexpected end of multi line string")]
    UnterminatedMultiLineString,
    #[error("unexpected end of quoted identifier")]
    UnterminatedQuotedIdentifier,
    #[error("unknown lexeme: {lexeme:?}")]
    UnknownLexeme { lexeme: String },
    #[error("invalid UTF-8 sequence starting with byte {byte:#04x}")]
    InvalidEncoding { byte: u8 },
    #[error("previous lexeme {pending:?} was not consumed before looking ahead")]
    LookaheadMisuse { pending: String },
}
