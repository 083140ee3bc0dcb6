//! Deciding whether a newline terminates a statement.
//!
//! The decision is a plain function over the surrounding tokens so a parser
//! can swap in its own rules with [`Lexer::with_newline_policy`].

use crate::errors::errors::Error;

use super::{
    lexer::{Lexer, State},
    tokens::{Token, TokenKind},
};

/// What a newline policy gets to look at.
#[derive(Debug)]
pub struct NewlineContext<'t> {
    /// Last significant token before the newline, comments excluded.
    pub previous: Option<TokenKind>,
    /// Token scanning would produce right after the newline.
    pub next: &'t Token,
    /// Innermost open bracket.
    pub region: Option<TokenKind>,
}

pub type NewlinePolicy = fn(&NewlineContext) -> bool;

/// Newlines separate statements at top level and inside braces, when the
/// previous token can end a statement and the next one can begin one.
pub fn default_newline_policy(context: &NewlineContext) -> bool {
    if matches!(context.region, Some(TokenKind::OpenParen | TokenKind::OpenBracket)) {
        return false;
    }

    context.previous.is_some_and(can_end_statement) && can_begin_statement(context.next)
}

pub fn can_end_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Symbol
            | TokenKind::Number
            | TokenKind::Boolean
            | TokenKind::Character
            | TokenKind::String
            | TokenKind::This
            | TokenKind::Null
            | TokenKind::Return
            | TokenKind::Type
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
    )
}

pub fn can_begin_statement(token: &Token) -> bool {
    !matches!(
        token.kind,
        TokenKind::EOF
            | TokenKind::Error
            | TokenKind::Comment
            | TokenKind::Newline
            | TokenKind::Newlines
            | TokenKind::OpOrDelim
            | TokenKind::Dot
            | TokenKind::Semicolon
            | TokenKind::OpenBracket
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
            | TokenKind::Catch
            | TokenKind::Else
            | TokenKind::Extends
            | TokenKind::Finally
            | TokenKind::ForSome
            | TokenKind::Match
            | TokenKind::With
            | TokenKind::Yield
    )
}

impl<'a> Lexer<'a> {
    /// Called from inside the root dispatch, where the pending continuation
    /// is already spent, so the trial starts at the root state.
    pub(crate) fn should_introduce_newline(&mut self) -> Result<bool, Error> {
        let next = self.trial(0, State::Start)?;
        let context = NewlineContext {
            previous: self.last_token,
            next: &next,
            region: self.region_stack.last().copied(),
        };

        Ok((self.newline_policy)(&context))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{Position, Span};

    use super::*;

    fn token(kind: TokenKind) -> Token {
        let file = Rc::new(String::from("test.scala"));
        Token {
            kind,
            value: String::new(),
            span: Span {
                start: Position(0, Rc::clone(&file)),
                end: Position(0, file),
            },
        }
    }

    fn decide(previous: Option<TokenKind>, next: TokenKind, region: Option<TokenKind>) -> bool {
        let next = token(next);
        default_newline_policy(&NewlineContext { previous, next: &next, region })
    }

    #[test]
    fn test_statement_boundary() {
        assert!(decide(Some(TokenKind::Identifier), TokenKind::Val, None));
        assert!(decide(Some(TokenKind::CloseParen), TokenKind::Identifier, None));
        assert!(decide(Some(TokenKind::Number), TokenKind::Def, Some(TokenKind::OpenCurly)));
    }

    #[test]
    fn test_previous_cannot_end_statement() {
        assert!(!decide(None, TokenKind::Val, None));
        assert!(!decide(Some(TokenKind::OpOrDelim), TokenKind::Identifier, None));
        assert!(!decide(Some(TokenKind::OpenCurly), TokenKind::Identifier, None));
        assert!(!decide(Some(TokenKind::Val), TokenKind::Identifier, None));
    }

    #[test]
    fn test_next_cannot_begin_statement() {
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::Else, None));
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::Dot, None));
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::OpOrDelim, None));
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::CloseCurly, None));
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::EOF, None));
    }

    #[test]
    fn test_parens_and_brackets_disable_newlines() {
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::Identifier, Some(TokenKind::OpenParen)));
        assert!(!decide(Some(TokenKind::Identifier), TokenKind::Identifier, Some(TokenKind::OpenBracket)));
    }
}
