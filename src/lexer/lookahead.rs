//! Trial dispatch without committing the consumed input.
//!
//! A lookahead snapshots the scanning state, runs the dispatcher, and puts
//! everything back. The only side effect a dispatch has outside the snapshot
//! is on the region stack, which is reverted from the kind of the token the
//! trial produced.

use std::rc::Rc;

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    lexer::{Lexer, State},
    tokens::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub start: usize,
    pub pos: usize,
    pub width: usize,
    pub state: State,
    pub last_token: Option<TokenKind>,
    pub region_depth: usize,
}

/// What dispatching a token did to the region stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEffect {
    None,
    Pushed,
    Popped(TokenKind),
}

/// Error tokens never touch the region stack, so only well formed brackets
/// have an effect.
pub fn region_effect(kind: TokenKind) -> RegionEffect {
    if kind.is_opening_bracket() {
        return RegionEffect::Pushed;
    }
    if kind.is_closing_bracket() {
        if let Some(open) = kind.inverted() {
            return RegionEffect::Popped(open);
        }
    }
    RegionEffect::None
}

impl<'a> Lexer<'a> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            start: self.start,
            pos: self.pos,
            width: self.width,
            state: self.state,
            last_token: self.last_token,
            region_depth: self.region_stack.len(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.start = snapshot.start;
        self.pos = snapshot.pos;
        self.width = snapshot.width;
        self.state = snapshot.state;
        self.last_token = snapshot.last_token;
        debug_assert_eq!(self.region_stack.len(), snapshot.region_depth);
    }

    fn undo_region_effect(&mut self, effect: RegionEffect) {
        match effect {
            RegionEffect::None => {}
            RegionEffect::Pushed => {
                self.region_stack.pop();
            }
            RegionEffect::Popped(open) => self.region_stack.push(open),
        }
    }

    /// Returns the `n`th token (0 based) that the following calls to
    /// `Lexer::lex` would produce, leaving the lexer untouched. Scanning
    /// resumes from the pending continuation, so a closing quote still owed
    /// by the previous token is dropped first.
    ///
    /// The pending lexeme must be empty; anything else is a usage error.
    pub fn look_ahead(&mut self, n: usize) -> Result<Token, Error> {
        self.trial(n, self.state)
    }

    /// Runs `n + 1` dispatches, the first one from `entry`, and rolls all of
    /// them back.
    pub(crate) fn trial(&mut self, n: usize, entry: State) -> Result<Token, Error> {
        if self.pos > self.start {
            return Err(Error::new(
                ErrorImpl::LookaheadMisuse { pending: self.val() },
                Position(self.start as u32, Rc::clone(&self.file)),
            ));
        }

        let snapshot = self.snapshot();
        trace!(pos = snapshot.pos, depth = n, "lookahead");

        let result = self.dispatch(entry).and_then(|token| {
            let effect = region_effect(token.kind);
            let res = if n == 0 {
                Ok(token)
            } else {
                let resume = self.state;
                self.trial(n - 1, resume)
            };
            self.undo_region_effect(effect);
            res
        });

        self.restore(snapshot);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_effect() {
        assert_eq!(region_effect(TokenKind::OpenCurly), RegionEffect::Pushed);
        assert_eq!(region_effect(TokenKind::CloseParen), RegionEffect::Popped(TokenKind::OpenParen));
        assert_eq!(region_effect(TokenKind::Error), RegionEffect::None);
        assert_eq!(region_effect(TokenKind::Identifier), RegionEffect::None);
    }

    #[test]
    fn test_look_ahead_does_not_consume() {
        let mut lexer = Lexer::new("foo ( bar", None);
        let before = lexer.snapshot();

        let token = lexer.look_ahead(0).unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, "foo");
        assert_eq!(lexer.snapshot(), before);

        let token = lexer.look_ahead(1).unwrap();
        assert_eq!(token.kind, TokenKind::OpenParen);
        assert_eq!(lexer.region_depth(), 0);

        let token = lexer.look_ahead(2).unwrap();
        assert_eq!(token.value, "bar");
        assert_eq!(lexer.snapshot(), before);

        assert_eq!(lexer.lex().unwrap().value, "foo");
    }

    #[test]
    fn test_look_ahead_reverts_closing_bracket() {
        let mut lexer = Lexer::new("{ } x", None);
        assert_eq!(lexer.lex().unwrap().kind, TokenKind::OpenCurly);
        assert_eq!(lexer.region_depth(), 1);

        let token = lexer.look_ahead(0).unwrap();
        assert_eq!(token.kind, TokenKind::CloseCurly);
        assert_eq!(lexer.region_depth(), 1);

        assert_eq!(lexer.lex().unwrap().kind, TokenKind::CloseCurly);
        assert_eq!(lexer.region_depth(), 0);
    }

    #[test]
    fn test_look_ahead_runs_pending_continuation() {
        let mut lexer = Lexer::new("\"a\" b", None);
        let token = lexer.look_ahead(1).unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, "b");
    }

    fn assert_peek_matches_next(source: &str, first: TokenKind) {
        let mut lexer = Lexer::new(source, None);
        assert_eq!(lexer.lex().unwrap().kind, first);

        let before = lexer.snapshot();
        let peeked = lexer.look_ahead(0).unwrap();
        assert_eq!(peeked.kind, TokenKind::Identifier, "{:?}", source);
        assert_eq!(peeked.value, "b");

        assert_eq!(lexer.snapshot(), before);
        assert_eq!(lexer.lex().unwrap(), peeked);
    }

    #[test]
    fn test_look_ahead_after_closing_delimiter() {
        assert_peek_matches_next("\"a\" b", TokenKind::String);
        assert_peek_matches_next("`a` b", TokenKind::Identifier);
        assert_peek_matches_next("'a' b", TokenKind::Character);
        assert_peek_matches_next("\"\"\"a\"\"\" b", TokenKind::String);
    }

    #[test]
    fn test_look_ahead_further_after_closing_delimiter() {
        let mut lexer = Lexer::new("\"a\" b c", None);
        assert_eq!(lexer.lex().unwrap().kind, TokenKind::String);

        let token = lexer.look_ahead(1).unwrap();
        assert_eq!(token.value, "c");
        assert_eq!(lexer.lex().unwrap().value, "b");
    }

    #[test]
    fn test_look_ahead_with_pending_lexeme_is_misuse() {
        let mut lexer = Lexer::new("abc", None);
        lexer.next_char().unwrap();

        let error = lexer.look_ahead(0).unwrap_err();
        assert_eq!(error.get_error_name(), "LookaheadMisuse");
        assert!(!error.is_lexical());
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_look_ahead_past_end() {
        let mut lexer = Lexer::new("x", None);
        assert_eq!(lexer.look_ahead(1).unwrap().kind, TokenKind::EOF);
        assert_eq!(lexer.look_ahead(5).unwrap().kind, TokenKind::EOF);
        assert_eq!(lexer.lex().unwrap().value, "x");
    }
}
