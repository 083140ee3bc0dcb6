//! Rune level scanning primitives.
//!
//! The lexeme being scanned is always `input[start..pos]`. Reads move `pos`
//! forward one code point at a time and remember the width of the last one,
//! which is enough to step back exactly once.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::{
    lexer::{Lexer, State},
    tokens::{Token, TokenKind},
};

impl<'a> Lexer<'a> {
    /// Decodes the code point starting at byte `at` together with its width.
    fn decode_at(&self, at: usize) -> Result<Option<(char, usize)>, Error> {
        let Some(&lead) = self.input.get(at) else {
            return Ok(None);
        };

        let width = match lead {
            0x00..=0x7F => return Ok(Some((lead as char, 1))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(self.invalid_encoding(at, lead)),
        };

        let end = (at + width).min(self.input.len());
        match std::str::from_utf8(&self.input[at..end]) {
            Ok(decoded) => Ok(decoded.chars().next().map(|c| (c, width))),
            Err(_) => Err(self.invalid_encoding(at, lead)),
        }
    }

    fn invalid_encoding(&self, at: usize, byte: u8) -> Error {
        Error::new(
            ErrorImpl::InvalidEncoding { byte },
            Position(at as u32, Rc::clone(&self.file)),
        )
    }

    /// Reads the next code point, `None` once the input is exhausted.
    pub(crate) fn next_char(&mut self) -> Result<Option<char>, Error> {
        match self.decode_at(self.pos)? {
            Some((c, width)) => {
                self.width = width;
                self.pos += width;
                Ok(Some(c))
            }
            None => {
                self.width = 0;
                Ok(None)
            }
        }
    }

    /// Undoes the last `next_char`. A second call without a read in between
    /// does nothing.
    pub(crate) fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    pub(crate) fn peek(&self) -> Result<Option<char>, Error> {
        self.peek_nth(0)
    }

    /// Looks `n` code points past the cursor without moving it.
    pub(crate) fn peek_nth(&self, n: usize) -> Result<Option<char>, Error> {
        let mut at = self.pos;
        let mut res = None;

        for _ in 0..=n {
            match self.decode_at(at)? {
                Some((c, width)) => {
                    at += width;
                    res = Some(c);
                }
                None => return Ok(None),
            }
        }

        Ok(res)
    }

    pub(crate) fn accept<F: Fn(char) -> bool>(&mut self, valid: F) -> Result<bool, Error> {
        match self.next_char()? {
            Some(c) if valid(c) => Ok(true),
            _ => {
                self.backup();
                Ok(false)
            }
        }
    }

    pub(crate) fn accept_char(&mut self, expected: char) -> Result<bool, Error> {
        self.accept(|c| c == expected)
    }

    pub(crate) fn accept_run<F: Fn(char) -> bool>(&mut self, valid: F) -> Result<(), Error> {
        while self.accept(&valid)? {}
        Ok(())
    }

    /// Consumes one code point that is not `invalid`, stopping at end of input.
    pub(crate) fn accept_until<F: Fn(char) -> bool>(&mut self, invalid: F) -> Result<bool, Error> {
        self.accept(|c| !invalid(c))
    }

    pub(crate) fn accept_run_until<F: Fn(char) -> bool>(&mut self, invalid: F) -> Result<(), Error> {
        while self.accept_until(&invalid)? {}
        Ok(())
    }

    /// Drops the pending lexeme.
    pub(crate) fn ignore(&mut self) {
        self.start = self.pos;
    }

    pub(crate) fn skip(&mut self) -> Result<(), Error> {
        self.next_char()?;
        self.ignore();
        Ok(())
    }

    /// Moves over `n` bytes already known to be ASCII.
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
        self.width = 0;
    }

    pub(crate) fn has_prefix(&self, prefix: &str) -> bool {
        self.remainder().starts_with(prefix.as_bytes())
    }

    /// The pending lexeme. Everything in it has been decoded already.
    pub(crate) fn val(&self) -> String {
        String::from_utf8_lossy(&self.input[self.start..self.pos]).into_owned()
    }

    pub(crate) fn emit(&mut self, kind: TokenKind, next: State) -> Token {
        let token = MK_TOKEN!(kind, self.val(), MK_SPAN!(self, self.start, self.pos));
        trace!(kind = %token.kind, value = %token.value, start = self.start, "emit");

        self.start = self.pos;
        self.width = 0;
        self.state = next;
        if kind != TokenKind::Comment {
            self.last_token = Some(kind);
        }

        token
    }

    /// Drops whatever was scanned for the failed lexeme, or one code point
    /// when nothing was, and resumes at the root state.
    pub(crate) fn emit_error(&mut self, error: ErrorImpl) -> Result<Token, Error> {
        let error_start = self.start;
        if self.pos > self.start {
            self.ignore();
        } else {
            self.skip()?;
        }
        self.state = State::Start;

        debug!(%error, start = error_start, end = self.pos, "lexical error");
        Ok(MK_TOKEN!(
            TokenKind::Error,
            error.to_string(),
            MK_SPAN!(self, error_start, self.pos)
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::ErrorImpl;

    use super::super::{lexer::Lexer, tokens::TokenKind};

    #[test]
    fn test_next_and_backup() {
        let mut lexer = Lexer::new("aβc", None);
        assert_eq!(lexer.next_char().unwrap(), Some('a'));
        assert_eq!(lexer.next_char().unwrap(), Some('β'));
        assert_eq!(lexer.position(), 3);

        lexer.backup();
        assert_eq!(lexer.position(), 1);
        lexer.backup();
        assert_eq!(lexer.position(), 1);

        assert_eq!(lexer.next_char().unwrap(), Some('β'));
        assert_eq!(lexer.next_char().unwrap(), Some('c'));
        assert_eq!(lexer.next_char().unwrap(), None);
        assert_eq!(lexer.position(), 4);
    }

    #[test]
    fn test_peek_does_not_move() {
        let lexer = Lexer::new("'\\n'", None);
        assert_eq!(lexer.peek().unwrap(), Some('\''));
        assert_eq!(lexer.peek_nth(1).unwrap(), Some('\\'));
        assert_eq!(lexer.peek_nth(3).unwrap(), Some('\''));
        assert_eq!(lexer.peek_nth(4).unwrap(), None);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_accept_family() {
        let mut lexer = Lexer::new("0x1F  // rest", None);
        assert!(lexer.accept_char('0').unwrap());
        assert!(!lexer.accept_char('X').unwrap());
        assert!(lexer.accept(|c| c == 'x' || c == 'X').unwrap());
        lexer.accept_run(|c| c.is_ascii_hexdigit()).unwrap();
        assert_eq!(lexer.val(), "0x1F");

        lexer.ignore();
        assert!(lexer.accept_until(|c| c == '/').unwrap());
        lexer.accept_run_until(|c| c == '/').unwrap();
        assert_eq!(lexer.val(), "  ");

        lexer.ignore();
        lexer.accept_run_until(|c| c == '\n').unwrap();
        assert_eq!(lexer.val(), "// rest");
        assert!(lexer.at_eof());
        assert!(!lexer.accept_until(|c| c == '\n').unwrap());
    }

    #[test]
    fn test_emit_resets_lexeme() {
        let mut lexer = Lexer::new("abc def", None);
        lexer.accept_run(|c| c.is_ascii_alphabetic()).unwrap();
        let token = lexer.emit(TokenKind::Identifier, super::State::Start);

        assert_eq!(token.value, "abc");
        assert_eq!(token.span.start.0, 0);
        assert_eq!(token.span.end.0, 3);
        assert_eq!(lexer.val(), "");
        assert_eq!(lexer.last_token, Some(TokenKind::Identifier));
    }

    #[test]
    fn test_emit_error_forces_progress() {
        let mut lexer = Lexer::new("§x", None);
        let token = lexer
            .emit_error(ErrorImpl::UnknownLexeme { lexeme: "§".to_string() })
            .unwrap();

        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(lexer.position(), "§".len());
        assert_eq!(token.span.end.0 as usize, "§".len());
    }

    #[test]
    fn test_invalid_encoding_is_an_error() {
        let input = [b'a', 0xFF, b'b'];
        let mut lexer = Lexer::from_bytes(&input, None);
        assert_eq!(lexer.next_char().unwrap(), Some('a'));

        let error = lexer.next_char().unwrap_err();
        assert_eq!(error.get_error_name(), "InvalidEncoding");
        assert_eq!(error.get_position().0, 1);
        assert!(!error.is_lexical());
    }

    #[test]
    fn test_truncated_sequence_is_an_error() {
        let input = [0xE2, 0x82];
        let lexer = Lexer::from_bytes(&input, None);
        assert!(lexer.peek().is_err());
    }
}
