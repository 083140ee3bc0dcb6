//! The scanning state machine.
//!
//! `lex_start` is the root dispatch. Every routine either hands control to
//! another routine or emits a token together with the state the next call
//! to `Lexer::lex` resumes from.

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    chars::*,
    lexer::{Lexer, State},
    tokens::{match_op_delim, Token, TokenKind, BRACKET_LOOKUP},
};

impl<'a> Lexer<'a> {
    pub(crate) fn dispatch(&mut self, state: State) -> Result<Token, Error> {
        match state {
            State::Start => self.lex_start(),
            State::IgnoreNextCharacter => self.lex_ignore_next_character(),
            State::MultiLineStringOut => self.lex_multi_line_string_out(),
            State::Done => Ok(self.emit(TokenKind::EOF, State::Done)),
        }
    }

    pub(crate) fn lex_start(&mut self) -> Result<Token, Error> {
        loop {
            self.accept_run(is_whitespace_sans_newline)?;
            self.ignore();

            if self.has_prefix(LINE_COMMENT) {
                return self.lex_line_comment();
            }
            if self.has_prefix(SPAN_COMMENT) {
                self.skip_span_comment()?;
                continue;
            }
            if self.has_prefix(MULTI_LINE_QUOTE) {
                self.advance_n(MULTI_LINE_QUOTE.len());
                self.ignore();
                return self.lex_multi_line_string_in();
            }

            // symbol literal or character literal
            if self.peek()? == Some(SINGLE_QUOTE) {
                if self.peek_nth(2)? == Some(SINGLE_QUOTE)
                    || (self.peek_nth(1)? == Some(BACKSLASH) && self.peek_nth(3)? == Some(SINGLE_QUOTE))
                {
                    self.skip()?;
                    return self.lex_character_literal();
                }
                self.next_char()?;
                return self.lex_symbol();
            }

            let Some(c) = self.peek()? else {
                return Ok(self.lex_eof());
            };

            if is_letter(c) {
                return self.lex_letter();
            }
            if is_digit(c) {
                return self.lex_number(false);
            }
            if self.accept_char(QUOTE)? {
                self.ignore();
                return self.lex_string_in();
            }
            if is_paren(c) {
                self.next_char()?;
                return self.lex_bracket(c);
            }
            if self.accept_char(SEMICOLON)? {
                return Ok(self.emit(TokenKind::Semicolon, State::Start));
            }
            if self.accept_char(DOT)? {
                if self.peek()?.is_some_and(is_digit) {
                    return self.lex_number(true);
                }
                return Ok(self.emit(TokenKind::Dot, State::Start));
            }
            if self.accept_char(BACKTICK)? {
                self.ignore();
                return self.lex_quoted_identifier_in();
            }
            if self.accept_char(NEWLINE)? {
                match self.lex_newline()? {
                    Some(token) => return Ok(token),
                    None => continue,
                }
            }
            if let Some(op_delim) = match_op_delim(self.remainder()) {
                self.advance_n(op_delim.len());
                return Ok(self.emit(TokenKind::OpOrDelim, State::Start));
            }
            if is_operator_char(c) {
                self.lex_op()?;
                return Ok(self.emit(TokenKind::Identifier, State::Start));
            }

            return self.emit_error(ErrorImpl::UnknownLexeme { lexeme: c.to_string() });
        }
    }

    fn lex_eof(&mut self) -> Token {
        self.emit(TokenKind::EOF, State::Done)
    }

    fn lex_line_comment(&mut self) -> Result<Token, Error> {
        self.accept_run_until(|c| c == NEWLINE)?;
        Ok(self.emit(TokenKind::Comment, State::Start))
    }

    /// Consumes a block comment including every nested one. An unterminated
    /// comment runs to end of input.
    fn skip_span_comment(&mut self) -> Result<(), Error> {
        let mut depth = 0;

        loop {
            self.accept_run_until(|c| c == '*' || c == '/')?;

            if self.accept_char('/')? {
                if self.accept_char('*')? {
                    depth += 1;
                }
                continue;
            }
            if self.accept_char('*')? {
                if self.accept_char('/')? {
                    if depth <= 1 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Runs after a newline was consumed. Returns `None` when the newline
    /// does not separate statements and is dropped.
    ///
    /// Block comments and line breaks following the newline run are skipped
    /// before deciding, so the decision never dispatches into another
    /// newline. The token only covers the newline run itself.
    fn lex_newline(&mut self) -> Result<Option<Token>, Error> {
        let newline_start = self.start;

        self.accept_run(is_whitespace_sans_newline)?;
        let blank_line = self.accept_char(NEWLINE)?;
        self.accept_run(is_whitespace)?;
        let newline_end = self.pos;

        while self.has_prefix(SPAN_COMMENT) {
            self.skip_span_comment()?;
            self.accept_run(is_whitespace)?;
        }
        self.ignore();

        if !self.should_introduce_newline()? {
            return Ok(None);
        }

        let resume = self.pos;
        self.start = newline_start;
        self.pos = newline_end;

        let kind = if blank_line {
            TokenKind::Newlines
        } else {
            TokenKind::Newline
        };
        let token = self.emit(kind, State::Start);

        self.pos = resume;
        self.start = resume;
        Ok(Some(token))
    }

    /// Scans an identifier body: a symbolic operator, or a letter followed by
    /// letters and digits with an optional operator suffix after a trailing
    /// `_`. Returns whether anything matched.
    fn lex_plain_id(&mut self) -> Result<bool, Error> {
        if self.peek()?.is_some_and(is_operator_char) {
            self.lex_op()?;
            return Ok(true);
        }
        if self.accept(is_letter)? {
            self.accept_run(is_letter_or_digit)?;
            if self.val().ends_with('_') {
                self.lex_op()?;
            }
            return Ok(true);
        }
        Ok(false)
    }

    fn lex_op(&mut self) -> Result<(), Error> {
        self.accept_run(is_operator_char)
    }

    fn lex_letter(&mut self) -> Result<Token, Error> {
        if !self.lex_plain_id()? {
            let lexeme = self.val();
            return self.emit_error(ErrorImpl::UnknownLexeme { lexeme });
        }

        let value = self.val();
        if is_boolean(&value) {
            return Ok(self.emit(TokenKind::Boolean, State::Start));
        }
        if let Some(kind) = keyword_kind(&value) {
            return Ok(self.emit(kind, State::Start));
        }
        Ok(self.emit(TokenKind::Identifier, State::Start))
    }

    /// The opening quote is already consumed and stays part of the symbol.
    fn lex_symbol(&mut self) -> Result<Token, Error> {
        if !self.lex_plain_id()? {
            let lexeme = self.val();
            return self.emit_error(ErrorImpl::UnknownLexeme { lexeme });
        }
        Ok(self.emit(TokenKind::Symbol, State::Start))
    }

    fn lex_number(&mut self, in_fraction: bool) -> Result<Token, Error> {
        if !self.scan_number(in_fraction)? {
            let literal = self.val();
            return self.emit_error(ErrorImpl::MalformedNumber { literal });
        }
        Ok(self.emit(TokenKind::Number, State::Start))
    }

    /// Scans a numeric literal. `in_fraction` is set when a leading `.` was
    /// already consumed.
    fn scan_number(&mut self, in_fraction: bool) -> Result<bool, Error> {
        if in_fraction {
            self.accept_run(is_digit)?;
        } else {
            if self.accept_char('0')? && self.accept(|c| c == 'x' || c == 'X')? {
                self.accept_run(is_hex_digit)?;
            } else {
                self.accept_run(is_digit)?;
            }

            if self.accept(|c| c == 'l' || c == 'L')? {
                return self.literal_ends_cleanly();
            }

            if self.peek()? == Some(DOT) {
                if !self.peek_nth(1)?.is_some_and(is_digit) {
                    // member access on an integer literal, e.g. `22.toString`
                    return Ok(true);
                }
                self.next_char()?;
                self.accept_run(is_digit)?;
            }
        }

        if self.accept(|c| c == 'e' || c == 'E')? {
            self.accept(|c| c == '+' || c == '-')?;
            self.accept_run(is_digit)?;
        }
        self.accept(|c| "fFdD".contains(c))?;

        self.literal_ends_cleanly()
    }

    /// A literal must not run straight into another alphanumeric character.
    /// The offending character is consumed into the malformed lexeme.
    fn literal_ends_cleanly(&mut self) -> Result<bool, Error> {
        if self.peek()?.is_some_and(is_alphanumeric) {
            self.next_char()?;
            return Ok(false);
        }
        Ok(true)
    }

    fn lex_bracket(&mut self, c: char) -> Result<Token, Error> {
        let Some(kind) = BRACKET_LOOKUP.get(&c).copied() else {
            return self.emit_error(ErrorImpl::UnknownLexeme { lexeme: c.to_string() });
        };

        if kind.is_opening_bracket() {
            self.region_stack.push(kind);
            return Ok(self.emit(kind, State::Start));
        }

        match self.region_stack.last().copied() {
            None => self.emit_error(ErrorImpl::UnmatchedClosingBracket { bracket: c.to_string() }),
            Some(open) if !kind.closes(open) => {
                let expected = open.inverted().map(|close| close.name()).unwrap_or_default();
                self.emit_error(ErrorImpl::MismatchedBracket {
                    expected: expected.to_string(),
                    found: c.to_string(),
                })
            }
            Some(_) => {
                self.region_stack.pop();
                Ok(self.emit(kind, State::Start))
            }
        }
    }

    fn lex_string_in(&mut self) -> Result<Token, Error> {
        loop {
            self.accept_run_until(|c| c == QUOTE || c == BACKSLASH)?;

            match self.peek()? {
                Some(BACKSLASH) => {
                    // escapes are kept verbatim
                    self.next_char()?;
                    self.next_char()?;
                }
                Some(QUOTE) => return Ok(self.emit(TokenKind::String, State::IgnoreNextCharacter)),
                _ => return self.emit_error(ErrorImpl::UnterminatedString),
            }
        }
    }

    fn lex_multi_line_string_in(&mut self) -> Result<Token, Error> {
        loop {
            self.accept_run_until(|c| c == QUOTE)?;

            if self.has_prefix(MULTI_LINE_QUOTE) {
                return Ok(self.emit(TokenKind::String, State::MultiLineStringOut));
            }
            if self.next_char()?.is_none() {
                return self.emit_error(ErrorImpl::UnterminatedMultiLineString);
            }
        }
    }

    fn lex_multi_line_string_out(&mut self) -> Result<Token, Error> {
        self.accept_run(|c| c == QUOTE)?;
        self.ignore();
        self.lex_start()
    }

    fn lex_quoted_identifier_in(&mut self) -> Result<Token, Error> {
        self.accept_run_until(|c| c == BACKTICK)?;

        if self.peek()? == Some(BACKTICK) {
            return Ok(self.emit(TokenKind::Identifier, State::IgnoreNextCharacter));
        }
        self.emit_error(ErrorImpl::UnterminatedQuotedIdentifier)
    }

    /// The opening quote is already dropped; the closing one is dropped by
    /// the continuation.
    fn lex_character_literal(&mut self) -> Result<Token, Error> {
        self.accept_char(BACKSLASH)?;
        self.next_char()?;

        if self.peek()? == Some(SINGLE_QUOTE) {
            return Ok(self.emit(TokenKind::Character, State::IgnoreNextCharacter));
        }

        let found = self.val();
        self.emit_error(ErrorImpl::UnterminatedCharacter { found })
    }

    fn lex_ignore_next_character(&mut self) -> Result<Token, Error> {
        self.next_char()?;
        self.ignore();
        self.lex_start()
    }
}
