use std::rc::Rc;

use tracing::debug;

use crate::errors::errors::Error;

use super::{
    newline::{default_newline_policy, NewlinePolicy},
    tokens::{Token, TokenKind},
};

/// The routine the next call to [`Lexer::lex`] resumes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Root dispatch, run before every fresh token.
    Start,
    /// Drops the closing delimiter of a string, character literal or quoted
    /// identifier, then dispatches.
    IgnoreNextCharacter,
    /// Drops every quote following a closed multi line string, then
    /// dispatches.
    MultiLineStringOut,
    /// End of input was reached, every further call yields `EOF`.
    Done,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    pub(crate) input: &'a [u8],
    pub(crate) start: usize,
    pub(crate) pos: usize,
    pub(crate) width: usize,
    pub(crate) state: State,
    pub(crate) last_token: Option<TokenKind>,
    pub(crate) region_stack: Vec<TokenKind>,
    pub(crate) file: Rc<String>,
    pub(crate) newline_policy: NewlinePolicy,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        Lexer::from_bytes(source.as_bytes(), file)
    }

    /// Creates a lexer over raw bytes. Invalid UTF-8 is only reported once
    /// scanning reaches it.
    pub fn from_bytes(source: &'a [u8], file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            input: source,
            start: 0,
            pos: 0,
            width: 0,
            state: State::Start,
            last_token: None,
            region_stack: vec![],
            file: file_name,
            newline_policy: default_newline_policy,
        }
    }

    pub fn with_newline_policy(mut self, policy: NewlinePolicy) -> Self {
        self.newline_policy = policy;
        self
    }

    /// Produces the next token, resuming from the pending continuation.
    ///
    /// Lexical problems come back as `TokenKind::Error` tokens and scanning
    /// carries on after them. `Err` is reserved for input that cannot be
    /// decoded, after which the lexer only yields `EOF`.
    pub fn lex(&mut self) -> Result<Token, Error> {
        let state = self.state;
        let result = self.dispatch(state);

        if let Err(error) = &result {
            debug!(file = %self.file, %error, "aborting input");
            self.state = State::Done;
        }

        result
    }

    /// Pulls tokens until end of input. The `EOF` token is not included.
    pub fn lex_till_done(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];

        loop {
            let token = self.lex()?;
            if token.kind == TokenKind::EOF {
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn region_depth(&self) -> usize {
        self.region_stack.len()
    }

    pub fn remainder(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }

        match self.lex() {
            Ok(token) if token.kind == TokenKind::EOF => None,
            other => Some(other),
        }
    }
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file).lex_till_done()
}
