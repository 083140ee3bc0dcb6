use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("abstract", TokenKind::Abstract);
        map.insert("case", TokenKind::Case);
        map.insert("catch", TokenKind::Catch);
        map.insert("class", TokenKind::Class);
        map.insert("def", TokenKind::Def);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("extends", TokenKind::Extends);
        map.insert("final", TokenKind::Final);
        map.insert("finally", TokenKind::Finally);
        map.insert("for", TokenKind::For);
        map.insert("forSome", TokenKind::ForSome);
        map.insert("if", TokenKind::If);
        map.insert("implicit", TokenKind::Implicit);
        map.insert("import", TokenKind::Import);
        map.insert("lazy", TokenKind::Lazy);
        map.insert("match", TokenKind::Match);
        map.insert("new", TokenKind::New);
        map.insert("null", TokenKind::Null);
        map.insert("object", TokenKind::Object);
        map.insert("override", TokenKind::Override);
        map.insert("package", TokenKind::Package);
        map.insert("private", TokenKind::Private);
        map.insert("protected", TokenKind::Protected);
        map.insert("return", TokenKind::Return);
        map.insert("sealed", TokenKind::Sealed);
        map.insert("super", TokenKind::Super);
        map.insert("this", TokenKind::This);
        map.insert("throw", TokenKind::Throw);
        map.insert("trait", TokenKind::Trait);
        map.insert("try", TokenKind::Try);
        map.insert("type", TokenKind::Type);
        map.insert("val", TokenKind::Val);
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map.insert("with", TokenKind::With);
        map.insert("yield", TokenKind::Yield);
        map
    };

    pub static ref BRACKET_LOOKUP: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert('(', TokenKind::OpenParen);
        map.insert(')', TokenKind::CloseParen);
        map.insert('[', TokenKind::OpenBracket);
        map.insert(']', TokenKind::CloseBracket);
        map.insert('{', TokenKind::OpenCurly);
        map.insert('}', TokenKind::CloseCurly);
        map
    };
}

/// Fixed operator and delimiter lexemes, matched longest-first against the
/// remaining input.
pub const OP_DELIMS: [&str; 16] = [
    "=>", "<-", ">:", "<:", "<%", "-", ",", "#", "@", ":", "*", "=", "|", "~", "!", "+",
];

pub const BOOLEANS: [&str; 2] = ["true", "false"];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Symbol,
    Identifier,
    Number,
    Boolean,
    Character,
    String,
    Whitespace,
    Comment,
    Newline,
    Newlines,

    // Operators and punctuation
    OpOrDelim,
    Semicolon,
    Dot,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    // Reserved
    Abstract,
    Case,
    Catch,
    Class,
    Def,
    Do,
    Else,
    Extends,
    Final,
    Finally,
    For,
    ForSome,
    If,
    Implicit,
    Import,
    Lazy,
    Match,
    New,
    Null,
    Object,
    Override,
    Package,
    Private,
    Protected,
    Return,
    Sealed,
    Super,
    This,
    Throw,
    Trait,
    Try,
    Type,
    Val,
    Var,
    While,
    With,
    Yield,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    pub fn is_opening_bracket(&self) -> bool {
        matches!(self, TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly)
    }

    pub fn is_closing_bracket(&self) -> bool {
        matches!(self, TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly)
    }

    /// The bracket on the other side of a region, `None` for anything that
    /// is not a bracket.
    pub fn inverted(&self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            TokenKind::OpenCurly => Some(TokenKind::CloseCurly),
            TokenKind::CloseParen => Some(TokenKind::OpenParen),
            TokenKind::CloseBracket => Some(TokenKind::OpenBracket),
            TokenKind::CloseCurly => Some(TokenKind::OpenCurly),
            _ => None,
        }
    }

    pub fn closes(&self, open: TokenKind) -> bool {
        self.is_closing_bracket() && self.inverted() == Some(open)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Error => "ERROR",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Character => "CHARACTER",
            TokenKind::String => "STRING",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Newlines => "NEWLINES",
            TokenKind::OpOrDelim => "OPERATOR",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::Abstract => "ABSTRACT",
            TokenKind::Case => "CASE",
            TokenKind::Catch => "CATCH",
            TokenKind::Class => "CLASS",
            TokenKind::Def => "DEF",
            TokenKind::Do => "DO",
            TokenKind::Else => "ELSE",
            TokenKind::Extends => "EXTENDS",
            TokenKind::Final => "FINAL",
            TokenKind::Finally => "FINALLY",
            TokenKind::For => "FOR",
            TokenKind::ForSome => "FORSOME",
            TokenKind::If => "IF",
            TokenKind::Implicit => "IMPLICIT",
            TokenKind::Import => "IMPORT",
            TokenKind::Lazy => "LAZY",
            TokenKind::Match => "MATCH",
            TokenKind::New => "NEW",
            TokenKind::Null => "NULL",
            TokenKind::Object => "OBJECT",
            TokenKind::Override => "OVERRIDE",
            TokenKind::Package => "PACKAGE",
            TokenKind::Private => "PRIVATE",
            TokenKind::Protected => "PROTECTED",
            TokenKind::Return => "RETURN",
            TokenKind::Sealed => "SEALED",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::Throw => "THROW",
            TokenKind::Trait => "TRAIT",
            TokenKind::Try => "TRY",
            TokenKind::Type => "TYPE",
            TokenKind::Val => "VAL",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::With => "WITH",
            TokenKind::Yield => "YIELD",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the longest entry of `OP_DELIMS` that prefixes `remaining`.
pub fn match_op_delim(remaining: &[u8]) -> Option<&'static str> {
    OP_DELIMS
        .iter()
        .filter(|od| remaining.starts_with(od.as_bytes()))
        .max_by_key(|od| od.len())
        .copied()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.kind, self.value)
    }
}

impl Token {
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
