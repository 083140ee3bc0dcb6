//! Character classes used by the scanning routines.
//!
//! Every predicate works on a single code point. Operator characters are
//! defined as the residue of everything else, so user-defined symbolic
//! operators are recognised without enumerating them.

use unicode_general_category::{get_general_category, GeneralCategory};

use super::tokens::{TokenKind, BOOLEANS, RESERVED_LOOKUP};

pub const NEWLINE: char = '\n';
pub const QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKSLASH: char = '\\';
pub const BACKTICK: char = '`';
pub const SEMICOLON: char = ';';
pub const DOT: char = '.';

pub const LINE_COMMENT: &str = "//";
pub const SPAN_COMMENT: &str = "/*";
pub const MULTI_LINE_QUOTE: &str = "\"\"\"";

pub const WHITESPACE_SANS_NEWLINE: &str = " \t\r\x0c";
pub const PAREN: &str = "()[]{}";
pub const DELIM: &str = "`'\".;,";
pub const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

pub fn is_whitespace_sans_newline(c: char) -> bool {
    WHITESPACE_SANS_NEWLINE.contains(c)
}

pub fn is_whitespace(c: char) -> bool {
    c == NEWLINE || is_whitespace_sans_newline(c)
}

/// ASCII letters, `_` and `$`, plus any Unicode letter.
pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphabetic())
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: char) -> bool {
    HEX_DIGITS.contains(c)
}

pub fn is_letter_or_digit(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

/// Used after a literal to reject trailing garbage such as `12ab`.
pub fn is_alphanumeric(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

pub fn is_paren(c: char) -> bool {
    PAREN.contains(c)
}

pub fn is_delim(c: char) -> bool {
    DELIM.contains(c)
}

/// Letters, marks, numbers, punctuation and symbols. Separators, controls,
/// format characters such as U+200B, private use and unassigned code points
/// are not printable.
pub fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

pub fn is_operator_char(c: char) -> bool {
    if !is_printable(c) {
        return false;
    }

    !(is_letter(c) || is_digit(c) || is_paren(c) || is_delim(c) || c == NEWLINE)
}

pub fn is_boolean(val: &str) -> bool {
    BOOLEANS.contains(&val)
}

/// Keyword kind of a scanned word. Keywords are case sensitive.
pub fn keyword_kind(val: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(val).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert!(is_letter('a'));
        assert!(is_letter('Z'));
        assert!(is_letter('_'));
        assert!(is_letter('$'));
        assert!(is_letter('α'));
        assert!(!is_letter('1'));
        assert!(!is_letter('+'));
    }

    #[test]
    fn test_operator_chars_are_the_residue() {
        for c in ['+', '-', '<', '>', '=', '*', '/', '%', '&', '|', '^', '!', '?', '#', '@', '~', ':', '\\'] {
            assert!(is_operator_char(c), "{:?} should be an operator character", c);
        }

        for c in ['a', '_', '$', '0', '(', '}', '`', '\'', '"', '.', ';', ',', ' ', '\t', '\n', '\0', 'λ'] {
            assert!(!is_operator_char(c), "{:?} should not be an operator character", c);
        }
    }

    #[test]
    fn test_invisible_characters_are_not_operators() {
        for c in ['\u{AD}', '\u{200B}', '\u{200D}', '\u{2060}', '\u{FEFF}', '\u{E000}', '\u{378}', '\u{2028}', '\u{A0}'] {
            assert!(!is_printable(c), "{:?} should not be printable", c);
            assert!(!is_operator_char(c), "{:?} should not be an operator character", c);
        }

        assert!(is_operator_char('→'));
        assert!(is_operator_char('∀'));
    }

    #[test]
    fn test_booleans_and_keywords() {
        assert!(is_boolean("true"));
        assert!(is_boolean("false"));
        assert!(!is_boolean("truee"));

        assert_eq!(keyword_kind("forSome"), Some(TokenKind::ForSome));
        assert_eq!(keyword_kind("yield"), Some(TokenKind::Yield));
        assert_eq!(keyword_kind("forsome"), None);
        assert_eq!(keyword_kind("whiles"), None);
        assert_eq!(keyword_kind("true"), None);
    }
}
