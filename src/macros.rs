//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span over two byte offsets of the lexer's file
//!
//! These macros reduce boilerplate in the scanning routines.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span between two byte offsets of the lexer's current file.
///
/// # Arguments
///
/// * `$lexer` - The Lexer owning the file name
/// * `$start` - Start byte offset (inclusive)
/// * `$end` - End byte offset (exclusive)
///
/// # Example
///
/// ```ignore
/// let span = MK_SPAN!(self, self.start, self.pos);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($lexer:expr, $start:expr, $end:expr) => {
        Span {
            start: Position($start as u32, Rc::clone(&$lexer.file)),
            end: Position($end as u32, Rc::clone(&$lexer.file)),
        }
    };
}
