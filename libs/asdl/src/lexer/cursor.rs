//! # Character Cursor
//!
//! Peekable character cursor for the ASDL lexer.
//! Tracks byte offset, line and column as it advances.

use super::token::Position;

/// Character cursor with position tracking.
///
/// ## Example
///
/// ```rust
/// use asdl::lexer::Cursor;
///
/// let mut cursor = Cursor::new("EXPR");
/// assert_eq!(cursor.advance(), Some('E'));
/// assert_eq!(cursor.position().column, 2);
/// ```
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current line (1-indexed).
    line: usize,
    /// Current column (1-indexed).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        Position {
            byte: self.byte,
            line: self.line,
            column: self.column,
        }
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    /// Peek one character past the current one.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.byte..].chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance while `predicate` holds.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Source slice between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_tracks_lines() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        let pos = cursor.position();
        assert_eq!((pos.line, pos.column, pos.byte), (2, 1, 2));
    }

    #[test]
    fn test_cursor_utf8() {
        let mut cursor = Cursor::new("\u{2581}x");
        assert_eq!(cursor.advance(), Some('\u{2581}'));
        assert_eq!(cursor.position().byte, 3);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn test_cursor_advance_while() {
        let mut cursor = Cursor::new("abc123");
        cursor.advance_while(|c| c.is_alphabetic());
        assert_eq!(cursor.slice(0, cursor.position().byte), "abc");
        assert_eq!(cursor.peek_next(), Some('2'));
    }
}
