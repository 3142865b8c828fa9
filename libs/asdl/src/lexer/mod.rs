//! # ASDL Lexer
//!
//! Tokenizes ASDL grammar text.
//!
//! ## Example
//!
//! ```rust
//! use asdl::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("EXPR = Break").tokenize().unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens[1].kind, TokenKind::Eq);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Position, Token, TokenKind};

use crate::error::AsdlParseError;

// =============================================================================
// LEXER
// =============================================================================

/// ASDL lexer.
///
/// Converts grammar text into a stream of tokens terminated by `Eof`.
/// Comments run from `--` to the end of the line.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for grammar text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens ending with an EOF token, or the first invalid
    /// character.
    pub fn tokenize(mut self) -> Result<Vec<Token>, AsdlParseError> {
        loop {
            self.skip_whitespace_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token()?;
        }

        let eof = self.cursor.position();
        self.tokens.push(Token::new(TokenKind::Eof, eof, String::new()));
        Ok(self.tokens)
    }

    /// Skip whitespace and `--` comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.advance_while(char::is_whitespace);

            if self.cursor.peek() == Some('-') && self.cursor.peek_next() == Some('-') {
                self.cursor.advance_while(|c| c != '\n');
                continue;
            }

            break;
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) -> Result<(), AsdlParseError> {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return Ok(()),
        };

        let kind = match c {
            '=' => TokenKind::Eq,
            '|' => TokenKind::Pipe,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '*' => TokenKind::Star,
            '?' => TokenKind::Question,
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let text = self.cursor.slice(start.byte, self.cursor.position().byte);
                let kind = if text == "primitive" {
                    TokenKind::Primitive
                } else {
                    TokenKind::Identifier
                };
                self.tokens.push(Token::new(kind, start, text));
                return Ok(());
            }
            ch => {
                return Err(AsdlParseError::InvalidCharacter {
                    ch,
                    line: start.line,
                    column: start.column,
                })
            }
        };

        let text = self.cursor.slice(start.byte, self.cursor.position().byte);
        self.tokens.push(Token::new(kind, start, text));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_sum_type() {
        assert_eq!(
            kinds("EXPR = ID(IDENT name) | Break"),
            vec![
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Pipe,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_cardinality_suffixes() {
        assert_eq!(
            kinds("EXPR* ext, EXPR? init"),
            vec![
                TokenKind::Identifier,
                TokenKind::Star,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Question,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments() {
        let tokens = Lexer::new("-- leading comment\nprimitive TOKEN -- trailing").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Primitive);
        assert_eq!(tokens[0].position.line, 2);
        assert_eq!(tokens[1].text, "TOKEN");
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_tokenize_invalid_character() {
        let err = Lexer::new("EXPR = $").tokenize().unwrap_err();
        assert_eq!(
            err,
            AsdlParseError::InvalidCharacter {
                ch: '$',
                line: 1,
                column: 8
            }
        );
    }

    #[test]
    fn test_single_dash_is_invalid() {
        assert!(Lexer::new("- x").tokenize().is_err());
    }
}
