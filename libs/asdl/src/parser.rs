//! # ASDL Parser
//!
//! Recursive descent parser turning ASDL tokens into a `Grammar`.
//!
//! ## Syntax
//!
//! ```text
//! grammar     := item*
//! item        := "primitive" IDENT ("," IDENT)*
//!              | IDENT "=" constructor ("|" constructor)*
//! constructor := IDENT ("(" (field ("," field)*)? ")")?
//! field       := IDENT ("*" | "?")? IDENT
//! ```

use crate::error::AsdlParseError;
use crate::grammar::{Cardinality, Constructor, Field, Grammar, SumType};
use crate::lexer::{Lexer, Token, TokenKind};

/// Parse ASDL text into a grammar.
pub fn parse_grammar(source: &str) -> Result<Grammar, AsdlParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    let (primitives, sums) = Parser::new(tokens).parse()?;
    Ok(Grammar::new(primitives, sums)?)
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser {
    /// Token stream, always ending with `Eof`.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse(mut self) -> Result<(Vec<String>, Vec<SumType>), AsdlParseError> {
        let mut primitives = Vec::new();
        let mut sums = Vec::new();

        while !self.is_at_end() {
            if self.match_token(TokenKind::Primitive) {
                primitives.push(self.expect_identifier("primitive type name")?);
                while self.match_token(TokenKind::Comma) {
                    primitives.push(self.expect_identifier("primitive type name")?);
                }
            } else {
                sums.push(self.parse_sum_type()?);
            }
        }

        Ok((primitives, sums))
    }

    fn parse_sum_type(&mut self) -> Result<SumType, AsdlParseError> {
        let name = self.expect_identifier("type name")?;
        self.expect(TokenKind::Eq, "'='")?;

        let mut constructors = vec![self.parse_constructor()?];
        while self.match_token(TokenKind::Pipe) {
            constructors.push(self.parse_constructor()?);
        }

        Ok(SumType { name, constructors })
    }

    fn parse_constructor(&mut self) -> Result<Constructor, AsdlParseError> {
        let name = self.expect_identifier("constructor name")?;
        let mut fields = Vec::new();

        if self.match_token(TokenKind::LParen) {
            if !self.match_token(TokenKind::RParen) {
                fields.push(self.parse_field()?);
                while self.match_token(TokenKind::Comma) {
                    fields.push(self.parse_field()?);
                }
                self.expect(TokenKind::RParen, "')'")?;
            }
        }

        Ok(Constructor::new(name, fields))
    }

    fn parse_field(&mut self) -> Result<Field, AsdlParseError> {
        let type_name = self.expect_identifier("field type")?;
        let cardinality = if self.match_token(TokenKind::Star) {
            Cardinality::Multiple
        } else if self.match_token(TokenKind::Question) {
            Cardinality::Optional
        } else {
            Cardinality::Single
        };
        let name = self.expect_identifier("field name")?;
        Ok(Field::new(name, type_name, cardinality))
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn is_at_end(&self) -> bool {
        self.peek().map_or(true, Token::is_eof)
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<&Token, AsdlParseError> {
        if self.check(kind) {
            self.current += 1;
            Ok(&self.tokens[self.current - 1])
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_identifier(&mut self, expected: &'static str) -> Result<String, AsdlParseError> {
        self.expect(TokenKind::Identifier, expected).map(|t| t.text.clone())
    }

    fn unexpected(&self, expected: &'static str) -> AsdlParseError {
        match self.peek() {
            Some(token) if !token.is_eof() => AsdlParseError::UnexpectedToken {
                found: token.text.clone(),
                expected,
                line: token.position.line,
                column: token.position.column,
            },
            _ => AsdlParseError::UnexpectedEof { expected },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
