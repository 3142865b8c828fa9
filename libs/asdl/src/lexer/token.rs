//! # Tokens
//!
//! Token types for the ASDL lexer.

// =============================================================================
// POSITION
// =============================================================================

/// Location of a token in ASDL text. Lines and columns are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset.
    pub byte: usize,
    /// Line number.
    pub line: usize,
    /// Column number, counted in characters.
    pub column: usize,
}

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Where the token starts.
    pub position: Position,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, position: Position, text: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            text: text.into(),
        }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens in the ASDL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Type, constructor or field name.
    Identifier,
    /// `primitive` keyword.
    Primitive,
    /// `=`
    Eq,
    /// `|`
    Pipe,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `*` (multiple cardinality)
    Star,
    /// `?` (optional cardinality)
    Question,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Primitive => "'primitive'",
            Self::Eq => "'='",
            Self::Pipe => "'|'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Comma => "','",
            Self::Star => "'*'",
            Self::Question => "'?'",
            Self::Eof => "end of input",
        }
    }
}
