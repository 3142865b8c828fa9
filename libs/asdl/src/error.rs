//! # ASDL Errors
//!
//! Error types for grammar construction, grammar lookups and the ASDL loader.

use crate::grammar::Cardinality;
use thiserror::Error;

// =============================================================================
// GRAMMAR ERROR
// =============================================================================

/// Errors raised while building or querying a grammar, or while assembling
/// trees against it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrammarError {
    /// No production has this constructor name.
    #[error("unknown constructor: {0}")]
    UnknownConstructor(String),

    /// No sum or primitive type has this name.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Two productions share a constructor name.
    #[error("duplicate constructor: {0}")]
    DuplicateConstructor(String),

    /// A type was declared twice.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two fields of one constructor share a name.
    #[error("duplicate field {field} in constructor {constructor}")]
    DuplicateField {
        /// Constructor declaring the field.
        constructor: String,
        /// Repeated field name.
        field: String,
    },

    /// A field refers to a type that was never declared.
    #[error("field {constructor}.{field} has undeclared type {type_name}")]
    UndeclaredType {
        /// Constructor declaring the field.
        constructor: String,
        /// Field name.
        field: String,
        /// Referenced type.
        type_name: String,
    },

    /// The grammar declares no sum type.
    #[error("grammar declares no sum type")]
    EmptyGrammar,

    /// A realized field holds a number of values its cardinality forbids.
    #[error("field {field} is {cardinality} but holds {found} value(s)")]
    Cardinality {
        /// Field name.
        field: String,
        /// Declared cardinality.
        cardinality: Cardinality,
        /// Number of values present.
        found: usize,
    },

    /// Realized fields do not mirror the production's field list.
    #[error("constructor {constructor} expects field {expected}, found {found}")]
    FieldMismatch {
        /// Constructor being assembled.
        constructor: String,
        /// Declared field name (or `<end>`).
        expected: String,
        /// Supplied field name (or `<end>`).
        found: String,
    },

    /// A stored value has the wrong shape for its field type.
    #[error("field {field} of type {type_name} cannot hold {found}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Declared field type.
        type_name: String,
        /// What was supplied.
        found: String,
    },

    /// A stored node table does not describe a single tree.
    #[error("malformed stored tree: {0}")]
    StoredLayout(String),
}

// =============================================================================
// PARSE ERROR
// =============================================================================

/// Errors raised while loading a grammar from ASDL text.
///
/// Lines and columns are one-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AsdlParseError {
    /// Found a token that does not fit the grammar of the dialect.
    #[error("unexpected token '{found}' at {line}:{column}, expected {expected}")]
    UnexpectedToken {
        /// Text of the offending token.
        found: String,
        /// Description of what was expected.
        expected: &'static str,
        /// Line of the token.
        line: usize,
        /// Column of the token.
        column: usize,
    },

    /// Input ended in the middle of a definition.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: &'static str,
    },

    /// A character that starts no token.
    #[error("invalid character {ch:?} at {line}:{column}")]
    InvalidCharacter {
        /// The character.
        ch: char,
        /// Line of the character.
        line: usize,
        /// Column of the character.
        column: usize,
    },

    /// The text parsed but describes an inconsistent grammar.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        let err = GrammarError::Cardinality {
            field: "name".to_string(),
            cardinality: Cardinality::Single,
            found: 2,
        };
        assert_eq!(err.to_string(), "field name is single but holds 2 value(s)");
    }

    #[test]
    fn test_unexpected_token_display() {
        let err = AsdlParseError::UnexpectedToken {
            found: ")".to_string(),
            expected: "constructor name",
            line: 3,
            column: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("unexpected token ')'"));
        assert!(msg.contains("3:7"));
    }

    #[test]
    fn test_grammar_error_is_transparent() {
        let err: AsdlParseError = GrammarError::EmptyGrammar.into();
        assert_eq!(err.to_string(), "grammar declares no sum type");
    }
}
