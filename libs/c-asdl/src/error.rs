//! # Conversion Errors
//!
//! Error types for C ↔ ASDL conversion.

use asdl::{AsdlParseError, Cardinality, GrammarError};
use c_ast::NodeError;
use thiserror::Error;

/// Errors that can occur while converting between C nodes and grammar trees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Constructor name with no grammar production or native node kind.
    #[error("Unknown production: {0}")]
    UnknownProduction(String),

    /// Native token with no entry in the terminal table for its type.
    #[error("Unknown {type_name} terminal: {token:?}")]
    UnknownTerminal { type_name: String, token: String },

    /// Constructor with no entry in the reverse terminal table for its type.
    #[error("Unknown {type_name} constructor: {constructor}")]
    UnknownConstructor { type_name: String, constructor: String },

    /// Required field holding no value.
    #[error("{constructor}.{field} is required but has no value")]
    MissingRequiredField { constructor: String, field: String },

    /// Field value count inconsistent with the declared cardinality.
    #[error("{constructor}.{field} is {cardinality} but holds {found} values")]
    Cardinality {
        constructor: String,
        field: String,
        cardinality: Cardinality,
        found: usize,
    },

    /// Value of the wrong shape for its field.
    #[error("{constructor}.{field}: expected {expected}, found {found}")]
    UnexpectedValue {
        constructor: String,
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Field type the converter cannot handle.
    #[error("{constructor}.{field} has unsupported type {type_name}")]
    UnsupportedFieldType {
        constructor: String,
        field: String,
        type_name: String,
    },

    /// Token or subword production with an unexpected field layout.
    #[error("Token production {0} must have exactly one primitive field")]
    InvalidTokenProduction(String),

    /// Grammar production and native node kind disagree.
    #[error("Registry mismatch for {constructor}: {reason}")]
    RegistryMismatch { constructor: String, reason: String },

    /// Grammar lookup failure.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// Bundled grammar failed to load.
    #[error(transparent)]
    GrammarText(#[from] AsdlParseError),

    /// Native node construction failure.
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl ConvertError {
    /// Check whether this error signals malformed trees or a grammar/table
    /// mismatch rather than an ordinary unsupported input.
    ///
    /// ## Returns
    ///
    /// `false` for unknown productions, terminals and constructors; `true`
    /// for everything else.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            ConvertError::UnknownProduction(_)
                | ConvertError::UnknownTerminal { .. }
                | ConvertError::UnknownConstructor { .. }
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::UnknownTerminal {
            type_name: "BINARY_OP".to_string(),
            token: "<=>".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown BINARY_OP terminal: \"<=>\"");

        let err = ConvertError::Cardinality {
            constructor: "ID".to_string(),
            field: "name".to_string(),
            cardinality: Cardinality::Single,
            found: 2,
        };
        assert_eq!(err.to_string(), "ID.name is single but holds 2 values");
    }

    #[test]
    fn test_contract_violation_split() {
        assert!(!ConvertError::UnknownProduction("Lambda".to_string()).is_contract_violation());
        assert!(ConvertError::MissingRequiredField {
            constructor: "ID".to_string(),
            field: "name".to_string(),
        }
        .is_contract_violation());
        assert!(ConvertError::from(GrammarError::EmptyGrammar).is_contract_violation());
    }
}
