//! # Node Errors
//!
//! Errors raised while instantiating or editing C nodes.

use thiserror::Error;

/// Errors from node construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// Node kind name not in the registry.
    #[error("unknown C node kind: {0}")]
    UnknownKind(String),

    /// Attribute name not declared for the node kind.
    #[error("{kind} has no attribute '{name}'")]
    UnknownAttribute { kind: &'static str, name: String },

    /// Attribute not supplied during atomic instantiation.
    #[error("{kind} is missing attribute '{name}'")]
    MissingAttribute { kind: &'static str, name: &'static str },

    /// Attribute supplied more than once.
    #[error("{kind} attribute '{name}' given more than once")]
    DuplicateAttribute { kind: &'static str, name: &'static str },

    /// List value on a scalar attribute, or scalar value on a list attribute.
    #[error("{kind} attribute '{name}' expects {expected}")]
    AttrShape {
        kind: &'static str,
        name: &'static str,
        expected: &'static str,
    },
}
