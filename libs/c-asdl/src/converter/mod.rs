//! # AST Converter
//!
//! Converts native C nodes to grammar-typed trees and back.
//!
//! ## Architecture
//!
//! ```text
//! CNode ──encode──▶ AsdlTree   (production lookup, field cardinality, leaves)
//! AsdlTree ──decode──▶ CNode   (kind lookup, reshape per cardinality)
//! ```
//!
//! A converter resolves everything it needs from the grammar once: the four
//! leaf productions (`IdentToken`, `StrToken`, `IdentSubword`, `StrSubword`)
//! and how each field type is handled.
//!
//! ## Example
//!
//! ```rust
//! use c_asdl::{c_grammar, AstConverter};
//! use c_ast::CNode;
//!
//! let converter = AstConverter::new(c_grammar().unwrap()).unwrap();
//! let node = CNode::binary_op("+", CNode::id("a"), CNode::constant("int", "1"));
//! let tree = converter.c_ast_to_asdl_ast(&node).unwrap();
//! assert_eq!(tree.constructor_name(), "BinaryOp");
//! assert_eq!(converter.asdl_ast_to_c_ast(&tree).unwrap(), node);
//! ```

mod decode;
mod encode;

use crate::error::ConvertError;
use crate::subword::SubwordModel;
use crate::terminals;
use asdl::{Cardinality, Field, Grammar, Production};
use config::constants::{
    ConverterConfig, IDENT_SUBWORD_CTOR, IDENT_TOKEN_CTOR, IDENT_TYPE, STR_SUBWORD_CTOR, STR_TOKEN_CTOR,
    STR_TYPE,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// FIELD CLASSIFICATION
// =============================================================================

/// Which leaf type a token field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// `IDENT`
    Ident,
    /// `STR`
    Str,
}

/// How the converter treats values of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Nested native nodes.
    Composite,
    /// Identifier or string leaves.
    Leaf(LeafKind),
    /// Enum-like terminals mapped through the terminal tables.
    Terminal,
}

/// Leaf productions of one leaf kind, with their single field.
#[derive(Debug, Clone)]
struct LeafProductions {
    token: Arc<Production>,
    token_field: Field,
    subword: Arc<Production>,
    pieces_field: Field,
}

impl LeafProductions {
    fn resolve(grammar: &Grammar, token: &str, subword: &str) -> Result<Self, ConvertError> {
        let token = grammar.get_prod_by_ctr_name(token)?.clone();
        let subword = grammar.get_prod_by_ctr_name(subword)?.clone();
        let token_field = leaf_field(grammar, &token, Cardinality::Single)?;
        let pieces_field = leaf_field(grammar, &subword, Cardinality::Multiple)?;
        Ok(Self {
            token,
            token_field,
            subword,
            pieces_field,
        })
    }
}

/// The single primitive field of a leaf production.
fn leaf_field(grammar: &Grammar, production: &Production, cardinality: Cardinality) -> Result<Field, ConvertError> {
    match production.fields() {
        [field] if field.cardinality == cardinality && grammar.is_primitive(&field.type_name) => Ok(field.clone()),
        _ => Err(ConvertError::InvalidTokenProduction(production.name().to_string())),
    }
}

// =============================================================================
// CONVERTER
// =============================================================================

/// Converter between native C nodes and trees of one grammar.
///
/// `Send + Sync`: a converter holds no mutable state and can be shared
/// between threads behind an `Arc`.
pub struct AstConverter {
    grammar: Arc<Grammar>,
    subword_model: Option<Arc<dyn SubwordModel>>,
    config: ConverterConfig,
    ident: LeafProductions,
    string: LeafProductions,
    field_kinds: HashMap<String, FieldKind>,
}

impl AstConverter {
    /// Create a converter encoding leaves as single raw tokens.
    ///
    /// ## Errors
    ///
    /// Fails when the grammar lacks one of the leaf productions or a leaf
    /// production does not hold exactly one primitive field.
    pub fn new(grammar: Arc<Grammar>) -> Result<Self, ConvertError> {
        Self::build(grammar, None)
    }

    /// Create a converter encoding leaves as subword pieces from `model`.
    pub fn with_subword_model(grammar: Arc<Grammar>, model: Arc<dyn SubwordModel>) -> Result<Self, ConvertError> {
        Self::build(grammar, Some(model))
    }

    fn build(grammar: Arc<Grammar>, subword_model: Option<Arc<dyn SubwordModel>>) -> Result<Self, ConvertError> {
        let ident = LeafProductions::resolve(&grammar, IDENT_TOKEN_CTOR, IDENT_SUBWORD_CTOR)?;
        let string = LeafProductions::resolve(&grammar, STR_TOKEN_CTOR, STR_SUBWORD_CTOR)?;

        let field_kinds: HashMap<String, FieldKind> = grammar
            .type_names()
            .map(|type_name| {
                let kind = match type_name {
                    IDENT_TYPE => FieldKind::Leaf(LeafKind::Ident),
                    STR_TYPE => FieldKind::Leaf(LeafKind::Str),
                    t if terminals::is_terminal_type(t) => FieldKind::Terminal,
                    _ => FieldKind::Composite,
                };
                (type_name.to_string(), kind)
            })
            .collect();

        debug!(
            grammar = %grammar.id(),
            types = field_kinds.len(),
            subword = subword_model.is_some(),
            "resolved converter"
        );

        Ok(Self {
            grammar,
            subword_model,
            config: ConverterConfig::default(),
            ident,
            string,
            field_kinds,
        })
    }

    /// Replace the settings snapshot (boundary marker and stack sizes).
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Grammar this converter was resolved for.
    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// Settings in effect.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Check whether leaves are encoded as subword pieces.
    pub fn uses_subwords(&self) -> bool {
        self.subword_model.is_some()
    }

    /// How values of `type_name` are converted; `None` for primitive or
    /// unknown types.
    pub fn field_kind(&self, type_name: &str) -> Option<FieldKind> {
        self.field_kinds.get(type_name).copied()
    }

    fn leaf(&self, kind: LeafKind) -> &LeafProductions {
        match kind {
            LeafKind::Ident => &self.ident,
            LeafKind::Str => &self.string,
        }
    }

    fn classify(&self, production: &Production, field: &Field) -> Result<FieldKind, ConvertError> {
        self.field_kind(&field.type_name)
            .ok_or_else(|| ConvertError::UnsupportedFieldType {
                constructor: production.name().to_string(),
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            })
    }
}

impl fmt::Debug for AstConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstConverter")
            .field("grammar", &self.grammar.id())
            .field("subword_model", &self.subword_model.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
