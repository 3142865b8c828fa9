//! Grammar trees to native C nodes.

use super::{AstConverter, FieldKind, LeafKind};
use crate::error::ConvertError;
use crate::subword::reassemble_words;
use crate::terminals;
use asdl::{AsdlTree, Cardinality, FieldValue, RealizedField};
use c_ast::{Attr, CNode, NodeKind};
use stacker::maybe_grow;
use tracing::trace;

impl AstConverter {
    /// Decode a grammar tree into a native node.
    ///
    /// ## Errors
    ///
    /// Fails on the first constructor with no native node kind or reverse
    /// terminal entry, and on the first field whose value count does not fit
    /// its cardinality. No partial node is returned.
    pub fn asdl_ast_to_c_ast(&self, tree: &AsdlTree) -> Result<CNode, ConvertError> {
        maybe_grow(self.config.stack_red_zone(), self.config.stack_size(), || self.decode_tree(tree))
    }

    fn decode_tree(&self, tree: &AsdlTree) -> Result<CNode, ConvertError> {
        let name = tree.constructor_name();
        trace!(node = name, "decode");

        let kind = NodeKind::from_name(name).ok_or_else(|| ConvertError::UnknownProduction(name.to_string()))?;

        let mut attrs = Vec::with_capacity(tree.fields().len());
        for field in tree.fields() {
            let kind = self.classify(tree.production(), field.field())?;
            let mut values = Vec::with_capacity(field.len());
            for value in field.as_value_list() {
                values.push(self.decode_value(name, field, kind, value)?);
            }
            attrs.push((field.name(), reshape(name, field, values)?));
        }

        Ok(CNode::from_attrs(kind, attrs)?)
    }

    fn decode_value(
        &self,
        constructor: &str,
        field: &RealizedField,
        kind: FieldKind,
        value: &FieldValue,
    ) -> Result<Attr, ConvertError> {
        let child = value
            .as_tree()
            .ok_or_else(|| unexpected(constructor, field.name(), "a subtree", value))?;

        match kind {
            FieldKind::Composite => {
                let node = maybe_grow(self.config.stack_red_zone(), self.config.stack_size(), || {
                    self.decode_tree(child)
                })?;
                Ok(Attr::from(node))
            }
            FieldKind::Leaf(leaf) => Ok(Attr::Text(self.decode_leaf(leaf, child)?)),
            FieldKind::Terminal => {
                let token = terminals::asdl_to_c(field.type_name(), child.constructor_name())?;
                Ok(Attr::from(token))
            }
        }
    }

    /// Recover a leaf string: the stored token of a raw token leaf, or the
    /// space-joined words reassembled from a subword leaf.
    fn decode_leaf(&self, leaf: LeafKind, tree: &AsdlTree) -> Result<String, ConvertError> {
        let prods = self.leaf(leaf);
        let name = tree.constructor_name();

        let field = match tree.fields() {
            [field] => field,
            _ => {
                return Err(ConvertError::UnexpectedValue {
                    constructor: name.to_string(),
                    field: String::new(),
                    expected: "a single leaf field",
                    found: format!("{} fields", tree.fields().len()),
                })
            }
        };

        let mut tokens = Vec::with_capacity(field.len());
        for value in field.as_value_list() {
            let token = value
                .as_token()
                .ok_or_else(|| unexpected(name, field.name(), "a token", value))?;
            tokens.push(token);
        }

        if name == prods.token.name() {
            match tokens.as_slice() {
                [token] => Ok(token.to_string()),
                _ => Err(ConvertError::Cardinality {
                    constructor: name.to_string(),
                    field: field.name().to_string(),
                    cardinality: Cardinality::Single,
                    found: tokens.len(),
                }),
            }
        } else if name == prods.subword.name() {
            Ok(reassemble_words(&tokens, self.config.boundary_marker()).join(" "))
        } else {
            Err(ConvertError::UnexpectedValue {
                constructor: name.to_string(),
                field: field.name().to_string(),
                expected: "a token or subword leaf",
                found: format!("constructor {}", name),
            })
        }
    }
}

/// Shape collected values to the field's cardinality.
fn reshape(constructor: &str, field: &RealizedField, mut values: Vec<Attr>) -> Result<Attr, ConvertError> {
    match (field.cardinality(), values.len()) {
        (Cardinality::Multiple, _) => Ok(Attr::List(values)),
        (Cardinality::Optional, 0) => Ok(Attr::None),
        (Cardinality::Single | Cardinality::Optional, 1) => Ok(values.swap_remove(0)),
        (cardinality, found) => Err(ConvertError::Cardinality {
            constructor: constructor.to_string(),
            field: field.name().to_string(),
            cardinality,
            found,
        }),
    }
}

fn unexpected(constructor: &str, field: &str, expected: &'static str, found: &FieldValue) -> ConvertError {
    ConvertError::UnexpectedValue {
        constructor: constructor.to_string(),
        field: field.to_string(),
        expected,
        found: match found {
            FieldValue::Tree(tree) => format!("tree {}", tree.constructor_name()),
            FieldValue::Token(token) => format!("token {:?}", token),
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================
