//! Native C nodes to grammar trees.

use super::{AstConverter, FieldKind, LeafKind};
use crate::error::ConvertError;
use crate::terminals;
use asdl::{AsdlTree, Cardinality, Field, FieldValue, Production, RealizedField};
use c_ast::{Attr, CNode};
use stacker::maybe_grow;
use tracing::trace;

impl AstConverter {
    /// Encode a native node and its descendants as a grammar tree.
    ///
    /// ## Errors
    ///
    /// Fails on the first node with no production, the first required field
    /// with no value, or the first terminal with no table entry. No partial
    /// tree is returned.
    pub fn c_ast_to_asdl_ast(&self, node: &CNode) -> Result<AsdlTree, ConvertError> {
        maybe_grow(self.config.stack_red_zone(), self.config.stack_size(), || self.encode_node(node))
    }

    fn encode_node(&self, node: &CNode) -> Result<AsdlTree, ConvertError> {
        let name = node.type_name();
        trace!(node = name, "encode");

        let production = self
            .grammar
            .get_prod_by_ctr_name(name)
            .map_err(|_| ConvertError::UnknownProduction(name.to_string()))?;

        let mut fields = Vec::with_capacity(production.fields().len());
        for field in production.fields() {
            let attr = node.get(&field.name).ok_or_else(|| ConvertError::RegistryMismatch {
                constructor: name.to_string(),
                reason: format!("no native attribute {}", field.name),
            })?;
            let kind = self.classify(production, field)?;

            let mut values = Vec::new();
            for element in elements(production, field, attr)? {
                values.push(self.encode_value(production, field, kind, element)?);
            }
            fields.push(RealizedField::with_values(field.clone(), values));
        }

        Ok(AsdlTree::with_fields(production.clone(), fields)?)
    }

    fn encode_value(
        &self,
        production: &Production,
        field: &Field,
        kind: FieldKind,
        attr: &Attr,
    ) -> Result<FieldValue, ConvertError> {
        match kind {
            FieldKind::Composite => {
                let child = attr
                    .as_node()
                    .ok_or_else(|| unexpected(production, field, "a node", attr))?;
                let tree = maybe_grow(self.config.stack_red_zone(), self.config.stack_size(), || {
                    self.encode_node(child)
                })?;
                Ok(FieldValue::Tree(tree))
            }
            FieldKind::Leaf(leaf) => {
                let text = attr
                    .as_text()
                    .ok_or_else(|| unexpected(production, field, "text", attr))?;
                Ok(FieldValue::Tree(self.encode_leaf(leaf, text)?))
            }
            FieldKind::Terminal => {
                let token = attr
                    .as_text()
                    .ok_or_else(|| unexpected(production, field, "a terminal", attr))?;
                let constructor = terminals::c_to_asdl(&field.type_name, token)?;
                let terminal = self.grammar.get_prod_by_ctr_name(constructor)?;
                Ok(FieldValue::Tree(AsdlTree::new(terminal.clone())))
            }
        }
    }

    /// Wrap an identifier or string as a raw token leaf, or as subword pieces
    /// when a subword model is configured.
    fn encode_leaf(&self, leaf: LeafKind, text: &str) -> Result<AsdlTree, ConvertError> {
        let prods = self.leaf(leaf);
        let tree = match &self.subword_model {
            None => AsdlTree::with_fields(
                prods.token.clone(),
                vec![RealizedField::with_values(
                    prods.token_field.clone(),
                    vec![FieldValue::Token(text.to_string())],
                )],
            )?,
            Some(model) => {
                let pieces = model.encode_as_pieces(text).into_iter().map(FieldValue::Token).collect();
                AsdlTree::with_fields(
                    prods.subword.clone(),
                    vec![RealizedField::with_values(prods.pieces_field.clone(), pieces)],
                )?
            }
        };
        Ok(tree)
    }
}

/// Values of one attribute as an ordered sequence.
///
/// An absent value is an empty sequence on `optional` and `multiple` fields
/// and an error on `single` fields. A scalar becomes a one-element sequence.
fn elements<'a>(production: &Production, field: &Field, attr: &'a Attr) -> Result<Vec<&'a Attr>, ConvertError> {
    match (field.cardinality, attr) {
        (Cardinality::Single, Attr::None) => Err(ConvertError::MissingRequiredField {
            constructor: production.name().to_string(),
            field: field.name.clone(),
        }),
        (_, Attr::None) => Ok(Vec::new()),
        (Cardinality::Multiple, Attr::List(items)) => Ok(items.iter().collect()),
        (Cardinality::Multiple, other) => Err(unexpected(production, field, "a list", other)),
        (_, Attr::List(_)) => Err(unexpected(production, field, "a single value", attr)),
        (_, scalar) => Ok(vec![scalar]),
    }
}

fn unexpected(production: &Production, field: &Field, expected: &'static str, found: &Attr) -> ConvertError {
    ConvertError::UnexpectedValue {
        constructor: production.name().to_string(),
        field: field.name.clone(),
        expected,
        found: describe(found),
    }
}

fn describe(attr: &Attr) -> String {
    match attr {
        Attr::None => "no value".to_string(),
        Attr::Text(text) => format!("text {:?}", text),
        Attr::Node(node) => format!("a {} node", node.type_name()),
        Attr::List(items) => format!("a list of {}", items.len()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
