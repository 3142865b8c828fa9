//! # Grammar-Typed Trees
//!
//! `AsdlTree` is the generic tree every production instantiates: a production
//! plus one `RealizedField` per field specification, in declared order. Leaf
//! values of primitive fields are raw strings.
//!
//! ## Storage
//!
//! Trees serialize by constructor name as `StoredTree`, a flat node table
//! whose children are referenced by index. A stored tree is bound back to a
//! grammar with `StoredTree::rebind`, which re-validates it:
//!
//! ```rust
//! use asdl::{AsdlTree, Grammar, StoredTree};
//!
//! let grammar = Grammar::from_text("EXPR = Break").unwrap();
//! let tree = AsdlTree::new(grammar.get_prod_by_ctr_name("Break").unwrap().clone());
//! let stored: StoredTree = tree.to_stored();
//! assert_eq!(stored.rebind(&grammar).unwrap(), tree);
//! ```

use crate::error::GrammarError;
use crate::grammar::{Cardinality, Field, Grammar, Production};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize, Serializer};
use stacker::maybe_grow;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// FIELD VALUE
// =============================================================================

/// One value held by a realized field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A nested tree (sum-typed field).
    Tree(AsdlTree),
    /// A raw string payload (primitive-typed field).
    Token(String),
}

impl FieldValue {
    /// The nested tree, if this is one.
    pub fn as_tree(&self) -> Option<&AsdlTree> {
        match self {
            FieldValue::Tree(tree) => Some(tree),
            FieldValue::Token(_) => None,
        }
    }

    /// The raw string, if this is one.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            FieldValue::Token(token) => Some(token),
            FieldValue::Tree(_) => None,
        }
    }
}

impl From<AsdlTree> for FieldValue {
    fn from(tree: AsdlTree) -> Self {
        FieldValue::Tree(tree)
    }
}

impl From<String> for FieldValue {
    fn from(token: String) -> Self {
        FieldValue::Token(token)
    }
}

impl From<&str> for FieldValue {
    fn from(token: &str) -> Self {
        FieldValue::Token(token.to_string())
    }
}

// =============================================================================
// REALIZED FIELD
// =============================================================================

/// A field specification instantiated on a tree node, holding its values.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizedField {
    field: Field,
    values: Vec<FieldValue>,
}

impl RealizedField {
    /// Create an empty realized field.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            values: Vec::new(),
        }
    }

    /// Create a realized field from values as-is, without checking the
    /// cardinality.
    ///
    /// Trees produced by an external model may be malformed; consumers such
    /// as the C decoder check cardinality themselves.
    pub fn with_values(field: Field, values: Vec<FieldValue>) -> Self {
        Self { field, values }
    }

    /// Field specification.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Declared type name.
    pub fn type_name(&self) -> &str {
        &self.field.type_name
    }

    /// Declared cardinality.
    pub fn cardinality(&self) -> Cardinality {
        self.field.cardinality
    }

    /// Append a value.
    ///
    /// ## Errors
    ///
    /// `GrammarError::Cardinality` when a `single` or `optional` field
    /// already holds a value.
    pub fn add_value(&mut self, value: impl Into<FieldValue>) -> Result<(), GrammarError> {
        if self.field.cardinality != Cardinality::Multiple && !self.values.is_empty() {
            return Err(GrammarError::Cardinality {
                field: self.field.name.clone(),
                cardinality: self.field.cardinality,
                found: self.values.len() + 1,
            });
        }
        self.values.push(value.into());
        Ok(())
    }

    /// First value, if any.
    pub fn value(&self) -> Option<&FieldValue> {
        self.values.first()
    }

    /// All values in order.
    pub fn as_value_list(&self) -> &[FieldValue] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the field holds no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the value count against the declared cardinality.
    pub fn check_cardinality(&self) -> Result<(), GrammarError> {
        if self.field.cardinality.admits(self.values.len()) {
            Ok(())
        } else {
            Err(GrammarError::Cardinality {
                field: self.field.name.clone(),
                cardinality: self.field.cardinality,
                found: self.values.len(),
            })
        }
    }
}

// =============================================================================
// ASDL TREE
// =============================================================================

/// A grammar-typed tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct AsdlTree {
    production: Arc<Production>,
    fields: Vec<RealizedField>,
}

impl AsdlTree {
    /// Create a node whose realized fields are all empty.
    pub fn new(production: Arc<Production>) -> Self {
        let fields = production.fields().iter().cloned().map(RealizedField::new).collect();
        Self { production, fields }
    }

    /// Create a node from realized fields.
    ///
    /// ## Errors
    ///
    /// `GrammarError::FieldMismatch` unless `fields` mirrors the production's
    /// field specifications one-to-one, in declared order.
    pub fn with_fields(production: Arc<Production>, fields: Vec<RealizedField>) -> Result<Self, GrammarError> {
        let declared = production.fields();
        for i in 0..declared.len().max(fields.len()) {
            let expected = declared.get(i);
            let found = fields.get(i).map(RealizedField::field);
            if expected != found {
                return Err(GrammarError::FieldMismatch {
                    constructor: production.name().to_string(),
                    expected: expected.map_or("<end>", |f| f.name.as_str()).to_string(),
                    found: found.map_or("<end>", |f| f.name.as_str()).to_string(),
                });
            }
        }
        Ok(Self { production, fields })
    }

    /// Production this node instantiates.
    pub fn production(&self) -> &Arc<Production> {
        &self.production
    }

    /// Constructor name of the production.
    pub fn constructor_name(&self) -> &str {
        self.production.name()
    }

    /// Realized fields in declared order.
    pub fn fields(&self) -> &[RealizedField] {
        &self.fields
    }

    /// Find a realized field by name.
    pub fn field(&self, name: &str) -> Option<&RealizedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Find a realized field by name, mutably.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut RealizedField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Number of tree nodes, this one included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            count += 1;
            pending.extend(tree.subtrees());
        }
        count
    }

    /// Check every field of every node against its cardinality, in
    /// pre-order.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            for field in &tree.fields {
                field.check_cardinality()?;
            }
            let children: Vec<&AsdlTree> = tree.subtrees().collect();
            pending.extend(children.into_iter().rev());
        }
        Ok(())
    }

    /// Storage form of this tree.
    pub fn to_stored(&self) -> StoredTree {
        let mut nodes = vec![StoredNode::default()];
        let mut pending = vec![(0, self)];

        while let Some((index, tree)) = pending.pop() {
            let mut fields = Vec::with_capacity(tree.fields.len());
            for field in &tree.fields {
                let mut values = Vec::with_capacity(field.len());
                for value in field.as_value_list() {
                    values.push(match value {
                        FieldValue::Token(token) => StoredValue::Token(token.clone()),
                        FieldValue::Tree(child) => {
                            let child_index = nodes.len();
                            nodes.push(StoredNode::default());
                            pending.push((child_index, child));
                            StoredValue::Node(child_index)
                        }
                    });
                }
                fields.push(StoredField {
                    name: field.name().to_string(),
                    values,
                });
            }
            nodes[index] = StoredNode {
                constructor: tree.constructor_name().to_string(),
                fields,
            };
        }

        StoredTree { nodes }
    }

    /// Direct child trees in field order.
    fn subtrees(&self) -> impl Iterator<Item = &AsdlTree> {
        self.fields
            .iter()
            .flat_map(RealizedField::as_value_list)
            .filter_map(FieldValue::as_tree)
    }

    fn write_sexpr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.constructor_name())?;
        for field in &self.fields {
            write!(f, " ({}", field.name())?;
            for value in field.as_value_list() {
                match value {
                    FieldValue::Tree(tree) => write!(f, " {}", tree)?,
                    FieldValue::Token(token) => write!(f, " {:?}", token)?,
                }
            }
            f.write_str(")")?;
        }
        f.write_str(")")
    }
}

impl Serialize for AsdlTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_stored().serialize(serializer)
    }
}

/// S-expression rendering: `(Ctor (field value ...) ...)`.
impl fmt::Display for AsdlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.write_sexpr(f))
    }
}

// =============================================================================
// STORED TREE
// =============================================================================

/// Grammar-independent storage form of an `AsdlTree`.
///
/// Nodes live in a flat table, so the serialized form has the same nesting
/// depth for any tree. `nodes[0]` is the root; every other node comes after
/// its parent and is referenced exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTree {
    /// Node table, root first.
    pub nodes: Vec<StoredNode>,
}

/// Storage form of one tree node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredNode {
    /// Constructor name.
    pub constructor: String,
    /// Fields in declared order.
    #[serde(default)]
    pub fields: Vec<StoredField>,
}

/// Storage form of a realized field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredField {
    /// Field name.
    pub name: String,
    /// Values in order.
    #[serde(default)]
    pub values: Vec<StoredValue>,
}

/// Storage form of a field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// Raw string payload.
    Token(String),
    /// Index of a nested node in the node table.
    Node(usize),
}

impl StoredTree {
    /// Bind this stored tree to `grammar`.
    ///
    /// ## Errors
    ///
    /// Fails on unknown constructors, on fields that do not mirror the
    /// production, on values whose shape does not match the field type, on
    /// cardinality violations, and on node tables that do not describe a
    /// single tree.
    pub fn rebind(&self, grammar: &Grammar) -> Result<AsdlTree, GrammarError> {
        let mut built: Vec<Option<AsdlTree>> = (0..self.nodes.len()).map(|_| None).collect();

        // Children come after their parent, so a reverse scan sees them first.
        for index in (0..self.nodes.len()).rev() {
            let tree = self.rebind_node(grammar, index, &mut built)?;
            built[index] = Some(tree);
        }

        let mut built = built.into_iter();
        let root = built
            .next()
            .flatten()
            .ok_or_else(|| GrammarError::StoredLayout("empty node table".to_string()))?;
        if let Some(position) = built.position(|node| node.is_some()) {
            return Err(GrammarError::StoredLayout(format!(
                "node {} is never referenced",
                position + 1
            )));
        }
        Ok(root)
    }

    fn rebind_node(
        &self,
        grammar: &Grammar,
        index: usize,
        built: &mut [Option<AsdlTree>],
    ) -> Result<AsdlTree, GrammarError> {
        let node = &self.nodes[index];
        let production = grammar.get_prod_by_ctr_name(&node.constructor)?;
        let declared = production.fields();

        if declared.len() != node.fields.len()
            || declared.iter().zip(&node.fields).any(|(d, s)| d.name != s.name)
        {
            let position = declared
                .iter()
                .zip(&node.fields)
                .position(|(d, s)| d.name != s.name)
                .unwrap_or(declared.len().min(node.fields.len()));
            return Err(GrammarError::FieldMismatch {
                constructor: node.constructor.clone(),
                expected: declared.get(position).map_or("<end>", |f| f.name.as_str()).to_string(),
                found: node.fields.get(position).map_or("<end>", |f| f.name.as_str()).to_string(),
            });
        }

        let mut fields = Vec::with_capacity(declared.len());
        for (spec, stored) in declared.iter().zip(&node.fields) {
            let primitive = grammar.is_primitive(&spec.type_name);
            let mut values = Vec::with_capacity(stored.values.len());
            for value in &stored.values {
                let value = match (value, primitive) {
                    (StoredValue::Token(token), true) => FieldValue::Token(token.clone()),
                    (&StoredValue::Node(child), false) => {
                        let child = take_child(built, index, child)?;
                        if child.production.type_name != spec.type_name {
                            return Err(type_mismatch(spec, format!("a {} tree", child.production.type_name)));
                        }
                        FieldValue::Tree(child)
                    }
                    (StoredValue::Token(token), false) => {
                        return Err(type_mismatch(spec, format!("token {:?}", token)))
                    }
                    (StoredValue::Node(child), true) => {
                        return Err(type_mismatch(spec, format!("node {}", child)))
                    }
                };
                values.push(value);
            }
            let field = RealizedField::with_values(spec.clone(), values);
            field.check_cardinality()?;
            fields.push(field);
        }

        Ok(AsdlTree {
            production: production.clone(),
            fields,
        })
    }
}

/// Move the already rebound node `child` out of the table.
fn take_child(built: &mut [Option<AsdlTree>], parent: usize, child: usize) -> Result<AsdlTree, GrammarError> {
    if child <= parent || child >= built.len() {
        return Err(GrammarError::StoredLayout(format!(
            "node {} refers to node {}",
            parent, child
        )));
    }
    built[child]
        .take()
        .ok_or_else(|| GrammarError::StoredLayout(format!("node {} is referenced twice", child)))
}

fn type_mismatch(spec: &Field, found: String) -> GrammarError {
    GrammarError::TypeMismatch {
        field: spec.name.clone(),
        type_name: spec.type_name.clone(),
        found,
    }
}

// =============================================================================
// TESTS
// =============================================================================
