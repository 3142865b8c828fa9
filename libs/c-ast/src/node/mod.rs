//! C node and attribute value types.
//!
//! A `CNode` stores one `Attr` per declared attribute of its kind, in declared
//! order. Attribute values are checked against the declared shape: list
//! attributes take `Attr::List` (or `Attr::None`), scalar attributes never
//! take a list.

mod builders;

use crate::error::NodeError;
use crate::kind::{AttrSpec, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ATTR
// =============================================================================

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attr {
    /// No value.
    None,
    /// A lexical value: identifier, operator, literal text or type tag.
    Text(String),
    /// A child node.
    Node(Box<CNode>),
    /// An ordered sequence of values.
    List(Vec<Attr>),
}

impl Attr {
    /// Check for the "no value" sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Attr::None)
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Attr::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Child node, if any.
    pub fn as_node(&self) -> Option<&CNode> {
        match self {
            Attr::Node(node) => Some(node),
            _ => None,
        }
    }

    /// List elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Attr]> {
        match self {
            Attr::List(items) => Some(items),
            _ => None,
        }
    }

    fn fits(&self, spec: &AttrSpec) -> bool {
        match self {
            Attr::None => true,
            Attr::List(_) => spec.list,
            Attr::Text(_) | Attr::Node(_) => !spec.list,
        }
    }
}

impl From<&str> for Attr {
    fn from(text: &str) -> Self {
        Attr::Text(text.to_string())
    }
}

impl From<String> for Attr {
    fn from(text: String) -> Self {
        Attr::Text(text)
    }
}

impl From<CNode> for Attr {
    fn from(node: CNode) -> Self {
        Attr::Node(Box::new(node))
    }
}

impl From<Vec<Attr>> for Attr {
    fn from(items: Vec<Attr>) -> Self {
        Attr::List(items)
    }
}

impl<T: Into<Attr>> From<Option<T>> for Attr {
    fn from(value: Option<T>) -> Self {
        value.map_or(Attr::None, Into::into)
    }
}

impl<T: Into<Attr>> FromIterator<T> for Attr {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Attr::List(iter.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// CNODE
// =============================================================================

/// A native C syntax tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct CNode {
    kind: NodeKind,
    attrs: Vec<Attr>,
}

impl CNode {
    /// Create a node with every attribute empty: `None` for scalars, an
    /// empty list for lists.
    pub fn new(kind: NodeKind) -> Self {
        let attrs = kind
            .attrs()
            .iter()
            .map(|spec| if spec.list { Attr::List(Vec::new()) } else { Attr::None })
            .collect();
        Self { kind, attrs }
    }

    /// Instantiate a node from named attributes in one step.
    ///
    /// ## Errors
    ///
    /// Every declared attribute must be supplied exactly once with a value of
    /// the declared shape. Unknown names are rejected.
    pub fn from_attrs<I, S>(kind: NodeKind, attrs: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = (S, Attr)>,
        S: AsRef<str>,
    {
        let specs = kind.attrs();
        let mut slots: Vec<Option<Attr>> = vec![None; specs.len()];

        for (name, value) in attrs {
            let name = name.as_ref();
            let index = kind.attr_index(name).ok_or_else(|| NodeError::UnknownAttribute {
                kind: kind.name(),
                name: name.to_string(),
            })?;
            let spec = &specs[index];
            if slots[index].is_some() {
                return Err(NodeError::DuplicateAttribute {
                    kind: kind.name(),
                    name: spec.name,
                });
            }
            slots[index] = Some(conform(kind, spec, value)?);
        }

        let attrs = slots
            .into_iter()
            .zip(specs)
            .map(|(slot, spec)| {
                slot.ok_or(NodeError::MissingAttribute {
                    kind: kind.name(),
                    name: spec.name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { kind, attrs })
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Node type name.
    pub fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Attribute value by name.
    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.kind.attr_index(name).map(|i| &self.attrs[i])
    }

    /// Attributes with their names, in declared order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &Attr)> {
        self.kind.attr_names().zip(self.attrs.iter())
    }

    /// Replace an attribute value.
    ///
    /// `Attr::None` on a list attribute stores the empty list.
    pub fn set(&mut self, name: &str, value: impl Into<Attr>) -> Result<(), NodeError> {
        let index = self.kind.attr_index(name).ok_or_else(|| NodeError::UnknownAttribute {
            kind: self.kind.name(),
            name: name.to_string(),
        })?;
        self.attrs[index] = conform(self.kind, &self.kind.attrs()[index], value.into())?;
        Ok(())
    }

    /// Builder form of [`CNode::set`].
    pub fn with(mut self, name: &str, value: impl Into<Attr>) -> Result<Self, NodeError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Direct child nodes in attribute order, list elements flattened.
    pub fn children(&self) -> Vec<&CNode> {
        let mut out = Vec::new();
        for attr in &self.attrs {
            collect_nodes(attr, &mut out);
        }
        out
    }

    /// Visit this node and its descendants in pre-order.
    pub fn walk<F: FnMut(&CNode)>(&self, visit: &mut F) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_: &CNode| count += 1);
        count
    }
}

/// Check `value` against the attribute's shape. `None` on a list attribute
/// is stored as the empty list.
fn conform(kind: NodeKind, spec: &AttrSpec, value: Attr) -> Result<Attr, NodeError> {
    if spec.list && value.is_none() {
        Ok(Attr::List(Vec::new()))
    } else if value.fits(spec) {
        Ok(value)
    } else {
        Err(NodeError::AttrShape {
            kind: kind.name(),
            name: spec.name,
            expected: if spec.list { "a list" } else { "a single value" },
        })
    }
}

fn collect_nodes<'a>(attr: &'a Attr, out: &mut Vec<&'a CNode>) {
    match attr {
        Attr::Node(node) => out.push(node),
        Attr::List(items) => items.iter().for_each(|item| collect_nodes(item, out)),
        Attr::None | Attr::Text(_) => {}
    }
}

// =============================================================================
// SERIALIZED FORM
// =============================================================================

/// Serialized node: kind name plus attributes keyed by name.
#[derive(Serialize, Deserialize)]
struct RawNode {
    kind: String,
    #[serde(default)]
    attrs: BTreeMap<String, Attr>,
}

impl TryFrom<RawNode> for CNode {
    type Error = NodeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let kind = NodeKind::from_name(&raw.kind).ok_or(NodeError::UnknownKind(raw.kind))?;
        CNode::from_attrs(kind, raw.attrs)
    }
}

impl From<CNode> for RawNode {
    fn from(node: CNode) -> Self {
        RawNode {
            kind: node.kind.name().to_string(),
            attrs: node
                .kind
                .attr_names()
                .map(str::to_string)
                .zip(node.attrs)
                .collect(),
        }
    }
}
