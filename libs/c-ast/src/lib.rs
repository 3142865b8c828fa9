//! # C AST Crate
//!
//! Native C syntax trees using the pycparser node vocabulary: `FileAST`,
//! `Decl`, `BinaryOp`, `ID` and the rest.
//!
//! ## Architecture
//!
//! ```text
//! NodeKind (closed registry) → ordered AttrSpec list
//! CNode { kind, attrs }      → one Attr per AttrSpec, in declared order
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use c_ast::{Attr, CNode, NodeKind};
//!
//! let sum = CNode::binary_op("+", CNode::id("a"), CNode::constant("int", "1"));
//! assert_eq!(sum.kind(), NodeKind::BinaryOp);
//! assert_eq!(sum.get("op"), Some(&Attr::from("+")));
//! assert_eq!(sum.node_count(), 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Closed Registry**: every node kind is a `NodeKind` variant
//! - **Atomic Instantiation**: `CNode::from_attrs` takes every attribute at once
//! - **Strict Tree**: nodes own their children exclusively

pub mod error;
pub mod keywords;
pub mod kind;
pub mod node;

pub use error::NodeError;
pub use keywords::KEYWORDS;
pub use kind::{AttrSpec, NodeKind};
pub use node::{Attr, CNode};
