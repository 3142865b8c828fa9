//! # C ↔ ASDL Converter
//!
//! Bidirectional conversion between native C syntax trees (`c_ast::CNode`)
//! and ASDL grammar-typed trees (`asdl::AsdlTree`).
//!
//! ## Architecture
//!
//! ```text
//! CNode ──AstConverter::c_ast_to_asdl_ast──▶ AsdlTree ──▶ (model)
//! (model or storage) ──▶ AsdlTree ──AstConverter::asdl_ast_to_c_ast──▶ CNode
//! ```
//!
//! Composite nodes map to `EXPR` productions by type name. Enum-like
//! terminals (qualifiers, operators, literal kinds) go through the tables in
//! [`terminals`]. Identifier and string leaves become either a single raw
//! token or a sequence of subword pieces ([`subword`]).
//!
//! ## Usage
//!
//! ```rust
//! use c_asdl::{c_grammar, AstConverter};
//! use c_ast::CNode;
//!
//! let converter = AstConverter::new(c_grammar().unwrap()).unwrap();
//! let call = CNode::func_call(CNode::id("puts"), Some(CNode::expr_list(vec![
//!     CNode::constant("string", "\"hi\""),
//! ])));
//! let tree = converter.c_ast_to_asdl_ast(&call).unwrap();
//! assert_eq!(converter.asdl_ast_to_c_ast(&tree).unwrap(), call);
//! ```

pub mod batch;
pub mod cache;
pub mod converter;
pub mod error;
pub mod grammar;
pub mod subword;
pub mod terminals;

pub use batch::{decode_batch, encode_batch, BatchPolicy};
pub use cache::{asdl_ast_to_c_ast, c_ast_to_asdl_ast, ConverterCache};
pub use converter::{AstConverter, FieldKind, LeafKind};
pub use error::ConvertError;
pub use grammar::{c_grammar, verify_registry, C_ASDL};
pub use subword::{spm_decode, spm_join, SubwordModel};
pub use terminals::{operators, KEYWORDS};
