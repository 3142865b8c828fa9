//! # ASDL Grammars and Trees
//!
//! Grammar definitions in the Abstract Syntax Description Language and the
//! generic, grammar-typed tree every production instantiates.
//!
//! ## Architecture
//!
//! ```text
//! ASDL text → Lexer → Tokens → Parser → Grammar
//! Grammar + values → AsdlTree (production + realized fields)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use asdl::{AsdlTree, Grammar};
//!
//! let grammar = Grammar::from_text("EXPR = Break | Continue").unwrap();
//! let production = grammar.get_prod_by_ctr_name("Break").unwrap();
//! let tree = AsdlTree::new(production.clone());
//! assert_eq!(tree.to_string(), "(Break)");
//! ```
//!
//! ## Dialect
//!
//! ```text
//! -- comment to end of line
//! primitive TOKEN
//! EXPR = ID(IDENT name) | FileAST(EXPR* ext) | Return(EXPR? expr)
//! IDENT = IdentToken(TOKEN token)
//! ```

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use error::{AsdlParseError, GrammarError};
pub use grammar::{Cardinality, Constructor, Field, Grammar, GrammarId, Production, SumType};
pub use tree::{AsdlTree, FieldValue, RealizedField, StoredField, StoredNode, StoredTree, StoredValue};
