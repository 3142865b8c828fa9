//! # Config Crate
//!
//! Centralized configuration constants for the C/ASDL conversion pipeline.
//! Reserved constructor names, the subword boundary marker and the tunable
//! limits live here so the grammar, native AST and converter crates agree on
//! them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{IDENT_TOKEN_CTOR, SUBWORD_BOUNDARY_MARKER};
//!
//! // A subword piece that begins a new word carries the marker.
//! let piece = format!("{}foo", SUBWORD_BOUNDARY_MARKER);
//! assert!(piece.starts_with(SUBWORD_BOUNDARY_MARKER));
//! assert_eq!(IDENT_TOKEN_CTOR, "IdentToken");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Grammar Compatible**: Constructor names match the bundled C grammar
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
