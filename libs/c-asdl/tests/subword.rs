//! Subword leaf encoding through the converter.

mod common;

use c_asdl::{c_grammar, spm_decode, AstConverter, SubwordModel};
use c_ast::CNode;
use common::program;
use std::sync::Arc;

/// Toy segmenter: splits words on spaces, then into three-character pieces.
struct ChunkModel;

impl SubwordModel for ChunkModel {
    fn encode_as_pieces(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        for word in text.split(' ') {
            let chars: Vec<char> = word.chars().collect();
            if chars.is_empty() {
                pieces.push("\u{2581}".to_string());
                continue;
            }
            for (i, chunk) in chars.chunks(3).enumerate() {
                let chunk: String = chunk.iter().collect();
                pieces.push(if i == 0 { format!("\u{2581}{chunk}") } else { chunk });
            }
        }
        pieces
    }
}

fn converter() -> AstConverter {
    AstConverter::with_subword_model(c_grammar().unwrap(), Arc::new(ChunkModel)).unwrap()
}

#[test]
fn test_identifiers_become_subword_leaves() {
    let tree = converter().c_ast_to_asdl_ast(&CNode::id("counter")).unwrap();
    assert_eq!(
        tree.to_string(),
        "(ID (name (IdentSubword (pieces \"\u{2581}cou\" \"nte\" \"r\"))))"
    );
}

#[test]
fn test_strings_become_subword_leaves() {
    let tree = converter()
        .c_ast_to_asdl_ast(&CNode::constant("string", "\"hi there\""))
        .unwrap();
    let value = tree.field("value").unwrap().value().and_then(|v| v.as_tree()).unwrap();
    assert_eq!(value.constructor_name(), "StrSubword");
    assert_eq!(value.fields()[0].len(), 3);
}

#[test]
fn test_program_round_trip_with_subwords() {
    let converter = converter();
    let tree = converter.c_ast_to_asdl_ast(&program()).unwrap();
    assert_eq!(converter.asdl_ast_to_c_ast(&tree).unwrap(), program());
}

#[test]
fn test_multi_word_values_round_trip() {
    let converter = converter();
    for text in ["a", "hello world", "\"a longer string literal\"", "x_y_z_w"] {
        let node = CNode::constant("string", text);
        let tree = converter.c_ast_to_asdl_ast(&node).unwrap();
        assert_eq!(converter.asdl_ast_to_c_ast(&tree).unwrap(), node, "{text}");
    }
}

#[test]
fn test_double_space_survives() {
    let converter = converter();
    let tree = converter.c_ast_to_asdl_ast(&CNode::id("a  b")).unwrap();
    assert_eq!(converter.asdl_ast_to_c_ast(&tree).unwrap(), CNode::id("a  b"));

    let words = spm_decode(&ChunkModel.encode_as_pieces("a  b"));
    assert_eq!(words, ["a", "", "b"]);
}

#[test]
fn test_raw_and_subword_trees_decode_alike() {
    let raw = AstConverter::new(c_grammar().unwrap()).unwrap();
    let sub = converter();
    let node = CNode::binary_op("+", CNode::id("total"), CNode::id("delta"));

    let from_raw = raw.c_ast_to_asdl_ast(&node).unwrap();
    let from_sub = sub.c_ast_to_asdl_ast(&node).unwrap();
    assert_ne!(from_raw, from_sub);

    // Either converter decodes either leaf form.
    assert_eq!(raw.asdl_ast_to_c_ast(&from_sub).unwrap(), node);
    assert_eq!(sub.asdl_ast_to_c_ast(&from_raw).unwrap(), node);
}
