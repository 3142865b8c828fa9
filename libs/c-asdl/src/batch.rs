//! # Batch Conversion
//!
//! Converts many independent trees in parallel with `rayon`. Each item is
//! converted atomically; `BatchPolicy` decides what a failing item does to
//! the batch.

use crate::converter::AstConverter;
use crate::error::ConvertError;
use asdl::AsdlTree;
use c_ast::CNode;
use rayon::prelude::*;
use tracing::warn;

/// What to do when one item of a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Fail the batch with the first error in input order.
    #[default]
    Abort,
    /// Log the failure and yield `None` for that item.
    Skip,
}

/// Encode every node, preserving input order.
pub fn encode_batch(
    converter: &AstConverter,
    nodes: &[CNode],
    policy: BatchPolicy,
) -> Result<Vec<Option<AsdlTree>>, ConvertError> {
    let results: Vec<_> = nodes.par_iter().map(|node| converter.c_ast_to_asdl_ast(node)).collect();
    settle(results, policy)
}

/// Decode every tree, preserving input order.
pub fn decode_batch(
    converter: &AstConverter,
    trees: &[AsdlTree],
    policy: BatchPolicy,
) -> Result<Vec<Option<CNode>>, ConvertError> {
    let results: Vec<_> = trees.par_iter().map(|tree| converter.asdl_ast_to_c_ast(tree)).collect();
    settle(results, policy)
}

fn settle<T>(results: Vec<Result<T, ConvertError>>, policy: BatchPolicy) -> Result<Vec<Option<T>>, ConvertError> {
    match policy {
        BatchPolicy::Abort => results.into_iter().map(|r| r.map(Some)).collect(),
        BatchPolicy::Skip => Ok(results
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(index, error = %err, "skipping item that failed to convert");
                    None
                }
            })
            .collect()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::c_grammar;

    fn nodes() -> Vec<CNode> {
        vec![
            CNode::id("a"),
            CNode::binary_op("<=>", CNode::id("a"), CNode::id("b")),
            CNode::constant("int", "3"),
            CNode::unary_op("++++", CNode::id("c")),
        ]
    }

    #[test]
    fn test_abort_returns_first_error() {
        let converter = AstConverter::new(c_grammar().unwrap()).unwrap();
        let err = encode_batch(&converter, &nodes(), BatchPolicy::Abort).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownTerminal { ref token, .. } if token == "<=>"));
    }

    #[test]
    fn test_skip_keeps_positions() {
        let converter = AstConverter::new(c_grammar().unwrap()).unwrap();
        let trees = encode_batch(&converter, &nodes(), BatchPolicy::Skip).unwrap();
        assert_eq!(trees.len(), 4);
        assert!(trees[0].is_some() && trees[2].is_some());
        assert!(trees[1].is_none() && trees[3].is_none());
    }

    #[test]
    fn test_decode_batch_round_trip() {
        let converter = AstConverter::new(c_grammar().unwrap()).unwrap();
        let input = vec![CNode::id("x"), CNode::ret(Some(CNode::constant("char", "'c'")))];
        let trees: Vec<AsdlTree> = encode_batch(&converter, &input, BatchPolicy::Abort)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let decoded = decode_batch(&converter, &trees, BatchPolicy::default()).unwrap();
        assert_eq!(decoded, input.into_iter().map(Some).collect::<Vec<_>>());
    }
}
