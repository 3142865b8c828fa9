//! # Bundled C Grammar
//!
//! The ASDL grammar of C shipped with this crate, and a check that a grammar
//! agrees with the native node registry and the terminal tables.

use crate::error::ConvertError;
use crate::terminals;
use asdl::{AsdlParseError, Grammar};
use c_ast::NodeKind;
use config::constants::{IDENT_TYPE, STR_TYPE};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// ASDL text of the bundled C grammar.
pub const C_ASDL: &str = include_str!("c.asdl");

static C_GRAMMAR: LazyLock<Result<Arc<Grammar>, AsdlParseError>> = LazyLock::new(|| {
    let grammar = Grammar::from_text(C_ASDL)?;
    debug!(id = %grammar.id(), productions = grammar.productions().len(), "loaded bundled C grammar");
    Ok(Arc::new(grammar))
});

/// The bundled C grammar.
///
/// Loaded once; every call returns the same `Arc`, so converters cached for
/// it are shared.
pub fn c_grammar() -> Result<Arc<Grammar>, AsdlParseError> {
    C_GRAMMAR.clone()
}

/// Check that `grammar` can be converted to and from native C nodes.
///
/// Every production of a composite type must name a native node kind with
/// the same attributes in the same order, list attributes matching
/// `multiple` fields. Every production of a terminal type must have no
/// fields and an entry in the reverse terminal table.
pub fn verify_registry(grammar: &Grammar) -> Result<(), ConvertError> {
    for production in grammar.productions() {
        let type_name = production.type_name.as_str();
        let name = production.name();

        if type_name == IDENT_TYPE || type_name == STR_TYPE {
            continue;
        }

        if terminals::is_terminal_type(type_name) {
            if !production.fields().is_empty() {
                return Err(mismatch(name, "terminal constructors take no fields".to_string()));
            }
            terminals::asdl_to_c(type_name, name)?;
            continue;
        }

        let kind = NodeKind::from_name(name).ok_or_else(|| ConvertError::UnknownProduction(name.to_string()))?;
        let specs = kind.attrs();
        if specs.len() != production.fields().len() {
            return Err(mismatch(
                name,
                format!("{} fields but {} native attributes", production.fields().len(), specs.len()),
            ));
        }
        for (field, spec) in production.fields().iter().zip(specs) {
            if field.name != spec.name {
                return Err(mismatch(name, format!("field {} where attribute {} is declared", field.name, spec.name)));
            }
            let multiple = field.cardinality == asdl::Cardinality::Multiple;
            if multiple != spec.list {
                return Err(mismatch(name, format!("field {} is {}", field.name, field.cardinality)));
            }
        }
    }
    Ok(())
}

fn mismatch(constructor: &str, reason: String) -> ConvertError {
    ConvertError::RegistryMismatch {
        constructor: constructor.to_string(),
        reason,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_grammar_loads() {
        let grammar = c_grammar().unwrap();
        assert_eq!(grammar.root_type(), "EXPR");
        assert!(grammar.is_primitive("TOKEN"));
        assert_eq!(grammar.productions_of("EXPR").unwrap().len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_bundled_grammar_is_shared() {
        let a = c_grammar().unwrap();
        let b = c_grammar().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_bundled_grammar_matches_registry() {
        verify_registry(&c_grammar().unwrap()).unwrap();
    }

    #[test]
    fn test_every_node_kind_has_a_production() {
        let grammar = c_grammar().unwrap();
        for kind in NodeKind::ALL {
            let production = grammar.get_prod_by_ctr_name(kind.name()).unwrap();
            assert_eq!(production.type_name, "EXPR");
        }
    }

    #[test]
    fn test_every_terminal_has_a_production() {
        let grammar = c_grammar().unwrap();
        for type_name in terminals::terminal_types() {
            let table = terminals::table(type_name).unwrap();
            for &(_, ctor) in table {
                assert_eq!(grammar.get_prod_by_ctr_name(ctor).unwrap().type_name, type_name);
            }
        }
    }

    #[test]
    fn test_registry_mismatch_detected() {
        let grammar = Grammar::from_text("EXPR = ID(IDENT other)\nIDENT = IdentToken(TOKEN token)\nprimitive TOKEN").unwrap();
        assert!(matches!(
            verify_registry(&grammar),
            Err(ConvertError::RegistryMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_native_kind_detected() {
        let grammar = Grammar::from_text("EXPR = Lambda").unwrap();
        assert_eq!(
            verify_registry(&grammar),
            Err(ConvertError::UnknownProduction("Lambda".to_string()))
        );
    }
}
