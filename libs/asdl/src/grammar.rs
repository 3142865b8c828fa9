//! # Grammar
//!
//! Productions, field specifications and the `Grammar` that owns them.
//!
//! A grammar is a list of sum types, each a list of constructors, plus a set
//! of primitive leaf types. Every constructor becomes one `Production`;
//! constructor names are unique across the whole grammar, so a production is
//! looked up by constructor name alone.
//!
//! ## Example
//!
//! ```rust
//! use asdl::{Cardinality, Grammar};
//!
//! let grammar = Grammar::from_text("primitive TOKEN\nIDENT = IdentToken(TOKEN token)").unwrap();
//! let production = grammar.get_prod_by_ctr_name("IdentToken").unwrap();
//! assert_eq!(production.type_name, "IDENT");
//! assert_eq!(production.fields()[0].cardinality, Cardinality::Single);
//! ```

use crate::error::{AsdlParseError, GrammarError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// =============================================================================
// CARDINALITY
// =============================================================================

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one value.
    Single,
    /// Zero or one value (`TYPE? name`).
    Optional,
    /// Zero or more ordered values (`TYPE* name`).
    Multiple,
}

impl Cardinality {
    /// Lower-case name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::Single => "single",
            Cardinality::Optional => "optional",
            Cardinality::Multiple => "multiple",
        }
    }

    /// Suffix written after the type name in ASDL text.
    pub fn suffix(self) -> &'static str {
        match self {
            Cardinality::Single => "",
            Cardinality::Optional => "?",
            Cardinality::Multiple => "*",
        }
    }

    /// Check whether `count` values satisfy this cardinality.
    pub fn admits(self, count: usize) -> bool {
        match self {
            Cardinality::Single => count == 1,
            Cardinality::Optional => count <= 1,
            Cardinality::Multiple => true,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FIELD / CONSTRUCTOR / PRODUCTION
// =============================================================================

/// A field specification: name, declared type and cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its constructor.
    pub name: String,
    /// Declared type name (a sum type or a primitive).
    pub type_name: String,
    /// How many values the field holds.
    pub cardinality: Cardinality,
}

impl Field {
    /// Create a field specification.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            cardinality,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.type_name, self.cardinality.suffix(), self.name)
    }
}

/// A named constructor with its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    /// Constructor name, unique across the grammar.
    pub name: String,
    /// Fields in declared order.
    pub fields: Vec<Field>,
}

impl Constructor {
    /// Create a constructor.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.fields.is_empty() {
            f.write_str("(")?;
            for (i, field) in self.fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", field)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A grammar rule: a constructor together with the sum type it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    /// Name of the sum type this constructor belongs to.
    pub type_name: String,
    /// The constructor itself.
    pub constructor: Constructor,
}

impl Production {
    /// Constructor name.
    pub fn name(&self) -> &str {
        &self.constructor.name
    }

    /// Field specifications in declared order.
    pub fn fields(&self) -> &[Field] {
        &self.constructor.fields
    }
}

/// A sum type as written in ASDL text, before it is indexed into a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumType {
    /// Type name.
    pub name: String,
    /// Alternatives in declared order.
    pub constructors: Vec<Constructor>,
}

// =============================================================================
// GRAMMAR
// =============================================================================

static NEXT_GRAMMAR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loaded grammar.
///
/// Clones of a grammar share its identity; two separately loaded grammars
/// never do, even when their text is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrammarId(u64);

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grammar#{}", self.0)
    }
}

/// An indexed, immutable ASDL grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    id: GrammarId,
    primitives: Vec<String>,
    sum_types: Vec<String>,
    productions: Vec<Arc<Production>>,
    by_constructor: HashMap<String, usize>,
    by_type: HashMap<String, Vec<usize>>,
}

impl Grammar {
    /// Build a grammar from primitive type names and sum types.
    ///
    /// ## Errors
    ///
    /// Fails when no sum type is given, when a type or constructor name is
    /// repeated, when a constructor repeats a field name, or when a field
    /// refers to a type that is neither a primitive nor a sum type.
    pub fn new(primitives: Vec<String>, sums: Vec<SumType>) -> Result<Self, GrammarError> {
        if sums.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut declared: HashSet<String> = HashSet::new();
        for name in primitives.iter().chain(sums.iter().map(|s| &s.name)) {
            if !declared.insert(name.clone()) {
                return Err(GrammarError::DuplicateType(name.clone()));
            }
        }

        let mut productions = Vec::new();
        let mut by_constructor = HashMap::new();
        let mut by_type: HashMap<String, Vec<usize>> = HashMap::new();
        let mut sum_types = Vec::with_capacity(sums.len());

        for sum in sums {
            let indices = by_type.entry(sum.name.clone()).or_default();
            for constructor in sum.constructors {
                let mut seen = HashSet::new();
                for field in &constructor.fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(GrammarError::DuplicateField {
                            constructor: constructor.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    if !declared.contains(field.type_name.as_str()) {
                        return Err(GrammarError::UndeclaredType {
                            constructor: constructor.name.clone(),
                            field: field.name.clone(),
                            type_name: field.type_name.clone(),
                        });
                    }
                }
                if by_constructor.contains_key(&constructor.name) {
                    return Err(GrammarError::DuplicateConstructor(constructor.name));
                }
                let index = productions.len();
                by_constructor.insert(constructor.name.clone(), index);
                indices.push(index);
                productions.push(Arc::new(Production {
                    type_name: sum.name.clone(),
                    constructor,
                }));
            }
            sum_types.push(sum.name);
        }

        Ok(Self {
            id: GrammarId(NEXT_GRAMMAR_ID.fetch_add(1, Ordering::Relaxed)),
            primitives,
            sum_types,
            productions,
            by_constructor,
            by_type,
        })
    }

    /// Load a grammar from ASDL text.
    ///
    /// ## Example
    ///
    /// ```rust
    /// let grammar = asdl::Grammar::from_text("STMT = Pass | Break").unwrap();
    /// assert_eq!(grammar.productions().len(), 2);
    /// ```
    pub fn from_text(text: &str) -> Result<Self, AsdlParseError> {
        crate::parser::parse_grammar(text)
    }

    /// Identity of this grammar.
    pub fn id(&self) -> GrammarId {
        self.id
    }

    /// The first declared sum type.
    pub fn root_type(&self) -> &str {
        // `new` rejects grammars without a sum type.
        self.sum_types.first().map(String::as_str).unwrap_or_default()
    }

    /// Sum type names in declared order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.sum_types.iter().map(String::as_str)
    }

    /// Primitive type names in declared order.
    pub fn primitive_types(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().map(String::as_str)
    }

    /// Check whether `type_name` is a primitive type.
    pub fn is_primitive(&self, type_name: &str) -> bool {
        self.primitives.iter().any(|p| p == type_name)
    }

    /// Check whether `type_name` is a sum type.
    pub fn is_sum_type(&self, type_name: &str) -> bool {
        self.by_type.contains_key(type_name)
    }

    /// All productions in declared order.
    pub fn productions(&self) -> &[Arc<Production>] {
        &self.productions
    }

    /// Look up a production by constructor name.
    ///
    /// ## Errors
    ///
    /// `GrammarError::UnknownConstructor` when no production has that name.
    pub fn get_prod_by_ctr_name(&self, name: &str) -> Result<&Arc<Production>, GrammarError> {
        self.by_constructor
            .get(name)
            .map(|&index| &self.productions[index])
            .ok_or_else(|| GrammarError::UnknownConstructor(name.to_string()))
    }

    /// Productions of one sum type, in declared order.
    ///
    /// ## Errors
    ///
    /// `GrammarError::UnknownType` when `type_name` is not a sum type.
    pub fn productions_of(&self, type_name: &str) -> Result<Vec<&Arc<Production>>, GrammarError> {
        self.by_type
            .get(type_name)
            .map(|indices| indices.iter().map(|&i| &self.productions[i]).collect())
            .ok_or_else(|| GrammarError::UnknownType(type_name.to_string()))
    }
}

/// Renders the grammar back to ASDL text that `Grammar::from_text` accepts.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.primitives.is_empty() {
            writeln!(f, "primitive {}", self.primitives.join(", "))?;
        }
        for type_name in &self.sum_types {
            write!(f, "{} =", type_name)?;
            let indices = self.by_type.get(type_name).map(Vec::as_slice).unwrap_or_default();
            for (i, &index) in indices.iter().enumerate() {
                let sep = if i == 0 { " " } else { "\n    | " };
                write!(f, "{}{}", sep, self.productions[index].constructor)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(name: &str, constructors: Vec<Constructor>) -> SumType {
        SumType {
            name: name.to_string(),
            constructors,
        }
    }

    fn ident_sum() -> SumType {
        sum(
            "IDENT",
            vec![Constructor::new("IdentToken", vec![Field::new("token", "TOKEN", Cardinality::Single)])],
        )
    }

    #[test]
    fn test_lookup_by_constructor() {
        let grammar = Grammar::new(vec!["TOKEN".to_string()], vec![ident_sum()]).unwrap();
        let production = grammar.get_prod_by_ctr_name("IdentToken").unwrap();
        assert_eq!(production.name(), "IdentToken");
        assert_eq!(production.type_name, "IDENT");
        assert_eq!(grammar.root_type(), "IDENT");
    }

    #[test]
    fn test_unknown_constructor() {
        let grammar = Grammar::new(vec!["TOKEN".to_string()], vec![ident_sum()]).unwrap();
        assert_eq!(
            grammar.get_prod_by_ctr_name("Nope").unwrap_err(),
            GrammarError::UnknownConstructor("Nope".to_string())
        );
    }

    #[test]
    fn test_undeclared_field_type() {
        let err = Grammar::new(Vec::new(), vec![ident_sum()]).unwrap_err();
        assert!(matches!(err, GrammarError::UndeclaredType { ref type_name, .. } if type_name == "TOKEN"));
    }

    #[test]
    fn test_duplicate_constructor_across_types() {
        let a = sum("A", vec![Constructor::new("Same", Vec::new())]);
        let b = sum("B", vec![Constructor::new("Same", Vec::new())]);
        let err = Grammar::new(Vec::new(), vec![a, b]).unwrap_err();
        assert_eq!(err, GrammarError::DuplicateConstructor("Same".to_string()));
    }

    #[test]
    fn test_duplicate_type() {
        let a = sum("A", vec![Constructor::new("X", Vec::new())]);
        let err = Grammar::new(vec!["A".to_string()], vec![a]).unwrap_err();
        assert_eq!(err, GrammarError::DuplicateType("A".to_string()));
    }

    #[test]
    fn test_duplicate_field() {
        let fields = vec![
            Field::new("x", "A", Cardinality::Single),
            Field::new("x", "A", Cardinality::Optional),
        ];
        let a = sum("A", vec![Constructor::new("Pair", fields)]);
        let err = Grammar::new(Vec::new(), vec![a]).unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateField { .. }));
    }

    #[test]
    fn test_empty_grammar() {
        assert_eq!(Grammar::new(Vec::new(), Vec::new()).unwrap_err(), GrammarError::EmptyGrammar);
    }

    #[test]
    fn test_ids_are_unique_and_shared_by_clones() {
        let g1 = Grammar::new(vec!["TOKEN".to_string()], vec![ident_sum()]).unwrap();
        let g2 = Grammar::new(vec!["TOKEN".to_string()], vec![ident_sum()]).unwrap();
        assert_ne!(g1.id(), g2.id());
        assert_eq!(g1.clone().id(), g1.id());
    }

    #[test]
    fn test_productions_of() {
        let a = sum("A", vec![Constructor::new("X", Vec::new()), Constructor::new("Y", Vec::new())]);
        let grammar = Grammar::new(Vec::new(), vec![a]).unwrap();
        let names: Vec<_> = grammar.productions_of("A").unwrap().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["X", "Y"]);
        assert!(grammar.productions_of("B").is_err());
    }

    #[test]
    fn test_cardinality_admits() {
        assert!(Cardinality::Single.admits(1));
        assert!(!Cardinality::Single.admits(0));
        assert!(Cardinality::Optional.admits(0));
        assert!(!Cardinality::Optional.admits(2));
        assert!(Cardinality::Multiple.admits(5));
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new("ext", "EXPR", Cardinality::Multiple).to_string(), "EXPR* ext");
        assert_eq!(Field::new("init", "EXPR", Cardinality::Optional).to_string(), "EXPR? init");
    }
}
