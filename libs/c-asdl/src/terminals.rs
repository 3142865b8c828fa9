//! # Terminal Mapping Tables
//!
//! Bidirectional tables between C lexical terminals (`"const"`, `"+="`,
//! `"long int"`) and grammar constructor names (`Const`, `AddAssign`,
//! `IntLiteral`), keyed by grammar type name.
//!
//! The reverse direction is the inverse of the forward table except for
//! `LITERAL_TYPE`, where several spellings collapse onto one constructor and
//! decoding yields one canonical spelling per constructor.
//!
//! ```rust
//! use c_asdl::terminals::{asdl_to_c, c_to_asdl};
//!
//! assert_eq!(c_to_asdl("LITERAL_TYPE", "long int").unwrap(), "IntLiteral");
//! assert_eq!(asdl_to_c("LITERAL_TYPE", "IntLiteral").unwrap(), "int");
//! ```

use crate::error::ConvertError;
use std::collections::HashMap;
use std::sync::LazyLock;

pub use c_ast::KEYWORDS;

/// A keyed group of `(native token, constructor)` pairs.
pub type TerminalTable = &'static [(&'static str, &'static str)];

/// Type name of the literal-kind group, the only non-invertible table.
pub const LITERAL_TYPE: &str = "LITERAL_TYPE";

/// Forward tables in declaration order.
pub const C_TO_ASDL_TERMINALS: &[(&str, TerminalTable)] = &[
    ("QUAL", &[("const", "Const"), ("volatile", "Volatile"), ("restrict", "Restrict")]),
    (
        "DIM_QUAL",
        &[
            ("const", "ConstDim"),
            ("volatile", "VolatileDim"),
            ("restrict", "RestrictDim"),
            ("static", "StaticDim"),
        ],
    ),
    (
        "STORAGE",
        &[
            ("extern", "Extern"),
            ("static", "Static"),
            ("register", "Register"),
            ("auto", "Auto"),
            ("typedef", "TypedefStorage"),
        ],
    ),
    ("FUNCSPEC", &[("inline", "Inline")]),
    ("REF_TYPE", &[("->", "Arrow"), (".", "Dot")]),
    (
        "ASSIGN_OPER",
        &[
            ("=", "NormalAssign"),
            ("+=", "AddAssign"),
            ("-=", "SubAssign"),
            ("*=", "MulAssign"),
            ("/=", "DivAssign"),
            ("%=", "ModAssign"),
            ("&=", "BitAndAssign"),
            ("|=", "BitOrAssign"),
            ("^=", "BitXorAssign"),
            ("<<=", "LShiftAssign"),
            (">>=", "RShiftAssign"),
        ],
    ),
    (
        "UNARY_OP",
        &[
            ("+", "UAdd"),
            ("-", "USub"),
            ("p++", "PreInc"),
            ("++", "PostInc"),
            ("p--", "PreDec"),
            ("--", "PostDec"),
            ("!", "Not"),
            ("~", "BitNot"),
            ("*", "Deref"),
            ("sizeof", "SizeOf"),
            ("&", "AddressOf"),
        ],
    ),
    (
        "BINARY_OP",
        &[
            ("=", "Assign"),
            ("+", "Add"),
            ("-", "Sub"),
            ("*", "Mul"),
            ("/", "Div"),
            ("%", "Mod"),
            ("==", "Eq"),
            ("!=", "NotEq"),
            ("<", "Lt"),
            ("<=", "LtE"),
            (">", "Gt"),
            (">=", "GtE"),
            ("&&", "And"),
            ("||", "Or"),
            ("&", "BitAnd"),
            ("|", "BitOr"),
            ("^", "BitXor"),
            ("<<", "LShift"),
            (">>", "RShift"),
        ],
    ),
    (
        LITERAL_TYPE,
        &[
            ("int", "IntLiteral"),
            ("long int", "IntLiteral"),
            ("long long int", "IntLiteral"),
            ("unsigned int", "IntLiteral"),
            ("unsigned long int", "IntLiteral"),
            ("unsigned long long int", "IntLiteral"),
            ("float", "FloatLiteral"),
            ("double", "FloatLiteral"),
            ("long double", "FloatLiteral"),
            ("char", "CharLiteral"),
            ("string", "StringLiteral"),
        ],
    ),
];

/// Canonical spelling for each literal-kind constructor.
pub const LITERAL_CANONICAL: TerminalTable = &[
    ("int", "IntLiteral"),
    ("double", "FloatLiteral"),
    ("char", "CharLiteral"),
    ("string", "StringLiteral"),
];

type Lookup = HashMap<&'static str, HashMap<&'static str, &'static str>>;

struct Tables {
    forward: Lookup,
    reverse: Lookup,
    operators: Vec<&'static str>,
}

static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    debug_assert!(table_problems().is_empty(), "{:?}", table_problems());

    let mut forward = Lookup::new();
    let mut reverse = Lookup::new();
    let mut operators = Vec::new();

    for &(type_name, table) in C_TO_ASDL_TERMINALS {
        forward.insert(type_name, table.iter().copied().collect());
        let inverse = if type_name == LITERAL_TYPE { LITERAL_CANONICAL } else { table };
        reverse.insert(type_name, inverse.iter().map(|&(tok, ctor)| (ctor, tok)).collect());

        for &(tok, _) in table {
            if !tok.starts_with(|c: char| c.is_alphabetic()) && !operators.contains(&tok) {
                operators.push(tok);
            }
        }
    }

    Tables {
        forward,
        reverse,
        operators,
    }
});

// =============================================================================
// PUBLIC API
// =============================================================================

/// Map a native terminal to its constructor name.
///
/// ## Errors
///
/// `ConvertError::UnknownTerminal` when the table for `type_name` has no
/// entry for `token`, or no such table exists.
pub fn c_to_asdl(type_name: &str, token: &str) -> Result<&'static str, ConvertError> {
    TABLES
        .forward
        .get(type_name)
        .and_then(|table| table.get(token))
        .copied()
        .ok_or_else(|| ConvertError::UnknownTerminal {
            type_name: type_name.to_string(),
            token: token.to_string(),
        })
}

/// Map a constructor name back to its native terminal.
///
/// ## Errors
///
/// `ConvertError::UnknownConstructor` when the reverse table for
/// `type_name` has no entry for `constructor`.
pub fn asdl_to_c(type_name: &str, constructor: &str) -> Result<&'static str, ConvertError> {
    TABLES
        .reverse
        .get(type_name)
        .and_then(|table| table.get(constructor))
        .copied()
        .ok_or_else(|| ConvertError::UnknownConstructor {
            type_name: type_name.to_string(),
            constructor: constructor.to_string(),
        })
}

/// Terminal type names in declaration order.
pub fn terminal_types() -> impl Iterator<Item = &'static str> {
    C_TO_ASDL_TERMINALS.iter().map(|&(type_name, _)| type_name)
}

/// Check whether `type_name` has a terminal table.
pub fn is_terminal_type(type_name: &str) -> bool {
    TABLES.forward.contains_key(type_name)
}

/// Forward table for a terminal type.
pub fn table(type_name: &str) -> Option<TerminalTable> {
    C_TO_ASDL_TERMINALS
        .iter()
        .find(|&&(name, _)| name == type_name)
        .map(|&(_, table)| table)
}

/// Table tokens that do not begin with a letter, deduplicated, in table order.
pub fn operators() -> &'static [&'static str] {
    &TABLES.operators
}

/// Describe every violation of the table invariants.
///
/// Tokens are unique within each group. Constructors are unique within each
/// group except `LITERAL_TYPE`, whose canonical spellings must map forward to
/// their constructor and cover every constructor.
fn table_problems() -> Vec<String> {
    let mut problems = Vec::new();

    for &(type_name, table) in C_TO_ASDL_TERMINALS {
        for (i, &(tok, ctor)) in table.iter().enumerate() {
            if table[..i].iter().any(|&(t, _)| t == tok) {
                problems.push(format!("{type_name}: duplicate token {tok:?}"));
            }
            if type_name != LITERAL_TYPE && table[..i].iter().any(|&(_, c)| c == ctor) {
                problems.push(format!("{type_name}: duplicate constructor {ctor}"));
            }
        }
    }

    if let Some(literals) = table(LITERAL_TYPE) {
        for &(tok, ctor) in LITERAL_CANONICAL {
            if !literals.contains(&(tok, ctor)) {
                problems.push(format!("{LITERAL_TYPE}: canonical {tok:?} does not map to {ctor}"));
            }
        }
        for &(_, ctor) in literals {
            if !LITERAL_CANONICAL.iter().any(|&(_, c)| c == ctor) {
                problems.push(format!("{LITERAL_TYPE}: no canonical spelling for {ctor}"));
            }
        }
    }

    problems
}

// =============================================================================
// TESTS
// =============================================================================
