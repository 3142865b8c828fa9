//! # Node Kind Registry
//!
//! Closed set of C node kinds. Each kind declares its attributes in order;
//! list-shaped attributes are written `["name"]` in the table below.

use std::fmt;

/// One declared attribute of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    /// Attribute name.
    pub name: &'static str,
    /// Whether the attribute holds a list of values.
    pub list: bool,
}

macro_rules! attr_spec {
    ([$name:literal]) => {
        AttrSpec {
            name: $name,
            list: true,
        }
    };
    ($name:literal) => {
        AttrSpec {
            name: $name,
            list: false,
        }
    };
}

macro_rules! node_kinds {
    ($( $variant:ident => [$($attr:tt),* $(,)?] ),* $(,)?) => {
        /// A C node kind.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $( $variant, )*
        }

        impl NodeKind {
            /// Every registered kind, in alphabetical order.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )* ];

            /// Node type name, as used for grammar constructors.
            pub fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$variant => stringify!($variant), )*
                }
            }

            /// Declared attributes in order.
            pub fn attrs(self) -> &'static [AttrSpec] {
                match self {
                    $( NodeKind::$variant => &[ $( attr_spec!($attr), )* ], )*
                }
            }
        }
    };
}

node_kinds! {
    ArrayDecl => ["type", "dim", ["dim_quals"]],
    ArrayRef => ["name", "subscript"],
    Assignment => ["op", "lvalue", "rvalue"],
    BinaryOp => ["op", "left", "right"],
    Break => [],
    Case => ["expr", ["stmts"]],
    Cast => ["to_type", "expr"],
    Compound => [["block_items"]],
    CompoundLiteral => ["type", "init"],
    Constant => ["type", "value"],
    Continue => [],
    Decl => ["name", ["quals"], ["storage"], ["funcspec"], "type", "init", "bitsize"],
    DeclList => [["decls"]],
    Default => [["stmts"]],
    DoWhile => ["cond", "stmt"],
    EllipsisParam => [],
    EmptyStatement => [],
    Enum => ["name", "values"],
    Enumerator => ["name", "value"],
    EnumeratorList => [["enumerators"]],
    ExprList => [["exprs"]],
    FileAST => [["ext"]],
    For => ["init", "cond", "next", "stmt"],
    FuncCall => ["name", "args"],
    FuncDecl => ["args", "type"],
    FuncDef => ["decl", ["param_decls"], "body"],
    Goto => ["name"],
    ID => ["name"],
    IdentifierType => [["names"]],
    If => ["cond", "iftrue", "iffalse"],
    InitList => [["exprs"]],
    Label => ["name", "stmt"],
    NamedInitializer => [["name"], "expr"],
    ParamList => [["params"]],
    Pragma => ["string"],
    PtrDecl => [["quals"], "type"],
    Return => ["expr"],
    StaticAssert => ["cond", "message"],
    Struct => ["name", ["decls"]],
    StructRef => ["name", "type", "field"],
    Switch => ["cond", "stmt"],
    TernaryOp => ["cond", "iftrue", "iffalse"],
    TypeDecl => ["declname", ["quals"], "type"],
    Typedef => ["name", ["quals"], ["storage"], "type"],
    Typename => ["name", ["quals"], "type"],
    UnaryOp => ["op", "expr"],
    Union => ["name", ["decls"]],
    While => ["cond", "stmt"],
}

impl NodeKind {
    /// Look up a kind by its type name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Declared attribute names in order.
    pub fn attr_names(self) -> impl Iterator<Item = &'static str> {
        self.attrs().iter().map(|spec| spec.name)
    }

    /// Position of an attribute in the declared order.
    pub fn attr_index(self, name: &str) -> Option<usize> {
        self.attrs().iter().position(|spec| spec.name == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
