//! Shared C programs for integration tests.

#![allow(dead_code)]

use c_ast::{Attr, CNode, NodeKind};

pub fn node(kind: NodeKind, attrs: Vec<(&str, Attr)>) -> CNode {
    let mut node = CNode::new(kind);
    for (name, value) in attrs {
        node.set(name, value).unwrap();
    }
    node
}

pub fn list(nodes: Vec<CNode>) -> Attr {
    nodes.into_iter().collect()
}

pub fn texts(words: &[&str]) -> Attr {
    words.iter().copied().collect()
}

pub fn int() -> CNode {
    CNode::identifier_type(["int"])
}

pub fn typename(ty: CNode) -> CNode {
    node(
        NodeKind::Typename,
        vec![("type", CNode::type_decl(None::<&str>, &[], ty).into())],
    )
}

/// `int name;` style declaration.
pub fn var(name: &str, ty: CNode, init: Option<CNode>) -> CNode {
    CNode::decl(Some(name), CNode::type_decl(Some(name), &[], ty), init)
}

pub fn int_const(value: &str) -> CNode {
    CNode::constant("int", value)
}

/// A translation unit touching every native node kind.
///
/// ```c
/// #pragma once
/// typedef unsigned int uint;
/// enum color { RED, GREEN = 2 };
/// struct point { int x; int y; };
/// union num { int i; float f; };
/// _Static_assert(sizeof(int) == 4, "int");
/// extern inline int f(int n, ...);
/// int g(a) int a; { return a; }
/// void h(int table[static const 4]);
/// int main(void) {
///     struct point *p = &(struct point){ .x = 1, 2 };
///     for (int i = 0; i < 10; i++) { if (i % 2) continue; else break; }
///     while (i) i -= 1;
///     do ; while (0);
///     switch (i) { case 1: goto done; default: break; }
/// done:
///     p->x = i ? (int) 1.5 : ~i, i;
///     return f(p[0].y, "s");
/// }
/// ```
pub fn program() -> CNode {
    let pragma = node(NodeKind::Pragma, vec![("string", "once".into())]);

    let typedef = node(
        NodeKind::Typedef,
        vec![
            ("name", "uint".into()),
            ("storage", texts(&["typedef"])),
            (
                "type",
                CNode::type_decl(Some("uint"), &[], CNode::identifier_type(["unsigned", "int"])).into(),
            ),
        ],
    );

    let color = node(
        NodeKind::Enum,
        vec![
            ("name", "color".into()),
            (
                "values",
                node(
                    NodeKind::EnumeratorList,
                    vec![(
                        "enumerators",
                        list(vec![
                            node(NodeKind::Enumerator, vec![("name", "RED".into())]),
                            node(
                                NodeKind::Enumerator,
                                vec![("name", "GREEN".into()), ("value", int_const("2").into())],
                            ),
                        ]),
                    )],
                )
                .into(),
            ),
        ],
    );
    let color_decl = CNode::decl(None::<&str>, color, None);

    let point = node(
        NodeKind::Struct,
        vec![
            ("name", "point".into()),
            ("decls", list(vec![var("x", int(), None), var("y", int(), None)])),
        ],
    );
    let point_decl = CNode::decl(None::<&str>, point, None);

    let num = node(
        NodeKind::Union,
        vec![
            ("name", "num".into()),
            (
                "decls",
                list(vec![var("i", int(), None), var("f", CNode::identifier_type(["float"]), None)]),
            ),
        ],
    );
    let num_decl = CNode::decl(None::<&str>, num, None);

    let static_assert = node(
        NodeKind::StaticAssert,
        vec![
            (
                "cond",
                CNode::binary_op("==", CNode::unary_op("sizeof", typename(int())), int_const("4")).into(),
            ),
            ("message", CNode::constant("string", "\"int\"").into()),
        ],
    );

    let f_decl = node(
        NodeKind::Decl,
        vec![
            ("name", "f".into()),
            ("storage", texts(&["extern"])),
            ("funcspec", texts(&["inline"])),
            (
                "type",
                node(
                    NodeKind::FuncDecl,
                    vec![
                        (
                            "args",
                            node(
                                NodeKind::ParamList,
                                vec![(
                                    "params",
                                    list(vec![var("n", int(), None), CNode::new(NodeKind::EllipsisParam)]),
                                )],
                            )
                            .into(),
                        ),
                        ("type", CNode::type_decl(Some("f"), &[], int()).into()),
                    ],
                )
                .into(),
            ),
        ],
    );

    let g_def = node(
        NodeKind::FuncDef,
        vec![
            (
                "decl",
                CNode::decl(
                    Some("g"),
                    node(
                        NodeKind::FuncDecl,
                        vec![
                            (
                                "args",
                                node(NodeKind::ParamList, vec![("params", list(vec![CNode::id("a")]))]).into(),
                            ),
                            ("type", CNode::type_decl(Some("g"), &[], int()).into()),
                        ],
                    ),
                    None,
                )
                .into(),
            ),
            ("param_decls", list(vec![var("a", int(), None)])),
            ("body", CNode::compound(vec![CNode::ret(Some(CNode::id("a")))]).into()),
        ],
    );

    let h_param = CNode::decl(
        Some("table"),
        node(
            NodeKind::ArrayDecl,
            vec![
                ("type", CNode::type_decl(Some("table"), &[], int()).into()),
                ("dim", int_const("4").into()),
                ("dim_quals", texts(&["static", "const"])),
            ],
        ),
        None,
    );
    let h_decl = CNode::decl(
        Some("h"),
        node(
            NodeKind::FuncDecl,
            vec![
                ("args", node(NodeKind::ParamList, vec![("params", list(vec![h_param]))]).into()),
                (
                    "type",
                    CNode::type_decl(Some("h"), &[], CNode::identifier_type(["void"])).into(),
                ),
            ],
        ),
        None,
    );

    let point_type = || node(NodeKind::Struct, vec![("name", "point".into())]);
    let p_decl = CNode::decl(
        Some("p"),
        node(
            NodeKind::PtrDecl,
            vec![("type", CNode::type_decl(Some("p"), &[], point_type()).into())],
        ),
        Some(CNode::unary_op(
            "&",
            node(
                NodeKind::CompoundLiteral,
                vec![
                    ("type", typename(point_type()).into()),
                    (
                        "init",
                        node(
                            NodeKind::InitList,
                            vec![(
                                "exprs",
                                list(vec![
                                    node(
                                        NodeKind::NamedInitializer,
                                        vec![("name", list(vec![CNode::id("x")])), ("expr", int_const("1").into())],
                                    ),
                                    int_const("2"),
                                ]),
                            )],
                        )
                        .into(),
                    ),
                ],
            ),
        )),
    );

    let for_loop = node(
        NodeKind::For,
        vec![
            (
                "init",
                node(NodeKind::DeclList, vec![("decls", list(vec![var("i", int(), Some(int_const("0")))]))]).into(),
            ),
            ("cond", CNode::binary_op("<", CNode::id("i"), int_const("10")).into()),
            ("next", CNode::unary_op("p++", CNode::id("i")).into()),
            (
                "stmt",
                CNode::compound(vec![node(
                    NodeKind::If,
                    vec![
                        ("cond", CNode::binary_op("%", CNode::id("i"), int_const("2")).into()),
                        ("iftrue", CNode::new(NodeKind::Continue).into()),
                        ("iffalse", CNode::new(NodeKind::Break).into()),
                    ],
                )])
                .into(),
            ),
        ],
    );

    let while_loop = node(
        NodeKind::While,
        vec![
            ("cond", CNode::id("i").into()),
            ("stmt", CNode::assignment("-=", CNode::id("i"), int_const("1")).into()),
        ],
    );

    let do_while = node(
        NodeKind::DoWhile,
        vec![
            ("cond", int_const("0").into()),
            ("stmt", CNode::new(NodeKind::EmptyStatement).into()),
        ],
    );

    let switch = node(
        NodeKind::Switch,
        vec![
            ("cond", CNode::id("i").into()),
            (
                "stmt",
                CNode::compound(vec![
                    node(
                        NodeKind::Case,
                        vec![
                            ("expr", int_const("1").into()),
                            ("stmts", list(vec![node(NodeKind::Goto, vec![("name", "done".into())])])),
                        ],
                    ),
                    node(NodeKind::Default, vec![("stmts", list(vec![CNode::new(NodeKind::Break)]))]),
                ])
                .into(),
            ),
        ],
    );

    let label = node(
        NodeKind::Label,
        vec![
            ("name", "done".into()),
            (
                "stmt",
                CNode::expr_list(vec![
                    CNode::assignment(
                        "=",
                        node(
                            NodeKind::StructRef,
                            vec![
                                ("name", CNode::id("p").into()),
                                ("type", "->".into()),
                                ("field", CNode::id("x").into()),
                            ],
                        ),
                        node(
                            NodeKind::TernaryOp,
                            vec![
                                ("cond", CNode::id("i").into()),
                                (
                                    "iftrue",
                                    node(
                                        NodeKind::Cast,
                                        vec![
                                            ("to_type", typename(int()).into()),
                                            ("expr", CNode::constant("double", "1.5").into()),
                                        ],
                                    )
                                    .into(),
                                ),
                                ("iffalse", CNode::unary_op("~", CNode::id("i")).into()),
                            ],
                        ),
                    ),
                    CNode::id("i"),
                ])
                .into(),
            ),
        ],
    );

    let ret = CNode::ret(Some(CNode::func_call(
        CNode::id("f"),
        Some(CNode::expr_list(vec![
            node(
                NodeKind::StructRef,
                vec![
                    (
                        "name",
                        node(
                            NodeKind::ArrayRef,
                            vec![("name", CNode::id("p").into()), ("subscript", int_const("0").into())],
                        )
                        .into(),
                    ),
                    ("type", ".".into()),
                    ("field", CNode::id("y").into()),
                ],
            ),
            CNode::constant("string", "\"s\""),
        ])),
    )));

    let main_def = node(
        NodeKind::FuncDef,
        vec![
            (
                "decl",
                CNode::decl(
                    Some("main"),
                    node(
                        NodeKind::FuncDecl,
                        vec![
                            (
                                "args",
                                node(
                                    NodeKind::ParamList,
                                    vec![("params", list(vec![typename(CNode::identifier_type(["void"]))]))],
                                )
                                .into(),
                            ),
                            ("type", CNode::type_decl(Some("main"), &[], int()).into()),
                        ],
                    ),
                    None,
                )
                .into(),
            ),
            (
                "body",
                CNode::compound(vec![p_decl, for_loop, while_loop, do_while, switch, label, ret]).into(),
            ),
        ],
    );

    CNode::file(vec![
        pragma,
        typedef,
        color_decl,
        point_decl,
        num_decl,
        static_assert,
        f_decl,
        g_def,
        h_decl,
        main_def,
    ])
}

/// `const volatile int x = a + 1;` with qualifiers on the declaration and
/// the type.
pub fn qualified_decl() -> CNode {
    node(
        NodeKind::Decl,
        vec![
            ("name", "x".into()),
            ("quals", texts(&["const", "volatile"])),
            ("storage", texts(&["static", "register"])),
            (
                "type",
                node(
                    NodeKind::TypeDecl,
                    vec![
                        ("declname", "x".into()),
                        ("quals", texts(&["const", "volatile"])),
                        ("type", int().into()),
                    ],
                )
                .into(),
            ),
            ("init", CNode::binary_op("+", CNode::id("a"), int_const("1")).into()),
        ],
    )
}

/// A right-nested chain `a + (a + (a + ...))` of `depth` operators.
pub fn deep_chain(depth: usize) -> CNode {
    let mut expr = CNode::id("a");
    for _ in 0..depth {
        expr = CNode::binary_op("+", CNode::id("a"), expr);
    }
    expr
}
