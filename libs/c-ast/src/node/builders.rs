//! Typed constructors for common C nodes.

use super::{Attr, CNode};
use crate::kind::NodeKind;

impl CNode {
    /// Build from attribute values already in declared order.
    fn build(kind: NodeKind, attrs: Vec<Attr>) -> Self {
        debug_assert_eq!(attrs.len(), kind.attrs().len(), "{}", kind);
        Self { kind, attrs }
    }

    /// `ID(name)`
    pub fn id(name: impl Into<String>) -> Self {
        Self::build(NodeKind::ID, vec![Attr::Text(name.into())])
    }

    /// `Constant(type, value)`; `type` is a literal kind such as `"int"`.
    pub fn constant(literal_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::build(
            NodeKind::Constant,
            vec![Attr::Text(literal_type.into()), Attr::Text(value.into())],
        )
    }

    /// `BinaryOp(op, left, right)`
    pub fn binary_op(op: impl Into<String>, left: CNode, right: CNode) -> Self {
        Self::build(NodeKind::BinaryOp, vec![Attr::Text(op.into()), left.into(), right.into()])
    }

    /// `UnaryOp(op, expr)`
    pub fn unary_op(op: impl Into<String>, expr: CNode) -> Self {
        Self::build(NodeKind::UnaryOp, vec![Attr::Text(op.into()), expr.into()])
    }

    /// `Assignment(op, lvalue, rvalue)`
    pub fn assignment(op: impl Into<String>, lvalue: CNode, rvalue: CNode) -> Self {
        Self::build(NodeKind::Assignment, vec![Attr::Text(op.into()), lvalue.into(), rvalue.into()])
    }

    /// `IdentifierType(names)`, e.g. `["unsigned", "int"]`.
    pub fn identifier_type<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(
            NodeKind::IdentifierType,
            vec![names.into_iter().map(|name| Attr::Text(name.into())).collect()],
        )
    }

    /// `TypeDecl(declname, quals, type)`
    pub fn type_decl<S: Into<String>>(declname: Option<S>, quals: &[&str], ty: CNode) -> Self {
        Self::build(
            NodeKind::TypeDecl,
            vec![declname.map(Into::into).map(Attr::Text).into(), quals.iter().copied().collect(), ty.into()],
        )
    }

    /// `Decl(name, [], [], [], type, init, None)`
    pub fn decl<S: Into<String>>(name: Option<S>, ty: CNode, init: Option<CNode>) -> Self {
        Self::build(
            NodeKind::Decl,
            vec![
                name.map(Into::into).map(Attr::Text).into(),
                Attr::List(Vec::new()),
                Attr::List(Vec::new()),
                Attr::List(Vec::new()),
                ty.into(),
                init.into(),
                Attr::None,
            ],
        )
    }

    /// `Compound(block_items)`
    pub fn compound(items: Vec<CNode>) -> Self {
        Self::build(NodeKind::Compound, vec![items.into_iter().collect()])
    }

    /// `Return(expr)`
    pub fn ret(expr: Option<CNode>) -> Self {
        Self::build(NodeKind::Return, vec![expr.into()])
    }

    /// `FuncCall(name, args)`; `args` is an `ExprList` when present.
    pub fn func_call(name: CNode, args: Option<CNode>) -> Self {
        Self::build(NodeKind::FuncCall, vec![name.into(), args.into()])
    }

    /// `ExprList(exprs)`
    pub fn expr_list(exprs: Vec<CNode>) -> Self {
        Self::build(NodeKind::ExprList, vec![exprs.into_iter().collect()])
    }

    /// `FileAST(ext)`
    pub fn file(ext: Vec<CNode>) -> Self {
        Self::build(NodeKind::FileAST, vec![ext.into_iter().collect()])
    }
}
