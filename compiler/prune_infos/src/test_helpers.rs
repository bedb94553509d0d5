//! Shared IR factories for extraction tests. Only compiled in test builds.

use prune_ir::{
    BinaryOp, ClassDef, ClassKind, Expr, ExprKind, MemberNamespace, MethodDef, Name, Type,
};

/// Shorthand for a test name outside the well-known range.
pub(crate) fn n(raw: u32) -> Name {
    Name::from_raw(1000 + raw)
}

pub(crate) fn class_ty(class: Name) -> Type {
    Type::Class(class)
}

pub(crate) fn var(name: Name, tpe: Type) -> Expr {
    Expr::new(ExprKind::VarRef(name), tpe)
}

pub(crate) fn call(receiver: Expr, method: Name) -> Expr {
    Expr::new(
        ExprKind::Apply {
            receiver: Box::new(receiver),
            method,
            args: vec![],
        },
        Type::Any,
    )
}

pub(crate) fn block(stats: Vec<Expr>) -> Expr {
    Expr::stat(ExprKind::Block(stats))
}

pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let tpe = lhs.tpe.clone();
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        tpe,
    )
}

pub(crate) fn select_static(class: Name, field: Name, tpe: Type) -> Expr {
    Expr::new(ExprKind::SelectStatic { class, field }, tpe)
}

pub(crate) fn method(namespace: MemberNamespace, name: Name, body: Expr) -> MethodDef {
    MethodDef {
        namespace,
        name,
        params: vec![],
        result: Type::NoType,
        body: Some(body),
        exported: false,
    }
}

pub(crate) fn abstract_method(name: Name) -> MethodDef {
    MethodDef {
        namespace: MemberNamespace::Public,
        name,
        params: vec![],
        result: Type::Any,
        body: None,
        exported: false,
    }
}

pub(crate) fn class_with(name: Name, methods: Vec<MethodDef>) -> ClassDef {
    let mut def = ClassDef::new(name, ClassKind::Class);
    def.superclass = Some(prune_ir::names::OBJECT_CLASS);
    def.methods = methods;
    def
}
