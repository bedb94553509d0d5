//! Expression trees of member bodies.
//!
//! Bodies are owned trees (`Box`/`Vec` children) produced by the front-end
//! one unit at a time. Every node carries its static [`Type`].

use crate::types::{ArrayTypeRef, Type, TypeRef};
use crate::Name;

/// Dispatch namespace of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberNamespace {
    /// Instance method dispatched on the receiver's runtime class.
    Public,
    /// Instance method callable only from its own unit; always static dispatch.
    Private,
    Constructor,
    Static,
}

impl MemberNamespace {
    /// Display prefix used in diagnostics.
    pub const fn prefix(self) -> &'static str {
        match self {
            MemberNamespace::Public => "",
            MemberNamespace::Private => "private::",
            MemberNamespace::Constructor => "ctor::",
            MemberNamespace::Static => "static::",
        }
    }
}

/// Literal constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Name),
    /// Runtime class object of a type.
    ClassOf(TypeRef),
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    IntToLong,
    LongToInt,
    IntToDouble,
    DoubleToInt,
}

/// Binary operators.
///
/// Integer and long division/remainder are distinct from their floating
/// counterparts because only they can raise at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    IntAdd,
    IntSub,
    IntMul,
    IntDiv,
    IntRem,
    LongAdd,
    LongSub,
    LongMul,
    LongDiv,
    LongRem,
    DoubleAdd,
    DoubleSub,
    DoubleMul,
    DoubleDiv,
    DoubleRem,
    IntLt,
    IntLe,
    IntGt,
    IntGe,
    BooleanAnd,
    BooleanOr,
    StringConcat,
}

impl BinaryOp {
    /// Whether this operator raises on a zero right operand.
    pub const fn is_integral_division(self) -> bool {
        matches!(
            self,
            BinaryOp::IntDiv | BinaryOp::IntRem | BinaryOp::LongDiv | BinaryOp::LongRem
        )
    }
}

/// A typed expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub tpe: Type,
}

impl Expr {
    pub fn new(kind: ExprKind, tpe: Type) -> Self {
        Self { kind, tpe }
    }

    /// A statement-typed node.
    pub fn stat(kind: ExprKind) -> Self {
        Self::new(kind, Type::NoType)
    }

    pub fn int(value: i32) -> Self {
        Self::new(ExprKind::Literal(Literal::Int(value)), Type::INT)
    }

    pub fn long(value: i64) -> Self {
        Self::new(ExprKind::Literal(Literal::Long(value)), Type::LONG)
    }

    /// Whether this is a literal integral constant other than zero.
    pub fn is_nonzero_integral_literal(&self) -> bool {
        match &self.kind {
            ExprKind::Literal(Literal::Int(v)) => *v != 0,
            ExprKind::Literal(Literal::Long(v)) => *v != 0,
            ExprKind::Literal(Literal::Byte(v)) => *v != 0,
            ExprKind::Literal(Literal::Short(v)) => *v != 0,
            _ => false,
        }
    }
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Skip,
    Literal(Literal),
    /// Local variable or parameter reference.
    VarRef(Name),
    This,
    Block(Vec<Expr>),
    /// Local variable declaration.
    VarDef {
        name: Name,
        vtpe: Type,
        mutable: bool,
        rhs: Box<Expr>,
    },
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    Return(Box<Expr>),
    Throw(Box<Expr>),
    TryCatch {
        block: Box<Expr>,
        err_var: Name,
        handler: Box<Expr>,
    },
    TryFinally {
        block: Box<Expr>,
        finalizer: Box<Expr>,
    },
    /// Object construction through a chosen constructor.
    New {
        class: Name,
        ctor: Name,
        args: Vec<Expr>,
    },
    /// Load (initializing on first use) a module singleton.
    LoadModule(Name),
    /// Instance field selection.
    Select {
        qualifier: Box<Expr>,
        class: Name,
        field: Name,
    },
    /// Static field selection.
    SelectStatic {
        class: Name,
        field: Name,
    },
    /// Virtual call, dispatched on the runtime class of `receiver`.
    Apply {
        receiver: Box<Expr>,
        method: Name,
        args: Vec<Expr>,
    },
    /// Call to an exact implementation: super-calls, private calls and
    /// constructor delegation.
    ApplyStatically {
        namespace: MemberNamespace,
        receiver: Box<Expr>,
        class: Name,
        method: Name,
        args: Vec<Expr>,
    },
    /// Call to a static method.
    ApplyStatic {
        class: Name,
        method: Name,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        lhs: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    NewArray {
        type_ref: ArrayTypeRef,
        lengths: Vec<Expr>,
    },
    ArrayValue {
        type_ref: ArrayTypeRef,
        elems: Vec<Expr>,
    },
    ArrayLength(Box<Expr>),
    ArraySelect {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    RecordValue(Vec<Expr>),
    /// Dynamic type test.
    IsInstanceOf {
        expr: Box<Expr>,
        test: TypeRef,
    },
    /// Checked cast.
    AsInstanceOf {
        expr: Box<Expr>,
        target: TypeRef,
    },
    /// Runtime class object of a value.
    GetClass(Box<Expr>),
    Closure {
        params: Vec<ParamDef>,
        body: Box<Expr>,
        captures: Vec<Expr>,
    },
    /// Reference to a global of the host runtime.
    HostGlobalRef(Name),
    /// Call of a host-runtime function value.
    HostCall {
        target: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Node introduced by a later refinement pass. Its semantics are
    /// already settled; only its argument trees are traversed.
    Transient {
        name: Name,
        args: Vec<Expr>,
    },
}

/// Parameter of a method or closure.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDef {
    pub name: Name,
    pub ptpe: Type,
}

impl ParamDef {
    pub fn new(name: Name, ptpe: Type) -> Self {
        Self { name, ptpe }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_literal_detection() {
        assert!(Expr::int(2).is_nonzero_integral_literal());
        assert!(Expr::long(-1).is_nonzero_integral_literal());
        assert!(!Expr::int(0).is_nonzero_integral_literal());
        assert!(!Expr::long(0).is_nonzero_integral_literal());
        let var = Expr::new(ExprKind::VarRef(Name::from_raw(99)), Type::INT);
        assert!(!var.is_nonzero_integral_literal());
    }

    #[test]
    fn only_integral_division_can_raise() {
        assert!(BinaryOp::IntDiv.is_integral_division());
        assert!(BinaryOp::LongRem.is_integral_division());
        assert!(!BinaryOp::DoubleDiv.is_integral_division());
        assert!(!BinaryOp::IntAdd.is_integral_division());
    }
}
