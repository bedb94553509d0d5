//! IR construction helpers shared by pipeline tests.

use prune_ir::{
    names, BinaryOp, ClassDef, ClassKind, Expr, ExprKind, FieldDef, MemberNamespace, MethodDef,
    Name, ParamDef, StringInterner, TopLevelExportDef, Type,
};

/// Interner plus IR factories for one test program.
pub struct Fixture {
    pub interner: StringInterner,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            interner: StringInterner::new(),
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }
}

pub fn object_class() -> ClassDef {
    let mut def = ClassDef::new(names::OBJECT_CLASS, ClassKind::Class);
    def.methods.push(ctor(Expr::stat(ExprKind::Skip)));
    def
}

pub fn class(name: Name) -> ClassDef {
    let mut def = ClassDef::new(name, ClassKind::Class);
    def.superclass = Some(names::OBJECT_CLASS);
    def.methods.push(ctor(Expr::stat(ExprKind::Skip)));
    def
}

pub fn interface(name: Name) -> ClassDef {
    ClassDef::new(name, ClassKind::Interface)
}

pub fn module(name: Name) -> ClassDef {
    let mut def = class(name);
    def.kind = ClassKind::ModuleClass;
    def
}

/// `lang.ArithmeticException` with its message constructor.
pub fn arithmetic_exception() -> ClassDef {
    let mut def = class(names::ARITHMETIC_EXCEPTION_CLASS);
    def.methods.push(MethodDef {
        namespace: MemberNamespace::Constructor,
        name: names::STRING_ARG_CONSTRUCTOR,
        params: vec![ParamDef::new(Name::from_raw(0), Type::STRING)],
        result: Type::NoType,
        body: Some(Expr::stat(ExprKind::Skip)),
        exported: false,
    });
    def
}

pub fn ctor(body: Expr) -> MethodDef {
    MethodDef {
        namespace: MemberNamespace::Constructor,
        name: names::NO_ARG_CONSTRUCTOR,
        params: vec![],
        result: Type::NoType,
        body: Some(body),
        exported: false,
    }
}

pub fn method(name: Name, body: Expr) -> MethodDef {
    MethodDef {
        namespace: MemberNamespace::Public,
        name,
        params: vec![],
        result: Type::Any,
        body: Some(body),
        exported: false,
    }
}

pub fn exported_method(name: Name, body: Expr) -> MethodDef {
    MethodDef {
        exported: true,
        ..method(name, body)
    }
}

pub fn abstract_method(name: Name) -> MethodDef {
    MethodDef {
        body: None,
        ..method(name, Expr::stat(ExprKind::Skip))
    }
}

pub fn static_field(def: &mut ClassDef, field: Name, export_name: Name) {
    def.fields.push(FieldDef {
        is_static: true,
        name: field,
        ftpe: Type::INT,
    });
    def.top_level_exports.push(TopLevelExportDef::Field {
        export_name,
        field,
    });
}

// -- Expressions --

pub fn block(stats: Vec<Expr>) -> Expr {
    Expr::stat(ExprKind::Block(stats))
}

pub fn var(name: Name, tpe: Type) -> Expr {
    Expr::new(ExprKind::VarRef(name), tpe)
}

pub fn new_instance(class: Name) -> Expr {
    Expr::new(
        ExprKind::New {
            class,
            ctor: names::NO_ARG_CONSTRUCTOR,
            args: vec![],
        },
        Type::Class(class),
    )
}

pub fn call(receiver: Expr, method: Name) -> Expr {
    Expr::new(
        ExprKind::Apply {
            receiver: Box::new(receiver),
            method,
            args: vec![],
        },
        Type::Any,
    )
}

pub fn call_static(class: Name, method: Name) -> Expr {
    Expr::new(
        ExprKind::ApplyStatic {
            class,
            method,
            args: vec![],
        },
        Type::Any,
    )
}

pub fn load_module(module: Name) -> Expr {
    Expr::new(ExprKind::LoadModule(module), Type::Class(module))
}

pub fn int_div(lhs: Expr, rhs: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op: BinaryOp::IntDiv,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        Type::INT,
    )
}

/// Marker left by a rewriting pass around already-settled subtrees.
pub fn transient(name: Name, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Transient { name, args }, Type::Any)
}

/// `val name: tpe = rhs`
pub fn val(name: Name, tpe: Type, rhs: Expr) -> Expr {
    Expr::stat(ExprKind::VarDef {
        name,
        vtpe: tpe,
        mutable: false,
        rhs: Box::new(rhs),
    })
}
