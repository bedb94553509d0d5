//! Unit definitions: classes, interfaces and module singletons.

use crate::tree::{Expr, MemberNamespace, ParamDef};
use crate::types::Type;
use crate::Name;

/// Kind of unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    /// Singleton object, created on first load.
    ModuleClass,
    /// Boxed wrapper whose instances are primitive values.
    HijackedClass,
    /// Class compiled to the host environment's object model. Its members
    /// are emitted and resolved like those of a plain class.
    HostClass,
    /// Module singleton exposed as a host-environment object.
    HostModuleClass,
    /// Class provided by the host runtime; no code is emitted for it.
    NativeHostClass,
}

impl ClassKind {
    /// Whether values of this kind are created by loading a singleton.
    pub const fn is_module(self) -> bool {
        matches!(self, ClassKind::ModuleClass | ClassKind::HostModuleClass)
    }

    /// Whether the host runtime provides this unit's members.
    pub const fn is_native(self) -> bool {
        matches!(self, ClassKind::NativeHostClass)
    }

    /// Whether instances of this kind can exist.
    pub const fn is_instantiable(self) -> bool {
        !matches!(self, ClassKind::Interface)
    }
}

/// Field declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub is_static: bool,
    pub name: Name,
    pub ftpe: Type,
}

/// Method or constructor. `body == None` means abstract.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDef {
    pub namespace: MemberNamespace,
    pub name: Name,
    pub params: Vec<ParamDef>,
    pub result: Type,
    pub body: Option<Expr>,
    /// Callable from the host environment under its own name.
    pub exported: bool,
}

impl MethodDef {
    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }
}

/// Host-facing property with optional accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDef {
    pub name: Name,
    pub getter: Option<Expr>,
    pub setter: Option<(ParamDef, Expr)>,
}

/// Top-level export: a symbol visible to the host outside any unit.
#[derive(Clone, Debug, PartialEq)]
pub enum TopLevelExportDef {
    /// Exported function; its body is an implicit entry point.
    Method { export_name: Name, body: Expr },
    /// Exported static field, readable and writable by the host.
    Field { export_name: Name, field: Name },
    /// Exported module singleton.
    ModuleAccessor { export_name: Name },
}

impl TopLevelExportDef {
    pub fn export_name(&self) -> Name {
        match self {
            TopLevelExportDef::Method { export_name, .. }
            | TopLevelExportDef::Field { export_name, .. }
            | TopLevelExportDef::ModuleAccessor { export_name } => *export_name,
        }
    }
}

/// One unit as produced by the front-end.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: Name,
    pub kind: ClassKind,
    /// Always `None` for interfaces and for the root object unit.
    pub superclass: Option<Name>,
    pub interfaces: Vec<Name>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
    pub top_level_exports: Vec<TopLevelExportDef>,
}

impl ClassDef {
    /// An empty unit of the given kind.
    pub fn new(name: Name, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            top_level_exports: Vec::new(),
        }
    }

    /// Whether the host environment can reach into this unit directly.
    pub fn is_exported(&self) -> bool {
        !self.top_level_exports.is_empty()
            || !self.properties.is_empty()
            || self.methods.iter().any(|m| m.exported)
    }
}
