//! Static types and type references of the unit IR.
//!
//! [`Type`] is the static type carried by every expression. [`TypeRef`] is
//! the reified form used where the runtime needs a type descriptor: type
//! tests, casts, class-of literals and array allocations.

use crate::names;
use crate::Name;

/// Primitive value types. Each has a boxed-wrapper unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimType {
    Unit,
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl PrimType {
    /// The boxed-wrapper unit that carries methods for values of this type.
    pub const fn boxed_class(self) -> Name {
        match self {
            PrimType::Unit => names::BOXED_UNIT_CLASS,
            PrimType::Boolean => names::BOXED_BOOLEAN_CLASS,
            PrimType::Char => names::BOXED_CHAR_CLASS,
            PrimType::Byte => names::BOXED_BYTE_CLASS,
            PrimType::Short => names::BOXED_SHORT_CLASS,
            PrimType::Int => names::BOXED_INT_CLASS,
            PrimType::Long => names::BOXED_LONG_CLASS,
            PrimType::Float => names::BOXED_FLOAT_CLASS,
            PrimType::Double => names::BOXED_DOUBLE_CLASS,
            PrimType::String => names::BOXED_STRING_CLASS,
        }
    }
}

/// Base of an array type: a primitive or a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NonArrayTypeRef {
    Prim(PrimType),
    Class(Name),
}

impl NonArrayTypeRef {
    /// The unit named by this base, if any.
    pub fn class_name(self) -> Option<Name> {
        match self {
            NonArrayTypeRef::Class(name) => Some(name),
            NonArrayTypeRef::Prim(_) => None,
        }
    }
}

/// Array type reference: `dimensions` levels of array around `base`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArrayTypeRef {
    pub base: NonArrayTypeRef,
    pub dimensions: u32,
}

impl ArrayTypeRef {
    pub fn new(base: NonArrayTypeRef, dimensions: u32) -> Self {
        debug_assert!(dimensions > 0);
        Self { base, dimensions }
    }

    /// One-dimensional array of `class`.
    pub fn of_class(class: Name) -> Self {
        Self::new(NonArrayTypeRef::Class(class), 1)
    }
}

/// Reified type reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Prim(PrimType),
    Class(Name),
    Array(ArrayTypeRef),
}

impl TypeRef {
    /// The unit whose runtime type data this reference needs.
    ///
    /// For arrays that is the base unit; primitive bases need none.
    pub fn base_class(self) -> Option<Name> {
        match self {
            TypeRef::Class(name) => Some(name),
            TypeRef::Array(array) => array.base.class_name(),
            TypeRef::Prim(_) => None,
        }
    }
}

/// Field of a record type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordField {
    pub name: Name,
    pub tpe: Type,
}

/// Static type of an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Top type; any value, including primitives.
    Any,
    /// Bottom type; the expression never completes normally.
    Nothing,
    /// Type of the `null` literal.
    Null,
    /// Statements, which produce no value.
    NoType,
    Prim(PrimType),
    /// Instances of a named class or interface.
    Class(Name),
    Array(ArrayTypeRef),
    /// Intermediate structural type produced by optimizations; never a
    /// legal call receiver.
    Record(Vec<RecordField>),
}

impl Type {
    pub const INT: Type = Type::Prim(PrimType::Int);
    pub const LONG: Type = Type::Prim(PrimType::Long);
    pub const BOOLEAN: Type = Type::Prim(PrimType::Boolean);
    pub const STRING: Type = Type::Prim(PrimType::String);

    /// The unit this type names directly (class types only).
    ///
    /// Primitive types do not count: they are values, not references to
    /// their wrapper units.
    pub fn class_name(&self) -> Option<Name> {
        match self {
            Type::Class(name) => Some(*name),
            Type::Array(array) => array.base.class_name(),
            Type::Any
            | Type::Nothing
            | Type::Null
            | Type::NoType
            | Type::Prim(_)
            | Type::Record(_) => None,
        }
    }
}

impl From<TypeRef> for Type {
    fn from(type_ref: TypeRef) -> Self {
        match type_ref {
            TypeRef::Prim(prim) => Type::Prim(prim),
            TypeRef::Class(name) => Type::Class(name),
            TypeRef::Array(array) => Type::Array(array),
        }
    }
}
