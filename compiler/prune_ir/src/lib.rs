//! Prune IR - unit definitions consumed by the link-time reachability engine.
//!
//! This crate contains:
//! - [`Name`]s for interned identifiers, and the thread-safe [`StringInterner`]
//! - Well-known runtime-support names in [`names`]
//! - Static types ([`Type`]) and reified type references ([`TypeRef`])
//! - Unit definitions ([`ClassDef`]) and their member bodies ([`Expr`])
//!
//! # Design
//!
//! - **Intern Everything**: unit, member, field and host-global names are
//!   `Name(u32)`, so dependency sets compare and hash in O(1).
//! - **Self-contained Units**: a `ClassDef` refers to other units only by
//!   name, so each unit can be processed without the rest of the program.
//!
//! Member names include their signature (`"<init>(lang.String)"`), which
//! makes overloads distinct names.

mod defs;
mod interner;
mod name;
pub mod names;
mod tree;
mod types;

pub use defs::{ClassDef, ClassKind, FieldDef, MethodDef, PropertyDef, TopLevelExportDef};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use tree::{BinaryOp, Expr, ExprKind, Literal, MemberNamespace, ParamDef, UnaryOp};
pub use types::{ArrayTypeRef, NonArrayTypeRef, PrimType, RecordField, Type, TypeRef};
