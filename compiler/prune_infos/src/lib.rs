//! Dependency extraction for the prune link-time reachability engine.
//!
//! Each unit's IR is traversed once and summarized into an immutable
//! [`ClassInfo`]: one [`MemberInfo`] per method, constructor or property,
//! plus a synthetic member folding the unit's top-level exports.
//!
//! - **Per-unit, pure**: [`generate_class_info`] reads only its own unit, so
//!   units may be extracted concurrently with no synchronization.
//! - **Order-independent**: dependency sets are true sets, frozen into
//!   sorted sequences; extracting a unit twice yields equal records.
//! - **Fails only on malformed IR**: an illegal virtual-call receiver type
//!   aborts the unit with an [`InfoError`].
//!
//! # Receiver canonicalization
//!
//! Virtual calls are keyed by the static receiver's unit:
//!
//! - class/interface types map to themselves
//! - the top type maps to [`names::OBJECT_CLASS`](prune_ir::names::OBJECT_CLASS)
//! - primitives map to their boxed-wrapper unit
//! - arrays become static calls on the root object (`clone` is dropped)
//! - bottom and null types record nothing

mod builder;
mod error;
mod extract;
mod info;

pub use builder::ReachabilityInfoBuilder;
pub use error::InfoError;
pub use extract::{
    generate_class_info, generate_member_info, generate_property_info,
    generate_reachability_info, generate_top_level_exports_info,
};
pub use info::{ByClass, ClassInfo, MemberInfo, MemberKey, ReachabilityInfo};

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
