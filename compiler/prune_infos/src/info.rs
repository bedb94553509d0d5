//! Immutable dependency records.
//!
//! A [`ClassInfo`] is built once per unit and never mutated afterwards.
//! All sets are stored as sorted, deduplicated `Vec`s so that two
//! extractions of the same unit compare equal regardless of traversal order.

use prune_ir::{ClassKind, MemberNamespace, Name};

use crate::builder::ReachabilityInfoBuilder;

/// Sets keyed by owning unit: `(unit, sorted values)`, sorted by unit.
pub type ByClass<T> = Vec<(Name, Vec<T>)>;

/// Identity of a member within its unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    pub namespace: MemberNamespace,
    pub name: Name,
}

impl MemberKey {
    pub const fn new(namespace: MemberNamespace, name: Name) -> Self {
        Self { namespace, name }
    }

    pub const fn public(name: Name) -> Self {
        Self::new(MemberNamespace::Public, name)
    }

    pub const fn constructor(name: Name) -> Self {
        Self::new(MemberNamespace::Constructor, name)
    }

    pub const fn static_method(name: Name) -> Self {
        Self::new(MemberNamespace::Static, name)
    }
}

/// Everything a member body (or the top-level exports of a unit) may need
/// at runtime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReachabilityInfo {
    /// Static fields read, by owning unit.
    pub static_fields_read: ByClass<Name>,
    /// Static fields written, by owning unit.
    pub static_fields_written: ByClass<Name>,
    /// Virtual calls, by static receiver unit.
    pub methods_called: ByClass<Name>,
    /// Calls with a target fixed at compile time, by owning unit.
    pub methods_called_statically: ByClass<MemberKey>,
    /// Units constructed directly.
    pub instantiated_classes: Vec<Name>,
    /// Module singletons loaded.
    pub accessed_modules: Vec<Name>,
    /// Units used in dynamic type tests or checked casts.
    pub used_instance_tests: Vec<Name>,
    /// Units whose runtime type descriptor is requested.
    pub accessed_class_data: Vec<Name>,
    /// Units mentioned only in type positions.
    pub referenced_classes: Vec<Name>,
    /// Host-runtime globals referenced; recorded, never resolved.
    pub used_host_globals: Vec<Name>,
}

impl ReachabilityInfo {
    /// Whether this record carries no dependency at all.
    pub fn is_empty(&self) -> bool {
        self.static_fields_read.is_empty()
            && self.static_fields_written.is_empty()
            && self.methods_called.is_empty()
            && self.methods_called_statically.is_empty()
            && self.instantiated_classes.is_empty()
            && self.accessed_modules.is_empty()
            && self.used_instance_tests.is_empty()
            && self.accessed_class_data.is_empty()
            && self.referenced_classes.is_empty()
            && self.used_host_globals.is_empty()
    }
}

/// Dependency record of one member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub key: MemberKey,
    pub is_abstract: bool,
    pub is_exported: bool,
    pub reachability: ReachabilityInfo,
}

impl MemberInfo {
    /// Fold another record with the same key into this one.
    ///
    /// The result has a body if either side has one, and is exported if
    /// either side is.
    pub fn merge(&mut self, other: &MemberInfo) {
        self.is_abstract &= other.is_abstract;
        self.is_exported |= other.is_exported;
        self.reachability = self.reachability.union(&other.reachability);
    }
}

/// Dependency record of one unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    pub name: Name,
    pub kind: ClassKind,
    pub superclass: Option<Name>,
    pub interfaces: Vec<Name>,
    /// Units referenced by field types only.
    pub referenced_field_classes: Vec<Name>,
    /// Member records, sorted by key.
    pub members: Vec<MemberInfo>,
    pub is_exported: bool,
    pub top_level_export_names: Vec<Name>,
}

impl ClassInfo {
    /// Find the record of a member.
    pub fn member(&self, key: MemberKey) -> Option<&MemberInfo> {
        self.members
            .binary_search_by(|m| m.key.cmp(&key))
            .ok()
            .map(|idx| &self.members[idx])
    }

    /// The synthetic member folding this unit's top-level exports, if any.
    pub fn top_level_exports(&self) -> Option<&MemberInfo> {
        self.member(MemberKey::static_method(prune_ir::names::TOP_LEVEL_EXPORTS))
    }

    /// Fold a re-extraction of the same unit into this record.
    ///
    /// Accumulation only: members and edges of either record are kept, so
    /// the result is a superset of both. Hierarchy and export data come
    /// from `newer`.
    #[must_use]
    pub fn accumulate(self, newer: ClassInfo) -> ClassInfo {
        let mut members = self.members;
        for member in newer.members {
            match members.binary_search_by(|m| m.key.cmp(&member.key)) {
                Ok(idx) => members[idx].merge(&member),
                Err(idx) => members.insert(idx, member),
            }
        }

        let mut referenced_field_classes = self.referenced_field_classes;
        referenced_field_classes.extend(newer.referenced_field_classes);
        referenced_field_classes.sort_unstable();
        referenced_field_classes.dedup();

        ClassInfo {
            members,
            referenced_field_classes,
            ..newer
        }
    }
}

impl ReachabilityInfo {
    /// Set union of two records.
    #[must_use]
    pub fn union(&self, other: &ReachabilityInfo) -> ReachabilityInfo {
        let mut builder = ReachabilityInfoBuilder::new();
        for info in [self, other] {
            builder.add_all(info);
        }
        builder.finish()
    }
}
