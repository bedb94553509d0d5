//! The reachability report handed to the emitter.
//!
//! Produced once per analysis run, even when link errors exist, so tooling
//! can still inspect partial results.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use prune_infos::MemberKey;
use prune_ir::{ClassKind, Name};

use crate::errors::LinkError;

bitflags! {
    /// How a reached unit is used at runtime.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct UnitFlags: u8 {
        /// Needed at all; at least its metadata is kept.
        const REACHED = 1 << 0;
        /// Instances may exist.
        const INSTANTIATED = 1 << 1;
        /// The module singleton is loaded.
        const MODULE_ACCESSED = 1 << 2;
        /// Used in a dynamic type test or checked cast.
        const TYPE_TESTED = 1 << 3;
        /// The runtime type descriptor is requested.
        const DATA_ACCESSED = 1 << 4;
        /// Some behavior of the unit runs, so its static initializer is kept.
        const INITIALIZED = 1 << 5;
    }
}

/// Reachability of one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitAnalysis {
    pub name: Name,
    pub kind: ClassKind,
    pub flags: UnitFlags,
    /// Non-abstract members to emit, sorted by key.
    pub reached_members: Vec<MemberKey>,
    /// Abstract declarations targeted by virtual calls, sorted by key.
    pub abstract_members: Vec<MemberKey>,
    pub static_fields_read: Vec<Name>,
    pub static_fields_written: Vec<Name>,
}

impl UnitAnalysis {
    pub fn is_instantiated(&self) -> bool {
        self.flags.contains(UnitFlags::INSTANTIATED)
    }

    pub fn is_module_accessed(&self) -> bool {
        self.flags.contains(UnitFlags::MODULE_ACCESSED)
    }

    pub fn is_data_accessed(&self) -> bool {
        self.flags.contains(UnitFlags::DATA_ACCESSED)
    }

    pub fn uses_type_tests(&self) -> bool {
        self.flags.contains(UnitFlags::TYPE_TESTED)
    }

    pub fn is_member_reached(&self, key: MemberKey) -> bool {
        self.reached_members.binary_search(&key).is_ok()
    }
}

/// Result of one analysis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// Reached units, sorted by name.
    units: Vec<UnitAnalysis>,
    index: FxHashMap<Name, usize>,
    host_globals: Vec<Name>,
    errors: Vec<LinkError>,
}

impl Analysis {
    pub(crate) fn new(
        mut units: Vec<UnitAnalysis>,
        mut host_globals: Vec<Name>,
        errors: Vec<LinkError>,
    ) -> Self {
        units.sort_by_key(|u| u.name);
        host_globals.sort_unstable();
        let index = units.iter().enumerate().map(|(i, u)| (u.name, i)).collect();
        Self {
            units,
            index,
            host_globals,
            errors,
        }
    }

    pub fn units(&self) -> &[UnitAnalysis] {
        &self.units
    }

    pub fn unit(&self, name: Name) -> Option<&UnitAnalysis> {
        self.index.get(&name).map(|&i| &self.units[i])
    }

    pub fn is_reached(&self, name: Name) -> bool {
        self.index.contains_key(&name)
    }

    pub fn is_member_reached(&self, class: Name, key: MemberKey) -> bool {
        self.unit(class).is_some_and(|u| u.is_member_reached(key))
    }

    pub fn is_instantiated(&self, class: Name) -> bool {
        self.unit(class).is_some_and(UnitAnalysis::is_instantiated)
    }

    pub fn is_module_accessed(&self, class: Name) -> bool {
        self.unit(class).is_some_and(UnitAnalysis::is_module_accessed)
    }

    pub fn is_data_accessed(&self, class: Name) -> bool {
        self.unit(class).is_some_and(UnitAnalysis::is_data_accessed)
    }

    pub fn uses_type_tests(&self, class: Name) -> bool {
        self.unit(class).is_some_and(UnitAnalysis::uses_type_tests)
    }

    pub fn static_fields_read(&self, class: Name) -> &[Name] {
        self.unit(class)
            .map_or(&[][..], |u| u.static_fields_read.as_slice())
    }

    pub fn static_fields_written(&self, class: Name) -> &[Name] {
        self.unit(class)
            .map_or(&[][..], |u| u.static_fields_written.as_slice())
    }

    pub fn abstract_members(&self, class: Name) -> &[MemberKey] {
        self.unit(class)
            .map_or(&[][..], |u| u.abstract_members.as_slice())
    }

    pub fn reached_units(&self) -> impl Iterator<Item = Name> + '_ {
        self.units.iter().map(|u| u.name)
    }

    pub fn instantiated_classes(&self) -> impl Iterator<Item = Name> + '_ {
        self.units
            .iter()
            .filter(|u| u.is_instantiated())
            .map(|u| u.name)
    }

    pub fn accessed_modules(&self) -> impl Iterator<Item = Name> + '_ {
        self.units
            .iter()
            .filter(|u| u.is_module_accessed())
            .map(|u| u.name)
    }

    pub fn accessed_class_data(&self) -> impl Iterator<Item = Name> + '_ {
        self.units
            .iter()
            .filter(|u| u.is_data_accessed())
            .map(|u| u.name)
    }

    /// Host-runtime globals referenced by reached code, sorted.
    pub fn host_globals(&self) -> &[Name] {
        &self.host_globals
    }

    /// Link errors in first-discovery order.
    pub fn errors(&self) -> &[LinkError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
