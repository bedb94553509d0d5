//! Accumulator for one member's dependencies.
//!
//! Lives for a single extraction call. Sets grow monotonically while the
//! body is traversed and are frozen by [`ReachabilityInfoBuilder::finish`].

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use prune_ir::{names, Name};

use crate::info::{ByClass, MemberKey, ReachabilityInfo};

#[derive(Default)]
pub struct ReachabilityInfoBuilder {
    static_fields_read: FxHashMap<Name, FxHashSet<Name>>,
    static_fields_written: FxHashMap<Name, FxHashSet<Name>>,
    methods_called: FxHashMap<Name, FxHashSet<Name>>,
    methods_called_statically: FxHashMap<Name, FxHashSet<MemberKey>>,
    instantiated_classes: FxHashSet<Name>,
    accessed_modules: FxHashSet<Name>,
    used_instance_tests: FxHashSet<Name>,
    accessed_class_data: FxHashSet<Name>,
    referenced_classes: FxHashSet<Name>,
    used_host_globals: FxHashSet<Name>,
}

impl ReachabilityInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_static_field_read(&mut self, class: Name, field: Name) {
        self.static_fields_read.entry(class).or_default().insert(field);
    }

    pub fn add_static_field_written(&mut self, class: Name, field: Name) {
        self.static_fields_written
            .entry(class)
            .or_default()
            .insert(field);
    }

    /// Record a virtual call on a receiver of static unit `class`.
    pub fn add_method_called(&mut self, class: Name, method: Name) {
        self.methods_called.entry(class).or_default().insert(method);
    }

    /// Record a call to the exact member `key` of `class`.
    pub fn add_method_called_statically(&mut self, class: Name, key: MemberKey) {
        self.methods_called_statically
            .entry(class)
            .or_default()
            .insert(key);
    }

    pub fn add_instantiated_class(&mut self, class: Name) {
        self.instantiated_classes.insert(class);
    }

    /// Record construction of `class` through constructor `ctor`.
    ///
    /// Constructors are never dispatched virtually, so the constructor edge
    /// is a static one.
    pub fn add_instantiation(&mut self, class: Name, ctor: Name) {
        self.add_instantiated_class(class);
        self.add_method_called_statically(class, MemberKey::constructor(ctor));
    }

    pub fn add_accessed_module(&mut self, module: Name) {
        self.accessed_modules.insert(module);
    }

    pub fn add_used_instance_test(&mut self, class: Name) {
        self.used_instance_tests.insert(class);
    }

    pub fn add_accessed_class_data(&mut self, class: Name) {
        self.accessed_class_data.insert(class);
    }

    pub fn add_referenced_class(&mut self, class: Name) {
        self.referenced_classes.insert(class);
    }

    pub fn add_used_host_global(&mut self, global: Name) {
        self.used_host_globals.insert(global);
    }

    /// Record the implicit `ArithmeticException` raised by integral
    /// division by zero.
    pub fn add_arithmetic_exception(&mut self) {
        self.add_instantiation(
            names::ARITHMETIC_EXCEPTION_CLASS,
            names::STRING_ARG_CONSTRUCTOR,
        );
    }

    /// Record every edge of an existing record.
    pub fn add_all(&mut self, info: &ReachabilityInfo) {
        for (class, fields) in &info.static_fields_read {
            for field in fields {
                self.add_static_field_read(*class, *field);
            }
        }
        for (class, fields) in &info.static_fields_written {
            for field in fields {
                self.add_static_field_written(*class, *field);
            }
        }
        for (class, methods) in &info.methods_called {
            for method in methods {
                self.add_method_called(*class, *method);
            }
        }
        for (class, keys) in &info.methods_called_statically {
            for key in keys {
                self.add_method_called_statically(*class, *key);
            }
        }
        self.instantiated_classes
            .extend(info.instantiated_classes.iter().copied());
        self.accessed_modules
            .extend(info.accessed_modules.iter().copied());
        self.used_instance_tests
            .extend(info.used_instance_tests.iter().copied());
        self.accessed_class_data
            .extend(info.accessed_class_data.iter().copied());
        self.referenced_classes
            .extend(info.referenced_classes.iter().copied());
        self.used_host_globals
            .extend(info.used_host_globals.iter().copied());
    }

    /// Freeze into an immutable, order-independent record.
    pub fn finish(self) -> ReachabilityInfo {
        ReachabilityInfo {
            static_fields_read: freeze_by_class(self.static_fields_read),
            static_fields_written: freeze_by_class(self.static_fields_written),
            methods_called: freeze_by_class(self.methods_called),
            methods_called_statically: freeze_by_class(self.methods_called_statically),
            instantiated_classes: freeze(self.instantiated_classes),
            accessed_modules: freeze(self.accessed_modules),
            used_instance_tests: freeze(self.used_instance_tests),
            accessed_class_data: freeze(self.accessed_class_data),
            referenced_classes: freeze(self.referenced_classes),
            used_host_globals: freeze(self.used_host_globals),
        }
    }
}

fn freeze<T: Ord>(set: FxHashSet<T>) -> Vec<T> {
    let mut values: Vec<T> = set.into_iter().collect();
    values.sort_unstable();
    values
}

fn freeze_by_class<T: Ord + Hash>(map: FxHashMap<Name, FxHashSet<T>>) -> ByClass<T> {
    let mut entries: ByClass<T> = map
        .into_iter()
        .map(|(class, values)| (class, freeze(values)))
        .collect();
    entries.sort_unstable_by_key(|(class, _)| *class);
    entries
}
