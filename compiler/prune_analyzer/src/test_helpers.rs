//! Fixture builders for analyzer tests. Only compiled in test builds.
//!
//! Analyzer tests work on dependency records directly, without going
//! through IR extraction.

use prune_infos::{ClassInfo, MemberInfo, MemberKey, ReachabilityInfo, ReachabilityInfoBuilder};
use prune_ir::{names, ClassKind, Name};

/// Shorthand for a test name outside the well-known range.
pub(crate) fn n(raw: u32) -> Name {
    Name::from_raw(1000 + raw)
}

/// Fluent wrapper over [`ReachabilityInfoBuilder`].
#[derive(Default)]
pub(crate) struct Deps(ReachabilityInfoBuilder);

pub(crate) fn deps() -> Deps {
    Deps::default()
}

impl Deps {
    pub(crate) fn call(mut self, receiver: Name, method: Name) -> Self {
        self.0.add_method_called(receiver, method);
        self
    }

    pub(crate) fn call_static(mut self, class: Name, key: MemberKey) -> Self {
        self.0.add_method_called_statically(class, key);
        self
    }

    /// Construct `class` through its no-argument constructor.
    pub(crate) fn new_instance(mut self, class: Name) -> Self {
        self.0.add_instantiation(class, names::NO_ARG_CONSTRUCTOR);
        self
    }

    pub(crate) fn load_module(mut self, module: Name) -> Self {
        self.0.add_accessed_module(module);
        self
    }

    pub(crate) fn read(mut self, class: Name, field: Name) -> Self {
        self.0.add_static_field_read(class, field);
        self
    }

    pub(crate) fn write(mut self, class: Name, field: Name) -> Self {
        self.0.add_static_field_written(class, field);
        self
    }

    pub(crate) fn type_test(mut self, class: Name) -> Self {
        self.0.add_used_instance_test(class);
        self
    }

    pub(crate) fn class_data(mut self, class: Name) -> Self {
        self.0.add_accessed_class_data(class);
        self
    }

    pub(crate) fn reference(mut self, class: Name) -> Self {
        self.0.add_referenced_class(class);
        self
    }

    pub(crate) fn host_global(mut self, global: Name) -> Self {
        self.0.add_used_host_global(global);
        self
    }

    pub(crate) fn build(self) -> ReachabilityInfo {
        self.0.finish()
    }
}

pub(crate) struct UnitBuilder {
    info: ClassInfo,
}

fn unit(name: Name, kind: ClassKind, superclass: Option<Name>) -> UnitBuilder {
    UnitBuilder {
        info: ClassInfo {
            name,
            kind,
            superclass,
            interfaces: Vec::new(),
            referenced_field_classes: Vec::new(),
            members: Vec::new(),
            is_exported: false,
            top_level_export_names: Vec::new(),
        },
    }
}

/// The root object unit, with a no-argument constructor.
pub(crate) fn object() -> ClassInfo {
    unit(names::OBJECT_CLASS, ClassKind::Class, None)
        .ctor(deps())
        .build()
}

/// A class extending the root object, with a no-argument constructor.
pub(crate) fn class(name: Name) -> UnitBuilder {
    unit(name, ClassKind::Class, Some(names::OBJECT_CLASS)).ctor(deps())
}

/// A class provided by the host runtime; it declares no members.
pub(crate) fn native_class(name: Name) -> UnitBuilder {
    unit(name, ClassKind::NativeHostClass, Some(names::OBJECT_CLASS))
}

pub(crate) fn interface(name: Name) -> UnitBuilder {
    unit(name, ClassKind::Interface, None)
}

/// A module singleton with a no-argument constructor.
pub(crate) fn module(name: Name) -> UnitBuilder {
    unit(name, ClassKind::ModuleClass, Some(names::OBJECT_CLASS)).ctor(deps())
}

impl UnitBuilder {
    pub(crate) fn kind(mut self, kind: ClassKind) -> Self {
        self.info.kind = kind;
        self
    }

    pub(crate) fn extends(mut self, parent: Name) -> Self {
        self.info.superclass = Some(parent);
        self
    }

    pub(crate) fn implements(mut self, interface: Name) -> Self {
        self.info.interfaces.push(interface);
        self
    }

    pub(crate) fn field_of_type(mut self, class: Name) -> Self {
        self.info.referenced_field_classes.push(class);
        self
    }

    fn push(mut self, key: MemberKey, is_abstract: bool, is_exported: bool, deps: Deps) -> Self {
        self.info.members.retain(|m| m.key != key);
        self.info.members.push(MemberInfo {
            key,
            is_abstract,
            is_exported,
            reachability: deps.build(),
        });
        self
    }

    pub(crate) fn method(self, name: Name, deps: Deps) -> Self {
        self.push(MemberKey::public(name), false, false, deps)
    }

    pub(crate) fn abstract_method(self, name: Name) -> Self {
        self.push(MemberKey::public(name), true, false, Deps::default())
    }

    pub(crate) fn static_method(self, name: Name, deps: Deps) -> Self {
        self.push(MemberKey::static_method(name), false, false, deps)
    }

    pub(crate) fn exported_method(mut self, name: Name, deps: Deps) -> Self {
        self.info.is_exported = true;
        self.push(MemberKey::public(name), false, true, deps)
    }

    pub(crate) fn ctor(self, deps: Deps) -> Self {
        self.push(
            MemberKey::constructor(names::NO_ARG_CONSTRUCTOR),
            false,
            false,
            deps,
        )
    }

    pub(crate) fn clinit(self, deps: Deps) -> Self {
        self.push(
            MemberKey::static_method(names::STATIC_INITIALIZER),
            false,
            false,
            deps,
        )
    }

    /// Top-level exports folded into the synthetic exports member.
    pub(crate) fn top_level_exports(mut self, export_name: Name, deps: Deps) -> Self {
        self.info.is_exported = true;
        self.info.top_level_export_names.push(export_name);
        self.push(
            MemberKey::static_method(names::TOP_LEVEL_EXPORTS),
            false,
            true,
            deps,
        )
    }

    pub(crate) fn build(mut self) -> ClassInfo {
        self.info.members.sort_by_key(|m| m.key);
        self.info
    }
}
