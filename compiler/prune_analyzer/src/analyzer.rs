//! Incremental reachability fixpoint.
//!
//! # Algorithm
//!
//! 1. **Seed**: reach the root object, instantiate every hijacked class in
//!    the input, reach every exported unit and each configured root.
//! 2. **Drain**: pop a pending member, mark it reached and expand every
//!    edge of its dependency record. Expanding an edge may schedule further
//!    members as pending.
//! 3. **Stop** when the queue is empty.
//!
//! Every piece of state only grows (member states move
//! `Unseen → Pending → Reached`, unit flags are only set, call logs and
//! subclass lists only append), so the queue empties after at most one
//! visit per member.
//!
//! # Virtual calls
//!
//! A virtual call on receiver unit `R` is appended to `R`'s call log, then
//! resolved against every class already known to be instantiated below
//! `R`. When a class `C` is instantiated later, it is registered with each
//! of its ancestors and replays their logs. Whichever of the two edges is
//! seen first, the pair meets exactly once, so the result does not depend
//! on queue order.
//!
//! # Host runtime classes
//!
//! A [`ClassKind::NativeHostClass`] has no code of its own. It is reached,
//! instantiated and flagged like any class, but calls on it and
//! constructor calls into it are never resolved, so they cannot raise link
//! errors.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use prune_infos::{ClassInfo, MemberKey, ReachabilityInfo};
use prune_ir::{names, ClassKind, MemberNamespace, Name};

use crate::config::{AnalyzerConfig, MissingSymbolMode, Root, RootSet};
use crate::errors::{LinkErrorKind, LinkErrors, Referrer};
use crate::report::{Analysis, UnitAnalysis, UnitFlags};

/// Compute the reachability report for `infos` from the given roots.
///
/// State is created fresh for each call and discarded afterwards. Link
/// errors never stop the analysis; they are collected into the report.
pub fn analyze(infos: &[ClassInfo], roots: &RootSet, config: &AnalyzerConfig) -> Analysis {
    let mut analyzer = Analyzer::new(infos, config);
    analyzer.seed(roots);
    analyzer.run();
    analyzer.finish()
}

/// Index of a unit in the analyzer's unit table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct UnitId(u32);

impl UnitId {
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "unit count is bounded by the u32 name space"
    )]
    fn new(index: usize) -> Self {
        UnitId(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SymbolState {
    Unseen,
    Pending,
    Reached,
}

/// Ancestors of a unit, itself first.
type Ancestors = SmallVec<[UnitId; 8]>;

struct UnitState<'a> {
    info: &'a ClassInfo,
    flags: UnitFlags,
    /// Parallel to `info.members`.
    members: Vec<SymbolState>,
    ancestors: Option<Ancestors>,
    /// Virtual calls made on this unit as receiver, in discovery order.
    methods_called_log: Vec<(Name, Referrer)>,
    methods_called: FxHashSet<Name>,
    /// Instantiated classes having this unit as an ancestor.
    instantiated_subclasses: Vec<UnitId>,
    static_fields_read: FxHashSet<Name>,
    static_fields_written: FxHashSet<Name>,
}

impl<'a> UnitState<'a> {
    fn new(info: &'a ClassInfo) -> Self {
        Self {
            info,
            flags: UnitFlags::empty(),
            members: vec![SymbolState::Unseen; info.members.len()],
            ancestors: None,
            methods_called_log: Vec::new(),
            methods_called: FxHashSet::default(),
            instantiated_subclasses: Vec::new(),
            static_fields_read: FxHashSet::default(),
            static_fields_written: FxHashSet::default(),
        }
    }

    fn member_index(&self, key: MemberKey) -> Option<usize> {
        self.info.members.binary_search_by(|m| m.key.cmp(&key)).ok()
    }

    fn into_analysis(self) -> UnitAnalysis {
        let mut reached_members = Vec::new();
        let mut abstract_members = Vec::new();
        for (member, state) in self.info.members.iter().zip(&self.members) {
            if *state == SymbolState::Reached {
                if member.is_abstract {
                    abstract_members.push(member.key);
                } else {
                    reached_members.push(member.key);
                }
            }
        }
        UnitAnalysis {
            name: self.info.name,
            kind: self.info.kind,
            flags: self.flags,
            reached_members,
            abstract_members,
            static_fields_read: sorted(self.static_fields_read),
            static_fields_written: sorted(self.static_fields_written),
        }
    }
}

fn sorted(set: FxHashSet<Name>) -> Vec<Name> {
    let mut names: Vec<Name> = set.into_iter().collect();
    names.sort_unstable();
    names
}

struct Analyzer<'a> {
    config: &'a AnalyzerConfig,
    units: Vec<UnitState<'a>>,
    index: FxHashMap<Name, UnitId>,
    queue: VecDeque<(UnitId, usize)>,
    errors: LinkErrors,
    host_globals: FxHashSet<Name>,
}

impl<'a> Analyzer<'a> {
    fn new(infos: &'a [ClassInfo], config: &'a AnalyzerConfig) -> Self {
        let mut units = Vec::with_capacity(infos.len());
        let mut index = FxHashMap::default();
        for info in infos {
            if index.contains_key(&info.name) {
                tracing::warn!(unit = info.name.raw(), "duplicate unit ignored");
                continue;
            }
            index.insert(info.name, UnitId::new(units.len()));
            units.push(UnitState::new(info));
        }
        Self {
            config,
            units,
            index,
            queue: VecDeque::new(),
            errors: LinkErrors::default(),
            host_globals: FxHashSet::default(),
        }
    }

    fn info(&self, id: UnitId) -> &'a ClassInfo {
        self.units[id.index()].info
    }

    fn report(&mut self, kind: LinkErrorKind, from: Referrer) {
        match self.config.missing_symbols {
            MissingSymbolMode::Error => self.errors.report(kind, from),
            MissingSymbolMode::Ignore => {
                tracing::trace!(?kind, "dropping edge to missing symbol");
            }
        }
    }

    /// Resolve a unit name, reporting it when absent.
    fn lookup_unit(&mut self, name: Name, from: Referrer) -> Option<UnitId> {
        let id = self.index.get(&name).copied();
        if id.is_none() {
            self.report(LinkErrorKind::MissingClass(name), from);
        }
        id
    }

    // ── Seeding ─────────────────────────────────────────

    fn seed(&mut self, roots: &RootSet) {
        tracing::debug!(units = self.units.len(), roots = roots.len(), "starting analysis");

        if let Some(object) = self.lookup_unit(names::OBJECT_CLASS, Referrer::Roots) {
            self.reach_unit(object);
        }

        for i in 0..self.units.len() {
            let id = UnitId::new(i);
            let info = self.info(id);
            if info.kind == ClassKind::HijackedClass {
                self.instantiate(id, Referrer::Unit(info.name));
            }
        }

        for i in 0..self.units.len() {
            let id = UnitId::new(i);
            if self.info(id).is_exported {
                self.reach_exported(id);
            }
        }

        for root in roots.iter() {
            self.reach_root(*root);
        }
    }

    fn reach_exported(&mut self, id: UnitId) {
        let info = self.info(id);
        let from = Referrer::Unit(info.name);
        self.reach_unit(id);

        // Host code can create instances (or load the singleton) of a unit
        // exposing members under its own name.
        let exports_key = MemberKey::static_method(names::TOP_LEVEL_EXPORTS);
        let exposes_members = info
            .members
            .iter()
            .any(|m| m.is_exported && m.key != exports_key);
        if exposes_members {
            if info.kind.is_module() {
                self.access_module(id, from);
            } else if info.kind.is_instantiable() {
                self.instantiate(id, from);
            }
        }

        for (idx, member) in info.members.iter().enumerate() {
            if member.is_exported {
                self.schedule_member(id, idx);
            }
        }
    }

    fn reach_root(&mut self, root: Root) {
        let from = Referrer::Roots;
        match root {
            Root::Unit(name) => {
                if let Some(id) = self.lookup_unit(name, from) {
                    self.reach_unit(id);
                }
            }
            Root::Member { class, key } => {
                if let Some(id) = self.lookup_unit(class, from) {
                    self.call_method_statically(id, key, from);
                }
            }
            Root::Module(name) => {
                if let Some(id) = self.lookup_unit(name, from) {
                    self.access_module(id, from);
                }
            }
            Root::Instantiate { class, ctor } => {
                if let Some(id) = self.lookup_unit(class, from) {
                    self.instantiate(id, from);
                    self.call_method_statically(id, MemberKey::constructor(ctor), from);
                }
            }
        }
    }

    // ── Fixpoint ────────────────────────────────────────

    fn run(&mut self) {
        while let Some((id, idx)) = self.queue.pop_front() {
            let unit = &mut self.units[id.index()];
            unit.members[idx] = SymbolState::Reached;
            let info = unit.info;
            let member = &info.members[idx];
            tracing::trace!(
                unit = info.name.raw(),
                member = member.key.name.raw(),
                "reached member"
            );
            let from = Referrer::Member {
                class: info.name,
                key: member.key,
            };
            self.expand(&member.reachability, from);
        }
    }

    fn finish(self) -> Analysis {
        let units: Vec<UnitAnalysis> = self
            .units
            .into_iter()
            .filter(|u| u.flags.contains(UnitFlags::REACHED))
            .map(UnitState::into_analysis)
            .collect();
        let errors = self.errors.into_vec();
        tracing::debug!(
            reached = units.len(),
            errors = errors.len(),
            "analysis finished"
        );
        Analysis::new(units, self.host_globals.into_iter().collect(), errors)
    }

    /// Follow every edge of one reached member.
    fn expand(&mut self, deps: &'a ReachabilityInfo, from: Referrer) {
        for (class, fields) in &deps.static_fields_read {
            if let Some(id) = self.lookup_unit(*class, from) {
                self.initialize(id);
                self.units[id.index()]
                    .static_fields_read
                    .extend(fields.iter().copied());
            }
        }
        for (class, fields) in &deps.static_fields_written {
            if let Some(id) = self.lookup_unit(*class, from) {
                self.initialize(id);
                self.units[id.index()]
                    .static_fields_written
                    .extend(fields.iter().copied());
            }
        }
        for (class, methods) in &deps.methods_called {
            if let Some(id) = self.lookup_unit(*class, from) {
                for method in methods {
                    self.call_method(id, *method, from);
                }
            }
        }
        for (class, keys) in &deps.methods_called_statically {
            if let Some(id) = self.lookup_unit(*class, from) {
                for key in keys {
                    self.call_method_statically(id, *key, from);
                }
            }
        }
        for class in &deps.instantiated_classes {
            if let Some(id) = self.lookup_unit(*class, from) {
                self.instantiate(id, from);
            }
        }
        for module in &deps.accessed_modules {
            if let Some(id) = self.lookup_unit(*module, from) {
                self.access_module(id, from);
            }
        }
        for class in &deps.used_instance_tests {
            if let Some(id) = self.lookup_unit(*class, from) {
                self.units[id.index()].flags.insert(UnitFlags::TYPE_TESTED);
                self.reach_unit(id);
            }
        }
        for class in &deps.accessed_class_data {
            if let Some(id) = self.lookup_unit(*class, from) {
                self.units[id.index()].flags.insert(UnitFlags::DATA_ACCESSED);
                self.reach_unit(id);
            }
        }
        for class in &deps.referenced_classes {
            self.lookup_unit(*class, from);
        }
        self.host_globals
            .extend(deps.used_host_globals.iter().copied());
    }

    // ── Units ───────────────────────────────────────────

    /// Keep a unit's metadata, along with its superclass and interfaces.
    fn reach_unit(&mut self, id: UnitId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let unit = &mut self.units[id.index()];
            if unit.flags.contains(UnitFlags::REACHED) {
                continue;
            }
            unit.flags.insert(UnitFlags::REACHED);
            let info = unit.info;
            tracing::trace!(unit = info.name.raw(), "reached unit");

            let from = Referrer::Unit(info.name);
            for parent in info.superclass.iter().chain(&info.interfaces) {
                if let Some(parent) = self.lookup_unit(*parent, from) {
                    stack.push(parent);
                }
            }
            for class in &info.referenced_field_classes {
                self.lookup_unit(*class, from);
            }
        }
    }

    /// Keep a unit's behavior: reach it and schedule its static initializer.
    fn initialize(&mut self, id: UnitId) {
        let unit = &mut self.units[id.index()];
        if unit.flags.contains(UnitFlags::INITIALIZED) {
            return;
        }
        unit.flags.insert(UnitFlags::INITIALIZED);
        let clinit = unit.member_index(MemberKey::static_method(names::STATIC_INITIALIZER));
        self.reach_unit(id);
        if let Some(idx) = clinit {
            self.schedule_member(id, idx);
        }
    }

    fn instantiate(&mut self, id: UnitId, from: Referrer) {
        let info = self.info(id);
        if !info.kind.is_instantiable() {
            self.report(LinkErrorKind::NotInstantiable(info.name), from);
            return;
        }
        let unit = &mut self.units[id.index()];
        if unit.flags.contains(UnitFlags::INSTANTIATED) {
            return;
        }
        unit.flags.insert(UnitFlags::INSTANTIATED);
        tracing::debug!(unit = info.name.raw(), "instantiated");
        self.initialize(id);

        for ancestor in self.ancestors(id) {
            let state = &mut self.units[ancestor.index()];
            state.flags.insert(UnitFlags::DATA_ACCESSED);
            state.instantiated_subclasses.push(id);

            // Replay calls already made on this ancestor. The log may grow
            // while replaying.
            let mut i = 0;
            while let Some(&(method, call_site)) =
                self.units[ancestor.index()].methods_called_log.get(i)
            {
                tracing::trace!(
                    receiver = self.info(ancestor).name.raw(),
                    class = info.name.raw(),
                    method = method.raw(),
                    "replaying virtual call"
                );
                self.resolve_virtual(id, method, call_site);
                i += 1;
            }
        }
    }

    fn access_module(&mut self, id: UnitId, from: Referrer) {
        let info = self.info(id);
        if !info.kind.is_module() {
            self.report(LinkErrorKind::NotAModule(info.name), from);
            return;
        }
        let unit = &mut self.units[id.index()];
        if unit.flags.contains(UnitFlags::MODULE_ACCESSED) {
            return;
        }
        unit.flags.insert(UnitFlags::MODULE_ACCESSED);
        self.instantiate(id, from);
        self.call_method_statically(id, MemberKey::constructor(names::NO_ARG_CONSTRUCTOR), from);
    }

    /// Ancestors of `id` (itself first), following present units only.
    fn ancestors(&mut self, id: UnitId) -> Ancestors {
        if let Some(cached) = &self.units[id.index()].ancestors {
            return cached.clone();
        }

        let mut result = Ancestors::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if result.contains(&current) {
                continue;
            }
            result.push(current);
            let info = self.info(current);
            // Reverse push keeps the superclass ahead of the interfaces.
            for parent in info.interfaces.iter().rev().chain(info.superclass.iter()) {
                if let Some(&parent) = self.index.get(parent) {
                    stack.push(parent);
                }
            }
        }

        self.units[id.index()].ancestors = Some(result.clone());
        result
    }

    // ── Members ─────────────────────────────────────────

    fn schedule_member(&mut self, id: UnitId, idx: usize) {
        let unit = &mut self.units[id.index()];
        if unit.members[idx] != SymbolState::Unseen {
            return;
        }
        if unit.info.members[idx].is_abstract {
            // Dispatch-table contract only; no body to expand.
            unit.members[idx] = SymbolState::Reached;
            self.reach_unit(id);
            return;
        }
        unit.members[idx] = SymbolState::Pending;
        self.queue.push_back((id, idx));
        self.initialize(id);
    }

    fn call_method(&mut self, receiver: UnitId, method: Name, from: Referrer) {
        let unit = &mut self.units[receiver.index()];
        if !unit.methods_called.insert(method) {
            return;
        }
        unit.methods_called_log.push((method, from));

        if self.config.check_abstract_reachability {
            self.mark_abstract_declaration(receiver, method);
        }

        let mut i = 0;
        while let Some(&class) = self.units[receiver.index()].instantiated_subclasses.get(i) {
            self.resolve_virtual(class, method, from);
            i += 1;
        }
    }

    /// Mark the declaration a virtual call on `receiver` targets, if abstract.
    fn mark_abstract_declaration(&mut self, receiver: UnitId, method: Name) {
        let key = MemberKey::public(method);
        for ancestor in self.ancestors(receiver) {
            let unit = &self.units[ancestor.index()];
            if let Some(idx) = unit.member_index(key) {
                if unit.info.members[idx].is_abstract {
                    self.schedule_member(ancestor, idx);
                }
                return;
            }
        }
    }

    /// Schedule the implementation of `method` that runs for instances of `class`.
    fn resolve_virtual(&mut self, class: UnitId, method: Name, from: Referrer) {
        match self.lookup_method(class, method) {
            Some((owner, idx)) => self.schedule_member(owner, idx),
            None if self.has_native_superclass(class) => {
                tracing::trace!(
                    class = self.info(class).name.raw(),
                    method = method.raw(),
                    "leaving call to host runtime"
                );
            }
            None => {
                let name = self.info(class).name;
                self.report(
                    LinkErrorKind::MissingMember {
                        class: name,
                        key: MemberKey::public(method),
                    },
                    from,
                );
            }
        }
    }

    /// Whether `class` or one of its superclasses is provided by the host
    /// runtime. Members of such classes are never resolved.
    fn has_native_superclass(&self, class: UnitId) -> bool {
        let mut current = Some(class);
        for _ in 0..self.units.len() {
            let Some(id) = current else { break };
            let info = self.info(id);
            if info.kind.is_native() {
                return true;
            }
            current = info.superclass.and_then(|s| self.index.get(&s).copied());
        }
        false
    }

    /// Find the concrete public `method` for `class`: the superclass chain
    /// first, then default methods of its interfaces.
    fn lookup_method(&mut self, class: UnitId, method: Name) -> Option<(UnitId, usize)> {
        let key = MemberKey::public(method);
        let concrete = |unit: &UnitState<'_>| {
            unit.member_index(key)
                .filter(|&idx| !unit.info.members[idx].is_abstract)
        };

        let mut current = Some(class);
        for _ in 0..self.units.len() {
            let Some(id) = current else { break };
            let unit = &self.units[id.index()];
            if let Some(idx) = concrete(unit) {
                return Some((id, idx));
            }
            current = unit
                .info
                .superclass
                .and_then(|s| self.index.get(&s).copied());
        }

        let defaults: SmallVec<[(UnitId, usize); 4]> = self
            .ancestors(class)
            .into_iter()
            .filter_map(|id| {
                let unit = &self.units[id.index()];
                if unit.info.kind == ClassKind::Interface {
                    concrete(unit).map(|idx| (id, idx))
                } else {
                    None
                }
            })
            .collect();

        // The most specific default wins: skip any interface that another
        // candidate extends.
        for &(id, idx) in &defaults {
            let mut overridden = false;
            for &(other, _) in &defaults {
                if other != id && self.ancestors(other).contains(&id) {
                    overridden = true;
                    break;
                }
            }
            if !overridden {
                return Some((id, idx));
            }
        }
        None
    }

    fn call_method_statically(&mut self, class: UnitId, key: MemberKey, from: Referrer) {
        let target = if key.namespace == MemberNamespace::Public {
            self.lookup_method(class, key.name)
                .or_else(|| self.units[class.index()].member_index(key).map(|idx| (class, idx)))
        } else {
            self.units[class.index()].member_index(key).map(|idx| (class, idx))
        };

        let host_provided = if key.namespace == MemberNamespace::Public {
            self.has_native_superclass(class)
        } else {
            self.info(class).kind.is_native()
        };

        match target {
            Some((owner, idx)) => self.schedule_member(owner, idx),
            None if host_provided => self.reach_unit(class),
            None => {
                let name = self.info(class).name;
                self.report(LinkErrorKind::MissingMember { class: name, key }, from);
            }
        }
    }
}
