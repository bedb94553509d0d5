//! Analysis configuration: missing-symbol policy and explicit roots.

use prune_infos::MemberKey;
use prune_ir::Name;

/// What to do with an edge naming a symbol absent from the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MissingSymbolMode {
    /// Record a [`LinkError`](crate::LinkError) and drop the edge.
    #[default]
    Error,
    /// Drop the edge silently. Used by refinement runs over partially
    /// specialized trees that may name symbols not yet materialized.
    Ignore,
}

/// Knobs for one analysis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub missing_symbols: MissingSymbolMode,
    /// Mark abstract declarations targeted by virtual calls, so dispatch
    /// tables can be built for them.
    pub check_abstract_reachability: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            missing_symbols: MissingSymbolMode::Error,
            check_abstract_reachability: true,
        }
    }
}

impl AnalyzerConfig {
    #[must_use]
    pub fn with_missing_symbols(mut self, mode: MissingSymbolMode) -> Self {
        self.missing_symbols = mode;
        self
    }

    #[must_use]
    pub fn with_abstract_reachability(mut self, check: bool) -> Self {
        self.check_abstract_reachability = check;
        self
    }
}

/// One explicitly retained symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Root {
    /// Keep the unit's metadata only.
    Unit(Name),
    /// Keep one exact member, as if called statically.
    Member { class: Name, key: MemberKey },
    /// Load a module singleton.
    Module(Name),
    /// Construct a class through the given constructor.
    Instantiate { class: Name, ctor: Name },
}

/// Symbols retained in addition to the exported units.
///
/// Exported units are always roots and need not be listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: Vec<Root>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, root: Root) -> Self {
        self.push(root);
        self
    }

    pub fn push(&mut self, root: Root) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl FromIterator<Root> for RootSet {
    fn from_iter<I: IntoIterator<Item = Root>>(iter: I) -> Self {
        let mut set = RootSet::new();
        for root in iter {
            set.push(root);
        }
        set
    }
}
