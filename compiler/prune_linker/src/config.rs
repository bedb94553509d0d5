//! Driver configuration.

use prune_analyzer::{AnalyzerConfig, MissingSymbolMode, RootSet};

/// Settings for one [`link`](crate::link) or [`refine`](crate::refine) run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkerConfig {
    pub analyzer: AnalyzerConfig,
    /// Symbols kept in addition to exported units.
    pub roots: RootSet,
    /// Extract units on a rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            roots: RootSet::new(),
            parallel: true,
        }
    }
}

impl LinkerConfig {
    /// Settings for refinement runs over partially specialized trees:
    /// missing symbols are dropped silently and abstract declarations are
    /// not tracked.
    pub fn for_refinement() -> Self {
        Self {
            analyzer: AnalyzerConfig::default()
                .with_missing_symbols(MissingSymbolMode::Ignore)
                .with_abstract_reachability(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_roots(mut self, roots: RootSet) -> Self {
        self.roots = roots;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
