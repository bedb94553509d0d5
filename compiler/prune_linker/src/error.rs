use prune_infos::InfoError;
use prune_ir::Name;
use thiserror::Error;

/// Failure of a link run.
///
/// Missing symbols are not failures; they are reported in the
/// [`Analysis`](prune_analyzer::Analysis).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LinkerError {
    /// A unit's IR violates an extraction invariant.
    #[error("failed to extract dependencies of unit {unit:?}: {source}")]
    Extraction {
        unit: Name,
        #[source]
        source: InfoError,
    },
}
