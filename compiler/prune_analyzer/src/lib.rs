//! Whole-program reachability analysis for the prune link-time dead-code
//! eliminator.
//!
//! Consumes the immutable [`ClassInfo`](prune_infos::ClassInfo) records of
//! every unit plus a [`RootSet`], and computes the minimal closed set of
//! units and members that can run, as an [`Analysis`] report.
//!
//! # Design
//!
//! - **Fresh state per run**: all registries live in one analyzer value
//!   created by [`analyze`] and dropped once the report is built.
//! - **Iterative worklist**: recursive and mutually recursive members are
//!   handled by a queue, never by recursion over the call graph.
//! - **Confluent**: virtual calls are replayed against classes instantiated
//!   later, so the reached set does not depend on processing order.
//! - **Errors are data**: edges to missing symbols become [`LinkError`]s in
//!   the report; the fixpoint always runs to completion.

mod analyzer;
mod config;
mod errors;
mod report;

pub use analyzer::analyze;
pub use config::{AnalyzerConfig, MissingSymbolMode, Root, RootSet};
pub use errors::{DisplayLinkError, ErrorCode, LinkError, LinkErrorKind, Referrer};
pub use report::{Analysis, UnitAnalysis, UnitFlags};

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
