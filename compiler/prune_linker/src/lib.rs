//! Link-time driver for the prune reachability engine.
//!
//! Ties the two halves together: units are extracted into
//! [`ClassInfo`](prune_infos::ClassInfo) records (in parallel when
//! configured), then analyzed from the exported units and configured roots.
//!
//! No I/O happens here. Reading IR and emitting output belong to the caller.
//!
//! # Tracing
//!
//! Call [`init_tracing`] once at startup to print the engine's `tracing`
//! events. The filter is read from `PRUNE_LOG`, falling back to `RUST_LOG`:
//!
//! ```bash
//! PRUNE_LOG=prune_analyzer=debug my-linker ...
//! PRUNE_LOG=prune_analyzer=trace my-linker ...   # per-member detail
//! ```

mod config;
mod driver;
mod error;

use std::sync::Once;

pub use config::LinkerConfig;
pub use driver::{extract_infos, link, refine, LinkOutput};
pub use error::LinkerError;

pub use prune_analyzer::{
    Analysis, AnalyzerConfig, LinkError, LinkErrorKind, MissingSymbolMode, Root, RootSet,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber if `PRUNE_LOG` or `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if std::env::var("PRUNE_LOG").is_ok() {
            EnvFilter::from_env("PRUNE_LOG")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global tracing subscriber is already installed");
        }
    });
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap for concise assertions"
)]
