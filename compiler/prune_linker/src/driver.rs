//! Extraction and analysis pipeline.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use prune_analyzer::{analyze, Analysis};
use prune_infos::{generate_class_info, ClassInfo};
use prune_ir::{ClassDef, Name};

use crate::config::LinkerConfig;
use crate::error::LinkerError;

/// Stack size for extraction workers. `stacker` grows the stack on demand;
/// a larger start just makes growth rarer.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Records and report of one run.
///
/// The records are kept so a later [`refine`] can accumulate into them.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkOutput {
    pub infos: Vec<ClassInfo>,
    pub analysis: Analysis,
}

/// Extract every unit and analyze the whole program.
///
/// Returns `Err` only for malformed IR. Link errors are part of the report.
pub fn link(units: &[ClassDef], config: &LinkerConfig) -> Result<LinkOutput, LinkerError> {
    let infos = extract_infos(units, config.parallel)?;
    let analysis = analyze(&infos, &config.roots, &config.analyzer);
    Ok(LinkOutput { infos, analysis })
}

/// Re-extract rewritten units and re-analyze.
///
/// Each rewritten unit's new record is accumulated into its previous one,
/// so edges only ever get added. Units absent from `previous` are added.
/// Callers normally pass [`LinkerConfig::for_refinement`].
pub fn refine(
    previous: &[ClassInfo],
    rewritten: &[ClassDef],
    config: &LinkerConfig,
) -> Result<LinkOutput, LinkerError> {
    let fresh = extract_infos(rewritten, config.parallel)?;
    let mut fresh: FxHashMap<Name, ClassInfo> =
        fresh.into_iter().map(|info| (info.name, info)).collect();

    let mut infos = Vec::with_capacity(previous.len() + fresh.len());
    for info in previous {
        match fresh.remove(&info.name) {
            Some(newer) => infos.push(info.clone().accumulate(newer)),
            None => infos.push(info.clone()),
        }
    }
    // Preserve the input order of units new to this run.
    for unit in rewritten {
        if let Some(info) = fresh.remove(&unit.name) {
            infos.push(info);
        }
    }

    tracing::debug!(
        units = infos.len(),
        rewritten = rewritten.len(),
        "refining"
    );
    let analysis = analyze(&infos, &config.roots, &config.analyzer);
    Ok(LinkOutput { infos, analysis })
}

/// Extract the records of all units, in input order.
///
/// With `parallel`, units are extracted on a scoped rayon pool; if the pool
/// cannot be created, extraction falls back to the calling thread. The first
/// failing unit in input order is reported.
pub fn extract_infos(units: &[ClassDef], parallel: bool) -> Result<Vec<ClassInfo>, LinkerError> {
    let results = if parallel {
        extract_parallel(units)
    } else {
        units.iter().map(extract_one).collect()
    };
    results.into_iter().collect()
}

fn extract_parallel(units: &[ClassDef]) -> Vec<Result<ClassInfo, LinkerError>> {
    rayon::ThreadPoolBuilder::new()
        .stack_size(WORKER_STACK_SIZE)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| units.par_iter().map(extract_one).collect::<Vec<_>>())
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), extracting sequentially");
            units.iter().map(extract_one).collect()
        })
}

fn extract_one(unit: &ClassDef) -> Result<ClassInfo, LinkerError> {
    generate_class_info(unit).map_err(|source| LinkerError::Extraction {
        unit: unit.name,
        source,
    })
}
