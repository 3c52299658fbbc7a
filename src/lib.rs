// src/lib.rs
pub mod types;
pub mod error;
pub mod logspace;
pub mod report;
pub mod consensus;
pub mod output;
pub mod summary;

use std::path::PathBuf;

use crate::consensus::classify;
use crate::error::Result;
use crate::output::write_list;
use crate::report::load;
use crate::summary::ClassificationSummary;
use crate::types::Reference;

pub use crate::consensus::ClassificationLists;
pub use crate::error::ConsensusError;
pub use crate::report::ScoreTable;

/// Inputs of one consensus run.
#[derive(Debug, Clone)]
pub struct ConsensusConfig {
    /// Report scoring reads with A as the reference.
    pub report_a: PathBuf,
    /// Report scoring reads with B as the reference.
    pub report_b: PathBuf,
    /// Output prefix; lists go to `<prefix>.chrA.list` and `<prefix>.chrB.list`.
    pub out_prefix: String,
    /// Also classify reads that only one reference scored.
    pub include_unique: bool,
}

impl ConsensusConfig {
    pub fn list_path(&self, reference: Reference) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.out_prefix, reference.list_suffix()))
    }
}

/// Loads both reports, classifies every read and writes the two list files.
///
/// Nothing is written unless both reports load cleanly.
pub fn run_consensus(config: &ConsensusConfig) -> Result<ClassificationSummary> {
    log::info!("Start");

    let table_a = load(&config.report_a)?;
    let table_b = load(&config.report_b)?;

    let lists = classify(&table_a, &table_b, config.include_unique);

    for reference in [Reference::A, Reference::B] {
        write_list(config.list_path(reference), lists.list(reference))?;
    }

    let summary = ClassificationSummary::from_lists(&lists);
    summary.log();
    log::info!("Done");
    Ok(summary)
}
