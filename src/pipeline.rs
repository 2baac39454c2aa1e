// 🔄 Merge Pipeline - ingest → merge → dedup → assemble
//
// Everything stays in memory; writing the output is the caller's step, so a
// failed ingestion never produces a file.

use crate::assemble::{assemble, resolve_header};
use crate::classifier::FilenameClassifier;
use crate::config::MergeConfig;
use crate::deduplication::{DedupResult, Deduplicator};
use crate::entity::EntityRecordStore;
use crate::error::MergeResult;
use crate::ingest::{FragmentIngestor, IngestSummary};
use crate::merge::merge;
use std::path::Path;
use tracing::{debug, warn};

/// Why a run ended without output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingToDo {
    NoFilesSelected,
    NoEntities,
}

impl NothingToDo {
    pub fn message(&self) -> &'static str {
        match self {
            NothingToDo::NoFilesSelected => "No files were selected for processing.",
            NothingToDo::NoEntities => "The selected files did not produce any entity.",
        }
    }
}

/// Everything one successful run produced
#[derive(Debug, Clone)]
pub struct MergeRun {
    pub store: EntityRecordStore,
    pub ingest: IngestSummary,
    /// All entity lines, concatenated
    pub flat: Vec<String>,
    pub dedup: DedupResult,
    pub header: Option<String>,
    /// Header + clean sequence, ready to write
    pub output: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    NothingToDo(NothingToDo),
    Completed(Box<MergeRun>),
}

pub struct Pipeline {
    ingestor: FragmentIngestor,
    deduplicator: Deduplicator,
}

impl Pipeline {
    pub fn new(config: &MergeConfig) -> Self {
        Pipeline {
            ingestor: FragmentIngestor::new(FilenameClassifier::with_reserved(
                config.output_file.clone(),
            )),
            deduplicator: Deduplicator::new(),
        }
    }

    pub fn run<P: AsRef<Path>>(&self, files: &[P], config: &MergeConfig) -> MergeResult<PipelineOutcome> {
        if files.is_empty() {
            return Ok(PipelineOutcome::NothingToDo(NothingToDo::NoFilesSelected));
        }

        let mut store = EntityRecordStore::new();
        let ingest = self.ingestor.ingest(files, &mut store)?;
        if store.is_empty() {
            return Ok(PipelineOutcome::NothingToDo(NothingToDo::NoEntities));
        }

        let flat = merge(&store);
        let dedup = self.deduplicator.dedup(&flat);
        debug!(
            flat = flat.len(),
            clean = dedup.clean.len(),
            duplicates = dedup.report.confirmed().len(),
            "dedup complete"
        );

        let header = resolve_header(&config.header, &ingest);
        if header.is_none() {
            warn!("no header found; output will start with data lines");
        }
        let output = assemble(header.as_deref(), &dedup.clean);

        Ok(PipelineOutcome::Completed(Box::new(MergeRun {
            store,
            ingest,
            flat,
            dedup,
            header,
            output,
        })))
    }
}

// ============================================================================
// TESTS
// ============================================================================
