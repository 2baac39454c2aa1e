// Fragment Merge - Core Library
// Rebuilds datasets split into <entity>_<n>.csv fragments into one de-duplicated file

pub mod classifier;
pub mod entity;
pub mod ingest;
pub mod merge;
pub mod deduplication;
pub mod assemble;
pub mod pipeline;
pub mod discovery;
pub mod writer;
pub mod config;
pub mod error;
pub mod session;
pub mod report;

// Only compile the viewer when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use classifier::{FilenameClassifier, DEFAULT_OUTPUT_FILE};
pub use entity::{Entity, EntityRecordStore};
pub use ingest::{FragmentIngestor, IngestSummary, IngestedFragment, SkippedFragment};
pub use merge::merge;
pub use deduplication::{dedup, DedupResult, Deduplicator, DuplicateReport, Occurrence};
pub use assemble::{assemble, resolve_header};
pub use pipeline::{MergeRun, NothingToDo, Pipeline, PipelineOutcome};
pub use discovery::{describe_candidates, list_candidates, validate_directory, Candidate, Selection};
pub use writer::write_output;
pub use config::{HeaderPolicy, MergeConfig, CONFIG_FILE};
pub use error::{MergeError, MergeResult};
pub use session::Session;
pub use report::RunSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
