// ⚠️ Error Types - everything that can stop a merge run
//
// Skipped fragments and empty selections are NOT errors: they are reported
// through IngestSummary and PipelineOutcome respectively.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    /// Input directory does not exist or is not a directory
    #[error("input directory does not exist or is not a directory: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    /// Directory exists but could not be listed
    #[error("failed to list directory {}", path.display())]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while reading a fragment (aborts ingestion)
    #[error("failed to read fragment {}", path.display())]
    FragmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while writing the consolidated file
    #[error("failed to write output file {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file exists but is not valid JSON for MergeConfig
    #[error("invalid configuration file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file exists but could not be read
    #[error("failed to read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O or serialization failure while writing the JSON run summary
    #[error("failed to write run summary {}", path.display())]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal prompt I/O
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}

pub type MergeResult<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_include_path() {
        let err = MergeError::InvalidDirectory {
            path: PathBuf::from("/nope/csv"),
        };
        assert!(err.to_string().contains("/nope/csv"));

        let err = MergeError::FragmentRead {
            path: PathBuf::from("clients_1.csv"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        assert!(err.to_string().contains("clients_1.csv"));
        assert!(std::error::Error::source(&err).is_some());

        let err = MergeError::ConfigRead {
            path: PathBuf::from("fragmerge.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("fragmerge.json"));
    }
}
