// 📥 Fragment Ingestor - fragment files → EntityRecordStore
//
// Per file: classify name, drop the first line (fragment header),
// append every non-blank remaining line under the entity name.

use crate::classifier::FilenameClassifier;
use crate::entity::EntityRecordStore;
use crate::error::{MergeError, MergeResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// INGEST RESULTS
// ============================================================================

/// A candidate file whose name is not `<entity>_<digits>.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFragment {
    pub path: PathBuf,
    pub reason: String,
}

/// One fragment that was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFragment {
    pub path: PathBuf,
    pub entity: String,
    /// Discarded first line (None for an empty file)
    pub header: Option<String>,
    pub lines_added: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub ingested: Vec<IngestedFragment>,
    pub skipped: Vec<SkippedFragment>,
}

impl IngestSummary {
    /// Trimmed first line of the first ingested fragment that had a non-blank one
    pub fn first_header(&self) -> Option<&str> {
        self.ingested
            .iter()
            .filter_map(|f| f.header.as_deref())
            .map(str::trim)
            .find(|h| !h.is_empty())
    }

    pub fn lines_added(&self) -> usize {
        self.ingested.iter().map(|f| f.lines_added).sum()
    }
}

// ============================================================================
// FRAGMENT INGESTOR
// ============================================================================

pub struct FragmentIngestor {
    classifier: FilenameClassifier,
}

impl FragmentIngestor {
    pub fn new(classifier: FilenameClassifier) -> Self {
        FragmentIngestor { classifier }
    }

    /// Ingest `files` in order into `store`.
    ///
    /// The first I/O failure aborts with `FragmentRead`; entities ingested
    /// before it stay in the store.
    pub fn ingest<P: AsRef<Path>>(
        &self,
        files: &[P],
        store: &mut EntityRecordStore,
    ) -> MergeResult<IngestSummary> {
        let mut summary = IngestSummary::default();

        for path in files {
            let path = path.as_ref();

            let Some(entity) = self.classifier.classify_path(path) else {
                warn!(file = %path.display(), "skipping file: name is not <entity>_<n>.csv");
                summary.skipped.push(SkippedFragment {
                    path: path.to_path_buf(),
                    reason: "filename does not match <entity>_<n>.csv".to_string(),
                });
                continue;
            };

            let fragment = ingest_fragment(path, &entity, store)?;
            info!(
                file = %path.display(),
                entity = %entity,
                lines = fragment.lines_added,
                "fragment ingested"
            );
            summary.ingested.push(fragment);
        }

        Ok(summary)
    }
}

impl Default for FragmentIngestor {
    fn default() -> Self {
        Self::new(FilenameClassifier::new())
    }
}

/// Read one fragment; the file handle is dropped on every return path
fn ingest_fragment(
    path: &Path,
    entity: &str,
    store: &mut EntityRecordStore,
) -> MergeResult<IngestedFragment> {
    let read_err = |source| MergeError::FragmentRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut lines = BufReader::new(file).lines();

    store.record_fragment(entity, path);

    let header = match lines.next() {
        Some(first) => first.map_err(read_err)?,
        None => {
            debug!(file = %path.display(), "empty fragment");
            return Ok(IngestedFragment {
                path: path.to_path_buf(),
                entity: entity.to_string(),
                header: None,
                lines_added: 0,
            });
        }
    };

    let mut lines_added = 0;
    for line in lines {
        let line = line.map_err(read_err)?;
        if store.append_line(entity, &line) {
            lines_added += 1;
        }
    }

    Ok(IngestedFragment {
        path: path.to_path_buf(),
        entity: entity.to_string(),
        header: Some(header),
        lines_added,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_header_skipped_and_blank_lines_filtered() {
        let dir = TempDir::new().unwrap();
        let f = write(&dir, "clients_1.csv", "H\nA\n\n  \nB\n");

        let mut store = EntityRecordStore::new();
        let summary = FragmentIngestor::default().ingest(&[f], &mut store).unwrap();

        assert_eq!(store.get("clients").unwrap().lines(), ["A", "B"]);
        assert_eq!(summary.ingested[0].header.as_deref(), Some("H"));
        assert_eq!(summary.lines_added(), 2);
    }

    #[test]
    fn test_fragments_merge_into_one_entity_in_file_order() {
        let dir = TempDir::new().unwrap();
        let f1 = write(&dir, "clients_1.csv", "H\na\nb\na\n");
        let f2 = write(&dir, "clients_2.csv", "H\nc\nb\n");

        let mut store = EntityRecordStore::new();
        FragmentIngestor::default().ingest(&[f1, f2], &mut store).unwrap();

        let entity = store.get("clients").unwrap();
        assert_eq!(entity.lines(), ["a", "b", "a", "c", "b"]);
        assert_eq!(entity.fragments().len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unclassifiable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let notes = write(&dir, "notes.csv", "H\nx\ny\n");
        let orders = write(&dir, "orders_1.csv", "H\n1\n");

        let mut store = EntityRecordStore::new();
        let summary = FragmentIngestor::default()
            .ingest(&[notes.clone(), orders], &mut store)
            .unwrap();

        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].path, notes);
        assert_eq!(store.total_lines(), 1);
        assert!(store.iter().all(|e| !e.lines().contains(&"x".to_string())));
    }

    #[test]
    fn test_reserved_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        let out = write(&dir, "entidad_rec.csv", "H\nold\n");

        let mut store = EntityRecordStore::new();
        let summary = FragmentIngestor::default().ingest(&[out], &mut store).unwrap();

        assert!(store.is_empty());
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_empty_file_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let empty = write(&dir, "orders_1.csv", "");
        let only_header = write(&dir, "orders_2.csv", "H\n");

        let mut store = EntityRecordStore::new();
        let summary = FragmentIngestor::default()
            .ingest(&[empty, only_header], &mut store)
            .unwrap();

        assert_eq!(store.total_lines(), 0);
        assert_eq!(summary.ingested[0].header, None);
        assert_eq!(summary.first_header(), Some("H"));
    }

    #[test]
    fn test_missing_file_aborts_with_path() {
        let dir = TempDir::new().unwrap();
        let ok = write(&dir, "orders_1.csv", "H\n1\n");
        let missing = dir.path().join("orders_2.csv");

        let mut store = EntityRecordStore::new();
        let err = FragmentIngestor::default()
            .ingest(&[ok, missing.clone()], &mut store)
            .unwrap_err();

        match err {
            MergeError::FragmentRead { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
        // Already-ingested data is not rolled back
        assert_eq!(store.get("orders").unwrap().lines(), ["1"]);
    }

    #[test]
    fn test_invalid_utf8_is_a_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_1.csv");
        fs::write(&path, b"H\n\xff\xfe\n").unwrap();

        let mut store = EntityRecordStore::new();
        let err = FragmentIngestor::default().ingest(&[path], &mut store).unwrap_err();
        assert!(matches!(err, MergeError::FragmentRead { .. }));
    }

    #[test]
    fn test_crlf_lines_are_trimmed() {
        let dir = TempDir::new().unwrap();
        let f = write(&dir, "orders_1.csv", "H\r\n1,a\r\n2,b\r\n");

        let mut store = EntityRecordStore::new();
        FragmentIngestor::default().ingest(&[f], &mut store).unwrap();
        assert_eq!(store.get("orders").unwrap().lines(), ["1,a", "2,b"]);
    }
}
