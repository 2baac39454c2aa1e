// 📂 Fragment Discovery - candidate CSV files in the input directory
//
// Candidates = regular files ending in .csv (any case), minus the reserved
// output file, sorted by path. Selection turns user input into a subset.

use crate::classifier::FilenameClassifier;
use crate::error::{MergeError, MergeResult};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// ============================================================================
// CANDIDATES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub line_count: usize,
}

impl Candidate {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Fails with InvalidDirectory if `dir` is missing or not a directory
pub fn validate_directory(dir: &Path) -> MergeResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(MergeError::InvalidDirectory {
            path: dir.to_path_buf(),
        })
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Sorted candidate CSV paths in `dir`
pub fn list_candidates(dir: &Path, classifier: &FilenameClassifier) -> MergeResult<Vec<PathBuf>> {
    validate_directory(dir)?;

    let listing_err = |source| MergeError::DirectoryListing {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_err)? {
        let path = entry.map_err(listing_err)?.path();
        if !path.is_file() || !has_csv_extension(&path) {
            continue;
        }
        let reserved = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| classifier.is_reserved(n));
        if !reserved {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Candidates with size and line count for display.
/// Unreadable files show 0 lines; the real error surfaces at ingestion.
pub fn describe_candidates(paths: &[PathBuf]) -> Vec<Candidate> {
    paths
        .iter()
        .map(|path| Candidate {
            path: path.clone(),
            size_bytes: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            line_count: count_lines(path),
        })
        .collect()
}

fn count_lines(path: &Path) -> usize {
    match fs::File::open(path) {
        Ok(f) => BufReader::new(f).lines().map_while(Result::ok).count(),
        Err(_) => 0,
    }
}

/// True if `dir` is a directory with at least one candidate
pub fn has_candidates(dir: &Path, classifier: &FilenameClassifier) -> bool {
    list_candidates(dir, classifier).is_ok_and(|c| !c.is_empty())
}

// ============================================================================
// SELECTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Zero-based indices into the candidate list, in the order given
    Indices(Vec<usize>),
}

impl Selection {
    /// Parse user input against `available` candidates.
    ///
    /// - blank, `all` or `todos`: everything
    /// - `a-b`: inclusive 1-based range, clamped to `available`
    /// - `1,3,5`: 1-based indices, out-of-range ones ignored
    pub fn parse(input: &str, available: usize) -> Result<Selection, String> {
        let input = input.trim();
        if input.is_empty()
            || input.eq_ignore_ascii_case("all")
            || input.eq_ignore_ascii_case("todos")
        {
            return Ok(Selection::All);
        }

        let indices = if let Some((start, end)) = input.split_once('-') {
            let start = parse_number(start)?;
            let end = parse_number(end)?;
            (start.max(1)..=end.min(available))
                .map(|n| n - 1)
                .collect::<Vec<_>>()
        } else {
            let mut indices = Vec::new();
            for part in input.split(',') {
                let n = parse_number(part)?;
                if (1..=available).contains(&n) {
                    indices.push(n - 1);
                }
            }
            indices
        };

        if indices.is_empty() {
            return Err(format!("no file matches '{input}' (valid: 1-{available})"));
        }
        Ok(Selection::Indices(indices))
    }

    /// Apply to a candidate list
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self {
            Selection::All => items.to_vec(),
            Selection::Indices(indices) => indices
                .iter()
                .filter_map(|&i| items.get(i).cloned())
                .collect(),
        }
    }
}

fn parse_number(s: &str) -> Result<usize, String> {
    s.trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a number", s.trim()))
}

// ============================================================================
// TESTS
// ============================================================================
