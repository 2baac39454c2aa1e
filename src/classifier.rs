// 🏷️ Filename Classifier - fragment filename → entity name
//
// "orders_12.csv" → Some("orders")
// "a_b_3.csv"     → Some("a_b")   (greedy: everything before the LAST _<digits>.csv)
// "orders.csv"    → None

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Default name of the consolidated output (never an input fragment)
pub const DEFAULT_OUTPUT_FILE: &str = "entidad_rec.csv";

fn fragment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Anchored to the whole filename; ASCII digits only, extension is case-insensitive
    PATTERN.get_or_init(|| Regex::new(r"^(.+)_[0-9]+\.(?i:csv)$").expect("fragment pattern is valid"))
}

/// Classifies fragment filenames and recognizes the reserved output name
#[derive(Debug, Clone)]
pub struct FilenameClassifier {
    reserved: String,
}

impl FilenameClassifier {
    /// Classifier that reserves the default output filename
    pub fn new() -> Self {
        Self::with_reserved(DEFAULT_OUTPUT_FILE)
    }

    /// Classifier that reserves a custom output filename
    pub fn with_reserved(reserved: impl Into<String>) -> Self {
        FilenameClassifier {
            reserved: reserved.into(),
        }
    }

    /// True if `filename` is the reserved output (case-insensitive)
    pub fn is_reserved(&self, filename: &str) -> bool {
        filename.eq_ignore_ascii_case(&self.reserved)
    }

    /// Entity name for a fragment filename, or None if it is not a fragment
    pub fn classify(&self, filename: &str) -> Option<String> {
        if self.is_reserved(filename) {
            return None;
        }

        fragment_pattern()
            .captures(filename)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Same as `classify`, on the final component of a path
    pub fn classify_path(&self, path: &Path) -> Option<String> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.classify(n))
    }
}

impl Default for FilenameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
