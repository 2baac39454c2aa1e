// ⚙️ Configuration - optional fragmerge.json in the working directory

use crate::classifier::DEFAULT_OUTPUT_FILE;
use crate::error::{MergeError, MergeResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory
pub const CONFIG_FILE: &str = "fragmerge.json";

/// Default input directory, relative to the working directory
pub const DEFAULT_INPUT_DIR: &str = "csv";

/// Where the output header comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "policy", content = "value")]
pub enum HeaderPolicy {
    /// First line of the first ingested fragment that has one
    #[default]
    FirstFragment,

    /// Fixed header string
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub input_dir: PathBuf,
    pub output_file: String,
    pub header: HeaderPolicy,

    /// Lines shown by the content preview
    pub preview_lines: usize,

    /// Confirmed duplicates listed by the duplicate analysis
    pub duplicate_preview: usize,

    /// Max characters of a duplicate value before truncation
    pub duplicate_width: usize,

    /// Write a JSON run summary here when set
    pub summary_json: Option<PathBuf>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            header: HeaderPolicy::FirstFragment,
            preview_lines: 15,
            duplicate_preview: 10,
            duplicate_width: 60,
            summary_json: None,
        }
    }
}

impl MergeConfig {
    /// Load `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> MergeResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(MergeError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| MergeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `fragmerge.json` from `root`
    pub fn load_from_dir(root: &Path) -> MergeResult<Self> {
        Self::load(&root.join(CONFIG_FILE))
    }

    /// Input directory resolved against `root` (absolute paths kept as-is)
    pub fn resolved_input_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.input_dir)
    }
}
