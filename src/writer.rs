// 💾 Output Writer - final record sequence → UTF-8 file

use crate::error::{MergeError, MergeResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Write every line followed by the platform newline, replacing any existing file
pub fn write_output(path: &Path, lines: &[String]) -> MergeResult<()> {
    let write_err = |source| MergeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_bytes()).map_err(write_err)?;
        writer.write_all(LINE_ENDING.as_bytes()).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_lines_with_newlines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entidad_rec.csv");
        let lines = vec!["H".to_string(), "a".to_string(), "b".to_string()];

        write_output(&path, &lines).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("H{0}a{0}b{0}", LINE_ENDING));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old content that is longer\n").unwrap();

        write_output(&path, &["new".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("new{LINE_ENDING}"));
    }

    #[test]
    fn test_write_failure_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");

        let err = write_output(&path, &[]).unwrap_err();
        match err {
            MergeError::OutputWrite { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
