// 📊 Console Reporting - banners, summaries and previews
//
// All functions write to any io::Write so they can be tested against a Vec<u8>.

use crate::deduplication::DuplicateReport;
use crate::discovery::Candidate;
use crate::entity::EntityRecordStore;
use crate::error::{MergeError, MergeResult};
use crate::pipeline::MergeRun;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "🧩 Fragment Merge v{}", crate::VERSION)?;
    writeln!(out, "Rebuilds fragmented CSV files into one de-duplicated file")?;
    writeln!(out, "{RULE}")
}

pub fn print_candidates<W: Write>(out: &mut W, candidates: &[Candidate]) -> io::Result<()> {
    writeln!(out, "\n📂 CSV files found:")?;
    for (i, c) in candidates.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<25} ({} bytes, ~{} lines)",
            i + 1,
            c.file_name(),
            c.size_bytes,
            c.line_count
        )?;
    }
    Ok(())
}

pub fn print_entity_summary<W: Write>(out: &mut W, store: &EntityRecordStore) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "📋 Entities")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{:<20} {:>10} {:>12}", "ENTITY", "FRAGMENTS", "LINES")?;
    for entity in store.iter() {
        writeln!(
            out,
            "{:<20} {:>10} {:>12}",
            entity.name(),
            entity.fragments().len(),
            entity.line_count()
        )?;
    }
    writeln!(out, "{:<20} {:>10} {:>12}", "TOTAL", "", store.total_lines())
}

/// Cut `s` to `max` characters, appending "..." when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

pub fn print_duplicates<W: Write>(
    out: &mut W,
    report: &DuplicateReport,
    limit: usize,
    width: usize,
) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "🔍 Duplicate analysis")?;
    writeln!(out, "{RULE}")?;

    if report.is_empty() {
        return writeln!(out, "✅ No duplicated lines found.");
    }

    writeln!(out, "Found {} duplicated lines:\n", report.confirmed().len())?;
    for (i, (value, count)) in report.confirmed_with_counts().take(limit).enumerate() {
        writeln!(out, "{}. [{} occurrences] {}", i + 1, count, truncate(value, width))?;
    }

    let rest = report.confirmed().len().saturating_sub(limit);
    if rest > 0 {
        writeln!(out, "... and {rest} more duplicates.")?;
    }
    Ok(())
}

/// Share of the flat lines that dedup removed, in percent
pub fn reduction_percent(processed: usize, removed: usize) -> f64 {
    if removed == 0 || processed == 0 {
        0.0
    } else {
        removed as f64 * 100.0 / processed as f64
    }
}

pub fn print_final<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "🎉 Merge complete")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Lines processed:     {}", summary.lines_processed)?;
    writeln!(out, "Duplicates removed:  {}", summary.duplicates_removed)?;
    writeln!(out, "Final lines:         {}", summary.final_lines)?;
    writeln!(
        out,
        "Reduction:           {:.1}%",
        reduction_percent(summary.lines_processed, summary.duplicates_removed)
    )?;
    if let Some(path) = &summary.output {
        writeln!(out, "\n✓ Output: {}", path.display())?;
    }
    Ok(())
}

pub fn print_preview<W: Write>(out: &mut W, lines: &[String], limit: usize) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "📄 Output content")?;
    writeln!(out, "{RULE}")?;

    if lines.is_empty() {
        return writeln!(out, "The file is empty.");
    }

    let shown = limit.min(lines.len());
    writeln!(out, "First {shown} lines:\n")?;
    for (i, line) in lines.iter().take(shown).enumerate() {
        writeln!(out, "{:>3}: {}", i + 1, line)?;
    }
    if lines.len() > shown {
        writeln!(out, "\n... and {} more lines.", lines.len() - shown)?;
    }
    Ok(())
}

// ============================================================================
// RUN SUMMARY
// ============================================================================

/// Serializable outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub finished_at: DateTime<Utc>,
    pub entities: Vec<EntityStat>,
    pub skipped: Vec<PathBuf>,
    pub header: Option<String>,
    pub lines_processed: usize,
    pub duplicates_confirmed: usize,
    pub duplicates_removed: usize,
    pub final_lines: usize,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityStat {
    pub name: String,
    pub fragments: usize,
    pub lines: usize,
}

impl RunSummary {
    pub fn from_run(run: &MergeRun, output: Option<&Path>) -> Self {
        RunSummary {
            finished_at: Utc::now(),
            entities: run
                .store
                .iter()
                .map(|e| EntityStat {
                    name: e.name().to_string(),
                    fragments: e.fragments().len(),
                    lines: e.line_count(),
                })
                .collect(),
            skipped: run.ingest.skipped.iter().map(|s| s.path.clone()).collect(),
            header: run.header.clone(),
            lines_processed: run.flat.len(),
            duplicates_confirmed: run.dedup.report.confirmed().len(),
            duplicates_removed: run.dedup.report.removed(),
            final_lines: run.dedup.clean.len(),
            output: output.map(Path::to_path_buf),
        }
    }

    pub fn write_json(&self, path: &Path) -> MergeResult<()> {
        let write_err = |source| MergeError::SummaryWrite {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        std::fs::write(path, json).map_err(write_err)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deduplication::dedup;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ñandú", 2), "ña...");
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(reduction_percent(0, 0), 0.0);
        assert_eq!(reduction_percent(10, 0), 0.0);
        assert_eq!(reduction_percent(5, 2), 40.0);
    }

    #[test]
    fn test_duplicates_limit_and_rest() {
        let flat: Vec<String> = (0..12).flat_map(|i| [i.to_string(), i.to_string()]).collect();
        let result = dedup(&flat);

        let text = render(|out| print_duplicates(out, &result.report, 10, 60));
        assert!(text.contains("Found 12 duplicated lines"));
        assert!(text.contains("1. [2 occurrences] 0"));
        assert!(text.contains("... and 2 more duplicates."));
        assert!(!text.contains("11. "));
    }

    #[test]
    fn test_no_duplicates_message() {
        let result = dedup(&["a", "b"]);
        let text = render(|out| print_duplicates(out, &result.report, 10, 60));
        assert!(text.contains("No duplicated lines"));
    }

    #[test]
    fn test_preview() {
        let lines: Vec<String> = (1..=20).map(|i| format!("row{i}")).collect();
        let text = render(|out| print_preview(out, &lines, 15));
        assert!(text.contains(" 15: row15"));
        assert!(!text.contains("row16"));
        assert!(text.contains("... and 5 more lines."));

        let text = render(|out| print_preview(out, &[], 15));
        assert!(text.contains("The file is empty."));
    }

    fn summary() -> RunSummary {
        RunSummary {
            finished_at: Utc::now(),
            entities: vec![EntityStat {
                name: "clients".to_string(),
                fragments: 2,
                lines: 5,
            }],
            skipped: Vec::new(),
            header: Some("H".to_string()),
            lines_processed: 5,
            duplicates_confirmed: 2,
            duplicates_removed: 2,
            final_lines: 3,
            output: None,
        }
    }

    #[test]
    fn test_write_json_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        summary().write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["final_lines"], 3);
        assert_eq!(value["entities"][0]["name"], "clients");
    }

    #[test]
    fn test_write_json_failure_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("summary.json");

        match summary().write_json(&path).unwrap_err() {
            MergeError::SummaryWrite { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_entity_summary() {
        let mut store = EntityRecordStore::new();
        store.record_fragment("clients", Path::new("clients_1.csv"));
        store.append_line("clients", "a");
        store.append_line("clients", "b");

        let text = render(|out| print_entity_summary(out, &store));
        assert!(text.contains("clients"));
        assert!(text.lines().any(|l| l.starts_with("TOTAL") && l.trim_end().ends_with('2')));
    }
}
