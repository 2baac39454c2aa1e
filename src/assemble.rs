// 🧾 Output Assembler - header + clean sequence → final record sequence

use crate::config::HeaderPolicy;
use crate::ingest::IngestSummary;

/// Header line (if any) followed by the clean sequence.
/// A missing or blank header means the output starts with the data.
pub fn assemble(header: Option<&str>, clean: &[String]) -> Vec<String> {
    let header = header.map(str::trim).filter(|h| !h.is_empty());

    let mut output = Vec::with_capacity(clean.len() + 1);
    if let Some(h) = header {
        output.push(h.to_string());
    }
    output.extend(clean.iter().cloned());
    output
}

/// Pick the output header for a run
pub fn resolve_header(policy: &HeaderPolicy, summary: &IngestSummary) -> Option<String> {
    match policy {
        HeaderPolicy::FirstFragment => summary.first_header().map(str::to_string),
        HeaderPolicy::Fixed(h) => Some(h.trim().to_string()).filter(|h| !h.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestedFragment;
    use std::path::PathBuf;

    fn clean(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn fragment(header: Option<&str>) -> IngestedFragment {
        IngestedFragment {
            path: PathBuf::from("e_1.csv"),
            entity: "e".to_string(),
            header: header.map(str::to_string),
            lines_added: 0,
        }
    }

    #[test]
    fn test_header_first() {
        let out = assemble(Some("H"), &clean(&["a", "b", "c"]));
        assert_eq!(out, vec!["H", "a", "b", "c"]);
    }

    #[test]
    fn test_missing_or_blank_header() {
        let data = clean(&["a"]);
        assert_eq!(assemble(None, &data), vec!["a"]);
        assert_eq!(assemble(Some("   "), &data), vec!["a"]);
    }

    #[test]
    fn test_header_is_trimmed() {
        assert_eq!(assemble(Some(" id,name \r"), &[]), vec!["id,name"]);
    }

    #[test]
    fn test_data_line_is_never_promoted_to_header() {
        let out = assemble(None, &clean(&["id,name", "1,a"]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_resolve_first_fragment_skips_empty_and_blank() {
        let summary = IngestSummary {
            ingested: vec![fragment(None), fragment(Some("  ")), fragment(Some("H1")), fragment(Some("H2"))],
            skipped: Vec::new(),
        };
        assert_eq!(
            resolve_header(&HeaderPolicy::FirstFragment, &summary),
            Some("H1".to_string())
        );
    }

    #[test]
    fn test_resolve_fixed() {
        let summary = IngestSummary {
            ingested: vec![fragment(Some("ignored"))],
            skipped: Vec::new(),
        };
        let policy = HeaderPolicy::Fixed("id,total".to_string());
        assert_eq!(resolve_header(&policy, &summary), Some("id,total".to_string()));
        assert_eq!(resolve_header(&HeaderPolicy::Fixed(" ".into()), &summary), None);
    }
}
