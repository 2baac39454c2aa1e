// 🔍 Deduplication - stable first-occurrence dedup with frequency accounting
//
// Single linear pass over the flat sequence:
// - count 0 → 1: value joins the clean sequence
// - count 1 → 2: value is recorded once as a confirmed duplicate
// - count ≥ 2:   only the count grows
//
// Blank values get no special treatment here (the ingestor filters them).

use std::collections::HashMap;

// ============================================================================
// OCCURRENCE INDEX
// ============================================================================

/// Per-value bookkeeping: position in the clean sequence + running count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Index of the first occurrence within the clean sequence
    pub first_seen: usize,

    /// Number of times the value appeared in the flat sequence
    pub count: usize,
}

/// Insertion-ordered value index: hash lookup for counts, Vec for order
#[derive(Debug, Default, Clone)]
struct OccurrenceIndex {
    positions: HashMap<String, Occurrence>,
    order: Vec<String>,
}

impl OccurrenceIndex {
    /// Record one occurrence of `value`; returns the updated count
    fn observe(&mut self, value: &str) -> usize {
        if let Some(occ) = self.positions.get_mut(value) {
            occ.count += 1;
            return occ.count;
        }

        let first_seen = self.order.len();
        self.order.push(value.to_string());
        self.positions.insert(
            value.to_string(),
            Occurrence {
                first_seen,
                count: 1,
            },
        );
        1
    }
}

// ============================================================================
// DUPLICATE REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Final count for every distinct value (count = 1 included)
    counts: HashMap<String, Occurrence>,

    /// Values in the order their SECOND occurrence was met
    confirmed: Vec<String>,
}

impl DuplicateReport {
    /// Values whose count reached 2, in confirmation order
    pub fn confirmed(&self) -> &[String] {
        &self.confirmed
    }

    /// Final occurrence count of `value` (0 if never seen)
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).map_or(0, |occ| occ.count)
    }

    pub fn occurrence(&self, value: &str) -> Option<Occurrence> {
        self.counts.get(value).copied()
    }

    /// Number of distinct values seen
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True if no value repeated
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }

    /// Lines dropped from the flat sequence: Σ(count - 1)
    pub fn removed(&self) -> usize {
        self.confirmed.iter().map(|v| self.count(v) - 1).sum()
    }

    /// Confirmed duplicates paired with their final counts
    pub fn confirmed_with_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.confirmed.iter().map(|v| (v.as_str(), self.count(v)))
    }
}

// ============================================================================
// DEDUPLICATOR
// ============================================================================

/// Result of one dedup pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupResult {
    /// Flat sequence reduced to first occurrences, order preserved
    pub clean: Vec<String>,
    pub report: DuplicateReport,
}

#[derive(Debug, Default)]
pub struct Deduplicator;

impl Deduplicator {
    pub fn new() -> Self {
        Deduplicator
    }

    /// O(n) time, O(distinct) space
    pub fn dedup<S: AsRef<str>>(&self, flat: &[S]) -> DedupResult {
        let mut index = OccurrenceIndex::default();
        let mut confirmed = Vec::new();

        for value in flat {
            let value = value.as_ref();
            if index.observe(value) == 2 {
                confirmed.push(value.to_string());
            }
        }

        DedupResult {
            clean: index.order,
            report: DuplicateReport {
                counts: index.positions,
                confirmed,
            },
        }
    }
}

/// Convenience wrapper around `Deduplicator::dedup`
pub fn dedup<S: AsRef<str>>(flat: &[S]) -> DedupResult {
    Deduplicator::new().dedup(flat)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let result = dedup(&["a", "b", "a", "c", "b"]);

        assert_eq!(result.clean, vec!["a", "b", "c"]);
        assert_eq!(result.report.confirmed(), ["a", "b"]);
        assert_eq!(result.report.count("a"), 2);
        assert_eq!(result.report.count("b"), 2);
        assert_eq!(result.report.count("c"), 1);
        assert_eq!(result.report.count("zzz"), 0);
    }

    #[test]
    fn test_confirmed_recorded_once_in_second_occurrence_order() {
        // "b" reaches 2 before "a" does
        let result = dedup(&["a", "b", "b", "b", "a", "a"]);

        assert_eq!(result.report.confirmed(), ["b", "a"]);
        assert_eq!(result.report.count("b"), 3);
        assert_eq!(result.report.count("a"), 3);
        assert_eq!(result.clean, vec!["a", "b"]);
    }

    #[test]
    fn test_length_invariant() {
        let flat = ["x", "y", "x", "x", "z", "y", "w"];
        let result = dedup(&flat);

        assert_eq!(result.clean.len() + result.report.removed(), flat.len());
        assert_eq!(result.report.distinct(), result.clean.len());
    }

    #[test]
    fn test_no_repeats_means_equal_length() {
        let flat = ["1", "2", "3"];
        let result = dedup(&flat);

        assert_eq!(result.clean.len(), flat.len());
        assert!(result.report.is_empty());
        assert_eq!(result.report.removed(), 0);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let first = dedup(&["q", "r", "q", "s", "r"]);
        let second = dedup(&first.clean);

        assert_eq!(second.clean, first.clean);
        assert!(second.report.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = dedup::<&str>(&[]);
        assert!(result.clean.is_empty());
        assert_eq!(result.report.distinct(), 0);
    }

    #[test]
    fn test_blank_values_are_ordinary_strings() {
        let result = dedup(&["", " ", "", "a"]);
        assert_eq!(result.clean, vec!["", " ", "a"]);
        assert_eq!(result.report.confirmed(), [""]);
    }

    #[test]
    fn test_exact_string_equality() {
        let result = dedup(&["A", "a", "a ", "A"]);
        assert_eq!(result.clean, vec!["A", "a", "a "]);
        assert_eq!(result.report.confirmed(), ["A"]);
    }

    #[test]
    fn test_occurrence_first_seen_points_into_clean() {
        let result = dedup(&["m", "n", "m", "o"]);
        for (i, value) in result.clean.iter().enumerate() {
            assert_eq!(result.report.occurrence(value).unwrap().first_seen, i);
        }
    }

    #[test]
    fn test_counts_recoverable_from_report_and_clean() {
        let flat = ["a", "b", "a", "c", "b", "a"];
        let result = dedup(&flat);

        for value in &result.clean {
            let expected = flat.iter().filter(|v| *v == value).count();
            assert_eq!(result.report.count(value), expected);
        }
        let pairs: Vec<(&str, usize)> = result.report.confirmed_with_counts().collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 2)]);
    }
}
