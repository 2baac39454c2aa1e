// 📦 Entity Record Store - data lines grouped by entity name
//
// Single choke point for the "no blank lines, append-only" invariant:
// callers only get_or_create / append_line, never touch the map directly.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

// ============================================================================
// ENTITY
// ============================================================================

/// One logical dataset reconstructed from its fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Name parsed from the fragment filenames (case-sensitive identity)
    name: String,

    /// Trimmed, non-blank data lines in file-then-line order
    lines: Vec<String>,

    /// Fragment files that contributed to this entity, in ingestion order
    fragments: Vec<PathBuf>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            lines: Vec::new(),
            fragments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn fragments(&self) -> &[PathBuf] {
        &self.fragments
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Append a line; returns false if it was blank and therefore dropped
    fn push_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.lines.push(trimmed.to_string());
        true
    }
}

// ============================================================================
// ENTITY RECORD STORE
// ============================================================================

/// Entities keyed by name; enumerates in first-seen order
#[derive(Debug, Default, Clone)]
pub struct EntityRecordStore {
    entities: IndexMap<String, Entity>,
}

impl EntityRecordStore {
    pub fn new() -> Self {
        EntityRecordStore {
            entities: IndexMap::new(),
        }
    }

    /// Existing entity for `name`, or a new empty one (idempotent by name)
    pub fn get_or_create(&mut self, name: &str) -> &Entity {
        self.entry(name)
    }

    /// Append a trimmed line to `name`; blank lines are a no-op.
    /// Returns true if the line was stored.
    pub fn append_line(&mut self, name: &str, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        self.entry(name).push_line(line)
    }

    /// Remember that `path` contributed to `name` (creates the entity)
    pub fn record_fragment(&mut self, name: &str, path: &Path) {
        self.entry(name).fragments.push(path.to_path_buf());
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Read-only view of every entity, in enumeration order
    pub fn all_entities(&self) -> Vec<&Entity> {
        self.entities.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total stored lines across all entities
    pub fn total_lines(&self) -> usize {
        self.entities.values().map(Entity::line_count).sum()
    }

    fn entry(&mut self, name: &str) -> &mut Entity {
        self.entities
            .entry(name.to_string())
            .or_insert_with(|| Entity::new(name))
    }
}

// ============================================================================
// TESTS
// ============================================================================
