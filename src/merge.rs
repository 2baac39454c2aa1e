// 🔗 Merger - EntityRecordStore → one flat record sequence

use crate::entity::EntityRecordStore;

/// Concatenate every entity's lines, entity by entity, each in original order
pub fn merge(store: &EntityRecordStore) -> Vec<String> {
    let mut flat = Vec::with_capacity(store.total_lines());
    for entity in store.iter() {
        flat.extend(entity.lines().iter().cloned());
    }
    flat
}
