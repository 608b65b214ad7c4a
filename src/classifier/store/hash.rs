use std::collections::HashMap;

use ahash::RandomState;

use super::{CategoryIndexer, PruneStats, TermCategoryStore};
use crate::classifier::category::CategoryEntries;

/// Array-backed term store.
///
/// Each term owns one dense count row indexed by category id. With few,
/// stable categories this avoids any per-entry map overhead; a row is a
/// plain `Vec<u64>`. Rows grow lazily, so terms trained before a category
/// appeared simply keep a shorter row and report zero for it.
#[derive(Debug, Clone, Default)]
pub struct HashStore {
    indexer: CategoryIndexer,
    table: HashMap<Box<str>, Vec<u64>, RandomState>,
    term_total: u64,
    entry_total: usize,
}

impl HashStore {
    pub fn new() -> Self {
        HashStore {
            indexer: CategoryIndexer::new(),
            table: HashMap::with_hasher(RandomState::new()),
            term_total: 0,
            entry_total: 0,
        }
    }

    fn row_entries(&self, row: &[u64]) -> CategoryEntries {
        let mut entries = CategoryEntries::new();
        for (id, &count) in row.iter().enumerate() {
            if count > 0 {
                // the id was interned by this store, the name lookup cannot miss
                if let Some(name) = self.indexer.name(id as u32) {
                    entries.increment(name, count);
                }
            }
        }
        entries
    }
}

impl TermCategoryStore for HashStore {
    fn increment(&mut self, term: &str, category: &str, delta: u64) {
        let id = self.indexer.intern(category) as usize;
        let row = self.table.entry(Box::from(term)).or_default();
        if row.len() <= id {
            row.resize(id + 1, 0);
        }
        if row[id] == 0 {
            self.entry_total += 1;
        }
        row[id] += delta;
        self.term_total += delta;
    }

    fn entries(&self, term: &str) -> CategoryEntries {
        match self.table.get(term) {
            Some(row) => self.row_entries(row),
            None => CategoryEntries::new(),
        }
    }

    #[inline]
    fn contains_term(&self, term: &str) -> bool {
        self.table.contains_key(term)
    }

    #[inline]
    fn num_uniq_terms(&self) -> usize {
        self.table.len()
    }

    #[inline]
    fn num_terms(&self) -> u64 {
        self.term_total
    }

    #[inline]
    fn num_entries(&self) -> usize {
        self.entry_total
    }

    fn for_each_term<F>(&self, mut f: F)
    where
        F: FnMut(&str, &CategoryEntries),
    {
        for (term, row) in &self.table {
            let entries = self.row_entries(row);
            f(term, &entries);
        }
    }

    fn retain<F>(&mut self, mut keep: F) -> PruneStats
    where
        F: FnMut(&str, &CategoryEntries) -> bool,
    {
        let mut stats = PruneStats::default();
        let mut removed_entries = 0usize;
        // the closure cannot borrow self, so entries are rebuilt from the
        // indexer captured by reference
        let indexer = &self.indexer;
        self.table.retain(|term, row| {
            let mut entries = CategoryEntries::new();
            for (id, &count) in row.iter().enumerate() {
                if count > 0 {
                    if let Some(name) = indexer.name(id as u32) {
                        entries.increment(name, count);
                    }
                }
            }
            if keep(term, &entries) {
                true
            } else {
                stats.removed_terms += 1;
                removed_entries += entries.num_categories();
                for (category, count) in entries.iter() {
                    stats.removed_counts.increment(category, count);
                }
                false
            }
        });
        self.term_total -= stats.removed_counts.total_count();
        self.entry_total -= removed_entries;
        stats
    }

    fn clear(&mut self) {
        self.indexer.clear();
        self.table.clear();
        self.term_total = 0;
        self.entry_total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_and_lookup() {
        let mut store = HashStore::new();
        store.increment("foo", "a", 1);
        store.increment("foo", "b", 2);
        store.increment("bar", "b", 1);

        let entries = store.entries("foo");
        assert_eq!(entries.count("a"), 1);
        assert_eq!(entries.count("b"), 2);
        assert_eq!(entries.total_count(), 3);

        assert_eq!(store.num_uniq_terms(), 2);
        assert_eq!(store.num_terms(), 4);
        assert_eq!(store.num_entries(), 3);
    }

    #[test]
    fn unseen_term_yields_empty_entries() {
        let store = HashStore::new();
        let entries = store.entries("nothing");
        assert!(entries.is_empty());
        assert_eq!(entries.probability("a"), 0.0);
    }

    #[test]
    fn rows_grow_with_late_categories() {
        let mut store = HashStore::new();
        store.increment("early", "a", 1);
        store.increment("late", "b", 1);
        // "early" was trained before "b" existed
        assert_eq!(store.entries("early").count("b"), 0);
        assert_eq!(store.entries("late").count("b"), 1);
    }

    #[test]
    fn retain_updates_aggregates() {
        let mut store = HashStore::new();
        store.increment("keep", "a", 5);
        store.increment("drop", "a", 1);
        store.increment("drop", "b", 1);

        let stats = store.retain(|_, entries| entries.total_count() >= 3);
        assert_eq!(stats.removed_terms, 1);
        assert_eq!(stats.removed_counts.count("a"), 1);
        assert_eq!(stats.removed_counts.count("b"), 1);

        assert_eq!(store.num_uniq_terms(), 1);
        assert_eq!(store.num_terms(), 5);
        assert_eq!(store.num_entries(), 1);
        assert!(!store.contains_term("drop"));
    }
}
