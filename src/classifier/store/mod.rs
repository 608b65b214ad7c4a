pub mod hash;
pub mod trie;

use std::collections::HashMap;

use ahash::RandomState;

use super::category::CategoryEntries;

pub use hash::HashStore;
pub use trie::TrieStore;

/// Bidirectional category name to index table.
///
/// Category labels are plain strings discovered during training. Interning
/// them once keeps the per-term structures small: both stores record counts
/// against a `u32` id instead of repeating the name.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndexer {
    names: Vec<Box<str>>,
    ids: HashMap<Box<str>, u32, RandomState>,
}

impl CategoryIndexer {
    pub fn new() -> Self {
        CategoryIndexer {
            names: Vec::new(),
            ids: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// The id for `name`, assigning the next free one if unseen.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(Box::from(name));
        self.ids.insert(Box::from(name), id);
        id
    }

    #[inline]
    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    #[inline]
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(|n| n.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.ids.clear();
    }
}

/// Aggregates removed by one `retain` pass over a store.
#[derive(Debug, Clone, Default)]
pub struct PruneStats {
    /// Number of terms whose entries were removed.
    pub removed_terms: usize,
    /// The per-category counts the removed terms carried.
    pub removed_counts: CategoryEntries,
}

/// A store mapping each term to its per-category counts.
///
/// The two implementations trade space differently: `HashStore` keeps one
/// dense count row per term and is optimal for few categories, `TrieStore`
/// shares term prefixes and is optimal for large character n-gram
/// vocabularies. Both report identical entries and aggregates for the same
/// sequence of `increment` calls.
///
/// Mutation is single-threaded by design; a store that is no longer
/// mutated can be read from many threads.
pub trait TermCategoryStore: Default {
    /// Add `delta` to the `(term, category)` count, creating the term's
    /// entry set if absent.
    fn increment(&mut self, term: &str, category: &str, delta: u64);

    /// The category counts for `term`, or the canonical empty entries when
    /// the term is unseen. Never an error.
    fn entries(&self, term: &str) -> CategoryEntries;

    fn contains_term(&self, term: &str) -> bool;

    /// Number of distinct terms with at least one stored entry.
    fn num_uniq_terms(&self) -> usize;

    /// Sum of all counts over all terms.
    fn num_terms(&self) -> u64;

    /// Number of stored `(term, category)` pairs.
    fn num_entries(&self) -> usize;

    /// Visit every term with its entries. Iteration order is an
    /// implementation detail; callers needing determinism must sort.
    fn for_each_term<F>(&self, f: F)
    where
        F: FnMut(&str, &CategoryEntries);

    /// Keep only the terms for which `keep` returns `true`, physically
    /// removing everything else, and report what was removed.
    fn retain<F>(&mut self, keep: F) -> PruneStats
    where
        F: FnMut(&str, &CategoryEntries) -> bool;

    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexer_round_trip() {
        let mut indexer = CategoryIndexer::new();
        let a = indexer.intern("alpha");
        let b = indexer.intern("beta");
        assert_ne!(a, b);
        assert_eq!(indexer.intern("alpha"), a);
        assert_eq!(indexer.id("beta"), Some(b));
        assert_eq!(indexer.name(a), Some("alpha"));
        assert_eq!(indexer.id("gamma"), None);
        assert_eq!(indexer.len(), 2);
    }
}
