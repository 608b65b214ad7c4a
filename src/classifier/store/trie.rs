use super::{CategoryIndexer, PruneStats, TermCategoryStore};
use crate::classifier::category::CategoryEntries;

/// Trie-backed term store.
///
/// Terms are keyed by their UTF-8 bytes in a character trie, so vocabularies
/// with many shared prefixes (typical for character n-grams) share storage.
/// Nodes live in one arena `Vec`; children are looked up by a linear scan
/// over a small sorted vector, which beats a per-node map for the narrow
/// fan-out real term data shows.
///
/// Counts sit directly on the node that terminates a term, as a sparse
/// `(category id, count)` list.
#[derive(Debug, Clone)]
pub struct TrieStore {
    indexer: CategoryIndexer,
    nodes: Vec<TrieNode>,
    term_total: u64,
    uniq_terms: usize,
    entry_total: usize,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// `(byte, child index)`, sorted by byte.
    children: Vec<(u8, u32)>,
    /// `(category id, count)`, in first-seen order.
    counts: Vec<(u32, u64)>,
}

const ROOT: usize = 0;

impl Default for TrieStore {
    fn default() -> Self {
        TrieStore::new()
    }
}

impl TrieStore {
    pub fn new() -> Self {
        TrieStore {
            indexer: CategoryIndexer::new(),
            nodes: vec![TrieNode::default()],
            term_total: 0,
            uniq_terms: 0,
            entry_total: 0,
        }
    }

    /// Walk to the node for `term`, creating missing nodes on the way.
    fn node_for_insert(&mut self, term: &str) -> usize {
        let mut idx = ROOT;
        for &byte in term.as_bytes() {
            idx = match self.nodes[idx].children.binary_search_by_key(&byte, |c| c.0) {
                Ok(pos) => self.nodes[idx].children[pos].1 as usize,
                Err(pos) => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[idx].children.insert(pos, (byte, child as u32));
                    child
                }
            };
        }
        idx
    }

    /// Walk to the node for `term` without creating anything.
    fn node_for_lookup(&self, term: &str) -> Option<usize> {
        let mut idx = ROOT;
        for &byte in term.as_bytes() {
            let children = &self.nodes[idx].children;
            match children.binary_search_by_key(&byte, |c| c.0) {
                Ok(pos) => idx = children[pos].1 as usize,
                Err(_) => return None,
            }
        }
        Some(idx)
    }

    fn node_entries(&self, idx: usize) -> CategoryEntries {
        let mut entries = CategoryEntries::new();
        for &(id, count) in &self.nodes[idx].counts {
            if let Some(name) = self.indexer.name(id) {
                entries.increment(name, count);
            }
        }
        entries
    }

    /// Depth-first walk over all nodes carrying counts.
    /// `key` accumulates the term bytes along the current path.
    fn walk<F>(&self, idx: usize, key: &mut Vec<u8>, f: &mut F)
    where
        F: FnMut(&str, &CategoryEntries),
    {
        if !self.nodes[idx].counts.is_empty() {
            // keys are built from term bytes, so they are valid UTF-8
            let term = String::from_utf8_lossy(key);
            let entries = self.node_entries(idx);
            f(&term, &entries);
        }
        for &(byte, child) in &self.nodes[idx].children {
            key.push(byte);
            self.walk(child as usize, key, f);
            key.pop();
        }
    }
}

impl TermCategoryStore for TrieStore {
    fn increment(&mut self, term: &str, category: &str, delta: u64) {
        let id = self.indexer.intern(category);
        let idx = self.node_for_insert(term);
        let node = &mut self.nodes[idx];
        if node.counts.is_empty() {
            self.uniq_terms += 1;
        }
        match node.counts.iter_mut().find(|(cid, _)| *cid == id) {
            Some((_, count)) => *count += delta,
            None => {
                node.counts.push((id, delta));
                self.entry_total += 1;
            }
        }
        self.term_total += delta;
    }

    fn entries(&self, term: &str) -> CategoryEntries {
        match self.node_for_lookup(term) {
            Some(idx) => self.node_entries(idx),
            None => CategoryEntries::new(),
        }
    }

    fn contains_term(&self, term: &str) -> bool {
        self.node_for_lookup(term)
            .map(|idx| !self.nodes[idx].counts.is_empty())
            .unwrap_or(false)
    }

    #[inline]
    fn num_uniq_terms(&self) -> usize {
        self.uniq_terms
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
        let mut key = Vec::new();
        self.walk(ROOT, &mut key, &mut f);
    }

    /// Pruning rebuilds the arena from the surviving terms, so removed
    /// entries and the nodes that only served them are physically gone.
    fn retain<F>(&mut self, mut keep: F) -> PruneStats
    where
        F: FnMut(&str, &CategoryEntries) -> bool,
    {
        let mut stats = PruneStats::default();
        let mut survivors: Vec<(String, Vec<(u32, u64)>)> = Vec::new();

        let mut key = Vec::new();
        collect(
            &self.nodes,
            &self.indexer,
            ROOT,
            &mut key,
            &mut keep,
            &mut survivors,
            &mut stats,
        );

        self.nodes.clear();
        self.nodes.push(TrieNode::default());
        self.term_total = 0;
        self.uniq_terms = 0;
        self.entry_total = 0;

        for (term, counts) in survivors {
            let idx = self.node_for_insert(&term);
            self.term_total += counts.iter().map(|&(_, c)| c).sum::<u64>();
            self.entry_total += counts.len();
            self.uniq_terms += 1;
            self.nodes[idx].counts = counts;
        }
        stats
    }

    fn clear(&mut self) {
        self.indexer.clear();
        self.nodes.clear();
        self.nodes.push(TrieNode::default());
        self.term_total = 0;
        self.uniq_terms = 0;
        self.entry_total = 0;
    }
}

/// Free function so the recursion can run while `retain` holds `&mut self`.
fn collect<F>(
    nodes: &[TrieNode],
    indexer: &CategoryIndexer,
    idx: usize,
    key: &mut Vec<u8>,
    keep: &mut F,
    survivors: &mut Vec<(String, Vec<(u32, u64)>)>,
    stats: &mut PruneStats,
) where
    F: FnMut(&str, &CategoryEntries) -> bool,
{
    let node = &nodes[idx];
    if !node.counts.is_empty() {
        let term = String::from_utf8_lossy(key).into_owned();
        let mut entries = CategoryEntries::new();
        for &(id, count) in &node.counts {
            if let Some(name) = indexer.name(id) {
                entries.increment(name, count);
            }
        }
        if keep(&term, &entries) {
            survivors.push((term, node.counts.clone()));
        } else {
            stats.removed_terms += 1;
            for (category, count) in entries.iter() {
                stats.removed_counts.increment(category, count);
            }
        }
    }
    for &(byte, child) in &node.children {
        key.push(byte);
        collect(nodes, indexer, child as usize, key, keep, survivors, stats);
        key.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_and_lookup() {
        let mut store = TrieStore::new();
        store.increment("the", "a", 1);
        store.increment("theme", "b", 2);
        store.increment("tea", "a", 1);
        store.increment("the", "b", 1);

        assert_eq!(store.entries("the").count("a"), 1);
        assert_eq!(store.entries("the").count("b"), 1);
        assert_eq!(store.entries("theme").count("b"), 2);
        assert!(store.entries("th").is_empty());
        assert!(store.entries("absent").is_empty());

        assert_eq!(store.num_uniq_terms(), 3);
        assert_eq!(store.num_terms(), 5);
        assert_eq!(store.num_entries(), 4);
    }

    #[test]
    fn prefix_of_a_term_is_not_a_term() {
        let mut store = TrieStore::new();
        store.increment("theme", "a", 1);
        assert!(!store.contains_term("the"));
        assert!(store.contains_term("theme"));
    }

    #[test]
    fn for_each_visits_every_term_once() {
        let mut store = TrieStore::new();
        store.increment("foo", "a", 1);
        store.increment("foobar", "a", 1);
        store.increment("bar", "b", 1);

        let mut seen = Vec::new();
        store.for_each_term(|term, _| seen.push(term.to_string()));
        seen.sort();
        assert_eq!(seen, vec!["bar", "foo", "foobar"]);
    }

    #[test]
    fn retain_rebuilds_the_arena() {
        let mut store = TrieStore::new();
        store.increment("aaa", "x", 1);
        store.increment("aab", "x", 4);
        store.increment("bbb", "y", 4);
        let nodes_before = store.nodes.len();

        let stats = store.retain(|_, entries| entries.total_count() >= 4);
        assert_eq!(stats.removed_terms, 1);
        assert_eq!(stats.removed_counts.count("x"), 1);

        assert_eq!(store.num_uniq_terms(), 2);
        assert_eq!(store.num_terms(), 8);
        assert_eq!(store.num_entries(), 2);
        assert!(!store.contains_term("aaa"));
        assert_eq!(store.entries("aab").count("x"), 4);
        // nodes only serving the removed term are gone
        assert!(store.nodes.len() < nodes_before);
    }

    #[test]
    fn multibyte_terms_survive_the_byte_trie() {
        let mut store = TrieStore::new();
        store.increment("日本語", "jp", 2);
        assert_eq!(store.entries("日本語").count("jp"), 2);
        let mut seen = Vec::new();
        store.for_each_term(|term, entries| seen.push((term.to_string(), entries.total_count())));
        assert_eq!(seen, vec![("日本語".to_string(), 2)]);
    }
}
