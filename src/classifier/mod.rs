pub mod category;
pub mod evaluate;
pub mod prune;
pub mod scorer;
pub mod serde;
pub mod store;
pub mod text;

use tracing::info;

use crate::feature::FeatureSetting;

use self::category::CategoryEntries;
use self::prune::PruningStrategy;
use self::store::{HashStore, TermCategoryStore, TrieStore};

/// Dictionary model trained with a hash table term store.
pub type DictionaryHashModel = DictionaryModel<HashStore>;
/// Dictionary model trained with a trie term store.
pub type DictionaryTrieModel = DictionaryModel<TrieStore>;

/// The term dictionary of a trained text classifier.
///
/// Composes a term store (`S`, chosen at construction time) with the
/// corpus-level statistics: how many documents each category was trained
/// with, and how many term occurrences each category contributed. The
/// model knows nothing about text; it consumes the term sets the
/// `Preprocessor` produces.
///
/// A model is created empty, filled by `add_document` calls, optionally
/// pruned once, and then only queried. Training from several threads at
/// once is not supported; querying a model that is no longer mutated is
/// safe from any number of threads.
///
/// `DictionaryModel<S>` has the following generic parameter:
/// - `S`: Term store backend (`TrieStore` by default, or `HashStore`)
///
/// Models trained over the same documents compare equal across backends.
#[derive(Debug, Clone, Default)]
pub struct DictionaryModel<S = TrieStore>
where
    S: TermCategoryStore,
{
    name: Option<String>,
    feature_setting: Option<FeatureSetting>,
    store: S,
    /// Per category: number of training documents.
    document_counts: CategoryEntries,
    /// Per category: sum of term occurrences contributed by its documents.
    term_counts: CategoryEntries,
}

impl<S> DictionaryModel<S>
where
    S: TermCategoryStore,
{
    /// Create a new empty model without a feature setting.
    pub fn new() -> Self {
        DictionaryModel {
            name: None,
            feature_setting: None,
            store: S::default(),
            document_counts: CategoryEntries::new(),
            term_counts: CategoryEntries::new(),
        }
    }

    /// Create a new empty model carrying the feature setting its terms
    /// will be extracted with.
    pub fn with_feature_setting(setting: FeatureSetting) -> Self {
        let mut model = Self::new();
        model.feature_setting = Some(setting);
        model
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }

    #[inline]
    pub fn feature_setting(&self) -> Option<&FeatureSetting> {
        self.feature_setting.as_ref()
    }

    /// Add one training document, given as its distinct term set and its
    /// category.
    ///
    /// Every term's count for `category` grows by one. Term frequency
    /// inside a single document deliberately does not matter; presence
    /// drives the dictionary, so callers pass a term *set*. Empty terms
    /// are skipped.
    pub fn add_document<T>(&mut self, terms: &[T], category: &str) -> &mut Self
    where
        T: AsRef<str>,
    {
        let mut added = 0u64;
        for term in terms {
            let term = term.as_ref();
            if term.is_empty() {
                continue;
            }
            self.store.increment(term, category, 1);
            added += 1;
        }
        self.document_counts.increment(category, 1);
        if added > 0 {
            self.term_counts.increment(category, added);
        }
        self
    }

    /// The category counts for `term`. Unseen terms yield the canonical
    /// empty entries with probability 0 for every category, never an
    /// error.
    #[inline]
    pub fn category_entries(&self, term: &str) -> CategoryEntries {
        self.store.entries(term)
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.store.contains_term(term)
    }

    /// All categories observed during training, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        self.document_counts
            .iter()
            .map(|(category, _)| category.to_string())
            .collect()
    }

    /// Per-category training document counts; their probabilities are the
    /// category priors.
    #[inline]
    pub fn priors(&self) -> &CategoryEntries {
        &self.document_counts
    }

    /// Per-category term occurrence totals.
    #[inline]
    pub fn term_counts(&self) -> &CategoryEntries {
        &self.term_counts
    }

    #[inline]
    pub fn num_categories(&self) -> usize {
        self.document_counts.num_categories()
    }

    /// Number of distinct terms in the dictionary.
    #[inline]
    pub fn num_uniq_terms(&self) -> usize {
        self.store.num_uniq_terms()
    }

    /// Sum over all terms of their total counts.
    #[inline]
    pub fn num_terms(&self) -> u64 {
        self.store.num_terms()
    }

    /// Number of stored `(term, category)` pairs.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.store.num_entries()
    }

    /// Number of training documents.
    #[inline]
    pub fn num_documents(&self) -> u64 {
        self.document_counts.total_count()
    }

    /// Visit every `(term, entries)` pair in the dictionary.
    pub fn for_each_term<F>(&self, f: F)
    where
        F: FnMut(&str, &CategoryEntries),
    {
        self.store.for_each_term(f);
    }

    /// Remove every term the strategy rejects and return how many were
    /// dropped.
    ///
    /// Entries are physically removed and the per-category term counts are
    /// reduced by exactly the counts the removed terms carried. Document
    /// counts are untouched; pruning changes the dictionary, not the
    /// training history.
    pub fn prune<P>(&mut self, strategy: &P) -> usize
    where
        P: PruningStrategy + ?Sized,
    {
        let stats = self.store.retain(|_, entries| !strategy.remove(entries));
        self.term_counts.subtract(&stats.removed_counts);
        info!(
            removed = stats.removed_terms,
            remaining = self.store.num_uniq_terms(),
            "pruned dictionary"
        );
        stats.removed_terms
    }
}

/// Models over different store backends compare by content.
impl<S, S2> PartialEq<DictionaryModel<S2>> for DictionaryModel<S>
where
    S: TermCategoryStore,
    S2: TermCategoryStore,
{
    fn eq(&self, other: &DictionaryModel<S2>) -> bool {
        if self.feature_setting != other.feature_setting
            || self.document_counts != other.document_counts
            || self.term_counts != other.term_counts
            || self.num_uniq_terms() != other.num_uniq_terms()
            || self.num_entries() != other.num_entries()
            || self.num_terms() != other.num_terms()
        {
            return false;
        }
        let mut equal = true;
        self.store.for_each_term(|term, entries| {
            if equal && other.store.entries(term) != *entries {
                equal = false;
            }
        });
        equal
    }
}

pub use scorer::{Ranking, Scoring};
pub use text::TextClassifier;

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture<S: TermCategoryStore>() -> DictionaryModel<S> {
        let mut model = DictionaryModel::new();
        model.add_document(&["word1", "word3"], "c1");
        model.add_document(&["word2", "word4"], "c2");
        model.add_document(&["word3", "word4"], "c2");
        model.add_document(&["word1", "word3"], "c1");
        model.add_document(&["word4"], "c2");
        model.add_document(&["word3"], "c1");
        model
    }

    #[test]
    fn aggregates_after_training() {
        let model: DictionaryTrieModel = fixture();
        assert_eq!(model.num_documents(), 6);
        assert_eq!(model.num_categories(), 2);
        assert_eq!(model.num_uniq_terms(), 4);
        assert_eq!(model.num_terms(), 10);

        let word3 = model.category_entries("word3");
        assert_eq!(word3.probability("c1"), 0.75);
        assert_eq!(word3.probability("c2"), 0.25);
        assert_eq!(word3.total_count(), 4);
        assert_eq!(model.category_entries("word1").probability("c1"), 1.0);
    }

    #[test]
    fn hash_and_trie_backends_are_equivalent() {
        let trie: DictionaryTrieModel = fixture();
        let hash: DictionaryHashModel = fixture();

        assert_eq!(trie.num_uniq_terms(), hash.num_uniq_terms());
        assert_eq!(trie.num_terms(), hash.num_terms());
        assert_eq!(trie.num_entries(), hash.num_entries());
        for term in ["word1", "word2", "word3", "word4", "unseen"] {
            assert_eq!(trie.category_entries(term), hash.category_entries(term));
        }
        assert_eq!(trie, hash);
    }

    #[test]
    fn pruning_the_fixture_by_count() {
        let mut model: DictionaryTrieModel = fixture();
        let removed = model.prune(&prune::TermCountPruning::new(2));
        assert_eq!(removed, 1); // word2 appeared once

        assert_eq!(model.num_uniq_terms(), 3);
        assert_eq!(model.num_entries(), 4);
        assert_eq!(model.term_counts().count("c1"), 5);
        assert_eq!(model.term_counts().count("c2"), 4);
        // the surviving counts are unchanged
        assert_eq!(model.category_entries("word3").total_count(), 4);
        assert!(model.category_entries("word2").is_empty());
        // training history stays intact
        assert_eq!(model.num_documents(), 6);
    }

    #[test]
    fn term_counts_before_pruning() {
        let model: DictionaryHashModel = fixture();
        assert_eq!(model.term_counts().count("c1"), 5);
        assert_eq!(model.term_counts().count("c2"), 5);
        assert_eq!(model.num_entries(), 5);
    }

    #[test]
    fn empty_terms_are_skipped() {
        let mut model: DictionaryTrieModel = DictionaryModel::new();
        model.add_document(&["", "word1"], "c1");
        assert_eq!(model.num_uniq_terms(), 1);
        assert_eq!(model.term_counts().count("c1"), 1);
        assert_eq!(model.num_documents(), 1);
    }

    #[test]
    fn models_differ_when_counts_differ() {
        let a: DictionaryTrieModel = fixture();
        let mut b: DictionaryTrieModel = fixture();
        b.add_document(&["word9"], "c1");
        assert_ne!(a, b);
    }
}
