use super::category::CategoryEntries;

/// Decides, per term, whether its entries are dropped from a trained model.
///
/// A strategy is a stateless predicate over a single term's category
/// counts. Pruning is destructive; the only way back is retraining.
/// Strategies compose through plain closures:
///
/// ```
/// use ngram_classifier::classifier::prune::{PruningStrategy, TermCountPruning, EntropyPruning};
/// let count = TermCountPruning::new(3);
/// let entropy = EntropyPruning::new(4, 0.95);
/// let combined = |e: &ngram_classifier::classifier::category::CategoryEntries| {
///     count.remove(e) || entropy.remove(e)
/// };
/// # let _ = combined;
/// ```
pub trait PruningStrategy {
    /// `true` when the term with these entries should be removed.
    fn remove(&self, entries: &CategoryEntries) -> bool;
}

impl<F> PruningStrategy for F
where
    F: Fn(&CategoryEntries) -> bool,
{
    fn remove(&self, entries: &CategoryEntries) -> bool {
        self(entries)
    }
}

/// Removes terms seen fewer than `min_count` times in total.
///
/// The comparison is strict, so a term whose total count equals the
/// threshold survives.
#[derive(Debug, Clone, Copy)]
pub struct TermCountPruning {
    min_count: u64,
}

impl TermCountPruning {
    pub fn new(min_count: u64) -> Self {
        TermCountPruning { min_count }
    }
}

impl PruningStrategy for TermCountPruning {
    #[inline]
    fn remove(&self, entries: &CategoryEntries) -> bool {
        entries.total_count() < self.min_count
    }
}

/// Removes terms whose category distribution is too uniform to
/// discriminate.
///
/// The Shannon entropy of the term's top `max_categories` counts
/// (renormalized) is divided by `log2(max_categories)`. A term spread
/// evenly over exactly `max_categories` categories scores 1.0; a term
/// concentrated in one category scores 0.0. Terms scoring at or above
/// `cutoff` are removed, so a cutoff of 1.0 removes only maximally mixed
/// terms and lower cutoffs are stricter.
///
/// Terms appearing in a single category are never removed.
#[derive(Debug, Clone, Copy)]
pub struct EntropyPruning {
    max_categories: usize,
    cutoff: f64,
}

impl EntropyPruning {
    /// # Panics
    /// Panics when `max_categories < 2` or `cutoff` is outside `(0, 1]`.
    pub fn new(max_categories: usize, cutoff: f64) -> Self {
        assert!(max_categories >= 2, "at least two categories are required");
        assert!(
            cutoff > 0.0 && cutoff <= 1.0,
            "cutoff must lie in (0, 1], got {cutoff}"
        );
        EntropyPruning {
            max_categories,
            cutoff,
        }
    }

    fn normalized_entropy(&self, entries: &CategoryEntries) -> f64 {
        let top: Vec<u64> = entries
            .sorted_vector()
            .into_iter()
            .take(self.max_categories)
            .map(|(_, count)| count)
            .collect();
        let total: u64 = top.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let mut entropy = 0.0;
        for &count in &top {
            if count > 0 {
                let p = count as f64 / total as f64;
                entropy -= p * p.log2();
            }
        }
        entropy / (self.max_categories as f64).log2()
    }
}

impl PruningStrategy for EntropyPruning {
    fn remove(&self, entries: &CategoryEntries) -> bool {
        if entries.num_categories() < 2 {
            return false;
        }
        // tolerance absorbs log2 rounding, else an exactly uniform
        // distribution can land one ulp below a cutoff of 1.0
        self.normalized_entropy(entries) >= self.cutoff - 1e-9
    }
}
