use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// CategoryEntries 構造体
/// Keeps the per-category counts of one term (or of a whole corpus) and
/// derives probabilities from them.
///
/// Counts are 64-bit, so even very large corpora cannot overflow them.
/// Equality ignores insertion order; two instances are equal when they hold
/// the same categories with the same counts.
///
/// # Examples
/// ```
/// use ngram_classifier::classifier::category::CategoryEntries;
/// let mut entries = CategoryEntries::new();
/// entries.increment("sports", 3);
/// entries.increment("politics", 1);
///
/// assert_eq!(entries.probability("sports"), 0.75);
/// assert_eq!(entries.probability("weather"), 0.0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryEntries {
    #[serde(with = "indexmap::map::serde_seq")]
    category_count: IndexMap<String, u64>,
    total_count: u64,
}

/// Adding and removing counts.
impl CategoryEntries {
    pub fn new() -> Self {
        CategoryEntries {
            category_count: IndexMap::new(),
            total_count: 0,
        }
    }

    /// Add `amount` to a category's count, creating the category if new.
    ///
    /// # Arguments
    /// * `category` - The category to increment.
    /// * `amount` - The number to add.
    #[inline]
    pub fn increment(&mut self, category: &str, amount: u64) -> &mut Self {
        let count = self.category_count.entry(category.to_string()).or_insert(0);
        *count += amount;
        self.total_count += amount;
        self
    }

    /// Subtract another entries set from this one, pointwise.
    /// Counts saturate at zero and categories reaching zero are dropped.
    pub fn subtract(&mut self, other: &CategoryEntries) -> &mut Self {
        for (category, &amount) in other.iter_raw() {
            if let Some(count) = self.category_count.get_mut(category) {
                let removed = amount.min(*count);
                *count -= removed;
                self.total_count -= removed;
            }
        }
        self.category_count.retain(|_, count| *count > 0);
        self
    }

    /// Reset all counts.
    #[inline]
    pub fn clear(&mut self) {
        self.category_count.clear();
        self.total_count = 0;
    }
}

/// Probability calculation.
impl CategoryEntries {
    /// The probability of `category`, i.e. its count divided by the total
    /// count. Defined as exactly `0.0` when the total count is zero, so an
    /// unseen term never feeds NaN into downstream score aggregation.
    #[inline]
    pub fn probability(&self, category: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.total_count as f64
    }

    /// The most likely category with its probability.
    /// Ties are broken by lexicographic category name, so the result is
    /// deterministic regardless of insertion order.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.category_count
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(category, &count)| {
                let probability = if self.total_count == 0 {
                    0.0
                } else {
                    count as f64 / self.total_count as f64
                };
                (category.as_str(), probability)
            })
    }
}

/// Retrieving counts and category information.
impl CategoryEntries {
    /// The count for `category`, `0` when absent.
    #[inline]
    pub fn count(&self, category: &str) -> u64 {
        *self.category_count.get(category).unwrap_or(&0)
    }

    /// The sum of all category counts.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// The number of distinct categories.
    #[inline]
    pub fn num_categories(&self) -> usize {
        self.category_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.category_count.is_empty()
    }

    #[inline]
    pub fn contains(&self, category: &str) -> bool {
        self.category_count.contains_key(category)
    }

    /// Iterate over `(category, count)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.category_count
            .iter()
            .map(|(category, &count)| (category.as_str(), count))
    }

    #[inline]
    fn iter_raw(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.category_count.iter()
    }

    /// The category names as a set.
    #[inline]
    pub fn category_set(&self) -> HashSet<&str> {
        self.category_count.keys().map(|s| s.as_str()).collect()
    }

    /// All `(category, count)` pairs, sorted by descending count.
    /// Equal counts are ordered by ascending category name.
    pub fn sorted_vector(&self) -> Vec<(String, u64)> {
        let mut list: Vec<(String, u64)> = self
            .category_count
            .iter()
            .map(|(category, &count)| (category.clone(), count))
            .collect();

        list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        list
    }

    /// The pointwise sum of this and another entries set.
    pub fn merge(&self, other: &CategoryEntries) -> CategoryEntries {
        let mut merged = self.clone();
        for (category, &count) in other.iter_raw() {
            merged.increment(category, count);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_total() {
        let mut entries = CategoryEntries::new();
        entries.increment("a", 2).increment("b", 1).increment("a", 1);
        assert_eq!(entries.count("a"), 3);
        assert_eq!(entries.count("b"), 1);
        assert_eq!(entries.count("c"), 0);
        assert_eq!(entries.total_count(), 4);
        assert_eq!(entries.num_categories(), 2);
    }

    #[test]
    fn probability_of_empty_entries_is_zero() {
        let entries = CategoryEntries::new();
        assert_eq!(entries.probability("anything"), 0.0);
        assert!(entries.most_likely().is_none());
    }

    #[test]
    fn probabilities_sum_from_counts() {
        let mut entries = CategoryEntries::new();
        entries.increment("c1", 3).increment("c2", 1);
        assert_eq!(entries.probability("c1"), 0.75);
        assert_eq!(entries.probability("c2"), 0.25);
        assert_eq!(entries.probability("c3"), 0.0);
        assert_eq!(entries.most_likely(), Some(("c1", 0.75)));
    }

    #[test]
    fn sorted_vector_breaks_ties_by_name() {
        let mut entries = CategoryEntries::new();
        entries.increment("b", 2).increment("c", 5).increment("a", 2);
        assert_eq!(
            entries.sorted_vector(),
            vec![
                ("c".to_string(), 5),
                ("a".to_string(), 2),
                ("b".to_string(), 2)
            ]
        );
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut left = CategoryEntries::new();
        left.increment("a", 1).increment("b", 2);
        let mut right = CategoryEntries::new();
        right.increment("b", 2).increment("a", 1);
        assert_eq!(left, right);
    }

    #[test]
    fn merge_is_pointwise() {
        let mut left = CategoryEntries::new();
        left.increment("a", 1).increment("b", 2);
        let mut right = CategoryEntries::new();
        right.increment("b", 3).increment("c", 1);

        let merged = left.merge(&right);
        assert_eq!(merged.count("a"), 1);
        assert_eq!(merged.count("b"), 5);
        assert_eq!(merged.count("c"), 1);
        assert_eq!(merged.total_count(), 7);
    }

    #[test]
    fn subtract_drops_zeroed_categories() {
        let mut entries = CategoryEntries::new();
        entries.increment("a", 3).increment("b", 1);
        let mut removed = CategoryEntries::new();
        removed.increment("a", 1).increment("b", 1);

        entries.subtract(&removed);
        assert_eq!(entries.count("a"), 2);
        assert!(!entries.contains("b"));
        assert_eq!(entries.total_count(), 2);
    }
}
