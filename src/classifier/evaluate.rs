use std::fmt;

use indexmap::IndexMap;

use super::category::CategoryEntries;

/// Confusion matrix over `(actual, predicted)` category pairs.
///
/// Feed it the outcome of classifying held-out documents and read
/// accuracy, precision, recall and F1 from it. The matrix is external to
/// the model; it never touches the dictionary.
#[derive(Debug, Clone, Default)]
pub struct ConfusionMatrix {
    /// actual category -> predicted category counts
    matrix: IndexMap<String, CategoryEntries>,
    total: u64,
    correct: u64,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        ConfusionMatrix::default()
    }

    /// Record one classified document.
    pub fn add(&mut self, actual: &str, predicted: &str) -> &mut Self {
        self.matrix
            .entry(actual.to_string())
            .or_default()
            .increment(predicted, 1);
        self.total += 1;
        if actual == predicted {
            self.correct += 1;
        }
        self
    }

    /// Fraction of documents classified correctly, `0.0` when empty.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    #[inline]
    pub fn num_documents(&self) -> u64 {
        self.total
    }

    /// All category names seen as actual or predicted label, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.matrix.keys().cloned().collect();
        for entries in self.matrix.values() {
            for (predicted, _) in entries.iter() {
                if !names.iter().any(|n| n == predicted) {
                    names.push(predicted.to_string());
                }
            }
        }
        names.sort();
        names
    }

    /// Documents of `actual` predicted as `predicted`.
    pub fn count(&self, actual: &str, predicted: &str) -> u64 {
        self.matrix
            .get(actual)
            .map(|entries| entries.count(predicted))
            .unwrap_or(0)
    }

    /// Of all documents predicted as `category`, the fraction that really
    /// belonged to it. `0.0` when the category was never predicted.
    pub fn precision(&self, category: &str) -> f64 {
        let predicted_total: u64 = self
            .matrix
            .values()
            .map(|entries| entries.count(category))
            .sum();
        if predicted_total == 0 {
            return 0.0;
        }
        self.count(category, category) as f64 / predicted_total as f64
    }

    /// Of all documents actually labeled `category`, the fraction
    /// predicted as it. `0.0` when the category never occurred.
    pub fn recall(&self, category: &str) -> f64 {
        let actual_total = self
            .matrix
            .get(category)
            .map(|entries| entries.total_count())
            .unwrap_or(0);
        if actual_total == 0 {
            return 0.0;
        }
        self.count(category, category) as f64 / actual_total as f64
    }

    /// Harmonic mean of precision and recall, `0.0` when both are zero.
    pub fn f1(&self, category: &str) -> f64 {
        let p = self.precision(category);
        let r = self.recall(category);
        if p + r == 0.0 {
            return 0.0;
        }
        2.0 * p * r / (p + r)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "accuracy: {:.4} ({}/{} documents)",
            self.accuracy(),
            self.correct,
            self.total
        )?;
        for category in self.categories() {
            writeln!(
                f,
                "{}: precision {:.4}, recall {:.4}, f1 {:.4}",
                category,
                self.precision(&category),
                self.recall(&category),
                self.f1(&category)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> ConfusionMatrix {
        let mut m = ConfusionMatrix::new();
        m.add("a", "a").add("a", "a").add("a", "b");
        m.add("b", "b").add("b", "a");
        m
    }

    #[test]
    fn accuracy() {
        let m = matrix();
        assert_eq!(m.num_documents(), 5);
        assert_eq!(m.accuracy(), 3.0 / 5.0);
        assert_eq!(ConfusionMatrix::new().accuracy(), 0.0);
    }

    #[test]
    fn precision_and_recall() {
        let m = matrix();
        // "a" predicted 3 times, 2 correct
        assert_eq!(m.precision("a"), 2.0 / 3.0);
        // 3 documents actually "a", 2 found
        assert_eq!(m.recall("a"), 2.0 / 3.0);
        assert_eq!(m.precision("b"), 0.5);
        assert_eq!(m.recall("b"), 0.5);
        assert_eq!(m.precision("unseen"), 0.0);
        assert_eq!(m.recall("unseen"), 0.0);
    }

    #[test]
    fn f1_is_the_harmonic_mean() {
        let m = matrix();
        let p = m.precision("a");
        let r = m.recall("a");
        assert!((m.f1("a") - 2.0 * p * r / (p + r)).abs() < 1e-12);
        assert_eq!(m.f1("unseen"), 0.0);
    }

    #[test]
    fn categories_include_predicted_only_labels() {
        let mut m = ConfusionMatrix::new();
        m.add("a", "ghost");
        assert_eq!(m.categories(), vec!["a".to_string(), "ghost".to_string()]);
    }
}
