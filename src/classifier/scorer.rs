use std::fmt::Debug;

use super::store::TermCategoryStore;
use super::DictionaryModel;

/// Enum for the score aggregation used when classifying a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Naive Bayes in log space with additive (Lidstone) smoothing.
    /// `smoothing` is the pseudo-count added per `(term, category)` pair;
    /// 1.0 is Laplace smoothing and the default. Must be positive.
    NaiveBayes { smoothing: f64 },
    /// Sum of the per-term category probabilities `p(category | term)`.
    /// Cruder than Bayes but robust on very small dictionaries.
    TermProbabilitySum,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring::NaiveBayes { smoothing: 1.0 }
    }
}

/// Structure to store a classification result.
///
/// Holds the probability distribution over all trained categories, sorted
/// by descending probability. Equal probabilities are ordered by ascending
/// category name, so results are deterministic.
pub struct Ranking {
    /// (Category, probability)
    pub list: Vec<(String, f64)>,
}

impl Ranking {
    pub fn new(vec: Vec<(String, f64)>) -> Self {
        let mut ranking = Ranking { list: vec };
        ranking.sort_by_probability();
        ranking
    }

    /// Sort by descending probability, NaN entries removed.
    pub fn sort_by_probability(&mut self) -> &mut Self {
        self.list.retain(|(_, p)| !p.is_nan());
        self.list
            .sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        self
    }

    /// The predicted category with its probability.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.list.first().map(|(category, p)| (category.as_str(), *p))
    }

    /// The probability assigned to `category`, `0.0` when absent.
    pub fn probability(&self, category: &str) -> f64 {
        self.list
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.list.iter().map(|(category, p)| (category.as_str(), *p))
    }
}

impl Debug for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each category on a new line
            writeln!(f, "Ranking [")?;
            for (category, probability) in &self.list {
                writeln!(f, "    {}: {:.6}", category, probability)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Scoring {
    /// Aggregate the per-term category counts of `terms` into a probability
    /// distribution over all trained categories.
    ///
    /// A document yielding zero terms falls back to the prior
    /// distribution. An untrained model produces an empty ranking.
    pub(crate) fn rank<S>(&self, model: &DictionaryModel<S>, terms: &[String]) -> Ranking
    where
        S: TermCategoryStore,
    {
        let priors = model.priors();
        if priors.is_empty() {
            return Ranking { list: Vec::new() };
        }
        if terms.is_empty() {
            // 空ドキュメントは事前分布へフォールバック
            let list = priors
                .iter()
                .map(|(category, _)| (category.to_string(), priors.probability(category)))
                .collect();
            return Ranking::new(list);
        }
        match self {
            Scoring::NaiveBayes { smoothing } => naive_bayes(model, terms, *smoothing),
            Scoring::TermProbabilitySum => probability_sum(model, terms),
        }
    }
}

/// Log-space naive Bayes with additive smoothing.
///
/// `log p(c | d) ∝ log p(c) + Σ_t log ((count(t, c) + α) / (termCount(c) + α · V))`
/// with `V` the number of distinct terms in the dictionary. The log scores
/// are normalized into probabilities via log-sum-exp.
fn naive_bayes<S>(model: &DictionaryModel<S>, terms: &[String], smoothing: f64) -> Ranking
where
    S: TermCategoryStore,
{
    let priors = model.priors();
    let vocabulary = model.num_uniq_terms() as f64;
    let categories: Vec<(String, u64)> = priors.sorted_vector();

    // per-category token mass, fetched once
    let category_mass: Vec<f64> = categories
        .iter()
        .map(|(category, _)| model.term_counts().count(category) as f64)
        .collect();

    let mut log_scores: Vec<f64> = categories
        .iter()
        .map(|(category, _)| priors.probability(category).ln())
        .collect();

    for term in terms {
        let entries = model.category_entries(term);
        for (i, (category, _)) in categories.iter().enumerate() {
            let count = entries.count(category) as f64;
            let evidence = (count + smoothing) / (category_mass[i] + smoothing * vocabulary);
            log_scores[i] += evidence.ln();
        }
    }

    // log-sum-exp 正規化
    let max = log_scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut scores: Vec<f64> = log_scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in &mut scores {
            *score /= sum;
        }
    }

    Ranking::new(
        categories
            .into_iter()
            .zip(scores)
            .map(|((category, _), score)| (category, score))
            .collect(),
    )
}

/// Sum of `p(category | term)` over all terms, normalized to 1.
fn probability_sum<S>(model: &DictionaryModel<S>, terms: &[String]) -> Ranking
where
    S: TermCategoryStore,
{
    let priors = model.priors();
    let categories: Vec<(String, u64)> = priors.sorted_vector();
    let mut scores = vec![0.0f64; categories.len()];

    for term in terms {
        let entries = model.category_entries(term);
        for (i, (category, _)) in categories.iter().enumerate() {
            scores[i] += entries.probability(category);
        }
    }

    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in &mut scores {
            *score /= sum;
        }
    } else {
        // no term matched the dictionary, fall back to the priors
        for (i, (category, _)) in categories.iter().enumerate() {
            scores[i] = priors.probability(category);
        }
    }

    Ranking::new(
        categories
            .into_iter()
            .zip(scores)
            .map(|((category, _), score)| (category, score))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_sorts_and_breaks_ties_by_name() {
        let ranking = Ranking::new(vec![
            ("b".to_string(), 0.3),
            ("c".to_string(), 0.4),
            ("a".to_string(), 0.3),
        ]);
        assert_eq!(ranking.most_likely(), Some(("c", 0.4)));
        assert_eq!(ranking.list[1].0, "a");
        assert_eq!(ranking.list[2].0, "b");
        assert_eq!(ranking.probability("a"), 0.3);
        assert_eq!(ranking.probability("missing"), 0.0);
    }

    #[test]
    fn ranking_drops_nan_scores() {
        let ranking = Ranking::new(vec![("a".to_string(), f64::NAN), ("b".to_string(), 0.5)]);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.most_likely(), Some(("b", 0.5)));
    }
}
