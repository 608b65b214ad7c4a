use rayon::prelude::*;
use tracing::warn;

use crate::feature::{FeatureSetting, Preprocessor};

use super::scorer::{Ranking, Scoring};
use super::store::TermCategoryStore;
use super::DictionaryModel;

/// Text Classifier
/// Couples the feature extraction pipeline with a score aggregation and
/// drives a `DictionaryModel` through training and classification.
///
/// The classifier itself is stateless apart from its configuration; the
/// learned state lives entirely in the model. One classifier instance can
/// train any number of models, as long as they share its feature setting.
///
/// # Examples
/// ```
/// use ngram_classifier::classifier::{DictionaryTrieModel, TextClassifier};
/// use ngram_classifier::feature::FeatureSetting;
///
/// let classifier = TextClassifier::new(FeatureSetting::char_ngrams(3, 6).unwrap());
/// let model: DictionaryTrieModel = classifier.train(vec![
///     ("the striker scored twice", "sports"),
///     ("parliament passed the bill", "politics"),
/// ]);
/// let ranking = classifier.classify("the keeper saved a penalty", &model);
/// # let _ = ranking;
/// ```
#[derive(Debug)]
pub struct TextClassifier {
    preprocessor: Preprocessor,
    scoring: Scoring,
}

impl TextClassifier {
    /// Create a classifier with the default naive Bayes scoring.
    pub fn new(setting: FeatureSetting) -> Self {
        Self::with_scoring(setting, Scoring::default())
    }

    pub fn with_scoring(setting: FeatureSetting, scoring: Scoring) -> Self {
        TextClassifier {
            preprocessor: Preprocessor::new(&setting),
            scoring,
        }
    }

    /// Create a classifier matching the feature setting a model was
    /// trained with. `None` when the model carries no setting.
    pub fn for_model<S>(model: &DictionaryModel<S>) -> Option<Self>
    where
        S: TermCategoryStore,
    {
        model.feature_setting().cloned().map(Self::new)
    }

    #[inline]
    pub fn setting(&self) -> &FeatureSetting {
        self.preprocessor.setting()
    }

    /// Train a fresh model over `(text, category)` pairs.
    pub fn train<S, I, A, B>(&self, documents: I) -> DictionaryModel<S>
    where
        S: TermCategoryStore,
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut model = DictionaryModel::with_feature_setting(self.setting().clone());
        for (text, category) in documents {
            self.add_to(&mut model, text.as_ref(), category.as_ref());
        }
        model
    }

    /// Add one labeled document to an existing model.
    pub fn add_to<S>(&self, model: &mut DictionaryModel<S>, text: &str, category: &str)
    where
        S: TermCategoryStore,
    {
        let terms = self.preprocessor.extract(text);
        model.add_document(&terms, category);
    }

    /// Classify one document against a trained model.
    ///
    /// A document yielding no terms (e.g. empty text) falls back to the
    /// prior category distribution.
    pub fn classify<S>(&self, text: &str, model: &DictionaryModel<S>) -> Ranking
    where
        S: TermCategoryStore,
    {
        if let Some(model_setting) = model.feature_setting() {
            if model_setting != self.setting() {
                warn!("classifying with a feature setting differing from the model's");
            }
        }
        let terms = self.preprocessor.extract(text);
        self.scoring.rank(model, &terms)
    }

    /// Classify many documents in parallel against a frozen model.
    ///
    /// Classification never mutates the model, so the documents are
    /// spread over the rayon thread pool.
    pub fn classify_batch<S, T>(&self, texts: &[T], model: &DictionaryModel<S>) -> Vec<Ranking>
    where
        S: TermCategoryStore + Sync,
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.classify(text.as_ref(), model))
            .collect()
    }
}
