/// This crate is a dictionary-based n-gram text classifier.
pub mod classifier;
pub mod feature;

/// Dictionary Model
/// The central data structure of this crate: a term dictionary mapping
/// every observed term to its per-category counts, together with the
/// corpus-level statistics (documents per category, term occurrences per
/// category).
///
/// Internally, it holds:
/// - A term store, either trie-backed or hash-backed
/// - The per-category document counts (the category priors)
/// - The per-category term occurrence totals
/// - The feature setting its terms were extracted with
///
/// `DictionaryModel<S>` has the following generic parameter:
/// - `S`: Term store backend (`TrieStore` or `HashStore`)
///
/// Both backends are behaviorally equivalent; the trie shares term
/// prefixes and suits large character n-gram vocabularies, the hash store
/// keeps one dense count row per term and suits few categories.
///
/// # Serialization
/// Supported through `DictionaryData`, a backend-independent form. A model
/// saved with one backend can be reloaded into the other.
///
/// # Deserialization
/// Supported, including the version check of the persisted blob.
pub use classifier::{DictionaryHashModel, DictionaryModel, DictionaryTrieModel};

/// Text Classifier
/// Drives the full pipeline: feature extraction from raw text, training a
/// `DictionaryModel`, and classification of unseen documents into a
/// probability distribution over the trained categories.
pub use classifier::TextClassifier;

/// Category Entries structure
/// The per-category counts of one term (or of a whole corpus), with
/// derived probabilities. The probability of a category in an empty
/// entries set is defined as exactly 0.0, so unseen terms never poison a
/// score aggregation with NaN.
pub use classifier::category::CategoryEntries;

/// Scoring algorithm for the Text Classifier
/// The `Scoring` enum defines how per-term category counts are aggregated
/// into a document-level distribution.
///
/// Currently, the following aggregations are supported:
/// - Naive Bayes: log-space accumulation with additive smoothing (default)
/// - Term Probability Sum: sum of per-term category probabilities
pub use classifier::scorer::Scoring;

/// Ranking structure
/// The result of classifying one document: all trained categories with
/// their probabilities, sorted by descending probability, with
/// deterministic tie-breaking.
pub use classifier::scorer::Ranking;

/// Pruning strategies
/// Policies deciding which terms a trained model drops to bound its size:
/// - `TermCountPruning`: drop terms seen fewer than a threshold
/// - `EntropyPruning`: drop terms whose category distribution is too
///   uniform to discriminate
pub use classifier::prune::{EntropyPruning, PruningStrategy, TermCountPruning};

/// Feature Setting
/// Immutable configuration of the feature extraction pipeline: character
/// or word n-grams, length bounds, case folding, optional stemming and
/// stopword removal. Built and validated once through
/// `FeatureSettingBuilder`.
pub use feature::{FeatureSetting, FeatureSettingBuilder, Language, TextFeature};

/// Preprocessor
/// Turns raw text into the ordered, deduplicated term set of one document,
/// exactly as dictated by a `FeatureSetting`.
pub use feature::Preprocessor;

/// Confusion Matrix
/// Aggregates `(actual, predicted)` pairs from classifying held-out
/// documents into accuracy, precision, recall and F1.
pub use classifier::evaluate::ConfusionMatrix;
