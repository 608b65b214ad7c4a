pub mod ngram;
pub mod preprocess;
mod stopwords;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of text feature extracted from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextFeature {
    /// Contiguous character substrings of configurable length.
    CharacterNGrams,
    /// Sequences of consecutive word tokens, joined by a single space.
    WordNGrams,
}

/// Languages with Snowball stemmer support.
/// The variants map directly to `rust_stemmers::Algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Russian,
    Swedish,
    Norwegian,
    Danish,
    Finnish,
    Hungarian,
    Romanian,
    Turkish,
    Arabic,
    Greek,
    Tamil,
}

impl Language {
    pub(crate) fn algorithm(self) -> rust_stemmers::Algorithm {
        use rust_stemmers::Algorithm;
        match self {
            Language::English => Algorithm::English,
            Language::German => Algorithm::German,
            Language::French => Algorithm::French,
            Language::Spanish => Algorithm::Spanish,
            Language::Italian => Algorithm::Italian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Dutch => Algorithm::Dutch,
            Language::Russian => Algorithm::Russian,
            Language::Swedish => Algorithm::Swedish,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Danish => Algorithm::Danish,
            Language::Finnish => Algorithm::Finnish,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Romanian => Algorithm::Romanian,
            Language::Turkish => Algorithm::Turkish,
            Language::Arabic => Algorithm::Arabic,
            Language::Greek => Algorithm::Greek,
            Language::Tamil => Algorithm::Tamil,
        }
    }
}

/// Errors raised when a `FeatureSetting` is built with inconsistent values.
/// Validation happens at construction time, never during training.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureSettingError {
    #[error("n-gram lengths must be greater than zero")]
    ZeroNGramLength,

    #[error("minimum n-gram length {min} exceeds maximum {max}")]
    NGramRange { min: usize, max: usize },

    #[error("minimum term length {min} exceeds maximum {max}")]
    TermLengthRange { min: usize, max: usize },

    #[error("the maximum number of terms per document must be greater than zero")]
    ZeroMaxTerms,
}

/// Configuration for the feature extraction.
///
/// A `FeatureSetting` is an immutable value object. It is created through
/// `FeatureSettingBuilder` (or one of the shorthand constructors), validated
/// once, and then attached to a model for its whole lifetime. Changing the
/// setting between training and classification breaks reproducibility, so
/// there are no mutating accessors.
///
/// # Examples
/// ```
/// use ngram_classifier::feature::FeatureSetting;
/// let setting = FeatureSetting::char_ngrams(3, 6).unwrap();
/// assert_eq!(setting.min_ngram_length(), 3);
/// ```
///
/// # Serialization
/// Supported. Fields added after the first released model format carry
/// defaults, so settings persisted by older versions still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSetting {
    text_feature: TextFeature,
    min_ngram_length: usize,
    max_ngram_length: usize,
    max_terms: usize,
    case_sensitive: bool,
    min_term_length: usize,
    max_term_length: usize,
    // the three fields below joined later; absent in old persisted settings
    #[serde(default)]
    character_padding: bool,
    #[serde(default)]
    stemming: Option<Language>,
    #[serde(default)]
    remove_stopwords: bool,
}

/// Default maximum number of terms kept per document.
pub const DEFAULT_MAX_TERMS: usize = 800;

impl Default for FeatureSetting {
    /// Character 4- to 7-grams, case-insensitive, at most
    /// `DEFAULT_MAX_TERMS` terms per document.
    fn default() -> Self {
        FeatureSetting {
            text_feature: TextFeature::CharacterNGrams,
            min_ngram_length: 4,
            max_ngram_length: 7,
            max_terms: DEFAULT_MAX_TERMS,
            case_sensitive: false,
            min_term_length: 1,
            max_term_length: usize::MAX,
            character_padding: false,
            stemming: None,
            remove_stopwords: false,
        }
    }
}

impl FeatureSetting {
    /// Shorthand for a character n-gram setting with default options.
    pub fn char_ngrams(min: usize, max: usize) -> Result<Self, FeatureSettingError> {
        FeatureSettingBuilder::char_ngrams(min, max).build()
    }

    /// Shorthand for a word n-gram setting with default options.
    pub fn word_ngrams(min: usize, max: usize) -> Result<Self, FeatureSettingError> {
        FeatureSettingBuilder::word_ngrams(min, max).build()
    }

    #[inline]
    pub fn text_feature(&self) -> TextFeature {
        self.text_feature
    }

    #[inline]
    pub fn min_ngram_length(&self) -> usize {
        self.min_ngram_length
    }

    #[inline]
    pub fn max_ngram_length(&self) -> usize {
        self.max_ngram_length
    }

    #[inline]
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn min_term_length(&self) -> usize {
        self.min_term_length
    }

    #[inline]
    pub fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    #[inline]
    pub fn character_padding(&self) -> bool {
        self.character_padding
    }

    #[inline]
    pub fn stemming(&self) -> Option<Language> {
        self.stemming
    }

    #[inline]
    pub fn remove_stopwords(&self) -> bool {
        self.remove_stopwords
    }
}

/// Builder for `FeatureSetting`.
///
/// All validation lives in `build`, so an inconsistent configuration is
/// rejected before any model sees it.
#[derive(Debug, Clone)]
pub struct FeatureSettingBuilder {
    setting: FeatureSetting,
}

impl FeatureSettingBuilder {
    /// Start from a character n-gram configuration.
    pub fn char_ngrams(min: usize, max: usize) -> Self {
        FeatureSettingBuilder {
            setting: FeatureSetting {
                text_feature: TextFeature::CharacterNGrams,
                min_ngram_length: min,
                max_ngram_length: max,
                ..FeatureSetting::default()
            },
        }
    }

    /// Start from a word n-gram configuration.
    pub fn word_ngrams(min: usize, max: usize) -> Self {
        FeatureSettingBuilder {
            setting: FeatureSetting {
                text_feature: TextFeature::WordNGrams,
                min_ngram_length: min,
                max_ngram_length: max,
                min_term_length: 3,
                max_term_length: 30,
                ..FeatureSetting::default()
            },
        }
    }

    /// Keep at most `max_terms` terms per document.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.setting.max_terms = max_terms;
        self
    }

    /// Do not lowercase the input before extraction.
    pub fn case_sensitive(mut self) -> Self {
        self.setting.case_sensitive = true;
        self
    }

    /// Pad character n-grams with `#` boundary markers, so grams touching
    /// the edges of the text stay distinguishable from mid-string ones.
    pub fn character_padding(mut self) -> Self {
        self.setting.character_padding = true;
        self
    }

    /// Stem word tokens with the Snowball stemmer for `language`.
    pub fn stemming(mut self, language: Language) -> Self {
        self.setting.stemming = Some(language);
        self
    }

    /// Drop stopwords before assembling word n-grams.
    pub fn remove_stopwords(mut self) -> Self {
        self.setting.remove_stopwords = true;
        self
    }

    /// Keep only assembled terms whose character length lies in `min..=max`.
    pub fn term_length(mut self, min: usize, max: usize) -> Self {
        self.setting.min_term_length = min;
        self.setting.max_term_length = max;
        self
    }

    pub fn build(self) -> Result<FeatureSetting, FeatureSettingError> {
        let s = &self.setting;
        if s.min_ngram_length == 0 || s.max_ngram_length == 0 {
            return Err(FeatureSettingError::ZeroNGramLength);
        }
        if s.min_ngram_length > s.max_ngram_length {
            return Err(FeatureSettingError::NGramRange {
                min: s.min_ngram_length,
                max: s.max_ngram_length,
            });
        }
        if s.min_term_length > s.max_term_length {
            return Err(FeatureSettingError::TermLengthRange {
                min: s.min_term_length,
                max: s.max_term_length,
            });
        }
        if s.max_terms == 0 {
            return Err(FeatureSettingError::ZeroMaxTerms);
        }
        Ok(self.setting)
    }
}

pub use preprocess::Preprocessor;
