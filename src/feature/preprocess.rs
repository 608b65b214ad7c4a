use std::fmt;

use indexmap::IndexSet;
use rust_stemmers::Stemmer;

use super::ngram;
use super::stopwords;
use super::{FeatureSetting, TextFeature};

/// Turns raw text into the ordered term set of one document.
///
/// The pipeline is fully determined by the `FeatureSetting`:
/// 1. case folding (unless case-sensitive)
/// 2. word mode only: tokenization, stopword removal, stemming
/// 3. n-gram assembly
/// 4. term length filtering
/// 5. first-occurrence deduplication (a document contributes a term *set*)
/// 6. truncation to `max_terms`
///
/// Identical input and setting always produce the identical sequence, which
/// makes trained models reproducible.
///
/// The stemmer instance is created once per `Preprocessor`, so construct it
/// up front and reuse it over the whole corpus.
pub struct Preprocessor {
    setting: FeatureSetting,
    stemmer: Option<Stemmer>,
}

impl Preprocessor {
    pub fn new(setting: &FeatureSetting) -> Self {
        Preprocessor {
            setting: setting.clone(),
            stemmer: setting
                .stemming()
                .map(|language| Stemmer::create(language.algorithm())),
        }
    }

    #[inline]
    pub fn setting(&self) -> &FeatureSetting {
        &self.setting
    }

    /// Extract the distinct terms of `text`, in first-occurrence order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.setting.case_sensitive() {
            text
        } else {
            folded = text.to_lowercase();
            &folded
        };

        let grams = match self.setting.text_feature() {
            TextFeature::CharacterNGrams => self.char_grams(text),
            TextFeature::WordNGrams => self.word_grams(text),
        };

        // 重複を除去しつつ最初の出現順を保つ
        let mut terms: IndexSet<String> = IndexSet::with_capacity(grams.len());
        for gram in grams {
            if self.term_length_ok(&gram) {
                terms.insert(gram);
            }
        }

        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.truncate(self.setting.max_terms());
        terms
    }

    fn char_grams(&self, text: &str) -> Vec<String> {
        let min = self.setting.min_ngram_length();
        let max = self.setting.max_ngram_length();
        if self.setting.character_padding() {
            ngram::char_ngrams_padded(text, min, max)
        } else {
            ngram::char_ngrams(text, min, max)
        }
    }

    fn word_grams(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = ngram::word_tokens(text)
            .into_iter()
            .map(str::to_owned)
            .collect();
        if self.setting.remove_stopwords() {
            tokens.retain(|token| !stopwords::is_stopword(self.setting.stemming(), token));
        }
        if let Some(stemmer) = &self.stemmer {
            tokens = tokens
                .iter()
                .map(|token| stemmer.stem(token).into_owned())
                .collect();
        }
        ngram::word_ngrams(
            &tokens,
            self.setting.min_ngram_length(),
            self.setting.max_ngram_length(),
        )
    }

    fn term_length_ok(&self, term: &str) -> bool {
        let len = term.chars().count();
        len >= self.setting.min_term_length() && len <= self.setting.max_term_length()
    }
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessor")
            .field("setting", &self.setting)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureSettingBuilder, Language};

    #[test]
    fn char_mode_lowercases_and_dedups() {
        let setting = FeatureSetting::char_ngrams(3, 3).unwrap();
        let preprocessor = Preprocessor::new(&setting);
        let terms = preprocessor.extract("AbcAbc");
        // "abcabc" has 4 trigrams, "abc" occurs twice and is kept once
        assert_eq!(terms, vec!["abc", "bca", "cab"]);
    }

    #[test]
    fn short_text_yields_no_terms() {
        let setting = FeatureSetting::char_ngrams(5, 7).unwrap();
        let preprocessor = Preprocessor::new(&setting);
        assert!(preprocessor.extract("ab").is_empty());
        assert!(preprocessor.extract("").is_empty());
    }

    #[test]
    fn word_mode_respects_term_length_bounds() {
        let setting = FeatureSettingBuilder::word_ngrams(1, 1)
            .term_length(4, 30)
            .build()
            .unwrap();
        let preprocessor = Preprocessor::new(&setting);
        let terms = preprocessor.extract("a fox jumps over");
        assert_eq!(terms, vec!["jumps", "over"]);
    }

    #[test]
    fn stopwords_are_removed_before_assembly() {
        let setting = FeatureSettingBuilder::word_ngrams(2, 2)
            .term_length(1, 60)
            .remove_stopwords()
            .build()
            .unwrap();
        let preprocessor = Preprocessor::new(&setting);
        // "the" drops out, so the bigram spans the remaining tokens
        assert_eq!(preprocessor.extract("the quick fox"), vec!["quick fox"]);
    }

    #[test]
    fn stemming_folds_inflections_together() {
        let setting = FeatureSettingBuilder::word_ngrams(1, 1)
            .term_length(1, 60)
            .stemming(Language::English)
            .build()
            .unwrap();
        let preprocessor = Preprocessor::new(&setting);
        let terms = preprocessor.extract("love loving loved");
        assert_eq!(terms, vec!["love"]);
    }

    #[test]
    fn max_terms_caps_deterministically() {
        let setting = FeatureSettingBuilder::char_ngrams(2, 2)
            .max_terms(3)
            .build()
            .unwrap();
        let preprocessor = Preprocessor::new(&setting);
        let terms = preprocessor.extract("abcdefgh");
        assert_eq!(terms, vec!["ab", "bc", "cd"]);
    }

    #[test]
    fn case_sensitive_mode_keeps_case() {
        let setting = FeatureSettingBuilder::char_ngrams(2, 2)
            .case_sensitive()
            .build()
            .unwrap();
        let preprocessor = Preprocessor::new(&setting);
        let terms = preprocessor.extract("AbA");
        assert_eq!(terms, vec!["Ab", "bA"]);
    }
}
