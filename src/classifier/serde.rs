use std::io::{Read, Write};

use ::serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::feature::FeatureSetting;

use super::store::TermCategoryStore;
use super::DictionaryModel;

/// Version written into every persisted model. Bump on incompatible layout
/// changes and keep deserializers for the old versions around.
pub const MODEL_VERSION: u32 = 1;

/// Errors raised when persisting or loading a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to serialize or deserialize the model: {0}")]
    Serialization(#[from] serde_cbor::Error),

    #[error("unsupported model version {found}, this build reads version {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("model data is corrupt: {0}")]
    Corrupt(String),
}

/// DictionaryModel のシリアライズ用のデータ構造
/// This struct is independent of the store backend; a model trained with
/// the trie store can be reloaded into the hash store and vice versa.
/// Terms and categories are sorted, so the same dictionary always
/// produces the same blob.
#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryData {
    pub version: u32,
    pub name: Option<String>,
    pub feature_setting: Option<FeatureSetting>,
    /// `(category, document count)`, sorted by category name. The position
    /// in this list is the category index used by `terms`.
    pub categories: Vec<(String, u64)>,
    /// `(category, term occurrence total)`, sorted by category name.
    pub term_counts: Vec<(String, u64)>,
    /// `(term, [(category index, count), ...])`, sorted by term; each
    /// term's entries are sorted by category index.
    pub terms: Vec<(String, Vec<(u32, u64)>)>,
}

impl<S> DictionaryModel<S>
where
    S: TermCategoryStore,
{
    /// Flatten this model into its serializable form.
    pub fn to_data(&self) -> DictionaryData {
        let mut categories: Vec<(String, u64)> = self
            .priors()
            .iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect();
        categories.sort_by(|a, b| a.0.cmp(&b.0));

        let index_of = |name: &str| -> u32 {
            categories
                .binary_search_by(|(category, _)| category.as_str().cmp(name))
                .map(|i| i as u32)
                .unwrap_or(u32::MAX)
        };

        let mut term_counts: Vec<(String, u64)> = self
            .term_counts()
            .iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect();
        term_counts.sort_by(|a, b| a.0.cmp(&b.0));

        let mut terms: Vec<(String, Vec<(u32, u64)>)> = Vec::with_capacity(self.num_uniq_terms());
        self.for_each_term(|term, entries| {
            let mut counts: Vec<(u32, u64)> = entries
                .iter()
                .map(|(category, count)| (index_of(category), count))
                .collect();
            counts.sort_by_key(|&(idx, _)| idx);
            terms.push((term.to_string(), counts));
        });
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        DictionaryData {
            version: MODEL_VERSION,
            name: self.name().map(str::to_owned),
            feature_setting: self.feature_setting().cloned(),
            categories,
            term_counts,
            terms,
        }
    }

    /// Rebuild a model from its serialized form, into whichever store
    /// backend `S` is.
    pub fn from_data(data: DictionaryData) -> Result<Self, ModelError> {
        if data.version != MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: data.version,
                expected: MODEL_VERSION,
            });
        }
        let mut model = Self::new();
        model.feature_setting = data.feature_setting;
        model.name = data.name;
        for (category, count) in &data.categories {
            model.document_counts.increment(category, *count);
        }
        for (category, count) in &data.term_counts {
            model.term_counts.increment(category, *count);
        }
        for (term, counts) in &data.terms {
            for &(idx, count) in counts {
                let (category, _) = data.categories.get(idx as usize).ok_or_else(|| {
                    ModelError::Corrupt(format!(
                        "term {term:?} references category index {idx} out of {}",
                        data.categories.len()
                    ))
                })?;
                model.store.increment(term, category, count);
            }
        }
        Ok(model)
    }

    /// Serialize this model to `writer` as a CBOR blob.
    pub fn save_to<W: Write>(&self, writer: W) -> Result<(), ModelError> {
        let data = self.to_data();
        debug!(
            terms = data.terms.len(),
            categories = data.categories.len(),
            "writing dictionary model"
        );
        serde_cbor::to_writer(writer, &data)?;
        Ok(())
    }

    /// Deserialize a model from `reader`.
    ///
    /// The whole blob is loaded in one step; a truncated or
    /// version-incompatible blob fails the load, there is no partial
    /// recovery.
    pub fn load_from<R: Read>(reader: R) -> Result<Self, ModelError> {
        let data: DictionaryData = serde_cbor::from_reader(reader)?;
        debug!(
            terms = data.terms.len(),
            version = data.version,
            "read dictionary model"
        );
        Self::from_data(data)
    }
}
