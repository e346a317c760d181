use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Trait for TF Algorithms
pub trait TfAlgorithm {
    /// Calculates the TF value for a [doc].
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq;
}

/// Default TF Algorithms
/// From https://en.wikipedia.org/wiki/Tf%E2%80%93idf
///
/// The idf side is not computed here; the fitted idf weights arrive with
/// the vectorizer artifact.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Tf {
    Binary,
    RawCount,
    TermFrequency,
}

impl Tf {
    /// The implementation for Tf::RawCount, used in multiple impls.
    fn raw_count<W, D: IntoIterator<Item = W>>(doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq,
    {
        let mut result = HashMap::new();
        for word in doc {
            match result.entry(word) {
                Entry::Occupied(mut value) => {
                    value.insert(*value.get() + 1.0);
                }
                Entry::Vacant(value) => {
                    value.insert(1.0);
                }
            }
        }
        result
    }
}

impl TfAlgorithm for Tf {
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq,
    {
        match self {
            Tf::Binary => {
                let mut result = HashMap::new();
                for word in doc.into_iter() {
                    result.insert(word, 1.0);
                }
                result
            }
            Tf::RawCount => Self::raw_count(doc),
            Tf::TermFrequency => {
                let mut result = Self::raw_count(doc);
                let divider = result.values().sum::<f64>();
                for value in result.values_mut() {
                    *value /= divider;
                }
                result
            }
        }
    }
}
