use std::collections::HashMap;

use compact_str::CompactString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tf_idf::{Tf, TfAlgorithm};

/// A sparse numeric vector of fixed dimensionality.
///
/// Entries are sorted by column index; columns not present carry weight
/// zero. The dimensionality never changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub fn new(dim: usize, entries: Vec<(u32, f64)>) -> Self {
        Self { dim, entries }
    }

    /// The fixed dimensionality, independent of the number of stored entries.
    pub fn len(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// The non-zero entries as (column, weight) pairs, ascending by column.
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn dense(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        for (col, value) in &self.entries {
            out[*col as usize] = *value;
        }
        out
    }

    /// Scales the vector to unit euclidean length. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self
            .entries
            .iter()
            .map(|(_, value)| value * value)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= norm;
            }
        }
    }

    /// The dot product against a dense weight row of the same dimensionality.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(col, value)| value * weights[*col as usize])
            .sum()
    }
}

impl PartialEq for SparseVector {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.0 == b.0 && float_cmp::approx_eq!(f64, a.1, b.1))
    }
}

/// An error from assembling a vectorizer out of fitted state.
#[derive(Debug, Error)]
pub enum VectorizerInitError {
    #[error("the idf table has {idf} entries but the vocabulary has {vocabulary}")]
    IdfLengthMismatch { vocabulary: usize, idf: usize },
    #[error("the vocabulary index {0} lies outside of the dimensionality {1}")]
    IndexOutOfRange(u32, usize),
    #[error("the vocabulary maps two tokens to the column {0}")]
    DuplicateIndex(u32),
}

/// Vectorizes a tokenized document against a previously fitted vocabulary
/// and idf table. Read-only after construction; fitting is not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVectorizer {
    vocabulary: HashMap<CompactString, u32>,
    idf: Vec<f64>,
    tf: Tf,
    normalize: bool,
}

impl DocumentVectorizer {
    /// Builds a vectorizer from a fitted (token -> column) mapping and the
    /// idf weight per column. Every column must be covered exactly once.
    pub fn from_fitted<S, I>(
        vocabulary: I,
        idf: Vec<f64>,
        tf: Tf,
        normalize: bool,
    ) -> Result<Self, VectorizerInitError>
    where
        S: Into<CompactString>,
        I: IntoIterator<Item = (S, u32)>,
    {
        let vocabulary: HashMap<CompactString, u32> = vocabulary
            .into_iter()
            .map(|(token, index)| (token.into(), index))
            .collect();
        if vocabulary.len() != idf.len() {
            return Err(VectorizerInitError::IdfLengthMismatch {
                vocabulary: vocabulary.len(),
                idf: idf.len(),
            });
        }
        let mut seen = vec![false; idf.len()];
        for index in vocabulary.values() {
            let slot = seen
                .get_mut(*index as usize)
                .ok_or(VectorizerInitError::IndexOutOfRange(*index, idf.len()))?;
            if *slot {
                return Err(VectorizerInitError::DuplicateIndex(*index));
            }
            *slot = true;
        }
        Ok(Self {
            vocabulary,
            idf,
            tf,
            normalize,
        })
    }

    /// The vocabulary size D; every produced vector has this dimensionality.
    pub fn dimensionality(&self) -> usize {
        self.idf.len()
    }

    /// Transforms a tokenized document. Tokens outside of the vocabulary
    /// contribute nothing; an empty document yields an all-zero vector.
    pub fn vectorize<S: AsRef<str>, D: IntoIterator<Item = S>>(&self, doc: D) -> SparseVector {
        let columns = doc
            .into_iter()
            .filter_map(|token| self.vocabulary.get(token.as_ref()).copied());
        let tf = self.tf.calculate_tf(columns);
        let mut entries = tf
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column as usize]))
            .collect_vec();
        entries.sort_unstable_by_key(|(column, _)| *column);
        let mut vector = SparseVector::new(self.idf.len(), entries);
        if self.normalize {
            vector.l2_normalize();
        }
        vector
    }

    /// Transforms every document, positionally aligned with the input.
    pub fn vectorize_batch<S, D, I>(&self, docs: I) -> Vec<SparseVector>
    where
        S: AsRef<str>,
        D: IntoIterator<Item = S>,
        I: IntoIterator<Item = D>,
    {
        docs.into_iter().map(|doc| self.vectorize(doc)).collect()
    }
}
