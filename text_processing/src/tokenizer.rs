//Copyright 2024 Sentimen Contributors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::borrow::Cow;
use std::sync::Arc;

use itertools::Itertools;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::stemmer::IndonesianStemmer;
use crate::stopwords::{ContainsKind, StopWordList};

/// A primitive tokenizer.
///
/// Case folding happens before segmentation, punctuation falls out of
/// `unicode_words`, stopwords are dropped, and the survivors are stemmed.
/// Read-only after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    normalize: bool,
    stop_words: Option<Arc<StopWordList>>,
    stemmer: Option<Arc<IndonesianStemmer>>,
}

impl Tokenizer {
    pub fn new(
        normalize: bool,
        stop_words: Option<Arc<StopWordList>>,
        stemmer: Option<Arc<IndonesianStemmer>>,
    ) -> Self {
        Self {
            normalize,
            stop_words,
            stemmer,
        }
    }

    /// The full Indonesian pipeline with the compiled-in stopword list
    /// and root dictionary.
    pub fn indonesian_default() -> Self {
        Self::new(
            true,
            Some(Arc::new(StopWordList::indonesian_default())),
            Some(Arc::new(IndonesianStemmer::default())),
        )
    }

    /// Preprocesses a text into its canonical token stream.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let text = if self.normalize {
            Cow::Owned(lowered.nfc().collect::<String>())
        } else {
            Cow::Borrowed(lowered.as_str())
        };

        let words = text.unicode_words();

        let words = if let Some(stop_words) = &self.stop_words {
            let target = if self.normalize {
                ContainsKind::Normalized
            } else {
                ContainsKind::Raw
            };
            words
                .filter(|value| !stop_words.contains(target, *value))
                .collect_vec()
        } else {
            words.collect_vec()
        };

        if let Some(stemmer) = &self.stemmer {
            words
                .into_iter()
                .map(|value| stemmer.stem(value).into_owned())
                .collect_vec()
        } else {
            words.into_iter().map(str::to_owned).collect_vec()
        }
    }

    /// The token stream re-joined with single spaces, preserving order.
    pub fn normalize_text(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }
}
