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

use std::sync::Arc;

use text_processing::tokenizer::Tokenizer;
use text_processing::vectorizer::DocumentVectorizer;

use crate::artifact::SentimentArtifact;
use crate::classifier::LinearModel;
use crate::error::ClassifyError;
use crate::history::HistoryStore;

/// The process-wide read-only classification context: normalizer,
/// vectorizer and model, built once at startup from the loaded artifact.
#[derive(Debug)]
pub struct ClassifierContext {
    tokenizer: Tokenizer,
    vectorizer: DocumentVectorizer,
    model: LinearModel,
}

impl ClassifierContext {
    pub fn new(tokenizer: Tokenizer, artifact: SentimentArtifact) -> Self {
        let (vectorizer, model) = artifact.into_parts();
        Self {
            tokenizer,
            vectorizer,
            model,
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Runs normalize -> vectorize -> predict for one text.
    fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        let tokens = self.tokenizer.tokenize(text);
        let vector = self.vectorizer.vectorize(tokens);
        Ok(self.model.predict(&vector)?.to_string())
    }
}

/// Orchestrates the classification pipeline and the history side effect.
#[derive(Debug)]
pub struct SentimentService {
    context: Arc<ClassifierContext>,
    history: HistoryStore,
}

impl SentimentService {
    pub fn new(context: Arc<ClassifierContext>, history: HistoryStore) -> Self {
        Self { context, history }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Classifies a single sentence and appends it to the history.
    ///
    /// The label is computed before the history write is attempted; a
    /// failed write is logged and the label is still returned. No retry,
    /// at-most-once history semantics.
    pub fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let label = self.context.classify(text)?;
        if let Err(err) = self.history.insert(text, &label) {
            log::warn!("could not append the classification of {text:?} to the history: {err}");
        }
        Ok(label)
    }

    /// Classifies every text without touching the history. A failing row
    /// keeps its slot in the output; the rest of the batch continues.
    pub fn classify_batch<S, I>(&self, texts: I) -> Vec<Result<String, ClassifyError>>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        texts
            .into_iter()
            .map(|text| {
                let text = text.as_ref();
                if text.trim().is_empty() {
                    Err(ClassifyError::EmptyInput)
                } else {
                    self.context.classify(text)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use text_processing::tf_idf::Tf;
    use text_processing::tokenizer::Tokenizer;
    use text_processing::vectorizer::DocumentVectorizer;

    use super::{ClassifierContext, SentimentService};
    use crate::artifact::SentimentArtifact;
    use crate::classifier::LinearModel;
    use crate::error::ClassifyError;
    use crate::history::HistoryStore;

    /// A small fitted state over the stemmed forms of a few review words.
    fn context() -> Arc<ClassifierContext> {
        let vectorizer = DocumentVectorizer::from_fitted(
            [
                ("bagus", 0u32),
                ("puas", 1),
                ("jelek", 2),
                ("kecewa", 3),
                ("biasa", 4),
            ],
            vec![1.0; 5],
            Tf::RawCount,
            true,
        )
        .unwrap();
        let model = LinearModel::new(
            vec!["negatif".into(), "netral".into(), "positif".into()],
            vec![
                vec![0.0, 0.0, 2.0, 2.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 2.0],
                vec![2.0, 2.0, 0.0, 0.0, 0.0],
            ],
            vec![0.0, 0.0, 0.0],
            5,
        )
        .unwrap();
        let artifact = SentimentArtifact::new(vectorizer, model).unwrap();
        Arc::new(ClassifierContext::new(
            Tokenizer::indonesian_default(),
            artifact,
        ))
    }

    fn service() -> SentimentService {
        SentimentService::new(context(), HistoryStore::open_in_memory().unwrap())
    }

    #[test]
    fn classifies_and_appends_history() {
        let service = service();
        let label = service.classify("Barangnya bagus, saya puas").unwrap();
        assert_eq!(label, "positif");

        let records = service.history().fetch_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Barangnya bagus, saya puas");
        assert_eq!(records[0].sentiment, "positif");
    }

    #[test]
    fn empty_input_is_rejected() {
        let service = service();
        assert!(matches!(
            service.classify(""),
            Err(ClassifyError::EmptyInput)
        ));
        assert!(matches!(
            service.classify("   "),
            Err(ClassifyError::EmptyInput)
        ));
        assert!(service.history().fetch_all().unwrap().is_empty());
    }

    #[test]
    fn classification_is_deterministic() {
        let service = service();
        let first = service.classify("Pengiriman jelek, saya kecewa").unwrap();
        for _ in 0..5 {
            assert_eq!(
                service.classify("Pengiriman jelek, saya kecewa").unwrap(),
                first
            );
        }
        assert_eq!(first, "negatif");
    }

    #[test]
    fn batch_is_positionally_aligned_and_skips_history() {
        let service = service();
        let results = service.classify_batch(["bagus", "jelek", "biasa"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_deref().unwrap(), "positif");
        assert_eq!(results[1].as_deref().unwrap(), "negatif");
        assert_eq!(results[2].as_deref().unwrap(), "netral");
        assert!(service.history().fetch_all().unwrap().is_empty());
    }

    #[test]
    fn a_bad_row_does_not_abort_the_batch() {
        let service = service();
        let results = service.classify_batch(["bagus", "   ", "jelek"]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ClassifyError::EmptyInput)));
        assert!(results[2].is_ok());
    }

    #[test]
    fn concurrent_classification_assigns_unique_ids() {
        let service = Arc::new(service());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let service = service.clone();
            handles.push(std::thread::spawn(move || {
                for round in 0..4 {
                    let text = if (worker + round) % 2 == 0 {
                        "bagus"
                    } else {
                        "jelek"
                    };
                    service.classify(text).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let records = service.history().fetch_all().unwrap();
        assert_eq!(records.len(), 32);
        let mut ids: Vec<_> = records.iter().map(|record| record.id).collect();
        let unsorted = ids.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        // fetch_all already yields ascending ids
        assert_eq!(unsorted, {
            let mut sorted = unsorted.clone();
            sorted.sort_unstable();
            sorted
        });
    }
}
