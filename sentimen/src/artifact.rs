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

use std::fs::File;
use std::io::{BufReader, BufWriter};

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use text_processing::vectorizer::DocumentVectorizer;

use crate::classifier::LinearModel;
use crate::error::ArtifactError;

/// The artifact format version this build reads and writes.
pub const ARTIFACT_VERSION: u32 = 1;

/// The fitted state produced by the offline training step: the tf-idf
/// vectorizer (vocabulary + idf table) and the linear model. Read-only
/// for the process lifetime; the core never re-fits it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentimentArtifact {
    version: u32,
    vectorizer: DocumentVectorizer,
    model: LinearModel,
}

impl SentimentArtifact {
    pub fn new(
        vectorizer: DocumentVectorizer,
        model: LinearModel,
    ) -> Result<Self, ArtifactError> {
        let artifact = Self {
            version: ARTIFACT_VERSION,
            vectorizer,
            model,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Loads and validates an artifact. Every failure here is fatal:
    /// a process without a loadable artifact cannot serve classifications.
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self, ArtifactError> {
        let mut input = BufReader::new(File::options().read(true).open(path.as_ref())?);
        let artifact: SentimentArtifact = bincode::deserialize_from(&mut input)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn save(&self, path: impl AsRef<Utf8Path>) -> Result<(), ArtifactError> {
        let mut output = BufWriter::new(
            File::options()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path.as_ref())?,
        );
        bincode::serialize_into(&mut output, self)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.version != ARTIFACT_VERSION {
            return Err(ArtifactError::UnsupportedVersion(
                self.version,
                ARTIFACT_VERSION,
            ));
        }
        self.model.validate()?;
        if self.vectorizer.dimensionality() != self.model.dimensionality() {
            return Err(ArtifactError::DimensionMismatch {
                vectorizer: self.vectorizer.dimensionality(),
                model: self.model.dimensionality(),
            });
        }
        Ok(())
    }

    pub fn into_parts(self) -> (DocumentVectorizer, LinearModel) {
        (self.vectorizer, self.model)
    }

    pub fn vectorizer(&self) -> &DocumentVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}
