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

use thiserror::Error;

/// An error from loading the serialized vectorizer/model artifact.
/// Any of these is fatal at startup; the service never claims readiness
/// with a broken artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Serialisation(#[from] bincode::Error),
    #[error("the artifact has format version {0} but this build reads version {1}")]
    UnsupportedVersion(u32, u32),
    #[error("the model expects {model} features but the vectorizer produces {vectorizer}")]
    DimensionMismatch { vectorizer: usize, model: usize },
    #[error("the model shape is inconsistent: {0}")]
    InvalidModel(String),
}

/// An error from a single prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("the vector has dimensionality {vector} but the model expects {model}")]
    DimensionMismatch { vector: usize, model: usize },
}

/// An error from classifying a single input.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("the input text is empty")]
    EmptyInput,
    #[error(transparent)]
    Prediction(#[from] PredictError),
}

/// An error from the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// An error from bulk dataset annotation.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("the dataset has no '{0}' column")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
