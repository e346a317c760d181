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

use serde::{Deserialize, Serialize};
use text_processing::vectorizer::SparseVector;

use crate::error::{ArtifactError, PredictError};

/// A fitted linear one-vs-rest decision function over tf-idf features.
///
/// The class set is whatever the training step baked into the artifact.
/// Prediction is a pure function of (model, vector): no state mutation,
/// safe for concurrent read-only use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    dim: usize,
}

impl LinearModel {
    pub fn new(
        classes: Vec<String>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        dim: usize,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            weights,
            intercepts,
            dim,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks the invariants a deserialized model has to uphold.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.len() < 2 {
            return Err(ArtifactError::InvalidModel(format!(
                "{} classes, need at least 2",
                self.classes.len()
            )));
        }
        // A binary model carries a single decision row, as the original
        // training stack serializes it.
        let expected_rows = if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        };
        if self.weights.len() != expected_rows {
            return Err(ArtifactError::InvalidModel(format!(
                "{} weight rows for {} classes",
                self.weights.len(),
                self.classes.len()
            )));
        }
        if self.intercepts.len() != expected_rows {
            return Err(ArtifactError::InvalidModel(format!(
                "{} intercepts for {} weight rows",
                self.intercepts.len(),
                self.weights.len()
            )));
        }
        if let Some(row) = self.weights.iter().find(|row| row.len() != self.dim) {
            return Err(ArtifactError::InvalidModel(format!(
                "weight row of length {} for dimensionality {}",
                row.len(),
                self.dim
            )));
        }
        Ok(())
    }

    /// The feature dimensionality D the model was trained on.
    pub fn dimensionality(&self) -> usize {
        self.dim
    }

    /// The closed label set discovered from the fitted artifact.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Predicts the label for a single feature vector.
    pub fn predict(&self, vector: &SparseVector) -> Result<&str, PredictError> {
        if vector.len() != self.dim {
            return Err(PredictError::DimensionMismatch {
                vector: vector.len(),
                model: self.dim,
            });
        }
        let index = if self.classes.len() == 2 {
            let decision = vector.dot(&self.weights[0]) + self.intercepts[0];
            usize::from(decision > 0.0)
        } else {
            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (row, (weights, intercept)) in
                self.weights.iter().zip(self.intercepts.iter()).enumerate()
            {
                let score = vector.dot(weights) + intercept;
                if score > best_score {
                    best_score = score;
                    best = row;
                }
            }
            best
        };
        Ok(&self.classes[index])
    }

    /// Predicts every vector, positionally aligned with the input.
    pub fn predict_batch<'a, I>(&self, vectors: I) -> Result<Vec<&str>, PredictError>
    where
        I: IntoIterator<Item = &'a SparseVector>,
    {
        vectors.into_iter().map(|v| self.predict(v)).collect()
    }
}

#[cfg(test)]
mod test {
    use text_processing::vectorizer::SparseVector;

    use super::LinearModel;
    use crate::error::{ArtifactError, PredictError};

    fn binary_model() -> LinearModel {
        LinearModel::new(
            vec!["negatif".into(), "positif".into()],
            vec![vec![1.0, -1.0, 0.0]],
            vec![0.0],
            3,
        )
        .unwrap()
    }

    fn multiclass_model() -> LinearModel {
        LinearModel::new(
            vec!["negatif".into(), "netral".into(), "positif".into()],
            vec![
                vec![0.0, 2.0, 0.0],
                vec![0.0, 0.0, 2.0],
                vec![2.0, 0.0, 0.0],
            ],
            vec![0.0, 0.0, 0.0],
            3,
        )
        .unwrap()
    }

    #[test]
    fn binary_decision_uses_the_sign() {
        let model = binary_model();
        let positive = SparseVector::new(3, vec![(0, 1.0)]);
        let negative = SparseVector::new(3, vec![(1, 1.0)]);
        assert_eq!(model.predict(&positive).unwrap(), "positif");
        assert_eq!(model.predict(&negative).unwrap(), "negatif");
    }

    #[test]
    fn multiclass_takes_the_argmax() {
        let model = multiclass_model();
        assert_eq!(
            model.predict(&SparseVector::new(3, vec![(0, 1.0)])).unwrap(),
            "positif"
        );
        assert_eq!(
            model.predict(&SparseVector::new(3, vec![(1, 1.0)])).unwrap(),
            "negatif"
        );
        assert_eq!(
            model.predict(&SparseVector::new(3, vec![(2, 1.0)])).unwrap(),
            "netral"
        );
    }

    #[test]
    fn prediction_is_deterministic() {
        let model = multiclass_model();
        let vector = SparseVector::new(3, vec![(0, 0.3), (2, 0.2)]);
        let first = model.predict(&vector).unwrap().to_string();
        for _ in 0..10 {
            assert_eq!(model.predict(&vector).unwrap(), first);
        }
    }

    #[test]
    fn rejects_dimension_skew() {
        let model = binary_model();
        let vector = SparseVector::new(5, vec![]);
        assert!(matches!(
            model.predict(&vector),
            Err(PredictError::DimensionMismatch { vector: 5, model: 3 })
        ));
    }

    #[test]
    fn rejects_inconsistent_shapes() {
        let result = LinearModel::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![0.0; 3]],
            vec![0.0],
            3,
        );
        assert!(matches!(result, Err(ArtifactError::InvalidModel(_))));

        let result = LinearModel::new(
            vec!["a".into(), "b".into()],
            vec![vec![0.0; 4]],
            vec![0.0],
            3,
        );
        assert!(matches!(result, Err(ArtifactError::InvalidModel(_))));
    }

    #[test]
    fn serde_round_trip() {
        let model = multiclass_model();
        let json = serde_json::to_string(&model).unwrap();
        let loaded: LinearModel = serde_json::from_str(&json).unwrap();
        loaded.validate().unwrap();
        let vector = SparseVector::new(3, vec![(0, 1.0)]);
        assert_eq!(
            loaded.predict(&vector).unwrap(),
            model.predict(&vector).unwrap()
        );
    }

    #[test]
    fn batch_is_positionally_aligned() {
        let model = binary_model();
        let vectors = vec![
            SparseVector::new(3, vec![(0, 1.0)]),
            SparseVector::new(3, vec![(1, 1.0)]),
            SparseVector::new(3, vec![]),
        ];
        let labels = model.predict_batch(vectors.iter()).unwrap();
        assert_eq!(labels, vec!["positif", "negatif", "negatif"]);
    }
}
