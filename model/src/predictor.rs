use ndarray::ArrayView1;

use crate::error::{ModelErr, Result};

/// How the underlying classifier scores a feature vector.
///
/// `Logistic` carries a calibrated probability; `Margin` models only expose
/// a signed decision value, so they report no probability at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Logistic,
    Margin,
}

/// The outcome of one inference call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// 1 if the client is predicted to subscribe, 0 otherwise.
    pub label: u8,
    /// Positive-class probability in [0, 1], absent for margin models.
    pub probability: Option<f32>,
}

/// The deserialized classifier: a linear score over the engineered feature
/// vector. Immutable once constructed; concurrent readers share it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictor {
    kind: ModelKind,
    weights: Vec<f32>,
    intercept: f32,
}

impl Predictor {
    /// Creates a new `Predictor`.
    ///
    /// # Arguments
    /// * `kind` - The scoring mode of the classifier.
    /// * `weights` - One weight per feature column.
    /// * `intercept` - The bias term.
    pub fn new(kind: ModelKind, weights: Vec<f32>, intercept: f32) -> Self {
        Self {
            kind,
            weights,
            intercept,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn feature_len(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Classifies a feature vector.
    ///
    /// The label is 1 iff the positive-class probability is at least 0.5
    /// (for margin models, iff the decision value is non-negative). The
    /// threshold lives here, next to the score; callers never recompute it.
    ///
    /// # Arguments
    /// * `features` - A vector of exactly `feature_len()` columns.
    ///
    /// # Returns
    /// The predicted label and, when the model supports it, the
    /// positive-class probability.
    pub fn predict(&self, features: &[f32]) -> Result<Prediction> {
        let score = self.decision(features)?;

        match self.kind {
            ModelKind::Logistic => {
                let probability = sigmoid(score);
                Ok(Prediction {
                    label: (probability >= 0.5) as u8,
                    probability: Some(probability),
                })
            }
            ModelKind::Margin => Ok(Prediction {
                label: (score >= 0.0) as u8,
                probability: None,
            }),
        }
    }

    /// Returns the two-class probability vector `[P(no), P(yes)]`, or
    /// `None` for models without a probability capability.
    ///
    /// # Arguments
    /// * `features` - A vector of exactly `feature_len()` columns.
    pub fn predict_proba(&self, features: &[f32]) -> Result<Option<[f32; 2]>> {
        let score = self.decision(features)?;

        match self.kind {
            ModelKind::Logistic => {
                let p = sigmoid(score);
                Ok(Some([1.0 - p, p]))
            }
            ModelKind::Margin => Ok(None),
        }
    }

    fn decision(&self, features: &[f32]) -> Result<f32> {
        if features.len() != self.weights.len() {
            return Err(ModelErr::FeatureLengthMismatch {
                got: features.len(),
                expected: self.weights.len(),
            });
        }

        let weights = ArrayView1::from(self.weights.as_slice());
        let score = weights.dot(&ArrayView1::from(features)) + self.intercept;

        if !score.is_finite() {
            return Err(ModelErr::NonFiniteScore);
        }

        Ok(score)
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}
