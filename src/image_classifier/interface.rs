use crate::image_normalizer::tensor::NormalizedTensor;
use std::time::Duration;

/// Raw per-class scores. Not guaranteed to be probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector(Vec<f32>);

impl ScoreVector {
    pub fn new(scores: Vec<f32>) -> Self {
        Self(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for ScoreVector {
    fn from(scores: Vec<f32>) -> Self {
        Self::new(scores)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    #[error("tensor shape {actual:?} does not match model input {expected:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },
    #[error("inference failed: {0}")]
    Run(String),
    #[error("inference did not finish within {0:?}")]
    Timeout(Duration),
}

pub trait ImageClassifier {
    /// One forward pass. Implementations must release whatever they acquire
    /// for the call before returning, on success and on failure.
    fn invoke(&self, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError>;
}
