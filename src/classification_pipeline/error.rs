use crate::image_classifier::interface::InferenceError;
use crate::image_normalizer::decoded_image::InvalidImageError;
use crate::label_list::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    Invoke,
    Decide,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no image supplied")]
    NoImage,
    #[error("invalid image: {0}")]
    InvalidImage(#[from] InvalidImageError),
    #[error("classifier failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl PipelineError {
    /// The stage that failed. `NoImage` fails before any stage runs.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::NoImage => None,
            PipelineError::InvalidImage(_) => Some(Stage::Normalize),
            PipelineError::Inference(_) => Some(Stage::Invoke),
            PipelineError::Configuration(_) => Some(Stage::Decide),
        }
    }

    /// Configuration errors are deployment defects and are not shown to users.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, PipelineError::Configuration(_))
    }
}
