use crate::image_classifier::interface::{ImageClassifier, InferenceError, ScoreVector};
use crate::image_classifier::tract::tensor::{check_shape, load_plan, run_plan};
use crate::image_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

use super::models::model_config::ModelConfig;

/// Loads the model on every `invoke` and drops it before returning.
///
/// Slower than [`super::impl_tract_onnx::ImageClassifierTractOnnx`], but never
/// keeps the model resident between calls.
pub struct ImageClassifierTractOnnxPerCall {
    config: ModelConfig,
    exclusive: Mutex<()>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnxPerCall {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            exclusive: Mutex::new(()),
            logger: logger
                .with_namespace("image_classifier")
                .with_namespace("tract_onnx_per_call"),
        }
    }
}

impl ImageClassifier for ImageClassifierTractOnnxPerCall {
    fn invoke(&self, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError> {
        check_shape(&self.config, tensor)?;

        let _guard = self
            .exclusive
            .lock()
            .map_err(|_| InferenceError::Unavailable("model lock poisoned".to_string()))?;

        let _ = self.logger.info(&format!(
            "Loading model {}",
            self.config.onnx_model_path.display()
        ));
        let plan = load_plan(&self.config)?;
        let result = run_plan(&plan, tensor);
        drop(plan);
        let _ = self.logger.info("Model released");

        result
    }
}
