use crate::image_classifier::interface::{ImageClassifier, InferenceError, ScoreVector};
use crate::image_classifier::tract::tensor::{check_shape, load_plan, run_plan, TractPlan};
use crate::image_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

use super::models::model_config::ModelConfig;

/// Loads the model once and reuses it. Forward passes are serialized through
/// a mutex; the guard only lives for the duration of one `invoke`.
pub struct ImageClassifierTractOnnx {
    plan: Mutex<TractPlan>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, InferenceError> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tract_onnx");
        let _ = logger.info(&format!(
            "Loading model {}",
            config.onnx_model_path.display()
        ));

        let plan = load_plan(&config)?;

        Ok(Self::from_plan(plan, config, logger))
    }

    /// Wraps an already runnable plan. `config.input_shape` must match the
    /// plan's input fact.
    pub fn from_plan(
        plan: TractPlan,
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            plan: Mutex::new(plan),
            config,
            logger,
        }
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn invoke(&self, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError> {
        check_shape(&self.config, tensor)?;

        let plan = self
            .plan
            .lock()
            .map_err(|_| InferenceError::Unavailable("model lock poisoned".to_string()))?;
        let scores = run_plan(&plan, tensor)?;
        drop(plan);

        let _ = self.logger.info(&format!("Scores: {:?}", scores.as_slice()));

        Ok(scores)
    }
}
