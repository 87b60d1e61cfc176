use crate::config::{ClassifierLifecycle, Config};
use crate::image_classifier::impl_timeout::ImageClassifierTimeout;
use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::impl_tract_onnx_per_call::ImageClassifierTractOnnxPerCall;
use crate::image_classifier::interface::{ImageClassifier, InferenceError};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Builds the ONNX classifier the config asks for, wrapped in a timeout when
/// one is configured.
pub fn build_image_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, InferenceError> {
    let model_config = config.model_config();

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> =
        match config.classifier_lifecycle {
            ClassifierLifecycle::Reusable => {
                Arc::new(ImageClassifierTractOnnx::new(model_config, logger.clone())?)
            }
            ClassifierLifecycle::PerCall => Arc::new(ImageClassifierTractOnnxPerCall::new(
                model_config,
                logger.clone(),
            )),
        };

    Ok(match config.inference_timeout() {
        Some(timeout) => Arc::new(ImageClassifierTimeout::new(image_classifier, timeout, logger)),
        None => image_classifier,
    })
}
