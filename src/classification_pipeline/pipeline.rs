use crate::classification_pipeline::error::PipelineError;
use crate::decision_rule::{decide, PredictedLabel};
use crate::image_classifier::interface::ImageClassifier;
use crate::image_normalizer::decoded_image::DecodedImage;
use crate::image_normalizer::normalize::{normalize, ChannelOrder, Normalization};
use crate::label_list::LabelList;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub input_width: u32,
    pub input_height: u32,
    pub normalization: Normalization,
    pub channel_order: ChannelOrder,
}

/// normalize -> invoke -> decide. Holds no per-request state.
#[derive(Clone)]
pub struct ClassificationPipeline {
    settings: PipelineSettings,
    labels: LabelList,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassificationPipeline {
    pub fn new(
        settings: PipelineSettings,
        labels: LabelList,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            settings,
            labels,
            image_classifier,
            logger: logger.with_namespace("pipeline"),
        }
    }

    pub fn classify(&self, image: Option<&DecodedImage>) -> Result<PredictedLabel, PipelineError> {
        let image = image.ok_or(PipelineError::NoImage)?;

        let _ = self.logger.info(&format!(
            "Classifying {}x{} image",
            image.width(),
            image.height()
        ));

        let tensor = normalize(
            image,
            self.settings.input_width,
            self.settings.input_height,
            &self.settings.normalization,
            self.settings.channel_order,
        )?;

        let scores = self.image_classifier.invoke(&tensor)?;

        let predicted = decide(&scores, &self.labels).map_err(|e| {
            let _ = self.logger.error(&format!(
                "Label list and model output are out of sync: {}",
                e
            ));
            PipelineError::from(e)
        })?;

        let _ = self
            .logger
            .info(&format!("Predicted {} (index {})", predicted, predicted.index));

        Ok(predicted)
    }
}
