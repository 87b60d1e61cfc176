use crate::classification_pipeline::error::{PipelineError, Stage};
use crate::classification_pipeline::pipeline::ClassificationPipeline;
use crate::decision_rule::PredictedLabel;
use crate::display::interface::Display;
use crate::image_normalizer::decoded_image::{DecodedImage, InvalidImageError};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const NO_IMAGE_NOTICE: &str = "Please select picture or take picture";
pub const INVALID_IMAGE_NOTICE: &str = "Could not read that picture, please pick another one";
pub const INFERENCE_NOTICE: &str = "Prediction failed, please try again";

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Predicted(PredictedLabel),
    Notice(&'static str),
    /// Failed without anything user-facing to say.
    Failed,
    /// A previous prediction was still running; nothing was done.
    Busy,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Turns "predict" presses into display updates. Only one prediction runs at
/// a time; presses that arrive meanwhile are dropped.
pub struct Presenter {
    pipeline: ClassificationPipeline,
    display: Arc<Mutex<dyn Display + Send + Sync>>,
    in_flight: AtomicBool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Presenter {
    pub fn new(
        pipeline: ClassificationPipeline,
        display: Arc<Mutex<dyn Display + Send + Sync>>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            pipeline,
            display,
            in_flight: AtomicBool::new(false),
            logger: logger.with_namespace("presenter"),
        }
    }

    pub fn on_predict(
        &self,
        image: Option<&DecodedImage>,
    ) -> Result<PredictionOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            self.logger.info("Prediction already running, ignoring trigger")?;
            return Ok(PredictionOutcome::Busy);
        };

        let outcome = match self.pipeline.classify(image) {
            Ok(predicted) => PredictionOutcome::Predicted(predicted),
            Err(e) => self.on_error(e)?,
        };

        self.render(&outcome)?;

        Ok(outcome)
    }

    /// The picked file could not be decoded. Shown the same way as an image
    /// the pipeline rejects.
    pub fn on_unreadable_image(
        &self,
        error: InvalidImageError,
    ) -> Result<PredictionOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            self.logger.info("Prediction already running, ignoring trigger")?;
            return Ok(PredictionOutcome::Busy);
        };

        let outcome = self.on_error(PipelineError::from(error))?;
        self.render(&outcome)?;

        Ok(outcome)
    }

    fn on_error(
        &self,
        error: PipelineError,
    ) -> Result<PredictionOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let stage = error.stage();

        match stage {
            None => {}
            Some(Stage::Normalize) => self.logger.info(&format!("Rejected image: {}", error))?,
            Some(stage) => self
                .logger
                .error(&format!("{:?} stage failed: {}", stage, error))?,
        }

        if !error.is_user_facing() {
            return Ok(PredictionOutcome::Failed);
        }

        Ok(PredictionOutcome::Notice(match stage {
            None => NO_IMAGE_NOTICE,
            Some(Stage::Normalize) => INVALID_IMAGE_NOTICE,
            Some(Stage::Invoke) | Some(Stage::Decide) => INFERENCE_NOTICE,
        }))
    }

    fn render(
        &self,
        outcome: &PredictionOutcome,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut display = self.display.lock().map_err(|e| e.to_string())?;

        match outcome {
            PredictionOutcome::Predicted(predicted) => display.show_label(&predicted.label),
            PredictionOutcome::Notice(message) => display.show_notice(message),
            PredictionOutcome::Failed => display.clear(),
            PredictionOutcome::Busy => Ok(()),
        }
    }
}
