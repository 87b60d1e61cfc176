use crate::image_classifier::interface::{ImageClassifier, InferenceError, ScoreVector};
use crate::image_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Scores(Vec<f32>),
    Random { num_classes: usize },
    Fail(String),
}

pub struct ImageClassifierFake {
    behavior: Behavior,
    delay: Duration,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    fn with_behavior(behavior: Behavior, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    /// Always answers with `scores`.
    pub fn new(scores: Vec<f32>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Scores(scores), logger)
    }

    pub fn random(num_classes: usize, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Random { num_classes }, logger)
    }

    pub fn failing(message: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Fail(message.to_string()), logger)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_scores(num_classes: usize) -> Result<Vec<f32>, InferenceError> {
        let mut rng = rand::rng();
        let score_dist =
            Uniform::new(0.0f32, 1.0f32).map_err(|e| InferenceError::Run(e.to_string()))?;
        Ok((0..num_classes).map(|_| score_dist.sample(&mut rng)).collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn invoke(&self, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("Classifying tensor of shape {:?}", tensor.shape()));

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.behavior {
            Behavior::Scores(scores) => Ok(ScoreVector::new(scores.clone())),
            Behavior::Random { num_classes } => {
                Ok(ScoreVector::new(Self::random_scores(*num_classes)?))
            }
            Behavior::Fail(message) => Err(InferenceError::Unavailable(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_normalizer::decoded_image::DecodedImage;
    use crate::image_normalizer::normalize::{normalize, ChannelOrder, Normalization};
    use crate::library::logger::impl_fake::LoggerFake;
    use image::DynamicImage;

    fn tensor() -> NormalizedTensor {
        let image = DecodedImage::new(DynamicImage::new_rgb8(4, 4));
        normalize(&image, 4, 4, &Normalization::raw(), ChannelOrder::Rgb).unwrap()
    }

    #[test]
    fn test_scripted_scores_and_call_count() {
        let classifier = ImageClassifierFake::new(vec![0.1, 0.9], Arc::new(LoggerFake::new()));

        let scores = classifier.invoke(&tensor()).unwrap();
        classifier.invoke(&tensor()).unwrap();

        assert_eq!(scores.as_slice(), &[0.1, 0.9]);
        assert_eq!(classifier.calls(), 2);
    }

    #[test]
    fn test_random_scores_have_requested_length() {
        let classifier = ImageClassifierFake::random(4, Arc::new(LoggerFake::new()));

        let scores = classifier.invoke(&tensor()).unwrap();

        assert_eq!(scores.len(), 4);
        assert!(scores.as_slice().iter().all(|s| (0.0..1.0).contains(s)));
    }

    #[test]
    fn test_failing_classifier() {
        let classifier = ImageClassifierFake::failing("model not loaded", Arc::new(LoggerFake::new()));

        let result = classifier.invoke(&tensor());

        assert!(matches!(result, Err(InferenceError::Unavailable(_))));
        assert_eq!(classifier.calls(), 1);
    }
}
