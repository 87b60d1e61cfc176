use crate::image_classifier::interface::{ImageClassifier, InferenceError, ScoreVector};
use crate::image_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// Bounds another classifier with a deadline. The forward pass runs on a
/// worker thread; on expiry the caller gets `Timeout` and the worker's result
/// is discarded when it eventually finishes.
///
/// At most one worker exists at a time. Until a timed-out worker returns,
/// further calls fail fast with `Unavailable`.
pub struct ImageClassifierTimeout {
    inner: Arc<dyn ImageClassifier + Send + Sync>,
    timeout: Duration,
    running: Arc<AtomicBool>,
    logger: Arc<dyn Logger + Send + Sync>,
}

/// Held by the worker thread for as long as the inner call runs.
struct Running(Arc<AtomicBool>);

impl Running {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ImageClassifierTimeout {
    pub fn new(
        inner: Arc<dyn ImageClassifier + Send + Sync>,
        timeout: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            inner,
            timeout,
            running: Arc::new(AtomicBool::new(false)),
            logger: logger.with_namespace("image_classifier").with_namespace("timeout"),
        }
    }
}

impl ImageClassifier for ImageClassifierTimeout {
    fn invoke(&self, tensor: &NormalizedTensor) -> Result<ScoreVector, InferenceError> {
        let Some(running) = Running::acquire(&self.running) else {
            let _ = self
                .logger
                .error("Previous inference is still running, refusing to start another");
            return Err(InferenceError::Unavailable(
                "previous inference is still running".to_string(),
            ));
        };

        let (sender, receiver) = channel();
        let inner = self.inner.clone();
        let tensor = tensor.clone();

        std::thread::spawn(move || {
            let result = inner.invoke(&tensor);
            // Released before sending so a caller holding the result sees it free.
            drop(running);
            let _ = sender.send(result);
        });

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                let _ = self
                    .logger
                    .error(&format!("Inference timed out after {:?}", self.timeout));
                Err(InferenceError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(InferenceError::Run(
                "inference worker stopped without a result".to_string(),
            )),
        }
    }
}
