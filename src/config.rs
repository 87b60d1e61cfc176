use crate::classification_pipeline::pipeline::PipelineSettings;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_normalizer::normalize::{ChannelOrder, Normalization};
use crate::label_list::{ConfigurationError, LabelList};
use chrono::Offset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierLifecycle {
    /// Load once, reuse for every request.
    #[default]
    Reusable,
    /// Load on every request and drop afterwards.
    PerCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub labels: Vec<String>,
    pub input_width: u32,
    pub input_height: u32,
    pub normalization: Normalization,
    pub channel_order: ChannelOrder,
    pub model_path: PathBuf,
    pub classifier_lifecycle: ClassifierLifecycle,
    /// 0 disables the timeout.
    pub inference_timeout_ms: u64,
    pub logger_utc_offset_secs: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: vec![
                "Brown Spot".to_string(),
                "Healthy".to_string(),
                "Hispa".to_string(),
                "Leaf Blast".to_string(),
            ],
            input_width: 175,
            input_height: 175,
            normalization: Normalization::raw(),
            channel_order: ChannelOrder::Rgb,
            model_path: PathBuf::from("models/vgg16.onnx"),
            classifier_lifecycle: ClassifierLifecycle::Reusable,
            inference_timeout_ms: 10_000,
            logger_utc_offset_secs: 0,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigurationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// A zero or non-finite factor would turn every tensor value into inf or NaN.
    fn validate(&self) -> Result<(), ConfigurationError> {
        let normalization = &self.normalization;
        if !normalization.scale.is_finite() || normalization.scale == 0.0 {
            return Err(ConfigurationError::InvalidNormalization(format!(
                "scale must be finite and non-zero, got {}",
                normalization.scale
            )));
        }
        if let Some(mean) = normalization.mean.iter().find(|m| !m.is_finite()) {
            return Err(ConfigurationError::InvalidNormalization(format!(
                "mean must be finite, got {}",
                mean
            )));
        }
        if let Some(std) = normalization
            .std
            .iter()
            .find(|s| !s.is_finite() || **s == 0.0)
        {
            return Err(ConfigurationError::InvalidNormalization(format!(
                "std must be finite and non-zero, got {}",
                std
            )));
        }
        Ok(())
    }

    /// Missing file means defaults. A file that exists but is broken is still
    /// an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn label_list(&self) -> Result<LabelList, ConfigurationError> {
        LabelList::new(self.labels.iter().cloned())
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            onnx_model_path: self.model_path.clone(),
            input_shape: (self.input_height, self.input_width),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            input_width: self.input_width,
            input_height: self.input_height,
            normalization: self.normalization,
            channel_order: self.channel_order,
        }
    }

    pub fn inference_timeout(&self) -> Option<Duration> {
        match self.inference_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn logger_timezone(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.logger_utc_offset_secs).unwrap_or_else(|| chrono::Utc.fix())
    }
}
