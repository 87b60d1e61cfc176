use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("classifier returned {scores} scores but {labels} labels are configured")]
    LengthMismatch { scores: usize, labels: usize },
    #[error("label list is empty")]
    EmptyLabelList,
    #[error("invalid normalization: {0}")]
    InvalidNormalization(String),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Ordered class names, fixed at startup. Index `i` names score `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelList(Arc<[String]>);

impl LabelList {
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ConfigurationError::EmptyLabelList);
        }
        Ok(Self(labels.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}
