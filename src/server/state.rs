//! Application state management

use std::sync::Arc;

use crate::error::Result;
use crate::inference::{Classifier, InferenceEngine, LabelMap, PayloadNormalizer};

use super::ServerConfig;

/// State shared by every handler. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: InferenceEngine,
    pub normalizer: PayloadNormalizer,
}

impl AppState {
    /// Wire a classifier into the service.
    ///
    /// Fails when the classifier's class order disagrees with `label_map`.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        label_map: LabelMap,
        strict_feature_names: bool,
    ) -> Result<Self> {
        let normalizer = if strict_feature_names {
            PayloadNormalizer::strict(classifier.feature_names())
        } else {
            PayloadNormalizer::permissive()
        };
        let engine = InferenceEngine::checked(classifier, label_map)?;
        Ok(Self { engine, normalizer })
    }

    pub fn from_config(classifier: Arc<dyn Classifier>, config: &ServerConfig) -> Result<Self> {
        Self::new(classifier, LabelMap::DEFAULT, config.strict_feature_names)
    }
}
