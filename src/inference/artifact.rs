//! Serialized classifier artifact

use super::Classifier;
use crate::error::{ClassifierError, Result};
use crate::preprocessing::StandardScaler;
use crate::training::{LogisticRegression, ModelMetrics};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the on-disk layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// A fitted scaler + logistic regression pair, with the metadata needed to
/// serve it: feature names in column order and class names in index order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
    pub scaler: StandardScaler,
    pub model: LogisticRegression,
    /// Held-out metrics from the training run
    pub metrics: Option<ModelMetrics>,
    /// RFC 3339 timestamp of the training run
    pub trained_at: String,
}

impl ModelArtifact {
    pub fn new(
        feature_names: Vec<String>,
        class_names: Vec<String>,
        scaler: StandardScaler,
        model: LogisticRegression,
    ) -> Result<Self> {
        let artifact = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names,
            class_names,
            scaler,
            model,
            metrics: None,
            trained_at: chrono::Utc::now().to_rfc3339(),
        };
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn with_metrics(mut self, metrics: ModelMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ClassifierError::SerializationError(format!(
                "unsupported artifact format version {} (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        if !self.model.is_fitted || !self.scaler.is_fitted() {
            return Err(ClassifierError::ModelNotFitted);
        }
        if self.class_names.len() != 2 {
            return Err(ClassifierError::ShapeError {
                expected: "2 classes".to_string(),
                actual: format!("{} classes", self.class_names.len()),
            });
        }
        let n_features = self.model.n_features().unwrap_or(0);
        if n_features != self.feature_names.len() {
            return Err(ClassifierError::ShapeError {
                expected: format!("{} feature names", n_features),
                actual: format!("{} feature names", self.feature_names.len()),
            });
        }
        Ok(())
    }

    /// Save the artifact as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate an artifact
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::ConfigError(format!("cannot read model {}: {}", path.display(), e))
        })?;
        let artifact: Self = serde_json::from_str(&json)?;
        artifact.validate()?;
        Ok(artifact)
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let scaled = self.scaler.transform(x)?;
        self.model.predict(&scaled)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let scaled = self.scaler.transform(x)?;
        self.model.predict_proba(&scaled)
    }

    fn feature_names(&self) -> Vec<String> {
        self.feature_names.clone()
    }

    fn class_names(&self) -> Vec<String> {
        self.class_names.clone()
    }
}
