//! Inference engine implementation

use super::{Classifier, Diagnosis, FeatureRow, LabelMap};
use crate::error::{ClassifierError, Result};
use std::sync::Arc;
use tracing::debug;

/// Outcome of classifying one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub diagnosis: Diagnosis,
    pub class_index: usize,
    /// Probability of the predicted class
    pub confidence: f64,
}

/// Runs a shared classifier on validated rows
#[derive(Clone)]
pub struct InferenceEngine {
    classifier: Arc<dyn Classifier>,
    label_map: LabelMap,
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("label_map", &self.label_map)
            .finish()
    }
}

impl InferenceEngine {
    pub fn new(classifier: Arc<dyn Classifier>, label_map: LabelMap) -> Self {
        Self {
            classifier,
            label_map,
        }
    }

    /// Build an engine after checking the classifier's class order against
    /// the label map.
    pub fn checked(classifier: Arc<dyn Classifier>, label_map: LabelMap) -> Result<Self> {
        label_map.check_against(&classifier.class_names())?;
        Ok(Self::new(classifier, label_map))
    }

    /// Classify one row.
    ///
    /// The confidence is the probability of the predicted class, not of
    /// class 1.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionResult> {
        let x = row.to_matrix()?;

        let classes = self.classifier.predict(&x)?;
        let class_index = *classes.get(0).ok_or_else(|| {
            ClassifierError::InferenceError("classifier returned no prediction".to_string())
        })?;

        let proba = self.classifier.predict_proba(&x)?;
        let confidence = *proba.get((0, class_index)).ok_or_else(|| {
            ClassifierError::InferenceError(format!(
                "no probability for class {} in output of shape {:?}",
                class_index,
                proba.dim()
            ))
        })?;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ClassifierError::InferenceError(format!(
                "probability {} outside [0, 1]",
                confidence
            )));
        }

        let diagnosis = self.label_map.diagnosis(class_index).ok_or_else(|| {
            ClassifierError::InferenceError(format!("unmapped class index {}", class_index))
        })?;

        debug!(class_index, confidence, shape = %row.shape(), "Row classified");
        Ok(PredictionResult {
            diagnosis,
            class_index,
            confidence,
        })
    }
}
