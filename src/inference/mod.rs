//! Inference module
//!
//! Turns request payloads into classifier calls:
//! - [`PayloadNormalizer`] validates the two accepted JSON shapes into a 30-cell [`FeatureRow`]
//! - [`InferenceEngine`] runs a [`Classifier`] on that row and maps the class index
//!   through a [`LabelMap`]
//! - [`ModelArtifact`] is the serialized classifier produced by training

mod artifact;
mod engine;
mod labels;
mod payload;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use engine::{InferenceEngine, PredictionResult};
pub use labels::{Diagnosis, LabelMap};
pub use payload::{FeaturePayload, FeatureRow, FeatureShape, PayloadError, PayloadNormalizer};

use crate::dataset::{CLASS_NAMES, FEATURE_NAMES};
use crate::error::Result;
use ndarray::{Array1, Array2};

/// A fitted binary classifier over rows of numeric features.
///
/// Implementations are read-only after construction so one instance can be
/// shared by every request.
pub trait Classifier: Send + Sync {
    /// Class index per row
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>>;

    /// `[P(class 0), P(class 1)]` per row
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Feature names in the column order the classifier was fitted on
    fn feature_names(&self) -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    /// Class names in index order
    fn class_names(&self) -> Vec<String> {
        CLASS_NAMES.iter().map(|s| s.to_string()).collect()
    }
}
