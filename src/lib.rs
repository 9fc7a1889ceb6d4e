//! Tumor classifier - breast tumor malignancy prediction
//!
//! This crate provides:
//! - Loading of the Breast Cancer Wisconsin (Diagnostic) dataset
//! - Feature standardization and a logistic regression classifier
//! - A serialized model artifact shared by training and serving
//! - An HTTP inference service and a command-line interface
//!
//! # Modules
//!
//! - [`dataset`] - WDBC loading and train/test split
//! - [`preprocessing`] - Feature scaling
//! - [`training`] - Model fitting and evaluation
//! - [`inference`] - Payload normalization, label mapping, prediction
//! - [`server`] - HTTP server with the prediction API
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Core ML modules
pub mod dataset;
pub mod preprocessing;
pub mod training;
pub mod inference;

// Services
pub mod server;
pub mod cli;

pub use error::{ClassifierError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ClassifierError, Result};

    pub use crate::dataset::{load_wdbc, train_test_split, Dataset, FEATURE_NAMES, N_FEATURES};
    pub use crate::preprocessing::StandardScaler;
    pub use crate::training::{LogisticRegression, ModelMetrics, TrainEngine, TrainingConfig};
    pub use crate::inference::{
        Classifier, Diagnosis, FeaturePayload, InferenceEngine, LabelMap, ModelArtifact,
        PayloadNormalizer,
    };
    pub use crate::server::{create_router, AppState, ServerConfig};
}
