//! Data preprocessing module
//!
//! Feature scaling applied before the classifier, fitted on the training
//! split and stored inside the model artifact.

mod scaler;

pub use scaler::StandardScaler;
