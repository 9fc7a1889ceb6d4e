//! Prediction payload validation
//!
//! Two request shapes are accepted:
//!
//! ```json
//! {"features": [17.99, 10.38, ...]}
//! {"mean radius": 17.99, "mean texture": 10.38, ...}
//! ```
//!
//! Only structure is checked here: the object shape and the feature count.
//! Cell types are checked when the row is converted for the classifier.

use crate::dataset::N_FEATURES;
use crate::error::{ClassifierError, Result};
use ndarray::Array2;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

const FEATURES_KEY: &str = "features";

/// Which request shape a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureShape {
    /// Ordered list under `features`
    Positional,
    /// Top-level key/value pairs
    Named,
}

impl std::fmt::Display for FeatureShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureShape::Positional => f.write_str("positional"),
            FeatureShape::Named => f.write_str("named"),
        }
    }
}

/// Structural validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("payload is empty or not a JSON object")]
    EmptyPayload,

    #[error("{shape} payload requires {expected} features, received {received}")]
    InvalidFeatureCount {
        shape: FeatureShape,
        expected: usize,
        received: usize,
    },

    #[error("unrecognized feature names: {}", .names.join(", "))]
    UnrecognizedFeatureNames { names: Vec<String> },
}

/// A request body resolved to one of the accepted shapes
#[derive(Debug, Clone, PartialEq)]
pub enum FeaturePayload {
    Positional(Vec<Value>),
    Named(Vec<(String, Value)>),
}

impl FeaturePayload {
    /// Resolve the shape of a parsed body. Counts are not checked here.
    pub fn parse(value: Value) -> std::result::Result<Self, PayloadError> {
        let mut object = match value {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(PayloadError::EmptyPayload),
        };

        if let Some(features) = object.remove(FEATURES_KEY) {
            return match features {
                Value::Array(items) => Ok(FeaturePayload::Positional(items)),
                _ => Err(PayloadError::InvalidFeatureCount {
                    shape: FeatureShape::Positional,
                    expected: N_FEATURES,
                    received: 0,
                }),
            };
        }

        Ok(FeaturePayload::Named(object.into_iter().collect()))
    }

    pub fn shape(&self) -> FeatureShape {
        match self {
            FeaturePayload::Positional(_) => FeatureShape::Positional,
            FeaturePayload::Named(_) => FeatureShape::Named,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FeaturePayload::Positional(items) => items.len(),
            FeaturePayload::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One validated row of exactly [`N_FEATURES`] raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    cells: Vec<Value>,
    shape: FeatureShape,
}

impl FeatureRow {
    pub fn shape(&self) -> FeatureShape {
        self.shape
    }

    /// Convert to a 1 x N numeric matrix.
    ///
    /// Numbers pass through and booleans become 0.0 / 1.0. Any other cell
    /// (string, null, array, object) is an error.
    pub fn to_matrix(&self) -> Result<Array2<f64>> {
        let values = self
            .cells
            .iter()
            .enumerate()
            .map(|(position, cell)| match cell {
                Value::Number(n) => n.as_f64().ok_or_else(|| non_numeric(position, cell)),
                Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
                _ => Err(non_numeric(position, cell)),
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(Array2::from_shape_vec((1, values.len()), values)?)
    }
}

fn non_numeric(position: usize, cell: &Value) -> ClassifierError {
    ClassifierError::NonNumericFeature {
        position,
        value: cell.to_string(),
    }
}

/// Validates request bodies into [`FeatureRow`]s.
///
/// Named payloads are taken in the object's own key order unless strict
/// names are configured, in which case the key set must equal the expected
/// names and the row follows their order.
#[derive(Debug, Clone, Default)]
pub struct PayloadNormalizer {
    strict_names: Option<Vec<String>>,
}

impl PayloadNormalizer {
    /// Accept any 30 named features in the order given
    pub fn permissive() -> Self {
        Self { strict_names: None }
    }

    /// Require exactly these feature names for the named shape
    pub fn strict(feature_names: Vec<String>) -> Self {
        Self {
            strict_names: Some(feature_names),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_names.is_some()
    }

    pub fn normalize(&self, value: Value) -> std::result::Result<FeatureRow, PayloadError> {
        let payload = FeaturePayload::parse(value)?;

        if payload.len() != N_FEATURES {
            return Err(PayloadError::InvalidFeatureCount {
                shape: payload.shape(),
                expected: N_FEATURES,
                received: payload.len(),
            });
        }

        let cells = match (payload, &self.strict_names) {
            (FeaturePayload::Positional(items), _) => {
                return Ok(FeatureRow {
                    cells: items,
                    shape: FeatureShape::Positional,
                });
            }
            (FeaturePayload::Named(pairs), None) => {
                pairs.into_iter().map(|(_, value)| value).collect()
            }
            (FeaturePayload::Named(pairs), Some(names)) => reorder(pairs, names)?,
        };

        Ok(FeatureRow {
            cells,
            shape: FeatureShape::Named,
        })
    }
}

fn reorder(
    pairs: Vec<(String, Value)>,
    names: &[String],
) -> std::result::Result<Vec<Value>, PayloadError> {
    let known: HashSet<&str> = names.iter().map(String::as_str).collect();
    let unknown: Vec<String> = pairs
        .iter()
        .filter(|(key, _)| !known.contains(key.as_str()))
        .map(|(key, _)| key.clone())
        .collect();
    if !unknown.is_empty() {
        return Err(PayloadError::UnrecognizedFeatureNames { names: unknown });
    }

    let mut by_name: std::collections::HashMap<String, Value> = pairs.into_iter().collect();
    // Same count and no unknown keys, so every expected name is present.
    names
        .iter()
        .map(|name| {
            by_name
                .remove(name)
                .ok_or_else(|| PayloadError::UnrecognizedFeatureNames {
                    names: vec![name.clone()],
                })
        })
        .collect()
}
