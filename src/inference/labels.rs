//! Class index to diagnosis mapping

use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};

/// Diagnosis reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    /// Class name as recorded in a model artifact
    pub fn class_name(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "benign",
            Diagnosis::Malignant => "malignant",
        }
    }

    /// Label sent to HTTP clients
    pub fn wire_label(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benigno",
            Diagnosis::Malignant => "Maligno",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// Which diagnosis each class index stands for.
///
/// The service owns this convention; [`LabelMap::check_against`] verifies a
/// loaded artifact agrees with it before any request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMap {
    by_index: [Diagnosis; 2],
}

impl LabelMap {
    /// Class 0 is benign, class 1 is malignant
    pub const DEFAULT: LabelMap = LabelMap {
        by_index: [Diagnosis::Benign, Diagnosis::Malignant],
    };

    pub fn new(class0: Diagnosis, class1: Diagnosis) -> Self {
        Self {
            by_index: [class0, class1],
        }
    }

    pub fn diagnosis(&self, class_index: usize) -> Option<Diagnosis> {
        self.by_index.get(class_index).copied()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.by_index.iter().map(|d| d.class_name().to_string()).collect()
    }

    /// Fail unless `artifact_classes` lists the same classes in the same order.
    pub fn check_against(&self, artifact_classes: &[String]) -> Result<()> {
        let expected = self.class_names();
        if artifact_classes != expected.as_slice() {
            return Err(ClassifierError::LabelMismatch {
                artifact: artifact_classes.to_vec(),
                expected,
            });
        }
        Ok(())
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}
