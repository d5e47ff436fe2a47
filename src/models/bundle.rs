//! Model bundle data structures: subject models, fitted scaler, and the
//! training column schema.
//!
//! The bundle is the portable representation of the trained ensemble. It is
//! produced by the external training pipeline, loaded once at startup, and
//! treated as read-only for the process lifetime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A trained linear predictor with a declared output arity.
///
/// The arity is serialized in the artifact (`output` tag) instead of being
/// inferred from the output array shape at call time, so a malformed bundle
/// fails at load rather than producing silently wrong scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum SubjectModel {
    /// Emits exactly one value: the score of the subject it is keyed under.
    Single { intercept: f64, coefficients: Vec<f64> },

    /// Emits one value per subject in the fixed subject order; the predictor
    /// selects by the subject's positional index.
    PerSubject {
        intercepts: Vec<f64>,
        coefficients: Vec<Vec<f64>>,
    },
}

impl SubjectModel {
    /// Evaluate the model on an encoded, scaled feature row.
    pub fn evaluate(&self, features: &[f64]) -> Vec<f64> {
        match self {
            SubjectModel::Single {
                intercept,
                coefficients,
            } => {
                vec![intercept + dot(coefficients, features)]
            }
            SubjectModel::PerSubject {
                intercepts,
                coefficients,
            } => intercepts
                .iter()
                .zip(coefficients)
                .map(|(b, row)| b + dot(row, features))
                .collect(),
        }
    }

    /// Input width the model expects; must equal the schema width.
    pub fn input_width(&self) -> usize {
        match self {
            SubjectModel::Single { coefficients, .. } => coefficients.len(),
            SubjectModel::PerSubject { coefficients, .. } => {
                coefficients.iter().map(Vec::len).max().unwrap_or(0)
            }
        }
    }

    /// Number of values `evaluate` emits.
    pub fn output_width(&self) -> usize {
        match self {
            SubjectModel::Single { .. } => 1,
            SubjectModel::PerSubject { intercepts, .. } => intercepts.len(),
        }
    }
}

fn dot(coefficients: &[f64], features: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(features)
        .map(|(c, x)| c * x)
        .sum()
}

/// Fitted per-column affine transform: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Apply the transform to one row. Zero scales (constant training
    /// columns) divide by 1 instead, matching the fitting convention.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| {
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect()
    }
}

/// The deserialized model artifact: subject name → predictor, the fitted
/// scaler, and the ordered training column schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub models: HashMap<String, SubjectModel>,
    pub scaler: StandardScaler,
    pub schema: Vec<String>,
}

impl ModelBundle {
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn model_for(&self, subject: &str) -> Option<&SubjectModel> {
        self.models.get(subject)
    }
}
