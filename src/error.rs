//! Error taxonomy for the prediction pipeline.
//!
//! Every failure here is terminal for the current request; nothing is retried.

use thiserror::Error;

/// Errors surfaced by the model loader, feature encoder, and predictor.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The model artifact file is missing, unreadable, or internally
    /// inconsistent. Blocking: the form is never shown without a bundle.
    #[error("failed to load model artifact: {0}")]
    ArtifactLoad(String),

    /// The training schema or application configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The bundle lacks a predictor for one of the five required subjects.
    #[error("no trained model for subject '{subject}'")]
    MissingSubjectModel { subject: &'static str },

    /// A model evaluation failed for one subject. The whole batch fails with
    /// it; no partial results are produced.
    #[error("prediction failed for subject '{subject}': {message}")]
    Prediction {
        subject: &'static str,
        message: String,
    },
}
