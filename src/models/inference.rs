//! Per-subject score prediction.
//!
//! Stateless: a pure function of (encoded vector, bundle). For each of the
//! five subjects in fixed order, the subject's model is looked up, evaluated
//! on the scaled feature row, and reduced to a single scalar by its declared
//! output arity. One subject failing fails the whole request; partial results
//! are never returned.

use crate::error::SimulatorError;
use crate::models::bundle::{ModelBundle, SubjectModel};
use crate::types::prediction::{
    PredictionResult, ScoreBand, ScoreBandThresholds, SubjectScore, SUBJECTS,
};
use tracing::debug;

/// Round to one decimal place, the precision scores are reported at.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Predict all five subject scores from an encoded, scaled feature row.
pub fn predict_all(
    features: &[f64],
    bundle: &ModelBundle,
    thresholds: &ScoreBandThresholds,
) -> Result<PredictionResult, SimulatorError> {
    let mut scores = Vec::with_capacity(SUBJECTS.len());
    let mut sum = 0.0;

    for (index, subject) in SUBJECTS.iter().enumerate() {
        let model = bundle
            .model_for(subject.name())
            .ok_or(SimulatorError::MissingSubjectModel {
                subject: subject.name(),
            })?;

        let outputs = model.evaluate(features);
        let raw = match model {
            SubjectModel::Single { .. } => outputs[0],
            SubjectModel::PerSubject { .. } => {
                *outputs
                    .get(index)
                    .ok_or_else(|| SimulatorError::Prediction {
                        subject: subject.name(),
                        message: format!(
                            "model emits {} outputs, subject index {index} is out of range",
                            outputs.len()
                        ),
                    })?
            }
        };

        if !raw.is_finite() {
            return Err(SimulatorError::Prediction {
                subject: subject.name(),
                message: format!("model produced a non-finite score ({raw})"),
            });
        }

        let score = round_to_tenth(raw);
        sum += score;

        debug!(subject = subject.name(), score, "Subject score predicted");

        scores.push(SubjectScore {
            subject: *subject,
            score,
            band: ScoreBand::from_score(score, thresholds),
        });
    }

    let average = round_to_tenth(sum / SUBJECTS.len() as f64);

    Ok(PredictionResult::new(scores, average, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bundle::StandardScaler;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    /// Bundle whose per-subject models produce a known constant per subject
    /// (zero coefficients, distinct intercepts).
    fn constant_bundle(intercepts: [f64; 5]) -> ModelBundle {
        let width = 3;
        let shared = SubjectModel::PerSubject {
            intercepts: intercepts.to_vec(),
            coefficients: vec![vec![0.0; width]; 5],
        };

        let mut models = HashMap::new();
        for subject in SUBJECTS {
            models.insert(subject.name().to_string(), shared.clone());
        }

        ModelBundle {
            models,
            scaler: StandardScaler {
                mean: vec![0.0; width],
                scale: vec![1.0; width],
            },
            schema: (0..width).map(|i| format!("COL_{i}")).collect(),
        }
    }

    #[test]
    fn test_five_scores_in_fixed_order() {
        let bundle = constant_bundle([480.0, 512.3, 555.5, 601.0, 700.0]);
        let thresholds = ScoreBandThresholds::default();

        let result = predict_all(&[0.0, 0.0, 0.0], &bundle, &thresholds).unwrap();

        assert_eq!(result.scores.len(), 5);
        for (score, subject) in result.scores.iter().zip(SUBJECTS) {
            assert_eq!(score.subject, subject);
        }
        assert_relative_eq!(result.scores[1].score, 512.3);
        assert_eq!(result.scores[4].band, ScoreBand::Excellent);
    }

    #[test]
    fn test_average_is_rounded_sum_over_five() {
        let bundle = constant_bundle([500.0, 500.0, 500.0, 500.0, 501.1]);
        let thresholds = ScoreBandThresholds::default();

        let result = predict_all(&[0.0, 0.0, 0.0], &bundle, &thresholds).unwrap();

        // (500*4 + 501.1) / 5 = 500.22 -> 500.2
        assert_relative_eq!(result.average, 500.2);
        assert_eq!(result.average_band, ScoreBand::Good);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let bundle = constant_bundle([480.0, 512.3, 555.5, 601.0, 700.0]);
        let thresholds = ScoreBandThresholds::default();
        let features = [0.5, -1.2, 0.0];

        let a = predict_all(&features, &bundle, &thresholds).unwrap();
        let b = predict_all(&features, &bundle, &thresholds).unwrap();

        for (x, y) in a.scores.iter().zip(&b.scores) {
            assert_eq!(x.score, y.score);
        }
        assert_eq!(a.average, b.average);
    }

    #[test]
    fn test_missing_subject_model_is_fatal() {
        let mut bundle = constant_bundle([500.0; 5]);
        bundle.models.remove("Matemática");
        let thresholds = ScoreBandThresholds::default();

        let err = predict_all(&[0.0, 0.0, 0.0], &bundle, &thresholds).unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::MissingSubjectModel {
                subject: "Matemática"
            }
        ));
    }

    #[test]
    fn test_short_output_row_names_the_subject() {
        let mut bundle = constant_bundle([500.0; 5]);
        // Truncated multi-output model under the last subject.
        bundle.models.insert(
            "Redação".to_string(),
            SubjectModel::PerSubject {
                intercepts: vec![500.0; 2],
                coefficients: vec![vec![0.0; 3]; 2],
            },
        );
        let thresholds = ScoreBandThresholds::default();

        let err = predict_all(&[0.0, 0.0, 0.0], &bundle, &thresholds).unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::Prediction {
                subject: "Redação",
                ..
            }
        ));
    }

    #[test]
    fn test_single_arity_model_takes_its_own_output() {
        let mut bundle = constant_bundle([500.0; 5]);
        bundle.models.insert(
            "Linguagens".to_string(),
            SubjectModel::Single {
                intercept: 640.06,
                coefficients: vec![0.0; 3],
            },
        );
        let thresholds = ScoreBandThresholds::default();

        let result = predict_all(&[9.0, 9.0, 9.0], &bundle, &thresholds).unwrap();
        assert_relative_eq!(result.scores[2].score, 640.1);
    }
}
