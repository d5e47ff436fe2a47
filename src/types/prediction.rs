//! Prediction result data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five exam subjects, in the fixed order the models were trained with.
///
/// The serialized names double as the lookup keys into the model bundle, so
/// they must match the training artifact exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Ciências Natureza")]
    NaturalSciences,
    #[serde(rename = "Ciências Humanas")]
    HumanSciences,
    #[serde(rename = "Linguagens")]
    Languages,
    #[serde(rename = "Matemática")]
    Mathematics,
    #[serde(rename = "Redação")]
    Writing,
}

/// Fixed subject ordering; positional index selects the output column of
/// multi-output models.
pub const SUBJECTS: [Subject; 5] = [
    Subject::NaturalSciences,
    Subject::HumanSciences,
    Subject::Languages,
    Subject::Mathematics,
    Subject::Writing,
];

impl Subject {
    /// Training-time subject name, used as the bundle lookup key and for
    /// display.
    pub fn name(&self) -> &'static str {
        match self {
            Subject::NaturalSciences => "Ciências Natureza",
            Subject::HumanSciences => "Ciências Humanas",
            Subject::Languages => "Linguagens",
            Subject::Mathematics => "Matemática",
            Subject::Writing => "Redação",
        }
    }
}

/// Qualitative score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreBand {
    /// Determine the band from a score and the configured thresholds.
    pub fn from_score(score: f64, thresholds: &ScoreBandThresholds) -> Self {
        if score >= thresholds.excellent {
            ScoreBand::Excellent
        } else if score >= thresholds.good {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsImprovement
        }
    }
}

/// Configurable band thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBandThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl Default for ScoreBandThresholds {
    fn default() -> Self {
        Self {
            excellent: 700.0,
            good: 500.0,
        }
    }
}

/// One subject's predicted score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectScore {
    pub subject: Subject,
    /// Score rounded to one decimal place. Conventionally in [0, 1000] but
    /// not clamped.
    pub score: f64,
    pub band: ScoreBand,
}

/// The outcome of one prediction request: five subject scores in fixed order
/// plus the derived average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Unique request identifier, for log correlation.
    pub request_id: String,

    /// Per-subject scores, in the fixed subject order.
    pub scores: Vec<SubjectScore>,

    /// round(sum / 5, 1) of the subject scores.
    pub average: f64,

    /// Band of the average score.
    pub average_band: ScoreBand,

    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(scores: Vec<SubjectScore>, average: f64, thresholds: &ScoreBandThresholds) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            scores,
            average,
            average_band: ScoreBand::from_score(average, thresholds),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_order_and_names() {
        let names: Vec<&str> = SUBJECTS.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Ciências Natureza",
                "Ciências Humanas",
                "Linguagens",
                "Matemática",
                "Redação"
            ]
        );
    }

    #[test]
    fn test_band_from_score() {
        let thresholds = ScoreBandThresholds::default();

        assert_eq!(
            ScoreBand::from_score(750.0, &thresholds),
            ScoreBand::Excellent
        );
        assert_eq!(
            ScoreBand::from_score(700.0, &thresholds),
            ScoreBand::Excellent
        );
        assert_eq!(ScoreBand::from_score(500.0, &thresholds), ScoreBand::Good);
        assert_eq!(
            ScoreBand::from_score(499.9, &thresholds),
            ScoreBand::NeedsImprovement
        );
    }

    #[test]
    fn test_result_serialization() {
        let thresholds = ScoreBandThresholds::default();
        let scores = vec![SubjectScore {
            subject: Subject::Writing,
            score: 612.4,
            band: ScoreBand::from_score(612.4, &thresholds),
        }];

        let result = PredictionResult::new(scores, 612.4, &thresholds);
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: PredictionResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.request_id, deserialized.request_id);
        assert_eq!(result.average, deserialized.average);
        assert_eq!(deserialized.scores[0].subject, Subject::Writing);
        assert_eq!(deserialized.average_band, ScoreBand::Good);
    }
}
