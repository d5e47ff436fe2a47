//! End-to-end pipeline tests: write an artifact to disk, load it, encode a
//! profile, and predict all five subjects.

use approx::assert_relative_eq;
use enem_simulator::encoder::FeatureEncoder;
use enem_simulator::error::SimulatorError;
use enem_simulator::models::bundle::{ModelBundle, StandardScaler, SubjectModel};
use enem_simulator::models::inference::predict_all;
use enem_simulator::models::loader::load_bundle;
use enem_simulator::types::prediction::{ScoreBand, ScoreBandThresholds, SUBJECTS};
use enem_simulator::types::profile::{
    AgeBracket, IncomeBracket, Profile, RaceCode, SchoolType, StateCode,
};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

fn full_schema() -> Vec<String> {
    let mut schema = Vec::new();
    schema.extend(AgeBracket::ALL.iter().map(|a| a.column()));
    schema.extend(SchoolType::ALL.iter().map(|s| s.column()));
    schema.extend(RaceCode::ALL.iter().map(|r| r.column()));
    schema.extend(StateCode::ALL.iter().map(|s| s.column()));
    schema.extend(IncomeBracket::ALL.iter().map(|i| i.column()));
    schema
}

/// Bundle over `schema` whose per-subject models all score
/// `base + 10 * sum(features)`, with a distinct base per subject.
fn linear_bundle(schema: Vec<String>) -> ModelBundle {
    let width = schema.len();
    let bases = [500.0, 510.0, 520.0, 530.0, 540.0];

    let shared = SubjectModel::PerSubject {
        intercepts: bases.to_vec(),
        coefficients: vec![vec![10.0; width]; 5],
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
        schema,
    }
}

fn write_bundle(path: &Path, bundle: &ModelBundle) {
    let file = File::create(path).unwrap();
    serde_json::to_writer_pretty(file, bundle).unwrap();
}

#[test]
fn generated_artifact_round_trips_and_predicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enem_bundle.json");
    write_bundle(&path, &linear_bundle(full_schema()));

    let bundle = load_bundle(&path).unwrap();
    assert_eq!(bundle.model_count(), 5);
    assert_eq!(bundle.schema, full_schema());

    let encoder = FeatureEncoder::new(&bundle.schema).unwrap();
    let thresholds = ScoreBandThresholds::default();

    let features = encoder.encode(&Profile::default(), &bundle.scaler);
    assert_eq!(features.len(), bundle.schema.len());

    let result = predict_all(&features, &bundle, &thresholds).unwrap();

    // Five scores in the fixed subject order; unit scaler and five active
    // columns make each score base + 50.
    assert_eq!(result.scores.len(), 5);
    for (subject_score, subject) in result.scores.iter().zip(SUBJECTS) {
        assert_eq!(subject_score.subject, subject);
    }
    assert_relative_eq!(result.scores[0].score, 550.0);
    assert_relative_eq!(result.scores[4].score, 590.0);
    assert_relative_eq!(result.average, 570.0);
    assert_eq!(result.average_band, ScoreBand::Good);
}

#[test]
fn prediction_is_deterministic_across_calls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enem_bundle.json");
    write_bundle(&path, &linear_bundle(full_schema()));

    let bundle = load_bundle(&path).unwrap();
    let encoder = FeatureEncoder::new(&bundle.schema).unwrap();
    let thresholds = ScoreBandThresholds::default();
    let profile = Profile {
        age: AgeBracket::Age26To30,
        school: SchoolType::Private,
        race: RaceCode::Indigena,
        state: StateCode::Ce,
        income: IncomeBracket::Q,
    };

    let a = encoder.encode(&profile, &bundle.scaler);
    let b = encoder.encode(&profile, &bundle.scaler);
    assert_eq!(a, b);

    let ra = predict_all(&a, &bundle, &thresholds).unwrap();
    let rb = predict_all(&b, &bundle, &thresholds).unwrap();
    for (x, y) in ra.scores.iter().zip(&rb.scores) {
        assert_eq!(x.score, y.score);
    }
    assert_eq!(ra.average, rb.average);
}

#[test]
fn missing_artifact_blocks_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_bundle(&path).unwrap_err();
    assert!(matches!(err, SimulatorError::ArtifactLoad(_)));
}

#[test]
fn category_unseen_at_training_time_degrades_silently() {
    // Training never saw GO: drop its column from the schema.
    let schema: Vec<String> = full_schema()
        .into_iter()
        .filter(|c| c != "SG_UF_PROVA_GO")
        .collect();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enem_bundle.json");
    write_bundle(&path, &linear_bundle(schema));

    let bundle = load_bundle(&path).unwrap();
    let encoder = FeatureEncoder::new(&bundle.schema).unwrap();
    let thresholds = ScoreBandThresholds::default();

    let profile = Profile {
        state: StateCode::Go,
        ..Profile::default()
    };
    let row = encoder.one_hot(&profile);

    // The state field is all zero, the other four fields still activate.
    assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 4);
    assert!(bundle
        .schema
        .iter()
        .zip(&row)
        .filter(|(c, _)| c.starts_with("SG_UF_PROVA_"))
        .all(|(_, &v)| v == 0.0));

    // And prediction still succeeds: 4 active columns -> base + 40.
    let result = predict_all(&encoder.encode(&profile, &bundle.scaler), &bundle, &thresholds)
        .unwrap();
    assert_relative_eq!(result.scores[0].score, 540.0);
}

#[test]
fn schema_of_exactly_the_active_columns_is_all_ones_then_scaled() {
    let profile = Profile::default();
    let schema: Vec<String> = profile.active_columns().to_vec();

    let mut bundle = linear_bundle(schema.clone());
    bundle.scaler = StandardScaler {
        mean: vec![0.5; 5],
        scale: vec![0.5; 5],
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enem_bundle.json");
    write_bundle(&path, &bundle);

    let loaded = load_bundle(&path).unwrap();
    let encoder = FeatureEncoder::new(&loaded.schema).unwrap();

    assert_eq!(encoder.one_hot(&profile), vec![1.0; 5]);
    let scaled = encoder.encode(&profile, &loaded.scaler);
    for v in scaled {
        assert_relative_eq!(v, 1.0);
    }
}
