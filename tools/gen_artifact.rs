//! Synthetic Model Artifact Generator
//!
//! Writes a structurally exact model bundle (subject models, fitted scaler,
//! training column schema) so the simulator and its integration tests can run
//! end-to-end without the external training pipeline. Coefficients are drawn
//! from a seeded generator, so the same seed always produces the same
//! artifact.

use anyhow::{Context, Result};
use enem_simulator::models::bundle::{ModelBundle, StandardScaler, SubjectModel};
use enem_simulator::models::loader::load_bundle;
use enem_simulator::types::prediction::SUBJECTS;
use enem_simulator::types::profile::{
    AgeBracket, IncomeBracket, RaceCode, SchoolType, StateCode,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gen_artifact=info".parse()?),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let output = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("models/enem_bundle.json");
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

    info!(output = %output, seed, "Generating model artifact");

    let bundle = generate_bundle(seed);
    write_bundle(Path::new(output), &bundle)?;

    info!(
        models = bundle.model_count(),
        columns = bundle.schema.len(),
        "Artifact written"
    );

    // Reload through the real loader as a round-trip self-check.
    let reloaded = load_bundle(output)?;
    info!(
        models = reloaded.model_count(),
        columns = reloaded.schema.len(),
        "Artifact verified"
    );

    Ok(())
}

/// The full one-hot column universe, in profile field order. This is the
/// schema shape training produces when every category is represented.
fn full_schema() -> Vec<String> {
    let mut schema = Vec::new();
    schema.extend(AgeBracket::ALL.iter().map(|a| a.column()));
    schema.extend(SchoolType::ALL.iter().map(|s| s.column()));
    schema.extend(RaceCode::ALL.iter().map(|r| r.column()));
    schema.extend(StateCode::ALL.iter().map(|s| s.column()));
    schema.extend(IncomeBracket::ALL.iter().map(|i| i.column()));
    schema
}

fn generate_bundle(seed: u64) -> ModelBundle {
    let mut rng = StdRng::seed_from_u64(seed);
    let schema = full_schema();
    let width = schema.len();

    // One-hot columns carry category frequencies; the scaler mirrors what
    // standardization of binary columns yields: mean = p, scale = sqrt(p(1-p)).
    let mean: Vec<f64> = (0..width).map(|_| rng.gen_range(0.02..0.5)).collect();
    let scale: Vec<f64> = mean.iter().map(|p| (p * (1.0 - p)).sqrt()).collect();

    // A single multi-output regressor stored under every subject key, the way
    // the training pipeline persisted its ensemble.
    let intercepts: Vec<f64> = SUBJECTS
        .iter()
        .map(|_| rng.gen_range(480.0..560.0))
        .collect();
    let coefficients: Vec<Vec<f64>> = SUBJECTS
        .iter()
        .map(|_| (0..width).map(|_| rng.gen_range(-25.0..25.0)).collect())
        .collect();
    let shared = SubjectModel::PerSubject {
        intercepts,
        coefficients,
    };

    let mut models = HashMap::new();
    for subject in SUBJECTS {
        models.insert(subject.name().to_string(), shared.clone());
    }

    ModelBundle {
        models,
        scaler: StandardScaler { mean, scale },
        schema,
    }
}

fn write_bundle(path: &Path, bundle: &ModelBundle) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create artifact '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, bundle).context("failed to write artifact JSON")?;

    Ok(())
}
