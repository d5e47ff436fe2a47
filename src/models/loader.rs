//! Model artifact loader.
//!
//! Reads the serialized bundle (subject models, scaler, training schema) from
//! a single JSON file. Every failure — missing file, corrupt contents, widths
//! that disagree with the schema — becomes a human-readable error; nothing
//! panics past this boundary. The bundle is loaded exactly once per process
//! and passed by reference afterwards.

use crate::error::SimulatorError;
use crate::models::bundle::{ModelBundle, SubjectModel};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Load and validate a model bundle from `path`.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<ModelBundle, SimulatorError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        SimulatorError::ArtifactLoad(format!(
            "cannot open model artifact '{}': {e}",
            path.display()
        ))
    })?;

    let bundle: ModelBundle = serde_json::from_reader(file).map_err(|e| {
        SimulatorError::ArtifactLoad(format!(
            "model artifact '{}' is corrupt: {e}",
            path.display()
        ))
    })?;

    validate(&bundle)?;

    info!(
        path = %path.display(),
        models = bundle.model_count(),
        columns = bundle.schema.len(),
        "Model bundle loaded"
    );

    Ok(bundle)
}

/// Check internal consistency: non-empty schema, and scaler/model widths that
/// match the schema width.
fn validate(bundle: &ModelBundle) -> Result<(), SimulatorError> {
    let width = bundle.schema.len();
    if width == 0 {
        return Err(SimulatorError::Configuration(
            "training schema is empty".to_string(),
        ));
    }

    if bundle.scaler.mean.len() != width || bundle.scaler.scale.len() != width {
        return Err(SimulatorError::ArtifactLoad(format!(
            "scaler width {}/{} does not match training schema width {width}",
            bundle.scaler.mean.len(),
            bundle.scaler.scale.len(),
        )));
    }

    for (name, model) in &bundle.models {
        if model.input_width() != width {
            return Err(SimulatorError::ArtifactLoad(format!(
                "model '{name}' expects {} features but the training schema has {width}",
                model.input_width(),
            )));
        }
        if let SubjectModel::PerSubject {
            intercepts,
            coefficients,
        } = model
        {
            if intercepts.len() != coefficients.len() {
                return Err(SimulatorError::ArtifactLoad(format!(
                    "model '{name}' has {} intercepts but {} coefficient rows",
                    intercepts.len(),
                    coefficients.len(),
                )));
            }
        }
    }

    Ok(())
}
