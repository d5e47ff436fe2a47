//! Feature encoding for model inference.
//!
//! Converts a raw profile into the numeric feature row the trained models
//! expect. The column→index table is built once from the training schema and
//! reused per request; the per-request work is one-hot activation, alignment,
//! and scaling. Alignment is the critical contract here: a column-order or
//! category mismatch produces silently wrong predictions, not an error.

use crate::error::SimulatorError;
use crate::models::bundle::StandardScaler;
use crate::types::profile::Profile;
use std::collections::HashMap;
use tracing::debug;

/// Encoder that aligns one-hot profile columns to the training schema.
#[derive(Debug)]
pub struct FeatureEncoder {
    index: HashMap<String, usize>,
    width: usize,
}

impl FeatureEncoder {
    /// Build the column→index table from the training schema.
    pub fn new(schema: &[String]) -> Result<Self, SimulatorError> {
        if schema.is_empty() {
            return Err(SimulatorError::Configuration(
                "training schema is empty".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(schema.len());
        for (i, column) in schema.iter().enumerate() {
            if index.insert(column.clone(), i).is_some() {
                return Err(SimulatorError::Configuration(format!(
                    "duplicate column '{column}' in training schema"
                )));
            }
        }

        Ok(Self {
            index,
            width: schema.len(),
        })
    }

    /// Number of columns in the training schema.
    pub fn width(&self) -> usize {
        self.width
    }

    /// One-hot encode the profile, aligned to the schema's column order.
    ///
    /// Each profile field activates exactly one column. Schema columns the
    /// profile does not activate stay 0; activated columns absent from the
    /// schema are dropped. Dropping is deliberate: a category unseen at
    /// training time degrades to an all-zero field rather than failing.
    pub fn one_hot(&self, profile: &Profile) -> Vec<f64> {
        let mut row = vec![0.0; self.width];

        for column in profile.active_columns() {
            match self.index.get(column.as_str()) {
                Some(&i) => row[i] = 1.0,
                None => {
                    debug!(column = %column, "Category not in training schema; dropped");
                }
            }
        }

        row
    }

    /// Full encoding: one-hot, align, then apply the fitted scaler.
    pub fn encode(&self, profile: &Profile, scaler: &StandardScaler) -> Vec<f64> {
        scaler.transform(&self.one_hot(profile))
    }
}
