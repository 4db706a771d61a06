//! Bridge to the pre-trained win-probability model.
//!
//! The model sees a fixed nine-column record. Column names and order are
//! a contract with whoever fitted the model: the model does no schema
//! checking of its own, so a mislabelled column yields wrong numbers
//! rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::metrics::DerivedMetrics;
use super::models::MatchSnapshot;

pub const CATEGORICAL_COLUMNS: [&str; 3] = ["batting_team", "bowling_team", "city"];
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "runs_left",
    "balls_left",
    "wickets",
    "total_runs_x",
    "crr",
    "rrr",
];

/// Model input, serialised under the column names the model was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub runs_left: i32,
    pub balls_left: i32,
    #[serde(rename = "wickets")]
    pub wickets_left: i32,
    #[serde(rename = "total_runs_x")]
    pub target: i32,
    #[serde(rename = "crr")]
    pub current_run_rate: f64,
    #[serde(rename = "rrr")]
    pub required_run_rate: f64,
}

impl FeatureRecord {
    pub fn new(snapshot: &MatchSnapshot, metrics: &DerivedMetrics) -> Self {
        FeatureRecord {
            batting_team: snapshot.batting_team.clone(),
            bowling_team: snapshot.bowling_team.clone(),
            city: snapshot.city.clone(),
            runs_left: metrics.runs_left,
            balls_left: metrics.balls_left,
            wickets_left: metrics.wickets_left,
            target: snapshot.target,
            current_run_rate: metrics.current_run_rate,
            required_run_rate: metrics.required_run_rate,
        }
    }

    /// Values in [`CATEGORICAL_COLUMNS`] order.
    pub fn categorical(&self) -> [&str; 3] {
        [&self.batting_team, &self.bowling_team, &self.city]
    }

    /// Values in [`NUMERIC_COLUMNS`] order.
    pub fn numeric(&self) -> [f64; 6] {
        [
            self.runs_left as f64,
            self.balls_left as f64,
            self.wickets_left as f64,
            self.target as f64,
            self.current_run_rate,
            self.required_run_rate,
        ]
    }
}

/// Any classifier that scores a feature record.
pub trait WinProbabilityModel: Send + Sync {
    /// Class probabilities ordered `[batting side loses, batting side wins]`.
    fn predict_proba(&self, features: &FeatureRecord) -> [f64; 2];

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub win_probability: f64,
    pub loss_probability: f64,
}

/// Ask the model and take its answer as-is: no reordering, no renormalising.
pub fn query(model: &dyn WinProbabilityModel, features: &FeatureRecord) -> PredictionResult {
    let [loss, win] = model.predict_proba(features);
    PredictionResult {
        win_probability: win,
        loss_probability: loss,
    }
}

// ── Logistic artifact ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact schema mismatch: {0}")]
    Schema(String),
}

/// On-disk shape of the logistic model.
#[derive(Debug, Deserialize)]
struct Artifact {
    name: String,
    intercept: f64,
    categorical: HashMap<String, HashMap<String, f64>>,
    numeric: HashMap<String, f64>,
}

/// One-hot encoded logistic regression loaded from a JSON artifact.
///
/// Categories the model never saw contribute nothing, the same as a
/// one-hot encoder that ignores unknown values.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    name: String,
    intercept: f64,
    categorical: [HashMap<String, f64>; 3],
    numeric: [f64; 6],
}

impl LogisticModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let mut artifact: Artifact = serde_json::from_str(raw)?;

        if let Some(extra) = artifact
            .categorical
            .keys()
            .find(|k| !CATEGORICAL_COLUMNS.contains(&k.as_str()))
        {
            return Err(ModelError::Schema(format!("unexpected categorical column {}", extra)));
        }
        if let Some(extra) = artifact
            .numeric
            .keys()
            .find(|k| !NUMERIC_COLUMNS.contains(&k.as_str()))
        {
            return Err(ModelError::Schema(format!("unexpected numeric column {}", extra)));
        }

        let mut categorical: [HashMap<String, f64>; 3] = Default::default();
        for (slot, column) in categorical.iter_mut().zip(CATEGORICAL_COLUMNS) {
            *slot = artifact
                .categorical
                .remove(column)
                .ok_or_else(|| ModelError::Schema(format!("missing categorical column {}", column)))?;
        }

        let mut numeric = [0.0; 6];
        for (slot, column) in numeric.iter_mut().zip(NUMERIC_COLUMNS) {
            *slot = *artifact
                .numeric
                .get(column)
                .ok_or_else(|| ModelError::Schema(format!("missing numeric column {}", column)))?;
        }

        let all_finite = artifact.intercept.is_finite()
            && numeric.iter().all(|c| c.is_finite())
            && categorical.iter().flat_map(|m| m.values()).all(|c| c.is_finite());
        if !all_finite {
            return Err(ModelError::Schema("non-finite coefficient".to_string()));
        }

        Ok(LogisticModel {
            name: artifact.name,
            intercept: artifact.intercept,
            categorical,
            numeric,
        })
    }

    fn logit(&self, features: &FeatureRecord) -> f64 {
        let cat: f64 = self
            .categorical
            .iter()
            .zip(features.categorical())
            .map(|(coefs, value)| coefs.get(value).copied().unwrap_or(0.0))
            .sum();
        let num: f64 = self
            .numeric
            .iter()
            .zip(features.numeric())
            .map(|(coef, value)| coef * value)
            .sum();
        self.intercept + cat + num
    }
}

impl WinProbabilityModel for LogisticModel {
    fn predict_proba(&self, features: &FeatureRecord) -> [f64; 2] {
        let win = sigmoid(self.logit(features));
        [1.0 - win, win]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
