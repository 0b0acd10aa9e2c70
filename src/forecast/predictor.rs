use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::CustomError;

use super::model::{CATEGORICAL_COLUMNS, FeatureRow, NUMERIC_COLUMNS};

/// A fitted regression that turns one feature row into a yearly cost.
pub trait PredictionModel: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<f64, CustomError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    #[default]
    Error,
    Ignore,
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    intercept: f64,
    numeric: HashMap<String, f64>,
    categorical: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    scaler: Option<ScalerArtifact>,
    #[serde(default)]
    handle_unknown: HandleUnknown,
}

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: HashMap<String, f64>,
    scale: HashMap<String, f64>,
}

/// Linear regression over standardized numeric columns and one-hot encoded
/// profile columns, loaded from a JSON artifact.
#[derive(Debug)]
pub struct LinearModel {
    intercept: f64,
    coefficients: [f64; 12],
    mean: [f64; 12],
    scale: [f64; 12],
    levels: [HashMap<String, f64>; 6],
    handle_unknown: HandleUnknown,
}

impl LinearModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CustomError> {
        let json = fs::read_to_string(path).map_err(CustomError::ModelReadError)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CustomError> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(CustomError::ModelParseError)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(mut artifact: ModelArtifact) -> Result<Self, CustomError> {
        let mut coefficients = [0.0; 12];
        let mut mean = [0.0; 12];
        let mut scale = [1.0; 12];
        for (i, column) in NUMERIC_COLUMNS.iter().enumerate() {
            coefficients[i] = *artifact.numeric.get(*column).ok_or_else(|| {
                CustomError::InvalidModel(format!("missing coefficient for '{}'", column))
            })?;

            if let Some(scaler) = &artifact.scaler {
                mean[i] = *scaler.mean.get(*column).ok_or_else(|| {
                    CustomError::InvalidModel(format!("missing scaler mean for '{}'", column))
                })?;
                scale[i] = *scaler.scale.get(*column).ok_or_else(|| {
                    CustomError::InvalidModel(format!("missing scaler scale for '{}'", column))
                })?;
                if scale[i] == 0.0 || !scale[i].is_finite() {
                    return Err(CustomError::InvalidModel(format!(
                        "scaler scale for '{}' must be non-zero",
                        column
                    )));
                }
            }
        }

        let mut levels: [HashMap<String, f64>; 6] = Default::default();
        for (i, column) in CATEGORICAL_COLUMNS.iter().enumerate() {
            levels[i] = artifact.categorical.remove(*column).ok_or_else(|| {
                CustomError::InvalidModel(format!("missing levels for '{}'", column))
            })?;
        }

        Ok(LinearModel {
            intercept: artifact.intercept,
            coefficients,
            mean,
            scale,
            levels,
            handle_unknown: artifact.handle_unknown,
        })
    }
}

impl PredictionModel for LinearModel {
    fn predict(&self, row: &FeatureRow) -> Result<f64, CustomError> {
        let mut prediction = self.intercept;

        for i in 0..NUMERIC_COLUMNS.len() {
            let scaled = (row.numeric[i] - self.mean[i]) / self.scale[i];
            prediction += self.coefficients[i] * scaled;
        }

        for (i, value) in row.profile.values().into_iter().enumerate() {
            match (self.levels[i].get(value), self.handle_unknown) {
                (Some(weight), _) => prediction += weight,
                (None, HandleUnknown::Ignore) => {}
                (None, HandleUnknown::Error) => {
                    return Err(CustomError::UnknownCategory {
                        column: CATEGORICAL_COLUMNS[i],
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(prediction)
    }
}
