use std::sync::Arc;

use crate::error::CustomError;

use super::{
    dataset::HistoricalDataset,
    model::{FeatureRow, Profile},
    predictor::PredictionModel,
};

/// Builds model input from the historical records that share a profile and
/// asks the model for a yearly cost.
pub struct CostEstimator {
    dataset: Arc<HistoricalDataset>,
    model: Arc<dyn PredictionModel>,
}

impl CostEstimator {
    pub fn new(dataset: Arc<HistoricalDataset>, model: Arc<dyn PredictionModel>) -> Self {
        CostEstimator { dataset, model }
    }

    pub fn dataset(&self) -> &HistoricalDataset {
        &self.dataset
    }

    /// Means of the matching records, or of the whole dataset when the
    /// profile was never seen.
    pub fn feature_row(&self, profile: &Profile) -> FeatureRow {
        let numeric = self
            .dataset
            .matching_means(profile)
            .unwrap_or(*self.dataset.global_means());
        FeatureRow {
            numeric,
            profile: profile.clone(),
        }
    }

    pub fn estimate(&self, profile: &Profile) -> Result<f64, CustomError> {
        self.model.predict(&self.feature_row(profile))
    }
}
