use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    estimator::CostEstimator,
    model::{NewPrediction, PredictionRecord, Profile, ProfileOptions},
    repository::PredictionRepository,
};
use crate::{auth::model::Account, error::CustomError};

pub struct ForecastService {
    estimator: Arc<CostEstimator>,
    repository: PredictionRepository,
    options: ProfileOptions,
}

impl ForecastService {
    pub fn new(estimator: Arc<CostEstimator>, repository: PredictionRepository) -> Self {
        let options = estimator.dataset().profile_options();
        ForecastService {
            estimator,
            repository,
            options,
        }
    }

    pub fn profile_options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Estimates the yearly cost for `profile` and records it for `account`.
    /// Nothing is stored when the model rejects the profile.
    pub async fn forecast(
        &self,
        account: &Account,
        profile: &Profile,
    ) -> Result<PredictionRecord, CustomError> {
        let predicted_cost = self.estimator.estimate(profile).map_err(|err| {
            warn!(account_id = account.id, "forecast rejected: {}", err);
            err
        })?;

        let prediction = NewPrediction {
            user_id: account.id,
            profile,
            predicted_cost,
        };
        match self.repository.insert_prediction(&prediction).await {
            Ok(record) => {
                info!(
                    account_id = account.id,
                    prediction_id = record.id,
                    predicted_cost,
                    "forecast recorded"
                );
                Ok(record)
            }
            Err(err) => {
                error!("Error insert prediction db: {:?}", err);
                Err(err)
            }
        }
    }

    pub async fn history(&self, account: &Account) -> Result<Vec<PredictionRecord>, CustomError> {
        self.repository.list_for_account(account.id).await
    }

    pub async fn latest(&self, account: &Account) -> Result<Option<PredictionRecord>, CustomError> {
        self.repository.latest_for_account(account.id).await
    }
}
