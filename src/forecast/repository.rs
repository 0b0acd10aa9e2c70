use chrono::{SecondsFormat, Utc};

use crate::error::CustomError;

use super::model::{NewPrediction, PredictionRecord};

pub struct PredictionRepository {
    pool: sqlx::AnyPool,
}

impl PredictionRepository {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        PredictionRepository { pool }
    }

    pub async fn insert_prediction(
        &self,
        prediction: &NewPrediction<'_>,
    ) -> Result<PredictionRecord, CustomError> {
        let profile = prediction.profile;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO predictions (user_id, gender, year, lifestyle, accommodation_type,
                                     finance_sources, earn_income, predicted_cost, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id"#,
        )
        .bind(prediction.user_id)
        .bind(&profile.gender)
        .bind(&profile.year)
        .bind(&profile.lifestyle)
        .bind(&profile.accommodation_type)
        .bind(&profile.finance_sources)
        .bind(&profile.earn_income)
        .bind(prediction.predicted_cost)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(CustomError::DBError)?;

        Ok(PredictionRecord {
            id: row.0,
            user_id: prediction.user_id,
            gender: profile.gender.clone(),
            year: profile.year.clone(),
            lifestyle: profile.lifestyle.clone(),
            accommodation_type: profile.accommodation_type.clone(),
            finance_sources: profile.finance_sources.clone(),
            earn_income: profile.earn_income.clone(),
            predicted_cost: prediction.predicted_cost,
            created_at,
        })
    }

    pub async fn list_for_account(&self, user_id: i64) -> Result<Vec<PredictionRecord>, CustomError> {
        sqlx::query_as::<_, PredictionRecord>(
            r#"
            SELECT id, user_id, gender, year, lifestyle, accommodation_type,
                   finance_sources, earn_income, predicted_cost, created_at
            FROM predictions
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }

    pub async fn latest_for_account(
        &self,
        user_id: i64,
    ) -> Result<Option<PredictionRecord>, CustomError> {
        sqlx::query_as::<_, PredictionRecord>(
            r#"
            SELECT id, user_id, gender, year, lifestyle, accommodation_type,
                   finance_sources, earn_income, predicted_cost, created_at
            FROM predictions
            WHERE user_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CustomError::DBError)
    }
}
