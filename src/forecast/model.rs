use std::collections::HashMap;

use crate::{error::CustomError, utils::required_field};

/// Averaged feature columns, in model input order.
pub const NUMERIC_COLUMNS: [&str; 12] = [
    "Age",
    "Rent",
    "Feeding",
    "TransportCost",
    "Textbooks",
    "Insurance",
    "Medical",
    "SubCost",
    "Social",
    "OtherExpenses",
    "YearlyIncome",
    "AidAmount",
];

/// Profile columns, in model input order.
pub const CATEGORICAL_COLUMNS: [&str; 6] = [
    "Gender",
    "Year",
    "Lifestyle",
    "AccommodationType",
    "FinanceSources",
    "EarnIncome",
];

/// Form field name and label for each entry of [`CATEGORICAL_COLUMNS`].
pub const PROFILE_FIELDS: [(&str, &str); 6] = [
    ("gender", "Gender"),
    ("year", "Year of study"),
    ("lifestyle", "Lifestyle"),
    ("accommodation", "Accommodation type"),
    ("finance", "Finance source"),
    ("income", "Earns an income"),
];

pub type NumericFeatures = [f64; 12];

/// Distinct historical values per profile column, used to populate the form.
pub type ProfileOptions = [Vec<String>; 6];

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub gender: String,
    pub year: String,
    pub lifestyle: String,
    pub accommodation_type: String,
    pub finance_sources: String,
    pub earn_income: String,
}

impl Profile {
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CustomError> {
        Ok(Profile {
            gender: required_field(form, "gender")?,
            year: required_field(form, "year")?,
            lifestyle: required_field(form, "lifestyle")?,
            accommodation_type: required_field(form, "accommodation")?,
            finance_sources: required_field(form, "finance")?,
            earn_income: required_field(form, "income")?,
        })
    }

    /// Values aligned with [`CATEGORICAL_COLUMNS`].
    pub fn values(&self) -> [&str; 6] {
        [
            &self.gender,
            &self.year,
            &self.lifestyle,
            &self.accommodation_type,
            &self.finance_sources,
            &self.earn_income,
        ]
    }
}

/// The single row handed to the prediction model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub numeric: NumericFeatures,
    pub profile: Profile,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PredictionRecord {
    pub id: i64,
    pub user_id: i64,
    pub gender: String,
    pub year: String,
    pub lifestyle: String,
    pub accommodation_type: String,
    pub finance_sources: String,
    pub earn_income: String,
    pub predicted_cost: f64,
    pub created_at: String,
}

impl PredictionRecord {
    pub fn profile(&self) -> Profile {
        Profile {
            gender: self.gender.clone(),
            year: self.year.clone(),
            lifestyle: self.lifestyle.clone(),
            accommodation_type: self.accommodation_type.clone(),
            finance_sources: self.finance_sources.clone(),
            earn_income: self.earn_income.clone(),
        }
    }
}

pub struct NewPrediction<'a> {
    pub user_id: i64,
    pub profile: &'a Profile,
    pub predicted_cost: f64,
}
