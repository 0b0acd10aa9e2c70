use std::{collections::BTreeSet, io, path::Path};

use serde::Deserialize;

use crate::error::CustomError;

use super::model::{NUMERIC_COLUMNS, NumericFeatures, Profile, ProfileOptions};

/// One past student's expenditure record. Empty numeric cells load as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Lifestyle")]
    pub lifestyle: String,
    #[serde(rename = "AccommodationType")]
    pub accommodation_type: String,
    #[serde(rename = "FinanceSources")]
    pub finance_sources: String,
    #[serde(rename = "EarnIncome")]
    pub earn_income: String,

    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Rent")]
    pub rent: Option<f64>,
    #[serde(rename = "Feeding")]
    pub feeding: Option<f64>,
    #[serde(rename = "TransportCost")]
    pub transport_cost: Option<f64>,
    #[serde(rename = "Textbooks")]
    pub textbooks: Option<f64>,
    #[serde(rename = "Insurance")]
    pub insurance: Option<f64>,
    #[serde(rename = "Medical")]
    pub medical: Option<f64>,
    #[serde(rename = "SubCost")]
    pub sub_cost: Option<f64>,
    #[serde(rename = "Social")]
    pub social: Option<f64>,
    #[serde(rename = "OtherExpenses")]
    pub other_expenses: Option<f64>,
    #[serde(rename = "YearlyIncome")]
    pub yearly_income: Option<f64>,
    #[serde(rename = "AidAmount")]
    pub aid_amount: Option<f64>,
}

impl HistoricalRecord {
    pub fn categorical(&self) -> [&str; 6] {
        [
            &self.gender,
            &self.year,
            &self.lifestyle,
            &self.accommodation_type,
            &self.finance_sources,
            &self.earn_income,
        ]
    }

    pub fn numeric(&self) -> [Option<f64>; 12] {
        [
            self.age,
            self.rent,
            self.feeding,
            self.transport_cost,
            self.textbooks,
            self.insurance,
            self.medical,
            self.sub_cost,
            self.social,
            self.other_expenses,
            self.yearly_income,
            self.aid_amount,
        ]
    }

    /// Exact, case-sensitive match on all six profile columns.
    pub fn matches(&self, profile: &Profile) -> bool {
        self.categorical() == profile.values()
    }
}

/// Read-only table of historical records with its column means precomputed.
#[derive(Debug)]
pub struct HistoricalDataset {
    records: Vec<HistoricalRecord>,
    global_means: NumericFeatures,
}

impl HistoricalDataset {
    pub fn new(records: Vec<HistoricalRecord>) -> Result<Self, CustomError> {
        if records.is_empty() {
            return Err(CustomError::EmptyDataset);
        }

        let mut global_means = [0.0; 12];
        for (i, mean) in column_means(records.iter()).into_iter().enumerate() {
            global_means[i] = mean.ok_or(CustomError::MissingColumnValues(NUMERIC_COLUMNS[i]))?;
        }

        Ok(HistoricalDataset {
            records,
            global_means,
        })
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, CustomError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CustomError> {
        let rdr = csv::Reader::from_path(path).map_err(CustomError::DatasetError)?;
        Self::from_csv(rdr)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, CustomError> {
        let records = rdr
            .deserialize()
            .collect::<Result<Vec<HistoricalRecord>, csv::Error>>()
            .map_err(CustomError::DatasetError)?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn global_means(&self) -> &NumericFeatures {
        &self.global_means
    }

    /// Column means over the records matching `profile`, or `None` when no
    /// record matches. A column with no values in the subset takes its
    /// global mean.
    pub fn matching_means(&self, profile: &Profile) -> Option<NumericFeatures> {
        let mut subset = self.records.iter().filter(|r| r.matches(profile)).peekable();
        subset.peek()?;

        let mut means = self.global_means;
        for (i, mean) in column_means(subset).into_iter().enumerate() {
            if let Some(mean) = mean {
                means[i] = mean;
            }
        }
        Some(means)
    }

    /// Sorted distinct values of each profile column.
    pub fn profile_options(&self) -> ProfileOptions {
        let mut levels: [BTreeSet<&str>; 6] = Default::default();
        for record in &self.records {
            for (i, value) in record.categorical().into_iter().enumerate() {
                levels[i].insert(value);
            }
        }
        levels.map(|set| set.into_iter().map(str::to_string).collect())
    }
}

fn column_means<'a>(records: impl Iterator<Item = &'a HistoricalRecord>) -> [Option<f64>; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];
    for record in records {
        for (i, value) in record.numeric().into_iter().enumerate() {
            if let Some(value) = value {
                sums[i] += value;
                counts[i] += 1;
            }
        }
    }

    let mut means = [None; 12];
    for i in 0..12 {
        if counts[i] > 0 {
            means[i] = Some(sums[i] / counts[i] as f64);
        }
    }
    means
}
