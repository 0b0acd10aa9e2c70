#![allow(dead_code)]

use std::sync::Arc;

use cost_forecast::{
    auth::{
        controller::AuthController, repository::AccountRepository, service::AuthService,
        session::SessionKeys,
    },
    db::Database,
    forecast::{
        controller::ForecastController,
        dataset::HistoricalDataset,
        estimator::CostEstimator,
        model::{NUMERIC_COLUMNS, Profile},
        predictor::LinearModel,
        repository::PredictionRepository,
        service::ForecastService,
    },
    server::Server,
};
use rand::Rng;
use serde_json::json;
use sqlx::AnyPool;

pub const DATASET: &str = "\
Gender,Year,Lifestyle,AccommodationType,FinanceSources,EarnIncome,Age,Rent,Feeding,TransportCost,Textbooks,Insurance,Medical,SubCost,Social,OtherExpenses,YearlyIncome,AidAmount
Male,2,Moderate,Hostel,Parents,No,19,100000,150000,20000,15000,5000,8000,3000,10000,7000,0,0
Male,2,Moderate,Hostel,Parents,No,21,120000,170000,24000,17000,5000,9000,3000,12000,9000,0,0
Female,3,Luxury,Off-campus,Scholarship,Yes,23,300000,260000,60000,25000,9000,15000,6000,40000,20000,200000,150000
";

pub async fn setup_test_db() -> AnyPool {
    let timestamp: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    let db_name = format!("test_{}", timestamp);
    let database_url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    // The pool keeps one connection open so the shared in-memory DB survives
    let pool = Database::new_pool(&database_url)
        .await
        .expect("Failed to create in-memory SQLite DB");
    Database::init_schema(&pool, &database_url)
        .await
        .expect("Failed to create test tables");

    pool
}

pub fn test_dataset() -> HistoricalDataset {
    HistoricalDataset::from_reader(DATASET.as_bytes()).expect("Failed to load test dataset")
}

/// Prediction = averaged rent + 1000 for "Male"; every other weight is zero.
pub fn test_model() -> LinearModel {
    let numeric: serde_json::Map<String, serde_json::Value> = NUMERIC_COLUMNS
        .iter()
        .map(|c| (c.to_string(), json!(if *c == "Rent" { 1.0 } else { 0.0 })))
        .collect();
    let artifact = json!({
        "intercept": 0.0,
        "numeric": numeric,
        "categorical": {
            "Gender": { "Male": 1000.0, "Female": 0.0 },
            "Year": { "1": 0.0, "2": 0.0, "3": 0.0 },
            "Lifestyle": { "Moderate": 0.0, "Luxury": 0.0 },
            "AccommodationType": { "Hostel": 0.0, "Off-campus": 0.0 },
            "FinanceSources": { "Parents": 0.0, "Scholarship": 0.0 },
            "EarnIncome": { "No": 0.0, "Yes": 0.0 }
        }
    });
    LinearModel::from_json(&artifact.to_string()).expect("Failed to load test model")
}

pub fn male_profile() -> Profile {
    Profile {
        gender: "Male".to_string(),
        year: "2".to_string(),
        lifestyle: "Moderate".to_string(),
        accommodation_type: "Hostel".to_string(),
        finance_sources: "Parents".to_string(),
        earn_income: "No".to_string(),
    }
}

pub struct TestApp {
    pub pool: AnyPool,
    pub auth_svc: Arc<AuthService>,
    pub forecast_svc: ForecastService,
    pub auth_ctl: AuthController,
    pub forecast_ctl: ForecastController,
}

pub async fn setup_app() -> TestApp {
    let pool = setup_test_db().await;
    let sessions = SessionKeys::new("test-secret", 1);
    let auth_svc = Arc::new(AuthService::new(AccountRepository::new(pool.clone()), sessions));
    let estimator = Arc::new(CostEstimator::new(
        Arc::new(test_dataset()),
        Arc::new(test_model()),
    ));

    TestApp {
        auth_ctl: AuthController::new(Arc::clone(&auth_svc)),
        forecast_ctl: ForecastController::new(
            Arc::clone(&auth_svc),
            ForecastService::new(
                Arc::clone(&estimator),
                PredictionRepository::new(pool.clone()),
            ),
        ),
        forecast_svc: ForecastService::new(estimator, PredictionRepository::new(pool.clone())),
        auth_svc,
        pool,
    }
}

/// Feeds one raw HTTP request through the server and returns the raw response.
pub async fn send(app: &TestApp, raw: &str) -> String {
    let mut out = Vec::new();
    Server::handle_client(raw.as_bytes(), &mut out, &app.auth_ctl, &app.forecast_ctl)
        .await
        .expect("handle_client failed");
    String::from_utf8(out).expect("response is not UTF-8")
}

pub fn get(path: &str, cookie: Option<&str>) -> String {
    format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\n{}\r\n",
        path,
        cookie_header(cookie)
    )
}

pub fn post(path: &str, body: &str, cookie: Option<&str>) -> String {
    format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n{}\r\n{}",
        path,
        body.len(),
        cookie_header(cookie),
        body
    )
}

fn cookie_header(cookie: Option<&str>) -> String {
    cookie
        .map(|cookie| format!("Cookie: {}\r\n", cookie))
        .unwrap_or_default()
}

/// `name=value` of the first `Set-Cookie` header for `name`.
pub fn set_cookie(response: &str, name: &str) -> Option<String> {
    let prefix = format!("Set-Cookie: {}=", name);
    response
        .lines()
        .find(|line| line.starts_with(&prefix))
        .map(|line| {
            let pair = &line["Set-Cookie: ".len()..];
            pair.split(';').next().unwrap_or(pair).to_string()
        })
}

pub async fn prediction_count(pool: &AnyPool) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM predictions")
        .fetch_one(pool)
        .await
        .expect("Failed to count predictions");
    row.0
}
