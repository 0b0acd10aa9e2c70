use std::sync::Arc;

use anyhow::{Context, Result};
use cost_forecast::{
    auth::{
        controller::AuthController, repository::AccountRepository, service::AuthService,
        session::SessionKeys,
    },
    config::Config,
    db::Database,
    forecast::{
        controller::ForecastController, dataset::HistoricalDataset, estimator::CostEstimator,
        predictor::LinearModel, repository::PredictionRepository, service::ForecastService,
    },
    server::Server,
};
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cost_forecast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Dataset and model are loaded once; the server never starts without them.
    let dataset = HistoricalDataset::from_path(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path))?;
    info!(records = dataset.len(), "historical dataset loaded");
    let model = LinearModel::from_path(&config.model_path)
        .with_context(|| format!("Failed to load model {}", config.model_path))?;
    info!(path = %config.model_path, "prediction model loaded");

    let pool = Database::new_pool(&config.database_url)
        .await
        .context("Failed to create DB pool")?;
    Database::init_schema(&pool, &config.database_url)
        .await
        .context("Failed to create tables")?;

    let sessions = SessionKeys::new(&config.session_secret, config.session_ttl_hours);
    let auth_svc = Arc::new(AuthService::new(AccountRepository::new(pool.clone()), sessions));
    let estimator = Arc::new(CostEstimator::new(Arc::new(dataset), Arc::new(model)));
    let forecast_svc = ForecastService::new(estimator, PredictionRepository::new(pool));

    let server = Server::new(
        config.bind_addr.clone(),
        Arc::new(AuthController::new(Arc::clone(&auth_svc))),
        Arc::new(ForecastController::new(auth_svc, forecast_svc)),
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => warn!("Unable to listen for shutdown signal: {}", e),
        }
    });

    server.start(shutdown_rx).await
}
