use std::env;

use dotenvy::dotenv;

use crate::error::CustomError;

pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub dataset_path: String,
    pub model_path: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        dotenv().ok(); // Load environment variables

        let session_ttl_hours = optional("SESSION_TTL_HOURS", "24");
        let session_ttl_hours = match session_ttl_hours.parse::<i64>() {
            Ok(hours) if hours > 0 => hours,
            _ => {
                return Err(CustomError::InvalidConfig(
                    "SESSION_TTL_HOURS".to_string(),
                    session_ttl_hours,
                ));
            }
        };

        Ok(Config {
            database_url: optional("DATABASE_URL", "sqlite://db.sqlite3?mode=rwc"),
            session_secret: required("SESSION_SECRET")?,
            session_ttl_hours,
            dataset_path: optional("DATASET_PATH", "data/undergraduate_data.csv"),
            model_path: optional("MODEL_PATH", "model/model.json"),
            bind_addr: optional("BIND_ADDR", "127.0.0.1:7879"),
        })
    }
}

fn required(name: &str) -> Result<String, CustomError> {
    env::var(name).map_err(|e| CustomError::EnvError(name.to_string(), e))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
